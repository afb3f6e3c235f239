use http::request::Parts;
use http::HeaderMap;
use tracing::info;

use crate::utils::constants::HEADER_FORWARDED_PROTO;

/// Scheme of the original client request when running behind a reverse
/// proxy that sets the forwarded-proto header.
pub fn forwarded_proto(headers: &HeaderMap) -> &'static str {
    match headers
        .get(HEADER_FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
    {
        Some("https") => "https",
        _ => "http",
    }
}

/// Log an inbound request (method, target, headers, body) for diagnostics.
pub fn dump_request(parts: &Parts, body: &[u8]) {
    let headers = parts
        .headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("<binary>")))
        .collect::<Vec<_>>()
        .join("\n");
    info!(
        "{} {}\n{}\n\n{}",
        parts.method,
        parts.uri,
        headers,
        String::from_utf8_lossy(body)
    );
}
