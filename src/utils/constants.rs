//! Shared constants and invariants

/// Lead time before actual expiry at which a token is treated as invalid.
pub const DEFAULT_SAFETY_MARGIN_SECS: u64 = 60;
/// Upper bound on any single platform round trip.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

// Header names
pub const HEADER_FORWARDED_PROTO: &str = "x-forwarded-proto";
pub const HEADER_ACCESS_TOKEN: &str = "x-acs-dingtalk-access-token";
