use crate::auth::fetcher::IssuedToken;
use crate::helpers::time::now_ts;

/// A cached bearer token together with its validity window.
///
/// A credential is created by a successful fetch and replaced wholesale by
/// the next one; it is never mutated in place, so readers always observe a
/// token paired with its own expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    /// UNIX seconds at which the token was obtained.
    pub issued_at: i64,
    /// UNIX seconds past which the remote no longer accepts the token.
    pub expires_at: i64,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, issued_at: i64, expires_at: i64) -> Self {
        Self {
            access_token: access_token.into(),
            issued_at,
            expires_at,
        }
    }

    /// Build a credential from a fetch that completed just now.
    pub fn issued_now(token: IssuedToken) -> Self {
        let now = now_ts();
        Self {
            access_token: token.access_token,
            issued_at: now,
            expires_at: now + token.expires_in as i64,
        }
    }

    /// A credential is served only while it stays clear of expiry by the
    /// safety margin, so a request started now cannot cross the expiry
    /// boundary while in flight.
    pub fn is_fresh(&self, safety_margin_seconds: u64) -> bool {
        now_ts() + (safety_margin_seconds as i64) < self.expires_at
    }
}
