use std::future::Future;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A freshly issued bearer token and how long the remote will honor it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    /// Validity in seconds, counted from the moment of issuance.
    pub expires_in: u64,
}

/// Failure modes of one token issuance round trip.
///
/// The cache treats all of them the same way (do not update, propagate);
/// the split exists so callers can log and react to the root cause.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint could not be reached or the connection broke mid-request.
    #[error("token request transport failure: {0}")]
    Transport(#[source] BoxError),
    /// The endpoint answered and refused to issue a token.
    #[error("token request rejected by remote (code {code}): {message}")]
    Rejected { code: i64, message: String },
    /// The endpoint answered with a body that is not a credential.
    #[error("token response decode failure: {0}")]
    Decode(#[source] BoxError),
}

impl FetchError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }

    pub fn decode(err: impl Into<BoxError>) -> Self {
        Self::Decode(err.into())
    }
}

/// Capability to perform one network round trip for a fresh token.
///
/// Client credentials are bound at construction of the implementing value;
/// the cache only decides when a round trip is necessary. Implementations
/// must not retry internally, that policy belongs to the caller.
pub trait TokenFetcher: Send + Sync {
    fn fetch_token(&self) -> impl Future<Output = Result<IssuedToken, FetchError>> + Send;
}
