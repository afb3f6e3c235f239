//! Access token caching.
//!
//! `TokenCache` hands out a valid bearer token to concurrent callers,
//! refreshing through a `TokenFetcher` only when the cached credential is
//! missing or about to expire.

pub mod credential;
pub mod fetcher;
pub mod token_cache;

pub use crate::auth::credential::Credential;
pub use crate::auth::fetcher::{FetchError, IssuedToken, TokenFetcher};
pub use crate::auth::token_cache::TokenCache;
