//! # dingbase
//!
//! Integration helpers for the DingTalk open platform.
//!
//! The centerpiece is a lazy-refreshing access token cache that serves a
//! valid bearer token to any number of concurrent callers while performing
//! at most one issuance round trip per expiry cycle. Around it sit a REST
//! client for the platform APIs (OAuth token exchange, contacts, calendars,
//! to-do tasks), structured logging with request-scoped trace propagation,
//! and a couple of HTTP utilities.
//!
//! Modules:
//! - `auth`: credential cache and the token fetching contract
//! - `dingtalk`: REST client and wire models
//! - `logging`: tracing initialization and trace scope propagation
//! - `utils`: HTTP helpers and shared constants

pub mod auth;
pub mod dingtalk;
pub mod helpers;
pub mod logging;
pub mod tests;
pub mod utils;

pub use crate::auth::credential::Credential;
pub use crate::auth::fetcher::{FetchError, IssuedToken, TokenFetcher};
pub use crate::auth::token_cache::TokenCache;
pub use crate::dingtalk::client::Client;
