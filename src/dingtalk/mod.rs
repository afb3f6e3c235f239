//! REST client for the DingTalk open platform.
//!
//! Two API generations are involved: the current `api.dingtalk.com`
//! surface, which authenticates through the `x-acs-dingtalk-access-token`
//! header, and the legacy `oapi.dingtalk.com` ("top") surface, which takes
//! the token as a query parameter and also issues app access tokens.

pub mod client;
pub mod models;
pub mod token_source;

/// Current-generation API host.
pub const API_BASE_URL: &str = "https://api.dingtalk.com";
/// Legacy API host; also the token issuance endpoint.
pub const OAPI_BASE_URL: &str = "https://oapi.dingtalk.com";

pub use crate::dingtalk::client::{ApiError, Client};
pub use crate::dingtalk::token_source::AppTokenSource;
