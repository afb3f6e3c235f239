use std::time::Duration;

use reqwest::Client as HttpClient;
use tracing::error;

use crate::auth::fetcher::{FetchError, IssuedToken, TokenFetcher};
use crate::dingtalk::models::TokenResponse;
use crate::dingtalk::OAPI_BASE_URL;
use crate::utils::constants::DEFAULT_HTTP_TIMEOUT_SECS;

/// Issues app access tokens from the legacy token endpoint.
///
/// Holds the app credentials for the lifetime of the client; one value of
/// this type backs one `TokenCache`.
#[derive(Debug, Clone)]
pub struct AppTokenSource {
    client_id: String,
    client_secret: String,
    base_url: String,
    http: HttpClient,
}

impl AppTokenSource {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::with_base_url(client_id, client_secret, OAPI_BASE_URL)
    }

    pub fn with_base_url(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        // The cache imposes no deadline of its own, so the transport must.
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: base_url.into(),
            http,
        }
    }
}

impl TokenFetcher for AppTokenSource {
    async fn fetch_token(&self) -> Result<IssuedToken, FetchError> {
        let response = self
            .http
            .get(format!("{}/gettoken", self.base_url))
            .query(&[
                ("appkey", self.client_id.as_str()),
                ("appsecret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(FetchError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::transport)?;
        let parsed: TokenResponse = serde_json::from_str(&body).map_err(FetchError::decode)?;

        if !status.is_success() || parsed.errcode != 0 {
            error!(
                status = status.as_u16(),
                code = parsed.errcode,
                message = %parsed.errmsg,
                "app token issuance rejected"
            );
            let code = if parsed.errcode != 0 {
                parsed.errcode
            } else {
                status.as_u16() as i64
            };
            return Err(FetchError::Rejected {
                code,
                message: parsed.errmsg,
            });
        }

        Ok(IssuedToken {
            access_token: parsed.access_token,
            expires_in: parsed.expires_in,
        })
    }
}
