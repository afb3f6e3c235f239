// src/tests/common/mod.rs
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::json;

use crate::dingtalk::client::Client;

pub const TEST_APP_KEY: &str = "test-app-key";
pub const TEST_APP_SECRET: &str = "test-app-secret";

/// Client wired to a mock server standing in for both platform hosts.
pub fn mock_client(server: &MockServer) -> Client {
    Client::with_base_urls(
        TEST_APP_KEY,
        TEST_APP_SECRET,
        server.base_url(),
        server.base_url(),
    )
}

/// Mount the app token endpoint; the returned handle counts issuances.
pub async fn mount_token_endpoint<'a>(
    server: &'a MockServer,
    token: &str,
    expires_in: u64,
) -> Mock<'a> {
    let body = json!({
        "errcode": 0,
        "errmsg": "ok",
        "access_token": token,
        "expires_in": expires_in,
    });
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/gettoken")
                .query_param("appkey", TEST_APP_KEY)
                .query_param("appsecret", TEST_APP_SECRET);
            then.status(200).json_body(body.clone());
        })
        .await
}
