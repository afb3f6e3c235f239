// Request/response marshaling of the REST client against a mock platform:
// auth headers, query parameters, body shapes, and the permission-deny
// response forms.

#[cfg(test)]
mod test {
    use anyhow::Result;
    use chrono::{TimeZone, Utc};
    use httpmock::prelude::*;
    use serde_json::json;

    use crate::dingtalk::client::ApiError;
    use crate::helpers::time::now_ts;
    use crate::tests::common::{mock_client, mount_token_endpoint};
    use crate::utils::constants::HEADER_ACCESS_TOKEN;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn user_access_token_exchange_computes_absolute_expiry() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1.0/oauth2/userAccessToken")
                    .json_body_includes(
                        r#"{"code": "auth-code-1", "grantType": "authorization_code"}"#,
                    );
                then.status(200).json_body(json!({
                    "accessToken": "user-tok",
                    "refreshToken": "refresh-tok",
                    "expireIn": 7200,
                    "corpId": "corp-1",
                }));
            })
            .await;

        let client = mock_client(&server);
        let before = now_ts();
        let token = client.user_access_token("auth-code-1").await?;

        assert_eq!(token.access_token, "user-tok");
        assert_eq!(token.refresh_token, "refresh-tok");
        assert!(token.expire_time >= before + 7200);
        assert!(token.expire_time <= now_ts() + 7200);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn contact_user_sends_token_header() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1.0/contact/users/u-123")
                    .header(HEADER_ACCESS_TOKEN, "user-tok");
                then.status(200).json_body(json!({
                    "nick": "alice",
                    "unionId": "u-123",
                    "email": "alice@example.com",
                }));
            })
            .await;

        let client = mock_client(&server);
        let user = client.contact_user("user-tok", "u-123").await?;
        assert_eq!(user.nick, "alice");
        assert_eq!(user.union_id, "u-123");
        assert!(user.mobile.is_empty());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn me_resolves_through_contact_lookup() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1.0/contact/users/me");
                then.status(200).json_body(json!({"unionId": "u-self"}));
            })
            .await;
        let calendars_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v1.0/calendar/users/u-self/calendars");
                then.status(200).json_body(json!({
                    "response": {"calendars": [
                        {"id": "cal-1", "summary": "work", "type": "primary"},
                    ]}
                }));
            })
            .await;

        let client = mock_client(&server);
        let calendars = client.calendars("user-tok", "me").await?;
        assert_eq!(calendars.len(), 1);
        assert_eq!(calendars[0].id, "cal-1");
        calendars_mock.assert_hits_async(1).await;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn missing_calendar_payload_reads_as_permission_problem() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1.0/calendar/users/u-1/calendars");
                then.status(200).json_body(json!({"response": null}));
            })
            .await;

        let client = mock_client(&server);
        let err = client.calendars("user-tok", "u-1").await.unwrap_err();
        assert!(matches!(err, ApiError::MissingData(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn events_cover_primary_calendars_only() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1.0/calendar/users/u-1/calendars");
                then.status(200).json_body(json!({
                    "response": {"calendars": [
                        {"id": "cal-main", "type": "primary"},
                        {"id": "cal-shared", "type": "shared"},
                    ]}
                }));
            })
            .await;
        let events_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1.0/calendar/users/u-1/calendars/cal-main/events")
                    .query_param_exists("timeMin")
                    .query_param_exists("timeMax");
                then.status(200).json_body(json!({
                    "events": [
                        {"id": "evt-1", "summary": "standup"},
                        {"id": "evt-2", "summary": "retro"},
                    ]
                }));
            })
            .await;

        let client = mock_client(&server);
        let events = client.events("user-tok", "u-1").await?;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "evt-1");
        // the shared calendar has no mounted events route, so a lookup
        // against it would have failed the call
        events_mock.assert_hits_async(1).await;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn top_user_lookup_authenticates_via_query_token() -> Result<()> {
        let server = MockServer::start_async().await;
        mount_token_endpoint(&server, "app-tok", 3600).await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/topapi/user/getbyunionid")
                    .query_param("access_token", "app-tok")
                    .json_body_includes(r#"{"unionid": "u-9"}"#);
                then.status(200).json_body(json!({
                    "errcode": 0,
                    "errmsg": "ok",
                    "result": {"contact_type": 0, "userid": "emp-7"},
                    "request_id": "r-1",
                }));
            })
            .await;

        let client = mock_client(&server);
        assert_eq!(client.user_id_by_union_id("u-9").await?, "emp-7");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn top_error_code_becomes_api_error() {
        let server = MockServer::start_async().await;
        mount_token_endpoint(&server, "app-tok", 3600).await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/topapi/v2/user/get");
                then.status(200).json_body(json!({
                    "errcode": 88,
                    "errmsg": "ip not in whitelist",
                }));
            })
            .await;

        let client = mock_client(&server);
        let err = client.user_from_top("emp-7").await.unwrap_err();
        match err {
            ApiError::Api { code, message } => {
                assert_eq!(code, 88);
                assert_eq!(message, "ip not in whitelist");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn todo_task_creation_marshals_creator_roles() -> Result<()> {
        let server = MockServer::start_async().await;
        let token_mock = mount_token_endpoint(&server, "app-tok", 3600).await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1.0/todo/users/u-1/tasks")
                    .query_param("operatorId", "u-1")
                    .header(HEADER_ACCESS_TOKEN, "app-tok")
                    .json_body_includes(
                        r#"{
                            "subject": "file the report",
                            "creatorId": "u-1",
                            "executorIds": ["u-1"],
                            "participantIds": ["u-1"]
                        }"#,
                    );
                then.status(200).json_body(json!({
                    "id": "task-1",
                    "subject": "file the report",
                    "creatorId": "u-1",
                    "done": false,
                }));
            })
            .await;

        let client = mock_client(&server);
        let due = Utc.with_ymd_and_hms(2026, 8, 6, 10, 0, 0).unwrap();
        let task = client.create_todo_task("u-1", "file the report", due).await?;

        assert_eq!(task.id, "task-1");
        assert!(!task.done);
        token_mock.assert_hits_async(1).await;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn non_success_status_surfaces_as_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1.0/contact/users/u-1");
                then.status(403).body("forbidden");
            })
            .await;

        let client = mock_client(&server);
        let err = client.contact_user("user-tok", "u-1").await.unwrap_err();
        assert!(matches!(err, ApiError::Api { code: 403, .. }));
    }
}
