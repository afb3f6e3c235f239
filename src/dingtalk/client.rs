use chrono::{DateTime, FixedOffset, Utc};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::auth::fetcher::FetchError;
use crate::auth::token_cache::TokenCache;
use crate::dingtalk::models::{
    Calendar, CalendarEvent, CalendarResponse, ContactUser, CreateTodoTaskRequest,
    CreateTodoTaskResponse, EventResponse, TopGetByUnionIdResponse, TopResult, TopUser,
    UserAccessTokenRequest, UserAccessTokenResponse,
};
use crate::dingtalk::token_source::AppTokenSource;
use crate::dingtalk::{API_BASE_URL, OAPI_BASE_URL};
use crate::helpers::time::now_ts;
use crate::utils::constants::{DEFAULT_HTTP_TIMEOUT_SECS, HEADER_ACCESS_TOKEN};

/// Failure modes of a platform API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Token acquisition failed before the call could be made.
    #[error("access token acquisition failed")]
    Auth(#[from] FetchError),
    #[error("platform request failed")]
    Transport(#[from] reqwest::Error),
    #[error("platform response decode failed")]
    Decode(#[from] serde_json::Error),
    /// The platform answered and reported failure.
    #[error("platform rejected request (code {code}): {message}")]
    Api { code: i64, message: String },
    /// A 2xx response without the payload the operation needs, which the
    /// platform uses to signal missing permissions.
    #[error("{0}")]
    MissingData(&'static str),
}

/// Client for the DingTalk open platform.
///
/// Owns the app credential cache: operations that authenticate as the app
/// obtain their token from it and trigger at most one issuance round trip
/// per expiry cycle, no matter how many calls run concurrently.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    api_base: String,
    oapi_base: String,
    token_cache: TokenCache<AppTokenSource>,
    client_id: String,
    client_secret: String,
}

impl Client {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::with_base_urls(client_id, client_secret, API_BASE_URL, OAPI_BASE_URL)
    }

    /// Client pointed at alternative hosts. Tests aim this at a mock
    /// server; production code has no reason to.
    pub fn with_base_urls(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_base: impl Into<String>,
        oapi_base: impl Into<String>,
    ) -> Self {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        let oapi_base = oapi_base.into();
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        let token_source = AppTokenSource::with_base_url(
            client_id.as_str(),
            client_secret.as_str(),
            oapi_base.clone(),
        );
        Self {
            http,
            api_base: api_base.into(),
            oapi_base,
            token_cache: TokenCache::new(token_source),
            client_id,
            client_secret,
        }
    }

    /// App access token, served from the cache.
    pub async fn app_access_token(&self) -> Result<String, FetchError> {
        self.token_cache.get_token().await
    }

    /// Exchange an OAuth authorization code for a user access token.
    pub async fn user_access_token(
        &self,
        code: &str,
    ) -> Result<UserAccessTokenResponse, ApiError> {
        let request = UserAccessTokenRequest {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            code: code.to_string(),
            refresh_token: String::new(),
            grant_type: "authorization_code".to_string(),
        };
        let response = self
            .http
            .post(format!("{}/v1.0/oauth2/userAccessToken", self.api_base))
            .json(&request)
            .send()
            .await?;
        let mut token: UserAccessTokenResponse = read_json(response).await?;
        token.expire_time = now_ts() + token.expire_in;
        Ok(token)
    }

    /// Contact profile for a union id; `"me"` resolves to the token owner.
    pub async fn contact_user(&self, token: &str, union_id: &str) -> Result<ContactUser, ApiError> {
        let response = self
            .http
            .get(format!("{}/v1.0/contact/users/{}", self.api_base, union_id))
            .header(HEADER_ACCESS_TOKEN, token)
            .send()
            .await?;
        read_json(response).await
    }

    /// Union id of the user the token belongs to.
    pub async fn my_union_id(&self, token: &str) -> Result<String, ApiError> {
        let user = self.contact_user(token, "me").await?;
        Ok(user.union_id)
    }

    /// Calendars visible to the user.
    pub async fn calendars(&self, token: &str, union_id: &str) -> Result<Vec<Calendar>, ApiError> {
        let union_id = self.resolve_union_id(token, union_id).await?;
        let response = self
            .http
            .get(format!(
                "{}/v1.0/calendar/users/{}/calendars",
                self.api_base, union_id
            ))
            .header(HEADER_ACCESS_TOKEN, token)
            .send()
            .await?;
        let parsed: CalendarResponse = read_json(response).await?;
        parsed
            .response
            .and_then(|body| body.calendars)
            .ok_or(ApiError::MissingData(
                "calendar list missing from response, possibly no permission",
            ))
    }

    /// Today's events of one calendar.
    pub async fn calendar_events(
        &self,
        token: &str,
        union_id: &str,
        calendar_id: &str,
    ) -> Result<Vec<CalendarEvent>, ApiError> {
        let union_id = self.resolve_union_id(token, union_id).await?;
        let (time_min, time_max) = today_window();
        let response = self
            .http
            .get(format!(
                "{}/v1.0/calendar/users/{}/calendars/{}/events",
                self.api_base, union_id, calendar_id
            ))
            .query(&[("timeMin", time_min.as_str()), ("timeMax", time_max.as_str())])
            .header(HEADER_ACCESS_TOKEN, token)
            .send()
            .await?;
        let parsed: EventResponse = read_json(response).await?;
        parsed.events.ok_or(ApiError::MissingData(
            "event list missing from response, possibly no permission",
        ))
    }

    /// Today's events across the user's primary calendar.
    // TODO: fetch events from shared and subscribed calendars as well
    pub async fn events(&self, token: &str, union_id: &str) -> Result<Vec<CalendarEvent>, ApiError> {
        let union_id = self.resolve_union_id(token, union_id).await?;
        let calendars = self.calendars(token, &union_id).await?;

        let mut all_events = Vec::new();
        for calendar in calendars.iter().filter(|c| c.kind == "primary") {
            let events = self
                .calendar_events(token, &union_id, &calendar.id)
                .await?;
            all_events.extend(events);
        }
        Ok(all_events)
    }

    /// Employee user id for a union id, via the legacy top API.
    pub async fn user_id_by_union_id(&self, union_id: &str) -> Result<String, ApiError> {
        let token = self.app_access_token().await?;
        let response = self
            .http
            .post(format!("{}/topapi/user/getbyunionid", self.oapi_base))
            .query(&[("access_token", token.as_str())])
            .json(&json!({ "unionid": union_id }))
            .send()
            .await?;
        let result: TopGetByUnionIdResponse = top_result(response).await?;
        Ok(result.userid)
    }

    /// Full employee profile, via the legacy top API.
    pub async fn user_from_top(&self, user_id: &str) -> Result<TopUser, ApiError> {
        let token = self.app_access_token().await?;
        let response = self
            .http
            .post(format!("{}/topapi/v2/user/get", self.oapi_base))
            .query(&[("access_token", token.as_str())])
            .json(&json!({ "userid": user_id }))
            .send()
            .await?;
        top_result(response).await
    }

    /// Create a to-do task with the creator as executor and participant.
    pub async fn create_todo_task(
        &self,
        creator: &str,
        subject: &str,
        due_time: DateTime<Utc>,
    ) -> Result<CreateTodoTaskResponse, ApiError> {
        let token = self.app_access_token().await?;
        let request = CreateTodoTaskRequest {
            subject: subject.to_string(),
            due_time: due_time.timestamp_millis(),
            creator_id: creator.to_string(),
            executor_ids: vec![creator.to_string()],
            participant_ids: vec![creator.to_string()],
            ..Default::default()
        };
        let response = self
            .http
            .post(format!("{}/v1.0/todo/users/{}/tasks", self.api_base, creator))
            .query(&[("operatorId", creator)])
            .header(HEADER_ACCESS_TOKEN, token)
            .json(&request)
            .send()
            .await?;
        read_json(response).await
    }

    async fn resolve_union_id(&self, token: &str, union_id: &str) -> Result<String, ApiError> {
        if union_id.is_empty() || union_id == "me" {
            self.my_union_id(token).await
        } else {
            Ok(union_id.to_string())
        }
    }
}

/// Decode a 2xx body, surfacing non-2xx responses as platform rejections.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Api {
            code: status.as_u16() as i64,
            message: body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Unwrap the legacy top envelope, turning embedded error codes into errors.
async fn top_result<T: DeserializeOwned + Default>(response: reqwest::Response) -> Result<T, ApiError> {
    let envelope: TopResult<T> = read_json(response).await?;
    if envelope.errcode != 0 {
        return Err(ApiError::Api {
            code: envelope.errcode,
            message: envelope.errmsg,
        });
    }
    envelope
        .result
        .ok_or(ApiError::MissingData("result missing from top response"))
}

/// Bounds of the current day in the platform's calendar zone (UTC+8).
fn today_window() -> (String, String) {
    let offset = FixedOffset::east_opt(8 * 3600).expect("fixed offset in range");
    let today = Utc::now().with_timezone(&offset).format("%Y-%m-%d").to_string();
    (
        format!("{today}T00:00:00+08:00"),
        format!("{today}T23:59:59+08:00"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_window_spans_one_day() {
        let (min, max) = today_window();
        assert!(min.ends_with("T00:00:00+08:00"));
        assert!(max.ends_with("T23:59:59+08:00"));
        assert_eq!(&min[..10], &max[..10]);
    }
}
