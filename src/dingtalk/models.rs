//! Wire models for the platform APIs.
//!
//! The platform omits empty fields, so response structs default every
//! field instead of failing the decode.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// -------------------------------
// Token issuance (legacy oapi host)
// -------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
}

// -------------------------------
// OAuth user token exchange
// -------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccessTokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub code: String,
    pub refresh_token: String,
    pub grant_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAccessTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expire_in: i64,
    pub corp_id: String,
    /// Absolute expiry (UNIX seconds), computed client-side from
    /// `expire_in` when the response is received.
    #[serde(skip)]
    pub expire_time: i64,
}

// -------------------------------
// Contacts
// -------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactUser {
    pub nick: String,
    pub avatar_url: String,
    pub mobile: String,
    pub open_id: String,
    pub union_id: String,
    pub email: String,
    pub state_code: String,
}

// -------------------------------
// Legacy "top" envelope and users
// -------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TopResult<T> {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub request_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopGetByUnionIdResponse {
    pub contact_type: i64,
    pub userid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopUserRole {
    pub group_name: String,
    pub name: String,
    pub id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopUserDeptOrder {
    pub dept_id: i64,
    pub order: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopUserLeaderInDept {
    pub leader: bool,
    pub dept_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopUser {
    pub unionid: String,
    pub userid: String,
    pub name: String,
    pub title: String,
    pub email: String,
    pub mobile: String,
    pub telephone: String,
    pub avatar: String,
    pub job_number: String,
    pub remark: String,
    pub work_place: String,
    pub state_code: String,
    pub extension: String,
    pub boss: bool,
    pub admin: bool,
    pub senior: bool,
    pub active: bool,
    pub real_authed: bool,
    pub exclusive_account: bool,
    pub hide_mobile: bool,
    pub dept_id_list: Vec<i64>,
    pub dept_order_list: Vec<TopUserDeptOrder>,
    pub leader_in_dept: Vec<TopUserLeaderInDept>,
    pub role_list: Vec<TopUserRole>,
    /// The legacy endpoint sends a non RFC-3339 timestamp; kept verbatim.
    pub create_time: Option<String>,
}

// -------------------------------
// Calendars
// -------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Calendar {
    pub id: String,
    pub summary: String,
    pub description: String,
    pub time_zone: String,
    #[serde(rename = "eTag")]
    pub e_tag: String,
    /// "primary" marks the user's main calendar.
    #[serde(rename = "type")]
    pub kind: String,
    pub privilege: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalendarResponse {
    pub response: Option<CalendarBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalendarBody {
    pub calendars: Option<Vec<Calendar>>,
}

// -------------------------------
// Calendar events
// -------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventTime {
    pub date: String,
    pub date_time: Option<DateTime<FixedOffset>>,
    pub time_zone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventRecurrencePattern {
    #[serde(rename = "type")]
    pub kind: String,
    pub day_of_month: i64,
    pub days_of_week: String,
    pub index: String,
    pub interval: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventRecurrenceRange {
    #[serde(rename = "type")]
    pub kind: String,
    pub end_date: Option<DateTime<FixedOffset>>,
    pub number_of_occurrences: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventRecurrence {
    pub pattern: EventRecurrencePattern,
    pub range: EventRecurrenceRange,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventAttendee {
    pub id: String,
    pub display_name: String,
    pub response_status: String,
    #[serde(rename = "self")]
    pub is_self: bool,
    pub is_optional: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventOrganizer {
    pub id: String,
    pub display_name: String,
    pub response_status: String,
    #[serde(rename = "self")]
    pub is_self: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventLocation {
    pub display_name: String,
    pub meeting_rooms: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventOnlineMeetingInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub conference_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventReminder {
    pub method: String,
    pub minutes: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventMeetingRoom {
    pub room_id: String,
    pub response_status: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventCategory {
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub origin_start: EventTime,
    pub end: EventTime,
    pub is_all_day: bool,
    pub recurrence: EventRecurrence,
    pub attendees: Vec<EventAttendee>,
    pub organizer: EventOrganizer,
    pub location: EventLocation,
    pub series_master_id: String,
    pub create_time: Option<DateTime<FixedOffset>>,
    pub update_time: Option<DateTime<FixedOffset>>,
    pub status: String,
    pub online_meeting_info: EventOnlineMeetingInfo,
    pub reminders: Vec<EventReminder>,
    pub meeting_rooms: Vec<EventMeetingRoom>,
    pub categories: Vec<EventCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventResponse {
    pub next_token: String,
    pub events: Option<Vec<CalendarEvent>>,
    pub sync_token: String,
}

// -------------------------------
// To-do tasks
// -------------------------------

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoTaskRequestDetailUrl {
    pub app_url: String,
    pub pc_url: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoTaskRequestNotifyConfigs {
    pub ding_notify: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoTaskRequest {
    pub source_id: String,
    pub subject: String,
    pub creator_id: String,
    pub description: String,
    /// Due instant in UNIX milliseconds.
    pub due_time: i64,
    pub executor_ids: Vec<String>,
    pub participant_ids: Vec<String>,
    pub detail_url: CreateTodoTaskRequestDetailUrl,
    pub is_only_show_executor: bool,
    pub notify_configs: CreateTodoTaskRequestNotifyConfigs,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTodoTaskResponse {
    pub id: String,
    pub biz_tag: String,
    pub created_time: i64,
    pub creator_id: String,
    pub done: bool,
    pub due_time: i64,
    pub finish_time: i64,
    pub modified_time: i64,
    pub modifier_id: String,
    pub participant_ids: Vec<String>,
    pub priority: i64,
    pub request_id: String,
    pub source: String,
    pub start_time: i64,
    pub subject: String,
    pub tenant_id: String,
    pub tenant_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_decodes_error_shape() {
        let body = r#"{"errcode":40001,"errmsg":"invalid appkey"}"#;
        let parsed: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.errcode, 40001);
        assert_eq!(parsed.errmsg, "invalid appkey");
        assert!(parsed.access_token.is_empty());
        assert_eq!(parsed.expires_in, 0);
    }

    #[test]
    fn calendar_event_decodes_sparse_payload() {
        let body = r#"{
            "id": "evt-1",
            "summary": "standup",
            "isAllDay": false,
            "start": {"dateTime": "2024-12-05T09:30:00+08:00", "timeZone": "Asia/Shanghai"},
            "end": {"dateTime": "2024-12-05T10:00:00+08:00", "timeZone": "Asia/Shanghai"},
            "organizer": {"displayName": "alice", "self": true},
            "attendees": [{"id": "u-1", "displayName": "bob", "responseStatus": "accepted"}]
        }"#;
        let event: CalendarEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.id, "evt-1");
        assert!(event.start.date_time.is_some());
        assert!(event.organizer.is_self);
        assert_eq!(event.attendees.len(), 1);
        assert!(event.reminders.is_empty());
    }

    #[test]
    fn top_envelope_decodes_without_result() {
        let body = r#"{"errcode":60121,"errmsg":"user not found","request_id":"r-1"}"#;
        let parsed: TopResult<TopGetByUnionIdResponse> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.errcode, 60121);
        assert!(parsed.result.is_none());
    }

    #[test]
    fn todo_request_serializes_camel_case() {
        let request = CreateTodoTaskRequest {
            subject: "ship it".into(),
            creator_id: "u-1".into(),
            due_time: 1_733_380_000_000,
            executor_ids: vec!["u-1".into()],
            participant_ids: vec!["u-1".into()],
            ..Default::default()
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["subject"], "ship it");
        assert_eq!(body["creatorId"], "u-1");
        assert_eq!(body["dueTime"], 1_733_380_000_000_i64);
        assert!(body["detailUrl"]["appUrl"].as_str().unwrap().is_empty());
    }
}
