use chrono::Utc;

/// Current wall-clock time as UNIX seconds.
pub fn now_ts() -> i64 {
    Utc::now().timestamp()
}
