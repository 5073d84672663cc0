use crate::ipc::error::HandlerErr;
use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use std::str::FromStr;

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

/// Required string that must be non-empty after trimming; returned trimmed.
pub fn get_required_text(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    let raw = get_required_str(params, key)?;
    let t = raw.trim();
    if t.is_empty() {
        return Err(HandlerErr::bad_params(format!("{} must not be empty", key)));
    }
    Ok(t.to_string())
}

pub fn get_optional_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn get_required_bool(params: &serde_json::Value, key: &str) -> Result<bool, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_bool())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_required_enum<T>(params: &serde_json::Value, key: &str) -> Result<T, HandlerErr>
where
    T: FromStr<Err = String>,
{
    get_required_str(params, key)?
        .parse::<T>()
        .map_err(HandlerErr::bad_params)
}

/// Deserializes `params[key]` into a typed record.
pub fn get_required_object<T: DeserializeOwned>(
    params: &serde_json::Value,
    key: &str,
) -> Result<T, HandlerErr> {
    let Some(v) = params.get(key) else {
        return Err(HandlerErr::bad_params(format!("missing {}", key)));
    };
    serde_json::from_value(v.clone()).map_err(|e| HandlerErr {
        code: "bad_params",
        message: format!("invalid {}: {}", key, e),
        details: None,
    })
}

pub fn require_date(value: &str, key: &str) -> Result<(), HandlerErr> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| HandlerErr::bad_params(format!("{} must be YYYY-MM-DD", key)))
}

/// 24-hour `HH:MM`, zero padded so string order matches time order.
pub fn require_hhmm(value: &str, key: &str) -> Result<(), HandlerErr> {
    if value.len() != 5 || NaiveTime::parse_from_str(value, "%H:%M").is_err() {
        return Err(HandlerErr::bad_params(format!("{} must be HH:MM", key)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttendanceMethod;
    use serde_json::json;

    #[test]
    fn enum_params_are_validated() {
        let p = json!({ "method": "proximity", "bad": "sonar" });
        let m: AttendanceMethod = get_required_enum(&p, "method").ok().expect("method");
        assert_eq!(m, AttendanceMethod::Proximity);
        let e = get_required_enum::<AttendanceMethod>(&p, "bad").err().expect("bad");
        assert_eq!(e.code, "bad_params");
        assert!(get_required_enum::<AttendanceMethod>(&p, "missing").is_err());
    }

    #[test]
    fn times_must_be_zero_padded() {
        assert!(require_hhmm("09:00", "startTime").is_ok());
        assert!(require_hhmm("23:59", "startTime").is_ok());
        assert!(require_hhmm("9:00", "startTime").is_err());
        assert!(require_hhmm("24:00", "startTime").is_err());
        assert!(require_hhmm("10:00 AM", "startTime").is_err());
    }

    #[test]
    fn dates_must_be_calendar_dates() {
        assert!(require_date("2024-02-29", "date").is_ok());
        assert!(require_date("2023-02-29", "date").is_err());
        assert!(require_date("15/02/2024", "date").is_err());
    }

    #[test]
    fn blank_text_is_rejected() {
        let p = json!({ "name": "   ", "email": " a@b.edu " });
        assert!(get_required_text(&p, "name").is_err());
        assert_eq!(get_required_text(&p, "email").ok().as_deref(), Some("a@b.edu"));
    }
}
