use crate::attendance::{class_roster, mark_attendance, set_status, status_for, summary_for};
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_required_enum, get_required_text};
use crate::ipc::types::{AppState, Request};
use crate::model::{AttendanceMethod, AttendanceRecord, AttendanceStatus};
use chrono::Utc;
use serde_json::json;

/// Always answers `{ ok: true }` once the params are valid; a closed or
/// unknown session leaves the log as it was.
fn attendance_mark(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let learner_id = get_required_text(params, "learnerId")?;
    let class_id = get_required_text(params, "classId")?;
    let method: AttendanceMethod = get_required_enum(params, "method")?;

    match mark_attendance(
        state.campus.sessions(),
        state.campus.attendance(),
        &learner_id,
        &class_id,
        method,
        Utc::now(),
    ) {
        Some(next) => {
            state.campus.set_attendance(next);
            tracing::info!(
                learner_id = %learner_id,
                class_id = %class_id,
                method = method.as_str(),
                "attendance recorded"
            );
        }
        None => {
            tracing::debug!(class_id = %class_id, "attendance window closed or unknown session");
        }
    }
    Ok(json!({ "ok": true }))
}

fn attendance_list(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let learner_id = get_optional_str(params, "learnerId");
    let class_id = get_optional_str(params, "classId");
    let records: Vec<&AttendanceRecord> = state
        .campus
        .attendance()
        .iter()
        .filter(|r| learner_id.as_deref().map(|id| r.learner_id == id).unwrap_or(true))
        .filter(|r| class_id.as_deref().map(|id| r.class_id == id).unwrap_or(true))
        .collect();
    Ok(json!({ "records": records }))
}

fn attendance_status(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let learner_id = get_required_text(params, "learnerId")?;
    let class_id = get_required_text(params, "classId")?;
    Ok(json!({
        "record": status_for(state.campus.attendance(), &learner_id, &class_id)
    }))
}

fn attendance_summary(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let learner_id = get_required_text(params, "learnerId")?;
    let summary = summary_for(state.campus.attendance(), &learner_id);
    Ok(serde_json::to_value(summary).unwrap_or(serde_json::Value::Null))
}

/// Teacher override; unlike `attendance.mark` an unknown session is an error.
fn attendance_set_status(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let learner_id = get_required_text(params, "learnerId")?;
    let class_id = get_required_text(params, "classId")?;
    let status: AttendanceStatus = get_required_enum(params, "status")?;
    let session = state
        .campus
        .session(&class_id)
        .ok_or_else(|| HandlerErr::not_found("class session not found"))?;

    let next = set_status(session, state.campus.attendance(), &learner_id, status, Utc::now());
    state.campus.set_attendance(next);
    tracing::info!(
        learner_id = %learner_id,
        class_id = %class_id,
        status = status.as_str(),
        "attendance status set"
    );
    Ok(json!({
        "record": status_for(state.campus.attendance(), &learner_id, &class_id)
    }))
}

fn attendance_class_roster(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_text(params, "classId")?;
    let session = state
        .campus
        .session(&class_id)
        .ok_or_else(|| HandlerErr::not_found("class session not found"))?;

    let roster = class_roster(state.campus.users(), state.campus.attendance(), &class_id);
    let absent: Vec<serde_json::Value> = roster
        .absent
        .iter()
        .map(|u| json!({ "id": u.id, "name": u.name, "email": u.email }))
        .collect();
    Ok(json!({
        "classId": session.id,
        "className": session.name,
        "present": roster.present,
        "absent": absent,
        "enrolled": roster.enrolled,
        "attendanceRate": roster.attendance_rate,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "attendance.mark" => attendance_mark(state, &req.params),
        "attendance.list" => attendance_list(state, &req.params),
        "attendance.status" => attendance_status(state, &req.params),
        "attendance.summary" => attendance_summary(state, &req.params),
        "attendance.setStatus" => attendance_set_status(state, &req.params),
        "attendance.classRoster" => attendance_class_roster(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
