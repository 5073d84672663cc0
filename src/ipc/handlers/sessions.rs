use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{
    get_optional_str, get_required_bool, get_required_text, require_date, require_hhmm,
};
use crate::ipc::types::{AppState, Request};
use crate::model::ClassSession;
use crate::store::appended;
use serde_json::json;
use uuid::Uuid;

fn sessions_list(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let date = get_optional_str(params, "date");
    let sessions: Vec<&ClassSession> = state
        .campus
        .sessions()
        .iter()
        .filter(|s| date.as_deref().map(|d| s.date == d).unwrap_or(true))
        .collect();
    Ok(json!({ "sessions": sessions }))
}

fn sessions_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let name = get_required_text(params, "name")?;
    let subject = get_required_text(params, "subject")?;
    let teacher_id = get_required_text(params, "teacherId")?;
    let date = get_required_text(params, "date")?;
    let start_time = get_required_text(params, "startTime")?;
    let end_time = get_required_text(params, "endTime")?;
    let room = get_required_text(params, "room")?;
    require_date(&date, "date")?;
    require_hhmm(&start_time, "startTime")?;
    require_hhmm(&end_time, "endTime")?;
    if end_time <= start_time {
        return Err(HandlerErr::bad_params("endTime must be after startTime"));
    }

    let session = ClassSession {
        id: Uuid::new_v4().to_string(),
        name,
        subject,
        teacher_id,
        date,
        start_time,
        end_time,
        room,
        qr_code: get_optional_str(params, "qrCode"),
        attendance_open: params
            .get("attendanceOpen")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
    };
    let class_id = session.id.clone();
    let next = appended(state.campus.sessions(), session);
    state.campus.set_sessions(next);
    tracing::info!(class_id = %class_id, "class session scheduled");
    Ok(json!({ "classId": class_id }))
}

fn sessions_set_attendance_open(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_text(params, "classId")?;
    let open = get_required_bool(params, "open")?;
    if state.campus.session(&class_id).is_none() {
        return Err(HandlerErr::not_found("class session not found"));
    }
    let next: Vec<ClassSession> = state
        .campus
        .sessions()
        .iter()
        .map(|s| {
            if s.id == class_id {
                ClassSession {
                    attendance_open: open,
                    ..s.clone()
                }
            } else {
                s.clone()
            }
        })
        .collect();
    state.campus.set_sessions(next);
    tracing::info!(class_id = %class_id, open, "attendance window changed");
    Ok(json!({ "classId": class_id, "attendanceOpen": open }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "sessions.list" => sessions_list(state, &req.params),
        "sessions.create" => sessions_create(state, &req.params),
        "sessions.setAttendanceOpen" => sessions_set_attendance_open(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
