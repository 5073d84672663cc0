use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use crate::routine::{assemble, stats};
use serde_json::json;

/// Both values are matched verbatim; an empty date yields a day with no classes.
fn routine_params(params: &serde_json::Value) -> Result<(String, String), HandlerErr> {
    Ok((
        get_required_str(params, "learnerId")?,
        get_required_str(params, "date")?,
    ))
}

fn routine_assemble(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let (learner_id, date) = routine_params(params)?;
    let routine = assemble(&state.campus, &learner_id, &date);
    Ok(json!({ "date": date, "routine": routine }))
}

fn routine_stats(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let (learner_id, date) = routine_params(params)?;
    let routine = assemble(&state.campus, &learner_id, &date);
    Ok(serde_json::to_value(stats(&routine)).unwrap_or(serde_json::Value::Null))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "routine.assemble" => routine_assemble(state, &req.params),
        "routine.stats" => routine_stats(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
