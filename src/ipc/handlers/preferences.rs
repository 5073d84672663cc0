use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_required_object, get_required_text};
use crate::ipc::types::{AppState, Request};
use crate::model::LearnerPreference;
use crate::store::upserted;
use serde_json::json;

fn preferences_get(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let learner_id = get_required_text(params, "learnerId")?;
    Ok(json!({ "preference": state.campus.preference(&learner_id) }))
}

fn preferences_set(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let pref: LearnerPreference = get_required_object(params, "preference")?;
    if pref.learner_id.trim().is_empty() {
        return Err(HandlerErr::bad_params("preference.learnerId must not be empty"));
    }
    let learner_id = pref.learner_id.clone();
    let next = upserted(state.campus.preferences(), pref, |p| p.learner_id == learner_id);
    state.campus.set_preferences(next);
    tracing::info!(learner_id = %learner_id, "preferences saved");
    Ok(json!({ "learnerId": learner_id }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "preferences.get" => preferences_get(state, &req.params),
        "preferences.set" => preferences_set(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
