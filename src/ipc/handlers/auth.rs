use crate::auth::{AuthError, ViewState};
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_required_enum, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::Role;
use serde_json::json;

impl From<AuthError> for HandlerErr {
    fn from(e: AuthError) -> Self {
        HandlerErr::new(e.code(), e.to_string())
    }
}

fn view_json(view: &ViewState) -> serde_json::Value {
    serde_json::to_value(view).unwrap_or(serde_json::Value::Null)
}

fn transition(state: &mut AppState, next: ViewState) -> serde_json::Value {
    tracing::debug!(from = state.view.name(), to = next.name(), "view transition");
    state.view = next;
    view_json(&state.view)
}

fn auth_select_role(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let role: Role = get_required_enum(params, "role")?;
    let next = state.view.select_role(role)?;
    Ok(transition(state, next))
}

fn auth_back(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let next = state.view.back()?;
    Ok(transition(state, next))
}

fn auth_login(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let email = get_required_str(params, "email")?;
    let password = get_required_str(params, "password")?;
    let next = match state.view.login(state.campus.users(), email.trim(), &password) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(email = %email, reason = e.code(), "login rejected");
            return Err(e.into());
        }
    };
    let user = next
        .user_id()
        .and_then(|id| state.campus.user(id))
        .map(|u| json!({ "id": u.id, "name": u.name, "email": u.email, "role": u.role }));
    let mut result = transition(state, next);
    result["user"] = user.unwrap_or(serde_json::Value::Null);
    Ok(result)
}

fn auth_demo_credentials(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let role: Role = get_required_enum(params, "role")?;
    // Digests are one-way, so only the email can be prefilled.
    let demo = state
        .campus
        .users()
        .iter()
        .find(|u| u.role == role)
        .map(|u| json!({ "email": u.email }));
    Ok(json!({ "credentials": demo }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "auth.selectRole" => auth_select_role(state, &req.params),
        "auth.back" => auth_back(state),
        "auth.login" => auth_login(state, &req.params),
        "auth.logout" => {
            let next = state.view.logout();
            Ok(transition(state, next))
        }
        "auth.view" => Ok(view_json(&state.view)),
        "auth.demoCredentials" => auth_demo_credentials(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
