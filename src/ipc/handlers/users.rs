use crate::auth::digest_password;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_required_enum, get_required_text};
use crate::ipc::types::{AppState, Request};
use crate::model::{Role, User};
use crate::store::appended;
use serde_json::json;
use uuid::Uuid;

fn user_json(u: &User) -> serde_json::Value {
    json!({
        "id": u.id,
        "name": u.name,
        "email": u.email,
        "role": u.role,
        // Every account counts as active.
        "status": "active",
    })
}

fn users_list(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let role = match params.get("role") {
        Some(v) if !v.is_null() => Some(get_required_enum::<Role>(params, "role")?),
        _ => None,
    };
    let users: Vec<serde_json::Value> = state
        .campus
        .users()
        .iter()
        .filter(|u| role.map(|r| u.role == r).unwrap_or(true))
        .map(user_json)
        .collect();
    Ok(json!({ "users": users }))
}

fn users_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let name = get_required_text(params, "name")?;
    let email = get_required_text(params, "email")?;
    let password = get_required_text(params, "password")?;
    let role: Role = get_required_enum(params, "role")?;

    if state.campus.users().iter().any(|u| u.email == email) {
        return Err(HandlerErr {
            code: "duplicate_email",
            message: "a user with this email already exists".to_string(),
            details: Some(json!({ "email": email })),
        });
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        name,
        email,
        password_digest: digest_password(&password),
        role,
    };
    let user_id = user.id.clone();
    tracing::info!(user_id = %user_id, role = %role, "user created");
    let next = appended(state.campus.users(), user);
    state.campus.set_users(next);
    Ok(json!({ "userId": user_id }))
}

fn users_delete(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let user_id = get_required_text(params, "userId")?;
    if state.campus.user(&user_id).is_none() {
        return Err(HandlerErr::not_found("user not found"));
    }
    let next: Vec<User> = state
        .campus
        .users()
        .iter()
        .filter(|u| u.id != user_id)
        .cloned()
        .collect();
    state.campus.set_users(next);
    if state.view.user_id() == Some(user_id.as_str()) {
        state.view = state.view.logout();
        tracing::info!(user_id = %user_id, "signed-in user deleted; session ended");
    }
    tracing::info!(user_id = %user_id, "user deleted");
    Ok(json!({ "ok": true }))
}

fn users_stats(state: &AppState) -> serde_json::Value {
    let users = state.campus.users();
    let count = |role: Role| users.iter().filter(|u| u.role == role).count();
    json!({
        "totalStudents": count(Role::Student),
        "totalTeachers": count(Role::Teacher),
        "activeUsers": users.len(),
        "totalClasses": state.campus.sessions().len(),
    })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "users.list" => users_list(state, &req.params),
        "users.create" => users_create(state, &req.params),
        "users.delete" => users_delete(state, &req.params),
        "users.stats" => Ok(users_stats(state)),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
