use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::store::CampusState;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "view": state.view.name(),
        }),
    )
}

fn handle_state_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.campus = CampusState::from_seed(&state.seed);
    state.view = Default::default();
    tracing::info!("campus state reset from seed");
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "state.reset" => Some(handle_state_reset(state, req)),
        _ => None,
    }
}
