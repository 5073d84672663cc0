use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_required_object, get_required_text, require_date};
use crate::ipc::types::{AppState, Request};
use crate::matcher::personalized_tasks;
use crate::model::{Difficulty, TaskCatalogEntry, TaskType};
use crate::store::appended;
use serde_json::json;
use uuid::Uuid;

fn tasks_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let title = get_required_text(params, "title")?;
    let subject = get_required_text(params, "subject")?;
    let difficulty: Difficulty = get_required_object(params, "difficulty")?;
    let task_type: TaskType = get_required_object(params, "type")?;
    let due_date = get_optional_str(params, "dueDate");
    if let Some(d) = &due_date {
        require_date(d, "dueDate")?;
    }
    let tags = match params.get("tags") {
        Some(v) if !v.is_null() => get_required_object::<Vec<String>>(params, "tags")?,
        _ => Vec::new(),
    };

    let task = TaskCatalogEntry {
        id: Uuid::new_v4().to_string(),
        title,
        description: get_optional_str(params, "description").unwrap_or_default(),
        subject,
        difficulty,
        estimated_time: get_optional_str(params, "estimatedTime").unwrap_or_default(),
        task_type,
        tags,
        due_date,
    };
    let task_id = task.id.clone();
    let next = appended(state.campus.tasks(), task);
    state.campus.set_tasks(next);
    tracing::info!(task_id = %task_id, "catalog task added");
    Ok(json!({ "taskId": task_id }))
}

fn tasks_personalized(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let learner_id = get_required_text(params, "learnerId")?;
    let tasks = personalized_tasks(state.campus.preferences(), state.campus.tasks(), &learner_id);
    if state.campus.preference(&learner_id).is_none() {
        tracing::debug!(learner_id = %learner_id, "no preferences; using catalog head");
    }
    Ok(json!({ "tasks": tasks }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "tasks.list" => Ok(json!({ "tasks": state.campus.tasks() })),
        "tasks.create" => tasks_create(state, &req.params),
        "tasks.personalized" => tasks_personalized(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
