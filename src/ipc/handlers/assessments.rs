use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_required_text};
use crate::ipc::types::{AppState, Request};
use crate::model::{split_syllabus, Exam, Test};
use crate::store::appended;
use serde_json::json;
use uuid::Uuid;

const DEFAULT_AUTHOR: &str = "Teacher";

struct AssessmentFields {
    title: String,
    subject: String,
    date: String,
    time: String,
    duration: String,
    syllabus: Vec<String>,
    created_by: String,
}

fn assessment_fields(state: &AppState, params: &serde_json::Value) -> Result<AssessmentFields, HandlerErr> {
    let created_by = state
        .view
        .user_id()
        .and_then(|id| state.campus.user(id))
        .map(|u| u.name.clone())
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
    Ok(AssessmentFields {
        title: get_required_text(params, "title")?,
        subject: get_required_text(params, "subject")?,
        date: get_required_text(params, "date")?,
        time: get_optional_str(params, "time").unwrap_or_default(),
        duration: get_optional_str(params, "duration").unwrap_or_default(),
        syllabus: split_syllabus(&get_optional_str(params, "syllabus").unwrap_or_default()),
        created_by,
    })
}

/// Accepts a JSON integer or a numeric string.
fn parse_total_marks(params: &serde_json::Value) -> Result<i64, HandlerErr> {
    let v = params.get("totalMarks");
    if let Some(n) = v.and_then(|v| v.as_i64()) {
        return Ok(n);
    }
    v.and_then(|v| v.as_str())
        .and_then(|s| s.trim().parse::<i64>().ok())
        .ok_or_else(|| HandlerErr::bad_params("totalMarks must be an integer"))
}

fn tests_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let f = assessment_fields(state, params)?;
    let test = Test {
        id: Uuid::new_v4().to_string(),
        title: f.title,
        subject: f.subject,
        date: f.date,
        time: f.time,
        duration: f.duration,
        syllabus: f.syllabus,
        created_by: f.created_by,
    };
    let test_id = test.id.clone();
    let next = appended(state.campus.tests(), test);
    state.campus.set_tests(next);
    tracing::info!(test_id = %test_id, "test scheduled");
    Ok(json!({ "testId": test_id }))
}

fn exams_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let f = assessment_fields(state, params)?;
    let total_marks = parse_total_marks(params)?;
    if total_marks <= 0 {
        return Err(HandlerErr::bad_params("totalMarks must be positive"));
    }
    let exam = Exam {
        id: Uuid::new_v4().to_string(),
        title: f.title,
        subject: f.subject,
        date: f.date,
        time: f.time,
        duration: f.duration,
        syllabus: f.syllabus,
        total_marks,
        created_by: f.created_by,
    };
    let exam_id = exam.id.clone();
    let next = appended(state.campus.exams(), exam);
    state.campus.set_exams(next);
    tracing::info!(exam_id = %exam_id, "exam scheduled");
    Ok(json!({ "examId": exam_id }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "tests.list" => Ok(json!({ "tests": state.campus.tests() })),
        "tests.create" => tests_create(state, &req.params),
        "exams.list" => Ok(json!({ "exams": state.campus.exams() })),
        "exams.create" => exams_create(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
