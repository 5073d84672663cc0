use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_campusd");
    let mut child = Command::new(exe)
        .env_remove("CAMPUSD_SEED")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn campusd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or(serde_json::Value::Null)
}

fn error_code(value: &serde_json::Value) -> String {
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

#[test]
fn teacher_creates_tests_and_exams_with_author() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    // Not signed in: author falls back to a generic label.
    let anon = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "tests.create",
        json!({ "title": "Pop Quiz", "subject": "Physics", "date": "2024-02-19", "syllabus": "Optics" }),
    );
    assert!(anon["testId"].as_str().is_some());

    let _ = request_ok(&mut stdin, &mut reader, "2", "auth.selectRole", json!({ "role": "teacher" }));
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "auth.login",
        json!({ "email": "john.wilson@campus.edu", "password": "demo123" }),
    );

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "tests.create",
        json!({
            "title": "Waves Check",
            "subject": "Physics",
            "date": "2024-02-22",
            "time": "2:00 PM",
            "duration": "30 minutes",
            "syllabus": "Waves,  Sound , ,Light"
        }),
    );
    let tests = request_ok(&mut stdin, &mut reader, "5", "tests.list", json!({}));
    let tests = tests["tests"].as_array().expect("tests");
    assert_eq!(tests.len(), 4);
    assert_eq!(tests[2]["createdBy"], "Teacher");
    assert_eq!(tests[3]["createdBy"], "Prof. John Wilson");
    assert_eq!(tests[3]["syllabus"], json!(["Waves", "Sound", "Light"]));

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "exams.create",
        json!({
            "title": "Optics Final",
            "subject": "Physics",
            "date": "2024-04-01",
            "syllabus": "Lenses, Mirrors",
            "totalMarks": "80"
        }),
    );
    let exams = request_ok(&mut stdin, &mut reader, "7", "exams.list", json!({}));
    let last = exams["exams"].as_array().and_then(|a| a.last()).cloned().expect("exam");
    assert_eq!(last["totalMarks"], 80);
    assert_eq!(last["createdBy"], "Prof. John Wilson");

    let bad = request(
        &mut stdin,
        &mut reader,
        "8",
        "exams.create",
        json!({ "title": "X", "subject": "Y", "date": "2024-04-02", "totalMarks": "lots" }),
    );
    assert_eq!(error_code(&bad), "bad_params");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn session_create_validates_times() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let base = json!({
        "name": "Chemistry Lab",
        "subject": "Chemistry",
        "teacherId": "teacher2",
        "date": "2024-02-23",
        "startTime": "13:00",
        "endTime": "15:00",
        "room": "Lab 301"
    });

    let mut padded = base.clone();
    padded["startTime"] = json!("1:00");
    assert_eq!(error_code(&request(&mut stdin, &mut reader, "1", "sessions.create", padded)), "bad_params");

    let mut inverted = base.clone();
    inverted["endTime"] = json!("12:00");
    assert_eq!(error_code(&request(&mut stdin, &mut reader, "2", "sessions.create", inverted)), "bad_params");

    let mut bad_date = base.clone();
    bad_date["date"] = json!("2024-02-30");
    assert_eq!(error_code(&request(&mut stdin, &mut reader, "3", "sessions.create", bad_date)), "bad_params");

    let created = request_ok(&mut stdin, &mut reader, "4", "sessions.create", base);
    let listed = request_ok(&mut stdin, &mut reader, "5", "sessions.list", json!({ "date": "2024-02-23" }));
    let sessions = listed["sessions"].as_array().expect("sessions");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"], created["classId"]);
    assert_eq!(sessions[0]["attendanceOpen"], false);

    drop(stdin);
    let _ = child.wait();
}
