use crate::auth::digest_password;
use crate::model::{
    AttendanceMethod, AttendanceRecord, AttendanceStatus, ClassSession, Difficulty, Exam,
    LearnerPreference, LearningStyle, Role, TaskCatalogEntry, TaskType, Test, User,
};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// User as written in a seed file. Passwords are plaintext here and digested
/// on load.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Initial contents of every campus collection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seed {
    pub users: Vec<SeedUser>,
    pub preferences: Vec<LearnerPreference>,
    pub tasks: Vec<TaskCatalogEntry>,
    pub sessions: Vec<ClassSession>,
    pub attendance: Vec<AttendanceRecord>,
    pub tests: Vec<Test>,
    pub exams: Vec<Exam>,
}

impl Seed {
    pub fn from_path(path: &Path) -> anyhow::Result<Seed> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let seed: Seed = serde_json::from_str(&raw)
            .with_context(|| format!("invalid seed file {}", path.display()))?;
        Ok(seed)
    }

    pub fn users(&self) -> Vec<User> {
        self.users
            .iter()
            .map(|u| User {
                id: u.id.clone(),
                name: u.name.clone(),
                email: u.email.clone(),
                password_digest: digest_password(&u.password),
                role: u.role,
            })
            .collect()
    }

    /// Built-in demo campus used when no seed file is configured.
    pub fn demo() -> Seed {
        Seed {
            users: vec![
                seed_user(
                    "student1",
                    "Alex Johnson",
                    "alex.johnson@student.edu",
                    "demo123",
                    Role::Student,
                ),
                seed_user(
                    "student2",
                    "Emma Davis",
                    "emma.davis@student.edu",
                    "demo123",
                    Role::Student,
                ),
                seed_user(
                    "teacher1",
                    "Dr. Sarah Smith",
                    "sarah.smith@campus.edu",
                    "demo123",
                    Role::Teacher,
                ),
                seed_user(
                    "teacher2",
                    "Prof. John Wilson",
                    "john.wilson@campus.edu",
                    "demo123",
                    Role::Teacher,
                ),
                seed_user(
                    "admin1",
                    "Michael Brown",
                    "michael.brown@campus.edu",
                    "admin123",
                    Role::Admin,
                ),
            ],
            preferences: vec![LearnerPreference {
                learner_id: "student1".into(),
                interests: strings(&["Mathematics", "Computer Science", "Physics"]),
                strengths: strings(&["Problem Solving", "Logical Thinking", "Analysis"]),
                career_goals: strings(&["Software Engineer", "Data Scientist"]),
                learning_style: LearningStyle::Visual,
                preferred_task_types: strings(&["practice", "project"]),
            }],
            tasks: vec![
                TaskCatalogEntry {
                    id: "1".into(),
                    title: "Advanced Calculus Practice".into(),
                    description: "Complete practice problems on derivatives and integrals".into(),
                    subject: "Mathematics".into(),
                    difficulty: Difficulty::Medium,
                    estimated_time: "45 minutes".into(),
                    task_type: TaskType::Practice,
                    tags: strings(&["calculus", "derivatives", "integrals"]),
                    due_date: None,
                },
                TaskCatalogEntry {
                    id: "2".into(),
                    title: "Python Programming Tutorial".into(),
                    description: "Learn object-oriented programming concepts".into(),
                    subject: "Computer Science".into(),
                    difficulty: Difficulty::Easy,
                    estimated_time: "30 minutes".into(),
                    task_type: TaskType::Reading,
                    tags: strings(&["python", "oop", "programming"]),
                    due_date: None,
                },
                TaskCatalogEntry {
                    id: "3".into(),
                    title: "Data Structures Project".into(),
                    description: "Implement a binary search tree in your preferred language".into(),
                    subject: "Computer Science".into(),
                    difficulty: Difficulty::Hard,
                    estimated_time: "2 hours".into(),
                    task_type: TaskType::Project,
                    tags: strings(&["data-structures", "algorithms", "coding"]),
                    due_date: Some("2024-02-20".into()),
                },
            ],
            sessions: vec![
                ClassSession {
                    id: "class1".into(),
                    name: "Mathematics 101".into(),
                    subject: "Mathematics".into(),
                    teacher_id: "teacher1".into(),
                    date: "2024-02-15".into(),
                    start_time: "09:00".into(),
                    end_time: "10:00".into(),
                    room: "Room 101".into(),
                    qr_code: Some("MATH101_20240215_0900".into()),
                    attendance_open: true,
                },
                ClassSession {
                    id: "class2".into(),
                    name: "Physics 201".into(),
                    subject: "Physics".into(),
                    teacher_id: "teacher2".into(),
                    date: "2024-02-15".into(),
                    start_time: "14:00".into(),
                    end_time: "15:00".into(),
                    room: "Room 203".into(),
                    qr_code: Some("PHYS201_20240215_1400".into()),
                    attendance_open: false,
                },
            ],
            attendance: vec![
                AttendanceRecord {
                    id: "1".into(),
                    learner_id: "student1".into(),
                    class_id: "class1".into(),
                    class_name: "Mathematics 101".into(),
                    date: "2024-02-15".into(),
                    time: "09:00".into(),
                    status: AttendanceStatus::Present,
                    method: AttendanceMethod::Qr,
                    location: Some("Room 101".into()),
                    recorded_at: None,
                },
                AttendanceRecord {
                    id: "2".into(),
                    learner_id: "student1".into(),
                    class_id: "class2".into(),
                    class_name: "Physics 201".into(),
                    date: "2024-02-15".into(),
                    time: "14:00".into(),
                    status: AttendanceStatus::Present,
                    method: AttendanceMethod::Proximity,
                    location: None,
                    recorded_at: None,
                },
            ],
            tests: vec![
                Test {
                    id: "1".into(),
                    title: "Algebra Quiz".into(),
                    subject: "Mathematics".into(),
                    date: "2024-02-15".into(),
                    time: "10:00 AM".into(),
                    duration: "1 hour".into(),
                    syllabus: strings(&["Linear equations", "Quadratic equations", "Polynomials"]),
                    created_by: "Dr. Sarah Smith".into(),
                },
                Test {
                    id: "2".into(),
                    title: "Motion and Forces Test".into(),
                    subject: "Physics".into(),
                    date: "2024-02-18".into(),
                    time: "2:00 PM".into(),
                    duration: "45 minutes".into(),
                    syllabus: strings(&["Newton's laws", "Kinematics", "Dynamics"]),
                    created_by: "Prof. John Wilson".into(),
                },
            ],
            exams: vec![
                Exam {
                    id: "1".into(),
                    title: "Mid-term Mathematics Exam".into(),
                    subject: "Mathematics".into(),
                    date: "2024-03-01".into(),
                    time: "9:00 AM".into(),
                    duration: "3 hours".into(),
                    syllabus: strings(&["Calculus", "Algebra", "Trigonometry", "Statistics"]),
                    total_marks: 100,
                    created_by: "Dr. Sarah Smith".into(),
                },
                Exam {
                    id: "2".into(),
                    title: "Physics Final Exam".into(),
                    subject: "Physics".into(),
                    date: "2024-03-15".into(),
                    time: "1:00 PM".into(),
                    duration: "3 hours".into(),
                    syllabus: strings(&["Mechanics", "Thermodynamics", "Waves", "Optics"]),
                    total_marks: 150,
                    created_by: "Prof. John Wilson".into(),
                },
            ],
        }
    }
}

fn seed_user(id: &str, name: &str, email: &str, password: &str, role: Role) -> SeedUser {
    SeedUser {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        password: password.into(),
        role,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_file_fills_missing_collections_with_empty() {
        let seed: Seed = serde_json::from_str(
            r#"{
                "users": [
                    { "id": "u1", "name": "Ana", "email": "ana@x.edu", "password": "pw", "role": "student" }
                ],
                "tasks": []
            }"#,
        )
        .expect("parse seed");
        assert_eq!(seed.users.len(), 1);
        assert!(seed.sessions.is_empty());
        assert!(seed.attendance.is_empty());

        let users = seed.users();
        assert_eq!(users[0].password_digest, digest_password("pw"));
        assert_ne!(users[0].password_digest, "pw");
    }

    #[test]
    fn missing_seed_file_reports_path() {
        let err = Seed::from_path(Path::new("/definitely/not/here.json"))
            .expect_err("missing file");
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
