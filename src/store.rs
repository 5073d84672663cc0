use crate::model::{
    AttendanceRecord, ClassSession, Exam, LearnerPreference, TaskCatalogEntry, Test, User,
};
use crate::seed::Seed;
use std::sync::Arc;

/// Process-wide campus collections.
///
/// Every collection is an immutable shared slice. Mutation goes through the
/// `set_*` methods, which take a freshly built collection and swap it in, so a
/// snapshot taken before a write never observes the write.
#[derive(Debug, Clone)]
pub struct CampusState {
    users: Arc<[User]>,
    preferences: Arc<[LearnerPreference]>,
    tasks: Arc<[TaskCatalogEntry]>,
    sessions: Arc<[ClassSession]>,
    attendance: Arc<[AttendanceRecord]>,
    tests: Arc<[Test]>,
    exams: Arc<[Exam]>,
}

impl CampusState {
    pub fn from_seed(seed: &Seed) -> Self {
        Self {
            users: seed.users().into(),
            preferences: seed.preferences.clone().into(),
            tasks: seed.tasks.clone().into(),
            sessions: seed.sessions.clone().into(),
            attendance: seed.attendance.clone().into(),
            tests: seed.tests.clone().into(),
            exams: seed.exams.clone().into(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn preferences(&self) -> &[LearnerPreference] {
        &self.preferences
    }

    pub fn tasks(&self) -> &[TaskCatalogEntry] {
        &self.tasks
    }

    pub fn sessions(&self) -> &[ClassSession] {
        &self.sessions
    }

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    #[cfg(test)]
    pub fn attendance_snapshot(&self) -> Arc<[AttendanceRecord]> {
        Arc::clone(&self.attendance)
    }

    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users.into();
    }

    pub fn set_preferences(&mut self, preferences: Vec<LearnerPreference>) {
        self.preferences = preferences.into();
    }

    pub fn set_tasks(&mut self, tasks: Vec<TaskCatalogEntry>) {
        self.tasks = tasks.into();
    }

    pub fn set_sessions(&mut self, sessions: Vec<ClassSession>) {
        self.sessions = sessions.into();
    }

    pub fn set_attendance(&mut self, attendance: Vec<AttendanceRecord>) {
        self.attendance = attendance.into();
    }

    pub fn set_tests(&mut self, tests: Vec<Test>) {
        self.tests = tests.into();
    }

    pub fn set_exams(&mut self, exams: Vec<Exam>) {
        self.exams = exams.into();
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn session(&self, class_id: &str) -> Option<&ClassSession> {
        self.sessions.iter().find(|s| s.id == class_id)
    }

    pub fn preference(&self, learner_id: &str) -> Option<&LearnerPreference> {
        self.preferences.iter().find(|p| p.learner_id == learner_id)
    }
}

/// New collection with `item` appended; `items` is left untouched.
pub fn appended<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(item);
    next
}

/// New collection with the first element matching `is_target` replaced, or
/// `item` appended when nothing matches.
pub fn upserted<T: Clone>(items: &[T], item: T, is_target: impl Fn(&T) -> bool) -> Vec<T> {
    let mut next = items.to_vec();
    match next.iter().position(|x| is_target(x)) {
        Some(idx) => next[idx] = item,
        None => next.push(item),
    }
    next
}
