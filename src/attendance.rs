use crate::model::{
    AttendanceMethod, AttendanceRecord, AttendanceStatus, ClassSession, Role, User,
};
use crate::store::{appended, upserted};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Attendance log with a `present` record for `learner_id` appended.
///
/// Returns `None`, leaving the caller's log as it was, when the session does
/// not exist or its attendance window is closed. Repeated calls append
/// repeated records.
pub fn mark_attendance(
    sessions: &[ClassSession],
    log: &[AttendanceRecord],
    learner_id: &str,
    class_id: &str,
    method: AttendanceMethod,
    recorded_at: DateTime<Utc>,
) -> Option<Vec<AttendanceRecord>> {
    let session = sessions.iter().find(|s| s.id == class_id)?;
    if !session.attendance_open {
        return None;
    }

    let record = AttendanceRecord {
        id: Uuid::new_v4().to_string(),
        learner_id: learner_id.to_string(),
        class_id: session.id.clone(),
        class_name: session.name.clone(),
        date: session.date.clone(),
        time: session.start_time.clone(),
        status: AttendanceStatus::Present,
        method,
        location: Some(session.room.clone()),
        recorded_at: Some(recorded_at),
    };
    Some(appended(log, record))
}

/// First record for the learner in the given class, if any.
pub fn status_for<'a>(
    log: &'a [AttendanceRecord],
    learner_id: &str,
    class_id: &str,
) -> Option<&'a AttendanceRecord> {
    log.iter()
        .find(|r| r.learner_id == learner_id && r.class_id == class_id)
}

/// Attendance log with the learner's status for `session` overridden.
///
/// The first record for the pair takes the new status and keeps its method;
/// without one, a `manual` record is appended. Unlike `mark_attendance` this
/// ignores the attendance window.
pub fn set_status(
    session: &ClassSession,
    log: &[AttendanceRecord],
    learner_id: &str,
    status: AttendanceStatus,
    recorded_at: DateTime<Utc>,
) -> Vec<AttendanceRecord> {
    match status_for(log, learner_id, &session.id) {
        Some(existing) => {
            let target = existing.id.clone();
            let record = AttendanceRecord {
                status,
                recorded_at: Some(recorded_at),
                ..existing.clone()
            };
            upserted(log, record, |r| r.id == target)
        }
        None => appended(
            log,
            AttendanceRecord {
                id: Uuid::new_v4().to_string(),
                learner_id: learner_id.to_string(),
                class_id: session.id.clone(),
                class_name: session.name.clone(),
                date: session.date.clone(),
                time: session.start_time.clone(),
                status,
                method: AttendanceMethod::Manual,
                location: Some(session.room.clone()),
                recorded_at: Some(recorded_at),
            },
        ),
    }
}

/// Per-class board: present records, students with no record, and the rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRoster<'a> {
    pub present: Vec<&'a AttendanceRecord>,
    pub absent: Vec<&'a User>,
    pub enrolled: usize,
    /// Present records over enrolled students, 0 with nobody enrolled.
    pub attendance_rate: u32,
}

/// Every student-role user counts as enrolled in every class.
pub fn class_roster<'a>(
    users: &'a [User],
    log: &'a [AttendanceRecord],
    class_id: &str,
) -> ClassRoster<'a> {
    let records: Vec<&AttendanceRecord> = log.iter().filter(|r| r.class_id == class_id).collect();
    let present: Vec<&AttendanceRecord> = records
        .iter()
        .copied()
        .filter(|r| r.status == AttendanceStatus::Present)
        .collect();
    let students: Vec<&User> = users.iter().filter(|u| u.role == Role::Student).collect();
    let absent: Vec<&User> = students
        .iter()
        .copied()
        .filter(|u| !records.iter().any(|r| r.learner_id == u.id))
        .collect();

    let enrolled = students.len();
    let attendance_rate = if enrolled > 0 {
        (present.len() as f64 / enrolled as f64 * 100.0).round() as u32
    } else {
        0
    };
    ClassRoster {
        present,
        absent,
        enrolled,
        attendance_rate,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
    /// Present plus late, as a whole percentage of all records.
    pub attendance_percent: u32,
    pub by_method: BTreeMap<&'static str, usize>,
}

pub fn summary_for(log: &[AttendanceRecord], learner_id: &str) -> AttendanceSummary {
    let mut out = AttendanceSummary::default();
    for r in log.iter().filter(|r| r.learner_id == learner_id) {
        out.total += 1;
        match r.status {
            AttendanceStatus::Present => out.present += 1,
            AttendanceStatus::Late => out.late += 1,
            AttendanceStatus::Absent => out.absent += 1,
        }
        *out.by_method.entry(r.method.as_str()).or_insert(0) += 1;
    }
    if out.total > 0 {
        let attended = (out.present + out.late) as f64;
        out.attendance_percent = (attended / out.total as f64 * 100.0).round() as u32;
    }
    out
}
