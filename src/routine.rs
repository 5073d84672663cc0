use crate::matcher::personalized_tasks;
use crate::model::{Priority, RoutineEntry, RoutineKind};
use crate::store::CampusState;
use serde::Serialize;

/// Fixed (start, end) slots handed to matched tasks, in match order.
pub const TASK_SLOTS: [(&str, &str); 2] = [("11:00", "11:45"), ("16:00", "16:30")];

pub const GOAL_ID: &str = "goal-1";
pub const GOAL_TITLE: &str = "Career Development Reading";
pub const GOAL_START: &str = "19:00";
pub const GOAL_END: &str = "19:30";
const GOAL_DESCRIPTION: &str = "Read about software engineering best practices";

/// Day agenda for `learner_id` on `date`: that day's classes, up to two
/// matched tasks and the evening goal, ordered by start time.
///
/// Task slots are fixed and may overlap classes. Entries sharing a start time
/// keep the order classes, tasks, goal.
pub fn assemble(state: &CampusState, learner_id: &str, date: &str) -> Vec<RoutineEntry> {
    let mut routine: Vec<RoutineEntry> = state
        .sessions()
        .iter()
        .filter(|s| s.date == date)
        .map(|s| {
            let teacher = state.user(&s.teacher_id).map(|u| u.name.as_str());
            RoutineEntry {
                id: s.id.clone(),
                kind: RoutineKind::Class,
                title: s.name.clone(),
                start_time: s.start_time.clone(),
                end_time: s.end_time.clone(),
                subject: Some(s.subject.clone()),
                description: Some(class_description(&s.room, teacher)),
                priority: Some(Priority::High),
            }
        })
        .collect();

    let tasks = personalized_tasks(state.preferences(), state.tasks(), learner_id);
    for (task, (start, end)) in tasks.into_iter().zip(TASK_SLOTS) {
        routine.push(RoutineEntry {
            id: format!("task-{}", task.id),
            kind: RoutineKind::Task,
            title: task.title.clone(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            subject: Some(task.subject.clone()),
            description: Some(task.description.clone()),
            priority: Some(Priority::Medium),
        });
    }

    routine.push(RoutineEntry {
        id: GOAL_ID.to_string(),
        kind: RoutineKind::Goal,
        title: GOAL_TITLE.to_string(),
        start_time: GOAL_START.to_string(),
        end_time: GOAL_END.to_string(),
        subject: None,
        description: Some(GOAL_DESCRIPTION.to_string()),
        priority: Some(Priority::Medium),
    });

    // Stable: equal start times keep emission order.
    routine.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    routine
}

fn class_description(room: &str, teacher: Option<&str>) -> String {
    match teacher {
        Some(name) => format!("{} with {}", room, name),
        None => room.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineStats {
    pub total_items: usize,
    pub class_items: usize,
    pub task_items: usize,
    pub goal_items: usize,
    pub break_items: usize,
}

pub fn stats(routine: &[RoutineEntry]) -> RoutineStats {
    let mut out = RoutineStats {
        total_items: routine.len(),
        ..RoutineStats::default()
    };
    for entry in routine {
        match entry.kind {
            RoutineKind::Class => out.class_items += 1,
            RoutineKind::Task => out.task_items += 1,
            RoutineKind::Goal => out.goal_items += 1,
            RoutineKind::Break => out.break_items += 1,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassSession;
    use crate::seed::Seed;

    fn session(id: &str, date: &str, start: &str, end: &str, teacher: &str) -> ClassSession {
        ClassSession {
            id: id.into(),
            name: format!("Class {}", id),
            subject: "Mathematics".into(),
            teacher_id: teacher.into(),
            date: date.into(),
            start_time: start.into(),
            end_time: end.into(),
            room: "Room 7".into(),
            qr_code: None,
            attendance_open: true,
        }
    }

    fn kinds(routine: &[RoutineEntry]) -> Vec<RoutineKind> {
        routine.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn one_class_two_tasks_and_goal_in_time_order() {
        let mut state = CampusState::from_seed(&Seed::demo());
        state.set_sessions(vec![session("c1", "2024-02-15", "09:00", "10:00", "teacher1")]);

        let routine = assemble(&state, "student1", "2024-02-15");
        let spans: Vec<(&str, &str)> = routine
            .iter()
            .map(|e| (e.start_time.as_str(), e.end_time.as_str()))
            .collect();
        assert_eq!(
            spans,
            vec![
                ("09:00", "10:00"),
                ("11:00", "11:45"),
                ("16:00", "16:30"),
                ("19:00", "19:30"),
            ]
        );
        assert_eq!(
            kinds(&routine),
            vec![
                RoutineKind::Class,
                RoutineKind::Task,
                RoutineKind::Task,
                RoutineKind::Goal
            ]
        );
        assert_eq!(routine[1].id, "task-1");
        assert_eq!(routine[2].id, "task-2");
        assert_eq!(routine[0].priority, Some(Priority::High));
        assert_eq!(routine[1].priority, Some(Priority::Medium));
    }

    #[test]
    fn demo_day_interleaves_afternoon_class_between_tasks() {
        let state = CampusState::from_seed(&Seed::demo());
        let routine = assemble(&state, "student1", "2024-02-15");
        let starts: Vec<&str> = routine.iter().map(|e| e.start_time.as_str()).collect();
        assert_eq!(starts, vec!["09:00", "11:00", "14:00", "16:00", "19:00"]);
        assert_eq!(
            routine[0].description.as_deref(),
            Some("Room 101 with Dr. Sarah Smith")
        );
        assert_eq!(
            routine[2].description.as_deref(),
            Some("Room 203 with Prof. John Wilson")
        );
    }

    #[test]
    fn sessions_on_other_dates_are_excluded() {
        let mut state = CampusState::from_seed(&Seed::demo());
        state.set_sessions(vec![
            session("a", "2024-02-15", "08:00", "09:00", "teacher1"),
            session("b", "2024-02-16", "08:00", "09:00", "teacher1"),
            session("c", "2024-02-15", "13:00", "14:00", "teacher2"),
        ]);
        let routine = assemble(&state, "student1", "2024-02-15");
        let class_ids: Vec<&str> = routine
            .iter()
            .filter(|e| e.kind == RoutineKind::Class)
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(class_ids, vec!["a", "c"]);
    }

    #[test]
    fn goal_is_always_present_exactly_once() {
        let mut state = CampusState::from_seed(&Seed::demo());
        state.set_tasks(vec![]);
        state.set_sessions(vec![]);
        let routine = assemble(&state, "ghost", "1999-01-01");
        assert_eq!(routine.len(), 1);
        let goal = &routine[0];
        assert_eq!(goal.kind, RoutineKind::Goal);
        assert_eq!(goal.title, GOAL_TITLE);
        assert_eq!((goal.start_time.as_str(), goal.end_time.as_str()), ("19:00", "19:30"));
        assert_eq!(goal.subject, None);
    }

    #[test]
    fn unresolved_teacher_leaves_room_only() {
        let mut state = CampusState::from_seed(&Seed::demo());
        state.set_sessions(vec![session("x", "2024-02-15", "09:00", "10:00", "gone")]);
        let routine = assemble(&state, "student1", "2024-02-15");
        assert_eq!(routine[0].description.as_deref(), Some("Room 7"));
    }

    #[test]
    fn task_slots_are_not_moved_around_overlapping_classes() {
        let mut state = CampusState::from_seed(&Seed::demo());
        state.set_sessions(vec![session("c", "2024-02-15", "11:00", "12:00", "teacher1")]);
        let routine = assemble(&state, "student1", "2024-02-15");
        assert_eq!(routine[0].id, "c");
        assert_eq!(routine[1].id, "task-1");
        assert_eq!(routine[1].start_time, "11:00");
        assert_eq!(routine[1].end_time, "11:45");
    }

    #[test]
    fn output_is_sorted_and_recomputed_identically() {
        let state = CampusState::from_seed(&Seed::demo());
        let a = assemble(&state, "student2", "2024-02-15");
        let b = assemble(&state, "student2", "2024-02-15");
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0].start_time <= w[1].start_time));
    }

    #[test]
    fn stats_count_each_kind() {
        let state = CampusState::from_seed(&Seed::demo());
        let s = stats(&assemble(&state, "student1", "2024-02-15"));
        assert_eq!(
            s,
            RoutineStats {
                total_items: 5,
                class_items: 2,
                task_items: 2,
                goal_items: 1,
                break_items: 0,
            }
        );
    }
}
