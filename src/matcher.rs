use crate::model::{LearnerPreference, TaskCatalogEntry};

/// Catalog entries handed to learners without a preference record.
pub const FALLBACK_TASKS: usize = 3;
pub const MAX_MATCHES: usize = 5;

/// Catalog entries relevant to `learner_id`, in catalog order.
///
/// A learner without a preference record gets the first
/// [`FALLBACK_TASKS`] entries of the catalog. Otherwise an entry is kept when
/// its subject is an interest, its type is a preferred task type, or one of
/// its tags overlaps an interest; at most [`MAX_MATCHES`] are returned.
pub fn personalized_tasks<'a>(
    preferences: &[LearnerPreference],
    catalog: &'a [TaskCatalogEntry],
    learner_id: &str,
) -> Vec<&'a TaskCatalogEntry> {
    let Some(pref) = preferences.iter().find(|p| p.learner_id == learner_id) else {
        return catalog.iter().take(FALLBACK_TASKS).collect();
    };

    catalog
        .iter()
        .filter(|task| matches_preference(pref, task))
        .take(MAX_MATCHES)
        .collect()
}

pub fn matches_preference(pref: &LearnerPreference, task: &TaskCatalogEntry) -> bool {
    if pref.interests.iter().any(|i| *i == task.subject) {
        return true;
    }
    if pref
        .preferred_task_types
        .iter()
        .any(|t| t == task.task_type.as_str())
    {
        return true;
    }
    task.tags
        .iter()
        .any(|tag| pref.interests.iter().any(|interest| tag_overlaps(tag, interest)))
}

/// Case-insensitive containment in either direction.
fn tag_overlaps(tag: &str, interest: &str) -> bool {
    let tag = tag.to_lowercase();
    let interest = interest.to_lowercase();
    interest.contains(&tag) || tag.contains(&interest)
}
