//! Daily aggregates: submission counts, blocked counts, task aging.
//!
//! All functions here are pure over one refresh cycle's snapshots. Record
//! dates are ISO strings on the wire; matching is on the `YYYY-MM-DD`
//! prefix so both date-only and full-timestamp values compare correctly.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::filters::Selection;
use crate::types::{DsuEntry, Task, TaskPriority, TaskStatus};

/// Roster-wide counts for the selected day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStats {
    pub total: usize,
    pub submitted: usize,
    pub not_submitted: usize,
    pub blocked: usize,
}

/// Risk classification for a not-yet-completed task with a due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAging {
    pub text: String,
    pub severity: AgingSeverity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgingSeverity {
    /// Overdue and high priority.
    Critical,
    /// Overdue, any other priority.
    Warning,
    /// Due exactly today.
    Caution,
}

impl AgingSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }
}

/// Extract the `YYYY-MM-DD` part of an ISO date or datetime string.
pub fn date_part(value: &str) -> Option<NaiveDate> {
    let prefix = value.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn matches_day(value: Option<&str>, day_key: &str) -> bool {
    value.is_some_and(|v| v.starts_with(day_key))
}

/// Compute roster-wide counts for `date`.
///
/// `total_members` is the base roster size (after the scrum-master
/// inclusion policy, before member/project narrowing). Submission records
/// may reference ids outside the roster, so `not_submitted` is floored at
/// zero rather than trusting the subtraction.
pub fn day_stats(
    total_members: usize,
    entries: &[DsuEntry],
    tasks: &[Task],
    date: NaiveDate,
) -> DayStats {
    let day_key = date.format("%Y-%m-%d").to_string();

    let submitted: HashSet<&str> = entries
        .iter()
        .filter(|entry| entry.date.starts_with(&day_key))
        .filter(|entry| match entry.status.as_deref() {
            None => true,
            Some(status) => status == "submitted",
        })
        .map(|entry| entry.owner_id.as_str())
        .collect();

    let blocked = tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Blocked)
        .filter(|task| matches_day(task.created_at.as_deref(), &day_key))
        .count();

    DayStats {
        total: total_members,
        submitted: submitted.len(),
        not_submitted: total_members.saturating_sub(submitted.len()),
        blocked,
    }
}

/// Classify a task's overdue/due-today risk relative to `today`.
///
/// Only evaluated for non-completed tasks with a parseable due date.
/// High-priority overdue takes precedence over generic overdue; due-today
/// suppresses any priority annotation. Future due dates classify as `None`.
pub fn task_aging(task: &Task, today: NaiveDate) -> Option<TaskAging> {
    if task.status == TaskStatus::Completed {
        return None;
    }
    let due = date_part(task.due_date.as_deref()?)?;
    let overdue_days = (today - due).num_days();

    if overdue_days > 0 && task.priority == TaskPriority::High {
        return Some(TaskAging {
            text: format!("{overdue_days} days overdue, high priority"),
            severity: AgingSeverity::Critical,
        });
    }
    if overdue_days > 0 {
        return Some(TaskAging {
            text: format!("{overdue_days} days overdue"),
            severity: AgingSeverity::Warning,
        });
    }
    if overdue_days == 0 {
        return Some(TaskAging {
            text: "due today".to_string(),
            severity: AgingSeverity::Caution,
        });
    }
    None
}

/// Tasks a member logged on `day`, narrowed by the status filter.
///
/// Feeds the per-card yesterday/today columns; the caller passes
/// `date - 1 day` for the yesterday column.
pub fn tasks_for_member<'a>(
    tasks: &'a [Task],
    member_id: &str,
    day: NaiveDate,
    status: &Selection<TaskStatus>,
) -> Vec<&'a Task> {
    let day_key = day.format("%Y-%m-%d").to_string();
    tasks
        .iter()
        .filter(|task| task.owner_id == member_id)
        .filter(|task| matches_day(task.created_at.as_deref(), &day_key))
        .filter(|task| status.matches(&task.status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(owner: &str, date: &str, status: Option<&str>) -> DsuEntry {
        DsuEntry {
            id: format!("d-{owner}"),
            owner_id: owner.to_string(),
            date: date.to_string(),
            status: status.map(|s| s.to_string()),
            yesterday: None,
            today: None,
            blockers: None,
            learnings: None,
        }
    }

    fn task(owner: &str, status: TaskStatus, priority: TaskPriority) -> Task {
        Task {
            id: format!("t-{owner}"),
            owner_id: owner.to_string(),
            title: "Task".to_string(),
            status,
            priority,
            due_date: None,
            created_at: None,
            project: None,
        }
    }

    #[test]
    fn submitted_counts_distinct_members_for_day() {
        let entries = vec![
            entry("i1", "2026-08-28", None),
            entry("i1", "2026-08-28T09:00:00Z", Some("submitted")),
            entry("i2", "2026-08-28", Some("submitted")),
            entry("i3", "2026-08-27", Some("submitted")),
        ];
        let stats = day_stats(5, &entries, &[], day("2026-08-28"));
        assert_eq!(stats.submitted, 2);
        assert_eq!(stats.not_submitted, 3);
    }

    #[test]
    fn not_submitted_floors_at_zero_with_orphan_ids() {
        // Three submissions reference ids outside a two-member roster.
        let entries = vec![
            entry("ghost1", "2026-08-28", None),
            entry("ghost2", "2026-08-28", None),
            entry("ghost3", "2026-08-28", None),
        ];
        let stats = day_stats(2, &entries, &[], day("2026-08-28"));
        assert_eq!(stats.not_submitted, 0);
    }

    #[test]
    fn blocked_counts_creation_day_not_due_day() {
        let mut blocked_today = task("i1", TaskStatus::Blocked, TaskPriority::Medium);
        blocked_today.created_at = Some("2026-08-28T10:00:00Z".to_string());
        blocked_today.due_date = Some("2026-09-15".to_string());

        let mut blocked_earlier = task("i2", TaskStatus::Blocked, TaskPriority::Medium);
        blocked_earlier.created_at = Some("2026-08-20T10:00:00Z".to_string());

        let mut open_today = task("i3", TaskStatus::Open, TaskPriority::Medium);
        open_today.created_at = Some("2026-08-28T10:00:00Z".to_string());

        let tasks = vec![blocked_today, blocked_earlier, open_today];
        let stats = day_stats(3, &[], &tasks, day("2026-08-28"));
        assert_eq!(stats.blocked, 1);
    }

    #[test]
    fn overdue_high_priority_is_critical() {
        let mut t = task("i1", TaskStatus::Open, TaskPriority::High);
        t.due_date = Some("2026-08-25".to_string());
        let aging = task_aging(&t, day("2026-08-28")).unwrap();
        assert_eq!(aging.severity, AgingSeverity::Critical);
        assert_eq!(aging.text, "3 days overdue, high priority");
    }

    #[test]
    fn overdue_other_priority_is_warning() {
        let mut t = task("i1", TaskStatus::InProgress, TaskPriority::Low);
        t.due_date = Some("2026-08-27".to_string());
        let aging = task_aging(&t, day("2026-08-28")).unwrap();
        assert_eq!(aging.severity, AgingSeverity::Warning);
        assert_eq!(aging.text, "1 days overdue");
    }

    #[test]
    fn due_today_suppresses_priority_annotation() {
        let mut t = task("i1", TaskStatus::Open, TaskPriority::High);
        t.due_date = Some("2026-08-28".to_string());
        let aging = task_aging(&t, day("2026-08-28")).unwrap();
        assert_eq!(aging.severity, AgingSeverity::Caution);
        assert_eq!(aging.text, "due today");
    }

    #[test]
    fn future_completed_and_dateless_tasks_have_no_aging() {
        let today = day("2026-08-28");

        let mut future = task("i1", TaskStatus::Open, TaskPriority::High);
        future.due_date = Some("2026-09-01".to_string());
        assert!(task_aging(&future, today).is_none());

        let mut done = task("i1", TaskStatus::Completed, TaskPriority::High);
        done.due_date = Some("2026-08-01".to_string());
        assert!(task_aging(&done, today).is_none());

        let dateless = task("i1", TaskStatus::Open, TaskPriority::High);
        assert!(task_aging(&dateless, today).is_none());
    }

    #[test]
    fn member_day_tasks_honor_status_filter() {
        let mut open = task("i1", TaskStatus::Open, TaskPriority::Medium);
        open.created_at = Some("2026-08-28T08:00:00Z".to_string());
        let mut blocked = task("i1", TaskStatus::Blocked, TaskPriority::Medium);
        blocked.created_at = Some("2026-08-28T09:00:00Z".to_string());
        let mut other_member = task("i2", TaskStatus::Open, TaskPriority::Medium);
        other_member.created_at = Some("2026-08-28T08:00:00Z".to_string());
        let tasks = vec![open, blocked, other_member];

        let all = tasks_for_member(&tasks, "i1", day("2026-08-28"), &Selection::All);
        assert_eq!(all.len(), 2);

        let only_blocked = tasks_for_member(
            &tasks,
            "i1",
            day("2026-08-28"),
            &Selection::Only(TaskStatus::Blocked),
        );
        assert_eq!(only_blocked.len(), 1);
        assert_eq!(only_blocked[0].status, TaskStatus::Blocked);
    }

    #[test]
    fn date_part_handles_timestamps_and_garbage() {
        assert_eq!(date_part("2026-08-28T09:00:00Z"), Some(day("2026-08-28")));
        assert_eq!(date_part("2026-08-28"), Some(day("2026-08-28")));
        assert_eq!(date_part("soon"), None);
        assert_eq!(date_part(""), None);
    }
}
