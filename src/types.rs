//! Shared data types for the standup board engine.
//!
//! Wire structs mirror the intern-lifecycle backend's JSON field names
//! (Mongo-style `_id`, camelCase elsewhere, with the one legacy snake_case
//! holdout `created_at` on tasks). Derived board types are rebuilt from
//! fresh snapshots on every cycle and carry no identity across renders.

use serde::{Deserialize, Serialize};

// ============================================================================
// Wire records (REST responses)
// ============================================================================

/// Intern profile record from `GET /interns/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub current_project: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Platform account role. Admin accounts never appear on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Intern,
    ScrumMaster,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intern => "intern",
            Self::ScrumMaster => "scrum_master",
        }
    }
}

/// Platform account record from `GET /users?role=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: AccountRole,
}

/// Project record from `GET /projects/` (filter options only).
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Task lifecycle status. The backend also emits legacy markers like
/// `NOT_STARTED`; anything unrecognized lands in `Other` and is only ever
/// compared against `Completed` / `Blocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    InProgress,
    Completed,
    Blocked,
    #[serde(other)]
    Other,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Other
    }
}

impl TaskStatus {
    /// Parse a filter parameter (the wire spelling). `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    #[serde(other)]
    Other,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Task record from `GET /tasks/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "internId")]
    pub owner_id: String,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default, rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
}

/// Daily standup submission from `GET /dsu-entries/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DsuEntry {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "internId")]
    pub owner_id: String,
    pub date: String,
    /// Absent until the review flow stamps the entry (e.g. `reviewed`).
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub yesterday: Option<String>,
    #[serde(default)]
    pub today: Option<String>,
    #[serde(default)]
    pub blockers: Option<String>,
    #[serde(default)]
    pub learnings: Option<String>,
}

/// Office attendance record, read from and written to `/office-attendance`.
///
/// `status` stays a raw string on the wire; [`AttendanceStatus::parse`]
/// filters out anything that is not a recognized two-state value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(rename = "internId")]
    pub owner_id: String,
    pub date: String,
    pub status: String,
}

/// Two-state office attendance value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

// ============================================================================
// Derived board types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Intern,
    ScrumMaster,
}

/// Outcome of the profile/account join, carried on every member so
/// consumers pattern-match instead of null-checking optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileJoin {
    /// An intern profile matched the account's normalized email;
    /// id/domain/project are profile-sourced where present.
    Matched,
    /// No profile match; id and display labels fall back to the account.
    AccountOnly,
}

/// A unified intern-or-scrum-master identity. Exactly one per account
/// record; display labels are always resolved (never optional).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub kind: MemberKind,
    pub domain: String,
    pub project: String,
    pub join: ProfileJoin,
}

// ============================================================================
// Configuration
// ============================================================================

/// Client configuration, loaded from `~/.dsuboard/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            auth_token: None,
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_parses_backend_field_names() {
        let task: Task = serde_json::from_str(
            r#"{
                "_id": "t1",
                "internId": "i1",
                "title": "Wire up login",
                "status": "in_progress",
                "priority": "high",
                "dueDate": "2026-08-30",
                "created_at": "2026-08-28T09:12:00Z",
                "project": "Portal"
            }"#,
        )
        .unwrap();
        assert_eq!(task.owner_id, "i1");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.due_date.as_deref(), Some("2026-08-30"));
    }

    #[test]
    fn unknown_task_status_maps_to_other() {
        let task: Task = serde_json::from_str(
            r#"{"_id": "t1", "internId": "i1", "title": "x", "status": "NOT_STARTED"}"#,
        )
        .unwrap();
        assert_eq!(task.status, TaskStatus::Other);
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[test]
    fn dsu_entry_status_is_optional() {
        let entry: DsuEntry =
            serde_json::from_str(r#"{"_id": "d1", "internId": "i1", "date": "2026-08-28"}"#)
                .unwrap();
        assert!(entry.status.is_none());
    }

    #[test]
    fn attendance_status_parse_is_strict() {
        assert_eq!(
            AttendanceStatus::parse("present"),
            Some(AttendanceStatus::Present)
        );
        assert_eq!(AttendanceStatus::parse("remote"), None);
        assert_eq!(AttendanceStatus::Absent.as_str(), "absent");
    }

    #[test]
    fn config_defaults_apply() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000/api/v1");
        assert!(config.auth_token.is_none());
    }
}
