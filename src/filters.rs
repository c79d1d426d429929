//! Board filters: member / project drill-down and the task status filter.
//!
//! Filters arrive from the environment as plain scalars with an `"all"`
//! sentinel; internally they are typed selections so the pipeline functions
//! take explicit parameters instead of ambient state.

use crate::types::{BoardMember, TaskStatus};

/// A filter slot: either unrestricted or narrowed to one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(only) => only == value,
        }
    }
}

impl Selection<String> {
    /// Parse the wire scalar: `"all"` means no restriction.
    pub fn from_param(value: &str) -> Self {
        if value == "all" {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }
}

/// The three externally supplied filter slots.
///
/// `status` never affects roster membership; it narrows the per-member
/// task lists only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardFilters {
    /// Exact match on member id.
    pub member: Selection<String>,
    /// Exact match on the resolved project label.
    pub project: Selection<String>,
    /// Task status narrowing for the card task lists.
    pub status: Selection<TaskStatus>,
}

impl BoardFilters {
    /// Scrum masters join the base roster only when no member or project
    /// drill-down is active; narrowing either is intern-centric and removes
    /// them from roster construction entirely.
    pub fn include_scrum_masters(&self) -> bool {
        self.member.is_all() && self.project.is_all()
    }
}

/// Apply member and project narrowing to a roster. Unmatched filters yield
/// an empty result, which is a valid (not erroneous) state.
pub fn filter_members(members: &[BoardMember], filters: &BoardFilters) -> Vec<BoardMember> {
    members
        .iter()
        .filter(|member| filters.member.matches(&member.id))
        .filter(|member| filters.project.matches(&member.project))
        .cloned()
        .collect()
}
