//! Board assembly: refresh orchestration, view building, and the service
//! facade that ties state, API, and the pure pipeline together.
//!
//! `build_view` is a pure function of one refresh cycle's snapshots plus
//! the externally supplied parameters (date, filters, cursor); nothing in
//! this module throws past its boundary — failed fetches degrade to empty
//! collections for the cycle.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::{ApiError, BoardApi};
use crate::attendance::AttendanceSheet;
use crate::carousel::{Carousel, CARDS_VISIBLE};
use crate::filters::{filter_members, BoardFilters, Selection};
use crate::roster::build_roster;
use crate::state::BoardState;
use crate::stats::{day_stats, task_aging, tasks_for_member, DayStats, TaskAging};
use crate::types::{
    Account, AccountRole, AttendanceRecord, AttendanceStatus, BoardMember, DsuEntry,
    InternProfile, Project, Task, TaskStatus,
};

/// All read collections from one refresh cycle. Swapped wholesale so a
/// computation never mixes partial new data with partial old data.
#[derive(Debug, Clone, Default)]
pub struct BoardSources {
    pub profiles: Vec<InternProfile>,
    pub intern_accounts: Vec<Account>,
    pub scrum_master_accounts: Vec<Account>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub dsu_entries: Vec<DsuEntry>,
}

/// A task plus its risk classification for the selected day.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub task: Task,
    pub aging: Option<TaskAging>,
}

/// One visible carousel slot's content.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberCard {
    pub member: BoardMember,
    pub yesterday_tasks: Vec<Task>,
    pub today_tasks: Vec<TaskCard>,
    pub attendance: Option<AttendanceStatus>,
}

/// Everything the display layer needs for one render.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub date: NaiveDate,
    pub stats: DayStats,
    /// Filtered roster backing the carousel.
    pub roster: Vec<BoardMember>,
    pub cards: [Option<MemberCard>; CARDS_VISIBLE],
    pub can_go_left: bool,
    pub can_go_right: bool,
}

fn or_empty<T>(collection: &str, result: Result<Vec<T>, ApiError>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            log::warn!("Failed to load {collection}: {err}; treating as empty for this cycle");
            Vec::new()
        }
    }
}

/// Fetch all six read collections concurrently. Each failed collection
/// degrades to empty for this cycle instead of blocking the render.
pub async fn load_sources(api: &dyn BoardApi) -> BoardSources {
    let (profiles, intern_accounts, scrum_master_accounts, projects, tasks, dsu_entries) = tokio::join!(
        api.fetch_intern_profiles(),
        api.fetch_accounts(AccountRole::Intern),
        api.fetch_accounts(AccountRole::ScrumMaster),
        api.fetch_projects(),
        api.fetch_tasks(),
        api.fetch_dsu_entries(),
    );

    BoardSources {
        profiles: or_empty("intern profiles", profiles),
        intern_accounts: or_empty("intern accounts", intern_accounts),
        scrum_master_accounts: or_empty("scrum master accounts", scrum_master_accounts),
        projects: or_empty("projects", projects),
        tasks: or_empty("tasks", tasks),
        dsu_entries: or_empty("DSU entries", dsu_entries),
    }
}

/// Build the complete board view for one render.
///
/// `stats.total` counts the base roster (after the scrum-master inclusion
/// policy, before member/project narrowing). Task aging is computed
/// relative to the selected day.
pub fn build_view(
    sources: &BoardSources,
    filters: &BoardFilters,
    date: NaiveDate,
    carousel: Carousel,
    attendance: &AttendanceSheet,
) -> BoardView {
    let base = build_roster(
        &sources.profiles,
        &sources.intern_accounts,
        &sources.scrum_master_accounts,
        filters.include_scrum_masters(),
    );
    let filtered = filter_members(&base, filters);
    let stats = day_stats(base.len(), &sources.dsu_entries, &sources.tasks, date);
    let yesterday = date.pred_opt().unwrap_or(date);

    let cards = carousel.visible(&filtered).map(|slot| {
        slot.map(|member| {
            let today_tasks = tasks_for_member(&sources.tasks, &member.id, date, &filters.status)
                .into_iter()
                .map(|task| TaskCard {
                    aging: task_aging(task, date),
                    task: task.clone(),
                })
                .collect();
            let yesterday_tasks =
                tasks_for_member(&sources.tasks, &member.id, yesterday, &filters.status)
                    .into_iter()
                    .cloned()
                    .collect();
            MemberCard {
                attendance: attendance.status_of(&member.id),
                member: member.clone(),
                yesterday_tasks,
                today_tasks,
            }
        })
    });

    BoardView {
        date,
        stats,
        can_go_left: carousel.can_go_left(),
        can_go_right: carousel.can_go_right(),
        roster: filtered,
        cards,
    }
}

/// Service facade over the board: owns the API handle and the mutable
/// state, exposes the operations the display layer drives.
pub struct BoardService {
    api: Arc<dyn BoardApi>,
    state: BoardState,
}

impl BoardService {
    pub fn new(api: Arc<dyn BoardApi>, date: NaiveDate) -> Self {
        Self {
            api,
            state: BoardState::new(date),
        }
    }

    /// One full refresh cycle: reload all six collections, then the
    /// attendance sheet for the selected date.
    pub async fn refresh(&self) {
        let sources = load_sources(self.api.as_ref()).await;
        self.state.install_sources(sources);
        self.reload_attendance().await;
    }

    async fn reload_attendance(&self) {
        let date = self.state.selected_date();
        match self.api.fetch_attendance(date).await {
            Ok(records) => {
                self.state
                    .install_attendance(AttendanceSheet::from_records(date, &records));
            }
            Err(err) => {
                log::warn!("Failed to load attendance for {date}: {err}");
            }
        }
    }

    /// Switch the selected date: the sheet is cleared immediately (no
    /// stale carry-over while the fetch is in flight), then reloaded.
    pub async fn select_date(&self, date: NaiveDate) {
        self.state.set_date(date);
        self.reload_attendance().await;
    }

    pub fn set_member_filter(&self, selection: Selection<String>) {
        self.state.set_member_filter(selection);
    }

    pub fn set_project_filter(&self, selection: Selection<String>) {
        self.state.set_project_filter(selection);
    }

    pub fn set_status_filter(&self, selection: Selection<TaskStatus>) {
        self.state.set_status_filter(selection);
    }

    pub fn go_left(&self) {
        self.state.go_left();
    }

    pub fn go_right(&self) {
        self.state.go_right();
    }

    /// Optimistic attendance mark: local state updates before the persist
    /// request and is kept even if the write fails (logged, not rolled
    /// back); the next date reload reconciles.
    pub async fn mark_attendance(&self, member_id: &str, status: AttendanceStatus) {
        let date = self.state.selected_date();
        self.state.mark_attendance(member_id, status);

        let record = AttendanceRecord {
            owner_id: member_id.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            status: status.as_str().to_string(),
        };
        if let Err(err) = self.api.mark_attendance(&record).await {
            log::warn!(
                "Failed to persist attendance for {member_id} on {date}: {err}; keeping optimistic value"
            );
        }
    }

    pub fn view(&self) -> BoardView {
        self.state.view()
    }

    /// Known project names from the current cycle (filter options).
    pub fn project_names(&self) -> Vec<String> {
        self.state.project_names()
    }
}
