//! Mutable board state and configuration loading.
//!
//! `BoardState` is the single owner of everything that changes between
//! renders: the current cycle's source snapshots, the filter selections,
//! the selected date, the carousel cursor, and the attendance sheet. All
//! derivation stays in pure functions; this module only stores parameters
//! and threads them through.

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::attendance::AttendanceSheet;
use crate::board::{build_view, BoardSources, BoardView};
use crate::carousel::Carousel;
use crate::filters::{filter_members, BoardFilters, Selection};
use crate::roster::build_roster;
use crate::types::{AttendanceStatus, Config, TaskStatus};

/// Board state shared with the display layer.
pub struct BoardState {
    sources: Mutex<BoardSources>,
    filters: Mutex<BoardFilters>,
    selected_date: Mutex<NaiveDate>,
    carousel: Mutex<Carousel>,
    attendance: Mutex<AttendanceSheet>,
}

/// A poisoned lock still holds usable state; recover the guard rather
/// than cascading the panic into every later render.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl BoardState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            sources: Mutex::new(BoardSources::default()),
            filters: Mutex::new(BoardFilters::default()),
            selected_date: Mutex::new(date),
            carousel: Mutex::new(Carousel::new(0)),
            attendance: Mutex::new(AttendanceSheet::empty(date)),
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        *lock(&self.selected_date)
    }

    pub fn filters(&self) -> BoardFilters {
        lock(&self.filters).clone()
    }

    pub fn carousel(&self) -> Carousel {
        *lock(&self.carousel)
    }

    fn filtered_len(&self) -> usize {
        let sources = lock(&self.sources);
        let filters = lock(&self.filters);
        let base = build_roster(
            &sources.profiles,
            &sources.intern_accounts,
            &sources.scrum_master_accounts,
            filters.include_scrum_masters(),
        );
        filter_members(&base, &filters).len()
    }

    /// Install a fresh refresh cycle's snapshots. The cursor is re-clamped
    /// (not reset) so navigation survives a roster that merely shrank.
    pub fn install_sources(&self, sources: BoardSources) {
        *lock(&self.sources) = sources;
        let count = self.filtered_len();
        lock(&self.carousel).clamp(count);
    }

    fn reset_carousel(&self) {
        let count = self.filtered_len();
        *lock(&self.carousel) = Carousel::new(count);
    }

    /// Member drill-down; resets the cursor to the start.
    pub fn set_member_filter(&self, selection: Selection<String>) {
        lock(&self.filters).member = selection;
        self.reset_carousel();
    }

    /// Project drill-down; resets the cursor to the start.
    pub fn set_project_filter(&self, selection: Selection<String>) {
        lock(&self.filters).project = selection;
        self.reset_carousel();
    }

    /// Task status narrowing. Does not touch the cursor: it never changes
    /// roster membership, only the card task lists.
    pub fn set_status_filter(&self, selection: Selection<TaskStatus>) {
        lock(&self.filters).status = selection;
    }

    /// Switch the selected date and discard the attendance sheet
    /// immediately; the caller re-fetches and installs the new sheet.
    pub fn set_date(&self, date: NaiveDate) {
        *lock(&self.selected_date) = date;
        *lock(&self.attendance) = AttendanceSheet::empty(date);
    }

    /// Install a fetched attendance sheet — but only if its date still
    /// matches the selected date. A slow response for a previously
    /// selected date is dropped instead of clobbering newer state.
    pub fn install_attendance(&self, sheet: AttendanceSheet) {
        let selected = self.selected_date();
        if sheet.date() != selected {
            log::warn!(
                "Dropping stale attendance snapshot for {} (selected date is {selected})",
                sheet.date()
            );
            return;
        }
        *lock(&self.attendance) = sheet;
    }

    pub fn attendance(&self) -> AttendanceSheet {
        lock(&self.attendance).clone()
    }

    pub fn mark_attendance(&self, member_id: &str, status: AttendanceStatus) {
        lock(&self.attendance).mark(member_id, status);
    }

    pub fn go_left(&self) {
        lock(&self.carousel).retreat();
    }

    pub fn go_right(&self) {
        lock(&self.carousel).advance();
    }

    /// Build the current render's view from the stored parameters.
    pub fn view(&self) -> BoardView {
        let date = self.selected_date();
        let filters = self.filters();
        let carousel = self.carousel();
        let sources = lock(&self.sources);
        let attendance = lock(&self.attendance);
        build_view(&sources, &filters, date, carousel, &attendance)
    }

    pub fn project_names(&self) -> Vec<String> {
        lock(&self.sources)
            .projects
            .iter()
            .map(|project| project.name.clone())
            .collect()
    }
}

// ============================================================================
// Configuration loading
// ============================================================================

/// Load client configuration from `~/.dsuboard/config.json`, falling back
/// to defaults when the file is missing or invalid. `DSUBOARD_API_URL` and
/// `DSUBOARD_TOKEN` override the file.
pub fn load_config() -> Config {
    let mut config = dirs::home_dir()
        .map(|home| home.join(".dsuboard").join("config.json"))
        .filter(|path| path.exists())
        .and_then(|path| match read_config(&path) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("Ignoring config at {}: {err}", path.display());
                None
            }
        })
        .unwrap_or_default();

    if let Ok(url) = std::env::var("DSUBOARD_API_URL") {
        if !url.is_empty() {
            config.api_base_url = url;
        }
    }
    if let Ok(token) = std::env::var("DSUBOARD_TOKEN") {
        if !token.is_empty() {
            config.auth_token = Some(token);
        }
    }

    config
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<Config, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("failed to read config: {e}"))?;
    serde_json::from_str(&content).map_err(|e| format!("failed to parse config: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Account, AccountRole};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn account(id: &str, email: &str, role: AccountRole) -> Account {
        Account {
            id: id.to_string(),
            name: id.to_uppercase(),
            email: email.to_string(),
            role,
        }
    }

    fn state_with_interns(n: usize) -> BoardState {
        let state = BoardState::new(day("2026-08-28"));
        let sources = BoardSources {
            intern_accounts: (0..n)
                .map(|i| account(&format!("u{i}"), &format!("u{i}@x.com"), AccountRole::Intern))
                .collect(),
            ..Default::default()
        };
        state.install_sources(sources);
        state
    }

    #[test]
    fn filter_change_resets_cursor() {
        let state = state_with_interns(5);
        state.go_right();
        state.go_right();
        assert_eq!(state.carousel().start_index(), 2);

        state.set_member_filter(Selection::Only("u1".to_string()));
        assert_eq!(state.carousel().start_index(), 0);

        state.set_member_filter(Selection::All);
        state.go_right();
        state.set_project_filter(Selection::Only("Unassigned".to_string()));
        assert_eq!(state.carousel().start_index(), 0);
    }

    #[test]
    fn status_filter_leaves_cursor_alone() {
        let state = state_with_interns(5);
        state.go_right();
        state.set_status_filter(Selection::Only(TaskStatus::Blocked));
        assert_eq!(state.carousel().start_index(), 1);
    }

    #[test]
    fn install_sources_clamps_cursor_after_shrink() {
        let state = state_with_interns(5);
        for _ in 0..4 {
            state.go_right();
        }
        assert_eq!(state.carousel().start_index(), 4);

        let shrunk = BoardSources {
            intern_accounts: vec![account("u0", "u0@x.com", AccountRole::Intern)],
            ..Default::default()
        };
        state.install_sources(shrunk);
        assert_eq!(state.carousel().start_index(), 0);
    }

    #[test]
    fn date_change_clears_attendance_before_fetch_resolves() {
        let state = state_with_interns(1);
        state.mark_attendance("u0", AttendanceStatus::Present);
        assert_eq!(state.attendance().len(), 1);

        state.set_date(day("2026-08-29"));
        assert!(state.attendance().is_empty());
        assert_eq!(state.attendance().date(), day("2026-08-29"));
    }

    #[test]
    fn stale_attendance_snapshot_is_dropped() {
        let state = state_with_interns(1);
        state.set_date(day("2026-08-29"));

        // A slow response for the previously selected date arrives late.
        let mut stale = AttendanceSheet::empty(day("2026-08-28"));
        stale.mark("u0", AttendanceStatus::Present);
        state.install_attendance(stale);

        assert!(state.attendance().is_empty());
        assert_eq!(state.attendance().date(), day("2026-08-29"));
    }

    #[test]
    fn matching_attendance_snapshot_installs() {
        let state = state_with_interns(1);
        let mut sheet = AttendanceSheet::empty(day("2026-08-28"));
        sheet.mark("u0", AttendanceStatus::Absent);
        state.install_attendance(sheet);
        assert_eq!(
            state.attendance().status_of("u0"),
            Some(AttendanceStatus::Absent)
        );
    }

    #[test]
    fn read_config_parses_file() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"apiBaseUrl": "https://ilm.example.com/api/v1", "authToken": "t0ken"}}"#
        )
        .unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.api_base_url, "https://ilm.example.com/api/v1");
        assert_eq!(config.auth_token.as_deref(), Some("t0ken"));
    }

    #[test]
    fn read_config_rejects_garbage() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "not json").unwrap();
        assert!(read_config(&path).is_err());
    }
}
