//! Per-day office attendance sheet.
//!
//! The sheet is the only locally-owned state with a lifecycle: created
//! empty when the selected date changes, populated from a fetch, and
//! updated point-wise by marks. It is always replaced wholesale across
//! dates, never merged.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::{AttendanceRecord, AttendanceStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceSheet {
    date: NaiveDate,
    by_member: HashMap<String, AttendanceStatus>,
}

impl AttendanceSheet {
    /// Empty sheet for a date; installed immediately on date change so no
    /// stale entries from the prior date survive while the fetch is in
    /// flight.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            by_member: HashMap::new(),
        }
    }

    /// Build a sheet from fetched records. Records with an empty member id
    /// or an unrecognized status string are skipped.
    pub fn from_records(date: NaiveDate, records: &[AttendanceRecord]) -> Self {
        let mut by_member = HashMap::with_capacity(records.len());
        for record in records {
            if record.owner_id.is_empty() {
                continue;
            }
            if let Some(status) = AttendanceStatus::parse(&record.status) {
                by_member.insert(record.owner_id.clone(), status);
            }
        }
        Self { date, by_member }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status_of(&self, member_id: &str) -> Option<AttendanceStatus> {
        self.by_member.get(member_id).copied()
    }

    /// Last-write-wins mark; no history is retained for the day.
    pub fn mark(&mut self, member_id: &str, status: AttendanceStatus) {
        self.by_member.insert(member_id.to_string(), status);
    }

    pub fn len(&self) -> usize {
        self.by_member.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_member.is_empty()
    }
}
