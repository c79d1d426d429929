//! Standup-board composition and windowing engine for the intern
//! lifecycle admin platform.
//!
//! The pipeline is pure from snapshots to pixels-adjacent data: the
//! [`roster`] module reconciles intern profiles with platform accounts,
//! [`filters`] narrows the roster, [`stats`] derives the day's aggregates
//! and task risk labels, and [`carousel`] windows the result for display.
//! [`board`] orchestrates refresh cycles over the [`api`] client and
//! [`state`] holds the externally supplied parameters between renders.

pub mod api;
pub mod attendance;
pub mod board;
pub mod carousel;
pub mod filters;
pub mod roster;
pub mod state;
pub mod stats;
pub mod types;
