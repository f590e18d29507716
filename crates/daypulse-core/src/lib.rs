//! # Daypulse Core Library
//!
//! This library provides the core logic for Daypulse, a personal
//! productivity tracker built around tasks, goals and notes. Its one
//! algorithmically dense subsystem is the daily planning-score engine:
//! a bounded, explainable 0-100 score per calendar day, computed from
//! read-only snapshots and suitable for trend plotting and
//! natural-language summaries.
//!
//! ## Architecture
//!
//! - **Snapshot loading**: external CRUD collaborators sit behind the
//!   [`SnapshotSource`] trait; one call loads one user's collections
//!   into a [`Snapshot`], degrading gracefully when the goal/link
//!   subsystem is down
//! - **Scoring**: [`ScoreEngine`] buckets tasks, notes and goal
//!   completions by day and combines weighted task completion, goal
//!   signals and note activity into one [`DailyScore`] per day
//! - **Statistics**: [`ScoreStats`] describes a score series
//!   (mean, extremes, volatility, trend) and renders the deterministic
//!   fallback report
//! - **Summaries**: [`Summarizer`] enriches the report through an
//!   external model call bounded by a timeout, always falling back to
//!   the local report
//!
//! Scoring is request-scoped and pure: a fresh snapshot and fresh
//! indices per call, nothing shared between calls, nothing persisted.

pub mod config;
pub mod error;
pub mod link_index;
pub mod model;
pub mod scoring;
pub mod snapshot;
pub mod stats;
pub mod summary;

pub use config::{Config, ScoreConfig, SummaryConfig};
pub use error::{ConfigError, CoreError, SnapshotError, SummaryError, Result};
pub use link_index::LinkIndex;
pub use model::{
    EnergyLevel, Goal, Link, LinkSourceType, LinkTargetType, MentalLoad, Note, Task, TaskStatus,
};
pub use scoring::{DailyScore, DateRange, ScoreEngine};
pub use snapshot::{JsonStore, SideLoad, Snapshot, SnapshotSource};
pub use stats::{ScoreStats, Trend, VolatilityBand};
pub use summary::Summarizer;
