//! Daily planning-score engine.
//!
//! Computes one bounded, explainable score per calendar day from a
//! user's tasks, goals, notes and their cross-links, suitable for
//! plotting a trend line and for feeding the score summarizer.
//!
//! ## Point split
//!
//! | Dimension | Points | Signals |
//! |-----------|--------|---------|
//! | Tasks | 0-70 | weighted completion rate (50) + saturating throughput (20) |
//! | Goals | 0-20 | standing progress (8) + completion events (8) + touched coverage (4) |
//! | Notes | 0-10 | saturating note-taking factor |
//!
//! Throughput, note and touched-goal factors all use the saturating form
//! `1 - exp(-x/k)`: quick early reward, flat tail, so stacking many tiny
//! items cannot farm the score.
//!
//! ## Task weight
//!
//! A completed task contributes its weight, not a flat 1. Weight blends
//! energy requirement (difficulty proxy) and mental load with an
//! interaction term, then scales by cycle length, so a hard, taxing,
//! long-cycle task outweighs a pile of trivial ones:
//!
//! ```text
//! base        = 0.55 * difficulty + 0.45 * burden
//! interaction = 0.20 * min(difficulty, burden)
//! weight      = clamp((base + interaction) * cycle_mult, 0.30, 1.60)
//! ```
//!
//! The computation is single-threaded, request-scoped and pure: fresh
//! snapshot and indices per call, nothing shared across calls, nothing
//! persisted.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::link_index::LinkIndex;
use crate::model::{EnergyLevel, Goal, GoalId, MentalLoad, Task, TaskId};
use crate::snapshot::Snapshot;

/// Default inclusive window length when the caller omits a start date.
pub const DEFAULT_WINDOW_DAYS: u32 = 14;

const COMPLETION_POINTS: f64 = 50.0;
const THROUGHPUT_POINTS: f64 = 20.0;
const GOAL_PROGRESS_POINTS: f64 = 8.0;
const GOAL_COMPLETION_POINTS: f64 = 8.0;
const GOAL_TOUCH_POINTS: f64 = 4.0;
const NOTE_POINTS: f64 = 10.0;

const THROUGHPUT_SCALE: f64 = 3.0;
const NOTE_SCALE: f64 = 2.0;
const TOUCH_SCALE: f64 = 2.0;

const PROGRESS_EXPONENT: f64 = 0.7;
const CYCLE_CAP_DAYS: i64 = 90;
const WEIGHT_MIN: f64 = 0.30;
const WEIGHT_MAX: f64 = 1.60;

/// Inclusive calendar date range, normalized so start <= end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, silently swapping reversed bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Apply the default window: a missing end becomes `today` (injected
    /// by the caller so the engine stays clock-free), a missing start
    /// becomes `end - 13 days`.
    pub fn resolve(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self::resolve_with_window(start, end, today, DEFAULT_WINDOW_DAYS)
    }

    /// Like [`DateRange::resolve`] with a caller-chosen inclusive window
    /// length for the missing-start default.
    pub fn resolve_with_window(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
        window_days: u32,
    ) -> Self {
        let end = end.unwrap_or(today);
        let back = window_days.saturating_sub(1) as i64;
        let start = start.unwrap_or_else(|| end - chrono::Duration::days(back));
        Self::new(start, end)
    }

    /// Number of days in the range, inclusive.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterate every day from start to end inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// One day's score with every raw count and sub-factor that went into
/// it. Constructed fresh per (user, day) on every request; immutable
/// once returned; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScore {
    /// Calendar day
    pub date: NaiveDate,
    /// Tasks whose deadline falls on this day
    pub planned_tasks: u32,
    /// Of those, tasks counted done
    pub completed_tasks: u32,
    /// Notes created on this day
    pub note_count: u32,
    /// Unweighted completed/planned (0 when nothing planned); reported
    /// for transparency, not used in the score itself
    pub task_completion_rate: f64,
    /// Weight-adjusted completion rate
    pub weighted_task_completion_rate: f64,
    /// Saturating volume factor over completed weight
    pub throughput_factor: f64,
    /// Saturating note-taking factor
    pub note_factor: f64,
    /// Active goals at query time
    pub active_goal_count: u32,
    /// Average concavity-adjusted progress over active goals
    pub avg_goal_progress: f64,
    /// Goals archived on this day
    pub goals_completed_today: u32,
    /// Saturating coverage of goals touched by the day's completions
    pub touched_goal_factor: f64,
    /// Combined score, integer 0-100
    pub total_score: i32,
}

/// Contribution weight of a single task.
///
/// Deterministic and pure. Blends effective energy requirement and
/// mental load (see the module docs for the formula), then scales by
/// cycle length: tasks spanning a longer created -> deadline window earn
/// a logarithmic bump, capped at 90 days. Tasks without a deadline fall
/// back to age relative to `reference_date` at a gentler coefficient.
pub fn task_weight(task: &Task, reference_date: NaiveDate) -> f64 {
    let difficulty: f64 = match task.effective_energy() {
        EnergyLevel::High => 1.00,
        EnergyLevel::Medium => 0.72,
        EnergyLevel::Low => 0.48,
    };
    let burden: f64 = match task.effective_mental_load() {
        MentalLoad::Heavy => 1.00,
        MentalLoad::Light => 0.70,
    };

    let base = 0.55 * difficulty + 0.45 * burden;
    let interaction = 0.20 * difficulty.min(burden);
    let raw = base + interaction;

    let cycle_mult = match (task.created_at, task.deadline) {
        (Some(created), Some(deadline)) => {
            let cycle_days = (deadline.date_naive() - created.date_naive())
                .num_days()
                .max(0)
                .min(CYCLE_CAP_DAYS);
            1.0 + 0.15 * (cycle_days as f64).ln_1p()
        }
        (Some(created), None) => {
            let age_days = (reference_date - created.date_naive())
                .num_days()
                .max(0)
                .min(CYCLE_CAP_DAYS);
            1.0 + 0.10 * (age_days as f64).ln_1p()
        }
        _ => 1.0,
    };

    (raw * cycle_mult).clamp(WEIGHT_MIN, WEIGHT_MAX)
}

/// Concavity-adjusted progress of one goal, in [0, 1].
///
/// Ratio of counted-done over resolvable linked tasks, raised to 0.7 so
/// early partial progress earns more than linear while full completion
/// still scores strictly highest. Unresolvable task ids are skipped and
/// do not inflate the denominator; a goal with no surviving links is 0.
pub fn goal_progress(
    goal_id: GoalId,
    index: &LinkIndex,
    tasks_by_id: &HashMap<TaskId, &Task>,
) -> f64 {
    let Some(task_ids) = index.tasks_for_goal(goal_id) else {
        return 0.0;
    };

    let mut total = 0u32;
    let mut done = 0u32;
    for task_id in task_ids {
        let Some(task) = tasks_by_id.get(task_id) else {
            continue;
        };
        total += 1;
        if task.is_counted_done() {
            done += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    (f64::from(done) / f64::from(total)).powf(PROGRESS_EXPONENT)
}

/// The daily aggregator.
pub struct ScoreEngine;

impl ScoreEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute one [`DailyScore`] per calendar day in the range.
    ///
    /// Buckets and indices are precomputed once, then each day is scored
    /// independently; no state survives from one day to the next. The
    /// average goal progress reflects task completion state as of the
    /// query and is applied uniformly to every day in the range -- it is
    /// a standing signal, not a historical reconstruction.
    pub fn calculate_scores(&self, snapshot: &Snapshot, range: DateRange) -> Vec<DailyScore> {
        let tasks_by_id: HashMap<TaskId, &Task> =
            snapshot.tasks.iter().map(|t| (t.id, t)).collect();
        let valid_tasks: HashSet<TaskId> = tasks_by_id.keys().copied().collect();
        let valid_goals: HashSet<GoalId> = snapshot.goals().iter().map(|g| g.id).collect();
        let index = LinkIndex::build(snapshot.links(), &valid_tasks, &valid_goals);

        let mut tasks_by_deadline: HashMap<NaiveDate, Vec<&Task>> = HashMap::new();
        for task in &snapshot.tasks {
            if let Some(day) = task.deadline_date() {
                tasks_by_deadline.entry(day).or_default().push(task);
            }
        }

        let mut notes_by_day: HashMap<NaiveDate, u32> = HashMap::new();
        for note in &snapshot.notes {
            *notes_by_day.entry(note.created_at.date_naive()).or_default() += 1;
        }

        let mut goals_archived_by_day: HashMap<NaiveDate, u32> = HashMap::new();
        for goal in snapshot.goals() {
            if let Some(archived) = goal.archived_at {
                *goals_archived_by_day
                    .entry(archived.date_naive())
                    .or_default() += 1;
            }
        }

        let active_goals: Vec<&Goal> = snapshot.goals().iter().filter(|g| g.is_active()).collect();
        let avg_goal_progress = if active_goals.is_empty() {
            0.0
        } else {
            let sum: f64 = active_goals
                .iter()
                .map(|g| goal_progress(g.id, &index, &tasks_by_id))
                .sum();
            sum / active_goals.len() as f64
        };

        let mut series = Vec::with_capacity(range.day_count().max(0) as usize);
        for day in range.days() {
            series.push(self.score_day(
                day,
                tasks_by_deadline.get(&day).map(Vec::as_slice).unwrap_or(&[]),
                notes_by_day.get(&day).copied().unwrap_or(0),
                goals_archived_by_day.get(&day).copied().unwrap_or(0),
                active_goals.len() as u32,
                avg_goal_progress,
                &index,
            ));
        }
        series
    }

    #[allow(clippy::too_many_arguments)]
    fn score_day(
        &self,
        day: NaiveDate,
        tasks_of_day: &[&Task],
        note_count: u32,
        goals_completed_today: u32,
        active_goal_count: u32,
        avg_goal_progress: f64,
        index: &LinkIndex,
    ) -> DailyScore {
        let planned = tasks_of_day.len() as u32;
        let completed = tasks_of_day.iter().filter(|t| t.is_counted_done()).count() as u32;
        let completion_rate = if planned == 0 {
            0.0
        } else {
            f64::from(completed) / f64::from(planned)
        };

        let mut planned_weight = 0.0;
        let mut completed_weight = 0.0;
        for task in tasks_of_day {
            let w = task_weight(task, day);
            planned_weight += w;
            if task.is_counted_done() {
                completed_weight += w;
            }
        }
        let weighted_rate = if planned_weight <= 0.0 {
            0.0
        } else {
            completed_weight / planned_weight
        };
        let throughput_factor = 1.0 - (-completed_weight / THROUGHPUT_SCALE).exp();

        let note_factor = 1.0 - (-f64::from(note_count) / NOTE_SCALE).exp();

        // Coverage of goals advanced today: goals linked to any of the
        // day's counted-done tasks.
        let mut touched: HashSet<GoalId> = HashSet::new();
        for task in tasks_of_day {
            if !task.is_counted_done() {
                continue;
            }
            if let Some(goal_ids) = index.goals_for_task(task.id) {
                touched.extend(goal_ids.iter().copied());
            }
        }
        let touched_goal_factor = if touched.is_empty() {
            0.0
        } else {
            1.0 - (-(touched.len() as f64) / TOUCH_SCALE).exp()
        };

        let task_score = COMPLETION_POINTS * weighted_rate + THROUGHPUT_POINTS * throughput_factor;
        let goal_score = GOAL_PROGRESS_POINTS * avg_goal_progress
            + GOAL_COMPLETION_POINTS * (1.0 - (-f64::from(goals_completed_today)).exp())
            + GOAL_TOUCH_POINTS * touched_goal_factor;
        let note_score = NOTE_POINTS * note_factor;
        let total_score = (task_score + goal_score + note_score).clamp(0.0, 100.0).round() as i32;

        DailyScore {
            date: day,
            planned_tasks: planned,
            completed_tasks: completed,
            note_count,
            task_completion_rate: round1(completion_rate),
            weighted_task_completion_rate: round1(weighted_rate),
            throughput_factor: round1(throughput_factor),
            note_factor: round1(note_factor),
            active_goal_count,
            avg_goal_progress: round1(avg_goal_progress),
            goals_completed_today,
            touched_goal_factor: round1(touched_goal_factor),
            total_score,
        }
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
