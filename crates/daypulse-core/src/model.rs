//! Entity types consumed by the scoring engine.
//!
//! Tasks, goals, notes and links are owned and mutated by external CRUD
//! collaborators; the engine reads them as immutable snapshot data and
//! never writes them back. Optional attributes carry an explicit
//! "effective value" accessor so the default policy lives in one place
//! instead of being scattered through the scoring logic.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task identifier (SQL-style numeric key).
pub type TaskId = u64;
/// Goal identifier.
pub type GoalId = u64;
/// Note identifier.
pub type NoteId = u64;
/// Link identifier.
pub type LinkId = u64;
/// User identifier.
pub type UserId = u64;

/// Task status.
///
/// Supports silent shelving and archival; an absent status on old
/// records is treated as [`TaskStatus::Pending`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Waiting to be done
    Pending,
    /// Completed
    Done,
    /// Completed and archived
    Archived,
    /// Silently shelved (hidden from default views)
    Shelved,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl TaskStatus {
    /// Whether this status counts as done for scoring purposes.
    pub fn is_counted_done(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Archived)
    }
}

/// Energy a task demands, used as a difficulty proxy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnergyLevel {
    /// Demanding, best tackled fresh
    High,
    /// Ordinary demand (default for unset records)
    Medium,
    /// Light, can be done tired
    Low,
}

impl Default for EnergyLevel {
    fn default() -> Self {
        EnergyLevel::Medium
    }
}

/// Mental load a task carries, independent of raw difficulty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MentalLoad {
    /// Emotionally or cognitively taxing
    Heavy,
    /// Routine (default for unset records)
    Light,
}

impl Default for MentalLoad {
    fn default() -> Self {
        MentalLoad::Light
    }
}

/// A user's task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Title (opaque to the engine)
    pub title: String,
    /// Free-form description (opaque to the engine)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Due date-time; tasks without one are never bucketed into a day
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Creation timestamp; may be absent on imported records
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Status; absent means pending
    #[serde(default)]
    pub status: Option<TaskStatus>,
    /// Energy requirement; absent means medium
    #[serde(default)]
    pub energy_requirement: Option<EnergyLevel>,
    /// Mental load; absent means light
    #[serde(default)]
    pub mental_load: Option<MentalLoad>,
    /// When the task was shelved (status = SHELVED)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelved_at: Option<DateTime<Utc>>,
    /// Owning user
    pub user_id: UserId,
}

impl Task {
    /// Effective status, treating an absent value as pending.
    pub fn effective_status(&self) -> TaskStatus {
        self.status.unwrap_or_default()
    }

    /// Effective energy requirement, treating an absent value as medium.
    pub fn effective_energy(&self) -> EnergyLevel {
        self.energy_requirement.unwrap_or_default()
    }

    /// Effective mental load, treating an absent value as light.
    pub fn effective_mental_load(&self) -> MentalLoad {
        self.mental_load.unwrap_or_default()
    }

    /// Whether the task counts as completed for scoring.
    pub fn is_counted_done(&self) -> bool {
        self.effective_status().is_counted_done()
    }

    /// Calendar date of the deadline, if any.
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        self.deadline.map(|d| d.date_naive())
    }
}

/// A user's goal. Archival doubles as the completion event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,
    /// Goal name (opaque to the engine)
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Archival timestamp; `None` means the goal is active
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    /// Owning user
    pub user_id: UserId,
}

impl Goal {
    /// A goal is active while it has not been archived.
    pub fn is_active(&self) -> bool {
        self.archived_at.is_none()
    }

    /// Whether the goal was completed (archived) on the given day.
    pub fn completed_on(&self, day: NaiveDate) -> bool {
        self.archived_at
            .map(|at| at.date_naive() == day)
            .unwrap_or(false)
    }
}

/// A user's note. Only the creation date matters to scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Title (opaque to the engine)
    pub title: String,
    /// Body (opaque to the engine)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Owning user
    pub user_id: UserId,
}

/// Source end of a weak link.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkSourceType {
    Task,
    Note,
}

/// Target end of a weak link.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkTargetType {
    Task,
    Note,
    Goal,
}

/// Untyped many-to-many edge between two entities.
///
/// A deliberately weak relationship -- no foreign keys, no cascading --
/// so the core data model stays uncoupled. The scoring engine only
/// consumes TASK -> GOAL edges and drops everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Unique identifier
    pub id: LinkId,
    pub source_type: LinkSourceType,
    pub source_id: u64,
    pub target_type: LinkTargetType,
    pub target_id: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Whether this edge connects a task to a goal.
    pub fn connects_task_to_goal(&self) -> bool {
        self.source_type == LinkSourceType::Task && self.target_type == LinkTargetType::Goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bare_task(status: Option<TaskStatus>) -> Task {
        Task {
            id: 1,
            title: "t".to_string(),
            description: None,
            deadline: None,
            created_at: None,
            status,
            energy_requirement: None,
            mental_load: None,
            shelved_at: None,
            user_id: 1,
        }
    }

    #[test]
    fn missing_status_is_pending() {
        let task = bare_task(None);
        assert_eq!(task.effective_status(), TaskStatus::Pending);
        assert!(!task.is_counted_done());
    }

    #[test]
    fn done_and_archived_count_as_done() {
        assert!(bare_task(Some(TaskStatus::Done)).is_counted_done());
        assert!(bare_task(Some(TaskStatus::Archived)).is_counted_done());
        assert!(!bare_task(Some(TaskStatus::Pending)).is_counted_done());
        assert!(!bare_task(Some(TaskStatus::Shelved)).is_counted_done());
    }

    #[test]
    fn missing_attributes_use_gentle_defaults() {
        let task = bare_task(None);
        assert_eq!(task.effective_energy(), EnergyLevel::Medium);
        assert_eq!(task.effective_mental_load(), MentalLoad::Light);
    }

    #[test]
    fn goal_activity_and_completion_day() {
        let archived = Utc.with_ymd_and_hms(2025, 3, 4, 22, 15, 0).unwrap();
        let goal = Goal {
            id: 7,
            name: "ship it".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            archived_at: Some(archived),
            user_id: 1,
        };
        assert!(!goal.is_active());
        assert!(goal.completed_on(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()));
        assert!(!goal.completed_on(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()));
    }

    #[test]
    fn status_serializes_uppercase() {
        let json = serde_json::to_string(&TaskStatus::Shelved).unwrap();
        assert_eq!(json, "\"SHELVED\"");
        let back: TaskStatus = serde_json::from_str("\"ARCHIVED\"").unwrap();
        assert_eq!(back, TaskStatus::Archived);
    }
}
