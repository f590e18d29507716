//! Read-only snapshot loading.
//!
//! One scoring call works on one [`Snapshot`]: every collection the user
//! owns, pulled into memory up front. Loaders are external collaborators
//! behind the [`SnapshotSource`] trait; staleness across collections is
//! tolerated (best-effort personal-scale data, no transactional
//! isolation assumed).
//!
//! Failure policy: task and note loading failures are fatal to the call.
//! Goal and link loading failures degrade -- the snapshot records the
//! reason and scoring proceeds with empty goal/link sets, so the basic
//! task + note score survives a goal subsystem outage.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::model::{Goal, Link, Note, Task, UserId};

/// Outcome of loading an optional-enhancement collection.
///
/// Fatal failures are expressed as `Result::Err` at the load boundary,
/// so the three possible outcomes of a side load are
/// `Err | Degraded | Loaded`.
#[derive(Debug, Clone, PartialEq)]
pub enum SideLoad<T> {
    /// The collection loaded normally.
    Loaded(T),
    /// The data source was unavailable; proceed with an empty set.
    Degraded { reason: String },
}

impl<T> SideLoad<T> {
    /// The loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            SideLoad::Loaded(value) => Some(value),
            SideLoad::Degraded { .. } => None,
        }
    }

    /// Why the load degraded, if it did.
    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            SideLoad::Loaded(_) => None,
            SideLoad::Degraded { reason } => Some(reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SideLoad::Degraded { .. })
    }
}

/// Loader contract for one user's collections.
///
/// Implementations return unordered collections already scoped to the
/// requesting user -- except links, which come unscoped (the original
/// edge table is global) and are ownership-filtered later by the link
/// index builder.
pub trait SnapshotSource {
    fn load_tasks(&self, user_id: UserId) -> Result<Vec<Task>, SnapshotError>;
    fn load_notes(&self, user_id: UserId) -> Result<Vec<Note>, SnapshotError>;
    fn load_goals(&self, user_id: UserId) -> Result<Vec<Goal>, SnapshotError>;
    fn load_links(&self) -> Result<Vec<Link>, SnapshotError>;
}

/// All of one user's data for a single scoring call.
///
/// The snapshot owns its collections for the duration of the call and
/// holds nothing across calls.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub user_id: UserId,
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub goals: SideLoad<Vec<Goal>>,
    pub links: SideLoad<Vec<Link>>,
}

impl Snapshot {
    /// Assemble a fully-loaded snapshot directly from collections.
    pub fn new(
        user_id: UserId,
        tasks: Vec<Task>,
        notes: Vec<Note>,
        goals: Vec<Goal>,
        links: Vec<Link>,
    ) -> Self {
        Self {
            user_id,
            tasks,
            notes,
            goals: SideLoad::Loaded(goals),
            links: SideLoad::Loaded(links),
        }
    }

    /// Load a snapshot from a source.
    ///
    /// Task/note failures propagate; goal/link failures degrade.
    pub fn load(source: &dyn SnapshotSource, user_id: UserId) -> Result<Self, SnapshotError> {
        let tasks = source.load_tasks(user_id)?;
        let notes = source.load_notes(user_id)?;
        let goals = match source.load_goals(user_id) {
            Ok(goals) => SideLoad::Loaded(goals),
            Err(err) => SideLoad::Degraded {
                reason: err.to_string(),
            },
        };
        let links = match source.load_links() {
            Ok(links) => SideLoad::Loaded(links),
            Err(err) => SideLoad::Degraded {
                reason: err.to_string(),
            },
        };
        Ok(Self {
            user_id,
            tasks,
            notes,
            goals,
            links,
        })
    }

    /// Goals, or an empty slice when the goal source degraded.
    pub fn goals(&self) -> &[Goal] {
        self.goals.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Links, or an empty slice when the link source degraded.
    pub fn links(&self) -> &[Link] {
        self.links.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any side load degraded.
    pub fn is_degraded(&self) -> bool {
        self.goals.is_degraded() || self.links.is_degraded()
    }

    /// Reasons for every degraded side load.
    pub fn degradation_reasons(&self) -> Vec<&str> {
        self.goals
            .degraded_reason()
            .into_iter()
            .chain(self.links.degraded_reason())
            .collect()
    }
}

/// JSON-file snapshot store.
///
/// Holds every user's collections in one file and stands in for the
/// external CRUD collaborator in the CLI and in tests. Persistence of
/// tasks/goals/notes is otherwise out of scope for this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsonStore {
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub goals: Vec<Goal>,
    pub links: Vec<Link>,
}

impl JsonStore {
    /// Read a store file. Read or parse failures are fatal -- the whole
    /// store backs tasks and notes too.
    pub fn open(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SnapshotError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SnapshotSource for JsonStore {
    fn load_tasks(&self, user_id: UserId) -> Result<Vec<Task>, SnapshotError> {
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    fn load_notes(&self, user_id: UserId) -> Result<Vec<Note>, SnapshotError> {
        Ok(self
            .notes
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    fn load_goals(&self, user_id: UserId) -> Result<Vec<Goal>, SnapshotError> {
        Ok(self
            .goals
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    fn load_links(&self) -> Result<Vec<Link>, SnapshotError> {
        Ok(self.links.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    struct GoalOutageSource;

    impl SnapshotSource for GoalOutageSource {
        fn load_tasks(&self, user_id: UserId) -> Result<Vec<Task>, SnapshotError> {
            Ok(vec![Task {
                id: 1,
                title: "only task".to_string(),
                description: None,
                deadline: None,
                created_at: None,
                status: None,
                energy_requirement: None,
                mental_load: None,
                shelved_at: None,
                user_id,
            }])
        }

        fn load_notes(&self, _user_id: UserId) -> Result<Vec<Note>, SnapshotError> {
            Ok(Vec::new())
        }

        fn load_goals(&self, _user_id: UserId) -> Result<Vec<Goal>, SnapshotError> {
            Err(SnapshotError::Unavailable {
                collection: "goal",
                reason: "table missing".to_string(),
            })
        }

        fn load_links(&self) -> Result<Vec<Link>, SnapshotError> {
            Err(SnapshotError::Unavailable {
                collection: "link",
                reason: "table missing".to_string(),
            })
        }
    }

    struct TaskOutageSource;

    impl SnapshotSource for TaskOutageSource {
        fn load_tasks(&self, _user_id: UserId) -> Result<Vec<Task>, SnapshotError> {
            Err(SnapshotError::Unavailable {
                collection: "task",
                reason: "connection refused".to_string(),
            })
        }

        fn load_notes(&self, _user_id: UserId) -> Result<Vec<Note>, SnapshotError> {
            Ok(Vec::new())
        }

        fn load_goals(&self, _user_id: UserId) -> Result<Vec<Goal>, SnapshotError> {
            Ok(Vec::new())
        }

        fn load_links(&self) -> Result<Vec<Link>, SnapshotError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn goal_outage_degrades_instead_of_failing() {
        let snapshot = Snapshot::load(&GoalOutageSource, 1).unwrap();
        assert_eq!(snapshot.tasks.len(), 1);
        assert!(snapshot.is_degraded());
        assert!(snapshot.goals().is_empty());
        assert!(snapshot.links().is_empty());
        assert_eq!(snapshot.degradation_reasons().len(), 2);
    }

    #[test]
    fn task_outage_is_fatal() {
        let err = Snapshot::load(&TaskOutageSource, 1).unwrap_err();
        assert!(err.to_string().contains("task data source unavailable"));
    }

    #[test]
    fn json_store_scopes_collections_to_the_user() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let store = JsonStore {
            tasks: Vec::new(),
            notes: vec![
                Note {
                    id: 1,
                    title: "mine".to_string(),
                    content: None,
                    created_at: created,
                    user_id: 1,
                },
                Note {
                    id: 2,
                    title: "theirs".to_string(),
                    content: None,
                    created_at: created,
                    user_id: 2,
                },
            ],
            goals: Vec::new(),
            links: Vec::new(),
        };
        let snapshot = Snapshot::load(&store, 1).unwrap();
        assert_eq!(snapshot.notes.len(), 1);
        assert_eq!(snapshot.notes[0].title, "mine");
        assert!(!snapshot.is_degraded());
    }

    #[test]
    fn store_parses_with_missing_collections() {
        let store: JsonStore = serde_json::from_str(r#"{"tasks": []}"#).unwrap();
        assert!(store.notes.is_empty());
        assert!(store.goals.is_empty());
    }
}
