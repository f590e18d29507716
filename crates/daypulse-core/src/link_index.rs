//! Bidirectional task <-> goal adjacency.
//!
//! The underlying link table is a flat, untyped edge collection shared
//! by every entity pair. The index builder consumes only TASK -> GOAL
//! edges and materializes both directions once per scoring call, so the
//! aggregator never rescans the table. Edges referencing ids outside the
//! caller-supplied valid sets are dropped silently -- stale rows and
//! foreign references must not leak another user's data into a score.

use std::collections::{HashMap, HashSet};

use crate::model::{GoalId, Link, TaskId};

/// Direction-indexed task <-> goal mappings for one scoring call.
///
/// Pure and idempotent to build; no ordering guarantees on the sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkIndex {
    task_to_goals: HashMap<TaskId, HashSet<GoalId>>,
    goal_to_tasks: HashMap<GoalId, HashSet<TaskId>>,
}

impl LinkIndex {
    /// Build the index from a raw edge collection and the id sets of the
    /// requesting user's tasks and goals.
    pub fn build(
        links: &[Link],
        valid_tasks: &HashSet<TaskId>,
        valid_goals: &HashSet<GoalId>,
    ) -> Self {
        let mut index = Self::default();
        for link in links {
            if !link.connects_task_to_goal() {
                continue;
            }
            if !valid_tasks.contains(&link.source_id) {
                continue;
            }
            if !valid_goals.contains(&link.target_id) {
                continue;
            }
            index
                .task_to_goals
                .entry(link.source_id)
                .or_default()
                .insert(link.target_id);
            index
                .goal_to_tasks
                .entry(link.target_id)
                .or_default()
                .insert(link.source_id);
        }
        index
    }

    /// Goals linked to a task, if any survived filtering.
    pub fn goals_for_task(&self, task_id: TaskId) -> Option<&HashSet<GoalId>> {
        self.task_to_goals.get(&task_id)
    }

    /// Tasks linked to a goal, if any survived filtering.
    pub fn tasks_for_goal(&self, goal_id: GoalId) -> Option<&HashSet<TaskId>> {
        self.goal_to_tasks.get(&goal_id)
    }

    /// Number of tasks with at least one goal edge.
    pub fn linked_task_count(&self) -> usize {
        self.task_to_goals.len()
    }

    /// Number of goals with at least one task edge.
    pub fn linked_goal_count(&self) -> usize {
        self.goal_to_tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinkSourceType, LinkTargetType};
    use chrono::{TimeZone, Utc};

    fn edge(id: u64, source: LinkSourceType, sid: u64, target: LinkTargetType, tid: u64) -> Link {
        Link {
            id,
            source_type: source,
            source_id: sid,
            target_type: target,
            target_id: tid,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn builds_both_directions() {
        let links = vec![
            edge(1, LinkSourceType::Task, 10, LinkTargetType::Goal, 100),
            edge(2, LinkSourceType::Task, 11, LinkTargetType::Goal, 100),
            edge(3, LinkSourceType::Task, 10, LinkTargetType::Goal, 101),
        ];
        let tasks: HashSet<_> = [10, 11].into_iter().collect();
        let goals: HashSet<_> = [100, 101].into_iter().collect();
        let index = LinkIndex::build(&links, &tasks, &goals);

        assert_eq!(index.goals_for_task(10).unwrap().len(), 2);
        assert_eq!(index.tasks_for_goal(100).unwrap().len(), 2);
        assert_eq!(index.tasks_for_goal(101).unwrap().len(), 1);
    }

    #[test]
    fn ignores_non_task_goal_edges() {
        let links = vec![
            edge(1, LinkSourceType::Note, 10, LinkTargetType::Goal, 100),
            edge(2, LinkSourceType::Task, 10, LinkTargetType::Note, 100),
            edge(3, LinkSourceType::Task, 10, LinkTargetType::Task, 11),
        ];
        let tasks: HashSet<_> = [10, 11].into_iter().collect();
        let goals: HashSet<_> = [100].into_iter().collect();
        let index = LinkIndex::build(&links, &tasks, &goals);

        assert_eq!(index.linked_task_count(), 0);
        assert_eq!(index.linked_goal_count(), 0);
    }

    #[test]
    fn drops_edges_with_foreign_endpoints() {
        let links = vec![
            edge(1, LinkSourceType::Task, 10, LinkTargetType::Goal, 100),
            // task owned by another user
            edge(2, LinkSourceType::Task, 99, LinkTargetType::Goal, 100),
            // goal owned by another user
            edge(3, LinkSourceType::Task, 10, LinkTargetType::Goal, 999),
        ];
        let tasks: HashSet<_> = [10].into_iter().collect();
        let goals: HashSet<_> = [100].into_iter().collect();
        let index = LinkIndex::build(&links, &tasks, &goals);

        assert_eq!(index.goals_for_task(10).unwrap().len(), 1);
        assert!(index.tasks_for_goal(999).is_none());
        assert_eq!(index.tasks_for_goal(100).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_edges_collapse() {
        let links = vec![
            edge(1, LinkSourceType::Task, 10, LinkTargetType::Goal, 100),
            edge(2, LinkSourceType::Task, 10, LinkTargetType::Goal, 100),
        ];
        let tasks: HashSet<_> = [10].into_iter().collect();
        let goals: HashSet<_> = [100].into_iter().collect();
        let index = LinkIndex::build(&links, &tasks, &goals);

        assert_eq!(index.goals_for_task(10).unwrap().len(), 1);
        assert_eq!(index.tasks_for_goal(100).unwrap().len(), 1);
    }
}
