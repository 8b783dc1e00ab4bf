//! Goal Positioning Operations
//!
//! Task order is a dense rank (0..N-1). Every structural change ends with
//! [`normalize_order`].

use serde::{Deserialize, Serialize};

use crate::domain::{Goal, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Sort tasks by current order (ties keep list order) and reassign 0..N-1
pub fn normalize_order(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.order);
    for (index, task) in tasks.iter_mut().enumerate() {
        task.order = index as u32;
    }
}

/// Trait for task ordering operations
pub trait GoalPositioningOperations {
    /// Tasks in ascending order
    fn sorted_tasks(&self) -> Vec<&Task>;

    /// Swap a task with its neighbour; no-op at either end or for unknown ids
    fn move_task(&self, task_id: &str, direction: MoveDirection) -> Goal;

    /// First incomplete task by order
    fn next_task(&self) -> Option<&Task>;
}

impl GoalPositioningOperations for Goal {
    fn sorted_tasks(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().collect();
        tasks.sort_by_key(|task| task.order);
        tasks
    }

    fn move_task(&self, task_id: &str, direction: MoveDirection) -> Goal {
        let mut tasks = self.tasks.clone();
        tasks.sort_by_key(|task| task.order);

        let Some(index) = tasks.iter().position(|task| task.id == task_id) else {
            return self.clone();
        };
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|t| *t < tasks.len()),
        };
        let Some(target) = target else {
            return self.clone();
        };

        tasks.swap(index, target);
        for (position, task) in tasks.iter_mut().enumerate() {
            task.order = position as u32;
        }

        Goal {
            tasks,
            ..self.clone()
        }
    }

    fn next_task(&self) -> Option<&Task> {
        self.tasks
            .iter()
            .filter(|task| !task.completed)
            .min_by_key(|task| task.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal_tree::GoalTaskOperations;

    fn goal_with(texts: &[&str]) -> Goal {
        texts
            .iter()
            .fold(Goal::new("Goal"), |goal, text| goal.add_task(text))
    }

    fn texts(goal: &Goal) -> Vec<String> {
        goal.sorted_tasks().iter().map(|t| t.text.clone()).collect()
    }

    fn orders(goal: &Goal) -> Vec<u32> {
        let mut orders: Vec<u32> = goal.tasks.iter().map(|t| t.order).collect();
        orders.sort();
        orders
    }

    #[test]
    fn test_normalize_order_closes_gaps() {
        let mut tasks = vec![Task::new("c", 7), Task::new("a", 2), Task::new("b", 5)];
        normalize_order(&mut tasks);
        let ranked: Vec<(&str, u32)> = tasks.iter().map(|t| (t.text.as_str(), t.order)).collect();
        assert_eq!(ranked, vec![("a", 0), ("b", 1), ("c", 2)]);
    }

    #[test]
    fn test_move_task_down_and_up() {
        let goal = goal_with(&["one", "two", "three"]);
        let first = goal.tasks[0].id.clone();

        let moved = goal.move_task(&first, MoveDirection::Down);
        assert_eq!(texts(&moved), vec!["two", "one", "three"]);
        assert_eq!(orders(&moved), vec![0, 1, 2]);

        let back = moved.move_task(&first, MoveDirection::Up);
        assert_eq!(texts(&back), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_move_task_at_edges_is_noop() {
        let goal = goal_with(&["one", "two", "three"]);
        let first = goal.tasks[0].id.clone();
        let last = goal.tasks[2].id.clone();

        assert_eq!(goal.move_task(&first, MoveDirection::Up), goal);
        assert_eq!(goal.move_task(&last, MoveDirection::Down), goal);
        assert_eq!(goal.move_task("missing", MoveDirection::Down), goal);
    }

    #[test]
    fn test_next_task_skips_completed() {
        let goal = goal_with(&["one", "two", "three"]);
        let first = goal.tasks[0].id.clone();
        let third = goal.tasks[2].id.clone();
        let goal = goal
            .toggle_task_completed(&first)
            .move_task(&third, MoveDirection::Up);

        // order is now: one (done), three, two
        assert_eq!(goal.next_task().map(|t| t.text.as_str()), Some("three"));
    }

    #[test]
    fn test_next_task_none_when_all_done_or_empty() {
        assert!(Goal::new("Empty").next_task().is_none());

        let goal = goal_with(&["only"]);
        let id = goal.tasks[0].id.clone();
        assert!(goal.toggle_task_completed(&id).next_task().is_none());
    }

    #[test]
    fn test_order_stays_dense_across_mutations() {
        let mut goal = goal_with(&["a", "b", "c", "d", "e"]);
        let ids: Vec<String> = goal.tasks.iter().map(|t| t.id.clone()).collect();

        goal = goal.move_task(&ids[4], MoveDirection::Up);
        goal = goal.delete_task(&ids[1]);
        goal = goal.add_task("f");
        goal = goal.move_task(&ids[0], MoveDirection::Down);
        goal = goal.delete_task(&ids[3]);
        goal = goal.move_task(&ids[2], MoveDirection::Up);

        let expected: Vec<u32> = (0..goal.tasks.len() as u32).collect();
        assert_eq!(orders(&goal), expected);
        assert_eq!(goal.tasks.len(), 4);
    }
}
