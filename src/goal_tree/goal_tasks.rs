//! Goal Task Operations
//!
//! Task-level mutations on a goal. Unknown ids and blank text leave the goal unchanged.

use crate::domain::{Goal, Task};

use super::goal_positioning::normalize_order;

/// Trait for task operations on a goal
pub trait GoalTaskOperations {
    /// Append a task at the end; blank text is ignored
    fn add_task(&self, text: &str) -> Goal;

    /// Replace the task with the same id
    fn update_task(&self, task: &Task) -> Goal;

    /// Remove a task and re-densify the remaining order
    fn delete_task(&self, task_id: &str) -> Goal;

    /// Flip a task's completion (subtasks are not touched)
    fn toggle_task_completed(&self, task_id: &str) -> Goal;

    /// Flip a task's expanded flag
    fn toggle_task_expanded(&self, task_id: &str) -> Goal;

    /// Flip the goal's expanded flag
    fn toggle_expanded(&self) -> Goal;

    fn completed_count(&self) -> usize;

    /// Rounded completion percentage, 0 without tasks
    fn progress(&self) -> u8;
}

impl GoalTaskOperations for Goal {
    fn add_task(&self, text: &str) -> Goal {
        if text.trim().is_empty() {
            return self.clone();
        }

        let mut goal = self.clone();
        normalize_order(&mut goal.tasks);
        goal.tasks.push(Task::new(text, goal.tasks.len() as u32));
        goal
    }

    fn update_task(&self, task: &Task) -> Goal {
        let mut goal = self.clone();
        if let Some(existing) = goal.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task.clone();
            normalize_order(&mut goal.tasks);
        }
        goal
    }

    fn delete_task(&self, task_id: &str) -> Goal {
        let mut goal = self.clone();
        goal.tasks.retain(|t| t.id != task_id);
        if goal.tasks.len() == self.tasks.len() {
            return self.clone();
        }
        normalize_order(&mut goal.tasks);
        goal
    }

    fn toggle_task_completed(&self, task_id: &str) -> Goal {
        let mut goal = self.clone();
        if let Some(task) = goal.tasks.iter_mut().find(|t| t.id == task_id) {
            task.completed = !task.completed;
        }
        goal
    }

    fn toggle_task_expanded(&self, task_id: &str) -> Goal {
        let mut goal = self.clone();
        if let Some(task) = goal.tasks.iter_mut().find(|t| t.id == task_id) {
            task.expanded = !task.expanded;
        }
        goal
    }

    fn toggle_expanded(&self) -> Goal {
        Goal {
            expanded: !self.expanded,
            ..self.clone()
        }
    }

    fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    fn progress(&self) -> u8 {
        if self.tasks.is_empty() {
            return 0;
        }
        let ratio = self.completed_count() as f64 / self.tasks.len() as f64;
        (ratio * 100.0).round() as u8
    }
}
