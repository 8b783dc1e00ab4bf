//! Goal Subtask Operations
//!
//! Subtasks have no order field; list position is insertion order.

use crate::domain::{Goal, Subtask, Task};

use super::goal_tasks::GoalTaskOperations;

/// Trait for subtask operations on a single task
pub trait TaskSubtaskOperations {
    fn add_subtask(&self, text: &str) -> Task;
    fn update_subtask(&self, subtask: &Subtask) -> Task;
    fn set_subtask_completed(&self, subtask_id: &str, completed: bool) -> Task;
    fn delete_subtask(&self, subtask_id: &str) -> Task;
}

impl TaskSubtaskOperations for Task {
    fn add_subtask(&self, text: &str) -> Task {
        let mut task = self.clone();
        if !text.trim().is_empty() {
            task.subtasks.push(Subtask::new(text));
        }
        task
    }

    fn update_subtask(&self, subtask: &Subtask) -> Task {
        let mut task = self.clone();
        if let Some(existing) = task.subtasks.iter_mut().find(|s| s.id == subtask.id) {
            *existing = subtask.clone();
        }
        task
    }

    fn set_subtask_completed(&self, subtask_id: &str, completed: bool) -> Task {
        let mut task = self.clone();
        if let Some(subtask) = task.subtasks.iter_mut().find(|s| s.id == subtask_id) {
            subtask.completed = completed;
        }
        task
    }

    fn delete_subtask(&self, subtask_id: &str) -> Task {
        let mut task = self.clone();
        task.subtasks.retain(|s| s.id != subtask_id);
        task
    }
}

/// Goal-level wrappers that locate the task first
pub trait GoalSubtaskOperations {
    fn add_subtask_to(&self, task_id: &str, text: &str) -> Goal;
    fn update_subtask_in(&self, task_id: &str, subtask: &Subtask) -> Goal;
    fn set_subtask_completed_in(&self, task_id: &str, subtask_id: &str, completed: bool) -> Goal;
    fn delete_subtask_from(&self, task_id: &str, subtask_id: &str) -> Goal;
}

impl GoalSubtaskOperations for Goal {
    fn add_subtask_to(&self, task_id: &str, text: &str) -> Goal {
        with_task(self, task_id, |task| task.add_subtask(text))
    }

    fn update_subtask_in(&self, task_id: &str, subtask: &Subtask) -> Goal {
        with_task(self, task_id, |task| task.update_subtask(subtask))
    }

    fn set_subtask_completed_in(&self, task_id: &str, subtask_id: &str, completed: bool) -> Goal {
        with_task(self, task_id, |task| task.set_subtask_completed(subtask_id, completed))
    }

    fn delete_subtask_from(&self, task_id: &str, subtask_id: &str) -> Goal {
        with_task(self, task_id, |task| task.delete_subtask(subtask_id))
    }
}

fn with_task(goal: &Goal, task_id: &str, f: impl FnOnce(&Task) -> Task) -> Goal {
    match goal.tasks.iter().find(|t| t.id == task_id) {
        Some(task) => goal.update_task(&f(task)),
        None => goal.clone(),
    }
}
