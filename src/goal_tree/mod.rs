//! Goal Tree Operations
//!
//! Pure goal → task → subtask mutations split by concern:
//! - goal_tasks: task add/update/delete/toggle, progress
//! - goal_subtasks: subtask operations scoped to one task
//! - goal_positioning: task ordering (normalize, move, next task)
//!
//! Every operation takes the current goal and returns a new one.

mod goal_positioning;
mod goal_subtasks;
mod goal_tasks;

pub use goal_positioning::{normalize_order, GoalPositioningOperations, MoveDirection};
pub use goal_subtasks::{GoalSubtaskOperations, TaskSubtaskOperations};
pub use goal_tasks::GoalTaskOperations;
