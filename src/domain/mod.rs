//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies (serde for serialization only).

mod entity;
mod goal;
mod session;
mod theme;
mod user;

pub use entity::{DomainError, DomainResult, Entity};
pub use goal::{Goal, GoalDraft, Priority, Subtask, Task};
pub use session::Session;
pub use theme::{ColorTheme, ThemeApplier, ThemeColors, ThemeName};
pub use user::{Coordinates, FriendRequests, Location, Privacy, ProfileUpdate, Registration, User};

/// Fresh random identifier for goals, tasks, subtasks and users
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
