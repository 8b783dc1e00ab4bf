//! Session State
//!
//! Exactly one of: nobody, a local guest, or a signed-in user.

use super::goal::Goal;
use super::user::User;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    /// Local-only usage; goals are stored apart from any user
    Guest { goals: Vec<Goal> },
    Authenticated(User),
}

impl Session {
    /// Goals of the active session (empty when anonymous)
    pub fn goals(&self) -> &[Goal] {
        match self {
            Session::Anonymous => &[],
            Session::Guest { goals } => goals,
            Session::Authenticated(user) => &user.goals,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Session::Guest { .. })
    }

    /// Social features require an account
    pub fn can_use_social(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// Greeting name: the user's first name, or "Guest"
    pub fn display_name(&self) -> &str {
        match self {
            Session::Authenticated(user) => user.display_name(),
            _ => "Guest",
        }
    }
}
