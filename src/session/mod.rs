//! Session Layer
//!
//! The surface the UI calls into. `SessionStore` resolves who is using the
//! app and delegates persistence; its operations are split by concern:
//! - session_store: opening, refresh and write-back helpers
//! - session_auth: login, registration, guest mode, profile
//! - session_goals: goal list management
//! - session_social: discovery and friend requests
//! - session_theme: theme selection

mod session_auth;
mod session_goals;
mod session_social;
mod session_store;
mod session_theme;


pub use session_store::SessionStore;
