//! Sign-in, registration, guest mode and profile edits.

use super::session_store::SessionStore;
use crate::domain::{DomainError, DomainResult, ProfileUpdate, Registration, Session, User};
use crate::repository::{save_json, KeyValueStore, Repository, CURRENT_USER_KEY, GUEST_GOALS_KEY, GUEST_MODE_KEY};

impl<S: KeyValueStore + ?Sized> SessionStore<S> {
    /// Sign in by email. Returns `None` when no account matches.
    ///
    /// Passwords are not checked. Any guest goals are discarded.
    pub async fn login(&mut self, email: &str, _password: &str) -> DomainResult<Option<User>> {
        let Some(user) = self.users.find_by_email(email).await? else {
            log::info!("Login failed: no account for {}", email.trim());
            return Ok(None);
        };

        self.sign_in(user.clone()).await?;
        log::info!("User {} signed in", user.id);
        Ok(Some(user))
    }

    /// Create an account and sign it in
    pub async fn register(&mut self, form: Registration) -> DomainResult<User> {
        if self.users.find_by_email(&form.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "An account already exists for {}",
                form.email.trim()
            )));
        }

        let user = form.into_user()?;
        self.users.upsert(&user).await?;
        self.sign_in(user.clone()).await?;
        log::info!("User {} registered", user.id);
        Ok(user)
    }

    /// Start a guest session; ignored while signed in
    pub async fn continue_as_guest(&mut self) -> DomainResult<()> {
        match self.session {
            Session::Authenticated(_) => {
                log::warn!("Guest mode requested while signed in, ignoring");
                return Ok(());
            }
            Session::Guest { .. } => return Ok(()),
            Session::Anonymous => {}
        }

        self.store.set(GUEST_MODE_KEY, "true").await?;
        self.session = Session::Guest { goals: Vec::new() };
        log::info!("Guest session started");
        Ok(())
    }

    /// End the session and forget guest data
    pub async fn logout(&mut self) -> DomainResult<()> {
        self.session = Session::Anonymous;
        self.store.remove(CURRENT_USER_KEY).await?;
        self.store.remove(GUEST_MODE_KEY).await?;
        self.store.remove(GUEST_GOALS_KEY).await?;
        log::info!("Signed out");
        Ok(())
    }

    /// Apply a profile edit to the signed-in user
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> DomainResult<Option<User>> {
        self.modify_current_user(|user| update.apply(user)).await
    }

    async fn sign_in(&mut self, user: User) -> DomainResult<()> {
        save_json(&*self.store, CURRENT_USER_KEY, &user).await?;
        self.clear_guest_data().await?;
        self.session = Session::Authenticated(user);
        Ok(())
    }
}
