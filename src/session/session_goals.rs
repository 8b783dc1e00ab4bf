//! Goal list management for the active session.

use super::session_store::SessionStore;
use crate::domain::{DomainResult, Goal, GoalDraft, Session};
use crate::repository::{save_json, KeyValueStore, GUEST_GOALS_KEY};

impl<S: KeyValueStore + ?Sized> SessionStore<S> {
    /// Goals of the active session (empty when signed out)
    pub fn goals(&self) -> &[Goal] {
        self.session.goals()
    }

    /// Build a goal from `draft` and add it to the top of the list
    pub async fn create_goal(&mut self, draft: GoalDraft) -> DomainResult<Goal> {
        let goal = draft.into_goal()?;
        self.add_goal(goal.clone()).await?;
        Ok(goal)
    }

    /// Newest goals come first
    pub async fn add_goal(&mut self, goal: Goal) -> DomainResult<()> {
        let mut goals = self.goals().to_vec();
        goals.insert(0, goal);
        self.set_goals(goals).await
    }

    /// Replace the goal with the same id; unknown ids are ignored
    pub async fn update_goal(&mut self, goal: Goal) -> DomainResult<()> {
        if !self.goals().iter().any(|g| g.id == goal.id) {
            return Ok(());
        }
        let goals = self
            .goals()
            .iter()
            .map(|g| if g.id == goal.id { goal.clone() } else { g.clone() })
            .collect();
        self.set_goals(goals).await
    }

    /// Apply a goal tree operation to one goal
    ///
    /// ```ignore
    /// store.update_goal_with(&goal_id, |g| g.add_task("Stretch")).await?;
    /// ```
    pub async fn update_goal_with<F>(&mut self, goal_id: &str, f: F) -> DomainResult<Option<Goal>>
    where
        F: FnOnce(&Goal) -> Goal,
    {
        let Some(current) = self.goals().iter().find(|g| g.id == goal_id) else {
            return Ok(None);
        };
        let updated = f(current);
        self.update_goal(updated.clone()).await?;
        Ok(Some(updated))
    }

    pub async fn delete_goal(&mut self, goal_id: &str) -> DomainResult<()> {
        if !self.goals().iter().any(|g| g.id == goal_id) {
            return Ok(());
        }
        let goals = self.goals().iter().filter(|g| g.id != goal_id).cloned().collect();
        self.set_goals(goals).await
    }

    /// Write the list to wherever the session keeps it
    async fn set_goals(&mut self, goals: Vec<Goal>) -> DomainResult<()> {
        if self.session.user().is_some() {
            self.modify_current_user(move |user| user.goals = goals).await?;
            return Ok(());
        }

        match &mut self.session {
            Session::Guest { goals: current } => {
                *current = goals;
                save_json(&*self.store, GUEST_GOALS_KEY, current.as_slice()).await
            }
            _ => {
                log::warn!("Goal change without a session, ignoring");
                Ok(())
            }
        }
    }
}
