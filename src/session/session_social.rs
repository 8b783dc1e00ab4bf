//! Discovery and friend requests on behalf of the signed-in user.
//!
//! Every call works on a fresh copy of the user; a signed-out or guest
//! session gets empty results.

use super::session_store::SessionStore;
use crate::domain::{DomainResult, User};
use crate::repository::{KeyValueStore, Repository};
use crate::social::{find_nearby_users, find_users_with_similar_goals, suggest_friends, FriendGraph, FriendSuggestion};

impl<S: KeyValueStore + ?Sized> SessionStore<S> {
    pub async fn nearby_users(&mut self) -> DomainResult<Vec<User>> {
        let Some(current) = self.social_user().await? else {
            return Ok(Vec::new());
        };
        let all = self.users.list().await?;
        Ok(find_nearby_users(&current, &all, self.nearby_radius_km)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn similar_goal_users(&mut self) -> DomainResult<Vec<User>> {
        let Some(current) = self.social_user().await? else {
            return Ok(Vec::new());
        };
        let all = self.users.list().await?;
        Ok(find_users_with_similar_goals(&current, &all).into_iter().cloned().collect())
    }

    pub async fn friend_suggestions(&mut self) -> DomainResult<Vec<FriendSuggestion>> {
        let Some(current) = self.social_user().await? else {
            return Ok(Vec::new());
        };
        let all = self.users.list().await?;
        Ok(suggest_friends(&current, &all, self.nearby_radius_km))
    }

    pub async fn send_friend_request(&mut self, target_id: &str) -> DomainResult<bool> {
        let Some(current) = self.social_user().await? else {
            return Ok(false);
        };
        let sent = FriendGraph::new(&self.users)
            .send_friend_request(&current.id, target_id)
            .await?;
        self.refresh_current_user().await?;
        Ok(sent)
    }

    pub async fn accept_friend_request(&mut self, requester_id: &str) -> DomainResult<bool> {
        let Some(current) = self.social_user().await? else {
            return Ok(false);
        };
        let accepted = FriendGraph::new(&self.users)
            .accept_friend_request(&current.id, requester_id)
            .await?;
        self.refresh_current_user().await?;
        Ok(accepted)
    }

    pub async fn decline_friend_request(&mut self, requester_id: &str) -> DomainResult<bool> {
        let Some(current) = self.social_user().await? else {
            return Ok(false);
        };
        let declined = FriendGraph::new(&self.users)
            .decline_friend_request(&current.id, requester_id)
            .await?;
        self.refresh_current_user().await?;
        Ok(declined)
    }

    pub async fn friends(&mut self) -> DomainResult<Vec<User>> {
        match self.social_user().await? {
            Some(current) => FriendGraph::new(&self.users).get_friends(&current).await,
            None => Ok(Vec::new()),
        }
    }

    /// Users waiting for the signed-in user to answer
    pub async fn friend_requests(&mut self) -> DomainResult<Vec<User>> {
        match self.social_user().await? {
            Some(current) => FriendGraph::new(&self.users).get_friend_requests(&current).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn sent_requests(&mut self) -> DomainResult<Vec<User>> {
        match self.social_user().await? {
            Some(current) => FriendGraph::new(&self.users).get_sent_requests(&current).await,
            None => Ok(Vec::new()),
        }
    }

    async fn social_user(&mut self) -> DomainResult<Option<User>> {
        if !self.session.can_use_social() {
            return Ok(None);
        }
        self.refresh_current_user().await
    }
}
