//! Friend Graph
//!
//! Friend-request lifecycle per user pair: none -> requested -> friends.
//! Transitions are applied to both records and written back together, so a
//! completed friendship is never one-sided.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainResult, User};
use crate::repository::Repository;

/// Relationship of one user towards another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipState {
    None,
    RequestSent,
    RequestReceived,
    Friends,
}

pub fn friendship_state(user: &User, other_id: &str) -> FriendshipState {
    if user.is_friend(other_id) {
        FriendshipState::Friends
    } else if contains(&user.friend_requests.sent, other_id) {
        FriendshipState::RequestSent
    } else if contains(&user.friend_requests.received, other_id) {
        FriendshipState::RequestReceived
    } else {
        FriendshipState::None
    }
}

/// Users listed in `user.friends`, in collection order
pub fn get_friends<'a>(user: &User, all_users: &'a [User]) -> Vec<&'a User> {
    all_users.iter().filter(|u| user.is_friend(&u.id)).collect()
}

/// Users with a pending request to `user`
pub fn get_friend_requests<'a>(user: &User, all_users: &'a [User]) -> Vec<&'a User> {
    all_users
        .iter()
        .filter(|u| contains(&user.friend_requests.received, &u.id))
        .collect()
}

/// Users `user` has a pending request to
pub fn get_sent_requests<'a>(user: &User, all_users: &'a [User]) -> Vec<&'a User> {
    all_users
        .iter()
        .filter(|u| contains(&user.friend_requests.sent, &u.id))
        .collect()
}

/// Record a pending request on both sides (idempotent)
pub fn record_request(sender: &mut User, target: &mut User) {
    push_unique(&mut sender.friend_requests.sent, &target.id);
    push_unique(&mut target.friend_requests.received, &sender.id);
}

/// Turn a pending request into a mutual friendship
///
/// Returns false, leaving both users untouched, when no request is pending.
pub fn record_accept(receiver: &mut User, requester: &mut User) -> bool {
    if !contains(&receiver.friend_requests.received, &requester.id) {
        return false;
    }

    receiver.friend_requests.received.retain(|id| *id != requester.id);
    push_unique(&mut receiver.friends, &requester.id);

    requester.friend_requests.sent.retain(|id| *id != receiver.id);
    push_unique(&mut requester.friends, &receiver.id);
    true
}

/// Drop a pending request from both queues without befriending
pub fn record_decline(receiver: &mut User, requester: &mut User) -> bool {
    if !contains(&receiver.friend_requests.received, &requester.id) {
        return false;
    }

    receiver.friend_requests.received.retain(|id| *id != requester.id);
    requester.friend_requests.sent.retain(|id| *id != receiver.id);
    true
}

/// Friend-request protocol over a user repository
///
/// Every transition re-reads both records and writes both back.
pub struct FriendGraph<'a, R: Repository<User> + ?Sized> {
    users: &'a R,
}

impl<'a, R: Repository<User> + ?Sized> FriendGraph<'a, R> {
    pub fn new(users: &'a R) -> Self {
        Self { users }
    }

    /// Returns false when the target is unknown, is the sender, or blocks requests
    pub async fn send_friend_request(&self, sender_id: &str, target_id: &str) -> DomainResult<bool> {
        if sender_id == target_id {
            return Ok(false);
        }
        let Some((mut sender, mut target)) = self.load_pair(sender_id, target_id).await? else {
            return Ok(false);
        };
        if !target.privacy.allow_friend_requests {
            log::debug!("Friend request {} -> {} blocked by privacy", sender_id, target_id);
            return Ok(false);
        }

        record_request(&mut sender, &mut target);
        self.users.upsert_many(&[sender, target]).await?;
        log::info!("Friend request sent {} -> {}", sender_id, target_id);
        Ok(true)
    }

    /// Returns false, mutating nothing, when no request from `requester_id` is pending
    pub async fn accept_friend_request(&self, receiver_id: &str, requester_id: &str) -> DomainResult<bool> {
        let Some((mut receiver, mut requester)) = self.load_pair(receiver_id, requester_id).await? else {
            return Ok(false);
        };
        if !record_accept(&mut receiver, &mut requester) {
            return Ok(false);
        }

        self.users.upsert_many(&[receiver, requester]).await?;
        log::info!("Friend request accepted {} <- {}", receiver_id, requester_id);
        Ok(true)
    }

    pub async fn decline_friend_request(&self, receiver_id: &str, requester_id: &str) -> DomainResult<bool> {
        let Some((mut receiver, mut requester)) = self.load_pair(receiver_id, requester_id).await? else {
            return Ok(false);
        };
        if !record_decline(&mut receiver, &mut requester) {
            return Ok(false);
        }

        self.users.upsert_many(&[receiver, requester]).await?;
        log::info!("Friend request declined {} <- {}", receiver_id, requester_id);
        Ok(true)
    }

    pub async fn get_friends(&self, user: &User) -> DomainResult<Vec<User>> {
        let all = self.users.list().await?;
        Ok(get_friends(user, &all).into_iter().cloned().collect())
    }

    pub async fn get_friend_requests(&self, user: &User) -> DomainResult<Vec<User>> {
        let all = self.users.list().await?;
        Ok(get_friend_requests(user, &all).into_iter().cloned().collect())
    }

    pub async fn get_sent_requests(&self, user: &User) -> DomainResult<Vec<User>> {
        let all = self.users.list().await?;
        Ok(get_sent_requests(user, &all).into_iter().cloned().collect())
    }

    async fn load_pair(&self, a: &str, b: &str) -> DomainResult<Option<(User, User)>> {
        let first = self.users.find_by_id(&a.to_string()).await?;
        let second = self.users.find_by_id(&b.to_string()).await?;
        Ok(first.zip(second))
    }
}

fn contains(ids: &[String], id: &str) -> bool {
    ids.iter().any(|x| x == id)
}

fn push_unique(ids: &mut Vec<String>, id: &str) {
    if !contains(ids, id) {
        ids.push(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{KvUserRepository, MemoryKvStore};
    use std::sync::Arc;

    fn user(id: &str) -> User {
        let mut user = User::new(id, &format!("{}@example.com", id));
        user.id = id.to_string();
        user
    }

    async fn repo_with(users: Vec<User>) -> KvUserRepository<MemoryKvStore> {
        let repo = KvUserRepository::new(Arc::new(MemoryKvStore::new()));
        repo.upsert_many(&users).await.unwrap();
        repo
    }

    async fn fetch(repo: &KvUserRepository<MemoryKvStore>, id: &str) -> User {
        repo.find_by_id(&id.to_string()).await.unwrap().unwrap()
    }

    #[test]
    fn test_record_transitions() {
        let mut alice = user("alice");
        let mut bob = user("bob");

        record_request(&mut alice, &mut bob);
        assert_eq!(friendship_state(&alice, "bob"), FriendshipState::RequestSent);
        assert_eq!(friendship_state(&bob, "alice"), FriendshipState::RequestReceived);

        // Sender cannot accept its own request
        assert!(!record_accept(&mut alice, &mut bob));

        assert!(record_accept(&mut bob, &mut alice));
        assert_eq!(friendship_state(&alice, "bob"), FriendshipState::Friends);
        assert_eq!(friendship_state(&bob, "alice"), FriendshipState::Friends);
    }

    #[tokio::test]
    async fn test_send_then_accept_is_symmetric() {
        let repo = repo_with(vec![user("alice"), user("bob")]).await;
        let graph = FriendGraph::new(&repo);

        assert!(graph.send_friend_request("alice", "bob").await.unwrap());
        assert!(graph.accept_friend_request("bob", "alice").await.unwrap());

        let alice = fetch(&repo, "alice").await;
        let bob = fetch(&repo, "bob").await;
        assert_eq!(alice.friends, vec!["bob".to_string()]);
        assert_eq!(bob.friends, vec!["alice".to_string()]);
        assert!(alice.friend_requests.sent.is_empty());
        assert!(alice.friend_requests.received.is_empty());
        assert!(bob.friend_requests.sent.is_empty());
        assert!(bob.friend_requests.received.is_empty());
    }

    #[tokio::test]
    async fn test_send_twice_does_not_duplicate() {
        let repo = repo_with(vec![user("alice"), user("bob")]).await;
        let graph = FriendGraph::new(&repo);

        assert!(graph.send_friend_request("alice", "bob").await.unwrap());
        assert!(graph.send_friend_request("alice", "bob").await.unwrap());

        assert_eq!(fetch(&repo, "alice").await.friend_requests.sent, vec!["bob".to_string()]);
        assert_eq!(fetch(&repo, "bob").await.friend_requests.received, vec!["alice".to_string()]);
    }

    #[tokio::test]
    async fn test_send_rejected_by_privacy_or_missing_target() {
        let mut closed = user("closed");
        closed.privacy.allow_friend_requests = false;
        let repo = repo_with(vec![user("alice"), closed]).await;
        let graph = FriendGraph::new(&repo);

        assert!(!graph.send_friend_request("alice", "closed").await.unwrap());
        assert!(!graph.send_friend_request("alice", "ghost").await.unwrap());
        assert!(!graph.send_friend_request("alice", "alice").await.unwrap());
        assert!(fetch(&repo, "alice").await.friend_requests.sent.is_empty());
        assert!(fetch(&repo, "closed").await.friend_requests.received.is_empty());
    }

    #[tokio::test]
    async fn test_accept_without_request_mutates_nothing() {
        let repo = repo_with(vec![user("alice"), user("bob")]).await;
        let before = repo.list().await.unwrap();
        let graph = FriendGraph::new(&repo);

        assert!(!graph.accept_friend_request("bob", "alice").await.unwrap());
        assert_eq!(repo.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_decline_clears_both_queues() {
        let repo = repo_with(vec![user("alice"), user("bob")]).await;
        let graph = FriendGraph::new(&repo);

        graph.send_friend_request("alice", "bob").await.unwrap();
        assert!(graph.decline_friend_request("bob", "alice").await.unwrap());
        assert!(!graph.decline_friend_request("bob", "alice").await.unwrap());

        let alice = fetch(&repo, "alice").await;
        let bob = fetch(&repo, "bob").await;
        assert!(alice.friends.is_empty() && bob.friends.is_empty());
        assert!(alice.friend_requests.sent.is_empty());
        assert!(bob.friend_requests.received.is_empty());
    }

    #[tokio::test]
    async fn test_projections() {
        let repo = repo_with(vec![user("alice"), user("bob"), user("carol")]).await;
        let graph = FriendGraph::new(&repo);
        graph.send_friend_request("bob", "alice").await.unwrap();
        graph.send_friend_request("carol", "alice").await.unwrap();
        graph.accept_friend_request("alice", "carol").await.unwrap();

        let alice = fetch(&repo, "alice").await;
        let friends: Vec<String> = graph.get_friends(&alice).await.unwrap().into_iter().map(|u| u.id).collect();
        let requests: Vec<String> = graph.get_friend_requests(&alice).await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(friends, vec!["carol"]);
        assert_eq!(requests, vec!["bob"]);

        let bob = fetch(&repo, "bob").await;
        let sent: Vec<String> = graph.get_sent_requests(&bob).await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(sent, vec!["alice"]);
    }
}
