//! Matching Engine
//!
//! Nearby-user and similar-goal discovery over the full user collection.
//! Results keep the order of the input collection.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::User;

use super::geo::distance_between;

/// Default radius for nearby discovery
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 50.0;

/// Candidate friend with the signals that surfaced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendSuggestion {
    pub user: User,
    pub common_goals: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub mutual_friends: usize,
}

/// Users within `max_distance_km` who share their location
pub fn find_nearby_users<'a>(current: &User, all_users: &'a [User], max_distance_km: f64) -> Vec<&'a User> {
    let Some(origin) = current.coordinates() else {
        return Vec::new();
    };

    all_users
        .iter()
        .filter(|user| user.id != current.id && user.privacy.show_location)
        .filter(|user| {
            user.coordinates()
                .is_some_and(|c| distance_between(origin, c) <= max_distance_km)
        })
        .collect()
}

/// Users sharing goals with at least one public goal title overlapping the current user's
pub fn find_users_with_similar_goals<'a>(current: &User, all_users: &'a [User]) -> Vec<&'a User> {
    let own_titles = public_titles(current);
    if own_titles.is_empty() {
        return Vec::new();
    }

    all_users
        .iter()
        .filter(|user| user.id != current.id && user.privacy.show_goals)
        .filter(|user| common_goal_count(&own_titles, user) > 0)
        .collect()
}

/// Nearby and similar-goal users not yet connected, strongest signals first
pub fn suggest_friends(current: &User, all_users: &[User], max_distance_km: f64) -> Vec<FriendSuggestion> {
    let nearby = find_nearby_users(current, all_users, max_distance_km);
    let similar = find_users_with_similar_goals(current, all_users);
    let own_titles = public_titles(current);

    let mut suggestions: Vec<FriendSuggestion> = all_users
        .iter()
        .filter(|user| {
            nearby.iter().any(|u| u.id == user.id) || similar.iter().any(|u| u.id == user.id)
        })
        .filter(|user| !is_connected(current, user))
        .map(|user| FriendSuggestion {
            user: user.clone(),
            common_goals: if user.privacy.show_goals {
                common_goal_count(&own_titles, user)
            } else {
                0
            },
            distance: match (current.coordinates(), user.coordinates()) {
                (Some(a), Some(b)) if user.privacy.show_location => Some(distance_between(a, b)),
                _ => None,
            },
            mutual_friends: user.friends.iter().filter(|id| current.is_friend(id)).count(),
        })
        .collect();

    // Stable sort keeps input order for ties
    suggestions.sort_by(|a, b| {
        b.common_goals
            .cmp(&a.common_goals)
            .then(b.mutual_friends.cmp(&a.mutual_friends))
            .then(compare_distance(a.distance, b.distance))
    });
    suggestions
}

fn public_titles(user: &User) -> Vec<String> {
    user.public_goals().map(|g| g.title.to_lowercase()).collect()
}

/// Candidate public goals whose title contains, or is contained in, one of `own_titles`
fn common_goal_count(own_titles: &[String], candidate: &User) -> usize {
    candidate
        .public_goals()
        .map(|g| g.title.to_lowercase())
        .filter(|title| {
            own_titles
                .iter()
                .any(|own| title.contains(own.as_str()) || own.contains(title.as_str()))
        })
        .count()
}

fn is_connected(current: &User, other: &User) -> bool {
    current.is_friend(&other.id)
        || current.friend_requests.sent.contains(&other.id)
        || current.friend_requests.received.contains(&other.id)
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
