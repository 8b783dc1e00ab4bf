//! Social Layer
//!
//! Discovery heuristics and the friend-request protocol.

mod friend_graph;
mod geo;
mod matching;

pub use friend_graph::{
    friendship_state, get_friend_requests, get_friends, get_sent_requests, record_accept, record_decline,
    record_request, FriendGraph, FriendshipState,
};
pub use geo::{distance_between, distance_km, EARTH_RADIUS_KM};
pub use matching::{
    find_nearby_users, find_users_with_similar_goals, suggest_friends, FriendSuggestion, DEFAULT_NEARBY_RADIUS_KM,
};
