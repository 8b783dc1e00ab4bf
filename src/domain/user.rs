//! User Entity
//!
//! Root aggregate: profile, goals and the social lists used by the friend protocol.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};
use super::goal::Goal;
use super::new_id;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Pending requests keyed by the other user's id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FriendRequests {
    pub sent: Vec<String>,
    pub received: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Privacy {
    pub show_location: bool,
    pub show_goals: bool,
    pub allow_friend_requests: bool,
}

impl Default for Privacy {
    fn default() -> Self {
        Self {
            show_location: true,
            show_goals: true,
            allow_friend_requests: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub friend_requests: FriendRequests,
    #[serde(default)]
    pub privacy: Privacy,
    pub joined_at: String,
}

impl User {
    /// Create a user with default privacy and empty social lists
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            id: new_id(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            avatar: None,
            location: None,
            bio: None,
            interests: Vec::new(),
            goals: Vec::new(),
            friends: Vec::new(),
            friend_requests: FriendRequests::default(),
            privacy: Privacy::default(),
            joined_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.as_ref().and_then(|l| l.coordinates)
    }

    /// Public goals, in list order
    pub fn public_goals(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter().filter(|g| g.is_public())
    }

    /// First word of the name, used for greetings
    pub fn display_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or(&self.name)
    }

    pub fn is_friend(&self, user_id: &str) -> bool {
        self.friends.iter().any(|id| id == user_id)
    }
}

impl Entity for User {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Sign-up form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Registration {
    /// Check the form and build the new user (email uniqueness is checked by the caller)
    pub fn into_user(self) -> DomainResult<User> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(DomainError::InvalidInput("Name and email are required".into()));
        }
        if self.password != self.confirm_password {
            return Err(DomainError::InvalidInput("Passwords do not match".into()));
        }
        if self.interests.is_empty() {
            return Err(DomainError::InvalidInput("Please select at least one interest".into()));
        }

        let mut user = User::new(&self.name, &self.email);
        let (city, country) = (self.city.trim(), self.country.trim());
        if !city.is_empty() && !country.is_empty() {
            user.location = Some(Location {
                city: city.to_string(),
                country: country.to_string(),
                coordinates: None,
            });
        }
        user.interests = self.interests;
        Ok(user)
    }
}

/// Partial profile update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<Location>,
    pub interests: Option<Vec<String>>,
    pub privacy: Option<Privacy>,
}

impl ProfileUpdate {
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name.filter(|n| !n.trim().is_empty()) {
            user.name = name.trim().to_string();
        }
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
        if let Some(location) = self.location {
            user.location = Some(location);
        }
        if let Some(interests) = self.interests {
            user.interests = interests;
        }
        if let Some(privacy) = self.privacy {
            user.privacy = privacy;
        }
    }
}
