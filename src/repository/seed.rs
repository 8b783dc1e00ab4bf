//! Demo Users
//!
//! Sample community written on first start so discovery has something to find.

use crate::domain::{DomainResult, User};
use super::traits::{KeyValueStore, Repository};
use super::user_repo::KvUserRepository;

const DEMO_USERS: &str = r#"[
  {
    "id": "1",
    "name": "Emma Thompson",
    "email": "emma@example.com",
    "location": { "city": "San Francisco", "country": "USA", "coordinates": { "lat": 37.7749, "lng": -122.4194 } },
    "bio": "Passionate about personal growth and creative pursuits. Always learning something new!",
    "interests": ["React Development", "Photography", "Yoga", "Reading"],
    "goals": [
      {
        "id": "g1", "title": "Master React Development", "expanded": false,
        "priority": "high", "category": "Technology", "isPublic": true,
        "tasks": [
          { "id": "t1", "text": "Complete advanced React course", "completed": false, "subtasks": [], "expanded": false, "order": 0 },
          { "id": "t2", "text": "Build portfolio project", "completed": false, "subtasks": [], "expanded": false, "order": 1 }
        ]
      }
    ],
    "friends": ["2", "3"],
    "friendRequests": { "sent": [], "received": [] },
    "privacy": { "showLocation": true, "showGoals": true, "allowFriendRequests": true },
    "joinedAt": "2024-01-15"
  },
  {
    "id": "2",
    "name": "Marcus Chen",
    "email": "marcus@example.com",
    "location": { "city": "San Francisco", "country": "USA", "coordinates": { "lat": 37.7849, "lng": -122.4094 } },
    "bio": "Full-stack developer and fitness enthusiast. Love connecting with like-minded people!",
    "interests": ["Web Development", "Fitness", "Cooking", "Travel"],
    "goals": [
      {
        "id": "g2", "title": "Learn React Development", "expanded": false,
        "priority": "high", "category": "Technology", "isPublic": true,
        "tasks": [
          { "id": "t3", "text": "Set up development environment", "completed": true, "subtasks": [], "expanded": false, "order": 0 },
          { "id": "t4", "text": "Build first React app", "completed": false, "subtasks": [], "expanded": false, "order": 1 }
        ]
      }
    ],
    "friends": ["1"],
    "friendRequests": { "sent": [], "received": [] },
    "privacy": { "showLocation": true, "showGoals": true, "allowFriendRequests": true },
    "joinedAt": "2024-02-01"
  },
  {
    "id": "3",
    "name": "Sofia Rodriguez",
    "email": "sofia@example.com",
    "location": { "city": "Oakland", "country": "USA", "coordinates": { "lat": 37.8044, "lng": -122.2711 } },
    "bio": "Designer and yoga instructor. Passionate about mindful living and creative expression.",
    "interests": ["Design", "Yoga", "Meditation", "Art"],
    "goals": [
      {
        "id": "g3", "title": "Start Photography Business", "expanded": false,
        "priority": "medium", "category": "Business", "isPublic": true,
        "tasks": [
          { "id": "t5", "text": "Build portfolio website", "completed": false, "subtasks": [], "expanded": false, "order": 0 },
          { "id": "t6", "text": "Get first 5 clients", "completed": false, "subtasks": [], "expanded": false, "order": 1 }
        ]
      }
    ],
    "friends": ["1"],
    "friendRequests": { "sent": [], "received": [] },
    "privacy": { "showLocation": true, "showGoals": true, "allowFriendRequests": true },
    "joinedAt": "2024-01-20"
  }
]"#;

pub fn demo_users() -> DomainResult<Vec<User>> {
    Ok(serde_json::from_str(DEMO_USERS)?)
}

/// Write the demo users if no collection exists yet; returns whether it seeded
pub async fn seed_demo_users<S: KeyValueStore + ?Sized>(repo: &KvUserRepository<S>) -> DomainResult<bool> {
    if repo.is_initialized().await? {
        return Ok(false);
    }
    let users = demo_users()?;
    repo.upsert_many(&users).await?;
    log::info!("Seeded {} demo users", users.len());
    Ok(true)
}
