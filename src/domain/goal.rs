//! Goal Entity
//!
//! A goal owns an ordered list of tasks; each task owns its subtasks.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};
use super::new_id;

/// Goal priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Smallest unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl Subtask {
    pub fn new(text: &str) -> Self {
        Self {
            id: new_id(),
            text: text.trim().to_string(),
            completed: false,
        }
    }
}

/// Actionable step within a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub expanded: bool,
    /// Dense rank among sibling tasks (0..N-1)
    pub order: u32,
}

impl Task {
    /// Create an incomplete, collapsed task at `order`
    pub fn new(text: &str, order: u32) -> Self {
        Self {
            id: new_id(),
            text: text.trim().to_string(),
            completed: false,
            subtasks: Vec::new(),
            expanded: false,
            order,
        }
    }
}

impl Entity for Task {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Top-level trackable aspiration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub expanded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl Goal {
    /// Create an empty private goal
    pub fn new(title: &str) -> Self {
        Self {
            id: new_id(),
            title: title.trim().to_string(),
            tasks: Vec::new(),
            expanded: false,
            priority: None,
            category: None,
            is_public: None,
        }
    }

    /// Whether the goal is visible to other users
    pub fn is_public(&self) -> bool {
        self.is_public.unwrap_or(false)
    }
}

impl Entity for Goal {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for creating a goal with its initial tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub title: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl GoalDraft {
    /// Build the goal: blank task lines are skipped, the rest are ranked in order
    pub fn into_goal(self) -> DomainResult<Goal> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidInput("Goal title is required".into()));
        }

        let category = self.category.trim();
        let tasks = self
            .tasks
            .iter()
            .filter(|text| !text.trim().is_empty())
            .enumerate()
            .map(|(index, text)| Task::new(text, index as u32))
            .collect();

        Ok(Goal {
            id: new_id(),
            title: title.to_string(),
            tasks,
            expanded: true,
            priority: Some(self.priority),
            category: (!category.is_empty()).then(|| category.to_string()),
            is_public: Some(self.is_public),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_creation() {
        let goal = Goal::new("  Run a marathon ");
        assert_eq!(goal.title, "Run a marathon");
        assert!(goal.tasks.is_empty());
        assert!(!goal.is_public());
        assert!(!goal.id.is_empty());
    }

    #[test]
    fn test_draft_skips_blank_tasks() {
        let draft = GoalDraft {
            title: " Learn Rust ".to_string(),
            priority: Priority::High,
            category: "   ".to_string(),
            is_public: true,
            tasks: vec!["Read the book".into(), "  ".into(), " Write a CLI ".into()],
        };

        let goal = draft.into_goal().unwrap();
        assert_eq!(goal.title, "Learn Rust");
        assert!(goal.expanded);
        assert_eq!(goal.category, None);
        assert_eq!(goal.priority, Some(Priority::High));
        assert!(goal.is_public());
        assert_eq!(goal.tasks.len(), 2);
        assert_eq!(goal.tasks[1].text, "Write a CLI");
        assert_eq!(goal.tasks[1].order, 1);
    }

    #[test]
    fn test_draft_requires_title() {
        let draft = GoalDraft {
            title: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(draft.into_goal(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_goal_json_shape() {
        let json = r#"{
            "id": "g1",
            "title": "Master React Development",
            "expanded": false,
            "priority": "high",
            "category": "Technology",
            "isPublic": true,
            "tasks": [
                { "id": "t1", "text": "Complete advanced React course", "completed": false, "subtasks": [], "expanded": false, "order": 0 }
            ]
        }"#;

        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.priority, Some(Priority::High));
        assert!(goal.is_public());
        assert_eq!(goal.tasks[0].order, 0);

        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["isPublic"], serde_json::json!(true));
    }
}
