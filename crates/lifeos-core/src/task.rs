use crate::{lenient, Domain};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Routine,
    Goal,
    Habit,
    Intervention,
    Tracking,
    Automation,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Routine => "routine",
            TaskType::Goal => "goal",
            TaskType::Habit => "habit",
            TaskType::Intervention => "intervention",
            TaskType::Tracking => "tracking",
            TaskType::Automation => "automation",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One documented unit of work, as written by the caller.
///
/// Scores are nominally 1-10 but are passed through unchecked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDoc {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    pub category: String,
    pub domain: Domain,
    pub complexity_score: i32,
    pub adhd_relevance: i32,
    pub files_affected: Vec<String>,
    pub implementation: Map<String, Value>,
    pub challenges: Vec<Value>,
    pub outcome: Map<String, Value>,
    pub skill_potential: i32,
    #[serde(default)]
    pub analyzed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl TaskDoc {
    pub fn new(title: String, task_type: TaskType, domain: Domain) -> Self {
        Self {
            task_id: Uuid::new_v4().to_string(),
            title,
            description: String::new(),
            task_type,
            category: String::new(),
            domain,
            complexity_score: 1,
            adhd_relevance: 1,
            files_affected: Vec::new(),
            implementation: Map::new(),
            challenges: Vec::new(),
            outcome: Map::new(),
            skill_potential: 1,
            analyzed: false,
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    pub fn with_category(mut self, category: String) -> Self {
        self.category = category;
        self
    }

    pub fn with_scores(mut self, complexity: i32, adhd_relevance: i32, skill_potential: i32) -> Self {
        self.complexity_score = complexity;
        self.adhd_relevance = adhd_relevance;
        self.skill_potential = skill_potential;
        self
    }

    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files_affected = files;
        self
    }

    pub fn with_implementation(mut self, implementation: Map<String, Value>) -> Self {
        self.implementation = implementation;
        self
    }

    pub fn with_challenges(mut self, challenges: Vec<Value>) -> Self {
        self.challenges = challenges;
        self
    }

    pub fn with_outcome(mut self, outcome: Map<String, Value>) -> Self {
        self.outcome = outcome;
        self
    }
}

/// A task payload as read back from the store.
///
/// Every field falls back to its default when absent, null or of the wrong
/// type, so older or partially written rows still decode. Domain and type stay
/// plain strings for the same reason.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRecord {
    #[serde(deserialize_with = "lenient::or_default")]
    pub task_id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub task_type: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub category: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub domain: Option<String>,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub complexity_score: i32,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub adhd_relevance: i32,
    #[serde(deserialize_with = "lenient::or_default")]
    pub files_affected: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub implementation: Map<String, Value>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub challenges: Vec<Value>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub outcome: Map<String, Value>,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub skill_potential: i32,
    #[serde(deserialize_with = "lenient::or_default")]
    pub analyzed: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub created_at: Option<String>,
}

impl From<&TaskDoc> for TaskRecord {
    fn from(task: &TaskDoc) -> Self {
        Self {
            task_id: task.task_id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            task_type: task.task_type.to_string(),
            category: task.category.clone(),
            domain: Some(task.domain.to_string()),
            complexity_score: task.complexity_score,
            adhd_relevance: task.adhd_relevance,
            files_affected: task.files_affected.clone(),
            implementation: task.implementation.clone(),
            challenges: task.challenges.clone(),
            outcome: task.outcome.clone(),
            skill_potential: task.skill_potential,
            analyzed: task.analyzed,
            created_at: task.created_at.clone(),
        }
    }
}
