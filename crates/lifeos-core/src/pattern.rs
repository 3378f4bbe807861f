use crate::{lenient, Domain};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring pattern detected across analyzed tasks; the raw material for skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillPattern {
    pub pattern_id: String,
    pub name: String,
    pub description: String,
    pub domain: Domain,
    pub source_tasks: Vec<String>,
    #[serde(default)]
    pub occurrences: u64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl SkillPattern {
    pub fn new(name: String, domain: Domain, source_tasks: Vec<String>) -> Self {
        let occurrences = source_tasks.len() as u64;
        Self {
            pattern_id: Uuid::new_v4().to_string(),
            name,
            description: String::new(),
            domain,
            source_tasks,
            occurrences,
            confidence: 0.0,
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternRecord {
    #[serde(deserialize_with = "lenient::or_default")]
    pub pattern_id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub domain: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub source_tasks: Vec<String>,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub occurrences: u64,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub confidence: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub created_at: Option<String>,
}
