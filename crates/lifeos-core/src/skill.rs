use crate::{lenient, Domain};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated, reusable capability distilled from analyzed tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id: String,
    pub name: String,
    pub category: String,
    pub domain: Domain,
    pub version: String,
    pub description: String,
    /// Operational instructions of the skill.
    pub content: String,
    pub pattern_sources: Vec<String>,
    #[serde(default)]
    pub total_uses: u64,
    /// In [0, 1].
    #[serde(default)]
    pub success_rate: f64,
    /// Minutes saved per use.
    #[serde(default)]
    pub avg_time_saved: f64,
    /// In [0, 1].
    #[serde(default)]
    pub adhd_effectiveness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Skill {
    pub fn new(name: String, domain: Domain) -> Self {
        Self {
            skill_id: Uuid::new_v4().to_string(),
            name,
            category: String::new(),
            domain,
            version: "1.0.0".to_string(),
            description: String::new(),
            content: String::new(),
            pattern_sources: Vec::new(),
            total_uses: 0,
            success_rate: 0.0,
            avg_time_saved: 0.0,
            adhd_effectiveness: 0.0,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_category(mut self, category: String) -> Self {
        self.category = category;
        self
    }

    pub fn with_version(mut self, version: String) -> Self {
        self.version = version;
        self
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    pub fn with_content(mut self, content: String) -> Self {
        self.content = content;
        self
    }

    pub fn with_pattern_sources(mut self, sources: Vec<String>) -> Self {
        self.pattern_sources = sources;
        self
    }

    pub fn with_usage(mut self, total_uses: u64, success_rate: f64, avg_time_saved: f64) -> Self {
        self.total_uses = total_uses;
        self.success_rate = success_rate;
        self.avg_time_saved = avg_time_saved;
        self
    }

    pub fn with_adhd_effectiveness(mut self, effectiveness: f64) -> Self {
        self.adhd_effectiveness = effectiveness;
        self
    }
}

/// A skill as read back from the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillRecord {
    #[serde(deserialize_with = "lenient::or_default")]
    pub skill_id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub category: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub domain: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub version: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub content: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub pattern_sources: Vec<String>,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub total_uses: u64,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub success_rate: f64,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub avg_time_saved: f64,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub adhd_effectiveness: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub updated_at: Option<String>,
}

impl SkillRecord {
    /// Minutes saved across every recorded use.
    pub fn total_minutes_saved(&self) -> f64 {
        self.avg_time_saved * self.total_uses as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_defaults() {
        let skill = Skill::new("Body doubling".to_string(), Domain::Ariel);

        assert_eq!(skill.total_uses, 0);
        assert_eq!(skill.success_rate, 0.0);
        assert_eq!(skill.avg_time_saved, 0.0);
        assert_eq!(skill.adhd_effectiveness, 0.0);
        assert_eq!(skill.version, "1.0.0");
    }

    #[test]
    fn test_total_minutes_saved() {
        let record = SkillRecord {
            total_uses: 4,
            avg_time_saved: 2.5,
            ..Default::default()
        };
        assert_eq!(record.total_minutes_saved(), 10.0);
    }
}
