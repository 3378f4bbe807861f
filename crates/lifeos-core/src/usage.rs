use crate::{lenient, Domain};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One application of a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillUsage {
    pub usage_id: String,
    pub skill_id: String,
    pub domain: Domain,
    pub success: bool,
    pub time_saved_minutes: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub used_at: DateTime<Utc>,
}

impl SkillUsage {
    pub fn new(skill_id: String, domain: Domain, success: bool, time_saved_minutes: f64) -> Self {
        Self {
            usage_id: Uuid::new_v4().to_string(),
            skill_id,
            domain,
            success,
            time_saved_minutes,
            notes: None,
            used_at: Utc::now(),
        }
    }

    pub fn with_notes(mut self, notes: String) -> Self {
        self.notes = Some(notes);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageRecord {
    #[serde(deserialize_with = "lenient::or_default")]
    pub usage_id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub skill_id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub domain: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub success: bool,
    #[serde(deserialize_with = "lenient::number_or_default")]
    pub time_saved_minutes: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub notes: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub used_at: Option<DateTime<Utc>>,
}
