use crate::{SkillRecord, DEFAULT_DOMAIN_BUCKET};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_skills: usize,
    pub total_uses: u64,
    pub total_time_saved_hours: f64,
    /// 0 when there are no skills.
    pub avg_success_rate: f64,
    /// 0 when there are no skills.
    pub avg_adhd_effectiveness: f64,
    pub tasks_documented: usize,
    pub skills_by_domain: BTreeMap<String, usize>,
}

impl MetricsSummary {
    /// Aggregate decoded skills. `tasks_documented` is the raw task row count,
    /// analyzed or not.
    pub fn compute(skills: &[SkillRecord], tasks_documented: usize) -> Self {
        let total_uses: u64 = skills.iter().map(|s| s.total_uses).sum();
        let total_minutes: f64 = skills.iter().map(SkillRecord::total_minutes_saved).sum();

        let mut skills_by_domain = BTreeMap::new();
        for skill in skills {
            let domain = skill.domain.as_deref().unwrap_or(DEFAULT_DOMAIN_BUCKET);
            *skills_by_domain.entry(domain.to_string()).or_insert(0) += 1;
        }

        Self {
            total_skills: skills.len(),
            total_uses,
            total_time_saved_hours: total_minutes / 60.0,
            avg_success_rate: mean(skills.iter().map(|s| s.success_rate), skills.len()),
            avg_adhd_effectiveness: mean(skills.iter().map(|s| s.adhd_effectiveness), skills.len()),
            tasks_documented,
            skills_by_domain,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}
