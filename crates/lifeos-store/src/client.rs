use crate::{DataStore, Query, RestStore, Result, StoreConfig};
use lifeos_core::{
    mapper,
    schema::{PATTERN_MAPPING, SKILL_MAPPING, TASK_MAPPING, USAGE_MAPPING},
    Decoded, MetricsSummary, PatternRecord, Row, Skill, SkillPattern, SkillRecord, SkillUsage, TaskDoc,
    TaskFilter, TaskRecord, UsageRecord,
};
use std::sync::Arc;

pub const DEFAULT_TASK_LIMIT: usize = 50;

/// Typed access to tasks, skills, patterns and usage stored in the generic tables.
///
/// Every call is one sequential round trip (two for metrics). Store failures
/// propagate unchanged; rows that fail to decode are logged and dropped.
#[derive(Clone)]
pub struct LifeOsClient {
    store: Arc<dyn DataStore>,
}

impl LifeOsClient {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(RestStore::new(config)?)))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(&StoreConfig::from_env()?)
    }

    // ========================================================================
    // Task documentation
    // ========================================================================

    pub async fn save_task(&self, task: &TaskDoc) -> Result<Vec<Row>> {
        tracing::info!("Saving task: {} ({})", task.title, task.task_id);

        let row = mapper::encode_task(task)?;
        self.store.insert(TASK_MAPPING.table, &row).await
    }

    /// Newest tasks whose `analyzed` flag is unset, from at most `limit` task rows.
    pub async fn get_unanalyzed_tasks(&self, limit: usize) -> Result<Vec<TaskRecord>> {
        self.get_tasks_filtered(limit, TaskFilter::Unanalyzed).await
    }

    /// Newest tasks, analyzed or not.
    pub async fn get_tasks(&self, limit: usize) -> Result<Vec<TaskRecord>> {
        self.get_tasks_filtered(limit, TaskFilter::All).await
    }

    async fn get_tasks_filtered(&self, limit: usize, filter: TaskFilter) -> Result<Vec<TaskRecord>> {
        let query = Query::for_entity(&TASK_MAPPING).limit(limit);
        let rows = self.store.select(TASK_MAPPING.table, &query).await?;

        Ok(keep_readable(mapper::decode_tasks(&rows, filter), "task"))
    }

    /// Every task row, analyzed or not.
    pub async fn count_tasks(&self) -> Result<usize> {
        let query = Query::new()
            .eq(TASK_MAPPING.discriminator_column, TASK_MAPPING.discriminator)
            .select("id");
        let rows = self.store.select(TASK_MAPPING.table, &query).await?;

        Ok(rows.len())
    }

    // ========================================================================
    // Skills
    // ========================================================================

    pub async fn save_skill(&self, skill: &Skill) -> Result<Vec<Row>> {
        tracing::info!("Saving skill: {} ({})", skill.name, skill.skill_id);

        let row = mapper::encode_skill(skill)?;
        self.store.insert(SKILL_MAPPING.table, &row).await
    }

    /// All active skills, newest first.
    pub async fn get_all_skills(&self) -> Result<Vec<SkillRecord>> {
        let query = Query::for_entity(&SKILL_MAPPING);
        let rows = self.store.select(SKILL_MAPPING.table, &query).await?;

        Ok(keep_readable(mapper::decode_skills(&rows), "skill"))
    }

    // ========================================================================
    // Patterns
    // ========================================================================

    pub async fn save_pattern(&self, pattern: &SkillPattern) -> Result<Vec<Row>> {
        tracing::info!("Saving pattern: {} ({})", pattern.name, pattern.pattern_id);

        let row = mapper::encode_pattern(pattern)?;
        self.store.insert(PATTERN_MAPPING.table, &row).await
    }

    pub async fn get_patterns(&self) -> Result<Vec<PatternRecord>> {
        let query = Query::for_entity(&PATTERN_MAPPING);
        let rows = self.store.select(PATTERN_MAPPING.table, &query).await?;

        Ok(keep_readable(mapper::decode_patterns(&rows), "pattern"))
    }

    // ========================================================================
    // Usage tracking
    // ========================================================================

    pub async fn record_usage(&self, usage: &SkillUsage) -> Result<Vec<Row>> {
        tracing::info!(
            "Recording usage of skill {} (success: {}, saved {} min)",
            usage.skill_id,
            usage.success,
            usage.time_saved_minutes
        );

        let row = mapper::encode_usage(usage)?;
        self.store.insert(USAGE_MAPPING.table, &row).await
    }

    /// Newest usage entries among at most `limit` usage rows, optionally
    /// narrowed to one skill. The skill id lives in the payload, so the
    /// narrowing happens after the read.
    pub async fn get_usage(&self, skill_id: Option<&str>, limit: usize) -> Result<Vec<UsageRecord>> {
        let query = Query::for_entity(&USAGE_MAPPING).limit(limit);
        let rows = self.store.select(USAGE_MAPPING.table, &query).await?;

        let mut usages = keep_readable(mapper::decode_usages(&rows), "usage");
        if let Some(skill_id) = skill_id {
            usages.retain(|u| u.skill_id == skill_id);
        }
        Ok(usages)
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    pub async fn compute_metrics(&self) -> Result<MetricsSummary> {
        let skills = self.get_all_skills().await?;
        let tasks_documented = self.count_tasks().await?;

        let summary = MetricsSummary::compute(&skills, tasks_documented);
        tracing::debug!(
            "Metrics: {} skills, {} tasks, {:.2}h saved",
            summary.total_skills,
            summary.tasks_documented,
            summary.total_time_saved_hours
        );

        Ok(summary)
    }
}

fn keep_readable<T>(decoded: Decoded<T>, entity: &str) -> Vec<T> {
    if !decoded.is_clean() {
        tracing::warn!(
            "Dropped {} unreadable {} rows out of {}",
            decoded.skipped.len(),
            entity,
            decoded.skipped.len() + decoded.records.len()
        );
    }
    decoded.into_records_logged(entity)
}
