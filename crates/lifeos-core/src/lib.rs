pub mod domain;
pub mod lenient;
pub mod task;
pub mod skill;
pub mod pattern;
pub mod usage;
pub mod schema;
pub mod mapper;
pub mod metrics;
pub mod error;

// Re-exports
pub use domain::{Domain, DEFAULT_DOMAIN_BUCKET};
pub use task::{TaskDoc, TaskRecord, TaskType};
pub use skill::{Skill, SkillRecord};
pub use pattern::{PatternRecord, SkillPattern};
pub use usage::{SkillUsage, UsageRecord};
pub use schema::{EntityMapping, FieldColumn, Row};
pub use mapper::{Decoded, SkipReason, Skipped, TaskFilter};
pub use metrics::MetricsSummary;
pub use error::{Error, Result};
