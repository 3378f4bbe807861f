//! Field-to-column mapping onto the store's two pre-existing generic tables.
//!
//! `activities` and `insights` are owned by other systems. Each entity kind is
//! told apart by a discriminator column, keeps most of its fields in one
//! serialized payload column, and borrows a few plain columns whose names do
//! not match the entity's own (`focus_quality` holds a complexity score,
//! `recurrence_count` holds a use count, and so on).

use serde_json::{Map, Value};

/// One row of a generic table: column name to scalar or text value.
pub type Row = Map<String, Value>;

pub const ACTIVITIES_TABLE: &str = "activities";
pub const INSIGHTS_TABLE: &str = "insights";

pub const TASK_MARKER: &str = "lifeos_skill_task";
pub const USAGE_MARKER: &str = "lifeos_skill_usage";
pub const SKILL_MARKER: &str = "lifeos_ai_skill";
pub const PATTERN_MARKER: &str = "lifeos_skill_pattern";

pub const PLATFORM_TAG: &str = "life_os_skills";
pub const ACTIVE_STATUS: &str = "Active";

/// A payload field paired with the plain column that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldColumn {
    pub field: &'static str,
    pub column: &'static str,
}

const fn fc(field: &'static str, column: &'static str) -> FieldColumn {
    FieldColumn { field, column }
}

#[derive(Debug, Clone, Copy)]
pub struct EntityMapping {
    pub table: &'static str,
    pub discriminator_column: &'static str,
    pub discriminator: &'static str,
    pub payload_column: &'static str,
    /// Copied into plain columns for store-side filtering; the payload keeps them too.
    pub mirrored: &'static [FieldColumn],
    /// Moved out of the payload into plain columns. On read the column value
    /// always wins, and a missing column means the field's default.
    pub overlay: &'static [FieldColumn],
    /// Read from a plain column only when the payload lacks the field.
    pub fallback: &'static [FieldColumn],
    /// Fixed column values written on every row.
    pub constants: &'static [(&'static str, &'static str)],
    /// Column that orders reads, newest first.
    pub order_column: &'static str,
}

impl EntityMapping {
    /// Column filters that select this entity kind on read.
    pub fn read_filters(&self) -> Vec<(&'static str, &'static str)> {
        let mut filters = vec![(self.discriminator_column, self.discriminator)];
        if let Some((column, value)) = self.constants.iter().find(|(c, _)| *c == "status") {
            filters.push((*column, *value));
        }
        filters
    }
}

pub const TASK_MAPPING: EntityMapping = EntityMapping {
    table: ACTIVITIES_TABLE,
    discriminator_column: "activity_type",
    discriminator: TASK_MARKER,
    payload_column: "notes",
    mirrored: &[
        fc("domain", "domain"),
        fc("complexity_score", "focus_quality"),
        fc("adhd_relevance", "energy_level"),
    ],
    overlay: &[],
    fallback: &[fc("created_at", "created_at")],
    constants: &[("platform", PLATFORM_TAG)],
    order_column: "created_at",
};

pub const USAGE_MAPPING: EntityMapping = EntityMapping {
    table: ACTIVITIES_TABLE,
    discriminator_column: "activity_type",
    discriminator: USAGE_MARKER,
    payload_column: "notes",
    mirrored: &[fc("domain", "domain")],
    overlay: &[],
    fallback: &[],
    constants: &[("platform", PLATFORM_TAG)],
    order_column: "created_at",
};

pub const SKILL_MAPPING: EntityMapping = EntityMapping {
    table: INSIGHTS_TABLE,
    discriminator_column: "insight_type",
    discriminator: SKILL_MARKER,
    payload_column: "action_taken",
    mirrored: &[],
    overlay: &[
        fc("name", "title"),
        fc("description", "description"),
        fc("success_rate", "confidence"),
        fc("total_uses", "recurrence_count"),
    ],
    fallback: &[fc("created_at", "created_at"), fc("updated_at", "updated_at")],
    constants: &[
        ("source", PLATFORM_TAG),
        ("priority", "High"),
        ("status", ACTIVE_STATUS),
    ],
    order_column: "created_at",
};

pub const PATTERN_MAPPING: EntityMapping = EntityMapping {
    table: INSIGHTS_TABLE,
    discriminator_column: "insight_type",
    discriminator: PATTERN_MARKER,
    payload_column: "action_taken",
    mirrored: &[],
    overlay: &[
        fc("name", "title"),
        fc("description", "description"),
        fc("confidence", "confidence"),
        fc("occurrences", "recurrence_count"),
    ],
    fallback: &[fc("created_at", "created_at")],
    constants: &[
        ("source", PLATFORM_TAG),
        ("priority", "Medium"),
        ("status", ACTIVE_STATUS),
    ],
    order_column: "created_at",
};
