//! Encoding of typed entities into generic rows and decoding back.
//!
//! Decoding is fail-soft: a row whose payload cannot be read is left out of
//! the result and recorded in [`Decoded::skipped`], while its siblings decode
//! normally.

use crate::{
    schema::{EntityMapping, Row, PATTERN_MAPPING, SKILL_MAPPING, TASK_MAPPING, USAGE_MAPPING},
    Error, PatternRecord, Result, Skill, SkillPattern, SkillRecord, SkillUsage, TaskDoc,
    TaskRecord, UsageRecord,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("payload column {0} is missing or null")]
    MissingPayload(&'static str),

    #[error("payload is not valid JSON: {0}")]
    MalformedPayload(String),

    #[error("payload has an unexpected shape: {0}")]
    UnexpectedShape(String),
}

/// A row left out of a decode, with enough context to find it again.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub index: usize,
    pub row_id: Option<Value>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub skipped: Vec<Skipped>,
}

impl<T> Decoded<T> {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Emit one warning per skipped row and hand back the records.
    pub fn into_records_logged(self, entity: &str) -> Vec<T> {
        for skip in &self.skipped {
            tracing::warn!(
                "Skipped {} row {} (id {:?}): {}",
                entity,
                skip.index,
                skip.row_id,
                skip.reason
            );
        }
        self.records
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    /// Only tasks whose `analyzed` flag is false or absent.
    #[default]
    Unanalyzed,
    All,
}

pub fn encode_task(task: &TaskDoc) -> Result<Row> {
    encode(task, &TASK_MAPPING)
}

pub fn decode_tasks(rows: &[Row], filter: TaskFilter) -> Decoded<TaskRecord> {
    let mut decoded: Decoded<TaskRecord> = decode_rows(rows, &TASK_MAPPING);
    if filter == TaskFilter::Unanalyzed {
        decoded.records.retain(|task| !task.analyzed);
    }
    decoded
}

pub fn encode_skill(skill: &Skill) -> Result<Row> {
    encode(skill, &SKILL_MAPPING)
}

pub fn decode_skills(rows: &[Row]) -> Decoded<SkillRecord> {
    decode_rows(rows, &SKILL_MAPPING)
}

pub fn encode_pattern(pattern: &SkillPattern) -> Result<Row> {
    encode(pattern, &PATTERN_MAPPING)
}

pub fn decode_patterns(rows: &[Row]) -> Decoded<PatternRecord> {
    decode_rows(rows, &PATTERN_MAPPING)
}

pub fn encode_usage(usage: &SkillUsage) -> Result<Row> {
    encode(usage, &USAGE_MAPPING)
}

pub fn decode_usages(rows: &[Row]) -> Decoded<UsageRecord> {
    decode_rows(rows, &USAGE_MAPPING)
}

/// Project an entity onto the generic row shape described by `mapping`.
pub fn encode<T: Serialize>(entity: &T, mapping: &EntityMapping) -> Result<Row> {
    let mut payload = match serde_json::to_value(entity)? {
        Value::Object(map) => map,
        other => {
            return Err(Error::InvalidRow(format!(
                "{} entity serialized to a non-object: {}",
                mapping.discriminator, other
            )))
        }
    };

    let mut row = Row::new();
    row.insert(
        mapping.discriminator_column.to_string(),
        Value::from(mapping.discriminator),
    );
    for (column, value) in mapping.constants {
        row.insert(column.to_string(), Value::from(*value));
    }
    for m in mapping.mirrored {
        if let Some(value) = payload.get(m.field) {
            row.insert(m.column.to_string(), value.clone());
        }
    }
    for o in mapping.overlay {
        if let Some(value) = payload.remove(o.field) {
            row.insert(o.column.to_string(), value);
        }
    }

    row.insert(
        mapping.payload_column.to_string(),
        Value::String(serde_json::to_string(&payload)?),
    );

    Ok(row)
}

/// Decode every row, keeping input order and collecting the ones that fail.
pub fn decode_rows<T: DeserializeOwned>(rows: &[Row], mapping: &EntityMapping) -> Decoded<T> {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match decode_row(row, mapping) {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push(Skipped {
                index,
                row_id: row.get("id").cloned(),
                reason,
            }),
        }
    }

    Decoded { records, skipped }
}

pub fn decode_row<T: DeserializeOwned>(
    row: &Row,
    mapping: &EntityMapping,
) -> std::result::Result<T, SkipReason> {
    let mut payload = read_payload(row, mapping)?;

    for o in mapping.overlay {
        match row.get(o.column) {
            Some(value) if !value.is_null() => {
                payload.insert(o.field.to_string(), value.clone());
            }
            _ => {
                payload.remove(o.field);
            }
        }
    }

    for f in mapping.fallback {
        let missing = payload.get(f.field).map_or(true, Value::is_null);
        if missing {
            if let Some(value) = row.get(f.column).filter(|v| !v.is_null()) {
                payload.insert(f.field.to_string(), value.clone());
            }
        }
    }

    serde_json::from_value(Value::Object(payload))
        .map_err(|e| SkipReason::UnexpectedShape(e.to_string()))
}

fn read_payload(
    row: &Row,
    mapping: &EntityMapping,
) -> std::result::Result<Map<String, Value>, SkipReason> {
    let parsed = match row.get(mapping.payload_column) {
        Some(Value::String(text)) => serde_json::from_str::<Value>(text)
            .map_err(|e| SkipReason::MalformedPayload(e.to_string()))?,
        // jsonb columns come back already parsed
        Some(Value::Object(map)) => Value::Object(map.clone()),
        Some(Value::Null) | None => {
            return Err(SkipReason::MissingPayload(mapping.payload_column))
        }
        Some(other) => {
            return Err(SkipReason::UnexpectedShape(format!(
                "payload column holds {}",
                other
            )))
        }
    };

    match parsed {
        Value::Object(map) => Ok(map),
        other => Err(SkipReason::UnexpectedShape(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Domain, TaskType};
    use serde_json::json;

    fn sample_task() -> TaskDoc {
        let mut implementation = Map::new();
        implementation.insert("approach".to_string(), json!("timer + checklist"));
        let mut outcome = Map::new();
        outcome.insert("minutes".to_string(), json!(25));

        TaskDoc::new("Inbox zero".to_string(), TaskType::Routine, Domain::Ariel)
            .with_description("Clear the inbox before 9am".to_string())
            .with_category("productivity".to_string())
            .with_scores(6, 8, 7)
            .with_files(vec!["routines/inbox.md".to_string()])
            .with_implementation(implementation)
            .with_challenges(vec![json!({"issue": "distraction", "fix": "phone away"})])
            .with_outcome(outcome)
    }

    fn sample_skill() -> Skill {
        Skill::new("Two-minute rule".to_string(), Domain::Business)
            .with_category("productivity".to_string())
            .with_description("Do it now if it takes under two minutes".to_string())
            .with_content("1. Estimate. 2. If < 2 min, do it.".to_string())
            .with_pattern_sources(vec!["p-1".to_string()])
            .with_usage(12, 0.75, 3.5)
            .with_adhd_effectiveness(0.9)
    }

    #[test]
    fn test_encode_task_columns() {
        let task = sample_task();
        let row = encode_task(&task).unwrap();

        assert_eq!(row["activity_type"], json!("lifeos_skill_task"));
        assert_eq!(row["platform"], json!("life_os_skills"));
        assert_eq!(row["domain"], json!("ARIEL"));
        assert_eq!(row["focus_quality"], json!(6));
        assert_eq!(row["energy_level"], json!(8));

        let payload: Value = serde_json::from_str(row["notes"].as_str().unwrap()).unwrap();
        assert_eq!(payload["analyzed"], json!(false));
        assert_eq!(payload["task_id"], json!(task.task_id));
        assert_eq!(payload["skill_potential"], json!(7));
    }

    #[test]
    fn test_out_of_range_scores_pass_through() {
        let task = sample_task().with_scores(42, -3, 0);
        let row = encode_task(&task).unwrap();
        assert_eq!(row["focus_quality"], json!(42));
        assert_eq!(row["energy_level"], json!(-3));
    }

    #[test]
    fn test_unanalyzed_task_round_trip() {
        let task = sample_task();
        let row = encode_task(&task).unwrap();

        let decoded = decode_tasks(&[row], TaskFilter::Unanalyzed);
        assert!(decoded.is_clean());
        assert_eq!(decoded.records, vec![TaskRecord::from(&task)]);
    }

    #[test]
    fn test_analyzed_task_filtered_out() {
        let mut task = sample_task();
        task.analyzed = true;
        let row = encode_task(&task).unwrap();

        let decoded = decode_tasks(&[row.clone()], TaskFilter::Unanalyzed);
        assert!(decoded.records.is_empty());
        assert!(decoded.is_clean());

        let all = decode_tasks(&[row], TaskFilter::All);
        assert_eq!(all.records.len(), 1);
    }

    #[test]
    fn test_missing_analyzed_flag_counts_as_unanalyzed() {
        let mut row = Row::new();
        row.insert("notes".to_string(), json!(r#"{"task_id": "legacy", "title": "old"}"#));

        let decoded = decode_tasks(&[row], TaskFilter::Unanalyzed);
        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.records[0].task_id, "legacy");
    }

    #[test]
    fn test_malformed_row_skipped_without_affecting_siblings() {
        let first = sample_task();
        let second = sample_task().with_category("health".to_string());

        let mut broken = Row::new();
        broken.insert("id".to_string(), json!(7));
        broken.insert("notes".to_string(), json!("{not json"));

        let rows = vec![
            encode_task(&first).unwrap(),
            broken,
            encode_task(&second).unwrap(),
        ];
        let decoded = decode_tasks(&rows, TaskFilter::Unanalyzed);

        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[0].task_id, first.task_id);
        assert_eq!(decoded.records[1].category, "health");
        assert_eq!(decoded.skipped.len(), 1);
        assert_eq!(decoded.skipped[0].index, 1);
        assert_eq!(decoded.skipped[0].row_id, Some(json!(7)));
        assert!(matches!(decoded.skipped[0].reason, SkipReason::MalformedPayload(_)));
    }

    #[test]
    fn test_non_object_and_missing_payloads_skipped() {
        let mut array_payload = Row::new();
        array_payload.insert("notes".to_string(), json!("[1, 2]"));
        let mut null_payload = Row::new();
        null_payload.insert("notes".to_string(), Value::Null);

        let decoded = decode_tasks(&[array_payload, null_payload, Row::new()], TaskFilter::All);

        assert!(decoded.records.is_empty());
        assert!(matches!(decoded.skipped[0].reason, SkipReason::UnexpectedShape(_)));
        assert_eq!(decoded.skipped[1].reason, SkipReason::MissingPayload("notes"));
        assert_eq!(decoded.skipped[2].reason, SkipReason::MissingPayload("notes"));
    }

    #[test]
    fn test_created_at_filled_from_row() {
        let mut row = encode_task(&sample_task()).unwrap();
        row.insert("created_at".to_string(), json!("2025-01-02T03:04:05Z"));

        let decoded = decode_tasks(&[row], TaskFilter::Unanalyzed);
        assert_eq!(
            decoded.records[0].created_at.as_deref(),
            Some("2025-01-02T03:04:05Z")
        );
    }

    #[test]
    fn test_encode_skill_columns() {
        let skill = sample_skill();
        let row = encode_skill(&skill).unwrap();

        assert_eq!(row["insight_type"], json!("lifeos_ai_skill"));
        assert_eq!(row["title"], json!("Two-minute rule"));
        assert_eq!(row["description"], json!(skill.description));
        assert_eq!(row["confidence"], json!(0.75));
        assert_eq!(row["recurrence_count"], json!(12));
        assert_eq!(row["status"], json!("Active"));
        assert_eq!(row["priority"], json!("High"));
        assert_eq!(row["source"], json!("life_os_skills"));

        let payload: Value = serde_json::from_str(row["action_taken"].as_str().unwrap()).unwrap();
        assert_eq!(payload["skill_id"], json!(skill.skill_id));
        assert_eq!(payload["avg_time_saved"], json!(3.5));
        assert_eq!(payload["adhd_effectiveness"], json!(0.9));
        assert!(payload.get("name").is_none());
        assert!(payload.get("success_rate").is_none());
    }

    #[test]
    fn test_skill_round_trip_overlay_fields() {
        let skill = sample_skill();
        let row = encode_skill(&skill).unwrap();

        let decoded = decode_skills(&[row]);
        let record = &decoded.records[0];

        assert_eq!(record.name.as_deref(), Some(skill.name.as_str()));
        assert_eq!(record.description.as_deref(), Some(skill.description.as_str()));
        assert_eq!(record.total_uses, skill.total_uses);
        assert_eq!(record.success_rate, skill.success_rate);
        assert_eq!(record.domain.as_deref(), Some("BUSINESS"));
        assert_eq!(record.content, skill.content);
    }

    #[test]
    fn test_plain_columns_override_payload() {
        let mut row = Row::new();
        row.insert("title".to_string(), json!("Column name"));
        row.insert("confidence".to_string(), json!(0.5));
        row.insert(
            "action_taken".to_string(),
            json!(r#"{"name": "Payload name", "total_uses": 99, "success_rate": 0.1}"#),
        );

        let decoded = decode_skills(&[row]);
        let record = &decoded.records[0];

        assert_eq!(record.name.as_deref(), Some("Column name"));
        assert_eq!(record.success_rate, 0.5);
        // no recurrence_count column: the payload value does not leak through
        assert_eq!(record.total_uses, 0);
        assert!(record.description.is_none());
    }

    #[test]
    fn test_pattern_round_trip() {
        let pattern = SkillPattern::new(
            "Transition buffer".to_string(),
            Domain::Family,
            vec!["t-1".to_string(), "t-2".to_string(), "t-3".to_string()],
        )
        .with_confidence(0.6);
        let row = encode_pattern(&pattern).unwrap();

        assert_eq!(row["insight_type"], json!("lifeos_skill_pattern"));
        assert_eq!(row["recurrence_count"], json!(3));

        let decoded = decode_patterns(&[row]);
        let record = &decoded.records[0];
        assert_eq!(record.pattern_id, pattern.pattern_id);
        assert_eq!(record.name.as_deref(), Some("Transition buffer"));
        assert_eq!(record.occurrences, 3);
        assert_eq!(record.confidence, 0.6);
        assert_eq!(record.source_tasks.len(), 3);
    }

    #[test]
    fn test_usage_round_trip() {
        let usage = SkillUsage::new("s-1".to_string(), Domain::Michael, true, 12.5)
            .with_notes("worked well".to_string());
        let row = encode_usage(&usage).unwrap();

        assert_eq!(row["activity_type"], json!("lifeos_skill_usage"));
        assert_eq!(row["domain"], json!("MICHAEL"));

        let decoded = decode_usages(&[row]);
        let record = &decoded.records[0];
        assert_eq!(record.skill_id, "s-1");
        assert!(record.success);
        assert_eq!(record.time_saved_minutes, 12.5);
        assert_eq!(record.used_at, Some(usage.used_at));
    }

    #[test]
    fn test_jsonb_payload_accepted() {
        let mut row = Row::new();
        row.insert("action_taken".to_string(), json!({"skill_id": "s-9", "domain": "ARIEL"}));
        row.insert("recurrence_count".to_string(), json!(2));

        let decoded = decode_skills(&[row]);
        assert_eq!(decoded.records[0].skill_id, "s-9");
        assert_eq!(decoded.records[0].total_uses, 2);
    }

    #[test]
    fn test_skill_with_null_fields_still_decodes() {
        let mut row = Row::new();
        row.insert("title".to_string(), json!("Legacy skill"));
        row.insert("recurrence_count".to_string(), json!(6));
        row.insert(
            "action_taken".to_string(),
            json!(r#"{"skill_id": "s-1", "domain": "ARIEL", "version": null, "content": null, "avg_time_saved": 5.0}"#),
        );

        let decoded = decode_skills(&[row]);

        assert!(decoded.is_clean());
        let record = &decoded.records[0];
        assert_eq!(record.skill_id, "s-1");
        assert_eq!(record.version, "");
        assert_eq!(record.content, "");
        assert_eq!(record.total_minutes_saved(), 30.0);
    }

    #[test]
    fn test_task_with_float_score_and_null_category_still_decodes() {
        let mut row = Row::new();
        row.insert(
            "notes".to_string(),
            json!(r#"{"task_id": "t-1", "title": "x", "complexity_score": 7.5, "category": null, "files_affected": null}"#),
        );

        let decoded = decode_tasks(&[row], TaskFilter::Unanalyzed);

        assert!(decoded.is_clean());
        let record = &decoded.records[0];
        assert_eq!(record.task_id, "t-1");
        assert_eq!(record.complexity_score, 8);
        assert_eq!(record.category, "");
        assert!(record.files_affected.is_empty());
    }

    #[test]
    fn test_malformed_skill_row_skipped_without_affecting_siblings() {
        let first = sample_skill();
        let second = Skill::new("Body doubling".to_string(), Domain::Family).with_usage(2, 1.0, 10.0);

        let mut broken = Row::new();
        broken.insert("id".to_string(), json!(42));
        broken.insert("title".to_string(), json!("Broken"));
        broken.insert("action_taken".to_string(), json!("{\"skill_id\": "));

        let rows = vec![
            encode_skill(&first).unwrap(),
            broken,
            encode_skill(&second).unwrap(),
        ];
        let decoded = decode_skills(&rows);

        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[0].skill_id, first.skill_id);
        assert_eq!(decoded.records[1].skill_id, second.skill_id);
        assert_eq!(decoded.records[1].total_uses, 2);
        assert_eq!(decoded.skipped.len(), 1);
        assert_eq!(decoded.skipped[0].index, 1);
        assert_eq!(decoded.skipped[0].row_id, Some(json!(42)));
        assert!(matches!(decoded.skipped[0].reason, SkipReason::MalformedPayload(_)));
    }
}
