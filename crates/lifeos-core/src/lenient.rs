//! Field deserializers for read models.
//!
//! Rows written by older clients carry nulls and loosely typed numbers. A
//! field that cannot be read falls back to its default instead of failing
//! the whole row.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Any value; null or a type mismatch yields `T::default()`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Numeric field that also accepts floats for integers (rounded) and
/// numeric strings.
pub fn number_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if let Ok(parsed) = serde_json::from_value::<T>(value.clone()) {
        return Ok(parsed);
    }

    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(match number {
        Some(n) => serde_json::from_value(Value::from(n))
            .or_else(|_| serde_json::from_value(Value::from(n.round() as i64)))
            .unwrap_or_default(),
        None => T::default(),
    })
}
