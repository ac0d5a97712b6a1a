//! Parsing of loosely-shaped JSON fields into typed collections.
//!
//! Post records come from community data where a symptom field might be a
//! list, a set serialized as a map, or missing entirely. Each accepted shape
//! is listed here once instead of being guessed at every call site.

use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeSet;

/// A normalized set of symptoms: trimmed, lowercased, non-empty strings.
pub type SymptomSet = BTreeSet<String>;

fn scalar_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

/// Normalizes a collection of symptom strings into a [`SymptomSet`].
pub fn normalize_symptoms<I, S>(symptoms: I) -> SymptomSet
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  symptoms
    .into_iter()
    .map(|s| s.as_ref().trim().to_lowercase())
    .filter(|s| !s.is_empty())
    .collect()
}

/// Parses a post's symptom field.
///
/// Accepted shapes:
///
/// * absent or `null` - no symptoms.
/// * an array - its string and number elements; other elements are skipped.
/// * an object - its keys, for sets that were serialized as maps.
///
/// Any other shape is logged and treated as no symptoms.
pub fn parse_symptom_field(value: Option<&Value>) -> SymptomSet {
  match value {
    None | Some(Value::Null) => SymptomSet::new(),
    Some(Value::Array(items)) => normalize_symptoms(items.iter().filter_map(scalar_text)),
    Some(Value::Object(map)) => normalize_symptoms(map.keys()),
    Some(other) => {
      warn!("ignoring symptom field with unsupported shape: {other}");
      SymptomSet::new()
    }
  }
}

/// Parses a list of names: `null`, a single string, or an array of strings
/// and numbers. Anything else yields an empty list.
pub fn parse_string_list(value: &Value) -> Vec<String> {
  match value {
    Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
    Value::String(s) => vec![s.clone()],
    Value::Number(n) => vec![n.to_string()],
    _ => Vec::new(),
  }
}

/// Parses a single text field: a string, or a number written as text.
/// `null` and any other shape yield `None`.
pub fn parse_text(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    other => {
      let text = scalar_text(other);
      if text.is_none() {
        warn!("ignoring text field with unsupported shape: {other}");
      }
      text
    }
  }
}

/// Serde adapter for [`parse_text`].
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(parse_text(&value))
}

/// Serde adapter for [`parse_string_list`].
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(parse_string_list(&value))
}
