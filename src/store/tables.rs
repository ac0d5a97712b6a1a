//! Raw reference tables as supplied by a data provider.
//!
//! Every table is optional: a missing or `null` table is simply empty.
//! Tables keyed by name keep their source order.

use crate::error::Result;
use crate::store::{ordered, shape};
use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One community post before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
  /// Filled from the post's key when loaded from a JSON map.
  #[serde(skip_deserializing)]
  pub id: String,
  #[serde(default, alias = "Title", deserialize_with = "shape::optional_text")]
  pub title: Option<String>,
  #[serde(
    default,
    alias = "related_disease_id",
    alias = "diseases",
    deserialize_with = "shape::string_list"
  )]
  pub related_diseases: Vec<String>,
  #[serde(
    default,
    alias = "Herb",
    alias = "herbs",
    deserialize_with = "shape::string_list"
  )]
  pub related_herbs: Vec<String>,
  /// The recorded symptoms in whatever shape the source stored them; see
  /// [`parse_symptom_field`](crate::store::shape::parse_symptom_field).
  #[serde(default, alias = "All_Symptoms", alias = "all_symptoms")]
  pub symptoms: Option<Value>,
}

impl RawPost {
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      ..Default::default()
    }
  }

  pub fn title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn diseases<I, S>(mut self, diseases: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.related_diseases = diseases.into_iter().map(Into::into).collect();
    self
  }

  pub fn herbs<I, S>(mut self, herbs: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.related_herbs = herbs.into_iter().map(Into::into).collect();
    self
  }

  /// Sets the symptoms from a list of strings.
  pub fn symptoms<I, S>(mut self, symptoms: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let items = symptoms.into_iter().map(|s| Value::String(s.into())).collect();
    self.symptoms = Some(Value::Array(items));
    self
  }

  /// Sets the symptom field to an arbitrary JSON value.
  pub fn symptom_value(mut self, value: Value) -> Self {
    self.symptoms = Some(value);
    self
  }
}

/// The reference tables a [`ReferenceStore`](crate::store::ReferenceStore)
/// is built from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTables {
  /// Every symptom reachable from free text.
  #[serde(
    default,
    alias = "all_unique_symptoms",
    deserialize_with = "shape::string_list"
  )]
  pub vocabulary: Vec<String>,
  #[serde(
    default,
    alias = "disease_symptom_map",
    deserialize_with = "ordered_lists"
  )]
  pub disease_symptoms: Vec<(String, Vec<String>)>,
  #[serde(default, alias = "herb_symptom_map", deserialize_with = "ordered_lists")]
  pub herb_symptoms: Vec<(String, Vec<String>)>,
  /// Posts keyed by id in JSON.
  #[serde(default, alias = "post_info_map", deserialize_with = "posts_by_id")]
  pub posts: Vec<RawPost>,
  #[serde(
    default,
    alias = "disease_precautions",
    deserialize_with = "ordered_lists"
  )]
  pub precautions: Vec<(String, Vec<String>)>,
}

fn ordered_lists<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, Vec<String>)>, D::Error>
where
  D: Deserializer<'de>,
{
  let entries: Vec<(String, Value)> = ordered::deserialize(deserializer)?;
  Ok(
    entries
      .into_iter()
      .map(|(key, value)| (key, shape::parse_string_list(&value)))
      .collect(),
  )
}

/// Posts keyed by id. A record that is not an object, or that does not
/// parse as a post, is logged and skipped so the other posts still load.
fn posts_by_id<'de, D>(deserializer: D) -> std::result::Result<Vec<RawPost>, D::Error>
where
  D: Deserializer<'de>,
{
  let entries: Vec<(String, Value)> = ordered::deserialize(deserializer)?;
  Ok(
    entries
      .into_iter()
      .filter_map(|(id, value)| {
        if !value.is_object() {
          warn!("skipping post {id:?}: expected an object, got {value}");
          return None;
        }
        match RawPost::deserialize(value) {
          Ok(mut post) => {
            post.id = id;
            Some(post)
          }
          Err(err) => {
            warn!("skipping post {id:?}: {err}");
            None
          }
        }
      })
      .collect(),
  )
}

impl RawTables {
  pub fn new() -> Self {
    Self::default()
  }

  /// Parses tables from a JSON object. Missing tables are empty.
  pub fn from_json_str(json: &str) -> Result<Self> {
    Ok(serde_json::from_str(json)?)
  }

  /// Parses tables from a reader producing a JSON object.
  pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
    Ok(serde_json::from_reader(reader)?)
  }

  /// Reads tables from a JSON file.
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
    let file = File::open(path)?;
    Self::from_reader(BufReader::new(file))
  }

  pub fn vocabulary<I, S>(mut self, symptoms: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.vocabulary.extend(symptoms.into_iter().map(Into::into));
    self
  }

  pub fn disease<I, S>(mut self, name: impl Into<String>, symptoms: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .disease_symptoms
      .push((name.into(), symptoms.into_iter().map(Into::into).collect()));
    self
  }

  pub fn herb<I, S>(mut self, name: impl Into<String>, symptoms: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .herb_symptoms
      .push((name.into(), symptoms.into_iter().map(Into::into).collect()));
    self
  }

  pub fn post(mut self, post: RawPost) -> Self {
    self.posts.push(post);
    self
  }

  pub fn precaution<I, S>(mut self, disease: impl Into<String>, precautions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .precautions
      .push((disease.into(), precautions.into_iter().map(Into::into).collect()));
    self
  }
}
