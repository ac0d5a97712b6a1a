//! The immutable, normalized reference store.

use crate::store::shape::{parse_symptom_field, SymptomSet};
use crate::store::tables::RawTables;
use crate::types::Symptom;
use log::info;
use std::collections::{HashMap, HashSet};

/// A disease and the symptoms it presents with.
#[derive(Debug, Clone, PartialEq)]
pub struct Disease {
  pub name: String,
  /// Lowercased, deduplicated, in source order.
  pub symptoms: Vec<Symptom>,
}

/// A remedy and the symptoms it is indicated for.
#[derive(Debug, Clone, PartialEq)]
pub struct Herb {
  pub name: String,
  /// Lowercased, deduplicated, in source order.
  pub symptoms: Vec<Symptom>,
}

/// A community post. Only `symptoms` takes part in scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
  pub id: String,
  pub title: Option<String>,
  pub related_diseases: Vec<String>,
  pub related_herbs: Vec<String>,
  pub symptoms: SymptomSet,
}

/// Lowercases, trims and deduplicates a list, keeping first occurrences.
fn normalize_list(items: Vec<String>) -> Vec<String> {
  let mut seen = HashSet::new();
  items
    .into_iter()
    .map(|s| s.trim().to_lowercase())
    .filter(|s| !s.is_empty() && seen.insert(s.clone()))
    .collect()
}

/// Inserts `value` under `key`, replacing an earlier entry with the same key
/// in place so the first occurrence keeps its position.
fn upsert<T>(entries: &mut Vec<T>, index: &mut HashMap<String, usize>, key: &str, value: T) {
  match index.get(key) {
    Some(&at) => entries[at] = value,
    None => {
      index.insert(key.to_string(), entries.len());
      entries.push(value);
    }
  }
}

/// Read-only lookup tables shared by every request.
///
/// The store is built once from [`RawTables`] and never mutated afterwards,
/// so it can be shared across threads behind an `Arc` without locking. All
/// derived statistics (symptom document frequencies, the herb/disease name
/// index) are computed at construction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
  vocabulary: Vec<Symptom>,
  diseases: Vec<Disease>,
  disease_index: HashMap<String, usize>,
  herbs: Vec<Herb>,
  posts: Vec<Post>,
  precautions: Vec<(String, Vec<String>)>,
  precaution_index: HashMap<String, usize>,
  herbs_by_name: Vec<(String, Vec<String>)>,
  herbs_by_name_index: HashMap<String, usize>,
  symptom_df: HashMap<Symptom, usize>,
  total_diseases: usize,
}

impl ReferenceStore {
  /// Normalizes the raw tables and computes the derived statistics.
  pub fn new(raw: RawTables) -> Self {
    let mut seen = HashSet::new();
    let vocabulary: Vec<Symptom> = raw
      .vocabulary
      .into_iter()
      .map(|s| s.trim().to_lowercase())
      .filter(|s| !s.is_empty() && seen.insert(s.clone()))
      .collect();

    let mut diseases = Vec::new();
    let mut disease_index = HashMap::new();
    for (name, symptoms) in raw.disease_symptoms {
      let disease = Disease {
        name: name.clone(),
        symptoms: normalize_list(symptoms),
      };
      upsert(&mut diseases, &mut disease_index, &name, disease);
    }

    let mut herbs = Vec::new();
    let mut herb_index = HashMap::new();
    for (name, symptoms) in raw.herb_symptoms {
      let herb = Herb {
        name: name.clone(),
        symptoms: normalize_list(symptoms),
      };
      upsert(&mut herbs, &mut herb_index, &name, herb);
    }

    let mut posts = Vec::new();
    let mut post_index = HashMap::new();
    for raw_post in raw.posts {
      let post = Post {
        symptoms: parse_symptom_field(raw_post.symptoms.as_ref()),
        id: raw_post.id.clone(),
        title: raw_post.title,
        related_diseases: raw_post.related_diseases,
        related_herbs: raw_post.related_herbs,
      };
      upsert(&mut posts, &mut post_index, &raw_post.id, post);
    }

    let mut precautions = Vec::new();
    let mut precaution_index = HashMap::new();
    for (disease, advice) in raw.precautions {
      let disease = disease.trim().to_string();
      if disease.is_empty() {
        continue;
      }
      let advice: Vec<String> = advice
        .into_iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect();
      upsert(
        &mut precautions,
        &mut precaution_index,
        &disease,
        (disease.clone(), advice),
      );
    }

    // Herb lists sometimes name diseases instead of symptoms; index every
    // entry so a disease name can reach the herbs that list it.
    let mut herbs_by_name: Vec<(String, Vec<String>)> = Vec::new();
    let mut herbs_by_name_index = HashMap::new();
    for herb in &herbs {
      for entry in &herb.symptoms {
        let at = *herbs_by_name_index.entry(entry.clone()).or_insert_with(|| {
          herbs_by_name.push((entry.clone(), Vec::new()));
          herbs_by_name.len() - 1
        });
        herbs_by_name[at].1.push(herb.name.clone());
      }
    }
    for (_, names) in &mut herbs_by_name {
      names.sort();
      names.dedup();
    }

    let mut symptom_df: HashMap<Symptom, usize> = HashMap::new();
    let mut scoreable = 0;
    for disease in &diseases {
      if disease.symptoms.is_empty() {
        continue;
      }
      scoreable += 1;
      for symptom in &disease.symptoms {
        *symptom_df.entry(symptom.clone()).or_insert(0) += 1;
      }
    }

    let store = Self {
      vocabulary,
      diseases,
      disease_index,
      herbs,
      posts,
      precautions,
      precaution_index,
      herbs_by_name,
      herbs_by_name_index,
      symptom_df,
      total_diseases: scoreable.max(1),
    };

    info!(
      "reference store built: {} symptoms, {} diseases ({} scoreable), {} herbs, {} posts, {} precaution lists",
      store.vocabulary.len(),
      store.diseases.len(),
      scoreable,
      store.herbs.len(),
      store.posts.len(),
      store.precautions.len(),
    );

    store
  }

  /// The symptoms reachable from free text, lowercased and deduplicated.
  pub fn vocabulary(&self) -> &[Symptom] {
    &self.vocabulary
  }

  pub fn diseases(&self) -> &[Disease] {
    &self.diseases
  }

  /// Looks up a disease by its exact name.
  pub fn disease(&self, name: &str) -> Option<&Disease> {
    self.disease_index.get(name).map(|&at| &self.diseases[at])
  }

  /// The first disease whose name matches `name` case-insensitively.
  pub fn disease_ignore_case(&self, name: &str) -> Option<&Disease> {
    let wanted = name.to_lowercase();
    self.diseases.iter().find(|d| d.name.to_lowercase() == wanted)
  }

  pub fn herbs(&self) -> &[Herb] {
    &self.herbs
  }

  pub fn posts(&self) -> &[Post] {
    &self.posts
  }

  /// The precaution list for a disease, by exact name.
  pub fn precautions(&self, disease: &str) -> Option<&[String]> {
    self
      .precaution_index
      .get(disease)
      .map(|&at| self.precautions[at].1.as_slice())
  }

  /// The first disease with a precaution list whose name matches
  /// `disease` case-insensitively.
  pub fn precaution_key_ignore_case(&self, disease: &str) -> Option<&str> {
    let wanted = disease.to_lowercase();
    self
      .precautions
      .iter()
      .find(|(name, _)| name.to_lowercase() == wanted)
      .map(|(name, _)| name.as_str())
  }

  /// Herbs whose symptom list contains `disease` as an entry, sorted by
  /// name. Matching is case-insensitive.
  pub fn herbs_listing(&self, disease: &str) -> &[String] {
    self
      .herbs_by_name_index
      .get(&disease.trim().to_lowercase())
      .map(|&at| self.herbs_by_name[at].1.as_slice())
      .unwrap_or(&[])
  }

  /// Number of diseases listing `symptom`.
  pub fn document_frequency(&self, symptom: &str) -> usize {
    self.symptom_df.get(symptom).copied().unwrap_or(0)
  }

  /// Number of diseases with at least one symptom, never below one.
  pub fn total_diseases(&self) -> usize {
    self.total_diseases
  }

  /// Smoothed inverse document frequency of a symptom across diseases.
  ///
  /// `ln((1 + N) / (1 + df)) + 1`, which is at least `1.0` for a symptom
  /// every disease shares and largest for symptoms no disease lists.
  pub fn idf(&self, symptom: &str) -> f64 {
    let n = self.total_diseases as f64;
    let df = self.document_frequency(symptom) as f64;
    ((1.0 + n) / (1.0 + df)).ln() + 1.0
  }
}

impl From<RawTables> for ReferenceStore {
  fn from(raw: RawTables) -> Self {
    Self::new(raw)
  }
}
