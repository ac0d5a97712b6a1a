//! Core data types produced by the scoring operations.

use serde::{Deserialize, Serialize};

/// Type alias for symptom strings.
///
/// Symptoms are canonical lowercase tokens or phrases such as `"fever"` or
/// `"loss of appetite"`.
pub type Symptom = String;

/// A disease ranked against a set of input symptoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseScore {
  /// The canonical disease name.
  pub name: String,
  /// The score normalized by the best disease of the same request, so the
  /// top entry is always `1.0`.
  pub score: f64,
}

impl DiseaseScore {
  pub fn new(name: impl Into<String>, score: f64) -> Self {
    Self {
      name: name.into(),
      score,
    }
  }
}

/// A remedy recommended for a symptom context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HerbScore {
  /// The canonical herb name.
  pub name: String,
  /// The score normalized by the best herb of the same request.
  pub score: f64,
  /// The herb symptoms that contributed to the score, in order of first
  /// contribution. Never empty for a returned herb.
  pub matched_symptoms: Vec<Symptom>,
}

/// A community post whose recorded symptoms overlap the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMatch {
  pub id: String,
  pub title: String,
  pub diseases: Vec<String>,
  pub herbs: Vec<String>,
  /// Raw Jaccard similarity between the query and the post symptoms.
  pub score: f64,
}

/// Precaution advice for one ranked disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecautionGroup {
  pub disease: String,
  /// The disease score, passed through from the ranker unchanged.
  pub score: f64,
  pub precautions: Vec<String>,
}

/// The combined answer to a free-text chat message.
///
/// The structured fields carry scores and evidence; the flattened fields
/// (`possible_diseases`, `recommended_herbs`, `precautions`) keep the older
/// names-only shape for clients that predate scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
  pub normalized_symptoms: Vec<Symptom>,
  pub possible_diseases_scored: Vec<DiseaseScore>,
  pub recommended_herbs_scored: Vec<HerbScore>,
  pub precautions_by_disease: Vec<PrecautionGroup>,
  pub possible_diseases: Vec<String>,
  pub recommended_herbs: Vec<String>,
  /// Union of the grouped precautions, deduplicated in first-seen order.
  pub precautions: Vec<String>,
  pub posts_scored: Vec<PostMatch>,
}
