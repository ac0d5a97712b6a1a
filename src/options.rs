//! Tunable options for each scoring operation.
//!
//! Every option struct deserializes with defaults for missing keys, so a
//! configuration file only has to name what it changes.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Options for free-text symptom extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractOptions {
  /// Maximum number of symptoms returned.
  #[serde(default = "default_extract_limit")]
  pub limit: usize,
  /// Minimum weighted-ratio score (0-100) for a single word to match.
  #[serde(default = "default_token_threshold")]
  pub token_threshold: f64,
  /// Minimum weighted-ratio score (0-100) for a bigram or trigram to match.
  #[serde(default = "default_phrase_threshold")]
  pub phrase_threshold: f64,
}

fn default_extract_limit() -> usize {
  15
}

fn default_token_threshold() -> f64 {
  85.0
}

fn default_phrase_threshold() -> f64 {
  90.0
}

impl Default for ExtractOptions {
  fn default() -> Self {
    Self {
      limit: default_extract_limit(),
      token_threshold: default_token_threshold(),
      phrase_threshold: default_phrase_threshold(),
    }
  }
}

impl ExtractOptions {
  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = limit;
    self
  }

  pub fn token_threshold(mut self, threshold: f64) -> Self {
    self.token_threshold = threshold;
    self
  }

  pub fn phrase_threshold(mut self, threshold: f64) -> Self {
    self.phrase_threshold = threshold;
    self
  }
}

/// Options for disease ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankOptions {
  #[serde(default = "default_rank_top_k")]
  pub top_k: usize,
  /// Best matches scoring below this (0-100) contribute nothing to a
  /// disease, so a disease sharing nothing plausible with the input scores
  /// exactly zero and is dropped.
  #[serde(default = "default_min_similarity")]
  pub min_similarity: f64,
}

fn default_rank_top_k() -> usize {
  5
}

fn default_min_similarity() -> f64 {
  50.0
}

impl Default for RankOptions {
  fn default() -> Self {
    Self {
      top_k: default_rank_top_k(),
      min_similarity: default_min_similarity(),
    }
  }
}

impl RankOptions {
  pub fn top_k(mut self, top_k: usize) -> Self {
    self.top_k = top_k;
    self
  }

  pub fn min_similarity(mut self, min_similarity: f64) -> Self {
    self.min_similarity = min_similarity;
    self
  }
}

/// Options for herb recommendation.
///
/// An herb earns `user_weight × idf` for every symptom it shares exactly with
/// the user, `context_weight × idf` for every other symptom it shares with the
/// ranked diseases, and `fuzzy_weight × similarity` for every user symptom it
/// matches at or above `fuzzy_threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HerbOptions {
  #[serde(default = "default_herb_top_k")]
  pub top_k: usize,
  #[serde(default = "default_fuzzy_threshold")]
  pub fuzzy_threshold: f64,
  #[serde(default = "default_user_weight")]
  pub user_weight: f64,
  #[serde(default = "default_context_weight")]
  pub context_weight: f64,
  #[serde(default = "default_fuzzy_weight")]
  pub fuzzy_weight: f64,
}

fn default_herb_top_k() -> usize {
  10
}

fn default_fuzzy_threshold() -> f64 {
  90.0
}

fn default_user_weight() -> f64 {
  1.0
}

fn default_context_weight() -> f64 {
  0.6
}

fn default_fuzzy_weight() -> f64 {
  0.4
}

impl Default for HerbOptions {
  fn default() -> Self {
    Self {
      top_k: default_herb_top_k(),
      fuzzy_threshold: default_fuzzy_threshold(),
      user_weight: default_user_weight(),
      context_weight: default_context_weight(),
      fuzzy_weight: default_fuzzy_weight(),
    }
  }
}

impl HerbOptions {
  pub fn top_k(mut self, top_k: usize) -> Self {
    self.top_k = top_k;
    self
  }

  pub fn fuzzy_threshold(mut self, threshold: f64) -> Self {
    self.fuzzy_threshold = threshold;
    self
  }

  pub fn user_weight(mut self, weight: f64) -> Self {
    self.user_weight = weight;
    self
  }

  pub fn context_weight(mut self, weight: f64) -> Self {
    self.context_weight = weight;
    self
  }

  pub fn fuzzy_weight(mut self, weight: f64) -> Self {
    self.fuzzy_weight = weight;
    self
  }
}

/// Options for community post retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostOptions {
  /// Minimum Jaccard similarity for a post to be kept.
  #[serde(default = "default_post_threshold")]
  pub threshold: f64,
  #[serde(default = "default_post_top_k")]
  pub top_k: usize,
}

fn default_post_threshold() -> f64 {
  0.1
}

fn default_post_top_k() -> usize {
  10
}

impl Default for PostOptions {
  fn default() -> Self {
    Self {
      threshold: default_post_threshold(),
      top_k: default_post_top_k(),
    }
  }
}

impl PostOptions {
  pub fn threshold(mut self, threshold: f64) -> Self {
    self.threshold = threshold;
    self
  }

  pub fn top_k(mut self, top_k: usize) -> Self {
    self.top_k = top_k;
    self
  }
}

/// Options for grouping precautions under ranked diseases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecautionOptions {
  /// Maximum precautions kept per disease.
  #[serde(default = "default_per_disease")]
  pub per_disease: usize,
  /// Number of leading ranked diseases that get a group.
  #[serde(default = "default_top_diseases")]
  pub top_diseases: usize,
}

fn default_per_disease() -> usize {
  5
}

fn default_top_diseases() -> usize {
  3
}

impl Default for PrecautionOptions {
  fn default() -> Self {
    Self {
      per_disease: default_per_disease(),
      top_diseases: default_top_diseases(),
    }
  }
}

impl PrecautionOptions {
  pub fn per_disease(mut self, per_disease: usize) -> Self {
    self.per_disease = per_disease;
    self
  }

  pub fn top_diseases(mut self, top_diseases: usize) -> Self {
    self.top_diseases = top_diseases;
    self
  }
}

/// Which lemmatizer the predictor runs over extracted words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LemmatizerKind {
  /// Noun morphology checked against the vocabulary's words.
  #[default]
  Morphy,
  /// Leaves every word unchanged.
  Identity,
}

/// Configuration for a [`Predictor`](crate::engine::Predictor).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
  #[serde(default)]
  pub extract: ExtractOptions,
  #[serde(default)]
  pub rank: RankOptions,
  #[serde(default)]
  pub herbs: HerbOptions,
  #[serde(default)]
  pub posts: PostOptions,
  #[serde(default)]
  pub precautions: PrecautionOptions,
  #[serde(default)]
  pub lemmatizer: LemmatizerKind,
}

impl PredictorConfig {
  /// Parses a configuration from JSON. Missing keys take their defaults.
  pub fn from_json_str(json: &str) -> Result<Self> {
    Ok(serde_json::from_str(json)?)
  }

  pub fn extract(mut self, extract: ExtractOptions) -> Self {
    self.extract = extract;
    self
  }

  pub fn rank(mut self, rank: RankOptions) -> Self {
    self.rank = rank;
    self
  }

  pub fn herbs(mut self, herbs: HerbOptions) -> Self {
    self.herbs = herbs;
    self
  }

  pub fn posts(mut self, posts: PostOptions) -> Self {
    self.posts = posts;
    self
  }

  pub fn precautions(mut self, precautions: PrecautionOptions) -> Self {
    self.precautions = precautions;
    self
  }

  pub fn lemmatizer(mut self, kind: LemmatizerKind) -> Self {
    self.lemmatizer = kind;
    self
  }
}
