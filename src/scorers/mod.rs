//! The scoring operations, one per module.
//!
//! Each operation is a pure function of a [`ReferenceStore`] and its request
//! input. They are composed by [`Predictor`](crate::engine::Predictor) but
//! can be called directly.
//!
//! [`ReferenceStore`]: crate::store::ReferenceStore

/// Ranks diseases by IDF-weighted fuzzy symptom overlap.
pub mod diseases;
/// Recommends herbs from user symptoms and ranked diseases.
pub mod herbs;
/// Retrieves community posts by Jaccard similarity.
pub mod posts;
/// Groups precautions under ranked diseases.
pub mod precautions;
/// Extracts vocabulary symptoms from free text.
pub mod symptoms;

pub use diseases::rank_diseases;
pub use herbs::recommend_herbs;
pub use posts::retrieve_posts;
pub use precautions::{flatten_precautions, group_precautions};
pub use symptoms::extract_symptoms;

use crate::types::{DiseaseScore, HerbScore, PostMatch};
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A result record carrying a score.
pub(crate) trait Scored {
  fn score(&self) -> f64;
  fn set_score(&mut self, score: f64);
}

impl Scored for DiseaseScore {
  fn score(&self) -> f64 {
    self.score
  }

  fn set_score(&mut self, score: f64) {
    self.score = score;
  }
}

impl Scored for HerbScore {
  fn score(&self) -> f64 {
    self.score
  }

  fn set_score(&mut self, score: f64) {
    self.score = score;
  }
}

impl Scored for PostMatch {
  fn score(&self) -> f64 {
    self.score
  }

  fn set_score(&mut self, score: f64) {
    self.score = score;
  }
}

fn descending<T: Scored>(a: &T, b: &T) -> Ordering {
  b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal)
}

/// Sort results by score in descending order. The sort is stable, so equal
/// scores keep source order.
#[cfg(feature = "parallel")]
pub(crate) fn sort_by_score<T: Scored + Send>(results: &mut [T]) {
  results.par_sort_by(descending);
}

/// Sort results by score in descending order. The sort is stable, so equal
/// scores keep source order.
#[cfg(not(feature = "parallel"))]
pub(crate) fn sort_by_score<T: Scored>(results: &mut [T]) {
  results.sort_by(descending);
}

/// Divides every score by the largest one.
///
/// Empty input is left alone; if the largest score is not positive every
/// score becomes `0.0` instead of dividing by it.
pub(crate) fn normalize_by_max<T: Scored>(results: &mut [T]) {
  if results.is_empty() {
    return;
  }

  let max_score = results
    .iter()
    .map(Scored::score)
    .fold(f64::NEG_INFINITY, f64::max);

  for result in results.iter_mut() {
    let normalized = if max_score > 0.0 {
      result.score() / max_score
    } else {
      0.0
    };
    result.set_score(normalized);
  }
}

/// Trims and lowercases caller-supplied symptoms, dropping blanks but
/// keeping order and repeats.
pub(crate) fn clean_symptoms<S: AsRef<str>>(symptoms: &[S]) -> Vec<String> {
  symptoms
    .iter()
    .map(|s| s.as_ref().trim().to_lowercase())
    .filter(|s| !s.is_empty())
    .collect()
}
