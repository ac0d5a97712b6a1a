use crate::options::PostOptions;
use crate::scorers::sort_by_score;
use crate::store::{normalize_symptoms, Post, ReferenceStore, SymptomSet};
use crate::types::PostMatch;
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Title reported for posts stored without one.
pub const UNTITLED: &str = "Untitled";

/// Jaccard similarity of two sets. Two empty sets score `0.0`.
pub fn jaccard(a: &SymptomSet, b: &SymptomSet) -> f64 {
  let intersection = a.intersection(b).count();
  let union = a.len() + b.len() - intersection;
  if union == 0 {
    return 0.0;
  }
  intersection as f64 / union as f64
}

fn match_post(post: &Post, query: &SymptomSet, options: &PostOptions) -> Option<PostMatch> {
  if post.symptoms.is_empty() {
    return None;
  }

  let score = jaccard(query, &post.symptoms);
  if score < options.threshold {
    return None;
  }

  let title = post
    .title
    .as_deref()
    .filter(|t| !t.trim().is_empty())
    .unwrap_or(UNTITLED);

  Some(PostMatch {
    id: post.id.clone(),
    title: title.to_string(),
    diseases: post.related_diseases.clone(),
    herbs: post.related_herbs.clone(),
    score,
  })
}

/// Retrieves the posts whose recorded symptoms overlap the query.
///
/// Posts are scored by Jaccard similarity and kept when it reaches
/// `threshold`. Scores are already in `[0, 1]` and are not normalized.
pub fn retrieve_posts<S: AsRef<str>>(
  store: &ReferenceStore,
  symptoms: &[S],
  options: &PostOptions,
) -> Vec<PostMatch> {
  let query = normalize_symptoms(symptoms);
  if query.is_empty() || store.posts().is_empty() {
    return Vec::new();
  }

  #[cfg(feature = "parallel")]
  let mut results: Vec<PostMatch> = store
    .posts()
    .par_iter()
    .filter_map(|post| match_post(post, &query, options))
    .collect();

  #[cfg(not(feature = "parallel"))]
  let mut results: Vec<PostMatch> = store
    .posts()
    .iter()
    .filter_map(|post| match_post(post, &query, options))
    .collect();

  sort_by_score(&mut results);
  results.truncate(options.top_k);

  debug!("retrieved {} posts for {} symptoms", results.len(), query.len());
  results
}
