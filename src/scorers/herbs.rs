use crate::matching::extract_one;
use crate::options::HerbOptions;
use crate::scorers::{clean_symptoms, normalize_by_max, sort_by_score};
use crate::store::{Herb, ReferenceStore};
use crate::types::HerbScore;
use log::debug;
use std::collections::HashSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The symptom context a request recommends herbs for.
struct HerbContext<'a> {
  /// Symptoms the user reported, in order, repeats kept.
  user: Vec<String>,
  user_set: HashSet<String>,
  /// Symptoms of the ranked diseases.
  union_set: HashSet<&'a str>,
}

impl<'a> HerbContext<'a> {
  fn new<D: AsRef<str>, S: AsRef<str>>(store: &'a ReferenceStore, diseases: &[D], symptoms: &[S]) -> Self {
    let union_set = diseases
      .iter()
      .filter_map(|name| store.disease(name.as_ref()))
      .flat_map(|disease| disease.symptoms.iter().map(String::as_str))
      .collect();
    let user = clean_symptoms(symptoms);
    let user_set = user.iter().cloned().collect();

    Self {
      user,
      user_set,
      union_set,
    }
  }
}

fn score_herb(
  store: &ReferenceStore,
  herb: &Herb,
  context: &HerbContext<'_>,
  options: &HerbOptions,
) -> Option<HerbScore> {
  if herb.symptoms.is_empty() {
    return None;
  }

  let mut score = 0.0;
  let mut evidence: Vec<String> = Vec::new();

  for symptom in &herb.symptoms {
    if context.user_set.contains(symptom) {
      score += options.user_weight * store.idf(symptom);
      evidence.push(symptom.clone());
    }
  }

  for symptom in &herb.symptoms {
    if context.union_set.contains(symptom.as_str()) && !context.user_set.contains(symptom) {
      score += options.context_weight * store.idf(symptom);
      evidence.push(symptom.clone());
    }
  }

  for symptom in &context.user {
    if let Some(best) = extract_one(symptom, &herb.symptoms) {
      if best.score >= options.fuzzy_threshold {
        score += options.fuzzy_weight * (best.score / 100.0);
        if !evidence.iter().any(|e| e == best.choice) {
          evidence.push(best.choice.to_string());
        }
      }
    }
  }

  (score > 0.0).then(|| HerbScore {
    name: herb.name.clone(),
    score,
    matched_symptoms: evidence,
  })
}

/// Recommends herbs for a set of ranked diseases and the user's own
/// symptoms.
///
/// Exact matches with the user's symptoms weigh `user_weight × idf`. Herb
/// symptoms that only the given diseases present weigh
/// `context_weight × idf`. Each user symptom whose closest herb symptom
/// scores at least `fuzzy_threshold` adds `fuzzy_weight × similarity / 100`.
/// Diseases missing from the store contribute nothing.
pub fn recommend_herbs<D, S>(
  store: &ReferenceStore,
  diseases: &[D],
  fallback_symptoms: &[S],
  options: &HerbOptions,
) -> Vec<HerbScore>
where
  D: AsRef<str>,
  S: AsRef<str>,
{
  if store.herbs().is_empty() {
    return Vec::new();
  }

  let context = HerbContext::new(store, diseases, fallback_symptoms);
  if context.user.is_empty() && context.union_set.is_empty() {
    return Vec::new();
  }

  #[cfg(feature = "parallel")]
  let mut results: Vec<HerbScore> = store
    .herbs()
    .par_iter()
    .filter_map(|herb| score_herb(store, herb, &context, options))
    .collect();

  #[cfg(not(feature = "parallel"))]
  let mut results: Vec<HerbScore> = store
    .herbs()
    .iter()
    .filter_map(|herb| score_herb(store, herb, &context, options))
    .collect();

  sort_by_score(&mut results);
  normalize_by_max(&mut results);
  results.truncate(options.top_k);

  debug!(
    "recommended {} herbs from {} diseases and {} symptoms",
    results.len(),
    diseases.len(),
    context.user.len()
  );
  results
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::RawTables;

  const NONE: [&str; 0] = [];

  fn store() -> ReferenceStore {
    ReferenceStore::new(
      RawTables::new()
        .disease("flu", ["fever", "cough", "chills"])
        .disease("migraine", ["headache", "nausea"])
        .herb("ginger", ["nausea", "cough"])
        .herb("willow bark", ["headache", "fever"])
        .herb("elderberry", ["fever", "cough", "chills"])
        .herb("mystery root", Vec::<String>::new()),
    )
  }

  #[test]
  fn test_empty_herb_table_returns_nothing() {
    let store = ReferenceStore::new(RawTables::new().disease("flu", ["fever"]));
    assert!(recommend_herbs(&store, &["flu"], &["fever"], &HerbOptions::default()).is_empty());
  }

  #[test]
  fn test_user_symptoms_outweigh_disease_context() {
    let herbs = recommend_herbs(&store(), &["flu"], &["nausea"], &HerbOptions::default());
    // nausea is an exact user match for ginger; elderberry only matches
    // the flu context.
    assert_eq!(herbs[0].name, "ginger");
    assert_eq!(herbs[0].score, 1.0);
    assert_eq!(herbs[0].matched_symptoms, vec!["nausea", "cough"]);
  }

  #[test]
  fn test_user_symptoms_are_not_counted_again_as_context() {
    // All symptoms share the same idf, so only the weights matter:
    // elderberry 1.0 + 0.6 + 0.6, willow bark 1.0, ginger 0.6.
    let options = HerbOptions::default().fuzzy_weight(0.0);
    let herbs = recommend_herbs(&store(), &["flu"], &["fever"], &options);

    let names: Vec<&str> = herbs.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["elderberry", "willow bark", "ginger"]);
    assert_eq!(herbs[0].matched_symptoms, vec!["fever", "cough", "chills"]);
    assert!((herbs[1].score - 1.0 / 2.2).abs() < 1e-9);
    assert!((herbs[2].score - 0.6 / 2.2).abs() < 1e-9);
  }

  #[test]
  fn test_weights_are_configurable() {
    let options = HerbOptions::default()
      .user_weight(0.0)
      .context_weight(1.0)
      .fuzzy_weight(0.0);
    let herbs = recommend_herbs(&store(), &["flu"], &["nausea"], &options);
    // Without user weight ginger only keeps its context symptom, cough.
    assert_eq!(herbs[0].name, "elderberry");
    assert!((herbs[1].score - 1.0 / 3.0).abs() < 1e-9);
  }

  #[test]
  fn test_context_alone_recommends_herbs() {
    let herbs = recommend_herbs(&store(), &["flu"], &NONE, &HerbOptions::default());
    assert_eq!(herbs[0].name, "elderberry");
    assert_eq!(herbs[0].matched_symptoms, vec!["fever", "cough", "chills"]);
    assert!(herbs.iter().all(|h| h.name != "mystery root"));
  }

  #[test]
  fn test_fuzzy_bonus_records_evidence() {
    let herbs = recommend_herbs(&store(), &NONE, &["headach"], &HerbOptions::default());
    assert_eq!(herbs.len(), 1);
    assert_eq!(herbs[0].name, "willow bark");
    assert_eq!(herbs[0].matched_symptoms, vec!["headache"]);
  }

  #[test]
  fn test_returned_herbs_always_have_evidence() {
    let herbs = recommend_herbs(
      &store(),
      &["flu", "migraine", "unknown"],
      &["fever", "nausea"],
      &HerbOptions::default(),
    );
    assert!(!herbs.is_empty());
    assert_eq!(herbs[0].score, 1.0);
    assert!(herbs.iter().all(|h| !h.matched_symptoms.is_empty()));
    assert!(herbs.windows(2).all(|w| w[0].score >= w[1].score));
  }

  #[test]
  fn test_unknown_diseases_and_no_symptoms() {
    let herbs = recommend_herbs(&store(), &["unknown"], &NONE, &HerbOptions::default());
    assert!(herbs.is_empty());
  }

  #[test]
  fn test_top_k_truncates() {
    let options = HerbOptions::default().top_k(2);
    let herbs = recommend_herbs(&store(), &["flu", "migraine"], &NONE, &options);
    assert_eq!(herbs.len(), 2);
  }
}
