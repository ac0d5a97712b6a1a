use crate::matching::extract_one;
use crate::options::RankOptions;
use crate::scorers::{clean_symptoms, normalize_by_max, sort_by_score};
use crate::store::{Disease, ReferenceStore};
use crate::types::DiseaseScore;
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Raw score of one disease: for every input symptom, the closest symptom of
/// the disease contributes `similarity / 100 × idf(closest)`, provided the
/// similarity reaches `min_similarity`.
fn score_disease(
  store: &ReferenceStore,
  disease: &Disease,
  symptoms: &[String],
  options: &RankOptions,
) -> Option<DiseaseScore> {
  if disease.symptoms.is_empty() {
    return None;
  }

  let score: f64 = symptoms
    .iter()
    .filter_map(|symptom| extract_one(symptom, &disease.symptoms))
    .filter(|best| best.score >= options.min_similarity)
    .map(|best| best.score / 100.0 * store.idf(best.choice))
    .sum();

  (score > 0.0).then(|| DiseaseScore::new(disease.name.clone(), score))
}

/// Ranks every disease against the input symptoms.
///
/// Diseases without symptoms are not scored, and diseases scoring zero are
/// dropped. Scores are divided by the best one so the first result is always
/// `1.0`; at most `top_k` results are returned.
pub fn rank_diseases<S: AsRef<str>>(
  store: &ReferenceStore,
  symptoms: &[S],
  options: &RankOptions,
) -> Vec<DiseaseScore> {
  let symptoms = clean_symptoms(symptoms);
  if symptoms.is_empty() || store.diseases().is_empty() {
    return Vec::new();
  }

  #[cfg(feature = "parallel")]
  let mut results: Vec<DiseaseScore> = store
    .diseases()
    .par_iter()
    .filter_map(|disease| score_disease(store, disease, &symptoms, options))
    .collect();

  #[cfg(not(feature = "parallel"))]
  let mut results: Vec<DiseaseScore> = store
    .diseases()
    .iter()
    .filter_map(|disease| score_disease(store, disease, &symptoms, options))
    .collect();

  sort_by_score(&mut results);
  normalize_by_max(&mut results);
  results.truncate(options.top_k);

  debug!("ranked {} diseases for {} symptoms", results.len(), symptoms.len());
  results
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::RawTables;

  fn store() -> ReferenceStore {
    ReferenceStore::new(
      RawTables::new()
        .disease("flu", ["fever", "cough", "chills"])
        .disease("migraine", ["headache", "nausea"])
        .disease("common cold", ["cough", "sneezing", "runny nose"])
        .disease("placeholder", Vec::<String>::new()),
    )
  }

  #[test]
  fn test_unrelated_disease_is_excluded() {
    let store = ReferenceStore::new(
      RawTables::new()
        .disease("flu", ["fever", "cough"])
        .disease("migraine", ["headache"]),
    );
    let ranked = rank_diseases(&store, &["fever", "cough"], &RankOptions::default());
    assert_eq!(ranked, vec![DiseaseScore::new("flu", 1.0)]);
  }

  #[test]
  fn test_discriminative_symptoms_rank_higher() {
    // "fever" is unique to flu while "cough" is shared with the cold.
    let ranked = rank_diseases(&store(), &["fever", "cough"], &RankOptions::default());
    assert_eq!(ranked[0].name, "flu");
    assert_eq!(ranked[0].score, 1.0);
    assert_eq!(ranked[1].name, "common cold");
    assert!(ranked[1].score < 1.0);
  }

  #[test]
  fn test_shared_symptoms_weigh_less() {
    // Every disease matches one symptom exactly; cough appears in two of
    // the three diseases, so it weighs less than fever.
    let store = ReferenceStore::new(
      RawTables::new()
        .disease("flu", ["fever"])
        .disease("bronchitis", ["cough"])
        .disease("whooping cough", ["cough"]),
    );
    let ranked = rank_diseases(&store, &["fever", "cough"], &RankOptions::default());

    let expected = (1.0 + (4.0f64 / 3.0).ln()) / (1.0 + 2.0f64.ln());
    let names: Vec<&str> = ranked.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["flu", "bronchitis", "whooping cough"]);
    assert_eq!(ranked[0].score, 1.0);
    assert!((ranked[1].score - expected).abs() < 1e-9);
    assert!((ranked[2].score - expected).abs() < 1e-9);
  }

  #[test]
  fn test_scores_are_non_increasing() {
    let ranked = rank_diseases(
      &store(),
      &["cough", "nausea", "sneezing", "fever"],
      &RankOptions::default(),
    );
    assert!(!ranked.is_empty());
    assert_eq!(ranked[0].score, 1.0);
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
  }

  #[test]
  fn test_typos_still_match() {
    let ranked = rank_diseases(&store(), &["headahce"], &RankOptions::default());
    assert_eq!(ranked[0].name, "migraine");
  }

  #[test]
  fn test_top_k_truncates() {
    let options = RankOptions::default().top_k(1);
    let ranked = rank_diseases(&store(), &["cough"], &options);
    assert_eq!(ranked.len(), 1);
  }

  #[test]
  fn test_degenerate_inputs() {
    let empty: [&str; 0] = [];
    assert!(rank_diseases(&store(), &empty, &RankOptions::default()).is_empty());
    assert!(rank_diseases(&store(), &["  "], &RankOptions::default()).is_empty());

    let no_diseases = ReferenceStore::new(RawTables::new());
    assert!(rank_diseases(&no_diseases, &["fever"], &RankOptions::default()).is_empty());
  }

  #[test]
  fn test_disease_without_symptoms_is_never_ranked() {
    let options = RankOptions::default().min_similarity(0.0).top_k(10);
    let ranked = rank_diseases(&store(), &["fever"], &options);
    assert!(ranked.iter().all(|d| d.name != "placeholder"));
  }
}
