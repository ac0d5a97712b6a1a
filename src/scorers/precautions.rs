use crate::options::PrecautionOptions;
use crate::store::ReferenceStore;
use crate::types::{DiseaseScore, PrecautionGroup};
use log::debug;
use std::collections::HashSet;

/// Groups precaution advice under the best-ranked diseases.
///
/// Takes the first `top_diseases` entries of `ranked` in their given order
/// and attaches up to `per_disease` precautions to each. A disease without a
/// precaution list gets an empty one. Scores pass through unchanged.
pub fn group_precautions(
  store: &ReferenceStore,
  ranked: &[DiseaseScore],
  options: &PrecautionOptions,
) -> Vec<PrecautionGroup> {
  let groups: Vec<PrecautionGroup> = ranked
    .iter()
    .take(options.top_diseases)
    .map(|disease| PrecautionGroup {
      disease: disease.name.clone(),
      score: disease.score,
      precautions: store
        .precautions(&disease.name)
        .map(|advice| advice.iter().take(options.per_disease).cloned().collect())
        .unwrap_or_default(),
    })
    .collect();

  debug!("grouped precautions for {} diseases", groups.len());
  groups
}

/// Flattens grouped precautions, dropping repeats and keeping the first
/// occurrence of each.
pub fn flatten_precautions(groups: &[PrecautionGroup]) -> Vec<String> {
  let mut seen = HashSet::new();
  groups
    .iter()
    .flat_map(|group| group.precautions.iter())
    .filter(|advice| seen.insert(advice.as_str()))
    .cloned()
    .collect()
}
