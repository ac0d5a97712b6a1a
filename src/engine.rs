//! The predictor that ties the reference store, the lemmatizer and the
//! scoring operations together.

use crate::matching::{IdentityLemmatizer, Lemmatizer, MorphyLemmatizer};
use crate::options::{
  ExtractOptions, HerbOptions, LemmatizerKind, PostOptions, PrecautionOptions, PredictorConfig,
  RankOptions,
};
use crate::scorers;
use crate::store::{RawTables, ReferenceStore};
use crate::types::{ChatResponse, DiseaseScore, HerbScore, PostMatch, PrecautionGroup, Symptom};
use log::debug;
use std::sync::Arc;

/// Answers symptom questions against a shared reference store.
///
/// `Predictor` is the entry point of the library. It owns an immutable
/// [`ReferenceStore`], a [`Lemmatizer`] and a [`PredictorConfig`], and exposes
/// every scoring operation as a method. None of the operations mutate the
/// predictor, so one instance can serve any number of concurrent requests;
/// cloning it is cheap and shares the store.
///
/// Create a `Predictor` with [`Predictor::new`] or the [`PredictorBuilder`].
///
/// # Examples
///
/// ```rust
/// use herbwise::prelude::*;
///
/// let tables = RawTables::new()
///     .vocabulary(["fever", "cough", "headache"])
///     .disease("flu", ["fever", "cough"])
///     .disease("migraine", ["headache"])
///     .herb("elderberry", ["fever", "cough"])
///     .precaution("flu", ["rest", "drink fluids"]);
///
/// let predictor = Predictor::new(tables);
/// let response = predictor.chat("I have a fever and cough");
///
/// assert_eq!(response.normalized_symptoms, vec!["fever", "cough"]);
/// assert_eq!(response.possible_diseases, vec!["flu"]);
/// assert_eq!(response.recommended_herbs, vec!["elderberry"]);
/// assert_eq!(response.precautions, vec!["rest", "drink fluids"]);
/// ```
#[derive(Clone)]
pub struct Predictor {
  store: Arc<ReferenceStore>,
  lemmatizer: Arc<dyn Lemmatizer>,
  config: PredictorConfig,
}

impl Predictor {
  /// Builds a predictor with the default configuration.
  pub fn new(tables: RawTables) -> Self {
    PredictorBuilder::new().build(tables)
  }

  /// Creates a new `PredictorBuilder`.
  pub fn builder() -> PredictorBuilder {
    PredictorBuilder::new()
  }

  /// The reference store shared by every request.
  pub fn store(&self) -> &ReferenceStore {
    &self.store
  }

  pub fn config(&self) -> &PredictorConfig {
    &self.config
  }

  /// Extracts vocabulary symptoms from free text.
  ///
  /// See [`scorers::extract_symptoms`] for the matching rules.
  pub fn extract_symptoms(&self, text: &str) -> Vec<Symptom> {
    self.extract_symptoms_with(text, &self.config.extract)
  }

  pub fn extract_symptoms_with(&self, text: &str, options: &ExtractOptions) -> Vec<Symptom> {
    scorers::extract_symptoms(&self.store, self.lemmatizer.as_ref(), text, options)
  }

  /// Ranks diseases against a list of symptoms.
  ///
  /// The best disease always scores `1.0`; diseases that no input symptom
  /// plausibly matches are left out.
  pub fn predict_diseases<S: AsRef<str>>(&self, symptoms: &[S]) -> Vec<DiseaseScore> {
    self.predict_diseases_with(symptoms, &self.config.rank)
  }

  pub fn predict_diseases_with<S: AsRef<str>>(
    &self,
    symptoms: &[S],
    options: &RankOptions,
  ) -> Vec<DiseaseScore> {
    scorers::rank_diseases(&self.store, symptoms, options)
  }

  /// Recommends herbs for the named diseases and the user's symptoms.
  pub fn recommend_herbs<D, S>(&self, diseases: &[D], symptoms: &[S]) -> Vec<HerbScore>
  where
    D: AsRef<str>,
    S: AsRef<str>,
  {
    self.recommend_herbs_with(diseases, symptoms, &self.config.herbs)
  }

  pub fn recommend_herbs_with<D, S>(
    &self,
    diseases: &[D],
    symptoms: &[S],
    options: &HerbOptions,
  ) -> Vec<HerbScore>
  where
    D: AsRef<str>,
    S: AsRef<str>,
  {
    scorers::recommend_herbs(&self.store, diseases, symptoms, options)
  }

  /// Finds community posts that report similar symptoms.
  pub fn retrieve_posts<S: AsRef<str>>(&self, symptoms: &[S]) -> Vec<PostMatch> {
    self.retrieve_posts_with(symptoms, &self.config.posts)
  }

  pub fn retrieve_posts_with<S: AsRef<str>>(
    &self,
    symptoms: &[S],
    options: &PostOptions,
  ) -> Vec<PostMatch> {
    scorers::retrieve_posts(&self.store, symptoms, options)
  }

  /// Groups precautions under already-ranked diseases.
  pub fn precautions_grouped(&self, ranked: &[DiseaseScore]) -> Vec<PrecautionGroup> {
    self.precautions_grouped_with(ranked, &self.config.precautions)
  }

  pub fn precautions_grouped_with(
    &self,
    ranked: &[DiseaseScore],
    options: &PrecautionOptions,
  ) -> Vec<PrecautionGroup> {
    scorers::group_precautions(&self.store, ranked, options)
  }

  /// Answers a free-text message.
  ///
  /// Runs the whole pipeline in data-dependency order:
  ///
  /// 1. extract symptoms from `text`,
  /// 2. rank diseases against them,
  /// 3. recommend herbs for the ranked diseases and the extracted symptoms,
  /// 4. group precautions under the ranked diseases,
  /// 5. retrieve posts reporting the same symptoms.
  ///
  /// The response carries the scored results along with names-only copies
  /// for older clients.
  pub fn chat(&self, text: &str) -> ChatResponse {
    let symptoms = self.extract_symptoms(text);
    let diseases = self.predict_diseases(&symptoms);
    let disease_names: Vec<String> = diseases.iter().map(|d| d.name.clone()).collect();
    let herbs = self.recommend_herbs(&disease_names, &symptoms);
    let precautions = self.precautions_grouped(&diseases);
    let posts = self.retrieve_posts(&symptoms);

    debug!(
      "chat: {} symptoms, {} diseases, {} herbs, {} posts",
      symptoms.len(),
      diseases.len(),
      herbs.len(),
      posts.len()
    );

    ChatResponse {
      possible_diseases: disease_names,
      recommended_herbs: herbs.iter().map(|h| h.name.clone()).collect(),
      precautions: scorers::flatten_precautions(&precautions),
      normalized_symptoms: symptoms,
      possible_diseases_scored: diseases,
      recommended_herbs_scored: herbs,
      precautions_by_disease: precautions,
      posts_scored: posts,
    }
  }

  /// Recommends herbs for a single disease, with no user symptoms.
  ///
  /// If the exact name gives nothing, the first disease whose name matches
  /// case-insensitively is tried instead. Names that only appear in herb
  /// lists have no symptoms to score; [`Predictor::linked_herbs`] covers
  /// those.
  pub fn herbs_for_disease(&self, disease: &str) -> Vec<HerbScore> {
    let none: [&str; 0] = [];
    let herbs = self.recommend_herbs(&[disease], &none);
    if !herbs.is_empty() {
      return herbs;
    }

    match self.store.disease_ignore_case(disease) {
      Some(found) if found.name != disease => self.recommend_herbs(&[found.name.as_str()], &none),
      _ => herbs,
    }
  }

  /// The precaution list of a disease, matching its name exactly first and
  /// then case-insensitively. Unknown diseases have no precautions.
  pub fn precautions_for_disease(&self, disease: &str) -> Vec<String> {
    self
      .store
      .precautions(disease)
      .or_else(|| {
        self
          .store
          .precaution_key_ignore_case(disease)
          .and_then(|key| self.store.precautions(key))
      })
      .map(<[String]>::to_vec)
      .unwrap_or_default()
  }

  /// Herbs whose symptom list names `disease` directly.
  ///
  /// Some herb lists mix disease names in with symptoms; this exposes that
  /// association as recorded, without any scoring.
  pub fn linked_herbs(&self, disease: &str) -> Vec<String> {
    self.store.herbs_listing(disease).to_vec()
  }
}

/// A builder for creating `Predictor` instances.
///
/// # Examples
///
/// ```
/// use herbwise::prelude::*;
///
/// let config = PredictorConfig::default()
///     .rank(RankOptions::default().top_k(3))
///     .lemmatizer(LemmatizerKind::Identity);
///
/// let predictor = Predictor::builder()
///     .config(config)
///     .build(RawTables::new().disease("flu", ["fever"]));
///
/// assert_eq!(predictor.config().rank.top_k, 3);
/// assert_eq!(predictor.predict_diseases(&["fever"])[0].name, "flu");
/// ```
#[derive(Default)]
pub struct PredictorBuilder {
  config: PredictorConfig,
  lemmatizer: Option<Arc<dyn Lemmatizer>>,
}

impl PredictorBuilder {
  /// Creates a new builder with the default configuration.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the configuration.
  pub fn config(mut self, config: PredictorConfig) -> Self {
    self.config = config;
    self
  }

  /// Uses a custom lemmatizer instead of the one named by the
  /// configuration.
  pub fn lemmatizer<L: Lemmatizer + 'static>(mut self, lemmatizer: L) -> Self {
    self.lemmatizer = Some(Arc::new(lemmatizer));
    self
  }

  /// Builds the reference store from `tables` and returns the predictor.
  pub fn build(self, tables: RawTables) -> Predictor {
    self.build_with_store(Arc::new(ReferenceStore::new(tables)))
  }

  /// Returns a predictor over an existing, possibly shared, store.
  pub fn build_with_store(self, store: Arc<ReferenceStore>) -> Predictor {
    let lemmatizer: Arc<dyn Lemmatizer> = match (self.lemmatizer, self.config.lemmatizer) {
      (Some(lemmatizer), _) => lemmatizer,
      (None, LemmatizerKind::Morphy) => {
        let morphy = MorphyLemmatizer::from_vocabulary(store.vocabulary());
        debug!("morphy lemmatizer lexicon: {} words", morphy.lexicon_len());
        Arc::new(morphy)
      }
      (None, LemmatizerKind::Identity) => Arc::new(IdentityLemmatizer),
    };

    Predictor {
      store,
      lemmatizer,
      config: self.config,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::RawPost;

  fn tables() -> RawTables {
    RawTables::new()
      .vocabulary(["fever", "cough", "headache", "nausea", "chill"])
      .disease("Flu", ["fever", "cough", "chill"])
      .disease("migraine", ["headache", "nausea"])
      .herb("elderberry", ["fever", "cough"])
      .herb("ginger", ["nausea", "flu"])
      .precaution("Flu", ["rest", "drink fluids"])
      .precaution("migraine", ["dark room", "rest"])
      .post(RawPost::new("p1").title("Elderberry syrup").symptoms(["fever", "cough"]))
  }

  struct NoLemmas;

  impl Lemmatizer for NoLemmas {
    fn lemmatize(&self, _word: &str) -> Option<String> {
      None
    }
  }

  #[test]
  fn test_chat_fills_structured_and_flat_fields() {
    let predictor = Predictor::new(tables());
    let response = predictor.chat("Fevers, chills and cough");

    assert_eq!(response.normalized_symptoms, vec!["fever", "cough", "chill"]);
    assert_eq!(response.possible_diseases, vec!["Flu"]);
    assert_eq!(response.possible_diseases_scored[0].score, 1.0);
    assert_eq!(response.recommended_herbs, vec!["elderberry"]);
    assert_eq!(response.precautions_by_disease.len(), 1);
    assert_eq!(response.precautions, vec!["rest", "drink fluids"]);
    assert_eq!(response.posts_scored.len(), 1);
    assert_eq!(response.posts_scored[0].title, "Elderberry syrup");
  }

  #[test]
  fn test_chat_on_empty_text() {
    let predictor = Predictor::new(tables());
    assert_eq!(predictor.chat(""), ChatResponse::default());
  }

  #[test]
  fn test_herbs_for_disease_retries_ignoring_case() {
    let predictor = Predictor::new(tables());
    let herbs = predictor.herbs_for_disease("flu");
    assert_eq!(herbs[0].name, "elderberry");
    assert!(predictor.herbs_for_disease("unknown").is_empty());
  }

  #[test]
  fn test_herbs_for_disease_ignores_herb_list_names() {
    let tables = tables().herb("papaya leaf", ["fever", "dengue"]);
    let predictor = Predictor::new(tables);
    // Dengue only appears in an herb list, so there is nothing to score.
    assert!(predictor.herbs_for_disease("Dengue").is_empty());
    assert_eq!(predictor.linked_herbs("Dengue"), vec!["papaya leaf"]);
  }

  #[test]
  fn test_precautions_for_disease() {
    let predictor = Predictor::new(tables());
    assert_eq!(predictor.precautions_for_disease("FLU"), vec!["rest", "drink fluids"]);
    assert!(predictor.precautions_for_disease("measles").is_empty());
  }

  #[test]
  fn test_linked_herbs() {
    let predictor = Predictor::new(tables());
    assert_eq!(predictor.linked_herbs("Flu"), vec!["ginger"]);
  }

  #[test]
  fn test_custom_lemmatizer_falls_back_to_words() {
    let predictor = Predictor::builder().lemmatizer(NoLemmas).build(tables());
    assert_eq!(predictor.extract_symptoms("fever"), vec!["fever"]);
  }

  #[test]
  fn test_identity_lemmatizer_from_config() {
    let config = PredictorConfig::default().lemmatizer(LemmatizerKind::Identity);
    let predictor = Predictor::builder().config(config).build(tables());
    // Without morphology "chills" is only a fuzzy match for "chill".
    let symptoms = predictor.extract_symptoms("chills");
    assert_eq!(symptoms, vec!["chill"]);
  }

  #[test]
  fn test_clones_share_the_store() {
    let predictor = Predictor::new(tables());
    let clone = predictor.clone();
    assert!(std::ptr::eq(predictor.store(), clone.store()));
  }
}
