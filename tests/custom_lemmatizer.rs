use herbwise::prelude::*;
use std::collections::HashMap;

/// Maps clinical terms to the plain words used by the vocabulary.
struct GlossaryLemmatizer {
  glossary: HashMap<&'static str, &'static str>,
}

impl GlossaryLemmatizer {
  fn new() -> Self {
    Self {
      glossary: HashMap::from([("pyrexia", "fever"), ("tussis", "cough")]),
    }
  }
}

impl Lemmatizer for GlossaryLemmatizer {
  fn lemmatize(&self, word: &str) -> Option<String> {
    self.glossary.get(word).map(|lemma| lemma.to_string())
  }
}

fn tables() -> RawTables {
  RawTables::new()
    .vocabulary(["fever", "cough", "headache"])
    .disease("flu", ["fever", "cough"])
}

#[test]
fn test_custom_lemmatizer() {
  let predictor = Predictor::builder()
    .lemmatizer(GlossaryLemmatizer::new())
    .build(tables());

  let response = predictor.chat("pyrexia with tussis");
  assert_eq!(response.normalized_symptoms, vec!["fever", "cough"]);
  assert_eq!(response.possible_diseases, vec!["flu"]);
}

#[test]
fn test_unknown_words_pass_through() {
  let predictor = Predictor::builder()
    .lemmatizer(GlossaryLemmatizer::new())
    .build(tables());

  // "headache" is not in the glossary and is kept as written.
  assert_eq!(predictor.extract_symptoms("pyrexia headache"), vec!["fever", "headache"]);
}

#[test]
fn test_identity_lemmatizer_misses_clinical_terms() {
  let config = PredictorConfig::default().lemmatizer(LemmatizerKind::Identity);
  let predictor = Predictor::builder().config(config).build(tables());

  assert!(predictor.extract_symptoms("pyrexia").is_empty());
}
