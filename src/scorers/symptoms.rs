use crate::matching::{extract_one, ngrams, tokenize, FuzzyMatch, Lemmatizer};
use crate::options::ExtractOptions;
use crate::store::ReferenceStore;
use crate::types::Symptom;
use log::{debug, trace};
use std::collections::{BTreeSet, HashMap};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Matched symptoms with their best score, in order of first discovery.
#[derive(Default)]
struct MatchedSymptoms {
  entries: Vec<(Symptom, f64)>,
  index: HashMap<Symptom, usize>,
}

impl MatchedSymptoms {
  /// Records a match, keeping the higher score if the symptom was already
  /// matched.
  fn record(&mut self, symptom: &str, score: f64) {
    match self.index.get(symptom) {
      Some(&at) => {
        let entry = &mut self.entries[at].1;
        if score > *entry {
          *entry = score;
        }
      }
      None => {
        self.index.insert(symptom.to_string(), self.entries.len());
        self.entries.push((symptom.to_string(), score));
      }
    }
  }

  fn into_ranked(mut self, limit: usize) -> Vec<Symptom> {
    self
      .entries
      .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    self
      .entries
      .into_iter()
      .take(limit)
      .map(|(symptom, _)| symptom)
      .collect()
  }
}

/// Lemmatizes each word, keeping the word itself when the lemmatizer has
/// no answer.
fn lemmatize_all(words: Vec<String>, lemmatizer: &dyn Lemmatizer) -> Vec<String> {
  words
    .into_iter()
    .map(|word| match lemmatizer.lemmatize(&word) {
      Some(lemma) if !lemma.is_empty() => lemma,
      _ => {
        trace!("no lemma for {word:?}, keeping it");
        word
      }
    })
    .collect()
}

#[cfg(feature = "parallel")]
fn best_matches<'a>(queries: &[String], vocabulary: &'a [Symptom]) -> Vec<Option<FuzzyMatch<'a>>> {
  queries
    .par_iter()
    .map(|query| extract_one(query, vocabulary))
    .collect()
}

#[cfg(not(feature = "parallel"))]
fn best_matches<'a>(queries: &[String], vocabulary: &'a [Symptom]) -> Vec<Option<FuzzyMatch<'a>>> {
  queries
    .iter()
    .map(|query| extract_one(query, vocabulary))
    .collect()
}

/// Extracts vocabulary symptoms from free text.
///
/// The text is tokenized and lemmatized, then every trigram and bigram is
/// matched against the vocabulary (kept at `phrase_threshold` or above),
/// followed by every single word (kept at `token_threshold` or above). A
/// symptom matched more than once keeps its best score. Results are ordered
/// by score, ties in order of discovery, and cut to `limit`.
///
/// With an empty vocabulary there is nothing to match against, and the
/// distinct lemmas themselves are returned in sorted order.
pub fn extract_symptoms(
  store: &ReferenceStore,
  lemmatizer: &dyn Lemmatizer,
  text: &str,
  options: &ExtractOptions,
) -> Vec<Symptom> {
  let lemmas = lemmatize_all(tokenize(text), lemmatizer);
  let vocabulary = store.vocabulary();

  if vocabulary.is_empty() {
    let distinct: BTreeSet<String> = lemmas.into_iter().collect();
    return distinct.into_iter().take(options.limit).collect();
  }

  let mut phrases = ngrams(&lemmas, 3);
  phrases.extend(ngrams(&lemmas, 2));

  let mut matched = MatchedSymptoms::default();

  for best in best_matches(&phrases, vocabulary).into_iter().flatten() {
    if best.score >= options.phrase_threshold {
      matched.record(best.choice, best.score);
    }
  }

  for best in best_matches(&lemmas, vocabulary).into_iter().flatten() {
    if best.score >= options.token_threshold {
      matched.record(best.choice, best.score);
    }
  }

  let symptoms = matched.into_ranked(options.limit);
  debug!(
    "extracted {} symptoms from {} words ({} phrases)",
    symptoms.len(),
    lemmas.len(),
    phrases.len()
  );
  symptoms
}
