//! Word lemmatizers used before fuzzy matching.
//!
//! Lemmatization is advisory: a lemmatizer answers `None` when it has
//! nothing to say about a word, and callers keep the original word.

use std::collections::HashSet;

/// A capability that maps an inflected word to its base form.
///
/// The `Send` and `Sync` bounds allow one lemmatizer to be shared by every
/// request handled by a [`Predictor`](crate::engine::Predictor).
pub trait Lemmatizer: Send + Sync {
  /// Returns the lemma of `word`, or `None` if the word could not be
  /// lemmatized.
  fn lemmatize(&self, word: &str) -> Option<String>;
}

/// A lemmatizer that returns every word unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
  fn lemmatize(&self, word: &str) -> Option<String> {
    Some(word.to_string())
  }
}

/// Noun plural forms that no suffix rule recovers.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
  ("feet", "foot"),
  ("teeth", "tooth"),
  ("geese", "goose"),
  ("mice", "mouse"),
  ("lice", "louse"),
  ("children", "child"),
  ("women", "woman"),
  ("men", "man"),
  ("people", "person"),
  ("oxen", "ox"),
];

/// Suffix detachment rules for nouns, as `(suffix, replacement)`.
const NOUN_SUFFIXES: &[(&str, &str)] = &[
  ("s", ""),
  ("ses", "s"),
  ("xes", "x"),
  ("zes", "z"),
  ("ches", "ch"),
  ("shes", "sh"),
  ("men", "man"),
  ("ies", "y"),
];

/// A WordNet-style noun lemmatizer backed by a lexicon.
///
/// Candidate lemmas come from an irregular-form table and from suffix
/// detachment; a candidate is only accepted if the lexicon knows it, and the
/// shortest accepted candidate wins. Words the lexicon already contains are
/// candidates for themselves, so `"glasses"` becomes `"glass"` only when
/// both are known and `"glass"` is shorter.
#[derive(Debug, Clone, Default)]
pub struct MorphyLemmatizer {
  lexicon: HashSet<String>,
}

impl MorphyLemmatizer {
  /// Creates a lemmatizer whose lexicon is the given words, lowercased.
  pub fn new<I, S>(words: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Self {
      lexicon: words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect(),
    }
  }

  /// Creates a lemmatizer whose lexicon is every word of every vocabulary
  /// phrase, e.g. `"loss of appetite"` contributes `loss`, `of`, `appetite`.
  pub fn from_vocabulary<S: AsRef<str>>(vocabulary: &[S]) -> Self {
    Self::new(
      vocabulary
        .iter()
        .flat_map(|phrase| phrase.as_ref().split_whitespace()),
    )
  }

  /// Number of distinct words in the lexicon.
  pub fn lexicon_len(&self) -> usize {
    self.lexicon.len()
  }

  fn candidates(&self, word: &str) -> Vec<String> {
    let mut found = Vec::new();

    if self.lexicon.contains(word) {
      found.push(word.to_string());
    }

    for (form, lemma) in IRREGULAR_NOUNS {
      if *form == word && self.lexicon.contains(*lemma) {
        found.push(lemma.to_string());
      }
    }

    for (suffix, replacement) in NOUN_SUFFIXES {
      if let Some(stem) = word.strip_suffix(suffix) {
        if stem.is_empty() {
          continue;
        }
        let candidate = format!("{stem}{replacement}");
        if self.lexicon.contains(&candidate) {
          found.push(candidate);
        }
      }
    }

    found
  }
}

impl Lemmatizer for MorphyLemmatizer {
  fn lemmatize(&self, word: &str) -> Option<String> {
    if word.is_empty() || !word.is_ascii() {
      return None;
    }

    // min_by_key keeps the first of equally short candidates.
    let lemma = self
      .candidates(word)
      .into_iter()
      .min_by_key(|candidate| candidate.len())
      .unwrap_or_else(|| word.to_string());

    Some(lemma)
  }
}
