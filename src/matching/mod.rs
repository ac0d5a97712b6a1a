//! Text matching primitives shared by the scorers.

pub mod fuzz;
pub mod lemmatizer;
pub mod tokenizer;

pub use fuzz::{extract_one, weighted_ratio, FuzzyMatch};
pub use lemmatizer::{IdentityLemmatizer, Lemmatizer, MorphyLemmatizer};
pub use tokenizer::{ngrams, tokenize};
