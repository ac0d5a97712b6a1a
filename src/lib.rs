//! Herbwise - symptom-driven disease ranking and herbal remedy lookup.
//!
//! Herbwise extracts known symptoms from free text with fuzzy matching,
//! ranks diseases by IDF-weighted symptom overlap, recommends herbs for the
//! resulting symptom context, and retrieves community posts that report
//! similar symptoms. All lookups run against an immutable
//! [`ReferenceStore`](store::ReferenceStore) built once from raw tables.

pub mod engine;
pub mod error;
pub mod matching;
pub mod options;
pub mod scorers;
pub mod store;
pub mod types;

pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::engine::*;
    pub use crate::error::HerbwiseError;
    pub use crate::matching::{IdentityLemmatizer, Lemmatizer, MorphyLemmatizer};
    pub use crate::options::*;
    pub use crate::store::{RawPost, RawTables, ReferenceStore};
    pub use crate::types::*;
}
