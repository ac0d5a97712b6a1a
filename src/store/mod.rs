//! Reference tables: raw input, shape parsing and the normalized store.

pub mod ordered;
pub mod reference;
pub mod shape;
pub mod tables;

pub use reference::{Disease, Herb, Post, ReferenceStore};
pub use shape::{normalize_symptoms, parse_string_list, parse_symptom_field, SymptomSet};
pub use tables::{RawPost, RawTables};
