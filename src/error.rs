//! Error types for the loaders that sit at the Data Provider boundary.
//!
//! Scoring operations never fail; only turning external input (JSON text,
//! readers) into tables or configuration can.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HerbwiseError>;

#[derive(Error, Debug)]
pub enum HerbwiseError {
  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}
