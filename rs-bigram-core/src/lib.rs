//! Bigram-based text generation and semantic similarity library.
//!
//! This crate provides:
//! - A word-level bigram table built once from a fixed corpus
//! - A stateless generator walking the table with an injectable random source
//! - A similarity delegate interface (embeddings and text similarity) with an
//!   in-process lexical implementation and a remote HTTP client
//! - A `TextService` tying one table and one delegate together
//!
//! Low-level I/O helpers are kept internal.

/// Bigram table, random sources and generation logic.
pub mod model;

/// Similarity delegate interface and its implementations.
pub mod similarity;

/// Composition of a bigram table and a similarity delegate.
pub mod service;

/// Error types shared across the crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{CorpusError, DelegateError};
pub use model::bigram_table::BigramTable;
pub use model::generator::{generate, generate_text};
pub use model::random_source::{FirstChoice, RandomSource, SeededRandom, ThreadRandom};
pub use service::TextService;
pub use similarity::SimilarityDelegate;
