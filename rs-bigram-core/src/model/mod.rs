//! Top-level module for the bigram generation system.
//!
//! This module provides:
//! - The word-level bigram table (`BigramTable`)
//! - Injectable random sources (`RandomSource`)
//! - Stateless generation over a table (`generate`)

/// Word to successor-list mapping built from a corpus.
///
/// Supports sentence ingestion, chunk merging, and
/// cached loading from disk.
pub mod bigram_table;

/// Stateless text generation over a `BigramTable`.
pub mod generator;

/// Random index selection used by the generator.
///
/// Swappable so that generation can be made reproducible.
pub mod random_source;
