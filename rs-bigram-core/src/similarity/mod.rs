//! Similarity delegate: the NLP capability behind embeddings and
//! text similarity.
//!
//! The crate only consumes this interface. Implementations:
//! - `LexicalEmbedder`: in-process hashed bag-of-tokens vectors
//! - `RemoteDelegate`: HTTP client for an external NLP service

use crate::error::DelegateError;

/// Deterministic in-process embedder.
pub mod lexical;

/// Blocking HTTP client for an external NLP service.
pub mod remote;

pub use lexical::LexicalEmbedder;
pub use remote::RemoteDelegate;

/// Embedding and similarity provider.
///
/// Implementations own the vector space and the similarity metric. Callers
/// pass texts through unchanged and surface results and errors unchanged.
pub trait SimilarityDelegate: Send + Sync {
	/// Returns the embedding vector of a word (or any text).
	fn embed(&self, word: &str) -> Result<Vec<f32>, DelegateError>;

	/// Returns the semantic similarity of two texts, in `[0, 1]`.
	fn similarity(&self, text1: &str, text2: &str) -> Result<f32, DelegateError>;
}
