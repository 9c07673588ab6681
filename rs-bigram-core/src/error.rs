use thiserror::Error;

/// Failure reported by a [`SimilarityDelegate`](crate::similarity::SimilarityDelegate).
///
/// The core never retries and never substitutes a score: these values are
/// handed back to the caller as the delegate produced them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DelegateError {
	/// The NLP backend could not be reached.
	#[error("Similarity delegate unavailable: {0}")]
	Unavailable(String),

	/// The backend was reached but could not process the input.
	#[error("Similarity delegate failed to process input: {0}")]
	Processing(String),
}

/// Failure while loading or caching a corpus from disk.
#[derive(Error, Debug)]
pub enum CorpusError {
	#[error("Corpus I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Bigram table encoding error: {0}")]
	Encoding(#[from] postcard::Error),

	#[error("Corpus indexing worker failed: {0}")]
	Worker(String),
}
