use std::sync::Arc;

use crate::error::DelegateError;
use crate::model::bigram_table::BigramTable;
use crate::model::generator;
use crate::model::random_source::{RandomSource, ThreadRandom};
use crate::similarity::SimilarityDelegate;

/// One immutable bigram table and one similarity delegate.
///
/// Cloning is cheap (two `Arc`s), so a clone can be handed to every request
/// handler. Generation only reads the table; each call uses its own random
/// source.
#[derive(Clone)]
pub struct TextService {
	table: Arc<BigramTable>,
	delegate: Arc<dyn SimilarityDelegate>,
}

impl TextService {
	pub fn new(table: BigramTable, delegate: Arc<dyn SimilarityDelegate>) -> Self {
		Self { table: Arc::new(table), delegate }
	}

	pub fn table(&self) -> &BigramTable {
		&self.table
	}

	/// Generates text from `start_word` using a thread-local random source.
	pub fn generate_text(&self, start_word: &str, length: usize) -> String {
		self.generate_text_with(start_word, length, &mut ThreadRandom::new())
	}

	/// Generates text from `start_word` using the given random source.
	pub fn generate_text_with<R>(&self, start_word: &str, length: usize, random: &mut R) -> String
	where
		R: RandomSource + ?Sized,
	{
		generator::generate_text(&self.table, start_word, length, random)
	}

	/// Embedding of `word`, as returned by the delegate.
	pub fn embed(&self, word: &str) -> Result<Vec<f32>, DelegateError> {
		self.delegate.embed(word)
	}

	/// Similarity of two texts, as returned by the delegate.
	pub fn similarity(&self, text1: &str, text2: &str) -> Result<f32, DelegateError> {
		self.delegate.similarity(text1, text2)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::random_source::FirstChoice;

	/// Returns fixed values and records nothing.
	struct StubDelegate;

	impl SimilarityDelegate for StubDelegate {
		fn embed(&self, word: &str) -> Result<Vec<f32>, DelegateError> {
			Ok(vec![word.len() as f32, -0.5, 0.25])
		}

		fn similarity(&self, text1: &str, text2: &str) -> Result<f32, DelegateError> {
			if text1 == text2 { Ok(1.0) } else { Ok(0.123_456_78) }
		}
	}

	struct DownDelegate;

	impl SimilarityDelegate for DownDelegate {
		fn embed(&self, _word: &str) -> Result<Vec<f32>, DelegateError> {
			Err(DelegateError::Unavailable("model not loaded".to_owned()))
		}

		fn similarity(&self, _text1: &str, _text2: &str) -> Result<f32, DelegateError> {
			Err(DelegateError::Processing("cannot tokenize".to_owned()))
		}
	}

	fn service(delegate: Arc<dyn SimilarityDelegate>) -> TextService {
		TextService::new(
			BigramTable::build(["the king is powerful", "the queen is wise", "the king rules the land"]),
			delegate,
		)
	}

	#[test]
	fn delegate_values_are_passed_through() {
		let service = service(Arc::new(StubDelegate));
		assert_eq!(service.similarity("a", "a").unwrap(), 1.0);
		assert_eq!(service.similarity("a", "b").unwrap(), 0.123_456_78);
		assert_eq!(service.embed("king").unwrap(), vec![4.0, -0.5, 0.25]);
	}

	#[test]
	fn delegate_errors_are_passed_through() {
		let service = service(Arc::new(DownDelegate));
		assert_eq!(
			service.embed("king"),
			Err(DelegateError::Unavailable("model not loaded".to_owned()))
		);
		assert_eq!(
			service.similarity("a", "b"),
			Err(DelegateError::Processing("cannot tokenize".to_owned()))
		);
	}

	#[test]
	fn generation_reads_the_shared_table() {
		let service = service(Arc::new(StubDelegate));
		let clone = service.clone();
		assert_eq!(clone.generate_text_with("the", 3, &mut FirstChoice), "the king is");
		assert_eq!(service.generate_text("unknown_word", 5), "unknown_word");
		assert_eq!(service.table().successors("the").unwrap().len(), 4);
	}
}
