use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::CorpusError;
use crate::io::{build_output_path, read_file};

/// Word-level bigram table.
///
/// Maps each word to the ordered list of words observed immediately after it
/// across a corpus. A successor observed `N` times appears `N` times in the
/// list, so a uniform pick over the list follows the empirical frequency.
///
/// # Responsibilities
/// - Index sentences (whitespace tokenization, no normalization)
/// - Merge tables built from consecutive corpus chunks
/// - Load a corpus file, caching the built table next to it
///
/// # Invariants
/// - Every successor list is non-empty
/// - Words are compared by exact string equality (case-sensitive)
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BigramTable {
	/// Mapping from a word to every word that followed it, in corpus order.
	successors: HashMap<String, Vec<String>>,
}

impl BigramTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a table from an ordered sequence of sentences.
	///
	/// An empty corpus yields an empty table.
	pub fn build<I, S>(corpus: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut table = Self::new();
		for sentence in corpus {
			table.add_sentence(sentence.as_ref());
		}
		table
	}

	/// Indexes one sentence.
	///
	/// For each adjacent pair of tokens, the second one is appended to the
	/// successor list of the first. Sentences with fewer than two tokens add
	/// nothing.
	pub fn add_sentence(&mut self, sentence: &str) {
		let words: Vec<&str> = sentence.split_whitespace().collect();
		for pair in words.windows(2) {
			self.successors
				.entry(pair[0].to_owned())
				.or_default()
				.push(pair[1].to_owned());
		}
	}

	/// Returns the successors recorded for `word`, or `None` if the word
	/// never preceded another word.
	pub fn successors(&self, word: &str) -> Option<&[String]> {
		self.successors.get(word).map(Vec::as_slice)
	}

	/// Number of words having at least one successor.
	pub fn len(&self) -> usize {
		self.successors.len()
	}

	/// Returns `true` if no bigram was indexed.
	pub fn is_empty(&self) -> bool {
		self.successors.is_empty()
	}

	/// Iterates over the indexed words, in no particular order.
	pub fn words(&self) -> impl Iterator<Item = &str> {
		self.successors.keys().map(String::as_str)
	}

	/// Merges another table into this one.
	///
	/// Successor lists of `other` are appended after the matching lists of
	/// `self`. Merging the tables of consecutive corpus chunks in chunk order
	/// gives the same table as indexing the whole corpus at once.
	pub fn merge(&mut self, other: &Self) {
		for (word, next_words) in &other.successors {
			self.successors
				.entry(word.clone())
				.or_default()
				.extend(next_words.iter().cloned());
		}
	}

	/// Loads a table from a corpus file (one sentence per line).
	///
	/// - If `<stem>.bin` exists next to the corpus, it is decoded with `postcard`.
	/// - Otherwise the corpus is indexed in parallel and the result is written
	///   to `<stem>.bin` for future fast loading.
	/// - A corpus whose own extension is `bin` would be its own cache: it is
	///   indexed as text and no cache is written.
	///
	/// The cache is never invalidated: delete `<stem>.bin` after editing the
	/// corpus, or the previous table keeps being loaded.
	pub fn from_file<P: AsRef<Path>>(filepath: P) -> Result<Self, CorpusError> {
		let filepath = filepath.as_ref();
		let binary_data_path = build_output_path(filepath, "bin")?;
		let table = if binary_data_path == filepath {
			debug!("{} is named like its cache, indexing without caching", filepath.display());
			Self::read_corpus_file(filepath)?
		} else if binary_data_path.exists() {
			debug!("Loading cached bigram table from {}", binary_data_path.display());
			let bytes = std::fs::read(&binary_data_path)?;
			postcard::from_bytes(&bytes)?
		} else {
			let table = Self::read_corpus_file(filepath)?;
			let bytes = postcard::to_stdvec(&table)?;
			std::fs::write(&binary_data_path, bytes)?;
			table
		};
		info!("Bigram table ready: {} words from {}", table.len(), filepath.display());
		Ok(table)
	}

	/// Reads a corpus file, indexes chunks of lines in worker threads and
	/// merges the partial tables in chunk order.
	///
	/// # Notes
	/// - Chunk count is CPU cores * factor.
	/// - Partial tables are tagged with their chunk index so the merge keeps
	///   corpus order regardless of which worker finishes first.
	fn read_corpus_file(filename: &Path) -> Result<Self, CorpusError> {
		let lines = read_file(filename)?;
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = lines.len().div_ceil(chunks).max(1);
		debug!("Indexing {} lines in chunks of {}", lines.len(), chunk_size);

		let (tx, rx) = mpsc::channel();
		let mut expected = 0;
		for (index, chunk) in lines.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();
			expected += 1;

			thread::spawn(move || {
				let partial_table = BigramTable::build(&chunk);
				// The receiver outlives every worker; a failed send only
				// happens if the loader itself is gone.
				let _ = tx.send((index, partial_table));
			});
		}
		drop(tx);

		let mut partials: Vec<Option<BigramTable>> = vec![None; expected];
		for (index, partial_table) in rx.iter() {
			partials[index] = Some(partial_table);
		}

		let mut final_table = BigramTable::new();
		for (index, partial_table) in partials.into_iter().enumerate() {
			let partial_table = partial_table
				.ok_or_else(|| CorpusError::Worker(format!("chunk {index} was not indexed")))?;
			final_table.merge(&partial_table);
		}

		Ok(final_table)
	}
}
