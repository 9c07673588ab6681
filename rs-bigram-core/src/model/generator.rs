use crate::model::bigram_table::BigramTable;
use crate::model::random_source::RandomSource;

/// Generates a sequence of words by walking a bigram table.
///
/// # Parameters
/// - `table`: The read-only bigram table.
/// - `start_word`: First word of the output, whether or not it is indexed.
/// - `length`: Maximum number of words to produce.
/// - `random`: Source used to pick among the successors of each word.
///
/// # Behavior
/// - The output always starts with `start_word`.
/// - At each of the remaining `length - 1` steps, one successor of the last
///   word is picked uniformly from its list (repeated successors are picked
///   proportionally more often) and appended.
/// - Generation stops early, silently, on a word with no successor.
///
/// # Notes
/// - `length` 0 and 1 both return `[start_word]`.
/// - The table is never mutated.
pub fn generate<R>(table: &BigramTable, start_word: &str, length: usize, random: &mut R) -> Vec<String>
where
	R: RandomSource + ?Sized,
{
	let mut result = vec![start_word.to_owned()];

	for _ in 1..length {
		let next_words = match result.last().and_then(|word| table.successors(word)) {
			Some(next_words) if !next_words.is_empty() => next_words,
			_ => break,
		};
		let next_word = next_words[random.pick(next_words.len())].clone();
		result.push(next_word);
	}

	result
}

/// Same as [`generate`], with the words joined by single spaces.
pub fn generate_text<R>(table: &BigramTable, start_word: &str, length: usize, random: &mut R) -> String
where
	R: RandomSource + ?Sized,
{
	generate(table, start_word, length, random).join(" ")
}
