use crate::error::DelegateError;
use crate::similarity::SimilarityDelegate;

/// Default number of vector components.
pub const DEFAULT_DIMENSIONS: usize = 128;

/// Hashed bag-of-tokens embedder.
///
/// Texts are split into lowercase alphanumeric tokens, each token adds a
/// length-dependent weight to the component selected by its FNV-1a hash, and
/// the vector is L2-normalized. All components are non-negative, so the
/// cosine similarity of two embeddings lies in `[0, 1]`.
///
/// Captures lexical overlap only: two texts sharing no token score 0 unless
/// their tokens collide in the hash space.
#[derive(Debug, Clone)]
pub struct LexicalEmbedder {
	dimensions: usize,
}

impl LexicalEmbedder {
	/// Creates an embedder producing vectors of `dimensions` components.
	///
	/// `dimensions` is raised to 1 if 0 is given.
	pub fn new(dimensions: usize) -> Self {
		Self { dimensions: dimensions.max(1) }
	}

	pub fn dimensions(&self) -> usize {
		self.dimensions
	}

	fn embed_text(&self, text: &str) -> Result<Vec<f32>, DelegateError> {
		let mut vector = vec![0.0_f32; self.dimensions];
		let mut nb_tokens = 0;

		for token in text
			.split(|c: char| !c.is_alphanumeric())
			.filter(|token| !token.is_empty())
		{
			let token = token.to_lowercase();
			let weight = 1.0 + (token.chars().count() as f32).ln();
			let index = (fnv1a_hash(token.as_bytes()) % self.dimensions as u64) as usize;
			vector[index] += weight;
			nb_tokens += 1;
		}

		if nb_tokens == 0 {
			return Err(DelegateError::Processing(format!("no token found in {text:?}")));
		}

		normalize_vector(&mut vector);
		Ok(vector)
	}
}

impl Default for LexicalEmbedder {
	fn default() -> Self {
		Self::new(DEFAULT_DIMENSIONS)
	}
}

impl SimilarityDelegate for LexicalEmbedder {
	fn embed(&self, word: &str) -> Result<Vec<f32>, DelegateError> {
		self.embed_text(word)
	}

	fn similarity(&self, text1: &str, text2: &str) -> Result<f32, DelegateError> {
		let a = self.embed_text(text1)?;
		let b = self.embed_text(text2)?;
		Ok(cosine_similarity(&a, &b).clamp(0.0, 1.0))
	}
}

/// Cosine similarity of two vectors; 0 when either has no magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
	let len = a.len().min(b.len());
	if len == 0 {
		return 0.0;
	}
	let mut dot = 0.0_f32;
	let mut sum_a = 0.0_f32;
	let mut sum_b = 0.0_f32;
	for i in 0..len {
		dot += a[i] * b[i];
		sum_a += a[i] * a[i];
		sum_b += b[i] * b[i];
	}
	let denom = sum_a.sqrt() * sum_b.sqrt();
	if denom > 0.0 { dot / denom } else { 0.0 }
}

fn normalize_vector(vector: &mut [f32]) {
	let norm = vector.iter().map(|value| value * value).sum::<f32>().sqrt();
	if norm > 0.0 {
		for value in vector.iter_mut() {
			*value /= norm;
		}
	}
}

fn fnv1a_hash(bytes: &[u8]) -> u64 {
	let mut hash = 0xcbf29ce484222325_u64;
	for byte in bytes {
		hash ^= *byte as u64;
		hash = hash.wrapping_mul(0x00000100000001b3_u64);
	}
	hash
}
