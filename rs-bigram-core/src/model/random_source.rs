use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of random choices for the generator.
///
/// A successor list encodes its weights through repetition, so picking a
/// uniform index is enough to sample proportionally to observed frequency.
pub trait RandomSource {
	/// Returns an index in `0..len`.
	///
	/// Callers never pass `len == 0`.
	fn pick(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
	fn pick(&mut self, len: usize) -> usize {
		(**self).pick(len)
	}
}

/// Thread-local random source backed by `rand::rng()`.
///
/// Not `Send`: create one per call or per thread.
pub struct ThreadRandom {
	rng: rand::rngs::ThreadRng,
}

impl ThreadRandom {
	pub fn new() -> Self {
		Self { rng: rand::rng() }
	}
}

impl Default for ThreadRandom {
	fn default() -> Self {
		Self::new()
	}
}

impl RandomSource for ThreadRandom {
	fn pick(&mut self, len: usize) -> usize {
		self.rng.random_range(0..len)
	}
}

/// Reproducible random source seeded from a `u64`.
pub struct SeededRandom {
	rng: StdRng,
}

impl SeededRandom {
	pub fn new(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}
}

impl RandomSource for SeededRandom {
	fn pick(&mut self, len: usize) -> usize {
		self.rng.random_range(0..len)
	}
}

/// Always picks the first candidate.
///
/// Makes generation fully deterministic: each step follows the first
/// successor recorded for the current word.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChoice;

impl RandomSource for FirstChoice {
	fn pick(&mut self, _len: usize) -> usize {
		0
	}
}
