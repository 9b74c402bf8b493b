use rand::Rng;

/// Source of uniform draws used by the sampler.
///
/// Every `rand` generator is a source, so callers can pass `rand::rng()` or
/// a seeded `StdRng`. Tests can also replay a fixed list of draws with
/// [`FixedDraws`].
pub trait UniformSource {
	/// Returns a value uniformly distributed in `[0, 1)`.
	fn next_unit(&mut self) -> f64;
}

impl<R: Rng> UniformSource for R {
	fn next_unit(&mut self) -> f64 {
		self.random::<f64>()
	}
}

/// Replays a predefined list of draws, cycling when exhausted.
///
/// An empty list always draws `0.0`, which selects the most frequent
/// candidate.
#[derive(Clone, Debug, Default)]
pub struct FixedDraws {
	draws: Vec<f64>,
	position: usize,
}

impl FixedDraws {
	pub fn new(draws: Vec<f64>) -> Self {
		Self { draws, position: 0 }
	}
}

impl UniformSource for FixedDraws {
	fn next_unit(&mut self) -> f64 {
		if self.draws.is_empty() {
			return 0.0;
		}
		let draw = self.draws[self.position % self.draws.len()];
		self.position += 1;
		draw
	}
}
