use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use log::debug;

use super::state::State;
use super::symbol::Symbol;
use crate::error::ConfigError;

/// A sequence of exactly `order + 1` symbols: `order` symbols of context
/// followed by the predicted one.
pub type Window = Box<[Symbol]>;

/// Below this number of sequences the table is built on the calling thread.
const PARALLEL_THRESHOLD: usize = 4096;

/// Frequency table of every window observed in a training corpus.
///
/// Windows are indexed by their context (the first `order` symbols), each
/// context owning a `State` with the counts of the symbols that followed it.
/// Lookups by full context are O(1); shorter prefixes scan the contexts.
///
/// # Responsibilities
/// - Slide a window of `order + 1` symbols over each normalized sequence
/// - Count every window, including those touching `Start` and `End`
/// - Answer prefix ("starts with") queries for the sampler
///
/// # Invariants
/// - `order >= 1`
/// - Every window has exactly `order + 1` symbols
/// - Counts are strictly positive and never decremented
/// - Once `build` returns, the table is never mutated again
#[derive(Clone, Debug)]
pub struct FrequencyTable {
	/// Markov order (number of context symbols).
	order: usize,

	/// Mapping from a context (length `order`) to its transitions.
	states: HashMap<Box<[Symbol]>, State>,
}

impl FrequencyTable {
	/// Creates an empty table of the given order.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	fn new(order: usize) -> Result<Self, ConfigError> {
		if order < 1 {
			return Err(ConfigError::InvalidOrder(order));
		}
		Ok(Self { order, states: HashMap::new() })
	}

	/// Builds the table from normalized sequences.
	///
	/// Sequences shorter than `order + 1` contribute nothing. Large corpora
	/// are split in chunks counted on worker threads, and the partial tables
	/// are summed into the final one.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn build<S>(sequences: &[S], order: usize) -> Result<Self, ConfigError>
	where
		S: AsRef<[Symbol]> + Sync,
	{
		let mut table = Self::new(order)?;

		if sequences.len() < PARALLEL_THRESHOLD {
			for sequence in sequences {
				table.add_sequence(sequence.as_ref());
			}
		} else {
			table.build_parallel(sequences);
		}

		debug!(
			"built order-{} table: {} contexts, {} windows from {} sequences",
			order,
			table.states.len(),
			table.len(),
			sequences.len()
		);
		Ok(table)
	}

	/// Counts chunks of sequences on worker threads and merges the results.
	///
	/// - Splits input into chunks (based on CPU cores * factor)
	/// - Each thread fills a partial table
	/// - Partial tables are collected through a channel and summed
	fn build_parallel<S>(&mut self, sequences: &[S])
	where
		S: AsRef<[Symbol]> + Sync,
	{
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = sequences.len().div_ceil(chunks).max(1);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for chunk in sequences.chunks(chunk_size) {
				let tx = tx.clone();
				let order = self.order;
				scope.spawn(move || {
					let mut partial = Self { order, states: HashMap::new() };
					for sequence in chunk {
						partial.add_sequence(sequence.as_ref());
					}
					// The receiver outlives the scope, sending cannot fail
					let _ = tx.send(partial);
				});
			}
		});
		drop(tx);

		for partial in rx.iter() {
			self.merge(&partial);
		}
	}

	/// Counts every window of one normalized sequence.
	fn add_sequence(&mut self, sequence: &[Symbol]) {
		for window in sequence.windows(self.order + 1) {
			let (context, next) = window.split_at(self.order);
			self.states.entry(Box::from(context)).or_default().add_transition(next[0]);
		}
	}

	/// Sums the counts of a partial table of the same order into this one.
	fn merge(&mut self, other: &Self) {
		debug_assert_eq!(self.order, other.order);
		for (context, state) in &other.states {
			if let Some(existing) = self.states.get_mut(context) {
				existing.merge(state);
			} else {
				self.states.insert(context.clone(), state.clone());
			}
		}
	}

	/// Markov order of the table.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Length of every window (`order + 1`).
	pub fn window_len(&self) -> usize {
		self.order + 1
	}

	/// Number of distinct windows.
	pub fn len(&self) -> usize {
		self.states.values().map(State::len).sum()
	}

	/// `true` if no window was counted.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Sum of the counts of all windows.
	pub fn total_count(&self) -> usize {
		self.states.values().map(State::total).sum()
	}

	/// Occurrence count of a window, 0 if it was never observed or if its
	/// length is not `order + 1`.
	pub fn count(&self, window: &[Symbol]) -> usize {
		if window.len() != self.window_len() {
			return 0;
		}
		let (context, next) = window.split_at(self.order);
		self.states.get(context).map_or(0, |state| state.count(next[0]))
	}

	/// Iterates over every `(window, count)` pair, in no particular order.
	pub fn windows(&self) -> impl Iterator<Item = (Window, usize)> + '_ {
		self.states.iter().flat_map(|(context, state)| {
			state.transitions().map(move |(next, occurrence)| (join(context, next), occurrence))
		})
	}

	/// Returns every `(window, count)` pair whose window starts with `prefix`.
	///
	/// An empty prefix, or one longer than a window, matches nothing.
	/// The result is unordered.
	pub fn starting_with(&self, prefix: &[Symbol]) -> Vec<(Window, usize)> {
		let len = prefix.len();
		if len == 0 || len > self.window_len() {
			return Vec::new();
		}

		if len == self.window_len() {
			let occurrence = self.count(prefix);
			return if occurrence > 0 { vec![(Box::from(prefix), occurrence)] } else { Vec::new() };
		}

		if len == self.order {
			return match self.states.get(prefix) {
				Some(state) => state
					.transitions()
					.map(|(next, occurrence)| (join(prefix, next), occurrence))
					.collect(),
				None => Vec::new(),
			};
		}

		// Shorter prefix: scan the contexts
		self.states
			.iter()
			.filter(|(context, _)| context.starts_with(prefix))
			.flat_map(|(context, state)| {
				state.transitions().map(move |(next, occurrence)| (join(context, next), occurrence))
			})
			.collect()
	}
}

/// Concatenates a context and the symbol following it.
fn join(context: &[Symbol], next: Symbol) -> Window {
	let mut window = Vec::with_capacity(context.len() + 1);
	window.extend_from_slice(context);
	window.push(next);
	window.into_boxed_slice()
}
