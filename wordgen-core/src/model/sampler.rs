use std::cmp::Reverse;

use log::warn;

use super::frequency_table::{FrequencyTable, Window};
use super::random::UniformSource;
use super::symbol::Symbol;

/// Outcome of one sampling step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Continuation {
	/// The last `(order + 1) - prefix.len()` symbols of the selected window.
	/// May itself end with `Symbol::End`.
	Symbols(Vec<Symbol>),
	/// No continuation: the prefix is unknown, or the candidates are unusable.
	End,
}

/// Returns the windows starting with `prefix` together with their cumulative
/// probability.
///
/// Candidates are ordered by descending count, ties by ascending window, and
/// the running sum of counts is divided by the total count of the subset. The
/// probabilities are therefore non-decreasing and the last one is 1.0.
///
/// Returns an empty list when nothing matches or when the subset total is 0.
pub fn cumulative_distribution(table: &FrequencyTable, prefix: &[Symbol]) -> Vec<(Window, f64)> {
	let mut candidates = table.starting_with(prefix);
	candidates.sort_by(|(a_window, a_count), (b_window, b_count)| {
		Reverse(a_count).cmp(&Reverse(b_count)).then_with(|| a_window.cmp(b_window))
	});

	let total: usize = candidates.iter().map(|(_, occurrence)| occurrence).sum();
	if total == 0 {
		if !candidates.is_empty() {
			// Unreachable with counts built by the table, kept for safety
			warn!("zero total weight for {} candidates, ending word", candidates.len());
		}
		return Vec::new();
	}

	let mut running = 0;
	candidates
		.into_iter()
		.map(|(window, occurrence)| {
			running += occurrence;
			(window, running as f64 / total as f64)
		})
		.collect()
}

/// Picks what follows `prefix` by inverse-CDF sampling over the table.
///
/// A uniform draw `u` is taken from `source` and the first candidate (in the
/// order of [`cumulative_distribution`]) whose cumulative probability is
/// `>= u` is selected. Its last `(order + 1) - prefix.len()` symbols are
/// returned, usually a single one. When the prefix is shorter than the
/// context, several symbols come back at once.
///
/// Returns [`Continuation::End`] when no window starts with `prefix`. This
/// can end a word earlier than expected when the corpus is sparse.
pub fn sample_next<S>(table: &FrequencyTable, prefix: &[Symbol], source: &mut S) -> Continuation
where
	S: UniformSource + ?Sized,
{
	let distribution = cumulative_distribution(table, prefix);
	if distribution.is_empty() {
		return Continuation::End;
	}

	let remaining = table.window_len() - prefix.len();
	let u = source.next_unit();
	distribution
		.iter()
		.find(|(_, probability)| *probability >= u)
		.map(|(window, _)| Continuation::Symbols(window[window.len() - remaining..].to_vec()))
		.unwrap_or(Continuation::End)
}
