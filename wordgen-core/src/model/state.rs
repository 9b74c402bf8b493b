use std::collections::HashMap;

use super::symbol::Symbol;

/// All windows of the table sharing the same context.
///
/// A `State` corresponds to a fixed `N`-symbol context and stores every
/// symbol observed right after it, with its number of occurrences. Each
/// `(context, next)` pair is one window of the frequency table.
///
/// ## Invariants
/// - Each transition occurrence count is strictly positive
/// - Counts only grow (by one while learning, by summation while merging)
#[derive(Clone, Debug, Default)]
pub(crate) struct State {
	/// Outgoing transitions indexed by the next symbol.
	/// Example: { 'e' => 42, 'a' => 3, End => 7 }
	transitions: HashMap<Symbol, usize>,
}

impl State {
	/// Records one occurrence of `next` after this context.
	pub(crate) fn add_transition(&mut self, next: Symbol) {
		*self.transitions.entry(next).or_insert(0) += 1;
	}

	/// Number of times `next` was observed after this context.
	pub(crate) fn count(&self, next: Symbol) -> usize {
		self.transitions.get(&next).copied().unwrap_or(0)
	}

	pub(crate) fn transitions(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
		self.transitions.iter().map(|(next, occurrence)| (*next, *occurrence))
	}

	pub(crate) fn len(&self) -> usize {
		self.transitions.len()
	}

	/// Sum of all occurrence counts of this context.
	pub(crate) fn total(&self) -> usize {
		self.transitions.values().sum()
	}

	/// Merges the transitions of another state for the same context.
	///
	/// Occurrence counts are summed. Used to combine partial tables built on
	/// separate threads.
	pub(crate) fn merge(&mut self, other: &Self) {
		for (next, occurrence) in &other.transitions {
			*self.transitions.entry(*next).or_insert(0) += *occurrence;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transitions_accumulate() {
		let mut state = State::default();
		state.add_transition(Symbol::Char('a'));
		state.add_transition(Symbol::Char('a'));
		state.add_transition(Symbol::End);

		assert_eq!(state.count(Symbol::Char('a')), 2);
		assert_eq!(state.count(Symbol::End), 1);
		assert_eq!(state.count(Symbol::Char('z')), 0);
		assert_eq!(state.len(), 2);
		assert_eq!(state.total(), 3);
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = State::default();
		left.add_transition(Symbol::Char('t'));
		let mut right = State::default();
		right.add_transition(Symbol::Char('t'));
		right.add_transition(Symbol::Char('r'));

		left.merge(&right);
		assert_eq!(left.count(Symbol::Char('t')), 2);
		assert_eq!(left.count(Symbol::Char('r')), 1);
	}
}
