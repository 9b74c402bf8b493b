use std::collections::HashSet;

use super::normalizer::Normalizer;

/// The training words, kept in memory for membership checks.
///
/// Entries are stored normalized (trimmed, lowercased, folded when the
/// normalizer folds accents) so a lookup is an exact comparison of two
/// normalized strings.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
	words: HashSet<String>,
}

impl Corpus {
	pub fn new<S: AsRef<str>>(lines: &[S], normalizer: &Normalizer) -> Self {
		let words = lines.iter().map(|line| normalizer.normalize_word(line.as_ref())).collect();
		Self { words }
	}

	/// Returns `true` if `word` matches a training entry once normalized.
	///
	/// The normalizer must be the one the corpus was built with.
	pub fn contains(&self, word: &str, normalizer: &Normalizer) -> bool {
		self.words.contains(&normalizer.normalize_word(word))
	}

	/// Number of distinct normalized entries.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// `true` if no entry was loaded.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}
