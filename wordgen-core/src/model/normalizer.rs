use super::symbol::Symbol;

/// Transliteration step applied to lowercased text when accent folding is on.
pub type Transliterator = fn(&str) -> String;

/// Maps accented and other non-ASCII characters to their closest ASCII form.
///
/// Glyphs without a known transliteration are dropped.
/// Example: `"élève"` → `"eleve"`
pub fn fold_accents(text: &str) -> String {
	deunicode::deunicode_with_tofu(text, "")
}

/// Turns raw training lines into symbol sequences ready for windowing.
///
/// A single `Normalizer` is stored in the model and used both when the table
/// is built and when words are looked up, so both sides always agree on
/// whether accents are folded.
///
/// # Rules
/// - Lowercase the text
/// - Fold accents if a transliterator is configured
/// - Remove every `.`
/// - Prepend `Start`, replace the line terminator by `End`
#[derive(Clone, Copy, Debug, Default)]
pub struct Normalizer {
	transliterator: Option<Transliterator>,
}

impl Normalizer {
	/// Creates a normalizer, folding accents with [`fold_accents`] if asked.
	pub fn new(fold: bool) -> Self {
		Self { transliterator: if fold { Some(fold_accents as Transliterator) } else { None } }
	}

	/// Creates a normalizer with a custom transliteration function.
	pub fn with_transliterator(transliterator: Transliterator) -> Self {
		Self { transliterator: Some(transliterator) }
	}

	/// Whether a transliteration step runs after lowercasing.
	pub fn folds_accents(&self) -> bool {
		self.transliterator.is_some()
	}

	/// Lowercases then transliterates a piece of text.
	///
	/// Transliterations may contain capitals (`北京` gives `Bei Jing`), so the
	/// folded text is lowercased again.
	fn fold_text(&self, text: &str) -> String {
		let lower = text.to_lowercase();
		match self.transliterator {
			Some(transliterate) => transliterate(&lower).to_lowercase(),
			None => lower,
		}
	}

	/// Normalizes a training line into `Start`, characters, `End`.
	///
	/// The line may still carry its `\n` (or `\r\n`) terminator; a line without
	/// one gets an `End` all the same.
	pub fn normalize(&self, line: &str) -> Vec<Symbol> {
		let line = line.strip_suffix('\n').unwrap_or(line);
		let line = line.strip_suffix('\r').unwrap_or(line);

		let mut symbols = Vec::with_capacity(line.len() + 2);
		symbols.push(Symbol::Start);
		symbols.extend(self.fold_text(line).chars().filter(|c| *c != '.').map(Symbol::Char));
		symbols.push(Symbol::End);
		symbols
	}

	/// Re-applies normalization to an existing symbol sequence.
	///
	/// Characters are lowercased, folded and stripped of dots again, and the
	/// result always has exactly one leading `Start` and one trailing `End`.
	/// Running it on the output of [`Normalizer::normalize`] is a no-op.
	pub fn normalize_symbols(&self, symbols: &[Symbol]) -> Vec<Symbol> {
		let text: String = symbols.iter().filter_map(Symbol::as_char).collect();
		self.normalize(&text)
	}

	/// Normalizes a word for membership comparison.
	///
	/// Surrounding whitespace is trimmed, the word is lowercased and folded.
	/// Dots are kept: lookups compare whole dictionary entries.
	pub fn normalize_word(&self, word: &str) -> String {
		self.fold_text(word.trim())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::symbol::{display_symbols, parse_symbols};

	#[test]
	fn normalize_adds_markers_and_lowercases() {
		let normalizer = Normalizer::new(false);
		assert_eq!(display_symbols(&normalizer.normalize("Cat\n")), "^cat$");
		assert_eq!(display_symbols(&normalizer.normalize("Cat")), "^cat$");
		assert_eq!(display_symbols(&normalizer.normalize("Cat\r\n")), "^cat$");
	}

	#[test]
	fn normalize_strips_dots() {
		let normalizer = Normalizer::new(false);
		assert_eq!(display_symbols(&normalizer.normalize("St. Louis\n")), "^st louis$");
	}

	#[test]
	fn normalize_folds_accents_when_enabled() {
		let folded = Normalizer::new(true).normalize("Élève\n");
		let kept = Normalizer::new(false).normalize("Élève\n");
		assert_eq!(display_symbols(&folded), "^eleve$");
		assert_eq!(display_symbols(&kept), "^élève$");
	}

	#[test]
	fn custom_transliterator_is_used() {
		fn o_for_a(text: &str) -> String {
			text.replace('a', "o")
		}
		let normalizer = Normalizer::with_transliterator(o_for_a);
		assert!(normalizer.folds_accents());
		assert_eq!(display_symbols(&normalizer.normalize("cat")), "^cot$");
	}

	#[test]
	fn normalize_symbols_does_not_double_markers() {
		let normalizer = Normalizer::new(true);
		let once = normalizer.normalize("Crème.Brûlée\n");
		let twice = normalizer.normalize_symbols(&once);
		assert_eq!(once, twice);
		assert_eq!(twice.iter().filter(|s| **s == Symbol::Start).count(), 1);
		assert_eq!(twice.iter().filter(|s| **s == Symbol::End).count(), 1);
	}

	#[test]
	fn folded_non_latin_line_is_lowercase_and_stable() {
		let normalizer = Normalizer::new(true);
		let once = normalizer.normalize("北京\n");
		assert!(once.iter().filter_map(Symbol::as_char).all(|c| !c.is_uppercase()));
		assert_eq!(normalizer.normalize_symbols(&once), once);
		let word = normalizer.normalize_word("北京");
		assert!(!word.is_empty());
		assert_eq!(word, word.to_lowercase());
	}

	#[test]
	fn normalize_symbols_adds_missing_markers() {
		let normalizer = Normalizer::new(false);
		let raw = vec![Symbol::Char('D'), Symbol::Char('o'), Symbol::Char('g')];
		assert_eq!(normalizer.normalize_symbols(&raw), parse_symbols("^dog$"));
	}

	#[test]
	fn empty_line_is_only_markers() {
		let normalizer = Normalizer::new(false);
		assert_eq!(normalizer.normalize("\n"), vec![Symbol::Start, Symbol::End]);
	}

	#[test]
	fn normalize_word_trims_and_folds() {
		assert_eq!(Normalizer::new(true).normalize_word("  Zoë \n"), "zoe");
		assert_eq!(Normalizer::new(false).normalize_word("  Zoë \n"), "zoë");
	}
}
