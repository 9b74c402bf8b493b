use std::fmt;

/// Character used to display the `Start` sentinel.
pub const START_CHAR: char = '^';

/// Character used to display the `End` sentinel.
pub const END_CHAR: char = '$';

/// A single element of a training word.
///
/// Training characters are wrapped in `Char`, while the two sentinels marking
/// the boundaries of a word get their own variants. A sentinel can therefore
/// never be confused with a character of the training alphabet, even when the
/// corpus itself contains `^` or `$`.
///
/// The derived ordering (`Start` < every `Char` < `End`, characters compared by
/// code point) is the tie-break order used by the sampler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
	Start,
	Char(char),
	End,
}

impl Symbol {
	/// Returns the wrapped character, or `None` for a sentinel.
	pub fn as_char(&self) -> Option<char> {
		match self {
			Symbol::Char(c) => Some(*c),
			_ => None,
		}
	}

	/// `true` for `Start` and `End`.
	pub fn is_sentinel(&self) -> bool {
		!matches!(self, Symbol::Char(_))
	}
}

impl From<char> for Symbol {
	fn from(c: char) -> Self {
		Symbol::Char(c)
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Symbol::Start => write!(f, "{}", START_CHAR),
			Symbol::Char(c) => write!(f, "{}", c),
			Symbol::End => write!(f, "{}", END_CHAR),
		}
	}
}

/// Renders a symbol sequence using `^` and `$` for the sentinels.
///
/// Only meant for logs and tests: the result is ambiguous when the training
/// alphabet itself contains those characters.
pub fn display_symbols(symbols: &[Symbol]) -> String {
	symbols.iter().map(|s| s.to_string()).collect()
}

/// Parses the `^`/`$` notation back into symbols.
///
/// A leading `^` becomes `Start` and a trailing `$` becomes `End`; every other
/// character is kept as `Char`.
pub fn parse_symbols(text: &str) -> Vec<Symbol> {
	let chars: Vec<char> = text.chars().collect();
	let last = chars.len().saturating_sub(1);
	chars
		.iter()
		.enumerate()
		.map(|(i, c)| match c {
			&START_CHAR if i == 0 => Symbol::Start,
			&END_CHAR if i == last => Symbol::End,
			c => Symbol::Char(*c),
		})
		.collect()
}

/// Collects the characters of a sequence, dropping the sentinels.
pub fn symbols_to_string(symbols: &[Symbol]) -> String {
	symbols.iter().filter_map(Symbol::as_char).collect()
}
