use std::path::PathBuf;

use serde::Deserialize;

use crate::dictionary::{DEFAULT_DICTIONARY_ROOT, Language, WordType, dictionary_path};
use crate::error::{ConfigError, ModelError};
use crate::io::read_file;

/// Order used when a configuration does not set one.
pub const DEFAULT_ORDER: usize = 3;

/// Where the training words come from.
///
/// Exactly one source is chosen, so a dictionary selection and an explicit
/// file can never be given together.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorpusSource {
	/// A bundled dictionary, looked up as `<root>/<language>/<word_type>.txt`.
	Dictionary {
		language: Language,
		word_type: WordType,
		#[serde(default = "default_dictionary_root")]
		root: PathBuf,
	},
	/// A word list file, one word per line.
	File { path: PathBuf },
	/// Words already in memory.
	Lines { lines: Vec<String> },
}

fn default_dictionary_root() -> PathBuf {
	PathBuf::from(DEFAULT_DICTIONARY_ROOT)
}

fn default_order() -> usize {
	DEFAULT_ORDER
}

impl CorpusSource {
	/// Selects a bundled dictionary under the default root.
	pub fn dictionary(language: Language, word_type: WordType) -> Self {
		CorpusSource::Dictionary { language, word_type, root: default_dictionary_root() }
	}

	pub fn file<P: Into<PathBuf>>(path: P) -> Self {
		CorpusSource::File { path: path.into() }
	}

	pub fn lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		CorpusSource::Lines { lines: lines.into_iter().map(Into::into).collect() }
	}

	/// Checks the source without touching the disk.
	fn validate(&self) -> Result<(), ConfigError> {
		if let CorpusSource::Dictionary { language, word_type, root } = self {
			dictionary_path(*language, *word_type, root)?;
		}
		Ok(())
	}

	/// Materializes the training lines.
	///
	/// # Errors
	/// - `ConfigError` if the dictionary selection is invalid
	/// - `SourceUnavailable` if the file cannot be read
	pub(crate) fn load(&self) -> Result<Vec<String>, ModelError> {
		match self {
			CorpusSource::Dictionary { language, word_type, root } => {
				read_file(dictionary_path(*language, *word_type, root)?)
			}
			CorpusSource::File { path } => read_file(path),
			CorpusSource::Lines { lines } => Ok(lines.clone()),
		}
	}
}

/// Everything needed to build a model.
///
/// Can be deserialized (for instance from JSON):
/// `{"order": 3, "fold_accents": true, "source": {"kind": "dictionary", "language": "french", "word_type": "city"}}`
#[derive(Clone, Debug, Deserialize)]
pub struct ModelConfig {
	/// Markov order, number of characters of context (>= 1).
	#[serde(default = "default_order")]
	pub order: usize,

	/// Fold accents both when training and when looking words up.
	#[serde(default)]
	pub fold_accents: bool,

	pub source: CorpusSource,
}

impl ModelConfig {
	pub fn new(order: usize, source: CorpusSource) -> Self {
		Self { order, fold_accents: false, source }
	}

	pub fn with_fold_accents(mut self, fold_accents: bool) -> Self {
		self.fold_accents = fold_accents;
		self
	}

	/// Validates the whole configuration at once.
	///
	/// # Errors
	/// Returns the first problem found: an order below 1 or a dictionary that
	/// does not exist for the requested language.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.order < 1 {
			return Err(ConfigError::InvalidOrder(self.order));
		}
		self.source.validate()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_with_defaults() {
		let config: ModelConfig = serde_json::from_str(
			r#"{"source": {"kind": "dictionary", "language": "french", "word_type": "first_name"}}"#,
		)
		.unwrap();
		assert_eq!(config.order, DEFAULT_ORDER);
		assert!(!config.fold_accents);
		match config.source {
			CorpusSource::Dictionary { language, word_type, root } => {
				assert_eq!(language, Language::French);
				assert_eq!(word_type, WordType::FirstName);
				assert_eq!(root, PathBuf::from(DEFAULT_DICTIONARY_ROOT));
			}
			other => panic!("unexpected source {:?}", other),
		}
	}

	#[test]
	fn deserializes_inline_lines() {
		let config: ModelConfig = serde_json::from_str(
			r#"{"order": 1, "fold_accents": true, "source": {"kind": "lines", "lines": ["cat", "car"]}}"#,
		)
		.unwrap();
		assert_eq!(config.order, 1);
		assert!(config.fold_accents);
		assert_eq!(config.source.load().unwrap(), vec!["cat", "car"]);
	}

	#[test]
	fn rejects_unknown_source_kind() {
		let result: Result<ModelConfig, _> =
			serde_json::from_str(r#"{"source": {"kind": "database", "url": "x"}}"#);
		assert!(result.is_err());
	}

	#[test]
	fn validation_catches_bad_order_and_dictionary() {
		let config = ModelConfig::new(0, CorpusSource::lines(["cat"]));
		assert!(matches!(config.validate(), Err(ConfigError::InvalidOrder(0))));

		let config = ModelConfig::new(2, CorpusSource::dictionary(Language::English, WordType::City));
		assert!(matches!(config.validate(), Err(ConfigError::UnsupportedDictionary { .. })));

		let config = ModelConfig::new(2, CorpusSource::file("words.txt"));
		assert!(config.validate().is_ok());
	}

	#[test]
	fn missing_file_fails_to_load() {
		let source = CorpusSource::file("no/such/words.txt");
		assert!(matches!(source.load(), Err(ModelError::SourceUnavailable { .. })));
	}
}
