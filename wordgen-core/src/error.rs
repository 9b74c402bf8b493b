use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::dictionary::{Language, WordType};

/// Invalid model configuration, detected before anything is built.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("model order must be >= 1, got {0}")]
	InvalidOrder(usize),
	#[error("unknown language '{0}'")]
	UnknownLanguage(String),
	#[error("unknown word type '{0}'")]
	UnknownWordType(String),
	#[error("no {word_type} dictionary available for language {language}")]
	UnsupportedDictionary { language: Language, word_type: WordType },
}

/// Failure to construct a model.
#[derive(Debug, Error)]
pub enum ModelError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error("corpus source unavailable: {}", .path.display())]
	SourceUnavailable {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

/// Failure of a bounded generation.
#[derive(Debug, Error)]
pub enum GenerationError {
	#[error("no end of word after {steps} steps (partial word: '{partial}')")]
	StepLimit { steps: usize, partial: String },
}
