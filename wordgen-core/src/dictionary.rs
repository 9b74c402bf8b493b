use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Folder searched for dictionaries when none is configured.
pub const DEFAULT_DICTIONARY_ROOT: &str = "./dictionaries";

/// Language of a bundled dictionary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
	English,
	French,
}

/// Kind of words listed in a bundled dictionary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordType {
	Word,
	FirstName,
	City,
}

/// Every `(language, word type)` pair shipped in the dictionary folder.
const AVAILABLE: &[(Language, WordType)] = &[
	(Language::English, WordType::Word),
	(Language::English, WordType::FirstName),
	(Language::French, WordType::Word),
	(Language::French, WordType::FirstName),
	(Language::French, WordType::City),
];

impl Language {
	/// Name of the language folder (`en`, `fr`).
	pub fn code(&self) -> &'static str {
		match self {
			Language::English => "en",
			Language::French => "fr",
		}
	}
}

impl WordType {
	/// File stem of the dictionary (`word`, `first_name`, `city`).
	pub fn file_stem(&self) -> &'static str {
		match self {
			WordType::Word => "word",
			WordType::FirstName => "first_name",
			WordType::City => "city",
		}
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

impl fmt::Display for WordType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.file_stem())
	}
}

impl FromStr for Language {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"en" | "english" => Ok(Language::English),
			"fr" | "french" => Ok(Language::French),
			_ => Err(ConfigError::UnknownLanguage(s.to_owned())),
		}
	}
}

impl FromStr for WordType {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().replace('-', "_").as_str() {
			"word" | "words" => Ok(WordType::Word),
			"first_name" | "firstname" | "name" => Ok(WordType::FirstName),
			"city" | "cities" => Ok(WordType::City),
			_ => Err(ConfigError::UnknownWordType(s.to_owned())),
		}
	}
}

/// Lists the dictionaries that can be selected.
pub fn available_dictionaries() -> &'static [(Language, WordType)] {
	AVAILABLE
}

/// Resolves a dictionary to its file under `root`.
///
/// Example: `(French, City)` under `./dictionaries` → `./dictionaries/fr/city.txt`
///
/// # Errors
/// Returns an error if no dictionary exists for this pair. The file itself is
/// not checked here.
pub fn dictionary_path<P: AsRef<Path>>(
	language: Language,
	word_type: WordType,
	root: P,
) -> Result<PathBuf, ConfigError> {
	if !AVAILABLE.contains(&(language, word_type)) {
		return Err(ConfigError::UnsupportedDictionary { language, word_type });
	}

	let mut path = root.as_ref().join(language.code());
	path.push(word_type.file_stem());
	path.set_extension("txt");
	Ok(path)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_names_and_codes() {
		assert_eq!("FR".parse::<Language>().unwrap(), Language::French);
		assert_eq!("english".parse::<Language>().unwrap(), Language::English);
		assert_eq!("first-name".parse::<WordType>().unwrap(), WordType::FirstName);
		assert!(matches!("klingon".parse::<Language>(), Err(ConfigError::UnknownLanguage(_))));
		assert!(matches!("verb".parse::<WordType>(), Err(ConfigError::UnknownWordType(_))));
	}

	#[test]
	fn resolves_available_dictionary() {
		let path = dictionary_path(Language::French, WordType::City, "dicts").unwrap();
		assert_eq!(path, Path::new("dicts").join("fr").join("city.txt"));
	}

	#[test]
	fn rejects_missing_dictionary() {
		let err = dictionary_path(Language::English, WordType::City, "dicts").unwrap_err();
		assert!(matches!(
			err,
			ConfigError::UnsupportedDictionary { language: Language::English, word_type: WordType::City }
		));
		assert_eq!(err.to_string(), "no city dictionary available for language en");
	}
}
