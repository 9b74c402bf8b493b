use log::info;

use crate::config::ModelConfig;
use crate::error::{ConfigError, GenerationError, ModelError};
use super::frequency_table::FrequencyTable;
use super::membership::Corpus;
use super::normalizer::Normalizer;
use super::random::UniformSource;
use super::sampler::{Continuation, sample_next};
use super::symbol::{Symbol, symbols_to_string};

/// Result of a single [`WordWalk::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
	/// Symbols were appended, the word is still growing.
	Continue,
	/// The word is complete.
	Terminated(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum WalkState {
	Generating,
	Terminated,
}

/// One word being generated.
///
/// The walk owns its context (`Start`, the seed, then every generated
/// symbol) and borrows the table read-only. Each step samples what follows
/// the last `min(order, len)` symbols of the context.
///
/// No length limit is enforced here: a table that never leads to `End`
/// walks forever. Use [`MarkovWordGenerator::generate_word_capped`] to bound it.
#[derive(Clone, Debug)]
pub struct WordWalk<'a> {
	table: &'a FrequencyTable,
	context: Vec<Symbol>,
	steps: usize,
	state: WalkState,
}

impl<'a> WordWalk<'a> {
	/// Starts a walk from `Start` followed by `seed`.
	///
	/// The seed is inserted verbatim, it is neither lowercased nor checked
	/// against the training alphabet.
	pub fn new(table: &'a FrequencyTable, seed: &str) -> Self {
		let mut context = Vec::with_capacity(seed.len() + 16);
		context.push(Symbol::Start);
		context.extend(seed.chars().map(Symbol::Char));
		Self { table, context, steps: 0, state: WalkState::Generating }
	}

	/// Characters of the word so far (seed included, sentinels excluded).
	pub fn word(&self) -> String {
		symbols_to_string(&self.context)
	}

	/// Number of sampling steps taken.
	pub fn steps(&self) -> usize {
		self.steps
	}

	/// `true` once the word is complete.
	pub fn is_terminated(&self) -> bool {
		self.state == WalkState::Terminated
	}

	/// Samples the next symbols and appends them.
	///
	/// The walk terminates when the sampler has no continuation, or when the
	/// returned symbols end with `End` (which is dropped). A terminated walk
	/// keeps returning its final word.
	pub fn step<S>(&mut self, source: &mut S) -> Step
	where
		S: UniformSource + ?Sized,
	{
		if self.state == WalkState::Terminated {
			return Step::Terminated(self.word());
		}

		let context_len = self.context.len().min(self.table.order());
		let prefix = &self.context[self.context.len() - context_len..];
		let continuation = sample_next(self.table, prefix, source);
		self.steps += 1;

		match continuation {
			Continuation::End => {
				self.state = WalkState::Terminated;
				Step::Terminated(self.word())
			}
			Continuation::Symbols(symbols) => {
				let ended = symbols.last() == Some(&Symbol::End);
				self.context.extend(symbols);
				if ended {
					self.context.pop();
					self.state = WalkState::Terminated;
					Step::Terminated(self.word())
				} else {
					Step::Continue
				}
			}
		}
	}
}

/// Generates words from a Markov model of the characters of a word list.
///
/// # Responsibilities
/// - Load the training words described by a `ModelConfig`
/// - Build the frequency table once, then only read it
/// - Generate words, optionally from a seed, with an injectable random source
/// - Tell whether a word belongs to the training list
///
/// The model is `Send + Sync` and never mutated after construction, so it
/// can be shared between threads without locking.
#[derive(Clone, Debug)]
pub struct MarkovWordGenerator {
	normalizer: Normalizer,
	table: FrequencyTable,
	corpus: Corpus,
}

impl MarkovWordGenerator {
	/// Validates the configuration, loads the words and builds the model.
	///
	/// # Errors
	/// - `ModelError::Config` if the order or dictionary selection is invalid
	/// - `ModelError::SourceUnavailable` if the words cannot be read
	pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
		config.validate()?;
		let lines = config.source.load()?;
		let model = Self::from_lines(&lines, config.order, Normalizer::new(config.fold_accents))?;

		info!(
			"markov model ready: order {}, {} words, {} windows, accents {}",
			config.order,
			model.corpus.len(),
			model.table.len(),
			if config.fold_accents { "folded" } else { "kept" }
		);
		Ok(model)
	}

	/// Builds a model from lines already in memory.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn from_lines<S: AsRef<str>>(
		lines: &[S],
		order: usize,
		normalizer: Normalizer,
	) -> Result<Self, ConfigError> {
		let sequences: Vec<Vec<Symbol>> =
			lines.iter().map(|line| normalizer.normalize(line.as_ref())).collect();
		let table = FrequencyTable::build(&sequences, order)?;
		let corpus = Corpus::new(lines, &normalizer);
		Ok(Self { normalizer, table, corpus })
	}

	/// Markov order of the model.
	pub fn order(&self) -> usize {
		self.table.order()
	}

	pub fn table(&self) -> &FrequencyTable {
		&self.table
	}

	pub fn normalizer(&self) -> &Normalizer {
		&self.normalizer
	}

	/// Starts a step-by-step generation.
	pub fn walk(&self, seed: &str) -> WordWalk<'_> {
		WordWalk::new(&self.table, seed)
	}

	/// Generates a word using the thread-local random generator.
	pub fn generate_word(&self, seed: &str) -> String {
		self.generate_word_with(&mut rand::rng(), seed)
	}

	/// Generates a word, drawing from `source`.
	///
	/// Returns the seed unchanged when the model has no continuation for it,
	/// and may return an empty word for an empty seed.
	pub fn generate_word_with<S>(&self, source: &mut S, seed: &str) -> String
	where
		S: UniformSource + ?Sized,
	{
		let mut walk = self.walk(seed);
		loop {
			if let Step::Terminated(word) = walk.step(source) {
				return word;
			}
		}
	}

	/// Generates a word, giving up after `max_steps` sampling steps.
	///
	/// # Errors
	/// `GenerationError::StepLimit` if the word did not end in time.
	pub fn generate_word_capped<S>(
		&self,
		source: &mut S,
		seed: &str,
		max_steps: usize,
	) -> Result<String, GenerationError>
	where
		S: UniformSource + ?Sized,
	{
		let mut walk = self.walk(seed);
		while walk.steps() < max_steps {
			if let Step::Terminated(word) = walk.step(source) {
				return Ok(word);
			}
		}
		Err(GenerationError::StepLimit { steps: walk.steps(), partial: walk.word() })
	}

	/// Generates a word that is not in the training list if possible.
	///
	/// Up to `nb_try` extra words are generated while the result already
	/// exists. The last attempt is returned even if it exists.
	pub fn generate_new_word<S>(&self, source: &mut S, seed: &str, nb_try: usize) -> String
	where
		S: UniformSource + ?Sized,
	{
		let mut word = self.generate_word_with(source, seed);
		let mut nb_try = nb_try;
		while nb_try > 0 && self.word_exists(&word) {
			word = self.generate_word_with(source, seed);
			nb_try -= 1;
		}
		word
	}

	/// Same as [`MarkovWordGenerator::generate_new_word`], with every attempt
	/// bounded to `max_steps` sampling steps.
	///
	/// # Errors
	/// `GenerationError::StepLimit` as soon as one attempt does not end in
	/// time; no further attempt is made.
	pub fn generate_new_word_capped<S>(
		&self,
		source: &mut S,
		seed: &str,
		nb_try: usize,
		max_steps: usize,
	) -> Result<String, GenerationError>
	where
		S: UniformSource + ?Sized,
	{
		let mut word = self.generate_word_capped(source, seed, max_steps)?;
		let mut nb_try = nb_try;
		while nb_try > 0 && self.word_exists(&word) {
			word = self.generate_word_capped(source, seed, max_steps)?;
			nb_try -= 1;
		}
		Ok(word)
	}

	/// Returns `true` if `word` is in the training list (case-insensitive,
	/// accent-insensitive when the model folds accents).
	pub fn word_exists(&self, word: &str) -> bool {
		self.corpus.contains(word, &self.normalizer)
	}
}
