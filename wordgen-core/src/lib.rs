//! Markov chain word generator.
//!
//! This crate learns which characters follow which in a word list and
//! samples new, plausible words from it:
//! - Fixed-order character n-gram frequency table
//! - Inverse-CDF sampling with a deterministic tie order
//! - Seeded generation with an injectable random source
//! - Membership checks against the training words
//! - Bundled dictionaries selected by language and word type
//!
//! ```no_run
//! use wordgen_core::config::{CorpusSource, ModelConfig};
//! use wordgen_core::dictionary::{Language, WordType};
//! use wordgen_core::model::generator::MarkovWordGenerator;
//!
//! let config = ModelConfig::new(3, CorpusSource::dictionary(Language::French, WordType::City))
//!     .with_fold_accents(true);
//! let model = MarkovWordGenerator::new(&config)?;
//! println!("{}", model.generate_word("mont"));
//! # Ok::<(), wordgen_core::error::ModelError>(())
//! ```

/// Core Markov model and generation logic.
pub mod model;

/// Model configuration (order, accent folding, corpus source).
pub mod config;

/// Bundled dictionary selection.
pub mod dictionary;

/// Error types.
pub mod error;

/// I/O utilities (file loading).
///
/// Not exposed
pub(crate) mod io;
