//! Character-level Markov model of a word list.
//!
//! This module provides:
//! - Symbols and sentinels (`Symbol`)
//! - Training line normalization (`Normalizer`)
//! - The fixed-order frequency table (`FrequencyTable`)
//! - Inverse-CDF sampling over the table (`sample_next`)
//! - The word generator and its step-by-step walk (`MarkovWordGenerator`, `WordWalk`)
//! - Membership checks against the training words (`Corpus`)

/// Word generation: model construction, the sliding-window walk and the
/// bounded / retrying wrappers around it.
pub mod generator;

/// Frequency table of `order + 1` symbol windows.
///
/// Built once from normalized sequences (in parallel for large corpora),
/// read-only afterwards.
pub mod frequency_table;

/// Weighted sampling of the next symbols given a prefix.
pub mod sampler;

/// Normalization of training lines and lookup words.
pub mod normalizer;

/// In-memory training words for membership checks.
pub mod membership;

/// Injectable uniform random source.
pub mod random;

/// Symbols and the `^` / `$` notation.
pub mod symbol;

/// Transitions observed after one context.
///
/// Not exposed publicly.
mod state;
