//! Word-level Markov chain text generation library.
//!
//! This crate builds a first-order Markov chain from a corpus of poems and
//! walks it to produce new text:
//! - Tokenization of words and punctuation
//! - Frequency-weighted successor selection
//! - Text assembly with spacing and capitalization rules
//! - Corpus file helpers
//!
//! Corpus acquisition is left to callers: the crate only ever receives text.

/// Core chain model and generation logic.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (corpus files, path helpers).
pub mod io;

pub use error::ChainError;
pub use model::generation_input::GenerationInput;
pub use model::generator::Generator;
pub use model::transition_model::TransitionModel;
