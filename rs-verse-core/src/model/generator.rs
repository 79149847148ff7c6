use std::path::Path;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ChainError;
use crate::io;
use crate::model::generation_input::GenerationInput;
use crate::model::transition_model::TransitionModel;
use crate::model::walker::walk;

/// High-level generator owning a transition model built from one or more corpora.
///
/// # Responsibilities
/// - Read corpus files and concatenate them into one text stream
/// - Build the transition model once per load
/// - Generate texts from a `GenerationInput`, seeded or not
///
/// The generator never mutates its model after construction, so a shared
/// reference can serve concurrent generations.
#[derive(Debug, Default)]
pub struct Generator {
	model: TransitionModel,
	corpus_names: Vec<String>
}

impl Generator {
	/// Creates a generator from a corpus already held in memory.
	pub fn from_corpus(corpus: &str) -> Self {
		Self {
			model: TransitionModel::build(corpus),
			corpus_names: Vec::new(),
		}
	}

	/// Creates a generator from a single corpus file.
	///
	/// # Errors
	/// Returns an error if the file cannot be read.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self, ChainError> {
		Self::from_files([filepath])
	}

	/// Creates a generator from several corpus files.
	///
	/// # Behavior
	/// - Files are read in order and joined with a single space, the same
	///   way poems are joined when a corpus is collected.
	/// - Each corpus name is derived from its file name (without extension).
	///
	/// # Errors
	/// Returns an error if any file cannot be read.
	pub fn from_files<I, P>(filepaths: I) -> Result<Self, ChainError>
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		let mut corpus = String::new();
		let mut corpus_names = Vec::new();

		for filepath in filepaths {
			let path = filepath.as_ref();
			let text = io::read_corpus(path)?;
			info!("Loaded corpus {} ({} bytes)", path.display(), text.len());

			if !corpus_names.is_empty() {
				corpus.push(' ');
			}
			corpus.push_str(&text);
			corpus_names.push(io::get_filename(path)?);
		}

		Ok(Self {
			model: TransitionModel::build(&corpus),
			corpus_names,
		})
	}

	/// Returns the names of the corpora backing the model.
	pub fn get_corpus_names(&self) -> &[String] {
		&self.corpus_names
	}

	/// Read-only access to the underlying model.
	pub fn model(&self) -> &TransitionModel {
		&self.model
	}

	/// Creates a `GenerationInput` with default values.
	pub fn make_generation_input(&self) -> GenerationInput {
		GenerationInput::default()
	}

	/// Generates a text according to `input`.
	///
	/// Uses `StdRng` seeded from `input.seed` when present, so that the same
	/// seed on the same model always yields the same text. Otherwise draws
	/// from the thread-local RNG.
	///
	/// # Errors
	/// Returns [`ChainError::UnknownPredecessor`] if the walk reaches a token
	/// with no recorded successor.
	pub fn generate(&self, input: &GenerationInput) -> Result<String, ChainError> {
		match input.seed {
			Some(seed) => self.generate_with(input, &mut StdRng::seed_from_u64(seed)),
			None => self.generate_with(input, &mut rand::rng()),
		}
	}

	/// Generates a text drawing from a caller-provided random source.
	pub fn generate_with<R: Rng>(&self, input: &GenerationInput, rng: &mut R) -> Result<String, ChainError> {
		debug!("Walking {} tokens from '{}'", input.length(), input.start_token());
		walk(&self.model, input.start_token(), input.length(), rng)
	}
}
