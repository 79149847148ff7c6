use crate::error::ChainError;

/// Default number of tokens in a generated text.
pub const DEFAULT_LENGTH: usize = 50;

/// Default start token.
pub const DEFAULT_START_TOKEN: &str = "Je";

/// Input parameters for one generation run.
///
/// # Responsibilities
/// - Track the requested length and start token
/// - Optionally carry a seed for reproducible runs
///
/// # Invariants
/// - `length` is always >= 1
/// - `start_token` is never empty
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	/// Number of tokens to produce, start token included.
	length: usize,

	/// First token of the output, displayed as given.
	start_token: String,

	/// Seed of the random source. `None` draws from the thread-local RNG.
	pub seed: Option<u64>,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			length: DEFAULT_LENGTH,
			start_token: DEFAULT_START_TOKEN.to_owned(),
			seed: None,
		}
	}
}

impl GenerationInput {
	/// Creates an input with a custom length and start token.
	///
	/// # Errors
	/// Returns an error if `length` is 0 or `start_token` is empty.
	pub fn new(length: usize, start_token: &str) -> Result<Self, ChainError> {
		let mut input = Self::default();
		input.set_length(length)?;
		input.set_start_token(start_token)?;
		Ok(input)
	}

	/// Returns the number of tokens to generate.
	pub fn length(&self) -> usize {
		self.length
	}

	/// Returns the start token.
	pub fn start_token(&self) -> &str {
		&self.start_token
	}

	/// Sets the number of tokens to generate.
	///
	/// # Errors
	/// Returns an error if `length` is 0.
	pub fn set_length(&mut self, length: usize) -> Result<(), ChainError> {
		if length == 0 {
			return Err(ChainError::InvalidLength { length });
		}
		self.length = length;
		Ok(())
	}

	/// Sets the start token.
	///
	/// # Errors
	/// Returns an error if the token is empty.
	pub fn set_start_token(&mut self, start_token: &str) -> Result<(), ChainError> {
		if start_token.is_empty() {
			return Err(ChainError::EmptyStartToken);
		}
		self.start_token = start_token.to_owned();
		Ok(())
	}
}
