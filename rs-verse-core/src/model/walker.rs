use rand::Rng;

use crate::error::ChainError;
use super::transition_model::TransitionModel;

/// Tokens appended without a leading space.
pub const HUGGING_PUNCTUATION: [&str; 2] = [",", "."];

/// Tokens after which the next word starts a sentence.
pub const SENTENCE_TERMINATORS: [&str; 3] = ["?", "!", "."];

/// Walks the chain from `start_token` and assembles `length` tokens.
///
/// The output starts with `start_token` exactly as given. Every following
/// token is sampled from the successors of the previous one:
/// - `,` and `.` hug the preceding word
/// - after `?`, `!` or `.` the sampled word gets a capital first letter
/// - any other token is appended after a single space
///
/// A length of 1 returns the start token without touching the model.
///
/// # Errors
/// - [`ChainError::InvalidLength`] if `length` is 0
/// - [`ChainError::UnknownPredecessor`] as soon as the lowercased previous
///   token has no successors in the model
pub fn walk<R: Rng>(
	model: &TransitionModel,
	start_token: &str,
	length: usize,
	rng: &mut R,
) -> Result<String, ChainError> {
	if length == 0 {
		return Err(ChainError::InvalidLength { length });
	}

	let mut chain = start_token.to_owned();
	let mut previous = start_token.to_owned();

	for _ in 1..length {
		let mut current = model.successors(&previous)?.select(rng).to_owned();

		if HUGGING_PUNCTUATION.contains(&current.as_str()) {
			chain.push_str(&current);
		} else {
			if SENTENCE_TERMINATORS.contains(&previous.as_str()) {
				current = capitalize(&current);
			}
			chain.push(' ');
			chain.push_str(&current);
		}

		previous = current;
	}

	Ok(chain)
}

/// Uppercases the first character of `token`, leaving the rest untouched.
///
/// Unlike title-casing, letters after an apostrophe or hyphen are kept as
/// they are and the tail is not lowercased: `l'ancre` gives `L'ancre`.
fn capitalize(token: &str) -> String {
	let mut chars = token.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
