use std::collections::HashMap;

use log::debug;

use crate::error::ChainError;
use super::distribution::SuccessorDistribution;
use super::tokenizer::tokenize;

/// First-order Markov chain over words and punctuation tokens.
///
/// The `TransitionModel` maps every predecessor token to the distribution of
/// tokens that immediately followed it in the corpus.
///
/// # Responsibilities
/// - Build the chain from raw corpus text in a single pass
/// - Resolve the successor distribution of a token for the walker
///
/// # Invariants
/// - Keys are stored with their corpus case
/// - Every stored distribution is non-empty, with counts >= 1
/// - The model is never mutated once built
#[derive(Clone, Debug, Default)]
pub struct TransitionModel {
	/// Mapping from a predecessor token to its successors
	states: HashMap<String, SuccessorDistribution>,
}

impl TransitionModel {
	/// Builds a model from raw corpus text.
	///
	/// Every adjacent token pair of the tokenized corpus counts as one
	/// observation of the second token following the first. The first token
	/// is never a successor; the last one only becomes a key if it also
	/// appears earlier. An empty corpus yields an empty model.
	pub fn build(corpus: &str) -> Self {
		let tokens = tokenize(corpus);

		let states = tokens.windows(2).fold(
			HashMap::<String, SuccessorDistribution>::new(),
			|mut states, pair| {
				let (predecessor, successor) = (&pair[0], &pair[1]);
				match states.get_mut(predecessor) {
					Some(distribution) => distribution.add_transition(successor),
					None => {
						let mut distribution = SuccessorDistribution::new();
						distribution.add_transition(successor);
						states.insert(predecessor.clone(), distribution);
					}
				}
				states
			},
		);

		debug!("Built chain: {} tokens, {} predecessors", tokens.len(), states.len());
		Self { states }
	}

	/// Returns the distribution stored under `token`, matched exactly.
	pub fn get(&self, token: &str) -> Option<&SuccessorDistribution> {
		self.states.get(token)
	}

	/// Returns the distribution used to continue after `token`.
	///
	/// The lookup key is lowercased while stored keys keep their corpus
	/// case, so a token only resolves if its lowercase form was itself seen
	/// as a predecessor.
	///
	/// # Errors
	/// Returns [`ChainError::UnknownPredecessor`] if no such entry exists.
	pub fn successors(&self, token: &str) -> Result<&SuccessorDistribution, ChainError> {
		let key = token.to_lowercase();
		match self.states.get(&key) {
			Some(distribution) => Ok(distribution),
			None => Err(ChainError::UnknownPredecessor { token: key }),
		}
	}

	/// Iterates over all predecessor tokens, in no particular order.
	pub fn predecessors(&self) -> impl Iterator<Item = &str> {
		self.states.keys().map(String::as_str)
	}

	/// Number of distinct predecessors.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}
}
