use std::collections::HashMap;

use rand::Rng;

use serde::ser::{Serialize, Serializer};

/// Successor distribution of a single predecessor token.
///
/// Conceptually, this is the set of outgoing edges of one node in the
/// Markov chain, each edge weighted by the number of times it was observed.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences while the chain is built
/// - Pick a successor with probability proportional to its count
///
/// ## Invariants
/// - Each occurrence count is strictly positive
/// - Entries keep their first-insertion order, so that a fixed random
///   source always walks them in the same order
#[derive(Clone, Debug, Default)]
pub struct SuccessorDistribution {
	/// Successors in first-insertion order, with their occurrence count.
	/// Example: [("vois", 2), ("dis", 1)]
	entries: Vec<(String, usize)>,
	/// Position of each successor inside `entries`.
	index: HashMap<String, usize>,
}

impl SuccessorDistribution {
	/// Creates a new empty distribution.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records an occurrence of `successor`.
	///
	/// - If the successor is already known, its count is increased.
	/// - Otherwise it is appended with a count of 1.
	pub(crate) fn add_transition(&mut self, successor: &str) {
		match self.index.get(successor) {
			Some(&position) => self.entries[position].1 += 1,
			None => {
				self.index.insert(successor.to_owned(), self.entries.len());
				self.entries.push((successor.to_owned(), 1));
			}
		}
	}

	/// Occurrence count of `successor`, if it was ever observed.
	pub fn count(&self, successor: &str) -> Option<usize> {
		self.index.get(successor).map(|&position| self.entries[position].1)
	}

	/// Sum of all occurrence counts.
	pub fn total(&self) -> usize {
		self.entries.iter().map(|(_, occurrence)| occurrence).sum()
	}

	/// Number of distinct successors.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(successor, count)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.entries.iter().map(|(token, occurrence)| (token.as_str(), *occurrence))
	}

	/// Resolves a draw in `[1, total]` to a successor.
	///
	/// Each entry's count is subtracted from `draw` in insertion order; the
	/// first entry that brings it to zero or below wins. Returns `None` when
	/// the draw is out of range.
	pub fn pick(&self, draw: usize) -> Option<&str> {
		if draw == 0 {
			return None;
		}

		let mut remaining = draw;
		for (token, occurrence) in &self.entries {
			if remaining <= *occurrence {
				return Some(token.as_str());
			}
			remaining -= occurrence;
		}

		None
	}

	/// Picks a successor using weighted random sampling.
	///
	/// The probability of selecting a token is proportional to its count.
	/// This performs an O(n) scan over the entries.
	///
	/// # Panics
	/// Panics if the distribution is empty. The chain builder never produces
	/// an empty distribution, so callers holding one from a
	/// [`TransitionModel`](super::transition_model::TransitionModel) are safe.
	pub fn select<R: Rng>(&self, rng: &mut R) -> &str {
		assert!(!self.is_empty(), "cannot select from an empty successor distribution");

		let total = self.total();
		let draw = rng.random_range(1..=total);
		match self.pick(draw) {
			Some(token) => token,
			None => unreachable!("draw {draw} is within [1, {total}]"),
		}
	}
}

/// Serialized as a map from successor to count, in insertion order.
impl Serialize for SuccessorDistribution {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_map(self.entries.iter().map(|(token, occurrence)| (token, occurrence)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn distribution(tokens: &[&str]) -> SuccessorDistribution {
		let mut distribution = SuccessorDistribution::new();
		for token in tokens {
			distribution.add_transition(token);
		}
		distribution
	}

	#[test]
	fn counts_accumulate_in_insertion_order() {
		let d = distribution(&["b", "a", "b", "c", "b"]);
		assert_eq!(d.iter().collect::<Vec<_>>(), vec![("b", 3), ("a", 1), ("c", 1)]);
		assert_eq!(d.count("b"), Some(3));
		assert_eq!(d.count("z"), None);
		assert_eq!(d.total(), 5);
		assert_eq!(d.len(), 3);
	}

	#[test]
	fn pick_subtracts_counts_until_non_positive() {
		let d = distribution(&["a", "a", "a", "b"]);
		for draw in 1..=3 {
			assert_eq!(d.pick(draw), Some("a"));
		}
		assert_eq!(d.pick(4), Some("b"));
	}

	#[test]
	fn pick_rejects_out_of_range_draws() {
		let d = distribution(&["a", "b"]);
		assert_eq!(d.pick(0), None);
		assert_eq!(d.pick(3), None);
	}

	#[test]
	fn select_follows_relative_frequencies() {
		let d = distribution(&["a", "a", "a", "b"]);
		let mut rng = StdRng::seed_from_u64(7);

		let picks_a = (0..4000).filter(|_| d.select(&mut rng) == "a").count();
		assert!((2700..3300).contains(&picks_a), "picked 'a' {picks_a} times");
	}

	#[test]
	fn select_is_reproducible_with_a_fixed_seed() {
		let d = distribution(&["un", "deux", "deux", "trois", "trois", "trois"]);
		let mut first = StdRng::seed_from_u64(42);
		let mut second = StdRng::seed_from_u64(42);

		for _ in 0..50 {
			assert_eq!(d.select(&mut first), d.select(&mut second));
		}
	}

	#[test]
	fn single_entry_is_always_selected() {
		let d = distribution(&["seul"]);
		let mut rng = StdRng::seed_from_u64(0);
		assert_eq!(d.select(&mut rng), "seul");
	}

	#[test]
	#[should_panic(expected = "empty successor distribution")]
	fn select_on_empty_distribution_panics() {
		SuccessorDistribution::new().select(&mut StdRng::seed_from_u64(0));
	}

	#[test]
	fn serializes_as_ordered_map() {
		let d = distribution(&["vois", ".", "vois"]);
		assert_eq!(serde_json::to_string(&d).unwrap(), r#"{"vois":2,".":1}"#);
	}
}
