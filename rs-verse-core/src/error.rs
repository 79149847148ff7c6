//! Error types for the rs-verse-core crate.

/// Error type for all fallible operations in the rs-verse-core crate.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
	/// Returned when the walk reaches a token that never preceded anything
	/// in the corpus. Holds the lowercased lookup key.
	#[error("unknown predecessor '{token}': no transition recorded for it")]
	UnknownPredecessor {
		/// The lowercased key that was looked up.
		token: String,
	},

	/// Returned when a generation length of zero is requested.
	#[error("length must be >= 1, got {length}")]
	InvalidLength {
		/// The invalid length value.
		length: usize,
	},

	/// Returned when the start token is empty.
	#[error("start token cannot be empty")]
	EmptyStartToken,

	/// Returned when a corpus file cannot be read.
	#[error("failed to read corpus: {0}")]
	Io(#[from] std::io::Error),
}
