//! Top-level module for the word chain generation system.
//!
//! This module provides a first-order Markov chain over words, including:
//! - Corpus tokenization (`tokenizer`)
//! - Weighted successor sets (`SuccessorDistribution`)
//! - The chain itself (`TransitionModel`)
//! - Text assembly (`walk`)
//! - Generation parameters (`GenerationInput`)
//! - A high-level generation interface (`Generator`)

/// High-level interface loading corpora and generating texts.
pub mod generator;

/// Generation parameters: length, start token and optional seed.
pub mod generation_input;

/// Chain builder: maps each token to the tokens that followed it.
pub mod transition_model;

/// Successor counts of a single token and weighted random selection.
pub mod distribution;

/// Corpus tokenization policy.
pub mod tokenizer;

/// Chain walker and output formatting rules.
pub mod walker;
