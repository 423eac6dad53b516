//! Text search support for SoupStore
//!
//! This crate provides:
//! - Basic tokenizer shared by indexing and matching
//! - FullTextQuery, the term parser and match predicate behind `match`
//!   queries

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod full_text;
pub mod tokenizer;

pub use full_text::{does_full_text_match, FullTextQuery};
pub use tokenizer::tokenize;
