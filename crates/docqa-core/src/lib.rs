//! Core types and traits for DocQA
//!
//! This crate defines the data model shared by query routing and answer
//! quality assessment, the lexical term extractor both of them use, and the
//! narrow interfaces of the generation and retrieval collaborators.

pub mod error;
pub mod generator;
pub mod retriever;
pub mod terms;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use generator::{GenerationConfig, GenerationResult, Generator};
pub use retriever::Retriever;
pub use terms::{extract_key_facts, extract_key_terms};
pub use types::*;
