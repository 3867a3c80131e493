//! Domain types and pure logic for character pack generation.
//!
//! Nothing in this crate performs I/O. Provider clients, persistence and
//! the HTTP layer live in sibling crates and build on these types.

pub mod catalog;
pub mod error;
pub mod generation;
pub mod image_urls;
pub mod metadata;
pub mod pack;
pub mod prompts;
pub mod types;
