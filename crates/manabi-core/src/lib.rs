//! # manabi-core
//!
//! Core types for the Manabi client.
//!
//! This crate provides the foundational types shared across all Manabi crates:
//! - Entity structs mirrored from the REST API (courses, forum, learning paths, users)
//! - The paginated list envelope returned by collection endpoints
//! - Unit prerequisite ordering and learning-path reordering
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod ordering;

pub use errors::CoreError;
