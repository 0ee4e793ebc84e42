//! Shared functionality
//!
//! This crate supplies the pieces shared by the parserlib crates: the source reader, locations
//! and the error types.

pub mod errors;
pub mod location;
pub mod reader;
pub mod types;
