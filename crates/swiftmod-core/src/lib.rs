//! Core types for swiftmod.
//!
//! This crate provides the types shared by the parser and the generator:
//! - The type expression model
//! - Function signature records produced by signature extraction
//! - Error types

pub mod errors;
pub mod signature;
pub mod types;

pub use errors::*;
pub use signature::*;
pub use types::*;
