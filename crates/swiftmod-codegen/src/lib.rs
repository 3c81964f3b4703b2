//! Tagged-union generation for SwiftUI view modifiers.
//!
//! This crate groups extracted modifier signatures into categories and
//! generates one Swift `enum` per category, together with the dispatch
//! code that applies an enum value to a view.
//!
//! # Example
//!
//! ```
//! use swiftmod_codegen::{generate_all, TaggedUnionGenerator};
//! use swiftmod_core::FunctionSignature;
//!
//! let generator = TaggedUnionGenerator::new();
//! let outcomes = generate_all(&generator, &[FunctionSignature::new("padding", "some View")]);
//! let unit = outcomes[0].result.as_ref().unwrap();
//! assert_eq!(unit.output_file_name, "LayoutModifier.swift");
//! ```

pub mod analyzer;
pub mod error;
pub mod generators;
pub mod options;
pub mod pipeline;

pub use analyzer::{Category, CategoryGroup, FunctionCategorizer};
pub use error::{CodegenError, Result};
pub use generators::{
    variant_tag, CodeGenerator, GeneratedUnit, PayloadRenderer, RenderedType,
    TaggedUnionGenerator, TemplateEngine,
};
pub use options::{AccessLevel, GeneratorOptions, OverloadStrategy};
pub use pipeline::{generate_all, CategoryOutcome};
