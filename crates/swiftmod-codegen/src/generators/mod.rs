//! Code generators for modifier tagged unions.

pub mod naming;
mod render;
mod tagged_union;
mod templates;

pub use naming::{escape_identifier, overload_suffix, variant_tag};
pub use render::{PayloadRenderer, RenderedType};
pub use tagged_union::TaggedUnionGenerator;
pub use templates::TemplateEngine;

use crate::error::Result;
use crate::options::GeneratorOptions;
use swiftmod_core::FunctionSignature;

/// Common trait for code generators.
pub trait CodeGenerator {
    /// Target framework name.
    fn framework_name(&self) -> &'static str;

    /// Extension of generated files, without the dot.
    fn file_extension(&self) -> &'static str;

    fn options(&self) -> &GeneratorOptions;

    /// Generate one unit holding a tagged union over `signatures`.
    fn generate_union(
        &self,
        union_name: &str,
        signatures: &[FunctionSignature],
    ) -> Result<GeneratedUnit>;
}

/// One generated source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Full file content. Empty when generation failed.
    pub source_text: String,
    pub output_file_name: String,
    /// Number of variants in the union.
    pub item_count: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl GeneratedUnit {
    /// A unit that carries only the reason it could not be generated.
    pub fn failed(output_file_name: impl Into<String>, error: impl ToString) -> Self {
        Self {
            output_file_name: output_file_name.into(),
            errors: vec![error.to_string()],
            ..Self::default()
        }
    }

    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
    }
}
