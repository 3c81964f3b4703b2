//! Parser for Swift type expressions.
//!
//! Type spellings extracted from modifier signatures (`CGFloat?`,
//! `Binding<Set<Int>>`, `@escaping (Bool) -> Void`) are parsed into
//! [`TypeExpr`] trees. The grammar is a small hand-written scanner over
//! delimiter depths; `nom` is only used for the token-level recognizers.
//!
//! ```
//! use swiftmod_parser::parse_type;
//!
//! let ty = parse_type("Array<Dictionary<String, Int>>").unwrap();
//! assert_eq!(ty.generic_parameters()[0].generic_parameters().len(), 2);
//! ```

mod grammar;
pub mod lexer;

pub use grammar::parse_type;

use swiftmod_core::{ParameterDescriptor, ParseError, TypeExpr};

/// Parse a parameter's type text and store the result on the descriptor.
pub fn resolve_parameter(parameter: &mut ParameterDescriptor) -> Result<&TypeExpr, ParseError> {
    let ty = parse_type(&parameter.type_text)?;
    Ok(parameter.type_expr.insert(ty))
}
