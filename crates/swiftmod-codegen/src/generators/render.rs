//! Rendering of parsed parameter types as enum payload types.
//!
//! A payload outlives the call it was captured from, so closure types lose
//! `@escaping` and gain `@Sendable`, opaque `some P` types become
//! existentials, and generic placeholders are replaced by their constraint.

use crate::error::{CodegenError, Result};
use crate::options::GeneratorOptions;
use swiftmod_core::{FunctionSignature, TypeExpr, ESCAPING_ATTRIBUTE};

/// Attributes that have no meaning on a stored payload.
const DROPPED_ATTRIBUTES: &[&str] = &[ESCAPING_ATTRIBUTE, "ViewBuilder"];

const SENDABLE_ATTRIBUTE: &str = "Sendable";

/// Bare existentials that never conform to `Equatable`.
const EXISTENTIAL_NAMES: &[&str] = &["Any", "AnyObject", "Error", "Any.Type", "AnyClass"];

/// A payload type ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedType {
    pub text: String,
    /// Whether `==` can compare values of this type.
    pub equatable: bool,
}

impl RenderedType {
    fn new(text: impl Into<String>, equatable: bool) -> Self {
        Self {
            text: text.into(),
            equatable,
        }
    }
}

/// Renders the parameter types of one signature.
pub struct PayloadRenderer<'a> {
    signature: &'a FunctionSignature,
    options: &'a GeneratorOptions,
    notes: Vec<String>,
}

impl<'a> PayloadRenderer<'a> {
    pub fn new(signature: &'a FunctionSignature, options: &'a GeneratorOptions) -> Self {
        Self {
            signature,
            options,
            notes: Vec::new(),
        }
    }

    /// Substitutions made so far, as human-readable notes.
    pub fn into_notes(self) -> Vec<String> {
        self.notes
    }

    /// Render a parameter type for storage in an enum case.
    ///
    /// `type_text` is the spelling `ty` was parsed from and is only used
    /// for error reporting.
    pub fn render_parameter(&mut self, type_text: &str, ty: &TypeExpr) -> Result<RenderedType> {
        if type_text.trim_start().starts_with("inout ") {
            return Err(self.unsupported(type_text, "inout parameters cannot be stored"));
        }
        self.render(type_text, ty, true)
    }

    fn render(&mut self, type_text: &str, ty: &TypeExpr, stored: bool) -> Result<RenderedType> {
        match ty {
            TypeExpr::Simple { name } => self.render_name(type_text, name),
            TypeExpr::Generic { name, parameters } => {
                let mut equatable = !self.options.is_opaque_type(name);
                let mut rendered = Vec::with_capacity(parameters.len());
                for p in parameters {
                    let r = self.render(type_text, p, stored)?;
                    equatable &= r.equatable;
                    rendered.push(r.text);
                }
                Ok(RenderedType::new(
                    format!("{}<{}>", name, rendered.join(", ")),
                    equatable,
                ))
            }
            TypeExpr::Optional { inner } => {
                let r = self.render(type_text, inner, stored)?;
                let text = if inner.is_closure() && !inner.is_optional() {
                    format!("({})?", r.text)
                } else {
                    format!("{}?", r.text)
                };
                Ok(RenderedType::new(text, r.equatable))
            }
            TypeExpr::Function {
                parameters,
                return_type,
                attributes,
                is_async,
                throws,
                ..
            } => {
                let mut attrs: Vec<&str> = attributes
                    .iter()
                    .map(String::as_str)
                    .filter(|a| !DROPPED_ATTRIBUTES.contains(a))
                    .collect();
                if stored && !attrs.contains(&SENDABLE_ATTRIBUTE) {
                    attrs.insert(0, SENDABLE_ATTRIBUTE);
                }

                let mut params = Vec::with_capacity(parameters.len());
                for p in parameters {
                    params.push(self.render(type_text, p, false)?.text);
                }
                let ret = self.render(type_text, return_type, false)?;

                let mut text = String::new();
                for attr in attrs {
                    text.push('@');
                    text.push_str(attr);
                    text.push(' ');
                }
                text.push('(');
                text.push_str(&params.join(", "));
                text.push(')');
                if *is_async {
                    text.push_str(" async");
                }
                if *throws {
                    text.push_str(" throws");
                }
                text.push_str(" -> ");
                text.push_str(&ret.text);
                Ok(RenderedType::new(text, false))
            }
        }
    }

    fn render_name(&mut self, type_text: &str, name: &str) -> Result<RenderedType> {
        if name == "Self" {
            return Err(self.unsupported(type_text, "'Self' has no meaning outside the receiver"));
        }

        if let Some(protocol) = name.strip_prefix("some ") {
            let text = format!("any {}", protocol.trim());
            self.notes.push(format!("'{}' stored as '{}'", name, text));
            return Ok(RenderedType::new(text, false));
        }

        if name.starts_with("any ") || EXISTENTIAL_NAMES.contains(&name) || name.contains('&') {
            return Ok(RenderedType::new(name, false));
        }

        if let Some(bound) = self.signature.constraint_for(name) {
            if bound.is_empty() {
                return Err(self.unsupported(
                    type_text,
                    format!("generic placeholder '{}' has no constraint", name),
                ));
            }
            let text = format!("any {}", bound);
            self.notes.push(format!(
                "generic placeholder '{}' stored as '{}'; the dispatch call may not type-check",
                name, text
            ));
            return Ok(RenderedType::new(text, false));
        }

        // Tuples never conform to Equatable.
        let equatable = !name.starts_with('(') && !self.options.is_opaque_type(name);
        Ok(RenderedType::new(name, equatable))
    }

    fn unsupported(&self, type_text: &str, reason: impl Into<String>) -> CodegenError {
        CodegenError::UnsupportedType {
            signature: self.signature.selector(),
            type_text: type_text.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiftmod_parser::parse_type;

    fn render_with(sig: &FunctionSignature, text: &str) -> Result<RenderedType> {
        let options = GeneratorOptions::default();
        let mut renderer = PayloadRenderer::new(sig, &options);
        let ty = parse_type(text).unwrap();
        renderer.render_parameter(text, &ty)
    }

    fn render(text: &str) -> RenderedType {
        render_with(&FunctionSignature::new("f", "some View"), text).unwrap()
    }

    #[test]
    fn test_plain_types_are_equatable() {
        assert_eq!(render("CGFloat?"), RenderedType::new("CGFloat?", true));
        assert_eq!(
            render("Dictionary<String, Int>"),
            RenderedType::new("Dictionary<String, Int>", true)
        );
    }

    #[test]
    fn test_escaping_closure_becomes_sendable() {
        let r = render("@escaping () -> Void");
        assert_eq!(r.text, "@Sendable () -> Void");
        assert!(!r.equatable);
    }

    #[test]
    fn test_optional_closure_keeps_parentheses() {
        assert_eq!(render("((Bool) -> Void)?").text, "(@Sendable (Bool) -> Void)?");
    }

    #[test]
    fn test_view_builder_is_dropped() {
        assert_eq!(
            render("@escaping @ViewBuilder () -> Text").text,
            "@Sendable () -> Text"
        );
        assert_eq!(
            render("@Sendable @MainActor () async -> Void").text,
            "@Sendable @MainActor () async -> Void"
        );
    }

    #[test]
    fn test_nested_closures_are_not_marked() {
        assert_eq!(
            render("(() -> Int) -> Void").text,
            "@Sendable (() -> Int) -> Void"
        );
    }

    #[test]
    fn test_opaque_and_existential_types() {
        let sig = FunctionSignature::new("f", "some View");
        let options = GeneratorOptions::default();
        let mut renderer = PayloadRenderer::new(&sig, &options);
        let ty = parse_type("some ShapeStyle").unwrap();
        let r = renderer.render_parameter("some ShapeStyle", &ty).unwrap();
        assert_eq!(r, RenderedType::new("any ShapeStyle", false));
        assert_eq!(renderer.into_notes().len(), 1);

        assert!(!render("Binding<Bool>").equatable);
        assert!(!render("AnyView").equatable);
        assert!(!render("(Int, Int)").equatable);
    }

    #[test]
    fn test_bare_existentials_are_not_equatable() {
        for text in ["Any", "AnyObject", "Error", "Any?", "Array<Any>", "Hashable & Sendable"] {
            assert!(!render(text).equatable, "{}", text);
        }
        assert!(render("AnyHashable").equatable);
    }

    #[test]
    fn test_generic_placeholder_substitution() {
        let sig = FunctionSignature::new("background", "some View").with_constraint("S: ShapeStyle");
        let r = render_with(&sig, "S").unwrap();
        assert_eq!(r, RenderedType::new("any ShapeStyle", false));

        let r = render_with(&sig, "Array<S>").unwrap();
        assert_eq!(r.text, "Array<any ShapeStyle>");
    }

    #[test]
    fn test_unsupported_types() {
        let sig = FunctionSignature::new("f", "some View").with_constraint("T");
        for text in ["T", "Self", "inout Int", "Array<Self>"] {
            match render_with(&sig, text) {
                Err(CodegenError::UnsupportedType { type_text, .. }) => assert_eq!(type_text, text),
                other => panic!("Expected UnsupportedType for {}, got {:?}", text, other),
            }
        }
    }
}
