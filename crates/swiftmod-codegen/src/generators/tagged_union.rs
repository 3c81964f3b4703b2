//! Tagged-union generator.
//!
//! Emits one Swift `enum` with a case per modifier function, a dispatch
//! method that applies a case to a view, and a hand-written `==` when some
//! payloads cannot be compared.

use super::naming::{escape_identifier, is_keyword, is_valid_identifier, overload_suffix, variant_tag};
use super::render::{PayloadRenderer, RenderedType};
use super::templates::TemplateEngine;
use super::{CodeGenerator, GeneratedUnit};
use crate::error::{CodegenError, Result};
use crate::options::{AccessLevel, GeneratorOptions, OverloadStrategy};
use log::{debug, error};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use swiftmod_core::{FunctionSignature, ParameterDescriptor, ParseError};
use swiftmod_parser::parse_type;

const HEADER_TEMPLATE: &str = "unit_header";

const INDENT: &str = "    ";

/// One associated value of a case.
struct Field {
    /// Call-site argument label. `None` for positional parameters.
    label: Option<String>,
    /// Internal parameter name.
    name: String,
    /// Name bound in dispatch patterns.
    binding: String,
    ty: RenderedType,
    default_value: Option<String>,
}

impl Field {
    fn declaration(&self) -> String {
        let mut decl = match &self.label {
            Some(_) => format!("{}: {}", escape_identifier(&self.name), self.ty.text),
            None => self.ty.text.clone(),
        };
        if let Some(default) = &self.default_value {
            decl.push_str(" = ");
            decl.push_str(default);
        }
        decl
    }

    fn argument(&self) -> String {
        let binding = escape_identifier(&self.binding);
        match &self.label {
            Some(label) => format!("{}: {}", escape_identifier(label), binding),
            None => binding.into_owned(),
        }
    }
}

struct Variant<'s> {
    tag: String,
    signature: &'s FunctionSignature,
    fields: Vec<Field>,
}

impl Variant<'_> {
    fn ident(&self) -> String {
        escape_identifier(&self.tag).into_owned()
    }
}

#[derive(Serialize)]
struct HeaderData<'a> {
    file_name: &'a str,
    import_module: &'a str,
    item_count: usize,
    view_protocol: &'a str,
    dispatch_method: &'a str,
}

/// Generator for Swift tagged unions over view modifiers.
pub struct TaggedUnionGenerator<'a> {
    engine: TemplateEngine<'a>,
    options: GeneratorOptions,
}

impl<'a> TaggedUnionGenerator<'a> {
    /// Create a generator with default options.
    pub fn new() -> Self {
        Self::with_options(GeneratorOptions::default())
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        let mut engine = TemplateEngine::new();
        if let Err(e) = Self::register_templates(&mut engine) {
            error!("Failed to register templates: {}", e);
        }
        Self { engine, options }
    }

    fn register_templates(engine: &mut TemplateEngine) -> Result<()> {
        engine.register_template(
            HEADER_TEMPLATE,
            r#"//
//  {{file_name}}
//
//  Generated by swiftmod. Do not edit.
//

import {{import_module}}

/// A machine-generated tagged union of {{plural item_count "modifier"}}.
///
/// Each case mirrors one `{{view_protocol}}` modifier function. Use
/// `{{dispatch_method}}(to:)` to apply a value to a view."#,
        )
    }

    /// Generate the unit for `union_name` from a non-empty signature list.
    ///
    /// Either the whole unit is produced or an error is returned; partial
    /// output is never handed back.
    pub fn generate(
        &self,
        union_name: &str,
        signatures: &[FunctionSignature],
    ) -> Result<GeneratedUnit> {
        if signatures.is_empty() {
            return Err(CodegenError::InvalidInput(format!(
                "no signatures to generate {} from",
                union_name
            )));
        }
        if !is_valid_identifier(union_name) || is_keyword(union_name) {
            return Err(CodegenError::InvalidInput(format!(
                "'{}' is not a valid type name",
                union_name
            )));
        }

        debug!("Generating {} from {} signatures", union_name, signatures.len());

        let mut warnings = Vec::new();
        let variants = self.build_variants(union_name, signatures, &mut warnings)?;
        let output_file_name = format!("{}.{}", union_name, self.file_extension());

        let header = self
            .engine
            .render(
                HEADER_TEMPLATE,
                &HeaderData {
                    file_name: &output_file_name,
                    import_module: &self.options.import_module,
                    item_count: variants.len(),
                    view_protocol: &self.options.view_protocol,
                    dispatch_method: &self.options.dispatch_method,
                },
            )
            .map_err(|e| CodegenError::generation_failed(union_name, e.to_string()))?;

        let mut lines = vec![header.trim_end().to_string()];
        self.emit_enum(union_name, &variants, &mut lines);
        lines.push(String::new());
        self.emit_dispatch(union_name, &variants, &mut lines);

        if variants.iter().any(|v| v.fields.iter().any(|f| !f.ty.equatable)) {
            for variant in &variants {
                for field in variant.fields.iter().filter(|f| !f.ty.equatable) {
                    warnings.push(format!(
                        "{}.{}: '{}' ({}) is ignored by ==",
                        union_name, variant.tag, field.name, field.ty.text
                    ));
                }
            }
            lines.push(String::new());
            self.emit_equality(union_name, &variants, &mut lines);
        }

        let mut source_text = lines.join("\n");
        source_text.push('\n');

        Ok(GeneratedUnit {
            source_text,
            output_file_name,
            item_count: variants.len(),
            warnings,
            errors: Vec::new(),
        })
    }

    fn build_variants<'s>(
        &self,
        union_name: &str,
        signatures: &'s [FunctionSignature],
        warnings: &mut Vec<String>,
    ) -> Result<Vec<Variant<'s>>> {
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for sig in signatures {
            *occurrences.entry(sig.name.as_str()).or_default() += 1;
        }

        let mut seen = HashSet::new();
        let mut variants = Vec::with_capacity(signatures.len());
        for sig in signatures {
            let overloaded = occurrences.get(sig.name.as_str()).copied().unwrap_or(0) > 1;
            let mut variant = self.build_variant(sig, overloaded, warnings)?;
            self.assign_bindings(union_name, &mut variant)?;

            if variant.tag.is_empty() {
                return Err(CodegenError::generation_failed(
                    union_name,
                    format!("'{}' yields an empty variant tag", sig.name),
                ));
            }
            if !seen.insert(variant.tag.clone()) {
                return Err(CodegenError::generation_failed(
                    union_name,
                    format!("duplicate variant tag '{}' for {}", variant.tag, sig.selector()),
                ));
            }

            debug!("{}.{} <- {}", union_name, variant.tag, sig.selector());
            variants.push(variant);
        }

        Ok(variants)
    }

    fn build_variant<'s>(
        &self,
        sig: &'s FunctionSignature,
        overloaded: bool,
        warnings: &mut Vec<String>,
    ) -> Result<Variant<'s>> {
        parse_type(&sig.return_type).map_err(|e| unsupported(sig, &sig.return_type, e))?;

        let mut renderer = PayloadRenderer::new(sig, &self.options);
        let mut fields = Vec::with_capacity(sig.parameters.len());
        for param in &sig.parameters {
            let ty = match &param.type_expr {
                Some(ty) => Cow::Borrowed(ty),
                None => Cow::Owned(
                    parse_type(&param.type_text).map_err(|e| unsupported(sig, &param.type_text, e))?,
                ),
            };

            let depth = ty.depth();
            if depth > self.options.max_type_depth {
                warnings.push(format!(
                    "{}: type of '{}' is nested {} levels deep: {}",
                    sig.selector(),
                    param.internal_name,
                    depth,
                    param.type_text
                ));
            }

            let rendered = renderer.render_parameter(&param.type_text, &ty)?;
            fields.push(self.field(param, rendered));
        }

        for note in renderer.into_notes() {
            warnings.push(format!("{}: {}", sig.selector(), note));
        }

        let mut tag = variant_tag(&sig.name);
        if overloaded && self.options.overload_strategy == OverloadStrategy::LabelSuffix {
            tag.push_str(&overload_suffix(sig));
        }

        Ok(Variant {
            tag,
            signature: sig,
            fields,
        })
    }

    /// Give every field a distinct pattern binding that does not shadow the
    /// receiver. Clashes get a numeric suffix: `x`, `x2`, `x3`.
    fn assign_bindings(&self, union_name: &str, variant: &mut Variant) -> Result<()> {
        let receiver = self.options.receiver_name.as_str();
        let mut taken: HashSet<String> = HashSet::new();
        taken.insert(receiver.to_string());

        for field in &mut variant.fields {
            let mut base = match field.name.as_str() {
                "" | "_" => field.label.clone().unwrap_or_else(|| "value".to_string()),
                name => name.to_string(),
            };
            if base == receiver {
                base.push_str("Value");
            }
            if base == "_" || !is_valid_identifier(&base) {
                return Err(CodegenError::generation_failed(
                    union_name,
                    format!(
                        "parameter '{}' of {} has no usable binding name",
                        field.name,
                        variant.signature.selector()
                    ),
                ));
            }

            let mut binding = base.clone();
            let mut n = 2;
            while !taken.insert(binding.clone()) {
                binding = format!("{}{}", base, n);
                n += 1;
            }
            field.binding = binding;
        }

        Ok(())
    }

    fn field(&self, param: &ParameterDescriptor, ty: RenderedType) -> Field {
        Field {
            label: param.external_label.clone(),
            name: param.internal_name.clone(),
            binding: param.internal_name.clone(),
            ty,
            default_value: param
                .default_value
                .clone()
                .filter(|_| param.has_default),
        }
    }

    fn emit_enum(&self, union_name: &str, variants: &[Variant], lines: &mut Vec<String>) {
        lines.push(format!(
            "{}enum {}: Equatable, Sendable {{",
            self.options.access_level.prefix(),
            union_name
        ));

        for variant in variants {
            let sig = variant.signature;
            if let Some(doc) = &sig.documentation {
                for line in doc.lines() {
                    let line = line.trim_end();
                    if line.is_empty() {
                        lines.push(format!("{}///", INDENT));
                    } else {
                        lines.push(format!("{}/// {}", INDENT, line));
                    }
                }
            }
            if let Some(availability) = &sig.availability {
                lines.push(format!("{}/// - Availability: {}", INDENT, availability.trim()));
            }

            if variant.fields.is_empty() {
                lines.push(format!("{}case {}", INDENT, variant.ident()));
            } else {
                let decls: Vec<String> = variant.fields.iter().map(Field::declaration).collect();
                lines.push(format!("{}case {}({})", INDENT, variant.ident(), decls.join(", ")));
            }
        }

        lines.push("}".to_string());
    }

    fn emit_dispatch(&self, union_name: &str, variants: &[Variant], lines: &mut Vec<String>) {
        let options = &self.options;
        let receiver = escape_identifier(&options.receiver_name);

        lines.push(format!("extension {} {{", union_name));
        lines.push(format!("{}/// Applies this modifier to `{}`.", INDENT, receiver));
        // `@inlinable` is only legal on public declarations.
        if options.access_level == AccessLevel::Public {
            lines.push(format!("{}@inlinable", INDENT));
        }
        lines.push(format!("{}@inline(__always)", INDENT));
        lines.push(format!("{}@ViewBuilder", INDENT));
        lines.push(format!(
            "{}{}func {}<Content: {}>(to {}: Content) -> some {} {{",
            INDENT,
            options.access_level.prefix(),
            options.dispatch_method,
            options.view_protocol,
            receiver,
            options.view_protocol
        ));
        lines.push(format!("{}{}switch self {{", INDENT, INDENT));

        let arm = INDENT.repeat(3);
        for variant in variants {
            let sig = variant.signature;
            if variant.fields.is_empty() {
                lines.push(format!("{}{}case .{}:", INDENT, INDENT, variant.ident()));
            } else {
                let bindings: Vec<String> = variant
                    .fields
                    .iter()
                    .map(|f| escape_identifier(&f.binding).into_owned())
                    .collect();
                lines.push(format!(
                    "{}{}case let .{}({}):",
                    INDENT,
                    INDENT,
                    variant.ident(),
                    bindings.join(", ")
                ));
            }

            let arguments: Vec<String> = variant.fields.iter().map(Field::argument).collect();
            let call = format!("{}.{}({})", receiver, sig.name, arguments.join(", "));

            match sig.availability.as_deref().and_then(availability_condition) {
                Some(condition) => {
                    lines.push(format!("{}if #available({}) {{", arm, condition));
                    lines.push(format!("{}{}{}", arm, INDENT, call));
                    lines.push(format!("{}}} else {{", arm));
                    lines.push(format!("{}{}{}", arm, INDENT, receiver));
                    lines.push(format!("{}}}", arm));
                }
                None => lines.push(format!("{}{}", arm, call)),
            }
        }

        lines.push(format!("{}{}}}", INDENT, INDENT));
        lines.push(format!("{}}}", INDENT));
        lines.push("}".to_string());
    }

    /// `==` comparing tags and every equatable payload field.
    fn emit_equality(&self, union_name: &str, variants: &[Variant], lines: &mut Vec<String>) {
        let case_indent = INDENT.repeat(2);
        let body_indent = INDENT.repeat(3);

        lines.push(format!("extension {} {{", union_name));
        lines.push(format!(
            "{}{}static func == (lhs: {}, rhs: {}) -> Bool {{",
            INDENT,
            self.options.access_level.prefix(),
            union_name,
            union_name
        ));
        lines.push(format!("{}switch (lhs, rhs) {{", case_indent));

        for variant in variants {
            let ident = variant.ident();
            let compared: Vec<usize> = variant
                .fields
                .iter()
                .enumerate()
                .filter(|(_, f)| f.ty.equatable)
                .map(|(i, _)| i)
                .collect();

            if compared.is_empty() {
                lines.push(format!("{}case (.{}, .{}):", case_indent, ident, ident));
                lines.push(format!("{}return true", body_indent));
                continue;
            }

            let pattern = |side: &str| -> String {
                let slots: Vec<String> = variant
                    .fields
                    .iter()
                    .enumerate()
                    .map(|(i, f)| {
                        if f.ty.equatable {
                            format!("{}{}", side, i)
                        } else {
                            "_".to_string()
                        }
                    })
                    .collect();
                format!(".{}({})", ident, slots.join(", "))
            };
            let comparison: Vec<String> = compared
                .iter()
                .map(|i| format!("lhs{} == rhs{}", i, i))
                .collect();

            lines.push(format!(
                "{}case let ({}, {}):",
                case_indent,
                pattern("lhs"),
                pattern("rhs")
            ));
            lines.push(format!("{}return {}", body_indent, comparison.join(" && ")));
        }

        if variants.len() > 1 {
            lines.push(format!("{}default:", case_indent));
            lines.push(format!("{}return false", body_indent));
        }

        lines.push(format!("{}}}", case_indent));
        lines.push(format!("{}}}", INDENT));
        lines.push("}".to_string());
    }
}

impl<'a> Default for TaggedUnionGenerator<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CodeGenerator for TaggedUnionGenerator<'a> {
    fn framework_name(&self) -> &'static str {
        "SwiftUI"
    }

    fn file_extension(&self) -> &'static str {
        "swift"
    }

    fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn generate_union(
        &self,
        union_name: &str,
        signatures: &[FunctionSignature],
    ) -> Result<GeneratedUnit> {
        self.generate(union_name, signatures)
    }
}

fn unsupported(sig: &FunctionSignature, type_text: &str, err: ParseError) -> CodegenError {
    CodegenError::UnsupportedType {
        signature: sig.selector(),
        type_text: type_text.to_string(),
        reason: err.to_string(),
    }
}

/// Condition for `#available`, or `None` when the annotation is not a plain
/// platform list (`deprecated`, `renamed:` and similar only document).
fn availability_condition(text: &str) -> Option<String> {
    let mut text = text.trim();
    if let Some(inner) = text
        .strip_prefix("@available(")
        .and_then(|t| t.strip_suffix(')'))
    {
        text = inner.trim();
    }
    if text.is_empty()
        || text.contains(':')
        || text.contains("deprecated")
        || text.contains("unavailable")
    {
        return None;
    }

    let mut platforms: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if !platforms.contains(&"*") {
        platforms.push("*");
    }
    Some(platforms.join(", "))
}
