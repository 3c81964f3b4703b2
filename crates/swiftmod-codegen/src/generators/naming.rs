//! Identifier derivation for generated Swift code.

use convert_case::{Case, Casing};
use std::borrow::Cow;
use swiftmod_core::FunctionSignature;

/// Reserved words that must be escaped with backticks when used as identifiers.
const SWIFT_KEYWORDS: &[&str] = &[
    "Any", "Self", "Type", "as", "associatedtype", "await", "break", "case", "catch", "class",
    "continue", "default", "defer", "deinit", "do", "else", "enum", "extension", "fallthrough",
    "false", "fileprivate", "for", "func", "guard", "if", "import", "in", "init", "inout",
    "internal", "is", "let", "nil", "open", "operator", "private", "precedencegroup",
    "protocol", "public", "repeat", "rethrows", "return", "self", "static", "struct",
    "subscript", "super", "switch", "throw", "throws", "true", "try", "typealias", "var",
    "where", "while",
];

/// Word substituted for a leading character that cannot start an identifier.
fn marker_word(c: char) -> &'static str {
    match c {
        '_' => "underscore",
        '$' => "dollar",
        '0' => "zero",
        '1' => "one",
        '2' => "two",
        '3' => "three",
        '4' => "four",
        '5' => "five",
        '6' => "six",
        '7' => "seven",
        '8' => "eight",
        '9' => "nine",
        _ => "char",
    }
}

/// Upper-case the first character only; the rest is already camel-cased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derive a variant tag from a function name.
///
/// Names starting with a letter keep their spelling, minus any character
/// that is not an ASCII letter, digit or underscore. Every leading
/// non-letter is replaced by a descriptive word and the remaining name is
/// appended with its first letter upper-cased:
///
/// - `padding` → `padding`
/// - `_printChanges` → `underscorePrintChanges`
/// - `__x` → `underscoreUnderscoreX`
/// - `3d` → `threeD`
///
/// The result is empty only when the input is empty. Keywords are not
/// escaped here; see [`escape_identifier`].
pub fn variant_tag(name: &str) -> String {
    let mut words: Vec<&str> = Vec::new();
    let mut rest = name;
    while let Some(c) = rest.chars().next() {
        if c.is_ascii_alphabetic() {
            break;
        }
        words.push(marker_word(c));
        rest = &rest[c.len_utf8()..];
    }

    let rest: String = rest
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    match words.split_first() {
        None => rest,
        Some((first, others)) => {
            let mut tag = first.to_string();
            for word in others {
                tag.push_str(&capitalize(word));
            }
            tag.push_str(&capitalize(&rest));
            tag
        }
    }
}

/// Tag suffix distinguishing an overload, built from its parameter names.
///
/// `frame(width:height:)` → `WidthHeight`; positional parameters contribute
/// their internal name.
pub fn overload_suffix(signature: &FunctionSignature) -> String {
    signature
        .parameters
        .iter()
        .map(|p| variant_tag(p.display_name()).to_case(Case::Pascal))
        .collect()
}

pub fn is_keyword(ident: &str) -> bool {
    SWIFT_KEYWORDS.contains(&ident)
}

/// Wrap keywords in backticks so they can be used as identifiers.
pub fn escape_identifier(ident: &str) -> Cow<'_, str> {
    if is_keyword(ident) {
        Cow::Owned(format!("`{}`", ident))
    } else {
        Cow::Borrowed(ident)
    }
}

/// True for a plain Swift identifier: ASCII letter or underscore first, then
/// letters, digits or underscores.
pub fn is_valid_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiftmod_core::ParameterDescriptor;

    #[test]
    fn test_variant_tag_plain_name() {
        assert_eq!(variant_tag("padding"), "padding");
        assert_eq!(variant_tag("safeAreaInset"), "safeAreaInset");
    }

    #[test]
    fn test_variant_tag_leading_underscore() {
        assert_eq!(variant_tag("_printChanges"), "underscorePrintChanges");
        assert_eq!(variant_tag("__x"), "underscoreUnderscoreX");
        assert_eq!(variant_tag("_"), "underscore");
    }

    #[test]
    fn test_variant_tag_other_markers() {
        assert_eq!(variant_tag("$binding"), "dollarBinding");
        assert_eq!(variant_tag("3d"), "threeD");
        assert_eq!(variant_tag("rotation3DEffect"), "rotation3DEffect");
    }

    #[test]
    fn test_variant_tag_is_valid_identifier() {
        for name in ["padding", "_x", "$y", "9lives", "é", "a-b", "_é"] {
            let tag = variant_tag(name);
            assert!(is_valid_identifier(&tag), "{} -> {}", name, tag);
        }
        assert_eq!(variant_tag(""), "");
    }

    #[test]
    fn test_overload_suffix() {
        let sig = FunctionSignature::new("frame", "some View")
            .with_parameter(ParameterDescriptor::labeled("width", "w", "CGFloat?"))
            .with_parameter(ParameterDescriptor::labeled("minHeight", "h", "CGFloat?"))
            .with_parameter(ParameterDescriptor::positional("alignment", "Alignment"));
        assert_eq!(overload_suffix(&sig), "WidthMinHeightAlignment");
    }

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier("default"), "`default`");
        assert_eq!(escape_identifier("width"), "width");
    }
}
