//! Grammar rules for Swift type expressions.
//!
//! Shapes are tried in this order on the trimmed span: function types (a
//! top-level `->`), optionals (a trailing `?`), grouping parentheses,
//! generic applications, and finally opaque simple names. Every sub-span
//! is parsed by recursing into [`parse_type`].

use swiftmod_core::{ParseError, TypeExpr, ESCAPING_ATTRIBUTE};

use crate::lexer::*;

/// Parse a type spelling into a [`TypeExpr`].
pub fn parse_type(text: &str) -> Result<TypeExpr, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::unresolvable(text, "empty type"));
    }
    check_balanced(text).map_err(|reason| ParseError::unresolvable(text, reason))?;

    if let Some(arrow) = find_top_level_arrow(text) {
        return parse_function(text, arrow);
    }

    if let Some(rest) = text.strip_suffix('?') {
        return Ok(TypeExpr::optional(parse_type(rest)?));
    }

    if text.starts_with('@') {
        return Err(ParseError::unresolvable(
            text,
            "attributes are only allowed on function types",
        ));
    }

    if let Some(inner) = strip_parens(text) {
        // `()` and tuples stay opaque; a single element is just grouping.
        if !inner.trim().is_empty() && split_top_level(inner).len() == 1 {
            return parse_type(inner);
        }
        return Ok(TypeExpr::simple(text));
    }

    if let Some(open) = text.find('<') {
        let close = matching_close(text, open)
            .ok_or_else(|| ParseError::unresolvable(text, "unclosed '<'"))?;
        if close == text.len() - 1 {
            return parse_generic(text, open, close);
        }
        // Member of a generic type or sugar around one, e.g. `[String: Array<Int>]`.
        return Ok(TypeExpr::simple(text));
    }

    Ok(TypeExpr::simple(text))
}

/// Parse `Name<A, B>` where `open`/`close` are the outer angle brackets.
fn parse_generic(text: &str, open: usize, close: usize) -> Result<TypeExpr, ParseError> {
    let name = text[..open].trim();
    if name.is_empty() {
        return Err(ParseError::unresolvable(text, "missing generic type name"));
    }

    let arguments = &text[open + 1..close];
    if arguments.trim().is_empty() {
        return Err(ParseError::unresolvable(text, "empty generic argument list"));
    }

    let parameters = parse_list(text, arguments, parse_type)?;
    Ok(TypeExpr::generic(name, parameters))
}

/// Parse `@attr (A, B) async throws -> R` where `arrow` is the first top-level arrow.
fn parse_function(text: &str, arrow: usize) -> Result<TypeExpr, ParseError> {
    let head = &text[..arrow];
    let tail = &text[arrow + 2..];

    let (rest, names) = attributes(head)
        .map_err(|_| ParseError::unresolvable(text, "malformed attribute"))?;

    let mut is_escaping = false;
    let mut attributes = Vec::new();
    for name in names {
        if name == ESCAPING_ATTRIBUTE {
            is_escaping = true;
        } else {
            attributes.push(name.to_string());
        }
    }

    let mut signature = rest.trim();
    let throws = match strip_keyword_suffix(signature, "throws") {
        Some(stripped) => {
            signature = stripped;
            true
        }
        None => false,
    };
    let is_async = match strip_keyword_suffix(signature, "async") {
        Some(stripped) => {
            signature = stripped;
            true
        }
        None => false,
    };

    if signature.is_empty() {
        return Err(ParseError::unresolvable(text, "missing parameter list before '->'"));
    }

    let parameters = if signature.starts_with('(') {
        let inner = strip_parens(signature)
            .ok_or_else(|| ParseError::unresolvable(text, "malformed parameter list"))?;
        if inner.trim().is_empty() {
            Vec::new()
        } else {
            parse_list(text, inner, parse_closure_parameter)?
        }
    } else {
        // Unparenthesized single parameter, `Int -> Void`.
        vec![parse_type(signature)?]
    };

    if tail.trim().is_empty() {
        return Err(ParseError::unresolvable(text, "missing return type after '->'"));
    }
    let return_type = parse_type(tail)?;

    Ok(TypeExpr::Function {
        parameters,
        return_type: Box::new(return_type),
        is_escaping,
        attributes,
        is_async,
        throws,
    })
}

/// A closure parameter may carry a label that is not part of its type.
fn parse_closure_parameter(segment: &str) -> Result<TypeExpr, ParseError> {
    match parameter_label(segment) {
        Ok((rest, _label)) => parse_type(rest),
        Err(_) => parse_type(segment),
    }
}

/// Split `span` at top-level commas and parse every segment.
fn parse_list(
    text: &str,
    span: &str,
    parse: fn(&str) -> Result<TypeExpr, ParseError>,
) -> Result<Vec<TypeExpr>, ParseError> {
    split_top_level(span)
        .into_iter()
        .map(|segment| {
            if segment.is_empty() {
                Err(ParseError::unresolvable(text, "empty element in list"))
            } else {
                parse(segment)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn simple(name: &str) -> TypeExpr {
        TypeExpr::simple(name)
    }

    #[test]
    fn test_parse_simple() {
        assert_eq!(parse_type("  Int ").unwrap(), simple("Int"));
        assert_eq!(parse_type("Edge.Set").unwrap(), simple("Edge.Set"));
        assert_eq!(parse_type("some View").unwrap(), simple("some View"));
    }

    #[test]
    fn test_parse_optional() {
        let ty = parse_type("String?").unwrap();
        assert!(ty.is_optional());
        assert_eq!(ty.base_name(), "String");
        assert!(!parse_type("String").unwrap().is_optional());
    }

    #[test]
    fn test_parse_nested_optional_unwraps_one_layer_at_a_time() {
        let ty = parse_type("T???").unwrap();
        assert_eq!(
            ty,
            TypeExpr::optional(TypeExpr::optional(TypeExpr::optional(simple("T"))))
        );
    }

    #[test]
    fn test_parse_generic_depth() {
        let ty = parse_type("Array<Dictionary<String, Int>>").unwrap();
        assert_eq!(ty.base_name(), "Array");
        assert_eq!(ty.generic_parameters().len(), 1);
        assert_eq!(ty.generic_parameters()[0].generic_parameters().len(), 2);
    }

    #[test]
    fn test_parse_generic_comma_depth() {
        let ty = parse_type("Map<String, List<Int>>").unwrap();
        assert_eq!(ty.generic_parameters().len(), 2);
        assert_eq!(ty.generic_parameters()[0], simple("String"));
        assert_eq!(
            ty.generic_parameters()[1],
            TypeExpr::generic("List", vec![simple("Int")])
        );
    }

    #[test]
    fn test_parse_closure() {
        let ty = parse_type("(String, Int) -> Bool").unwrap();
        assert_eq!(ty.closure_parameters().len(), 2);
        assert_eq!(ty.closure_return_type().unwrap().base_name(), "Bool");
        assert!(!ty.is_escaping());
    }

    #[test]
    fn test_parse_escaping_closure() {
        let ty = parse_type("@escaping () -> Void").unwrap();
        assert!(ty.is_escaping());
        assert!(ty.closure_parameters().is_empty());

        let spaced = parse_type("@escaping    ()->Void").unwrap();
        assert_eq!(spaced, ty);
    }

    #[test]
    fn test_parse_closure_attributes_and_effects() {
        let ty = parse_type("@escaping @Sendable () async throws -> Void").unwrap();
        match ty {
            TypeExpr::Function {
                is_escaping,
                attributes,
                is_async,
                throws,
                ..
            } => {
                assert!(is_escaping);
                assert_eq!(attributes, vec!["Sendable".to_string()]);
                assert!(is_async);
                assert!(throws);
            }
            other => panic!("Expected function type, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_closure_returning_optional() {
        let ty = parse_type("() -> Int?").unwrap();
        assert!(ty.is_closure());
        assert!(!ty.is_optional());
        assert!(ty.closure_return_type().unwrap().is_optional());
    }

    #[test]
    fn test_parse_optional_closure() {
        let ty = parse_type("((Bool) -> Void)?").unwrap();
        assert!(ty.is_optional());
        assert!(ty.is_closure());
        assert_eq!(ty.closure_parameters(), &[simple("Bool")]);
    }

    #[test]
    fn test_parse_closure_parameter_labels_are_dropped() {
        let ty = parse_type("(_ value: Int, label: String) -> Void").unwrap();
        assert_eq!(ty.closure_parameters(), &[simple("Int"), simple("String")]);
    }

    #[test]
    fn test_parse_curried_closure_is_right_associative() {
        let ty = parse_type("(Int) -> (String) -> Bool").unwrap();
        let ret = ty.closure_return_type().unwrap();
        assert!(ret.is_closure());
        assert_eq!(ret.closure_parameters(), &[simple("String")]);
    }

    #[test]
    fn test_parse_closure_inside_generic() {
        let ty = parse_type("Array<(Int) -> Void>").unwrap();
        assert_eq!(ty.base_name(), "Array");
        assert!(ty.generic_parameters()[0].is_closure());
    }

    #[test]
    fn test_parse_tuple_and_sugar_stay_opaque() {
        assert_eq!(parse_type("(Int, Int)").unwrap(), simple("(Int, Int)"));
        assert_eq!(parse_type("()").unwrap(), simple("()"));
        assert_eq!(
            parse_type("[String: Array<Int>]").unwrap(),
            simple("[String: Array<Int>]")
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_type("").is_err());
        assert!(parse_type("   ").is_err());
        assert!(parse_type("Array<Int").is_err());
        assert!(parse_type("Array<>").is_err());
        assert!(parse_type("<Int>").is_err());
        assert!(parse_type("Dictionary<String, >").is_err());
        assert!(parse_type("-> Void").is_err());
        assert!(parse_type("() ->").is_err());
        assert!(parse_type("(Int) Foo -> Void").is_err());
        assert!(parse_type("@escaping Int").is_err());
        assert!(parse_type("@escaping Array<Int>").is_err());
        assert!(parse_type("?").is_err());
    }

    #[test]
    fn test_parse_error_carries_offending_text() {
        let err = parse_type("Array<>").unwrap_err();
        assert_eq!(err.text(), "Array<>");
    }

    #[test]
    fn test_round_trip_example() {
        let ty = TypeExpr::optional(TypeExpr::generic("Array", vec![simple("String")]));
        assert_eq!(ty.to_string(), "Array<String>?");
        assert_eq!(parse_type(&ty.to_string()).unwrap(), ty);
    }

    fn arb_type() -> impl Strategy<Value = TypeExpr> {
        let leaf = prop::sample::select(vec!["Int", "String", "Bool", "CGFloat", "Edge.Set", "Void"])
            .prop_map(TypeExpr::simple);
        leaf.prop_recursive(4, 24, 3, |inner| {
            prop_oneof![
                (
                    prop::sample::select(vec!["Array", "Dictionary", "Binding", "Set"]),
                    prop::collection::vec(inner.clone(), 1..3)
                )
                    .prop_map(|(name, params)| TypeExpr::generic(name, params)),
                inner.clone().prop_map(TypeExpr::optional),
                (
                    prop::collection::vec(inner.clone(), 0..3),
                    inner,
                    any::<bool>(),
                    any::<bool>(),
                    any::<bool>(),
                )
                    .prop_map(|(params, ret, escaping, is_async, throws)| {
                        TypeExpr::Function {
                            parameters: params,
                            return_type: Box::new(ret),
                            is_escaping: escaping,
                            attributes: Vec::new(),
                            is_async,
                            throws,
                        }
                    }),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_parse_inverts_display(ty in arb_type()) {
            let text = ty.to_string();
            prop_assert_eq!(parse_type(&text).unwrap(), ty);
        }
    }
}
