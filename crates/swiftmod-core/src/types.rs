//! Type expression model.
//!
//! A [`TypeExpr`] is the parsed form of a type spelling taken from a
//! function signature. The model only knows four shapes; anything the parser
//! cannot break down further is kept verbatim as a [`TypeExpr::Simple`].

use std::fmt;

/// Name reported by [`TypeExpr::base_name`] for function types.
pub const FUNCTION_BASE_NAME: &str = "Function";

/// Attribute that marks a closure as escaping.
pub const ESCAPING_ATTRIBUTE: &str = "escaping";

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TypeExpr {
    /// A nominal type or any other opaque spelling (`Int`, `Edge.Set`, `[String]`).
    Simple { name: String },

    /// A nominal type applied to type arguments. Never has zero parameters.
    Generic {
        name: String,
        parameters: Vec<TypeExpr>,
    },

    /// `T?`
    Optional { inner: Box<TypeExpr> },

    /// A callable type such as `@escaping (Int) -> Void`.
    Function {
        parameters: Vec<TypeExpr>,
        return_type: Box<TypeExpr>,
        is_escaping: bool,
        /// Type attributes other than `@escaping`, without the `@`, in source order.
        attributes: Vec<String>,
        is_async: bool,
        throws: bool,
    },
}

impl TypeExpr {
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple { name: name.into() }
    }

    pub fn generic(name: impl Into<String>, parameters: Vec<TypeExpr>) -> Self {
        Self::Generic {
            name: name.into(),
            parameters,
        }
    }

    pub fn optional(inner: TypeExpr) -> Self {
        Self::Optional {
            inner: Box::new(inner),
        }
    }

    /// A plain, non-escaping, synchronous function type.
    pub fn function(parameters: Vec<TypeExpr>, return_type: TypeExpr) -> Self {
        Self::Function {
            parameters,
            return_type: Box::new(return_type),
            is_escaping: false,
            attributes: Vec::new(),
            is_async: false,
            throws: false,
        }
    }

    /// Builder-style toggle for the escaping flag. No effect on non-function types.
    pub fn escaping(mut self, escaping: bool) -> Self {
        if let Self::Function { is_escaping, .. } = &mut self {
            *is_escaping = escaping;
        }
        self
    }

    /// Name of the outermost nominal type.
    ///
    /// Optionals report the base name of the wrapped type, so
    /// `String?` and `String` both have base name `String`.
    pub fn base_name(&self) -> &str {
        match self {
            Self::Simple { name } | Self::Generic { name, .. } => name,
            Self::Optional { inner } => inner.base_name(),
            Self::Function { .. } => FUNCTION_BASE_NAME,
        }
    }

    /// Type arguments of a generic type, looking through optionals.
    pub fn generic_parameters(&self) -> &[TypeExpr] {
        match self {
            Self::Generic { parameters, .. } => parameters,
            Self::Optional { inner } => inner.generic_parameters(),
            _ => &[],
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional { .. })
    }

    /// Remove one layer of optionality.
    pub fn unwrapped(&self) -> &TypeExpr {
        match self {
            Self::Optional { inner } => inner,
            other => other,
        }
    }

    /// True for function types, looking through optionals.
    pub fn is_closure(&self) -> bool {
        match self {
            Self::Function { .. } => true,
            Self::Optional { inner } => inner.is_closure(),
            _ => false,
        }
    }

    pub fn closure_parameters(&self) -> &[TypeExpr] {
        match self {
            Self::Function { parameters, .. } => parameters,
            Self::Optional { inner } => inner.closure_parameters(),
            _ => &[],
        }
    }

    pub fn closure_return_type(&self) -> Option<&TypeExpr> {
        match self {
            Self::Function { return_type, .. } => Some(return_type),
            Self::Optional { inner } => inner.closure_return_type(),
            _ => None,
        }
    }

    pub fn is_escaping(&self) -> bool {
        match self {
            Self::Function { is_escaping, .. } => *is_escaping,
            Self::Optional { inner } => inner.is_escaping(),
            _ => false,
        }
    }

    /// Nesting depth of the tree. Leaves have depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Simple { .. } => 1,
            Self::Generic { parameters, .. } => {
                1 + parameters.iter().map(TypeExpr::depth).max().unwrap_or(0)
            }
            Self::Optional { inner } => 1 + inner.depth(),
            Self::Function {
                parameters,
                return_type,
                ..
            } => {
                let params = parameters.iter().map(TypeExpr::depth).max().unwrap_or(0);
                1 + params.max(return_type.depth())
            }
        }
    }
}

/// Diagnostic rendering. Parsing the output yields the same tree.
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple { name } => f.write_str(name),
            Self::Generic { name, parameters } => {
                write!(f, "{}<", name)?;
                write_list(f, parameters)?;
                f.write_str(">")
            }
            Self::Optional { inner } => {
                if matches!(**inner, Self::Function { .. }) {
                    write!(f, "({})?", inner)
                } else {
                    write!(f, "{}?", inner)
                }
            }
            Self::Function {
                parameters,
                return_type,
                is_escaping,
                attributes,
                is_async,
                throws,
            } => {
                if *is_escaping {
                    write!(f, "@{} ", ESCAPING_ATTRIBUTE)?;
                }
                for attribute in attributes {
                    write!(f, "@{} ", attribute)?;
                }
                f.write_str("(")?;
                write_list(f, parameters)?;
                f.write_str(")")?;
                if *is_async {
                    f.write_str(" async")?;
                }
                if *throws {
                    f.write_str(" throws")?;
                }
                write!(f, " -> {}", return_type)
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeExpr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
