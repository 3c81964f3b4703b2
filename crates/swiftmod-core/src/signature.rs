//! Function signature records handed over by the extraction front end.

use crate::types::TypeExpr;

/// One parameter of an extracted function.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterDescriptor {
    /// Argument label used at the call site. `None` for positional (`_`) parameters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub external_label: Option<String>,
    /// Name the parameter is bound to inside the function.
    pub internal_name: String,
    /// Type spelling as extracted.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_text: String,
    /// Parsed form of `type_text`, once resolved.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub type_expr: Option<TypeExpr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub has_default: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_value: Option<String>,
}

impl ParameterDescriptor {
    /// A positional parameter: `_ name: Type`.
    pub fn positional(internal_name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            external_label: None,
            internal_name: internal_name.into(),
            type_text: type_text.into(),
            type_expr: None,
            has_default: false,
            default_value: None,
        }
    }

    /// A labelled parameter: `label name: Type`.
    pub fn labeled(
        external_label: impl Into<String>,
        internal_name: impl Into<String>,
        type_text: impl Into<String>,
    ) -> Self {
        Self {
            external_label: Some(external_label.into()),
            ..Self::positional(internal_name, type_text)
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.has_default = true;
        self.default_value = Some(value.into());
        self
    }

    pub fn is_positional(&self) -> bool {
        self.external_label.is_none()
    }

    /// The name a caller sees: the label, or the internal name for positional parameters.
    pub fn display_name(&self) -> &str {
        self.external_label.as_deref().unwrap_or(&self.internal_name)
    }
}

/// A function extracted from an interface description.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionSignature {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parameters: Vec<ParameterDescriptor>,
    /// Return type spelling as extracted.
    pub return_type: String,
    /// Availability annotation, e.g. `iOS 15.0, macOS 12.0, *`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub availability: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub documentation: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_generic: bool,
    /// Generic requirements of the shape `T: Protocol`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub generic_constraints: Vec<String>,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: return_type.into(),
            availability: None,
            documentation: None,
            is_generic: false,
            generic_constraints: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_availability(mut self, availability: impl Into<String>) -> Self {
        self.availability = Some(availability.into());
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.is_generic = true;
        self.generic_constraints.push(constraint.into());
        self
    }

    /// Constraint for a generic placeholder, from `T: Protocol` requirements.
    ///
    /// Composed requirements (`T: A & B`) are returned whole. A placeholder
    /// listed without a bound yields an empty string.
    pub fn constraint_for(&self, placeholder: &str) -> Option<&str> {
        self.generic_constraints.iter().find_map(|c| {
            let (name, bound) = c.split_once(':').unwrap_or((c.as_str(), ""));
            (name.trim() == placeholder).then(|| bound.trim())
        })
    }

    /// Call-site shape, e.g. `frame(width:height:)` or `padding(_:)`.
    pub fn selector(&self) -> String {
        let labels: String = self
            .parameters
            .iter()
            .map(|p| format!("{}:", p.external_label.as_deref().unwrap_or("_")))
            .collect();
        format!("{}({})", self.name, labels)
    }
}
