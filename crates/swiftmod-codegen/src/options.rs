//! Generator configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Access level of the generated declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    #[default]
    Public,
    Internal,
}

impl AccessLevel {
    /// Declaration prefix, including the trailing space.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Public => "public ",
            Self::Internal => "",
        }
    }
}

/// How overloaded function names become variant tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverloadStrategy {
    /// Append parameter names to overloaded tags (`frameWidthHeight`).
    #[default]
    LabelSuffix,
    /// Keep plain names; overloads then fail as duplicate tags.
    Reject,
}

/// Options for tagged-union generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Parameter name of the view passed to the dispatch method.
    pub receiver_name: String,
    pub access_level: AccessLevel,
    /// Module imported at the top of every unit.
    pub import_module: String,
    /// Protocol the receiver conforms to.
    pub view_protocol: String,
    /// Name of the dispatch method.
    pub dispatch_method: String,
    pub overload_strategy: OverloadStrategy,
    /// Parameter types nested deeper than this produce a warning.
    pub max_type_depth: usize,
    /// Appended to a category label to form the union name.
    pub union_suffix: String,
    /// Nominal types treated as not `Equatable`.
    pub opaque_types: Vec<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            receiver_name: "content".to_string(),
            access_level: AccessLevel::Public,
            import_module: "SwiftUI".to_string(),
            view_protocol: "View".to_string(),
            dispatch_method: "apply".to_string(),
            overload_strategy: OverloadStrategy::LabelSuffix,
            max_type_depth: 4,
            union_suffix: "Modifier".to_string(),
            opaque_types: ["AnyView", "AnyTransition", "AnyGesture", "Binding"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl GeneratorOptions {
    /// Parse options from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Union name for a category label, e.g. `Layout` → `LayoutModifier`.
    pub fn union_name(&self, label: &str) -> String {
        format!("{}{}", label, self.union_suffix)
    }

    pub fn is_opaque_type(&self, name: &str) -> bool {
        self.opaque_types.iter().any(|t| t == name)
    }
}
