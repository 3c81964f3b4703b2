//! Signature manifests produced by the extraction step.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use swiftmod_core::FunctionSignature;

/// Either a bare array of signatures or an object naming the source module.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Manifest {
    Signatures(Vec<FunctionSignature>),
    Module {
        #[serde(default)]
        module: Option<String>,
        signatures: Vec<FunctionSignature>,
    },
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("manifest is neither a signature array nor a module object")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("invalid manifest {}", path.display()))
    }

    pub fn module(&self) -> Option<&str> {
        match self {
            Self::Signatures(_) => None,
            Self::Module { module, .. } => module.as_deref(),
        }
    }

    pub fn signatures(&self) -> &[FunctionSignature] {
        match self {
            Self::Signatures(signatures) | Self::Module { signatures, .. } => signatures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let manifest = Manifest::from_json(
            r#"[{ "name": "padding", "return_type": "some View" }]"#,
        )
        .unwrap();
        assert_eq!(manifest.module(), None);
        assert_eq!(manifest.signatures().len(), 1);
        assert_eq!(manifest.signatures()[0].name, "padding");
    }

    #[test]
    fn test_module_object() {
        let manifest = Manifest::from_json(
            r#"{
                "module": "SwiftUI",
                "signatures": [
                    { "name": "opacity", "parameters": [{ "internal_name": "opacity", "type": "Double" }], "return_type": "some View" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(manifest.module(), Some("SwiftUI"));
        let sig = &manifest.signatures()[0];
        assert!(sig.parameters[0].is_positional());
        assert_eq!(sig.selector(), "opacity(_:)");
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(Manifest::from_json(r#"{ "name": "padding" }"#).is_err());
        assert!(Manifest::from_json("42").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modifiers.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(Manifest::from_file(&path).unwrap().signatures().is_empty());
        assert!(Manifest::from_file(&dir.path().join("missing.json")).is_err());
    }
}
