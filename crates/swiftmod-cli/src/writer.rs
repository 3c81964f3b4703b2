//! Placement of generated units on disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use swiftmod_codegen::GeneratedUnit;

/// Writes units into one output directory.
pub struct UnitWriter {
    out_dir: PathBuf,
    extension: String,
}

impl UnitWriter {
    pub fn new(out_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            out_dir: out_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Create the output directory. With `clean`, previously generated files
    /// are removed first; other files are left alone. Returns the number of
    /// files removed.
    pub fn prepare(&self, clean: bool) -> Result<usize> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;
        if !clean {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in fs::read_dir(&self.out_dir)? {
            let path = entry?.path();
            let generated = path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str());
            if generated {
                fs::remove_file(&path)
                    .with_context(|| format!("failed to remove {}", path.display()))?;
                log::debug!("removed {}", path.display());
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Write a successful unit and return its path.
    pub fn write(&self, unit: &GeneratedUnit) -> Result<PathBuf> {
        anyhow::ensure!(
            unit.is_successful(),
            "refusing to write failed unit {}",
            unit.output_file_name
        );

        let path = self.out_dir.join(&unit.output_file_name);
        fs::write(&path, &unit.source_text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
