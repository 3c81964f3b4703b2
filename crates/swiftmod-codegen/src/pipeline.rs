//! End-to-end generation: categorize, then generate one unit per category.

use crate::analyzer::{Category, FunctionCategorizer};
use crate::error::Result;
use crate::generators::{CodeGenerator, GeneratedUnit};
use log::{debug, trace, warn};
use rayon::prelude::*;
use swiftmod_core::FunctionSignature;
use swiftmod_parser::resolve_parameter;

/// Generation result for one category.
#[derive(Debug)]
pub struct CategoryOutcome {
    pub category: Category,
    pub union_name: String,
    pub result: Result<GeneratedUnit>,
}

impl CategoryOutcome {
    pub fn is_successful(&self) -> bool {
        matches!(&self.result, Ok(unit) if unit.is_successful())
    }

    /// Fold an error into a failed unit.
    pub fn into_unit(self, file_extension: &str) -> GeneratedUnit {
        match self.result {
            Ok(unit) => unit,
            Err(e) => GeneratedUnit::failed(format!("{}.{}", self.union_name, file_extension), e),
        }
    }
}

/// Categorize `signatures` and generate every non-empty category in parallel.
///
/// Outcomes come back in category order whatever order the workers finish in.
pub fn generate_all<G>(generator: &G, signatures: &[FunctionSignature]) -> Vec<CategoryOutcome>
where
    G: CodeGenerator + Sync,
{
    let groups = FunctionCategorizer::new().categorize(signatures);
    debug!(
        "{} signatures in {} categories",
        signatures.len(),
        groups.len()
    );

    let outcomes: Vec<CategoryOutcome> = groups
        .into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(category, mut sigs)| {
            resolve_types(&mut sigs);
            let union_name = generator.options().union_name(category.label());
            let result = generator.generate_union(&union_name, &sigs);
            match &result {
                Ok(unit) => {
                    debug!("{}: {} variants", union_name, unit.item_count);
                    for warning in &unit.warnings {
                        warn!("{}", warning);
                    }
                }
                Err(e) => warn!("{} failed: {}", union_name, e),
            }
            CategoryOutcome {
                category,
                union_name,
                result,
            }
        })
        .collect();

    outcomes
}

/// Parse every parameter type ahead of generation. Failures stay unresolved;
/// the generator reports them against their signature.
fn resolve_types(signatures: &mut [FunctionSignature]) {
    for param in signatures.iter_mut().flat_map(|s| s.parameters.iter_mut()) {
        if let Err(e) = resolve_parameter(param) {
            trace!("{}", e);
        }
    }
}
