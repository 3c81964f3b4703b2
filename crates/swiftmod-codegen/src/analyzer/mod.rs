//! Analysis of extracted signatures ahead of generation.

mod categories;

pub use categories::{Category, CategoryGroup, FunctionCategorizer};
