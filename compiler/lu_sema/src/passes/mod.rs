//! The four semantic passes, in the order they run.
//!
//! Each pass is a structural walk with an exhaustive `match` per node
//! kind. Passes only fill attribute slots; none of them changes the shape
//! of the tree.

mod check_types;
mod context_rules;
mod resolve_names;
mod resolve_types;

pub use check_types::CheckTypesPass;
pub use context_rules::CheckContextRulesPass;
pub use resolve_names::ResolveNamesPass;
pub use resolve_types::{binary_result_type, unary_result_type, ResolveTypesPass};
