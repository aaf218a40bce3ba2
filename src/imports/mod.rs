mod infer;
mod registry;

pub use infer::infer_imports;
pub use registry::ImportRegistry;

use std::collections::BTreeSet;

/// Canonical import paths a program will declare, in sorted order.
pub type ImportSet = BTreeSet<String>;

/// Package name a path is referred to by in code: `math/rand` -> `rand`.
pub fn short_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
