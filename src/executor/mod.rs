mod driver;
mod repair;
mod toolchain;

pub use driver::Evaluator;
pub use repair::repair_imports;
pub use toolchain::{BuildOutcome, GoToolchain, Toolchain};
