//! Evaluate loose Go fragments by wrapping them into a complete program.
//!
//! A fragment is a handful of statements, optionally mixed with `type`, `func`
//! and `import` declarations. [`Evaluator`] hoists the declarations, wraps the
//! statements into `main`, guesses the standard library imports from `name.`
//! references and runs the result through a [`Toolchain`]. Diagnostics come back
//! with line numbers that point into the fragment.
//!
//! ```no_run
//! let result = goeval::eval("p \"hello\"\nfmt.Printf(\"%d\\n\", 6*7)");
//! assert_eq!(result.output, "hello\n42\n");
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod imports;
pub mod lines;
pub mod parser;
pub mod program;

pub use config::{Config, ConfigError};
pub use error::{EvalError, Evaluation};
pub use executor::{BuildOutcome, Evaluator, GoToolchain, Toolchain};
pub use imports::{ImportRegistry, ImportSet};

use once_cell::sync::Lazy;

static DEFAULT_EVALUATOR: Lazy<Result<Evaluator<GoToolchain>, String>> = Lazy::new(|| {
    let config = Config::from_env().map_err(|err| err.to_string())?;
    let registry = config.load_registry().map_err(|err| err.to_string())?;
    Ok(Evaluator::new(registry, GoToolchain::from_config(&config)))
});

/// Evaluator built from the environment on first use and shared afterwards.
fn default_evaluator() -> Result<&'static Evaluator<GoToolchain>, EvalError> {
    DEFAULT_EVALUATOR
        .as_ref()
        .map_err(|err| EvalError::Internal(err.clone()))
}

/// Evaluate a fragment with the configuration found in the environment.
///
/// The environment and the registry file are read by the first call only.
pub fn eval(fragment: &str) -> Evaluation {
    match default_evaluator() {
        Ok(evaluator) => evaluator.evaluate(fragment),
        Err(err) => Evaluation::from(Err::<String, _>(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_is_read_once() {
        match (default_evaluator(), default_evaluator()) {
            (Ok(first), Ok(second)) => assert!(std::ptr::eq(first, second)),
            (Err(first), Err(second)) => assert_eq!(first.to_string(), second.to_string()),
            _ => panic!("cached configuration changed between calls"),
        }
    }
}
