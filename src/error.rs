use serde::{Deserialize, Serialize};
use std::io;

/// Everything that can stop an evaluation from producing program output.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// The fragment has an opening bracket that is never closed.
    #[error("{line}:mismatched brackets or parentheses: {snippet}")]
    Structural { line: usize, snippet: String },

    /// The toolchain rejected the program, or the program failed while running.
    #[error("{0}")]
    Diagnostic(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("internal error: toolchain I/O: {0}")]
    Io(#[from] io::Error),
}

impl EvalError {
    /// True when the failure is this crate's fault rather than the fragment's.
    pub fn is_internal(&self) -> bool {
        matches!(self, EvalError::Internal(_) | EvalError::Io(_))
    }
}

/// The two-slot result handed back to callers: exactly one slot is non-empty
/// on failure, `diagnostic` is always empty on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub output: String,
    pub diagnostic: String,
}

impl Evaluation {
    pub fn is_success(&self) -> bool {
        self.diagnostic.is_empty()
    }
}

impl From<Result<String, EvalError>> for Evaluation {
    fn from(result: Result<String, EvalError>) -> Self {
        match result {
            Ok(output) => Evaluation {
                output,
                diagnostic: String::new(),
            },
            Err(err) => {
                let mut diagnostic = err.to_string();
                if diagnostic.is_empty() {
                    diagnostic = "internal error: empty diagnostic from toolchain".to_string();
                }
                Evaluation {
                    output: String::new(),
                    diagnostic,
                }
            }
        }
    }
}
