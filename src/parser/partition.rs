use super::chunker::next_chunk;
use super::types::Partition;
use crate::error::EvalError;
use once_cell::sync::Lazy;
use regex::Regex;

// `func (` and `func name` declare; `func(` at the start of a line is a literal.
static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*(?:(?:import|type)\b|func[ \t])").expect("declaration pattern")
});

static IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*import\b").expect("import pattern"));

/// Does this chunk belong at the top level of the program?
pub fn is_declaration(chunk: &str) -> bool {
    DECLARATION.is_match(chunk)
}

pub fn is_import(chunk: &str) -> bool {
    IMPORT.is_match(chunk)
}

/// Split marker-embedded code into top-level declarations and body statements.
pub fn partition(code: &str) -> Result<Partition<'_>, EvalError> {
    let mut out = Partition::default();
    let mut pos = 0usize;
    loop {
        let chunk = next_chunk(&code[pos..])?;
        if chunk.is_empty() {
            break;
        }
        if is_declaration(chunk) {
            out.declarations.push(chunk);
        } else {
            out.statements.push(chunk);
        }
        pos += chunk.len();
    }
    Ok(out)
}
