use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Name of the print helper every assembled program defines.
pub const PRINT_HELPER: &str = "__p";

static PRINT_ALIAS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)p +(.*)$").expect("print alias pattern"));

static PACKAGE_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*package\s").expect("package clause pattern"));

/// Expand `p foo(), 2*3` into `__p(foo(), 2*3)`, keeping indentation.
///
/// Only whole lines are rewritten, so the line count never changes. A line that
/// assigns to a variable named `p` (`p := 3`, `p += 1`) is left alone.
pub fn expand_aliases(code: &str) -> Cow<'_, str> {
    PRINT_ALIAS.replace_all(code, |caps: &Captures<'_>| {
        let (indent, args) = (&caps[1], &caps[2]);
        if is_assignment(args) {
            caps[0].to_string()
        } else {
            format!("{indent}{PRINT_HELPER}({args})")
        }
    })
}

fn is_assignment(rest: &str) -> bool {
    let op = rest.split_whitespace().next().unwrap_or("");
    op.ends_with('=') && op.chars().all(|c| c.is_ascii_punctuation())
}

/// True when the fragment already starts with its own `package` clause.
pub fn is_program(code: &str) -> bool {
    PACKAGE_CLAUSE.is_match(code)
}
