use super::markers::LineMap;
use crate::error::EvalError;
use once_cell::sync::Lazy;
use regex::Regex;

static LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*?:(\d+):").expect("diagnostic location pattern"));

const TOOLCHAIN_BANNER: &str = "# command-line-arguments";

/// Rewrite `file.go:N:` prefixes so N refers to the fragment instead of the program.
///
/// Mapped lines lose their file prefix, since it names a throwaway temp file.
/// Lines without a mapping pass through verbatim, blank lines and the toolchain
/// banner are dropped.
pub fn remap_diagnostic(diagnostic: &str, map: &LineMap) -> Result<String, EvalError> {
    let mut out = String::with_capacity(diagnostic.len());
    for line in diagnostic.lines() {
        if line.is_empty() || line.starts_with(TOOLCHAIN_BANNER) {
            continue;
        }
        let Some(number) = LOCATION.captures(line).and_then(|caps| caps.get(1)) else {
            out.push_str(line);
            out.push('\n');
            continue;
        };
        let synthesized = number.as_str().parse::<usize>().map_err(|_| {
            EvalError::Internal(format!("unable to convert line number {:?}", number.as_str()))
        })?;
        match map.original(synthesized) {
            Some(original) => {
                out.push_str(&original.to_string());
                out.push_str(&line[number.end()..]);
            }
            None => out.push_str(line),
        }
        out.push('\n');
    }
    Ok(out)
}
