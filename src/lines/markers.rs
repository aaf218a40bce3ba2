use crate::error::EvalError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

pub const MARKER_PREFIX: &str = "//#";

static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)//#(\d+)$").expect("line marker pattern"));

/// Synthesized line number (1-based) to original fragment line number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMap {
    new_to_old: HashMap<usize, usize>,
}

impl LineMap {
    pub fn original(&self, synthesized: usize) -> Option<usize> {
        self.new_to_old.get(&synthesized).copied()
    }

    pub fn insert(&mut self, synthesized: usize, original: usize) {
        self.new_to_old.insert(synthesized, original);
    }

    pub fn len(&self) -> usize {
        self.new_to_old.len()
    }

    pub fn is_empty(&self) -> bool {
        self.new_to_old.is_empty()
    }

    /// Original line numbers that appear in the map, sorted and deduplicated.
    pub fn original_lines(&self) -> Vec<usize> {
        let mut lines: Vec<usize> = self.new_to_old.values().copied().collect();
        lines.sort_unstable();
        lines.dedup();
        lines
    }
}

/// Tag each line with `//#N`, adding a final line break when missing.
pub fn embed_line_numbers(code: &str) -> String {
    let mut out = String::with_capacity(code.len() + code.len() / 4 + 8);
    let mut line_count = 0usize;
    for line in code.split_terminator('\n') {
        line_count += 1;
        out.push_str(line);
        out.push_str(MARKER_PREFIX);
        out.push_str(&line_count.to_string());
        out.push('\n');
    }
    if line_count == 0 {
        out.push_str(MARKER_PREFIX);
        out.push_str("1\n");
    }
    out
}

/// Build the synthesized-to-original map and return the program without markers.
pub fn extract_line_numbers(src: &str) -> Result<(String, LineMap), EvalError> {
    let mut map = LineMap::default();
    for (index, line) in src.split('\n').enumerate() {
        if let Some(caps) = MARKER.captures(line) {
            let original = caps[1].parse::<usize>().map_err(|_| {
                EvalError::Internal(format!("unable to convert line marker {:?}", &caps[1]))
            })?;
            map.insert(index + 1, original);
        }
    }
    Ok((strip_markers(src), map))
}

/// Original line number carried by a single marker-tagged line.
pub fn marker_line(line: &str) -> Option<usize> {
    MARKER
        .captures(line.trim_end_matches('\n'))
        .and_then(|caps| caps[1].parse().ok())
}

pub fn strip_markers(src: &str) -> String {
    MARKER.replace_all(src, "").into_owned()
}
