use crate::error::EvalError;
use crate::lines::{marker_line, strip_markers};
use once_cell::sync::Lazy;
use regex::Regex;

// A line that opens a block, as seen after line numbers were embedded: `{ //#12`
static OPEN_BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([{(])[ \t]*//#\d+$").expect("open bracket pattern"));

/// Return the next chunk of `code`.
///
/// A chunk is a single line, unless that line ends with `{` or `(`. In that case
/// it runs until the matching closer (nesting of the same bracket counts) and
/// through the end of the closer's line. Brackets inside string literals are
/// counted too. An empty chunk means `code` is exhausted.
pub fn next_chunk(code: &str) -> Result<&str, EvalError> {
    let Some(newline) = code.find('\n') else {
        return Ok(code);
    };
    let line_end = newline + 1;
    if newline == 0 {
        return Ok(&code[..line_end]);
    }

    let line = &code[..newline];
    let Some(caps) = OPEN_BRACKET.captures(line) else {
        return Ok(&code[..line_end]);
    };
    let open = caps[1].as_bytes()[0];
    let close = if open == b'{' { b'}' } else { b')' };

    let mut depth = 1usize;
    let mut closer = None;
    for (i, byte) in code.as_bytes()[line_end..].iter().enumerate() {
        if *byte == open {
            depth += 1;
        } else if *byte == close {
            depth -= 1;
            if depth == 0 {
                closer = Some(line_end + i);
                break;
            }
        }
    }

    let Some(closer) = closer else {
        return Err(EvalError::Structural {
            line: marker_line(line).unwrap_or(1),
            snippet: strip_markers(line).trim().to_string(),
        });
    };

    let end = match code[closer..].find('\n') {
        Some(offset) => closer + offset + 1,
        None => code.len(),
    };
    Ok(&code[..end])
}

/// Split all of `code` into chunks, in order.
pub fn chunks(code: &str) -> Result<Vec<&str>, EvalError> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    loop {
        let chunk = next_chunk(&code[pos..])?;
        if chunk.is_empty() {
            break;
        }
        out.push(chunk);
        pos += chunk.len();
    }
    Ok(out)
}
