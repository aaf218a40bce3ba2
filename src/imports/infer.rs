use super::{ImportRegistry, ImportSet};
use once_cell::sync::Lazy;
use regex::Regex;

static QUALIFIED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([a-z]\w+)\.").expect("qualified identifier pattern"));

// Literals and comments are blanked before scanning so `"foo.bar"` infers nothing.
static LITERAL_OR_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:[^"\\\n]|\\.)*"|`[^`]*`|'(?:[^'\\\n]|\\.)*'|//[^\n]*"#)
        .expect("literal pattern")
});

/// Guess the imports a fragment needs from its `name.` references.
///
/// Names missing from the registry are assumed to be local variables or fields.
pub fn infer_imports(code: &str, registry: &ImportRegistry) -> ImportSet {
    let scrubbed = LITERAL_OR_COMMENT.replace_all(code, " ");
    QUALIFIED
        .captures_iter(&scrubbed)
        .filter_map(|caps| registry.resolve(&caps[1]))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(code: &str) -> Vec<String> {
        infer_imports(code, &ImportRegistry::builtin())
            .into_iter()
            .collect()
    }

    #[test]
    fn infers_fmt_from_println() {
        assert_eq!(infer("fmt.Println(\"hi\")"), vec!["fmt"]);
    }

    #[test]
    fn resolves_to_canonical_paths() {
        let found = infer("r := rand.Intn(3)\ns := strings.Repeat(\"x\", r)\nfmt.Println(s, rand.Int())");
        assert_eq!(found, vec!["fmt", "math/rand", "strings"]);
    }

    #[test]
    fn ignores_unregistered_names() {
        assert!(infer("a.S = point.x\nconfig.Load()").is_empty());
    }

    #[test]
    fn ignores_names_inside_literals_and_comments() {
        assert!(infer("s := \"foo.bar\"").is_empty());
        assert!(infer("s := \"strings.Repeat\"").is_empty());
        assert!(infer("s := `os.Args`").is_empty());
        assert!(infer("x := 1 // see time.Now").is_empty());
        assert_eq!(infer("fmt.Println(\"os.Exit\")"), vec!["fmt"]);
    }

    #[test]
    fn needs_identifier_boundary() {
        assert!(infer("myfmt.Println(1)").is_empty());
        assert!(infer("Xfmt.Println(1)").is_empty());
    }
}
