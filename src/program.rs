//! Assembly of a runnable `package main` program from a partitioned fragment.

use crate::imports::{short_name, ImportSet};
use crate::parser::{is_import, Partition, PRINT_HELPER};
use once_cell::sync::Lazy;
use regex::Regex;

/// Imported unconditionally, the print helper depends on it.
pub const FORCED_IMPORT: &str = "fmt";

static IMPORT_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:([A-Za-z_]\w*|\.)[ \t]+)?"([^"\n]+)""#).expect("import spec pattern")
});

/// One import spec from the fragment's own `import` declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitImport {
    /// `f`, `_` or `.` in `import f "fmt"`; `None` when unaliased.
    pub alias: Option<String>,
    pub path: String,
}

impl ExplicitImport {
    /// Name the package is reachable under in the program.
    pub fn binding(&self) -> &str {
        self.alias.as_deref().unwrap_or_else(|| short_name(&self.path))
    }
}

/// Import specs the fragment declares on its own, in source order.
pub fn explicit_imports(partition: &Partition<'_>) -> Vec<ExplicitImport> {
    partition
        .declarations
        .iter()
        .filter(|chunk| is_import(chunk))
        .flat_map(|chunk| IMPORT_SPEC.captures_iter(chunk))
        .map(|caps| ExplicitImport {
            alias: caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|alias| *alias != "import")
                .map(str::to_string),
            path: caps[2].to_string(),
        })
        .collect()
}

/// Whether `path` is already reachable under its own short name.
pub fn is_bound(explicit: &[ExplicitImport], path: &str) -> bool {
    explicit
        .iter()
        .any(|import| import.path == path && import.binding() == short_name(path))
}

/// Build the program text, markers still attached to the fragment's lines.
///
/// Layout: package clause, imports (forced, inferred, then the fragment's own),
/// the print helper, the remaining declarations, and `main` wrapping every
/// statement in its original order.
pub fn assemble(partition: &Partition<'_>, imports: &ImportSet) -> String {
    let explicit = explicit_imports(partition);
    let (own_imports, declarations): (Vec<&str>, Vec<&str>) = partition
        .declarations
        .iter()
        .copied()
        .partition(|chunk| is_import(chunk));

    let mut src = String::from("package main\n\n");
    if !is_bound(&explicit, FORCED_IMPORT) {
        src.push_str(&format!("import \"{FORCED_IMPORT}\"\n"));
    }
    for path in imports {
        if path != FORCED_IMPORT && !is_bound(&explicit, path) {
            src.push_str(&format!("import \"{path}\"\n"));
        }
    }
    for chunk in own_imports {
        src.push_str(chunk);
    }

    src.push_str(&format!(
        "\nfunc {PRINT_HELPER}(values ...interface{{}}) {{\n\tfor _, v := range values {{\n\t\tfmt.Printf(\"%v\\n\", v)\n\t}}\n}}\n\n"
    ));
    for chunk in declarations {
        src.push_str(chunk);
    }
    src.push_str("\nfunc main() {\n");
    for chunk in &partition.statements {
        src.push_str(chunk);
    }
    src.push_str("}\n");
    src
}
