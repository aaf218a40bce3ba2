use crate::imports::{short_name, ImportSet};
use once_cell::sync::Lazy;
use regex::Regex;

// Both the older and the current toolchain wordings.
static SPURIOUS_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(\w+) redeclared as imported package name",
        r"|(\w+) already declared through import of package",
        r#"|imported and not used: "([^"\s]+)""#,
        r#"|"([^"\s]+)" imported and not used"#,
    ))
    .expect("spurious import pattern")
});

/// Drop the inferred imports a diagnostic blames and return what was removed.
///
/// Only imports still in `imports` are candidates, so imports the fragment wrote
/// itself are never touched. An empty result means there is nothing to retry.
pub fn repair_imports(diagnostic: &str, imports: &mut ImportSet) -> Vec<String> {
    let mut removed = Vec::new();
    for caps in SPURIOUS_IMPORT.captures_iter(diagnostic) {
        let culprit = if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
            imports
                .iter()
                .find(|path| short_name(path) == name.as_str())
                .cloned()
        } else {
            caps.get(3)
                .or_else(|| caps.get(4))
                .map(|path| path.as_str().to_string())
                .filter(|path| imports.contains(path))
        };
        if let Some(path) = culprit {
            imports.remove(&path);
            removed.push(path);
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(paths: &[&str]) -> ImportSet {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn removes_unused_import_old_wording() {
        let mut imports = set(&["os", "strings"]);
        let removed = repair_imports("3: imported and not used: \"os\"\n", &mut imports);
        assert_eq!(removed, vec!["os"]);
        assert_eq!(imports, set(&["strings"]));
    }

    #[test]
    fn removes_unused_import_current_wording() {
        let mut imports = set(&["math/rand", "strings"]);
        let removed = repair_imports("4:8: \"math/rand\" imported and not used\n", &mut imports);
        assert_eq!(removed, vec!["math/rand"]);
        assert_eq!(imports, set(&["strings"]));
    }

    #[test]
    fn removes_redeclared_package_by_short_name() {
        let mut imports = set(&["container/list", "fmt"]);
        let removed = repair_imports(
            "7: list redeclared as imported package name\n",
            &mut imports,
        );
        assert_eq!(removed, vec!["container/list"]);

        let mut imports = set(&["math/rand"]);
        let removed = repair_imports(
            "2:6: rand already declared through import of package rand (\"math/rand\")\n",
            &mut imports,
        );
        assert_eq!(removed, vec!["math/rand"]);
        assert!(imports.is_empty());
    }

    #[test]
    fn removes_every_culprit_in_one_pass() {
        let mut imports = set(&["os", "time", "strings"]);
        let diag = "3:2: \"os\" imported and not used\n5:2: \"time\" imported and not used\n";
        let removed = repair_imports(diag, &mut imports);
        assert_eq!(removed, vec!["os", "time"]);
        assert_eq!(imports, set(&["strings"]));
    }

    #[test]
    fn ignores_imports_it_did_not_infer() {
        let mut imports = set(&["strings"]);
        let removed = repair_imports("3:2: \"os\" imported and not used\n", &mut imports);
        assert!(removed.is_empty());
        assert_eq!(imports, set(&["strings"]));
    }

    #[test]
    fn ignores_other_diagnostics() {
        let mut imports = set(&["os"]);
        assert!(repair_imports("3:2: undefined: x\n", &mut imports).is_empty());
        assert_eq!(imports.len(), 1);
    }
}
