use super::repair::repair_imports;
use super::toolchain::{BuildOutcome, Toolchain};
use crate::error::{EvalError, Evaluation};
use crate::imports::{infer_imports, ImportRegistry, ImportSet};
use crate::lines::{embed_line_numbers, extract_line_numbers, remap_diagnostic};
use crate::parser::{expand_aliases, is_program, partition, Partition};
use crate::program::{assemble, explicit_imports, is_bound};
use tracing::{debug, info};

/// Turns fragments into programs and runs them through a [`Toolchain`].
///
/// Holds no per-call state, so one evaluator can serve any number of calls.
#[derive(Debug, Clone)]
pub struct Evaluator<T> {
    registry: ImportRegistry,
    toolchain: T,
}

impl<T: Toolchain> Evaluator<T> {
    pub fn new(registry: ImportRegistry, toolchain: T) -> Self {
        Self {
            registry,
            toolchain,
        }
    }

    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// Evaluate a fragment, returning the program's output.
    ///
    /// Fragments that start with a `package` clause are run as they are.
    /// Everything else is wrapped into a program, with at most one rebuild when
    /// the first build blames an inferred import.
    pub fn eval(&self, fragment: &str) -> Result<String, EvalError> {
        if is_program(fragment) {
            info!("fragment declares its own package, running unchanged");
            return self.run(fragment);
        }
        let code = expand_aliases(fragment);
        let embedded = embed_line_numbers(&code);
        let partition = partition(&embedded)?;
        let imports = self.imports_for(&code, &partition);
        self.build_and_exec(&partition, imports)
    }

    /// Same as [`Evaluator::eval`], folded into the two-slot result.
    pub fn evaluate(&self, fragment: &str) -> Evaluation {
        Evaluation::from(self.eval(fragment))
    }

    /// The exact program the first build would compile, without running it.
    pub fn emit(&self, fragment: &str) -> Result<String, EvalError> {
        if is_program(fragment) {
            return Ok(fragment.to_string());
        }
        let code = expand_aliases(fragment);
        let embedded = embed_line_numbers(&code);
        let partition = partition(&embedded)?;
        let imports = self.imports_for(&code, &partition);
        let (src, _) = extract_line_numbers(&assemble(&partition, &imports))?;
        Ok(src)
    }

    fn imports_for(&self, code: &str, partition: &Partition<'_>) -> ImportSet {
        let mut imports = infer_imports(code, &self.registry);
        let explicit = explicit_imports(partition);
        imports.retain(|path| !is_bound(&explicit, path));
        debug!(
            ?imports,
            declarations = partition.declarations.len(),
            statements = partition.statements.len(),
            "fragment partitioned"
        );
        imports
    }

    fn build_and_exec(
        &self,
        partition: &Partition<'_>,
        mut imports: ImportSet,
    ) -> Result<String, EvalError> {
        match self.run(&assemble(partition, &imports)) {
            Err(EvalError::Diagnostic(diagnostic)) => {
                let removed = repair_imports(&diagnostic, &mut imports);
                if removed.is_empty() {
                    return Err(EvalError::Diagnostic(diagnostic));
                }
                info!(?removed, "dropping imports blamed by the toolchain and rebuilding");
                self.run(&assemble(partition, &imports))
            }
            result => result,
        }
    }

    fn run(&self, program: &str) -> Result<String, EvalError> {
        let (src, lines) = extract_line_numbers(program)?;
        debug!(lines = src.lines().count(), mapped = lines.len(), "program assembled");
        match self.toolchain.build_and_run(&src)? {
            BuildOutcome::Success(output) => Ok(output),
            BuildOutcome::Failure(diagnostic) => Err(EvalError::Diagnostic(remap_diagnostic(
                &diagnostic,
                &lines,
            )?)),
        }
    }
}
