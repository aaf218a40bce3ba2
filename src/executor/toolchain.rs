use crate::config::Config;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

/// What the build-and-run service reports for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Program built and exited cleanly; combined stdout and stderr.
    Success(String),
    /// Build failed, or the program failed while running.
    Failure(String),
}

/// Compiles and runs a self-contained program.
pub trait Toolchain {
    fn build_and_run(&self, source: &str) -> io::Result<BuildOutcome>;
}

impl<T: Toolchain + ?Sized> Toolchain for &T {
    fn build_and_run(&self, source: &str) -> io::Result<BuildOutcome> {
        (**self).build_and_run(source)
    }
}

/// Runs programs with `go run` on a uniquely named file per call.
#[derive(Debug, Clone)]
pub struct GoToolchain {
    command: Vec<String>,
    temp_dir: PathBuf,
}

impl GoToolchain {
    pub fn new(command: Vec<String>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.go_command.clone(), config.temp_dir.clone())
    }

}

impl Toolchain for GoToolchain {
    fn build_and_run(&self, source: &str) -> io::Result<BuildOutcome> {
        let (program, args) = self.command.split_first().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "empty toolchain command")
        })?;

        let file = write_source(&self.temp_dir, source)?;
        debug!(command = ?self.command, file = %file.path().display(), "running toolchain");

        let output = Command::new(program).args(args).arg(file.path()).output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!(status = %output.status, bytes = combined.len(), "toolchain finished");
        if output.status.success() {
            Ok(BuildOutcome::Success(combined))
        } else {
            Ok(BuildOutcome::Failure(combined))
        }
    }
}

/// Program file that lives exactly as long as the returned handle.
fn write_source(dir: &Path, source: &str) -> io::Result<NamedTempFile> {
    let mut file = Builder::new()
        .prefix("goeval-")
        .suffix(".go")
        .tempfile_in(dir)?;
    file.write_all(source.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn source_files_are_unique_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_source(dir.path(), "package main\n").unwrap();
        let b = write_source(dir.path(), "package main\n").unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a.path().extension().is_some_and(|ext| ext == "go"));
        assert!(a
            .path()
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("goeval-")));
        let path = a.path().to_path_buf();
        assert_eq!(fs::read_to_string(&path).unwrap(), "package main\n");
        drop(a);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn program_file_is_gone_after_the_call() {
        let dir = tempfile::tempdir().unwrap();
        let toolchain = GoToolchain::new(vec!["cat".to_string()], dir.path());
        toolchain.build_and_run("package main\n").unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn empty_command_is_an_error() {
        let toolchain = GoToolchain::new(Vec::new(), std::env::temp_dir());
        let err = toolchain.build_and_run("package main\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_selects_outcome() {
        let dir = std::env::temp_dir();
        let ok = GoToolchain::new(vec!["cat".to_string()], &dir);
        assert_eq!(
            ok.build_and_run("hello\n").unwrap(),
            BuildOutcome::Success("hello\n".to_string())
        );

        let failing = GoToolchain::new(
            vec!["sh".to_string(), "-c".to_string(), "echo bad >&2; exit 1".to_string()],
            &dir,
        );
        assert_eq!(
            failing.build_and_run("ignored").unwrap(),
            BuildOutcome::Failure("bad\n".to_string())
        );
    }
}
