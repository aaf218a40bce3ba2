use crate::imports::ImportRegistry;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_GO_COMMAND: &str = "go run";
pub const DEFAULT_TEMP_DIR: &str = "/tmp";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid toolchain command: {0:?}")]
    InvalidCommand(String),

    #[error("failed to read import registry {}: {source}", .path.display())]
    Registry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("import registry must be a JSON object of strings: {0}")]
    RegistryFormat(#[from] serde_json::Error),
}

/// Process-wide settings, read once at start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the per-call program files are written to (`TMPDIR`).
    pub temp_dir: PathBuf,
    /// Program and leading arguments of the build-and-run command (`GOEVAL_GO`).
    pub go_command: Vec<String>,
    /// Extra registry entries merged over the builtin table (`GOEVAL_REGISTRY`).
    pub registry_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temp_dir: PathBuf::from(DEFAULT_TEMP_DIR),
            go_command: DEFAULT_GO_COMMAND
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            registry_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(dir) = lookup("TMPDIR").filter(|dir| !dir.is_empty()) {
            config.temp_dir = PathBuf::from(dir);
        }
        if let Some(command) = lookup("GOEVAL_GO") {
            config.go_command = parse_command(&command)?;
        }
        if let Some(path) = lookup("GOEVAL_REGISTRY").filter(|path| !path.is_empty()) {
            config.registry_path = Some(PathBuf::from(path));
        }
        Ok(config)
    }

    pub fn with_go_command(mut self, command: &str) -> Result<Self, ConfigError> {
        self.go_command = parse_command(command)?;
        Ok(self)
    }

    /// The builtin registry, extended by the configured registry file if any.
    pub fn load_registry(&self) -> Result<ImportRegistry, ConfigError> {
        let mut registry = ImportRegistry::builtin();
        if let Some(path) = &self.registry_path {
            registry.merge(ImportRegistry::load(path)?);
        }
        Ok(registry)
    }
}

/// Split a shell-style command line into program and arguments.
pub fn parse_command(command: &str) -> Result<Vec<String>, ConfigError> {
    match shlex::split(command) {
        Some(argv) if !argv.is_empty() => Ok(argv),
        _ => Err(ConfigError::InvalidCommand(command.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.temp_dir, PathBuf::from("/tmp"));
        assert_eq!(config.go_command, vec!["go", "run"]);
        assert_eq!(config.registry_path, None);
    }

    #[test]
    fn reads_environment() {
        let config = Config::from_lookup(lookup(&[
            ("TMPDIR", "/var/tmp"),
            ("GOEVAL_GO", "/usr/local/go/bin/go run -trimpath"),
            ("GOEVAL_REGISTRY", "/etc/goeval.json"),
        ]))
        .unwrap();
        assert_eq!(config.temp_dir, PathBuf::from("/var/tmp"));
        assert_eq!(
            config.go_command,
            vec!["/usr/local/go/bin/go", "run", "-trimpath"]
        );
        assert_eq!(config.registry_path, Some(PathBuf::from("/etc/goeval.json")));
    }

    #[test]
    fn empty_tmpdir_falls_back() {
        let config = Config::from_lookup(lookup(&[("TMPDIR", "")])).unwrap();
        assert_eq!(config.temp_dir, PathBuf::from("/tmp"));
    }

    #[test]
    fn quoted_command_arguments() {
        let argv = parse_command(r#"go run -ldflags "-s -w""#).unwrap();
        assert_eq!(argv, vec!["go", "run", "-ldflags", "-s -w"]);
    }

    #[test]
    fn rejects_bad_commands() {
        assert!(matches!(parse_command(""), Err(ConfigError::InvalidCommand(_))));
        assert!(matches!(
            parse_command("go run \"unterminated"),
            Err(ConfigError::InvalidCommand(_))
        ));
    }

    #[test]
    fn registry_defaults_to_builtin() {
        let registry = Config::default().load_registry().unwrap();
        assert_eq!(registry, ImportRegistry::builtin());
    }
}
