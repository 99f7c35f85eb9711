use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "notelink.toml";

/// Settings read from `notelink.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON file holding the note corpus
    pub corpus: PathBuf,
    /// `tracing` filter directive, e.g. "info" or "notelink_core=debug"
    pub log_filter: String,
    /// Copy the corpus to `<corpus>.bak` before overwriting it
    pub backup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus: PathBuf::from("notes.json"),
            log_filter: "info".to_string(),
            backup: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    pub fn from_toml_str(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a config file that must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(path, &text)
    }

    /// Read an explicitly requested config file, or fall back to
    /// `notelink.toml` in the working directory. Only the fallback may be
    /// missing, in which case defaults apply.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Overlay command-line / environment values on top of the file values.
    pub fn with_overrides(mut self, corpus: Option<PathBuf>, log_filter: Option<String>) -> Self {
        if let Some(corpus) = corpus {
            self.corpus = corpus;
        }
        if let Some(filter) = log_filter {
            self.log_filter = filter;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str(Path::new("x.toml"), "").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(Path::new("x.toml"), "backup = false\n").unwrap();
        assert!(!config.backup);
        assert_eq!(config.corpus, PathBuf::from("notes.json"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let err = Config::from_toml_str(Path::new("x.toml"), "colour = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
        assert!(err.to_string().contains("x.toml"));
    }

    #[test]
    fn loads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "corpus = \"vault/notes.json\"\nlog_filter = \"debug\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.corpus, PathBuf::from("vault/notes.json"));
        assert_eq!(config.log_filter, "debug");
        assert!(config.backup);
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load_or_default(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "got {err:?}");
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = Config::default()
            .with_overrides(Some(PathBuf::from("other.json")), Some("warn".into()));
        assert_eq!(config.corpus, PathBuf::from("other.json"));
        assert_eq!(config.log_filter, "warn");

        let untouched = Config::default().with_overrides(None, None);
        assert_eq!(untouched, Config::default());
    }
}
