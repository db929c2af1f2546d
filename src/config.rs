// src/config.rs
//! Configuration file parsing
//!
//! Supports TOML configuration files with the following sections:
//! - [pool] - Search path for relative pool names
//! - [resolve] - Work dir root, constraint enforcement
//! - [output] - Where to write the resolved spec
//!
//! Every setting is optional; command-line flags take precedence.

use crate::error::{Error, Result};
use crate::pool::PoolConfig;
use crate::resolver::{ResolverOptions, DEFAULT_WORKDIR_ROOT};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub pool: PoolSection,

    #[serde(default)]
    pub resolve: ResolveSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// Pool configuration section
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PoolSection {
    /// Base directory for relative pool names
    pub search_path: Option<PathBuf>,
}

/// Resolution settings
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ResolveSection {
    /// Directory under which per-round work dirs are created
    #[serde(default = "default_workdir_root")]
    pub workdir_root: PathBuf,

    /// Fail resolution when a resolved version violates a dependency relation
    #[serde(default)]
    pub enforce_constraints: bool,
}

impl Default for ResolveSection {
    fn default() -> Self {
        Self {
            workdir_root: default_workdir_root(),
            enforce_constraints: false,
        }
    }
}

fn default_workdir_root() -> PathBuf {
    PathBuf::from(DEFAULT_WORKDIR_ROOT)
}

/// Output settings
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// File the resolved spec is written to, in addition to stdout
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        content.parse()
    }

    /// Locate `pool`, resolving a relative name against `search_path` if
    /// given and the configured `[pool] search_path` otherwise
    pub fn locate_pool(&self, pool: &Path, search_path: Option<&Path>) -> Result<PoolConfig> {
        let search_path = search_path.or(self.pool.search_path.as_deref());
        PoolConfig::locate(pool, search_path)
    }

    /// Resolver options from the `[resolve]` section
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            workdir_root: self.resolve.workdir_root.clone(),
            enforce_constraints: self.resolve.enforce_constraints,
        }
    }
}

impl std::str::FromStr for Config {
    type Err = Error;

    fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.resolve.workdir_root, PathBuf::from("/var/tmp"));
        assert!(!config.resolve.enforce_constraints);
        assert!(config.output.path.is_none());
        assert_eq!(config.resolver_options(), ResolverOptions::default());
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = r#"
[pool]
search_path = "/srv/pools"

[resolve]
workdir_root = "/tmp/fab"
enforce_constraints = true

[output]
path = "spec.txt"
"#
        .parse()
        .unwrap();

        assert_eq!(config.pool.search_path, Some(PathBuf::from("/srv/pools")));
        assert_eq!(config.resolve.workdir_root, PathBuf::from("/tmp/fab"));
        assert!(config.resolver_options().enforce_constraints);
        assert_eq!(config.output.path, Some(PathBuf::from("spec.txt")));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = "[resolve]\nworkdir = \"/tmp\"\n".parse::<Config>().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_and_locate_pool() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("main/.pool")).unwrap();
        let path = tmp.path().join("debclosure.toml");
        fs::write(
            &path,
            format!("[pool]\nsearch_path = \"{}\"\n", tmp.path().display()),
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        let pool = config.locate_pool(Path::new("main"), None).unwrap();
        assert_eq!(pool.path(), tmp.path().join("main"));
        assert!(matches!(
            config.locate_pool(Path::new("missing"), None),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_search_path_override() {
        let configured = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        fs::create_dir_all(configured.path().join("main/.pool")).unwrap();
        fs::create_dir_all(other.path().join("main/.pool")).unwrap();
        let config: Config = format!("[pool]\nsearch_path = \"{}\"\n", configured.path().display())
            .parse()
            .unwrap();

        let pool = config
            .locate_pool(Path::new("main"), Some(other.path()))
            .unwrap();
        assert_eq!(pool.path(), other.path().join("main"));
    }

    #[test]
    fn test_pool_path_key_rejected() {
        let err = "[pool]\npath = \"main\"\n".parse::<Config>().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/debclosure.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
