//! Locating the configuration file.
//!
//! The first hit wins:
//!
//! 1. `--config` (or `STYLECHECK_CONFIG`), taken as given
//! 2. `stylecheck.toml` or `.stylecheck.toml` in the target directory or
//!    the nearest ancestor holding one
//! 3. `config.toml` in the global directory (`$STYLECHECK_CONFIG_DIR`,
//!    else `~/.stylecheck/`)
//! 4. Built-in defaults

use std::fmt;
use std::path::{Path, PathBuf};

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named on the command line.
    Explicit(PathBuf),
    /// Found next to the checked sources.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// No file; built-in defaults.
    Default,
}

impl ConfigSource {
    /// Returns the config file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "config {}", p.display()),
            Self::Project(p) => write!(f, "project config {}", p.display()),
            Self::Global(p) => write!(f, "global config {}", p.display()),
            Self::Default => write!(f, "default configuration"),
        }
    }
}

/// Project config file names, in order of preference.
const PROJECT_CONFIG_NAMES: &[&str] = &["stylecheck.toml", ".stylecheck.toml"];

/// Config file name inside the global directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for checking `target`, a directory or a
/// single source file.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(target, explicit, global_config_dir().as_deref())
}

fn resolve_in(target: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(target) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(found) if found.is_file() => {
            tracing::debug!("Found global config: {}", found.display());
            ConfigSource::Global(found)
        }
        _ => ConfigSource::Default,
    }
}

/// Searches the target directory (a file's parent for a file target) and
/// then each ancestor. The nearest one wins.
fn find_project_config(target: &Path) -> Option<PathBuf> {
    let start = if target.is_file() {
        target.parent()?
    } else {
        target
    };
    start.ancestors().find_map(|dir| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Returns the global config directory: `$STYLECHECK_CONFIG_DIR`, else
/// `~/.stylecheck/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os("STYLECHECK_CONFIG_DIR") {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".stylecheck")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A project directory plus a global directory, each holding the named
    /// config files.
    struct Layout {
        project: TempDir,
        global: TempDir,
    }

    impl Layout {
        fn new(project_files: &[&str], global_files: &[&str]) -> Self {
            let layout = Self {
                project: TempDir::new().unwrap(),
                global: TempDir::new().unwrap(),
            };
            for name in project_files {
                fs::write(layout.project.path().join(name), "").unwrap();
            }
            for name in global_files {
                fs::write(layout.global.path().join(name), "").unwrap();
            }
            layout
        }

        fn resolve(&self, explicit: Option<&Path>) -> ConfigSource {
            resolve_in(self.project.path(), explicit, Some(self.global.path()))
        }
    }

    #[test]
    fn explicit_path_is_trusted_as_given() {
        let layout = Layout::new(&["stylecheck.toml"], &["config.toml"]);
        let missing = Path::new("/nonexistent/stylecheck.toml");
        assert_eq!(
            layout.resolve(Some(missing)),
            ConfigSource::Explicit(missing.to_path_buf())
        );
    }

    #[test]
    fn project_names_in_order_of_preference() {
        for (files, expected) in [
            (&["stylecheck.toml"][..], "stylecheck.toml"),
            (&[".stylecheck.toml"][..], ".stylecheck.toml"),
            (&[".stylecheck.toml", "stylecheck.toml"][..], "stylecheck.toml"),
        ] {
            let layout = Layout::new(files, &["config.toml"]);
            assert_eq!(
                layout.resolve(None),
                ConfigSource::Project(layout.project.path().join(expected)),
                "{files:?}"
            );
        }
    }

    #[test]
    fn global_config_is_the_fallback() {
        let layout = Layout::new(&[], &["config.toml"]);
        assert_eq!(
            layout.resolve(None),
            ConfigSource::Global(layout.global.path().join("config.toml"))
        );

        let empty = Layout::new(&[], &[]);
        assert_eq!(empty.resolve(None), ConfigSource::Default);
        assert_eq!(resolve_in(empty.project.path(), None, None), ConfigSource::Default);
    }

    #[test]
    fn nearest_ancestor_config_wins() {
        let layout = Layout::new(&["stylecheck.toml"], &[]);
        let module = layout.project.path().join("module");
        let src = module.join("src");
        fs::create_dir_all(&src).unwrap();

        assert_eq!(
            resolve_in(&src, None, None),
            ConfigSource::Project(layout.project.path().join("stylecheck.toml"))
        );

        fs::write(module.join(".stylecheck.toml"), "").unwrap();
        assert_eq!(
            resolve_in(&src, None, None),
            ConfigSource::Project(module.join(".stylecheck.toml"))
        );
    }

    #[test]
    fn single_file_target_uses_its_directory() {
        let layout = Layout::new(&["stylecheck.toml"], &[]);
        let file = layout.project.path().join("A.java");
        fs::write(&file, "class A {}").unwrap();

        assert_eq!(
            resolve_in(&file, None, None),
            ConfigSource::Project(layout.project.path().join("stylecheck.toml"))
        );
    }

    #[test]
    fn only_default_has_no_path() {
        let p = PathBuf::from("/tmp/stylecheck.toml");
        assert!(ConfigSource::Default.path().is_none());
        for source in [
            ConfigSource::Explicit(p.clone()),
            ConfigSource::Project(p.clone()),
            ConfigSource::Global(p.clone()),
        ] {
            assert_eq!(source.path(), Some(p.as_path()));
        }
        assert_eq!(
            ConfigSource::Global(p).to_string(),
            "global config /tmp/stylecheck.toml"
        );
    }
}
