use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The directory tree holding the rule documents to index.
#[derive(Debug, Clone)]
pub struct DataRoot {
    root: PathBuf,
}

impl DataRoot {
    /// Resolve the rule-document root from, in order of priority:
    /// 1. An explicit path (from --data-root)
    /// 2. The RULEFINDER_DATA_ROOT environment variable
    /// 3. The XDG data directory (~/.local/share/rulefinder/)
    ///
    /// The root is a data source, not application state: it must already
    /// exist, and a missing or non-directory path is a startup error.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let root = if let Some(path) = explicit {
            path.to_path_buf()
        } else if let Ok(val) = std::env::var("RULEFINDER_DATA_ROOT") {
            PathBuf::from(val)
        } else {
            xdg::BaseDirectories::with_prefix("rulefinder")
                .get_data_home()
                .ok_or_else(|| {
                    Error::Config(
                        "could not determine XDG data home directory".into(),
                    )
                })?
        };

        if !root.is_dir() {
            return Err(Error::DataRoot(root));
        }

        let root = root.canonicalize()?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_with_explicit_path() {
        let tmp = tempfile::tempdir().unwrap();
        let root = DataRoot::resolve(Some(tmp.path())).unwrap();

        assert_eq!(root.path(), tmp.path().canonicalize().unwrap());
    }

    #[test]
    fn resolve_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("does-not-exist");

        let err = DataRoot::resolve(Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::DataRoot(_)));
    }

    #[test]
    fn resolve_file_is_not_a_root() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("fireball.json");
        std::fs::write(&file, "{}").unwrap();

        let err = DataRoot::resolve(Some(&file)).unwrap_err();
        assert!(matches!(err, Error::DataRoot(_)));
    }
}
