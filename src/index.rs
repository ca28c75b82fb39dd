use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{error::Result, walker};

/// Read-only mapping from rule key to document location.
///
/// Built exactly once at startup and never mutated afterwards, so shared
/// references can be handed to concurrent readers without locking.
#[derive(Debug)]
pub struct RuleIndex {
    entries: HashMap<String, PathBuf>,
}

impl RuleIndex {
    /// Walk `root` and map every rule document beneath it by derived key.
    ///
    /// If two files derive the same key, the one whose relative path
    /// sorts last wins; each overwrite is logged.
    pub fn build(root: &Path) -> Result<Self> {
        let files = walker::discover_files(root)?;
        let mut entries = HashMap::with_capacity(files.len());

        for file in files {
            let key = derive_key(&file.relative_path);
            if let Some(previous) =
                entries.insert(key.clone(), file.absolute_path)
            {
                tracing::warn!(
                    key = %key,
                    previous = %previous.display(),
                    "duplicate rule key, keeping later file"
                );
            }
        }

        tracing::info!(documents = entries.len(), "rule index built");
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    /// All keys, in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derive the lookup key for a document file.
///
/// The extension is stripped, `;` becomes `:` (sources encode colons as
/// semicolons in file names) and underscores become spaces:
/// `flame_strike.json` -> `flame strike`,
/// `grapple;condition.json` -> `grapple:condition`.
pub fn derive_key(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default()
        .replace(';', ":")
        .replace('_', " ")
}
