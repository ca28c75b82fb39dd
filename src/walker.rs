use std::path::{Path, PathBuf};

use crate::error::Result;

/// A discovered rule-document file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Path relative to the data root.
    pub relative_path: PathBuf,
    /// Fully resolved absolute path.
    pub absolute_path: PathBuf,
}

/// File extension for rule documents.
const DOCUMENT_EXTENSION: &str = "json";

/// Recursively walk a directory and discover rule-document files.
///
/// Skips hidden files/directories (names starting with `.`) and only
/// returns files with the `.json` extension. Results are sorted by
/// relative path so traversal order is stable across runs and platforms.
pub fn discover_files(root: &Path) -> Result<Vec<DiscoveredFile>> {
    let canonical_root = root.canonicalize()?;
    let mut results = Vec::new();
    walk_dir(&canonical_root, &canonical_root, &mut results)?;
    results.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(results)
}

fn walk_dir(
    root: &Path,
    current: &Path,
    results: &mut Vec<DiscoveredFile>,
) -> Result<()> {
    let entries = std::fs::read_dir(current)?;

    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        // Skip hidden files and directories.
        if name.starts_with('.') {
            continue;
        }

        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk_dir(root, &entry.path(), results)?;
        } else if file_type.is_symlink() {
            let resolved = match entry.path().canonicalize() {
                Ok(p) => p,
                Err(_) => continue, // Skip broken symlinks
            };
            // A link pointing back into the root is a cycle, not a
            // document.
            if resolved.starts_with(root) && resolved.is_dir() {
                continue;
            }
            if resolved.is_file() && is_document(&resolved) {
                results.push(discovered(root, &entry.path(), &resolved));
            }
        } else if file_type.is_file() && is_document(&entry.path()) {
            let abs = entry.path().canonicalize()?;
            results.push(discovered(root, &entry.path(), &abs));
        }
    }

    Ok(())
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == DOCUMENT_EXTENSION)
}

fn discovered(
    root: &Path,
    original_path: &Path,
    absolute_path: &Path,
) -> DiscoveredFile {
    let relative_path = original_path
        .strip_prefix(root)
        .unwrap_or(original_path)
        .to_path_buf();

    DiscoveredFile {
        relative_path,
        absolute_path: absolute_path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_only_json() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("fireball.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("notes.md"), "# notes").unwrap();
        std::fs::write(tmp.path().join("image.png"), "binary").unwrap();

        let files = discover_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path.to_string_lossy(), "fireball.json");
    }

    #[test]
    fn skips_hidden_files_and_directories() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(".draft.json"), "{}").unwrap();
        let hidden = tmp.path().join(".git");
        std::fs::create_dir(&hidden).unwrap();
        std::fs::write(hidden.join("blob.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("visible.json"), "{}").unwrap();

        let files = discover_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path.to_string_lossy(), "visible.json");
    }

    #[test]
    fn recurses_category_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        let spells = tmp.path().join("spell");
        std::fs::create_dir(&spells).unwrap();
        std::fs::write(spells.join("fireball.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("top.json"), "{}").unwrap();

        let files = discover_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 2);

        let paths: Vec<_> = files
            .iter()
            .map(|f| f.relative_path.to_string_lossy().to_string())
            .collect();
        assert!(paths.contains(&"top.json".to_string()));
        assert!(paths.contains(&"spell/fireball.json".to_string()));
    }

    #[test]
    fn results_are_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("z.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("a.json"), "{}").unwrap();
        std::fs::write(tmp.path().join("m.json"), "{}").unwrap();

        let files = discover_files(tmp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.relative_path.to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "m.json", "z.json"]);
    }

    #[test]
    fn empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let files = discover_files(tmp.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert!(discover_files(&missing).is_err());
    }
}
