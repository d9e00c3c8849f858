use crate::error::{DiscoveryError, Result};
use ignore::WalkBuilder;
use impact_model::SourceFile;
use std::path::{Path, PathBuf};

/// Files above this size are skipped; generated Python this large is
/// noise rather than structure
const MAX_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;

/// Directory names never worth analyzing
const IGNORED_SCOPES: &[&str] = &[
    "__pycache__",
    ".eggs",
    ".git",
    ".hg",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    ".svn",
    ".tox",
    ".venv",
    "build",
    "dist",
    "env",
    "node_modules",
    "site-packages",
    "venv",
];

/// Scanner for finding Python source files in a project
pub struct FileScanner {
    root: PathBuf,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Scan for Python files and load their contents (.gitignore aware).
    ///
    /// Paths in the result are relative to the root so node identities
    /// stay stable across machines. The list is sorted for deterministic
    /// downstream output.
    pub fn scan(&self) -> Result<Vec<SourceFile>> {
        if !self.root.exists() {
            return Err(DiscoveryError::InvalidPath(format!(
                "Path does not exist: {}",
                self.root.display()
            )));
        }

        let mut files = Vec::new();

        let root = self.root.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true) // do not analyze hidden files by default
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true);
        builder.filter_entry(move |entry| !FileScanner::is_ignored_scope(entry.path(), &root));

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !Self::is_python_file(path) {
                        continue;
                    }

                    if let Ok(meta) = entry.metadata() {
                        if meta.len() > MAX_FILE_SIZE_BYTES {
                            log::debug!(
                                "Skipping large file {} ({} bytes > {})",
                                path.display(),
                                meta.len(),
                                MAX_FILE_SIZE_BYTES
                            );
                            continue;
                        }
                    }

                    match std::fs::read_to_string(path) {
                        Ok(content) => files.push(SourceFile::new(self.relative(path), content)),
                        Err(e) => log::warn!("Failed to read {}: {e}", path.display()),
                    }
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        log::info!("Found {} Python source files", files.len());
        Ok(files)
    }

    /// Path relative to the scan root; a root that is itself a file
    /// keeps its own name
    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .ok()
            .filter(|relative| !relative.as_os_str().is_empty())
            .unwrap_or(path)
            .display()
            .to_string()
    }

    fn is_python_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "py" | "pyw"))
    }

    fn is_ignored_scope(path: &Path, root: &Path) -> bool {
        if let Ok(relative) = path.strip_prefix(root) {
            for component in relative.components() {
                if let std::path::Component::Normal(name) = component {
                    let lowered = name.to_string_lossy().to_lowercase();
                    if IGNORED_SCOPES.iter().any(|ignored| ignored == &lowered) {
                        return true;
                    }
                }
            }
        }
        false
    }
}
