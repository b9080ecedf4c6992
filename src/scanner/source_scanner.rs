use crate::error::{ExportError, Result};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub filename: String,
    pub suffix: String,
    pub size: u64,
}

impl SourceFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf, suffix: String, size: u64) -> Self {
        let filename = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        Self {
            source_path,
            relative_path,
            filename,
            suffix,
            size,
        }
    }

    pub fn display_path(&self) -> String {
        self.relative_path.display().to_string()
    }
}

/// Result of the discovery pass: every matched file plus any subtrees the
/// walker could not read. Skipped subtrees are reported, never fatal.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub files: Vec<SourceFile>,
    pub skipped: Vec<String>,
}

pub struct SourceScanner {
    filter: FileFilter,
}

impl SourceScanner {
    pub fn new(filter: FileFilter) -> Self {
        Self { filter }
    }

    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<ScanOutcome> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(ExportError::Validation {
                message: format!("path does not exist: {}", root_path.display()),
            });
        }

        if !root_path.is_dir() {
            return Err(ExportError::Validation {
                message: format!("{} is not a directory", root_path.display()),
            });
        }

        let mut outcome = ScanOutcome::default();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_traverse(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    outcome.skipped.push(format!("Skipping unreadable entry: {}", err));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(source_file) = self.match_file(&entry, root_path)? {
                outcome.files.push(source_file);
            }
        }

        // Deterministic order for a given filesystem snapshot.
        outcome
            .files
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        Ok(outcome)
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        if entry.file_type().is_file() {
            return true;
        }

        // The root itself is never pruned, even if its name is excluded.
        if entry.depth() == 0 {
            return true;
        }

        if entry.file_type().is_dir() {
            return self.filter.should_descend(entry.path());
        }

        true
    }

    fn match_file(&self, entry: &DirEntry, root_path: &Path) -> Result<Option<SourceFile>> {
        let path = entry.path();

        if !self.filter.matches_file(path) {
            return Ok(None);
        }

        let relative_path = path
            .strip_prefix(root_path)
            .map_err(|_| ExportError::Unexpected {
                message: format!(
                    "Cannot relativize {} against root {}",
                    path.display(),
                    root_path.display()
                ),
            })?
            .to_path_buf();

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

        let suffix = self
            .matched_suffix(&entry.file_name().to_string_lossy())
            .unwrap_or_default();

        Ok(Some(SourceFile::new(
            path.to_path_buf(),
            relative_path,
            suffix,
            size,
        )))
    }

    fn matched_suffix(&self, filename: &str) -> Option<String> {
        self.filter
            .include_suffixes()
            .iter()
            .find(|suffix| filename.ends_with(suffix.as_str()))
            .cloned()
    }

    pub fn statistics(&self, files: &[SourceFile]) -> ScanStatistics {
        let total_files = files.len();
        let total_size = files.iter().map(|f| f.size).sum();

        let mut files_by_suffix = std::collections::HashMap::new();
        for file in files {
            *files_by_suffix.entry(file.suffix.clone()).or_insert(0) += 1;
        }

        ScanStatistics {
            total_files,
            total_size,
            files_by_suffix,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub files_by_suffix: std::collections::HashMap<String, usize>,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan results:\n  Matched files: {}\n  Total size: {} bytes\n",
            self.total_files, self.total_size
        );

        if !self.files_by_suffix.is_empty() {
            summary.push_str("  Files by suffix:\n");
            let mut suffixes: Vec<_> = self.files_by_suffix.iter().collect();
            suffixes.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

            for (suffix, count) in suffixes {
                summary.push_str(&format!("    {}: {} files\n", suffix, count));
            }
        }

        summary
    }
}
