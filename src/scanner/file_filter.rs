use crate::config::ExportConfig;
use std::path::Path;

/// Decides which files are exported and which directories are descended into.
///
/// Matching is deliberately literal: a file matches when its name ends with
/// one of the configured suffixes (case-sensitive, no dot normalization), and
/// a directory is pruned when its name exactly equals one of the configured
/// exclude names. No globs, no substring matching against full paths.
pub struct FileFilter {
    include_suffixes: Vec<String>,
    exclude_dir_names: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            include_suffixes: config.include_suffixes.clone(),
            exclude_dir_names: config.exclude_dir_names.clone(),
        }
    }

    pub fn from_parts(include_suffixes: Vec<String>, exclude_dir_names: Vec<String>) -> Self {
        Self {
            include_suffixes,
            exclude_dir_names,
        }
    }

    pub fn matches_file(&self, path: &Path) -> bool {
        if let Some(filename) = path.file_name().and_then(|s| s.to_str()) {
            return self
                .include_suffixes
                .iter()
                .any(|suffix| filename.ends_with(suffix.as_str()));
        }

        false
    }

    pub fn should_descend(&self, path: &Path) -> bool {
        if let Some(dir_name) = path.file_name().and_then(|s| s.to_str()) {
            if self
                .exclude_dir_names
                .iter()
                .any(|exclude| exclude == dir_name)
            {
                return false;
            }
        }

        true
    }

    pub fn include_suffixes(&self) -> &[String] {
        &self.include_suffixes
    }

    pub fn exclude_dir_names(&self) -> &[String] {
        &self.exclude_dir_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_filter() -> FileFilter {
        FileFilter::from_parts(
            vec![".py".to_string(), ".rs".to_string()],
            vec!["target".to_string(), ".git".to_string()],
        )
    }

    #[test]
    fn test_suffix_matching() {
        let filter = create_test_filter();

        assert!(filter.matches_file(Path::new("main.py")));
        assert!(filter.matches_file(Path::new("lib.rs")));
        assert!(!filter.matches_file(Path::new("README.md")));
        assert!(!filter.matches_file(Path::new("image.png")));
    }

    #[test]
    fn test_suffix_matching_is_case_sensitive() {
        let filter = create_test_filter();

        assert!(filter.matches_file(Path::new("main.py")));
        assert!(!filter.matches_file(Path::new("MAIN.PY")));
        assert!(!filter.matches_file(Path::new("lib.RS")));
    }

    #[test]
    fn test_suffix_is_plain_ends_with() {
        // A suffix need not start with a dot; "Makefile" matches by tail.
        let filter = FileFilter::from_parts(vec!["Makefile".to_string()], vec![]);

        assert!(filter.matches_file(Path::new("Makefile")));
        assert!(filter.matches_file(Path::new("GNUMakefile")));
        assert!(!filter.matches_file(Path::new("makefile")));
    }

    #[test]
    fn test_directory_exclusion_is_exact_name_match() {
        let filter = create_test_filter();

        assert!(!filter.should_descend(Path::new("project/target")));
        assert!(!filter.should_descend(Path::new(".git")));

        // Substrings and different casing do not match.
        assert!(filter.should_descend(Path::new("project/targets")));
        assert!(filter.should_descend(Path::new("retarget")));
        assert!(filter.should_descend(Path::new("Target")));
        assert!(filter.should_descend(Path::new("src")));
    }
}
