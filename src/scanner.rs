//! Directory scanner for locating candidate source files.

use crate::error::Result;
use log::warn;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Recursively walks a project directory collecting `.rs` source files.
///
/// Build output (`target`) and hidden directories are skipped. Inaccessible
/// entries produce warnings rather than aborting the scan; only an unreadable
/// root is fatal further down the pipeline.
pub struct SourceScanner {
    root: PathBuf,
}

/// Outcome of a directory scan.
pub struct ScanReport {
    /// Discovered source files, sorted for a stable processing order
    pub files: Vec<PathBuf>,
    /// Non-fatal problems encountered while walking
    pub warnings: Vec<String>,
}

impl SourceScanner {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Walk the tree and collect every `.rs` file under the root.
    pub fn scan(&self) -> Result<ScanReport> {
        let mut files = Vec::new();
        let mut warnings = Vec::new();

        let walker = WalkDir::new(&self.root).into_iter().filter_entry(|entry| {
            if entry.path() == self.root {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !name.starts_with('.') && name != "target"
        });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("rs")
                    {
                        files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("cannot access {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        // services are emitted in declaration order; a stable file order keeps
        // repeated runs byte-comparable
        files.sort();

        Ok(ScanReport { files, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collects_only_rust_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lib.rs"), "pub fn x() {}").unwrap();
        fs::write(dir.path().join("notes.md"), "# notes").unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();

        let report = SourceScanner::new(dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(report.files.len(), 2);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_recurses_into_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/api")).unwrap();
        fs::write(dir.path().join("src/api/users.rs"), "").unwrap();
        fs::write(dir.path().join("src/lib.rs"), "").unwrap();

        let report = SourceScanner::new(dir.path().to_path_buf()).scan().unwrap();
        assert_eq!(report.files.len(), 2);
    }

    #[test]
    fn test_skips_target_and_hidden_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("target/debug")).unwrap();
        fs::write(dir.path().join("target/debug/build.rs"), "").unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/hook.rs"), "").unwrap();
        fs::write(dir.path().join("kept.rs"), "").unwrap();

        let report = SourceScanner::new(dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(report.files.len(), 1);
        assert!(report.files[0].ends_with("kept.rs"));
    }

    #[test]
    fn test_output_is_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zebra.rs"), "").unwrap();
        fs::write(dir.path().join("alpha.rs"), "").unwrap();
        fs::write(dir.path().join("mid.rs"), "").unwrap();

        let report = SourceScanner::new(dir.path().to_path_buf()).scan().unwrap();

        let names: Vec<_> = report
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["alpha.rs", "mid.rs", "zebra.rs"]);
    }

    #[test]
    fn test_empty_directory_yields_empty_report() {
        let dir = TempDir::new().unwrap();
        let report = SourceScanner::new(dir.path().to_path_buf()).scan().unwrap();
        assert!(report.files.is_empty());
    }
}
