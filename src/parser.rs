//! Source parsing - turns files into syntax trees for the collector.

use crate::error::{Error, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// A successfully parsed source file.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub ast: syn::File,
}

/// Parse one source file into a syntax tree.
pub fn parse_file(path: &Path) -> Result<ParsedFile> {
    debug!("parsing {}", path.display());

    let content = fs::read_to_string(path)?;
    let ast = syn::parse_file(&content).map_err(|e| Error::Parse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(ParsedFile {
        path: path.to_path_buf(),
        ast,
    })
}

/// Parse a batch of files, keeping going past individual failures.
///
/// Files with syntax errors are reported as `Err` entries and logged; the
/// caller decides whether to skip or abort. Skipped files never reach the
/// collector, so they cannot produce half-extracted declarations.
pub fn parse_files(paths: &[PathBuf]) -> Vec<Result<ParsedFile>> {
    let results: Vec<Result<ParsedFile>> = paths
        .iter()
        .map(|path| {
            parse_file(path).map_err(|e| {
                warn!("failed to parse {}: {}", path.display(), e);
                e
            })
        })
        .collect();

    let parsed = results.iter().filter(|r| r.is_ok()).count();
    debug!("parsed {}/{} files", parsed, results.len());

    results
}
