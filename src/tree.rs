use std::path::{Path, PathBuf};

use dashmap::DashMap;
use rayon::prelude::*;
use tracing::debug;
use walkdir::WalkDir;

use crate::defs::{ClassLikeDef, FunctionDef};
use crate::error::{Result, ScanError};
use crate::file::FileParser;

const SOURCE_EXTENSIONS: &[&str] = &["php", "hh", "hack"];

/// Scans every source file under a directory. Files are independent, so they
/// are parsed in parallel; the first failure aborts the whole tree scan.
pub struct TreeParser {
    files: DashMap<PathBuf, FileParser>,
}

impl TreeParser {
    pub fn from_path(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let mut paths = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|err| ScanError::Io {
                path: root.display().to_string(),
                source: err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop")),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_source = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e));
            if is_source {
                paths.push(entry.into_path());
            }
        }

        let files = DashMap::new();
        paths.into_par_iter().try_for_each(|path| {
            debug!(path = %path.display(), "scanning file");
            let parsed = FileParser::from_file(&path)?;
            files.insert(path, parsed);
            Ok(())
        })?;

        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get_class(&self, name: &str) -> Option<ClassLikeDef> {
        self.files
            .iter()
            .find_map(|entry| entry.value().get_class_like(name).cloned())
    }

    pub fn get_function(&self, name: &str) -> Option<FunctionDef> {
        self.files
            .iter()
            .find_map(|entry| entry.value().get_function(name).cloned())
    }

    /// All class-like names across the tree. File visit order is not
    /// deterministic, so the result is sorted.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .files
            .iter()
            .flat_map(|entry| {
                let parser = entry.value();
                let mut all = parser.class_names();
                all.extend(parser.interface_names());
                all.extend(parser.trait_names());
                all
            })
            .collect();
        names.sort();
        names
    }
}
