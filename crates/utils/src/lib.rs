// utils crate

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CANDIDATE_EXTENSIONS: &[&str] = &[
    // SBOL serializations
    "xml", "rdf", "sbol", "nt", "ttl", "json", "jsonld",
    // GenBank
    "gb", "gbk", "genbank",
    // FASTA
    "fasta", "fa", "faa", "fna",
];

pub fn is_validatable_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| CANDIDATE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Files to validate for `path`.
///
/// A file is returned as-is whatever its extension. A directory yields its
/// candidate files (not recursive), sorted by name.
pub fn collect_files(path: &Path) -> io::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Path does not exist: {}", path.display()),
        ));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry_path = entry?.path();
        if entry_path.is_file() && is_validatable_file(&entry_path) {
            files.push(entry_path);
        }
    }
    files.sort();

    Ok(files)
}
