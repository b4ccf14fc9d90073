use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::scan::ScanError;

/// Every dataset folder has this one-line description
pub static DESCRIPTION_FILE: &str = "description.txt";

/// Directories that never hold datasets and are not descended into
static EXCLUDED_DIRS: [&str; 2] = [".git", "_tutorial"];

/// A folder in the metadata tree with a `description.txt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFolder {
    pub path: PathBuf,
    /// Names of the files directly inside the folder, sorted
    pub files: Vec<String>,
}

impl DatasetFolder {
    /// First line of `description.txt`, trimmed
    pub fn description(&self) -> Result<String, ScanError> {
        let path = self.path.join(DESCRIPTION_FILE);
        let content = fs::read_to_string(&path).map_err(|source| ScanError::Read { path, source })?;
        Ok(content.lines().next().unwrap_or_default().trim().to_string())
    }
}

/// Search the metadata tree recursively for dataset folders
///
/// The root itself is never a dataset folder. Folders named `.git` or `_tutorial`, and everything
/// below them, are skipped.
pub fn find_dataset_folders(root: &Path) -> Result<Vec<DatasetFolder>, ScanError> {
    let mut folders: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry));

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk { path: root.to_path_buf(), source })?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let files = list_files(entry.path())?;
        if files.iter().any(|f| f == DESCRIPTION_FILE) {
            debug!("Found dataset folder {}", entry.path().display());
            folders.insert(entry.path().to_path_buf(), files);
        }
    }

    info!("Found {} dataset folders in {}", folders.len(), root.display());
    Ok(folders
        .into_iter()
        .map(|(path, files)| DatasetFolder { path, files })
        .collect())
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIRS.contains(&name))
            .unwrap_or(false)
}

/// Names of the files directly inside `dir`, sorted
///
/// Symlinks count when their target is a file.
pub fn list_files(dir: &Path) -> Result<Vec<String>, ScanError> {
    let read_error = |source: std::io::Error| ScanError::Read { path: dir.to_path_buf(), source };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        if entry.path().is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    files.sort();
    Ok(files)
}
