//! Find dataset folders in a metadata tree and the task tables they contain

/// Walk the metadata tree for folders holding a `description.txt`
pub mod folders;
/// Task names and descriptions from `tasks.tsv`
pub mod tasks;

use std::io;
use std::path::PathBuf;

pub use folders::{find_dataset_folders, DatasetFolder};
pub use tasks::TaskTable;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Can't walk metadata directory {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("File {} not found. Check parameter --github_dir.", path.display())]
    TaskTableMissing { path: PathBuf },

    #[error("Can't read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Line {line} of {} needs a file name and a task description separated by a tab", path.display())]
    MalformedTask { path: PathBuf, line: usize },
}
