//! Create depositions for every dataset in a metadata tree and upload their files
//!
//! Records are processed one after another. A record that lists no files, or whose files aren't
//! all present locally, is skipped. The first failed creation or upload stops the run.

use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::deposit_log::DepositLog;
use crate::metadata::{self, DepositionRecord, MetadataError};
use crate::scan::folders::list_files;
use crate::scan::{find_dataset_folders, ScanError, TaskTable};
use crate::zenodo::{DepositionId, ZenodoClient, ZenodoError};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Invalid task table {}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: MetadataError,
    },

    #[error("Can't record deposition {id} in the deposit log")]
    DepositLog {
        id: DepositionId,
        #[source]
        source: io::Error,
    },
}

/// What happened to one deposition record
#[derive(Debug)]
pub enum DepositionOutcome {
    /// Deposition created and every file uploaded
    Uploaded { id: DepositionId, title: String, files: usize },
    /// Nothing was sent to Zenodo for this record
    Skipped { title: String, reason: SkipReason },
    /// Zenodo rejected the creation (`id` is `None`) or one of the uploads
    Failed { id: Option<DepositionId>, title: String, error: ZenodoError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A referenced file isn't in the files directory
    MissingFile(String),
    /// The FileName cell lists no files
    NoFiles,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SkipReason::MissingFile(file) => write!(f, "file {} not found", file),
            SkipReason::NoFiles => write!(f, "no files listed"),
        }
    }
}

impl DepositionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, DepositionOutcome::Failed { .. })
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<DepositionOutcome>,
}

impl RunSummary {
    /// The run stopped early on a failed deposition
    pub fn halted(&self) -> bool {
        self.outcomes.last().map(DepositionOutcome::is_failed).unwrap_or(false)
    }

    pub fn uploaded(&self) -> usize {
        self.count(|o| matches!(o, DepositionOutcome::Uploaded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, DepositionOutcome::Skipped { .. }))
    }

    fn count(&self, f: impl Fn(&DepositionOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|&o| f(o)).count()
    }
}

pub struct Uploader<'a, W: Write> {
    client: &'a ZenodoClient,
    files_dir: PathBuf,
    available: BTreeSet<String>,
    deposits: DepositLog<W>,
}

impl<'a, W: Write> Uploader<'a, W> {
    /// The files directory is listed once, referenced files are checked against that listing
    pub fn new(client: &'a ZenodoClient, files_dir: &Path, deposits: DepositLog<W>) -> Result<Uploader<'a, W>, UploadError> {
        let available: BTreeSet<String> = list_files(files_dir)?.into_iter().collect();
        info!("{} files available for upload in {}", available.len(), files_dir.display());
        Ok(Uploader { client, files_dir: files_dir.to_path_buf(), available, deposits })
    }

    /// Scan the metadata tree and deposit every record that is marked for upload
    pub async fn run(&mut self, metadata_root: &Path) -> Result<RunSummary, UploadError> {
        let tasks = TaskTable::load(metadata_root)?;
        let folders = find_dataset_folders(metadata_root)?;
        let mut summary = RunSummary::default();

        for folder in &folders {
            let dataset_description = folder.description()?;

            for (table, task) in tasks.matching(&folder.files) {
                let path = folder.path.join(table);
                info!("Checking file {}", path.display());

                let records = metadata::load_records(&path, task, &dataset_description)
                    .map_err(|source| UploadError::Metadata { path: path.clone(), source })?;

                for record in &records {
                    let outcome = self.deposit(record).await?;
                    let failed = outcome.is_failed();
                    summary.outcomes.push(outcome);
                    if failed {
                        return Ok(summary);
                    }
                }
            }
        }

        info!("{} depositions created, {} skipped", summary.uploaded(), summary.skipped());
        Ok(summary)
    }

    /// Create one deposition and upload its files, stopping at the first failed upload
    pub async fn deposit(&mut self, record: &DepositionRecord) -> Result<DepositionOutcome, UploadError> {
        let title = record.metadata.title.clone();

        let skip = match self.missing_file(record) {
            Some(missing) => Some(SkipReason::MissingFile(missing.to_string())),
            None if record.files.is_empty() => Some(SkipReason::NoFiles),
            None => None,
        };
        if let Some(reason) = skip {
            warn!("Skipping {}. Reason: {}", title, reason);
            return Ok(DepositionOutcome::Skipped { title, reason });
        }

        let id = match self.client.create(&record.metadata).await {
            Ok(id) => id,
            Err(err) => {
                error!("{}", err);
                return Ok(DepositionOutcome::Failed { id: None, title, error: err });
            }
        };
        info!("Created deposition {} for {}", id, title);
        self.deposits.record(id).map_err(|source| UploadError::DepositLog { id, source })?;

        for file in &record.files {
            let path = self.files_dir.join(file);
            info!("Uploading {}", path.display());
            if let Err(err) = self.client.upload_file(id, &path).await {
                error!("{}", err);
                return Ok(DepositionOutcome::Failed { id: Some(id), title, error: err });
            }
        }

        info!("Check your upload at {}", self.client.deposit_page(id));
        Ok(DepositionOutcome::Uploaded { id, title, files: record.files.len() })
    }

    /// First referenced file that isn't in the files directory
    pub fn missing_file<'r>(&self, record: &'r DepositionRecord) -> Option<&'r str> {
        record
            .files
            .iter()
            .find(|file| !self.available.contains(file.as_str()))
            .map(String::as_str)
    }

    pub fn into_deposit_log(self) -> DepositLog<W> {
        self.deposits
    }
}
