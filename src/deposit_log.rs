//! The deposit log: one deposition ID per line
//!
//! The upload tool writes a fresh log per run; the publish and delete tools read one back.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;

use crate::zenodo::deposition::DepositionId;

#[derive(Debug, thiserror::Error)]
pub enum DepositLogError {
    #[error("can't read deposit log {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line} of the deposit log is not a deposition ID: {content:?}")]
    InvalidId { line: usize, content: String },
}

/// Appends deposition IDs as soon as they are created, so a halted run still leaves a usable log
pub struct DepositLog<W: Write> {
    writer: W,
}

impl DepositLog<File> {
    /// Create `zenodo_deposits_<timestamp>.log` inside `dir`
    pub fn create_in(dir: &Path) -> io::Result<(DepositLog<File>, PathBuf)> {
        let name = format!("zenodo_deposits_{}.log", Local::now().format("%Y%m%d_%H%M%S"));
        let path = dir.join(name);
        info!("Recording deposition IDs in {}", path.display());
        let file = File::create(&path)?;
        Ok((DepositLog::new(file), path))
    }
}

impl<W: Write> DepositLog<W> {
    pub fn new(writer: W) -> DepositLog<W> {
        DepositLog { writer }
    }

    pub fn record(&mut self, id: DepositionId) -> io::Result<()> {
        writeln!(self.writer, "{id}")?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub fn read_deposition_ids(path: &Path) -> Result<Vec<DepositionId>, DepositLogError> {
    let content = fs::read_to_string(path).map_err(|source| DepositLogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_deposition_ids(&content)
}

/// Blank lines are skipped, anything else must parse as an ID
pub fn parse_deposition_ids(content: &str) -> Result<Vec<DepositionId>, DepositLogError> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line, content)| {
            content.parse::<DepositionId>().map_err(|_| DepositLogError::InvalidId {
                line,
                content: content.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_one_id_per_line() {
        let mut log = DepositLog::new(Vec::new());
        log.record(DepositionId(1234)).unwrap();
        log.record(DepositionId(5678)).unwrap();

        let written = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(written, "1234\n5678\n");
    }

    #[test]
    fn parse_skips_blank_lines_and_whitespace() {
        let ids = parse_deposition_ids("  101 \n\n202\n   \n303").unwrap();
        assert_eq!(ids, vec![DepositionId(101), DepositionId(202), DepositionId(303)]);
    }

    #[test]
    fn parse_rejects_non_numeric_lines() {
        let err = parse_deposition_ids("101\nabc\n").unwrap_err();
        match err {
            DepositLogError::InvalidId { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn create_in_writes_a_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let (mut log, path) = DepositLog::create_in(dir.path()).unwrap();
        log.record(DepositionId(42)).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("zenodo_deposits_"));
        assert!(name.ends_with(".log"));
        assert_eq!(read_deposition_ids(&path).unwrap(), vec![DepositionId(42)]);
    }
}
