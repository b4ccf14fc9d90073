//! Deposition metadata derived from task tables
//!
//! Every dataset folder holds tab separated task tables (one row per uploadable result) and a
//! one-line `description.txt`. Rows still marked for upload are turned into the `metadata` object
//! Zenodo expects when creating a deposition.

use std::path::{Path, PathBuf};

use log::info;

/// Parse task tables into typed rows
pub mod row;
/// Align Creator, Affiliation and ORCID lists
pub mod creators;
/// Build the deposition metadata record for one row
pub mod record;

pub use creators::Creator;
pub use record::{DepositionMetadata, DepositionRecord};
pub use row::MetadataRow;

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Can't read task table {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("File {} is missing column {column}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("The number of Creators ({creators}) and ORCIDs ({orcids}) do not match")]
    CreatorOrcidMismatch { creators: usize, orcids: usize },

    #[error("Can't render deposition title")]
    Title(#[source] tinytemplate::error::Error),
}

/// Build a record for every row of a task table that hasn't been uploaded yet
///
/// An empty result means there is nothing to do for this table, it isn't an error.
pub fn load_records(
    table_path: &Path,
    task_description: &str,
    dataset_description: &str,
) -> Result<Vec<DepositionRecord>, MetadataError> {
    let rows = row::read_table(table_path)?;
    let total = rows.len();

    let records = rows
        .iter()
        .filter(|row| row.is_eligible())
        .map(|row| record::build_record(row, task_description, dataset_description))
        .collect::<Result<Vec<_>, _>>()?;

    info!("{} of {} rows in {} are marked for upload", records.len(), total, table_path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    static HEADER: &str = "Software\tVersion\tDOI\tDirectLink\tFileName\tSamplesUsed\tCreator\tORCID\tAffiliation\tDescription\n";

    #[test]
    fn only_rows_marked_new_or_blank_become_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assembly.tsv");
        let content = format!(
            "{HEADER}\
             MEGAHIT\t1.0\tNEW\t\ta.fa\tS1\tA\t\tX\tfirst\n\
             SPAdes\t3.1\t10.5281/zenodo.1\t\tb.fa\tS1\tA\t\tX\tdone\n\
             metaSPAdes\t3.2\t\t\tc.fa\tS2\tA\t\tX\tthird\n"
        );
        fs::write(&path, content).unwrap();

        let records = load_records(&path, "assembly", "CAMI II mouse gut").unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.metadata.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "MEGAHIT 1.0 assembly of the CAMI II mouse gut, samples S1",
                "metaSPAdes 3.2 assembly of the CAMI II mouse gut, samples S2",
            ]
        );
    }

    #[test]
    fn table_without_eligible_rows_is_empty_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genome_binning.tsv");
        fs::write(&path, format!("{HEADER}MetaBAT\t2\t10.5281/zenodo.2\t\tm.tsv\tS1\tA\t\tX\t\n")).unwrap();

        assert!(load_records(&path, "genome binning", "CAMI").unwrap().is_empty());
    }

    #[test]
    fn creator_orcid_mismatch_stops_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assembly.tsv");
        fs::write(&path, format!("{HEADER}Tool\t1.0\tnew\t\ta.fa\tS1\tA;B\t111\t\t\n")).unwrap();

        let err = load_records(&path, "assembly", "CAMI").unwrap_err();
        assert!(matches!(err, MetadataError::CreatorOrcidMismatch { creators: 2, orcids: 1 }));
    }
}
