use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::metadata::MetadataError;

/// Columns every task table must carry. Anything else ends up in the deposition description.
pub static REQUIRED_COLUMNS: [&str; 9] = [
    "Software",
    "Version",
    "DOI",
    "DirectLink",
    "FileName",
    "SamplesUsed",
    "Creator",
    "ORCID",
    "Affiliation",
];

/// DOI value marking a row that still has to be uploaded
static NEW_DOI: &str = "new";

/// One row of a task table, describing one deposition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRow {
    pub software: String,
    pub version: String,
    pub doi: String,
    pub direct_link: String,
    /// `;` separated
    pub file_name: String,
    pub samples_used: String,
    /// `;` separated, parallel to `orcid` and `affiliation`
    pub creator: String,
    pub orcid: String,
    pub affiliation: String,
    /// Non-empty cells of the remaining columns, in table order
    pub extra: Vec<(String, String)>,
}

impl MetadataRow {
    /// Rows with a DOI have already been published and must not be uploaded again
    pub fn is_eligible(&self) -> bool {
        self.doi.is_empty() || self.doi.eq_ignore_ascii_case(NEW_DOI)
    }

    pub fn file_names(&self) -> Vec<String> {
        split_list(&self.file_name)
    }

    fn from_record(headers: &StringRecord, record: &StringRecord) -> MetadataRow {
        let mut row = MetadataRow::default();
        for (i, column) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or_default().trim().to_string();
            match column {
                "Software" => row.software = value,
                "Version" => row.version = value,
                "DOI" => row.doi = value,
                "DirectLink" => row.direct_link = value,
                "FileName" => row.file_name = value,
                "SamplesUsed" => row.samples_used = value,
                "Creator" => row.creator = value,
                "ORCID" => row.orcid = value,
                "Affiliation" => row.affiliation = value,
                _ if value.is_empty() => {}
                _ => row.extra.push((column.to_string(), value)),
            }
        }
        row
    }
}

/// Split a `;` separated cell, dropping blanks
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn read_table(path: &Path) -> Result<Vec<MetadataRow>, MetadataError> {
    let file = std::fs::File::open(path).map_err(|err| MetadataError::Read {
        path: path.to_path_buf(),
        source: err.into(),
    })?;
    parse_table(file, path)
}

/// Parse a tab separated task table. `path` is only used in error messages.
pub fn parse_table<R: Read>(reader: R, path: &Path) -> Result<Vec<MetadataRow>, MetadataError> {
    let read_error = |source: csv::Error| MetadataError::Read { path: path.to_path_buf(), source };

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let headers: StringRecord = reader.headers().map_err(read_error)?.iter().map(str::trim).collect();
    if let Some(column) = REQUIRED_COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(MetadataError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_error)?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(MetadataRow::from_record(&headers, &record));
    }
    Ok(rows)
}
