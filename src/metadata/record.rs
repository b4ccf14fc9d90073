use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::metadata::creators::Creator;
use crate::metadata::row::MetadataRow;
use crate::metadata::MetadataError;

static DESCRIPTION_COLUMN: &str = "Description";
static COMMUNITY: &str = "cami";
static KEYWORDS: [&str; 1] = ["metagenomics"];

/// The `metadata` object sent when creating a deposition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepositionMetadata {
    pub title: String,
    pub upload_type: String,
    pub communities: Vec<Community>,
    pub description: String,
    pub creators: Vec<Creator>,
    pub access_right: String,
    pub license: String,
    pub version: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Community {
    pub identifier: String,
}

/// Metadata plus the local files that belong in the deposition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositionRecord {
    pub metadata: DepositionMetadata,
    pub files: Vec<String>,
}

/// Rendering context for the title
#[derive(Serialize)]
struct TitleContext<'a> {
    software: &'a str,
    version: &'a str,
    task: &'a str,
    dataset: &'a str,
    samples: &'a str,
}

pub fn build_record(
    row: &MetadataRow,
    task_description: &str,
    dataset_description: &str,
) -> Result<DepositionRecord, MetadataError> {
    let metadata = DepositionMetadata {
        title: render_title(row, task_description, dataset_description)?,
        upload_type: "dataset".to_string(),
        communities: vec![Community { identifier: COMMUNITY.to_string() }],
        description: compose_description(row),
        creators: row.creators()?,
        access_right: "open".to_string(),
        license: "cc-by".to_string(),
        version: row.version.clone(),
        keywords: KEYWORDS.iter().map(|k| k.to_string()).collect(),
    };

    Ok(DepositionRecord { metadata, files: row.file_names() })
}

/// Render the title using TinyTemplate, e.g. "MEGAHIT 1.1 assembly of the CAMI II mouse gut, samples 1-64"
fn render_title(row: &MetadataRow, task: &str, dataset: &str) -> Result<String, MetadataError> {
    /// included title template
    static TITLE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/title.txt"));
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("title", TITLE).map_err(MetadataError::Title)?;

    let context = TitleContext {
        software: &row.software,
        version: &row.version,
        task,
        dataset,
        samples: &row.samples_used,
    };
    let title = tt.render("title", &context).map_err(MetadataError::Title)?;
    // empty cells leave gaps between words
    Ok(title.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Free text from the Description column first, then every other extra column as "name: value"
fn compose_description(row: &MetadataRow) -> String {
    let explicit = row
        .extra
        .iter()
        .filter(|(column, _)| column == DESCRIPTION_COLUMN)
        .map(|(_, value)| value.clone());
    let fields = row
        .extra
        .iter()
        .filter(|(column, _)| column != DESCRIPTION_COLUMN)
        .map(|(column, value)| format!("{column}: {value}"));

    explicit.chain(fields).collect::<Vec<_>>().join("<br>")
}
