use log::warn;
use serde::Serialize;

use crate::metadata::row::{split_list, MetadataRow};
use crate::metadata::MetadataError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Creator {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
}

impl MetadataRow {
    pub fn creators(&self) -> Result<Vec<Creator>, MetadataError> {
        align_creators(&self.creator, &self.affiliation, &self.orcid)
    }
}

/// Zip the `;` separated Creator, Affiliation and ORCID cells into creator records
///
/// ORCIDs must match creators one to one. Affiliations either match one to one or the first one is
/// shared by every creator.
pub fn align_creators(creator: &str, affiliation: &str, orcid: &str) -> Result<Vec<Creator>, MetadataError> {
    let names = split_list(creator);
    let affiliations = split_list(affiliation);
    let orcids = split_list(orcid);

    if !orcids.is_empty() && orcids.len() != names.len() {
        return Err(MetadataError::CreatorOrcidMismatch {
            creators: names.len(),
            orcids: orcids.len(),
        });
    }

    let affiliation_for = |i: usize| -> Option<String> {
        if affiliations.len() == names.len() {
            affiliations.get(i).cloned()
        } else {
            affiliations.first().cloned()
        }
    };

    if affiliations.len() > 1 && affiliations.len() != names.len() {
        warn!(
            "{} affiliations given for {} creators, using {} for everyone",
            affiliations.len(),
            names.len(),
            affiliations[0]
        );
    }

    let creators = names
        .iter()
        .enumerate()
        .map(|(i, name)| Creator {
            name: name.clone(),
            affiliation: affiliation_for(i),
            orcid: orcids.get(i).cloned(),
        })
        .collect();

    Ok(creators)
}
