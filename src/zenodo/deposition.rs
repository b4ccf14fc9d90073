use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque numeric identifier Zenodo assigns to a new deposition
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DepositionId(pub u64);

impl fmt::Display for DepositionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DepositionId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(DepositionId)
    }
}

#[derive(Debug, Deserialize)]
pub struct Deposition {
    pub id: DepositionId,
    #[serde(default)]
    pub links: DepositionLinks,
}

#[derive(Debug, Default, Deserialize)]
pub struct DepositionLinks {
    /// Storage endpoint accepting raw `PUT <bucket>/<filename>` uploads
    pub bucket: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_create_response() {
        let json = r#"{"id": 1234, "links": {"bucket": "https://zenodo.org/api/files/abc"}, "state": "unsubmitted"}"#;
        let deposition: Deposition = serde_json::from_str(json).unwrap();
        assert_eq!(deposition.id, DepositionId(1234));
        assert_eq!(deposition.links.bucket.as_deref(), Some("https://zenodo.org/api/files/abc"));
    }

    #[test]
    fn links_are_optional() {
        let deposition: Deposition = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(deposition.id.to_string(), "7");
        assert!(deposition.links.bucket.is_none());
    }
}
