use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ZenodoError {
    /// Zenodo answered with an unexpected status. The body is not kept for 500 responses because
    /// Zenodo doesn't guarantee it's parseable.
    #[error("An error occurred while {operation}. Status code: {status}.{}", body_suffix(.body))]
    Status {
        operation: String,
        status: u16,
        body: Option<String>,
    },

    #[error("Request failed while {operation}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response while {operation}")]
    MalformedResponse {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Deposition {id} has no bucket link")]
    MissingBucket { id: String },

    #[error("Bucket link {url} can't take a file name")]
    BucketUrl { url: String },

    #[error("Invalid URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Can't read {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Can't build HTTP client")]
    Client(#[source] reqwest::Error),
}

impl ZenodoError {
    /// HTTP status of a rejected request, if Zenodo answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ZenodoError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) if !body.trim().is_empty() => format!(" {}", body.trim()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_echoes_body() {
        let err = ZenodoError::Status {
            operation: "creating deposition".to_string(),
            status: 400,
            body: Some(r#"{"message": "Validation error."}"#.to_string()),
        };
        assert_eq!(
            err.to_string(),
            r#"An error occurred while creating deposition. Status code: 400. {"message": "Validation error."}"#
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn status_error_without_body_only_reports_code() {
        let err = ZenodoError::Status {
            operation: "uploading a.fasta".to_string(),
            status: 500,
            body: None,
        };
        assert_eq!(err.to_string(), "An error occurred while uploading a.fasta. Status code: 500.");
    }
}
