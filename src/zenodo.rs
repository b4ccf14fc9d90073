//! Thin client for the Zenodo deposition REST API

/// Deposition IDs and the parts of API responses that are read back
pub mod deposition;
/// Failures talking to Zenodo
pub mod error;
/// Create, upload, publish and delete depositions
pub mod client;

pub use client::ZenodoClient;
pub use deposition::DepositionId;
pub use error::ZenodoError;
