//! Automate CAMI result depositions on Zenodo
//!
//! Task tables in a metadata tree describe result files. The upload tool turns rows that are still
//! marked `new` into Zenodo depositions and uploads their files. The publish and delete tools work
//! through the deposit log the upload tool leaves behind.

/// Production and sandbox hosts
pub mod instance;
/// Options shared by the command line tools
pub mod cli;
/// Logging sinks for the command line tools
pub mod logging;
/// Read and write deposition ID logs
pub mod deposit_log;
/// Derive deposition metadata from task tables
pub mod metadata;
/// Find dataset folders and task tables
pub mod scan;
/// Zenodo deposition API client
pub mod zenodo;
/// Create depositions and upload their files
pub mod upload;
/// Publish or delete depositions in bulk
pub mod batch;
