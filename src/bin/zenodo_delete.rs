//! CAMI Zenodo delete tool (delete unpublished depositions)
//!
//! Reads deposition IDs from a deposit log written by `zenodo_upload`. A failure for one ID is
//! logged and the remaining IDs are still processed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use cami_zenodo::batch::{run_batch, BatchAction};
use cami_zenodo::cli::{ConnectionArgs, LogArgs};
use cami_zenodo::deposit_log::read_deposition_ids;
use cami_zenodo::logging;

#[derive(Parser, Debug)]
#[command(version, about = "CAMI Zenodo delete tool (delete unpublished depositions)")]
struct Args {
    /// Log file containing deposition IDs
    logfile: PathBuf,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    log: LogArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = logging::init(args.log.config("zenodo_delete")) {
        eprintln!("Can't open log file {}: {}", args.log.log_file.display(), err);
        return ExitCode::FAILURE;
    }

    let ids = match read_deposition_ids(&args.logfile) {
        Ok(ids) => ids,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let client = match args.connection.client() {
        Ok(client) => client,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    run_batch(&client, BatchAction::Delete, &ids).await;
    ExitCode::SUCCESS
}
