//! Upload a single file to an existing Zenodo deposition through its bucket

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use cami_zenodo::cli::{ConnectionArgs, LogArgs};
use cami_zenodo::logging;
use cami_zenodo::zenodo::DepositionId;

#[derive(Parser, Debug)]
#[command(version, about = "Upload a single file to a Zenodo deposition")]
struct Args {
    /// File to be uploaded
    #[arg(long)]
    file: PathBuf,

    /// Zenodo deposition id
    #[arg(long = "deposition_id")]
    deposition_id: DepositionId,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    log: LogArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = logging::init(args.log.config("zenodo_upload")) {
        eprintln!("Can't open log file {}: {}", args.log.log_file.display(), err);
        return ExitCode::FAILURE;
    }

    let client = match args.connection.client() {
        Ok(client) => client,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    info!("Uploading {}", args.file.display());
    match client.upload_to_bucket(args.deposition_id, &args.file).await {
        Ok(()) => {
            info!("Check your upload at {}", client.deposit_page(args.deposition_id));
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
