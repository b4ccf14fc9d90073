//! CAMI Zenodo upload tool
//!
//! Creates a deposition for every task table row marked for upload and uploads the row's files.
//! Deposition IDs are written to `zenodo_deposits_<timestamp>.log` for the publish and delete tools.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use cami_zenodo::cli::{ConnectionArgs, LogArgs};
use cami_zenodo::deposit_log::DepositLog;
use cami_zenodo::logging;
use cami_zenodo::upload::Uploader;

#[derive(Parser, Debug)]
#[command(version, about = "CAMI Zenodo upload tool")]
struct Args {
    /// GitHub directory [default: current working directory]
    #[arg(long = "github_dir")]
    github_dir: Option<PathBuf>,

    /// Directory containing files to be uploaded
    #[arg(long = "files_dir")]
    files_dir: PathBuf,

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

    match upload(&args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            error!("Upload stopped after a failed deposition");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns false if the run was halted by Zenodo rejecting a request
async fn upload(args: &Args) -> anyhow::Result<bool> {
    let cwd = env::current_dir().context("Can't read current working directory")?;
    let github_dir = args.github_dir.clone().unwrap_or_else(|| cwd.clone());
    info!("Uploading datasets described in {} to Zenodo {}", github_dir.display(), args.connection.instance());

    let client = args.connection.client()?;
    let (deposits, _) = DepositLog::create_in(&cwd).context("Can't create deposit log")?;
    let mut uploader = Uploader::new(&client, &args.files_dir, deposits)?;
    let summary = uploader.run(&github_dir).await?;

    Ok(!summary.halted())
}
