//! Command line options shared by all tools

use std::path::PathBuf;

use clap::Args;

use crate::instance::ZenodoInstance;
use crate::logging::LogConfig;
use crate::zenodo::{ZenodoClient, ZenodoError};

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Zenodo access token
    #[arg(long = "zenodo_token", env = "ZENODO_TOKEN", hide_env_values = true)]
    pub zenodo_token: String,

    /// Sandbox test
    #[arg(long)]
    pub sandbox: bool,
}

impl ConnectionArgs {
    pub fn instance(&self) -> ZenodoInstance {
        ZenodoInstance::from_sandbox_flag(self.sandbox)
    }

    pub fn client(&self) -> Result<ZenodoClient, ZenodoError> {
        ZenodoClient::new(self.instance(), self.zenodo_token.as_str())
    }
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Log file, written in addition to stdout
    #[arg(long = "log_file", default_value = "zenodo_tools.log")]
    pub log_file: PathBuf,

    /// Only log to stdout
    #[arg(long = "no_log_file")]
    pub no_log_file: bool,
}

impl LogArgs {
    pub fn config(&self, tool: &'static str) -> LogConfig {
        LogConfig {
            tool,
            file: match self.no_log_file {
                true => None,
                false => Some(self.log_file.clone()),
            },
        }
    }
}
