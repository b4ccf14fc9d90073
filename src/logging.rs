//! Console and file logging for the command line tools
//!
//! Library code only uses the `log` macros. Each binary builds its own sinks once at startup with
//! [`init`], so nothing in the core touches the filesystem to log.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;
use env_logger::{Env, Target};

/// Where log lines go and how they are labelled
pub struct LogConfig {
    /// Shown in brackets on every line, e.g. `[zenodo_upload]`
    pub tool: &'static str,
    /// Appended to in addition to stdout
    pub file: Option<PathBuf>,
}

/// Install the global logger. Default level is info, `RUST_LOG` overrides it.
pub fn init(config: LogConfig) -> io::Result<()> {
    let file = match &config.file {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };
    let tool = config.tool;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(move |buf, record| {
            writeln!(
                buf,
                "{} [{}] {} {}",
                Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                tool,
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(Tee { file })))
        .init();

    Ok(())
}

/// Writes everything to stdout and, if present, to a log file
struct Tee {
    file: Option<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}
