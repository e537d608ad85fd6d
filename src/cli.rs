use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "retro-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A desktop-metaphor personal site in your terminal"
)]
pub struct Cli {
    /// Directory holding the site's static assets (blog index and posts).
    #[arg(long = "site", value_name = "DIR", default_value = "site")]
    pub site: PathBuf,

    /// Most verbose level that gets logged.
    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,

    /// Append logs to this file instead of printing them after exit.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// How long to wait for input before the next tick.
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = 16)]
    pub tick_ms: u64,
}

pub struct Config {
    pub site: PathBuf,
    pub log_level: Level,
    pub log_file: Option<PathBuf>,
    pub tick: Duration,
}

impl TryFrom<Cli> for Config {
    type Error = String;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if !(1..=1000).contains(&cli.tick_ms) {
            return Err("tick-ms must be between 1 and 1000".to_string());
        }
        Ok(Self {
            site: cli.site,
            log_level: cli.log_level,
            log_file: cli.log_file,
            tick: Duration::from_millis(cli.tick_ms),
        })
    }
}
