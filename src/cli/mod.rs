mod cmd;

use anyhow::Result;
use clap::Parser;

use crate::config;
use crate::context::Session;

#[derive(Parser, Debug)]
#[command(author, about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Print the version information
    #[arg(short, long)]
    version: bool,
    /// Print the raw container data as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Version,
    Json,
    Tables,
}

impl From<&Cli> for Mode {
    fn from(cli: &Cli) -> Self {
        if cli.version {
            Mode::Version
        } else if cli.json {
            Mode::Json
        } else {
            Mode::Tables
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    match Mode::from(&cli) {
        Mode::Version => cmd::version()?,
        Mode::Json => cmd::json(&open_session().await?).await?,
        Mode::Tables => cmd::tables(&open_session().await?).await?,
    };
    Ok(())
}

async fn open_session() -> Result<Session> {
    let cfg = config::get_config().await?;
    tracing::debug!("using config:\n{cfg}");
    Session::open(&cfg)
}
