pub mod cli;
pub mod config;
pub mod context;
pub mod extract;
pub mod format;
pub mod layout;
pub mod logging;
pub mod style;
pub mod table;

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();
    cli::run().await?;
    Ok(())
}
