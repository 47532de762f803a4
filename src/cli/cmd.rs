use anyhow::Result;
use chrono::Utc;
use std::io::{stdout, Write};

use crate::context::Session;
use crate::extract;
use crate::format;
use crate::layout;
use crate::style::Style;

const BANNER: &str = r"
 ____  ____  ____
|  _ \|  _ \/ ___|
| |_) | |_) \___ \
|  __/|  __/ ___) |
|_|   |_|   |____/
";

pub fn version() -> Result<()> {
    let colored = termion::is_tty(&stdout());
    let mut stdout = stdout().lock();
    writeln!(stdout, "{}", Style::Title.paint(BANNER, colored))?;
    writeln!(stdout, "Version: {}\n", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

/// Raw records, keyed by container name. Independent of the table path.
pub async fn json(session: &Session) -> Result<()> {
    let containers = extract::running_containers(&session.docker, &session.local_ip).await?;
    let mut stdout = stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &containers)?;
    writeln!(stdout)?;
    Ok(())
}

pub async fn tables(session: &Session) -> Result<()> {
    let containers = extract::running_containers(&session.docker, &session.local_ip).await?;
    tracing::info!(count = containers.len(), "rendering containers");

    let rows = format::display_rows(&containers, &session.local_ip, Utc::now().naive_utc())?;
    let mut stdout = stdout().lock();
    for table in layout::container_tables(&rows) {
        for line in table.render(session.colored) {
            writeln!(stdout, "{line}")?;
        }
    }
    stdout.flush()?;
    Ok(())
}
