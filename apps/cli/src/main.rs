//! conflabel CLI — bulk-label Confluence wiki hierarchies.
//!
//! `conflabel <label> <urls-file>` validates the URLs, walks the descendant
//! pages and folders of each one, and applies the label to everything found.

use clap::Parser;
use color_eyre::eyre::Result;

use conflabel_cli::commands::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Missing arguments exit with code 1, not clap's default 2.
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(1);
    });

    commands::init_tracing();
    commands::run(cli).await
}
