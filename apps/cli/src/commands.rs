//! CLI definition, tracing setup, and the labeling pipeline.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use conflabel_client::ConfluenceClient;
use conflabel_shared::WikiConfig;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// conflabel — apply a label to entire Confluence hierarchies.
#[derive(Parser)]
#[command(
    name = "conflabel",
    version,
    about = "Apply a label to every page and folder reachable from a file of Confluence URLs.",
    long_about = None,
)]
pub struct Cli {
    /// Label to apply to every discovered page and folder.
    pub label: String,

    /// File of wiki page/folder URLs, one per line.
    pub urls_file: PathBuf,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing. Verbosity is controlled through `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("conflabel=info"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Counts from one labeling run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelSummary {
    /// Identifiers the label was applied to.
    pub labeled: usize,
    /// Identifiers where the label call failed (logged, not fatal).
    pub failed: usize,
}

impl LabelSummary {
    /// Total number of identifiers discovered by the walk.
    pub fn discovered(&self) -> usize {
        self.labeled + self.failed
    }
}

/// Run the CLI: load credentials from the environment and label away.
pub async fn run(cli: Cli) -> Result<()> {
    conflabel_shared::load_dotenv();
    let config = WikiConfig::from_env();

    let summary = label_hierarchy(&cli.label, &cli.urls_file, config).await?;

    println!();
    println!("  Labeling complete");
    println!("  Label:      {}", cli.label);
    println!("  Discovered: {}", summary.discovered());
    println!("  Labeled:    {}", summary.labeled);
    println!("  Failed:     {}", summary.failed);
    println!();

    Ok(())
}

/// Validate the URL file, walk the hierarchy under every root, and apply
/// `label` to each discovered identifier.
///
/// Per-page label failures are logged and counted; they never abort the
/// pass. An unreadable or fully-invalid URL file yields an empty run.
pub async fn label_hierarchy(
    label: &str,
    urls_file: &Path,
    config: WikiConfig,
) -> Result<LabelSummary> {
    let client = ConfluenceClient::new(config)?;

    let roots = conflabel_discovery::read_valid_identifiers(urls_file);
    if roots.is_empty() {
        warn!(?urls_file, "no valid URLs to process");
        return Ok(LabelSummary::default());
    }

    info!(roots = roots.len(), "walking hierarchy");

    let spinner = pipeline_spinner();
    spinner.set_message("Discovering pages and folders");

    let visited = conflabel_walker::discover(&client, &roots).await;

    let mut summary = LabelSummary::default();
    for (n, id) in visited.iter().enumerate() {
        spinner.set_message(format!("Labeling [{}/{}] {id}", n + 1, visited.len()));
        match client.add_label(id, label).await {
            Ok(()) => {
                info!(id = %id, label, "label applied");
                summary.labeled += 1;
            }
            Err(e) => {
                warn!(id = %id, label, error = %e, "failed to apply label");
                summary.failed += 1;
            }
        }
    }
    spinner.finish_and_clear();

    Ok(summary)
}

/// Spinner used while the pipeline talks to the API.
fn pipeline_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("spinner template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
