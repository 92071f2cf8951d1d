use anyhow::Result;
use clap::Parser;
use scribe::app::App;
use scribe::config::EditorConfig;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-driven front end for the scribe document engine
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about)]
struct Cli {
    /// Files to open at startup
    files: Vec<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the auto-save interval in milliseconds (0 disables)
    #[arg(long)]
    auto_save_interval_ms: Option<u64>,
}

fn main() -> Result<()> {
    // Log to stderr so status output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EditorConfig::load_or_default(path),
        None => EditorConfig::default(),
    };
    if let Some(interval) = cli.auto_save_interval_ms {
        config.auto_save_interval_ms = interval;
    }

    info!(
        "scribe starting, auto-save every {} ms",
        config.auto_save_interval_ms
    );

    let mut app = App::new(config);
    for path in &cli.files {
        if let Err(e) = app.open(path) {
            eprintln!("{}", e);
        }
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    app.run(stdin.lock(), stdout.lock())?;

    Ok(())
}
