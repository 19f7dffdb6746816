//! sortviz: watch bubble sort and merge sort work, one frame at a time.

mod logging;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use sortviz_core::SessionConfig;

#[derive(Parser)]
#[command(name = "sortviz")]
#[command(about = "sortviz — step-by-step sorting visualizer for the terminal")]
#[command(version = sortviz_core::VERSION)]
struct Cli {
    /// Milliseconds between animation frames
    #[arg(long, default_value = "750")]
    delay_ms: u64,

    /// Seed the random list generator for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Largest list size accepted in the count field
    #[arg(long, default_value = "500")]
    max_count: usize,

    /// Preselect the sorting algorithm
    #[arg(long, value_parser = ["bubble", "merge"])]
    algorithm: Option<String>,

    /// Generate a list of this many numbers on start (needs --algorithm)
    #[arg(long)]
    count: Option<String>,

    /// Skip the welcome screen
    #[arg(long)]
    skip_welcome: bool,

    /// Append log records to this file. Level from RUST_LOG (default: warn)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_file.as_deref()) {
        eprintln!("Cannot open log file: {e}");
        std::process::exit(1);
    }

    let config = SessionConfig {
        step_delay: Duration::from_millis(cli.delay_ms),
        max_count: cli.max_count,
        seed: cli.seed,
        ..Default::default()
    };

    let mut app = tui::app::App::new(config);
    if let Some(algorithm) = cli.algorithm.as_deref() {
        app.choose_algorithm(tui::app::parse_algorithm(algorithm));
    }
    if let Some(count) = cli.count.as_deref() {
        app.submit(count);
    }
    if cli.skip_welcome || cli.count.is_some() {
        app.open_sorter();
    }

    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
