//! Reconciliation Grid CLI
//!
//! Command-line interface for inspecting grid layouts, editing saved column
//! preferences and exporting pages of rows.
//!
//! # Usage
//!
//! ```bash
//! recon-grid --module batches --user ana export --layout layout.json --rows rows.json > page.csv
//! recon-grid --module batches --user ana hide --layout layout.json valor
//! recon-grid --module batches --user ana move --layout layout.json valor nome
//! recon-grid totals --layout layout.json --rows rows.json --sum liquido=valores.liquido
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=debug`) for more
//! than warnings.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing file, invalid layout, unknown column, etc.)

use recon_grid::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Output goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
