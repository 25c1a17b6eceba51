use crate::config::{CurrencyFormat, GridConfig};
use crate::core::FooterSum;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and export reconciliation grids offline
#[derive(Parser, Debug)]
#[command(name = "recon-grid")]
#[command(about = "Inspect and export reconciliation grids with saved column preferences", long_about = None)]
pub struct CliArgs {
    /// Directory holding saved column preferences
    #[arg(
        long = "prefs-dir",
        value_name = "DIR",
        default_value = ".recon-grid",
        global = true,
        help = "Directory holding saved column preferences"
    )]
    pub prefs_dir: PathBuf,

    /// Screen whose preferences are used (e.g. clients, batches)
    #[arg(
        long = "module",
        value_name = "MODULE",
        default_value = "default",
        global = true
    )]
    pub module: String,

    /// User whose preferences are used
    #[arg(long = "user", value_name = "USER", default_value = "anonymous", global = true)]
    pub user: String,

    /// Currency used for totals
    #[arg(
        long = "currency",
        value_name = "CODE",
        default_value = "brl",
        global = true,
        value_parser = parse_currency,
        help = "Currency for totals: 'brl' or 'usd'"
    )]
    pub currency: CurrencyFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write one page as CSV using the saved column projection
    Export(PageArgs),
    /// Print footer totals for one page
    Totals {
        #[command(flatten)]
        page: PageArgs,
        /// Column total as COLUMN=PATH (repeatable)
        #[arg(long = "sum", value_name = "COLUMN=PATH", value_parser = parse_sum, required = true)]
        sums: Vec<FooterSum>,
    },
    /// Hide a column and save preferences
    Hide {
        #[command(flatten)]
        layout: LayoutArgs,
        column: String,
    },
    /// Show a column and save preferences
    Show {
        #[command(flatten)]
        layout: LayoutArgs,
        column: String,
    },
    /// Move a column onto another column's position and save preferences
    Move {
        #[command(flatten)]
        layout: LayoutArgs,
        from: String,
        to: String,
    },
    /// Restore the declared layout and save preferences
    Reset {
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Print the resolved columns with their visibility
    Columns {
        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// JSON column layout file
    #[arg(long = "layout", value_name = "FILE")]
    pub layout: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// JSON array of rows acting as the data source
    #[arg(long = "rows", value_name = "FILE")]
    pub rows: PathBuf,

    /// Zero-based page index
    #[arg(long = "page", value_name = "INDEX", default_value_t = 0)]
    pub page: usize,

    /// Rows per page (default: 10)
    #[arg(long = "page-size", value_name = "SIZE")]
    pub page_size: Option<usize>,
}

impl CliArgs {
    /// Build a GridConfig from CLI arguments
    ///
    /// Zero page sizes and blank modules fall back to defaults with a warning.
    pub fn to_grid_config(&self) -> GridConfig {
        let page_size = match &self.command {
            Command::Export(page) | Command::Totals { page, .. } => page.page_size,
            _ => None,
        };
        GridConfig::new(
            &self.module,
            page_size.unwrap_or(GridConfig::default().page_size),
        )
        .with_currency(self.currency.clone())
    }
}

fn parse_currency(code: &str) -> Result<CurrencyFormat, String> {
    CurrencyFormat::from_code(code).ok_or_else(|| format!("unsupported currency '{}'", code))
}

fn parse_sum(value: &str) -> Result<FooterSum, String> {
    match value.split_once('=') {
        Some((column, path)) if !column.trim().is_empty() && !path.trim().is_empty() => {
            Ok(FooterSum::new(column.trim(), path.trim()))
        }
        _ => Err(format!("expected COLUMN=PATH, got '{}'", value)),
    }
}
