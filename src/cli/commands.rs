use crate::cli::args::{CliArgs, Command, LayoutArgs, PageArgs};
use crate::config::GridConfig;
use crate::core::{FooterSum, GridEngine, GridListener};
use crate::io::{read_layout, read_rows, write_export_csv, FilePreferenceStore};
use crate::types::{GridError, PaginationState};
use serde_json::Value;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Execute a parsed command, writing its result to `output`
///
/// # Errors
///
/// Returns the first error from reading the layout or rows, from the
/// preference store, or from writing output. Unknown column ids given to
/// `hide`, `show` and `move` are reported as `GridError::UnknownColumn`.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), GridError> {
    let config = args.to_grid_config();
    match &args.command {
        Command::Export(page) => {
            let engine = load_page(args, config, page, Vec::new())?;
            write_export_csv(engine.rows(), engine.export_columns(), output)
        }
        Command::Totals { page, sums } => {
            let engine = load_page(args, config, page, sums.clone())?;
            for sum in sums {
                writeln!(output, "{}\t{}", sum.column, engine.footer(&sum.column))?;
            }
            Ok(())
        }
        Command::Hide { layout, column } => {
            let mut engine = open_engine(args, config, layout, PageRequests::default())?;
            require_column(&engine, column)?;
            if !engine.set_column_visible(column, false) {
                tracing::warn!("Column '{}' is already hidden or cannot be hidden", column);
            }
            save_and_list(&mut engine, output)
        }
        Command::Show { layout, column } => {
            let mut engine = open_engine(args, config, layout, PageRequests::default())?;
            require_column(&engine, column)?;
            if !engine.set_column_visible(column, true) {
                tracing::warn!("Column '{}' is already visible", column);
            }
            save_and_list(&mut engine, output)
        }
        Command::Move { layout, from, to } => {
            let mut engine = open_engine(args, config, layout, PageRequests::default())?;
            require_column(&engine, from)?;
            require_column(&engine, to)?;
            engine.reorder_columns(from, to);
            save_and_list(&mut engine, output)
        }
        Command::Reset { layout } => {
            let mut engine = open_engine(args, config, layout, PageRequests::default())?;
            engine.reset_columns();
            save_and_list(&mut engine, output)
        }
        Command::Columns { layout } => {
            let engine = open_engine(args, config, layout, PageRequests::default())?;
            list_columns(&engine, output)
        }
    }
}

/// Records the page the engine asks the data source for
#[derive(Clone, Default)]
struct PageRequests(Rc<RefCell<Option<PaginationState>>>);

impl PageRequests {
    fn take(&self) -> Option<PaginationState> {
        self.0.borrow_mut().take()
    }
}

impl GridListener<Value> for PageRequests {
    fn pagination_changed(&mut self, state: PaginationState) {
        *self.0.borrow_mut() = Some(state);
    }
}

/// Slices a rows file into pages, standing in for a paged backend
struct PageSource {
    rows: Vec<Value>,
}

impl PageSource {
    fn page_count(&self, page_size: usize) -> usize {
        self.rows.len().div_ceil(page_size.max(1))
    }

    fn fetch(&self, state: PaginationState) -> (Vec<Value>, usize) {
        let size = state.page_size.max(1);
        let rows = self
            .rows
            .iter()
            .skip(state.page_index.saturating_mul(size))
            .take(size)
            .cloned()
            .collect();
        (rows, self.page_count(size))
    }
}

fn open_engine(
    args: &CliArgs,
    config: GridConfig,
    layout: &LayoutArgs,
    requests: PageRequests,
) -> Result<GridEngine<Value>, GridError> {
    let columns = read_layout(&layout.layout)?;
    let store = FilePreferenceStore::new(&args.prefs_dir);
    let mut engine = GridEngine::new(config, columns, Box::new(store)).with_listener(requests);
    engine.mount(&args.user);
    Ok(engine)
}

/// Mount a grid and drive it to the requested page
///
/// The first page is delivered, then navigation goes through the engine so the
/// fetch follows its pagination event like a UI-driven data source would.
fn load_page(
    args: &CliArgs,
    config: GridConfig,
    page: &PageArgs,
    sums: Vec<FooterSum>,
) -> Result<GridEngine<Value>, GridError> {
    let source = PageSource {
        rows: read_rows(&page.rows)?,
    };
    let requests = PageRequests::default();
    let mut engine = open_engine(args, config, &page.layout, requests.clone())?.with_footer_sums(sums);

    let (rows, page_count) = source.fetch(engine.pagination());
    if page.page > 0 && page.page >= page_count {
        return Err(GridError::Export {
            message: format!("page {} out of range ({} page(s))", page.page, page_count),
        });
    }
    engine.set_data(rows, page_count);

    engine.goto_page(page.page);
    if let Some(state) = requests.take() {
        let (rows, page_count) = source.fetch(state);
        engine.set_data(rows, page_count);
    }
    engine.tick();
    Ok(engine)
}

fn require_column(engine: &GridEngine<Value>, id: &str) -> Result<(), GridError> {
    match engine.columns().column(id) {
        Some(column) if !column.is_stub() => Ok(()),
        _ => Err(GridError::unknown_column(id)),
    }
}

fn save_and_list(engine: &mut GridEngine<Value>, output: &mut dyn Write) -> Result<(), GridError> {
    engine.save_preferences()?;
    list_columns(engine, output)?;
    if let Some(notice) = engine.take_notice() {
        writeln!(output, "{}", notice)?;
    }
    Ok(())
}

/// One line per column in display order: id, state and header
fn list_columns(engine: &GridEngine<Value>, output: &mut dyn Write) -> Result<(), GridError> {
    let model = engine.columns();
    for column in model.columns() {
        let state = if column.is_stub() {
            "stale"
        } else if model.is_visible(&column.id) {
            "visible"
        } else {
            "hidden"
        };
        writeln!(output, "{}\t{}\t{}", column.id, state, column.header.display())?;
    }
    Ok(())
}
