//! gridstate - Entry Point
//!
//! Loads rows, replays table events against the engine and prints the derived
//! view as JSON.

use clap::Parser;
use gridstate::config::{self, CliOverrides};
use gridstate::model::{AppError, ColumnSpec, RowId};
use gridstate::state::{SelectionMode, TableEvent};
use std::path::PathBuf;
use tracing::info;

/// Sort, select and paginate JSON rows, printing the resulting table view
#[derive(Parser, Debug)]
#[command(name = "gridstate")]
#[command(version)]
#[command(about = "Replay table events against JSON rows and print the derived view")]
pub struct Args {
    /// Path to a JSON array or JSON Lines file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rows per page (must be positive)
    #[arg(short, long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub page_size: Option<usize>,

    /// Selection mode
    #[arg(short, long, value_parser = ["single", "multiple"])]
    pub mode: Option<String>,

    /// Disable row selection
    #[arg(long)]
    pub no_select: bool,

    /// Comma-separated column keys (inferred from the first row if omitted)
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Table event to apply, in order (sort:KEY, select:ID, select-all, next,
    /// prev, page:N, first, last, clear-sort, clear-selection)
    #[arg(short, long = "event")]
    pub events: Vec<TableEvent<RowId>>,

    /// Print each selection notification to stderr as one JSON line
    #[arg(long)]
    pub print_selections: bool,

    /// Print the view on one line instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Path to log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Overrides for the flags that were explicitly set.
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            page_size: self.page_size,
            selection_mode: self.mode.as_deref().map(|mode| match mode {
                "single" => SelectionMode::Single,
                _ => SelectionMode::Multiple,
            }),
            selectable: self.no_select.then_some(false),
            columns: self.columns.as_ref().map(|keys| {
                keys.iter()
                    .filter(|key| !key.is_empty())
                    .map(ColumnSpec::for_field)
                    .collect()
            }),
            log_file_path: self.log_file.clone(),
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged)?;
        config::apply_cli_overrides(with_env, args.cli_overrides())
    };

    gridstate::logging::init(&config.log_file_path, &config.log_level)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let table_config = config.table_config()?;
    let rows = gridstate::source::detect_input_source(args.file.clone())?.load_rows()?;
    let columns = gridstate::integration::build_columns(config.columns.as_deref(), &rows);

    let run = gridstate::integration::run_script(rows, columns, table_config, &args.events)?;

    if args.print_selections {
        for payload in &run.notifications {
            eprintln!("{}", serde_json::to_string(payload)?);
        }
    }
    println!(
        "{}",
        gridstate::integration::render_view(&run.table, args.compact)?
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Args::parse())?;
    Ok(())
}
