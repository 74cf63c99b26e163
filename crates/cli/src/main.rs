// Tabula CLI - headless CSV viewing and editing

mod exit_codes;
mod util;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use tabula_config::recents::RecentFiles;
use tabula_config::settings::Settings;
use tabula_engine::document::Document;
use tabula_engine::sort::SortDirection;
use tabula_io::codec::parse_record;
use tabula_io::csv::{document_text, load_path, save_path, LoadedFile};
use tabula_io::error::IoError;
use tabula_io::clipboard;

use exit_codes::{EXIT_DECODE, EXIT_IO, EXIT_NO_MATCHES, EXIT_SUCCESS, EXIT_USAGE};
use util::{display_cell, parse_row_list, print_table, resolve_column, resolve_columns};

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Headless viewer and editor for CSV files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a file as an aligned table with a status line
    #[command(after_help = "\
Examples:
  tabula show data.csv
  tabula show big.csv --limit 100
  tabula show big.csv --full")]
    Show {
        /// CSV file to load
        file: PathBuf,

        /// Keep at most this many body rows (forces a preview)
        #[arg(long)]
        limit: Option<usize>,

        /// Load everything, ignoring the large-file preview threshold
        #[arg(long, conflicts_with = "limit")]
        full: bool,
    },

    /// Sort rows by one column and print or write the result
    #[command(after_help = "\
Examples:
  tabula sort data.csv Age
  tabula sort data.csv Age --desc -o sorted.csv
  tabula sort data.csv 2")]
    Sort {
        /// CSV file to load
        file: PathBuf,

        /// Column to sort by: header name or 1-based position
        column: String,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Rewrite FILE itself
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
    },

    /// Find cells containing a query, case-insensitively
    #[command(after_help = "\
Examples:
  tabula find data.csv ann
  tabula find data.csv 42 --columns Amount,Total

Exits 1 when nothing matches, like grep.")]
    Find {
        /// CSV file to load
        file: PathBuf,

        /// Text to look for (case-insensitive substring)
        query: String,

        /// Restrict the search to these columns. Repeatable;
        /// comma-separated accepted.
        #[arg(long, value_name = "COLS")]
        columns: Vec<String>,
    },

    /// Delete rows or columns and print or write the result
    #[command(after_help = "\
Examples:
  tabula drop data.csv --rows 2,5
  tabula drop data.csv --columns Notes -o slim.csv")]
    Drop {
        /// CSV file to load
        file: PathBuf,

        /// 1-based row numbers to delete. Repeatable; comma-separated
        /// accepted.
        #[arg(long, value_name = "ROWS")]
        rows: Vec<String>,

        /// Columns to delete: header names or 1-based positions
        #[arg(long, value_name = "COLS")]
        columns: Vec<String>,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Rewrite FILE itself
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
    },

    /// Insert a column and print or write the result
    AddCol {
        /// CSV file to load
        file: PathBuf,

        /// Header name for the new column
        name: String,

        /// 1-based position to insert at (default: append at the end)
        #[arg(long)]
        at: Option<usize>,

        /// Cell value for every existing row
        #[arg(long, default_value = "")]
        fill: String,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Rewrite FILE itself
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
    },

    /// Insert a row and print or write the result
    AddRow {
        /// CSV file to load
        file: PathBuf,

        /// 1-based position to insert at (default: append at the end)
        #[arg(long)]
        at: Option<usize>,

        /// Cell values as one CSV record, e.g. 'Ann,30'
        #[arg(long)]
        values: Option<String>,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Rewrite FILE itself
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
    },

    /// Print the copy block for selected rows or columns
    #[command(after_help = "\
Examples:
  tabula copy data.csv
  tabula copy data.csv --rows 1,3
  tabula copy data.csv --columns Name")]
    Copy {
        /// CSV file to load
        file: PathBuf,

        /// 1-based row numbers to cover (default: whole grid)
        #[arg(long, value_name = "ROWS")]
        rows: Vec<String>,

        /// Columns to cover: header names or 1-based positions
        #[arg(long, value_name = "COLS")]
        columns: Vec<String>,
    },

    /// List recently opened files, most recent first
    Recent {
        /// Forget all recent files
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Show { file, limit, full } => cmd_show(file, limit, full),
        Commands::Sort {
            file,
            column,
            desc,
            output,
            in_place,
        } => cmd_sort(file, column, desc, output, in_place),
        Commands::Find {
            file,
            query,
            columns,
        } => cmd_find(file, query, columns),
        Commands::Drop {
            file,
            rows,
            columns,
            output,
            in_place,
        } => cmd_drop(file, rows, columns, output, in_place),
        Commands::AddCol {
            file,
            name,
            at,
            fill,
            output,
            in_place,
        } => cmd_add_col(file, name, at, fill, output, in_place),
        Commands::AddRow {
            file,
            at,
            values,
            output,
            in_place,
        } => cmd_add_row(file, at, values, output, in_place),
        Commands::Copy {
            file,
            rows,
            columns,
        } => cmd_copy(file, rows, columns),
        Commands::Recent { clear } => cmd_recent(clear),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_IO,
            message: msg.into(),
            hint: None,
        }
    }

    /// Exit with `code` but print nothing.
    pub fn silent(code: u8) -> Self {
        Self {
            code,
            message: String::new(),
            hint: None,
        }
    }

    /// Map a file error onto the exit-code contract.
    pub fn from_io(err: IoError) -> Self {
        let code = match err {
            IoError::Decode(_) => EXIT_DECODE,
            IoError::Read(_) | IoError::Write(_) => EXIT_IO,
        };
        Self {
            code,
            message: err.to_string(),
            hint: None,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Loads a file and records it in the recent list, like an open in the
/// grid view would.
fn load_document(file: &Path, limit: Option<usize>) -> Result<LoadedFile, CliError> {
    let loaded = load_path(file, limit).map_err(CliError::from_io)?;
    remember_file(file);
    Ok(loaded)
}

/// Best-effort recents update; failures only log.
fn remember_file(file: &Path) {
    let stored = fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf());
    let mut recents = RecentFiles::load();
    recents.record(&stored);
    if let Err(e) = recents.save() {
        log::warn!("could not save recent files: {e}");
    }
}

/// Write to `output`, or print CSV text to stdout when there is none.
fn write_output(document: &Document, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => save_path(document, path).map_err(CliError::from_io),
        None => {
            print!("{}", document_text(document));
            Ok(())
        }
    }
}

/// Where an editing command should write: `-o PATH`, the loaded file for
/// `--in-place`, or stdout.
fn effective_output(file: &Path, output: Option<PathBuf>, in_place: bool) -> Option<PathBuf> {
    if in_place {
        Some(file.to_path_buf())
    } else {
        output
    }
}

// ============================================================================
// show
// ============================================================================

fn cmd_show(file: PathBuf, limit: Option<usize>, full: bool) -> Result<(), CliError> {
    let settings = Settings::load();
    let limit = if full {
        None
    } else if limit.is_some() {
        limit
    } else {
        let size = fs::metadata(&file)
            .map_err(|e| CliError::io(e.to_string()))?
            .len();
        settings
            .should_preview(size)
            .then_some(settings.preview_row_limit)
    };

    let loaded = load_document(&file, limit)?;
    if loaded.document.is_empty() {
        println!("(empty file)");
    } else {
        print_table(&loaded.document);
    }
    println!();
    println!(
        "Rows: {}  Columns: {}  Encoding: {}{}",
        loaded.document.row_count(),
        loaded.document.column_count(),
        loaded.encoding,
        if loaded.truncated { "  Preview" } else { "" }
    );
    Ok(())
}

// ============================================================================
// sort
// ============================================================================

fn cmd_sort(
    file: PathBuf,
    column: String,
    desc: bool,
    output: Option<PathBuf>,
    in_place: bool,
) -> Result<(), CliError> {
    let mut document = load_document(&file, None)?.document;
    let index = resolve_column(&document, &column)?;
    let direction = if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    document.sort_by_column(index, direction);
    write_output(&document, effective_output(&file, output, in_place).as_deref())
}

// ============================================================================
// find
// ============================================================================

fn cmd_find(file: PathBuf, query: String, columns: Vec<String>) -> Result<(), CliError> {
    let document = load_document(&file, None)?.document;
    let scope = if columns.is_empty() {
        None
    } else {
        Some(resolve_columns(&document, &columns)?)
    };

    let matches = document.find(&query, scope.as_deref());
    for hit in &matches {
        let header = document.header(hit.column).unwrap_or("");
        let cell = document.cell(hit.row, hit.column).unwrap_or("");
        println!("{}:{}: {}", hit.row + 1, header, display_cell(cell));
    }
    eprintln!("{} match(es)", matches.len());

    if matches.is_empty() {
        return Err(CliError::silent(EXIT_NO_MATCHES));
    }
    Ok(())
}

// ============================================================================
// drop
// ============================================================================

fn cmd_drop(
    file: PathBuf,
    rows: Vec<String>,
    columns: Vec<String>,
    output: Option<PathBuf>,
    in_place: bool,
) -> Result<(), CliError> {
    if rows.is_empty() && columns.is_empty() {
        return Err(CliError::args("pass --rows or --columns"));
    }
    if !rows.is_empty() && !columns.is_empty() {
        return Err(CliError::args("--rows and --columns are mutually exclusive")
            .with_hint("row and column deletes are separate operations"));
    }

    let mut document = load_document(&file, None)?.document;
    let deleted = if !rows.is_empty() {
        document.delete_rows(&parse_row_list(&rows)?)
    } else {
        document.delete_columns(&resolve_columns(&document, &columns)?)
    };
    if !deleted {
        eprintln!("note: nothing matched; output is unchanged");
    }
    write_output(&document, effective_output(&file, output, in_place).as_deref())
}

// ============================================================================
// add-col / add-row
// ============================================================================

fn insert_position(at: Option<usize>, append_at: usize) -> Result<usize, CliError> {
    match at {
        Some(n) if n >= 1 => Ok(n - 1),
        Some(_) => Err(CliError::args("positions are 1-based")),
        None => Ok(append_at),
    }
}

fn cmd_add_col(
    file: PathBuf,
    name: String,
    at: Option<usize>,
    fill: String,
    output: Option<PathBuf>,
    in_place: bool,
) -> Result<(), CliError> {
    let mut document = load_document(&file, None)?.document;
    let position = insert_position(at, document.column_count())?;
    document.insert_column(position, name, &fill);
    write_output(&document, effective_output(&file, output, in_place).as_deref())
}

fn cmd_add_row(
    file: PathBuf,
    at: Option<usize>,
    values: Option<String>,
    output: Option<PathBuf>,
    in_place: bool,
) -> Result<(), CliError> {
    let mut document = load_document(&file, None)?.document;
    let position = insert_position(at, document.row_count())?;
    let values = match values {
        Some(raw) => parse_record(&raw),
        None => Vec::new(),
    };
    document.insert_row(position, values);
    write_output(&document, effective_output(&file, output, in_place).as_deref())
}

// ============================================================================
// copy
// ============================================================================

fn cmd_copy(file: PathBuf, rows: Vec<String>, columns: Vec<String>) -> Result<(), CliError> {
    if !rows.is_empty() && !columns.is_empty() {
        return Err(CliError::args("--rows and --columns are mutually exclusive")
            .with_hint("row and column selection never combine"));
    }

    let wants_subset = !rows.is_empty() || !columns.is_empty();
    let mut document = load_document(&file, None)?.document;
    if !rows.is_empty() {
        let mut indices = parse_row_list(&rows)?;
        indices.sort_unstable();
        indices.dedup();
        for (position, &index) in indices.iter().enumerate() {
            document.select_row(index, false, position > 0);
        }
    } else if !columns.is_empty() {
        let mut indices = resolve_columns(&document, &columns)?;
        indices.sort_unstable();
        indices.dedup();
        for (position, &index) in indices.iter().enumerate() {
            document.select_column(index, false, position > 0);
        }
    }
    if wants_subset && document.selection().is_empty() {
        eprintln!("note: nothing matched; copying the whole grid");
    }

    println!("{}", clipboard::selection_block(&document));
    Ok(())
}

// ============================================================================
// recent
// ============================================================================

fn cmd_recent(clear: bool) -> Result<(), CliError> {
    let mut recents = RecentFiles::load();
    if clear {
        recents.clear();
        return recents.save().map_err(CliError::io);
    }

    if recents.is_empty() {
        eprintln!("no recent files");
        return Ok(());
    }
    for path in recents.paths() {
        println!("{}", path.display());
    }
    Ok(())
}
