// tboard - headless operations on board task snapshots

mod exit_codes;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use taskboard_config::{Palette, Settings, ThemeManager};
use taskboard_engine::{GridModel, NoopHost, RasterCanvas};
use taskboard_io::{load, save, CanvasEncoding, SnapshotError, TaskSnapshot, FORMAT_VERSION};

use exit_codes::{snapshot_exit_code, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "tboard")]
#[command(about = "Inspect and convert board task snapshots (tables and whiteboards)")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Log level for diagnostics on stderr (RUST_LOG overrides)
    #[arg(long, global = true, default_value = "warn", env = "TBOARD_LOG")]
    log_level: String,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a task snapshot
    #[command(after_help = "\
Examples:
  tboard inspect chores.json
  tboard inspect chores.json --json | jq .table.complete")]
    Inspect {
        file: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a snapshot at the current format version
    Upgrade {
        file: PathBuf,

        /// Output file (defaults to rewriting the input)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Swap foreground and background on the whiteboard
    Invert {
        file: PathBuf,

        /// Output file (defaults to rewriting the input)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Swap the rows and columns of the table
    Transpose {
        file: PathBuf,

        /// Output file (defaults to rewriting the input)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Create a snapshot with a blank table and an empty whiteboard
    New {
        file: PathBuf,

        #[arg(long, default_value_t = 1)]
        rows: usize,

        #[arg(long, default_value_t = 1)]
        cols: usize,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("TBOARD_COMMIT"),
        ")\nsnapshot format ",
        env!("CARGO_PKG_VERSION")
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match logging::init(&cli.log_level) {
        Ok(handle) => Some(handle),
        Err(message) => {
            eprintln!("warning: {}", message);
            None
        }
    };

    let ctx = Context::load(cli.settings.as_deref());

    let result = match cli.command {
        Commands::Inspect { file, json } => cmd_inspect(&ctx, &file, json),
        Commands::Upgrade { file, output } => cmd_upgrade(&ctx, &file, output),
        Commands::Invert { file, output } => cmd_invert(&ctx, &file, output),
        Commands::Transpose { file, output } => cmd_transpose(&ctx, &file, output),
        Commands::New { file, rows, cols, force } => cmd_new(&ctx, &file, rows, cols, force),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
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
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn snapshot(path: &Path, err: SnapshotError) -> Self {
        Self {
            code: snapshot_exit_code(&err),
            message: format!("{}: {}", path.display(), err),
            hint: None,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Grid unit and palette used to rebuild whiteboards.
struct Context {
    grid_unit: f32,
    palette: Palette,
}

impl Context {
    fn load(settings_path: Option<&Path>) -> Self {
        let settings = match settings_path {
            Some(path) => Settings::load_from(path),
            None => Settings::load(),
        };
        let theme = ThemeManager::new(settings.theme_source.clone());
        log::debug!("grid unit {}, theme {}", settings.effective_grid_size(), theme.name());

        Self {
            grid_unit: settings.effective_grid_size(),
            palette: theme.palette(),
        }
    }
}

/// Restored parts of a snapshot.
struct Task {
    grid: Option<GridModel>,
    canvas: Option<RasterCanvas>,
}

impl Task {
    fn read(ctx: &Context, path: &Path) -> Result<(TaskSnapshot, Self), CliError> {
        let snapshot = load(path).map_err(|e| CliError::snapshot(path, e))?;
        let task = Self {
            grid: snapshot.restore_grid(),
            canvas: snapshot.restore_canvas(ctx.grid_unit, ctx.palette),
        };
        Ok((snapshot, task))
    }

    fn write(&self, path: &Path) -> Result<(), CliError> {
        let snapshot = TaskSnapshot::capture(self.grid.as_ref(), self.canvas.as_ref());
        save(&snapshot, path).map_err(|e| CliError::snapshot(path, e))
    }
}

// ============================================================================
// inspect
// ============================================================================

fn cmd_inspect(ctx: &Context, file: &Path, json: bool) -> Result<(), CliError> {
    let (snapshot, task) = Task::read(ctx, file)?;
    let legacy = snapshot.format_version().canvas_encoding() != CanvasEncoding::Native;

    if json {
        let table = task.grid.as_ref().map(|grid| {
            serde_json::json!({
                "rows": grid.row_count(),
                "columns": grid.column_count(),
                "completion_count": grid.completion_count(),
                "completion_max": grid.completion_max(),
                "complete": grid.is_complete(),
            })
        });
        let whiteboard = task.canvas.as_ref().map(|canvas| {
            serde_json::json!({
                "width": canvas.width(),
                "height": canvas.height(),
                "foreground_pixels": canvas.ink_count(),
            })
        });
        let report = serde_json::json!({
            "file": file.display().to_string(),
            "version": snapshot.version,
            "legacy_canvas": legacy,
            "table": table,
            "whiteboard": whiteboard,
        });
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::other(format!("failed to render report: {e}")))?;
        println!("{}", text);
        return Ok(());
    }

    println!("file:       {}", file.display());
    println!(
        "version:    {}{}",
        snapshot.version,
        if legacy { " (half-resolution whiteboard)" } else { "" }
    );
    match &task.grid {
        Some(grid) => println!(
            "table:      {} rows x {} columns, {}/{} done{}",
            grid.row_count(),
            grid.column_count(),
            grid.completion_count(),
            grid.completion_max(),
            if grid.is_complete() { " (complete)" } else { "" }
        ),
        None => println!("table:      none"),
    }
    match &task.canvas {
        Some(canvas) => println!(
            "whiteboard: {}x{}, {} foreground pixels",
            canvas.width(),
            canvas.height(),
            canvas.ink_count()
        ),
        None => println!("whiteboard: none"),
    }

    Ok(())
}

// ============================================================================
// upgrade / invert / transpose
// ============================================================================

fn cmd_upgrade(ctx: &Context, file: &Path, output: Option<PathBuf>) -> Result<(), CliError> {
    let (snapshot, task) = Task::read(ctx, file)?;
    let target = output.as_deref().unwrap_or(file);
    task.write(target)?;

    if snapshot.is_current() {
        eprintln!("{} already at {}; rewritten", target.display(), FORMAT_VERSION);
    } else {
        eprintln!("{}: {} -> {}", target.display(), snapshot.version, FORMAT_VERSION);
    }
    Ok(())
}

fn cmd_invert(ctx: &Context, file: &Path, output: Option<PathBuf>) -> Result<(), CliError> {
    let (_, mut task) = Task::read(ctx, file)?;
    let canvas = task.canvas.as_mut().ok_or_else(|| {
        CliError::args(format!("{} has no whiteboard", file.display()))
    })?;
    canvas.invert(&mut NoopHost);

    task.write(output.as_deref().unwrap_or(file))
}

fn cmd_transpose(ctx: &Context, file: &Path, output: Option<PathBuf>) -> Result<(), CliError> {
    let (_, mut task) = Task::read(ctx, file)?;
    let grid = task.grid.as_mut().ok_or_else(|| {
        CliError::args(format!("{} has no table", file.display()))
    })?;
    grid.transpose(&mut NoopHost);

    task.write(output.as_deref().unwrap_or(file))
}

// ============================================================================
// new
// ============================================================================

fn cmd_new(ctx: &Context, file: &Path, rows: usize, cols: usize, force: bool) -> Result<(), CliError> {
    if rows == 0 || cols == 0 {
        return Err(CliError::args("a table needs at least one row and one column"));
    }
    if file.exists() && !force {
        return Err(CliError::args(format!("{} already exists", file.display()))
            .with_hint("pass --force to overwrite"));
    }

    let mut grid = GridModel::new();
    for _ in 1..rows {
        grid.add_row(&mut NoopHost);
    }
    for _ in 1..cols {
        grid.add_column(&mut NoopHost);
    }

    let task = Task {
        grid: Some(grid),
        canvas: Some(RasterCanvas::new(ctx.grid_unit, ctx.palette)),
    };
    task.write(file)
}
