//! devscope CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use devscope_runtime::{
    HumanFormatter, JsonFormatter, Repl, Session, ViewFormatter, init_logging,
};
use devscope_trace::LoaderConfig;
use devscope_view::{SelectionChange, ViewConfig};
use tracing::warn;

/// Browse how a model's state attribute evolves through a DEVS trace.
#[derive(Parser, Debug)]
#[command(name = "devscope", version, about, long_about = None)]
struct Cli {
    /// XML trace file to open.
    trace: PathBuf,

    /// Model to select on startup.
    #[arg(short, long)]
    model: Option<String>,

    /// Attribute path to select on startup (requires --model).
    #[arg(short, long, requires = "model")]
    attribute: Option<String>,

    /// Initial cursor time.
    #[arg(short, long, default_value_t = 0.0)]
    time: f64,

    /// Window width.
    #[arg(short, long, default_value_t = devscope_view::config::DEFAULT_WINDOW_WIDTH)]
    window: f64,

    /// Print the view once and exit instead of starting the shell.
    #[arg(short, long)]
    batch: bool,

    /// Print the view as JSON (implies --batch).
    #[arg(long)]
    json: bool,

    /// Maximum attribute nesting depth (capped at 100).
    #[arg(long, default_value_t = devscope_trace::flatten::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let loader = LoaderConfig::new()
        .with_max_depth(cli.max_depth)
        .with_source_name(cli.trace.display().to_string());
    let mut session = Session::open(&cli.trace, loader)
        .map_err(|e| e.report())?
        .with_view_config(ViewConfig::new().with_window_width(cli.window));
    session.set_time(cli.time);

    if let Some(model) = &cli.model {
        if session.select_model(model) != SelectionChange::Model {
            return Err(format!("'{model}' is not a selectable model").into());
        }
    }
    if let Some(attribute) = &cli.attribute {
        if session.select_attribute(attribute) != SelectionChange::Attribute {
            return Err(format!("'{attribute}' is not a selectable attribute").into());
        }
    }

    if cli.json {
        print!("{}", JsonFormatter::new().pretty().format_outcome(&session.view())?);
        return Ok(());
    }
    if cli.batch {
        let formatter = HumanFormatter::new();
        print!("{}", formatter.format_outcome(&session.view())?);
        if let Some(detail) = session.detail() {
            if !detail.is_empty() {
                print!("{}", formatter.format_detail(&detail)?);
            }
        }
        return Ok(());
    }

    if !session.selection().is_active() {
        warn!("no series selected; use 'model' and 'attribute' in the shell");
    }
    Repl::new(session)?.run()?;
    println!("\nGoodbye!");
    Ok(())
}
