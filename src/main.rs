use clap::{Parser, Subcommand};
use line_merge::{
    CompareResponse, Config, ConsoleInteraction, Converter, Interaction, MergedStore, TerminalInteraction,
    compare, compare_files, generate_session_id, merge, render_table, run_edit_session,
};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Compare two text files line by line and merge them interactively
#[derive(Parser, Debug)]
#[command(name = "line-merge")]
#[command(version)]
#[command(about = "Line-by-line comparison and interactive merge of two text files", long_about = None)]
struct Args {
    /// Configuration file (line-merge.toml in the working directory is used when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two documents and print their differences
    Compare {
        /// First file
        left: PathBuf,
        /// Second file
        right: PathBuf,

        /// Output structured JSON instead of human-readable
        #[arg(short, long)]
        json: bool,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare, resolve each difference, save the result and offer line edits (default)
    Merge {
        /// First file (prompted for when omitted)
        #[arg(long)]
        left: Option<PathBuf>,
        /// Second file (prompted for when omitted)
        #[arg(long)]
        right: Option<PathBuf>,
        /// Merged output file (prompted for when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Edit lines of an existing file
    Edit {
        /// File to edit
        path: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let session_id = generate_session_id();
    let span = tracing::info_span!("session", id = %session_id);
    let _guard = span.enter();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.command.unwrap_or(Command::Merge {
        left: None,
        right: None,
        output: None,
    }) {
        Command::Compare {
            left,
            right,
            json,
            output,
        } => run_compare(&config, &left, &right, json, output.as_deref(), session_id),
        Command::Merge {
            left,
            right,
            output,
        } => run_merge(&config, left, right, output),
        Command::Edit { path } => run_edit_session(&path, stdio_interaction().as_mut()).map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Console prompts on a terminal, plain line reads when stdin is piped
fn stdio_interaction() -> Box<dyn Interaction> {
    if io::stdin().is_terminal() {
        Box::new(ConsoleInteraction::new())
    } else {
        Box::new(TerminalInteraction::stdio())
    }
}

/// Compare two documents and emit the differences
fn run_compare(
    config: &Config,
    left: &Path,
    right: &Path,
    json_mode: bool,
    output_path: Option<&Path>,
    session_id: String,
) -> line_merge::Result<()> {
    let converter = Converter::new(config.converter.clone());

    let (output, result) = match compare(left, right, &converter) {
        Ok(handle) => {
            let output = if json_mode {
                to_json(&CompareResponse::success(&handle))
            } else if handle.comparison().is_identical() {
                "No differences found.\n".to_string()
            } else {
                handle.differences_text().to_string()
            };
            handle.release();
            (output, Ok(()))
        }
        Err(e) if json_mode => (
            to_json(&CompareResponse::failure(session_id, e.to_string())),
            Err(e),
        ),
        Err(e) => return Err(e),
    };

    match output_path {
        Some(path) => fs::write(path, &output).map_err(|e| line_merge::Error::WriteError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?,
        None => print!("{}", output),
    }
    result
}

fn to_json(response: &CompareResponse) -> String {
    let mut text = serde_json::to_string_pretty(response)
        .unwrap_or_else(|_| r#"{"error": "Failed to serialize response"}"#.to_string());
    text.push('\n');
    text
}

/// Prompt for a path, falling back to `default` on an empty answer
fn ask_path(
    interaction: &mut dyn Interaction,
    given: Option<PathBuf>,
    message: &str,
    default: &Path,
) -> line_merge::Result<PathBuf> {
    if let Some(path) = given {
        return Ok(path);
    }
    let answer = interaction.prompt(message)?.unwrap_or_default();
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        default.to_path_buf()
    } else {
        PathBuf::from(answer)
    })
}

/// Compare, merge, save, then offer edits of the saved file
fn run_merge(
    config: &Config,
    left: Option<PathBuf>,
    right: Option<PathBuf>,
    output: Option<PathBuf>,
) -> line_merge::Result<()> {
    let mut terminal = stdio_interaction();
    let defaults = &config.defaults;

    let left = ask_path(
        terminal.as_mut(),
        left,
        "Enter the path for the first .txt file, leave empty for default file: ",
        &defaults.left,
    )?;
    let right = ask_path(
        terminal.as_mut(),
        right,
        "Enter the path for the second .txt file, leave empty for default file: ",
        &defaults.right,
    )?;
    let output = ask_path(
        terminal.as_mut(),
        output,
        "Enter the path for the output .txt file, leave empty for default file: ",
        &defaults.output,
    )?;

    let loaded = compare_files(&left, &right)?;
    let differences = &loaded.comparison.differences;

    let merged = merge(&loaded.left.lines, &loaded.right.lines, differences, terminal.as_mut())?;
    let store = MergedStore::new(merged);
    store.save(&output)?;
    terminal.say(&format!("Output saved to {}", output.display()))?;
    terminal.say("")?;

    terminal.say(&render_table(differences, config.report.table_widths()))?;

    store.prompt_edit(&output, terminal.as_mut())?;
    Ok(())
}
