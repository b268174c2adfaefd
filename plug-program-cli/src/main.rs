//! Plug Program CLI Application
//!
//! This is the command-line interface for inspecting and editing plug
//! controller programs. It uses the plug-program library and adds:
//! - Device configuration loading (config.toml or the controller's cfg.js)
//! - Text/JSON rendering of the program tree and menus
//! - One-shot edit operations that print the re-encoded program
//! - The request path used to upload a program

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use plug_program::{CommandId, DeviceConfig, Editor, EventId, Program, Vocabulary};
use std::path::PathBuf;

mod config;
mod report;

use config::{OutputConfig, OutputFormat};

/// Plug Program - Inspect and edit plug controller programs
#[derive(Parser, Debug)]
#[command(name = "plug-program-cli")]
#[command(about = "Inspect and edit plug controller programs", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the controller's cfg.js (or a JSON file with the same object)
    #[arg(short, long, value_name = "FILE", conflicts_with = "config")]
    script: Option<PathBuf>,

    /// Override the number of keys
    #[arg(long, value_name = "COUNT")]
    keys: Option<u32>,

    /// Override the number of output channels
    #[arg(long, value_name = "COUNT")]
    outputs: Option<u32>,

    /// Program string to use instead of the stored one
    #[arg(short, long, value_name = "PROGRAM")]
    program: Option<String>,

    /// Output format (default: from config, else txt)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Action {
    /// Print the event/command tree
    Show,
    /// Print the labels a "new event" or "new command" menu offers
    Menu {
        #[arg(value_enum)]
        kind: MenuKind,
    },
    /// Decode the program and print it re-encoded
    Normalize,
    /// Print the request path that uploads the program
    UploadPath,
    /// Append an event by label
    AddEvent { label: String },
    /// Append a command by label to the event at EVENT
    AddCommand { event: usize, label: String },
    /// Remove the event at EVENT
    RemoveEvent { event: usize },
    /// Remove command COMMAND of the event at EVENT
    RemoveCommand { event: usize, command: usize },
    /// Set the argument of command COMMAND of the event at EVENT
    SetArgument {
        event: usize,
        command: usize,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MenuKind {
    Events,
    Commands,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Plug Program CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using program library v{}", plug_program::VERSION);

    let (device, output) = load_settings(&args)?;
    if let Some(version) = &device.version {
        log::info!("Controller firmware v{}", version);
    }

    let vocabulary =
        Vocabulary::from_config(&device).context("Failed to build the device vocabulary")?;
    let format = args.format.unwrap_or(output.format);

    let rendered = execute(
        &args.action,
        &vocabulary,
        device.stored_program(),
        format,
        &output.upload_endpoint,
    )?;
    println!("{}", rendered);

    Ok(())
}

/// Merge the configuration source with command line overrides
fn load_settings(args: &Args) -> Result<(DeviceConfig, OutputConfig)> {
    let (mut device, output) = if let Some(path) = &args.config {
        log::info!("Loading configuration from: {:?}", path);
        let config = config::load_config(path)?;
        (config.device, config.output)
    } else if let Some(path) = &args.script {
        log::info!("Loading device script from: {:?}", path);
        (config::load_device_script(path)?, OutputConfig::default())
    } else {
        (DeviceConfig::new(), OutputConfig::default())
    };

    if let Some(keys) = args.keys {
        device.key_count = keys;
    }
    if let Some(outputs) = args.outputs {
        device.out_count = outputs;
    }
    if let Some(program) = &args.program {
        device.program = Some(program.clone());
    }

    log::debug!(
        "Device: {} keys, {} outputs, program {:?}",
        device.key_count,
        device.out_count,
        device.stored_program()
    );
    Ok((device, output))
}

/// Run one action against the stored program and render the result
fn execute(
    action: &Action,
    vocabulary: &Vocabulary,
    stored: &str,
    format: OutputFormat,
    upload_endpoint: &str,
) -> Result<String> {
    let strict = || {
        plug_program::decode(stored, vocabulary)
            .with_context(|| format!("Failed to decode program {:?}", stored))
    };

    match action {
        Action::Show => report::render_program(&strict()?, format),
        Action::Menu { kind } => {
            let program = strict()?;
            let labels = match kind {
                MenuKind::Events => vocabulary.all_event_labels(&program),
                MenuKind::Commands => vocabulary.all_command_labels(),
            };
            report::render_labels(&labels, format)
        }
        Action::Normalize => {
            let program = strict()?;
            let text = plug_program::encode(&program, vocabulary)?;
            report::render_encoded(&text, &program, format)
        }
        Action::UploadPath => {
            let text = plug_program::encode(&strict()?, vocabulary)?;
            Ok(report::upload_path(upload_endpoint, &text))
        }
        _ => {
            let (mut editor, rejected) = Editor::load_or_empty(vocabulary, stored);
            if let Some(e) = rejected {
                log::warn!("Editing an empty program instead: {}", e);
            }
            apply_edit(&mut editor, action)?;
            let text = editor.serialize()?;
            report::render_encoded(&text, editor.program(), format)
        }
    }
}

/// Apply one edit through the same menu protocol the web editor uses
fn apply_edit(editor: &mut Editor<'_>, action: &Action) -> Result<()> {
    match action {
        Action::AddEvent { label } => {
            editor.open_event_menu()?;
            editor
                .select(label)
                .with_context(|| format!("Cannot add event {:?}", label))?;
        }
        Action::AddCommand { event, label } => {
            let event = event_at(editor.program(), *event)?;
            editor.open_command_menu(event)?;
            editor
                .select(label)
                .with_context(|| format!("Cannot add command {:?}", label))?;
        }
        Action::RemoveEvent { event } => {
            let event = event_at(editor.program(), *event)?;
            editor.remove_event(event);
        }
        Action::RemoveCommand { event, command } => {
            let (event, command) = command_at(editor.program(), *event, *command)?;
            editor.remove_command(event, command);
        }
        Action::SetArgument {
            event,
            command,
            value,
        } => {
            let (event, command) = command_at(editor.program(), *event, *command)?;
            editor.set_argument(event, command, value)?;
        }
        Action::Show | Action::Menu { .. } | Action::Normalize | Action::UploadPath => {
            bail!("{:?} is not an edit", action)
        }
    }
    Ok(())
}

fn event_at(program: &Program, index: usize) -> Result<EventId> {
    match program.events().get(index) {
        Some(event) => Ok(event.id()),
        None => bail!("No event at index {} (program has {})", index, program.len()),
    }
}

fn command_at(program: &Program, event: usize, index: usize) -> Result<(EventId, CommandId)> {
    let id = event_at(program, event)?;
    let commands = program.events()[event].commands();
    match commands.get(index) {
        Some(command) => Ok((id, command.id())),
        None => bail!(
            "No command at index {} in event {} (event has {})",
            index,
            event,
            commands.len()
        ),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
