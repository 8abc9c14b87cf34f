//! Console front end for the Keyhole escape-room engine.

mod commands;
mod llm;
mod store;
mod themes;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "keyhole",
    about = "Keyhole: a text-adventure escape room",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an escape room
    Play(commands::play::PlayArgs),

    /// Write the built-in scenario to a file
    Init {
        /// Where to write the scenario
        path: PathBuf,

        /// Theme recorded in the scenario
        #[arg(short, long, default_value = "Haunted Victorian Mansion")]
        theme: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a scenario file and report dangling references
    Check {
        /// Scenario file
        path: PathBuf,
    },

    /// List the contents of a scenario file
    List {
        /// Scenario file
        path: PathBuf,

        /// What to list: rooms, items, puzzles, actions, hints
        #[arg(default_value = "rooms")]
        kind: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Init { path, theme, force } => commands::init::run(&path, &theme, force),
        Commands::Check { path } => commands::check::run(&path),
        Commands::List { path, kind } => commands::list::run(&path, &kind),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so they never interleave with turn output.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.target(env_logger::Target::Stderr);
    builder.init();
}
