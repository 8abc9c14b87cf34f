use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use colored::Colorize;

use kh_engine::narration::{FillerNarrator, Narrator, NarratorConfig, NarratorTone};
use kh_engine::{Session, SessionConfig};
use kh_world::World;

use crate::llm::{self, ChatClient, ChatNarrator, ChatSettings};
use crate::store::{Loaded, ScenarioStore};
use crate::themes;

#[derive(Args)]
pub struct PlayArgs {
    /// Scenario file to load, created if missing (default: ~/.keyhole/scenario.json)
    #[arg(short, long)]
    world: Option<PathBuf>,

    /// Theme for a newly created scenario (default: random)
    #[arg(short, long)]
    theme: Option<String>,

    /// Room id to start in instead of the first room
    #[arg(long)]
    start_room: Option<String>,

    /// Print results only, without any narration
    #[arg(long)]
    no_narration: bool,

    /// Stay silent when the narrator is unavailable instead of using filler lines
    #[arg(long)]
    no_filler: bool,

    /// Narrator tone: ominous, whimsical, noir, dry
    #[arg(long, default_value = "ominous")]
    tone: NarratorTone,

    /// Chat model name
    #[arg(long, env = "KEYHOLE_MODEL", default_value = "gpt-3.5-turbo")]
    model: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "KEYHOLE_API_BASE", default_value = "https://api.openai.com/v1")]
    api_base: String,

    /// API key; without one, narration and scenario generation stay offline
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

pub fn run(args: PlayArgs) -> Result<(), String> {
    let client = ChatClient::from_settings(&ChatSettings {
        api_key: args.api_key.clone(),
        api_base: args.api_base.clone(),
        model: args.model.clone(),
        timeout: Duration::from_secs(args.timeout),
    })?;

    let store = ScenarioStore::new(args.world.clone().unwrap_or_else(ScenarioStore::default_path));
    let world = load_or_create(&store, client.as_ref(), args.theme.as_deref());

    let config = match &args.start_room {
        Some(room) => SessionConfig::default().with_start_room(room.clone()),
        None => SessionConfig::default(),
    };
    let mut session =
        Session::with_config(world, config).map_err(|e| format!("failed to start session: {e}"))?;

    let narrator: Option<Box<dyn Narrator>> = match client {
        Some(client) if !args.no_narration => Some(Box::new(ChatNarrator::new(
            client,
            NarratorConfig::new().with_tone(args.tone),
        ))),
        _ => None,
    };

    print_intro(&session);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" => {
                println!("Thanks for playing! {}", session.stats());
                break;
            }
            "help" => {
                print_help();
                continue;
            }
            "stats" => {
                println!("{}\n", session.stats());
                continue;
            }
            _ => {}
        }

        match session.process(input) {
            Ok(result) => println!("{result}"),
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
                continue;
            }
        }

        let narration = if args.no_narration {
            None
        } else {
            narrate(&session, narrator.as_deref(), input, args.no_filler)
        };
        if let Some(text) = narration {
            println!("{}", text.italic().dimmed());
        }
        println!();

        if session.is_won() {
            print_victory(&session);
            break;
        }
    }

    Ok(())
}

/// Stale or missing scenarios are replaced and saved. An unreadable file is
/// left untouched and the new scenario is only played.
fn load_or_create(store: &ScenarioStore, client: Option<&ChatClient>, theme: Option<&str>) -> World {
    let save = match store.load() {
        Loaded::Current(world) => return world,
        Loaded::Stale => {
            log::warn!(
                "{} has no actions or progressive hints; creating a new scenario",
                store.path().display()
            );
            true
        }
        Loaded::Unreadable(e) => {
            log::warn!("cannot load {}: {e}", store.path().display());
            println!(
                "{} cannot be loaded and will not be changed; run `keyhole check` on it.",
                store.path().display()
            );
            false
        }
        Loaded::Missing => true,
    };

    let theme = match theme {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => themes::random_theme().to_string(),
    };
    println!("Creating a new escape room: {}", theme.bold());

    let world = llm::generate_world(client, &theme);
    if !save {
        return world;
    }
    if let Err(e) = store.save(&world) {
        log::warn!("scenario not saved: {e}");
    }
    world
}

/// Narration for the turn that just settled. Failures fall back to filler.
fn narrate(
    session: &Session,
    narrator: Option<&dyn Narrator>,
    input: &str,
    no_filler: bool,
) -> Option<String> {
    let context = session.narration_context(input);

    if let Some(narrator) = narrator {
        match narrator.narrate(&context) {
            Ok(text) => return Some(text),
            Err(e) => log::warn!("{e}"),
        }
    }

    if no_filler {
        None
    } else {
        FillerNarrator.narrate(&context).ok()
    }
}

fn print_intro(session: &Session) {
    let meta = &session.world().meta;
    println!();
    println!("  {}", meta.theme.bold());
    if !meta.setting.is_empty() {
        println!("  {}", meta.setting);
    }
    if !meta.backstory.is_empty() {
        println!();
        println!("  {}", meta.backstory);
    }
    if !meta.win_condition.is_empty() {
        println!();
        println!("  {} {}", "Goal:".bold(), meta.win_condition);
    }
    println!();
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    if let Some(room) = session.current_room() {
        println!("{}", room.name.bold());
        println!("{}\n", room.description);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  look [thing]          Describe the room or something in it (also: examine)");
    println!("  take <item>           Pick something up (also: get, pick up)");
    println!("  use <item>            Use something you carry");
    println!("  use <item> with <x>   Combine two things (also: on)");
    println!("  go <place>            Move through an exit (also: move, walk)");
    println!("  inventory             List what you carry (also: inv, i)");
    println!("  solve <answer>        Answer a puzzle in this room");
    println!("  hint                  Ask for a hint");
    println!("  stats                 Show moves, time, and progress");
    println!("  quit                  Leave the game (also: exit)");
    println!();
}

fn print_victory(session: &Session) {
    println!("{}", "*** Congratulations! You escaped! ***".green().bold());
    let win = &session.world().meta.win_condition;
    if !win.is_empty() {
        println!("{win}");
    }
    println!("{}", session.stats());
}
