//! Fixed-verb command interpretation.

use std::fmt;

/// Canonical verb after alias folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// `look`, `examine`.
    Look,
    /// `take`, `get`, `pick`.
    Take,
    /// `use`.
    Use,
    /// `go`, `move`, `walk`.
    Go,
    /// `inventory`, `inv`, `i`.
    Inventory,
    /// `solve`.
    Solve,
    /// `hint`.
    Hint,
}

const LOOK_VERBS: &[&str] = &["look", "examine"];
const TAKE_VERBS: &[&str] = &["take", "get", "pick"];
const GO_VERBS: &[&str] = &["go", "move", "walk"];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i"];

impl Verb {
    /// Fold a lowercase word to its canonical verb.
    pub fn parse(word: &str) -> Option<Self> {
        if LOOK_VERBS.contains(&word) {
            Some(Self::Look)
        } else if TAKE_VERBS.contains(&word) {
            Some(Self::Take)
        } else if GO_VERBS.contains(&word) {
            Some(Self::Go)
        } else if INVENTORY_VERBS.contains(&word) {
            Some(Self::Inventory)
        } else {
            match word {
                "use" => Some(Self::Use),
                "solve" => Some(Self::Solve),
                "hint" => Some(Self::Hint),
                _ => None,
            }
        }
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Look => "look",
            Self::Take => "take",
            Self::Use => "use",
            Self::Go => "go",
            Self::Inventory => "inventory",
            Self::Solve => "solve",
            Self::Hint => "hint",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed player command.
///
/// All text is lowercase with runs of whitespace collapsed to one space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Look at the room or at something in it.
    Look {
        /// Optional target to examine.
        target: Option<String>,
    },
    /// Pick up an item.
    Take {
        /// The item name; `None` for a bare `take`.
        item: Option<String>,
    },
    /// Use a single item.
    Use {
        /// The item name; `None` for a bare `use`.
        item: Option<String>,
    },
    /// Use one item with (or on) another.
    UseWith {
        /// The held item.
        item: String,
        /// The item it is used with.
        target: String,
    },
    /// Move through an exit.
    Go {
        /// Exit name or id; `None` for a bare `go`.
        target: Option<String>,
    },
    /// List held items.
    Inventory,
    /// Answer a puzzle in the current room.
    Solve {
        /// The answer; `None` for a bare `solve`.
        answer: Option<String>,
    },
    /// Ask for the room's hint.
    Hint,
    /// Unrecognized verb.
    Unknown {
        /// The first word of the input.
        verb: String,
    },
}

impl Command {
    /// The canonical verb, or `None` for an unknown command.
    pub fn verb(&self) -> Option<Verb> {
        match self {
            Self::Look { .. } => Some(Verb::Look),
            Self::Take { .. } => Some(Verb::Take),
            Self::Use { .. } | Self::UseWith { .. } => Some(Verb::Use),
            Self::Go { .. } => Some(Verb::Go),
            Self::Inventory => Some(Verb::Inventory),
            Self::Solve { .. } => Some(Verb::Solve),
            Self::Hint => Some(Verb::Hint),
            Self::Unknown { .. } => None,
        }
    }
}

/// Parse a player input string into a command.
///
/// Returns `None` when the input is blank.
pub fn parse_command(input: &str) -> Option<Command> {
    let lowered = input.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let (&first, rest) = words.split_first()?;

    let Some(verb) = Verb::parse(first) else {
        return Some(Command::Unknown {
            verb: first.to_string(),
        });
    };

    let command = match verb {
        Verb::Look => Command::Look {
            target: join(rest),
        },
        Verb::Take => parse_take(first, rest),
        Verb::Use => parse_use(rest),
        Verb::Go => Command::Go { target: join(rest) },
        Verb::Inventory => Command::Inventory,
        Verb::Solve => Command::Solve {
            answer: join(rest),
        },
        Verb::Hint => Command::Hint,
    };
    Some(command)
}

fn join(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn parse_take(verb: &str, rest: &[&str]) -> Command {
    // "pick up the key"
    let item_words = match rest.split_first() {
        Some((&"up", tail)) if verb == "pick" => tail,
        _ => rest,
    };
    Command::Take {
        item: join(item_words),
    }
}

fn parse_use(rest: &[&str]) -> Command {
    let Some(text) = join(rest) else {
        return Command::Use { item: None };
    };

    // " with " wins over " on " when both appear
    let split = text
        .split_once(" with ")
        .or_else(|| text.split_once(" on "));

    match split {
        Some((item, target)) => Command::UseWith {
            item: item.to_string(),
            target: target.to_string(),
        },
        None => Command::Use { item: Some(text) },
    }
}
