//! The built-in scenario, used when no saved or generated world is available.

use std::collections::HashMap;

use crate::action::{Action, Condition, Effect, Trigger, TriggerKind};
use crate::hint::{HintTrigger, ProgressiveHint};
use crate::model::{Item, Puzzle, Room};
use crate::world::{World, WorldDocument};

/// Build the "uncle's study" scenario for the given theme.
///
/// Three rooms (study, hidden passage, and the `victory` garden), three puzzles,
/// four actions, and five progressive hints. Always valid and always
/// current-format.
pub fn uncles_study(theme: &str) -> World {
    World::build(uncles_study_document(theme))
}

/// The document form of [`uncles_study`].
pub fn uncles_study_document(theme: &str) -> WorldDocument {
    WorldDocument {
        theme: theme.to_string(),
        setting: "Your late uncle's study".into(),
        backstory: "You've inherited your eccentric uncle's house. The study door slammed shut \
            behind you and won't budge. Your uncle was known for his clever puzzles and hidden \
            treasures. There must be a way out that reveals what he left for you."
            .into(),
        rooms: rooms(),
        items: items(),
        puzzles: puzzles(),
        actions: actions(),
        win_condition: "Discover your uncle's clues, solve his puzzles, and claim the family \
            treasure."
            .into(),
        hints: HashMap::from([
            (
                "study".to_string(),
                "Your uncle left clues throughout his study. The desk, bookshelves, painting, \
                 and grandfather clock all seem important. Start by examining them carefully."
                    .to_string(),
            ),
            (
                "hidden_passage".to_string(),
                "The treasure chest needs both the mysterious key and something else to \
                 complete the mechanism."
                    .to_string(),
            ),
        ]),
        progressive_hints: progressive_hints(),
    }
}

fn rooms() -> Vec<Room> {
    vec![
        Room::new("study", "Uncle's Study")
            .with_description(
                "A cozy study filled with your uncle's eclectic collections. Tall bookshelves \
                 line the walls, packed with leather-bound volumes. His mahogany desk dominates \
                 the center, cluttered with papers, a vintage brass compass, and an ornate letter \
                 opener. A grandfather clock ticks steadily in the corner. Above the fireplace \
                 hangs a large painting of a sailing ship. The door you came through won't \
                 budge - there must be another way out.",
            )
            .with_item("compass")
            .with_item("letter_opener")
            .with_item("ship_painting")
            .with_item("loose_book")
            .with_item("desk_drawer")
            .with_puzzle("painting_puzzle")
            .with_puzzle("clock_puzzle")
            .with_exit("hidden_passage"),
        Room::new("hidden_passage", "Hidden Passage")
            .with_description(
                "A narrow stone passage behind the bookshelf, lit by flickering torches. The \
                 walls are carved with nautical symbols and star charts. At the end stands an \
                 ornate treasure chest with several locks, and beside it a door marked with your \
                 family's crest.",
            )
            .with_item("treasure_map")
            .with_item("family_letter")
            .with_item("gold_coins")
            .with_puzzle("treasure_chest")
            .with_exit("study")
            .with_exit("victory")
            .locked_by("solved_puzzles"),
        Room::new("victory", "Freedom and Fortune").with_description(
            "You step into the garden, breathing fresh air and clutching your uncle's final \
             gift.",
        ),
    ]
}

fn items() -> Vec<Item> {
    vec![
        Item::new("compass", "brass compass")
            .with_description(
                "An antique brass compass with intricate engravings. It has more directional \
                 markings than any compass you've seen.",
            )
            .usable(),
        Item::new("letter_opener", "ornate letter opener")
            .with_description(
                "A silver letter opener with your family crest on the handle. Sharp and \
                 well-crafted.",
            )
            .usable(),
        Item::new("ship_painting", "ship painting").with_description(
            "An oil painting of a three-masted ship on stormy seas. The heavy frame isn't quite \
             flush against the wall.",
        ),
        Item::new("loose_book", "leather journal")
            .with_description(
                "Your uncle's journal: notes on 'the family legacy', compass sketches, star \
                 charts, and what looks like a map of this very house.",
            )
            .usable()
            .hidden_until("examine_books"),
        Item::new("desk_drawer", "mysterious key")
            .with_description(
                "An unusual key of dark metal with astronomical symbols etched along its length.",
            )
            .usable()
            .hidden_until("examine_desk"),
        {
            let mut knowledge = Item::new("solved_puzzles", "knowledge")
                .with_description("Your understanding of your uncle's puzzles.")
                .usable();
            knowledge.hidden = true;
            knowledge
        },
        Item::new("treasure_map", "treasure map").with_description(
            "An authentic treasure map showing several islands, one marked with an X.",
        ),
        Item::new("family_letter", "family letter").with_description(
            "'My dear heir, if you're reading this, you've proven yourself worthy of the family \
             treasure.'",
        ),
        Item::new("gold_coins", "gold coins")
            .with_description("Spanish doubloons and other antique coins. The treasure is real!"),
    ]
}

fn puzzles() -> Vec<Puzzle> {
    vec![
        Puzzle::new("painting_puzzle", "The Ship's Secret", "move painting")
            .with_description(
                "The ship painting isn't flush with the wall. Something could move it aside.",
            )
            .requires("letter_opener")
            .with_reward(
                "You pry the painting aside with the letter opener. Behind it is a panel with a \
                 compass rose carved into the wood!",
            ),
        Puzzle::new("clock_puzzle", "Time and Direction", "twelve")
            .with_description(
                "The journal mentions 'when the clock points north'. The compass rose has \
                 directional markings.",
            )
            .requires("compass")
            .requires("loose_book")
            .with_reward(
                "Twelve o'clock is north! You set the hands to 12 and hear a mechanism grinding \
                 behind the bookshelf.",
            ),
        Puzzle::new("treasure_chest", "Uncle's Legacy", "use key and compass")
            .with_description(
                "A chest bearing your family crest, with three keyholes and a shallow \
                 depression in the lid.",
            )
            .requires("desk_drawer")
            .requires("compass")
            .with_reward(
                "The mysterious key fits perfectly, and the compass completes the mechanism. The \
                 chest opens to reveal maps, gold, and your uncle's final letter.",
            ),
    ]
}

fn actions() -> Vec<Action> {
    vec![
        Action::new("examine_desk", Trigger::new(TriggerKind::Examine, "desk"))
            .with_effect(Effect::RevealItem("desk_drawer".into()))
            .with_message(
                "You search your uncle's desk drawers. Most are locked, but one slides open to \
                 reveal an unusual key of dark metal.",
            )
            .once(),
        Action::new("examine_books", Trigger::new(TriggerKind::Examine, "bookshelf"))
            .with_effect(Effect::RevealItem("loose_book".into()))
            .with_message(
                "One leather journal sticks out slightly from the shelf. You pull it free and \
                 find your uncle's personal notes.",
            )
            .once(),
        Action::new("move_painting", Trigger::use_with("letter opener", "painting"))
            .with_condition(Condition::HasItem("letter_opener".into()))
            .with_effect(Effect::AddInventory("solved_puzzles".into()))
            .with_message(
                "You carefully pry the painting aside. Carved into the wood behind it is an \
                 intricate compass rose!",
            )
            .once(),
        Action::new("solve_clock", Trigger::use_with("compass", "clock"))
            .with_condition(Condition::HasItem("loose_book".into()))
            .with_condition(Condition::PuzzleSolved("painting_puzzle".into()))
            .with_effect(Effect::UnlockRoom("hidden_passage".into()))
            .with_message(
                "Following the journal, you turn the clock hands to north. With a grinding \
                 sound, the bookshelf swings aside to reveal a hidden passage!",
            )
            .once(),
    ]
}

fn progressive_hints() -> Vec<ProgressiveHint> {
    vec![
        ProgressiveHint::new(
            "study",
            "Your uncle was methodical. Start with the obvious: his desk, the bookshelves, and \
             that painting.",
        )
        .with_trigger(HintTrigger::CommandsTried(3))
        .with_priority(1),
        ProgressiveHint::new(
            "study",
            "That painting looks like it could be moved. The letter opener might be useful for \
             more than letters.",
        )
        .with_trigger(HintTrigger::CommandsTried(7))
        .with_priority(2),
        ProgressiveHint::new(
            "study",
            "The compass, the journal, and the clock seem connected. How do clocks and \
             compasses relate?",
        )
        .with_trigger(HintTrigger::CommandsTried(12))
        .with_priority(3),
        ProgressiveHint::new(
            "painting_puzzle",
            "The painting isn't flush with the wall. A tool could move it aside.",
        )
        .with_trigger(HintTrigger::FailedAttempts(2))
        .with_priority(4),
        ProgressiveHint::new(
            "clock_puzzle",
            "On a compass, north sits where twelve sits on a clock face.",
        )
        .with_trigger(HintTrigger::FailedAttempts(2))
        .with_priority(5),
    ]
}
