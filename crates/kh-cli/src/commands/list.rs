use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use kh_world::{Condition, Effect, HintTrigger, World};

pub fn run(path: &Path, kind: &str) -> Result<(), String> {
    let world = super::load_world(path)?;

    let (table, count, noun) = match kind.to_lowercase().as_str() {
        "rooms" | "room" => (rooms(&world), world.rooms().len(), "rooms"),
        "items" | "item" => (items(&world), world.items().len(), "items"),
        "puzzles" | "puzzle" => (puzzles(&world), world.puzzle_count(), "puzzles"),
        "actions" | "action" => (actions(&world), world.actions().len(), "actions"),
        "hints" | "hint" => (hints(&world), world.progressive_hints().len(), "hints"),
        other => {
            return Err(format!(
                "unknown list kind '{other}' (expected rooms, items, puzzles, actions, hints)"
            ));
        }
    };

    if count == 0 {
        println!("  No {noun} found.");
        return Ok(());
    }

    println!("{table}");
    println!();
    println!("  {count} {noun}");
    Ok(())
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn rooms(world: &World) -> Table {
    let mut t = table(vec!["Id", "Name", "Exits", "Items", "Lock"]);
    for room in world.rooms() {
        let lock = match (room.locked, &room.unlock_key) {
            (true, Some(key)) => format!("locked ({key})"),
            (true, None) => "locked".to_string(),
            (false, _) => "—".to_string(),
        };
        t.add_row(vec![
            room.id.clone(),
            room.name.clone(),
            room.exits.join(", "),
            room.items.join(", "),
            lock,
        ]);
    }
    t
}

fn items(world: &World) -> Table {
    let mut t = table(vec!["Id", "Name", "Flags", "Description"]);
    for item in world.items() {
        let mut flags = Vec::new();
        if item.usable {
            flags.push("usable".to_string());
        }
        if item.hidden {
            flags.push(match &item.revealed_by {
                Some(tag) => format!("hidden until {tag}"),
                None => "hidden".to_string(),
            });
        }
        if let Some(other) = &item.use_with {
            flags.push(format!("with {other}"));
        }
        t.add_row(vec![
            item.id.clone(),
            item.name.clone(),
            flags.join(", "),
            truncate(&item.description),
        ]);
    }
    t
}

/// Solutions are never printed.
fn puzzles(world: &World) -> Table {
    let mut t = table(vec!["Id", "Name", "Room", "Requires", "Description"]);
    for puzzle in world.puzzles() {
        let room = world
            .rooms()
            .iter()
            .find(|r| r.puzzles.contains(&puzzle.id))
            .map_or("—", |r| r.id.as_str());
        t.add_row(vec![
            puzzle.id.clone(),
            puzzle.name.clone(),
            room.to_string(),
            puzzle.required_items.join(", "),
            truncate(&puzzle.description),
        ]);
    }
    t
}

fn actions(world: &World) -> Table {
    let mut t = table(vec!["Id", "Trigger", "Conditions", "Effects", "Once"]);
    for action in world.actions() {
        let trigger = match &action.trigger.with {
            Some(with) => format!(
                "{} {} / {with}",
                action.trigger.kind, action.trigger.target
            ),
            None => format!("{} {}", action.trigger.kind, action.trigger.target),
        };
        let conditions: Vec<String> = action.conditions.iter().map(condition).collect();
        let effects: Vec<String> = action.effects.iter().map(effect).collect();
        t.add_row(vec![
            action.id.clone(),
            trigger,
            conditions.join(", "),
            effects.join(", "),
            if action.one_time_only { "yes" } else { "no" }.to_string(),
        ]);
    }
    t
}

fn hints(world: &World) -> Table {
    let mut t = table(vec!["Context", "Triggers", "Priority", "Hint"]);
    for hint in world.progressive_hints() {
        let triggers: Vec<String> = hint
            .triggers
            .iter()
            .map(|tr| match tr {
                HintTrigger::FailedAttempts(n) => format!("failed_attempts >= {n}"),
                HintTrigger::TimeSpent(n) => format!("time_spent >= {n}m"),
                HintTrigger::CommandsTried(n) => format!("commands_tried >= {n}"),
            })
            .collect();
        t.add_row(vec![
            hint.context.clone(),
            triggers.join(", "),
            hint.priority.to_string(),
            truncate(&hint.hint_text),
        ]);
    }
    t
}

fn condition(c: &Condition) -> String {
    match c {
        Condition::HasItem(id) => format!("has_item {id}"),
        Condition::InRoom(id) => format!("in_room {id}"),
        Condition::PuzzleSolved(id) => format!("puzzle_solved {id}"),
        Condition::ActionPerformed(id) => format!("action_performed {id}"),
    }
}

fn effect(e: &Effect) -> String {
    match e {
        Effect::RevealItem(id) => format!("reveal_item {id}"),
        Effect::HideItem(id) => format!("hide_item {id}"),
        Effect::UnlockRoom(id) => format!("unlock_room {id}"),
        Effect::AddInventory(id) => format!("add_inventory {id}"),
        Effect::RemoveInventory(id) => format!("remove_inventory {id}"),
    }
}

fn truncate(text: &str) -> String {
    if text.is_empty() {
        "—".to_string()
    } else if text.chars().count() > 60 {
        let head: String = text.chars().take(57).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
