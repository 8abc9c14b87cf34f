use std::path::Path;

use colored::Colorize;

pub fn run(path: &Path) -> Result<(), String> {
    let world = super::load_world(path)?;
    let issues = world.validate();

    if issues.is_empty() {
        println!("  All checks passed for '{}'.", world.meta.theme);
        println!(
            "  {} rooms, {} items, {} puzzles, {} actions, {} progressive hints",
            world.rooms().len(),
            world.items().len(),
            world.puzzle_count(),
            world.actions().len(),
            world.progressive_hints().len()
        );
        return Ok(());
    }

    for issue in &issues {
        eprintln!("  {} {issue}", "problem:".yellow().bold());
    }
    Err(format!(
        "{} problem{} found",
        issues.len(),
        if issues.len() == 1 { "" } else { "s" }
    ))
}
