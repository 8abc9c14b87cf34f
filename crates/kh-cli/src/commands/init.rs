use std::fs;
use std::path::Path;

use kh_world::builtin;

pub fn run(path: &Path, theme: &str, force: bool) -> Result<(), String> {
    if path.exists() && !force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| format!("cannot create directory: {e}"))?;
    }

    let world = builtin::uncles_study(theme);
    let bytes = world.to_json().map_err(|e| e.to_string())?;
    fs::write(path, bytes).map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    println!("Created scenario '{}' in {}", theme, path.display());
    println!(
        "  {} rooms, {} items, {} puzzles, {} actions",
        world.rooms().len(),
        world.items().len(),
        world.puzzle_count(),
        world.actions().len()
    );
    println!();
    println!("Get started:");
    println!("  keyhole check {}        # Validate references", path.display());
    println!("  keyhole list {} items   # Browse the contents", path.display());
    println!("  keyhole play --world {}", path.display());

    Ok(())
}
