pub mod check;
pub mod init;
pub mod list;
pub mod play;

use std::fs;
use std::path::Path;

use kh_world::World;

/// Read and decode a scenario file.
fn load_world(path: &Path) -> Result<World, String> {
    let bytes = fs::read(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    World::from_json(&bytes).map_err(|e| format!("{}: {e}", path.display()))
}
