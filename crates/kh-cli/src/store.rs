use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use kh_world::World;

/// What the store found at its path.
pub enum Loaded {
    /// A usable current-format world.
    Current(World),
    /// A world without actions or progressive hints.
    Stale,
    /// Nothing saved yet.
    Missing,
    /// The file exists but could not be read or decoded.
    Unreadable(String),
}

/// The scenario file the play command loads from and saves to.
pub struct ScenarioStore {
    path: PathBuf,
}

impl ScenarioStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.keyhole/scenario.json`, or `./.keyhole/scenario.json` without a home dir.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".keyhole")
            .join("scenario.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Loaded {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Loaded::Missing,
            Err(e) => return Loaded::Unreadable(e.to_string()),
        };

        match World::from_json(&bytes) {
            Ok(world) if world.is_current_format() => {
                log::info!("loaded scenario from {}", self.path.display());
                Loaded::Current(world)
            }
            Ok(_) => Loaded::Stale,
            Err(e) => Loaded::Unreadable(e.to_string()),
        }
    }

    pub fn save(&self, world: &World) -> Result<(), String> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create {}: {e}", parent.display()))?;
        }
        let bytes = world.to_json().map_err(|e| e.to_string())?;
        fs::write(&self.path, bytes)
            .map_err(|e| format!("cannot write {}: {e}", self.path.display()))?;
        log::info!("saved scenario to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kh_world::{Room, WorldDocument, builtin};
    use tempfile::TempDir;

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let store = ScenarioStore::new(dir.path().join("scenario.json"));
        assert!(matches!(store.load(), Loaded::Missing));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = ScenarioStore::new(dir.path().join("nested").join("scenario.json"));
        store.save(&builtin::uncles_study("Pirate Ship")).unwrap();

        match store.load() {
            Loaded::Current(world) => assert_eq!(world.meta.theme, "Pirate Ship"),
            _ => panic!("expected a current world"),
        }
    }

    #[test]
    fn stale_document() {
        let dir = TempDir::new().unwrap();
        let store = ScenarioStore::new(dir.path().join("scenario.json"));
        let world = World::from_document(WorldDocument {
            rooms: vec![Room::new("cell", "Cell")],
            ..WorldDocument::default()
        })
        .unwrap();
        store.save(&world).unwrap();
        assert!(matches!(store.load(), Loaded::Stale));
    }

    #[test]
    fn garbage_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scenario.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(ScenarioStore::new(path).load(), Loaded::Unreadable(_)));
    }
}
