use rand::seq::IndexedRandom;

/// Themes offered when the player does not name one.
pub const THEMES: &[&str] = &[
    "Haunted Victorian Mansion",
    "Abandoned Space Station",
    "Ancient Egyptian Tomb",
    "Mad Scientist's Laboratory",
    "Pirate Ship",
    "Time Machine Malfunction",
    "Zombie Apocalypse Bunker",
    "Magic Academy",
    "Bank Heist Gone Wrong",
    "Underwater Research Base",
];

/// Pick a theme at random.
pub fn random_theme() -> &'static str {
    THEMES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("Haunted Victorian Mansion")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_theme_is_from_list() {
        for _ in 0..20 {
            assert!(THEMES.contains(&random_theme()));
        }
    }
}
