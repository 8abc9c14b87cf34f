//! Hard-coded item combinations.
//!
//! These run before the declarative `use_with` check on items. Keep the table
//! small; anything scenario-specific belongs in the world's actions.

/// A special-cased combination outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combination {
    /// Id of the held item.
    pub item: &'static str,
    /// Id of the item it is used with.
    pub target: &'static str,
    /// Item id added to the inventory.
    pub produces: &'static str,
    /// Items whose `revealed_by` equals this tag become visible.
    pub reveals: &'static str,
    /// Result text.
    pub message: &'static str,
}

/// The built-in combination table.
pub const COMBINATIONS: &[Combination] = &[Combination {
    item: "matches",
    target: "candle",
    produces: "lit_candle",
    reveals: "use_matches",
    message: "You light the candle with the matches. The room is now brightly illuminated!",
}];

/// Find the combination for an ordered pair of item ids.
pub fn find(item: &str, target: &str) -> Option<&'static Combination> {
    COMBINATIONS
        .iter()
        .find(|c| c.item == item && c.target == target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_light_the_candle() {
        let combo = find("matches", "candle").unwrap();
        assert_eq!(combo.produces, "lit_candle");
        assert_eq!(combo.reveals, "use_matches");
    }

    #[test]
    fn order_matters() {
        assert!(find("candle", "matches").is_none());
        assert!(find("compass", "clock").is_none());
    }
}
