const LEVELS_JSON: &str = include_str!("../assets/levels.json");

/// Static level-to-word-list table. The core only relies on lookups
/// returning a non-empty ordered list and on the total level count; word
/// lengths per level are data, not logic.
pub struct WordLevels {
    levels: Vec<Vec<String>>,
}

impl WordLevels {
    pub fn load() -> Self {
        let parsed: Vec<Vec<String>> = serde_json::from_str(LEVELS_JSON).unwrap_or_default();
        let levels: Vec<Vec<String>> = parsed.into_iter().filter(|l| !l.is_empty()).collect();
        if levels.is_empty() {
            // Asset missing or malformed: keep the game playable.
            return Self {
                levels: vec![vec![
                    "BALL".to_string(),
                    "TREE".to_string(),
                    "HOUSE".to_string(),
                ]],
            };
        }
        Self { levels }
    }

    pub fn count(&self) -> u8 {
        self.levels.len() as u8
    }

    /// Word list for a 1-based level, clamped into the valid range.
    pub fn words(&self, level: u8) -> &[String] {
        let index = (level.clamp(1, self.count()) - 1) as usize;
        &self.levels[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_ten_nonempty_levels() {
        let levels = WordLevels::load();
        assert_eq!(levels.count(), 10);
        for level in 1..=levels.count() {
            assert!(!levels.words(level).is_empty());
        }
    }

    #[test]
    fn level_one_starts_with_ball() {
        let levels = WordLevels::load();
        assert_eq!(levels.words(1)[0], "BALL");
    }

    #[test]
    fn out_of_range_levels_clamp() {
        let levels = WordLevels::load();
        assert_eq!(levels.words(0), levels.words(1));
        assert_eq!(levels.words(99), levels.words(levels.count()));
    }
}
