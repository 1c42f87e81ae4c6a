/// Which boundary of a hovered letter a split should prefer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterGroup {
    pub letters: Vec<char>,
    pub is_grouped: bool,
}

impl LetterGroup {
    fn from_letters(letters: Vec<char>) -> Self {
        let is_grouped = letters.len() > 1;
        Self {
            letters,
            is_grouped,
        }
    }

    pub fn text(&self) -> String {
        self.letters.iter().collect()
    }
}

/// A word decomposed into contiguous letter groups. Concatenating every
/// group's letters in order always reproduces `original_word`; no group is
/// ever empty. Positions are global 0-based offsets into that concatenation,
/// independent of the current grouping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordState {
    pub original_word: String,
    pub letter_groups: Vec<LetterGroup>,
}

impl WordState {
    /// Fresh state: the whole word as a single grouped run.
    pub fn new(word: &str) -> Self {
        Self {
            original_word: word.to_string(),
            letter_groups: vec![LetterGroup {
                letters: word.chars().collect(),
                is_grouped: true,
            }],
        }
    }

    pub fn letter_count(&self) -> usize {
        self.letter_groups.iter().map(|g| g.letters.len()).sum()
    }

    /// All letters in order, flattened across groups.
    pub fn letters(&self) -> Vec<char> {
        self.letter_groups
            .iter()
            .flat_map(|g| g.letters.iter().copied())
            .collect()
    }

    /// True when a split at global boundary `position` would separate two
    /// letters that currently share a group. Boundaries at the word edges or
    /// between already-separate groups are not splittable.
    pub fn can_split_at(&self, position: usize) -> bool {
        if position == 0 || position >= self.letter_count() {
            return false;
        }
        let mut start = 0;
        for group in &self.letter_groups {
            let end = start + group.letters.len();
            if position > start && position < end {
                return true;
            }
            start = end;
        }
        false
    }

    /// Validity-aware boundary selection for a hovered letter: prefer the
    /// requested side of `letter_index`, fall back to the opposite side if
    /// that boundary is already separated.
    pub fn split_position_for(&self, letter_index: usize, preferred: Side) -> Option<usize> {
        if letter_index >= self.letter_count() {
            return None;
        }
        let (first, second) = match preferred {
            Side::Left => (letter_index, letter_index + 1),
            Side::Right => (letter_index + 1, letter_index),
        };
        if self.can_split_at(first) {
            Some(first)
        } else if self.can_split_at(second) {
            Some(second)
        } else {
            None
        }
    }

    /// Split the group containing global boundary `position` into two.
    /// No-ops when the boundary is at a word edge or already between groups.
    pub fn split_at(&mut self, position: usize) {
        if !self.can_split_at(position) {
            return;
        }
        let mut new_groups = Vec::with_capacity(self.letter_groups.len() + 1);
        let mut start = 0;
        for group in self.letter_groups.drain(..) {
            let end = start + group.letters.len();
            if position > start && position < end {
                let split_index = position - start;
                let mut left = group.letters;
                let right = left.split_off(split_index);
                new_groups.push(LetterGroup::from_letters(left));
                new_groups.push(LetterGroup::from_letters(right));
            } else {
                new_groups.push(group);
            }
            start = end;
        }
        self.letter_groups = new_groups;
    }

    /// Merge the groups on either side of gap `gap_index` (the boundary
    /// between group `gap_index` and `gap_index + 1`). Out-of-range gaps
    /// no-op.
    pub fn merge_adjacent(&mut self, gap_index: usize) {
        if self.letter_groups.len() < 2 || gap_index >= self.letter_groups.len() - 1 {
            return;
        }
        self.merge_range(gap_index, gap_index + 1);
    }

    /// Merge the inclusive range of groups `[start, end]` into one grouped
    /// run. Ranges of size one or out of bounds no-op.
    pub fn merge_range(&mut self, start: usize, end: usize) {
        if start >= end || end >= self.letter_groups.len() {
            return;
        }
        let merged: Vec<char> = self.letter_groups[start..=end]
            .iter()
            .flat_map(|g| g.letters.iter().copied())
            .collect();
        self.letter_groups.splice(
            start..=end,
            [LetterGroup {
                letters: merged,
                is_grouped: true,
            }],
        );
    }

    /// Flatten every group into singletons. Idempotent.
    pub fn separate_all(&mut self) {
        self.letter_groups = self
            .letters()
            .into_iter()
            .map(|letter| LetterGroup {
                letters: vec![letter],
                is_grouped: false,
            })
            .collect();
    }

    /// Collapse everything back into one grouped run of the whole word.
    pub fn collapse_all(&mut self) {
        self.letter_groups = vec![LetterGroup {
            letters: self.letters(),
            is_grouped: true,
        }];
    }
}
