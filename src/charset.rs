// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

/// The member set of a character class.
///
/// Members are stored as inclusive ranges which are sorted, disjoint and
/// non-adjacent, so two sets with the same members always compare equal,
/// e.g. `[a-c]` and `[cab]`.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct CharSet {
    ranges: Vec<(char, char)>,
}

impl CharSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ranges(ranges: &[(char, char)]) -> Self {
        let mut set = Self::new();
        for (start, end_included) in ranges {
            set.insert_range(*start, *end_included);
        }
        set
    }

    pub fn insert_char(&mut self, c: char) {
        self.insert_range(c, c);
    }

    /// Inserts `start..=end_included`. An empty (reversed) range is ignored.
    pub fn insert_range(&mut self, start: char, end_included: char) {
        if start > end_included {
            return;
        }

        self.ranges.push((start, end_included));
        self.normalize();
    }

    pub fn insert_set(&mut self, other: &CharSet) {
        self.ranges.extend_from_slice(&other.ranges);
        self.normalize();
    }

    /// All chars which are not members of this set.
    pub fn complement(&self) -> CharSet {
        let mut ranges = vec![];
        let mut next_start = Some(char::MIN);

        for (start, end_included) in &self.ranges {
            if let Some(from) = next_start {
                if from < *start {
                    // `start` is greater than `char::MIN` here
                    if let Some(to) = char_before(*start) {
                        ranges.push((from, to));
                    }
                }
            }
            next_start = char_after(*end_included);
        }

        if let Some(from) = next_start {
            ranges.push((from, char::MAX));
        }

        CharSet { ranges }
    }

    pub fn contains(&self, c: char) -> bool {
        self.ranges
            .binary_search_by(|(start, end_included)| {
                if *end_included < c {
                    std::cmp::Ordering::Less
                } else if *start > c {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }

    fn normalize(&mut self) {
        self.ranges.sort_unstable();

        let mut merged: Vec<(char, char)> = Vec::with_capacity(self.ranges.len());
        for (start, end_included) in self.ranges.drain(..) {
            match merged.last_mut() {
                Some((_, last_end))
                    if start <= *last_end || char_after(*last_end) == Some(start) =>
                {
                    if end_included > *last_end {
                        *last_end = end_included;
                    }
                }
                _ => merged.push((start, end_included)),
            }
        }

        self.ranges = merged;
    }
}

// `char` skips the surrogate code points 0xD800..=0xDFFF, so the neighbours
// of U+D7FF and U+E000 are each other.
fn char_after(c: char) -> Option<char> {
    match c {
        '\u{d7ff}' => Some('\u{e000}'),
        _ => char::from_u32(c as u32 + 1),
    }
}

fn char_before(c: char) -> Option<char> {
    match c {
        '\u{e000}' => Some('\u{d7ff}'),
        '\0' => None,
        _ => char::from_u32(c as u32 - 1),
    }
}

/// The preset classes `\d`, `\w`, `\s` and their negations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PresetCharClass {
    Digit,
    NotDigit,
    Word,
    NotWord,
    Space,
    NotSpace,
}

impl PresetCharClass {
    pub fn from_escape_char(c: char) -> Option<Self> {
        let preset = match c {
            'd' => PresetCharClass::Digit,
            'D' => PresetCharClass::NotDigit,
            'w' => PresetCharClass::Word,
            'W' => PresetCharClass::NotWord,
            's' => PresetCharClass::Space,
            'S' => PresetCharClass::NotSpace,
            _ => return None,
        };
        Some(preset)
    }

    /// The positive member set and whether the preset is a negation of it.
    pub fn to_set_and_negated(self) -> (CharSet, bool) {
        match self {
            PresetCharClass::Digit => (digit_set(), false),
            PresetCharClass::NotDigit => (digit_set(), true),
            PresetCharClass::Word => (word_set(), false),
            PresetCharClass::NotWord => (word_set(), true),
            PresetCharClass::Space => (space_set(), false),
            PresetCharClass::NotSpace => (space_set(), true),
        }
    }

    /// The exact member set, with negation applied.
    pub fn to_set(self) -> CharSet {
        let (set, negated) = self.to_set_and_negated();
        if negated {
            set.complement()
        } else {
            set
        }
    }
}

pub fn digit_set() -> CharSet {
    CharSet::from_ranges(&[('0', '9')])
}

pub fn word_set() -> CharSet {
    CharSet::from_ranges(&[('0', '9'), ('A', 'Z'), ('_', '_'), ('a', 'z')])
}

pub fn space_set() -> CharSet {
    CharSet::from_ranges(&[
        ('\t', '\r'), // \t \n \v \f \r
        (' ', ' '),
        ('\u{a0}', '\u{a0}'),
        ('\u{1680}', '\u{1680}'),
        ('\u{2000}', '\u{200a}'),
        ('\u{2028}', '\u{2029}'),
        ('\u{202f}', '\u{202f}'),
        ('\u{205f}', '\u{205f}'),
        ('\u{3000}', '\u{3000}'),
        ('\u{feff}', '\u{feff}'),
    ])
}

/// The chars `.` does not match.
pub fn line_terminator_set() -> CharSet {
    CharSet::from_ranges(&[
        ('\n', '\n'),
        ('\r', '\r'),
        ('\u{2028}', '\u{2029}'),
    ])
}

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
