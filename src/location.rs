// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

/// A position or a range within the pattern text.
///
/// Both fields count chars, not bytes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Location {
    pub index: usize,  // The char index in the pattern text
    pub length: usize, // The length of the text range; 0 for a single position
}

impl Location {
    /// Create a new `Location` representing a single position.
    pub fn new_position(index: usize) -> Self {
        Self { index, length: 0 }
    }

    /// Create a new `Location` representing a range of text.
    pub fn new_range(index: usize, length: usize) -> Self {
        Self { index, length }
    }

    /// Create a range `Location` from a starting position and a length.
    pub fn from_position_and_length(position: &Location, length: usize) -> Self {
        Self::new_range(position.index, length)
    }

    /// Create a range `Location` from two positions: start and end (inclusive).
    pub fn from_position_pair_with_end_included(
        position_start: &Location,
        position_end_included: &Location,
    ) -> Self {
        Self::new_range(
            position_start.index,
            position_end_included.index - position_start.index + 1,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Location;

    #[test]
    fn test_location_ranges() {
        let start = Location::new_position(3);
        let end = Location::new_position(7);

        assert_eq!(
            Location::from_position_pair_with_end_included(&start, &end),
            Location::new_range(3, 5)
        );

        assert_eq!(
            Location::from_position_and_length(&end, 2),
            Location::new_range(7, 2)
        );
    }
}
