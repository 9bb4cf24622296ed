// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use thiserror::Error;

use crate::location::Location;

/// The only error raised by this crate, always during compilation.
///
/// `search` never fails; a pattern that matches nowhere yields `NotFound`.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{reason} at offset {}", .location.index)]
pub struct SyntaxError {
    pub reason: SyntaxErrorReason,
    pub location: Location,
}

impl SyntaxError {
    pub fn new(reason: SyntaxErrorReason, location: Location) -> Self {
        Self { reason, location }
    }

    /// The char offset within the pattern text where parsing failed.
    pub fn offset(&self) -> usize {
        self.location.index
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SyntaxErrorReason {
    #[error("Unclosed character class")]
    UnclosedCharClass,

    #[error("Unclosed group")]
    UnclosedGroup,

    #[error("Unmatched closing parenthesis")]
    UnmatchedGroupEnd,

    #[error("Bad quantifier: {0}")]
    BadQuantifier(String),

    #[error("Nothing to repeat")]
    NothingToRepeat,

    #[error("Unknown escape sequence '\\{0}'")]
    UnknownEscape(char),

    #[error("Incomplete escape sequence")]
    IncompleteEscape,

    #[error("Bad unicode escape sequence: {0}")]
    BadUnicodeEscape(String),

    #[error("Invalid character range: {0}")]
    InvalidCharRange(String),

    #[error("Unsupported syntax: {0}")]
    Unsupported(String),
}
