// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::location::Location;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Lexeme {
    CharClassStart,        // [
    CharClassStartNegated, // [^
    CharClassEnd,          // ]

    ZeroOrMore,             // *
    OneOrMore,              // +
    Optional,               // ?
    Repetition(Repetition), // {n}, {n,}, {n,m}

    GroupStart,             // (
    NonCapturingGroupStart, // (?:
    GroupEnd,               // )

    StartAnchor, // ^
    EndAnchor,   // $
    Dot,         // .

    Char(char),
    CharRange(char, char), // e.g. a-z, only inside a char class
    PresetCharClass(char), // \d \D \w \W \s \S
    WordBoundary(char),    // \b \B
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Repetition {
    Specified(usize),
    AtLeast(usize),
    Range(usize, usize),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LexemeWithRange {
    pub lexeme: Lexeme,
    pub range: Location,
}

impl LexemeWithRange {
    pub fn new(lexeme: Lexeme, range: Location) -> Self {
        Self { lexeme, range }
    }

    pub fn from_position_and_length(lexeme: Lexeme, position: &Location, length: usize) -> Self {
        Self {
            lexeme,
            range: Location::from_position_and_length(position, length),
        }
    }

    pub fn is_quantifier(&self) -> bool {
        matches!(
            self.lexeme,
            Lexeme::ZeroOrMore | Lexeme::OneOrMore | Lexeme::Optional | Lexeme::Repetition(_)
        )
    }
}
