// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::charset::CharSet;

/// An ordered sequence of tokens.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Pattern {
    pub tokens: Vec<Token>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub quantifier: Option<Quantifier>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenKind {
    Literal(char),
    CharClass(CharClass),

    // zero-width assertions
    WordBoundary,
    NotWordBoundary,
    StartAnchor,
    EndAnchor,

    /**
     * both `(...)` and `(?:...)` produce a group, since nothing is captured.
     *
     * `(?:...)?` is represented as an optional group rather than
     * a group with the `Optional` quantifier.
     */
    Group { pattern: Pattern, optional: bool },
}

/// A set of chars, matched positively or negatively.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CharClass {
    pub set: CharSet,
    pub negated: bool,
}

/// All quantifiers are greedy.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Quantifier {
    ExactlyN(usize),          // {n}
    ZeroOrMore,               // *
    OneOrMore,                // +
    Optional,                 // ?
    AtLeast(usize),           // {n,}
    Range(usize, usize),      // {n,m}
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            quantifier: None,
        }
    }

    pub fn with_quantifier(kind: TokenKind, quantifier: Quantifier) -> Self {
        Self {
            kind,
            quantifier: Some(quantifier),
        }
    }

    /// The inclusive repetition bounds `(min, max)`, `None` means unbounded.
    pub fn repetition_bounds(&self) -> (usize, Option<usize>) {
        match (&self.quantifier, &self.kind) {
            (Some(quantifier), _) => quantifier.bounds(),
            (None, TokenKind::Group { optional: true, .. }) => (0, Some(1)),
            (None, _) => (1, Some(1)),
        }
    }

    /// Whether the token matches exactly one char per repetition.
    pub fn is_single_char(&self) -> bool {
        matches!(self.kind, TokenKind::Literal(_) | TokenKind::CharClass(_))
    }
}

impl Quantifier {
    pub fn bounds(&self) -> (usize, Option<usize>) {
        match self {
            Quantifier::ExactlyN(n) => (*n, Some(*n)),
            Quantifier::ZeroOrMore => (0, None),
            Quantifier::OneOrMore => (1, None),
            Quantifier::Optional => (0, Some(1)),
            Quantifier::AtLeast(n) => (*n, None),
            Quantifier::Range(m, n) => (*m, Some(*n)),
        }
    }
}

impl CharClass {
    pub fn new(set: CharSet, negated: bool) -> Self {
        Self { set, negated }
    }

    pub fn matches(&self, c: char) -> bool {
        self.set.contains(c) != self.negated
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::charset::CharSet;

    use super::{CharClass, Pattern, Quantifier, Token, TokenKind};

    #[test]
    fn test_repetition_bounds() {
        assert_eq!(
            Token::new(TokenKind::Literal('a')).repetition_bounds(),
            (1, Some(1))
        );

        assert_eq!(
            Token::with_quantifier(TokenKind::Literal('a'), Quantifier::ExactlyN(5))
                .repetition_bounds(),
            (5, Some(5))
        );

        assert_eq!(
            Token::with_quantifier(TokenKind::Literal('a'), Quantifier::AtLeast(2))
                .repetition_bounds(),
            (2, None)
        );

        let optional_group = Token::new(TokenKind::Group {
            pattern: Pattern::default(),
            optional: true,
        });
        assert_eq!(optional_group.repetition_bounds(), (0, Some(1)));
        assert!(!optional_group.is_single_char());
    }

    #[test]
    fn test_char_class_matches() {
        let set = CharSet::from_ranges(&[('a', 'z')]);

        let class = CharClass::new(set.clone(), false);
        assert!(class.matches('q'));
        assert!(!class.matches('Q'));

        let negated = CharClass::new(set, true);
        assert!(!negated.matches('q'));
        assert!(negated.matches('Q'));
    }
}
