// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

pub const PARSER_PEEK_LEXEME_MAX_COUNT: usize = 1;

use crate::{
    ast::{CharClass, Pattern, Quantifier, Token, TokenKind},
    charset::{line_terminator_set, CharSet, PresetCharClass},
    error::{SyntaxError, SyntaxErrorReason},
    location::Location,
    peekableiter::PeekableIter,
};

use super::{
    lexeme::{Lexeme, LexemeWithRange, Repetition},
    lexer::lex_from_str,
};

pub struct Parser<I>
where
    I: Iterator<Item = LexemeWithRange>,
{
    upstream: PeekableIter<I>,
    last_range: Location,
}

impl<I> Parser<I>
where
    I: Iterator<Item = LexemeWithRange>,
{
    fn new(upstream: PeekableIter<I>) -> Self {
        Self {
            upstream,
            last_range: Location::new_range(0, 0),
        }
    }

    fn next_lexeme(&mut self) -> Option<Lexeme> {
        match self.upstream.next() {
            Some(LexemeWithRange { lexeme, range }) => {
                self.last_range = range;
                Some(lexeme)
            }
            None => None,
        }
    }

    fn peek_lexeme_with_range(&self) -> Option<&LexemeWithRange> {
        self.upstream.peek(0)
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = LexemeWithRange>,
{
    pub fn parse_pattern(&mut self) -> Result<Pattern, SyntaxError> {
        let pattern = self.parse_sequence()?;

        // the sequence stops only at the end of input or at a ')'
        if let Some(LexemeWithRange { range, .. }) = self.peek_lexeme_with_range() {
            return Err(SyntaxError::new(
                SyntaxErrorReason::UnmatchedGroupEnd,
                *range,
            ));
        }

        Ok(pattern)
    }

    fn parse_sequence(&mut self) -> Result<Pattern, SyntaxError> {
        // token ...
        // -----
        // ^
        // | current, None or Some(...)

        let mut tokens = vec![];

        while let Some(lexeme_with_range) = self.peek_lexeme_with_range() {
            if lexeme_with_range.lexeme == Lexeme::GroupEnd {
                break;
            }

            let token = self.parse_quantified_token()?;
            tokens.push(token);
        }

        Ok(Pattern { tokens })
    }

    fn parse_quantified_token(&mut self) -> Result<Token, SyntaxError> {
        // token quantifier?
        // -----
        // ^
        // | current, Some(...)

        let mut token = self.parse_token()?;

        while let Some(lexeme_with_range) = self.peek_lexeme_with_range() {
            if !lexeme_with_range.is_quantifier() {
                break;
            }

            let range = lexeme_with_range.range;
            let is_already_quantified = token.quantifier.is_some()
                || matches!(token.kind, TokenKind::Group { optional: true, .. });

            if is_already_quantified {
                let reason = if lexeme_with_range.lexeme == Lexeme::Optional {
                    SyntaxErrorReason::Unsupported("lazy quantifier".to_owned())
                } else {
                    SyntaxErrorReason::NothingToRepeat
                };
                return Err(SyntaxError::new(reason, range));
            }

            if matches!(
                token.kind,
                TokenKind::WordBoundary
                    | TokenKind::NotWordBoundary
                    | TokenKind::StartAnchor
                    | TokenKind::EndAnchor
            ) {
                return Err(SyntaxError::new(SyntaxErrorReason::NothingToRepeat, range));
            }

            let quantifier = match self.next_lexeme() {
                Some(Lexeme::ZeroOrMore) => Quantifier::ZeroOrMore,
                Some(Lexeme::OneOrMore) => Quantifier::OneOrMore,
                Some(Lexeme::Optional) => Quantifier::Optional,
                Some(Lexeme::Repetition(Repetition::Specified(n))) => Quantifier::ExactlyN(n),
                Some(Lexeme::Repetition(Repetition::AtLeast(n))) => Quantifier::AtLeast(n),
                Some(Lexeme::Repetition(Repetition::Range(m, n))) => Quantifier::Range(m, n),
                _ => unreachable!(),
            };

            match (&mut token.kind, quantifier) {
                (TokenKind::Group { optional, .. }, Quantifier::Optional) => {
                    // `(?:...)?`
                    *optional = true;
                }
                _ => {
                    token.quantifier = Some(quantifier);
                }
            }
        }

        Ok(token)
    }

    fn parse_token(&mut self) -> Result<Token, SyntaxError> {
        // token ...
        // -----
        // ^
        // | current, Some(...)

        let Some(LexemeWithRange { lexeme, range }) = self.peek_lexeme_with_range() else {
            unreachable!()
        };

        let kind = match lexeme {
            Lexeme::Char(c) => {
                let c = *c;
                self.next_lexeme(); // consume char
                TokenKind::Literal(c)
            }
            Lexeme::Dot => {
                self.next_lexeme(); // consume '.'
                TokenKind::CharClass(CharClass::new(line_terminator_set(), true))
            }
            Lexeme::PresetCharClass(c) => {
                let c = *c;
                self.next_lexeme(); // consume preset char class
                let (set, negated) = preset_char_class_from_char(c).to_set_and_negated();
                TokenKind::CharClass(CharClass::new(set, negated))
            }
            Lexeme::CharClassStart | Lexeme::CharClassStartNegated => {
                TokenKind::CharClass(self.parse_char_class()?)
            }
            Lexeme::WordBoundary(c) => {
                let kind = match c {
                    'b' => TokenKind::WordBoundary,
                    'B' => TokenKind::NotWordBoundary,
                    _ => unreachable!(),
                };
                self.next_lexeme(); // consume boundary assertion
                kind
            }
            Lexeme::StartAnchor => {
                self.next_lexeme(); // consume '^'
                TokenKind::StartAnchor
            }
            Lexeme::EndAnchor => {
                self.next_lexeme(); // consume '$'
                TokenKind::EndAnchor
            }
            Lexeme::GroupStart | Lexeme::NonCapturingGroupStart => self.parse_group()?,
            Lexeme::ZeroOrMore | Lexeme::OneOrMore | Lexeme::Optional | Lexeme::Repetition(_) => {
                // a quantifier at the beginning of the pattern or a group
                return Err(SyntaxError::new(SyntaxErrorReason::NothingToRepeat, *range));
            }
            Lexeme::GroupEnd | Lexeme::CharClassEnd | Lexeme::CharRange(_, _) => {
                // `parse_sequence` stops at ')', and the lexer emits the
                // remaining two only inside a char class.
                unreachable!()
            }
        };

        Ok(Token::new(kind))
    }

    fn parse_group(&mut self) -> Result<TokenKind, SyntaxError> {
        // "(" {token} ")" ?
        // ---              -
        // ^                ^-- to here
        // | current, validated
        //
        // also "(?:" {token} ")"

        self.next_lexeme(); // consume "(" or "(?:"
        let group_range = self.last_range;

        let pattern = self.parse_sequence()?;

        match self.next_lexeme() {
            Some(Lexeme::GroupEnd) => Ok(TokenKind::Group {
                pattern,
                optional: false,
            }),
            _ => Err(SyntaxError::new(
                SyntaxErrorReason::UnclosedGroup,
                group_range,
            )),
        }
    }

    fn parse_char_class(&mut self) -> Result<CharClass, SyntaxError> {
        // "[" {char | char_range | preset_char_class} "]" ?
        // ---                                             -
        // ^                                               ^__ to here
        // | current, validated
        //
        // also: "[^" ...
        //
        // ranges and preset classes are expanded to their member set here.

        let negated = matches!(self.next_lexeme(), Some(Lexeme::CharClassStartNegated));
        let class_range = self.last_range;

        let mut set = CharSet::new();

        loop {
            match self.next_lexeme() {
                Some(Lexeme::CharClassEnd) => break,
                Some(Lexeme::Char(c)) => set.insert_char(c),
                Some(Lexeme::CharRange(from, to)) => set.insert_range(from, to),
                Some(Lexeme::PresetCharClass(c)) => {
                    set.insert_set(&preset_char_class_from_char(c).to_set());
                }
                _ => {
                    return Err(SyntaxError::new(
                        SyntaxErrorReason::UnclosedCharClass,
                        class_range,
                    ));
                }
            }
        }

        Ok(CharClass::new(set, negated))
    }
}

fn preset_char_class_from_char(name_char: char) -> PresetCharClass {
    match PresetCharClass::from_escape_char(name_char) {
        Some(preset) => preset,
        None => unreachable!(),
    }
}

pub fn parse_from_str(s: &str) -> Result<Pattern, SyntaxError> {
    let lexemes = lex_from_str(s)?;
    let mut parser = Parser::new(PeekableIter::new(
        lexemes.into_iter(),
        PARSER_PEEK_LEXEME_MAX_COUNT,
    ));
    parser.parse_pattern()
}
