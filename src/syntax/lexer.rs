// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Syntax Summary:
//
// Meta characters and their meanings:
//
// - [ ]      Character class
// - [^ ]     Negated character class
// - {n}      Exact repetition (n times)
// - {n,m}    Repetition range (n to m times)
// - {n,}     At least n repetitions
// - (xyz)    Grouping
// - (?:xyz)  Grouping
// - *        Zero or more repetitions
// - +        One or more repetitions
// - ?        Optional item, or optional group
// - ^        Start-of-input assertion
// - $        End-of-input assertion
// - .        Any character except line terminators
// - \        Escape character for special symbols
//
// Notes on escaping meta characters:
// Meta characters `( ) { } [ ] + * ? . | ^ $ \ /` must be escaped when used literally,
// e.g., `\(`, `\*`, and `\.`.
// In character classes, only `]` and `\` need escaping. The hyphen `-` is a literal
// when it is the first or last element of the class, or when it follows a range,
// e.g., `[-a]`, `[a-]`, `[a-c-e]`, `[a\-b]`.
//
// Escaped characters:
//
// - \t       Horizontal tab
// - \n       Newline
// - \r       Carriage return
// - \f       Form feed
// - \v       Vertical tab
// - \0       Null character
// - \u{hhhh} Unicode character (hexadecimal code point)
// - [\b]     Backspace, only inside a character class
//
// Preset character classes:
//
// - \w       Word characters: [a-zA-Z0-9_]
// - \W       Negated \w: [^\w]
// - \d       Digits: [0-9]
// - \D       Negated \d: [^\d]
// - \s       Whitespace characters
// - \S       Negated \s: [^\s]
//
// Boundary assertions:
// - \b       Word boundary
// - \B       Not a word boundary
//
// Rejected as unsupported:
// - |        Alternation
// - (?=...) (?!...) (?<=...) (?<!...)  Lookaround assertions
// - (?<name>...)                       Named groups
// - \1 \k<name>                        Back references (unknown escapes)

use crate::{
    error::{SyntaxError, SyntaxErrorReason},
    location::Location,
    peekableiter::PeekableIter,
};

use super::lexeme::{Lexeme, LexemeWithRange, Repetition};

pub const LEXER_PEEK_CHAR_MAX_COUNT: usize = 3;

#[derive(Debug, PartialEq, Clone, Copy)]
struct CharWithPosition {
    character: char,
    position: Location,
}

pub fn lex_from_str(s: &str) -> Result<Vec<LexemeWithRange>, SyntaxError> {
    let chars = s
        .chars()
        .enumerate()
        .map(|(index, character)| CharWithPosition {
            character,
            position: Location::new_position(index),
        });
    let mut lexer = Lexer::new(PeekableIter::new(chars, LEXER_PEEK_CHAR_MAX_COUNT));
    lexer.lex()
}

struct Lexer<I>
where
    I: Iterator<Item = CharWithPosition>,
{
    upstream: PeekableIter<I>,
    last_position: Location, // last position consumed
}

impl<I> Lexer<I>
where
    I: Iterator<Item = CharWithPosition>,
{
    fn new(upstream: PeekableIter<I>) -> Self {
        Self {
            upstream,
            last_position: Location::new_position(0),
        }
    }

    fn next_char(&mut self) -> Option<char> {
        match self.upstream.next() {
            Some(CharWithPosition {
                character,
                position,
            }) => {
                self.last_position = position;
                Some(character)
            }
            None => None,
        }
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.upstream
            .peek(offset)
            .map(|CharWithPosition { character, .. }| *character)
    }

    fn peek_char_and_equals(&self, offset: usize, expected_char: char) -> bool {
        matches!(
            self.upstream.peek(offset),
            Some(CharWithPosition { character, .. }) if character == &expected_char)
    }

    fn peek_char_with_position(&self) -> Option<CharWithPosition> {
        self.upstream.peek(0).copied()
    }
}

impl<I> Lexer<I>
where
    I: Iterator<Item = CharWithPosition>,
{
    fn lex(&mut self) -> Result<Vec<LexemeWithRange>, SyntaxError> {
        let mut lexeme_with_ranges = vec![];

        while let Some(CharWithPosition {
            character: current_char,
            position,
        }) = self.peek_char_with_position()
        {
            let lexeme_with_range = match current_char {
                '[' => {
                    // char class start
                    let mut lwrs = self.lex_char_class(position)?;
                    lexeme_with_ranges.append(&mut lwrs);
                    continue;
                }
                '{' => {
                    // repetition
                    self.lex_repetition(position)?
                }
                '(' if self.peek_char_and_equals(1, '?') => self.lex_special_group(position)?,
                '(' => self.lex_single(Lexeme::GroupStart),
                ')' => self.lex_single(Lexeme::GroupEnd),
                '*' => self.lex_single(Lexeme::ZeroOrMore),
                '+' => self.lex_single(Lexeme::OneOrMore),
                '?' => self.lex_single(Lexeme::Optional),
                '^' => self.lex_single(Lexeme::StartAnchor),
                '$' => self.lex_single(Lexeme::EndAnchor),
                '.' => self.lex_single(Lexeme::Dot),
                '|' => {
                    return Err(SyntaxError::new(
                        SyntaxErrorReason::Unsupported("alternation \"|\"".to_owned()),
                        Location::from_position_and_length(&position, 1),
                    ));
                }
                '\\' => self.lex_escaping(position)?,
                _ => self.lex_single(Lexeme::Char(current_char)),
            };

            lexeme_with_ranges.push(lexeme_with_range);
        }

        Ok(lexeme_with_ranges)
    }

    fn lex_single(&mut self, lexeme: Lexeme) -> LexemeWithRange {
        self.next_char(); // consume current char
        LexemeWithRange::from_position_and_length(lexeme, &self.last_position, 1)
    }

    fn lex_special_group(&mut self, position: Location) -> Result<LexemeWithRange, SyntaxError> {
        // (?...  //
        // ^      //
        // |______// current char, validated

        let reason = match self.peek_char(2) {
            Some(':') => {
                self.next_char(); // consume '('
                self.next_char(); // consume '?'
                self.next_char(); // consume ':'

                return Ok(LexemeWithRange::from_position_and_length(
                    Lexeme::NonCapturingGroupStart,
                    &position,
                    3,
                ));
            }
            Some('=' | '!') => "lookahead assertion",
            Some('<') => "lookbehind assertion or named group",
            _ => "group modifier",
        };

        Err(SyntaxError::new(
            SyntaxErrorReason::Unsupported(reason.to_owned()),
            Location::from_position_and_length(&position, 2),
        ))
    }

    fn lex_char_class(&mut self, position: Location) -> Result<Vec<LexemeWithRange>, SyntaxError> {
        // [.....]?  //
        // ^      ^__// to here
        // |_________// current char, validated
        //
        // also `[^.....]`

        let mut lexeme_with_ranges = vec![];

        self.next_char(); // consume '['

        let class_start = if self.peek_char_and_equals(0, '^') {
            self.next_char(); // consume '^'
            LexemeWithRange::from_position_and_length(Lexeme::CharClassStartNegated, &position, 2)
        } else {
            LexemeWithRange::from_position_and_length(Lexeme::CharClassStart, &position, 1)
        };

        lexeme_with_ranges.push(class_start);

        loop {
            match self.peek_char(0) {
                Some(']') => break,
                Some(_) => {
                    let element = self.lex_char_class_element(&position)?;

                    // [a-z]  //
                    //   ^    //
                    //   |____// a hyphen followed by anything but ']' forms a range
                    if self.peek_char_and_equals(0, '-')
                        && matches!(self.peek_char(1), Some(c) if c != ']')
                    {
                        self.next_char(); // consume '-'
                        let end_element = self.lex_char_class_element(&position)?;
                        lexeme_with_ranges.push(build_char_range(element, end_element)?);
                    } else {
                        lexeme_with_ranges.push(element);
                    }
                }
                None => {
                    return Err(SyntaxError::new(
                        SyntaxErrorReason::UnclosedCharClass,
                        Location::from_position_and_length(&position, 1),
                    ));
                }
            }
        }

        self.next_char(); // consume ']'

        lexeme_with_ranges.push(LexemeWithRange::from_position_and_length(
            Lexeme::CharClassEnd,
            &self.last_position,
            1,
        ));

        Ok(lexeme_with_ranges)
    }

    fn lex_char_class_element(
        &mut self,
        class_position: &Location,
    ) -> Result<LexemeWithRange, SyntaxError> {
        match self.peek_char_with_position() {
            Some(CharWithPosition {
                character: '\\',
                position,
            }) => self.lex_char_class_escaping(position),
            Some(CharWithPosition { character, .. }) => Ok(self.lex_single(Lexeme::Char(character))),
            None => Err(SyntaxError::new(
                SyntaxErrorReason::UnclosedCharClass,
                Location::from_position_and_length(class_position, 1),
            )),
        }
    }

    fn lex_escaping(&mut self, position: Location) -> Result<LexemeWithRange, SyntaxError> {
        // \xxxx?  //
        // ^    ^__// to here
        // |_______// current char, validated

        self.next_char(); // consume '\'

        let lexeme = match self.next_char() {
            Some(previous_char) => match previous_char {
                // boundary assertions
                'b' | 'B' => Lexeme::WordBoundary(previous_char),
                // preset char classes
                'd' | 'D' | 'w' | 'W' | 's' | 'S' => Lexeme::PresetCharClass(previous_char),
                // unicode code point, e.g. '\u{2d}', '\u{6587}'
                'u' => Lexeme::Char(self.unescape_unicode(position)?),
                _ => match unescape_char(previous_char) {
                    Some(c) => Lexeme::Char(c),
                    None => {
                        return Err(SyntaxError::new(
                            SyntaxErrorReason::UnknownEscape(previous_char),
                            Location::from_position_and_length(&position, 2),
                        ));
                    }
                },
            },
            None => {
                // `\` | EOF
                return Err(SyntaxError::new(
                    SyntaxErrorReason::IncompleteEscape,
                    Location::from_position_and_length(&position, 1),
                ));
            }
        };

        Ok(LexemeWithRange::new(
            lexeme,
            Location::from_position_pair_with_end_included(&position, &self.last_position),
        ))
    }

    fn lex_char_class_escaping(
        &mut self,
        position: Location,
    ) -> Result<LexemeWithRange, SyntaxError> {
        // [\xxxx...]  //
        //  ^    ^_____// to here
        //  |__________// current char, validated

        self.next_char(); // consume '\'

        let lexeme = match self.next_char() {
            Some(previous_char) => match previous_char {
                // backspace
                'b' => Lexeme::Char('\u{8}'),
                'd' | 'D' | 'w' | 'W' | 's' | 'S' => Lexeme::PresetCharClass(previous_char),
                'u' => Lexeme::Char(self.unescape_unicode(position)?),
                _ => match unescape_char(previous_char) {
                    Some(c) => Lexeme::Char(c),
                    None => {
                        return Err(SyntaxError::new(
                            SyntaxErrorReason::UnknownEscape(previous_char),
                            Location::from_position_and_length(&position, 2),
                        ));
                    }
                },
            },
            None => {
                return Err(SyntaxError::new(
                    SyntaxErrorReason::IncompleteEscape,
                    Location::from_position_and_length(&position, 1),
                ));
            }
        };

        Ok(LexemeWithRange::new(
            lexeme,
            Location::from_position_pair_with_end_included(&position, &self.last_position),
        ))
    }

    fn unescape_unicode(&mut self, escape_position: Location) -> Result<char, SyntaxError> {
        // \u{6587}?  //
        //   ^     ^__// to here
        //   |________// current char

        if !self.peek_char_and_equals(0, '{') {
            return Err(SyntaxError::new(
                SyntaxErrorReason::BadUnicodeEscape("missing the brace \"{\"".to_owned()),
                Location::from_position_and_length(&escape_position, 2),
            ));
        }

        self.next_char(); // consume '{'

        let mut codepoint_string = String::new();

        loop {
            match self.next_char() {
                Some('}') => break,
                Some(c @ ('0'..='9' | 'a'..='f' | 'A'..='F')) => codepoint_string.push(c),
                Some(c) => {
                    return Err(SyntaxError::new(
                        SyntaxErrorReason::BadUnicodeEscape(format!("invalid character '{}'", c)),
                        self.last_position,
                    ));
                }
                None => {
                    return Err(SyntaxError::new(
                        SyntaxErrorReason::BadUnicodeEscape("incomplete sequence".to_owned()),
                        Location::from_position_and_length(&escape_position, 2),
                    ));
                }
            }

            if codepoint_string.len() > 6 {
                return Err(SyntaxError::new(
                    SyntaxErrorReason::BadUnicodeEscape(
                        "code point exceeds six digits".to_owned(),
                    ),
                    Location::from_position_pair_with_end_included(
                        &escape_position,
                        &self.last_position,
                    ),
                ));
            }
        }

        let codepoint_range =
            Location::from_position_pair_with_end_included(&escape_position, &self.last_position);

        if codepoint_string.is_empty() {
            return Err(SyntaxError::new(
                SyntaxErrorReason::BadUnicodeEscape("empty code point".to_owned()),
                codepoint_range,
            ));
        }

        // at most six hex digits, always fits in u32
        u32::from_str_radix(&codepoint_string, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                SyntaxError::new(
                    SyntaxErrorReason::BadUnicodeEscape("invalid code point".to_owned()),
                    codepoint_range,
                )
            })
    }

    fn lex_repetition(&mut self, position: Location) -> Result<LexemeWithRange, SyntaxError> {
        // {...}?  //
        // ^    ^__// to here
        // |_______// current char, validated

        self.next_char(); // consume '{'

        let from = self.lex_number(&position)?;

        let repetition = if self.peek_char_and_equals(0, ',') {
            self.next_char(); // consume ','
            if self.peek_char_and_equals(0, '}') {
                self.next_char(); // consume '}'
                Repetition::AtLeast(from)
            } else {
                let to = self.lex_number(&position)?;
                self.expect_closing_brace(&position)?;

                if from > to {
                    return Err(SyntaxError::new(
                        SyntaxErrorReason::BadQuantifier("numbers out of order".to_owned()),
                        Location::from_position_pair_with_end_included(
                            &position,
                            &self.last_position,
                        ),
                    ));
                }

                Repetition::Range(from, to)
            }
        } else {
            self.expect_closing_brace(&position)?;
            Repetition::Specified(from)
        };

        Ok(LexemeWithRange::new(
            Lexeme::Repetition(repetition),
            Location::from_position_pair_with_end_included(&position, &self.last_position),
        ))
    }

    fn lex_number(&mut self, brace_position: &Location) -> Result<usize, SyntaxError> {
        // 123456N  //
        // ^     ^__// to here
        // |________// current char
        //
        // N = not a number || EOF

        let mut num_string = String::new();

        while let Some(current_char) = self.peek_char(0) {
            if current_char.is_ascii_digit() {
                num_string.push(current_char);
                self.next_char(); // consume digit
            } else {
                break;
            }
        }

        if num_string.is_empty() {
            return Err(SyntaxError::new(
                SyntaxErrorReason::BadQuantifier("expect a number".to_owned()),
                Location::from_position_and_length(brace_position, 1),
            ));
        }

        num_string.parse::<usize>().map_err(|_| {
            SyntaxError::new(
                SyntaxErrorReason::BadQuantifier(format!("number \"{}\" is too large", num_string)),
                Location::from_position_and_length(brace_position, 1),
            )
        })
    }

    fn expect_closing_brace(&mut self, brace_position: &Location) -> Result<(), SyntaxError> {
        match self.next_char() {
            Some('}') => Ok(()),
            _ => Err(SyntaxError::new(
                SyntaxErrorReason::BadQuantifier("expect a closing brace \"}\"".to_owned()),
                Location::from_position_and_length(brace_position, 1),
            )),
        }
    }
}

fn unescape_char(c: char) -> Option<char> {
    let unescaped = match c {
        't' => '\t',     // horizontal tabulation
        'n' => '\n',     // new line character (line feed, LF, ascii 10)
        'r' => '\r',     // carriage return (CR, ascii 13)
        'f' => '\u{c}',  // form feed
        'v' => '\u{b}',  // vertical tabulation
        '0' => '\0',
        // meta chars
        '\\' | '/' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{'
        | '}' | '-' => c,
        _ => return None,
    };
    Some(unescaped)
}

fn build_char_range(
    start: LexemeWithRange,
    end: LexemeWithRange,
) -> Result<LexemeWithRange, SyntaxError> {
    let range = Location::new_range(
        start.range.index,
        end.range.index + end.range.length - start.range.index,
    );

    match (start.lexeme, end.lexeme) {
        (Lexeme::Char(from), Lexeme::Char(to)) if from <= to => {
            Ok(LexemeWithRange::new(Lexeme::CharRange(from, to), range))
        }
        (Lexeme::Char(from), Lexeme::Char(to)) => Err(SyntaxError::new(
            SyntaxErrorReason::InvalidCharRange(format!(
                "'{}' is greater than '{}'",
                from.escape_default(),
                to.escape_default()
            )),
            range,
        )),
        _ => Err(SyntaxError::new(
            SyntaxErrorReason::InvalidCharRange(
                "a preset class can not be a range endpoint".to_owned(),
            ),
            range,
        )),
    }
}
