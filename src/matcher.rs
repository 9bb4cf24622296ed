// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{collections::HashSet, ops::Range};

use tracing::trace;

use crate::{
    ast::{Token, TokenKind},
    charset::is_word_char,
    compiler::CompiledPattern,
};

/// The result of `search`.
///
/// The offset is a UTF-8 byte index into the input, always on a char
/// boundary. It differs from JavaScript's `String.prototype.search`, which
/// counts UTF-16 code units, whenever non-ASCII text precedes the match:
/// `a` in `"😊a"` is found at 4 here and at 2 in JavaScript.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MatchResult {
    Found(usize),
    NotFound,
}

/// Receives the position where the preceding tokens stopped matching and
/// returns the end of the whole match, or `None` to make the caller backtrack.
type Continuation<'c> = &'c mut dyn FnMut(usize) -> Option<usize>;

/// Find the offset of the first (leftmost) match of `compiled` in `input`.
pub fn search(compiled: &CompiledPattern, input: &str) -> MatchResult {
    match find_at(compiled, input, 0) {
        Some(range) => MatchResult::Found(range.start),
        None => MatchResult::NotFound,
    }
}

/// Find the leftmost match which starts at or after `start`.
///
/// `start` must be on a char boundary of `input`.
pub(crate) fn find_at(compiled: &CompiledPattern, input: &str, start: usize) -> Option<Range<usize>> {
    let tokens = &compiled.pattern().tokens;
    let matcher = Matcher { text: input };
    let mut offset = start;

    loop {
        if input.len() - offset < compiled.min_length() {
            break;
        }

        trace!(offset, "try matching");

        if let Some(end) = matcher.match_tokens(tokens, offset, &mut |end| Some(end)) {
            trace!(start = offset, end, "matched");
            return Some(offset..end);
        }

        if compiled.is_anchored_start() {
            break;
        }

        // move forward one character and try again
        match matcher.char_at(offset) {
            Some(c) => offset += c.len_utf8(),
            None => break,
        }
    }

    None
}

struct Matcher<'a> {
    text: &'a str,
}

impl Matcher<'_> {
    fn char_at(&self, position: usize) -> Option<char> {
        self.text[position..].chars().next()
    }

    fn is_word_boundary(&self, position: usize) -> bool {
        let previous_is_word = self.text[..position]
            .chars()
            .next_back()
            .is_some_and(is_word_char);
        let current_is_word = self.char_at(position).is_some_and(is_word_char);
        previous_is_word != current_is_word
    }

    fn check_assertion(&self, kind: &TokenKind, position: usize) -> bool {
        match kind {
            TokenKind::WordBoundary => self.is_word_boundary(position),
            TokenKind::NotWordBoundary => !self.is_word_boundary(position),
            TokenKind::StartAnchor => position == 0,
            TokenKind::EndAnchor => position == self.text.len(),
            _ => false,
        }
    }

    fn match_tokens(&self, tokens: &[Token], position: usize, next: Continuation) -> Option<usize> {
        match tokens.split_first() {
            None => next(position),
            Some((token, rest)) => self.match_token(token, rest, position, next),
        }
    }

    fn match_token(
        &self,
        token: &Token,
        rest: &[Token],
        position: usize,
        next: Continuation,
    ) -> Option<usize> {
        let (min, max) = token.repetition_bounds();

        if (min, max) == (1, Some(1)) {
            self.match_kind(&token.kind, position, &mut |end| {
                self.match_tokens(rest, end, &mut *next)
            })
        } else if token.is_single_char() {
            self.match_char_run(&token.kind, rest, position, min, max, next)
        } else {
            self.match_repetition(&token.kind, rest, position, min, max, next)
        }
    }

    /// Match one occurrence of `kind`, then hand over to `next`.
    fn match_kind(&self, kind: &TokenKind, position: usize, next: Continuation) -> Option<usize> {
        match kind {
            TokenKind::Literal(_) | TokenKind::CharClass(_) => match self.char_at(position) {
                Some(c) if matches_char(kind, c) => next(position + c.len_utf8()),
                _ => None,
            },
            TokenKind::WordBoundary
            | TokenKind::NotWordBoundary
            | TokenKind::StartAnchor
            | TokenKind::EndAnchor => {
                if self.check_assertion(kind, position) {
                    next(position)
                } else {
                    None
                }
            }
            TokenKind::Group { pattern, .. } => self.match_tokens(&pattern.tokens, position, next),
        }
    }

    /// Greedy repetition of a single-char token.
    ///
    /// The longest run is collected first, then the rest of the pattern is
    /// tried with progressively fewer repetitions, down to `min`.
    fn match_char_run(
        &self,
        kind: &TokenKind,
        rest: &[Token],
        position: usize,
        min: usize,
        max: Option<usize>,
        next: Continuation,
    ) -> Option<usize> {
        // ends[n] is the position after n repetitions
        let mut ends = vec![position];
        let mut cursor = position;

        while max.map_or(true, |max| ends.len() <= max) {
            match self.char_at(cursor) {
                Some(c) if matches_char(kind, c) => {
                    cursor += c.len_utf8();
                    ends.push(cursor);
                }
                _ => break,
            }
        }

        if ends.len() <= min {
            return None;
        }

        ends[min..]
            .iter()
            .rev()
            .find_map(|end| self.match_tokens(rest, *end, &mut *next))
    }

    /// Greedy repetition of a group, with full backtracking into each iteration.
    ///
    /// Iterations are kept on a heap stack rather than the call stack, so the
    /// number of iterations is not limited by the thread's stack size.
    fn match_repetition(
        &self,
        kind: &TokenKind,
        rest: &[Token],
        position: usize,
        min: usize,
        max: Option<usize>,
        next: Continuation,
    ) -> Option<usize> {
        // (count, position) states whose every path has failed. Counts at or
        // above `min` are alike when the repetition is unbounded.
        let mut failed: HashSet<(usize, usize)> = HashSet::new();
        let state = |count: usize, position: usize| match max {
            Some(_) => (count, position),
            None => (count.min(min), position),
        };

        // stack[n] is the state after n iterations
        let mut stack = vec![self.start_iteration(kind, position, 0, min, max)];

        while let Some(count) = stack.len().checked_sub(1) {
            let iteration = &mut stack[count];
            let position = iteration.position;

            if let Some(end) = iteration.ends.next() {
                if !failed.contains(&state(count + 1, end)) {
                    stack.push(self.start_iteration(kind, end, count + 1, min, max));
                }
                continue;
            }

            // no more iterations to try from here, hand over to the rest
            if count >= min {
                if let Some(end) = self.match_tokens(rest, position, &mut *next) {
                    return Some(end);
                }
            }

            failed.insert(state(count, position));
            stack.pop();
        }

        None
    }

    /// Collect the ends of one more iteration starting at `position`, in the
    /// order they should be tried.
    fn start_iteration(
        &self,
        kind: &TokenKind,
        position: usize,
        count: usize,
        min: usize,
        max: Option<usize>,
    ) -> Iteration {
        let mut ends = vec![];

        if max.map_or(true, |max| count < max) {
            self.match_kind(kind, position, &mut |end| {
                // an iteration that consumes nothing can not make progress
                // once the minimum is reached
                if end != position || count < min {
                    ends.push(end);
                }
                None
            });
        }

        Iteration {
            position,
            ends: ends.into_iter(),
        }
    }
}

struct Iteration {
    position: usize,
    ends: std::vec::IntoIter<usize>,
}

fn matches_char(kind: &TokenKind, c: char) -> bool {
    match kind {
        TokenKind::Literal(expected) => *expected == c,
        TokenKind::CharClass(char_class) => char_class.matches(c),
        _ => false,
    }
}
