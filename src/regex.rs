// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::ops::Range;

use crate::{
    compiler::{compile, CompiledPattern},
    error::SyntaxError,
    matcher::{find_at, search, MatchResult},
};

pub struct Regex {
    compiled: CompiledPattern,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, SyntaxError> {
        let compiled = compile(pattern)?;
        Ok(Regex { compiled })
    }

    pub fn search(&self, text: &str) -> MatchResult {
        search(&self.compiled, text)
    }

    pub fn find<'a>(&self, text: &'a str) -> Option<Match<'a>> {
        let range = find_at(&self.compiled, text, 0)?;
        Some(Match::from_range(text, range))
    }

    pub fn find_iter<'a, 'b>(&'a self, text: &'b str) -> Matches<'a, 'b> {
        Matches::new(&self.compiled, text)
    }

    pub fn is_match(&self, text: &str) -> bool {
        find_at(&self.compiled, text, 0).is_some()
    }

    pub fn as_str(&self) -> &str {
        self.compiled.source()
    }

    pub fn compiled(&self) -> &CompiledPattern {
        &self.compiled
    }
}

impl From<CompiledPattern> for Regex {
    fn from(compiled: CompiledPattern) -> Self {
        Regex { compiled }
    }
}

pub struct Matches<'a, 'b> {
    compiled: &'a CompiledPattern,
    text: &'b str,

    // `None` once the end of the text has been passed.
    next_start: Option<usize>,
}

impl<'a, 'b> Matches<'a, 'b> {
    fn new(compiled: &'a CompiledPattern, text: &'b str) -> Self {
        Matches {
            compiled,
            text,
            next_start: Some(0),
        }
    }
}

impl<'b> Iterator for Matches<'_, 'b> {
    type Item = Match<'b>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start?;

        let Some(range) = find_at(self.compiled, self.text, start) else {
            self.next_start = None;
            return None;
        };

        self.next_start = if range.is_empty() {
            // step over one char, otherwise the same empty match repeats forever
            self.text[range.end..]
                .chars()
                .next()
                .map(|c| range.end + c.len_utf8())
        } else {
            Some(range.end)
        };

        Some(Match::from_range(self.text, range))
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Match<'a> {
    pub start: usize, // the position of utf-8 byte stream (value included)
    pub end: usize,   // the position of utf-8 byte stream (value excluded)
    pub value: &'a str,
}

impl<'a> Match<'a> {
    pub fn new(start: usize, end: usize, value: &'a str) -> Self {
        Match { start, end, value }
    }

    fn from_range(text: &'a str, range: Range<usize>) -> Self {
        Match::new(range.start, range.end, &text[range])
    }

    // the following methods are intended to
    // be compatible with the 'Match' API of crate 'regex':
    // https://docs.rs/regex/latest/regex/struct.Match.html

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn as_str(&self) -> &'a str {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{compiler::compile, error::SyntaxErrorReason, matcher::MatchResult};

    use super::{Match, Regex};

    fn new_match(start: usize, end: usize, value: &str) -> Match {
        Match::new(start, end, value)
    }

    #[test]
    fn test_regex_new() {
        let re = Regex::new(r#"\b[0-9]{5}\b"#).unwrap();
        assert_eq!(re.as_str(), r#"\b[0-9]{5}\b"#);
        assert_eq!(re.compiled().min_length(), 5);

        let err = Regex::new(r#"[a-z"#).err().unwrap();
        assert_eq!(err.reason, SyntaxErrorReason::UnclosedCharClass);
        assert_eq!(err.offset(), 0);

        let re = Regex::from(compile("quick").unwrap());
        assert_eq!(re.as_str(), "quick");
    }

    #[test]
    fn test_regex_search() {
        let re = Regex::new(r#"\b[0-9]{5}(?:-[0-9]{4})?\b"#).unwrap();
        assert_eq!(re.search("my zip is 01720 what is yours?"), MatchResult::Found(10));
        assert_eq!(re.search("my zip is 01720-1234 what is yours?"), MatchResult::Found(10));
        assert_eq!(re.search("my zip is 017201 what is yours?"), MatchResult::NotFound);

        assert!(re.is_match("01720"));
        assert!(!re.is_match("0172"));
    }

    #[test]
    fn test_regex_find() {
        let re = Regex::new(r#"\b[0-9]{5}(?:-[0-9]{4})?\b"#).unwrap();
        assert_eq!(
            re.find("my zip is 01720-1234 what is yours?"),
            Some(new_match(10, 20, "01720-1234"))
        );

        // the greedy match which succeeded
        let re = Regex::new(r#"a*ab"#).unwrap();
        let m = re.find("aaab").unwrap();
        assert_eq!(m, new_match(0, 4, "aaab"));
        assert_eq!(m.range(), 0..4);
        assert_eq!(m.len(), 4);
        assert_eq!(m.as_str(), "aaab");

        let re = Regex::new(r#"[a-z]*"#).unwrap();
        let m = re.find("123").unwrap();
        assert!(m.is_empty());
        assert_eq!((m.start(), m.end()), (0, 0));

        let re = Regex::new("xyz123").unwrap();
        assert_eq!(re.find("The quick brown fox jumps over the lazy dog"), None);
    }

    #[test]
    fn test_regex_find_iter() {
        let re = Regex::new("a").unwrap();
        let mut matches = re.find_iter("babbaa");
        assert_eq!(matches.next(), Some(new_match(1, 2, "a")));
        assert_eq!(matches.next(), Some(new_match(4, 5, "a")));
        assert_eq!(matches.next(), Some(new_match(5, 6, "a")));
        assert_eq!(matches.next(), None);
        assert_eq!(matches.next(), None);

        let re = Regex::new("文").unwrap();
        let values: Vec<usize> = re
            .find_iter("abc中文字符文字🌏人文")
            .map(|m| m.start)
            .collect();
        assert_eq!(values, vec![6, 15, 28]);

        let re = Regex::new(r#"[a-z]{5}\b"#).unwrap();
        let words: Vec<&str> = re
            .find_iter("The quick brown fox jumps over the lazy dog")
            .map(|m| m.value)
            .collect();
        assert_eq!(words, vec!["quick", "brown", "jumps"]);

        let re = Regex::new("xyz").unwrap();
        assert_eq!(re.find_iter("abc").next(), None);
    }

    #[test]
    fn test_regex_find_iter_empty_matches() {
        let re = Regex::new(r#"a*"#).unwrap();
        let matches: Vec<Match> = re.find_iter("baa").collect();
        assert_eq!(
            matches,
            vec![
                new_match(0, 0, ""),
                new_match(1, 3, "aa"),
                new_match(3, 3, "")
            ]
        );

        let re = Regex::new(r#"\b"#).unwrap();
        let positions: Vec<usize> = re.find_iter("ab cd").map(|m| m.start).collect();
        assert_eq!(positions, vec![0, 2, 3, 5]);

        // steps over multi-byte chars
        let re = Regex::new(r#"x*"#).unwrap();
        let positions: Vec<usize> = re.find_iter("中文").map(|m| m.start).collect();
        assert_eq!(positions, vec![0, 3, 6]);

        let re = Regex::new("").unwrap();
        assert_eq!(re.find_iter("").count(), 1);
    }
}
