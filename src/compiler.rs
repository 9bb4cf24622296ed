// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use tracing::debug;

use crate::{
    ast::{Pattern, Token, TokenKind},
    error::SyntaxError,
    syntax::parse_from_str,
};

/// An immutable pattern, ready for searching.
///
/// Compiling the same text twice yields equal values.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CompiledPattern {
    source: String,
    pattern: Pattern,

    // The minimum number of bytes a match consumes.
    min_length: usize,

    // The pattern starts with `^`, so only offset 0 can match.
    anchored_start: bool,
}

impl CompiledPattern {
    pub fn from_pattern(source: &str, pattern: Pattern) -> Self {
        let min_length = get_min_length(&pattern);
        let anchored_start = matches!(
            pattern.tokens.first(),
            Some(Token {
                kind: TokenKind::StartAnchor,
                ..
            })
        );

        Self {
            source: source.to_owned(),
            pattern,
            min_length,
            anchored_start,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn is_anchored_start(&self) -> bool {
        self.anchored_start
    }
}

/// Compile the pattern text into a `CompiledPattern`.
pub fn compile(pattern_text: &str) -> Result<CompiledPattern, SyntaxError> {
    let pattern = match parse_from_str(pattern_text) {
        Ok(pattern) => pattern,
        Err(err) => {
            debug!(pattern = pattern_text, error = %err, "failed to compile pattern");
            return Err(err);
        }
    };

    let compiled = CompiledPattern::from_pattern(pattern_text, pattern);

    debug!(
        pattern = pattern_text,
        tokens = compiled.pattern.tokens.len(),
        min_length = compiled.min_length,
        anchored_start = compiled.anchored_start,
        "compiled pattern"
    );

    Ok(compiled)
}

fn get_min_length(pattern: &Pattern) -> usize {
    pattern
        .tokens
        .iter()
        .map(get_token_min_length)
        .fold(0, usize::saturating_add)
}

fn get_token_min_length(token: &Token) -> usize {
    let single = match &token.kind {
        TokenKind::Literal(c) => c.len_utf8(),
        // any member is at least one byte long
        TokenKind::CharClass(_) => 1,
        TokenKind::WordBoundary
        | TokenKind::NotWordBoundary
        | TokenKind::StartAnchor
        | TokenKind::EndAnchor => 0,
        TokenKind::Group { pattern, .. } => get_min_length(pattern),
    };

    let (min, _) = token.repetition_bounds();
    single.saturating_mul(min)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::SyntaxErrorReason;

    use super::compile;

    #[test]
    fn test_compile_deterministic() {
        for s in [
            "quick",
            r#"[a-z]*"#,
            r#"[a-z]{5}\b"#,
            r#"\b[0-9]{5}\b"#,
            r#"\b[0-9]{5}(?:-[0-9]{4})?\b"#,
        ] {
            assert_eq!(compile(s).unwrap(), compile(s).unwrap());
        }

        // equal member sets compile to equal patterns
        assert_eq!(
            compile(r#"[a-c]"#).unwrap().pattern(),
            compile(r#"[cba]"#).unwrap().pattern()
        );
    }

    #[test]
    fn test_compile_analysis() {
        let compiled = compile("quick").unwrap();
        assert_eq!(compiled.source(), "quick");
        assert_eq!(compiled.min_length(), 5);
        assert!(!compiled.is_anchored_start());

        assert_eq!(compile(r#"[a-z]*"#).unwrap().min_length(), 0);
        assert_eq!(compile(r#"[a-z]{5}\b"#).unwrap().min_length(), 5);
        assert_eq!(
            compile(r#"\b[0-9]{5}(?:-[0-9]{4})?\b"#).unwrap().min_length(),
            5
        );
        assert_eq!(compile(r#"(?:ab){3}c+"#).unwrap().min_length(), 7);
        assert_eq!(compile("文").unwrap().min_length(), 3);
        assert_eq!(compile(r#"a{1,}"#).unwrap().min_length(), 1);

        assert!(compile(r#"^abc"#).unwrap().is_anchored_start());
        assert!(!compile(r#"a^"#).unwrap().is_anchored_start());
    }

    #[test]
    fn test_compile_error() {
        let err = compile(r#"[a-z"#).unwrap_err();
        assert_eq!(err.reason, SyntaxErrorReason::UnclosedCharClass);
        assert_eq!(err.offset(), 0);

        let err = compile(r#"abc(de"#).unwrap_err();
        assert_eq!(err.reason, SyntaxErrorReason::UnclosedGroup);
        assert_eq!(err.offset(), 3);

        let err = compile(r#"ab{3"#).unwrap_err();
        assert!(matches!(err.reason, SyntaxErrorReason::BadQuantifier(_)));
        assert_eq!(err.offset(), 2);

        let err = compile(r#"a\yb"#).unwrap_err();
        assert_eq!(err.reason, SyntaxErrorReason::UnknownEscape('y'));
        assert_eq!(err.offset(), 1);
    }
}
