// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::{Display, Write};

use crate::ast::{CharClass, Pattern, Quantifier, Token, TokenKind};

// Renders the canonical text of a pattern. Text printed from a parsed `Pattern`
// parses back to an equal `Pattern`.
//
// Char classes are printed from their normalized member set, so `.` prints
// as `[^\n\r\u{2028}-\u{2029}]` and `\d` as `[0-9]`.

impl Display for Quantifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantifier::ExactlyN(n) => write!(f, "{{{}}}", n),
            Quantifier::ZeroOrMore => f.write_char('*'),
            Quantifier::OneOrMore => f.write_char('+'),
            Quantifier::Optional => f.write_char('?'),
            Quantifier::AtLeast(n) => write!(f, "{{{},}}", n),
            Quantifier::Range(m, n) => write!(f, "{{{},{}}}", m, n),
        }
    }
}

impl Display for CharClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char('[')?;
        if self.negated {
            f.write_char('^')?;
        }

        for (start, end_included) in self.set.ranges() {
            write_char_in_class(f, *start)?;
            if start != end_included {
                f.write_char('-')?;
                write_char_in_class(f, *end_included)?;
            }
        }

        f.write_char(']')
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TokenKind::Literal(c) => write_literal(f, *c)?,
            TokenKind::CharClass(char_class) => write!(f, "{}", char_class)?,
            TokenKind::WordBoundary => f.write_str("\\b")?,
            TokenKind::NotWordBoundary => f.write_str("\\B")?,
            TokenKind::StartAnchor => f.write_char('^')?,
            TokenKind::EndAnchor => f.write_char('$')?,
            TokenKind::Group { pattern, optional } => {
                write!(f, "(?:{})", pattern)?;
                // a quantifier takes the place of the optional mark
                if *optional && self.quantifier.is_none() {
                    f.write_char('?')?;
                }
            }
        }

        if let Some(quantifier) = &self.quantifier {
            write!(f, "{}", quantifier)?;
        }

        Ok(())
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

fn write_literal(f: &mut std::fmt::Formatter<'_>, c: char) -> std::fmt::Result {
    match c {
        '\\' | '/' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{'
        | '}' => write!(f, "\\{}", c),
        _ => write_plain_char(f, c),
    }
}

fn write_char_in_class(f: &mut std::fmt::Formatter<'_>, c: char) -> std::fmt::Result {
    match c {
        '\\' | ']' | '[' | '^' | '-' => write!(f, "\\{}", c),
        _ => write_plain_char(f, c),
    }
}

fn write_plain_char(f: &mut std::fmt::Formatter<'_>, c: char) -> std::fmt::Result {
    match c {
        '\t' => f.write_str("\\t"),
        '\n' => f.write_str("\\n"),
        '\r' => f.write_str("\\r"),
        _ if c.is_control() || is_invisible(c) => write!(f, "\\u{{{:x}}}", c as u32),
        _ => f.write_char(c),
    }
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200f}'
            | '\u{2028}'..='\u{202f}'
            | '\u{205f}'..='\u{206f}'
            | '\u{3000}'
            | '\u{feff}'
            | '\u{e000}'..='\u{f8ff}'
            | '\u{fff0}'..='\u{ffff}'
            | '\u{e0000}'..='\u{10ffff}'
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        ast::{Pattern, Quantifier, Token, TokenKind},
        syntax::parse_from_str,
    };

    fn reprint(s: &str) -> String {
        parse_from_str(s).unwrap().to_string()
    }

    #[test]
    fn test_print_pattern() {
        assert_eq!(reprint("quick"), "quick");
        assert_eq!(reprint(r#"[a-z]*"#), "[a-z]*");
        assert_eq!(reprint(r#"[a-z]{5}\b"#), r#"[a-z]{5}\b"#);
        assert_eq!(
            reprint(r#"\b[0-9]{5}(?:-[0-9]{4})?\b"#),
            r#"\b[0-9]{5}(?:-[0-9]{4})?\b"#
        );

        // canonical forms
        assert_eq!(reprint(r#"[cba]"#), "[a-c]");
        assert_eq!(reprint(r#"\d+"#), "[0-9]+");
        assert_eq!(reprint(r#"\W"#), "[^0-9A-Z_a-z]");
        assert_eq!(reprint(r#"(ab){2,}c{1,3}"#), "(?:ab){2,}c{1,3}");
        assert_eq!(reprint(r#"."#), r#"[^\n\r\u{2028}-\u{2029}]"#);
        assert_eq!(reprint(r#"^\.\$\B$"#), r#"^\.\$\B$"#);
        assert_eq!(reprint(r#"[\]\-^]"#), r#"[\-\]-\^]"#);
        assert_eq!(reprint(r#"\u{1}"#), r#"\u{1}"#);
    }

    #[test]
    fn test_print_quantified_optional_group() {
        let group = TokenKind::Group {
            pattern: Pattern {
                tokens: vec![Token::new(TokenKind::Literal('a'))],
            },
            optional: true,
        };

        let token = Token::with_quantifier(group.clone(), Quantifier::ZeroOrMore);
        assert_eq!(token.repetition_bounds(), (0, None));
        assert_eq!(token.to_string(), "(?:a)*");

        // reparses to a group with the same repetition bounds
        let reparsed = parse_from_str(&token.to_string()).unwrap();
        assert_eq!(reparsed.tokens[0].repetition_bounds(), (0, None));

        assert_eq!(Token::new(group).to_string(), "(?:a)?");
    }

    #[test]
    fn test_print_then_parse() {
        for s in [
            r#"\b[0-9]{5}(?:-[0-9]{4})?\b"#,
            r#"[^\s\d_]+x?"#,
            r#"(?:a(?:b)*)?c{0,}"#,
            r#"[\\\]\[\^\-]"#,
            r#"\t\n\r\u{c}\u{3000}"#,
            r#"\S.\w"#,
            r#"a\/b\{1\}"#,
        ] {
            let pattern = parse_from_str(s).unwrap();
            let text = pattern.to_string();
            assert_eq!(parse_from_str(&text).unwrap(), pattern, "reprinted: {}", text);
        }
    }
}
