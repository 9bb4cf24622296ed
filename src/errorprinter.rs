// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::error::SyntaxError;

impl SyntaxError {
    /// Render the error together with the pattern text, marking the
    /// failing location with carets, e.g.
    ///
    /// ```text
    /// Unclosed group at offset 3
    /// abc(de
    ///    ^
    /// ```
    ///
    /// The location counts chars, so the carets line up for any text
    /// without wide or combining chars.
    pub fn with_source(&self, source: &str) -> String {
        let total = source.chars().count();

        // an error at the end of the text points just past the last char
        let index = self.location.index.min(total);
        let length = self.location.length.clamp(1, (total - index).max(1));

        format!(
            "{}\n{}\n{}{}",
            self,
            source,
            " ".repeat(index),
            "^".repeat(length)
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::compiler::compile;

    fn print_error(pattern: &str) -> String {
        compile(pattern).unwrap_err().with_source(pattern)
    }

    #[test]
    fn test_print_error() {
        assert_eq!(
            print_error(r#"abc(de"#),
            "Unclosed group at offset 3\nabc(de\n   ^"
        );

        assert_eq!(
            print_error(r#"[a-z"#),
            "Unclosed character class at offset 0\n[a-z\n^"
        );

        assert_eq!(
            print_error(r#"a\yb"#),
            "Unknown escape sequence '\\y' at offset 1\na\\yb\n ^^"
        );

        // offsets count chars, not bytes
        assert_eq!(
            print_error(r#"文字\y"#),
            "Unknown escape sequence '\\y' at offset 2\n文字\\y\n  ^^"
        );
    }
}
