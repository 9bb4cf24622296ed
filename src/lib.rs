// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

mod ast;
mod cache;
mod charset;
mod compiler;
mod error;
mod errorprinter;
mod location;
mod matcher;
mod peekableiter;
mod printer;
mod regex;
mod syntax;

pub use ast::{CharClass, Pattern, Quantifier, Token, TokenKind};
pub use cache::{CacheConfig, RegexCache, DEFAULT_CACHE_MAX_ENTRIES};
pub use charset::CharSet;
pub use compiler::{compile, CompiledPattern};
pub use error::{SyntaxError, SyntaxErrorReason};
pub use location::Location;
pub use matcher::{search, MatchResult};
pub use regex::{Match, Matches, Regex};
