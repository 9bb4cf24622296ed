// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::collections::VecDeque;

/// An iterator adapter that allows looking ahead up to
/// `max_peek_count` items without consuming them.
///
/// The buffer is kept full, so `peek` only needs a shared reference.
pub struct PeekableIter<I: Iterator> {
    upstream: I,
    buffer: VecDeque<I::Item>,
    max_peek_count: usize,
}

impl<I: Iterator> PeekableIter<I> {
    pub fn new(upstream: I, max_peek_count: usize) -> Self {
        let mut iter = Self {
            upstream,
            buffer: VecDeque::with_capacity(max_peek_count),
            max_peek_count,
        };
        iter.fill();
        iter
    }

    fn fill(&mut self) {
        while self.buffer.len() < self.max_peek_count {
            match self.upstream.next() {
                Some(item) => self.buffer.push_back(item),
                None => break,
            }
        }
    }

    /// Peek the item at `offset` (0-based) ahead of the current one.
    ///
    /// `offset` must be less than `max_peek_count`.
    pub fn peek(&self, offset: usize) -> Option<&I::Item> {
        debug_assert!(offset < self.max_peek_count);
        self.buffer.get(offset)
    }
}

impl<I: Iterator> Iterator for PeekableIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.pop_front();
        self.fill();
        item
    }
}
