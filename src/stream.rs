// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Positioned Character Stream
//!
//! Source text is turned into a [`Stream`] of [`StreamChar`]s, each stamped with the
//! line, column and absolute offset it was read from. A stream is a cursor into a shared,
//! immutable buffer: cloning it is cheap and reading from a clone never affects the
//! original, which is what lets alternatives re-read the same input.
//!
//! ```
//! use monadic_combinators::stream::Stream;
//!
//! let mut stream = Stream::of("ab\ncd");
//! let c = stream.nth(3).unwrap();
//! assert_eq!(c.value, 'c');
//! assert_eq!((c.position.line, c.position.column, c.position.offset), (2, 1, 3));
//! ```

use std::fmt;
use std::sync::Arc;

/// A location in source text.
///
/// `line` and `column` start at 1. `offset` is the 0-based index of the character
/// counted in `char`s, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    /// The position of the first character of any text.
    pub const fn start() -> Self {
        Position { line: 1, column: 1, offset: 0 }
    }

    /// The position of the character that follows `c` when `c` sits at `self`.
    pub fn advance(self, c: char) -> Self {
        if c == '\n' {
            Position { line: self.line + 1, column: 1, offset: self.offset + 1 }
        } else {
            Position { line: self.line, column: self.column + 1, offset: self.offset + 1 }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single character of input together with where it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamChar {
    pub value: char,
    pub position: Position,
}

/// An immutable cursor over positioned characters.
#[derive(Clone)]
pub struct Stream {
    buffer: Arc<[StreamChar]>,
    end: Position,
    index: usize,
}

impl Stream {
    /// Lift `text` into a stream positioned at its first character.
    pub fn of(text: &str) -> Self {
        let mut position = Position::start();
        let mut chars = Vec::with_capacity(text.len());
        for value in text.chars() {
            chars.push(StreamChar { value, position });
            position = position.advance(value);
        }

        Stream { buffer: chars.into(), end: position, index: 0 }
    }

    /// The next character, without consuming it.
    pub fn peek(&self) -> Option<&StreamChar> {
        self.buffer.get(self.index)
    }

    /// Split off the next character, returning it with the stream that follows it.
    pub fn uncons(&self) -> Option<(StreamChar, Stream)> {
        let c = *self.peek()?;
        Some((c, self.advanced(1)))
    }

    /// Where the next character was read from, or the end-of-input position.
    pub fn position(&self) -> Position {
        self.peek().map_or(self.end, |c| c.position)
    }

    /// Number of characters already behind the cursor.
    pub fn offset(&self) -> usize {
        self.index
    }

    /// Number of characters left to read.
    pub fn len(&self) -> usize {
        self.buffer.len() - self.index
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The unread remainder as text.
    pub fn as_text(&self) -> String {
        self.buffer[self.index..].iter().map(|c| c.value).collect()
    }

    /// Whether `self` reads the same buffer as `other` from the same place or further on.
    pub fn is_suffix_of(&self, other: &Stream) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer) && self.index >= other.index
    }

    fn advanced(&self, by: usize) -> Stream {
        Stream {
            buffer: Arc::clone(&self.buffer),
            end: self.end,
            index: (self.index + by).min(self.buffer.len()),
        }
    }
}

impl Iterator for Stream {
    type Item = StreamChar;

    fn next(&mut self) -> Option<StreamChar> {
        let c = *self.peek()?;
        self.index += 1;
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl ExactSizeIterator for Stream {}

impl PartialEq for Stream {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer) && self.index == other.index
    }
}

impl Eq for Stream {}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.position())?;
        match self.peek() {
            Some(c) => write!(f, "{:?}", c.value),
            None => write!(f, "end of input"),
        }
    }
}
