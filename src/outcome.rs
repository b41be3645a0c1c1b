// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Parse Outcomes
//!
//! Running a parser produces a [`ParseOutcome`]: an ordered sequence of [`Success`]es,
//! each pairing a value with the stream left over after it. An empty sequence is a
//! failure. More than one success means the grammar was ambiguous at that point.
//!
//! Alongside the successes an outcome carries the furthest [`Failure`] seen while it was
//! produced, which is what diagnostics report when nothing matched.

use std::collections::BTreeSet;

use crate::error::Error;
use crate::stream::{Position, Stream};

/// One way of parsing the input: a value and the unconsumed rest of the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Success<A> {
    pub value: A,
    pub remaining: Stream,
}

impl<A> Success<A> {
    pub fn new(value: A, remaining: Stream) -> Self {
        Success { value, remaining }
    }

    pub fn map<B, F>(self, f: F) -> Success<B>
    where
        F: FnOnce(A) -> B,
    {
        Success { value: f(self.value), remaining: self.remaining }
    }
}

/// Where a primitive gave up, what it saw there, and what it would have accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub position: Position,
    pub found: Option<char>,
    pub expected: BTreeSet<String>,
}

impl Failure {
    /// A failure at the cursor of `input`, with nothing expected yet.
    pub fn at(input: &Stream) -> Self {
        Failure {
            position: input.position(),
            found: input.peek().map(|c| c.value),
            expected: BTreeSet::new(),
        }
    }

    pub fn expect<S: Into<String>>(mut self, label: S) -> Self {
        self.expected.insert(label.into());
        self
    }

    /// Keep whichever failure got further; at the same offset, pool their expectations.
    pub fn merge(self, other: Self) -> Self {
        match self.position.offset.cmp(&other.position.offset) {
            std::cmp::Ordering::Greater => self,
            std::cmp::Ordering::Less => other,
            std::cmp::Ordering::Equal => {
                let mut merged = self;
                merged.expected.extend(other.expected);
                merged
            }
        }
    }
}

pub(crate) fn merge_furthest(a: Option<Failure>, b: Option<Failure>) -> Option<Failure> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.merge(b)),
        (a, b) => a.or(b),
    }
}

/// The result of applying a parser at one stream position.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome<A> {
    successes: Vec<Success<A>>,
    furthest: Option<Failure>,
}

impl<A> ParseOutcome<A> {
    /// A single unambiguous success.
    pub fn success(value: A, remaining: Stream) -> Self {
        ParseOutcome { successes: vec![Success::new(value, remaining)], furthest: None }
    }

    /// No successes; `failure` records why.
    pub fn failure(failure: Failure) -> Self {
        ParseOutcome { successes: Vec::new(), furthest: Some(failure) }
    }

    /// Any number of successes, in order. An empty vector is a failure with no diagnostics.
    pub fn from_successes(successes: Vec<Success<A>>) -> Self {
        ParseOutcome { successes, furthest: None }
    }

    pub fn is_success(&self) -> bool {
        !self.successes.is_empty()
    }

    /// No successes. The same test as [`ParseOutcome::is_empty`], named for the parse.
    pub fn is_failure(&self) -> bool {
        self.is_empty()
    }

    /// Number of successes.
    pub fn len(&self) -> usize {
        self.successes.len()
    }

    /// Collection view of [`ParseOutcome::is_failure`], paired with [`ParseOutcome::len`].
    pub fn is_empty(&self) -> bool {
        self.successes.is_empty()
    }

    pub fn successes(&self) -> &[Success<A>] {
        &self.successes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Success<A>> {
        self.successes.iter()
    }

    pub fn first(&self) -> Option<&Success<A>> {
        self.successes.first()
    }

    pub fn into_first(self) -> Option<Success<A>> {
        self.successes.into_iter().next()
    }

    /// The furthest failure observed while producing this outcome, if any.
    pub fn furthest(&self) -> Option<&Failure> {
        self.furthest.as_ref()
    }

    /// Fold another failure into this outcome's diagnostics.
    pub fn with_failure(mut self, failure: Option<Failure>) -> Self {
        self.furthest = merge_furthest(self.furthest.take(), failure);
        self
    }

    /// Append another outcome's successes after this one's, merging diagnostics.
    pub fn concat(mut self, other: ParseOutcome<A>) -> Self {
        self.successes.extend(other.successes);
        self.with_failure(other.furthest)
    }

    pub(crate) fn into_parts(self) -> (Vec<Success<A>>, Option<Failure>) {
        (self.successes, self.furthest)
    }

    pub fn map<B, F>(self, mut f: F) -> ParseOutcome<B>
    where
        F: FnMut(A) -> B,
    {
        ParseOutcome {
            successes: self.successes.into_iter().map(|s| s.map(&mut f)).collect(),
            furthest: self.furthest,
        }
    }

    /// The first success's value, or the furthest failure as an [`Error`].
    pub fn into_result(self) -> Result<A, Error> {
        let ParseOutcome { successes, furthest } = self;
        match successes.into_iter().next() {
            Some(success) => Ok(success.value),
            None => {
                let failure = furthest.unwrap_or(Failure {
                    position: Position::start(),
                    found: None,
                    expected: BTreeSet::new(),
                });
                Err(Error::from(failure))
            }
        }
    }
}

impl<A> IntoIterator for ParseOutcome<A> {
    type Item = Success<A>;
    type IntoIter = std::vec::IntoIter<Success<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.successes.into_iter()
    }
}

impl<'a, A> IntoIterator for &'a ParseOutcome<A> {
    type Item = &'a Success<A>;
    type IntoIter = std::slice::Iter<'a, Success<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.successes.iter()
    }
}
