// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Parsers
//!
//! A [`Parser<A>`] is a shareable function from a [`Stream`] position to a
//! [`ParseOutcome<A>`]. It holds no mutable state, so it can be applied any number of
//! times, to any stream, from any thread. Every parser is either built from a closure
//! with [`Parser::new`] or composed from existing parsers with the combinators in
//! [`crate::combinator`], most of which are also offered here as methods.
//!
//! Two operators are provided for grammar-shaped code: `p | q` tries `q` only when `p`
//! fails, and `p >> f` sequences `p` into the parser chosen by `f`.

use std::fmt;
use std::ops::{BitOr, Shr};
use std::sync::Arc;

use crate::combinator;
use crate::error::Error;
use crate::outcome::{ParseOutcome, Success};
use crate::stream::Stream;

type ParseFn<A> = Arc<dyn Fn(&Stream) -> ParseOutcome<A> + Send + Sync>;

pub struct Parser<A> {
    run: ParseFn<A>,
}

impl<A> Clone for Parser<A> {
    fn clone(&self) -> Self {
        Parser { run: Arc::clone(&self.run) }
    }
}

impl<A> fmt::Debug for Parser<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Parser")
    }
}

impl<A: 'static> Parser<A> {
    /// Wrap a function as a parser. The function must only read its input.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Stream) -> ParseOutcome<A> + Send + Sync + 'static,
    {
        Parser { run: Arc::new(f) }
    }

    #[inline]
    pub fn apply(&self, input: &Stream) -> ParseOutcome<A> {
        (self.run)(input)
    }

    pub fn apply_text(&self, text: &str) -> ParseOutcome<A> {
        self.apply(&Stream::of(text))
    }

    /// Apply to `text` and keep the first success. Trailing input is not an error here;
    /// follow the parser with [`combinator::end_of_input`] to require it.
    pub fn parse(&self, text: &str) -> Result<A, Error> {
        self.apply_text(text).into_result()
    }

    pub fn bind<B, F>(self, f: F) -> Parser<B>
    where
        B: 'static,
        F: Fn(A) -> Parser<B> + Send + Sync + 'static,
    {
        combinator::bind(self, f)
    }

    pub fn map<B, F>(self, f: F) -> Parser<B>
    where
        B: 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        combinator::map(self, f)
    }

    pub fn or(self, other: Parser<A>) -> Parser<A> {
        combinator::choice(self, other)
    }

    /// Sequence two parsers, keeping both values.
    pub fn then<B: 'static>(self, other: Parser<B>) -> Parser<(A, B)>
    where
        A: Clone,
    {
        Parser::new(move |input| {
            sequence(&self, &other, input, |a: &A, b| (a.clone(), b))
        })
    }

    /// Sequence two parsers, keeping the value of the first.
    pub fn then_ignore<B: 'static>(self, other: Parser<B>) -> Parser<A>
    where
        A: Clone,
    {
        Parser::new(move |input| sequence(&self, &other, input, |a: &A, _| a.clone()))
    }

    /// Sequence two parsers, keeping the value of the second.
    pub fn ignore_then<B: 'static>(self, other: Parser<B>) -> Parser<B> {
        Parser::new(move |input| sequence(&self, &other, input, |_: &A, b| b))
    }

    pub fn many(self) -> Parser<Vec<A>>
    where
        A: Clone,
    {
        combinator::many(self)
    }

    pub fn some(self) -> Parser<Vec<A>>
    where
        A: Clone,
    {
        combinator::some(self)
    }

    /// Succeed with `None` instead of failing.
    pub fn optional(self) -> Parser<Option<A>> {
        combinator::choice(self.map(Some), combinator::pure_with(|| None))
    }

    /// Zero or more `self`, separated by `separator`.
    pub fn sep_by<S: 'static>(self, separator: Parser<S>) -> Parser<Vec<A>>
    where
        A: Clone,
    {
        let rest = separator.ignore_then(self.clone()).many();
        let items = self.then(rest).map(|(first, mut rest)| {
            rest.insert(0, first);
            rest
        });
        combinator::choice(items, combinator::pure_with(Vec::new))
    }

    /// Replace the expected labels of failures that happen where this parser starts.
    ///
    /// Failures further into the input are left alone, since they describe something more
    /// specific than `name`.
    pub fn label<S: Into<String>>(self, name: S) -> Parser<A> {
        let name = name.into();
        Parser::new(move |input| {
            let (successes, furthest) = self.apply(input).into_parts();
            let furthest = furthest.map(|mut failure| {
                if failure.position.offset == input.offset() {
                    failure.expected.clear();
                    failure.expected.insert(name.clone());
                }
                failure
            });
            ParseOutcome::from_successes(successes).with_failure(furthest)
        })
    }
}

// Run `first`, then `second` on each survivor, combining the pair of values with `join`.
fn sequence<A, B, C>(
    first: &Parser<A>,
    second: &Parser<B>,
    input: &Stream,
    join: impl Fn(&A, B) -> C,
) -> ParseOutcome<C>
where
    A: 'static,
    B: 'static,
{
    let (successes, furthest) = first.apply(input).into_parts();
    let mut out = ParseOutcome::from_successes(Vec::new()).with_failure(furthest);
    for Success { value: a, remaining } in successes {
        out = out.concat(second.apply(&remaining).map(|b| join(&a, b)));
    }
    out
}

impl<A: 'static> BitOr for Parser<A> {
    type Output = Parser<A>;

    fn bitor(self, other: Parser<A>) -> Parser<A> {
        self.or(other)
    }
}

impl<A, B, F> Shr<F> for Parser<A>
where
    A: 'static,
    B: 'static,
    F: Fn(A) -> Parser<B> + Send + Sync + 'static,
{
    type Output = Parser<B>;

    fn shr(self, f: F) -> Parser<B> {
        self.bind(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{character, digit, pure, string};

    #[test]
    fn test_apply_is_repeatable() {
        let parser = character('a');
        let stream = Stream::of("abc");

        let first = parser.apply(&stream);
        let second = parser.apply(&stream);
        assert_eq!(first, second);
        assert_eq!(first.first().unwrap().remaining.as_text(), "bc");
    }

    #[test]
    fn test_new_wraps_closure() {
        let two_chars = Parser::new(|input: &Stream| {
            let pair = input
                .uncons()
                .and_then(|(a, rest)| rest.uncons().map(|(b, rest)| (format!("{}{}", a.value, b.value), rest)));
            match pair {
                Some((text, rest)) => ParseOutcome::success(text, rest),
                None => ParseOutcome::failure(crate::outcome::Failure::at(input).expect("two characters")),
            }
        });

        assert_eq!(two_chars.parse("xyz").unwrap(), "xy");
        assert!(two_chars.parse("x").is_err());
    }

    #[test]
    fn test_then_variants() {
        let ab = character('a').then(character('b'));
        assert_eq!(ab.parse("ab").unwrap(), ('a', 'b'));

        let left = character('a').then_ignore(character('b'));
        assert_eq!(left.parse("ab").unwrap(), 'a');

        let right = character('a').ignore_then(character('b'));
        assert_eq!(right.parse("ab").unwrap(), 'b');

        assert!(character('a').then(character('b')).parse("aa").is_err());
    }

    #[test]
    fn test_optional() {
        let maybe_sign = character('-').optional();
        assert_eq!(maybe_sign.parse("-1").unwrap(), Some('-'));

        let outcome = maybe_sign.apply_text("1");
        let success = outcome.into_first().unwrap();
        assert_eq!(success.value, None);
        assert_eq!(success.remaining.as_text(), "1");
    }

    #[test]
    fn test_sep_by() {
        let list = digit().sep_by(character(','));
        assert_eq!(list.parse("1,2,3").unwrap(), vec!['1', '2', '3']);
        assert_eq!(list.parse("").unwrap(), Vec::<char>::new());

        // A dangling separator is left unconsumed.
        let success = list.apply_text("1,").into_first().unwrap();
        assert_eq!(success.value, vec!['1']);
        assert_eq!(success.remaining.as_text(), ",");
    }

    #[test]
    fn test_label_replaces_expectation_at_start() {
        let keyword = string("let").label("keyword");
        let err = keyword.parse("var").unwrap_err();
        let Error::NoParse { expected, .. } = err;
        assert_eq!(expected, vec!["keyword".to_string()]);
    }

    #[test]
    fn test_label_keeps_deeper_expectation() {
        let keyword = string("let").label("keyword");
        let err = keyword.parse("lex").unwrap_err();
        let Error::NoParse { position, expected, .. } = err;
        assert_eq!(position.offset, 2);
        assert_eq!(expected, vec!["'t'".to_string()]);
    }

    #[test]
    fn test_operators() {
        let a_or_b = character('a') | character('b');
        assert_eq!(a_or_b.parse("b").unwrap(), 'b');

        let doubled = digit() >> |d: char| character(d);
        assert_eq!(doubled.parse("77").unwrap(), '7');
        assert!(doubled.parse("78").is_err());

        let constant = pure(5) >> |n: i32| pure(n * 2);
        assert_eq!(constant.parse("").unwrap(), 10);
    }

    #[test]
    fn test_parser_is_shareable_across_threads() {
        let parser = digit().some();
        std::thread::scope(|scope| {
            let handles: Vec<_> = ["12", "345", "6789"]
                .into_iter()
                .map(|text| {
                    let parser = parser.clone();
                    scope.spawn(move || parser.parse(text).unwrap().len())
                })
                .collect();
            let lens: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_eq!(lens, vec![2, 3, 4]);
        });
    }
}
