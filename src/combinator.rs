// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Combinator Algebra
//!
//! Primitive parsers and the combinators that compose them.
//!
//! * [`pure`] succeeds without consuming anything and is the identity of [`bind`].
//! * [`bind`] runs a parser and feeds every value it produces into the next parser,
//!   concatenating the results in order.
//! * [`choice`] is committed alternation: the second parser only runs when the first
//!   produced no successes, and it runs at the same position the first started from.
//! * [`many`] and [`some`] repeat a parser until it stops consuming input.
//!
//! Failure is never a panic. A parser that does not match returns an outcome with no
//! successes, carrying a [`Failure`] that says where and what was expected.
//!
//! ```
//! use monadic_combinators::combinator::{character, digit, many};
//!
//! let digits = many(digit()).then_ignore(character(';'));
//! assert_eq!(digits.parse("42;").unwrap(), vec!['4', '2']);
//! assert!(digits.parse("42").is_err());
//! ```

use crate::outcome::{merge_furthest, Failure, ParseOutcome, Success};
use crate::parser::Parser;
use crate::stream::Stream;

/// Succeed with `value`, consuming nothing.
pub fn pure<A>(value: A) -> Parser<A>
where
    A: Clone + Send + Sync + 'static,
{
    Parser::new(move |input| ParseOutcome::success(value.clone(), input.clone()))
}

/// Like [`pure`], for values that are produced rather than cloned.
pub fn pure_with<A, F>(make: F) -> Parser<A>
where
    A: 'static,
    F: Fn() -> A + Send + Sync + 'static,
{
    Parser::new(move |input| ParseOutcome::success(make(), input.clone()))
}

/// Always fail, reporting `label` as what was expected.
pub fn fail<A: 'static>(label: impl Into<String>) -> Parser<A> {
    let label = label.into();
    Parser::new(move |input| ParseOutcome::failure(Failure::at(input).expect(label.clone())))
}

/// Sequence `parser` with a parser chosen from its result.
///
/// For every success of `parser`, in order, `f(value)` is applied to the input that
/// success left. The results are concatenated, so `bind` fails when `parser` fails or
/// every continuation does. Failures from both sides are kept for diagnostics.
pub fn bind<A, B, F>(parser: Parser<A>, f: F) -> Parser<B>
where
    A: 'static,
    B: 'static,
    F: Fn(A) -> Parser<B> + Send + Sync + 'static,
{
    Parser::new(move |input| {
        let (successes, furthest) = parser.apply(input).into_parts();
        let seed = ParseOutcome::from_successes(Vec::new()).with_failure(furthest);
        successes
            .into_iter()
            .fold(seed, |out, Success { value, remaining }| out.concat(f(value).apply(&remaining)))
    })
}

/// Transform every value `parser` produces. Consumption is unchanged.
pub fn map<A, B, F>(parser: Parser<A>, f: F) -> Parser<B>
where
    A: 'static,
    B: 'static,
    F: Fn(A) -> B + Send + Sync + 'static,
{
    Parser::new(move |input| parser.apply(input).map(&f))
}

/// Committed alternation.
///
/// If `first` succeeds at all, its successes are the result and `second` is never
/// tried. Otherwise `second` runs on the same input `first` started from, however far
/// `first` got before failing.
pub fn choice<A: 'static>(first: Parser<A>, second: Parser<A>) -> Parser<A> {
    Parser::new(move |input| {
        let outcome = first.apply(input);
        if outcome.is_success() {
            return outcome;
        }
        let (_, furthest) = outcome.into_parts();
        second.apply(input).with_failure(furthest)
    })
}

fn satisfy_labelled<P>(predicate: P, label: String) -> Parser<char>
where
    P: Fn(char) -> bool + Send + Sync + 'static,
{
    Parser::new(move |input| match input.uncons() {
        Some((c, rest)) if predicate(c.value) => ParseOutcome::success(c.value, rest),
        _ => ParseOutcome::failure(Failure::at(input).expect(label.clone())),
    })
}

/// Consume one character matching `predicate`.
pub fn satisfy<P>(predicate: P) -> Parser<char>
where
    P: Fn(char) -> bool + Send + Sync + 'static,
{
    satisfy_labelled(predicate, "matching character".to_string())
}

/// Exactly the character `expected`.
pub fn character(expected: char) -> Parser<char> {
    satisfy_labelled(move |c| c == expected, format!("{:?}", expected))
}

/// An ASCII decimal digit, as a character.
pub fn digit() -> Parser<char> {
    satisfy_labelled(|c| c.is_ascii_digit(), "digit".to_string())
}

/// An ASCII decimal digit, as its numeric value.
pub fn decimal_digit() -> Parser<u32> {
    Parser::new(|input: &Stream| {
        match input.uncons().and_then(|(c, rest)| Some((c.value.to_digit(10)?, rest))) {
            Some((d, rest)) => ParseOutcome::success(d, rest),
            None => ParseOutcome::failure(Failure::at(input).expect("digit")),
        }
    })
}

pub fn any_char() -> Parser<char> {
    satisfy_labelled(|_| true, "any character".to_string())
}

/// One character out of `chars`.
pub fn one_of(chars: &str) -> Parser<char> {
    let label = format!("one of {:?}", chars);
    let chars: Vec<char> = chars.chars().collect();
    satisfy_labelled(move |c| chars.contains(&c), label)
}

/// The exact text `literal`. Fails at the first character that differs.
pub fn string(literal: &str) -> Parser<String> {
    let literal = literal.to_string();
    Parser::new(move |input| {
        let mut rest = input.clone();
        for expected in literal.chars() {
            match rest.uncons() {
                Some((c, next)) if c.value == expected => rest = next,
                _ => return ParseOutcome::failure(Failure::at(&rest).expect(format!("{:?}", expected))),
            }
        }
        ParseOutcome::success(literal.clone(), rest)
    })
}

/// Succeed, consuming nothing, only when no input is left.
pub fn end_of_input() -> Parser<()> {
    Parser::new(|input: &Stream| {
        if input.is_empty() {
            ParseOutcome::success((), input.clone())
        } else {
            ParseOutcome::failure(Failure::at(input).expect("end of input"))
        }
    })
}

/// Zero or more repetitions of `parser`. Never fails.
///
/// Repetition stops where `parser` fails, and also where it succeeds without consuming
/// anything; such successes are dropped, so `many(pure(x))` yields an empty vector.
pub fn many<A>(parser: Parser<A>) -> Parser<Vec<A>>
where
    A: Clone + 'static,
{
    Parser::new(move |input| repeat(&parser, Vec::new(), input.clone()))
}

/// One or more repetitions of `parser`.
pub fn some<A>(parser: Parser<A>) -> Parser<Vec<A>>
where
    A: Clone + 'static,
{
    Parser::new(move |input| {
        let (successes, furthest) = parser.apply(input).into_parts();
        let seed = ParseOutcome::from_successes(Vec::new()).with_failure(furthest);
        successes.into_iter().fold(seed, |out, Success { value, remaining }| {
            out.concat(repeat(&parser, vec![value], remaining))
        })
    })
}

// Depth-first expansion of every way `parser` can keep consuming from `start`, appending
// to `seed`. Explicit stack so long repetitions do not grow the call stack; branches are
// visited in the order `parser` produced them.
fn repeat<A>(parser: &Parser<A>, seed: Vec<A>, start: Stream) -> ParseOutcome<Vec<A>>
where
    A: Clone + 'static,
{
    let mut finished = Vec::new();
    let mut furthest = None;
    let mut pending = vec![(seed, start)];

    while let Some((mut acc, at)) = pending.pop() {
        let (successes, failure) = parser.apply(&at).into_parts();
        furthest = merge_furthest(furthest, failure);

        let consuming: Vec<Success<A>> =
            successes.into_iter().filter(|s| s.remaining.offset() > at.offset()).collect();
        if consuming.is_empty() {
            finished.push(Success::new(acc, at));
            continue;
        }

        let mut branches = consuming.into_iter().rev().peekable();
        while let Some(Success { value, remaining }) = branches.next() {
            let mut next = if branches.peek().is_some() { acc.clone() } else { std::mem::take(&mut acc) };
            next.push(value);
            pending.push((next, remaining));
        }
    }

    ParseOutcome::from_successes(finished).with_failure(furthest)
}

/// One or more `item`s separated by `op`, folded from the left.
///
/// `chainl1(digit, '-', sub)` reads `9-3-2` as `(9-3)-2`.
pub fn chainl1<A, O, F>(item: Parser<A>, op: Parser<O>, fold: F) -> Parser<A>
where
    A: Clone + 'static,
    O: Clone + 'static,
    F: Fn(A, O, A) -> A + Send + Sync + 'static,
{
    let tail = many(op.then(item.clone()));
    item.then(tail)
        .map(move |(first, rest)| rest.into_iter().fold(first, |lhs, (o, rhs)| fold(lhs, o, rhs)))
}
