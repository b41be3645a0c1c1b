// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Arithmetic Grammar
//!
//! A recursive-descent grammar for single-digit sums and products, built entirely from the
//! combinators in this crate and evaluated while it parses:
//!
//! ```text
//! Expr   := Term   ( '+' Expr | ε )     Term + (Expr or 0)
//! Term   := Factor ( '*' Term | ε )     Factor * (Term or 1)
//! Factor := Digit | '(' Expr ')'
//! ```
//!
//! Precedence comes from the shape of the rules: a `Term` is complete before the `+` that
//! follows it is considered, so `*` binds tighter. The rules recurse on the right, which
//! keeps the descent from looping; both operators are associative, so the values are the
//! same as a left-to-right reading.
//!
//! Arithmetic is checked. A sum or product that does not fit in an `i64` makes the rule
//! fail rather than wrap.

use crate::combinator::{character, decimal_digit, fail, pure};
use crate::deferred::deferred;
use crate::parser::Parser;

/// The three rules of the grammar.
///
/// Each rule keeps the whole grammar alive, so any of them can be cloned out and used on
/// its own.
#[derive(Debug, Clone)]
pub struct Grammar {
    expr: Parser<i64>,
    term: Parser<i64>,
    factor: Parser<i64>,
}

impl Grammar {
    /// The grammar with unbounded parenthesis nesting.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// The grammar with at most `depth` levels of nested parentheses.
    ///
    /// The rules for a deeper level are built when a `(` at the level above is reached, so
    /// a large limit costs nothing up front. Parentheses beyond the limit fail with the
    /// expectation `"expression within nesting limit"`.
    pub fn with_nesting_limit(depth: usize) -> Self {
        Self::build(Some(depth))
    }

    pub fn expr(&self) -> &Parser<i64> {
        &self.expr
    }

    pub fn term(&self) -> &Parser<i64> {
        &self.term
    }

    pub fn factor(&self) -> &Parser<i64> {
        &self.factor
    }

    /// One copy of the rules. `nesting` is how many more levels of parentheses are allowed.
    fn build(nesting: Option<usize>) -> Self {
        let (expr, define_expr) = deferred::<i64>();
        let (term, define_term) = deferred::<i64>();

        let inner = match nesting {
            None => expr.clone(),
            Some(0) => fail("expression within nesting limit"),
            Some(depth) => Parser::new(move |input| Self::build(Some(depth - 1)).expr.apply(input)),
        };

        let factor = decimal_digit()
            .map(i64::from)
            .or(character('(').ignore_then(inner).then_ignore(character(')')));

        let term_tail = character('*').ignore_then(term).or(pure(1));
        let term = define_term.define(factor.clone().bind(move |lhs| {
            term_tail.clone().bind(move |rhs| checked(lhs.checked_mul(rhs), "product within i64 range"))
        }));

        let expr_tail = character('+').ignore_then(expr).or(pure(0));
        let expr = define_expr.define(term.clone().bind(move |lhs| {
            expr_tail.clone().bind(move |rhs| checked(lhs.checked_add(rhs), "sum within i64 range"))
        }));

        // `term` and `factor` reach `expr` through weak handles only.
        Grammar {
            term: owned_by(term, expr.clone()),
            factor: owned_by(factor, expr.clone()),
            expr,
        }
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

/// `rule`, keeping `owner` alive for as long as it is.
fn owned_by(rule: Parser<i64>, owner: Parser<i64>) -> Parser<i64> {
    Parser::new(move |input| {
        let _owner = &owner;
        rule.apply(input)
    })
}

fn checked(value: Option<i64>, label: &str) -> Parser<i64> {
    match value {
        Some(v) => pure(v),
        None => fail(label),
    }
}

/// The `Expr` rule on its own. It accepts the longest prefix it can and leaves the rest.
pub fn expression() -> Parser<i64> {
    Grammar::new().expr
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remaining(parser: &Parser<i64>, text: &str) -> Option<(i64, String)> {
        parser.apply_text(text).into_first().map(|s| (s.value, s.remaining.as_text()))
    }

    #[test]
    fn test_factor() {
        let grammar = Grammar::new();
        assert_eq!(remaining(grammar.factor(), "7"), Some((7, String::new())));
        assert_eq!(remaining(grammar.factor(), "(1+2)*3"), Some((3, "*3".to_string())));
        assert_eq!(remaining(grammar.factor(), "x"), None);
    }

    #[test]
    fn test_term_stops_at_plus() {
        let grammar = Grammar::new();
        assert_eq!(remaining(grammar.term(), "2*3+4"), Some((6, "+4".to_string())));
        assert_eq!(remaining(grammar.term(), "5"), Some((5, String::new())));
    }

    #[test]
    fn test_expr_precedence() {
        let expr = expression();
        assert_eq!(remaining(&expr, "2*3+4"), Some((10, String::new())));
        assert_eq!(remaining(&expr, "2+3*4"), Some((14, String::new())));
        assert_eq!(remaining(&expr, "2*(3+4)"), Some((14, String::new())));
    }

    #[test]
    fn test_expr_leaves_trailing_input() {
        let expr = expression();
        assert_eq!(remaining(&expr, "1+2)"), Some((3, ")".to_string())));
        // `+` with nothing after it falls back to the empty tail.
        assert_eq!(remaining(&expr, "1+"), Some((1, "+".to_string())));
    }

    #[test]
    fn test_nesting_limit() {
        let grammar = Grammar::with_nesting_limit(2);
        assert_eq!(remaining(grammar.expr(), "((1))"), Some((1, String::new())));

        let outcome = grammar.expr().apply_text("(((1)))");
        assert!(outcome.is_failure());
        let failure = outcome.furthest().unwrap();
        assert!(failure.expected.contains("expression within nesting limit"));
        assert_eq!(failure.position.offset, 3);
    }

    #[test]
    fn test_zero_nesting_rejects_parentheses() {
        let grammar = Grammar::with_nesting_limit(0);
        assert_eq!(remaining(grammar.expr(), "1*2"), Some((2, String::new())));
        assert!(grammar.expr().apply_text("(1)").is_failure());
    }

    #[test]
    fn test_rules_outlive_grammar() {
        let term = Grammar::new().term().clone();
        let factor = Grammar::new().factor().clone();

        assert_eq!(term.parse("(1)").unwrap(), 1);
        assert_eq!(term.parse("(2+3)*2").unwrap(), 10);
        assert_eq!(factor.parse("(2+3)").unwrap(), 5);

        let limited = Grammar::with_nesting_limit(1).factor().clone();
        let err = limited.parse("(1+(2))").unwrap_err();
        assert_eq!(err.position().offset, 4);
        assert!(err.to_string().contains("expression within nesting limit"), "got {}", err);
    }

    #[test]
    fn test_large_nesting_limit() {
        let grammar = Grammar::with_nesting_limit(usize::MAX);
        let deep = format!("{}7{}", "(".repeat(40), ")".repeat(40));
        assert_eq!(remaining(grammar.expr(), &deep), Some((7, String::new())));
    }

    #[test]
    fn test_overflow_fails_the_rule() {
        // 9^20 does not fit in an i64.
        let text = vec!["9"; 20].join("*");
        let outcome = expression().apply_text(&text);
        // The tail after the first `9` parses, so no shorter product is tried.
        assert!(outcome.is_failure());
        let failure = outcome.furthest().unwrap();
        assert!(failure.expected.contains("product within i64 range"));
        assert!(expression().apply_text(&vec!["9"; 19].join("*")).is_success());
    }
}
