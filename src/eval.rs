// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

use crate::combinator::end_of_input;
use crate::error::Error;
use crate::expr::Grammar;
use crate::parser::Parser;

/// Builder for configuring and creating an [`Evaluator`].
///
/// By default the whole input must be an expression and parentheses may nest without
/// limit.
#[derive(Debug, Default, Clone)]
pub struct EvaluatorBuilder {
    allow_trailing: bool,
    max_nesting: Option<usize>,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure whether a successful parse may leave unconsumed input behind.
    ///
    /// When allowed, `"1+2)"` evaluates to `3`.
    pub fn allow_trailing(mut self, allow: bool) -> Self {
        self.allow_trailing = allow;
        self
    }

    /// Limit how deeply parentheses may nest.
    pub fn max_nesting(mut self, depth: usize) -> Self {
        self.max_nesting = Some(depth);
        self
    }

    pub fn build(self) -> Evaluator {
        log::debug!(
            "building expression grammar (nesting limit: {:?}, trailing input allowed: {})",
            self.max_nesting,
            self.allow_trailing
        );

        let grammar = match self.max_nesting {
            Some(depth) => Grammar::with_nesting_limit(depth),
            None => Grammar::new(),
        };
        let expr = grammar.expr().clone();
        let parser = if self.allow_trailing { expr } else { expr.then_ignore(end_of_input()) };

        Evaluator { parser }
    }
}

/// Parses and evaluates arithmetic expressions in one step.
#[derive(Debug, Clone)]
pub struct Evaluator {
    parser: Parser<i64>,
}

impl Evaluator {
    pub fn new() -> Self {
        EvaluatorBuilder::new().build()
    }

    /// The value of the first parse of `text`, if there is one.
    pub fn evaluate(&self, text: &str) -> Option<i64> {
        self.try_evaluate(text).ok()
    }

    /// Like [`Evaluator::evaluate`], reporting where and why parsing failed.
    pub fn try_evaluate(&self, text: &str) -> Result<i64, Error> {
        self.parser.parse(text).inspect_err(|err| {
            log::debug!("no value for {:?}: {}", text, err);
        })
    }

    /// The configured parser, for composing into larger grammars.
    pub fn parser(&self) -> &Parser<i64> {
        &self.parser
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate `text` with the default configuration.
pub fn evaluate(text: &str) -> Option<i64> {
    Evaluator::new().evaluate(text)
}

/// Evaluate `text` with the default configuration, reporting failures.
pub fn try_evaluate(text: &str) -> Result<i64, Error> {
    Evaluator::new().try_evaluate(text)
}
