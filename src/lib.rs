// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Monadic Combinators
//!
//! A small monadic parser-combinator engine over positioned character streams.
//!
//! Parsers are pure values: applying one to a [`Stream`] returns a [`ParseOutcome`], an
//! ordered list of every way the parser matched together with the input left over after
//! each. An empty list is a failure. Larger parsers are built from a handful of
//! primitives with sequencing ([`bind`]), committed alternation ([`choice`]) and
//! repetition ([`many`], [`some`]).
//!
//! ## Features
//!
//! * **Positioned input** - every character carries its line, column and offset.
//! * **Backtracking for free** - streams are immutable, so an alternative always restarts
//!   from exactly where the failed one began.
//! * **Recursive grammars** - [`deferred`] and [`recursive`] let rules refer to each other
//!   before they are defined.
//! * **Diagnostics** - failures remember the furthest position reached and what was
//!   expected there, and render as [ariadne](https://docs.rs/ariadne) reports.
//! * **A worked grammar** - [`eval`] parses and evaluates arithmetic with `+`, `*` and
//!   parentheses.
//!
//! ## Usage
//!
//! ```rust
//! use monadic_combinators::combinator::{character, digit, end_of_input, some};
//!
//! // One or more digits, then the end of the input.
//! let number = some(digit())
//!     .map(|ds| ds.into_iter().collect::<String>())
//!     .then_ignore(end_of_input());
//!
//! assert_eq!(number.parse("2024").unwrap(), "2024");
//!
//! let err = number.parse("20x4").unwrap_err();
//! assert_eq!(err.to_string(), "1:3: expected digit or end of input, found 'x'");
//! ```
//!
//! ### Evaluating expressions
//!
//! ```rust
//! use monadic_combinators::eval::{evaluate, EvaluatorBuilder};
//!
//! assert_eq!(evaluate("2*(3+4)"), Some(14));
//! assert_eq!(evaluate("(2+3"), None);
//!
//! // Accept a parse that stops before the end of the input.
//! let lenient = EvaluatorBuilder::new().allow_trailing(true).build();
//! assert_eq!(lenient.evaluate("1+2)"), Some(3));
//! ```
//!
//! ### Reporting failures
//!
//! ```rust
//! use monadic_combinators::eval::try_evaluate;
//!
//! let source = "(2+3";
//! let err = try_evaluate(source).unwrap_err();
//! let report = err.report(source);
//! assert!(report.contains("expected"));
//! ```

pub mod combinator;
pub mod deferred;
pub mod error;
pub mod eval;
pub mod expr;
pub mod outcome;
pub mod parser;
pub mod stream;

// Re-export the public API
pub use combinator::{
    any_char, bind, chainl1, character, choice, decimal_digit, digit, end_of_input, fail, many, map,
    one_of, pure, pure_with, satisfy, some, string,
};
pub use deferred::{deferred, recursive, Deferred};
pub use error::Error;
pub use eval::{evaluate, try_evaluate, Evaluator, EvaluatorBuilder};
pub use expr::{expression, Grammar};
pub use outcome::{Failure, ParseOutcome, Success};
pub use parser::Parser;
pub use stream::{Position, Stream, StreamChar};
