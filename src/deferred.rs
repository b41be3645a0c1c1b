// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Deferred Parsers
//!
//! Grammar rules refer to each other before they are all defined: `Expr` mentions `Term`,
//! `Term` mentions `Factor`, and `Factor` mentions `Expr` again. A deferred parser is a
//! placeholder that can be used while building a rule and is filled in afterwards.
//!
//! [`deferred`] returns the placeholder together with a one-shot [`Deferred`] definer.
//! Handles only hold a weak link to the definition, and [`Deferred::define`] returns the
//! parser that owns it, so a self-referential grammar does not keep itself alive through
//! a reference cycle. Keep the parser returned by `define`; the handles stop working
//! once it and all its clones are dropped.
//!
//! ```
//! use monadic_combinators::combinator::{character, choice, pure};
//! use monadic_combinators::deferred::deferred;
//!
//! // Nested = '(' Nested ')' | ε, returning the nesting depth.
//! let (nested, define) = deferred::<usize>();
//! let nested = define.define(choice(
//!     character('(').ignore_then(nested).then_ignore(character(')')).map(|d| d + 1),
//!     pure(0),
//! ));
//!
//! assert_eq!(nested.parse("((()))").unwrap(), 3);
//! ```

use std::sync::{Arc, OnceLock, Weak};

use crate::parser::Parser;

type Slot<A> = OnceLock<Parser<A>>;

/// The one-time definer of a parser created with [`deferred`].
pub struct Deferred<A> {
    slot: Arc<Slot<A>>,
}

/// Create a placeholder parser and the definer that will fill it in.
///
/// # Panics
///
/// Applying the placeholder before [`Deferred::define`] has been called, or after the
/// defined parser has been dropped, is a construction mistake and panics.
pub fn deferred<A: 'static>() -> (Parser<A>, Deferred<A>) {
    let definer = Deferred { slot: Arc::new(OnceLock::new()) };
    (definer.handle(), definer)
}

impl<A: 'static> Deferred<A> {
    /// Another placeholder for the same definition.
    pub fn handle(&self) -> Parser<A> {
        let slot: Weak<Slot<A>> = Arc::downgrade(&self.slot);
        Parser::new(move |input| match slot.upgrade() {
            Some(slot) => match slot.get() {
                Some(parser) => parser.apply(input),
                None => panic!("deferred parser applied before it was defined"),
            },
            None => panic!("deferred parser applied after its definition was dropped"),
        })
    }

    /// Supply the definition and get back the parser that owns it.
    pub fn define(self, parser: Parser<A>) -> Parser<A> {
        if self.slot.set(parser).is_err() {
            unreachable!("a definer fills its slot once, when it is consumed");
        }
        log::trace!("deferred parser defined");

        let slot = self.slot;
        Parser::new(move |input| match slot.get() {
            Some(parser) => parser.apply(input),
            None => unreachable!("deferred slot is filled before its owner is returned"),
        })
    }
}

/// Build a parser that can refer to itself.
///
/// `body` receives a handle to the parser being defined and returns its definition.
///
/// ```
/// use monadic_combinators::combinator::{character, choice, pure};
/// use monadic_combinators::deferred::recursive;
///
/// // A run of `a`s, counted by recursing on the tail.
/// let count = recursive(|count| choice(character('a').ignore_then(count).map(|n| n + 1), pure(0)));
/// assert_eq!(count.parse("aaa").unwrap(), 3);
/// ```
pub fn recursive<A, F>(body: F) -> Parser<A>
where
    A: 'static,
    F: FnOnce(Parser<A>) -> Parser<A>,
{
    let (handle, definer) = deferred();
    definer.define(body(handle))
}
