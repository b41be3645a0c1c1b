// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

use ariadne::{Config, Label, Report, ReportKind, Source};

use crate::outcome::Failure;
use crate::stream::Position;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No way of parsing the input was found. Reported at the furthest position any
    /// alternative reached.
    #[error("{position}: expected {}, found {}", describe_expected(.expected), describe_found(.found))]
    NoParse {
        position: Position,
        found: Option<char>,
        expected: Vec<String>,
    },
}

fn describe_expected(expected: &[String]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{:?}", c),
        None => "end of input".to_string(),
    }
}

impl From<Failure> for Error {
    fn from(failure: Failure) -> Self {
        Error::NoParse {
            position: failure.position,
            found: failure.found,
            expected: failure.expected.into_iter().collect(),
        }
    }
}

impl Error {
    pub fn position(&self) -> Position {
        match self {
            Error::NoParse { position, .. } => *position,
        }
    }

    /// Render this error against the text it came from as a plain-text ariadne report.
    pub fn report(&self, source: &str) -> String {
        let Error::NoParse { position, expected, .. } = self;

        // Pad the source so an end-of-input failure still has a character to point at.
        let padded = format!("{} ", source);
        let span = position.offset..position.offset + 1;

        let report = Report::build(ReportKind::Error, span.clone())
            .with_config(Config::default().with_color(false))
            .with_message(self.to_string())
            .with_label(Label::new(span).with_message(format!("expected {}", describe_expected(expected))))
            .finish();

        let mut out = Vec::new();
        match report.write(Source::from(padded), &mut out) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}
