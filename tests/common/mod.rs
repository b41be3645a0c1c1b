use monadic_combinators::{ParseOutcome, Stream};

/// Every success of `outcome` as its value and the text left after it.
#[allow(dead_code)]
pub fn survivors<A>(outcome: ParseOutcome<A>) -> Vec<(A, String)> {
    outcome.into_iter().map(|s| (s.value, s.remaining.as_text())).collect()
}

/// `stream` moved forward by `n` characters.
#[allow(dead_code)]
pub fn skip(stream: &Stream, n: usize) -> Stream {
    (0..n).fold(stream.clone(), |s, _| s.uncons().expect("stream too short").1)
}

// -------------------------------------------------------------------------------------------------
// Macro helpers used by many test modules so we keep them in a common place.
// -------------------------------------------------------------------------------------------------

/// Assert that a parser successfully parses `src` and yields `want`.
///
/// Example:
/// ```ignore
/// assert_parses_to!(digit(), "7", '7');
/// ```
#[macro_export]
macro_rules! assert_parses_to {
    ($parser:expr, $src:expr, $want:expr $(,)?) => {{
        let got = $parser.parse($src).expect("parse error");
        assert_eq!(got, $want, "on input {:?}", $src);
    }};
}

/// Assert that applying a parser to `src` produces no successes.
#[macro_export]
macro_rules! assert_fails {
    ($parser:expr, $src:expr $(,)?) => {{
        assert!($parser.apply_text($src).is_failure(), "expected failure on input {:?}", $src);
    }};
}
