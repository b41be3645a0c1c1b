//! Cross-check the combinator grammar against an independent chumsky grammar for the same
//! language.

use chumsky::prelude::*;
use monadic_combinators::evaluate;
use proptest::prelude::*;

/// Sums and products of single digits with parentheses, folded left.
fn reference<'a>() -> impl Parser<'a, &'a str, i64, extra::Err<Rich<'a, char>>> {
    recursive(|expr| {
        let digit = chumsky::primitive::any()
            .filter(|c: &char| c.is_ascii_digit())
            .map(|c: char| i64::from(c.to_digit(10).unwrap()));

        let atom = digit.or(expr.delimited_by(just('('), just(')')));

        let product = atom.clone().foldl(just('*').ignore_then(atom).repeated(), |lhs, rhs| lhs * rhs);

        product.clone().foldl(just('+').ignore_then(product).repeated(), |lhs, rhs| lhs + rhs)
    })
    .then_ignore(end())
}

fn reference_value(input: &str) -> Option<i64> {
    reference().parse(input).into_result().ok()
}

/// Well-formed expressions, rendered as text.
fn arb_expression() -> impl Strategy<Value = String> {
    let leaf = (0u32..10).prop_map(|d| d.to_string());
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{}+{}", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{}*{}", a, b)),
            inner.prop_map(|a| format!("({})", a)),
        ]
    })
}

#[test]
fn reference_grammar_agrees_on_known_values() {
    assert_eq!(reference_value("2*3+4"), Some(10));
    assert_eq!(reference_value("2*(3+4)"), Some(14));
    assert_eq!(reference_value("(2+3"), None);
}

proptest! {
    #[test]
    fn prop_well_formed_expressions_agree(input in arb_expression()) {
        let expected = reference_value(&input);
        prop_assert!(expected.is_some(), "reference rejected {:?}", input);
        prop_assert_eq!(evaluate(&input), expected, "on input {:?}", input);
    }

    #[test]
    fn prop_arbitrary_text_agrees(input in "[0-9()+*]{0,12}") {
        prop_assert_eq!(evaluate(&input), reference_value(&input), "on input {:?}", input);
    }
}
