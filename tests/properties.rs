use proptest::prelude::*;
use ratfunc::roots::roots_coincide;
use ratfunc::{parse_function, EndBehavior, Polynomial, RationalFunction, ROOT_TOLERANCE};

// Small integer coefficients, highest degree first
fn small_coeffs(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(-6i64..=6, 1..=max_len)
}

fn nonzero_coeffs(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    small_coeffs(max_len).prop_filter("denominator must be non-zero", |c| c.iter().any(|&v| v != 0))
}

// (common factor) * num / ((common factor) * den), so cancellation happens often
fn rational_function() -> impl Strategy<Value = RationalFunction> {
    (small_coeffs(3), nonzero_coeffs(3), nonzero_coeffs(2)).prop_map(|(num, den, common)| {
        let common = Polynomial::from_integers(&common);
        RationalFunction::new(
            Polynomial::from_integers(&num) * &common,
            Polynomial::from_integers(&den) * &common,
        )
        .expect("non-zero denominator")
    })
}

proptest! {
    #[test]
    fn end_behavior_agrees_with_horizontal_asymptote(rf in rational_function()) {
        match (rf.horizontal_asymptote(), rf.end_behavior()) {
            (Some(h), EndBehavior::ApproachesZero) => prop_assert_eq!(h, 0.0),
            (Some(h), EndBehavior::Approaches(v)) => prop_assert_eq!(h, v),
            (None, EndBehavior::PositiveInfinity | EndBehavior::NegativeInfinity) => {}
            (h, e) => prop_assert!(false, "mismatch: {:?} vs {:?}", h, e),
        }
    }

    #[test]
    fn holes_are_never_asymptotes(rf in rational_function()) {
        let asymptotes = rf.vertical_asymptotes();
        for hole in rf.holes() {
            prop_assert!(!asymptotes.iter().any(|&va| roots_coincide(va, hole.x, ROOT_TOLERANCE)));
        }
    }

    #[test]
    fn simplification_is_idempotent(rf in rational_function()) {
        let once = rf.simplified();
        let again = RationalFunction::new(
            once.numerator().clone(),
            once.denominator().clone(),
        ).expect("simplified denominator is non-zero");
        prop_assert!(again.common_factor().is_constant() || again.numerator().is_zero());
        prop_assert_eq!(again.simplified_numerator(), once.simplified_numerator());
        prop_assert_eq!(again.simplified_denominator(), once.simplified_denominator());
    }

    #[test]
    fn evaluation_matches_original_ratio(rf in rational_function(), x in -9.0f64..9.0) {
        let den = rf.denominator().evaluate_f64(x);
        prop_assume!(den.abs() > 1e-3);
        let expected = rf.numerator().evaluate_f64(x) / den;
        let got = rf.evaluate(x);
        prop_assert!((got - expected).abs() <= 1e-6 * expected.abs().max(1.0), "{} vs {}", got, expected);
    }

    #[test]
    fn display_string_round_trips(num in small_coeffs(4), den in nonzero_coeffs(4)) {
        let original = RationalFunction::from_integers(&num, &den).expect("valid");
        let reparsed = parse_function(&original.to_display_string()).expect("parse display string");
        prop_assert_eq!(reparsed.numerator(), original.numerator());
        prop_assert_eq!(reparsed.denominator(), original.denominator());
    }

    #[test]
    fn x_intercepts_are_zeros(rf in rational_function()) {
        for x in rf.x_intercepts() {
            let y = rf.evaluate(x);
            prop_assert!(y.abs() < 1e-6, "f({}) = {}", x, y);
        }
    }
}
