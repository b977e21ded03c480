//! Property tests for gate formulas.

use proptest::prelude::*;
use quirk_url::{parse_formula_text, parse_matrix};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn affine_formulas_evaluate(a in -100.0f64..100.0, b in -100.0f64..100.0, t in -10.0f64..10.0) {
        let expr = parse_formula_text(&format!("{a}*t + {b}")).unwrap();
        prop_assert!(close(expr.eval_at("t", t).unwrap(), a * t + b));
    }

    #[test]
    fn half_power_is_square_root(t in 0.0f64..100.0) {
        let expr = parse_formula_text("t^½").unwrap();
        prop_assert!(close(expr.eval_at("t", t).unwrap(), t.sqrt()));
    }

    #[test]
    fn unary_minus_binds_looser_than_power(t in -5.0f64..5.0) {
        let expr = parse_formula_text("-t^2").unwrap();
        prop_assert!(close(expr.eval_at("t", t).unwrap(), -(t * t)));
    }

    #[test]
    fn real_matrix_entries_round_to_themselves(x in -1000i32..1000, y in -1000i32..1000) {
        let m = parse_matrix(&format!("{{{{{x},{y}}},{{{y},{x}}}}}")).unwrap();
        prop_assert_eq!(m.get(0, 0).unwrap().re, f64::from(x));
        prop_assert_eq!(m.get(1, 0).unwrap().re, f64::from(y));
    }
}
