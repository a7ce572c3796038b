//! Property-based tests for the reduction order.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use termord_core::{display_expr, parse_expr, root_kind, Expr, NodeKind};

    use crate::{
        divisors, node_histogram, valid_reduction_order, variable_occurrences, OrderConfig,
    };

    const BINARY_OPS: [&str; 15] = [
        "/", "*", "%", "-", "+", "min", "max", "||", "&&", ">=", ">", "<=", "<", "!=", "==",
    ];

    // Strategy for generating leaves: variables, wildcards and literals
    fn leaf() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(vec!["x", "y", "z", "c0", "c1"]).prop_map(str::to_string),
            (-8i64..8i64).prop_map(|n| n.to_string()),
            (0u64..8u64).prop_map(|n| format!("{n}u")),
        ]
    }

    // Strategy for generating expression text up to depth 4
    fn expr_text() -> impl Strategy<Value = String> {
        leaf().prop_recursive(4, 32, 3, |inner| {
            prop_oneof![
                (prop::sample::select(BINARY_OPS.to_vec()), inner.clone(), inner.clone())
                    .prop_map(|(op, a, b)| format!("({op} {a} {b})")),
                inner.clone().prop_map(|a| format!("(! {a})")),
                (inner.clone(), inner.clone(), inner.clone())
                    .prop_map(|(c, t, f)| format!("(select {c} {t} {f})")),
                inner.clone().prop_map(|a| format!("(cast i32 {a})")),
                (inner.clone(), inner.clone()).prop_map(|(v, b)| format!("(let t {v} (* t {b}))")),
            ]
        })
    }

    fn expr() -> impl Strategy<Value = Expr> {
        expr_text().prop_map(|s| parse_expr(&s).unwrap())
    }

    proptest! {
        #[test]
        fn containment_law(lhs in expr(), rhs in expr()) {
            let config = OrderConfig::default();
            if valid_reduction_order(&lhs, &rhs) {
                let lhs_vars = variable_occurrences(&lhs);
                for (name, count) in variable_occurrences(&rhs).iter() {
                    if !config.is_constant_wildcard(name.as_str()) {
                        prop_assert!(lhs_vars.count(name) >= count, "{} grew", name);
                    }
                }
            }
        }

        #[test]
        fn order_is_irreflexive(e in expr()) {
            prop_assert!(!valid_reduction_order(&e, &e));
        }

        #[test]
        fn order_is_asymmetric(lhs in expr(), rhs in expr()) {
            prop_assert!(!(valid_reduction_order(&lhs, &rhs) && valid_reduction_order(&rhs, &lhs)));
        }

        #[test]
        fn root_swap_flips_verdict(e in expr()) {
            // Wrapping in a cast changes neither variables nor histogram,
            // only the root kind.
            prop_assume!(root_kind(&e) != Some(NodeKind::Cast));
            let wrapped = parse_expr(&format!("(cast i32 {})", display_expr(&e))).unwrap();
            prop_assert_ne!(
                valid_reduction_order(&wrapped, &e),
                valid_reduction_order(&e, &wrapped)
            );
        }

        #[test]
        fn max_counts_as_min(s in expr_text()) {
            let original = parse_expr(&s).unwrap();
            let renamed = parse_expr(&s.replace("(max ", "(min ")).unwrap();
            prop_assert_eq!(node_histogram(&original), node_histogram(&renamed));
        }

        #[test]
        fn printed_form_parses_back(s in expr_text()) {
            let e = parse_expr(&s).unwrap();
            prop_assert_eq!(display_expr(&e).to_string(), s.clone());
            prop_assert_eq!(parse_expr(&display_expr(&e).to_string()).unwrap(), e);
        }

        #[test]
        fn analyses_are_idempotent(e in expr()) {
            prop_assert_eq!(variable_occurrences(&e), variable_occurrences(&e));
            prop_assert_eq!(node_histogram(&e), node_histogram(&e));
            prop_assert_eq!(divisors(&e), divisors(&e));
        }

        #[test]
        fn let_body_names_are_local(value in expr_text(), body in expr_text()) {
            let e = parse_expr(&format!("(let x {value} (+ x {body}))")).unwrap();
            let value_vars = variable_occurrences(&parse_expr(&value).unwrap());
            let body_vars = variable_occurrences(&parse_expr(&body).unwrap());
            let vars = variable_occurrences(&e);
            prop_assert_eq!(vars.count("x"), value_vars.count("x"));
            for name in ["y", "z", "c0", "c1"] {
                prop_assert_eq!(vars.count(name), value_vars.count(name) + body_vars.count(name));
            }
        }
    }
}
