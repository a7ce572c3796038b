//! Divisor collection.
//!
//! A rule whose right side divides by a sub-expression the left side never
//! divides by introduces a division with no matching guard on the input.
//! [`check_divisors`] detects this. The decider reports the result on its
//! verdict without letting it change the outcome.

use std::collections::BTreeSet;
use std::fmt;

use termord_core::{display_expr, root_id, subexpr, Expr, HalideLang, Id};

/// A sub-expression used as a divisor.
///
/// Identity is structural: two divisors are equal exactly when their
/// canonical node sequences are equal.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Divisor {
    nodes: Vec<HalideLang>,
}

impl Divisor {
    fn new(expr: &Expr, id: Id) -> Self {
        Self {
            nodes: subexpr(expr, id).as_ref().to_vec(),
        }
    }

    /// Returns the divisor as a standalone expression.
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        Expr::from(self.nodes.clone())
    }
}

impl fmt::Display for Divisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_expr(&self.to_expr()))
    }
}

impl fmt::Debug for Divisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Divisor({self})")
    }
}

/// The distinct divisors of one expression.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DivisorSet {
    divisors: BTreeSet<Divisor>,
}

impl DivisorSet {
    /// Returns true if `divisor` appears in this set.
    #[must_use]
    pub fn contains(&self, divisor: &Divisor) -> bool {
        self.divisors.contains(divisor)
    }

    /// Returns true if every divisor of `self` also appears in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &DivisorSet) -> bool {
        self.divisors.is_subset(&other.divisors)
    }

    /// Iterates over the divisors in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Divisor> {
        self.divisors.iter()
    }

    /// Returns the canonical s-expression of every divisor.
    #[must_use]
    pub fn rendered(&self) -> BTreeSet<String> {
        self.divisors.iter().map(ToString::to_string).collect()
    }

    /// Returns the number of distinct divisors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.divisors.len()
    }

    /// Returns true if the expression never divides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.divisors.is_empty()
    }
}

/// Collects the right operand of every `/` and `%` in `expr`.
///
/// Both operands of a division are searched as well, so nested divisors are
/// found. Let values and bodies are searched without any scope tracking.
#[must_use]
pub fn divisors(expr: &Expr) -> DivisorSet {
    let mut set = DivisorSet::default();
    let mut stack: Vec<Id> = root_id(expr).into_iter().collect();
    while let Some(id) = stack.pop() {
        let node = &expr[id];
        if let HalideLang::Div([_, divisor]) | HalideLang::Mod([_, divisor]) = node {
            set.divisors.insert(Divisor::new(expr, *divisor));
        }
        stack.extend(node.operands());
    }
    set
}

/// Returns true if every divisor on the right side also divides on the left.
#[must_use]
pub fn check_divisors(lhs: &Expr, rhs: &Expr) -> bool {
    divisors(rhs).is_subset(&divisors(lhs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use termord_core::parse_expr;

    fn rendered(s: &str) -> Vec<String> {
        divisors(&parse_expr(s).unwrap()).rendered().into_iter().collect()
    }

    fn check(lhs: &str, rhs: &str) -> bool {
        check_divisors(&parse_expr(lhs).unwrap(), &parse_expr(rhs).unwrap())
    }

    #[test]
    fn test_collects_div_and_mod() {
        assert_eq!(rendered("(+ (/ x y) (% z 8))"), vec!["8", "y"]);
    }

    #[test]
    fn test_nested_divisors() {
        // Divisors inside both the dividend and the divisor are found.
        assert_eq!(
            rendered("(/ (/ x 2) (% y (+ z 1)))"),
            vec!["(% y (+ z 1))", "(+ z 1)", "2"]
        );
    }

    #[test]
    fn test_structural_identity() {
        let set = divisors(&parse_expr("(+ (/ x (* y 2)) (% z (* y 2)))").unwrap());
        assert_eq!(set.len(), 1);
        assert!(set.iter().all(|d| d.to_string() == "(* y 2)"));
    }

    #[test]
    fn test_let_is_searched() {
        assert_eq!(rendered("(let t (/ x 3) (% t y))"), vec!["3", "y"]);
    }

    #[test]
    fn test_no_divisors() {
        assert!(rendered("(+ x (* y 3))").is_empty());
    }

    #[test]
    fn test_check_divisors() {
        assert!(check("(/ (* x y) y)", "x"));
        assert!(check("(/ x y)", "(% x y)"));
        assert!(!check("(* x y)", "(/ x y)"));
        assert!(!check("(/ x 2)", "(/ x 4)"));
        assert!(check("x", "x"));
    }

    #[test]
    fn test_deep_divisor_chain() {
        // (/ (/ ... (/ x 1) ...) 2000): too deep to walk recursively.
        let mut expr = Expr::default();
        let mut top = expr.add(HalideLang::Var("x".into()));
        for n in 1..=200_000 {
            let d = expr.add(HalideLang::Int(n % 2000 + 1));
            top = expr.add(HalideLang::Div([top, d]));
        }
        let set = divisors(&expr);
        assert_eq!(set.len(), 2000);
        assert!(check_divisors(&expr, &parse_expr("(% x 7)").unwrap()));
        assert!(!check_divisors(&expr, &parse_expr("(% x 0)").unwrap()));
    }

    #[test]
    fn test_idempotent() {
        let expr = parse_expr("(/ (% x c0) (+ y c1))").unwrap();
        assert_eq!(divisors(&expr), divisors(&expr));
    }
}
