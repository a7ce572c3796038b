//! Operator histograms.
//!
//! A histogram counts how often each operator kind occurs in an expression.
//! Comparing the histograms of a rule's two sides bucket by bucket, in
//! [`HISTOGRAM_PRIORITY`] order, is the main test of whether the rule
//! shrinks expressions.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use termord_core::{Expr, NodeKind, HISTOGRAM_PRIORITY};
use tracing::trace;

/// Per-bucket operator counts of one expression.
///
/// Only operator buckets ever appear; literals, casts, variables, lets and
/// `!=` are not counted, and `max` is counted as `min`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeHistogram {
    counts: BTreeMap<NodeKind, usize>,
}

impl NodeHistogram {
    /// Returns the count for a bucket. Absent buckets count zero.
    #[must_use]
    pub fn count(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Iterates over the non-empty buckets.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Total number of counted operators.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Returns true if no operator was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn increment(&mut self, kind: NodeKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }
}

/// Builds the operator histogram of `expr`.
///
/// Every operand of every node is visited, including both the value and
/// the body of a `let` and the value of a `cast`.
#[must_use]
pub fn node_histogram(expr: &Expr) -> NodeHistogram {
    let mut histogram = NodeHistogram::default();
    if let Some(root) = termord_core::root_id(expr) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &expr[id];
            if let Some(bucket) = node.kind().histogram_bucket() {
                histogram.increment(bucket);
            }
            stack.extend(node.operands());
        }
    }
    histogram
}

/// The first bucket, in priority order, where two histograms differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BucketDifference {
    /// The deciding bucket.
    pub kind: NodeKind,
    /// Count on the left side.
    pub lhs: usize,
    /// Count on the right side.
    pub rhs: usize,
}

impl BucketDifference {
    /// `Greater` when the left side has more operators in this bucket.
    #[must_use]
    pub fn ordering(&self) -> Ordering {
        self.lhs.cmp(&self.rhs)
    }
}

/// Walks the buckets in priority order and returns the first difference,
/// or `None` if the histograms agree on every bucket.
#[must_use]
pub fn first_difference(lhs: &NodeHistogram, rhs: &NodeHistogram) -> Option<BucketDifference> {
    HISTOGRAM_PRIORITY.iter().find_map(|&kind| {
        let (l, r) = (lhs.count(kind), rhs.count(kind));
        trace!(%kind, lhs = l, rhs = r, "histogram bucket");
        (l != r).then_some(BucketDifference { kind, lhs: l, rhs: r })
    })
}

/// Compares two histograms lexicographically in priority order.
///
/// `Greater` means the left side is heavier, so replacing it by the right
/// side shrinks the expression.
#[must_use]
pub fn compare_histograms(lhs: &NodeHistogram, rhs: &NodeHistogram) -> Ordering {
    first_difference(lhs, rhs).map_or(Ordering::Equal, |diff| diff.ordering())
}

#[cfg(test)]
mod tests {
    use super::*;
    use termord_core::parse_expr;

    fn histogram(s: &str) -> NodeHistogram {
        node_histogram(&parse_expr(s).unwrap())
    }

    #[test]
    fn test_counts_operators() {
        let h = histogram("(+ (* x y) (+ x 1))");
        assert_eq!(h.count(NodeKind::Add), 2);
        assert_eq!(h.count(NodeKind::Mul), 1);
        assert_eq!(h.count(NodeKind::Sub), 0);
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn test_leaves_are_not_counted() {
        assert!(histogram("x").is_empty());
        assert!(histogram("3").is_empty());
        assert!(histogram("(cast i32 x)").is_empty());
        let h = histogram("(cast i32 (- x 1.5))");
        assert_eq!(h.iter().collect::<Vec<_>>(), vec![(NodeKind::Sub, 1)]);
    }

    #[test]
    fn test_max_counts_as_min() {
        let h = histogram("(max (min x y) (max y z))");
        assert_eq!(h.count(NodeKind::Min), 3);
        assert_eq!(h.count(NodeKind::Max), 0);
        assert_eq!(h, histogram("(min (min x y) (min y z))"));
    }

    #[test]
    fn test_let_contributes_value_and_body() {
        let h = histogram("(let t (+ x 1) (* t (- t 2)))");
        assert_eq!(h.count(NodeKind::Add), 1);
        assert_eq!(h.count(NodeKind::Mul), 1);
        assert_eq!(h.count(NodeKind::Sub), 1);
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn test_vector_and_boolean_nodes() {
        let h = histogram("(select (&& (!= x 0) (! (< y x))) (ramp x 1 4) (broadcast (|| a b) 4))");
        for kind in [
            NodeKind::Select,
            NodeKind::And,
            NodeKind::Not,
            NodeKind::Lt,
            NodeKind::Ramp,
            NodeKind::Broadcast,
            NodeKind::Or,
        ] {
            assert_eq!(h.count(kind), 1, "{kind}");
        }
        assert_eq!(h.total(), 7);
    }

    #[test]
    fn test_ne_is_not_counted() {
        let h = histogram("(!= (+ x y) (!= z 1))");
        assert_eq!(h.count(NodeKind::Ne), 0);
        assert_eq!(h.iter().collect::<Vec<_>>(), vec![(NodeKind::Add, 1)]);
        assert_eq!(first_difference(&h, &histogram("(!= x (+ y z))")), None);
    }

    #[test]
    fn test_first_difference_follows_priority() {
        // More adds on the left, but the right has a mul which outranks add.
        let lhs = histogram("(+ (+ x y) (+ z w))");
        let rhs = histogram("(* x y)");
        let diff = first_difference(&lhs, &rhs).unwrap();
        assert_eq!(diff.kind, NodeKind::Mul);
        assert_eq!(diff.ordering(), Ordering::Less);
        assert_eq!(compare_histograms(&lhs, &rhs), Ordering::Less);
        assert_eq!(compare_histograms(&rhs, &lhs), Ordering::Greater);
    }

    #[test]
    fn test_equal_histograms() {
        let lhs = histogram("(+ x (max y z))");
        let rhs = histogram("(min (+ y z) x)");
        assert_eq!(first_difference(&lhs, &rhs), None);
        assert_eq!(compare_histograms(&lhs, &rhs), Ordering::Equal);
    }
}
