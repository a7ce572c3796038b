//! Node-kind taxonomy.
//!
//! Every node of a [`HalideLang`](crate::HalideLang) expression has exactly
//! one [`NodeKind`]. The two orderings used to compare rule sides live here
//! as fixed data: the histogram priority list and the root rank table.

use std::fmt;

/// The syntactic category of an expression node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    /// Vector ramp `ramp(base, stride, lanes)`.
    Ramp,
    /// Vector broadcast `broadcast(value, lanes)`.
    Broadcast,
    /// Ternary `select(cond, t, f)`.
    Select,
    /// Division.
    Div,
    /// Multiplication.
    Mul,
    /// Modulo.
    Mod,
    /// Subtraction.
    Sub,
    /// Addition.
    Add,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
    /// Boolean negation.
    Not,
    /// Boolean disjunction.
    Or,
    /// Boolean conjunction.
    And,
    /// `>=`
    Ge,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `<`
    Lt,
    /// `!=`
    Ne,
    /// `==`
    Eq,
    /// Type conversion.
    Cast,
    /// Floating-point literal.
    FloatImm,
    /// Unsigned integer literal.
    UIntImm,
    /// Signed integer literal.
    IntImm,
    /// Variable reference.
    Variable,
    /// Scoped binding `let(name, value, body)`.
    Let,
    /// The type operand of a cast.
    TypeTag,
}

/// Histogram buckets in comparison priority order, heaviest first.
///
/// `Max` has no entry of its own: it is counted in the `Min` bucket. The
/// `Ne` slot is never filled.
pub const HISTOGRAM_PRIORITY: [NodeKind; 18] = [
    NodeKind::Ramp,
    NodeKind::Broadcast,
    NodeKind::Select,
    NodeKind::Div,
    NodeKind::Mul,
    NodeKind::Mod,
    NodeKind::Sub,
    NodeKind::Add,
    NodeKind::Min,
    NodeKind::Not,
    NodeKind::Or,
    NodeKind::And,
    NodeKind::Ge,
    NodeKind::Gt,
    NodeKind::Le,
    NodeKind::Lt,
    NodeKind::Ne,
    NodeKind::Eq,
];

/// Rank given to kinds that take no part in the root ordering.
pub const SENTINEL_RANK: u8 = 0;

impl NodeKind {
    /// Rank of this kind when it sits at the root of a rule side.
    ///
    /// Operators rank above casts, which rank above literals. `Min` and
    /// `Max` share a rank. Variables, lets and type tags get
    /// [`SENTINEL_RANK`].
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            NodeKind::Ramp => 23,
            NodeKind::Broadcast => 22,
            NodeKind::Select => 21,
            NodeKind::Div => 20,
            NodeKind::Mul => 19,
            NodeKind::Mod => 18,
            NodeKind::Sub => 17,
            NodeKind::Add => 16,
            NodeKind::Max | NodeKind::Min => 14,
            NodeKind::Not => 13,
            NodeKind::Or => 12,
            NodeKind::And => 11,
            NodeKind::Ge => 10,
            NodeKind::Gt => 9,
            NodeKind::Le => 8,
            NodeKind::Lt => 7,
            NodeKind::Ne => 6,
            NodeKind::Eq => 5,
            NodeKind::Cast => 4,
            NodeKind::FloatImm => 2,
            NodeKind::UIntImm => 1,
            NodeKind::IntImm => 0,
            NodeKind::Variable | NodeKind::Let | NodeKind::TypeTag => SENTINEL_RANK,
        }
    }

    /// The histogram bucket this kind increments, if any.
    #[must_use]
    pub const fn histogram_bucket(self) -> Option<NodeKind> {
        match self {
            NodeKind::Max => Some(NodeKind::Min),
            NodeKind::Ramp
            | NodeKind::Broadcast
            | NodeKind::Select
            | NodeKind::Div
            | NodeKind::Mul
            | NodeKind::Mod
            | NodeKind::Sub
            | NodeKind::Add
            | NodeKind::Min
            | NodeKind::Not
            | NodeKind::Or
            | NodeKind::And
            | NodeKind::Ge
            | NodeKind::Gt
            | NodeKind::Le
            | NodeKind::Lt
            | NodeKind::Eq => Some(self),
            NodeKind::Ne
            | NodeKind::Cast
            | NodeKind::FloatImm
            | NodeKind::UIntImm
            | NodeKind::IntImm
            | NodeKind::Variable
            | NodeKind::Let
            | NodeKind::TypeTag => None,
        }
    }

    /// Returns true for literal constants.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(self, NodeKind::FloatImm | NodeKind::UIntImm | NodeKind::IntImm)
    }

    /// Returns a short name for the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Ramp => "ramp",
            NodeKind::Broadcast => "broadcast",
            NodeKind::Select => "select",
            NodeKind::Div => "div",
            NodeKind::Mul => "mul",
            NodeKind::Mod => "mod",
            NodeKind::Sub => "sub",
            NodeKind::Add => "add",
            NodeKind::Min => "min",
            NodeKind::Max => "max",
            NodeKind::Not => "not",
            NodeKind::Or => "or",
            NodeKind::And => "and",
            NodeKind::Ge => "ge",
            NodeKind::Gt => "gt",
            NodeKind::Le => "le",
            NodeKind::Lt => "lt",
            NodeKind::Ne => "ne",
            NodeKind::Eq => "eq",
            NodeKind::Cast => "cast",
            NodeKind::FloatImm => "float",
            NodeKind::UIntImm => "uint",
            NodeKind::IntImm => "int",
            NodeKind::Variable => "var",
            NodeKind::Let => "let",
            NodeKind::TypeTag => "type",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_is_bucket_closed() {
        for kind in HISTOGRAM_PRIORITY {
            if kind != NodeKind::Ne {
                assert_eq!(kind.histogram_bucket(), Some(kind));
            }
        }
        assert!(!HISTOGRAM_PRIORITY.contains(&NodeKind::Max));
    }

    #[test]
    fn test_priority_follows_rank() {
        // The two tables agree on the relative weight of operators.
        for pair in HISTOGRAM_PRIORITY.windows(2) {
            assert!(pair[0].rank() > pair[1].rank(), "{} vs {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_rank_categories() {
        assert_eq!(NodeKind::Max.rank(), NodeKind::Min.rank());
        assert!(NodeKind::Eq.rank() > NodeKind::Cast.rank());
        assert!(NodeKind::Cast.rank() > NodeKind::FloatImm.rank());
        assert!(NodeKind::FloatImm.rank() > NodeKind::UIntImm.rank());
        assert!(NodeKind::UIntImm.rank() > NodeKind::IntImm.rank());
        assert_eq!(NodeKind::Variable.rank(), SENTINEL_RANK);
    }

    #[test]
    fn test_leaves_have_no_bucket() {
        for kind in [
            NodeKind::Ne,
            NodeKind::Cast,
            NodeKind::IntImm,
            NodeKind::UIntImm,
            NodeKind::FloatImm,
            NodeKind::Variable,
            NodeKind::Let,
            NodeKind::TypeTag,
        ] {
            assert_eq!(kind.histogram_bucket(), None);
        }
        assert_eq!(NodeKind::Max.histogram_bucket(), Some(NodeKind::Min));
    }
}
