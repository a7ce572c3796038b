//! # termord
//!
//! Termination checking for automatically synthesized rewrite rules.
//!
//! A rule synthesizer proposes rules `lhs ==> rhs` that are already known to
//! preserve meaning. Before a simplifier may use them, each rule must be
//! shown to shrink expressions under a well-founded order, or repeated
//! rewriting could loop forever. termord is that check.
//!
//! ## Quick Start
//!
//! ```
//! use termord::prelude::*;
//!
//! let rules = RuleSet::parse("
//!     add-sub-cancel: (- (+ x y) y) ==> x
//!     add-comm: (+ x y) ==> (+ y x)
//! ").unwrap();
//!
//! let partition = ReductionOrder::new().partition(rules);
//! assert_eq!(partition.accepted.len(), 1);
//! assert_eq!(partition.rejected[0].0.name, "add-comm");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use termord_core as core;
pub use termord_order as order;

pub use termord_order::valid_reduction_order;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use termord_core::{display_expr, parse_expr, Expr, HalideLang, NodeKind};
    pub use termord_order::{
        valid_reduction_order, Gate, OrderConfig, ReductionOrder, Rule, RuleError, RuleSet,
        Verdict,
    };
}
