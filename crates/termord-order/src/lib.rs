//! # termord-order
//!
//! Termination checking for automatically synthesized rewrite rules.
//!
//! A rule `lhs ==> rhs` is accepted only if it strictly decreases a
//! well-founded measure on expressions, so repeatedly applying accepted
//! rules always terminates. This crate provides:
//! - Free-variable occurrence counting with let scoping
//! - Divisor collection and the divisor containment check
//! - Operator histograms compared in a fixed priority order
//! - The [`ReductionOrder`] decider and parallel batch validation
//!
//! ## Example
//!
//! ```
//! use termord_core::parse_expr;
//! use termord_order::valid_reduction_order;
//!
//! let lhs = parse_expr("(+ x y)").unwrap();
//! let rhs = parse_expr("x").unwrap();
//! assert!(valid_reduction_order(&lhs, &rhs));
//! assert!(!valid_reduction_order(&rhs, &lhs));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod divisors;
pub mod error;
pub mod histogram;
pub mod occurrences;
pub mod order;
pub mod rules;

#[cfg(test)]
mod proptests;

pub use config::OrderConfig;
pub use divisors::{check_divisors, divisors, Divisor, DivisorSet};
pub use error::{RuleError, Side};
pub use histogram::{compare_histograms, node_histogram, NodeHistogram};
pub use occurrences::{variable_occurrences, VariableOccurrences};
pub use order::{valid_reduction_order, Gate, ReductionOrder, Verdict};
pub use rules::{Partition, Rule, RuleSet};
