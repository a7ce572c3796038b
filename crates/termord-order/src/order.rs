//! The reduction-order decider.
//!
//! A rule `lhs ==> rhs` is accepted when it strictly decreases the
//! lexicographic measure
//!
//! 1. free-variable occurrences (no variable may grow),
//! 2. the operator histogram, compared in priority order,
//! 3. the rank of the root node kind,
//!
//! so that any sequence of accepted rewrites terminates.

use std::fmt;

use termord_core::{display_expr, root_kind, Expr, NodeKind, Symbol, SENTINEL_RANK};
use tracing::debug;

use crate::config::OrderConfig;
use crate::divisors::check_divisors;
use crate::histogram::{first_difference, node_histogram};
use crate::occurrences::variable_occurrences;

/// The check that decided a verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// A variable occurs more often on the right than on the left.
    VariableContainment {
        /// The offending variable.
        name: Symbol,
        /// Occurrences on the left side.
        lhs: usize,
        /// Occurrences on the right side.
        rhs: usize,
    },
    /// The histograms first differ in this bucket.
    Histogram {
        /// The deciding bucket.
        kind: NodeKind,
        /// Count on the left side.
        lhs: usize,
        /// Count on the right side.
        rhs: usize,
    },
    /// The histograms tie and the root kinds decided.
    RootKind {
        /// Root kind of the left side, `None` if empty.
        lhs: Option<NodeKind>,
        /// Root kind of the right side, `None` if empty.
        rhs: Option<NodeKind>,
    },
}

/// The outcome of checking one rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the rule strictly decreases the measure.
    pub accepted: bool,
    /// The check that decided.
    pub gate: Gate,
    /// Whether every right-side divisor also divides on the left.
    ///
    /// Reported only. It never changes `accepted`.
    pub divisors_covered: bool,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.accepted { "accept" } else { "reject" })?;
        match self.gate {
            Gate::VariableContainment { name, lhs, rhs } => {
                write!(f, ": variable `{name}`: {rhs} on the right, {lhs} on the left")?;
            }
            Gate::Histogram { kind, lhs, rhs } => {
                write!(f, ": {kind} count {lhs} on the left, {rhs} on the right")?;
            }
            Gate::RootKind { lhs, rhs } => {
                let name = |k: Option<NodeKind>| k.map_or("empty", NodeKind::name);
                write!(
                    f,
                    ": root {} (rank {}) vs {} (rank {})",
                    name(lhs),
                    rank(lhs),
                    name(rhs),
                    rank(rhs)
                )?;
            }
        }
        if !self.divisors_covered {
            f.write_str(" [new divisor on the right]")?;
        }
        Ok(())
    }
}

fn rank(kind: Option<NodeKind>) -> u8 {
    kind.map_or(SENTINEL_RANK, NodeKind::rank)
}

/// Decides whether rewrite rules respect the reduction order.
#[derive(Clone, Debug, Default)]
pub struct ReductionOrder {
    config: OrderConfig,
}

impl ReductionOrder {
    /// Creates a decider with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decider with custom configuration.
    #[must_use]
    pub fn with_config(config: OrderConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &OrderConfig {
        &self.config
    }

    /// Returns true if rewriting `lhs` into `rhs` strictly decreases the
    /// reduction order.
    #[must_use]
    pub fn is_valid(&self, lhs: &Expr, rhs: &Expr) -> bool {
        self.compare(lhs, rhs).accepted
    }

    /// Checks a rule and reports which gate decided.
    #[must_use]
    pub fn compare(&self, lhs: &Expr, rhs: &Expr) -> Verdict {
        let gate = self.decide(lhs, rhs);
        let accepted = match gate {
            Gate::VariableContainment { .. } => false,
            Gate::Histogram { lhs, rhs, .. } => lhs > rhs,
            Gate::RootKind { lhs, rhs } => rank(lhs) < rank(rhs),
        };
        let divisors_covered = check_divisors(lhs, rhs);
        let (lhs, rhs) = (display_expr(lhs), display_expr(rhs));
        if !divisors_covered {
            debug!(%lhs, %rhs, "right side divides by a term the left side does not");
        }
        let verdict = Verdict {
            accepted,
            gate,
            divisors_covered,
        };
        debug!(%lhs, %rhs, %verdict, "reduction order");
        verdict
    }

    fn decide(&self, lhs: &Expr, rhs: &Expr) -> Gate {
        let lhs_vars = variable_occurrences(lhs);
        let rhs_vars = variable_occurrences(rhs);
        let grown = rhs_vars
            .iter()
            .filter(|(name, _)| !self.config.is_constant_wildcard(name.as_str()))
            .map(|(name, count)| (name, lhs_vars.count(name), count))
            .filter(|&(_, lhs_count, rhs_count)| lhs_count < rhs_count)
            .min_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        if let Some((name, lhs, rhs)) = grown {
            return Gate::VariableContainment { name, lhs, rhs };
        }

        let lhs_histogram = node_histogram(lhs);
        let rhs_histogram = node_histogram(rhs);
        if let Some(diff) = first_difference(&lhs_histogram, &rhs_histogram) {
            return Gate::Histogram {
                kind: diff.kind,
                lhs: diff.lhs,
                rhs: diff.rhs,
            };
        }

        Gate::RootKind {
            lhs: root_kind(lhs),
            rhs: root_kind(rhs),
        }
    }
}

/// Returns true if the rule `lhs ==> rhs` strictly decreases the reduction
/// order under the default configuration.
#[must_use]
pub fn valid_reduction_order(lhs: &Expr, rhs: &Expr) -> bool {
    ReductionOrder::new().is_valid(lhs, rhs)
}
