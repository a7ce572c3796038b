//! Errors raised while reading rules from text.

use thiserror::Error;

/// Which side of a rule an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The pattern being replaced.
    Lhs,
    /// The replacement.
    Rhs,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Lhs => "left",
            Side::Rhs => "right",
        })
    }
}

/// Errors that can occur while parsing rules.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// One side is not a well-formed expression.
    #[error("rule `{rule}`: {side} side: {message}")]
    Parse {
        /// Name of the offending rule.
        rule: String,
        /// The side that failed.
        side: Side,
        /// What the expression parser reported.
        message: String,
    },

    /// A line has no `==>` separator.
    #[error("line {line}: expected `lhs ==> rhs`")]
    MissingArrow {
        /// One-based line number.
        line: usize,
    },

    /// One side is blank.
    #[error("rule `{rule}`: {side} side is empty")]
    EmptySide {
        /// Name of the offending rule.
        rule: String,
        /// The blank side.
        side: Side,
    },
}
