//! Candidate rules and batch validation.
//!
//! Rules are read one per line in the form
//!
//! ```text
//! # comment
//! add-sub-cancel: (- (+ x y) y) ==> x
//! (max x x) ==> x
//! ```
//!
//! Unnamed rules are called `rule-<line>`.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use termord_core::{display_expr, parse_expr, Expr};

use crate::error::{RuleError, Side};
use crate::order::{ReductionOrder, Verdict};

/// The arrow separating the two sides of a rule.
pub const ARROW: &str = "==>";

/// A candidate rewrite rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    /// Name used in reports.
    pub name: String,
    /// The pattern being replaced.
    pub lhs: Expr,
    /// The replacement.
    pub rhs: Expr,
}

impl Rule {
    /// Creates a rule from parsed sides.
    #[must_use]
    pub fn new(name: impl Into<String>, lhs: Expr, rhs: Expr) -> Self {
        Self {
            name: name.into(),
            lhs,
            rhs,
        }
    }

    /// Parses both sides of a rule from s-expressions.
    ///
    /// # Errors
    ///
    /// Returns an error if either side is blank or does not parse.
    pub fn parse(name: impl Into<String>, lhs: &str, rhs: &str) -> Result<Self, RuleError> {
        let name = name.into();
        let lhs = parse_side(&name, Side::Lhs, lhs)?;
        let rhs = parse_side(&name, Side::Rhs, rhs)?;
        Ok(Self { name, lhs, rhs })
    }
}

fn parse_side(rule: &str, side: Side, text: &str) -> Result<Expr, RuleError> {
    if text.trim().is_empty() {
        return Err(RuleError::EmptySide {
            rule: rule.to_string(),
            side,
        });
    }
    parse_expr(text).map_err(|message| RuleError::Parse {
        rule: rule.to_string(),
        side,
        message,
    })
}

/// Parses one rule line. `line` is only used for naming and errors.
fn parse_line(text: &str, line: usize) -> Result<Rule, RuleError> {
    let (head, rhs) = text
        .split_once(ARROW)
        .ok_or(RuleError::MissingArrow { line })?;
    match head.split_once(':') {
        Some((name, lhs)) => Rule::parse(name.trim(), lhs, rhs),
        None => Rule::parse(format!("rule-{line}"), head, rhs),
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s.trim(), 1)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {ARROW} {}",
            self.name,
            display_expr(&self.lhs),
            display_expr(&self.rhs)
        )
    }
}

/// An ordered collection of rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one rule per line. Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first malformed line's error.
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        text.lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .map(|(line_no, line)| parse_line(line, line_no))
            .collect()
    }

    /// Adds a rule.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Iterates over the rules in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RuleSet {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Rules split by verdict, each half in input order.
#[derive(Clone, Debug, Default)]
pub struct Partition {
    /// Rules that strictly decrease the order.
    pub accepted: Vec<Rule>,
    /// Rules that do not, with the verdict explaining why.
    pub rejected: Vec<(Rule, Verdict)>,
}

impl ReductionOrder {
    /// Checks every rule in parallel and returns the verdicts in order.
    #[must_use]
    pub fn check_all(&self, rules: &RuleSet) -> Vec<Verdict> {
        rules
            .rules
            .par_iter()
            .map(|rule| self.compare(&rule.lhs, &rule.rhs))
            .collect()
    }

    /// Checks every rule in parallel and splits them by verdict.
    #[must_use]
    pub fn partition(&self, rules: RuleSet) -> Partition {
        let verdicts = self.check_all(&rules);
        let mut partition = Partition::default();
        for (rule, verdict) in rules.into_iter().zip(verdicts) {
            if verdict.accepted {
                partition.accepted.push(rule);
            } else {
                partition.rejected.push((rule, verdict));
            }
        }
        partition
    }
}
