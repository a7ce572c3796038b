//! Free-variable occurrence counting.

use hashbrown::HashMap;
use termord_core::{root_id, Expr, HalideLang, Id, Symbol};

/// The let-bound names in scope at one point of a traversal, innermost last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scope {
    names: Vec<Symbol>,
}

impl Scope {
    /// Creates a scope with no names bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` on top of the current scope.
    pub fn push(&mut self, name: Symbol) {
        self.names.push(name);
    }

    /// Drops the innermost binding and returns its name.
    pub fn pop(&mut self) -> Option<Symbol> {
        self.names.pop()
    }

    /// Returns true if `name` is bound anywhere in this scope.
    #[must_use]
    pub fn contains(&self, name: Symbol) -> bool {
        self.names.contains(&name)
    }

    /// Returns the number of bindings, shadowed ones included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.names.len()
    }
}

/// Occurrence counts of the free variables of one expression.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableOccurrences {
    counts: HashMap<Symbol, usize>,
}

impl VariableOccurrences {
    /// Returns how many times `name` occurs free. Zero if it never does.
    #[must_use]
    pub fn count(&self, name: impl Into<Symbol>) -> usize {
        self.counts.get(&name.into()).copied().unwrap_or(0)
    }

    /// Iterates over `(name, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.counts.iter().map(|(name, count)| (*name, *count))
    }

    /// Returns the number of distinct free variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if the expression has no free variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn record(&mut self, name: Symbol) {
        *self.counts.entry(name).or_insert(0) += 1;
    }
}

/// Counts the free occurrences of every variable in `expr`.
///
/// Inside the body of `let(name, value, body)` the bound name is local and
/// is not counted; inside `value` it still refers to the outer variable.
#[must_use]
pub fn variable_occurrences(expr: &Expr) -> VariableOccurrences {
    enum Step {
        Visit(Id),
        Bind(Symbol),
        Unbind,
    }

    let mut occurrences = VariableOccurrences::default();
    let mut scope = Scope::new();
    let mut stack: Vec<Step> = root_id(expr).map(Step::Visit).into_iter().collect();
    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Visit(id) => id,
            Step::Bind(name) => {
                scope.push(name);
                continue;
            }
            Step::Unbind => {
                scope.pop();
                continue;
            }
        };
        match &expr[id] {
            HalideLang::Var(name) => {
                if !scope.contains(*name) {
                    occurrences.record(*name);
                }
            }
            HalideLang::Let([binder, value, body]) => {
                // The value is finished before the name is bound.
                match expr[*binder].as_var() {
                    Some(name) => {
                        stack.extend([Step::Unbind, Step::Visit(*body), Step::Bind(name)]);
                    }
                    None => stack.push(Step::Visit(*body)),
                }
                stack.push(Step::Visit(*value));
            }
            HalideLang::Cast([_, value]) => stack.push(Step::Visit(*value)),
            HalideLang::Int(_) | HalideLang::UInt(_) | HalideLang::Float(_) | HalideLang::Type(_) => {}
            node @ (HalideLang::Ramp(_)
            | HalideLang::Broadcast(_)
            | HalideLang::Select(_)
            | HalideLang::Div(_)
            | HalideLang::Mul(_)
            | HalideLang::Mod(_)
            | HalideLang::Sub(_)
            | HalideLang::Add(_)
            | HalideLang::Min(_)
            | HalideLang::Max(_)
            | HalideLang::Not(_)
            | HalideLang::Or(_)
            | HalideLang::And(_)
            | HalideLang::Ge(_)
            | HalideLang::Gt(_)
            | HalideLang::Le(_)
            | HalideLang::Lt(_)
            | HalideLang::Ne(_)
            | HalideLang::Eq(_)) => stack.extend(node.operands().into_iter().map(Step::Visit)),
        }
    }
    occurrences
}
