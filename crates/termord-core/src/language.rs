//! The expression language rewrite rules are written in.
//!
//! Expressions are stored as `egg` recursive expressions: a post-order
//! vector of nodes whose last entry is the root. They parse from and print
//! to s-expressions such as `(min (+ x c0) y)`.

use std::fmt;

use egg::{define_language, Id, Language, RecExpr, Symbol};
use smallvec::SmallVec;

use crate::kind::NodeKind;
use crate::literal::{FloatImm, ScalarType, UIntImm};

define_language! {
    /// Symbolic arithmetic and boolean expressions over vectors and scalars.
    pub enum HalideLang {
        // Vector constructors: base, stride, lanes / value, lanes
        "ramp" = Ramp([Id; 3]),
        "broadcast" = Broadcast([Id; 2]),
        "select" = Select([Id; 3]),

        // Arithmetic
        "/" = Div([Id; 2]),
        "*" = Mul([Id; 2]),
        "%" = Mod([Id; 2]),
        "-" = Sub([Id; 2]),
        "+" = Add([Id; 2]),
        "min" = Min([Id; 2]),
        "max" = Max([Id; 2]),

        // Boolean
        "!" = Not(Id),
        "||" = Or([Id; 2]),
        "&&" = And([Id; 2]),

        // Comparisons
        ">=" = Ge([Id; 2]),
        ">" = Gt([Id; 2]),
        "<=" = Le([Id; 2]),
        "<" = Lt([Id; 2]),
        "!=" = Ne([Id; 2]),
        "==" = Eq([Id; 2]),

        // type, value
        "cast" = Cast([Id; 2]),
        // name, value, body
        "let" = Let([Id; 3]),

        // Leaves. Order matters: the first payload that parses wins.
        Int(i64),
        UInt(UIntImm),
        Float(FloatImm),
        Type(ScalarType),
        Var(Symbol),
    }
}

/// A complete expression tree.
pub type Expr = RecExpr<HalideLang>;

impl HalideLang {
    /// Returns the node kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            HalideLang::Ramp(_) => NodeKind::Ramp,
            HalideLang::Broadcast(_) => NodeKind::Broadcast,
            HalideLang::Select(_) => NodeKind::Select,
            HalideLang::Div(_) => NodeKind::Div,
            HalideLang::Mul(_) => NodeKind::Mul,
            HalideLang::Mod(_) => NodeKind::Mod,
            HalideLang::Sub(_) => NodeKind::Sub,
            HalideLang::Add(_) => NodeKind::Add,
            HalideLang::Min(_) => NodeKind::Min,
            HalideLang::Max(_) => NodeKind::Max,
            HalideLang::Not(_) => NodeKind::Not,
            HalideLang::Or(_) => NodeKind::Or,
            HalideLang::And(_) => NodeKind::And,
            HalideLang::Ge(_) => NodeKind::Ge,
            HalideLang::Gt(_) => NodeKind::Gt,
            HalideLang::Le(_) => NodeKind::Le,
            HalideLang::Lt(_) => NodeKind::Lt,
            HalideLang::Ne(_) => NodeKind::Ne,
            HalideLang::Eq(_) => NodeKind::Eq,
            HalideLang::Cast(_) => NodeKind::Cast,
            HalideLang::Let(_) => NodeKind::Let,
            HalideLang::Int(_) => NodeKind::IntImm,
            HalideLang::UInt(_) => NodeKind::UIntImm,
            HalideLang::Float(_) => NodeKind::FloatImm,
            HalideLang::Type(_) => NodeKind::TypeTag,
            HalideLang::Var(_) => NodeKind::Variable,
        }
    }

    /// Returns the variable name if this node is a variable reference.
    #[must_use]
    pub fn as_var(&self) -> Option<Symbol> {
        match self {
            HalideLang::Var(name) => Some(*name),
            _ => None,
        }
    }

    /// Returns true if this node is a literal constant.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.kind().is_literal()
    }

    /// Returns the children that are expressions in their own right.
    ///
    /// The binder of a `let` and the type of a `cast` are excluded.
    #[must_use]
    pub fn operands(&self) -> SmallVec<[Id; 3]> {
        match self {
            HalideLang::Let([_, value, body]) => smallvec::smallvec![*value, *body],
            HalideLang::Cast([_, value]) => smallvec::smallvec![*value],
            other => other.children().iter().copied().collect(),
        }
    }
}

/// Returns the id of the root node, or `None` for an empty expression.
#[must_use]
pub fn root_id(expr: &Expr) -> Option<Id> {
    expr.as_ref().len().checked_sub(1).map(Id::from)
}

/// Returns the kind of the root node, or `None` for an empty expression.
#[must_use]
pub fn root_kind(expr: &Expr) -> Option<NodeKind> {
    expr.as_ref().last().map(HalideLang::kind)
}

/// Copies the sub-tree rooted at `id` into a standalone expression.
///
/// The copy is canonical: two structurally equal sub-trees always produce
/// identical node vectors, whatever their position in the source.
#[must_use]
pub fn subexpr(expr: &Expr, id: Id) -> Expr {
    let mut out = Expr::default();
    // Ids of finished copies, in the order their parents expect them.
    let mut copied: Vec<Id> = Vec::new();
    let mut stack = vec![(id, false)];
    while let Some((id, ready)) = stack.pop() {
        let node = &expr[id];
        if ready {
            let mut node = node.clone();
            let start = copied.len() - node.children().len();
            for (slot, child) in node.children_mut().iter_mut().zip(copied.drain(start..)) {
                *slot = child;
            }
            copied.push(out.add(node));
        } else {
            stack.push((id, true));
            stack.extend(node.children().iter().rev().map(|&child| (child, false)));
        }
    }
    out
}

/// Parses an expression from its s-expression form.
///
/// Type names such as `i32` are only accepted as the first operand of a
/// `cast`, and the first operand of a `let` must be a plain name.
///
/// # Errors
///
/// Returns a description of the problem if the text is not a well-formed
/// expression.
pub fn parse_expr(text: &str) -> Result<Expr, String> {
    let expr = text
        .trim()
        .parse::<Expr>()
        .map_err(|e| format!("parse error: {e}"))?;
    check_positions(&expr)?;
    Ok(expr)
}

fn check_positions(expr: &Expr) -> Result<(), String> {
    let is_type = |id: Id| matches!(expr[id], HalideLang::Type(_));
    let misplaced = |id: Id| format!("type `{}` used as a value", expr[id]);
    if let Some(root) = root_id(expr) {
        if is_type(root) {
            return Err(misplaced(root));
        }
    }
    for node in expr.as_ref() {
        match node {
            HalideLang::Cast([ty, value]) => {
                if !is_type(*ty) {
                    return Err(format!("cast target `{}` is not a type", expr[*ty]));
                }
                if is_type(*value) {
                    return Err(misplaced(*value));
                }
            }
            HalideLang::Let([binder, value, body]) => {
                if expr[*binder].as_var().is_none() {
                    return Err(format!("let binds `{}`, which is not a name", expr[*binder]));
                }
                if let Some(&id) = [value, body].into_iter().find(|&&id| is_type(id)) {
                    return Err(misplaced(id));
                }
            }
            other => {
                if let Some(&id) = other.children().iter().find(|&&id| is_type(id)) {
                    return Err(misplaced(id));
                }
            }
        }
    }
    Ok(())
}

/// Prints an expression as a plain s-expression.
///
/// Unlike the `Display` impl of [`RecExpr`], operator tokens are never
/// quoted, so `%` prints as `(% x 8)`.
#[derive(Clone, Copy)]
pub struct ExprDisplay<'a>(&'a Expr);

/// Returns a printer for `expr`.
#[must_use]
pub fn display_expr(expr: &Expr) -> ExprDisplay<'_> {
    ExprDisplay(expr)
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Step {
            Node(Id),
            Close,
        }

        let expr = self.0;
        let Some(root) = root_id(expr) else {
            return f.write_str("()");
        };
        let mut stack = vec![Step::Node(root)];
        let mut first = true;
        while let Some(step) = stack.pop() {
            match step {
                Step::Close => f.write_str(")")?,
                Step::Node(id) => {
                    if !first {
                        f.write_str(" ")?;
                    }
                    first = false;
                    let node = &expr[id];
                    if node.children().is_empty() {
                        write!(f, "{node}")?;
                    } else {
                        write!(f, "({node}")?;
                        stack.push(Step::Close);
                        stack.extend(node.children().iter().rev().map(|&c| Step::Node(c)));
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
