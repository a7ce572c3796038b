//! # termord-core
//!
//! Expression language for the termord rule checker.
//!
//! This crate provides:
//! - The [`HalideLang`] expression language, parsed from s-expressions
//! - Literal and cast-type leaf payloads
//! - The fixed [`NodeKind`] taxonomy used to order rule sides
//!
//! ## Design Principles
//!
//! - **Closed node set**: every analysis matches exhaustively on [`NodeKind`]
//! - **Fixed tables**: priority and rank tables are const data, never mutated

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod kind;
pub mod language;
pub mod literal;

pub use egg::{Id, Symbol};
pub use kind::{NodeKind, HISTOGRAM_PRIORITY, SENTINEL_RANK};
pub use language::{
    display_expr, parse_expr, root_id, root_kind, subexpr, Expr, ExprDisplay, HalideLang,
};
pub use literal::{FloatImm, ScalarType, UIntImm};
