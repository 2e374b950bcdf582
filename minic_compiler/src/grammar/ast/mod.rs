//! Expression tree types

pub mod nodes;

pub use nodes::{Assignment, BinaryOp, EvalError, Expr, Identifier};
