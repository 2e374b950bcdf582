//! MiniC grammar: keywords, productions and the assignment expression tree

pub mod ast;
pub mod builders;
pub mod keywords;

pub use ast::{Assignment, BinaryOp, EvalError, Expr};
pub use keywords::Keyword;
pub use builders::*;
