//! Expression tree for single `ID = Expression` statements
//!
//! The statement grammar is a pure acceptor and builds nothing. These nodes
//! back the separate assignment-tree utility, which parses one assignment
//! with `+ - * /` and can evaluate it.

use crate::logging::{codes, Code};
use crate::tokens::TokenKind;
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Identifier = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            TokenKind::Star => Some(Self::Mul),
            TokenKind::Slash => Some(Self::Div),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// Binding strength; higher binds tighter
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    pub fn apply(&self, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
        let result = match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Sub => lhs.checked_sub(rhs),
            Self::Mul => lhs.checked_mul(rhs),
            Self::Div => {
                if rhs == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                lhs.checked_div(rhs)
            }
        };
        result.ok_or(EvalError::Overflow { op: *self, lhs, rhs })
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    Number(i64),
    Identifier(Identifier),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate with `lookup` resolving identifiers; integer division truncates
    pub fn evaluate<F>(&self, lookup: &F) -> Result<i64, EvalError>
    where
        F: Fn(&str) -> Option<i64>,
    {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Identifier(name) => lookup(name).ok_or_else(|| EvalError::UndefinedVariable {
                name: name.clone(),
            }),
            Self::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(lookup)?;
                let rhs = rhs.evaluate(lookup)?;
                op.apply(lhs, rhs)
            }
        }
    }
}

/// Fully parenthesized, so the tree shape is visible
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value),
            Self::Identifier(name) => f.write_str(name),
            Self::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub target: Identifier,
    pub value: Expr,
    pub span: Option<Span>,
}

impl Assignment {
    pub fn evaluate<F>(&self, lookup: &F) -> Result<(Identifier, i64), EvalError>
    where
        F: Fn(&str) -> Option<i64>,
    {
        let value = self.value.evaluate(lookup)?;
        Ok((self.target.clone(), value))
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Arithmetic overflow in {lhs} {op} {rhs}")]
    Overflow { op: BinaryOp, lhs: i64, rhs: i64 },
}

impl EvalError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::UndefinedVariable { .. } => codes::expression::UNDEFINED_VARIABLE,
            Self::DivisionByZero => codes::expression::DIVISION_BY_ZERO,
            Self::Overflow { .. } => codes::expression::ARITHMETIC_OVERFLOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, i64)]) -> impl Fn(&str) -> Option<i64> {
        let map: HashMap<String, i64> = pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        move |name| map.get(name).copied()
    }

    #[test]
    fn test_evaluate() {
        // x * (y - 2) / 4
        let expr = Expr::binary(
            BinaryOp::Div,
            Expr::binary(
                BinaryOp::Mul,
                Expr::Identifier("x".into()),
                Expr::binary(BinaryOp::Sub, Expr::Identifier("y".into()), Expr::Number(2)),
            ),
            Expr::Number(4),
        );

        assert_eq!(expr.evaluate(&env(&[("x", 6), ("y", 5)])), Ok(4));
        assert_eq!(expr.to_string(), "((x * (y - 2)) / 4)");
    }

    #[test]
    fn test_evaluation_errors() {
        let lookup = env(&[("z", 0)]);

        let undefined = Expr::binary(BinaryOp::Add, Expr::Identifier("q".into()), Expr::Number(1));
        assert_eq!(
            undefined.evaluate(&lookup),
            Err(EvalError::UndefinedVariable { name: "q".into() })
        );

        let div_zero = Expr::binary(BinaryOp::Div, Expr::Number(1), Expr::Identifier("z".into()));
        let error = div_zero.evaluate(&lookup).unwrap_err();
        assert_eq!(error, EvalError::DivisionByZero);
        assert_eq!(error.error_code(), codes::expression::DIVISION_BY_ZERO);

        let overflow = Expr::binary(BinaryOp::Mul, Expr::Number(i64::MAX), Expr::Number(2));
        assert!(matches!(
            overflow.evaluate(&lookup),
            Err(EvalError::Overflow { op: BinaryOp::Mul, .. })
        ));
    }

    #[test]
    fn test_min_divided_by_minus_one_overflows() {
        assert!(matches!(
            BinaryOp::Div.apply(i64::MIN, -1),
            Err(EvalError::Overflow { .. })
        ));
        assert_eq!(BinaryOp::Div.apply(-7, 2), Ok(-3));
    }

    #[test]
    fn test_assignment_display_and_evaluate() {
        let assignment = Assignment {
            target: "total".into(),
            value: Expr::binary(BinaryOp::Add, Expr::Number(1), Expr::Number(2)),
            span: None,
        };
        assert_eq!(assignment.to_string(), "total = (1 + 2)");
        assert_eq!(assignment.evaluate(&env(&[])), Ok(("total".to_string(), 3)));
    }
}
