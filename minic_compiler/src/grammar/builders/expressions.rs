//! Assignment-tree builder
//!
//! ```text
//! AssignmentTree := ID "=" Additive ";"?
//! Additive       := Term (("+" | "-") Term)*
//! Term           := Factor (("*" | "/") Factor)*
//! Factor         := Number | ID | "(" Additive ")"
//! ```
//!
//! Unlike the statement grammar this builds an [`Expr`] tree with the usual
//! precedence and left associativity. Parentheses count against the
//! parser's nesting limit.

use crate::grammar::ast::nodes::{Assignment, BinaryOp, Expr};
use crate::grammar::builders::atomic::*;
use crate::syntax::error::SyntaxResult;
use crate::tokens::TokenKind;

/// Parse exactly one assignment; anything left after it is an error
pub fn parse_assignment_tree(parser: &mut dyn Parser) -> SyntaxResult<Assignment> {
    parser.enter_production("assignment_tree");

    let start = parser.current_span();
    let target = parse_identifier(parser, "ID")?;
    expect(parser, TokenKind::Assign, "=")?;
    let value = parse_additive(parser)?;
    parser.match_kind(TokenKind::Semicolon);

    if !parser.is_at_end() {
        return Err(parser.error("end of input"));
    }

    let span = start.merge(parser.current_span());
    Ok(Assignment {
        target,
        value,
        span: Some(span),
    })
}

fn parse_additive(parser: &mut dyn Parser) -> SyntaxResult<Expr> {
    parse_binary_level(parser, 1)
}

/// One precedence level, folding left so `a - b - c` is `(a - b) - c`
fn parse_binary_level(parser: &mut dyn Parser, precedence: u8) -> SyntaxResult<Expr> {
    let mut lhs = if precedence == 1 {
        parse_binary_level(parser, 2)?
    } else {
        parse_factor(parser)?
    };

    while let Some(op) = peek_operator(parser, precedence) {
        parser.advance();
        let rhs = if precedence == 1 {
            parse_binary_level(parser, 2)?
        } else {
            parse_factor(parser)?
        };
        lhs = Expr::binary(op, lhs, rhs);
    }

    Ok(lhs)
}

fn peek_operator(parser: &dyn Parser, precedence: u8) -> Option<BinaryOp> {
    parser
        .current_kind()
        .and_then(BinaryOp::from_kind)
        .filter(|op| op.precedence() == precedence)
}

fn parse_factor(parser: &mut dyn Parser) -> SyntaxResult<Expr> {
    match parser.current_kind() {
        Some(TokenKind::Number) => parse_number(parser).map(Expr::Number),
        Some(TokenKind::Identifier) => parse_identifier(parser, "ID").map(Expr::Identifier),
        Some(TokenKind::LeftParen) => {
            parser.enter_nested()?;
            let result = parse_parenthesized(parser);
            parser.exit_nested();
            result
        }
        _ => Err(parser.error("ID, Number or (")),
    }
}

fn parse_parenthesized(parser: &mut dyn Parser) -> SyntaxResult<Expr> {
    expect(parser, TokenKind::LeftParen, "(")?;
    let inner = parse_additive(parser)?;
    expect(parser, TokenKind::RightParen, ")")?;
    Ok(inner)
}
