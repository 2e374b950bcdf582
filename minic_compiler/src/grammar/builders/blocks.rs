//! Statement-level productions
//!
//! ```text
//! Program     := Function+
//! Function    := Keyword ID "(" ")" Block
//! Block       := "{" Statement* ReturnStmt? "}"
//! Statement   := IfStmt | ForStmt | Declaration | Assignment
//! IfStmt      := "if" "(" Expression ")" Block ("else" Block)?
//! ForStmt     := "for" "(" Declaration Expression ";" Assignment ")" Block
//! Declaration := Keyword ID AssignOp Operand (ArithOp Operand)* ";"
//! Assignment  := ID ("++" | "--") ";"?
//!              | ID AssignOp Operand (ArithOp Operand)* ";"
//! ReturnStmt  := "return" Number ";"
//! Expression  := Operand CompareOp Operand
//! ```
//!
//! Each production consumes exactly what it recognizes and returns the
//! first error unchanged.

use crate::grammar::builders::atomic::*;
use crate::grammar::keywords::Keyword;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::TokenKind;

/// One or more functions, until the tokens are exhausted.
/// Returns the number of functions accepted.
pub fn parse_program(parser: &mut dyn Parser) -> SyntaxResult<usize> {
    parser.enter_production("program");

    let mut functions = 0;
    loop {
        parse_function(parser)?;
        functions += 1;
        if parser.is_at_end() {
            return Ok(functions);
        }
    }
}

pub fn parse_function(parser: &mut dyn Parser) -> SyntaxResult<String> {
    parser.enter_production("function");

    parse_type_keyword(parser, "Data Type of Function")?;
    let name = parse_identifier(parser, "Name of Function")?;
    expect(parser, TokenKind::LeftParen, "(")?;
    expect(parser, TokenKind::RightParen, ")")?;
    parse_block(parser)?;

    Ok(name)
}

pub fn parse_block(parser: &mut dyn Parser) -> SyntaxResult<()> {
    parser.enter_nested()?;
    let result = parse_block_body(parser);
    parser.exit_nested();
    result
}

fn parse_block_body(parser: &mut dyn Parser) -> SyntaxResult<()> {
    parser.enter_production("block");

    expect(parser, TokenKind::LeftBrace, "{")?;

    while parse_statement(parser)? {}

    if parser.check(TokenKind::Keyword(Keyword::Return)) {
        parse_return(parser)?;
    }

    expect(parser, TokenKind::RightBrace, "}")
}

/// Dispatch one statement on a single token of lookahead.
///
/// Returns `false` without consuming anything when the current token cannot
/// start a statement, which ends the statement list. Keywords other than
/// `if`, `for`, `int` and `return` are rejected here so the loop always
/// makes progress.
pub fn parse_statement(parser: &mut dyn Parser) -> SyntaxResult<bool> {
    match parser.current_kind() {
        Some(TokenKind::Keyword(Keyword::If)) => parse_if(parser)?,
        Some(TokenKind::Keyword(Keyword::For)) => parse_for(parser)?,
        Some(TokenKind::Keyword(Keyword::Int)) => parse_declaration(parser)?,
        Some(TokenKind::Identifier) => parse_assignment(parser)?,
        Some(TokenKind::Keyword(Keyword::Return)) => return Ok(false),
        Some(TokenKind::Keyword(keyword)) => {
            return Err(SyntaxError::unexpected_keyword(
                keyword.as_str(),
                parser.current_span(),
            ))
        }
        _ => return Ok(false),
    }
    Ok(true)
}

pub fn parse_if(parser: &mut dyn Parser) -> SyntaxResult<()> {
    parser.enter_production("if");

    expect(parser, TokenKind::Keyword(Keyword::If), "if")?;
    expect(parser, TokenKind::LeftParen, "(")?;
    parse_expression(parser)?;
    expect(parser, TokenKind::RightParen, ")")?;
    parse_block(parser)?;

    if parser.match_kind(TokenKind::Keyword(Keyword::Else)) {
        parse_block(parser)?;
    }
    Ok(())
}

/// The header reuses Declaration (with its own `;`), Expression and Assignment
pub fn parse_for(parser: &mut dyn Parser) -> SyntaxResult<()> {
    parser.enter_production("for");

    expect(parser, TokenKind::Keyword(Keyword::For), "for")?;
    expect(parser, TokenKind::LeftParen, "(")?;
    parse_declaration(parser)?;
    parse_expression(parser)?;
    expect(parser, TokenKind::Semicolon, "Semicolon")?;
    parse_assignment(parser)?;
    expect(parser, TokenKind::RightParen, ")")?;
    parse_block(parser)
}

/// An initializer is mandatory: `int x;` is rejected
pub fn parse_declaration(parser: &mut dyn Parser) -> SyntaxResult<()> {
    parser.enter_production("declaration");

    parse_type_keyword(parser, "Data Type")?;
    parse_identifier(parser, "ID")?;
    parse_assign_op(parser)?;
    parse_operand(parser)?;
    parse_arith_continuation(parser)?;
    expect(parser, TokenKind::Semicolon, "Semicolon")
}

/// `x++` / `x--` drop their `;` only when directly followed by `)`
pub fn parse_assignment(parser: &mut dyn Parser) -> SyntaxResult<()> {
    parser.enter_production("assignment");

    parse_identifier(parser, "ID")?;

    if parser.match_where(TokenKind::is_step_op).is_some() {
        if parser.check(TokenKind::RightParen) {
            return Ok(());
        }
        return expect(parser, TokenKind::Semicolon, "Semicolon");
    }

    parse_assign_op(parser)?;
    parse_operand(parser)?;
    parse_arith_continuation(parser)?;
    expect(parser, TokenKind::Semicolon, "Semicolon")
}

/// Only a numeric literal may be returned
pub fn parse_return(parser: &mut dyn Parser) -> SyntaxResult<i64> {
    parser.enter_production("return");

    expect(parser, TokenKind::Keyword(Keyword::Return), "return")?;
    let value = parse_number(parser)?;
    expect(parser, TokenKind::Semicolon, "Semicolon")?;
    Ok(value)
}

pub fn parse_expression(parser: &mut dyn Parser) -> SyntaxResult<()> {
    parser.enter_production("expression");

    parse_operand(parser)?;
    parse_compare_op(parser)?;
    parse_operand(parser)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::builders::atomic::test_support::StreamParser;
    use assert_matches::assert_matches;

    fn run(
        source: &str,
        production: fn(&mut dyn Parser) -> SyntaxResult<()>,
    ) -> (SyntaxResult<()>, StreamParser) {
        let mut parser = StreamParser::new(source);
        let result = production(&mut parser);
        (result, parser)
    }

    #[test]
    fn test_declaration_with_continuation() {
        let (result, parser) = run("int x = 1 + 2 * y;", parse_declaration);
        assert!(result.is_ok());
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_declaration_requires_initializer() {
        let (result, _) = run("int x;", parse_declaration);
        assert_matches!(
            result,
            Err(SyntaxError::UnexpectedToken { expected, found, .. })
                if expected == "Assignment operator" && found == ";"
        );
    }

    #[test]
    fn test_declaration_missing_semicolon_at_end() {
        let (result, _) = run("int x = 1", parse_declaration);
        assert_matches!(
            result,
            Err(SyntaxError::UnexpectedEndOfInput { expected, .. }) if expected == "Semicolon"
        );
    }

    #[test]
    fn test_step_assignment_terminator() {
        let (result, parser) = run("x++;", parse_assignment);
        assert!(result.is_ok());
        assert!(parser.is_at_end());

        // `)` is left for the caller
        let (result, parser) = run("i--)", parse_assignment);
        assert!(result.is_ok());
        assert!(parser.check(TokenKind::RightParen));

        let (result, _) = run("x++", parse_assignment);
        assert_matches!(
            result,
            Err(SyntaxError::UnexpectedEndOfInput { expected, .. }) if expected == "Semicolon"
        );

        let (result, _) = run("x++ y", parse_assignment);
        assert_matches!(
            result,
            Err(SyntaxError::UnexpectedToken { found, .. }) if found == "y"
        );
    }

    #[test]
    fn test_compound_assignment() {
        for source in ["x += 2;", "x -= y;", "x *= 3 - z;", "x /= 4;", "x = x + 1;"] {
            let (result, _) = run(source, parse_assignment);
            assert!(result.is_ok(), "{}", source);
        }

        let (result, _) = run("x %= 2;", parse_assignment);
        assert_matches!(
            result,
            Err(SyntaxError::UnexpectedToken { expected, .. }) if expected == "Assignment operator"
        );
    }

    #[test]
    fn test_expression() {
        let (result, _) = run("a != 0x10", parse_expression);
        assert!(result.is_ok());

        let (result, _) = run("a + 1", parse_expression);
        assert_matches!(
            result,
            Err(SyntaxError::UnexpectedToken { expected, found, .. })
                if expected == "Comparison operator" && found == "+"
        );
    }

    #[test]
    fn test_return_rejects_identifier() {
        let mut parser = StreamParser::new("return x;");
        assert_matches!(
            parse_return(&mut parser),
            Err(SyntaxError::UnexpectedToken { expected, found, .. })
                if expected == "Number" && found == "x"
        );

        let mut parser = StreamParser::new("return 017;");
        assert_eq!(parse_return(&mut parser).unwrap(), 15);
    }

    #[test]
    fn test_if_else() {
        let (result, parser) = run("if (x < 2) { x = x + 1; } else { x--; }", parse_if);
        assert!(result.is_ok());
        assert!(parser.is_at_end());

        let (result, _) = run("if x < 2 { }", parse_if);
        assert_matches!(
            result,
            Err(SyntaxError::UnexpectedToken { expected, .. }) if expected == "("
        );
    }

    #[test]
    fn test_for_header() {
        let (result, _) = run("for(int i=0;i<5;i++){}", parse_for);
        assert!(result.is_ok());

        let (result, _) = run("for(int i=0;i<5;i+=1){}", parse_for);
        assert_matches!(
            result,
            Err(SyntaxError::UnexpectedToken { expected, found, .. })
                if expected == "Operator" && found == ")"
        );
    }

    #[test]
    fn test_statement_rejects_other_keywords() {
        for keyword in ["const", "void", "while", "else", "true"] {
            let source = format!("{{ {} x = 1; }}", keyword);
            let (result, _) = run(&source, parse_block);
            assert_matches!(
                result,
                Err(SyntaxError::UnexpectedKeyword { keyword: found, .. }) if found == keyword
            );
        }
    }

    #[test]
    fn test_block_depth_limit() {
        let source = format!("{}{}", "{ if (a < b) ".repeat(5), "}".repeat(5));
        let (result, parser) = run(&source, parse_block);
        assert_matches!(
            result,
            Err(SyntaxError::MaxDepthExceeded { depth: 5, max: 4, .. })
        );
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_program_counts_functions() {
        let mut parser = StreamParser::new("int a(){} void b(){ return 0; }");
        assert_eq!(parse_program(&mut parser).unwrap(), 2);

        let mut parser = StreamParser::new("");
        assert_matches!(
            parse_program(&mut parser),
            Err(SyntaxError::UnexpectedEndOfInput { expected, .. })
                if expected == "Data Type of Function"
        );
    }
}
