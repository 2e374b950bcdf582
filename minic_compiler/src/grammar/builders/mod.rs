//! Builder functions for MiniC grammar productions

pub mod atomic;
pub mod blocks;
pub mod expressions;

pub use atomic::{
    expect, expect_where, parse_arith_continuation, parse_arith_op, parse_assign_op,
    parse_compare_op, parse_identifier, parse_number, parse_operand, parse_type_keyword, Parser,
};

pub use blocks::{
    parse_assignment, parse_block, parse_declaration, parse_expression, parse_for, parse_function,
    parse_if, parse_program, parse_return, parse_statement,
};

pub use expressions::parse_assignment_tree;
