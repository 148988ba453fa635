//! PLC Parser
//!
//! This crate provides parsing for PLC source text:
//! - Lexing (keywords, identifiers, numeric/character/string literals, operators)
//! - Top-level parsing (fields and methods)
//! - Statement parsing (LET, IF, FOR, WHILE, RETURN, assignment)
//! - Expression parsing (precedence climbing, calls, member access)
//! - Error handling with location information

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::*;
pub use error::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{
    parse_expr, parse_field, parse_method, parse_program, parse_stmt, parse_stmts, Parser,
};
