//! Classifying interactive input.

use plc_parser::{parse_expr, parse_method, parse_stmts, Expr, Method, ParseResult, Stmt};

/// One complete piece of interactive input.
#[derive(Debug)]
pub enum Block {
    /// `DEF ...`
    Method(Method),
    /// A bare expression; its value is shown.
    Expr(Expr),
    /// One or more statements, including top-level `LET`.
    Stmts(Vec<Stmt>),
}

/// Parse interactive input.
///
/// An `Err` whose `is_eof()` holds means the input is incomplete so far.
pub fn parse_block(source: &str) -> ParseResult<Block> {
    let trimmed = source.trim_start();
    if trimmed.starts_with("DEF") {
        return parse_method(source).map(Block::Method);
    }
    if let Ok(expr) = parse_expr(source) {
        return Ok(Block::Expr(expr));
    }
    parse_stmts(source).map(Block::Stmts)
}
