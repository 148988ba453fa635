//! Parser for PLC source text.
//!
//! This module is organized into submodules by parsing category:
//! - `expr`: Expression parsing (operators, literals, calls, member access)
//! - `stmt`: Statement parsing (LET, IF, FOR, WHILE, RETURN, assignment)
//! - `decl`: Top-level declarations (fields and methods)

mod decl;
mod expr;
mod stmt;

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};

// ==================== PARSER STATE ====================

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a new parser from source text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }

    /// Number of tokens, including the trailing end-of-input token.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser {
    pub(crate) fn peek(&self) -> &Token {
        // The lexer always terminates the stream with an Eof token.
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    /// Consume the next token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            Err(ParseError::unexpected_token(
                token.span,
                kind.name(),
                token.kind.name(),
            ))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => {
                let token = self.peek();
                Err(ParseError::unexpected_token(
                    token.span,
                    "identifier",
                    token.kind.name(),
                ))
            }
        }
    }

    pub(crate) fn expect_eof(&mut self) -> ParseResult<()> {
        self.expect(&TokenKind::Eof).map(|_| ())
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(&TokenKind::Eof)
    }
}

// ==================== PUBLIC API ====================

/// Parse a whole program from source text.
pub fn parse_program(input: &str) -> ParseResult<Program> {
    Parser::new(input)?.parse_program()
}

/// Parse a single top-level field from source text.
pub fn parse_field(input: &str) -> ParseResult<Field> {
    let mut parser = Parser::new(input)?;
    let field = parser.parse_field()?;
    parser.expect_eof()?;
    Ok(field)
}

/// Parse a single method from source text.
pub fn parse_method(input: &str) -> ParseResult<Method> {
    let mut parser = Parser::new(input)?;
    let method = parser.parse_method()?;
    parser.expect_eof()?;
    Ok(method)
}

/// Parse a statement from source text.
pub fn parse_stmt(input: &str) -> ParseResult<Stmt> {
    let mut parser = Parser::new(input)?;
    let stmt = parser.parse_stmt()?;
    parser.expect_eof()?;
    Ok(stmt)
}

/// Parse multiple statements from source text.
pub fn parse_stmts(input: &str) -> ParseResult<Vec<Stmt>> {
    let mut parser = Parser::new(input)?;
    let mut stmts = Vec::new();
    while !parser.is_at_end() {
        stmts.push(parser.parse_stmt()?);
    }
    Ok(stmts)
}

/// Parse an expression from source text.
pub fn parse_expr(input: &str) -> ParseResult<Expr> {
    let mut parser = Parser::new(input)?;
    let expr = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}
