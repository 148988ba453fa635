//! Expression parsing.
//!
//! Handles operator precedence parsing for PLC expressions, loosest first:
//! - Logical: AND, OR (one level, left to right)
//! - Comparison: <, <=, >, >=, ==, !=
//! - Additive: +, -
//! - Multiplicative: *, /
//! - Secondary: member access and method calls (.)
//! - Primary: literals, variables, function calls, grouping

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_logical()
    }

    fn parse_logical(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_comparison()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::And => BinaryOp::And,
                TokenKind::Or => BinaryOp::Or,
                _ => break,
            };
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::LtEq,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::GtEq,
                TokenKind::Eq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::NotEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_secondary()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_secondary()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_secondary(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        while self.eat(&TokenKind::Dot) {
            let name = self.expect_ident()?;
            expr = if self.eat(&TokenKind::LParen) {
                let arguments = self.parse_arguments()?;
                Expr::call(Some(expr), name, arguments)
            } else {
                Expr::access(Some(expr), name)
            };
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.advance();

        let literal = match token.kind {
            TokenKind::Nil => Literal::Nil,
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),
            TokenKind::Integer(n) => Literal::Integer(n),
            TokenKind::Decimal(d) => Literal::Decimal(d),
            TokenKind::Character(c) => Literal::Character(c),
            TokenKind::String(s) => Literal::String(s),
            TokenKind::Ident(name) => {
                return if self.eat(&TokenKind::LParen) {
                    let arguments = self.parse_arguments()?;
                    Ok(Expr::call(None, name, arguments))
                } else {
                    Ok(Expr::access(None, name))
                };
            }
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                return Ok(Expr::group(inner));
            }
            ref kind => {
                return Err(ParseError::unexpected_token(
                    token.span,
                    "expression",
                    kind.name(),
                ));
            }
        };

        Ok(Expr::literal(literal))
    }

    /// Parse a comma-separated argument list; the opening paren is already consumed.
    fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut arguments = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_expr()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        Ok(arguments)
    }
}
