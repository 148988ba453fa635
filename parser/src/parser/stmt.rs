//! Statement parsing: LET, IF, FOR, WHILE, RETURN, assignment and expression statements.

use super::Parser;
use crate::ast::*;
use crate::error::ParseResult;
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a single statement.
    pub(crate) fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match self.peek().kind {
            TokenKind::Let => self.parse_declaration(),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Return => self.parse_return(),
            _ => self.parse_expression_or_assignment(),
        }
    }

    /// Parse statements until one of `terminators` (or end of input) is next.
    pub(crate) fn parse_block(&mut self, terminators: &[TokenKind]) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.is_at_end() && !terminators.iter().any(|t| self.check(t)) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        self.expect(&TokenKind::Let)?;
        let name = self.expect_ident()?;

        let type_name = if self.eat(&TokenKind::Colon) {
            Some(self.expect_ident()?)
        } else {
            None
        };
        let value = if self.eat(&TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon)?;

        Ok(Stmt::declaration(name, type_name.as_deref(), value))
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        self.expect(&TokenKind::If)?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::Do)?;

        let then_statements = self.parse_block(&[TokenKind::Else, TokenKind::End])?;
        let else_statements = if self.eat(&TokenKind::Else) {
            self.parse_block(&[TokenKind::End])?
        } else {
            Vec::new()
        };
        self.expect(&TokenKind::End)?;

        Ok(Stmt::if_else(condition, then_statements, else_statements))
    }

    fn parse_for(&mut self) -> ParseResult<Stmt> {
        self.expect(&TokenKind::For)?;
        let name = self.expect_ident()?;
        self.expect(&TokenKind::In)?;
        let iterable = self.parse_expr()?;
        self.expect(&TokenKind::Do)?;
        let statements = self.parse_block(&[TokenKind::End])?;
        self.expect(&TokenKind::End)?;

        Ok(Stmt::for_in(name, iterable, statements))
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        self.expect(&TokenKind::While)?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::Do)?;
        let statements = self.parse_block(&[TokenKind::End])?;
        self.expect(&TokenKind::End)?;

        Ok(Stmt::while_do(condition, statements))
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        self.expect(&TokenKind::Return)?;
        let value = self.parse_expr()?;
        self.expect(&TokenKind::Semicolon)?;

        Ok(Stmt::return_value(value))
    }

    fn parse_expression_or_assignment(&mut self) -> ParseResult<Stmt> {
        let expr = self.parse_expr()?;

        let stmt = if self.eat(&TokenKind::Assign) {
            let value = self.parse_expr()?;
            Stmt::assignment(expr, value)
        } else {
            Stmt::expression(expr)
        };
        self.expect(&TokenKind::Semicolon)?;

        Ok(stmt)
    }
}
