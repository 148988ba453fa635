//! Top-level declarations: fields and methods.

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a program: all fields come before all methods.
    pub(crate) fn parse_program(&mut self) -> ParseResult<Program> {
        let mut fields = Vec::new();
        while self.check(&TokenKind::Let) {
            fields.push(self.parse_field()?);
        }

        let mut methods = Vec::new();
        while self.check(&TokenKind::Def) {
            methods.push(self.parse_method()?);
        }

        if !self.is_at_end() {
            let token = self.peek();
            let message = if matches!(token.kind, TokenKind::Let) {
                "fields must be declared before methods".to_string()
            } else {
                format!("expected LET or DEF, found {}", token.kind.name())
            };
            return Err(ParseError::new(message, token.span));
        }

        Ok(Program::new(fields, methods))
    }

    /// `LET name: Type (= expr)?;`
    pub(crate) fn parse_field(&mut self) -> ParseResult<Field> {
        self.expect(&TokenKind::Let)?;
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Colon)?;
        let type_name = self.expect_ident()?;

        let value = if self.eat(&TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon)?;

        Ok(Field::new(name, type_name, value))
    }

    /// `DEF name(p: T, ...) (: R)? DO stmts END`
    pub(crate) fn parse_method(&mut self) -> ParseResult<Method> {
        self.expect(&TokenKind::Def)?;
        let name = self.expect_ident()?;
        self.expect(&TokenKind::LParen)?;

        let mut parameters = Vec::new();
        if !self.eat(&TokenKind::RParen) {
            loop {
                let parameter = self.expect_ident()?;
                self.expect(&TokenKind::Colon)?;
                let type_name = self.expect_ident()?;
                parameters.push((parameter, type_name));
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RParen)?;
        }

        let return_type_name = if self.eat(&TokenKind::Colon) {
            Some(self.expect_ident()?)
        } else {
            None
        };

        self.expect(&TokenKind::Do)?;
        let statements = self.parse_block(&[TokenKind::End])?;
        self.expect(&TokenKind::End)?;

        Ok(Method::new(name, parameters, return_type_name, statements))
    }
}
