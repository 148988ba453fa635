//! Lexer (tokenizer) for PLC source text.

use crate::{ParseError, ParseResult, Span};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::str::FromStr;

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords (case-sensitive)
    Let,
    Def,
    Do,
    End,
    If,
    Else,
    For,
    In,
    While,
    Return,
    Nil,
    True,
    False,
    And,
    Or,

    // Literals
    Ident(String),
    Integer(BigInt),
    Decimal(BigDecimal),
    Character(char),
    String(String),

    // Symbols
    LParen,    // (
    RParen,    // )
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;
    Dot,       // .
    Assign,    // =
    Eq,        // ==
    NotEq,     // !=
    Lt,        // <
    LtEq,      // <=
    Gt,        // >
    GtEq,      // >=
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /

    Eof,
}

impl TokenKind {
    /// Human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Let => "LET",
            TokenKind::Def => "DEF",
            TokenKind::Do => "DO",
            TokenKind::End => "END",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::In => "IN",
            TokenKind::While => "WHILE",
            TokenKind::Return => "RETURN",
            TokenKind::Nil => "NIL",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Integer(_) => "integer",
            TokenKind::Decimal(_) => "decimal",
            TokenKind::Character(_) => "character",
            TokenKind::String(_) => "string",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Dot => "'.'",
            TokenKind::Assign => "'='",
            TokenKind::Eq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Eof => "end of input",
        }
    }

    /// Check if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Def
                | TokenKind::Do
                | TokenKind::End
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::In
                | TokenKind::While
                | TokenKind::Return
                | TokenKind::Nil
                | TokenKind::True
                | TokenKind::False
                | TokenKind::And
                | TokenKind::Or
        )
    }

    /// Whether an operand can end with this token.
    fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident(_)
                | TokenKind::Integer(_)
                | TokenKind::Decimal(_)
                | TokenKind::Character(_)
                | TokenKind::String(_)
                | TokenKind::Nil
                | TokenKind::True
                | TokenKind::False
                | TokenKind::RParen
        )
    }

    fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "LET" => TokenKind::Let,
            "DEF" => TokenKind::Def,
            "DO" => TokenKind::Do,
            "END" => TokenKind::End,
            "IF" => TokenKind::If,
            "ELSE" => TokenKind::Else,
            "FOR" => TokenKind::For,
            "IN" => TokenKind::In,
            "WHILE" => TokenKind::While,
            "RETURN" => TokenKind::Return,
            "NIL" => TokenKind::Nil,
            "TRUE" => TokenKind::True,
            "FALSE" => TokenKind::False,
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            _ => return None,
        };
        Some(kind)
    }
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos, line, column),
        }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
    /// Whether the previous token can end an operand; decides if `-` starts a literal.
    after_operand: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
            after_operand: false,
        }
    }

    /// Tokenize all input into a vector of tokens.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            self.after_operand = token.kind.ends_operand();
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_second_char(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(Token::eof(self.pos, self.line, self.column));
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '=' => self.with_eq(TokenKind::Eq, TokenKind::Assign),
            '<' => self.with_eq(TokenKind::LtEq, TokenKind::Lt),
            '>' => self.with_eq(TokenKind::GtEq, TokenKind::Gt),
            '!' => {
                if self.peek_char() == Some('=') {
                    self.next_char();
                    TokenKind::NotEq
                } else {
                    return Err(ParseError::new(
                        "unexpected character '!'",
                        self.span_from(start, start_line, start_col),
                    ));
                }
            }
            '+' => TokenKind::Plus,
            '-' => match self.peek_char() {
                Some(d) if d.is_ascii_digit() && !self.after_operand => {
                    self.scan_number('-', start, start_line, start_col)?
                }
                _ => TokenKind::Minus,
            },
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '\'' => self.scan_character(start, start_line, start_col)?,
            '"' => self.scan_string(start, start_line, start_col)?,
            '_' | 'a'..='z' | 'A'..='Z' => self.scan_ident_or_keyword(c),
            '0'..='9' => self.scan_number(c, start, start_line, start_col)?,
            _ => {
                return Err(ParseError::new(
                    format!("unexpected character '{}'", c),
                    self.span_from(start, start_line, start_col),
                ));
            }
        };

        Ok(Token::new(
            kind,
            self.span_from(start, start_line, start_col),
        ))
    }

    fn with_eq(&mut self, with: TokenKind, without: TokenKind) -> TokenKind {
        if self.peek_char() == Some('=') {
            self.next_char();
            with
        } else {
            without
        }
    }

    fn scan_escape(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<char> {
        let escaped = match self.next_char() {
            Some('b') => '\u{8}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('\'') => '\'',
            Some('"') => '"',
            Some('\\') => '\\',
            Some(c) => {
                return Err(ParseError::new(
                    format!("invalid escape sequence '\\{}'", c),
                    self.span_from(start, start_line, start_col),
                ));
            }
            None => {
                return Err(ParseError::unexpected_eof(
                    self.span_from(start, start_line, start_col),
                    "escape sequence",
                ));
            }
        };
        Ok(escaped)
    }

    fn scan_character(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let value = match self.next_char() {
            Some('\\') => self.scan_escape(start, start_line, start_col)?,
            Some('\'') | Some('\n') | Some('\r') => {
                return Err(ParseError::new(
                    "empty character literal",
                    self.span_from(start, start_line, start_col),
                ));
            }
            Some(c) => c,
            None => {
                return Err(ParseError::unexpected_eof(
                    self.span_from(start, start_line, start_col),
                    "character",
                ));
            }
        };

        match self.next_char() {
            Some('\'') => Ok(TokenKind::Character(value)),
            Some(_) => Err(ParseError::new(
                "character literal must hold exactly one character",
                self.span_from(start, start_line, start_col),
            )),
            None => Err(ParseError::unexpected_eof(
                self.span_from(start, start_line, start_col),
                "'",
            )),
        }
    }

    fn scan_string(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut value = String::new();

        loop {
            match self.next_char() {
                None => {
                    return Err(ParseError::unexpected_eof(
                        self.span_from(start, start_line, start_col),
                        "closing '\"'",
                    ));
                }
                Some('\n') | Some('\r') => {
                    return Err(ParseError::new(
                        "unterminated string literal",
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some('"') => break,
                Some('\\') => value.push(self.scan_escape(start, start_line, start_col)?),
                Some(c) => value.push(c),
            }
        }

        Ok(TokenKind::String(value))
    }

    fn scan_ident_or_keyword(&mut self, first: char) -> TokenKind {
        let mut word = String::new();
        word.push(first);

        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                word.push(c);
                self.next_char();
            } else {
                break;
            }
        }

        TokenKind::keyword(&word).unwrap_or(TokenKind::Ident(word))
    }

    fn scan_number(
        &mut self,
        first: char,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut number = String::new();
        number.push(first);
        self.scan_digits(&mut number);

        let is_decimal = self.peek_char() == Some('.')
            && self.peek_second_char().is_some_and(|c| c.is_ascii_digit());
        if is_decimal {
            number.push('.');
            self.next_char();
            self.scan_digits(&mut number);
        }

        let span = self.span_from(start, start_line, start_col);
        if is_decimal {
            BigDecimal::from_str(&number)
                .map(TokenKind::Decimal)
                .map_err(|_| ParseError::new(format!("invalid decimal '{}'", number), span))
        } else {
            BigInt::from_str(&number)
                .map(TokenKind::Integer)
                .map_err(|_| ParseError::new(format!("invalid integer '{}'", number), span))
        }
    }

    fn scan_digits(&mut self, number: &mut String) {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                number.push(c);
                self.next_char();
            } else {
                break;
            }
        }
    }
}
