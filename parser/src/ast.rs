//! Syntax tree for PLC source.
//!
//! Every expression carries a type slot and every name-bearing node carries a
//! binding slot. Both are `OnceCell`s: empty after parsing, written once by the
//! analyzer, never overwritten.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use plc_core::{Function, Type, Variable};
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

// ==================== Declarations ====================

/// A whole source file: global fields followed by methods.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

impl Program {
    pub fn new(fields: Vec<Field>, methods: Vec<Method>) -> Self {
        Self { fields, methods }
    }
}

/// `LET name: Type (= value)?;` at the top level.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub type_name: String,
    pub value: Option<Expr>,
    pub variable: OnceCell<Rc<Variable>>,
}

impl Field {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        value: Option<Expr>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            value,
            variable: OnceCell::new(),
        }
    }
}

/// `DEF name(params) (: ReturnType)? DO statements END`.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub parameters: Vec<String>,
    pub parameter_type_names: Vec<String>,
    pub return_type_name: Option<String>,
    pub statements: Vec<Stmt>,
    pub function: OnceCell<Rc<Function>>,
}

impl Method {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<(String, String)>,
        return_type_name: Option<String>,
        statements: Vec<Stmt>,
    ) -> Self {
        let (parameters, parameter_type_names) = parameters.into_iter().unzip();
        Self {
            name: name.into(),
            parameters,
            parameter_type_names,
            return_type_name,
            statements,
            function: OnceCell::new(),
        }
    }
}

// ==================== Statements ====================

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Declaration(DeclarationStmt),
    Assignment(AssignmentStmt),
    If(IfStmt),
    For(ForStmt),
    While(WhileStmt),
    Return(ReturnStmt),
}

/// `LET name (: Type)? (= value)?;`
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationStmt {
    pub name: String,
    pub type_name: Option<String>,
    pub value: Option<Expr>,
    pub variable: OnceCell<Rc<Variable>>,
}

/// `receiver = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub receiver: Expr,
    pub value: Expr,
}

/// `IF condition DO then (ELSE else)? END`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_statements: Vec<Stmt>,
    pub else_statements: Vec<Stmt>,
}

/// `FOR name IN iterable DO statements END`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub name: String,
    pub iterable: Expr,
    pub statements: Vec<Stmt>,
}

/// `WHILE condition DO statements END`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub statements: Vec<Stmt>,
}

/// `RETURN value;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expr,
}

impl Stmt {
    pub fn expression(expr: Expr) -> Self {
        Stmt::Expression(expr)
    }

    pub fn declaration(
        name: impl Into<String>,
        type_name: Option<&str>,
        value: Option<Expr>,
    ) -> Self {
        Stmt::Declaration(DeclarationStmt {
            name: name.into(),
            type_name: type_name.map(str::to_string),
            value,
            variable: OnceCell::new(),
        })
    }

    pub fn assignment(receiver: Expr, value: Expr) -> Self {
        Stmt::Assignment(AssignmentStmt { receiver, value })
    }

    pub fn if_else(
        condition: Expr,
        then_statements: Vec<Stmt>,
        else_statements: Vec<Stmt>,
    ) -> Self {
        Stmt::If(IfStmt {
            condition,
            then_statements,
            else_statements,
        })
    }

    pub fn for_in(name: impl Into<String>, iterable: Expr, statements: Vec<Stmt>) -> Self {
        Stmt::For(ForStmt {
            name: name.into(),
            iterable,
            statements,
        })
    }

    pub fn while_do(condition: Expr, statements: Vec<Stmt>) -> Self {
        Stmt::While(WhileStmt {
            condition,
            statements,
        })
    }

    pub fn return_value(value: Expr) -> Self {
        Stmt::Return(ReturnStmt { value })
    }
}

// ==================== Expressions ====================

/// An expression together with its type slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: OnceCell<Type>,
}

/// The expression variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Group(Box<Expr>),
    Binary(BinaryExpr),
    Access(AccessExpr),
    Call(CallExpr),
}

/// `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// `name` or `receiver.name`
#[derive(Debug, Clone, PartialEq)]
pub struct AccessExpr {
    pub receiver: Option<Box<Expr>>,
    pub name: String,
    pub variable: OnceCell<Rc<Variable>>,
}

/// `name(args)` or `receiver.name(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub receiver: Option<Box<Expr>>,
    pub name: String,
    pub arguments: Vec<Expr>,
    pub function: OnceCell<Rc<Function>>,
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Boolean(bool),
    Integer(BigInt),
    Decimal(BigDecimal),
    Character(char),
    String(String),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    And,
    Or,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
                | BinaryOp::Eq
                | BinaryOp::NotEq
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        };
        f.write_str(symbol)
    }
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            ty: OnceCell::new(),
        }
    }

    pub fn literal(literal: Literal) -> Self {
        Self::new(ExprKind::Literal(literal))
    }

    pub fn group(inner: Expr) -> Self {
        Self::new(ExprKind::Group(Box::new(inner)))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::new(ExprKind::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    pub fn access(receiver: Option<Expr>, name: impl Into<String>) -> Self {
        Self::new(ExprKind::Access(AccessExpr {
            receiver: receiver.map(Box::new),
            name: name.into(),
            variable: OnceCell::new(),
        }))
    }

    pub fn call(receiver: Option<Expr>, name: impl Into<String>, arguments: Vec<Expr>) -> Self {
        Self::new(ExprKind::Call(CallExpr {
            receiver: receiver.map(Box::new),
            name: name.into(),
            arguments,
            function: OnceCell::new(),
        }))
    }

    /// The type recorded by analysis, if any.
    pub fn ty(&self) -> Option<&Type> {
        self.ty.get()
    }

    /// Short name of the expression variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ExprKind::Literal(_) => "literal",
            ExprKind::Group(_) => "group",
            ExprKind::Binary(_) => "binary",
            ExprKind::Access(_) => "access",
            ExprKind::Call(_) => "call",
        }
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Integer(BigInt::from(n))
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<char> for Literal {
    fn from(c: char) -> Self {
        Literal::Character(c)
    }
}

impl From<BigDecimal> for Literal {
    fn from(d: BigDecimal) -> Self {
        Literal::Decimal(d)
    }
}
