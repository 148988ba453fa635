//! The main analyzer implementation.

use crate::{AnalyzerResult, SemanticError};
use num_traits::ToPrimitive;
use plc_core::{Function, Scope, Type, Value, Variable};
use plc_parser::{
    AccessExpr, AssignmentStmt, BinaryExpr, BinaryOp, CallExpr, DeclarationStmt, Expr, ExprKind,
    Field, ForStmt, IfStmt, Literal, Method, Program, ReturnStmt, Stmt, WhileStmt,
};
use plc_registry::Registry;
use std::rc::Rc;

/// Binding that records the enclosing method's return type.
/// The lexer never produces `$`, so user code cannot shadow it.
const RETURN_MARKER: &str = "$return";

/// The analyzer resolves names and checks types, annotating the tree in place.
///
/// The active scope is passed explicitly to every visit function; the analyzer
/// itself only holds the registry and the outermost scope.
pub struct Analyzer<'r> {
    registry: &'r Registry,
    scope: Rc<Scope>,
}

impl<'r> Analyzer<'r> {
    /// Create an analyzer whose outermost scope holds the built-in functions.
    pub fn new(registry: &'r Registry) -> Self {
        let scope = Scope::root();
        define_builtins(registry, &scope);
        Self { registry, scope }
    }

    /// Create an analyzer nested inside a caller-provided scope.
    pub fn with_scope(registry: &'r Registry, parent: &Rc<Scope>) -> Self {
        let scope = Scope::child(parent);
        define_builtins(registry, &scope);
        Self { registry, scope }
    }

    /// The outermost scope; fields and methods are defined here.
    pub fn scope(&self) -> &Rc<Scope> {
        &self.scope
    }

    // ==================== Entry Points ====================

    /// Analyze a whole program.
    pub fn analyze(&self, program: &Program) -> AnalyzerResult<()> {
        for field in &program.fields {
            self.analyze_field_in(field, &self.scope)?;
        }
        for method in &program.methods {
            self.analyze_method_in(method, &self.scope)?;
        }

        let mut mains = program
            .methods
            .iter()
            .filter(|m| m.name == "main" && m.parameters.is_empty());
        let main = mains.next().ok_or(SemanticError::MissingMain)?;
        if mains.next().is_some() {
            return Err(SemanticError::DuplicateMain);
        }
        let returns_integer = main
            .function
            .get()
            .is_some_and(|f| f.return_type == self.registry.integer());
        if !returns_integer {
            return Err(SemanticError::MissingMain);
        }

        Ok(())
    }

    /// Analyze a single field in the outermost scope.
    pub fn analyze_field(&self, field: &Field) -> AnalyzerResult<()> {
        self.analyze_field_in(field, &self.scope)
    }

    /// Analyze a single method in the outermost scope.
    pub fn analyze_method(&self, method: &Method) -> AnalyzerResult<()> {
        self.analyze_method_in(method, &self.scope)
    }

    /// Analyze a single statement in the outermost scope.
    pub fn analyze_stmt(&self, stmt: &Stmt) -> AnalyzerResult<()> {
        self.visit_stmt(stmt, &self.scope)
    }

    /// Analyze a single expression in the outermost scope and return its type.
    pub fn analyze_expr(&self, expr: &Expr) -> AnalyzerResult<Type> {
        self.visit_expr(expr, &self.scope)
    }

    // ==================== Declarations ====================

    fn analyze_field_in(&self, field: &Field, scope: &Rc<Scope>) -> AnalyzerResult<()> {
        let declared = self.resolve(&field.type_name)?;
        let ty = match &field.value {
            Some(value) => {
                let value_type = self.visit_expr(value, scope)?;
                self.require_assignable(&declared, &value_type)?;
                value_type
            }
            None => declared,
        };

        let variable = field.variable.get_or_init(|| {
            Rc::new(Variable::new(&field.name, &field.name, ty, Value::Nil))
        });
        scope.define_variable(Rc::clone(variable));
        Ok(())
    }

    fn analyze_method_in(&self, method: &Method, scope: &Rc<Scope>) -> AnalyzerResult<()> {
        let parameter_types = method
            .parameter_type_names
            .iter()
            .map(|name| self.resolve(name))
            .collect::<AnalyzerResult<Vec<_>>>()?;
        let return_type = match &method.return_type_name {
            Some(name) => self.resolve(name)?,
            None => self.registry.nil(),
        };

        // Defined before the body so the method can call itself.
        let function = method.function.get_or_init(|| {
            Rc::new(Function::new(
                &method.name,
                &method.name,
                parameter_types,
                return_type,
                |_| Ok(Value::Nil),
            ))
        });
        scope.define_function(Rc::clone(function));

        let body = Scope::child(scope);
        body.define_variable(Variable::new(
            RETURN_MARKER,
            RETURN_MARKER,
            function.return_type.clone(),
            Value::Nil,
        ));
        for (name, ty) in method.parameters.iter().zip(&function.parameter_types) {
            body.define_variable(Variable::new(name, name, ty.clone(), Value::Nil));
        }

        // Each statement gets a fresh scope nested in the previous statement's scope.
        let mut current = body;
        for stmt in &method.statements {
            current = Scope::child(&current);
            self.visit_stmt(stmt, &current)?;
        }

        Ok(())
    }

    // ==================== Statements ====================

    fn visit_stmt(&self, stmt: &Stmt, scope: &Rc<Scope>) -> AnalyzerResult<()> {
        match stmt {
            Stmt::Expression(expr) => self.analyze_expression_stmt(expr, scope),
            Stmt::Declaration(decl) => self.analyze_declaration(decl, scope),
            Stmt::Assignment(assign) => self.analyze_assignment(assign, scope),
            Stmt::If(if_stmt) => self.analyze_if(if_stmt, scope),
            Stmt::For(for_stmt) => self.analyze_for(for_stmt, scope),
            Stmt::While(while_stmt) => self.analyze_while(while_stmt, scope),
            Stmt::Return(ret) => self.analyze_return(ret, scope),
        }
    }

    fn visit_block(&self, stmts: &[Stmt], scope: &Rc<Scope>) -> AnalyzerResult<()> {
        for stmt in stmts {
            self.visit_stmt(stmt, scope)?;
        }
        Ok(())
    }

    fn analyze_expression_stmt(&self, expr: &Expr, scope: &Rc<Scope>) -> AnalyzerResult<()> {
        if !matches!(expr.kind, ExprKind::Call(_)) {
            return Err(SemanticError::invalid_statement_expression(expr.kind_name()));
        }
        self.visit_expr(expr, scope)?;
        Ok(())
    }

    fn analyze_declaration(&self, decl: &DeclarationStmt, scope: &Rc<Scope>) -> AnalyzerResult<()> {
        let ty = match (&decl.type_name, &decl.value) {
            (None, None) => return Err(SemanticError::invalid_declaration(&decl.name)),
            (Some(type_name), None) => self.resolve(type_name)?,
            (None, Some(value)) => self.visit_expr(value, scope)?,
            (Some(type_name), Some(value)) => {
                let declared = self.resolve(type_name)?;
                let value_type = self.visit_expr(value, scope)?;
                self.require_assignable(&declared, &value_type)?;
                declared
            }
        };

        let variable = decl
            .variable
            .get_or_init(|| Rc::new(Variable::new(&decl.name, &decl.name, ty, Value::Nil)));
        scope.define_variable(Rc::clone(variable));
        Ok(())
    }

    fn analyze_assignment(&self, assign: &AssignmentStmt, scope: &Rc<Scope>) -> AnalyzerResult<()> {
        if !matches!(assign.receiver.kind, ExprKind::Access(_)) {
            return Err(SemanticError::invalid_assignment_target(
                assign.receiver.kind_name(),
            ));
        }
        let target = self.visit_expr(&assign.receiver, scope)?;
        let value_type = self.visit_expr(&assign.value, scope)?;
        self.require_assignable(&target, &value_type)
    }

    fn analyze_if(&self, if_stmt: &IfStmt, scope: &Rc<Scope>) -> AnalyzerResult<()> {
        if if_stmt.then_statements.is_empty() {
            return Err(SemanticError::empty_block("IF"));
        }
        let condition = self.visit_expr(&if_stmt.condition, scope)?;
        self.require_assignable(&self.registry.boolean(), &condition)?;

        self.visit_block(&if_stmt.then_statements, &Scope::child(scope))?;
        self.visit_block(&if_stmt.else_statements, &Scope::child(scope))
    }

    fn analyze_for(&self, for_stmt: &ForStmt, scope: &Rc<Scope>) -> AnalyzerResult<()> {
        if for_stmt.statements.is_empty() {
            return Err(SemanticError::empty_block("FOR"));
        }
        let iterable = self.visit_expr(&for_stmt.iterable, scope)?;
        self.require_assignable(&self.registry.integer_iterable(), &iterable)?;

        let body = Scope::child(scope);
        body.define_variable(Variable::new(
            &for_stmt.name,
            &for_stmt.name,
            self.registry.integer(),
            Value::Nil,
        ));
        self.visit_block(&for_stmt.statements, &body)
    }

    fn analyze_while(&self, while_stmt: &WhileStmt, scope: &Rc<Scope>) -> AnalyzerResult<()> {
        let condition = self.visit_expr(&while_stmt.condition, scope)?;
        self.require_assignable(&self.registry.boolean(), &condition)?;
        self.visit_block(&while_stmt.statements, &Scope::child(scope))
    }

    fn analyze_return(&self, ret: &ReturnStmt, scope: &Rc<Scope>) -> AnalyzerResult<()> {
        let expected = scope
            .lookup_variable(RETURN_MARKER)
            .ok_or(SemanticError::ReturnOutsideMethod)?;
        let value_type = self.visit_expr(&ret.value, scope)?;
        self.require_assignable(&expected.ty, &value_type)
    }

    // ==================== Expressions ====================

    fn visit_expr(&self, expr: &Expr, scope: &Rc<Scope>) -> AnalyzerResult<Type> {
        let ty = match &expr.kind {
            ExprKind::Literal(literal) => self.analyze_literal(literal)?,
            ExprKind::Group(inner) => self.analyze_group(inner, scope)?,
            ExprKind::Binary(binary) => self.analyze_binary(binary, scope)?,
            ExprKind::Access(access) => self.analyze_access(access, scope)?,
            ExprKind::Call(call) => self.analyze_call(call, scope)?,
        };
        Ok(expr.ty.get_or_init(|| ty).clone())
    }

    fn analyze_literal(&self, literal: &Literal) -> AnalyzerResult<Type> {
        let ty = match literal {
            Literal::Nil => self.registry.nil(),
            Literal::Boolean(_) => self.registry.boolean(),
            Literal::Character(_) => self.registry.character(),
            Literal::String(_) => self.registry.string(),
            Literal::Integer(n) => {
                if n.to_i32().is_none() {
                    return Err(SemanticError::literal_out_of_range(n, "Integer"));
                }
                self.registry.integer()
            }
            Literal::Decimal(d) => {
                if !d.to_f64().is_some_and(f64::is_finite) {
                    return Err(SemanticError::literal_out_of_range(d, "Decimal"));
                }
                self.registry.decimal()
            }
        };
        Ok(ty)
    }

    fn analyze_group(&self, inner: &Expr, scope: &Rc<Scope>) -> AnalyzerResult<Type> {
        if !matches!(inner.kind, ExprKind::Binary(_)) {
            return Err(SemanticError::invalid_group(inner.kind_name()));
        }
        self.visit_expr(inner, scope)
    }

    fn analyze_binary(&self, binary: &BinaryExpr, scope: &Rc<Scope>) -> AnalyzerResult<Type> {
        let left = self.visit_expr(&binary.left, scope)?;
        let right = self.visit_expr(&binary.right, scope)?;

        match binary.op {
            BinaryOp::And | BinaryOp::Or => {
                let boolean = self.registry.boolean();
                self.require_assignable(&boolean, &left)?;
                self.require_assignable(&boolean, &right)?;
                Ok(boolean)
            }
            BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
            | BinaryOp::Eq
            | BinaryOp::NotEq => {
                let comparable = self.registry.comparable();
                self.require_assignable(&comparable, &left)?;
                self.require_assignable(&comparable, &right)?;
                Ok(self.registry.boolean())
            }
            BinaryOp::Add => {
                let string = self.registry.string();
                if left == string || right == string {
                    Ok(string)
                } else {
                    self.numeric_result(binary.op, left, right)
                }
            }
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                self.numeric_result(binary.op, left, right)
            }
        }
    }

    /// Both operands must be the same one of Integer or Decimal.
    fn numeric_result(&self, op: BinaryOp, left: Type, right: Type) -> AnalyzerResult<Type> {
        let numeric = left == self.registry.integer() || left == self.registry.decimal();
        if numeric && left == right {
            Ok(left)
        } else {
            Err(SemanticError::invalid_operator(op, &left, &right))
        }
    }

    fn analyze_access(&self, access: &AccessExpr, scope: &Rc<Scope>) -> AnalyzerResult<Type> {
        let variable = match &access.receiver {
            None => scope
                .lookup_variable(&access.name)
                .ok_or_else(|| SemanticError::undefined_variable(&access.name))?,
            Some(receiver) => {
                let receiver_type = self.visit_expr(receiver, scope)?;
                receiver_type
                    .members()
                    .lookup_variable(&access.name)
                    .ok_or_else(|| SemanticError::unknown_member(&access.name, &receiver_type))?
            }
        };

        let variable = access.variable.get_or_init(|| variable);
        Ok(variable.ty.clone())
    }

    fn analyze_call(&self, call: &CallExpr, scope: &Rc<Scope>) -> AnalyzerResult<Type> {
        let receiver_type = match &call.receiver {
            Some(receiver) => Some(self.visit_expr(receiver, scope)?),
            None => None,
        };
        let argument_types = call
            .arguments
            .iter()
            .map(|argument| self.visit_expr(argument, scope))
            .collect::<AnalyzerResult<Vec<_>>>()?;

        let arity = argument_types.len();
        let function = match &receiver_type {
            None => scope
                .lookup_function(&call.name, arity)
                .ok_or_else(|| SemanticError::undefined_function(&call.name, arity))?,
            Some(receiver_type) => receiver_type
                .members()
                .lookup_function(&call.name, arity)
                .ok_or_else(|| {
                    SemanticError::unknown_member(format!("{}/{}", call.name, arity), receiver_type)
                })?,
        };

        for (parameter_type, argument_type) in function.parameter_types.iter().zip(&argument_types) {
            self.require_assignable(parameter_type, argument_type)?;
        }

        let function = call.function.get_or_init(|| function);
        Ok(function.return_type.clone())
    }

    // ==================== Helpers ====================

    fn resolve(&self, name: &str) -> AnalyzerResult<Type> {
        self.registry
            .resolve(name)
            .map_err(|_| SemanticError::unknown_type(name))
    }

    fn require_assignable(&self, target: &Type, source: &Type) -> AnalyzerResult<()> {
        if self.registry.is_assignable(target, source) {
            Ok(())
        } else {
            Err(SemanticError::not_assignable(target, source))
        }
    }
}

/// Signatures of the functions every program can call.
fn define_builtins(registry: &Registry, scope: &Rc<Scope>) {
    scope.define_function(Function::new(
        "print",
        "System.out.println",
        vec![registry.any()],
        registry.nil(),
        |_| Ok(Value::Nil),
    ));
    scope.define_function(Function::new(
        "range",
        "range",
        vec![registry.integer(), registry.integer()],
        registry.integer_iterable(),
        |_| Ok(Value::Nil),
    ));
}
