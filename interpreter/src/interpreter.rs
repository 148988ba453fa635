//! The tree-walking interpreter.

use crate::{apply_binary, Completion, Output};
use num_bigint::BigInt;
use num_traits::One;
use plc_core::{Function, Object, RuntimeError, RuntimeResult, Scope, Type, Value, Variable};
use plc_parser::{
    AccessExpr, AssignmentStmt, BinaryExpr, BinaryOp, CallExpr, DeclarationStmt, Expr, ExprKind,
    Field, ForStmt, IfStmt, Literal, Method, Program, Stmt, WhileStmt,
};
use plc_registry::Registry;
use std::rc::Rc;

/// Executes programs, statements and expressions against a live scope.
///
/// Names are resolved at evaluation time, so a tree runs the same whether or
/// not it was analyzed first.
pub struct Interpreter {
    evaluator: Evaluator,
    scope: Rc<Scope>,
    output: Output,
}

impl Interpreter {
    /// Create an interpreter whose outermost scope holds the built-in functions.
    pub fn new(registry: &Registry) -> Self {
        Self::rooted(registry, Scope::root())
    }

    /// Create an interpreter nested inside a caller-provided scope.
    pub fn with_scope(registry: &Registry, parent: &Rc<Scope>) -> Self {
        Self::rooted(registry, Scope::child(parent))
    }

    fn rooted(registry: &Registry, scope: Rc<Scope>) -> Self {
        let output = Output::default();
        define_builtins(registry, &scope, &output);
        Self {
            evaluator: Evaluator {
                registry: Rc::new(registry.clone()),
            },
            scope,
            output,
        }
    }

    /// Redirect `print`.
    pub fn with_output(mut self, output: Output) -> Self {
        define_builtins(&self.evaluator.registry, &self.scope, &output);
        self.output = output;
        self
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// The outermost scope; fields and methods are defined here.
    pub fn scope(&self) -> &Rc<Scope> {
        &self.scope
    }

    // ==================== Entry Points ====================

    /// Define every field and method, then call `main()` and return its result.
    pub fn run(&self, program: &Program) -> RuntimeResult<Value> {
        for field in &program.fields {
            self.execute_field(field)?;
        }
        for method in &program.methods {
            self.execute_method(method)?;
        }

        let main = self
            .scope
            .lookup_function("main", 0)
            .ok_or_else(|| RuntimeError::undefined_function("main", 0))?;
        main.invoke(&[])
    }

    /// Evaluate a field's initializer and define it in the outermost scope.
    pub fn execute_field(&self, field: &Field) -> RuntimeResult<()> {
        // An initialized field takes its value's type, as in analysis.
        let (value, ty) = match &field.value {
            Some(expr) => {
                let value = self.evaluator.evaluate(expr, &self.scope)?;
                let ty = self.evaluator.registry.type_of(&value);
                (value, ty)
            }
            None => {
                let ty = self.evaluator.runtime_type(Some(&field.type_name), &Value::Nil);
                (Value::Nil, ty)
            }
        };
        self.scope
            .define_variable(Variable::new(&field.name, &field.name, ty, value));
        Ok(())
    }

    /// Define a method as a closure over the outermost scope.
    pub fn execute_method(&self, method: &Method) -> RuntimeResult<()> {
        self.evaluator.define_method(method, &self.scope);
        Ok(())
    }

    /// Execute a statement in the outermost scope.
    pub fn execute(&self, stmt: &Stmt) -> RuntimeResult<Value> {
        match self.evaluator.execute(stmt, &self.scope)? {
            Completion::Normal => Ok(Value::Nil),
            Completion::Return(_) => Err(RuntimeError::ReturnOutsideFunction),
        }
    }

    /// Evaluate an expression in the outermost scope.
    pub fn evaluate(&self, expr: &Expr) -> RuntimeResult<Value> {
        self.evaluator.evaluate(expr, &self.scope)
    }
}

/// The evaluation rules. Cloned into every method closure.
#[derive(Clone)]
struct Evaluator {
    registry: Rc<Registry>,
}

impl Evaluator {
    // ==================== Methods ====================

    fn define_method(&self, method: &Method, scope: &Rc<Scope>) -> Rc<Function> {
        let parameter_types = method
            .parameter_type_names
            .iter()
            .map(|name| self.registry.resolve(name).unwrap_or_else(|_| self.registry.any()))
            .collect();
        let return_type = method
            .return_type_name
            .as_deref()
            .and_then(|name| self.registry.get_type(name).cloned())
            .unwrap_or_else(|| self.registry.nil());

        let body = Rc::new(method.clone());
        // The scope owns the function; a strong reference back would leak both.
        let defining = Rc::downgrade(scope);
        let evaluator = self.clone();
        let function = Function::new(
            &method.name,
            &method.name,
            parameter_types,
            return_type,
            move |arguments| {
                let scope = defining.upgrade().ok_or_else(|| {
                    RuntimeError::undefined_function(&body.name, body.parameters.len())
                })?;
                evaluator.call_method(&body, &scope, arguments)
            },
        );
        scope.define_function(function)
    }

    fn call_method(
        &self,
        method: &Method,
        defining: &Rc<Scope>,
        arguments: &[Value],
    ) -> RuntimeResult<Value> {
        let frame = Scope::child(defining);
        let parameters = method.parameters.iter().zip(&method.parameter_type_names);
        for ((name, type_name), value) in parameters.zip(arguments) {
            let ty = self.runtime_type(Some(type_name), value);
            frame.define_variable(Variable::new(name, name, ty, value.clone()));
        }

        Ok(self.execute_block(&method.statements, &frame)?.into_value())
    }

    // ==================== Statements ====================

    fn execute_block(&self, stmts: &[Stmt], scope: &Rc<Scope>) -> RuntimeResult<Completion> {
        for stmt in stmts {
            let completion = self.execute(stmt, scope)?;
            if completion.is_return() {
                return Ok(completion);
            }
        }
        Ok(Completion::Normal)
    }

    fn execute(&self, stmt: &Stmt, scope: &Rc<Scope>) -> RuntimeResult<Completion> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr, scope)?;
                Ok(Completion::Normal)
            }
            Stmt::Declaration(decl) => self.execute_declaration(decl, scope),
            Stmt::Assignment(assign) => self.execute_assignment(assign, scope),
            Stmt::If(if_stmt) => self.execute_if(if_stmt, scope),
            Stmt::For(for_stmt) => self.execute_for(for_stmt, scope),
            Stmt::While(while_stmt) => self.execute_while(while_stmt, scope),
            Stmt::Return(ret) => Ok(Completion::Return(self.evaluate(&ret.value, scope)?)),
        }
    }

    fn execute_declaration(
        &self,
        decl: &DeclarationStmt,
        scope: &Rc<Scope>,
    ) -> RuntimeResult<Completion> {
        let value = match &decl.value {
            Some(expr) => self.evaluate(expr, scope)?,
            None => Value::Nil,
        };
        let ty = self.runtime_type(decl.type_name.as_deref(), &value);
        scope.define_variable(Variable::new(&decl.name, &decl.name, ty, value));
        Ok(Completion::Normal)
    }

    fn execute_assignment(
        &self,
        assign: &AssignmentStmt,
        scope: &Rc<Scope>,
    ) -> RuntimeResult<Completion> {
        let ExprKind::Access(access) = &assign.receiver.kind else {
            return Err(RuntimeError::InvalidAssignmentTarget);
        };
        let variable = self.resolve_variable(access, scope)?;
        let value = self.evaluate(&assign.value, scope)?;
        variable.set_value(value);
        Ok(Completion::Normal)
    }

    fn execute_if(&self, if_stmt: &IfStmt, scope: &Rc<Scope>) -> RuntimeResult<Completion> {
        let branch = if self.condition(&if_stmt.condition, scope)? {
            &if_stmt.then_statements
        } else {
            &if_stmt.else_statements
        };
        self.execute_block(branch, &Scope::child(scope))
    }

    fn execute_for(&self, for_stmt: &ForStmt, scope: &Rc<Scope>) -> RuntimeResult<Completion> {
        let items = match self.evaluate(&for_stmt.iterable, scope)? {
            Value::Sequence(items) => items,
            other => {
                return Err(RuntimeError::type_mismatch(
                    "IntegerIterable",
                    other.kind_name(),
                ))
            }
        };

        for item in items {
            let iteration = Scope::child(scope);
            let ty = self.registry.type_of(&item);
            iteration.define_variable(Variable::new(&for_stmt.name, &for_stmt.name, ty, item));

            let completion = self.execute_block(&for_stmt.statements, &iteration)?;
            if completion.is_return() {
                return Ok(completion);
            }
        }
        Ok(Completion::Normal)
    }

    fn execute_while(
        &self,
        while_stmt: &WhileStmt,
        scope: &Rc<Scope>,
    ) -> RuntimeResult<Completion> {
        while self.condition(&while_stmt.condition, scope)? {
            let completion = self.execute_block(&while_stmt.statements, &Scope::child(scope))?;
            if completion.is_return() {
                return Ok(completion);
            }
        }
        Ok(Completion::Normal)
    }

    fn condition(&self, expr: &Expr, scope: &Rc<Scope>) -> RuntimeResult<bool> {
        let value = self.evaluate(expr, scope)?;
        value
            .as_bool()
            .ok_or_else(|| RuntimeError::type_mismatch("Boolean", value.kind_name()))
    }

    // ==================== Expressions ====================

    fn evaluate(&self, expr: &Expr, scope: &Rc<Scope>) -> RuntimeResult<Value> {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(literal_value(literal)),
            ExprKind::Group(inner) => self.evaluate(inner, scope),
            ExprKind::Binary(binary) => self.evaluate_binary(binary, scope),
            ExprKind::Access(access) => Ok(self.resolve_variable(access, scope)?.value()),
            ExprKind::Call(call) => self.evaluate_call(call, scope),
        }
    }

    fn evaluate_binary(&self, binary: &BinaryExpr, scope: &Rc<Scope>) -> RuntimeResult<Value> {
        match binary.op {
            // Each operand is evaluated at most once.
            BinaryOp::And | BinaryOp::Or => {
                let left = self.condition(&binary.left, scope)?;
                if left == (binary.op == BinaryOp::Or) {
                    return Ok(Value::Boolean(left));
                }
                Ok(Value::Boolean(self.condition(&binary.right, scope)?))
            }
            op => {
                let left = self.evaluate(&binary.left, scope)?;
                let right = self.evaluate(&binary.right, scope)?;
                apply_binary(op, left, right)
            }
        }
    }

    fn resolve_variable(&self, access: &AccessExpr, scope: &Rc<Scope>) -> RuntimeResult<Rc<Variable>> {
        match &access.receiver {
            None => scope
                .lookup_variable(&access.name)
                .ok_or_else(|| RuntimeError::undefined_variable(&access.name)),
            Some(receiver) => {
                let object = self.receiver_object(receiver, &access.name, scope)?;
                object
                    .scope
                    .lookup_variable(&access.name)
                    .ok_or_else(|| RuntimeError::unknown_member(&access.name, object.ty.name()))
            }
        }
    }

    fn evaluate_call(&self, call: &CallExpr, scope: &Rc<Scope>) -> RuntimeResult<Value> {
        let object = match &call.receiver {
            Some(receiver) => Some(self.receiver_object(receiver, &call.name, scope)?),
            None => None,
        };
        let arguments = call
            .arguments
            .iter()
            .map(|argument| self.evaluate(argument, scope))
            .collect::<RuntimeResult<Vec<_>>>()?;
        let arity = arguments.len();

        let function = match &object {
            None => lookup_function(scope, &call.name, arity)?,
            Some(object) => object
                .scope
                .lookup_function(&call.name, arity)
                .ok_or_else(|| {
                    RuntimeError::unknown_member(
                        format!("{}/{}", call.name, arity),
                        object.ty.name(),
                    )
                })?,
        };
        function.invoke(&arguments)
    }

    fn receiver_object(
        &self,
        receiver: &Expr,
        member: &str,
        scope: &Rc<Scope>,
    ) -> RuntimeResult<Object> {
        match self.evaluate(receiver, scope)? {
            Value::Object(object) => Ok(object),
            other => Err(RuntimeError::invalid_receiver(member, other.kind_name())),
        }
    }

    // ==================== Helpers ====================

    /// The declared type when it names a registered type, otherwise the value's own type.
    fn runtime_type(&self, type_name: Option<&str>, value: &Value) -> Type {
        type_name
            .and_then(|name| self.registry.get_type(name).cloned())
            .unwrap_or_else(|| self.registry.type_of(value))
    }
}

fn lookup_function(scope: &Rc<Scope>, name: &str, arity: usize) -> RuntimeResult<Rc<Function>> {
    if let Some(function) = scope.lookup_function(name, arity) {
        return Ok(function);
    }
    match scope.function_arities(name).first() {
        Some(&expected) => Err(RuntimeError::arity_mismatch(name, expected, arity)),
        None => Err(RuntimeError::undefined_function(name, arity)),
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Integer(n) => Value::Integer(n.clone()),
        Literal::Decimal(d) => Value::Decimal(d.clone()),
        Literal::Character(c) => Value::Character(*c),
        Literal::String(s) => Value::String(s.clone()),
    }
}

/// Define `print` and `range`; `print` writes to `output`.
fn define_builtins(registry: &Registry, scope: &Rc<Scope>, output: &Output) {
    let sink = output.clone();
    scope.define_function(Function::new(
        "print",
        "System.out.println",
        vec![registry.any()],
        registry.nil(),
        move |arguments| {
            sink.write_line(arguments[0].to_string());
            Ok(Value::Nil)
        },
    ));

    scope.define_function(Function::new(
        "range",
        "range",
        vec![registry.integer(), registry.integer()],
        registry.integer_iterable(),
        |arguments| {
            let bound = |value: &Value| {
                value
                    .as_integer()
                    .cloned()
                    .ok_or_else(|| RuntimeError::type_mismatch("Integer", value.kind_name()))
            };
            let (mut current, end) = (bound(&arguments[0])?, bound(&arguments[1])?);
            let one = BigInt::one();
            let mut items = Vec::new();
            while current < end {
                items.push(Value::Integer(current.clone()));
                current += &one;
            }
            Ok(Value::Sequence(items))
        },
    ));
}
