//! Lexical environments and the bindings they hold.

use crate::{RuntimeError, RuntimeResult, Type, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A variable binding with a mutable value cell.
pub struct Variable {
    /// The name of the variable.
    pub name: String,
    /// Identifier used for this variable in the target environment.
    pub external_name: String,
    /// The declared type.
    pub ty: Type,
    value: RefCell<Value>,
}

impl Variable {
    pub fn new(
        name: impl Into<String>,
        external_name: impl Into<String>,
        ty: Type,
        value: Value,
    ) -> Self {
        Self {
            name: name.into(),
            external_name: external_name.into(),
            ty,
            value: RefCell::new(value),
        }
    }

    /// Current value of the variable.
    pub fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    pub fn set_value(&self, value: Value) {
        *self.value.borrow_mut() = value;
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.external_name == other.external_name && self.ty == other.ty
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.name)
            .field("external_name", &self.external_name)
            .field("ty", &self.ty)
            .finish()
    }
}

/// The procedure run when a function is invoked.
pub type Invoke = Rc<dyn Fn(&[Value]) -> RuntimeResult<Value>>;

/// A function binding, looked up by (name, arity).
#[derive(Clone)]
pub struct Function {
    /// The name of the function.
    pub name: String,
    /// Identifier used for this function in the target environment.
    pub external_name: String,
    /// Parameter types, in order.
    pub parameter_types: Vec<Type>,
    /// The declared return type.
    pub return_type: Type,
    invoke: Invoke,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        external_name: impl Into<String>,
        parameter_types: Vec<Type>,
        return_type: Type,
        invoke: impl Fn(&[Value]) -> RuntimeResult<Value> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            external_name: external_name.into(),
            parameter_types,
            return_type,
            invoke: Rc::new(invoke),
        }
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    /// Invoke the function with exactly `arity()` arguments.
    pub fn invoke(&self, arguments: &[Value]) -> RuntimeResult<Value> {
        if arguments.len() != self.arity() {
            return Err(RuntimeError::arity_mismatch(
                &self.name,
                self.arity(),
                arguments.len(),
            ));
        }
        (self.invoke)(arguments)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.external_name == other.external_name
            && self.parameter_types == other.parameter_types
            && self.return_type == other.return_type
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("parameter_types", &self.parameter_types)
            .field("return_type", &self.return_type)
            .finish()
    }
}

/// A lexical scope.
///
/// Lookups walk outward through the parent chain. Defining a name that already
/// exists in this scope replaces it; defining one that exists further out shadows it.
#[derive(Default)]
pub struct Scope {
    parent: Option<Rc<Scope>>,
    variables: RefCell<HashMap<String, Rc<Variable>>>,
    functions: RefCell<HashMap<(String, usize), Rc<Function>>>,
}

impl Scope {
    /// Create a scope with no parent.
    pub fn root() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Create a scope nested inside `parent`.
    pub fn child(parent: &Rc<Scope>) -> Rc<Self> {
        Rc::new(Self {
            parent: Some(Rc::clone(parent)),
            ..Self::default()
        })
    }

    pub fn parent(&self) -> Option<&Rc<Scope>> {
        self.parent.as_ref()
    }

    /// Define a variable in this scope and return the shared binding.
    pub fn define_variable(&self, variable: impl Into<Rc<Variable>>) -> Rc<Variable> {
        let variable = variable.into();
        self.variables
            .borrow_mut()
            .insert(variable.name.clone(), Rc::clone(&variable));
        variable
    }

    /// Look up a variable by name, searching from this scope outward.
    pub fn lookup_variable(&self, name: &str) -> Option<Rc<Variable>> {
        if let Some(variable) = self.variables.borrow().get(name) {
            return Some(Rc::clone(variable));
        }
        self.parent.as_ref()?.lookup_variable(name)
    }

    /// Define a function in this scope and return the shared binding.
    pub fn define_function(&self, function: impl Into<Rc<Function>>) -> Rc<Function> {
        let function = function.into();
        let key = (function.name.clone(), function.arity());
        self.functions.borrow_mut().insert(key, Rc::clone(&function));
        function
    }

    /// Look up a function by name and arity, searching from this scope outward.
    pub fn lookup_function(&self, name: &str, arity: usize) -> Option<Rc<Function>> {
        if let Some(function) = self.functions.borrow().get(&(name.to_string(), arity)) {
            return Some(Rc::clone(function));
        }
        self.parent.as_ref()?.lookup_function(name, arity)
    }

    /// Whether any function with this name is visible, regardless of arity.
    pub fn has_function_named(&self, name: &str) -> bool {
        !self.function_arities(name).is_empty()
    }

    /// Every arity under which `name` is visible, sorted and deduplicated.
    pub fn function_arities(&self, name: &str) -> Vec<usize> {
        let mut arities: Vec<usize> = self
            .functions
            .borrow()
            .keys()
            .filter(|(n, _)| n == name)
            .map(|(_, arity)| *arity)
            .collect();
        if let Some(parent) = &self.parent {
            arities.extend(parent.function_arities(name));
        }
        arities.sort_unstable();
        arities.dedup();
        arities
    }

    /// Whether a variable is defined directly in this scope.
    pub fn is_defined_in_current(&self, name: &str) -> bool {
        self.variables.borrow().contains_key(name)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut variables: Vec<String> = self.variables.borrow().keys().cloned().collect();
        variables.sort();
        let mut functions: Vec<String> = self
            .functions
            .borrow()
            .keys()
            .map(|(name, arity)| format!("{}/{}", name, arity))
            .collect();
        functions.sort();
        f.debug_struct("Scope")
            .field("variables", &variables)
            .field("functions", &functions)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
