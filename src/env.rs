use std::collections::HashMap;

use crate::eval_error::EvalError;
use crate::lang::node::Node;
use crate::lang::value::Value;

/// What a variable name is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A single scalar or boolean value.
    Scalar(Value),

    /// A fixed-length vector of scalar values.
    Vector(Vec<Value>),

    /// An unevaluated subroutine body, stored as code-as-data.
    Subroutine(Node),
}

impl std::fmt::Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Scalar(v) => write!(f, "{}", v),
            Binding::Vector(items) => write!(f, "{}", Value::Vector(items.clone())),
            Binding::Subroutine(body) => write!(f, "{}", body),
        }
    }
}

/// Mutable variable bindings for one evaluation session.
///
/// One flat namespace, threaded through the whole evaluation: there is
/// no lexical scope, and subroutine bodies see and mutate the caller's
/// variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Binding>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            bindings: HashMap::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Bind `name` to a scalar, replacing any previous binding.
    pub fn define_scalar(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), Binding::Scalar(value));
    }

    /// Bind `name` to a vector of `len` integer zeros.
    pub fn define_vector(&mut self, name: &str, len: usize) {
        self.bindings
            .insert(name.to_string(), Binding::Vector(vec![Value::Integer(0); len]));
    }

    /// Bind `name` to an unevaluated subroutine body.
    pub fn define_subroutine(&mut self, name: &str, body: Node) {
        self.bindings
            .insert(name.to_string(), Binding::Subroutine(body));
    }

    /// Overwrite an existing binding with `value`; unlike the define
    /// methods this requires the name to be bound already.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        if !self.bindings.contains_key(name) {
            return Err(EvalError::MissingVariable(name.to_string()));
        }
        let binding = match value {
            Value::Vector(items) => Binding::Vector(items),
            scalar => Binding::Scalar(scalar),
        };
        self.bindings.insert(name.to_string(), binding);
        Ok(())
    }

    /// Mutable access to a vector binding, for element writes.
    pub fn vector_mut(&mut self, name: &str) -> Result<&mut Vec<Value>, EvalError> {
        match self.bindings.get_mut(name) {
            Some(Binding::Vector(items)) => Ok(items),
            Some(_) => Err(EvalError::NotAVector(name.to_string())),
            None => Err(EvalError::MissingVariable(name.to_string())),
        }
    }

    /// The scalar bound to `name`, if any; convenience for callers
    /// inspecting the final environment.
    pub fn scalar(&self, name: &str) -> Option<&Value> {
        match self.bindings.get(name) {
            Some(Binding::Scalar(v)) => Some(v),
            _ => None,
        }
    }

    /// The vector bound to `name`, if any.
    pub fn vector(&self, name: &str) -> Option<&[Value]> {
        match self.bindings.get(name) {
            Some(Binding::Vector(items)) => Some(items),
            _ => None,
        }
    }

    /// All bindings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
