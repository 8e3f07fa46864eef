/// Runtime value in the Cinder language.
///
/// Scalars and booleans are the only results of ordinary expressions.
/// `Vector` appears when a variable bound to a vector is read, so that
/// `print` can render whole vectors; `Nil` is the result of operations
/// that execute purely for their effect on the environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer.
    Integer(i64),

    /// 64-bit floating-point number, produced by true division.
    Float(f64),

    /// Boolean value, produced by comparisons.
    Bool(bool),

    /// Snapshot of a vector binding.
    Vector(Vec<Value>),

    /// No value; the result of effect-only operations.
    Nil,
}

impl Value {
    /// Human-readable kind name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Vector(_) => "vector",
            Value::Nil => "nil",
        }
    }

    /// True for `Integer` and `Float`.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }
}

impl std::fmt::Display for Value {
    /// Format a value using Cinder surface syntax.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Vector(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Nil => write!(f, "nil"),
        }
    }
}
