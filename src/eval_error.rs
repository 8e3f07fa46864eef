use thiserror::Error;

/// Error raised during evaluation.
///
/// All failures are fatal to the current evaluation and propagate to
/// the caller unrecovered; environment mutations made before the
/// failure persist.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A variable, assignment target or `call` target is unbound.
    #[error("unknown variable `{0}`")]
    MissingVariable(String),

    /// `alloc`, `valloc`, `setq`, `setv`, `for`, `defsub` and `call`
    /// need a bare variable name as their first argument.
    #[error("`{op}` expects a variable name, got `{got}`")]
    ExpectedVariable {
        /// Display symbol of the offending operator.
        op: &'static str,
        /// Rendering of the argument that was supplied instead.
        got: String,
    },

    /// An arithmetic or comparison operand was not a number.
    #[error("expected a number, got {0}")]
    ExpectedNumber(&'static str),

    /// A vector length or index was not an integer.
    #[error("expected an integer, got {0}")]
    ExpectedInteger(&'static str),

    /// `=`/`!=` operands of incompatible kinds.
    #[error("cannot compare {0} and {1}")]
    Incomparable(&'static str, &'static str),

    /// Reading a variable that names a subroutine, not a value.
    #[error("`{0}` names a subroutine, not a value")]
    SubroutineRead(String),

    /// `setv` on a name not bound to a vector.
    #[error("`{0}` is not bound to a vector")]
    NotAVector(String),

    /// `call` on a name not bound to a subroutine.
    #[error("`{0}` is not bound to a subroutine")]
    NotASubroutine(String),

    /// A condition evaluated to something other than a boolean.
    #[error("condition evaluated to {0}, expected a boolean")]
    ConditionNotBoolean(&'static str),

    /// `if` given a literal boolean node as its condition instead of an
    /// expression that computes one.
    #[error("`if` condition must be a computed expression, not a boolean literal")]
    LiteralCondition,

    /// Division, reciprocal or modulus with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// `setv` index outside the vector.
    #[error("vector index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The index as evaluated.
        index: i64,
        /// Length of the vector binding.
        len: usize,
    },

    /// `valloc` with a negative size.
    #[error("vector length must be non-negative, got {0}")]
    NegativeLength(i64),

    /// `call` recursion exceeded the configured depth limit.
    #[error("call depth limit exceeded ({0})")]
    CallDepthExceeded(usize),

    /// Total evaluated nodes exceeded the configured step limit.
    #[error("execution step limit exceeded ({0})")]
    StepLimitExceeded(usize),

    /// The print sink failed.
    #[error("output error: {0}")]
    Output(String),
}
