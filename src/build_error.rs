use thiserror::Error;

/// Error raised while building a tree from a postfix token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An operator demanded more operands than the stack held.
    #[error("stack underflow: operator `{token}` needs {wanted} operands, found {found}")]
    StackUnderflow {
        /// The operator token being reduced.
        token: String,
        /// Operands the operator's arity demands.
        wanted: usize,
        /// Operands actually available.
        found: usize,
    },

    /// The pass ended with other than exactly one node on the stack.
    ///
    /// `remaining == 0` means an empty program; `remaining >= 2` means
    /// leftover operands that no operator consumed.
    #[error("malformed expression: {remaining} nodes left on the stack, expected exactly 1")]
    Leftover {
        /// Node count on the stack after all tokens were consumed.
        remaining: usize,
    },
}
