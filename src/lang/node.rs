use super::value::Value;

/// Operation kind for a Cinder expression node.
///
/// Each kind has a fixed arity and a fixed display symbol; both are
/// static properties of the kind, never of the node instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    // ───────────────────────────── Arithmetic ───────────────────────────
    /// Addition, `+/2`.
    Add,
    /// Subtraction, `-/2`.
    Sub,
    /// Multiplication, `*/2`.
    Mul,
    /// True (non-truncating) division, `//2`.
    Div,
    /// Exponentiation, `**/2`.
    Pow,
    /// Modulus, `%/2`.
    Mod,
    /// Reciprocal, `1//1`.
    Reciprocal,
    /// Absolute value, `abs/1`.
    Abs,

    // ───────────────────────────── Comparison ───────────────────────────
    /// Equality, `=/2`.
    Eq,
    /// Inequality, `!=/2`.
    Neq,
    /// Greater-than, `>/2`.
    Gt,
    /// Greater-or-equal, `>=/2`.
    Ge,
    /// Less-than, `</2`.
    Lt,
    /// Less-or-equal, `<=/2`.
    Le,

    // ───────────────────────────── Variables ────────────────────────────
    /// Bind a name to scalar zero, `alloc/1`.
    Allocate,
    /// Bind a name to a vector of zeros, `valloc/2`.
    VectorAllocate,
    /// Overwrite an existing binding, `setq/2`.
    SetVar,
    /// Write one element of a vector binding, `setv/3`.
    SetVectorVar,

    // ───────────────────────────── Sequencing ───────────────────────────
    /// Evaluate both arguments, return the second, `prog2/2`.
    Prog2,
    /// Evaluate all arguments, return the third, `prog3/3`.
    Prog3,
    /// Evaluate all arguments, return the fourth, `prog4/4`.
    Prog4,

    // ──────────────────────────── Control flow ──────────────────────────
    /// Two-way branch on a computed boolean, `if/3`.
    If,
    /// Pre-tested loop, `while/2`.
    While,
    /// Counted loop over a variable, `for/4`.
    For,

    // ──────────────────────────── Subroutines ───────────────────────────
    /// Bind a name to an unevaluated body, `defsub/2`.
    DefineSub,
    /// Evaluate a bound body against the caller's environment, `call/1`.
    CallSub,

    // ─────────────────────────────── Misc ───────────────────────────────
    /// Evaluate and emit to the output sink, `print/1`.
    Print,
    /// Do nothing, `nop/0`.
    NoOp,
}

impl OpKind {
    /// Number of argument sub-expressions this kind consumes (0..=4).
    pub fn arity(self) -> usize {
        match self {
            OpKind::NoOp => 0,
            OpKind::Reciprocal | OpKind::Abs | OpKind::Allocate | OpKind::CallSub
            | OpKind::Print => 1,
            OpKind::Add | OpKind::Sub | OpKind::Mul | OpKind::Div | OpKind::Pow | OpKind::Mod
            | OpKind::Eq | OpKind::Neq | OpKind::Gt | OpKind::Ge | OpKind::Lt | OpKind::Le
            | OpKind::VectorAllocate | OpKind::SetVar | OpKind::Prog2 | OpKind::While
            | OpKind::DefineSub => 2,
            OpKind::SetVectorVar | OpKind::Prog3 | OpKind::If => 3,
            OpKind::Prog4 | OpKind::For => 4,
        }
    }

    /// Display symbol used in the prefix rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            OpKind::Add => "+",
            OpKind::Sub => "-",
            OpKind::Mul => "*",
            OpKind::Div => "/",
            OpKind::Pow => "**",
            OpKind::Mod => "%",
            OpKind::Reciprocal => "1/",
            OpKind::Abs => "abs",
            OpKind::Eq => "=",
            OpKind::Neq => "!=",
            OpKind::Gt => ">",
            OpKind::Ge => ">=",
            OpKind::Lt => "<",
            OpKind::Le => "<=",
            OpKind::Allocate => "alloc",
            OpKind::VectorAllocate => "valloc",
            OpKind::SetVar => "setq",
            OpKind::SetVectorVar => "setv",
            OpKind::Prog2 => "prog2",
            OpKind::Prog3 => "prog3",
            OpKind::Prog4 => "prog4",
            OpKind::If => "if",
            OpKind::While => "while",
            OpKind::For => "for",
            OpKind::DefineSub => "defsub",
            OpKind::CallSub => "call",
            OpKind::Print => "print",
            OpKind::NoOp => "nop",
        }
    }
}

/// Expression tree node for the Cinder language.
///
/// Leaves are self-describing; operations carry their kind plus exactly
/// `kind.arity()` ordered argument sub-trees.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric constant leaf.
    Constant(Value),

    /// Boolean literal leaf. Never produced by the builder (the surface
    /// syntax has no boolean tokens) but part of the closed node set.
    Boolean(bool),

    /// Variable reference, unresolved until evaluation.
    Variable(String),

    /// N-ary operation with a fixed kind.
    Operation {
        /// What the operation does; fixes arity and display symbol.
        kind: OpKind,
        /// Ordered argument sub-trees, `args.len() == kind.arity()`.
        args: Vec<Node>,
    },
}

impl Node {
    /// Construct an operation node, upholding the arity invariant.
    pub fn op(kind: OpKind, args: Vec<Node>) -> Node {
        debug_assert_eq!(args.len(), kind.arity(), "arity mismatch for {:?}", kind);
        Node::Operation { kind, args }
    }

    /// Integer constant shorthand.
    pub fn int(n: i64) -> Node {
        Node::Constant(Value::Integer(n))
    }

    /// Variable reference shorthand.
    pub fn var(name: &str) -> Node {
        Node::Variable(name.to_string())
    }

    /// Total number of nodes in this tree, the root included.
    pub fn size(&self) -> usize {
        match self {
            Node::Constant(_) | Node::Boolean(_) | Node::Variable(_) => 1,
            Node::Operation { args, .. } => 1 + args.iter().map(Node::size).sum::<usize>(),
        }
    }
}

impl std::fmt::Display for Node {
    /// Deterministic fully parenthesized prefix rendering.
    ///
    /// Leaves render as their literal or name; operations render as
    /// `(symbol arg1 arg2 ...)`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Constant(v) => write!(f, "{}", v),
            Node::Boolean(b) => write!(f, "{}", b),
            Node::Variable(name) => write!(f, "{}", name),
            Node::Operation { kind, args } => {
                write!(f, "({}", kind.symbol())?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
