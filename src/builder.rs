use crate::build_error::BuildError;
use crate::lang::node::Node;
use crate::lang::value::Value;
use crate::registry::OperatorRegistry;

/// Working stack of the postfix builder.
///
/// A minimal LIFO of tree nodes; it exists only while a token sequence
/// is being reduced to a single root.
#[derive(Debug, Default)]
pub struct TokenStack {
    nodes: Vec<Node>,
}

impl TokenStack {
    pub fn new() -> Self {
        TokenStack { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// `None` is the stack-underflow condition.
    pub fn pop(&mut self) -> Option<Node> {
        self.nodes.pop()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finish the build: exactly one node may remain, the root.
    pub fn into_root(mut self) -> Result<Node, BuildError> {
        if self.nodes.len() != 1 {
            return Err(BuildError::Leftover {
                remaining: self.nodes.len(),
            });
        }
        Ok(self.nodes.remove(0))
    }
}

/// Build an expression tree from a postfix token sequence.
///
/// Single left-to-right pass, shift-reduce over a [`TokenStack`]:
/// a registered operator pops exactly its arity's worth of nodes and
/// pushes the operation node; a token parsing as an integer pushes a
/// constant; anything else pushes a variable reference.
///
/// Argument order follows postfix reduction: the node popped first
/// (the most recently pushed operand) becomes the operation's first
/// argument, so `5 6 -` builds `(- 6 5)` and `x e setq` binds `x`.
///
/// After the pass the stack must hold exactly one node, the root;
/// anything else is a syntax error.
pub fn build<'a, I>(tokens: I, registry: &OperatorRegistry) -> Result<Node, BuildError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stack = TokenStack::new();

    for token in tokens {
        if let Some(kind) = registry.lookup(token) {
            let wanted = kind.arity();
            if stack.len() < wanted {
                return Err(BuildError::StackUnderflow {
                    token: token.to_string(),
                    wanted,
                    found: stack.len(),
                });
            }
            let mut args = Vec::with_capacity(wanted);
            for _ in 0..wanted {
                // Checked above; the stack cannot be empty here.
                if let Some(node) = stack.pop() {
                    args.push(node);
                }
            }
            stack.push(Node::op(kind, args));
        } else if let Ok(n) = token.parse::<i64>() {
            stack.push(Node::Constant(Value::Integer(n)));
        } else {
            stack.push(Node::Variable(token.to_string()));
        }
    }

    stack.into_root()
}

/// Build from a source string by whitespace-splitting it first; the
/// only lexical structure the language has.
pub fn build_program(source: &str, registry: &OperatorRegistry) -> Result<Node, BuildError> {
    build(source.split_whitespace(), registry)
}
