use std::collections::HashMap;

use crate::lang::node::OpKind;

/// Mapping from surface token to operation kind.
///
/// The builder depends only on this lookup, never on a fixed token
/// list: extending the language means registering more entries, not
/// touching the builder or evaluator. Arity and display symbol follow
/// from the kind itself.
#[derive(Debug, Clone, Default)]
pub struct OperatorRegistry {
    ops: HashMap<String, OpKind>,
}

impl OperatorRegistry {
    /// An empty registry. Programs built against it can only contain
    /// constants and variables.
    pub fn new() -> Self {
        OperatorRegistry { ops: HashMap::new() }
    }

    /// Register `token` as the spelling of `kind`, replacing any
    /// previous entry for that token.
    pub fn register(&mut self, token: &str, kind: OpKind) {
        self.ops.insert(token.to_string(), kind);
    }

    /// Look a token up; `None` means the token is a literal or a
    /// variable name.
    pub fn lookup(&self, token: &str) -> Option<OpKind> {
        self.ops.get(token).copied()
    }

    /// The standard Cinder operator set.
    pub fn standard() -> Self {
        let mut registry = OperatorRegistry::new();
        for (token, kind) in [
            ("+", OpKind::Add),
            ("-", OpKind::Sub),
            ("*", OpKind::Mul),
            ("/", OpKind::Div),
            ("**", OpKind::Pow),
            ("%", OpKind::Mod),
            ("1/", OpKind::Reciprocal),
            ("abs", OpKind::Abs),
            ("=", OpKind::Eq),
            ("!=", OpKind::Neq),
            (">", OpKind::Gt),
            (">=", OpKind::Ge),
            ("<", OpKind::Lt),
            ("<=", OpKind::Le),
            ("alloc", OpKind::Allocate),
            ("valloc", OpKind::VectorAllocate),
            ("setq", OpKind::SetVar),
            ("setv", OpKind::SetVectorVar),
            ("prog2", OpKind::Prog2),
            ("prog3", OpKind::Prog3),
            ("prog4", OpKind::Prog4),
            ("if", OpKind::If),
            ("while", OpKind::While),
            ("for", OpKind::For),
            ("defsub", OpKind::DefineSub),
            ("call", OpKind::CallSub),
            ("print", OpKind::Print),
            ("nop", OpKind::NoOp),
        ] {
            registry.register(token, kind);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_is_complete() {
        let registry = OperatorRegistry::standard();
        for token in [
            "+", "-", "*", "/", "**", "%", "1/", "abs", "=", "!=", ">", ">=", "<", "<=",
            "alloc", "valloc", "setq", "setv", "prog2", "prog3", "prog4", "if", "while",
            "for", "defsub", "call", "print", "nop",
        ] {
            assert!(registry.lookup(token).is_some(), "missing operator `{}`", token);
        }
    }

    #[test]
    fn unknown_tokens_are_not_operators() {
        let registry = OperatorRegistry::standard();
        assert_eq!(registry.lookup("x"), None);
        assert_eq!(registry.lookup("42"), None);
    }

    #[test]
    fn register_overrides() {
        let mut registry = OperatorRegistry::new();
        registry.register("plus", OpKind::Add);
        assert_eq!(registry.lookup("plus"), Some(OpKind::Add));
        registry.register("plus", OpKind::Sub);
        assert_eq!(registry.lookup("plus"), Some(OpKind::Sub));
    }
}
