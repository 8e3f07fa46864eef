//! # Cinder
//!
//! A tree-walking interpreter for a small postfix (Reverse-Polish)
//! stack-based language: arithmetic, comparisons, mutable scalar and
//! vector variables, `if`/`while`/`for` control flow and named
//! subroutines with dynamic scoping.
//!
//! Pipeline: whitespace-split tokens plus an [`OperatorRegistry`] go
//! through [`builder::build`] to a single root [`Node`]; the
//! [`Evaluator`] walks that tree against a mutable [`Environment`] and
//! yields the final [`Value`]. Evaluation never mutates the tree, so
//! loop and subroutine bodies can be re-run from the stored nodes.
//!
//! ```
//! use cinder::{Environment, Evaluator, OperatorRegistry, Value, build_program};
//!
//! let registry = OperatorRegistry::standard();
//! let root = build_program("x 1 + x setq x 10 > while x alloc prog2", &registry)?;
//! let mut env = Environment::new();
//! Evaluator::new().eval(&root, &mut env)?;
//! assert_eq!(env.scalar("x"), Some(&Value::Integer(10)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod build_error;
pub mod builder;
pub mod env;
pub mod eval;
pub mod eval_error;
pub mod lang;
pub mod registry;

pub use build_error::BuildError;
pub use builder::{TokenStack, build, build_program};
pub use env::{Binding, Environment};
pub use eval::{EvalConfig, Evaluator};
pub use eval_error::EvalError;
pub use lang::node::{Node, OpKind};
pub use registry::OperatorRegistry;
pub use lang::value::Value;
