//! # Cinder Expression Trees
//!
//! This module defines the expression tree for the Cinder language.
//! Trees are produced by the postfix builder and consumed by the
//! evaluator; every node renders itself as a parenthesized prefix form.
//!
//! ## Documentation conventions
//!
//! - Operator arities are written as `op/N`.
//! - Surface tokens are the whitespace-separated words of a program.

pub mod node;
pub mod value;
