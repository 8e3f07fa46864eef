use std::io::{self, Write};

use crate::env::{Binding, Environment};
use crate::eval_error::EvalError;
use crate::lang::node::{Node, OpKind};
use crate::lang::value::Value;

/// Safety limits for one evaluation session.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Maximum `call` nesting depth.
    pub max_call_depth: usize,
    /// Maximum number of evaluated nodes, `None` for unbounded.
    pub max_steps: Option<usize>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_call_depth: 1000,
            max_steps: None,
        }
    }
}

/// Evaluated scalar operand.
#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(n) => n,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(n) => Value::Integer(n),
            Num::Float(n) => Value::Float(n),
        }
    }
}

/// Combine two numeric operands, keeping integers integral when the
/// result allows it (the scheme the arithmetic words share).
fn combine(a: Num, b: Num, op: impl Fn(f64, f64) -> f64) -> Value {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => {
            let r = op(x as f64, y as f64);
            if r.fract() == 0.0 && r >= i64::MIN as f64 && r <= i64::MAX as f64 {
                Value::Integer(r as i64)
            } else {
                Value::Float(r)
            }
        }
        (a, b) => Value::Float(op(a.as_f64(), b.as_f64())),
    }
}

/// Tree-walking evaluator.
///
/// Evaluation never mutates the tree: loop and subroutine bodies are
/// re-evaluated from the stored nodes, so a definition rendered before
/// and after any number of iterations reads back identically. `W` is
/// the sink `print` writes to.
pub struct Evaluator<W: Write> {
    out: W,
    config: EvalConfig,
    call_depth: usize,
    steps: usize,
}

impl Evaluator<io::Stdout> {
    /// Evaluator printing to standard output.
    pub fn new() -> Self {
        Evaluator::with_output(io::stdout())
    }
}

impl Default for Evaluator<io::Stdout> {
    fn default() -> Self {
        Evaluator::new()
    }
}

impl<W: Write> Evaluator<W> {
    pub fn with_output(out: W) -> Self {
        Evaluator::with_config(out, EvalConfig::default())
    }

    pub fn with_config(out: W, config: EvalConfig) -> Self {
        Evaluator {
            out,
            config,
            call_depth: 0,
            steps: 0,
        }
    }

    /// Recover the print sink, e.g. to inspect captured output.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Evaluate `node` against `env`.
    ///
    /// Expressions yield scalars or booleans; effect-only operations
    /// (allocation, assignment, loops, `print`, `nop`) yield
    /// [`Value::Nil`]. All mutations go through `env` and persist even
    /// when a later step fails.
    pub fn eval(&mut self, node: &Node, env: &mut Environment) -> Result<Value, EvalError> {
        self.count_step()?;

        match node {
            Node::Constant(v) => Ok(v.clone()),
            Node::Boolean(b) => Ok(Value::Bool(*b)),
            Node::Variable(name) => match env.get(name) {
                Some(Binding::Scalar(v)) => Ok(v.clone()),
                Some(Binding::Vector(items)) => Ok(Value::Vector(items.clone())),
                Some(Binding::Subroutine(_)) => Err(EvalError::SubroutineRead(name.clone())),
                None => Err(EvalError::MissingVariable(name.clone())),
            },
            Node::Operation { kind, args } => self.eval_op(*kind, args, env),
        }
    }

    fn eval_op(
        &mut self,
        kind: OpKind,
        args: &[Node],
        env: &mut Environment,
    ) -> Result<Value, EvalError> {
        match kind {
            // Arithmetic
            OpKind::Add => self.arith(args, env, |a, b| a + b),
            OpKind::Sub => self.arith(args, env, |a, b| a - b),
            OpKind::Mul => self.arith(args, env, |a, b| a * b),
            OpKind::Pow => self.arith(args, env, f64::powf),
            OpKind::Div => {
                let a = self.eval_number(&args[0], env)?;
                let b = self.eval_number(&args[1], env)?;
                if b.as_f64() == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(Value::Float(a.as_f64() / b.as_f64()))
            }
            OpKind::Mod => {
                let a = self.eval_number(&args[0], env)?;
                let b = self.eval_number(&args[1], env)?;
                if b.as_f64() == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(match (a, b) {
                    (Num::Int(x), Num::Int(y)) => Value::Integer(x.rem_euclid(y)),
                    (a, b) => Value::Float(a.as_f64().rem_euclid(b.as_f64())),
                })
            }
            OpKind::Reciprocal => {
                let x = self.eval_number(&args[0], env)?;
                if x.as_f64() == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(Value::Float(1.0 / x.as_f64()))
            }
            OpKind::Abs => Ok(match self.eval_number(&args[0], env)? {
                Num::Int(n) => Value::Integer(n.abs()),
                Num::Float(n) => Value::Float(n.abs()),
            }),

            // Comparison
            OpKind::Eq => self.equality(args, env, false),
            OpKind::Neq => self.equality(args, env, true),
            OpKind::Gt => self.compare(args, env, |a, b| a > b),
            OpKind::Ge => self.compare(args, env, |a, b| a >= b),
            OpKind::Lt => self.compare(args, env, |a, b| a < b),
            OpKind::Le => self.compare(args, env, |a, b| a <= b),

            // Variables
            OpKind::Allocate => {
                let name = variable_name(kind, &args[0])?;
                env.define_scalar(name, Value::Integer(0));
                Ok(Value::Nil)
            }
            OpKind::VectorAllocate => {
                let name = variable_name(kind, &args[0])?.to_string();
                let len = self.eval_int(&args[1], env)?;
                let len = usize::try_from(len).map_err(|_| EvalError::NegativeLength(len))?;
                env.define_vector(&name, len);
                Ok(Value::Nil)
            }
            OpKind::SetVar => {
                let name = variable_name(kind, &args[0])?.to_string();
                let value = self.eval(&args[1], env)?;
                env.assign(&name, value)?;
                Ok(Value::Nil)
            }
            OpKind::SetVectorVar => {
                let name = variable_name(kind, &args[0])?.to_string();
                let index = self.eval_int(&args[1], env)?;
                let value = self.eval(&args[2], env)?;
                let items = env.vector_mut(&name)?;
                let len = items.len();
                let slot = usize::try_from(index)
                    .ok()
                    .and_then(|i| items.get_mut(i))
                    .ok_or(EvalError::IndexOutOfRange { index, len })?;
                *slot = value;
                Ok(Value::Nil)
            }

            // Sequencing
            OpKind::Prog2 | OpKind::Prog3 | OpKind::Prog4 => {
                let (last, effects) = match args.split_last() {
                    Some(split) => split,
                    None => return Ok(Value::Nil),
                };
                for arg in effects {
                    self.eval(arg, env)?;
                }
                self.eval(last, env)
            }

            // Control flow
            OpKind::If => {
                if matches!(args[0], Node::Boolean(_)) {
                    return Err(EvalError::LiteralCondition);
                }
                if self.condition(&args[0], env)? {
                    self.eval(&args[1], env)
                } else {
                    self.eval(&args[2], env)
                }
            }
            OpKind::While => {
                while self.condition(&args[0], env)? {
                    self.eval(&args[1], env)?;
                }
                Ok(Value::Nil)
            }
            OpKind::For => self.eval_for(args, env),

            // Subroutines
            OpKind::DefineSub => {
                let name = variable_name(kind, &args[0])?;
                env.define_subroutine(name, args[1].clone());
                Ok(Value::Nil)
            }
            OpKind::CallSub => {
                let name = variable_name(kind, &args[0])?;
                let body = match env.get(name) {
                    Some(Binding::Subroutine(body)) => body.clone(),
                    Some(_) => return Err(EvalError::NotASubroutine(name.to_string())),
                    None => return Err(EvalError::MissingVariable(name.to_string())),
                };
                if self.call_depth >= self.config.max_call_depth {
                    return Err(EvalError::CallDepthExceeded(self.config.max_call_depth));
                }
                self.call_depth += 1;
                let result = self.eval(&body, env);
                self.call_depth -= 1;
                result
            }

            // Misc
            OpKind::Print => {
                let value = self.eval(&args[0], env)?;
                writeln!(self.out, "{}", value)
                    .map_err(|e| EvalError::Output(e.to_string()))?;
                Ok(Value::Nil)
            }
            OpKind::NoOp => Ok(Value::Nil),
        }
    }

    /// Counted loop: bind the variable if needed, set it to `start`,
    /// then run the body while `var < end`, incrementing by one. The
    /// condition and increment are desugared into ordinary nodes and
    /// re-evaluated each iteration.
    fn eval_for(&mut self, args: &[Node], env: &mut Environment) -> Result<Value, EvalError> {
        let name = variable_name(OpKind::For, &args[0])?.to_string();
        let start = self.eval_number(&args[1], env)?;
        let end = self.eval_number(&args[2], env)?;

        if !env.contains(&name) {
            env.define_scalar(&name, Value::Integer(0));
        }
        env.assign(&name, start.into_value())?;

        let cond = Node::op(
            OpKind::Lt,
            vec![Node::var(&name), Node::Constant(end.into_value())],
        );
        let step = Node::op(
            OpKind::SetVar,
            vec![
                Node::var(&name),
                Node::op(OpKind::Add, vec![Node::var(&name), Node::int(1)]),
            ],
        );

        while self.condition(&cond, env)? {
            self.eval(&args[3], env)?;
            self.eval(&step, env)?;
        }
        Ok(Value::Nil)
    }

    fn arith(
        &mut self,
        args: &[Node],
        env: &mut Environment,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<Value, EvalError> {
        let a = self.eval_number(&args[0], env)?;
        let b = self.eval_number(&args[1], env)?;
        Ok(combine(a, b, op))
    }

    fn compare(
        &mut self,
        args: &[Node],
        env: &mut Environment,
        op: impl Fn(f64, f64) -> bool,
    ) -> Result<Value, EvalError> {
        let a = self.eval_number(&args[0], env)?;
        let b = self.eval_number(&args[1], env)?;
        Ok(Value::Bool(op(a.as_f64(), b.as_f64())))
    }

    /// `=` and `!=` also compare booleans; everything else is numeric.
    fn equality(
        &mut self,
        args: &[Node],
        env: &mut Environment,
        negate: bool,
    ) -> Result<Value, EvalError> {
        let a = self.eval(&args[0], env)?;
        let b = self.eval(&args[1], env)?;
        let equal = match (&a, &b) {
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (x, y) if x.is_number() && y.is_number() => {
                number_of(x)?.as_f64() == number_of(y)?.as_f64()
            }
            _ => return Err(EvalError::Incomparable(a.type_name(), b.type_name())),
        };
        Ok(Value::Bool(equal ^ negate))
    }

    /// Evaluate a condition sub-expression; anything but a boolean
    /// result is a type error.
    fn condition(&mut self, node: &Node, env: &mut Environment) -> Result<bool, EvalError> {
        match self.eval(node, env)? {
            Value::Bool(b) => Ok(b),
            other => Err(EvalError::ConditionNotBoolean(other.type_name())),
        }
    }

    fn eval_number(&mut self, node: &Node, env: &mut Environment) -> Result<Num, EvalError> {
        number_of(&self.eval(node, env)?)
    }

    fn eval_int(&mut self, node: &Node, env: &mut Environment) -> Result<i64, EvalError> {
        match self.eval_number(node, env)? {
            Num::Int(n) => Ok(n),
            Num::Float(_) => Err(EvalError::ExpectedInteger("float")),
        }
    }

    fn count_step(&mut self) -> Result<(), EvalError> {
        self.steps += 1;
        if let Some(max) = self.config.max_steps {
            if self.steps > max {
                return Err(EvalError::StepLimitExceeded(max));
            }
        }
        Ok(())
    }
}

fn number_of(value: &Value) -> Result<Num, EvalError> {
    match value {
        Value::Integer(n) => Ok(Num::Int(*n)),
        Value::Float(n) => Ok(Num::Float(*n)),
        other => Err(EvalError::ExpectedNumber(other.type_name())),
    }
}

/// Operators that act on a variable by name require a bare variable
/// node, checked by kind, never by evaluating it.
fn variable_name(kind: OpKind, node: &Node) -> Result<&str, EvalError> {
    match node {
        Node::Variable(name) => Ok(name),
        other => Err(EvalError::ExpectedVariable {
            op: kind.symbol(),
            got: other.to_string(),
        }),
    }
}
