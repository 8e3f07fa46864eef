use cinder::{
    Environment, EvalError, Evaluator, OperatorRegistry, Value, build_program,
};
use pretty_assertions::assert_eq;

/// Build and run a program against a fresh environment, capturing
/// whatever `print` emits.
fn run(source: &str) -> (Value, Environment, String) {
    run_in(source, Environment::new())
}

fn run_in(source: &str, mut env: Environment) -> (Value, Environment, String) {
    let registry = OperatorRegistry::standard();
    let root = build_program(source, &registry).expect("program builds");
    let mut evaluator = Evaluator::with_output(Vec::new());
    let value = evaluator.eval(&root, &mut env).expect("program runs");
    let output = String::from_utf8(evaluator.into_output()).expect("utf-8 output");
    (value, env, output)
}

#[test]
fn reference_expression_evaluates_and_renders() {
    let registry = OperatorRegistry::standard();
    let root = build_program("2 3 + x * 6 5 - / abs 2 ** y 1/ + 1/", &registry)
        .expect("program builds");
    assert_eq!(
        root.to_string(),
        "(1/ (+ (1/ y) (** 2 (abs (/ (- 5 6) (* x (+ 3 2)))))))"
    );

    let mut env = Environment::new();
    env.define_scalar("x", Value::Integer(3));
    env.define_scalar("y", Value::Integer(7));

    let value = Evaluator::with_output(Vec::new())
        .eval(&root, &mut env)
        .expect("program runs");
    match value {
        Value::Float(n) => assert!((n - 0.84022932953024).abs() < 1e-12, "got {}", n),
        other => panic!("expected a float, got {:?}", other),
    }
}

#[test]
fn while_loop_counts_to_ten() {
    let (_, env, _) = run("x 1 + x setq x 10 > while x alloc prog2");
    assert_eq!(env.scalar("x"), Some(&Value::Integer(10)));
}

#[test]
fn for_loop_fills_a_vector_with_squares() {
    let (_, env, output) = run("v print i i * i v setv prog2 10 0 i for 10 v valloc prog2");

    let expected: Vec<Value> = (0..10).map(|i| Value::Integer(i * i)).collect();
    assert_eq!(env.vector("v"), Some(&expected[..]));

    // The vector is printed once per iteration; the last line shows the
    // finished squares.
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "[0, 0, 0, 0, 0, 0, 0, 0, 0, 0]");
    assert_eq!(lines[9], "[0, 1, 4, 9, 16, 25, 36, 49, 64, 81]");
}

#[test]
fn subroutine_mutates_caller_variables() {
    let (_, env, output) = run("x print f call x alloc x 4 + x setq f defsub prog4");
    assert_eq!(env.scalar("x"), Some(&Value::Integer(4)));
    assert_eq!(output, "4\n");
}

#[test]
fn stored_subroutine_body_survives_repeated_calls() {
    // Call the subroutine five times; the stored body must read back
    // identically afterwards.
    let (_, env, _) = run(
        "f call f call f call f call prog4 f call x alloc x 1 + x setq f defsub prog4",
    );
    assert_eq!(env.scalar("x"), Some(&Value::Integer(5)));
    match env.get("f") {
        Some(cinder::Binding::Subroutine(body)) => {
            assert_eq!(body.to_string(), "(setq x (+ 1 x))");
        }
        other => panic!("expected a subroutine binding, got {:?}", other),
    }
}

#[test]
fn loop_bodies_are_not_mutated_by_execution() {
    let registry = OperatorRegistry::standard();
    let root = build_program("x 1 + x setq x 10 > while x alloc prog2", &registry)
        .expect("program builds");
    let before = root.to_string();

    let mut env = Environment::new();
    Evaluator::with_output(Vec::new())
        .eval(&root, &mut env)
        .expect("program runs");

    assert_eq!(root.to_string(), before);
    assert_eq!(env.scalar("x"), Some(&Value::Integer(10)));
}

#[test]
fn divisors_program_prints_each_divisor() {
    let (_, env, output) =
        run("nop i print i x % 0 = if 1000 2 i for 783 x setq x alloc prog3");
    assert_eq!(env.scalar("x"), Some(&Value::Integer(783)));
    let divisors: Vec<&str> = output.lines().collect();
    assert_eq!(divisors, ["3", "9", "27", "29", "87", "261", "783"]);
}

#[test]
fn nested_loops_and_subroutine_free_primes() {
    let source = "nop x print prime if nop 0 0 != prime setq i x % 0 = if 1 x - 2 i for \
                  0 0 = prime setq prime alloc prog4 100 2 x for";
    let (value, _, output) = run(source);
    assert_eq!(value, Value::Nil);

    let primes: Vec<&str> = output.lines().collect();
    assert_eq!(
        primes,
        [
            "2", "3", "5", "7", "11", "13", "17", "19", "23", "29", "31", "37", "41", "43",
            "47", "53", "59", "61", "67", "71", "73", "79", "83", "89", "97"
        ]
    );
}

#[test]
fn division_by_zero_is_reported_not_crashed() {
    let registry = OperatorRegistry::standard();
    let root = build_program("0 1 /", &registry).expect("program builds");
    let mut env = Environment::new();
    let err = Evaluator::with_output(Vec::new())
        .eval(&root, &mut env)
        .unwrap_err();
    assert_eq!(err, EvalError::DivisionByZero);
}

#[test]
fn calling_an_undefined_subroutine_is_missing_variable() {
    let registry = OperatorRegistry::standard();
    let root = build_program("f call", &registry).expect("program builds");
    let mut env = Environment::new();
    let err = Evaluator::with_output(Vec::new())
        .eval(&root, &mut env)
        .unwrap_err();
    assert_eq!(err, EvalError::MissingVariable("f".to_string()));
}

#[test]
fn allocating_a_non_variable_is_a_type_error() {
    let registry = OperatorRegistry::standard();
    let root = build_program("1 2 + alloc", &registry).expect("program builds");
    let mut env = Environment::new();
    let err = Evaluator::with_output(Vec::new())
        .eval(&root, &mut env)
        .unwrap_err();
    assert_eq!(
        err,
        EvalError::ExpectedVariable {
            op: "alloc",
            got: "(+ 2 1)".to_string()
        }
    );
}

#[test]
fn for_loop_reuses_an_existing_binding() {
    // `i` is bound before the loop; the loop resets it to `start` and
    // leaves it at `end` afterwards.
    let mut env = Environment::new();
    env.define_scalar("i", Value::Integer(99));
    let (_, env, _) = run_in("nop 5 2 i for", env);
    assert_eq!(env.scalar("i"), Some(&Value::Integer(5)));
}

#[test]
fn final_environment_is_returned_for_inspection() {
    let (value, env, _) = run("3 x setq x alloc prog2");
    assert_eq!(value, Value::Nil);
    assert_eq!(env.len(), 1);
    assert_eq!(env.scalar("x"), Some(&Value::Integer(3)));
}
