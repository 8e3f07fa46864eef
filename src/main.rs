use std::{env, fs, path::Path, process};

use cinder::{Environment, Evaluator, OperatorRegistry, Value, build_program};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let show_ast = args.iter().any(|a| a == "--ast");
    let dump_env = args.iter().any(|a| a == "--env");

    let source = if let Some(pos) = args.iter().position(|a| a == "-e") {
        match args.get(pos + 1) {
            Some(program) => program.clone(),
            None => {
                eprintln!("-e requires a program argument");
                process::exit(1);
            }
        }
    } else if let Some(filename) = args.iter().find(|a| !a.starts_with('-')) {
        ensure_extension(filename);
        match fs::read_to_string(filename) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Failed to read '{}': {}", filename, e);
                process::exit(1);
            }
        }
    } else {
        print_usage();
        return;
    };

    run_program(&source, show_ast, dump_env);
}

fn ensure_extension(filename: &str) {
    let path = Path::new(filename);
    if path.extension().and_then(|e| e.to_str()) != Some("cn") {
        eprintln!("Error: expected a .cn file, got {}", filename);
        process::exit(1);
    }
}

fn print_usage() {
    println!("CINDER - Postfix Expression Language");
    println!();
    println!("Usage:");
    println!("  cinder <file.cn>          Run a program");
    println!("  cinder -e '<program>'     Run an inline program");
    println!("  cinder --ast <file.cn>    Print the expression tree without running");
    println!("  cinder --env <file.cn>    Dump the environment after running");
}

fn run_program(source: &str, show_ast: bool, dump_env: bool) {
    let registry = OperatorRegistry::standard();

    let root = match build_program(source, &registry) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Syntax error: {}", e);
            process::exit(1);
        }
    };

    if show_ast {
        println!("{}", root);
        return;
    }

    let mut env = Environment::new();
    let mut evaluator = Evaluator::new();

    match evaluator.eval(&root, &mut env) {
        Ok(Value::Nil) => {}
        Ok(value) => println!("{}", value),
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            process::exit(1);
        }
    }

    if dump_env {
        let mut bindings: Vec<_> = env.iter().collect();
        bindings.sort_by_key(|(name, _)| *name);
        for (name, binding) in bindings {
            println!("{} = {}", name, binding);
        }
    }
}
