mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod parser;
mod value;

use clap::Parser;
use env::Environment;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::process::ExitCode;
use std::rc::Rc;
use value::Value;

/// A small Scheme-flavored Lisp interpreter.
#[derive(Parser, Debug)]
#[command(name = "lispy-sandbox")]
#[command(version = config::VERSION)]
#[command(about = "A Scheme-flavored Lisp interpreter with a REPL and script runner")]
struct CliArgs {
    /// Script file to run. Starts the REPL if omitted.
    script: Option<String>,

    /// Extra arguments bound to `args` in the script's top-level environment.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    script_args: Vec<String>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let env = Environment::new();
    builtins::register_builtins(&env);

    match args.script {
        Some(path) => run_script(&path, &args.script_args, &env),
        None => {
            run_repl(&env);
            ExitCode::SUCCESS
        }
    }
}

/// Runs `path` as if by `(load path)`, with `args.script_args` bound to
/// `args` in the root environment first.
fn run_script(path: &str, script_args: &[String], env: &Rc<Environment>) -> ExitCode {
    let args_list = Value::List(
        script_args
            .iter()
            .map(|s| Value::String(s.clone()))
            .collect(),
    );
    env.define("args".to_string(), args_list);

    let load_call = Value::List(vec![
        Value::Atom("load".to_string()),
        Value::String(path.to_string()),
    ]);

    match eval::eval(&load_call, env) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_repl(env: &Rc<Environment>) {
    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_SUBTITLE);

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize REPL: {}", e);
            return;
        }
    };

    let history_file = ".lisp_history";
    let _ = rl.load_history(history_file);

    loop {
        match rl.readline(config::REPL_PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if trimmed == config::QUIT_TOKEN {
                    break;
                }

                match parser::read_one(trimmed) {
                    Ok(expr) => match eval::eval(&expr, env) {
                        Ok(value) => println!("{}", value),
                        Err(e) => eprintln!("Error: {}", e),
                    },
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
}
