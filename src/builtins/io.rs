//! I/O primitives: apply, ports, read, write, and whole-file helpers.
//!
//! All of these can have externally observable effects, so each is
//! registered as an `IOFunc` rather than a `PrimitiveFunc` — purely a
//! documentation distinction in this interpreter, since both variants share
//! the same `PrimitiveFn` signature and dispatch identically in `eval`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval;
use crate::parser;
use crate::value::{PortState, Value};
use std::cell::RefCell;
use std::fs::File;
use std::io::{Read, Write as _};
use std::rc::Rc;

/// `(apply func args-list)` — calls `func` with the elements of
/// `args-list` as its argument list.
pub fn apply(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    let call_args = match &args[1] {
        Value::List(items) => items.clone(),
        other => return Err(EvalError::type_mismatch("list", other)),
    };
    eval::apply_function(&args[0], call_args)
}

pub fn open_input_file(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    let path = match &args[0] {
        Value::String(s) => s,
        other => return Err(EvalError::type_mismatch("string", other)),
    };
    let contents = std::fs::read_to_string(path)
        .map_err(|e| EvalError::Default(format!("Could not open {}: {}", path, e)))?;
    Ok(Value::input_port(contents))
}

pub fn open_output_file(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    let path = match &args[0] {
        Value::String(s) => s,
        other => return Err(EvalError::type_mismatch("string", other)),
    };
    let file = File::create(path)
        .map_err(|e| EvalError::Default(format!("Could not open {}: {}", path, e)))?;
    Ok(Value::output_port(file))
}

fn as_port(v: &Value) -> Result<&Rc<RefCell<PortState>>, EvalError> {
    match v {
        Value::Port(p) => Ok(p),
        other => Err(EvalError::type_mismatch("port", other)),
    }
}

pub fn close_input_port(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    let port = as_port(&args[0])?;
    *port.borrow_mut() = PortState::Closed;
    Ok(Value::Bool(true))
}

pub fn close_output_port(args: &[Value]) -> Result<Value, EvalError> {
    close_input_port(args)
}

/// `(read [port])` — reads the next expression from `port` (default
/// stdin), advancing its read cursor.
pub fn read(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() > 1 {
        return Err(EvalError::num_args("0 or 1", args));
    }
    let port = match args.first() {
        Some(v) => as_port(v)?.clone(),
        None => match Value::stdin_port() {
            Value::Port(p) => p,
            _ => unreachable!(),
        },
    };

    let mut state = port.borrow_mut();
    match &mut *state {
        PortState::Input { contents, cursor } => {
            let (value, rest) = parser::read_one_with_rest(&contents[*cursor..])?;
            *cursor = contents.len() - rest.len();
            Ok(value)
        }
        PortState::Stdin => {
            let mut line = String::new();
            std::io::stdin()
                .read_line(&mut line)
                .map_err(|e| EvalError::Default(e.to_string()))?;
            parser::read_one(line.trim())
        }
        PortState::Closed => Err(EvalError::Default("read from closed port".to_string())),
        _ => Err(EvalError::type_mismatch("input port", &args[0])),
    }
}

/// `(write obj [port])` — writes `obj`'s printed form to `port` (default
/// stdout).
pub fn write(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() || args.len() > 2 {
        return Err(EvalError::num_args("1 or 2", args));
    }
    let text = args[0].to_string();

    match args.get(1) {
        Some(v) => {
            let port = as_port(v)?.clone();
            let mut state = port.borrow_mut();
            match &mut *state {
                PortState::Output(file) => {
                    file.write_all(text.as_bytes())
                        .map_err(|e| EvalError::Default(e.to_string()))?;
                }
                PortState::Stdout => print!("{}", text),
                PortState::Closed => {
                    return Err(EvalError::Default("write to closed port".to_string()))
                }
                _ => return Err(EvalError::type_mismatch("output port", v)),
            }
        }
        None => print!("{}", text),
    }
    Ok(Value::Bool(true))
}

/// `(read-contents path)` — the whole file as a single string.
pub fn read_contents(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    let path = match &args[0] {
        Value::String(s) => s,
        other => return Err(EvalError::type_mismatch("string", other)),
    };
    let mut contents = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut contents))
        .map_err(|e| EvalError::Default(format!("Could not read {}: {}", path, e)))?;
    Ok(Value::String(contents))
}

/// `(read-all path)` — every expression in the file, as a list.
pub fn read_all(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    let path = match &args[0] {
        Value::String(s) => s,
        other => return Err(EvalError::type_mismatch("string", other)),
    };
    let contents = std::fs::read_to_string(path)
        .map_err(|e| EvalError::Default(format!("Could not read {}: {}", path, e)))?;
    Ok(Value::List(parser::read_all(&contents)?))
}

pub fn register(env: &Rc<Environment>) {
    env.define("apply".to_string(), Value::IOFunc("apply", apply));
    env.define(
        "open-input-file".to_string(),
        Value::IOFunc("open-input-file", open_input_file),
    );
    env.define(
        "open-output-file".to_string(),
        Value::IOFunc("open-output-file", open_output_file),
    );
    env.define(
        "close-input-port".to_string(),
        Value::IOFunc("close-input-port", close_input_port),
    );
    env.define(
        "close-output-port".to_string(),
        Value::IOFunc("close-output-port", close_output_port),
    );
    env.define("read".to_string(), Value::IOFunc("read", read));
    env.define("write".to_string(), Value::IOFunc("write", write));
    env.define(
        "read-contents".to_string(),
        Value::IOFunc("read-contents", read_contents),
    );
    env.define("read-all".to_string(), Value::IOFunc("read-all", read_all));
}
