//! Numeric comparisons: =, <, >, >=, <=
//!
//! Each takes exactly two `Number` arguments and returns a `Bool`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn as_pair(args: &[Value]) -> Result<(i64, i64), EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    let a = match &args[0] {
        Value::Number(n) => *n,
        other => return Err(EvalError::type_mismatch("number", other)),
    };
    let b = match &args[1] {
        Value::Number(n) => *n,
        other => return Err(EvalError::type_mismatch("number", other)),
    };
    Ok((a, b))
}

pub fn eq(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = as_pair(args)?;
    Ok(Value::Bool(a == b))
}

pub fn lt(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = as_pair(args)?;
    Ok(Value::Bool(a < b))
}

pub fn gt(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = as_pair(args)?;
    Ok(Value::Bool(a > b))
}

pub fn ge(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = as_pair(args)?;
    Ok(Value::Bool(a >= b))
}

pub fn le(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = as_pair(args)?;
    Ok(Value::Bool(a <= b))
}

pub fn register(env: &Rc<Environment>) {
    env.define("=".to_string(), Value::PrimitiveFunc("=", eq));
    env.define("<".to_string(), Value::PrimitiveFunc("<", lt));
    env.define(">".to_string(), Value::PrimitiveFunc(">", gt));
    env.define(">=".to_string(), Value::PrimitiveFunc(">=", ge));
    env.define("<=".to_string(), Value::PrimitiveFunc("<=", le));
}
