//! Arithmetic operations: +, -, *, /, mod, quotient, remainder
//!
//! All are n-ary (at least two arguments) and fold left-to-right over
//! `Number` operands. `/`, `mod`, `quotient` and `remainder` raise a
//! `Default` error on division by zero rather than panicking.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn as_number(v: &Value) -> Result<i64, EvalError> {
    match v {
        Value::Number(n) => Ok(*n),
        other => Err(EvalError::type_mismatch("number", other)),
    }
}

fn fold(name: &'static str, args: &[Value], f: impl Fn(i64, i64) -> i64) -> Result<Value, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::num_args(format!("{} >= 2", name), args));
    }
    let mut acc = as_number(&args[0])?;
    for arg in &args[1..] {
        acc = f(acc, as_number(arg)?);
    }
    Ok(Value::Number(acc))
}

pub fn add(args: &[Value]) -> Result<Value, EvalError> {
    fold("+", args, |a, b| a + b)
}

pub fn sub(args: &[Value]) -> Result<Value, EvalError> {
    fold("-", args, |a, b| a - b)
}

pub fn mul(args: &[Value]) -> Result<Value, EvalError> {
    fold("*", args, |a, b| a * b)
}

pub fn div(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::num_args("at least 2", args));
    }
    let mut acc = as_number(&args[0])?;
    for arg in &args[1..] {
        let n = as_number(arg)?;
        if n == 0 {
            return Err(EvalError::Default("Division by zero".to_string()));
        }
        acc /= n;
    }
    Ok(Value::Number(acc))
}

pub fn modulo(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    let a = as_number(&args[0])?;
    let b = as_number(&args[1])?;
    if b == 0 {
        return Err(EvalError::Default("Division by zero".to_string()));
    }
    let r = a % b;
    let r = if r != 0 && (r < 0) != (b < 0) { r + b } else { r };
    Ok(Value::Number(r))
}

pub fn quotient(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    let a = as_number(&args[0])?;
    let b = as_number(&args[1])?;
    if b == 0 {
        return Err(EvalError::Default("Division by zero".to_string()));
    }
    Ok(Value::Number(a / b))
}

pub fn remainder(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    let a = as_number(&args[0])?;
    let b = as_number(&args[1])?;
    if b == 0 {
        return Err(EvalError::Default("Division by zero".to_string()));
    }
    Ok(Value::Number(a % b))
}

pub fn register(env: &Rc<Environment>) {
    env.define("+".to_string(), Value::PrimitiveFunc("+", add));
    env.define("-".to_string(), Value::PrimitiveFunc("-", sub));
    env.define("*".to_string(), Value::PrimitiveFunc("*", mul));
    env.define("/".to_string(), Value::PrimitiveFunc("/", div));
    env.define("mod".to_string(), Value::PrimitiveFunc("mod", modulo));
    env.define("quotient".to_string(), Value::PrimitiveFunc("quotient", quotient));
    env.define(
        "remainder".to_string(),
        Value::PrimitiveFunc("remainder", remainder),
    );
}
