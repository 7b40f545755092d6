//! Type predicates: number?, list?, symbol?, string?, boolean?
//!
//! `symbol?` unwraps one level of a literal `(quote X)` shape before
//! testing, since the reader represents a quoted atom that way rather than
//! with a distinct tag.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn is_symbol_value(v: &Value) -> bool {
    match v {
        Value::Atom(_) => true,
        Value::List(items) => {
            matches!(items.as_slice(), [Value::Atom(op), inner] if op == "quote" && is_symbol_value(inner))
        }
        _ => false,
    }
}

pub fn is_number(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    Ok(Value::Bool(matches!(
        args[0],
        Value::Number(_) | Value::Float(_) | Value::Rational(..) | Value::Complex(..)
    )))
}

pub fn is_list(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    Ok(Value::Bool(matches!(args[0], Value::List(_))))
}

pub fn is_symbol(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    Ok(Value::Bool(is_symbol_value(&args[0])))
}

pub fn is_string(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    Ok(Value::Bool(matches!(args[0], Value::String(_))))
}

pub fn is_boolean(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    Ok(Value::Bool(matches!(args[0], Value::Bool(_))))
}

pub fn register(env: &Rc<Environment>) {
    env.define("number?".to_string(), Value::PrimitiveFunc("number?", is_number));
    env.define("list?".to_string(), Value::PrimitiveFunc("list?", is_list));
    env.define("symbol?".to_string(), Value::PrimitiveFunc("symbol?", is_symbol));
    env.define("string?".to_string(), Value::PrimitiveFunc("string?", is_string));
    env.define(
        "boolean?".to_string(),
        Value::PrimitiveFunc("boolean?", is_boolean),
    );
}
