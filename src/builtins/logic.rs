//! Logical operations: &&, ||, not
//!
//! `&&` and `||` take exactly two `Bool` operands; `not` takes exactly
//! one.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn as_bool(v: &Value) -> Result<bool, EvalError> {
    match v {
        Value::Bool(b) => Ok(*b),
        other => Err(EvalError::type_mismatch("bool", other)),
    }
}

pub fn and(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    Ok(Value::Bool(as_bool(&args[0])? && as_bool(&args[1])?))
}

pub fn or(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    Ok(Value::Bool(as_bool(&args[0])? || as_bool(&args[1])?))
}

pub fn not(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    Ok(Value::Bool(!as_bool(&args[0])?))
}

pub fn register(env: &Rc<Environment>) {
    env.define("&&".to_string(), Value::PrimitiveFunc("&&", and));
    env.define("||".to_string(), Value::PrimitiveFunc("||", or));
    env.define("not".to_string(), Value::PrimitiveFunc("not", not));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_or_not() {
        let args = vec![Value::Bool(true), Value::Bool(true)];
        assert!(matches!(and(&args), Ok(Value::Bool(true))));
        let args = vec![Value::Bool(false), Value::Bool(true)];
        assert!(matches!(or(&args), Ok(Value::Bool(true))));
        assert!(matches!(not(&[Value::Bool(false)]), Ok(Value::Bool(true))));
    }

    #[test]
    fn test_non_bool_errors() {
        let args = vec![Value::Number(1)];
        assert!(not(&args).is_err());
    }

    #[test]
    fn test_and_or_reject_other_arities() {
        assert!(and(&[Value::Bool(true)]).is_err());
        assert!(and(&[Value::Bool(true), Value::Bool(true), Value::Bool(true)]).is_err());
        assert!(or(&[Value::Bool(true)]).is_err());
        assert!(or(&[Value::Bool(true), Value::Bool(true), Value::Bool(true)]).is_err());
    }
}
