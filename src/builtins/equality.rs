//! Equality predicates (eq?, eqv?, equal?) and the type-unpackers that
//! give `equal?` its coercing, "weak typing" comparison, plus `assert`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// `eq?` and `eqv?` have identical semantics here: same-tag comparison
/// that walks into list/dotted-list structure, comparing each element
/// (and, for dotted lists, the tail) with `eqv?` in turn.
pub fn eq(a: &Value, b: &Value) -> bool {
    eqv(a, b)
}

pub fn eqv(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Rational(p1, q1), Value::Rational(p2, q2)) => p1 == p2 && q1 == q2,
        (Value::Complex(r1, i1), Value::Complex(r2, i2)) => r1 == r2 && i1 == i2,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Atom(x), Value::Atom(y)) => x == y,
        (Value::Char(x), Value::Char(y)) => x == y,
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(a, b)| eqv(a, b))
        }
        (Value::DottedList(x, xt), Value::DottedList(y, yt)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(a, b)| eqv(a, b)) && eqv(xt, yt)
        }
        _ => false,
    }
}

fn to_number(v: &Value) -> Result<i64, EvalError> {
    match v {
        Value::Number(n) => Ok(*n),
        Value::List(items) if items.len() == 1 => to_number(&items[0]),
        other => Err(EvalError::type_mismatch("number", other)),
    }
}

fn to_string_val(v: &Value) -> Result<String, EvalError> {
    match v {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(if *b { "True" } else { "False" }.to_string()),
        other => Err(EvalError::type_mismatch("string", other)),
    }
}

fn to_bool(v: &Value) -> Result<bool, EvalError> {
    match v {
        Value::Bool(b) => Ok(*b),
        other => Err(EvalError::type_mismatch("bool", other)),
    }
}

/// `equal?` first tries `eqv?`; failing that, it tries unpacking both sides
/// as a number, then a string, then a bool, succeeding if any coercion
/// agrees — so `(equal? 1 "1")` is `#t` (both unpack to string `"1"`) even
/// though `(eqv? 1 "1")` is `#f`.
pub fn equal(a: &Value, b: &Value) -> bool {
    if eqv(a, b) {
        return true;
    }
    if let (Ok(x), Ok(y)) = (to_number(a), to_number(b)) {
        if x == y {
            return true;
        }
    }
    if let (Ok(x), Ok(y)) = (to_string_val(a), to_string_val(b)) {
        if x == y {
            return true;
        }
    }
    if let (Ok(x), Ok(y)) = (to_bool(a), to_bool(b)) {
        if x == y {
            return true;
        }
    }
    match (a, b) {
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(a, b)| equal(a, b))
        }
        _ => false,
    }
}

pub fn builtin_eq(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    Ok(Value::Bool(eq(&args[0], &args[1])))
}

pub fn builtin_eqv(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    Ok(Value::Bool(eqv(&args[0], &args[1])))
}

pub fn builtin_equal(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    Ok(Value::Bool(equal(&args[0], &args[1])))
}

/// `(assert a b)` — errors with `Assert` unless `(eqv? a b)`.
pub fn assert(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    if eqv(&args[0], &args[1]) {
        Ok(Value::Bool(true))
    } else {
        Err(EvalError::Assert("false".to_string()))
    }
}

pub fn register(env: &Rc<Environment>) {
    env.define("eq?".to_string(), Value::PrimitiveFunc("eq?", builtin_eq));
    env.define("eqv?".to_string(), Value::PrimitiveFunc("eqv?", builtin_eqv));
    env.define("equal?".to_string(), Value::PrimitiveFunc("equal?", builtin_equal));
    env.define("assert".to_string(), Value::PrimitiveFunc("assert", assert));
}
