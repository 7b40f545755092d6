//! String operations and symbol/string coercion.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn as_string(v: &Value) -> Result<&str, EvalError> {
    match v {
        Value::String(s) => Ok(s),
        other => Err(EvalError::type_mismatch("string", other)),
    }
}

fn as_index(v: &Value) -> Result<usize, EvalError> {
    match v {
        Value::Number(n) if *n >= 0 => Ok(*n as usize),
        other => Err(EvalError::type_mismatch("non-negative integer", other)),
    }
}

/// `(make-string k [char])` — a string of `k` copies of `char` (default space).
pub fn make_string(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() || args.len() > 2 {
        return Err(EvalError::num_args("1 or 2", args));
    }
    let k = as_index(&args[0])?;
    let c = match args.get(1) {
        Some(Value::Char(c)) => *c,
        Some(other) => return Err(EvalError::type_mismatch("char", other)),
        None => ' ',
    };
    Ok(Value::String(std::iter::repeat(c).take(k).collect()))
}

pub fn string_length(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    Ok(Value::Number(as_string(&args[0])?.chars().count() as i64))
}

pub fn string_ref(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    let s = as_string(&args[0])?;
    let k = as_index(&args[1])?;
    s.chars()
        .nth(k)
        .map(Value::Char)
        .ok_or_else(|| EvalError::Default(format!("string-ref index {} out of range", k)))
}

/// `(substring s start end)` — characters `[start, end)`, 0-indexed.
pub fn substring(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::num_args("3", args));
    }
    let s = as_string(&args[0])?;
    let start = as_index(&args[1])?;
    let end = as_index(&args[2])?;
    let chars: Vec<char> = s.chars().collect();
    if start > end || end > chars.len() {
        return Err(EvalError::Default(format!(
            "substring indices out of range: {} {} (len {})",
            start,
            end,
            chars.len()
        )));
    }
    Ok(Value::String(chars[start..end].iter().collect()))
}

pub fn string_append(args: &[Value]) -> Result<Value, EvalError> {
    let mut result = String::new();
    for arg in args {
        result.push_str(as_string(arg)?);
    }
    Ok(Value::String(result))
}

/// `(string char...)` — builds a string out of characters.
pub fn string(args: &[Value]) -> Result<Value, EvalError> {
    let mut result = String::new();
    for arg in args {
        match arg {
            Value::Char(c) => result.push(*c),
            other => return Err(EvalError::type_mismatch("char", other)),
        }
    }
    Ok(Value::String(result))
}

pub fn string_to_list(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    Ok(Value::List(
        as_string(&args[0])?.chars().map(Value::Char).collect(),
    ))
}

pub fn list_to_string(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    let items = match &args[0] {
        Value::List(items) => items,
        other => return Err(EvalError::type_mismatch("list", other)),
    };
    let mut result = String::new();
    for item in items {
        match item {
            Value::Char(c) => result.push(*c),
            other => return Err(EvalError::type_mismatch("char", other)),
        }
    }
    Ok(Value::String(result))
}

fn string_compare(args: &[Value], f: impl Fn(&str, &str) -> bool) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    Ok(Value::Bool(f(as_string(&args[0])?, as_string(&args[1])?)))
}

pub fn string_eq(args: &[Value]) -> Result<Value, EvalError> {
    string_compare(args, |a, b| a == b)
}

pub fn string_lt(args: &[Value]) -> Result<Value, EvalError> {
    string_compare(args, |a, b| a < b)
}

pub fn string_gt(args: &[Value]) -> Result<Value, EvalError> {
    string_compare(args, |a, b| a > b)
}

pub fn string_le(args: &[Value]) -> Result<Value, EvalError> {
    string_compare(args, |a, b| a <= b)
}

pub fn string_ge(args: &[Value]) -> Result<Value, EvalError> {
    string_compare(args, |a, b| a >= b)
}

/// Returns the symbol's name as a string. A non-symbol value is passed
/// through unchanged rather than rejected — see SPEC_FULL.md.
pub fn symbol_to_string(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    match &args[0] {
        Value::Atom(name) => Ok(Value::String(name.clone())),
        Value::List(items) if matches!(items.as_slice(), [Value::Atom(op), _] if op == "quote") => {
            symbol_to_string(&items[1..2])
        }
        other => Ok(other.clone()),
    }
}

pub fn string_to_symbol(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    Ok(Value::Atom(as_string(&args[0])?.to_string()))
}

pub fn register(env: &Rc<Environment>) {
    env.define("make-string".to_string(), Value::PrimitiveFunc("make-string", make_string));
    env.define(
        "string-length".to_string(),
        Value::PrimitiveFunc("string-length", string_length),
    );
    env.define("string-ref".to_string(), Value::PrimitiveFunc("string-ref", string_ref));
    env.define("substring".to_string(), Value::PrimitiveFunc("substring", substring));
    env.define(
        "string-append".to_string(),
        Value::PrimitiveFunc("string-append", string_append),
    );
    env.define("string".to_string(), Value::PrimitiveFunc("string", string));
    env.define(
        "string->list".to_string(),
        Value::PrimitiveFunc("string->list", string_to_list),
    );
    env.define(
        "list->string".to_string(),
        Value::PrimitiveFunc("list->string", list_to_string),
    );
    env.define("string=?".to_string(), Value::PrimitiveFunc("string=?", string_eq));
    env.define("string<?".to_string(), Value::PrimitiveFunc("string<?", string_lt));
    env.define("string>?".to_string(), Value::PrimitiveFunc("string>?", string_gt));
    env.define("string<=?".to_string(), Value::PrimitiveFunc("string<=?", string_le));
    env.define("string>=?".to_string(), Value::PrimitiveFunc("string>=?", string_ge));
    env.define(
        "symbol->string".to_string(),
        Value::PrimitiveFunc("symbol->string", symbol_to_string),
    );
    env.define(
        "string->symbol".to_string(),
        Value::PrimitiveFunc("string->symbol", string_to_symbol),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_matches_spec_example() {
        let args = vec![Value::String("hello".into()), Value::Number(1), Value::Number(3)];
        assert!(matches!(substring(&args), Ok(Value::String(s)) if s == "el"));
    }

    #[test]
    fn test_make_string_default_fill() {
        let args = vec![Value::Number(3)];
        assert!(matches!(make_string(&args), Ok(Value::String(s)) if s == "   "));
    }

    #[test]
    fn test_string_ref_and_length() {
        let args = vec![Value::String("abc".into())];
        assert!(matches!(string_length(&args), Ok(Value::Number(3))));
        let args = vec![Value::String("abc".into()), Value::Number(1)];
        assert!(matches!(string_ref(&args), Ok(Value::Char('b'))));
    }

    #[test]
    fn test_string_list_roundtrip() {
        let s = Value::String("abc".into());
        let list = string_to_list(&[s]).unwrap();
        let back = list_to_string(&[list]).unwrap();
        assert!(matches!(back, Value::String(s) if s == "abc"));
    }

    #[test]
    fn test_symbol_to_string_passthrough_on_non_symbol() {
        let args = vec![Value::Number(5)];
        assert!(matches!(symbol_to_string(&args), Ok(Value::Number(5))));
    }

    #[test]
    fn test_string_comparisons() {
        let args = vec![Value::String("abc".into()), Value::String("abd".into())];
        assert!(matches!(string_lt(&args), Ok(Value::Bool(true))));
    }
}
