//! Pair/list surgery: cons, car, cdr.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// `(cons x y)` — prepends `x` to `y`. Building a proper list when `y` is a
/// list or dotted list, and an improper pair otherwise.
pub fn cons(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::num_args("2", args));
    }
    let head = args[0].clone();
    match &args[1] {
        Value::List(items) => {
            let mut new_items = vec![head];
            new_items.extend(items.iter().cloned());
            Ok(Value::List(new_items))
        }
        Value::DottedList(items, tail) => {
            let mut new_items = vec![head];
            new_items.extend(items.iter().cloned());
            Ok(Value::DottedList(new_items, tail.clone()))
        }
        tail => Ok(Value::DottedList(vec![head], Box::new(tail.clone()))),
    }
}

/// `(car pair)` — the first element of a list or dotted list.
pub fn car(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    match &args[0] {
        Value::List(items) if !items.is_empty() => Ok(items[0].clone()),
        Value::DottedList(items, _) if !items.is_empty() => Ok(items[0].clone()),
        other => Err(EvalError::type_mismatch("pair", other)),
    }
}

/// `(cdr pair)` — everything after the first element.
///
/// `(cdr '(a . b))` returns `b` itself, unwrapped, not a one-element list —
/// see SPEC_FULL.md's resolved-ambiguities section.
pub fn cdr(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::num_args("1", args));
    }
    match &args[0] {
        Value::List(items) if !items.is_empty() => Ok(Value::List(items[1..].to_vec())),
        Value::DottedList(items, tail) if items.len() == 1 => Ok((**tail).clone()),
        Value::DottedList(items, tail) if !items.is_empty() => {
            Ok(Value::DottedList(items[1..].to_vec(), tail.clone()))
        }
        other => Err(EvalError::type_mismatch("pair", other)),
    }
}

pub fn register(env: &Rc<Environment>) {
    env.define("cons".to_string(), Value::PrimitiveFunc("cons", cons));
    env.define("car".to_string(), Value::PrimitiveFunc("car", car));
    env.define("cdr".to_string(), Value::PrimitiveFunc("cdr", cdr));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cons_builds_dotted_list_on_non_list_tail() {
        let args = vec![Value::Number(1), Value::Number(2)];
        match cons(&args) {
            Ok(Value::DottedList(items, tail)) => {
                assert_eq!(items.len(), 1);
                assert!(matches!(*tail, Value::Number(2)));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_cons_onto_proper_list() {
        let args = vec![Value::Number(1), Value::List(vec![Value::Number(2)])];
        match cons(&args) {
            Ok(Value::List(items)) => assert_eq!(items.len(), 2),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_car_of_empty_list_is_type_mismatch() {
        assert!(car(&[Value::List(vec![])]).is_err());
    }

    #[test]
    fn test_cdr_of_two_element_dotted_pair_unwraps_tail() {
        let pair = Value::DottedList(vec![Value::Atom("a".into())], Box::new(Value::Atom("b".into())));
        match cdr(&[pair]) {
            Ok(Value::Atom(s)) => assert_eq!(s, "b"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_cdr_of_proper_list() {
        let list = Value::List(vec![Value::Number(1), Value::Number(2), Value::Number(3)]);
        match cdr(&[list]) {
            Ok(Value::List(items)) => assert_eq!(items.len(), 2),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
