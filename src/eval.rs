// ABOUTME: Evaluator module for executing parsed Lisp expressions

use crate::env::Environment;
use crate::error::EvalError;
use crate::parser;
use crate::value::Value;
use std::fs;
use std::rc::Rc;

/// Only `#f` is false; every other value, including `0` and `()`, is truthy.
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Bool(false))
}

/// Evaluates `expr` in `env`.
///
/// Numbers, strings, characters, booleans and vectors are self-evaluating.
/// A bare atom is a variable reference, except the identifier `else`, which
/// always evaluates to `#t` (used as the catch-all clause in `cond`/`case`
/// outside of those special forms too).
pub fn eval(expr: &Value, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match expr {
        Value::Number(_)
        | Value::Float(_)
        | Value::Rational(..)
        | Value::Complex(..)
        | Value::String(_)
        | Value::Char(_)
        | Value::Bool(_)
        | Value::Vector(_) => Ok(expr.clone()),

        Value::Atom(name) => eval_atom(name, env),

        Value::List(items) if items.is_empty() => Ok(Value::List(vec![])),
        Value::List(items) => eval_list(items, env),

        Value::DottedList(..) => Err(EvalError::bad_form("Unquoted dotted list", expr)),

        // already-evaluated forms appearing in data position (e.g. returned
        // from a previous call) simply stand for themselves.
        other => Ok(other.clone()),
    }
}

fn eval_atom(name: &str, env: &Rc<Environment>) -> Result<Value, EvalError> {
    if name == "else" {
        return Ok(Value::Bool(true));
    }
    env.get(name).ok_or_else(|| EvalError::unbound(name))
}

fn eval_list(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if let Value::Atom(op) = &items[0] {
        match op.as_str() {
            "quote" => return eval_quote(items),
            "if" => return eval_if(items, env),
            "set!" => return eval_set(items, env),
            "define" => return eval_define(items, env),
            "lambda" => return eval_lambda(items, env),
            "load" => return eval_load(items, env),
            "cond" => return eval_cond(items, env),
            "case" => return eval_case(items, env),
            "quasiquote" => return eval_quasiquote(items, env),
            _ => {}
        }
    }

    let operator = eval(&items[0], env)?;
    let args = items[1..]
        .iter()
        .map(|a| eval(a, env))
        .collect::<Result<Vec<_>, _>>()?;
    apply_function(&operator, args)
}

fn eval_quote(items: &[Value]) -> Result<Value, EvalError> {
    if items.len() != 2 {
        return Err(EvalError::num_args("1", &items[1..]));
    }
    Ok(items[1].clone())
}

fn eval_if(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() != 3 && items.len() != 4 {
        return Err(EvalError::num_args("2 or 3", &items[1..]));
    }
    let test = eval(&items[1], env)?;
    if is_truthy(&test) {
        eval(&items[2], env)
    } else if items.len() == 4 {
        eval(&items[3], env)
    } else {
        Ok(Value::Bool(false))
    }
}

fn eval_set(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() != 3 {
        return Err(EvalError::num_args("2", &items[1..]));
    }
    let name = match &items[1] {
        Value::Atom(name) => name,
        other => return Err(EvalError::type_mismatch("symbol", other)),
    };
    let value = eval(&items[2], env)?;
    env.set(name, value.clone())?;
    Ok(value)
}

fn eval_define(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() < 3 {
        return Err(EvalError::num_args("at least 2", &items[1..]));
    }

    match &items[1] {
        // (define name expr)
        Value::Atom(name) => {
            if items.len() != 3 {
                return Err(EvalError::num_args("2", &items[1..]));
            }
            let value = eval(&items[2], env)?;
            env.define(name.clone(), value);
            Ok(Value::Atom(name.clone()))
        }

        // (define (name params...) body...)
        Value::List(signature) => {
            let name = match signature.first() {
                Some(Value::Atom(name)) => name.clone(),
                _ => return Err(EvalError::bad_form("Invalid define signature", &items[1])),
            };
            let params = signature[1..]
                .iter()
                .map(atom_name)
                .collect::<Result<Vec<_>, _>>()?;
            let body = items[2..].to_vec();
            let func = Value::Func {
                params,
                rest: None,
                body,
                closure: env.clone(),
            };
            env.define(name.clone(), func);
            Ok(Value::Atom(name))
        }

        // (define (name params... . rest) body...)
        Value::DottedList(signature, tail) => {
            let name = match signature.first() {
                Some(Value::Atom(name)) => name.clone(),
                _ => return Err(EvalError::bad_form("Invalid define signature", &items[1])),
            };
            let params = signature[1..]
                .iter()
                .map(atom_name)
                .collect::<Result<Vec<_>, _>>()?;
            let rest = atom_name(tail)?;
            let body = items[2..].to_vec();
            let func = Value::Func {
                params,
                rest: Some(rest),
                body,
                closure: env.clone(),
            };
            env.define(name.clone(), func);
            Ok(Value::Atom(name))
        }

        other => Err(EvalError::bad_form("Invalid define signature", other)),
    }
}

fn eval_lambda(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() < 2 {
        return Err(EvalError::num_args("at least 1", &items[1..]));
    }

    let (params, rest) = match &items[1] {
        Value::List(params) => (
            params.iter().map(atom_name).collect::<Result<Vec<_>, _>>()?,
            None,
        ),
        Value::DottedList(params, tail) => (
            params.iter().map(atom_name).collect::<Result<Vec<_>, _>>()?,
            Some(atom_name(tail)?),
        ),
        Value::Atom(name) => (Vec::new(), Some(name.clone())),
        other => return Err(EvalError::bad_form("Invalid lambda parameter list", other)),
    };

    Ok(Value::Func {
        params,
        rest,
        body: items[2..].to_vec(),
        closure: env.clone(),
    })
}

fn eval_load(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() != 2 {
        return Err(EvalError::num_args("1", &items[1..]));
    }
    let path = match eval(&items[1], env)? {
        Value::String(path) => path,
        other => return Err(EvalError::type_mismatch("string", &other)),
    };

    let contents = fs::read_to_string(&path)
        .map_err(|e| EvalError::Default(format!("Could not load {}: {}", path, e)))?;
    let forms = parser::read_all(&contents)?;

    let mut result = Value::Bool(true);
    for form in &forms {
        result = eval(form, env)?;
    }
    Ok(result)
}

fn eval_cond(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    for clause in &items[1..] {
        let clause = match clause {
            Value::List(clause) if !clause.is_empty() => clause,
            other => return Err(EvalError::bad_form("Invalid cond clause", other)),
        };

        let test = eval(&clause[0], env)?;
        if is_truthy(&test) {
            return eval_body(&clause[1..], env);
        }
    }
    Err(EvalError::bad_form(
        "No matching cond clause",
        &Value::List(items.to_vec()),
    ))
}

fn eval_case(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() < 2 {
        return Err(EvalError::num_args("at least 1", &items[1..]));
    }
    let key = eval(&items[1], env)?;

    for clause in &items[2..] {
        let clause = match clause {
            Value::List(clause) if !clause.is_empty() => clause,
            other => return Err(EvalError::bad_form("Invalid case clause", other)),
        };

        let is_else = matches!(&clause[0], Value::Atom(name) if name == "else");
        let matches = is_else
            || match &clause[0] {
                Value::List(datums) => datums.iter().any(|d| crate::builtins::equality::eqv(d, &key)),
                other => crate::builtins::equality::eqv(other, &key),
            };

        if matches {
            return eval_body(&clause[1..], env);
        }
    }
    Err(EvalError::bad_form(
        "No matching case clause",
        &Value::List(items.to_vec()),
    ))
}

/// `` `EXPR `` — returns `EXPR`'s structure unevaluated, including any
/// `(unquote X)` left by the parser's rewrite of a comma. Quasiquote is
/// purely structural here: no splicing, and no evaluation of unquoted
/// subforms. A true quasiquote evaluator is a known gap, not silently
/// papered over.
fn eval_quasiquote(items: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() != 2 {
        return Err(EvalError::num_args("1", &items[1..]));
    }
    Ok(items[1].clone())
}

/// Evaluates a function/lambda/cond/case body: a sequence of expressions,
/// each evaluated for effect except the last, whose value is returned.
fn eval_body(body: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut result = Value::Bool(true);
    for expr in body {
        result = eval(expr, env)?;
    }
    Ok(result)
}

fn atom_name(value: &Value) -> Result<String, EvalError> {
    match value {
        Value::Atom(name) => Ok(name.clone()),
        other => Err(EvalError::type_mismatch("symbol", other)),
    }
}

/// Applies `func` to already-evaluated `args`. Shared by application syntax
/// and the `apply` primitive.
pub fn apply_function(func: &Value, args: Vec<Value>) -> Result<Value, EvalError> {
    match func {
        Value::PrimitiveFunc(_, f) => f(&args),
        Value::IOFunc(_, f) => f(&args),
        Value::Func {
            params,
            rest,
            body,
            closure,
        } => {
            if (rest.is_none() && args.len() != params.len()) || args.len() < params.len() {
                return Err(EvalError::num_args(params.len().to_string(), &args));
            }

            let call_env = Environment::with_parent(closure.clone());
            for (name, value) in params.iter().zip(args.iter()) {
                call_env.define(name.clone(), value.clone());
            }
            if let Some(rest_name) = rest {
                let extra = args[params.len()..].to_vec();
                call_env.define(rest_name.clone(), Value::List(extra));
            }

            eval_body(body, &call_env)
        }
        other => Err(EvalError::not_function(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::read_one;

    fn eval_str(src: &str, env: &Rc<Environment>) -> Result<Value, EvalError> {
        eval(&read_one(src).unwrap(), env)
    }

    #[test]
    fn test_self_evaluating() {
        let env = Environment::new();
        assert!(matches!(eval_str("42", &env), Ok(Value::Number(42))));
        assert!(matches!(eval_str("\"hi\"", &env), Ok(Value::String(s)) if s == "hi"));
    }

    #[test]
    fn test_quote() {
        let env = Environment::new();
        match eval_str("'(1 2 3)", &env) {
            Ok(Value::List(items)) => assert_eq!(items.len(), 3),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_if() {
        let env = Environment::new();
        assert!(matches!(eval_str("(if #t 1 2)", &env), Ok(Value::Number(1))));
        assert!(matches!(eval_str("(if #f 1 2)", &env), Ok(Value::Number(2))));
        assert!(matches!(eval_str("(if #f 1)", &env), Ok(Value::Bool(false))));
    }

    #[test]
    fn test_define_value_and_lookup() {
        let env = Environment::new();
        eval_str("(define x 10)", &env).unwrap();
        assert!(matches!(eval_str("x", &env), Ok(Value::Number(10))));
    }

    #[test]
    fn test_define_function_and_call() {
        let env = Environment::new();
        eval_str("(define (identity x) x)", &env).unwrap();
        assert!(matches!(eval_str("(identity 7)", &env), Ok(Value::Number(7))));
    }

    #[test]
    fn test_lambda_and_apply() {
        let env = Environment::new();
        eval_str("(define add1 (lambda (x) (set! x x) x))", &env).unwrap();
        match eval_str("(add1 5)", &env) {
            Ok(Value::Number(5)) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_variadic_lambda() {
        let env = Environment::new();
        eval_str("(define (f . args) args)", &env).unwrap();
        match eval_str("(f 1 2 3)", &env) {
            Ok(Value::List(items)) => assert_eq!(items.len(), 3),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_set_unbound_is_error() {
        let env = Environment::new();
        assert!(eval_str("(set! nope 1)", &env).is_err());
    }

    #[test]
    fn test_closure_shares_defining_frame() {
        let env = Environment::new();
        eval_str("(define x 1)", &env).unwrap();
        eval_str("(define (f) x)", &env).unwrap();
        eval_str("(define x 2)", &env).unwrap();
        assert!(matches!(eval_str("(f)", &env), Ok(Value::Number(2))));
    }

    #[test]
    fn test_cond_no_match_no_else_errors() {
        let env = Environment::new();
        assert!(eval_str("(cond (#f 1))", &env).is_err());
    }

    #[test]
    fn test_cond_else() {
        let env = Environment::new();
        assert!(matches!(
            eval_str("(cond (#f 1) (else 2))", &env),
            Ok(Value::Number(2))
        ));
    }

    #[test]
    fn test_quasiquote_leaves_unquote_unevaluated() {
        let env = Environment::new();
        eval_str("(define x 5)", &env).unwrap();
        match eval_str("`(a ,x c)", &env) {
            Ok(Value::List(items)) => {
                assert_eq!(items.len(), 3);
                match &items[1] {
                    Value::List(inner) => {
                        assert!(matches!(&inner[0], Value::Atom(s) if s == "unquote"));
                        assert!(matches!(&inner[1], Value::Atom(s) if s == "x"));
                    }
                    other => panic!("unexpected: {:?}", other),
                }
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_case_matches_datum() {
        let env = Environment::new();
        match eval_str("(case 2 ((1) 'one) ((2 3) 'two-or-three) (else 'other))", &env) {
            Ok(Value::Atom(s)) => assert_eq!(s, "two-or-three"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
