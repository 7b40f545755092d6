// ABOUTME: Integration tests for string primitives and the assert special-case

use lispy_sandbox::env::Environment;
use lispy_sandbox::error::EvalError;
use lispy_sandbox::eval::eval;
use lispy_sandbox::parser::read_one;
use lispy_sandbox::value::Value;
use std::rc::Rc;

fn eval_expr(expr: &str, env: &Rc<Environment>) -> Result<Value, EvalError> {
    eval(&read_one(expr)?, env)
}

fn test_env() -> Rc<Environment> {
    let env = Environment::new();
    lispy_sandbox::builtins::register_builtins(&env);
    env
}

#[test]
fn test_assert_matching_values() {
    let env = test_env();
    let result = eval_expr("(assert 1 1)", &env).unwrap();
    assert!(matches!(result, Value::Bool(true)));
}

#[test]
fn test_assert_mismatched_values_errors() {
    let env = test_env();
    assert!(eval_expr("(assert 1 2)", &env).is_err());
}

#[test]
fn test_string_append() {
    let env = test_env();
    let result = eval_expr(r#"(string-append "hello" " " "world")"#, &env).unwrap();
    assert!(matches!(result, Value::String(s) if s == "hello world"));
}

#[test]
fn test_string_length_and_ref() {
    let env = test_env();
    let result = eval_expr(r#"(string-length "hello")"#, &env).unwrap();
    assert!(matches!(result, Value::Number(5)));

    let result = eval_expr(r#"(string-ref "hello" 1)"#, &env).unwrap();
    assert!(matches!(result, Value::Char('e')));
}

#[test]
fn test_make_string() {
    let env = test_env();
    let result = eval_expr(r#"(make-string 3 #\x)"#, &env).unwrap();
    assert!(matches!(result, Value::String(s) if s == "xxx"));
}

#[test]
fn test_string_comparisons() {
    let env = test_env();
    assert!(matches!(
        eval_expr(r#"(string=? "abc" "abc")"#, &env),
        Ok(Value::Bool(true))
    ));
    assert!(matches!(
        eval_expr(r#"(string<? "abc" "abd")"#, &env),
        Ok(Value::Bool(true))
    ));
}

#[test]
fn test_string_list_conversions() {
    let env = test_env();
    let list = eval_expr(r#"(string->list "ab")"#, &env).unwrap();
    assert!(matches!(list, Value::List(ref items) if items.len() == 2));

    let back = eval_expr(r#"(list->string (string->list "ab"))"#, &env).unwrap();
    assert!(matches!(back, Value::String(s) if s == "ab"));
}

#[test]
fn test_symbol_string_coercions() {
    let env = test_env();
    let result = eval_expr("(symbol->string 'hello)", &env).unwrap();
    assert!(matches!(result, Value::String(s) if s == "hello"));

    let result = eval_expr(r#"(string->symbol "hello")"#, &env).unwrap();
    assert!(matches!(result, Value::Atom(s) if s == "hello"));
}

#[test]
fn test_substring_out_of_range_errors() {
    let env = test_env();
    assert!(eval_expr(r#"(substring "hi" 0 5)"#, &env).is_err());
}
