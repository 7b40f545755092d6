// ABOUTME: Error types for evaluation failures in the Lisp interpreter

use crate::value::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum EvalError {
    #[error("Expected {expected} args; found values {found}")]
    NumArgs { expected: String, found: String },

    #[error("Invalid type: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Parse error at {0}")]
    Parser(String),

    #[error("{msg}: {form}")]
    BadSpecialForm { msg: String, form: String },

    #[error("{msg}: {name}")]
    NotFunction { msg: String, name: String },

    #[error("{msg}: {name}")]
    UnboundVar { msg: String, name: String },

    #[error("Assertion failed")]
    Assert(String),

    #[error("{0}")]
    Default(String),
}

impl EvalError {
    pub fn num_args(expected: impl Into<String>, found: &[Value]) -> Self {
        EvalError::NumArgs {
            expected: expected.into(),
            found: render_values(found),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, found: &Value) -> Self {
        EvalError::TypeMismatch {
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    pub fn bad_form(msg: impl Into<String>, form: &Value) -> Self {
        EvalError::BadSpecialForm {
            msg: msg.into(),
            form: form.to_string(),
        }
    }

    pub fn not_function(name: &Value) -> Self {
        EvalError::NotFunction {
            msg: "Value is not a function".to_string(),
            name: name.to_string(),
        }
    }

    pub fn unbound(name: impl Into<String>) -> Self {
        EvalError::UnboundVar {
            msg: "Unbound variable".to_string(),
            name: name.into(),
        }
    }
}

fn render_values(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
