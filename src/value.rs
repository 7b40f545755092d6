// ABOUTME: Value types representing Lisp data structures and expressions

use crate::env::Environment;
use crate::error::EvalError;
use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::rc::Rc;

/// State held behind a `Port` handle.
///
/// Input ports slurp their file eagerly into a buffer with a read cursor so
/// that `read` can parse one expression at a time without the parser needing
/// to understand streaming I/O. Output ports hold the raw file handle.
pub enum PortState {
    Input { contents: String, cursor: usize },
    Output(File),
    Stdin,
    Stdout,
    Closed,
}

impl fmt::Debug for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortState::Input { cursor, .. } => write!(f, "Input {{ cursor: {} }}", cursor),
            PortState::Output(_) => write!(f, "Output(..)"),
            PortState::Stdin => write!(f, "Stdin"),
            PortState::Stdout => write!(f, "Stdout"),
            PortState::Closed => write!(f, "Closed"),
        }
    }
}

pub type PrimitiveFn = fn(&[Value]) -> Result<Value, EvalError>;

#[derive(Debug, Clone)]
pub enum Value {
    Atom(String),
    String(String),
    Char(char),
    Bool(bool),
    Number(i64),
    Float(f64),
    /// (numerator, denominator)
    Rational(i64, i64),
    /// (real, imaginary)
    Complex(f64, f64),
    List(Vec<Value>),
    DottedList(Vec<Value>, Box<Value>),
    Vector(Vec<Value>),
    PrimitiveFunc(&'static str, PrimitiveFn),
    IOFunc(&'static str, PrimitiveFn),
    Port(Rc<RefCell<PortState>>),
    Func {
        params: Vec<String>,
        rest: Option<String>,
        body: Vec<Value>,
        closure: Rc<Environment>,
    },
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Atom(_) => "symbol",
            Value::String(_) => "string",
            Value::Char(_) => "char",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Float(_) => "float",
            Value::Rational(..) => "rational",
            Value::Complex(..) => "complex",
            Value::List(_) => "list",
            Value::DottedList(..) => "pair",
            Value::Vector(_) => "vector",
            Value::PrimitiveFunc(..) => "primitive",
            Value::IOFunc(..) => "io-primitive",
            Value::Port(_) => "port",
            Value::Func { .. } => "function",
        }
    }

    pub fn input_port(contents: String) -> Value {
        Value::Port(Rc::new(RefCell::new(PortState::Input {
            contents,
            cursor: 0,
        })))
    }

    pub fn output_port(file: File) -> Value {
        Value::Port(Rc::new(RefCell::new(PortState::Output(file))))
    }

    pub fn stdin_port() -> Value {
        Value::Port(Rc::new(RefCell::new(PortState::Stdin)))
    }

    pub fn stdout_port() -> Value {
        Value::Port(Rc::new(RefCell::new(PortState::Stdout)))
    }
}

/// Render a character the way the reader expects to see it again:
/// `#\space`, `#\newline`, or `#\<letter>`. See SPEC_FULL.md for why this
/// implementation prefers the round-trip law over the bare-character
/// shorthand described in the value table.
fn format_char(c: char, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match c {
        ' ' => write!(f, "#\\space"),
        '\n' => write!(f, "#\\newline"),
        other => write!(f, "#\\{}", other),
    }
}

fn format_string(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            other => write!(f, "{}", other)?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Atom(s) => write!(f, "{}", s),
            Value::String(s) => format_string(s, f),
            Value::Char(c) => format_char(*c, f),
            Value::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Number(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Rational(p, q) => write!(f, "{}/{}", p, q),
            Value::Complex(r, i) => {
                if *i < 0.0 {
                    write!(f, "{}{}i", r, i)
                } else {
                    write!(f, "{}+{}i", r, i)
                }
            }
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Value::DottedList(items, tail) => {
                write!(f, "(")?;
                for item in items {
                    write!(f, "{} ", item)?;
                }
                write!(f, ". {})", tail)
            }
            Value::Vector(items) => {
                write!(f, "#(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Value::PrimitiveFunc(..) => write!(f, "<primitive>"),
            Value::IOFunc(..) => write!(f, "<IO primitive>"),
            Value::Port(_) => write!(f, "<IO port>"),
            Value::Func { params, rest, .. } => {
                write!(f, "(lambda (")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", p)?;
                }
                if let Some(r) = rest {
                    if !params.is_empty() {
                        write!(f, " ")?;
                    }
                    write!(f, ". {}", r)?;
                }
                write!(f, ") ...)")
            }
        }
    }
}
