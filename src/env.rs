// ABOUTME: Environment module for managing variable bindings and scopes

use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One frame in the lexical environment chain.
///
/// A frame is a mapping from identifier to mutable value cell. Lookup walks
/// from this frame outward to the parent chain; the first match wins.
/// `Rc` sharing means a closure's captured frame stays live and mutable as
/// long as the closure does, so `set!` through one closure is visible to
/// every other closure sharing that frame.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates the root environment, seeded with primitive bindings by the caller.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child frame whose lookups fall back to `parent`.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Binds `name` in this frame, overwriting any existing binding of the
    /// same name in this same frame. Does not walk the parent chain.
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Looks up `name` in this frame, then recursively in parent frames.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Reassigns an existing binding in the nearest frame that has it.
    /// Fails with `UnboundVar` if `name` is not bound anywhere in the chain.
    pub fn set(&self, name: &str, value: Value) -> Result<(), EvalError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }

        match &self.parent {
            Some(parent) => parent.set(name, value),
            None => Err(EvalError::unbound(name)),
        }
    }
}
