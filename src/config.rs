// ABOUTME: Configuration and constants for the Lisp interpreter

pub const VERSION: &str = "1.0.0";
pub const WELCOME_MESSAGE: &str = "Lisp Interpreter v1.0";
pub const WELCOME_SUBTITLE: &str = "A Scheme-flavored Lisp in Rust";

/// Prompt shown at each REPL turn.
pub const REPL_PROMPT: &str = "Lisp>>> ";

/// Bare input that terminates the REPL without attempting to parse it.
pub const QUIT_TOKEN: &str = "quit";
