//! Public Type Declarations
//!
//! This module defines a number of types used throughout Mitcl's public API.
//!
//! The most important is [`MiResult`], the type returned by all Mitcl command functions
//! and by [`Interp::eval`](../interp/struct.Interp.html#method.eval).  An `Err` result
//! carries an [`Exception`], whose [`ErrorKind`] says what went wrong.

use crate::interp::Interp;
use crate::value::Value;
#[cfg(feature = "closure-commands")]
use alloc::boxed::Box;
use alloc::string::String;
use alloc::string::ToString as _;
use core::hash::BuildHasherDefault;
use fnv::FnvHasher;

/// The integer type used by Mitcl's arithmetic commands.
pub type MiInt = i64;

/// The hasher used by the interpreter's command, variable, and procedure tables.
pub type MiHasher = BuildHasherDefault<FnvHasher>;

/// The standard `Result<T,E>` type for Mitcl code.
///
/// A builtin command, a procedure, and a script all produce a `Value` on success.
pub type MiResult = Result<Value, Exception>;

/// A function used to implement a builtin command.
///
/// The function receives the interpreter, the command's words (`argv[0]` is the command
/// name), and the application context passed to `Interp::eval`.
pub type CommandFunc<Ctx> = fn(&mut Interp<Ctx>, &[Value], &mut Ctx) -> MiResult;

/// A closure used to implement a builtin command.
#[cfg(feature = "closure-commands")]
pub type CommandClosure<Ctx> = Box<dyn Fn(&mut Interp<Ctx>, &[Value], &mut Ctx) -> MiResult>;

/// The kinds of error that can interrupt the evaluation of a script.
///
/// An undefined variable is not an error: `$name` substitutes the empty string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A builtin was called with the wrong number or shape of arguments.
    #[error("{0}")]
    MalformedCommand(String),

    /// Neither a procedure nor a builtin is defined with this name.
    #[error("invalid command name \"{0}\"")]
    NoSuchProcedure(String),

    /// The script ended inside a quoted string, brace block, or `( … )` group.
    #[error("missing {0}")]
    Unterminated(&'static str),

    /// Procedure calls and nested blocks went deeper than the interpreter allows.
    #[error("too many nested calls to Interp::eval (limit {0})")]
    RecursionLimitExceeded(usize),

    /// An internal invariant of the evaluator was violated.
    #[error("internal error: {0}")]
    BadState(String),
}

/// An error returned by a command or a script.
///
/// In addition to its [`ErrorKind`], an exception accumulates a human-readable trace of
/// the commands that were executing when the error was raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct Exception {
    kind: ErrorKind,
    error_info: String,
}

impl Exception {
    /// Creates an exception of the given kind with an empty error trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            error_info: String::new(),
        }
    }

    /// Creates a `MalformedCommand` exception with the given message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedCommand(msg.into()))
    }

    /// Creates a `NoSuchProcedure` exception for the given command name.
    pub fn no_such_procedure(name: &str) -> Self {
        Self::new(ErrorKind::NoSuchProcedure(name.into()))
    }

    /// Creates a `BadState` exception.
    pub fn bad_state(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadState(msg.into()))
    }

    /// Returns the exception's kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the error message as a value.
    pub fn value(&self) -> Value {
        Value::from(self.kind.to_string())
    }

    /// Returns the error message followed by the trace of executing commands.
    pub fn error_info(&self) -> String {
        let mut info = self.kind.to_string();
        info.push_str(&self.error_info);
        info
    }

    /// Is this a new error, i.e., one that has not yet been annotated with the command
    /// that raised it?
    pub fn is_new_error(&self) -> bool {
        self.error_info.is_empty()
    }

    /// Appends a line to the error trace.
    pub fn add_error_info(&mut self, line: &str) {
        self.error_info.push('\n');
        self.error_info.push_str(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_display() {
        let ex = Exception::no_such_procedure("frob");
        assert_eq!(ex.to_string(), "invalid command name \"frob\"");
        assert_eq!(ex.value(), Value::from("invalid command name \"frob\""));

        let ex = Exception::new(ErrorKind::Unterminated("close-brace"));
        assert_eq!(ex.to_string(), "missing close-brace");

        let ex = Exception::new(ErrorKind::RecursionLimitExceeded(10));
        assert_eq!(
            ex.to_string(),
            "too many nested calls to Interp::eval (limit 10)"
        );
    }

    #[test]
    fn test_error_info() {
        let mut ex = Exception::malformed("oops");
        assert!(ex.is_new_error());

        ex.add_error_info("    while executing");
        ex.add_error_info("\"frob 1\"");

        assert!(!ex.is_new_error());
        assert_eq!(ex.error_info(), "oops\n    while executing\n\"frob 1\"");
        assert_eq!(ex.to_string(), "oops");
    }
}
