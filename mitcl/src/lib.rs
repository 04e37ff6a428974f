//! # Mitcl: a minimal Tcl-like command language
//!
//! Mitcl is a small, embeddable command interpreter in the Tcl family.  A script is a
//! sequence of commands separated by `;` or newlines; each command is a list of words, the
//! first of which names a builtin or a user-defined procedure.
//!
//! * `( … )` evaluates a nested command and substitutes its result as a single word.
//! * `{ … }` is a verbatim, nesting-aware literal block, evaluated later on demand (e.g.,
//!   as the body of `if` or `proc`).
//! * `"…"` is a quoted string with `\n`, `\r`, `\t`, and `\e` escapes.
//! * `$name` substitutes the value of a variable, searching outward through the scope chain.
//!
//! Commands are evaluated as soon as their terminator is scanned; there is no separate
//! parse tree.  See the [`interp`] module for the embedding API.
//!
//! ```
//! use mitcl::Interp;
//!
//! let mut interp = Interp::new();
//! let val = interp.eval("add (mul 2 2) (mul 3 (add 1 1))", &mut ()).unwrap();
//! assert_eq!(val.as_str(), "10");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![doc(html_root_url = "https://docs.rs/mitcl/0.1.0")]

extern crate alloc;

pub use crate::interp::Interp;
pub use crate::types::*;
pub use crate::value::Value;

#[doc(hidden)]
pub use alloc::format as __format;

#[macro_use]
mod macros;

mod commands;
pub mod interp;
pub mod scanner;
mod scope;
pub mod types;
pub mod value;

/// Checks to see whether a command's argument list is of a reasonable size.
/// Returns an error if not.  The arguments are as follows:
///
/// * `namec`: the number of elements in `argv` that name the command.  For most commands
///   this is 1.
/// * `argv`: the argument list, including the command name.
/// * `min`: the minimum number of arguments, including the command name.
/// * `max`: the maximum number of arguments, or 0 for no maximum.
/// * `argsig`: the argument signature, used in the error message.
///
/// # Example
///
/// ```
/// use mitcl::check_args;
/// use mitcl::Value;
///
/// let argv = [Value::from("var")];
/// let err = check_args(1, &argv, 2, 0, "varName ?value ...?").unwrap_err();
/// assert_eq!(err.to_string(), "wrong # args: should be \"var varName ?value ...?\"");
/// ```
pub fn check_args(
    namec: usize,
    argv: &[Value],
    min: usize,
    max: usize,
    argsig: &str,
) -> Result<(), Exception> {
    assert!(namec >= 1);
    assert!(min >= 1);
    assert!(!argv.is_empty());

    if argv.len() < min || (max > 0 && argv.len() > max) {
        let cmd_tokens = Value::join(&argv[0..namec.min(argv.len())]);
        mi_err!(
            "wrong # args: should be \"{} {}\"",
            cmd_tokens.as_str(),
            argsig
        )
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_args() {
        assert_ok(&check_args(1, &mklist(vec!["mycmd"].as_slice()), 1, 1, ""));
        assert_ok(&check_args(1, &mklist(vec!["mycmd"].as_slice()), 1, 2, "arg1"));
        assert_ok(&check_args(
            1,
            &mklist(vec!["mycmd", "data"].as_slice()),
            1,
            2,
            "arg1",
        ));
        assert_ok(&check_args(
            1,
            &mklist(vec!["mycmd", "data", "data2"].as_slice()),
            1,
            0,
            "arg1",
        ));

        assert_err(
            &check_args(1, &mklist(vec!["mycmd"].as_slice()), 2, 2, "arg1"),
            "wrong # args: should be \"mycmd arg1\"",
        );
        assert_err(
            &check_args(
                1,
                &mklist(vec!["mycmd", "val1", "val2"].as_slice()),
                2,
                2,
                "arg1",
            ),
            "wrong # args: should be \"mycmd arg1\"",
        );
    }

    fn mklist(argv: &[&str]) -> Vec<Value> {
        argv.iter().map(|s| Value::from(*s)).collect()
    }

    fn assert_err(result: &Result<(), Exception>, msg: &str) {
        match result {
            Err(e) => {
                assert!(matches!(e.kind(), ErrorKind::MalformedCommand(_)));
                assert_eq!(e.to_string(), msg);
            }
            Ok(()) => panic!("expected error: {}", msg),
        }
    }

    fn assert_ok(result: &Result<(), Exception>) {
        assert!(result.is_ok(), "Result is not Ok");
    }
}
