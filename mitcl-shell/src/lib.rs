//! # Mitcl Shell
//!
//! This crate provides the interactive REPL and the script runner used by the `mitclsh`
//! application.  Any application embedding a Mitcl [`Interp`](mitcl::Interp) can use them
//! to provide the same shell over its own command set.

pub use crate::shell::*;

mod shell;
