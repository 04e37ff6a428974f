//! Variable and Procedure Scope Management
//!
//! A [`ScopeStack`] is the interpreter's runtime context chain.  Each [`Scope`] holds a
//! variable table, a procedure table, and the result of the last command evaluated in it.
//! The scope at index 0 is the global scope; each procedure call pushes a new scope whose
//! parent is the scope below it, and pops it when the call returns.  A scope therefore
//! never outlives the call that created it.
//!
//! Lookup starts at the top of the stack and walks down toward the global scope, returning
//! the first match; inner definitions shadow outer ones.

use crate::interp::Procedure;
use crate::types::MiHasher;
use crate::value::Value;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// A single frame of the runtime context chain.
#[derive(Default)]
pub(crate) struct Scope {
    vars: IndexMap<String, Value, MiHasher>,
    procs: IndexMap<String, Rc<Procedure>, MiHasher>,
    last_result: Value,
}

/// The chain of live scopes, innermost last.
pub(crate) struct ScopeStack {
    stack: Vec<Scope>,
}

impl ScopeStack {
    /// Creates a scope stack containing only the global scope.
    pub fn new() -> Self {
        Self {
            stack: vec![Scope::default()],
        }
    }

    /// Pushes a new scope whose parent is the current scope.
    pub fn push(&mut self) {
        self.stack.push(Scope::default());
    }

    /// Pops the current scope, discarding its variables and procedures.
    pub fn pop(&mut self) {
        assert!(self.stack.len() > 1, "tried to pop the global scope");
        self.stack.pop();
    }

    /// Returns the level of the current scope; the global scope is level 0.
    pub fn current(&self) -> usize {
        self.stack.len() - 1
    }

    fn top(&self) -> &Scope {
        &self.stack[self.current()]
    }

    fn top_mut(&mut self) -> &mut Scope {
        let level = self.current();
        &mut self.stack[level]
    }

    /// Finds the named variable, returning the level of the scope that owns it and its
    /// value.
    pub fn find_var(&self, name: &str) -> Option<(usize, &Value)> {
        self.stack
            .iter()
            .enumerate()
            .rev()
            .find_map(|(level, scope)| scope.vars.get(name).map(|value| (level, value)))
    }

    /// Retrieves the value of the named variable, searching outward from the current scope.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.find_var(name).map(|(_, value)| value.clone())
    }

    /// Is a variable with this name visible from the current scope?
    pub fn exists(&self, name: &str) -> bool {
        self.find_var(name).is_some()
    }

    /// Declares the named variable in the current scope, shadowing any variable of the
    /// same name in an enclosing scope.
    pub fn declare(&mut self, name: &str, value: Value) {
        self.top_mut().vars.insert(name.into(), value);
    }

    /// Assigns the named variable in the scope that owns it; if no scope does, declares it
    /// in the current scope.
    pub fn assign(&mut self, name: &str, value: Value) {
        let level = self
            .find_var(name)
            .map_or_else(|| self.current(), |(level, _)| level);

        self.stack[level].vars.insert(name.into(), value);
    }

    /// Returns the names of the variables visible from the current scope.
    pub fn vars_in_scope(&self) -> Vec<Value> {
        let mut names: IndexSet<&str, MiHasher> = IndexSet::default();

        for scope in self.stack.iter().rev() {
            for name in scope.vars.keys() {
                names.insert(name.as_str());
            }
        }

        names.into_iter().map(Value::from).collect()
    }

    /// Returns the names of the variables declared in the current scope.
    pub fn vars_in_local_scope(&self) -> Vec<Value> {
        self.top().vars.keys().map(Value::from).collect()
    }

    /// Finds the named procedure, returning the level of the scope that owns it and the
    /// procedure.
    pub fn find_proc(&self, name: &str) -> Option<(usize, &Rc<Procedure>)> {
        self.stack
            .iter()
            .enumerate()
            .rev()
            .find_map(|(level, scope)| scope.procs.get(name).map(|proc| (level, proc)))
    }

    /// Defines the named procedure in the current scope, replacing any procedure of the
    /// same name already defined there.
    pub fn declare_proc(&mut self, name: &str, proc: Procedure) {
        self.top_mut().procs.insert(name.into(), Rc::new(proc));
    }

    /// Returns the names of the procedures visible from the current scope.
    pub fn proc_names(&self) -> Vec<Value> {
        let mut names: IndexSet<&str, MiHasher> = IndexSet::default();

        for scope in self.stack.iter().rev() {
            for name in scope.procs.keys() {
                names.insert(name.as_str());
            }
        }

        names.into_iter().map(Value::from).collect()
    }

    /// Returns the current scope's last result.
    pub fn last_result(&self) -> Value {
        self.top().last_result.clone()
    }

    /// Sets the current scope's last result.
    pub fn set_last_result(&mut self, value: Value) {
        self.top_mut().last_result = value;
    }
}
