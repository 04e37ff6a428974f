//! The Mitcl Interpreter
//!
//! The [`Interp`] struct is the primary API for embedding Mitcl into a Rust application.
//! Given an `Interp`, the application may:
//!
//! * Evaluate scripts
//! * Check scripts for completeness
//! * Extend the language by defining new builtin commands in Rust
//! * Declare, assign, and retrieve variables
//! * Redirect the output of `print` and `println`
//!
//! # Threads
//!
//! An [`Interp`] and its [`Value`]s are single-threaded (`Value` is reference counted and
//! neither `Send` nor `Sync`).  Separate threads may each own an interpreter; pass plain
//! `String`s between them.
//!
//! # Creating an Interpreter
//!
//! [`Interp::new`](struct.Interp.html#method.new) creates an interpreter populated with
//! the standard builtin commands: `var`, `let`, `proc`, `if`, `add`, `mul`, `eq`, `print`,
//! and `println`.  [`Interp::empty`](struct.Interp.html#method.empty) creates an
//! interpreter with no builtins at all, so that an application can define exactly the
//! command set it needs.
//!
//! # Evaluating Scripts
//!
//! [`Interp::eval`](struct.Interp.html#method.eval) evaluates a script in the current
//! scope and returns the value of its last command, or the value given to `return`.
//! Commands are evaluated one at a time, as soon as each one has been scanned; a nested
//! `( … )` command is evaluated when its `)` is reached, and its result becomes one word
//! of the enclosing command.
//!
//! ```
//! use mitcl::Interp;
//! use mitcl::types::*;
//!
//! # fn dummy() -> MiResult {
//! let mut interp = Interp::new();
//!
//! interp.eval("proc double x { mul $x 2 }", &mut ())?;
//! let val = interp.eval("add 1 (double 20)", &mut ())?;
//! assert_eq!(val.as_str(), "41");
//! # Ok(val)
//! # }
//! ```
//!
//! The application may thread its own context through evaluation: every builtin receives
//! the `&mut Ctx` passed to `eval`.  Most applications use `()`.
//!
//! # Scopes
//!
//! Variables and procedures live in a chain of scopes.  The global scope always exists;
//! each call to a user-defined procedure pushes a new scope, whose parent is the caller's
//! scope, and pops it on return.  Lookup of `$name` and of procedure names walks outward
//! from the current scope and takes the first match.
//!
//! * `var name value...` always declares `name` in the current scope, shadowing any outer
//!   variable of the same name.
//! * `let name value...` assigns `name` in whichever scope already owns it, declaring it
//!   in the current scope only if no scope does.
//!
//! A reference to an undefined variable substitutes the empty string.
//!
//! # Defining New Commands
//!
//! A builtin command is a [`CommandFunc`]: a Rust function that receives the interpreter,
//! the command's words (including the command name), and the application context, and
//! returns a [`MiResult`].  Register it with
//! [`Interp::add_command`](struct.Interp.html#method.add_command).
//!
//! ```
//! use mitcl::Interp;
//! use mitcl::check_args;
//! use mitcl::mi_ok;
//! use mitcl::types::*;
//! use mitcl::Value;
//!
//! # fn dummy() -> MiResult {
//! let mut interp = Interp::new();
//! interp.add_command("square", cmd_square);
//!
//! let val = interp.eval("square 5", &mut ())?;
//! assert_eq!(val.as_str(), "25");
//! # Ok(val)
//! # }
//!
//! // The command: square intValue
//! fn cmd_square(_: &mut Interp, argv: &[Value], _: &mut ()) -> MiResult {
//!     check_args(1, argv, 2, 2, "intValue")?;
//!     let int_value = argv[1].as_int();
//!     mi_ok!(int_value * int_value)
//! }
//! ```
//!
//! User-defined procedures take precedence over builtins of the same name.
//!
//! # Checking Scripts for Completeness
//!
//! The [`Interp::complete`](struct.Interp.html#method.complete) method checks whether a
//! script has no unterminated quoted string, brace block, or `( … )` group.  A REPL uses
//! it to decide whether to evaluate its input or ask for another line.
//!
//! [`MiResult`]: ../types/type.MiResult.html
//! [`CommandFunc`]: ../types/type.CommandFunc.html
//! [`Value`]: ../value/index.html
//! [`Interp`]: struct.Interp.html

use crate::commands;
use crate::scanner;
use crate::scanner::Event;
use crate::scanner::Scanner;
use crate::scope::ScopeStack;
use crate::types::*;
use crate::value::Value;
use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::mem;
use indexmap::IndexMap;
use log::{debug, trace, warn};

// Each nested eval costs several native frames; this depth fits a 2 MiB thread stack
// in a debug build.
const DEFAULT_RECURSION_LIMIT: usize = 250;

/// The sink for `print` and `println` output.
type OutputFunc = Box<dyn FnMut(&str)>;

/// The Mitcl Interpreter.
///
/// The `Interp` struct is the primary API for embedding Mitcl into a Rust application.
/// The application creates an instance of `Interp`, configures it with the required set
/// of application-specific and standard commands, and then uses it to evaluate scripts.
/// See the [module level documentation](index.html) for an overview.
///
/// # Example
///
/// ```
/// use mitcl::types::*;
/// use mitcl::Value;
/// use mitcl::Interp;
/// # fn dummy() -> MiResult {
/// let mut interp = Interp::new();
/// let four = interp.eval("add 2 2", &mut ())?;
/// assert_eq!(four, Value::from("4"));
/// # Ok(four)
/// # }
/// ```
pub struct Interp<Ctx = ()> {
    // Builtin Command Table
    commands: IndexMap<String, Rc<Builtin<Ctx>>, MiHasher>,

    // Variable and Procedure Tables
    scopes: ScopeStack,

    // Defines the recursion limit for Interp::eval().
    recursion_limit: usize,

    // Current number of eval levels.
    num_levels: usize,

    // Where print and println write.
    output: OutputFunc,
}

/// A builtin command, implemented in Rust.
enum Builtin<Ctx> {
    /// A command implemented as a Rust CommandFunc.
    Native(CommandFunc<Ctx>),

    #[cfg(feature = "closure-commands")]
    Closure(CommandClosure<Ctx>),
}

impl<Ctx> Builtin<Ctx> {
    fn execute(&self, interp: &mut Interp<Ctx>, argv: &[Value], ctx: &mut Ctx) -> MiResult {
        match self {
            Builtin::Native(func) => func(interp, argv, ctx),
            #[cfg(feature = "closure-commands")]
            Builtin::Closure(func) => func(interp, argv, ctx),
        }
    }
}

/// Anything a command name can resolve to.
enum Callable<Ctx> {
    /// A user-defined procedure, found through the scope chain.
    Proc(Rc<Procedure>),

    /// A builtin command, found in the command table.
    Builtin(Rc<Builtin<Ctx>>),
}

impl<Ctx> Callable<Ctx> {
    /// Execute the command according to its kind.
    fn execute(&self, interp: &mut Interp<Ctx>, argv: &[Value], ctx: &mut Ctx) -> MiResult {
        match self {
            Callable::Proc(proc) => proc.execute(interp, argv, ctx),
            Callable::Builtin(builtin) => builtin.execute(interp, argv, ctx),
        }
    }

    /// Returns true if the command is a proc, and false otherwise.
    fn is_proc(&self) -> bool {
        matches!(self, Callable::Proc(_))
    }
}

/// How a scanned command finished.
enum Completion {
    /// There were no words to evaluate.
    Empty,

    /// The command was dispatched and produced a value.
    Value(Value),

    /// The command was `return`; evaluation of the script stops here.
    Return(Value),
}

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        fn default_output() -> OutputFunc {
            Box::new(|text| {
                use std::io::Write;

                let mut stdout = std::io::stdout();
                // Output errors have nowhere to go; print has no error result.
                let _ = stdout.write_all(text.as_bytes());
                let _ = stdout.flush();
            })
        }
    } else {
        fn default_output() -> OutputFunc {
            Box::new(|_| ())
        }
    }
}

impl<Ctx> Default for Interp<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

// NOTE: The order of methods in the generated RustDoc depends on the order in this block.
// Consequently, methods are ordered pedagogically.
impl<Ctx> Interp<Ctx> {
    //--------------------------------------------------------------------------------------------
    // Constructors

    /// Creates a new interpreter with no commands defined.  Use this when crafting
    /// command languages that shouldn't include the standard commands, or as a base
    /// to which specific command sets can be added.
    ///
    /// # Example
    ///
    /// ```
    /// # use mitcl::interp::Interp;
    /// let interp = Interp::<()>::empty();
    /// assert!(interp.command_names().is_empty());
    /// ```
    pub fn empty() -> Self {
        Self {
            commands: IndexMap::default(),
            scopes: ScopeStack::new(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            num_levels: 0,
            output: default_output(),
        }
    }

    /// Creates a new interpreter that is pre-populated with the standard commands.
    /// Use [`command_names`](#method.command_names) to retrieve the full list, and
    /// [`add_command`](#method.add_command) to extend the interpreter with new commands.
    ///
    /// ```
    /// # use mitcl::types::*;
    /// # use mitcl::Value;
    /// # use mitcl::Interp;
    /// # fn dummy() -> MiResult {
    /// let mut interp = Interp::new();
    /// let product = interp.eval("mul 1 2 3 4 5 6", &mut ())?;
    /// assert_eq!(product, Value::from("720"));
    /// # Ok(product)
    /// # }
    /// ```
    pub fn new() -> Self {
        let mut interp = Interp::empty();

        let new_commands: &[(&'static str, CommandFunc<Ctx>)] = &[
            ("var", commands::cmd_var),
            ("let", commands::cmd_let),
            ("proc", commands::cmd_proc),
            ("if", commands::cmd_if),
            ("add", commands::cmd_add),
            ("mul", commands::cmd_mul),
            ("eq", commands::cmd_eq),
            ("print", commands::cmd_print),
            ("println", commands::cmd_println),
        ];

        for &(name, func) in new_commands {
            interp.add_command(name, func);
        }

        interp
    }

    //--------------------------------------------------------------------------------------------
    // Script Evaluation

    /// Evaluates a script one command at a time, in the current scope.  Returns the value
    /// of the last command in the script, or the value of an explicit `return`, or the
    /// first error.  The returned value also becomes the current scope's
    /// [`last_result`](#method.last_result).
    ///
    /// Use this method to evaluate arbitrary scripts, control structure bodies, and so
    /// forth.
    ///
    /// # Example
    ///
    /// The following code shows how to evaluate a script and handle the result, whether
    /// it's a computed `Value` or an error.
    ///
    /// ```
    /// # use mitcl::types::*;
    /// # use mitcl::Interp;
    /// let mut interp = Interp::new();
    ///
    /// match interp.eval("var a 1", &mut ()) {
    ///    Ok(val) => println!("Value: {}", val),
    ///    Err(exception) => println!("Error: {}", exception),
    /// }
    /// ```
    pub fn eval(&mut self, script: &str, ctx: &mut Ctx) -> MiResult {
        // FIRST, check the number of nesting levels
        self.num_levels += 1;

        if self.num_levels > self.recursion_limit {
            self.num_levels -= 1;
            warn!("recursion limit {} exceeded", self.recursion_limit);
            return Err(Exception::new(ErrorKind::RecursionLimitExceeded(
                self.recursion_limit,
            )));
        }

        // NEXT, evaluate the script.
        let result = self.eval_script(script, ctx);

        // NEXT, decrement the number of nesting levels.
        self.num_levels -= 1;

        result
    }

    /// Evaluates the string value of a [`Value`] as a script.  This is equivalent to
    /// [`eval`](#method.eval).
    ///
    /// [`Value`]: ../value/index.html
    pub fn eval_value(&mut self, script: &Value, ctx: &mut Ctx) -> MiResult {
        self.eval(script.as_str(), ctx)
    }

    /// Scans the script and evaluates each command as soon as its terminator arrives.
    ///
    /// `words` is the command being assembled.  A `(` suspends it on the `suspended`
    /// stack and starts a new one; the matching `)` evaluates the nested command and
    /// resumes the suspended one with the result appended as a single word.
    fn eval_script(&mut self, script: &str, ctx: &mut Ctx) -> MiResult {
        let mut scanner = Scanner::new(script);
        let mut words: Vec<Value> = Vec::new();
        let mut suspended: Vec<Vec<Value>> = Vec::new();
        let mut side_effect = Value::empty();

        loop {
            let event = scanner.next().transpose()?;
            let at_end = event.is_none();

            match event {
                Some(Event::Word(text)) => words.push(Value::from(text)),
                Some(Event::VarRef(name)) => {
                    let value = self.scopes.get(&name).unwrap_or_else(|| {
                        debug!("undefined variable {:?} substitutes empty", name);
                        Value::empty()
                    });
                    words.push(value);
                }
                Some(Event::OpenGroup) => suspended.push(mem::take(&mut words)),
                Some(Event::CloseGroup) => {
                    let value = match self.finish_command(&mut words, ctx)? {
                        Completion::Return(value) => return Ok(self.return_value(value)),
                        Completion::Value(value) => value,
                        Completion::Empty => Value::empty(),
                    };

                    words = suspended
                        .pop()
                        .ok_or_else(|| Exception::bad_state("group closed but none was open"))?;
                    words.push(value);
                }
                Some(Event::EndCommand) | None => {
                    match self.finish_command(&mut words, ctx)? {
                        Completion::Return(value) => return Ok(self.return_value(value)),
                        Completion::Value(value) => {
                            self.scopes.set_last_result(value.clone());
                            side_effect = value;
                        }
                        Completion::Empty => (),
                    }
                }
            }

            if at_end {
                break;
            }
        }

        if !suspended.is_empty() {
            return Err(Exception::bad_state("script ended inside an open group"));
        }

        Ok(side_effect)
    }

    /// Evaluates the assembled command, if there is one, and clears it.
    fn finish_command(
        &mut self,
        words: &mut Vec<Value>,
        ctx: &mut Ctx,
    ) -> Result<Completion, Exception> {
        let Some(name) = words.first() else {
            return Ok(Completion::Empty);
        };

        let completion = if name.as_str() == "return" {
            Completion::Return(Value::join(&words[1..]))
        } else {
            Completion::Value(self.dispatch(words, ctx)?)
        };

        words.clear();
        Ok(completion)
    }

    /// Records a `return` value as the current scope's result.
    fn return_value(&mut self, value: Value) -> Value {
        self.scopes.set_last_result(value.clone());
        value
    }

    /// Resolves the command named by `words[0]` and executes it.  Errors are annotated
    /// with the command that raised them.
    fn dispatch(&mut self, words: &[Value], ctx: &mut Ctx) -> MiResult {
        let name = words[0].as_str();

        let Some(callable) = self.resolve(name) else {
            let mut exception = Exception::no_such_procedure(name);
            exception.add_error_info("    while executing");
            exception.add_error_info(&format!("\"{}\"", Value::join(words)));
            return Err(exception);
        };

        trace!("dispatch {:?}", words);

        match callable.execute(self, words, ctx) {
            Ok(value) => Ok(value),
            Err(mut exception) => {
                // FIRST, new error, an error from within a proc, or an error from
                // within some other body (ignored).
                if exception.is_new_error() {
                    exception.add_error_info("    while executing");
                } else if callable.is_proc() {
                    exception.add_error_info("    invoked from within");
                    exception.add_error_info(&format!("    (procedure \"{}\")", name));
                } else {
                    return Err(exception);
                }

                exception.add_error_info(&format!("\"{}\"", Value::join(words)));
                Err(exception)
            }
        }
    }

    /// Looks the name up first as a procedure, through the scope chain, and then as a
    /// builtin.
    fn resolve(&self, name: &str) -> Option<Callable<Ctx>> {
        if let Some((_, proc)) = self.scopes.find_proc(name) {
            return Some(Callable::Proc(Rc::clone(proc)));
        }

        self.commands
            .get(name)
            .map(|builtin| Callable::Builtin(Rc::clone(builtin)))
    }

    /// Returns the result of the last command evaluated in the current scope.
    ///
    /// ```
    /// # use mitcl::types::*;
    /// # use mitcl::Value;
    /// # use mitcl::Interp;
    /// # fn dummy() -> MiResult {
    /// let mut interp = Interp::new();
    /// interp.eval("add 1 2; var x 5", &mut ())?;
    /// assert_eq!(interp.last_result().as_str(), "5");
    /// # Ok(Value::empty())
    /// # }
    /// ```
    pub fn last_result(&self) -> Value {
        self.scopes.last_result()
    }

    /// Determines whether or not the script is syntactically complete,
    /// e.g., has no unmatched quotes, braces, or parentheses.
    ///
    /// REPLs use this to determine whether or not to ask for another line of
    /// input.
    ///
    /// # Example
    ///
    /// ```
    /// # use mitcl::interp::Interp;
    /// let interp = Interp::<()>::new();
    /// assert!(interp.complete("var a (add 1 {2})"));
    /// assert!(!interp.complete("var a (add 1 {2"));
    /// ```
    pub fn complete(&self, script: &str) -> bool {
        scanner::is_complete(script)
    }

    //--------------------------------------------------------------------------------------------
    // Variable Handling

    /// Retrieves the value of the named variable, searching outward from the current
    /// scope.  Returns `None` if no scope defines it.
    ///
    /// # Example
    ///
    /// ```
    /// use mitcl::types::*;
    /// use mitcl::Value;
    /// use mitcl::Interp;
    /// # fn dummy() -> MiResult {
    /// let mut interp = Interp::new();
    ///
    /// interp.eval("var a 1", &mut ())?;
    /// assert_eq!(interp.var("a"), Some(Value::from("1")));
    /// assert_eq!(interp.var("b"), None);
    /// # Ok(Value::empty())
    /// # }
    /// ```
    pub fn var(&self, name: &str) -> Option<Value> {
        self.scopes.get(name)
    }

    /// Returns true if the named variable is visible from the current scope.
    pub fn var_exists(&self, name: &str) -> bool {
        self.scopes.exists(name)
    }

    /// Declares the named variable in the current scope, as the `var` command does.
    pub fn declare_var(&mut self, name: &str, value: Value) {
        self.scopes.declare(name, value);
    }

    /// Assigns the named variable in the scope that owns it, or declares it in the
    /// current scope if no scope does, as the `let` command does.
    ///
    /// # Example
    ///
    /// ```
    /// use mitcl::types::*;
    /// use mitcl::Value;
    /// use mitcl::Interp;
    /// let mut interp = Interp::<()>::new();
    ///
    /// interp.declare_var("a", Value::from("1"));
    /// interp.push_scope();
    /// interp.assign_var("a", Value::from("2"));
    /// interp.pop_scope();
    /// assert_eq!(interp.var("a"), Some(Value::from("2")));
    /// ```
    pub fn assign_var(&mut self, name: &str, value: Value) {
        self.scopes.assign(name, value);
    }

    /// Gets a list of the names of the variables visible from the current scope.
    pub fn vars_in_scope(&self) -> Vec<Value> {
        self.scopes.vars_in_scope()
    }

    /// Gets a list of the names of the variables declared in the current scope.
    pub fn vars_in_local_scope(&self) -> Vec<Value> {
        self.scopes.vars_in_local_scope()
    }

    /// Pushes a variable scope onto the scope stack.  Procedures use this to define their
    /// local scope.  Client code should seldom need to call this directly.
    pub fn push_scope(&mut self) {
        self.scopes.push();
        debug!("pushed scope {}", self.scopes.current());
    }

    /// Pops a variable scope off of the scope stack.  Calls to `Interp::push_scope` and
    /// `Interp::pop_scope` must exist in pairs.
    ///
    /// # Panics
    ///
    /// Panics if the current scope is the global scope.
    pub fn pop_scope(&mut self) {
        debug!("popping scope {}", self.scopes.current());
        self.scopes.pop();
    }

    /// Return the current scope level.  The global scope is level `0`; each call to
    /// `Interp::push_scope` adds a level, and each call to `Interp::pop_scope` removes it.
    pub fn scope_level(&self) -> usize {
        self.scopes.current()
    }

    //--------------------------------------------------------------------------------------------
    // Command Definition and Handling

    /// Adds a builtin command defined by a [`CommandFunc`], replacing any builtin of the
    /// same name.
    ///
    /// [`CommandFunc`]: ../types/type.CommandFunc.html
    pub fn add_command(&mut self, name: &str, func: CommandFunc<Ctx>) {
        self.commands
            .insert(name.into(), Rc::new(Builtin::Native(func)));
    }

    /// Adds a builtin command defined by a closure.
    ///
    /// # Example
    ///
    /// ```
    /// use mitcl::types::*;
    /// use mitcl::Value;
    /// use mitcl::Interp;
    /// # fn dummy() -> MiResult {
    /// let mut interp = Interp::new();
    /// let greeting = String::from("Hello");
    ///
    /// interp.add_command_closure("greet", move |_, argv, _| {
    ///     Ok(Value::from(format!("{}, {}!", greeting, argv[1])))
    /// });
    ///
    /// assert_eq!(interp.eval("greet world", &mut ())?.as_str(), "Hello, world!");
    /// # Ok(Value::empty())
    /// # }
    /// ```
    #[cfg(feature = "closure-commands")]
    pub fn add_command_closure(
        &mut self,
        name: &str,
        func: impl (Fn(&mut Self, &[Value], &mut Ctx) -> MiResult) + 'static,
    ) {
        self.commands
            .insert(name.into(), Rc::new(Builtin::Closure(Box::new(func))));
    }

    /// Determines whether the interpreter has a builtin command of the given name.
    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Removes the named builtin command, if it exists.
    pub fn remove_command(&mut self, name: &str) {
        self.commands.shift_remove(name);
    }

    /// Gets a list of the names of the builtin commands, in the order they were added.
    pub fn command_names(&self) -> Vec<Value> {
        self.commands.keys().map(Value::from).collect()
    }

    /// Defines a procedure in the current scope, as the `proc` command does.  A procedure
    /// of the same name in the current scope is replaced; one in an enclosing scope is
    /// shadowed.
    pub fn add_proc(&mut self, name: &str, parms: &[Value], body: &Value) {
        debug!("defining proc {} at scope {}", name, self.scopes.current());
        self.scopes
            .declare_proc(name, Procedure::new(parms.to_vec(), body.clone()));
    }

    /// Gets a list of the names of the procedures visible from the current scope.
    pub fn proc_names(&self) -> Vec<Value> {
        self.scopes.proc_names()
    }

    /// Returns the body of the named procedure, or an error if there is no such
    /// procedure.
    pub fn proc_body(&self, procname: &str) -> MiResult {
        match self.scopes.find_proc(procname) {
            Some((_, proc)) => Ok(proc.body().clone()),
            None => Err(Exception::no_such_procedure(procname)),
        }
    }

    /// Returns the parameter names of the named procedure, joined with spaces, or an
    /// error if there is no such procedure.
    ///
    /// ```
    /// # use mitcl::types::*;
    /// # use mitcl::Value;
    /// # use mitcl::Interp;
    /// # fn dummy() -> MiResult {
    /// let mut interp = Interp::new();
    /// interp.eval("proc sum a b { add $a $b }", &mut ())?;
    /// assert_eq!(interp.proc_args("sum")?.as_str(), "a b");
    /// assert_eq!(interp.proc_body("sum")?.as_str(), " add $a $b ");
    /// # Ok(Value::empty())
    /// # }
    /// ```
    pub fn proc_args(&self, procname: &str) -> MiResult {
        match self.scopes.find_proc(procname) {
            Some((_, proc)) => Ok(Value::join(proc.parms())),
            None => Err(Exception::no_such_procedure(procname)),
        }
    }

    //--------------------------------------------------------------------------------------------
    // Interpreter Configuration

    /// Gets the interpreter's recursion limit: how many nested calls to `Interp::eval`
    /// (procedure bodies and `if` branches) are allowed before evaluation fails with
    /// `RecursionLimitExceeded`.
    ///
    /// # Example
    /// ```
    /// # use mitcl::Interp;
    /// let interp = Interp::<()>::new();
    /// assert_eq!(interp.recursion_limit(), 250);
    /// ```
    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Sets the interpreter's recursion limit.  The default is 250.
    pub fn set_recursion_limit(&mut self, limit: usize) {
        self.recursion_limit = limit;
    }

    /// Redirects the output of `print` and `println`.  By default it goes to standard
    /// output.
    ///
    /// # Example
    ///
    /// ```
    /// use mitcl::Interp;
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let out = Rc::new(RefCell::new(String::new()));
    /// let sink = Rc::clone(&out);
    ///
    /// let mut interp = Interp::new();
    /// interp.set_output(move |text| sink.borrow_mut().push_str(text));
    /// interp.eval("println hello world", &mut ()).unwrap();
    ///
    /// assert_eq!(out.borrow().as_str(), "hello world\n");
    /// ```
    pub fn set_output(&mut self, output: impl FnMut(&str) + 'static) {
        self.output = Box::new(output);
    }

    /// Writes text to the interpreter's output.
    pub fn write_output(&mut self, text: &str) {
        (self.output)(text);
    }
}

/// A user-defined procedure: its parameter names and its unevaluated body.
pub(crate) struct Procedure {
    parms: Vec<Value>,

    body: Value,
}

impl Procedure {
    pub fn new(parms: Vec<Value>, body: Value) -> Self {
        Self { parms, body }
    }

    pub fn parms(&self) -> &[Value] {
        &self.parms
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Calls the procedure: binds the arguments to the parameters in a new scope, evaluates
    /// the body there, and returns the new scope's last result.  Missing arguments leave
    /// their parameters unbound; extra arguments are ignored.
    fn execute<Ctx>(&self, interp: &mut Interp<Ctx>, argv: &[Value], ctx: &mut Ctx) -> MiResult {
        // FIRST, push the proc's local scope onto the stack.
        interp.push_scope();

        // NEXT, bind the arguments, skipping the proc's name.
        for (parm, arg) in self.parms.iter().zip(&argv[1..]) {
            interp.declare_var(parm.as_str(), arg.clone());
        }

        // NEXT, evaluate the proc's body, getting the result.
        let result = interp.eval_value(&self.body, ctx);
        let value = interp.last_result();

        // NEXT, pop the scope off of the stack; we're done with it.
        interp.pop_scope();
        result?;

        // NEXT, the call's value is also the caller's latest result.
        interp.scopes.set_last_result(value.clone());
        Ok(value)
    }
}
