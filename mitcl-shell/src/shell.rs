use log::{debug, info};
use mitcl::{Interp, Value};
use rustyline::{error::ReadlineError, history::MemHistory, Config, Editor};
use std::fs;

/// Invokes an interactive REPL for the given interpreter, using `rustyline` line editing.
///
/// The REPL will display a default prompt to the user.  Press `^C` or `^D` to terminate
/// the REPL, returning control to the caller.  Input that ends inside a quoted string,
/// brace block, or `( … )` group is continued on the next line before it is evaluated.
///
/// To change the prompt, set the `prompt` variable to a script that returns the desired
/// prompt.
///
/// # Example
///
/// ```no_run
/// use mitcl::Interp;
///
/// // FIRST, create and initialize the interpreter.
/// let mut interp = Interp::new();
///
/// // NOTE: commands can be added to the interpreter here.
///
/// // NEXT, invoke the REPL.
/// mitcl_shell::repl(&mut interp, &mut ());
/// ```
pub fn repl<Ctx>(interp: &mut Interp<Ctx>, ctx: &mut Ctx) {
    let mut rl = match Editor::<(), MemHistory>::with_history(Config::default(), MemHistory::new())
    {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("Could not start line editor: {}", err);
            return;
        }
    };

    let mut pending = String::new();

    loop {
        let readline = if !pending.is_empty() {
            rl.readline("> ")
        } else if let Some(pscript) = interp.var("prompt") {
            match interp.eval(pscript.as_str(), ctx) {
                Ok(prompt) => rl.readline(prompt.as_str()),
                Err(exception) => {
                    println!("{}", exception);
                    rl.readline("% ")
                }
            }
        } else {
            rl.readline("% ")
        };

        match readline {
            Ok(line) => {
                if !pending.is_empty() {
                    pending.push('\n');
                }
                pending.push_str(&line);

                if !interp.complete(&pending) {
                    debug!("incomplete input, reading another line");
                    continue;
                }

                let script = std::mem::take(&mut pending);
                let script = script.trim();

                if !script.is_empty() {
                    if let Err(e) = rl.add_history_entry(script) {
                        eprintln!("History error: {e}");
                    }

                    match interp.eval(script, ctx) {
                        Ok(value) => {
                            // Don't output empty values.
                            if !value.is_empty() {
                                println!("{}", value);
                            }
                        }
                        Err(exception) => {
                            println!("{}", exception);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("I/O Error: {:?}", err);
                break;
            }
        }
    }
}

/// Runs a script file named on the command line.
///
/// `args[0]` names the file; the rest are handed to the script.  Before the script runs,
/// two global variables are declared:
///
/// * `arg0`: the script's file name.
/// * `argv`: the remaining arguments, joined with spaces.
///
/// A file that can't be read is reported on standard error, and the process exits with
/// status 1.
///
/// # Example
///
/// ```no_run
/// use mitcl::Interp;
/// use std::env;
///
/// // FIRST, get the command line arguments.
/// let args: Vec<String> = env::args().collect();
///
/// // NEXT, create and initialize the interpreter.
/// let mut interp = Interp::new();
///
/// // NOTE: commands can be added to the interpreter here.
///
/// // NEXT, evaluate the file, if any.
/// if args.len() > 1 {
///     mitcl_shell::script(&mut interp, &args[1..], &mut ());
/// } else {
///     eprintln!("Usage: myshell *filename.mi");
/// }
/// ```
pub fn script<Ctx>(interp: &mut Interp<Ctx>, args: &[String], ctx: &mut Ctx) {
    let arg0 = &args[0];
    let argv = &args[1..];
    match load_script(arg0) {
        Ok(script) => execute_script(interp, script, arg0, argv, ctx),
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(1);
        }
    }
}

/// Reads a script file, naming the file in the error message.
fn load_script(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))
}

/// Declares `arg0` and `argv` and evaluates the script text.  On error, prints the error
/// trace to standard error and exits with status 1.
fn execute_script<Ctx>(
    interp: &mut Interp<Ctx>,
    script: String,
    arg0: &str,
    argv: &[String],
    ctx: &mut Ctx,
) {
    let argv: Vec<Value> = argv.iter().map(Value::from).collect();
    interp.declare_var("arg0", Value::from(arg0));
    interp.declare_var("argv", Value::join(&argv));

    info!("executing {}", arg0);

    match interp.eval(&script, ctx) {
        Ok(_) => (),
        Err(exception) => {
            eprintln!("{}", exception.error_info());
            std::process::exit(1);
        }
    }
}
