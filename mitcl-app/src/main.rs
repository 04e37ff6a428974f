use mitcl::Interp;
use std::env;

fn main() {
    env_logger::init();

    // FIRST, get the command line arguments.
    let args: Vec<String> = env::args().collect();

    // NEXT, create and initialize the interpreter.
    let mut interp = Interp::new();

    // NEXT, if there's a script, run it; otherwise, start the REPL.
    if args.len() > 1 {
        mitcl_shell::script(&mut interp, &args[1..], &mut ());
    } else {
        eprintln!("Mitcl {}", env!("CARGO_PKG_VERSION"));
        mitcl_shell::repl(&mut interp, &mut ());
    }
}
