//! # Standard Mitcl Command Definitions
//!
//! This module defines the standard Mitcl commands.

use crate::check_args;
use crate::interp::Interp;
use crate::types::*;
use crate::value::Value;
use alloc::vec::Vec;

/// # var *varName* ?*value* ...?
///
/// Declares the variable in the current scope, shadowing any outer variable of the same
/// name.  The value is the remaining arguments joined with spaces.  Returns the value.
pub fn cmd_var<Ctx>(interp: &mut Interp<Ctx>, argv: &[Value], _: &mut Ctx) -> MiResult {
    check_args(1, argv, 2, 0, "varName ?value ...?")?;

    let value = Value::join(&argv[2..]);
    interp.declare_var(argv[1].as_str(), value.clone());

    Ok(value)
}

/// # let *varName* ?*value* ...?
///
/// Assigns the variable in the scope that owns it, or declares it in the current scope if
/// no scope does.  Returns the value.
pub fn cmd_let<Ctx>(interp: &mut Interp<Ctx>, argv: &[Value], _: &mut Ctx) -> MiResult {
    check_args(1, argv, 2, 0, "varName ?value ...?")?;

    let value = Value::join(&argv[2..]);
    interp.assign_var(argv[1].as_str(), value.clone());

    Ok(value)
}

/// # proc *name* ?*param* ...? *body*
///
/// Defines a procedure in the current scope.  Each parameter word may hold several
/// whitespace-separated names, so `proc p {a b} body` and `proc p a b body` are
/// equivalent, and `proc p {} body` takes no parameters.  Returns the name.
pub fn cmd_proc<Ctx>(interp: &mut Interp<Ctx>, argv: &[Value], _: &mut Ctx) -> MiResult {
    check_args(1, argv, 3, 0, "name ?param ...? body")?;

    let name = &argv[1];
    let body = &argv[argv.len() - 1];
    let parms: Vec<Value> = argv[2..argv.len() - 1]
        .iter()
        .flat_map(|word| word.as_str().split_whitespace())
        .map(Value::from)
        .collect();

    interp.add_proc(name.as_str(), &parms, body);

    Ok(name.clone())
}

/// # if *cond* *thenBody* ?else? ?*elseBody*?
///
/// Evaluates *thenBody* in the current scope if *cond* is a non-zero integer, and
/// *elseBody* (if given) otherwise.  Returns the value of the evaluated body, or the
/// empty string if none was evaluated.
pub fn cmd_if<Ctx>(interp: &mut Interp<Ctx>, argv: &[Value], ctx: &mut Ctx) -> MiResult {
    let (then_body, else_body) = match argv {
        [_, _, then_body] => (then_body, None),
        [_, _, then_body, else_body] if else_body.as_str() != "else" => {
            (then_body, Some(else_body))
        }
        [_, _, then_body, keyword, else_body] if keyword.as_str() == "else" => {
            (then_body, Some(else_body))
        }
        _ => return mi_err!("wrong # args: should be \"if cond thenBody ?else? ?elseBody?\""),
    };

    if argv[1].is_true() {
        interp.eval_value(then_body, ctx)
    } else if let Some(else_body) = else_body {
        interp.eval_value(else_body, ctx)
    } else {
        Ok(Value::empty())
    }
}

/// # add *int* ?*int* ...?
///
/// Returns the sum of the arguments.
pub fn cmd_add<Ctx>(_interp: &mut Interp<Ctx>, argv: &[Value], _: &mut Ctx) -> MiResult {
    check_args(1, argv, 2, 0, "int ?int ...?")?;

    let sum = argv[1..]
        .iter()
        .fold(0 as MiInt, |acc, arg| acc.wrapping_add(arg.as_int()));

    mi_ok!(sum)
}

/// # mul *int* ?*int* ...?
///
/// Returns the product of the arguments.
pub fn cmd_mul<Ctx>(_interp: &mut Interp<Ctx>, argv: &[Value], _: &mut Ctx) -> MiResult {
    check_args(1, argv, 2, 0, "int ?int ...?")?;

    let product = argv[1..]
        .iter()
        .fold(1 as MiInt, |acc, arg| acc.wrapping_mul(arg.as_int()));

    mi_ok!(product)
}

/// # eq *value* *value* ?*value* ...?
///
/// Returns `1` if every argument is textually equal to the first, and the empty string
/// otherwise.
pub fn cmd_eq<Ctx>(_interp: &mut Interp<Ctx>, argv: &[Value], _: &mut Ctx) -> MiResult {
    check_args(1, argv, 3, 0, "value value ?value ...?")?;

    let first = &argv[1];
    mi_ok!(argv[2..].iter().all(|arg| arg == first))
}

/// # print ?*value* ...?
///
/// Writes the arguments, joined with spaces, to the interpreter's output.
pub fn cmd_print<Ctx>(interp: &mut Interp<Ctx>, argv: &[Value], _: &mut Ctx) -> MiResult {
    check_args(1, argv, 1, 0, "?value ...?")?;

    interp.write_output(Value::join(&argv[1..]).as_str());
    mi_ok!()
}

/// # println ?*value* ...?
///
/// Like `print`, followed by a newline.
pub fn cmd_println<Ctx>(interp: &mut Interp<Ctx>, argv: &[Value], _: &mut Ctx) -> MiResult {
    check_args(1, argv, 1, 0, "?value ...?")?;

    interp.write_output(Value::join(&argv[1..]).as_str());
    interp.write_output("\n");
    mi_ok!()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::string::ToString as _;
    use core::cell::RefCell;

    fn eval(interp: &mut Interp, script: &str) -> String {
        match interp.eval(script, &mut ()) {
            Ok(value) => value.to_string(),
            Err(exception) => panic!("{:?} failed: {}", script, exception),
        }
    }

    fn eval_err(interp: &mut Interp, script: &str) -> String {
        match interp.eval(script, &mut ()) {
            Ok(value) => panic!("{:?} returned {:?}, expected an error", script, value),
            Err(exception) => {
                assert!(matches!(exception.kind(), ErrorKind::MalformedCommand(_)));
                exception.to_string()
            }
        }
    }

    #[test]
    fn test_var() {
        let mut interp = Interp::new();

        assert_eq!(eval(&mut interp, "var a 1"), "1");
        assert_eq!(eval(&mut interp, "var b x  y \"z w\""), "x y z w");
        assert_eq!(eval(&mut interp, "var c"), "");
        assert_eq!(interp.var("b"), Some(Value::from("x y z w")));
        assert_eq!(interp.var("c"), Some(Value::empty()));
        assert_eq!(
            eval_err(&mut interp, "var"),
            "wrong # args: should be \"var varName ?value ...?\""
        );
    }

    #[test]
    fn test_var_declares_locally() {
        let mut interp = Interp::new();

        eval(&mut interp, "var x 1; proc p {} { var x 2; return $x }");
        assert_eq!(eval(&mut interp, "p"), "2");
        assert_eq!(interp.var("x"), Some(Value::from("1")));
    }

    #[test]
    fn test_let() {
        let mut interp = Interp::new();

        assert_eq!(eval(&mut interp, "let a 1 2"), "1 2");
        assert_eq!(interp.var("a"), Some(Value::from("1 2")));

        eval(&mut interp, "proc p {} { let a 3; let b 4 }");
        eval(&mut interp, "p");
        assert_eq!(interp.var("a"), Some(Value::from("3")));
        assert_eq!(interp.var("b"), None);

        assert_eq!(
            eval_err(&mut interp, "let"),
            "wrong # args: should be \"let varName ?value ...?\""
        );
    }

    #[test]
    fn test_proc() {
        let mut interp = Interp::new();

        assert_eq!(eval(&mut interp, "proc p a b {add $a $b}"), "p");
        assert_eq!(interp.proc_args("p"), Ok(Value::from("a b")));
        assert_eq!(eval(&mut interp, "p 2 3"), "5");

        eval(&mut interp, "proc q {a b} {mul $a $b}");
        assert_eq!(interp.proc_args("q"), Ok(Value::from("a b")));
        assert_eq!(eval(&mut interp, "q 2 3"), "6");

        eval(&mut interp, "proc r {} {return r}");
        assert_eq!(interp.proc_args("r"), Ok(Value::empty()));

        // Redefinition replaces the old body.
        eval(&mut interp, "proc p a b {mul $a $b}");
        assert_eq!(eval(&mut interp, "p 2 3"), "6");

        assert_eq!(
            eval_err(&mut interp, "proc p"),
            "wrong # args: should be \"proc name ?param ...? body\""
        );
    }

    #[test]
    fn test_if() {
        let mut interp = Interp::new();

        for (cond, expected) in [("0", "no"), ("\"\"", "no"), ("1", "yes"), ("-5", "yes")] {
            let two = format!("if {} {{return yes}}", cond);
            let three = format!("if {} {{return yes}} {{return no}}", cond);
            let four = format!("if {} {{return yes}} else {{return no}}", cond);

            let without_else = if expected == "yes" { "yes" } else { "" };
            assert_eq!(eval(&mut interp, &two), without_else, "{}", two);
            assert_eq!(eval(&mut interp, &three), expected, "{}", three);
            assert_eq!(eval(&mut interp, &four), expected, "{}", four);
        }
    }

    #[test]
    fn test_if_same_scope() {
        let mut interp = Interp::new();

        eval(&mut interp, "if 1 { var inside 1 }");
        assert_eq!(interp.var("inside"), Some(Value::from("1")));
        assert_eq!(interp.scope_level(), 0);
    }

    #[test]
    fn test_if_branch_value() {
        let mut interp = Interp::new();

        assert_eq!(eval(&mut interp, "if 1 { add 1 1; mul 3 3 }"), "9");
        assert_eq!(eval(&mut interp, "add 1 (if 0 {return 1} {return 2})"), "3");
    }

    #[test]
    fn test_if_errors() {
        let mut interp = Interp::new();
        let msg = "wrong # args: should be \"if cond thenBody ?else? ?elseBody?\"";

        assert_eq!(eval_err(&mut interp, "if"), msg);
        assert_eq!(eval_err(&mut interp, "if 1"), msg);
        assert_eq!(eval_err(&mut interp, "if 1 {a} else"), msg);
        assert_eq!(eval_err(&mut interp, "if 1 {a} otherwise {b}"), msg);
        assert_eq!(eval_err(&mut interp, "if 1 {a} else {b} {c}"), msg);
    }

    #[test]
    fn test_add() {
        let mut interp = Interp::new();

        assert_eq!(eval(&mut interp, "add 1 2 3"), "6");
        assert_eq!(eval(&mut interp, "add 5"), "5");
        assert_eq!(eval(&mut interp, "add 0x10 010 -1"), "23");
        assert_eq!(eval(&mut interp, "add 1 abc"), "1");
        assert_eq!(
            eval_err(&mut interp, "add"),
            "wrong # args: should be \"add int ?int ...?\""
        );
    }

    #[test]
    fn test_mul() {
        let mut interp = Interp::new();

        assert_eq!(eval(&mut interp, "mul 1 2 3 4 5 6"), "720");
        assert_eq!(eval(&mut interp, "mul 7"), "7");
        assert_eq!(eval(&mut interp, "mul -2 3"), "-6");
        assert_eq!(eval(&mut interp, "mul 2 x"), "0");
        assert_eq!(
            eval_err(&mut interp, "mul"),
            "wrong # args: should be \"mul int ?int ...?\""
        );
    }

    #[test]
    fn test_eq() {
        let mut interp = Interp::new();

        assert_eq!(eval(&mut interp, "eq 1 1"), "1");
        assert_eq!(eval(&mut interp, "eq 1 2"), "");
        assert_eq!(eval(&mut interp, "eq 1 1 1"), "1");
        assert_eq!(eval(&mut interp, "eq 1 1 2"), "");
        assert_eq!(eval(&mut interp, "eq 1 01"), "");
        assert_eq!(eval(&mut interp, "eq \"a b\" {a b}"), "1");
        assert_eq!(
            eval_err(&mut interp, "eq 1"),
            "wrong # args: should be \"eq value value ?value ...?\""
        );
    }

    #[test]
    fn test_print() {
        let mut interp = Interp::new();
        let out = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&out);
        interp.set_output(move |text| sink.borrow_mut().push_str(text));

        assert_eq!(eval(&mut interp, "print a  b"), "");
        assert_eq!(eval(&mut interp, "print"), "");
        assert_eq!(eval(&mut interp, "println \" c\""), "");
        assert_eq!(eval(&mut interp, "println"), "");
        assert_eq!(eval(&mut interp, "println \"tab\\there\""), "");

        assert_eq!(out.borrow().as_str(), "a b c\n\ntab\there\n");
    }
}
