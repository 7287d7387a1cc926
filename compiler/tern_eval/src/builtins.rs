//! Standard natives registered on every interpreter unless disabled.
//!
//! All of them are variadic and return `Void`. Output goes through the
//! interpreter's print handler so hosts and tests can capture it.

use std::sync::Arc;

use crate::errors::{arity_mismatch, assertion_failed, type_mismatch};
use crate::{EvalResult, Interpreter, SharedPrintHandler, Value};

pub(crate) const PRINT: &str = "print";
pub(crate) const PRINTLN: &str = "println";
pub(crate) const CHECK_NOT_NULL: &str = "checkNotNull";
pub(crate) const CHECK_ARGUMENT: &str = "checkArgument";

/// Register `print`, `println`, `checkNotNull` and `checkArgument`.
pub(crate) fn register_std_natives(interpreter: &mut Interpreter) {
    let out = Arc::clone(interpreter.print_handler());
    interpreter.add_variadic_function(PRINT, move |args| print(&out, args, false));
    let out = Arc::clone(interpreter.print_handler());
    interpreter.add_variadic_function(PRINTLN, move |args| print(&out, args, true));
    interpreter.add_variadic_function(CHECK_NOT_NULL, check_not_null);
    interpreter.add_variadic_function(CHECK_ARGUMENT, check_argument);
}

/// Display forms joined by a single space.
pub(crate) fn join_args(args: &[Value]) -> String {
    let mut line = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(&arg.to_string());
    }
    line
}

fn print(out: &SharedPrintHandler, args: &[Value], newline: bool) -> EvalResult {
    let line = join_args(args);
    if newline {
        out.println(&line);
    } else {
        out.print(&line);
    }
    Ok(Value::Void)
}

/// Optional trailing message argument of the check natives.
fn message_or(args: &[Value], default: &str) -> String {
    args.get(1).map_or_else(|| default.to_string(), ToString::to_string)
}

fn check_not_null(args: &[Value]) -> EvalResult {
    match args.first() {
        None => Err(arity_mismatch(CHECK_NOT_NULL, 1, 0)),
        Some(Value::Void) => Err(assertion_failed(message_or(args, "value is void"))),
        Some(_) => Ok(Value::Void),
    }
}

fn check_argument(args: &[Value]) -> EvalResult {
    match args.first() {
        None => Err(arity_mismatch(CHECK_ARGUMENT, 1, 0)),
        Some(Value::Boolean(true)) => Ok(Value::Void),
        Some(Value::Boolean(false)) => Err(assertion_failed(message_or(
            args,
            "argument check failed",
        ))),
        Some(other) => Err(type_mismatch("boolean", other.type_name())),
    }
}
