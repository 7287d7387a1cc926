//! Function call evaluation methods for the Interpreter.

use tern_lexer::TokenKind;

use super::Interpreter;
use crate::errors::{arity_mismatch, recursion_limit_exceeded, type_mismatch, EvalError};
use crate::value::{FunctionBody, FunctionValue};
use crate::{EvalResult, Mutability, TokenCursor, Value, Variable};

impl Interpreter {
    /// Evaluate the argument list after `(` and call `function`.
    pub(super) fn eval_call(
        &mut self,
        function: &FunctionValue,
        cursor: &mut TokenCursor<'_>,
    ) -> EvalResult {
        let args = self.eval_arguments(cursor)?;
        self.call_function(function, args)
    }

    /// Comma-separated expressions up to and including `)`, evaluated left
    /// to right in the caller's scope.
    fn eval_arguments(&mut self, cursor: &mut TokenCursor<'_>) -> Result<Vec<Value>, EvalError> {
        let mut args = Vec::new();
        if cursor.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.eval_expression(cursor)?);
            if cursor.eat(&TokenKind::RParen) {
                return Ok(args);
            }
            cursor.expect(&TokenKind::Comma, "`,` or `)` in argument list")?;
        }
    }

    /// Call `function` with already evaluated arguments.
    ///
    /// Natives run directly on `args`. Interpreted functions run their body
    /// in one new child scope holding the parameters as final bindings; the
    /// first `return` is the result, `Void` if none fires.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %function.name))]
    pub fn call_function(&mut self, function: &FunctionValue, args: Vec<Value>) -> EvalResult {
        let body = match &function.body {
            FunctionBody::Native {
                func,
                variadic: true,
            } => return func(args.as_slice()),
            FunctionBody::Native { func, .. } => {
                check_arguments(function, &args)?;
                return func(args.as_slice());
            }
            FunctionBody::Tokens(body) => body,
        };
        check_arguments(function, &args)?;
        if self.call_depth >= self.max_call_depth {
            return Err(recursion_limit_exceeded(self.max_call_depth));
        }

        self.call_depth += 1;
        let result = self.with_env_scope(|scoped| {
            for (parameter, arg) in function.parameters.iter().zip(args) {
                scoped.define(
                    &parameter.name,
                    Variable::new(Mutability::Final, parameter.ty, arg),
                )?;
            }
            scoped.exec_statements(&mut TokenCursor::new(body), false)
        });
        self.call_depth -= 1;

        match result {
            Ok(returned) => Ok(returned.unwrap_or(Value::Void)),
            Err(err) => Err(err.in_function(&function.name)),
        }
    }
}

/// Exact arity, then each argument against its declared parameter type.
fn check_arguments(function: &FunctionValue, args: &[Value]) -> Result<(), EvalError> {
    if args.len() != function.parameters.len() {
        return Err(arity_mismatch(
            &function.name,
            function.parameters.len(),
            args.len(),
        ));
    }
    for (parameter, arg) in function.parameters.iter().zip(args) {
        if let Some(ty) = parameter.ty {
            if !ty.accepts(arg) {
                return Err(type_mismatch(
                    format_args!("{ty} for parameter `{}`", parameter.name),
                    arg.type_name(),
                ));
            }
        }
    }
    Ok(())
}
