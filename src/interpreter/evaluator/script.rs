use std::rc::Rc;

use crate::{
    ast::Script,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{builtin, core::Function},
            statement::Flow,
        },
        value::core::Value,
    },
};

impl Script {
    /// Executes the script in `context`.
    ///
    /// A script scope is pushed under the host scope. The builtins and then
    /// the script's functions are declared in it, so every function is
    /// callable from the first statement on. The top-level statements run
    /// directly in the script scope.
    ///
    /// # Returns
    /// The value of a top-level `return`, or `None` if the script ran to its
    /// end or returned without a value.
    ///
    /// # Errors
    /// Any runtime error, including a `break` or `continue` outside a loop and
    /// a function declared twice.
    ///
    /// # Example
    /// ```
    /// use trio::{interpreter::{evaluator::core::Context, value::core::Value}, parse};
    ///
    /// let script = parse("func sq(x) { return x * x; } return sq(7);", "doc").unwrap();
    /// let result = script.execute(&mut Context::new()).unwrap();
    /// assert_eq!(result, Some(Value::Integer(49)));
    /// ```
    pub fn execute(&self, context: &mut Context) -> EvalResult<Option<Value>> {
        log::debug!("executing '{}'", self.name);

        context.scoped(context.root(), |ctx, scope| {
                   builtin::register(ctx, scope)?;
                   for function in &self.functions {
                       ctx.declare_function(scope,
                                            Function::User(Rc::clone(function)),
                                            &function.position)?;
                   }

                   match ctx.exec_statements(&self.statements, scope)? {
                       Flow::Normal => Ok(None),
                       Flow::Return { value, .. } => Ok(value),
                       Flow::Break { position } => Err(RuntimeError::BreakOutsideLoop { position }),
                       Flow::Continue { position } => {
                           Err(RuntimeError::ContinueOutsideLoop { position })
                       },
                   }
               })
    }
}
