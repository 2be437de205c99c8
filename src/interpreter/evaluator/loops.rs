use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, ScopeId},
            statement::Flow,
        },
        lexer::Position,
        value::core::Value,
    },
};

/// What a loop does after its body finished with `flow`.
enum Next {
    Iterate,
    Exit(Flow),
}

fn after_body(flow: Flow) -> Next {
    match flow {
        Flow::Normal | Flow::Continue { .. } => Next::Iterate,
        Flow::Break { .. } => Next::Exit(Flow::Normal),
        Flow::Return { .. } => Next::Exit(flow),
    }
}

impl Context {
    /// Executes `while (condition) body`.
    ///
    /// The loop runs in its own scope; the condition is re-evaluated before
    /// every iteration.
    pub(crate) fn exec_while(&mut self,
                             condition: &Expr,
                             body: &Statement,
                             scope: ScopeId)
                             -> EvalResult<Flow> {
        self.scoped(scope, |ctx, inner| {
                while ctx.eval_condition(condition, inner)? {
                    if let Next::Exit(flow) = after_body(ctx.exec_statement(body, inner)?) {
                        return Ok(flow);
                    }
                }
                Ok(Flow::Normal)
            })
    }

    /// Executes `for ([var name =] init; condition; step) body`.
    ///
    /// The loop scope holds the induction variable, so it is gone once the
    /// loop ends. `continue` still runs the step expression.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn exec_for(&mut self,
                           variable: Option<&str>,
                           init: &Expr,
                           condition: &Expr,
                           step: &Expr,
                           body: &Statement,
                           scope: ScopeId,
                           position: &Position)
                           -> EvalResult<Flow> {
        self.scoped(scope, |ctx, inner| {
                let initial = ctx.eval(init, inner)?;
                if let Some(name) = variable {
                    ctx.declare_variable(inner, name, Some(initial), position)?;
                }

                while ctx.eval_condition(condition, inner)? {
                    if let Next::Exit(flow) = after_body(ctx.exec_statement(body, inner)?) {
                        return Ok(flow);
                    }
                    ctx.eval(step, inner)?;
                }
                Ok(Flow::Normal)
            })
    }

    /// Executes `foreach (name in collection) body`.
    ///
    /// The collection is evaluated in the enclosing scope and must be a list.
    /// Elements are read by index on every iteration, so changes the body makes
    /// to the list are observed.
    pub(crate) fn exec_foreach(&mut self,
                               variable: &str,
                               collection: &Expr,
                               body: &Statement,
                               scope: ScopeId,
                               position: &Position)
                               -> EvalResult<Flow> {
        let Value::List(list) = self.eval(collection, scope)? else {
            return Err(RuntimeError::ExpressionNotCollection { position: collection.position()
                                                                                   .clone() });
        };

        self.scoped(scope, |ctx, inner| {
                ctx.declare_variable(inner, variable, None, position)?;

                let mut index = 0;
                loop {
                    let Some(item) = list.borrow().get(index).cloned() else {
                        break;
                    };
                    ctx.set_variable(inner, variable, item, position)?;

                    if let Next::Exit(flow) = after_body(ctx.exec_statement(body, inner)?) {
                        return Ok(flow);
                    }
                    index += 1;
                }
                Ok(Flow::Normal)
            })
    }
}
