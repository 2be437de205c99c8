use crate::{
    ast::{Expr, Statement},
    interpreter::{
        evaluator::core::{Context, EvalResult, ScopeId},
        lexer::Position,
        value::core::Value,
    },
};

/// How a statement finished.
///
/// Anything other than `Normal` stops the enclosing block and travels outward
/// until a loop (for `Break` and `Continue`) or a call (for `Return`) consumes
/// it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` statement, with its value if it had one.
    Return {
        value:    Option<Value>,
        position: Position,
    },
    /// A `break` statement.
    Break { position: Position },
    /// A `continue` statement.
    Continue { position: Position },
}

impl Context {
    /// Executes a single statement in `scope`.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    /// - `scope`: Scope in which names are declared and resolved.
    ///
    /// # Returns
    /// How the statement finished.
    pub fn exec_statement(&mut self, statement: &Statement, scope: ScopeId) -> EvalResult<Flow> {
        match statement {
            Statement::VariableDeclaration { name, value, position } => {
                self.declare_variable(scope, name, None, position)?;
                if let Some(value) = value {
                    let value = self.eval(value, scope)?;
                    self.set_variable(scope, name, value, position)?;
                }
                Ok(Flow::Normal)
            },
            Statement::Expression { expr, .. } => {
                self.exec_expression(expr, scope)?;
                Ok(Flow::Normal)
            },
            Statement::Block { statements, .. } => {
                self.scoped(scope, |ctx, inner| ctx.exec_statements(statements, inner))
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => self.scoped(scope, |ctx, inner| {
                                            if ctx.eval_condition(condition, inner)? {
                                                ctx.exec_statement(then_branch, inner)
                                            } else if let Some(else_branch) = else_branch {
                                                ctx.exec_statement(else_branch, inner)
                                            } else {
                                                Ok(Flow::Normal)
                                            }
                                        }),
            Statement::While { condition, body, .. } => self.exec_while(condition, body, scope),
            Statement::For { variable,
                             init,
                             condition,
                             step,
                             body,
                             position, } => {
                self.exec_for(variable.as_deref(), init, condition, step, body, scope, position)
            },
            Statement::ForEach { variable,
                                 collection,
                                 body,
                                 position, } => {
                self.exec_foreach(variable, collection, body, scope, position)
            },
            Statement::Return { value, position } => {
                let value = value.as_ref().map(|v| self.eval(v, scope)).transpose()?;
                Ok(Flow::Return { value,
                                  position: position.clone() })
            },
            Statement::Break { position } => Ok(Flow::Break { position: position.clone() }),
            Statement::Continue { position } => Ok(Flow::Continue { position: position.clone() }),
        }
    }

    /// Executes statements in order, stopping at the first one that does not
    /// finish normally.
    pub fn exec_statements(&mut self, statements: &[Statement], scope: ScopeId) -> EvalResult<Flow> {
        for statement in statements {
            let flow = self.exec_statement(statement, scope)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Evaluates an expression for its side effects.
    ///
    /// A call in statement position may return nothing.
    fn exec_expression(&mut self, expr: &Expr, scope: ScopeId) -> EvalResult<()> {
        if let Expr::FunctionCall { name,
                                    arguments,
                                    position, } = expr
        {
            self.call_function(name, arguments, scope, position)?;
        } else {
            self.eval(expr, scope)?;
        }
        Ok(())
    }
}
