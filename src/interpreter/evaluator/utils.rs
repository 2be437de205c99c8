use crate::{
    ast::{Expr, LValue},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, ScopeId},
        lexer::Position,
        value::core::{ListRef, Value},
    },
    util::num::list_index,
};

impl Context {
    /// Reads the value stored at an lvalue.
    ///
    /// # Errors
    /// - `VariableNotDefined` / `VariableNotInitialized` for the variable.
    /// - For indexed reads, the errors of [`Self::resolve_index`].
    pub(crate) fn read_lvalue(&mut self, lvalue: &LValue, scope: ScopeId) -> EvalResult<Value> {
        match lvalue {
            LValue::Variable { name, position } => self.read_variable(scope, name, position),
            LValue::Index { name,
                            index,
                            position, } => {
                let (list, i) = self.resolve_index(name, index, scope, position)?;
                let element = list.borrow()[i].clone();
                Ok(element)
            },
        }
    }

    /// Stores `value` at an lvalue.
    ///
    /// Assigning to an indexed lvalue mutates the shared list storage, so the
    /// change is visible through every alias of the list.
    ///
    /// # Errors
    /// - `VariableNotDefined` if the variable does not exist.
    /// - For indexed writes, the errors of [`Self::resolve_index`].
    pub(crate) fn assign_lvalue(&mut self,
                                lvalue: &LValue,
                                value: Value,
                                scope: ScopeId)
                                -> EvalResult<()> {
        match lvalue {
            LValue::Variable { name, position } => self.set_variable(scope, name, value, position),
            LValue::Index { name,
                            index,
                            position, } => {
                let (list, i) = self.resolve_index(name, index, scope, position)?;
                list.borrow_mut()[i] = value;
                Ok(())
            },
        }
    }

    /// Reads an initialized variable.
    pub(crate) fn read_variable(&self,
                                scope: ScopeId,
                                name: &str,
                                position: &Position)
                                -> EvalResult<Value> {
        let variable = self.variable(scope, name)
                           .ok_or_else(|| RuntimeError::VariableNotDefined {
                               name:     name.to_string(),
                               position: position.clone(),
                           })?;
        variable.value
                .clone()
                .ok_or_else(|| RuntimeError::VariableNotInitialized { name:     name.to_string(),
                                                                      position: position.clone(), })
    }

    /// Overwrites the value of the nearest variable called `name`.
    pub(crate) fn set_variable(&mut self,
                               scope: ScopeId,
                               name: &str,
                               value: Value,
                               position: &Position)
                               -> EvalResult<()> {
        let variable = self.variable_mut(scope, name)
                           .ok_or_else(|| RuntimeError::VariableNotDefined {
                               name:     name.to_string(),
                               position: position.clone(),
                           })?;
        variable.value = Some(value);
        Ok(())
    }

    /// Resolves `name[index]` to the list storage and a checked position.
    ///
    /// Checks run in order: the variable exists, is initialized and holds a
    /// list; then the index is evaluated and must be an in-range integer.
    ///
    /// # Errors
    /// `VariableNotDefined`, `VariableNotInitialized`, `VariableNotCollection`,
    /// `IndexNotInteger` or `IndexOutOfRange`.
    fn resolve_index(&mut self,
                     name: &str,
                     index: &Expr,
                     scope: ScopeId,
                     position: &Position)
                     -> EvalResult<(ListRef, usize)> {
        let list = match self.read_variable(scope, name, position)? {
            Value::List(list) => list,
            _ => {
                return Err(RuntimeError::VariableNotCollection { name:     name.to_string(),
                                                                 position: position.clone(), });
            },
        };

        let index_position = index.position().clone();
        let Value::Integer(i) = self.eval(index, scope)? else {
            return Err(RuntimeError::IndexNotInteger { position: index_position });
        };

        let len = list.borrow().len();
        let i = list_index(i, len).ok_or(RuntimeError::IndexOutOfRange { index:    i,
                                                                          position: index_position, })?;
        Ok((list, i))
    }
}
