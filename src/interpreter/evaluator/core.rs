use std::collections::HashMap;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::function::core::Function,
        lexer::Position,
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit for nested function calls.
///
/// Calls move to freshly allocated stack segments when the current stack runs
/// low, so the limit holds on small thread stacks too.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 128;

/// Index of a scope inside a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// A declared variable. `value` is `None` until the variable is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The name as written at the declaration.
    pub name:  String,
    /// The current value, if initialized.
    pub value: Option<Value>,
}

#[derive(Debug)]
struct Scope {
    parent:    Option<ScopeId>,
    variables: HashMap<String, Variable>,
    functions: HashMap<String, Function>,
}

/// Stores the runtime evaluation context.
///
/// Scopes live in an arena and refer to their parent by index. A scope is
/// pushed when a block, loop, conditional or call starts and dropped when it
/// ends, so the arena always behaves as a stack. Scope `0` belongs to the host
/// and holds whatever it registered with [`Context::define_function`] and
/// [`Context::define_variable`].
///
/// Variable and function names are case-insensitive.
#[derive(Debug)]
pub struct Context {
    scopes:         Vec<Scope>,
    max_call_depth: usize,
    call_depth:     usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context holding only the empty host scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes:         vec![Scope::new(None)],
               max_call_depth: DEFAULT_MAX_CALL_DEPTH,
               call_depth:     0, }
    }

    /// Sets how deeply function calls may nest before
    /// [`RuntimeError::CallDepthExceeded`] is raised.
    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Returns the configured call depth limit.
    #[must_use]
    pub const fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Returns the host scope.
    #[must_use]
    pub const fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Registers a function in the host scope.
    ///
    /// # Errors
    /// `FunctionAlreadyDefined` if the name is taken.
    pub fn define_function(&mut self, function: Function) -> EvalResult<()> {
        self.declare_function(self.root(), function, &Position::unknown())
    }

    /// Declares an initialized variable in the host scope.
    ///
    /// # Errors
    /// `VariableAlreadyDefined` if the name is taken.
    pub fn define_variable(&mut self, name: &str, value: Value) -> EvalResult<()> {
        self.declare_variable(self.root(), name, Some(value), &Position::unknown())
    }

    /// Runs `body` in a fresh scope whose parent is `parent`.
    ///
    /// The scope and everything pushed after it are dropped when `body`
    /// returns, whether it succeeds or not.
    pub(crate) fn scoped<T>(&mut self,
                            parent: ScopeId,
                            body: impl FnOnce(&mut Self, ScopeId) -> EvalResult<T>)
                            -> EvalResult<T> {
        let depth = self.scopes.len();
        self.scopes.push(Scope::new(Some(parent)));
        let result = body(self, ScopeId(depth));
        self.scopes.truncate(depth);
        result
    }

    /// Declares a variable directly in `scope`.
    ///
    /// # Errors
    /// `VariableAlreadyDefined` if `scope` already declares the name. Names in
    /// enclosing scopes are shadowed, not rejected.
    pub(crate) fn declare_variable(&mut self,
                                   scope: ScopeId,
                                   name: &str,
                                   value: Option<Value>,
                                   position: &Position)
                                   -> EvalResult<()> {
        let variables = &mut self.scopes[scope.0].variables;
        let key = name.to_ascii_lowercase();
        if variables.contains_key(&key) {
            return Err(RuntimeError::VariableAlreadyDefined { name:     name.to_string(),
                                                              position: position.clone(), });
        }
        variables.insert(key,
                         Variable { name: name.to_string(),
                                    value });
        Ok(())
    }

    /// Declares a function directly in `scope`.
    ///
    /// # Errors
    /// `FunctionAlreadyDefined` if `scope` already declares the name.
    pub(crate) fn declare_function(&mut self,
                                   scope: ScopeId,
                                   function: Function,
                                   position: &Position)
                                   -> EvalResult<()> {
        let functions = &mut self.scopes[scope.0].functions;
        let key = function.name().to_ascii_lowercase();
        if functions.contains_key(&key) {
            return Err(RuntimeError::FunctionAlreadyDefined { name:     function.name().to_string(),
                                                              position: position.clone(), });
        }
        functions.insert(key, function);
        Ok(())
    }

    /// Looks a variable up from `scope` outwards.
    #[must_use]
    pub fn variable(&self, scope: ScopeId, name: &str) -> Option<&Variable> {
        let key = name.to_ascii_lowercase();
        let owner = self.find_variable_scope(scope, &key)?;
        self.scopes[owner.0].variables.get(&key)
    }

    /// Looks a variable up from `scope` outwards, for modification.
    pub(crate) fn variable_mut(&mut self, scope: ScopeId, name: &str) -> Option<&mut Variable> {
        let key = name.to_ascii_lowercase();
        let owner = self.find_variable_scope(scope, &key)?;
        self.scopes[owner.0].variables.get_mut(&key)
    }

    /// Looks a function up from `scope` outwards.
    pub(crate) fn find_function(&self, scope: ScopeId, name: &str) -> Option<Function> {
        let key = name.to_ascii_lowercase();
        self.ancestors(scope)
            .find_map(|id| self.scopes[id.0].functions.get(&key).cloned())
    }

    fn find_variable_scope(&self, scope: ScopeId, key: &str) -> Option<ScopeId> {
        self.ancestors(scope)
            .find(|id| self.scopes[id.0].variables.contains_key(key))
    }

    fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), |id| self.scopes[id.0].parent)
    }

    pub(crate) fn enter_call(&mut self, position: &Position) -> EvalResult<()> {
        if self.call_depth >= self.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded { depth:    self.max_call_depth,
                                                         position: position.clone(), });
        }
        self.call_depth += 1;
        Ok(())
    }

    pub(crate) const fn leave_call(&mut self) {
        self.call_depth -= 1;
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: constants, lvalues, unary and
    /// binary operations, assignments, conditionals, list literals and
    /// function calls.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `scope`: Scope in which names are resolved.
    ///
    /// # Returns
    /// The value of the expression.
    ///
    /// # Errors
    /// Any runtime error raised while evaluating the expression. A function
    /// call that returns nothing is `MissingReturnValue` here.
    pub fn eval(&mut self, expr: &Expr, scope: ScopeId) -> EvalResult<Value> {
        match expr {
            Expr::Constant { value, .. } => Ok(Value::from(value)),
            Expr::LValue(lvalue) => self.read_lvalue(lvalue, scope),
            Expr::UnaryOp { op, expr, position } => {
                let value = self.eval(expr, scope)?;
                Self::eval_unary(*op, &value, position)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             operator_position,
                             .. } => self.eval_binary_op(left, *op, right, scope, operator_position),
            Expr::Assign { target, value, .. } => {
                let value = self.eval(value, scope)?;
                self.assign_lvalue(target, value.clone(), scope)?;
                Ok(value)
            },
            Expr::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                if self.eval_condition(condition, scope)? {
                    self.eval(then_branch, scope)
                } else {
                    self.eval(else_branch, scope)
                }
            },
            Expr::ListLiteral { elements, .. } => {
                let values = elements.iter()
                                     .map(|e| self.eval(e, scope))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
            Expr::FunctionCall { name,
                                 arguments,
                                 position, } => {
                self.call_function(name, arguments, scope, position)?
                    .ok_or_else(|| RuntimeError::MissingReturnValue { name:     name.clone(),
                                                                      position: position.clone(), })
            },
        }
    }

    /// Evaluates a condition, which must produce a boolean.
    ///
    /// # Errors
    /// `ConditionNotBoolean` at the condition's position otherwise.
    pub(crate) fn eval_condition(&mut self, condition: &Expr, scope: ScopeId) -> EvalResult<bool> {
        match self.eval(condition, scope)? {
            Value::Bool(b) => Ok(b),
            _ => Err(RuntimeError::ConditionNotBoolean { position: condition.position().clone() }),
        }
    }
}

impl Scope {
    fn new(parent: Option<ScopeId>) -> Self {
        Self { parent,
               variables: HashMap::new(),
               functions: HashMap::new() }
    }
}
