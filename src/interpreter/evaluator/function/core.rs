use std::{fmt, rc::Rc};

use crate::{
    ast::{Expr, FunctionDef},
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

/// Name under which the extra arguments of a variadic call are bound.
pub const VARIADIC_NAME: &str = "...";

/// Remaining stack below which a call continues on a fresh segment.
const STACK_RED_ZONE: usize = 256 * 1024;
/// Size of each stack segment allocated for nested calls.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Signature of the closure behind a [`NativeFunction`].
pub type NativeBody = dyn Fn(&mut Activation<'_>) -> EvalResult<Option<Value>>;

/// A function implemented by the host in Rust.
pub struct NativeFunction {
    name:     String,
    params:   Vec<String>,
    variadic: bool,
    body:     Box<NativeBody>,
}

impl NativeFunction {
    /// Creates a native function.
    ///
    /// # Parameters
    /// - `name`: The name scripts call it by.
    /// - `params`: Names of the required parameters, readable through
    ///   [`Activation::argument`].
    /// - `variadic`: Whether extra arguments are accepted; they are available
    ///   through [`Activation::variadic_arguments`].
    /// - `body`: The implementation. Returning `Ok(None)` means the call has no
    ///   value.
    ///
    /// # Example
    /// ```
    /// use trio::interpreter::{evaluator::function::core::NativeFunction, value::core::Value};
    ///
    /// let twice = NativeFunction::new("twice", &["x"], false, |activation| {
    ///     let x = activation.argument("x")?;
    ///     Ok(Some(Value::from(vec![x.clone(), x])))
    /// });
    /// assert_eq!(twice.name(), "twice");
    /// ```
    pub fn new(name: &str,
               params: &[&str],
               variadic: bool,
               body: impl Fn(&mut Activation<'_>) -> EvalResult<Option<Value>> + 'static)
               -> Self {
        Self { name: name.to_string(),
               params: params.iter().map(ToString::to_string).collect(),
               variadic,
               body: Box::new(body) }
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .field("params", &self.params)
         .field("variadic", &self.variadic)
         .finish_non_exhaustive()
    }
}

/// A callable registered in a scope.
#[derive(Debug, Clone)]
pub enum Function {
    /// Implemented by the host.
    Native(Rc<NativeFunction>),
    /// Declared in a script with `func`.
    User(Rc<FunctionDef>),
}

impl Function {
    /// Wraps a native function.
    #[must_use]
    pub fn native(function: NativeFunction) -> Self {
        Self::Native(Rc::new(function))
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Native(native) => &native.name,
            Self::User(def) => &def.name,
        }
    }

    /// Returns the named parameters.
    #[must_use]
    pub fn params(&self) -> &[String] {
        match self {
            Self::Native(native) => &native.params,
            Self::User(def) => &def.params,
        }
    }

    /// Returns whether extra arguments are accepted.
    #[must_use]
    pub fn is_variadic(&self) -> bool {
        match self {
            Self::Native(native) => native.variadic,
            Self::User(def) => def.variadic,
        }
    }

    /// Returns `true` if a call with `count` arguments is well-formed.
    ///
    /// A variadic function needs at least as many arguments as it has named
    /// parameters; any other function needs exactly that many.
    #[must_use]
    pub fn accepts(&self, count: usize) -> bool {
        let params = self.params().len();
        if self.is_variadic() {
            count >= params
        } else {
            count == params
        }
    }
}

/// The scope of one native function call.
///
/// Gives the native code access to its arguments, the call-site position and
/// the context.
pub struct Activation<'c> {
    context:  &'c mut Context,
    scope:    ScopeId,
    position: Position,
}

impl Activation<'_> {
    /// Returns the value bound to the parameter `name`.
    ///
    /// # Errors
    /// `VariableNotDefined` if there is no such parameter.
    pub fn argument(&self, name: &str) -> EvalResult<Value> {
        self.context.read_variable(self.scope, name, &self.position)
    }

    /// Returns the arguments beyond the named parameters of a variadic call.
    #[must_use]
    pub fn variadic_arguments(&self) -> Vec<Value> {
        match self.context
                  .variable(self.scope, VARIADIC_NAME)
                  .and_then(|v| v.value.as_ref())
        {
            Some(Value::List(list)) => list.borrow().clone(),
            _ => Vec::new(),
        }
    }

    /// Returns the position of the call.
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the context the call runs in.
    pub fn context(&mut self) -> &mut Context {
        self.context
    }

    /// Builds a host error at the call position.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> RuntimeError {
        RuntimeError::Host { message:  message.into(),
                             position: self.position.clone(), }
    }
}

impl Context {
    /// Calls the function `name` with the given argument expressions.
    ///
    /// The function is looked up from `scope` outwards. Arguments are
    /// evaluated left to right in `scope`, then bound in a fresh activation
    /// scope whose parent is `scope`, so the body also sees the caller's
    /// variables. For variadic functions the extra arguments are bound as a
    /// list named `...`.
    ///
    /// # Returns
    /// The returned value, or `None` if the function returned nothing.
    ///
    /// # Errors
    /// - `FunctionNotDefined` if no such function is visible.
    /// - `ParameterCountMismatch` if the argument count does not fit.
    /// - `CallDepthExceeded` if calls nest too deeply.
    /// - `BreakOutsideLoop` / `ContinueOutsideLoop` if the body lets one escape.
    /// - Any error raised by the arguments or the body.
    pub fn call_function(&mut self,
                         name: &str,
                         arguments: &[Expr],
                         scope: ScopeId,
                         position: &Position)
                         -> EvalResult<Option<Value>> {
        let function =
            self.find_function(scope, name)
                .ok_or_else(|| RuntimeError::FunctionNotDefined { name:     name.to_string(),
                                                                  position: position.clone(), })?;

        if !function.accepts(arguments.len()) {
            return Err(RuntimeError::ParameterCountMismatch { name:     function.name().to_string(),
                                                              position: position.clone(), });
        }

        let values = arguments.iter()
                              .map(|a| self.eval(a, scope))
                              .collect::<EvalResult<Vec<_>>>()?;

        log::trace!("call {}({} arguments) at {position}", function.name(), values.len());

        self.enter_call(position)?;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
                         self.scoped(scope, |ctx, activation| {
                                 ctx.bind_arguments(&function, values, activation, position)?;
                                 ctx.invoke(&function, activation, position)
                             })
                     });
        self.leave_call();

        result
    }

    fn bind_arguments(&mut self,
                      function: &Function,
                      mut values: Vec<Value>,
                      activation: ScopeId,
                      position: &Position)
                      -> EvalResult<()> {
        let params = function.params();
        let extra = values.split_off(params.len());

        for (param, value) in params.iter().zip(values) {
            self.declare_variable(activation, param, Some(value), position)?;
        }
        if function.is_variadic() {
            self.declare_variable(activation, VARIADIC_NAME, Some(Value::from(extra)), position)?;
        }
        Ok(())
    }

    fn invoke(&mut self,
              function: &Function,
              activation: ScopeId,
              position: &Position)
              -> EvalResult<Option<Value>> {
        match function {
            Function::Native(native) => {
                let mut activation = Activation { context: self,
                                                  scope: activation,
                                                  position: position.clone() };
                (native.body)(&mut activation)
            },
            Function::User(def) => match self.exec_statement(&def.body, activation)? {
                Flow::Normal => Ok(None),
                Flow::Return { value, .. } => Ok(value),
                Flow::Break { position } => Err(RuntimeError::BreakOutsideLoop { position }),
                Flow::Continue { position } => Err(RuntimeError::ContinueOutsideLoop { position }),
            },
        }
    }
}
