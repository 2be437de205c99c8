use crate::interpreter::lexer::Position;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// A `var` declaration reused a name already declared in the same scope.
    VariableAlreadyDefined {
        /// The name of the variable.
        name:     String,
        /// Where the declaration happened.
        position: Position,
    },
    /// A function name was registered twice in the same scope.
    FunctionAlreadyDefined {
        /// The name of the function.
        name:     String,
        /// Where the declaration happened.
        position: Position,
    },
    /// Tried to use an undeclared variable.
    VariableNotDefined {
        /// The name of the variable.
        name:     String,
        /// Where the variable was referenced.
        position: Position,
    },
    /// Read a variable that was declared without a value and never assigned.
    VariableNotInitialized {
        /// The name of the variable.
        name:     String,
        /// Where the variable was read.
        position: Position,
    },
    /// Indexed a variable that does not hold a list.
    VariableNotCollection {
        /// The name of the variable.
        name:     String,
        /// Where the index access happened.
        position: Position,
    },
    /// A list was required, e.g. by `foreach` or `count_of`.
    ExpressionNotCollection {
        /// Position of the offending expression.
        position: Position,
    },
    /// An operator could not be applied to its operands.
    OperatorFailed {
        /// The operator symbol.
        op:       &'static str,
        /// What went wrong.
        reason:   &'static str,
        /// Position of the operator.
        position: Position,
    },
    /// A list index evaluated to something other than an integer.
    IndexNotInteger {
        /// Position of the index expression.
        position: Position,
    },
    /// A list index was negative or past the end.
    IndexOutOfRange {
        /// The requested index.
        index:    i32,
        /// Position of the index expression.
        position: Position,
    },
    /// A condition did not evaluate to a boolean.
    ConditionNotBoolean {
        /// Position of the condition.
        position: Position,
    },
    /// Called an unknown function.
    FunctionNotDefined {
        /// The name of the function.
        name:     String,
        /// Where the call happened.
        position: Position,
    },
    /// The wrong number of arguments was supplied to a function.
    ParameterCountMismatch {
        /// The name of the function.
        name:     String,
        /// Where the call happened.
        position: Position,
    },
    /// A call used as a value completed without returning one.
    MissingReturnValue {
        /// The name of the function.
        name:     String,
        /// Where the call happened.
        position: Position,
    },
    /// `break` reached a function or script boundary.
    BreakOutsideLoop {
        /// Position of the `break` statement.
        position: Position,
    },
    /// `continue` reached a function or script boundary.
    ContinueOutsideLoop {
        /// Position of the `continue` statement.
        position: Position,
    },
    /// A value could not be converted to an integer.
    ConversionFailed {
        /// Where the conversion was requested.
        position: Position,
    },
    /// Function calls nested deeper than the context allows.
    CallDepthExceeded {
        /// The configured limit.
        depth:    usize,
        /// Where the call happened.
        position: Position,
    },
    /// A failure reported by a host-provided native function.
    Host {
        /// Description supplied by the host.
        message:  String,
        /// Where the native function was called.
        position: Position,
    },
}

impl RuntimeError {
    /// Returns the position the error refers to.
    #[must_use]
    pub const fn position(&self) -> &Position {
        match self {
            Self::VariableAlreadyDefined { position, .. }
            | Self::FunctionAlreadyDefined { position, .. }
            | Self::VariableNotDefined { position, .. }
            | Self::VariableNotInitialized { position, .. }
            | Self::VariableNotCollection { position, .. }
            | Self::ExpressionNotCollection { position }
            | Self::OperatorFailed { position, .. }
            | Self::IndexNotInteger { position }
            | Self::IndexOutOfRange { position, .. }
            | Self::ConditionNotBoolean { position }
            | Self::FunctionNotDefined { position, .. }
            | Self::ParameterCountMismatch { position, .. }
            | Self::MissingReturnValue { position, .. }
            | Self::BreakOutsideLoop { position }
            | Self::ContinueOutsideLoop { position }
            | Self::ConversionFailed { position }
            | Self::CallDepthExceeded { position, .. }
            | Self::Host { position, .. } => position,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::VariableAlreadyDefined { name, .. } => format!("variable {name} already defined"),
            Self::FunctionAlreadyDefined { name, .. } => format!("function {name} already defined"),
            Self::VariableNotDefined { name, .. } => format!("variable {name} not defined"),
            Self::VariableNotInitialized { name, .. } => format!("variable {name} not initialized"),
            Self::VariableNotCollection { name, .. } => format!("variable {name} not collection"),
            Self::ExpressionNotCollection { .. } => "expression is not collection".to_string(),
            Self::OperatorFailed { op, reason, .. } => {
                format!("failed to apply {op} operator - {reason}")
            },
            Self::IndexNotInteger { .. } => "index expression is not an integer".to_string(),
            Self::IndexOutOfRange { index, .. } => format!("index {index} out of range"),
            Self::ConditionNotBoolean { .. } => "expression is not boolean".to_string(),
            Self::FunctionNotDefined { name, .. } => format!("function {name} not defined"),
            Self::ParameterCountMismatch { .. } => "parameters count mismatch".to_string(),
            Self::MissingReturnValue { name, .. } => format!("function {name} should return value"),
            Self::BreakOutsideLoop { .. } => "break without surrounding for or while".to_string(),
            Self::ContinueOutsideLoop { .. } => {
                "continue without surrounding for or while".to_string()
            },
            Self::ConversionFailed { .. } => "unable to convert value to integer".to_string(),
            Self::CallDepthExceeded { depth, .. } => format!("call depth limit {depth} exceeded"),
            Self::Host { message, .. } => message.clone(),
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let position = self.position();
        if position.is_known() {
            write!(f, "{position}: {}", self.message())
        } else {
            f.write_str(&self.message())
        }
    }
}

impl std::error::Error for RuntimeError {}
