use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation for integers (wrapping) and doubles.
    /// - `Not`: boolean negation.
    /// - `Complement`: bitwise complement of an integer.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `position`: Position of the operator, for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use trio::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, lexer::Position, value::core::Value},
    /// };
    ///
    /// let pos = Position::unknown();
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Integer(5), &pos).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Complement, &Value::Integer(0), &pos).unwrap();
    /// assert_eq!(v, Value::Integer(-1));
    ///
    /// assert!(Context::eval_unary(UnaryOperator::Not, &Value::Integer(1), &pos).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, position: &Position) -> EvalResult<Value> {
        let result = match (op, value) {
            (UnaryOperator::Negate, Value::Integer(i)) => Ok(Value::Integer(i.wrapping_neg())),
            (UnaryOperator::Negate, Value::Double(d)) => Ok(Value::Double(-d)),
            (UnaryOperator::Negate, _) => Err("inner value is not number"),
            (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnaryOperator::Not, _) => Err("inner value is not boolean"),
            (UnaryOperator::Complement, Value::Integer(i)) => Ok(Value::Integer(!i)),
            (UnaryOperator::Complement, _) => Err("inner value is not integer"),
        };

        result.map_err(|reason| RuntimeError::OperatorFailed { op: op.symbol(),
                                                               reason,
                                                               position: position.clone() })
    }
}
