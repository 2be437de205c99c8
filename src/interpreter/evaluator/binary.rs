use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, ScopeId},
        lexer::Position,
        value::core::{ListRef, Value},
    },
};

const NOT_DEFINED: &str = "not defined for combination of input values";
const DIVISION_BY_ZERO: &str = "division by zero";

type ListImpl = fn(&ListRef, &ListRef) -> Value;
type IntImpl = fn(i32, i32) -> Result<Value, &'static str>;
type DoubleImpl = fn(f64, f64) -> Value;
type StringImpl = fn(&str, &str) -> Value;
type BoolImpl = fn(bool, bool) -> Value;

/// The implementations of one binary operator, per operand kind.
///
/// [`apply_binary`] tries them in field order. The double implementation also
/// accepts integer operands, which are promoted.
#[derive(Default)]
pub struct OperatorImpls {
    pub list:   Option<ListImpl>,
    pub int:    Option<IntImpl>,
    pub double: Option<DoubleImpl>,
    pub string: Option<StringImpl>,
    pub bool:   Option<BoolImpl>,
}

/// Returns the implementation table for `op`.
///
/// `&&` and `||` have no entries; they short-circuit and are handled by the
/// evaluator directly.
#[must_use]
#[allow(clippy::float_cmp, clippy::cast_sign_loss)]
pub fn operator_impls(op: BinaryOperator) -> OperatorImpls {
    use BinaryOperator as Op;

    match op {
        Op::Mul => OperatorImpls { int: Some(|a, b| Ok(a.wrapping_mul(b).into())),
                                   double: Some(|a, b| (a * b).into()),
                                   ..Default::default() },
        Op::Div => OperatorImpls { int: Some(|a, b| {
                                       if b == 0 {
                                           return Err(DIVISION_BY_ZERO);
                                       }
                                       Ok(a.wrapping_div(b).into())
                                   }),
                                   double: Some(|a, b| (a / b).into()),
                                   ..Default::default() },
        Op::Mod => OperatorImpls { int: Some(|a, b| {
                                       if b == 0 {
                                           return Err(DIVISION_BY_ZERO);
                                       }
                                       Ok(a.wrapping_rem(b).into())
                                   }),
                                   double: Some(|a, b| (a % b).into()),
                                   ..Default::default() },
        Op::Add => OperatorImpls { list: Some(|a, b| {
                                       let mut joined = a.borrow().clone();
                                       joined.extend(b.borrow().iter().cloned());
                                       joined.into()
                                   }),
                                   int: Some(|a, b| Ok(a.wrapping_add(b).into())),
                                   double: Some(|a, b| (a + b).into()),
                                   string: Some(|a, b| format!("{a}{b}").into()),
                                   ..Default::default() },
        Op::Sub => OperatorImpls { int: Some(|a, b| Ok(a.wrapping_sub(b).into())),
                                   double: Some(|a, b| (a - b).into()),
                                   ..Default::default() },
        Op::ShiftLeft => OperatorImpls { int: Some(|a, b| Ok(a.wrapping_shl(b as u32).into())),
                                         ..Default::default() },
        Op::ShiftRight => OperatorImpls { int: Some(|a, b| Ok(a.wrapping_shr(b as u32).into())),
                                          ..Default::default() },
        Op::Less => OperatorImpls { int: Some(|a, b| Ok((a < b).into())),
                                    double: Some(|a, b| (a < b).into()),
                                    ..Default::default() },
        Op::Greater => OperatorImpls { int: Some(|a, b| Ok((a > b).into())),
                                       double: Some(|a, b| (a > b).into()),
                                       ..Default::default() },
        Op::LessEqual => OperatorImpls { int: Some(|a, b| Ok((a <= b).into())),
                                         double: Some(|a, b| (a <= b).into()),
                                         ..Default::default() },
        Op::GreaterEqual => OperatorImpls { int: Some(|a, b| Ok((a >= b).into())),
                                            double: Some(|a, b| (a >= b).into()),
                                            ..Default::default() },
        Op::Equal => OperatorImpls { list: Some(|a, b| (*a.borrow() == *b.borrow()).into()),
                                     int: Some(|a, b| Ok((a == b).into())),
                                     double: Some(|a, b| (a == b).into()),
                                     string: Some(|a, b| (a == b).into()),
                                     bool: Some(|a, b| (a == b).into()) },
        Op::NotEqual => OperatorImpls { list: Some(|a, b| (*a.borrow() != *b.borrow()).into()),
                                        int: Some(|a, b| Ok((a != b).into())),
                                        double: Some(|a, b| (a != b).into()),
                                        string: Some(|a, b| (a != b).into()),
                                        bool: Some(|a, b| (a != b).into()) },
        Op::BitAnd => OperatorImpls { int: Some(|a, b| Ok((a & b).into())),
                                      bool: Some(|a, b| (a & b).into()),
                                      ..Default::default() },
        Op::BitXor => OperatorImpls { int: Some(|a, b| Ok((a ^ b).into())),
                                      bool: Some(|a, b| (a ^ b).into()),
                                      ..Default::default() },
        Op::BitOr => OperatorImpls { int: Some(|a, b| Ok((a | b).into())),
                                     bool: Some(|a, b| (a | b).into()),
                                     ..Default::default() },
        Op::And | Op::Or => OperatorImpls::default(),
    }
}

/// Applies a non-short-circuiting binary operator to two values.
///
/// Implementations are tried in the order list, integer, double, string,
/// boolean; the first one matching both operands wins.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`, `right`: The evaluated operands.
/// - `position`: Position of the operator, for error reporting.
///
/// # Errors
/// `OperatorFailed` if no implementation applies, or if integer division or
/// remainder by zero is attempted.
///
/// # Example
/// ```
/// use trio::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::apply_binary, lexer::Position, value::core::Value},
/// };
///
/// let pos = Position::unknown();
/// let sum = apply_binary(BinaryOperator::Add, &Value::Integer(1), &Value::Double(0.5), &pos);
/// assert_eq!(sum.unwrap(), Value::Double(1.5));
///
/// let text = apply_binary(BinaryOperator::Add, &Value::from("a"), &Value::from("b"), &pos);
/// assert_eq!(text.unwrap(), Value::from("ab"));
///
/// assert!(apply_binary(BinaryOperator::Sub, &Value::from("a"), &Value::Integer(1), &pos).is_err());
/// ```
pub fn apply_binary(op: BinaryOperator,
                    left: &Value,
                    right: &Value,
                    position: &Position)
                    -> EvalResult<Value> {
    let impls = operator_impls(op);
    let failed = |reason| RuntimeError::OperatorFailed { op: op.symbol(),
                                                         reason,
                                                         position: position.clone() };

    if let (Value::List(a), Value::List(b)) = (left, right)
       && let Some(f) = impls.list
    {
        return Ok(f(a, b));
    }
    if let (Value::Integer(a), Value::Integer(b)) = (left, right)
       && let Some(f) = impls.int
    {
        return f(*a, *b).map_err(failed);
    }
    if let (Some(a), Some(b)) = (left.as_double(), right.as_double())
       && let Some(f) = impls.double
    {
        return Ok(f(a, b));
    }
    if let (Value::Str(a), Value::Str(b)) = (left, right)
       && let Some(f) = impls.string
    {
        return Ok(f(a, b));
    }
    if let (Value::Bool(a), Value::Bool(b)) = (left, right)
       && let Some(f) = impls.bool
    {
        return Ok(f(*a, *b));
    }

    Err(failed(NOT_DEFINED))
}

impl Context {
    /// Evaluates a binary operation.
    ///
    /// `&&` and `||` evaluate their right operand only when needed; every
    /// other operator evaluates both operands left to right.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 scope: ScopeId,
                                 position: &Position)
                                 -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logical(left, op, right, scope, position);
        }

        let left = self.eval(left, scope)?;
        let right = self.eval(right, scope)?;

        apply_binary(op, &left, &right, position)
    }

    fn eval_logical(&mut self,
                    left: &Expr,
                    op: BinaryOperator,
                    right: &Expr,
                    scope: ScopeId,
                    position: &Position)
                    -> EvalResult<Value> {
        let operand = |value: Value, reason| match value {
            Value::Bool(b) => Ok(b),
            _ => Err(RuntimeError::OperatorFailed { op: op.symbol(),
                                                    reason,
                                                    position: position.clone() }),
        };

        let left = operand(self.eval(left, scope)?, "left operand is not boolean")?;
        let short_circuit = match op {
            BinaryOperator::And => !left,
            _ => left,
        };
        if short_circuit {
            return Ok(Value::Bool(left));
        }

        let right = operand(self.eval(right, scope)?, "right operand is not boolean")?;
        Ok(Value::Bool(right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        apply_binary(op, &left, &right, &Position::unknown())
    }

    #[test]
    fn integer_arithmetic_wraps() {
        assert_eq!(apply(BinaryOperator::Add, i32::MAX.into(), 1.into()).unwrap(),
                   Value::Integer(i32::MIN));
        assert_eq!(apply(BinaryOperator::Div, i32::MIN.into(), (-1).into()).unwrap(),
                   Value::Integer(i32::MIN));
    }

    #[test]
    fn integer_division_truncates_and_remainder_follows_dividend() {
        assert_eq!(apply(BinaryOperator::Div, (-7).into(), 2.into()).unwrap(),
                   Value::Integer(-3));
        assert_eq!(apply(BinaryOperator::Mod, (-7).into(), 2.into()).unwrap(),
                   Value::Integer(-1));
    }

    #[test]
    fn division_by_zero_is_reported() {
        let err = apply(BinaryOperator::Mod, 1.into(), 0.into()).unwrap_err();
        assert_eq!(err.to_string(), "failed to apply % operator - division by zero");
        assert_eq!(apply(BinaryOperator::Div, 1.0.into(), 0.0.into()).unwrap(),
                   Value::Double(f64::INFINITY));
    }

    #[test]
    fn shifts_mask_their_count() {
        assert_eq!(apply(BinaryOperator::ShiftLeft, 1.into(), 33.into()).unwrap(),
                   Value::Integer(2));
        assert_eq!(apply(BinaryOperator::ShiftRight, (-8).into(), 1.into()).unwrap(),
                   Value::Integer(-4));
    }

    #[test]
    fn equality_promotes_numbers() {
        assert_eq!(apply(BinaryOperator::Equal, 1.into(), 1.0.into()).unwrap(),
                   Value::Bool(true));
        assert_eq!(apply(BinaryOperator::NotEqual, "a".into(), "b".into()).unwrap(),
                   Value::Bool(true));
    }

    #[test]
    fn lists_concatenate_into_new_storage() {
        let a = Value::from(vec![Value::Integer(1), Value::Integer(2)]);
        let b = Value::from(vec![Value::Integer(3)]);
        let joined = apply(BinaryOperator::Add, a.clone(), b).unwrap();
        assert_eq!(joined.to_string(), "[1,2,3]");
        assert_eq!(a.to_string(), "[1,2]");
    }

    #[test]
    fn booleans_support_bitwise_operators() {
        assert_eq!(apply(BinaryOperator::BitXor, true.into(), true.into()).unwrap(),
                   Value::Bool(false));
        assert!(apply(BinaryOperator::Less, true.into(), false.into()).is_err());
    }
}
