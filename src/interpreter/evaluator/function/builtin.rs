use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, ScopeId},
            function::core::{Function, NativeFunction},
        },
        lexer::Position,
        value::core::Value,
    },
    util::num::{f64_to_i32_truncating, usize_to_i32_checked},
};

/// Type alias for builtin function handlers.
///
/// A builtin receives its single argument and the call position.
type BuiltinFn = fn(&Value, &Position) -> EvalResult<Value>;

/// Name of the single parameter every builtin declares.
const BUILTIN_PARAM: &str = "_";

/// Defines builtin functions by generating a lookup table and a name list.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table walked by [`register`]),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => $func:expr
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name: &'static str,
            func: BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "to_string" => to_string,
    "to_int"    => to_int,
    "count_of"  => count_of,
}

/// Declares every builtin in `scope`.
///
/// # Errors
/// `FunctionAlreadyDefined` if `scope` already has a function with a builtin
/// name.
pub fn register(context: &mut Context, scope: ScopeId) -> EvalResult<()> {
    for builtin in BUILTIN_TABLE {
        let func = builtin.func;
        let native = NativeFunction::new(builtin.name, &[BUILTIN_PARAM], false, move |activation| {
                         let value = activation.argument(BUILTIN_PARAM)?;
                         func(&value, activation.position()).map(Some)
                     });
        context.declare_function(scope, Function::native(native), &Position::unknown())?;
    }
    Ok(())
}

/// Renders a value as a string.
///
/// Strings are returned unchanged; everything else uses its display form.
///
/// # Example
/// ```
/// use trio::interpreter::{
///     evaluator::function::builtin::to_string, lexer::Position, value::core::Value,
/// };
///
/// let list = Value::from(vec![Value::Integer(1), Value::Double(2.5)]);
/// assert_eq!(to_string(&list, &Position::unknown()).unwrap(), Value::from("[1,2.5]"));
/// ```
pub fn to_string(value: &Value, _position: &Position) -> EvalResult<Value> {
    match value {
        Value::Str(_) => Ok(value.clone()),
        _ => Ok(Value::from(value.to_string())),
    }
}

/// Converts a value to an integer.
///
/// Integers are returned unchanged, doubles are truncated toward zero, `true`
/// becomes `-1` and `false` becomes `0`.
///
/// # Errors
/// `ConversionFailed` for strings, lists, NaN and doubles outside the integer
/// range.
///
/// # Example
/// ```
/// use trio::interpreter::{
///     evaluator::function::builtin::to_int, lexer::Position, value::core::Value,
/// };
///
/// let pos = Position::unknown();
/// assert_eq!(to_int(&Value::Double(-3.7), &pos).unwrap(), Value::Integer(-3));
/// assert_eq!(to_int(&Value::Bool(true), &pos).unwrap(), Value::Integer(-1));
/// assert!(to_int(&Value::from("12"), &pos).is_err());
/// ```
pub fn to_int(value: &Value, position: &Position) -> EvalResult<Value> {
    let failed = || RuntimeError::ConversionFailed { position: position.clone() };

    match value {
        Value::Integer(_) => Ok(value.clone()),
        Value::Double(d) => Ok(Value::Integer(f64_to_i32_truncating(*d, failed())?)),
        Value::Bool(b) => Ok(Value::Integer(if *b { -1 } else { 0 })),
        Value::Str(_) | Value::List(_) => Err(failed()),
    }
}

/// Returns the number of elements in a list.
///
/// # Errors
/// `ExpressionNotCollection` if the value is not a list.
pub fn count_of(value: &Value, position: &Position) -> EvalResult<Value> {
    let Value::List(list) = value else {
        return Err(RuntimeError::ExpressionNotCollection { position: position.clone() });
    };
    let len = list.borrow().len();
    Ok(Value::Integer(usize_to_i32_checked(len,
                                           RuntimeError::ConversionFailed { position:
                                                                                position.clone() })?))
}
