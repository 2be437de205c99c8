use std::{cell::RefCell, fmt, rc::Rc};

use crate::ast::LiteralValue;

/// Shared, mutable list storage.
pub type ListRef = Rc<RefCell<Vec<Value>>>;

/// Represents a runtime value in the interpreter.
///
/// Values are cheap to clone: strings and lists are reference counted.
/// Cloning a list value aliases the same storage.
#[derive(Debug, Clone)]
pub enum Value {
    /// A boolean value (`true` or `false`).
    /// Produced by comparison and logical operators, and required by every
    /// condition.
    Bool(bool),
    /// A 32-bit signed integer. Arithmetic wraps on overflow.
    Integer(i32),
    /// A double precision floating-point number.
    Double(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// A list of values with shared, mutable storage.
    List(ListRef),
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(RefCell::new(v)))
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(i) => Self::Integer(*i),
            LiteralValue::Double(d) => Self::Double(*d),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Str(s) => Self::Str(Rc::clone(s)),
        }
    }
}

impl Value {
    /// Returns the numeric value as an `f64`, promoting integers.
    ///
    /// # Returns
    /// - `Some(f64)` for `Integer` and `Double`.
    /// - `None` for every other kind.
    ///
    /// # Example
    /// ```
    /// use trio::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(2).as_double(), Some(2.0));
    /// assert_eq!(Value::Bool(true).as_double(), None);
    /// ```
    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(f64::from(*i)),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the shared list storage if the value is a list.
    #[must_use]
    pub const fn as_list(&self) -> Option<&ListRef> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the name of the value's kind, as used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "int",
            Self::Double(_) => "double",
            Self::Str(_) => "string",
            Self::List(_) => "list",
        }
    }
}

/// Structural equality.
///
/// Values of different kinds are never equal, so `Integer(1)` differs from
/// `Double(1.0)`. Lists compare element-wise.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::Str(s) => f.write_str(s),
            Self::List(list) => {
                f.write_str("[")?;
                for (i, item) in list.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_never_compare_equal() {
        assert_ne!(Value::Integer(1), Value::Double(1.0));
        assert_ne!(Value::Integer(0), Value::Bool(false));
        assert_ne!(Value::from("1"), Value::Integer(1));
    }

    #[test]
    fn lists_compare_element_wise() {
        let a = Value::from(vec![Value::Integer(1), Value::from("x")]);
        let b = Value::from(vec![Value::Integer(1), Value::from("x")]);
        let c = Value::from(vec![Value::from("x"), Value::Integer(1)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn cloned_lists_share_storage() {
        let a = Value::from(vec![Value::Integer(1)]);
        let b = a.clone();
        if let Value::List(list) = &a {
            list.borrow_mut().push(Value::Integer(2));
        }
        assert_eq!(b.to_string(), "[1,2]");
    }

    #[test]
    fn rendering() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Double(3.0).to_string(), "3");
        assert_eq!(Value::Double(2.5).to_string(), "2.5");
        let nested = Value::from(vec![Value::Integer(1),
                                      Value::from(vec![Value::from("a"), Value::Bool(false)])]);
        assert_eq!(nested.to_string(), "[1,[a,false]]");
    }
}
