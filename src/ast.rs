use std::{fmt, rc::Rc};

use crate::interpreter::lexer::Position;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code: integers (decimal or hex), doubles, booleans and strings. List
/// literals are expressions, since their elements are evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 32-bit signed integer literal.
    Integer(i32),
    /// A 64-bit floating-point literal.
    Double(f64),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A string literal with escapes already decoded.
    Str(Rc<str>),
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(Rc::from(value))
    }
}

/// An assignable location: a variable or one element of a list variable.
#[derive(Debug, Clone, PartialEq)]
pub enum LValue {
    /// A plain variable, e.g. `x`. The variadic pseudo-variable `...` is also
    /// a plain variable.
    Variable {
        /// Name of the variable.
        name:     String,
        /// Position of the name.
        position: Position,
    },
    /// An element of a list held by a variable, e.g. `xs[i + 1]`.
    Index {
        /// Name of the list variable.
        name:     String,
        /// The index expression.
        index:    Box<Expr>,
        /// Position of the name.
        position: Position,
    },
}

impl LValue {
    /// Returns the name of the underlying variable.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Variable { name, .. } | Self::Index { name, .. } => name,
        }
    }

    /// Returns the position of the variable name.
    #[must_use]
    pub const fn position(&self) -> &Position {
        match self {
            Self::Variable { position, .. } | Self::Index { position, .. } => position,
        }
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Each variant models a distinct syntactic construct and keeps the position
/// of the token that began it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean).
    Constant {
        /// The constant value.
        value:    LiteralValue,
        /// Position in the source code.
        position: Position,
    },
    /// Read access to a variable or list element.
    LValue(LValue),
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// A binary operation (addition, comparison, etc.).
    BinaryOp {
        /// Left operand.
        left:              Box<Self>,
        /// The operator.
        op:                BinaryOperator,
        /// Right operand.
        right:             Box<Self>,
        /// Position of the left operand.
        position:          Position,
        /// Position of the operator token.
        operator_position: Position,
    },
    /// Assignment `target = value`; evaluates to the assigned value.
    Assign {
        /// Where the value is stored.
        target:   LValue,
        /// The assigned expression.
        value:    Box<Self>,
        /// Position of the target.
        position: Position,
    },
    /// Conditional expression `condition ? then_branch : else_branch`.
    Conditional {
        /// Condition to test; must be boolean.
        condition:   Box<Self>,
        /// Value if the condition holds.
        then_branch: Box<Self>,
        /// Value otherwise.
        else_branch: Box<Self>,
        /// Position of the condition.
        position:    Position,
    },
    /// List literal, e.g. `[1, 2, 3]`.
    ListLiteral {
        /// Element expressions.
        elements: Vec<Self>,
        /// Position of the opening bracket.
        position: Position,
    },
    /// Function call expression (e.g. `count_of(xs)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Position of the function name.
        position:  Position,
    },
}

impl Expr {
    /// Returns the source position where this expression begins.
    ///
    /// # Returns
    /// The position recorded for the node.
    #[must_use]
    pub const fn position(&self) -> &Position {
        match self {
            Self::LValue(lvalue) => lvalue.position(),
            Self::Constant { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::Assign { position, .. }
            | Self::Conditional { position, .. }
            | Self::ListLiteral { position, .. }
            | Self::FunctionCall { position, .. } => position,
        }
    }
}

/// Represents a statement in the language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `var name;` or `var name = value;`
    VariableDeclaration {
        /// Name of the new variable.
        name:     String,
        /// Optional initializer.
        value:    Option<Expr>,
        /// Position of the `var` keyword.
        position: Position,
    },
    /// An expression evaluated for its side effects: an assignment or a call.
    Expression {
        /// The expression.
        expr:     Expr,
        /// Position of the expression.
        position: Position,
    },
    /// `for ([var name =] init; condition; step) body`
    For {
        /// Induction variable declared by the loop, if any.
        variable:  Option<String>,
        /// Initial expression; assigned to `variable` when present.
        init:      Expr,
        /// Loop condition; must be boolean.
        condition: Expr,
        /// Expression evaluated after each iteration.
        step:      Expr,
        /// Loop body.
        body:      Box<Self>,
        /// Position of the `for` keyword.
        position:  Position,
    },
    /// `foreach ([var] name in collection) body`
    ForEach {
        /// Loop variable, declared in the loop scope.
        variable:   String,
        /// Expression producing the list to walk.
        collection: Expr,
        /// Loop body.
        body:       Box<Self>,
        /// Position of the `foreach` keyword.
        position:   Position,
    },
    /// `if (condition) then_branch [else else_branch]`
    If {
        condition:   Expr,
        then_branch: Box<Self>,
        else_branch: Option<Box<Self>>,
        position:    Position,
    },
    /// `while (condition) body`
    While {
        condition: Expr,
        body:      Box<Self>,
        position:  Position,
    },
    /// `{ statements }`, evaluated in its own scope.
    Block {
        statements: Vec<Self>,
        position:   Position,
    },
    /// `return [value];`
    Return {
        value:    Option<Expr>,
        position: Position,
    },
    /// `break;`
    Break { position: Position },
    /// `continue;`
    Continue { position: Position },
}

impl Statement {
    /// Returns the source position where this statement begins.
    #[must_use]
    pub const fn position(&self) -> &Position {
        match self {
            Self::VariableDeclaration { position, .. }
            | Self::Expression { position, .. }
            | Self::For { position, .. }
            | Self::ForEach { position, .. }
            | Self::If { position, .. }
            | Self::While { position, .. }
            | Self::Block { position, .. }
            | Self::Return { position, .. }
            | Self::Break { position }
            | Self::Continue { position } => position,
        }
    }
}

/// A user function declared with `func`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Name of the function.
    pub name:     String,
    /// Named parameters in order.
    pub params:   Vec<String>,
    /// Whether a trailing `...` collects extra arguments.
    pub variadic: bool,
    /// Function body; always a [`Statement::Block`].
    pub body:     Statement,
    /// Position of the `func` keyword.
    pub position: Position,
}

/// A parsed script: its top-level statements and declared functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    /// Name used in diagnostics.
    pub name:       Rc<str>,
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
    /// Functions declared at top level, in source order.
    pub functions:  Vec<Rc<FunctionDef>>,
}

/// Binary operators, from tightest to loosest binding level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    ShiftLeft,
    ShiftRight,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    BitAnd,
    BitXor,
    BitOr,
    /// `&&`, short-circuiting.
    And,
    /// `||`, short-circuiting.
    Or,
}

impl BinaryOperator {
    /// Returns the operator spelled by `symbol`, if any.
    ///
    /// # Example
    /// ```
    /// use trio::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_symbol("<<"), Some(BinaryOperator::ShiftLeft));
    /// assert_eq!(BinaryOperator::from_symbol("="), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "+" => Self::Add,
            "-" => Self::Sub,
            "<<" => Self::ShiftLeft,
            ">>" => Self::ShiftRight,
            "<" => Self::Less,
            ">" => Self::Greater,
            "<=" => Self::LessEqual,
            ">=" => Self::GreaterEqual,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "&" => Self::BitAnd,
            "^" => Self::BitXor,
            "|" => Self::BitOr,
            "&&" => Self::And,
            "||" => Self::Or,
            _ => return None,
        };
        Some(op)
    }

    /// Returns the source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-x`
    Negate,
    /// `!x`
    Not,
    /// `~x`
    Complement,
}

impl UnaryOperator {
    /// Returns the operator spelled by `symbol`, if any.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(Self::Negate),
            "!" => Some(Self::Not),
            "~" => Some(Self::Complement),
            _ => None,
        }
    }

    /// Returns the source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "!",
            Self::Complement => "~",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
