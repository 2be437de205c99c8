use crate::interpreter::lexer::Position;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// A character that does not begin any token.
    UnknownToken {
        /// The offending character.
        token:    String,
        /// Where the character was found.
        position: Position,
    },
    /// A numeric literal that does not fit its type.
    LiteralOutOfRange {
        /// The literal as written.
        literal:  String,
        /// Where the literal was found.
        position: Position,
    },
    /// Reached the end of input in the middle of a construct.
    UnexpectedEndOfFile {
        /// Position of the last token of the script. Unknown while the
        /// construct is being parsed; the script parser fills it in.
        position: Position,
    },
    /// An identifier was required.
    IdentifierExpected {
        /// Where the identifier was expected.
        position: Position,
    },
    /// A statement was required.
    StatementExpected {
        /// Where the statement was expected.
        position: Position,
    },
    /// An expression was required.
    ExpressionExpected {
        /// Where the expression was expected.
        position: Position,
    },
    /// An operator was not followed by its operand.
    SubExpressionExpected {
        /// Where the operand was expected.
        position: Position,
    },
    /// A specific symbol such as `)` or `;` was required.
    SymbolExpected {
        /// The missing symbol.
        symbol:   &'static str,
        /// Where the symbol was expected.
        position: Position,
    },
    /// A specific keyword such as `in` was required.
    KeywordExpected {
        /// The missing keyword.
        keyword:  &'static str,
        /// Where the keyword was expected.
        position: Position,
    },
    /// A parameter followed the variadic `...` marker.
    EllipsisNotLast {
        /// Position of the extra parameter.
        position: Position,
    },
    /// A token that cannot start a top-level statement or declaration.
    UnexpectedToken {
        /// The token text.
        token:    String,
        /// Where the token was found.
        position: Position,
    },
}

impl ParseError {
    /// Returns the position the error refers to.
    #[must_use]
    pub const fn position(&self) -> &Position {
        match self {
            Self::UnknownToken { position, .. }
            | Self::LiteralOutOfRange { position, .. }
            | Self::UnexpectedEndOfFile { position }
            | Self::IdentifierExpected { position }
            | Self::StatementExpected { position }
            | Self::ExpressionExpected { position }
            | Self::SubExpressionExpected { position }
            | Self::SymbolExpected { position, .. }
            | Self::KeywordExpected { position, .. }
            | Self::EllipsisNotLast { position }
            | Self::UnexpectedToken { position, .. } => position,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::UnknownToken { token, .. } => format!("unknown token {token}"),
            Self::LiteralOutOfRange { literal, .. } => {
                format!("literal {literal} is out of range")
            },
            Self::UnexpectedEndOfFile { .. } => "unexpected end of file".to_string(),
            Self::IdentifierExpected { .. } => "identifier expected".to_string(),
            Self::StatementExpected { .. } => "statement expected".to_string(),
            Self::ExpressionExpected { .. } => "expression expected".to_string(),
            Self::SubExpressionExpected { .. } => "sub-expression expected".to_string(),
            Self::SymbolExpected { symbol, .. } => format!("{symbol} expected"),
            Self::KeywordExpected { keyword, .. } => format!("{keyword} expected"),
            Self::EllipsisNotLast { .. } => {
                "ellipsis should be at the end in the parameter list".to_string()
            },
            Self::UnexpectedToken { token, .. } => format!("unexpected token {token}"),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let position = self.position();
        if position.is_known() {
            write!(f, "{position}: {}", self.message())
        } else {
            f.write_str(&self.message())
        }
    }
}

impl std::error::Error for ParseError {}
