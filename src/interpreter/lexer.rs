use std::{fmt, rc::Rc};

use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Raw token classes recognized by the lexer.
///
/// This enum only classifies a slice of the current line; the text and
/// position are attached afterwards when the [`Token`] is built.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
enum RawToken {
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\f\v\r\n]+", logos::skip)]
    Ignored,
    /// Double-quoted string literals, such as `"a\tb"`.
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#, allow_greedy = true)]
    String,
    /// Hexadecimal integer literals, such as `0x1F`.
    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexInteger,
    /// Floating literals, such as `1.5`, `.5`, `2e10` or `1.5e-3`.
    #[regex(r"[0-9]*\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Double,
    /// Decimal integer literals, such as `42`.
    #[regex(r"[0-9]+")]
    Integer,
    /// `true` or `false`.
    #[token("true")]
    #[token("false")]
    Boolean,
    #[token("func")]
    #[token("var")]
    #[token("foreach")]
    #[token("for")]
    #[token("in")]
    #[token("if")]
    #[token("else")]
    #[token("while")]
    #[token("return")]
    #[token("break")]
    #[token("continue")]
    Keyword,
    /// Identifier tokens; variable or function names such as `x` or `sum_of`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    #[token("...")]
    #[token("<=")]
    #[token(">=")]
    #[token("!=")]
    #[token("==")]
    #[token("&&")]
    #[token("||")]
    #[token("<<")]
    #[token(">>")]
    #[token("-")]
    #[token("+")]
    #[token("~")]
    #[token("!")]
    #[token("/")]
    #[token("*")]
    #[token("%")]
    #[token("&")]
    #[token("^")]
    #[token("|")]
    #[token("?")]
    #[token(":")]
    #[token("=")]
    #[token("<")]
    #[token(">")]
    #[token("(")]
    #[token(")")]
    #[token("{")]
    #[token("}")]
    #[token("[")]
    #[token("]")]
    #[token(";")]
    #[token(",")]
    Symbol,
}

/// The lexical class of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A string literal; the token text holds the decoded content.
    String,
    /// A floating literal.
    Double,
    /// A decimal integer literal.
    Integer,
    /// A hexadecimal integer literal; the token text holds the digits only.
    HexInteger,
    /// `true` or `false`.
    Boolean,
    /// A variable or function name.
    Identifier,
    /// A reserved word such as `while`.
    Keyword,
    /// An operator or punctuation mark.
    Symbol,
}

/// A location in a script.
///
/// Lines and columns are 1-based. A line of `0` marks a position that is not
/// known, e.g. the end of the input or a value registered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    /// The name of the script the position belongs to.
    pub script: Rc<str>,
    /// The 1-based line number.
    pub line:   usize,
    /// The 1-based column number, counted in characters.
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(script: Rc<str>, line: usize, column: usize) -> Self {
        Self { script, line, column }
    }

    /// Returns a position that carries no location information.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Returns `true` if the position points at an actual line.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.script, self.line, self.column)
    }
}

/// A classified slice of source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The lexical class.
    pub kind:     TokenKind,
    /// The token text. String literals are already unescaped and hex literals
    /// carry no `0x` prefix.
    pub text:     String,
    /// Where the token starts.
    pub position: Position,
}

impl Token {
    /// Returns `true` if the token is the given symbol.
    #[must_use]
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == symbol
    }

    /// Returns `true` if the token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }
}

/// Splits `text` into lines and tokenizes them.
///
/// Both `\n` and `\r\n` line endings are accepted.
///
/// # Errors
/// Returns [`ParseError::UnknownToken`] for any character that does not begin
/// a valid token.
///
/// # Example
/// ```
/// use trio::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("var x = 0x1f; // comment", "demo").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Keyword,
///             TokenKind::Identifier,
///             TokenKind::Symbol,
///             TokenKind::HexInteger,
///             TokenKind::Symbol]);
/// assert_eq!(tokens[3].text, "1f");
/// ```
pub fn tokenize(text: &str, script_name: &str) -> ParseResult<Vec<Token>> {
    let unified = text.replace("\r\n", "\n");
    let lines: Vec<&str> = unified.split('\n').collect();
    tokenize_lines(&lines, script_name)
}

/// Tokenizes a script given as separate lines.
///
/// # Parameters
/// - `lines`: The script, one entry per line.
/// - `script_name`: Name used in every token position.
///
/// # Returns
/// The tokens of all lines in order. Comments and whitespace are dropped.
///
/// # Errors
/// Returns [`ParseError::UnknownToken`] for the first character that does not
/// begin a valid token.
pub fn tokenize_lines(lines: &[&str], script_name: &str) -> ParseResult<Vec<Token>> {
    let script: Rc<str> = Rc::from(script_name);
    let mut tokens = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let mut lexer = RawToken::lexer(line);
        let mut column = 1;
        let mut scanned = 0;

        while let Some(raw) = lexer.next() {
            let span = lexer.span();
            column += line[scanned..span.start].chars().count();
            scanned = span.start;
            let position = Position::new(Rc::clone(&script), index + 1, column);
            let slice = lexer.slice();

            let Ok(raw) = raw else {
                let token = slice.chars().next().unwrap_or_default().to_string();
                return Err(ParseError::UnknownToken { token, position });
            };

            let (kind, text) = match raw {
                RawToken::String => (TokenKind::String, decode_escapes(&slice[1..slice.len() - 1])),
                RawToken::HexInteger => (TokenKind::HexInteger, slice[2..].to_string()),
                RawToken::Double => (TokenKind::Double, slice.to_string()),
                RawToken::Integer => (TokenKind::Integer, slice.to_string()),
                RawToken::Boolean => (TokenKind::Boolean, slice.to_string()),
                RawToken::Keyword => (TokenKind::Keyword, slice.to_string()),
                RawToken::Identifier => (TokenKind::Identifier, slice.to_string()),
                RawToken::Symbol => (TokenKind::Symbol, slice.to_string()),
                RawToken::Comment | RawToken::Ignored => continue,
            };

            tokens.push(Token { kind, text, position });
        }
    }

    log::debug!("tokenized {} lines of '{script_name}' into {} tokens",
                lines.len(),
                tokens.len());

    Ok(tokens)
}

/// Decodes the backslash escapes of a string literal body.
///
/// Supported escapes are `\a \b \t \v \n \r \f`, `\xH` with one to four
/// lowercase hex digits, `\oO` and `\O` with one to three octal digits in
/// `0..=6`. Any other escaped character stands for itself, which covers `\\`,
/// `\"` and `\7`.
///
/// # Example
/// ```
/// use trio::interpreter::lexer::decode_escapes;
///
/// assert_eq!(decode_escapes(r#"a\tb\x41\101\o102\"\q"#), "a\tbAAB\"q");
/// assert_eq!(decode_escapes(r"\x4F\7"), "\u{4}F7");
/// ```
#[must_use]
pub fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{0C}'),
            'x' => match read_digits(&mut chars, hex_digit, 16, 4) {
                Some(code) => out.push(code_to_char(code)),
                None => out.push('x'),
            },
            'o' => match read_digits(&mut chars, octal_digit, 8, 3) {
                Some(code) => out.push(code_to_char(code)),
                None => out.push('o'),
            },
            '0'..='6' => {
                let first = escaped.to_digit(8).unwrap_or_default();
                let rest = read_digits_from(&mut chars, octal_digit, 8, 2, first, 1);
                out.push(code_to_char(rest));
            },
            other => out.push(other),
        }
    }

    out
}

type DigitFn = fn(char) -> Option<u32>;

fn hex_digit(c: char) -> Option<u32> {
    if c.is_ascii_uppercase() { None } else { c.to_digit(16) }
}

fn octal_digit(c: char) -> Option<u32> {
    c.to_digit(8).filter(|&d| d < 7)
}

/// Reads up to `max` digits accepted by `digit`, returning `None` if there
/// are none.
fn read_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
               accept: DigitFn,
               radix: u32,
               max: usize)
               -> Option<u32> {
    chars.peek().copied().and_then(accept)?;
    Some(read_digits_from(chars, accept, radix, max, 0, 0))
}

fn read_digits_from(chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
                    accept: DigitFn,
                    radix: u32,
                    max: usize,
                    mut acc: u32,
                    already: usize)
                    -> u32 {
    let mut read = already;
    while read < max + already
          && let Some(digit) = chars.peek().copied().and_then(accept)
    {
        acc = acc * radix + digit;
        chars.next();
        read += 1;
    }
    acc
}

fn code_to_char(code: u32) -> char {
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source, "test").unwrap()
                                .into_iter()
                                .map(|t| (t.kind, t.text))
                                .collect()
    }

    #[test]
    fn classifies_literals() {
        let tokens = kinds_and_texts(r#"12 1.5 .5 1e3 2.5E-2 0XfF true "hi""#);
        assert_eq!(tokens,
                   vec![(TokenKind::Integer, "12".into()),
                        (TokenKind::Double, "1.5".into()),
                        (TokenKind::Double, ".5".into()),
                        (TokenKind::Double, "1e3".into()),
                        (TokenKind::Double, "2.5E-2".into()),
                        (TokenKind::HexInteger, "fF".into()),
                        (TokenKind::Boolean, "true".into()),
                        (TokenKind::String, "hi".into())]);
    }

    #[test]
    fn keywords_do_not_swallow_identifiers() {
        let tokens = kinds_and_texts("for format in inner foreach");
        assert_eq!(tokens,
                   vec![(TokenKind::Keyword, "for".into()),
                        (TokenKind::Identifier, "format".into()),
                        (TokenKind::Keyword, "in".into()),
                        (TokenKind::Identifier, "inner".into()),
                        (TokenKind::Keyword, "foreach".into())]);
    }

    #[test]
    fn multi_character_symbols_win() {
        let texts: Vec<_> = kinds_and_texts("a<=b<<c&&d...").into_iter()
                                                            .map(|(_, t)| t)
                                                            .collect();
        assert_eq!(texts, ["a", "<=", "b", "<<", "c", "&&", "d", "..."]);
    }

    #[test]
    fn comments_and_whitespace_are_dropped() {
        let tokens = kinds_and_texts("x // y z\n\t y");
        assert_eq!(tokens,
                   vec![(TokenKind::Identifier, "x".into()), (TokenKind::Identifier, "y".into())]);
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = tokenize("var a;\r\n  a = 1;", "pos").unwrap();
        let second_line_a = &tokens[3];
        assert_eq!(second_line_a.text, "a");
        assert_eq!(second_line_a.position.line, 2);
        assert_eq!(second_line_a.position.column, 3);
        assert_eq!(second_line_a.position.to_string(), "pos(2,3)");
    }

    #[test]
    fn columns_count_characters_across_a_long_line() {
        let tokens = tokenize("\"\u{e9}\u{e9}\" + x", "col").unwrap();
        assert_eq!(tokens[2].position.column, 8);

        let line = "a + ".repeat(500) + "b";
        let tokens = tokenize(&line, "col").unwrap();
        let last = tokens.last().unwrap();
        assert_eq!(last.text, "b");
        assert_eq!(last.position.column, 2001);
    }

    #[test]
    fn unknown_character_is_reported() {
        let err = tokenize("var a = 1;\nvar b = @;", "bad").unwrap_err();
        match err {
            ParseError::UnknownToken { token, position } => {
                assert_eq!(token, "@");
                assert_eq!((position.line, position.column), (2, 9));
            },
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn escapes_are_decoded() {
        assert_eq!(decode_escapes(r"\n\t\\"), "\n\t\\");
        assert_eq!(decode_escapes(r"\x4a\x"), "Jx");
        assert_eq!(decode_escapes(r"\0\6"), "\u{0}\u{6}");
        assert_eq!(decode_escapes(r"\1011"), "A1");
    }

    #[test]
    fn escape_digits_are_restricted() {
        assert_eq!(decode_escapes(r"\x4F"), "\u{4}F");
        assert_eq!(decode_escapes(r"\xA"), "xA");
        assert_eq!(decode_escapes(r"\7\17"), "7\u{1}7");
        assert_eq!(decode_escapes(r"\o17"), "\u{1}7");
        assert_eq!(decode_escapes(r"\o9"), "o9");
    }

    #[test]
    fn escaped_quote_stays_inside_string() {
        let tokens = kinds_and_texts(r#""a\"b" c"#);
        assert_eq!(tokens,
                   vec![(TokenKind::String, "a\"b".into()), (TokenKind::Identifier, "c".into())]);
    }
}
