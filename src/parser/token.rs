//! Token definitions shared by the lexer and the AST
//!
//! A [`Token`] is an immutable value: a [`TokenKind`] drawn from a closed set,
//! an optional [`TokenValue`] payload and the [`SourceLocation`] of its first
//! character.

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// 0-based character offset into the source
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    IntegerConst,
    RealConst,

    // Operators
    Plus,
    Minus,
    Mul,
    IntegerDiv,
    FloatDiv,
    LParen,
    RParen,

    Id,

    // Reserved words
    Program,
    Var,
    Integer,
    Real,
    Begin,
    End,

    // Punctuation
    Assign,
    Semi,
    Colon,
    Comma,
    Dot,

    Eof,
}

impl TokenKind {
    /// Fixed source text of punctuation and reserved kinds.
    ///
    /// Returns `None` for kinds whose text varies (`IntegerConst`,
    /// `RealConst`, `Id`) and for `Eof`.
    pub fn lexeme(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Mul => "*",
            TokenKind::IntegerDiv => "DIV",
            TokenKind::FloatDiv => "/",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Program => "PROGRAM",
            TokenKind::Var => "VAR",
            TokenKind::Integer => "INTEGER",
            TokenKind::Real => "REAL",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::Assign => ":=",
            TokenKind::Semi => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::IntegerConst | TokenKind::RealConst | TokenKind::Id | TokenKind::Eof => {
                return None;
            }
        };
        Some(text)
    }

    /// Whether tokens of this kind are reserved words.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Program
                | TokenKind::Var
                | TokenKind::IntegerDiv
                | TokenKind::Integer
                | TokenKind::Real
                | TokenKind::Begin
                | TokenKind::End
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::IntegerConst => "INTEGER_CONST",
            TokenKind::RealConst => "REAL_CONST",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mul => "MUL",
            TokenKind::IntegerDiv => "INTEGER_DIV",
            TokenKind::FloatDiv => "FLOAT_DIV",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Id => "ID",
            TokenKind::Program => "PROGRAM",
            TokenKind::Var => "VAR",
            TokenKind::Integer => "INTEGER",
            TokenKind::Real => "REAL",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Semi => "SEMI",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// Literal payload carried by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Integer(i64),
    Real(f64),
    /// Identifier, reserved word or punctuation text
    Text(String),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Integer(n) => write!(f, "{}", n),
            TokenValue::Real(x) => write!(f, "{:?}", x),
            TokenValue::Text(s) => write!(f, "'{}'", s),
        }
    }
}

/// A single lexical unit.
///
/// `value` is `None` only for [`TokenKind::Eof`].
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<TokenValue>,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, value: Option<TokenValue>, location: SourceLocation) -> Self {
        Self {
            kind,
            value,
            location,
        }
    }

    /// Builds a token whose value is the fixed lexeme of `kind`.
    pub fn punct(kind: TokenKind, location: SourceLocation) -> Self {
        let value = kind.lexeme().map(|text| TokenValue::Text(text.to_string()));
        Self::new(kind, value, location)
    }

    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, None, location)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.value {
            Some(TokenValue::Integer(n)) => Some(n),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self.value {
            Some(TokenValue::Real(x)) => Some(x),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "Token({}, {})", self.kind, value),
            None => write!(f, "Token({})", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punct_carries_lexeme() {
        let token = Token::punct(TokenKind::Assign, SourceLocation::default());
        assert_eq!(token.as_text(), Some(":="));

        let token = Token::punct(TokenKind::IntegerDiv, SourceLocation::default());
        assert_eq!(token.as_text(), Some("DIV"));
    }

    #[test]
    fn test_variable_kinds_have_no_lexeme() {
        assert_eq!(TokenKind::Id.lexeme(), None);
        assert_eq!(TokenKind::IntegerConst.lexeme(), None);
        assert_eq!(TokenKind::RealConst.lexeme(), None);
        assert_eq!(TokenKind::Eof.lexeme(), None);
    }

    #[test]
    fn test_display() {
        let loc = SourceLocation::new(0, 1, 1);
        let int = Token::new(TokenKind::IntegerConst, Some(TokenValue::Integer(42)), loc);
        assert_eq!(int.to_string(), "Token(INTEGER_CONST, 42)");

        let real = Token::new(TokenKind::RealConst, Some(TokenValue::Real(3.0)), loc);
        assert_eq!(real.to_string(), "Token(REAL_CONST, 3.0)");

        assert_eq!(Token::punct(TokenKind::Plus, loc).to_string(), "Token(PLUS, '+')");
        assert_eq!(Token::eof(loc).to_string(), "Token(EOF)");
    }

    #[test]
    fn test_keyword_kinds() {
        assert!(TokenKind::IntegerDiv.is_keyword());
        assert!(TokenKind::Begin.is_keyword());
        assert!(!TokenKind::Id.is_keyword());
        assert!(!TokenKind::FloatDiv.is_keyword());
    }
}
