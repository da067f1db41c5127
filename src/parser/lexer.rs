//! Lexer (tokenizer) for Pascal source code
//!
//! Converts raw source text into [`Token`]s on demand. The parser pulls one
//! token at a time through [`Lexer::next_token`]; [`Lexer::tokenize`] drains
//! the whole stream for callers that want it up front. `{ ... }` comments and
//! whitespace are skipped and never produce tokens.

use super::keywords;
use super::token::{SourceLocation, Token, TokenKind, TokenValue};
use thiserror::Error;
use tracing::{debug, trace};

/// What went wrong while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("Invalid character: '{ch}'")]
    InvalidCharacter { ch: char },

    #[error("Unterminated comment")]
    UnterminatedComment,

    #[error("Numeric constant out of range: {literal}")]
    NumberOutOfRange { literal: String },
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {location}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

impl LexError {
    fn new(kind: LexErrorKind, location: SourceLocation) -> Self {
        debug!(%location, offset = location.offset, "{}", kind);
        Self { kind, location }
    }

    /// 0-based character offset of the error.
    pub fn offset(&self) -> usize {
        self.location.offset
    }
}

/// Pull-based lexer over an in-memory source string.
///
/// Each instance owns its cursor. Once the input is exhausted every call to
/// [`Lexer::next_token`] returns an EOF token.
pub struct Lexer {
    text: Vec<char>,
    pos: usize,
    current_char: Option<char>,
    line: usize,
    column: usize,
    done: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(text: &str) -> Self {
        let text: Vec<char> = text.chars().collect();
        let current_char = text.first().copied();
        Self {
            text,
            pos: 0,
            current_char,
            line: 1,
            column: 1,
            done: false,
        }
    }

    /// Current 0-based character offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Location of the character under the cursor.
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.pos, self.line, self.column)
    }

    /// Tokenize the remaining input, up to and including EOF.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let at_end = token.is(TokenKind::Eof);
            tokens.push(token);
            if at_end {
                return Ok(tokens);
            }
        }
    }

    /// Produce the next token from the input.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let token = self.scan_token()?;
        trace!(token = %token, offset = token.location.offset, "lexed token");
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.skip_whitespace();
                continue;
            }

            if ch == '{' {
                let start = self.location();
                self.advance();
                self.skip_comment(start)?;
                continue;
            }

            if ch.is_ascii_alphabetic() {
                return Ok(self.identifier());
            }

            if ch.is_ascii_digit() {
                return self.number();
            }

            let loc = self.location();

            if ch == ':' && self.peek() == Some('=') {
                self.advance();
                self.advance();
                return Ok(Token::punct(TokenKind::Assign, loc));
            }

            let kind = match ch {
                ':' => TokenKind::Colon,
                ';' => TokenKind::Semi,
                '.' => TokenKind::Dot,
                ',' => TokenKind::Comma,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Mul,
                '/' => TokenKind::FloatDiv,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                _ => return Err(LexError::new(LexErrorKind::InvalidCharacter { ch }, loc)),
            };

            self.advance();
            return Ok(Token::punct(kind, loc));
        }

        Ok(Token::eof(self.location()))
    }

    /// Advance to next character
    fn advance(&mut self) {
        if let Some(ch) = self.current_char {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.pos += 1;
        self.current_char = self.text.get(self.pos).copied();
    }

    /// Character one past the cursor, without consuming
    fn peek(&self) -> Option<char> {
        self.text.get(self.pos + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    /// Skip the body of a `{ ... }` comment; the opening brace is already consumed.
    ///
    /// An unterminated comment leaves the cursor on its `{`.
    fn skip_comment(&mut self, start: SourceLocation) -> Result<(), LexError> {
        while let Some(ch) = self.current_char {
            self.advance();
            if ch == '}' {
                return Ok(());
            }
        }

        self.rewind(start);
        Err(LexError::new(LexErrorKind::UnterminatedComment, start))
    }

    /// Move the cursor back to `to`, so a failed scan repeats its error.
    fn rewind(&mut self, to: SourceLocation) {
        self.pos = to.offset;
        self.line = to.line;
        self.column = to.column;
        self.current_char = self.text.get(self.pos).copied();
    }

    /// Integer or real constant. A `.` is only consumed when a digit follows it.
    fn number(&mut self) -> Result<Token, LexError> {
        let loc = self.location();
        let mut literal = self.digits();

        let is_real = self.current_char == Some('.')
            && self.peek().is_some_and(|ch| ch.is_ascii_digit());

        let parsed = if is_real {
            self.advance();
            literal.push('.');
            literal.push_str(&self.digits());
            literal
                .parse::<f64>()
                .ok()
                .map(|x| (TokenKind::RealConst, TokenValue::Real(x)))
        } else {
            literal
                .parse::<i64>()
                .ok()
                .map(|n| (TokenKind::IntegerConst, TokenValue::Integer(n)))
        };

        match parsed {
            Some((kind, value)) => Ok(Token::new(kind, Some(value), loc)),
            None => {
                self.rewind(loc);
                Err(LexError::new(LexErrorKind::NumberOutOfRange { literal }, loc))
            }
        }
    }

    fn digits(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char {
            if !ch.is_ascii_digit() {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    /// Identifier or reserved word
    fn identifier(&mut self) -> Token {
        let loc = self.location();
        let mut result = String::new();

        while let Some(ch) = self.current_char {
            if !ch.is_ascii_alphanumeric() {
                break;
            }
            result.push(ch);
            self.advance();
        }

        let kind = keywords::lookup(&result).unwrap_or(TokenKind::Id);
        Token::new(kind, Some(TokenValue::Text(result)), loc)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    /// Yields tokens through the first EOF, or the first error, then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.next_token();
        if !matches!(result, Ok(ref token) if !token.is(TokenKind::Eof)) {
            self.done = true;
        }
        Some(result)
    }
}
