// Reserved-word table for the Pascal subset

use super::token::TokenKind;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// Reserved words and the token kinds they map to. Matching is case-sensitive.
pub const RESERVED_WORDS: [(&str, TokenKind); 7] = [
    ("PROGRAM", TokenKind::Program),
    ("VAR", TokenKind::Var),
    ("DIV", TokenKind::IntegerDiv),
    ("INTEGER", TokenKind::Integer),
    ("REAL", TokenKind::Real),
    ("BEGIN", TokenKind::Begin),
    ("END", TokenKind::End),
];

static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> =
    LazyLock::new(|| RESERVED_WORDS.iter().copied().collect());

/// Look up `text` in the reserved-word table.
pub fn lookup(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}
