//! # Introduction
//!
//! `pascal_front` is the front end of a small Pascal toolchain: a lexer that
//! turns source text into typed tokens, and the AST node model a
//! recursive-descent parser builds from them.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → (parser) → AST
//! ```
//!
//! 1. [`parser::lexer`] — pulls one [`Token`] at a time from an in-memory
//!    string, skipping whitespace and `{ ... }` comments.
//! 2. [`parser::ast`] — the closed [`AstNode`] sum type and its node structs.
//!    Constructors validate the tokens they receive.
//!
//! Parsing, evaluation and symbol tables live outside this crate.
//!
//! ## Example
//!
//! ```
//! use pascal_front::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("x := 3.14 { pi }");
//! let kinds: Vec<TokenKind> = lexer
//!     .tokenize()
//!     .unwrap()
//!     .into_iter()
//!     .map(|t| t.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Id, TokenKind::Assign, TokenKind::RealConst, TokenKind::Eof]
//! );
//! ```

pub mod parser;

pub use parser::ast::{
    Assign, AstError, AstNode, BinOp, Block, Compound, NodeRef, Num, Number, Program, Type,
    UnaryOp, Var, VarDecl,
};
pub use parser::lexer::{LexError, LexErrorKind, Lexer};
pub use parser::token::{SourceLocation, Token, TokenKind, TokenValue};
