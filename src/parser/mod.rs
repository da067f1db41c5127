//! Pascal front end: source text to tokens, plus the AST a parser builds
//!
//! - [`token`]: Token kinds, payloads and source locations
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`keywords`]: Reserved-word table
//! - [`ast`]: AST node definitions
//!
//! # Supported Pascal Subset
//!
//! - `PROGRAM name;` header, `VAR` declarations of `INTEGER` / `REAL`
//! - `BEGIN ... END` compound statements, `:=` assignment
//! - Arithmetic with `+ - * / DIV`, unary signs, parentheses
//! - Integer and real constants, `{ ... }` comments
//!
//! The lexer is hand-written and pull-based; no parser generator is involved.

pub mod ast;
pub mod keywords;
pub mod lexer;
pub mod token;
