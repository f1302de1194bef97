// src/lexer/mod.rs
pub mod diag;
pub mod driver;
pub mod tables;
pub mod tokens;

pub use diag::{DiagKind, LexDiagnostic};
pub use driver::{Lexed, Lexer, Token, lex, lex_bytes, lex_file, lex_reader};
pub use tokens::{Label, NUM_TOKENS, TokenKind};
