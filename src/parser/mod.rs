// src/parser/mod.rs
pub mod compile;
pub mod emit;
pub mod error;
pub mod io;
pub mod symbols;
pub mod tables;

pub use compile::compile;
pub use emit::Artifacts;
pub use error::TableError;
pub use symbols::SymbolTable;
pub use tables::{Action, ParseTables, Rule};
