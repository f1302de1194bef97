// src/lexer/tables/mod.rs
pub mod compact;
pub mod dfa;
pub mod io;

pub use compact::{DfaLoadError, load_compact_tables_from_bytes, write_compact};
pub use dfa::{Dfa, DfaLabel, Transition};
pub use io::{load_dfa_json_bytes, save_dfa_json};
