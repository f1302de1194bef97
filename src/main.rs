// src/main.rs
// Lex a file (or stdin with `-` / no argument) and print the token stream.

use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use frontc::{config::LexerConfig, lexer::lex_file};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = PathBuf::from(env::args().nth(1).unwrap_or_else(|| "-".to_string()));
    let lexed = lex_file(&path, LexerConfig::from_env())
        .with_context(|| format!("failed to open {}", path.display()))?;

    println!("TOKENS:");
    for t in &lexed.tokens {
        println!("{:>4}:{:<4} {:<10} {:?}", t.row, t.col, t.label.name(), t.lexeme);
    }
    if !lexed.diagnostics.is_empty() {
        log::info!("{} lexer diagnostic(s)", lexed.diagnostics.len());
    }
    Ok(())
}
