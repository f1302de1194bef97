// src/bin/gen_parse_tables.rs
// Compiles the grammar generator's textual LALR dump into includable Rust
// tables plus JSON/binary copies for runtime loading.
// Usage:
//   cargo run --bin gen_parse_tables                          # tables/parser_table.txt -> tables/
//   cargo run --bin gen_parse_tables -- in.txt out_dir/
//
// Any missing section or truncated block exits nonzero and writes nothing.

use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use frontc::{config::TableConfig, parser::emit::compile_to_dir};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let in_path = PathBuf::from(
        env::args()
            .nth(1)
            .unwrap_or_else(|| "tables/parser_table.txt".to_string()),
    );
    let out_dir = PathBuf::from(env::args().nth(2).unwrap_or_else(|| "tables".to_string()));

    let text = fs::read_to_string(&in_path)
        .with_context(|| format!("failed to read parse table at {}", in_path.display()))?;

    let written = compile_to_dir(&text, &TableConfig::from_env(), &out_dir)
        .with_context(|| format!("failed to compile {}", in_path.display()))?;
    for p in written {
        println!("[gen_parse_tables] wrote {}", p.display());
    }
    Ok(())
}
