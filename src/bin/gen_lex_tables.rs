// src/bin/gen_lex_tables.rs
// Writes the frozen lexer DFA as tables/lexer_dfa.bin (compact) and
// tables/lexer_dfa.json.

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use frontc::lexer::tables::{Dfa, save_dfa_json, write_compact};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("[gen_lex_tables] building DFA tables...");
    let dfa = Dfa::frozen();

    let out_dir = Path::new("tables");
    fs::create_dir_all(out_dir).context("create tables/")?;

    let bin_path = out_dir.join("lexer_dfa.bin");
    let f = fs::File::create(&bin_path)
        .with_context(|| format!("create {}", bin_path.display()))?;
    let mut w = BufWriter::new(f);
    write_compact(&mut w, dfa)?;
    w.flush()?;

    let json_path = out_dir.join("lexer_dfa.json");
    save_dfa_json(&json_path, dfa).with_context(|| format!("write {}", json_path.display()))?;

    let valid = dfa
        .next
        .iter()
        .flat_map(|row| row.iter())
        .filter(|t| t.valid)
        .count();
    println!(
        "[gen_lex_tables] {} states, {} valid transitions -> {}, {}",
        dfa.n_states(),
        valid,
        bin_path.display(),
        json_path.display()
    );
    Ok(())
}
