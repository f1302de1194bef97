// src/parser/emit.rs
// Renders ParseTables as Rust source meant for `include!` into the runtime
// parser. The including module must have `Action` in scope.

use std::{
    fmt::Write as _,
    fs,
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use hashbrown::HashSet;

use super::{
    compile::compile,
    io::{tables_bin_bytes, tables_json_bytes},
    tables::ParseTables,
};
use crate::config::TableConfig;

pub const LABELS_FILE: &str = "parser_labels.rs";
pub const RULE_LHS_LABEL_FILE: &str = "rule_lhs_label.rs";
pub const RULE_LHS_NAME_FILE: &str = "rule_lhs_name.rs";
pub const RULE_RHS_LEN_FILE: &str = "rule_rhs_len.rs";
pub const ACTIONS_FILE: &str = "parser_actions.rs";

pub const JSON_FILE: &str = "parse_tables.json";
pub const BIN_FILE: &str = "parse_tables.bin";

const PROLOGUE: &str = "// @generated by gen_parse_tables. Do not edit.\n\n";

/// In-memory artifact set; nothing touches the disk until `write_to`.
#[derive(Debug, Default)]
pub struct Artifacts {
    pub files: Vec<(String, Vec<u8>)>,
}

impl Artifacts {
    pub fn render(t: &ParseTables) -> Self {
        let mut a = Artifacts::default();
        a.push(LABELS_FILE, render_labels(t));
        a.push(RULE_LHS_LABEL_FILE, render_rule_lhs_label(t));
        a.push(RULE_LHS_NAME_FILE, render_rule_lhs_name(t));
        a.push(RULE_RHS_LEN_FILE, render_rule_rhs_len(t));
        a.push(ACTIONS_FILE, render_actions(t));
        a
    }

    pub fn push(&mut self, name: &str, data: impl Into<Vec<u8>>) {
        self.files.push((name.to_string(), data.into()));
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d.as_slice())
    }

    /// Stages every file as `<name>.tmp`, then renames them into place.
    /// On failure, every `.tmp` not yet renamed is removed.
    pub fn write_to(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(self.files.len());
        for (name, data) in &self.files {
            let dst = dir.join(name);
            let tmp = dir.join(format!("{name}.tmp"));
            if let Err(e) = fs::write(&tmp, data) {
                for (t, _) in &staged {
                    let _ = fs::remove_file(t);
                }
                let _ = fs::remove_file(&tmp);
                return Err(e);
            }
            staged.push((tmp, dst));
        }
        let mut written = Vec::with_capacity(staged.len());
        for (i, (tmp, dst)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(tmp, dst) {
                for (t, _) in &staged[i..] {
                    let _ = fs::remove_file(t);
                }
                return Err(e);
            }
            written.push(dst.clone());
        }
        Ok(written)
    }
}

/// Compiles `text` and writes every artifact into `dir`. Compilation and
/// rendering finish before the first byte is written.
pub fn compile_to_dir(text: &str, cfg: &TableConfig, dir: &Path) -> Result<Vec<PathBuf>> {
    let tables = compile(text, cfg)?;
    let mut artifacts = Artifacts::render(&tables);
    artifacts.push(
        JSON_FILE,
        tables_json_bytes(&tables).context("serialize parse tables")?,
    );
    artifacts.push(BIN_FILE, tables_bin_bytes(&tables));
    artifacts
        .write_to(dir)
        .with_context(|| format!("failed to write artifacts to {}", dir.display()))
}

/// Nonterminal names may hold characters that are not valid in identifiers.
fn const_names(t: &ParseTables) -> Vec<String> {
    let mut seen = HashSet::new();
    t.symbols
        .nonterminals
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let clean: String = n
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect();
            let base = format!("TOKEN_{clean}");
            let mut name = base.clone();
            let mut suffix = i;
            while !seen.insert(name.clone()) {
                name = format!("{base}_{suffix}");
                suffix += 1;
            }
            name
        })
        .collect()
}

fn render_labels(t: &ParseTables) -> String {
    let mut s = String::from(PROLOGUE);
    let _ = writeln!(s, "pub const NUM_TOKENS: u32 = {};\n", t.num_tokens);
    for (i, name) in const_names(t).iter().enumerate() {
        let _ = writeln!(s, "#[allow(non_upper_case_globals)]");
        let _ = writeln!(s, "pub const {name}: u32 = NUM_TOKENS + {i};");
    }
    let _ = writeln!(s);
    let _ = writeln!(s, "pub const NUM_NONTERMS: u32 = {};\n", t.num_nonterms());
    let _ = writeln!(
        s,
        "pub const NUM_LABELS: usize = (NUM_TOKENS + NUM_NONTERMS) as usize;\n"
    );
    let _ = writeln!(s, "pub const NUM_RULES: usize = {};\n", t.num_rules());
    let _ = writeln!(s, "pub const NUM_STATES: usize = {};\n", t.num_states);
    let _ = writeln!(s, "/// Runtime parser initialisation entry point.");
    let _ = writeln!(s, "pub type ParserInitFn = fn(");
    let _ = writeln!(s, "    rule_lhs_label: &[u32; NUM_RULES],");
    let _ = writeln!(s, "    rule_lhs_name: &[&'static str; NUM_RULES],");
    let _ = writeln!(s, ");");
    s
}

fn render_rule_lhs_label(t: &ParseTables) -> String {
    let mut s = String::from(PROLOGUE);
    let _ = writeln!(s, "pub static RULE_LHS_LABEL: [u32; NUM_RULES] = [");
    for (i, r) in t.rules.iter().enumerate() {
        let shown = if r.lhs_name.is_empty() { "$accept" } else { r.lhs_name.as_str() };
        let _ = writeln!(s, "    {}, // {i}: {shown}", r.lhs);
    }
    let _ = writeln!(s, "];");
    s
}

fn render_rule_lhs_name(t: &ParseTables) -> String {
    let mut s = String::from(PROLOGUE);
    let _ = writeln!(s, "pub static RULE_LHS_NAME: [&str; NUM_RULES] = [");
    for r in &t.rules {
        let _ = writeln!(s, "    {:?},", r.lhs_name);
    }
    let _ = writeln!(s, "];");
    s
}

fn render_rule_rhs_len(t: &ParseTables) -> String {
    let mut s = String::from(PROLOGUE);
    let _ = writeln!(s, "pub static RULE_RHS_LEN: [u32; NUM_RULES] = [");
    for r in &t.rules {
        let _ = writeln!(s, "    {},", r.rhs_len);
    }
    let _ = writeln!(s, "];");
    s
}

fn render_actions(t: &ParseTables) -> String {
    let mut s = String::from(PROLOGUE);
    let _ = writeln!(
        s,
        "pub static PARSER_ACTIONS: [[Action; NUM_LABELS]; NUM_STATES] = ["
    );
    for state in 0..t.num_states {
        let _ = writeln!(s, "    [");
        for (label, a) in t.row(state).iter().enumerate() {
            let cell = format!("{a:?},");
            let _ = writeln!(s, "        Action::{cell:<16} /* [{state}][{label}] */");
        }
        let _ = writeln!(s, "    ],");
    }
    let _ = writeln!(s, "];");
    s
}
