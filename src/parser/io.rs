// src/parser/io.rs
use hashbrown::HashMap;

use super::{
    symbols::SymbolTable,
    tables::{Action, ParseTables, Rule},
};

// -------------------- JSON (de)serialization --------------------

pub fn tables_json_bytes(t: &ParseTables) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(t)
}

pub fn load_tables_json_bytes(data: &[u8]) -> Result<ParseTables, String> {
    let t = serde_json::from_slice::<ParseTables>(data)
        .map_err(|e| format!("Failed to parse tables JSON: {e}"))?;
    if t.actions.len() != t.num_states * t.num_labels {
        return Err(format!(
            "action grid has {} cells, expected {} x {}",
            t.actions.len(),
            t.num_states,
            t.num_labels
        ));
    }
    Ok(t)
}

// -------------------- Compact binary --------------------
//   magic: 8 bytes = "LRTBL001"
//   u32: num_tokens, num_labels, num_states, n_columns, n_nonterms, n_rules
//   columns:    (u32 label, str name) * n_columns
//   nonterms:   (str name) * n_nonterms
//   rules:      (u32 lhs, u32 rhs_len, str lhs_name) * n_rules
//   actions:    (u8 tag, u32 arg) * num_states * num_labels
// str = u32 byte length + UTF-8 bytes

const BIN_MAGIC: &[u8; 8] = b"LRTBL001";

const TAG_ERROR: u8 = 0;
const TAG_SHIFT: u8 = 1;
const TAG_REDUCE: u8 = 2;
const TAG_ACCEPT: u8 = 3;
const TAG_GOTO: u8 = 4;

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_str(out: &mut Vec<u8>, s: &str) {
    put_u32(out, s.len() as u32);
    out.extend_from_slice(s.as_bytes());
}

pub fn tables_bin_bytes(t: &ParseTables) -> Vec<u8> {
    let mut out = Vec::with_capacity(32 + t.actions.len() * 5);
    out.extend_from_slice(BIN_MAGIC);
    for v in [
        t.num_tokens,
        t.num_labels as u32,
        t.num_states as u32,
        t.symbols.order.len() as u32,
        t.symbols.nonterminals.len() as u32,
        t.rules.len() as u32,
    ] {
        put_u32(&mut out, v);
    }
    for name in &t.symbols.order {
        put_u32(&mut out, t.symbols.label_of(name).unwrap_or(u32::MAX));
        put_str(&mut out, name);
    }
    for name in &t.symbols.nonterminals {
        put_str(&mut out, name);
    }
    for r in &t.rules {
        put_u32(&mut out, r.lhs);
        put_u32(&mut out, r.rhs_len);
        put_str(&mut out, &r.lhs_name);
    }
    for a in &t.actions {
        let (tag, arg) = match *a {
            Action::Error => (TAG_ERROR, 0),
            Action::Shift(n) => (TAG_SHIFT, n),
            Action::Reduce(n) => (TAG_REDUCE, n),
            Action::Accept => (TAG_ACCEPT, 0),
            Action::Goto(n) => (TAG_GOTO, n),
        };
        out.push(tag);
        put_u32(&mut out, arg);
    }
    out
}

fn take<'a>(buf: &mut &'a [u8], n: usize, what: &str) -> Result<&'a [u8], String> {
    if buf.len() < n {
        return Err(format!("truncated {what}"));
    }
    let (head, rest) = buf.split_at(n);
    *buf = rest;
    Ok(head)
}

fn take_u32(buf: &mut &[u8], what: &str) -> Result<u32, String> {
    let b = take(buf, 4, what)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn take_str(buf: &mut &[u8], what: &str) -> Result<String, String> {
    let n = take_u32(buf, what)? as usize;
    let b = take(buf, n, what)?;
    String::from_utf8(b.to_vec()).map_err(|e| format!("{what}: {e}"))
}

pub fn load_tables_bin_bytes(mut data: &[u8]) -> Result<ParseTables, String> {
    let magic = take(&mut data, 8, "magic")?;
    if magic != BIN_MAGIC {
        return Err("bad magic in parse tables .bin".into());
    }
    let num_tokens = take_u32(&mut data, "num_tokens")?;
    let num_labels = take_u32(&mut data, "num_labels")? as usize;
    let num_states = take_u32(&mut data, "num_states")? as usize;
    let n_columns = take_u32(&mut data, "n_columns")? as usize;
    let n_nonterms = take_u32(&mut data, "n_nonterms")? as usize;
    let n_rules = take_u32(&mut data, "n_rules")? as usize;

    if num_labels != num_tokens as usize + n_nonterms {
        return Err(format!(
            "num_labels={num_labels} != num_tokens={num_tokens} + nonterms={n_nonterms}"
        ));
    }

    let mut order = Vec::with_capacity(n_columns);
    let mut classifier = HashMap::with_capacity(n_columns);
    for _ in 0..n_columns {
        let label = take_u32(&mut data, "column label")?;
        let name = take_str(&mut data, "column name")?;
        classifier.insert(name.clone(), label);
        order.push(name);
    }
    let mut nonterminals = Vec::with_capacity(n_nonterms);
    for _ in 0..n_nonterms {
        nonterminals.push(take_str(&mut data, "nonterminal")?);
    }
    let mut rules = Vec::with_capacity(n_rules);
    for _ in 0..n_rules {
        let lhs = take_u32(&mut data, "rule lhs")?;
        let rhs_len = take_u32(&mut data, "rule rhs_len")?;
        let lhs_name = take_str(&mut data, "rule lhs_name")?;
        rules.push(Rule {
            lhs,
            lhs_name,
            rhs_len,
        });
    }

    let cells = num_states
        .checked_mul(num_labels)
        .ok_or("num_states*num_labels overflow")?;
    let mut actions = Vec::with_capacity(cells);
    for _ in 0..cells {
        let tag = take(&mut data, 1, "action tag")?[0];
        let arg = take_u32(&mut data, "action arg")?;
        actions.push(match tag {
            TAG_ERROR => Action::Error,
            TAG_SHIFT => Action::Shift(arg),
            TAG_REDUCE => Action::Reduce(arg),
            TAG_ACCEPT => Action::Accept,
            TAG_GOTO => Action::Goto(arg),
            other => return Err(format!("unknown action tag {other}")),
        });
    }

    Ok(ParseTables {
        num_tokens,
        symbols: SymbolTable {
            order,
            classifier,
            nonterminals,
        },
        rules,
        num_states,
        num_labels,
        actions,
    })
}
