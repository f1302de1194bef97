// src/lexer/tables/io.rs
use std::io::{BufWriter, Write};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::compact::DfaLoadError;
use super::dfa::{Dfa, Transition};

// -------------------- JSON (de)serialization --------------------

#[serde_as]
#[derive(Serialize, Deserialize)]
struct DfaDisk {
    n_states: usize,
    start: u16,
    #[serde_as(as = "Vec<[_; 256]>")]
    next: Vec<[Transition; 256]>,
}

impl From<&Dfa> for DfaDisk {
    fn from(d: &Dfa) -> Self {
        Self {
            n_states: d.n_states(),
            start: d.start,
            next: d.next.clone(),
        }
    }
}

pub fn save_dfa_json(path: &std::path::Path, dfa: &Dfa) -> std::io::Result<()> {
    let f = std::fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, &DfaDisk::from(dfa))?;
    w.flush()
}

pub fn load_dfa_json_bytes(data: &[u8]) -> Result<Dfa, DfaLoadError> {
    let disk = serde_json::from_slice::<DfaDisk>(data)?;
    if disk.next.len() != disk.n_states {
        return Err(DfaLoadError::Truncated("next rows"));
    }
    Ok(Dfa {
        next: disk.next,
        start: disk.start,
    })
}
