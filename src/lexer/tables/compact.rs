// src/lexer/tables/compact.rs
// Compact DFA table written by gen_lex_tables:
//   magic: 8  bytes  = "LXDFA002"
//   u32:   n_states
//   u32:   start state
//   u16:   next[n_states * 256]    // (valid<<15 | next_low15)
//   u16:   label[n_states * 256]   // terminal id, or one of the LABEL_* markers

use std::io::{self, Write};

use thiserror::Error;

use super::dfa::{Dfa, DfaLabel, Transition};
use crate::lexer::tokens::TokenKind;

const MAGIC: &[u8; 8] = b"LXDFA002";

const LABEL_ERROR: u16 = 0xFFF0;
const LABEL_LINE_COMMENT: u16 = 0xFFF1;
const LABEL_BLOCK_COMMENT: u16 = 0xFFF2;
const LABEL_CHAR_QUOTE: u16 = 0xFFF3;
const LABEL_STRING_QUOTE: u16 = 0xFFF4;

#[derive(Debug, Error)]
pub enum DfaLoadError {
    #[error("compact bin too short")]
    TooShort,
    #[error("bad magic in compact lexer tables")]
    BadMagic,
    #[error("truncated {0}")]
    Truncated(&'static str),
    #[error("n_states={0} does not fit the 15-bit next-state field")]
    TooManyStates(usize),
    #[error("unknown label 0x{label:04X} at state {state} byte {byte}")]
    UnknownLabel { state: usize, byte: usize, label: u16 },
    #[error("next state {next} out of range at state {state} byte {byte} (n_states={n_states})")]
    NextOutOfRange {
        state: usize,
        byte: usize,
        next: u16,
        n_states: usize,
    },
    #[error("failed to parse lexer tables JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn encode_label(label: DfaLabel) -> u16 {
    match label {
        DfaLabel::Token(k) => k as u16,
        DfaLabel::Error => LABEL_ERROR,
        DfaLabel::LineComment => LABEL_LINE_COMMENT,
        DfaLabel::BlockComment => LABEL_BLOCK_COMMENT,
        DfaLabel::CharQuote => LABEL_CHAR_QUOTE,
        DfaLabel::StringQuote => LABEL_STRING_QUOTE,
    }
}

pub fn decode_label(v: u16) -> Option<DfaLabel> {
    Some(match v {
        LABEL_ERROR => DfaLabel::Error,
        LABEL_LINE_COMMENT => DfaLabel::LineComment,
        LABEL_BLOCK_COMMENT => DfaLabel::BlockComment,
        LABEL_CHAR_QUOTE => DfaLabel::CharQuote,
        LABEL_STRING_QUOTE => DfaLabel::StringQuote,
        _ => DfaLabel::Token(TokenKind::from_label(v as u32)?),
    })
}

#[inline]
fn take_u32(buf: &mut &[u8]) -> Result<u32, DfaLoadError> {
    if buf.len() < 4 {
        return Err(DfaLoadError::Truncated("u32"));
    }
    let mut le = [0u8; 4];
    le.copy_from_slice(&buf[..4]);
    *buf = &buf[4..];
    Ok(u32::from_le_bytes(le))
}

#[inline]
fn take_u16(buf: &mut &[u8], what: &'static str) -> Result<u16, DfaLoadError> {
    if buf.len() < 2 {
        return Err(DfaLoadError::Truncated(what));
    }
    let mut le = [0u8; 2];
    le.copy_from_slice(&buf[..2]);
    *buf = &buf[2..];
    Ok(u16::from_le_bytes(le))
}

pub fn write_compact<W: Write>(w: &mut W, dfa: &Dfa) -> io::Result<()> {
    let n = dfa.n_states();
    if n > 0x7FFF {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            DfaLoadError::TooManyStates(n),
        ));
    }
    w.write_all(MAGIC)?;
    w.write_all(&(n as u32).to_le_bytes())?;
    w.write_all(&(dfa.start as u32).to_le_bytes())?;

    let mut next = Vec::with_capacity(n * 256 * 2);
    let mut labels = Vec::with_capacity(n * 256 * 2);
    for row in &dfa.next {
        for t in row.iter() {
            let packed = ((t.valid as u16) << 15) | (t.next & 0x7FFF);
            next.extend_from_slice(&packed.to_le_bytes());
            labels.extend_from_slice(&encode_label(t.label).to_le_bytes());
        }
    }
    w.write_all(&next)?;
    w.write_all(&labels)
}

pub fn load_compact_tables_from_bytes(mut data: &[u8]) -> Result<Dfa, DfaLoadError> {
    if data.len() < 8 + 4 + 4 {
        return Err(DfaLoadError::TooShort);
    }
    if &data[..8] != MAGIC {
        return Err(DfaLoadError::BadMagic);
    }
    data = &data[8..];

    let n_states = take_u32(&mut data)? as usize;
    if n_states > 0x7FFF {
        return Err(DfaLoadError::TooManyStates(n_states));
    }
    let start = take_u32(&mut data)? as u16;

    let cells = n_states * 256;
    let mut next = Vec::with_capacity(cells);
    for _ in 0..cells {
        next.push(take_u16(&mut data, "next")?);
    }

    let mut dfa = Dfa::empty(n_states);
    dfa.start = start;
    for (i, packed) in next.into_iter().enumerate() {
        let (state, byte) = (i / 256, i % 256);
        let raw = take_u16(&mut data, "label")?;
        let label = decode_label(raw).ok_or(DfaLoadError::UnknownLabel {
            state,
            byte,
            label: raw,
        })?;
        let to = packed & 0x7FFF;
        if to as usize >= n_states {
            return Err(DfaLoadError::NextOutOfRange {
                state,
                byte,
                next: to,
                n_states,
            });
        }
        dfa.next[state][byte] = Transition {
            valid: packed >> 15 == 1,
            label,
            next: to,
        };
    }
    Ok(dfa)
}
