// src/lexer/diag.rs
use std::fmt;

/// Recoverable lexer failures. None of them stop the run except
/// `CommentTruncated`, which ends lexing at EOF anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagKind {
    CorruptedByWhitespace,
    CorruptedByComment,
    /// An error-state token hit a byte with no transition. The token is
    /// dropped rather than committed with an ERROR label, since no terminal
    /// kind is ERROR; the byte is then lexed afresh.
    CorruptedByCharacter,
    UnexpectedCharacter,
    TokenOverflow,
    CommentTruncated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexDiagnostic {
    pub kind: DiagKind,
    pub file: String,
    pub row: u32,
    pub col: u32,
    /// Offending byte, when there is one.
    pub byte: Option<u8>,
}

fn show(b: u8) -> String {
    match b {
        b'\n' => "\\n".into(),
        b'\r' => "\\r".into(),
        b'\t' => "\\t".into(),
        b if b.is_ascii_graphic() || b == b' ' => (b as char).to_string(),
        b => format!("\\x{b:02X}"),
    }
}

impl fmt::Display for LexDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: ", self.file, self.row, self.col)?;
        let b = self.byte.map(show).unwrap_or_default();
        match self.kind {
            DiagKind::CorruptedByWhitespace => write!(f, "token corrupted by '{b}'"),
            DiagKind::CorruptedByComment => write!(f, "token corrupted by comment"),
            DiagKind::CorruptedByCharacter => write!(f, "token corrupted by '{b}'"),
            DiagKind::UnexpectedCharacter => write!(f, "unexpected character '{b}'"),
            DiagKind::TokenOverflow => write!(f, "token overflow"),
            DiagKind::CommentTruncated => write!(f, "/* comment truncated"),
        }
    }
}

impl LexDiagnostic {
    pub(crate) fn log(&self) {
        match self.kind {
            DiagKind::CommentTruncated => log::error!("{self}"),
            _ => log::warn!("{self}"),
        }
    }
}
