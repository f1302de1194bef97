// src/parser/symbols.rs
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::error::TableError;
use crate::{
    config::TableConfig,
    lexer::tokens::{Label, NUM_TOKENS, TokenKind},
};

/// Header-row symbols: column order plus the name -> label classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    /// Column index -> symbol name, in header order.
    pub order: Vec<String>,
    pub classifier: HashMap<String, Label>,
    /// Nonterminals in first-seen order; the i-th has label `NUM_TOKENS + i`.
    pub nonterminals: Vec<String>,
}

impl SymbolTable {
    /// Builds the table from the header fields following the leading
    /// column label. Names resolve against `TokenKind` first. Before the
    /// start symbol every name must be a terminal; from the start symbol on,
    /// unresolved names are numbered as nonterminals.
    pub fn from_header<'a, I>(fields: I, cfg: &TableConfig) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut t = SymbolTable::default();
        let mut in_nonterms = false;

        for field in fields {
            let name = if field == cfg.end_marker {
                cfg.end_symbol.as_str()
            } else {
                field
            };
            if t.classifier.contains_key(name) {
                return Err(TableError::DuplicateSymbol(name.to_string()));
            }
            if name == cfg.start_symbol {
                in_nonterms = true;
            }

            let terminal = TokenKind::from_name(name).filter(|_| name != cfg.start_symbol);
            let label = match terminal {
                Some(kind) => kind.label(),
                None if in_nonterms => {
                    let label = NUM_TOKENS + t.nonterminals.len() as Label;
                    t.nonterminals.push(name.to_string());
                    label
                }
                None => return Err(TableError::UnknownTerminal(name.to_string())),
            };

            t.order.push(name.to_string());
            t.classifier.insert(name.to_string(), label);
        }

        if !in_nonterms {
            log::warn!(
                "start symbol `{}` not in header; table has no nonterminals",
                cfg.start_symbol
            );
        }
        Ok(t)
    }

    #[inline]
    pub fn num_nonterms(&self) -> usize {
        self.nonterminals.len()
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.order.len()
    }

    pub fn label_of(&self, name: &str) -> Option<Label> {
        self.classifier.get(name).copied()
    }

    /// Label of a header column, resolved through the classifier.
    pub fn column_label(&self, column: usize) -> Option<Label> {
        self.order.get(column).and_then(|n| self.label_of(n))
    }
}
