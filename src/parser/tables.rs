// src/parser/tables.rs
use serde::{Deserialize, Serialize};

use super::symbols::SymbolTable;
use crate::lexer::tokens::Label;

/// One cell of the LALR action grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Action {
    Shift(u32),
    Reduce(u32),
    Accept,
    Goto(u32),
    #[default]
    Error,
}

impl Action {
    /// Parses one cell of a state row. `Ok(None)` means "no action" and
    /// leaves the default Error in place.
    pub fn parse_cell(cell: &str) -> Result<Option<Action>, ()> {
        let mut chars = cell.chars();
        let Some(tag) = chars.next() else {
            return Ok(None);
        };
        let num = || chars.as_str().parse::<u32>().map_err(|_| ());
        Ok(Some(match tag {
            's' => Action::Shift(num()?),
            'r' => Action::Reduce(num()?),
            'g' => Action::Goto(num()?),
            'a' => Action::Accept,
            _ => return Ok(None),
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub lhs: Label,
    /// Empty for the augmented start rule.
    pub lhs_name: String,
    pub rhs_len: u32,
}

impl Rule {
    pub fn accept(rhs_len: u32) -> Self {
        Self {
            lhs: 0,
            lhs_name: String::new(),
            rhs_len,
        }
    }
}

/// Compiled tables. `actions` is a dense row-major
/// `num_states x num_labels` grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseTables {
    pub num_tokens: u32,
    pub symbols: SymbolTable,
    pub rules: Vec<Rule>,
    pub num_states: usize,
    pub num_labels: usize,
    pub actions: Vec<Action>,
}

impl ParseTables {
    pub fn new(num_tokens: u32, symbols: SymbolTable, rules: Vec<Rule>) -> Self {
        let num_labels = num_tokens as usize + symbols.num_nonterms();
        Self {
            num_tokens,
            symbols,
            rules,
            num_states: 0,
            num_labels,
            actions: Vec::new(),
        }
    }

    #[inline]
    pub fn num_nonterms(&self) -> usize {
        self.symbols.num_nonterms()
    }

    #[inline]
    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }

    /// Cells outside the grid are Error.
    pub fn action(&self, state: usize, label: Label) -> Action {
        if state >= self.num_states || label as usize >= self.num_labels {
            return Action::Error;
        }
        self.actions[state * self.num_labels + label as usize]
    }

    /// Grows the grid with Error rows so that `state` exists. Returns
    /// false, leaving the grid unchanged, if the size would overflow.
    pub fn ensure_state(&mut self, state: usize) -> bool {
        if state < self.num_states {
            return true;
        }
        let Some(cells) = state
            .checked_add(1)
            .and_then(|n| n.checked_mul(self.num_labels))
        else {
            return false;
        };
        self.num_states = state + 1;
        self.actions.resize(cells, Action::Error);
        true
    }

    /// Out-of-grid cells are ignored; call `ensure_state` first.
    pub fn set_action(&mut self, state: usize, label: Label, action: Action) {
        if state < self.num_states && (label as usize) < self.num_labels {
            self.actions[state * self.num_labels + label as usize] = action;
        }
    }

    pub fn row(&self, state: usize) -> &[Action] {
        let lo = state * self.num_labels;
        &self.actions[lo..lo + self.num_labels]
    }
}
