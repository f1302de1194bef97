// src/config.rs
// Knobs for the lexer and the table compiler. Defaults match the table
// generator's dump format; env vars override for one-off runs.

use std::env;

/// Longest lexeme the lexer accepts before reporting an overflow.
pub const MAX_TOKEN_LENGTH: usize = 256;

/// Upper bound on rule lines accepted by the table compiler.
pub const DEFAULT_RULE_CAPACITY: usize = 256;

/// State ids at or above this are rejected; bounds the dense action grid.
pub const DEFAULT_STATE_CAPACITY: usize = 256;

fn env_usize(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|s| s.parse::<usize>().ok())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    pub max_token_len: usize,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            max_token_len: MAX_TOKEN_LENGTH,
        }
    }
}

impl LexerConfig {
    /// `FRONTC_MAX_TOKEN_LEN` overrides the maximum lexeme length.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(n) = env_usize("FRONTC_MAX_TOKEN_LEN").filter(|&n| n > 0) {
            cfg.max_token_len = n;
        }
        cfg
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Header symbol where nonterminal numbering begins.
    pub start_symbol: String,
    /// Augmented start rule LHS; emitted as the sentinel rule.
    pub accept_symbol: String,
    /// Generator's end-of-input marker in the header row.
    pub end_marker: String,
    /// Name the end-of-input marker is renamed to.
    pub end_symbol: String,
    pub table_marker: String,
    pub rules_marker: String,
    /// First character of the line closing the rules block and the state rows.
    pub terminator: char,
    pub rule_capacity: usize,
    pub state_capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            start_symbol: "Program".into(),
            accept_symbol: "$accept".into(),
            end_marker: "$end".into(),
            end_symbol: "END".into(),
            table_marker: "--Parsing Table--".into(),
            rules_marker: "Rules:".into(),
            terminator: 'N',
            rule_capacity: DEFAULT_RULE_CAPACITY,
            state_capacity: DEFAULT_STATE_CAPACITY,
        }
    }
}

impl TableConfig {
    /// `FRONTC_START_SYMBOL`, `FRONTC_RULE_CAPACITY` and
    /// `FRONTC_STATE_CAPACITY` override the defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(s) = env::var("FRONTC_START_SYMBOL") {
            if !s.trim().is_empty() {
                cfg.start_symbol = s.trim().to_string();
            }
        }
        if let Some(n) = env_usize("FRONTC_RULE_CAPACITY") {
            cfg.rule_capacity = n;
        }
        if let Some(n) = env_usize("FRONTC_STATE_CAPACITY") {
            cfg.state_capacity = n;
        }
        cfg
    }
}
