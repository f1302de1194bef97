// src/parser/error.rs
use thiserror::Error;

/// Fatal table-compilation failures. Any of these aborts the run and no
/// artifact is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("no `{marker}` section found{after}")]
    MissingParseTableSection { marker: String, after: &'static str },

    #[error("no `{marker}` section found")]
    MissingRulesSection { marker: String },

    #[error("missing header line after `{marker}` (line {line})")]
    MissingHeaderLine { marker: String, line: usize },

    #[error("rule block ended at EOF before a `{terminator}` line")]
    TruncatedRuleBlock { terminator: char },

    #[error("state row at line {line} has {got} actions, header has {want} columns")]
    TruncatedActionGrid { line: usize, got: usize, want: usize },

    #[error("action grid ended at EOF before a `{terminator}` line")]
    MissingTerminatorLine { terminator: char },

    #[error("malformed rule at line {line}: {text:?}")]
    MalformedRule { line: usize, text: String },

    #[error("malformed state row at line {line}: {text:?}")]
    MalformedStateRow { line: usize, text: String },

    #[error("malformed action {action:?} at line {line}")]
    MalformedAction { line: usize, action: String },

    #[error("header symbol `{0}` is not a terminal and appears before the start symbol")]
    UnknownTerminal(String),

    #[error("header symbol `{0}` appears twice")]
    DuplicateSymbol(String),

    #[error("rule at line {line} has unknown LHS `{name}`")]
    UnknownSymbol { line: usize, name: String },

    #[error("more than {capacity} rules")]
    RuleCapacityExceeded { capacity: usize },

    #[error("state {state} at line {line} is out of range (capacity {capacity})")]
    StateOutOfRange {
        line: usize,
        state: usize,
        capacity: usize,
    },
}
