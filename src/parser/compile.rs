// src/parser/compile.rs
// Transpiles the grammar generator's textual LALR dump into ParseTables.
//
// Input layout:
//   --Parsing Table--
//   State <sym> <sym> ...
//   ...
//   Rules:
//   0: $accept -> Program $end
//   1: Program -> A B (annotation)
//   N...                              <- terminator
//   --Parsing Table--
//   State <sym> <sym> ...             <- repeated header, ignored
//   0 s1 . g2 ...
//   N...                              <- terminator

use super::{
    error::TableError,
    symbols::SymbolTable,
    tables::{Action, ParseTables, Rule},
};
use crate::{config::TableConfig, lexer::tokens::NUM_TOKENS};

fn find_marker(lines: &[&str], from: usize, marker: &str) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, l)| l.trim_end() == marker)
        .map(|(i, _)| i)
}

#[inline]
fn is_terminator(line: &str, cfg: &TableConfig) -> bool {
    line.trim_start().starts_with(cfg.terminator)
}

/// Compiles the whole dump. Nothing is returned unless every section parsed.
pub fn compile(text: &str, cfg: &TableConfig) -> Result<ParseTables, TableError> {
    let lines: Vec<&str> = text.lines().collect();

    let table_at = find_marker(&lines, 0, &cfg.table_marker).ok_or_else(|| {
        TableError::MissingParseTableSection {
            marker: cfg.table_marker.clone(),
            after: "",
        }
    })?;
    let symbols = parse_header(&lines, table_at, cfg)?;
    log::debug!(
        "header: {} columns, {} nonterminals",
        symbols.num_columns(),
        symbols.num_nonterms()
    );

    let rules_at = find_marker(&lines, 0, &cfg.rules_marker).ok_or_else(|| {
        TableError::MissingRulesSection {
            marker: cfg.rules_marker.clone(),
        }
    })?;
    let (rules, rules_end) = parse_rules(&lines, rules_at + 1, &symbols, cfg)?;
    log::debug!("rules: {} (block ends at line {})", rules.len(), rules_end + 1);

    let grid_at = find_marker(&lines, rules_end + 1, &cfg.table_marker).ok_or_else(|| {
        TableError::MissingParseTableSection {
            marker: cfg.table_marker.clone(),
            after: " after the rules block",
        }
    })?;
    if grid_at + 1 >= lines.len() {
        return Err(TableError::MissingHeaderLine {
            marker: cfg.table_marker.clone(),
            line: grid_at + 2,
        });
    }

    let mut tables = ParseTables::new(NUM_TOKENS, symbols, rules);
    parse_rows(&lines, grid_at + 2, &mut tables, cfg)?;

    log::info!(
        "compiled {} states x {} labels, {} rules, {} nonterminals",
        tables.num_states,
        tables.num_labels,
        tables.num_rules(),
        tables.num_nonterms()
    );
    Ok(tables)
}

fn parse_header(lines: &[&str], marker_at: usize, cfg: &TableConfig) -> Result<SymbolTable, TableError> {
    let missing = || TableError::MissingHeaderLine {
        marker: cfg.table_marker.clone(),
        line: marker_at + 2,
    };
    let header = lines.get(marker_at + 1).ok_or_else(missing)?;
    let mut fields = header.split_whitespace();
    // leading column label ("State")
    fields.next().ok_or_else(missing)?;
    let symbols = SymbolTable::from_header(fields, cfg)?;
    if symbols.num_columns() == 0 {
        return Err(missing());
    }
    Ok(symbols)
}

/// Returns the rules and the index of the terminator line.
fn parse_rules(
    lines: &[&str],
    from: usize,
    symbols: &SymbolTable,
    cfg: &TableConfig,
) -> Result<(Vec<Rule>, usize), TableError> {
    let mut rules = Vec::new();
    for (i, line) in lines.iter().enumerate().skip(from) {
        if line.trim().is_empty() {
            continue;
        }
        if is_terminator(line, cfg) {
            return Ok((rules, i));
        }
        if rules.len() == cfg.rule_capacity {
            return Err(TableError::RuleCapacityExceeded {
                capacity: cfg.rule_capacity,
            });
        }
        rules.push(parse_rule(i + 1, line, symbols, cfg)?);
    }
    Err(TableError::TruncatedRuleBlock {
        terminator: cfg.terminator,
    })
}

fn parse_rule(line_no: usize, line: &str, symbols: &SymbolTable, cfg: &TableConfig) -> Result<Rule, TableError> {
    let malformed = || TableError::MalformedRule {
        line: line_no,
        text: line.to_string(),
    };
    let mut f = line.split_whitespace();
    let _index = f.next().ok_or_else(malformed)?;
    let lhs = f.next().ok_or_else(malformed)?;
    if f.next() != Some("->") {
        return Err(malformed());
    }
    let rhs_len = f.take_while(|s| !s.starts_with('(')).count() as u32;

    if lhs == cfg.accept_symbol {
        return Ok(Rule::accept(rhs_len));
    }
    let label = symbols
        .label_of(lhs)
        .ok_or_else(|| TableError::UnknownSymbol {
            line: line_no,
            name: lhs.to_string(),
        })?;
    Ok(Rule {
        lhs: label,
        lhs_name: lhs.to_string(),
        rhs_len,
    })
}

fn parse_rows(
    lines: &[&str],
    from: usize,
    tables: &mut ParseTables,
    cfg: &TableConfig,
) -> Result<(), TableError> {
    let cols = tables.symbols.num_columns();
    for (i, line) in lines.iter().enumerate().skip(from) {
        if line.trim().is_empty() {
            continue;
        }
        if is_terminator(line, cfg) {
            return Ok(());
        }
        let mut f = line.split_whitespace();
        let state = f
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| TableError::MalformedStateRow {
                line: i + 1,
                text: line.to_string(),
            })?;
        let cells: Vec<&str> = f.collect();
        if cells.len() < cols {
            return Err(TableError::TruncatedActionGrid {
                line: i + 1,
                got: cells.len(),
                want: cols,
            });
        }
        if cells.len() > cols {
            log::warn!(
                "line {}: {} extra action cells ignored",
                i + 1,
                cells.len() - cols
            );
        }

        if state >= cfg.state_capacity || !tables.ensure_state(state) {
            return Err(TableError::StateOutOfRange {
                line: i + 1,
                state,
                capacity: cfg.state_capacity,
            });
        }
        for (col, cell) in cells.iter().take(cols).enumerate() {
            let action = Action::parse_cell(cell).map_err(|_| TableError::MalformedAction {
                line: i + 1,
                action: cell.to_string(),
            })?;
            let (Some(action), Some(label)) = (action, tables.symbols.column_label(col)) else {
                continue;
            };
            tables.set_action(state, label, action);
        }
    }
    Err(TableError::MissingTerminatorLine {
        terminator: cfg.terminator,
    })
}
