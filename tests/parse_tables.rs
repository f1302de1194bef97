use frontc::{
    config::TableConfig,
    lexer::{NUM_TOKENS, TokenKind},
    parser::{Action, TableError, compile},
};

const TINY: &str = "\
--Parsing Table--
State $end Program A
Rules:
1: Program -> A
N
--Parsing Table--
State $end Program A
0 s1 a g2
N
";

const EXPR: &str = "\
Grammar dump

--Parsing Table--
State $end IDENT PLUS Program Expr

Rules:
0: $accept -> Program $end
1: Program -> Expr
2: Expr -> Expr PLUS IDENT (left-assoc)
3: Expr -> IDENT

Nonterminals, with rules where they appear
--Parsing Table--
State $end IDENT PLUS Program Expr
0 . s3 . g1 g2
1 a . . . .
2 r1 . s4 . .
3 r3 . r3 . .
4 . s5 . . .
5 r2 . r2 . .
N
";

fn cfg() -> TableConfig {
    let _ = env_logger::builder().is_test(true).try_init();
    TableConfig::default()
}

#[test]
fn tiny_table() {
    let t = compile(TINY, &cfg()).unwrap();
    assert_eq!(t.num_nonterms(), 2);
    assert_eq!(t.num_labels, NUM_TOKENS as usize + 2);
    assert_eq!(t.symbols.label_of("Program"), Some(NUM_TOKENS));
    assert_eq!(t.symbols.label_of("A"), Some(NUM_TOKENS + 1));
    assert_eq!(t.symbols.order, ["END", "Program", "A"]);

    assert_eq!(t.num_rules(), 1);
    assert_eq!(t.rules[0].lhs, NUM_TOKENS);
    assert_eq!(t.rules[0].lhs_name, "Program");
    assert_eq!(t.rules[0].rhs_len, 1);

    assert_eq!(t.num_states, 1);
    assert_eq!(t.action(0, TokenKind::End.label()), Action::Shift(1));
    assert_eq!(t.action(0, NUM_TOKENS), Action::Accept);
    assert_eq!(t.action(0, NUM_TOKENS + 1), Action::Goto(2));
}

#[test]
fn unset_cells_default_to_error() {
    let t = compile(TINY, &cfg()).unwrap();
    assert_eq!(t.action(0, TokenKind::Ident.label()), Action::Error);
    assert_eq!(t.action(1, 0), Action::Error);
    assert_eq!(t.action(0, 10_000), Action::Error);
    let set = t.actions.iter().filter(|a| **a != Action::Error).count();
    assert_eq!(set, 3);
}

#[test]
fn expression_table() {
    let t = compile(EXPR, &cfg()).unwrap();
    let ident = TokenKind::Ident.label();
    let plus = TokenKind::Plus.label();
    let program = t.symbols.label_of("Program").unwrap();
    let expr = t.symbols.label_of("Expr").unwrap();
    assert_eq!((program, expr), (NUM_TOKENS, NUM_TOKENS + 1));

    let rules: Vec<(u32, &str, u32)> = t
        .rules
        .iter()
        .map(|r| (r.lhs, r.lhs_name.as_str(), r.rhs_len))
        .collect();
    assert_eq!(rules, [
        (0, "", 2),
        (program, "Program", 1),
        (expr, "Expr", 3),
        (expr, "Expr", 1),
    ]);

    assert_eq!(t.num_states, 6);
    assert_eq!(t.action(0, ident), Action::Shift(3));
    assert_eq!(t.action(0, program), Action::Goto(1));
    assert_eq!(t.action(0, expr), Action::Goto(2));
    assert_eq!(t.action(1, 0), Action::Accept);
    assert_eq!(t.action(2, 0), Action::Reduce(1));
    assert_eq!(t.action(2, plus), Action::Shift(4));
    assert_eq!(t.action(4, ident), Action::Shift(5));
    assert_eq!(t.action(5, plus), Action::Reduce(2));
    assert_eq!(t.action(4, 0), Action::Error);
}

#[test]
fn sparse_state_ids_leave_error_rows() {
    let text = TINY.replace("0 s1 a g2", "3 s1 a g2");
    let t = compile(&text, &cfg()).unwrap();
    assert_eq!(t.num_states, 4);
    assert!(t.row(0).iter().all(|a| *a == Action::Error));
    assert_eq!(t.action(3, 0), Action::Shift(1));
}

#[test]
fn custom_start_symbol() {
    let text = TINY.replace("Program", "Unit");
    let mut c = cfg();
    c.start_symbol = "Unit".into();
    let t = compile(&text, &c).unwrap();
    assert_eq!(t.symbols.label_of("Unit"), Some(NUM_TOKENS));
}

#[test]
fn terminal_after_start_symbol_keeps_its_token_label() {
    let text = "\
--Parsing Table--
State $end Program IDENT
Rules:
1: Program -> IDENT
N
--Parsing Table--
State $end Program IDENT
0 . g1 s2
N
";
    let t = compile(text, &cfg()).unwrap();
    assert_eq!(t.symbols.label_of("IDENT"), Some(TokenKind::Ident.label()));
    assert_eq!(t.symbols.nonterminals, ["Program"]);
    assert_eq!(t.num_labels, NUM_TOKENS as usize + 1);
    assert_eq!(t.action(0, TokenKind::Ident.label()), Action::Shift(2));
    assert_eq!(t.action(0, NUM_TOKENS), Action::Goto(1));
}

#[test]
fn highest_state_below_capacity_is_accepted() {
    let mut c = cfg();
    c.state_capacity = 8;
    let text = TINY.replace("0 s1 a g2", "7 s1 a g2");
    let t = compile(&text, &c).unwrap();
    assert_eq!(t.num_states, 8);
}

// -------------------- failures --------------------

#[test]
fn state_id_past_capacity() {
    let text = TINY.replace("0 s1 a g2", "256 s1 a g2");
    assert_eq!(
        compile(&text, &cfg()),
        Err(TableError::StateOutOfRange {
            line: 8,
            state: 256,
            capacity: 256
        })
    );
}

#[test]
fn huge_state_id_is_an_error_not_an_allocation() {
    let text = TINY.replace("0 s1 a g2", "99999999999999 s1 a g2");
    assert!(matches!(
        compile(&text, &cfg()),
        Err(TableError::StateOutOfRange { state: 99_999_999_999_999, .. })
    ));

    let mut c = cfg();
    c.state_capacity = usize::MAX;
    let text = TINY.replace("0 s1 a g2", &format!("{} s1 a g2", usize::MAX - 1));
    assert!(matches!(
        compile(&text, &c),
        Err(TableError::StateOutOfRange { .. })
    ));
}

#[test]
fn missing_first_table_marker() {
    let text = TINY.replace("--Parsing Table--", "--Table--");
    assert!(matches!(
        compile(&text, &cfg()),
        Err(TableError::MissingParseTableSection { after: "", .. })
    ));
}

#[test]
fn missing_second_table_marker() {
    let (head, _) = TINY.rsplit_once("--Parsing Table--").unwrap();
    let text = format!("{head}State $end Program A\n0 s1 a g2\nN\n");
    assert!(matches!(
        compile(&text, &cfg()),
        Err(TableError::MissingParseTableSection { after, .. }) if !after.is_empty()
    ));
}

#[test]
fn missing_rules_section() {
    let text = TINY.replace("Rules:", "Rulez");
    assert!(matches!(
        compile(&text, &cfg()),
        Err(TableError::MissingRulesSection { .. })
    ));
}

#[test]
fn missing_header_line() {
    assert!(matches!(
        compile("--Parsing Table--\n", &cfg()),
        Err(TableError::MissingHeaderLine { line: 2, .. })
    ));
    assert!(matches!(
        compile("--Parsing Table--\nState\n", &cfg()),
        Err(TableError::MissingHeaderLine { .. })
    ));
    let (head, _) = TINY.rsplit_once("State $end Program A\n0").unwrap();
    assert!(matches!(
        compile(head, &cfg()),
        Err(TableError::MissingHeaderLine { .. })
    ));
}

#[test]
fn truncated_rule_block() {
    let text = "--Parsing Table--\nState $end Program A\nRules: \n1: Program -> A\n";
    assert_eq!(
        compile(text, &cfg()),
        Err(TableError::TruncatedRuleBlock { terminator: 'N' })
    );
}

#[test]
fn truncated_state_row() {
    let text = TINY.replace("0 s1 a g2", "0 s1 a");
    assert_eq!(
        compile(&text, &cfg()),
        Err(TableError::TruncatedActionGrid {
            line: 8,
            got: 2,
            want: 3
        })
    );
}

#[test]
fn missing_terminator_line() {
    let text = TINY.trim_end().trim_end_matches('N');
    assert_eq!(
        compile(text, &cfg()),
        Err(TableError::MissingTerminatorLine { terminator: 'N' })
    );
}

#[test]
fn malformed_cells_and_rows() {
    let text = TINY.replace("0 s1 a g2", "0 sx a g2");
    assert!(matches!(
        compile(&text, &cfg()),
        Err(TableError::MalformedAction { action, .. }) if action == "sx"
    ));
    let text = TINY.replace("0 s1 a g2", "zero s1 a g2");
    assert!(matches!(
        compile(&text, &cfg()),
        Err(TableError::MalformedStateRow { line: 8, .. })
    ));
    let text = TINY.replace("1: Program -> A", "1: Program A");
    assert!(matches!(
        compile(&text, &cfg()),
        Err(TableError::MalformedRule { line: 4, .. })
    ));
}

#[test]
fn header_symbol_errors() {
    let text = TINY.replace("State $end Program A", "State $end BOGUS Program A");
    assert_eq!(
        compile(&text, &cfg()),
        Err(TableError::UnknownTerminal("BOGUS".into()))
    );
    let text = TINY.replace("State $end Program A", "State $end Program A A");
    assert_eq!(
        compile(&text, &cfg()),
        Err(TableError::DuplicateSymbol("A".into()))
    );
}

#[test]
fn rule_lhs_must_be_known() {
    let text = TINY.replace("1: Program -> A", "1: Other -> A");
    assert!(matches!(
        compile(&text, &cfg()),
        Err(TableError::UnknownSymbol { line: 4, name }) if name == "Other"
    ));
}

#[test]
fn rule_capacity_is_enforced() {
    let mut c = cfg();
    c.rule_capacity = 3;
    assert_eq!(
        compile(EXPR, &c),
        Err(TableError::RuleCapacityExceeded { capacity: 3 })
    );
    c.rule_capacity = 4;
    assert!(compile(EXPR, &c).is_ok());
}
