use frontc::lexer::{
    TokenKind,
    tables::{
        Dfa, DfaLabel, DfaLoadError, load_compact_tables_from_bytes, load_dfa_json_bytes,
        write_compact,
    },
    tokens::{ALL_KINDS, NUM_TOKENS},
};

#[test]
fn token_kinds_are_dense_labels() {
    assert_eq!(NUM_TOKENS as usize, ALL_KINDS.len());
    for (i, k) in ALL_KINDS.iter().enumerate() {
        assert_eq!(k.label() as usize, i, "{k:?}");
        assert_eq!(TokenKind::from_name(k.name()), Some(*k));
    }
    assert_eq!(TokenKind::End.label(), 0);
    assert_eq!(TokenKind::from_name("END"), Some(TokenKind::End));
    assert_eq!(TokenKind::from_label(NUM_TOKENS), None);
}

#[test]
fn frozen_table_is_shared_and_matches_fresh_build() {
    let a = Dfa::frozen();
    let b = Dfa::frozen();
    assert!(std::ptr::eq(a, b));
    assert_eq!(*a, Dfa::new());
}

#[test]
fn comment_and_quote_markers() {
    let dfa = Dfa::frozen();
    let slash = dfa.transition(dfa.start, b'/');
    assert!(slash.valid);
    assert_eq!(slash.label, DfaLabel::Token(TokenKind::Slash));

    let line = dfa.transition(slash.next, b'/');
    let block = dfa.transition(slash.next, b'*');
    assert_eq!((line.valid, line.label), (true, DfaLabel::LineComment));
    assert_eq!((block.valid, block.label), (true, DfaLabel::BlockComment));

    assert_eq!(dfa.transition(dfa.start, b'"').label, DfaLabel::StringQuote);
    assert_eq!(dfa.transition(dfa.start, b'\'').label, DfaLabel::CharQuote);
}

#[test]
fn whitespace_and_unknown_bytes_have_no_transition() {
    let dfa = Dfa::frozen();
    for b in [b' ', b'\n', b'@', b'#', b'$', 0x80, 0xFF] {
        assert!(!dfa.transition(dfa.start, b).valid, "byte {b:#04x}");
    }
    assert!(!dfa.transition(u16::MAX, b'a').valid);
}

#[test]
fn compact_bytes_load_back() {
    let dfa = Dfa::frozen();
    let mut buf = Vec::new();
    write_compact(&mut buf, dfa).unwrap();
    assert_eq!(&buf[..8], b"LXDFA002");
    assert_eq!(buf.len(), 16 + dfa.n_states() * 256 * 4);
    let back = load_compact_tables_from_bytes(&buf).unwrap();
    assert_eq!(&back, dfa);
}

#[test]
fn compact_loader_rejects_bad_input() {
    let mut buf = Vec::new();
    write_compact(&mut buf, Dfa::frozen()).unwrap();

    assert!(matches!(
        load_compact_tables_from_bytes(&buf[..10]),
        Err(DfaLoadError::TooShort)
    ));

    let mut bad_magic = buf.clone();
    bad_magic[0] = b'X';
    assert!(matches!(
        load_compact_tables_from_bytes(&bad_magic),
        Err(DfaLoadError::BadMagic)
    ));

    assert!(matches!(
        load_compact_tables_from_bytes(&buf[..buf.len() - 1]),
        Err(DfaLoadError::Truncated(_))
    ));

    // first label cell of state 0 -> an unused code
    let label_base = 16 + Dfa::frozen().n_states() * 256 * 2;
    let mut bad_label = buf.clone();
    bad_label[label_base..label_base + 2].copy_from_slice(&0x7777u16.to_le_bytes());
    assert!(matches!(
        load_compact_tables_from_bytes(&bad_label),
        Err(DfaLoadError::UnknownLabel { state: 0, byte: 0, .. })
    ));
}

#[test]
fn json_tables_load_back() {
    let path = std::env::temp_dir().join(format!("frontc_dfa_{}.json", std::process::id()));
    frontc::lexer::tables::save_dfa_json(&path, Dfa::frozen()).unwrap();
    let data = std::fs::read(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(&load_dfa_json_bytes(&data).unwrap(), Dfa::frozen());
    assert!(load_dfa_json_bytes(b"{}").is_err());
}
