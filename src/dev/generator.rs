// src/dev/generator.rs
// Random-but-valid sources for property tests and fuzz_lex. Every token is
// followed by whitespace or a comment, so the expected stream is known.

use rand::Rng;

use crate::lexer::tokens::{TokenKind, retag_keyword};

const IDENT_HEAD: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";
const IDENT_TAIL: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_0123456789";
const WORDS: &[&str] = &["if", "else", "while", "for", "return", "foo", "bar"];

const PUNCT: &[(&str, TokenKind)] = &[
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("=", TokenKind::Assign),
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::NotEq),
    ("!", TokenKind::Not),
    ("<", TokenKind::Lt),
    ("<=", TokenKind::Le),
    (">", TokenKind::Gt),
    (">=", TokenKind::Ge),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("&", TokenKind::Amp),
    ("|", TokenKind::Pipe),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    (";", TokenKind::Semicolon),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    (":", TokenKind::Colon),
];

fn pick(rng: &mut impl Rng, set: &[u8]) -> char {
    set[rng.random_range(0..set.len())] as char
}

fn token(rng: &mut impl Rng) -> (TokenKind, String) {
    match rng.random_range(0..10u32) {
        0..=2 => {
            let mut s = String::new();
            s.push(pick(rng, IDENT_HEAD));
            for _ in 0..rng.random_range(0..8) {
                s.push(pick(rng, IDENT_TAIL));
            }
            (retag_keyword(TokenKind::Ident, &s), s)
        }
        3 => {
            let w = WORDS[rng.random_range(0..WORDS.len())];
            (retag_keyword(TokenKind::Ident, w), w.to_string())
        }
        4 => (TokenKind::IntLit, rng.random_range(0..100_000u32).to_string()),
        5 => (
            TokenKind::FloatLit,
            format!("{}.{}", rng.random_range(0..1000u32), rng.random_range(0..1000u32)),
        ),
        _ => {
            let (s, k) = PUNCT[rng.random_range(0..PUNCT.len())];
            (k, s.to_string())
        }
    }
}

fn separator(rng: &mut impl Rng) -> &'static str {
    match rng.random_range(0..12u32) {
        0 => "\n",
        1 => "\t",
        2 => " // line comment\n",
        3 => " /* block */ ",
        4 => " /* multi\nline\n*/\n",
        5 => "  \r\n",
        _ => " ",
    }
}

/// Generates at least `target_len` bytes and the tokens a lexer must produce.
pub fn gen_valid_case(rng: &mut impl Rng, target_len: usize) -> (String, Vec<(TokenKind, String)>) {
    let mut src = String::with_capacity(target_len + 32);
    let mut expected = Vec::new();
    while src.len() < target_len {
        let (kind, text) = token(rng);
        src.push_str(&text);
        src.push_str(separator(rng));
        expected.push((kind, text));
    }
    (src, expected)
}

