// src/lexer/tables/dfa.rs
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::lexer::tokens::TokenKind;

// DFA states (small hand-built DFA).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum S {
    Start,
    Ident,
    Int,
    Float,

    // malformed numerics; pending text is labelled Error
    IntDot,
    BadNumber,
    BadSlash,

    // '/' is a token on its own, or the first byte of a comment opener
    MaybeSlash,

    AfterPlus,
    AfterMinus,
    AfterStar,
    AfterPercent,

    // two-char combos via "maybe" then "done"
    MaybeAssign,
    EqEqDone,
    MaybeBang,
    NotEqDone,
    MaybeLess,
    LessEqualDone,
    MaybeGreater,
    GreaterEqualDone,
    MaybeAnd,
    AndAndDone,
    MaybeOr,
    OrOrDone,

    // singles
    AfterLParen,
    AfterRParen,
    AfterLBrace,
    AfterRBrace,
    AfterLBracket,
    AfterRBracket,
    AfterSemicolon,
    AfterComma,
    AfterDot,
    AfterColon,
}

impl S {
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }
}

pub const N_STATES: usize = 34;
pub const START: S = S::Start;

/// What a transition's destination means to the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DfaLabel {
    Token(TokenKind),
    Error,
    LineComment,
    BlockComment,
    CharQuote,
    StringQuote,
}

/// One cell of the `[state][byte]` matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub valid: bool,
    pub label: DfaLabel,
    pub next: u16,
}

impl Transition {
    pub const INVALID: Transition = Transition {
        valid: false,
        label: DfaLabel::Error,
        next: 0,
    };
}

#[inline]
fn is_alpha(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'A'..=b'Z' | b'_')
}
#[inline]
fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}
#[inline]
fn is_alnum(b: u8) -> bool {
    is_alpha(b) || is_digit(b)
}

fn label_of_state(s: S) -> DfaLabel {
    use S::*;
    let kind = match s {
        Start => return DfaLabel::Error,
        IntDot | BadNumber | BadSlash => return DfaLabel::Error,
        Ident => TokenKind::Ident,
        Int => TokenKind::IntLit,
        Float => TokenKind::FloatLit,
        MaybeSlash => TokenKind::Slash,
        AfterPlus => TokenKind::Plus,
        AfterMinus => TokenKind::Minus,
        AfterStar => TokenKind::Star,
        AfterPercent => TokenKind::Percent,
        MaybeAssign => TokenKind::Assign,
        EqEqDone => TokenKind::EqEq,
        MaybeBang => TokenKind::Not,
        NotEqDone => TokenKind::NotEq,
        MaybeLess => TokenKind::Lt,
        LessEqualDone => TokenKind::Le,
        MaybeGreater => TokenKind::Gt,
        GreaterEqualDone => TokenKind::Ge,
        MaybeAnd => TokenKind::Amp,
        AndAndDone => TokenKind::AndAnd,
        MaybeOr => TokenKind::Pipe,
        OrOrDone => TokenKind::OrOr,
        AfterLParen => TokenKind::LParen,
        AfterRParen => TokenKind::RParen,
        AfterLBrace => TokenKind::LBrace,
        AfterRBrace => TokenKind::RBrace,
        AfterLBracket => TokenKind::LBracket,
        AfterRBracket => TokenKind::RBracket,
        AfterSemicolon => TokenKind::Semicolon,
        AfterComma => TokenKind::Comma,
        AfterDot => TokenKind::Dot,
        AfterColon => TokenKind::Colon,
    };
    DfaLabel::Token(kind)
}

/// Fully materialized lexer DFA, `next[state][byte]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub next: Vec<[Transition; 256]>,
    pub start: u16,
}

static FROZEN: OnceLock<Dfa> = OnceLock::new();

impl Dfa {
    /// Process-wide table, built once and never mutated.
    pub fn frozen() -> &'static Dfa {
        FROZEN.get_or_init(Dfa::new)
    }

    /// Empty matrix with every cell invalid.
    pub fn empty(n_states: usize) -> Self {
        Self {
            next: vec![[Transition::INVALID; 256]; n_states],
            start: 0,
        }
    }

    #[inline]
    pub fn n_states(&self) -> usize {
        self.next.len()
    }

    /// Out-of-range states have no valid transitions.
    #[inline]
    pub fn transition(&self, state: u16, byte: u8) -> Transition {
        self.next
            .get(state as usize)
            .map(|row| row[byte as usize])
            .unwrap_or(Transition::INVALID)
    }

    pub fn set(&mut self, from: u16, bytes: &[u8], to: u16, label: DfaLabel) {
        for &b in bytes {
            self.next[from as usize][b as usize] = Transition {
                valid: true,
                label,
                next: to,
            };
        }
    }

    pub fn new() -> Self {
        let mut dfa = Dfa::empty(N_STATES);

        fn go(dfa: &mut Dfa, from: S, bytes: &[u8], to: S) {
            dfa.set(from.idx() as u16, bytes, to.idx() as u16, label_of_state(to));
        }
        fn go_if(dfa: &mut Dfa, from: S, pred: fn(u8) -> bool, to: S) {
            for b in 0u8..=255 {
                if pred(b) {
                    go(dfa, from, &[b], to);
                }
            }
        }
        fn marker(dfa: &mut Dfa, from: S, bytes: &[u8], label: DfaLabel) {
            dfa.set(from.idx() as u16, bytes, START.idx() as u16, label);
        }

        // Start
        go_if(&mut dfa, S::Start, is_alpha, S::Ident);
        go_if(&mut dfa, S::Start, is_digit, S::Int);
        for (b, to) in [
            (b'/', S::MaybeSlash),
            (b'+', S::AfterPlus),
            (b'-', S::AfterMinus),
            (b'*', S::AfterStar),
            (b'%', S::AfterPercent),
            (b'=', S::MaybeAssign),
            (b'!', S::MaybeBang),
            (b'<', S::MaybeLess),
            (b'>', S::MaybeGreater),
            (b'&', S::MaybeAnd),
            (b'|', S::MaybeOr),
            (b'(', S::AfterLParen),
            (b')', S::AfterRParen),
            (b'{', S::AfterLBrace),
            (b'}', S::AfterRBrace),
            (b'[', S::AfterLBracket),
            (b']', S::AfterRBracket),
            (b';', S::AfterSemicolon),
            (b',', S::AfterComma),
            (b'.', S::AfterDot),
            (b':', S::AfterColon),
        ] {
            go(&mut dfa, S::Start, &[b], to);
        }
        marker(&mut dfa, S::Start, b"\"", DfaLabel::StringQuote);
        marker(&mut dfa, S::Start, b"'", DfaLabel::CharQuote);

        // Ident
        go_if(&mut dfa, S::Ident, is_alnum, S::Ident);

        // Numbers
        go_if(&mut dfa, S::Int, is_digit, S::Int);
        go_if(&mut dfa, S::Int, is_alpha, S::BadNumber);
        go(&mut dfa, S::Int, b".", S::IntDot);

        go_if(&mut dfa, S::IntDot, is_digit, S::Float);
        go_if(&mut dfa, S::IntDot, is_alpha, S::BadNumber);
        go(&mut dfa, S::IntDot, b".", S::BadNumber);
        go(&mut dfa, S::IntDot, b"/", S::BadSlash);

        go_if(&mut dfa, S::Float, is_digit, S::Float);
        go_if(&mut dfa, S::Float, is_alpha, S::BadNumber);
        go(&mut dfa, S::Float, b".", S::BadNumber);

        go_if(&mut dfa, S::BadNumber, is_alnum, S::BadNumber);
        go(&mut dfa, S::BadNumber, b".", S::BadNumber);
        go(&mut dfa, S::BadNumber, b"/", S::BadSlash);

        // Comment openers
        marker(&mut dfa, S::MaybeSlash, b"/", DfaLabel::LineComment);
        marker(&mut dfa, S::MaybeSlash, b"*", DfaLabel::BlockComment);
        marker(&mut dfa, S::BadSlash, b"/", DfaLabel::LineComment);
        marker(&mut dfa, S::BadSlash, b"*", DfaLabel::BlockComment);

        // Two-char operators
        go(&mut dfa, S::MaybeAssign, b"=", S::EqEqDone);
        go(&mut dfa, S::MaybeBang, b"=", S::NotEqDone);
        go(&mut dfa, S::MaybeLess, b"=", S::LessEqualDone);
        go(&mut dfa, S::MaybeGreater, b"=", S::GreaterEqualDone);
        go(&mut dfa, S::MaybeAnd, b"&", S::AndAndDone);
        go(&mut dfa, S::MaybeOr, b"|", S::OrOrDone);

        dfa
    }
}

impl Default for Dfa {
    fn default() -> Self {
        Dfa::new()
    }
}
