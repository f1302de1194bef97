// src/lexer/tokens.rs

/// Unified grammar label: terminals in `[0, NUM_TOKENS)`, nonterminals above.
pub type Label = u32;

/// Terminal kinds. Discriminants are dense from 0 and double as labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u32)]
pub enum TokenKind {
    End = 0,
    Ident,
    IntLit,
    FloatLit,

    // keywords (retagged from Ident at commit)
    KwIf,
    KwElse,
    KwWhile,
    KwFor,
    KwReturn,

    // arithmetic / assignment
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,

    // comparisons / logic
    EqEq,
    NotEq,
    Not,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Amp,
    Pipe,

    // brackets / punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
}

pub const ALL_KINDS: &[TokenKind] = &[
    TokenKind::End,
    TokenKind::Ident,
    TokenKind::IntLit,
    TokenKind::FloatLit,
    TokenKind::KwIf,
    TokenKind::KwElse,
    TokenKind::KwWhile,
    TokenKind::KwFor,
    TokenKind::KwReturn,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Percent,
    TokenKind::Assign,
    TokenKind::EqEq,
    TokenKind::NotEq,
    TokenKind::Not,
    TokenKind::Lt,
    TokenKind::Le,
    TokenKind::Gt,
    TokenKind::Ge,
    TokenKind::AndAnd,
    TokenKind::OrOr,
    TokenKind::Amp,
    TokenKind::Pipe,
    TokenKind::LParen,
    TokenKind::RParen,
    TokenKind::LBrace,
    TokenKind::RBrace,
    TokenKind::LBracket,
    TokenKind::RBracket,
    TokenKind::Semicolon,
    TokenKind::Comma,
    TokenKind::Dot,
    TokenKind::Colon,
];

/// Number of terminal labels.
pub const NUM_TOKENS: Label = ALL_KINDS.len() as Label;

impl TokenKind {
    #[inline]
    pub fn label(self) -> Label {
        self as Label
    }

    /// Symbol name used by the grammar generator's table dump.
    pub fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            End => "END",
            Ident => "IDENT",
            IntLit => "INT_LIT",
            FloatLit => "FLOAT_LIT",
            KwIf => "IF",
            KwElse => "ELSE",
            KwWhile => "WHILE",
            KwFor => "FOR",
            KwReturn => "RETURN",
            Plus => "PLUS",
            Minus => "MINUS",
            Star => "STAR",
            Slash => "SLASH",
            Percent => "PERCENT",
            Assign => "ASSIGN",
            EqEq => "EQ_EQ",
            NotEq => "NOT_EQ",
            Not => "NOT",
            Lt => "LT",
            Le => "LE",
            Gt => "GT",
            Ge => "GE",
            AndAnd => "AND_AND",
            OrOr => "OR_OR",
            Amp => "AMP",
            Pipe => "PIPE",
            LParen => "LPAREN",
            RParen => "RPAREN",
            LBrace => "LBRACE",
            RBrace => "RBRACE",
            LBracket => "LBRACKET",
            RBracket => "RBRACKET",
            Semicolon => "SEMICOLON",
            Comma => "COMMA",
            Dot => "DOT",
            Colon => "COLON",
        }
    }

    pub fn from_name(name: &str) -> Option<TokenKind> {
        ALL_KINDS.iter().copied().find(|k| k.name() == name)
    }

    pub fn from_label(label: Label) -> Option<TokenKind> {
        ALL_KINDS.get(label as usize).copied()
    }
}

/// Keyword identifiers are lexed as `Ident` and retagged at commit.
pub fn retag_keyword(kind: TokenKind, lexeme: &str) -> TokenKind {
    use TokenKind::*;
    if kind != Ident {
        return kind;
    }
    match lexeme {
        "if" => KwIf,
        "else" => KwElse,
        "while" => KwWhile,
        "for" => KwFor,
        "return" => KwReturn,
        _ => Ident,
    }
}
