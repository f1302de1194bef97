// src/lexer/driver.rs
// Byte-at-a-time DFA lexer with whitespace/comment/overflow recovery.

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use crate::{
    config::LexerConfig,
    lexer::{
        diag::{DiagKind, LexDiagnostic},
        tables::dfa::{Dfa, DfaLabel},
        tokens::{TokenKind, retag_keyword},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub label: TokenKind,
    pub lexeme: String,
    pub row: u32,
    pub col: u32,
}

/// Everything one lexing run produced. Tokens are in commit order.
#[derive(Debug, Default)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<LexDiagnostic>,
}

impl Lexed {
    pub fn count(&self, kind: DiagKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

#[inline]
fn is_white(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

#[inline]
fn is_newline(b: u8) -> bool {
    matches!(b, b'\n' | b'\r')
}

/// What the outer loop does after a recovery subroutine returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    Continue,
    Stop,
}

/// Adapts a reader into a byte iterator. A read error ends the input.
pub struct ReadBytes<R: Read> {
    inner: io::Bytes<BufReader<R>>,
}

impl<R: Read> ReadBytes<R> {
    pub fn new(r: R) -> Self {
        Self {
            inner: BufReader::new(r).bytes(),
        }
    }
}

impl<R: Read> Iterator for ReadBytes<R> {
    type Item = u8;
    fn next(&mut self) -> Option<u8> {
        match self.inner.next()? {
            Ok(b) => Some(b),
            Err(e) => {
                log::error!("read failed, treating as end of input: {e}");
                None
            }
        }
    }
}

pub struct Lexer<'d> {
    dfa: &'d Dfa,
    file: String,
    config: LexerConfig,
}

impl<'d> Lexer<'d> {
    pub fn new(dfa: &'d Dfa, file: impl Into<String>, config: LexerConfig) -> Self {
        Self {
            dfa,
            file: file.into(),
            config,
        }
    }

    pub fn run_bytes(&self, src: &[u8]) -> Lexed {
        self.run(src.iter().copied())
    }

    pub fn run_reader<R: Read>(&self, r: R) -> Lexed {
        self.run(ReadBytes::new(r))
    }

    pub fn run<I: Iterator<Item = u8>>(&self, input: I) -> Lexed {
        let mut sc = Scanner {
            dfa: self.dfa,
            file: &self.file,
            max_len: self.config.max_token_len,
            input,
            state: self.dfa.start,
            buf: Vec::with_capacity(self.config.max_token_len),
            pending: None,
            row: 1,
            col: 0,
            carry: None,
            done: false,
            last: 0,
            crlf: false,
            out: Lexed::default(),
        };
        while let Some(c) = sc.fetch() {
            if sc.step(c) == Resume::Stop {
                break;
            }
        }
        log::debug!(
            "{}: {} tokens, {} diagnostics",
            self.file,
            sc.out.tokens.len(),
            sc.out.diagnostics.len()
        );
        sc.out
    }
}

struct Scanner<'a, I> {
    dfa: &'a Dfa,
    file: &'a str,
    max_len: usize,
    input: I,

    state: u16,
    buf: Vec<u8>,
    /// `None` when no token is pending; `Some(Error)` in the error sub-state.
    pending: Option<DfaLabel>,
    row: u32,
    col: u32,
    carry: Option<u8>,
    done: bool,
    /// Last fresh input byte, and whether the current one closes a `\r\n`.
    last: u8,
    crlf: bool,

    out: Lexed,
}

impl<I: Iterator<Item = u8>> Scanner<'_, I> {
    /// Carry-over first, then fresh input. The first exhaustion yields a
    /// synthetic newline so the last pending token is flushed.
    fn fetch(&mut self) -> Option<u8> {
        if let Some(c) = self.carry.take() {
            return Some(c);
        }
        match self.read() {
            Some(c) => Some(c),
            None if self.done => None,
            None => {
                self.done = true;
                self.col += 1;
                self.crlf = false;
                Some(b'\n')
            }
        }
    }

    /// Next fresh byte; advances the column.
    fn read(&mut self) -> Option<u8> {
        let c = self.input.next()?;
        self.col += 1;
        self.crlf = self.last == b'\r' && c == b'\n';
        self.last = c;
        Some(c)
    }

    fn step(&mut self, c: u8) -> Resume {
        if is_white(c) {
            match self.pending {
                Some(DfaLabel::Error) => {
                    self.diag(DiagKind::CorruptedByWhitespace, Some(c));
                    self.reset();
                }
                Some(_) => self.commit(),
                None => {}
            }
            if is_newline(c) {
                self.newline();
            }
            return Resume::Continue;
        }

        let t = self.dfa.transition(self.state, c);
        if !t.valid {
            match self.pending {
                None => {
                    self.diag(DiagKind::UnexpectedCharacter, Some(c));
                    self.reset();
                    return self.skip_to_whitespace();
                }
                Some(DfaLabel::Error) => {
                    self.diag(DiagKind::CorruptedByCharacter, Some(c));
                    self.reset();
                    self.carry = Some(c);
                }
                Some(_) => {
                    self.commit();
                    self.carry = Some(c);
                }
            }
            return Resume::Continue;
        }

        match t.label {
            DfaLabel::LineComment => {
                self.flush_before_comment();
                self.skip_line()
            }
            DfaLabel::BlockComment => {
                self.flush_before_comment();
                self.skip_block()
            }
            DfaLabel::CharQuote | DfaLabel::StringQuote => {
                // Literal lexing is not defined; the quote byte is dropped.
                log::trace!("{}:{}:{}: quote ignored", self.file, self.row, self.col);
                Resume::Continue
            }
            label => {
                if self.buf.len() < self.max_len {
                    self.buf.push(c);
                    self.pending = Some(label);
                    self.state = t.next;
                    Resume::Continue
                } else {
                    self.diag(DiagKind::TokenOverflow, Some(c));
                    self.reset();
                    self.skip_to_whitespace()
                }
            }
        }
    }

    /// `\r`, `\n` and `\r\n` each end one row.
    fn newline(&mut self) {
        if !self.crlf {
            self.row += 1;
        }
        self.col = 0;
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.state = self.dfa.start;
        self.pending = None;
    }

    fn commit(&mut self) {
        let Some(DfaLabel::Token(kind)) = self.pending else {
            self.reset();
            return;
        };
        let lexeme = String::from_utf8_lossy(&self.buf).into_owned();
        self.out.tokens.push(Token {
            label: retag_keyword(kind, &lexeme),
            lexeme,
            row: self.row,
            col: self.col,
        });
        self.reset();
    }

    fn diag(&mut self, kind: DiagKind, byte: Option<u8>) {
        let d = LexDiagnostic {
            kind,
            file: self.file.to_string(),
            row: self.row,
            col: self.col,
            byte,
        };
        d.log();
        self.out.diagnostics.push(d);
    }

    /// The opener's first byte is the last buffered byte; whatever precedes
    /// it is committed, or discarded if it was in the error sub-state.
    fn flush_before_comment(&mut self) {
        self.buf.pop();
        if self.buf.is_empty() {
            self.reset();
        } else if self.pending == Some(DfaLabel::Error) {
            self.diag(DiagKind::CorruptedByComment, None);
            self.reset();
        } else {
            self.commit();
        }
    }

    fn skip_to_whitespace(&mut self) -> Resume {
        loop {
            let Some(c) = self.read() else {
                return Resume::Stop;
            };
            if is_newline(c) {
                self.newline();
            }
            if is_white(c) {
                return Resume::Continue;
            }
        }
    }

    fn skip_line(&mut self) -> Resume {
        loop {
            match self.read() {
                None => return Resume::Stop,
                Some(c) if is_newline(c) => {
                    self.newline();
                    return Resume::Continue;
                }
                Some(_) => {}
            }
        }
    }

    fn skip_block(&mut self) -> Resume {
        let mut last = 0u8;
        loop {
            let Some(c) = self.read() else {
                self.diag(DiagKind::CommentTruncated, None);
                return Resume::Stop;
            };
            if is_newline(c) {
                self.newline();
            } else if last == b'*' && c == b'/' {
                return Resume::Continue;
            }
            last = c;
        }
    }
}

// -------------------- entry points --------------------

/// Lex with the frozen DFA and default limits. Never fails.
pub fn lex(source: &str) -> Vec<Token> {
    lex_bytes(source.as_bytes(), "<input>").tokens
}

pub fn lex_bytes(source: &[u8], file: &str) -> Lexed {
    Lexer::new(Dfa::frozen(), file, LexerConfig::default()).run_bytes(source)
}

pub fn lex_reader<R: Read>(r: R, file: &str, config: LexerConfig) -> Lexed {
    Lexer::new(Dfa::frozen(), file, config).run_reader(r)
}

/// `-` reads standard input.
pub fn lex_file(path: &Path, config: LexerConfig) -> io::Result<Lexed> {
    if path.as_os_str() == "-" {
        return Ok(lex_reader(io::stdin().lock(), "<stdin>", config));
    }
    let f = File::open(path)?;
    Ok(lex_reader(f, &path.display().to_string(), config))
}
