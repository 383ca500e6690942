use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_ERROR, MK_TOKEN,
};

use super::tokens::{Literal, Token, TokenKind, RESERVED_LOOKUP};

/// Single-pass scanner over one source text.
///
/// `start` and `current` are byte offsets into `source`. The cursor only
/// ever moves by whole characters, so both always sit on a char boundary
/// and `0 <= start <= current <= source.len()` holds throughout.
pub struct Lexer<'a> {
    tokens: Vec<Token>,
    errors: Vec<Error>,
    source: &'a str,
    start: usize,
    current: usize,
    line: u32,
    file: Rc<String>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: Option<String>) -> Lexer<'a> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            errors: vec![],
            source,
            start: 0,
            current: 0,
            line: 1,
            file: file_name,
        }
    }

    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<Error>) {
        while !self.at_eof() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(MK_TOKEN!(
            TokenKind::EOF,
            String::new(),
            Literal::None,
            self.line
        ));

        (self.tokens, self.errors)
    }

    fn scan_token(&mut self) {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '!' => self.add_either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.add_either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.add_either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.add_either('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '/' => {
                if self.match_char('/') {
                    // Comment runs to the end of the line; the newline itself
                    // is left for the next iteration so the line count stays right
                    while self.peek() != '\n' && !self.at_eof() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier(),
            character => {
                self.error(ErrorImpl::UnexpectedCharacter { character }, self.line);
            }
        }
    }

    fn string(&mut self) {
        let start_line = self.line;

        while self.peek() != '"' && !self.at_eof() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.at_eof() {
            let partial = String::from(&self.source[self.start + 1..self.current]);
            self.error(ErrorImpl::UnterminatedString { partial }, start_line);
            return;
        }

        // Closing quote
        self.advance();

        let value = String::from(&self.source[self.start + 1..self.current - 1]);
        self.push(MK_TOKEN!(
            TokenKind::String,
            String::from(self.lexeme()),
            Literal::String(value),
            start_line
        ));
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A trailing dot with no digit after it belongs to the next token
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        // Digits with at most one inner dot always parse as f64
        let value = self.lexeme().parse::<f64>().unwrap_or_default();
        self.push(MK_TOKEN!(
            TokenKind::Number,
            String::from(self.lexeme()),
            Literal::Number(value),
            self.line
        ));
    }

    fn identifier(&mut self) {
        while is_alpha_numeric(self.peek()) {
            self.advance();
        }

        let kind = match RESERVED_LOOKUP.get(self.lexeme()) {
            Some(kind) => *kind,
            None => TokenKind::Identifier,
        };

        self.add_token(kind);
    }

    pub fn at_eof(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Consumes the next character. Callers check `at_eof` first.
    pub fn advance(&mut self) -> char {
        let c = self.peek();
        self.current += c.len_utf8();
        c
    }

    /// Consumes the next character only if it is `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.at_eof() || self.peek() != expected {
            return false;
        }

        self.current += expected.len_utf8();
        true
    }

    pub fn peek(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn peek_next(&self) -> char {
        self.remainder().chars().nth(1).unwrap_or('\0')
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.current..]
    }

    pub fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    pub fn push(&mut self, token: Token) {
        trace!(token = %token, line = token.line, "token");
        self.tokens.push(token);
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.push(MK_TOKEN!(
            kind,
            String::from(self.lexeme()),
            Literal::None,
            self.line
        ));
    }

    fn add_either(&mut self, next: char, matched: TokenKind, single: TokenKind) {
        let kind = if self.match_char(next) { matched } else { single };
        self.add_token(kind);
    }

    fn error(&mut self, error_impl: ErrorImpl, line: u32) {
        let error = MK_ERROR!(error_impl, line, self.file);
        trace!(%error, "diagnostic");
        self.errors.push(error);
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alpha_numeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

/// Scans `source` into tokens, collecting every diagnostic along the way.
///
/// The returned tokens always end with exactly one `EOF` token. `file` only
/// labels diagnostics; prompt input has none and is reported as `shell`.
pub fn tokenize(source: &str, file: Option<String>) -> (Vec<Token>, Vec<Error>) {
    let lex = Lexer::new(source, file);
    let file = Rc::clone(&lex.file);

    let (tokens, errors) = lex.scan_tokens();

    debug!(
        file = %file,
        bytes = source.len(),
        tokens = tokens.len(),
        errors = errors.len(),
        "tokenized"
    );

    (tokens, errors)
}
