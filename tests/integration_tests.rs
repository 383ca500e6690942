//! Integration tests for the public scanning API.
//!
//! These tests drive `tokenize` end to end and check the properties every
//! scan must hold: termination with a single EOF, ordering, line tracking,
//! idempotence and non-fatal error recovery.

use lox::{
    errors::errors::ErrorImpl,
    lexer::{
        lexer::tokenize,
        tokens::{Literal, Token, TokenKind},
    },
    render_error,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn token(kind: TokenKind, lexeme: &str, literal: Literal, line: u32) -> Token {
    Token {
        kind,
        lexeme: lexeme.to_string(),
        literal,
        line,
    }
}

#[test]
fn test_scan_statement_with_comment() {
    let (tokens, errors) = tokenize("var x = 1 + 2; // sum", Some("test.lox".to_string()));

    assert!(errors.is_empty());
    assert_eq!(
        tokens,
        vec![
            token(TokenKind::Var, "var", Literal::None, 1),
            token(TokenKind::Identifier, "x", Literal::None, 1),
            token(TokenKind::Equal, "=", Literal::None, 1),
            token(TokenKind::Number, "1", Literal::Number(1.0), 1),
            token(TokenKind::Plus, "+", Literal::None, 1),
            token(TokenKind::Number, "2", Literal::Number(2.0), 1),
            token(TokenKind::Semicolon, ";", Literal::None, 1),
            token(TokenKind::EOF, "", Literal::None, 1),
        ]
    );
}

#[test]
fn test_scan_program() {
    let source = r#"
class Greeter {
  greet(name) {
    if (name != nil and !(name == "")) {
      print "hi " + name;
    }
    return this;
  }
}

fun count(n) {
  for (var i = 0; i <= n; i = i + 1) print i / 2.5;
  while (n >= 0 or false) n = n - 1;
}
"#;

    let (tokens, errors) = tokenize(source, Some("program.lox".to_string()));

    assert!(errors.is_empty());
    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EOF));
    assert_eq!(tokens.last().map(|token| token.line), Some(15));

    let class = &tokens[0];
    assert_eq!(class.kind, TokenKind::Class);
    assert_eq!(class.line, 2);

    let greeting = tokens
        .iter()
        .find(|token| token.kind == TokenKind::String && token.lexeme != "\"\"")
        .map(|token| (token.literal.clone(), token.line));
    assert_eq!(
        greeting,
        Some((Literal::String("hi ".to_string()), 5))
    );

    let fraction = tokens
        .iter()
        .find(|token| token.lexeme == "2.5")
        .map(|token| token.literal.clone());
    assert_eq!(fraction, Some(Literal::Number(2.5)));

    for kind in [
        TokenKind::Super,
        TokenKind::True,
        TokenKind::Comma,
        TokenKind::Star,
        TokenKind::Less,
        TokenKind::Greater,
    ] {
        assert!(tokens.iter().all(|token| token.kind != kind));
    }
}

#[test]
fn test_errors_do_not_stop_scan() {
    let source = "var a = 1;\nvar b = @;\nvar c = \"open";
    let (tokens, errors) = tokenize(source, Some("broken.lox".to_string()));

    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors[0].kind(),
        &ErrorImpl::UnexpectedCharacter { character: '@' }
    );
    assert_eq!(errors[0].get_line(), 2);
    assert_eq!(
        errors[1].kind(),
        &ErrorImpl::UnterminatedString {
            partial: "open".to_string()
        }
    );
    assert_eq!(errors[1].get_line(), 3);

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Semicolon,
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::EOF,
        ]
    );

    let rendered = render_error(&errors[0], source);
    assert!(rendered.starts_with("Error: UnexpectedCharacter"));
    assert!(rendered.contains("-> broken.lox"));
    assert!(rendered.contains("2 | var b = @;"));
}

fn newlines_before(source: &str, token: &Token, search_from: &mut usize) -> u32 {
    let offset = source[*search_from..]
        .find(token.lexeme.as_str())
        .map(|found| *search_from + found)
        .unwrap_or(source.len());
    *search_from = offset + token.lexeme.len();

    source[..offset].matches('\n').count() as u32
}

proptest! {
    #[test]
    fn scan_always_ends_with_single_eof(source in any::<String>()) {
        let (tokens, _) = tokenize(&source, None);

        prop_assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EOF));
        prop_assert_eq!(tokens.last().map(|token| token.lexeme.as_str()), Some(""));
        prop_assert_eq!(
            tokens.iter().filter(|token| token.kind == TokenKind::EOF).count(),
            1
        );
    }

    #[test]
    fn scan_is_idempotent(source in any::<String>()) {
        prop_assert_eq!(tokenize(&source, None), tokenize(&source, None));
    }

    #[test]
    fn well_formed_source_has_no_errors(
        source in "([a-z_][a-z0-9_]{0,6}|[0-9]{1,4}(\\.[0-9]{1,3})?|\"[a-z ]{0,8}\"|[(){},.;*+-]|[!=<>]=?|/|//[a-z ]{0,10}|[ \t\r\n]){0,40}"
    ) {
        let (_, errors) = tokenize(&source, None);

        prop_assert!(errors.is_empty(), "errors for {:?}: {:?}", source, errors);
    }

    #[test]
    fn token_line_counts_preceding_newlines(
        source in "([a-z]{1,5}|[0-9]{1,3}|\"[a-z\n]{0,5}\"|[;+]|[ \n]{1,3}|//[A-Z ]{0,5}\n){0,30}"
    ) {
        let (tokens, errors) = tokenize(&source, None);
        prop_assert!(errors.is_empty());

        let mut search_from = 0;
        for token in tokens.iter().filter(|token| token.kind != TokenKind::EOF) {
            let newlines = newlines_before(&source, token, &mut search_from);
            prop_assert_eq!(token.line, newlines + 1, "token {}", token);
        }
    }

    #[test]
    fn lexemes_are_source_slices_in_order(source in any::<String>()) {
        let (tokens, _) = tokenize(&source, None);

        let mut rest = source.as_str();
        for token in tokens.iter().filter(|token| token.kind != TokenKind::EOF) {
            let found = rest.find(token.lexeme.as_str());
            prop_assert!(found.is_some(), "lexeme {:?} out of order", token.lexeme);
            if let Some(found) = found {
                rest = &rest[found + token.lexeme.len()..];
            }
        }
    }
}
