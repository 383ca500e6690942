//! Utility macros for the scanner.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_ERROR!` - Creates a diagnostic at a line of the file being scanned

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$lexeme` - The raw source text of the token
/// * `$literal` - The parsed Literal value
/// * `$line` - The line the lexeme started on
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), Literal::Number(42.0), 1);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $literal:expr, $line:expr) => {
        Token {
            kind: $kind,
            lexeme: $lexeme,
            literal: $literal,
            line: $line,
        }
    };
}

/// Creates an Error for the file a lexer is scanning.
///
/// ```ignore
/// let error = MK_ERROR!(ErrorImpl::UnterminatedString { partial }, line, lexer.file);
/// ```
#[macro_export]
macro_rules! MK_ERROR {
    ($impl:expr, $line:expr, $file:expr) => {
        Error::new($impl, Position($line, Rc::clone(&$file)))
    };
}
