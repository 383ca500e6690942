//! Lexical analysis for Lox.
//!
//! This module contains the scanner that converts source text into a
//! stream of tokens for a later parsing stage. It handles:
//!
//! - Single and double character operators with one character of lookahead
//! - String, number and identifier literals
//! - Reserved words via a static lookup table
//! - Line comments and whitespace
//! - Line tracking and non-fatal diagnostics

pub mod lexer;
pub mod tokens;
