use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> u32 {
        self.position.0
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { character } => ErrorTip::Suggestion(format!(
                "Unexpected character `{}`",
                character.escape_default()
            )),
            ErrorImpl::UnterminatedString { partial } if partial.is_empty() => {
                ErrorTip::Suggestion(String::from("Missing closing `\"`"))
            }
            ErrorImpl::UnterminatedString { partial } => ErrorTip::Suggestion(format!(
                "Missing closing `\"` after `{}`",
                first_line(partial)
            )),
        }
    }
}

/// Message in the "[line N] Error: ..." form used by the prompt and file runners.
impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] Error: {}", self.position.0, self.internal_error)
    }
}

impl std::error::Error for Error {}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unexpected character {character:?}")]
    UnexpectedCharacter { character: char },
    #[error("unterminated string")]
    UnterminatedString { partial: String },
}
