#![allow(clippy::module_inception)]

use std::{rc::Rc, sync::Once};

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;

/// Line (1-based) and file name a diagnostic points at.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber when `RUST_LOG` is set.
///
/// Safe to call more than once. Use `RUST_LOG=lox=debug` for a per-scan
/// summary or `RUST_LOG=lox=trace` to see every token as it is emitted.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}

/// Returns the text of a 1-based line, without its line terminator.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    let index = (line as usize).checked_sub(1)?;

    source
        .split('\n')
        .nth(index)
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: UnexpectedCharacter (Unexpected character `@`)
        -> main.lox
           |
         2 | var a = @;
           |
    */

    let position = error.get_position();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.1));

    let Some(line_text) = get_line(source, position.0) else {
        return out;
    };

    let line_string = position.0.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));
    out.push_str(&format!("{} | {}\n", line_string, line_text.trim()));
    out.push_str(&format!("{:>padding$}\n", "|"));

    out
}
