//! Diagnostics produced while scanning.
//!
//! Scanning never stops on malformed input. Each problem becomes an
//! [`errors::Error`] carrying:
//!
//! - The kind of problem and the offending text
//! - The line where the offending lexeme started
//! - A tip used when rendering the diagnostic

pub mod errors;
