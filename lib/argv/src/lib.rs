//! # Command-Line Argument Lexer and Typed Flags
//!
//! This library provides two layers to handle program arguments:
//!
//! - A pull-based lexer (`lex::Lexer`), which turns raw program arguments
//!   into long options, short options, and values, one token at a time. The
//!   caller decides whether an option takes a value. The lexer has no
//!   knowledge of available flags.
//!
//! - A typed flag registry (`Registry`), which registers flags with names,
//!   usage texts, and typed defaults, and parses program arguments into a
//!   `ParseResult` by driving the lexer.
//!
//! Parse errors are structured and always carry the partial result up to the
//! error, including all unprocessed arguments. This library never writes
//! output nor terminates the program. Reporting errors, showing usage
//! information, and choosing exit codes is left to the caller.
//!
//! ```
//! let mut registry = argv::Registry::new();
//! let number = registry.add_flag("n", "Number all output lines", false).unwrap();
//! let separator = registry.add_flag("separator", "Line separator", "\n").unwrap();
//!
//! let result = registry.parse(&["cat", "-n", "--separator=;", "--", "-file"]).unwrap();
//!
//! assert!(*result.get(number));
//! assert_eq!(result.get(separator), ";");
//! assert_eq!(result.remaining(), ["-file"]);
//! ```

#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;
extern crate core;

use alloc::string::String;

pub mod help;
pub mod lex;
pub mod parse;
pub mod registry;
pub mod result;
pub mod value;

pub use lex::{Lexer, Token};
pub use parse::{parse, parse_from};
pub use registry::{Flag, FlagId, Registry};
pub use result::ParseResult;
pub use value::{Kind, Tag, Value};

/// Enumeration of all errors that can be raised by the program argument
/// parser. Every error names the flag it was raised for, as given on the
/// command-line (e.g., `--name` or `-x`).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    /// An inline value was left unconsumed. Only raised if a caller hands a
    /// lexer with a pending inline value to the parser.
    #[error("unexpected value '{value}' for {flag}")]
    UnexpectedValue {
        flag: String,
        value: String,
    },

    /// Help information was requested via `--help` or `-h`. Any inline
    /// value, or the rest of a short-option bundle, is provided as well.
    #[error("help requested via {flag}")]
    HelpRequested {
        flag: String,
        value: Option<String>,
    },

    /// The given flag is unknown. Any inline value given to it, or the rest
    /// of a short-option bundle, is provided as well.
    #[error("unknown flag {flag}")]
    UnknownFlag {
        flag: String,
        value: Option<String>,
    },

    /// The given flag requires a value, but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        flag: String,
        id: FlagId,
    },

    /// The value of the given flag cannot be coerced into the kind of the
    /// flag.
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue {
        flag: String,
        value: String,
        id: FlagId,
        #[source]
        source: value::Error,
    },
}

/// Error raised by the program argument parser. This carries the kind of
/// the error, as well as the partial result up to the error.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    partial: ParseResult,
}

impl Error {
    pub(crate) fn with(kind: ErrorKind, partial: ParseResult) -> Self {
        Self {
            kind: kind,
            partial: partial,
        }
    }

    /// Yield the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Yield the partial result up to this error. All arguments that were
    /// not processed are listed as positional arguments.
    pub fn partial(&self) -> &ParseResult {
        &self.partial
    }

    /// Turn this error into its partial result.
    pub fn into_partial(self) -> ParseResult {
        self.partial
    }

    /// Yield the flag this error was raised for, as given on the
    /// command-line.
    pub fn flag(&self) -> &str {
        match &self.kind {
            ErrorKind::UnexpectedValue { flag, .. }
            | ErrorKind::HelpRequested { flag, .. }
            | ErrorKind::UnknownFlag { flag, .. }
            | ErrorKind::MissingValue { flag, .. }
            | ErrorKind::InvalidValue { flag, .. } => flag,
        }
    }

    /// Yield the offending value, if any.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::UnexpectedValue { value, .. }
            | ErrorKind::InvalidValue { value, .. } => Some(value),
            ErrorKind::HelpRequested { value, .. }
            | ErrorKind::UnknownFlag { value, .. } => value.as_deref(),
            ErrorKind::MissingValue { .. } => None,
        }
    }

    /// Yield the handle of the flag this error was raised for, if the flag
    /// is registered.
    pub fn id(&self) -> Option<FlagId> {
        match &self.kind {
            ErrorKind::MissingValue { id, .. }
            | ErrorKind::InvalidValue { id, .. } => Some(*id),
            ErrorKind::UnexpectedValue { .. }
            | ErrorKind::HelpRequested { .. }
            | ErrorKind::UnknownFlag { .. } => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.kind, f)
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        core::error::Error::source(&self.kind)
    }
}
