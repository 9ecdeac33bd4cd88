//! # Program Argument Parser
//!
//! Parse raw program arguments into a `ParseResult`, following the flags of
//! a caller provided registry. The parser drives a `Lexer` and resolves every
//! option it yields against the registry:
//!
//! - Toggles (boolean flags) only take inline values, as in `--flag=no`. A
//!   bare `--flag` always means `true`, and a following argument is never
//!   consumed.
//!
//! - All other flags require a value, either inline or as the following
//!   argument, which is taken verbatim even if it looks like an option.
//!
//! - `--help` and `-h` request help information, unless the registry has
//!   flags with these names.
//!
//! - `--` terminates flag parsing. All following arguments are positional.
//!
//! On error, all unprocessed arguments are collected as positional arguments
//! and the partial result is passed along with the error.

use alloc::string::ToString;

use crate::lex::{self, Lexer, Token};
use crate::registry::{FlagId, Registry};
use crate::result::ParseResult;
use crate::value::Value;
use crate::{Error, ErrorKind};

// Collect all unprocessed arguments as positional arguments. Pending inline
// values are dropped, since they belong to the option that failed.
fn drain<S: AsRef<str>>(lexer: &mut Lexer<'_, S>, result: &mut ParseResult) {
    lexer.discard();

    if let Ok(rest) = lexer.remaining() {
        for v in rest {
            result.push(v);
        }
    }
}

fn parse_unknown<S: AsRef<str>>(
    lexer: &mut Lexer<'_, S>,
    result: &mut ParseResult,
    token: Token<'_>,
    name: &str,
) -> ErrorKind {
    // An inline value, or else the unprocessed tail of a short-option
    // bundle, is reported with the error rather than dropped.
    let value = lexer.value(true)
        .or_else(|| lexer.discard())
        .map(|v| v.to_string());
    let flag = token.to_string();

    drain(lexer, result);

    if name == "help" || name == "h" {
        ErrorKind::HelpRequested {
            flag: flag,
            value: value,
        }
    } else {
        ErrorKind::UnknownFlag {
            flag: flag,
            value: value,
        }
    }
}

fn parse_value<S: AsRef<str>>(
    registry: &Registry,
    lexer: &mut Lexer<'_, S>,
    result: &mut ParseResult,
    token: Token<'_>,
    id: FlagId,
    value: &str,
) -> Result<(), ErrorKind> {
    match registry.coerce(id, value) {
        Ok(v) => {
            result.set(id, v);
            Ok(())
        },
        Err(e) => {
            drain(lexer, result);
            Err(ErrorKind::InvalidValue {
                flag: token.to_string(),
                value: value.to_string(),
                id: id,
                source: e,
            })
        },
    }
}

fn parse_flag<S: AsRef<str>>(
    registry: &Registry,
    lexer: &mut Lexer<'_, S>,
    result: &mut ParseResult,
    token: Token<'_>,
    name: &str,
) -> Result<(), ErrorKind> {
    let Some(id) = registry.flag_with_name(name) else {
        return Err(parse_unknown(lexer, result, token, name));
    };

    if registry.is_toggle(id) {
        // Toggles never consume the following argument.
        match lexer.value(true) {
            None => result.set(id, Value::Bool(true)),
            Some(v) => parse_value(registry, lexer, result, token, id, v)?,
        }
    } else {
        match lexer.value(false) {
            None => {
                drain(lexer, result);
                return Err(ErrorKind::MissingValue {
                    flag: token.to_string(),
                    id: id,
                });
            },
            Some(v) => parse_value(registry, lexer, result, token, id, v)?,
        }
    }

    tracing::trace!(flag = %token, value = %result.value(id), "flag resolved");

    Ok(())
}

fn parse_lexer<S: AsRef<str>>(
    registry: &Registry,
    lexer: &mut Lexer<'_, S>,
    result: &mut ParseResult,
) -> Result<(), ErrorKind> {
    loop {
        let token = match lexer.next() {
            Ok(v) => v,
            Err(lex::Error::UnexpectedValue { flag, value }) => {
                let kind = ErrorKind::UnexpectedValue {
                    flag: flag.to_string(),
                    value: value.to_string(),
                };
                drain(lexer, result);
                return Err(kind);
            },
        };

        match token {
            Token::End => return Ok(()),
            Token::Value("--") => {
                // Terminator, everything that follows is positional.
                drain(lexer, result);
                return Ok(());
            },
            Token::Value(v) => {
                tracing::trace!(value = v, "positional argument");
                result.push(v);
            },
            Token::Long(name) => {
                parse_flag(registry, lexer, result, token, name)?;
            },
            Token::Short(c) => {
                let mut buf = [0u8; 4];
                parse_flag(registry, lexer, result, token, c.encode_utf8(&mut buf))?;
            },
        }
    }
}

/// Parse the unprocessed arguments of an existing lexer against a registry.
///
/// This allows callers to pull some tokens from the lexer themselves (e.g.,
/// to dispatch sub-commands) and parse the rest. `arg0` is recorded as
/// program name in the result.
pub fn parse_from<S: AsRef<str>>(
    registry: &Registry,
    arg0: &str,
    lexer: &mut Lexer<'_, S>,
) -> Result<ParseResult, Error> {
    let mut result = ParseResult::with(registry, arg0);

    match parse_lexer(registry, lexer, &mut result) {
        Ok(()) => Ok(result),
        Err(kind) => {
            tracing::debug!(error = %kind, "argument parsing failed");
            Err(Error::with(kind, result))
        },
    }
}

/// Parse program arguments against a registry. The first argument is taken
/// as program name, all others are parsed.
pub fn parse<S: AsRef<str>>(
    registry: &Registry,
    args: &[S],
) -> Result<ParseResult, Error> {
    let (arg0, rest) = match args.split_first() {
        Some((first, rest)) => (first.as_ref(), rest),
        None => ("", args),
    };

    parse_from(registry, arg0, &mut Lexer::with(rest))
}

impl Registry {
    /// Parse program arguments against this registry. See `parse()`.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<ParseResult, Error> {
        parse(self, args)
    }
}
