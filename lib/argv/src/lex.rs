//! # Program Argument Lexer
//!
//! This module implements a pull-based lexer for raw program arguments. It
//! has no knowledge of which flags exist. Instead, the caller pulls one token
//! at a time via `Lexer::next()` and decides on its own whether the token
//! takes a value, which it then pulls via `Lexer::value()`.
//!
//! The following syntax is recognized:
//!
//! - **Long options**: `--name`, optionally followed by an inline value via
//!   one of the delimiters `:` or `=`, as in `--name=value` or `--name:value`.
//!
//! - **Short options**: `-x`, where multiple short options can be bundled
//!   into a single argument, as in `-abc`. An inline value can follow any
//!   character of the bundle via a delimiter, as in `-abc=value`, and is then
//!   attached to the character directly preceding the delimiter.
//!
//! - **Values**: Everything else, including a lone `-` and a lone `--`. The
//!   lexer does not interpret `--` as terminator, but leaves this to the
//!   caller.
//!
//! Inline values must be consumed explicitly. If the caller pulls the next
//! token while an inline value is pending, the lexer reports
//! `Error::UnexpectedValue` and retains its position, so the value can still
//! be consumed afterwards.

/// Characters that separate an option from its inline value.
const DELIMITERS: [char; 2] = [':', '='];

/// Enumeration of all tokens produced by the lexer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token<'args> {
    /// All arguments have been processed. This is returned repeatedly once
    /// reached.
    End,
    /// A long option without its leading `--` and without any inline value.
    Long(&'args str),
    /// A single short option character without its leading `-`.
    Short(char),
    /// A bare value, taken verbatim from the program arguments.
    Value(&'args str),
}

/// Enumeration of all errors that can be reported by the lexer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error<'args> {
    /// An inline value (or the unprocessed tail of a short-option bundle) was
    /// never consumed before the lexer was asked to move on. `flag` is the
    /// option the value belongs to.
    #[error("unexpected value '{value}' for {flag}")]
    UnexpectedValue {
        flag: Token<'args>,
        value: &'args str,
    },
}

/// Pull-based lexer over a sequence of raw program arguments.
///
/// The lexer never rewinds. Every argument is visited at most once, either
/// via `next()`, `value()`, or `remaining()`.
#[derive(Clone, Debug)]
pub struct Lexer<'args, S> {
    args: &'args [S],
    // Index of the current argument.
    index: usize,
    // Byte offset into the current argument. Zero if untouched, otherwise
    // past the consumed short options or past the delimiter.
    sub: usize,
    // Whether `sub` points past a delimiter (i.e., an inline value is
    // pending).
    inline: bool,
    // Last token returned by `next()`, used to attribute pending values.
    last: Token<'args>,
}

/// Iterator over all unprocessed arguments of a lexer. Created via
/// `Lexer::remaining()`. Every yielded argument is consumed from the lexer.
#[derive(Debug)]
pub struct Remaining<'this, 'args, S> {
    lexer: &'this mut Lexer<'args, S>,
}

impl<'args> Token<'args> {
    /// Yield the prefix used to spell this token on the command-line.
    pub fn prefix(&self) -> &'static str {
        match self {
            Token::Long(_) => "--",
            Token::Short(_) => "-",
            Token::End | Token::Value(_) => "",
        }
    }

    /// Check whether this token is a long or short option.
    pub fn is_option(&self) -> bool {
        matches!(self, Token::Long(_) | Token::Short(_))
    }
}

impl<'args, S: AsRef<str>> Lexer<'args, S> {
    /// Create a new lexer for the given arguments. The arguments must not
    /// include the program name.
    pub fn with(args: &'args [S]) -> Self {
        Self {
            args: args,
            index: 0,
            sub: 0,
            inline: false,
            last: Token::End,
        }
    }

    fn current(&self) -> Option<&'args str> {
        let args: &'args [S] = self.args;
        args.get(self.index).map(|v| v.as_ref())
    }

    fn tail(&self) -> &'args str {
        self.current()
            .and_then(|v| v.get(self.sub..))
            .unwrap_or("")
    }

    fn advance(&mut self) {
        self.index += 1;
        self.sub = 0;
        self.inline = false;
    }

    fn short(&mut self, arg: &'args str) -> Option<Token<'args>> {
        let mut rest = arg.get(self.sub..)?.chars();
        let c = rest.next()?;

        self.sub += c.len_utf8();

        if rest.as_str().starts_with(&DELIMITERS[..]) {
            // Delimiters are ASCII, so skipping a single byte is sufficient.
            self.sub += 1;
            self.inline = true;
        } else if rest.as_str().is_empty() {
            self.advance();
        }

        Some(Token::Short(c))
    }

    fn long(&mut self, arg: &'args str) -> Token<'args> {
        let name = &arg[2..];

        // The delimiter must not be the first character of the name, or it
        // would produce an empty option.
        let at = name
            .char_indices()
            .skip(1)
            .find(|(_, c)| DELIMITERS.contains(c))
            .map(|(i, _)| i);

        match at {
            Some(at) => {
                self.sub = 2 + at + 1;
                self.inline = true;
                Token::Long(&name[..at])
            },
            None => {
                self.advance();
                Token::Long(name)
            },
        }
    }

    /// Yield the next token and advance the lexer.
    ///
    /// If an inline value of the previous option is still pending, this fails
    /// with `Error::UnexpectedValue` and leaves the lexer unchanged.
    pub fn next(&mut self) -> Result<Token<'args>, Error<'args>> {
        if self.inline {
            return Err(Error::UnexpectedValue {
                flag: self.last,
                value: self.tail(),
            });
        }

        let token = loop {
            let Some(arg) = self.current() else {
                break Token::End;
            };

            if self.sub > 0 {
                // Continue a short-option bundle. If it turns out to be
                // exhausted, skip it and look at the next argument.
                match self.short(arg) {
                    Some(v) => break v,
                    None => {
                        self.advance();
                        continue;
                    },
                }
            }

            if arg == "-" || arg == "--" {
                self.advance();
                break Token::Value(arg);
            }

            if arg.starts_with("--") {
                break self.long(arg);
            }

            if arg.starts_with('-') {
                self.sub = 1;
                continue;
            }

            self.advance();
            break Token::Value(arg);
        };

        self.last = token;
        Ok(token)
    }

    /// Consume a value for the option that was returned last.
    ///
    /// A pending inline value is always returned. Otherwise, unless
    /// `delimited_only` is set, the remainder of the current short-option
    /// bundle, or else the next argument in its entirety, is returned. The
    /// next argument is taken verbatim, even if it looks like an option.
    ///
    /// If no value is available, `None` is returned and the lexer is left
    /// unchanged.
    pub fn value(&mut self, delimited_only: bool) -> Option<&'args str> {
        if self.inline || (self.sub > 0 && !delimited_only) {
            let v = self.tail();
            self.advance();
            Some(v)
        } else if delimited_only || self.sub > 0 {
            None
        } else {
            let v = self.current()?;
            self.advance();
            Some(v)
        }
    }

    /// Drop a pending inline value, or the unprocessed tail of a short-option
    /// bundle, and yield it. Following arguments are never touched.
    pub fn discard(&mut self) -> Option<&'args str> {
        if self.sub > 0 {
            let v = self.tail();
            self.advance();
            Some(v)
        } else {
            None
        }
    }

    /// Check whether an inline value or a short-option bundle is pending on
    /// the current argument.
    pub fn is_pending(&self) -> bool {
        self.sub > 0
    }

    /// Yield an iterator over all unprocessed arguments.
    ///
    /// This fails with `Error::UnexpectedValue` if an inline value, or the
    /// tail of a short-option bundle, is still pending.
    pub fn remaining(
        &mut self,
    ) -> Result<Remaining<'_, 'args, S>, Error<'args>> {
        if self.sub > 0 {
            return Err(Error::UnexpectedValue {
                flag: self.last,
                value: self.tail(),
            });
        }

        Ok(Remaining {
            lexer: self,
        })
    }
}

impl<'args>
    core::fmt::Display
for
    Token<'args>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.prefix())?;
        match self {
            Token::End => Ok(()),
            Token::Long(v) | Token::Value(v) => f.write_str(v),
            Token::Short(v) => core::fmt::Write::write_char(f, *v),
        }
    }
}

impl<'this, 'args, S: AsRef<str>>
    core::iter::Iterator
for
    Remaining<'this, 'args, S>
{
    type Item = &'args str;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.lexer.current()?;
        self.lexer.advance();
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.lexer.args.len().saturating_sub(self.lexer.index);
        (n, Some(n))
    }
}

impl<'this, 'args, S: AsRef<str>>
    core::iter::ExactSizeIterator
for
    Remaining<'this, 'args, S>
{
}

impl<'this, 'args, S: AsRef<str>>
    core::iter::FusedIterator
for
    Remaining<'this, 'args, S>
{
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use super::*;

    fn tokens<'args, S: AsRef<str>>(
        lexer: &mut Lexer<'args, S>,
    ) -> Vec<Token<'args>> {
        let mut v = Vec::new();
        loop {
            match lexer.next().unwrap() {
                Token::End => break,
                t => v.push(t),
            }
        }
        v
    }

    #[test]
    fn lex_empty() {
        let args: [&str; 0] = [];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::End));
        assert_eq!(lexer.next(), Ok(Token::End));
        assert_eq!(lexer.value(false), None);
        assert_eq!(lexer.remaining().unwrap().count(), 0);
    }

    #[test]
    fn lex_classify() {
        let args = ["--long", "-s", "value", "-", "--", "--x"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(tokens(&mut lexer), [
            Token::Long("long"),
            Token::Short('s'),
            Token::Value("value"),
            Token::Value("-"),
            Token::Value("--"),
            Token::Long("x"),
        ]);
    }

    #[test]
    fn lex_bundle() {
        let args = ["-abc", "next"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Short('a')));
        assert!(lexer.is_pending());
        assert_eq!(lexer.next(), Ok(Token::Short('b')));
        assert_eq!(lexer.next(), Ok(Token::Short('c')));
        assert!(!lexer.is_pending());

        // The bundle is exhausted, so the value is the next argument.
        assert_eq!(lexer.value(false), Some("next"));
        assert_eq!(lexer.next(), Ok(Token::End));
    }

    #[test]
    fn lex_bundle_tail() {
        let args = ["-abcdef", "next"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Short('a')));
        assert_eq!(lexer.value(true), None);
        assert_eq!(lexer.next(), Ok(Token::Short('b')));
        assert_eq!(lexer.value(false), Some("cdef"));
        assert_eq!(lexer.next(), Ok(Token::Value("next")));
    }

    #[test]
    fn lex_bundle_unicode() {
        let args = ["-äöx"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(tokens(&mut lexer), [
            Token::Short('ä'),
            Token::Short('ö'),
            Token::Short('x'),
        ]);
    }

    #[test]
    fn lex_inline_long() {
        let args = ["--foo=bar", "--foo:bar", "--foo=a:b", "--foo:", "--é=1"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Long("foo")));
        assert_eq!(lexer.value(true), Some("bar"));
        assert_eq!(lexer.next(), Ok(Token::Long("foo")));
        assert_eq!(lexer.value(false), Some("bar"));
        assert_eq!(lexer.next(), Ok(Token::Long("foo")));
        assert_eq!(lexer.value(true), Some("a:b"));
        assert_eq!(lexer.next(), Ok(Token::Long("foo")));
        assert_eq!(lexer.value(true), Some(""));
        assert_eq!(lexer.next(), Ok(Token::Long("é")));
        assert_eq!(lexer.value(true), Some("1"));
        assert_eq!(lexer.next(), Ok(Token::End));
    }

    #[test]
    fn lex_inline_leading_delimiter() {
        // A delimiter directly after `--` is part of the name.
        let args = ["--=x", "--:a=b"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Long("=x")));
        assert_eq!(lexer.next(), Ok(Token::Long(":a")));
        assert_eq!(lexer.value(true), Some("b"));
    }

    #[test]
    fn lex_inline_short() {
        let args = ["-ab=1", "-c:", "-d"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Short('a')));
        assert_eq!(lexer.value(true), None);
        assert_eq!(lexer.next(), Ok(Token::Short('b')));
        assert_eq!(lexer.value(true), Some("1"));
        assert_eq!(lexer.next(), Ok(Token::Short('c')));
        assert_eq!(lexer.value(true), Some(""));
        assert_eq!(lexer.next(), Ok(Token::Short('d')));
        assert_eq!(lexer.value(true), None);
        assert_eq!(lexer.next(), Ok(Token::End));
    }

    #[test]
    fn lex_value_verbatim() {
        let args = ["--format", "--separator=;", "-"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Long("format")));
        assert_eq!(lexer.value(false), Some("--separator=;"));
        assert_eq!(lexer.next(), Ok(Token::Value("-")));
        assert_eq!(lexer.value(false), None);
    }

    #[test]
    fn lex_value_delimited_only() {
        let args = ["--flag", "value"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Long("flag")));
        assert_eq!(lexer.value(true), None);
        assert_eq!(lexer.next(), Ok(Token::Value("value")));
    }

    #[test]
    fn lex_unexpected_value() {
        let args = ["--foo=bar"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Long("foo")));

        let e = lexer.next().unwrap_err();
        assert_eq!(e, Error::UnexpectedValue {
            flag: Token::Long("foo"),
            value: "bar",
        });
        assert_eq!(e.to_string(), "unexpected value 'bar' for --foo");

        // The lexer is unaffected and the value can still be consumed.
        assert_eq!(lexer.next().unwrap_err(), e);
        assert_eq!(lexer.value(false), Some("bar"));
        assert_eq!(lexer.next(), Ok(Token::End));
    }

    #[test]
    fn lex_unexpected_value_short() {
        let args = ["-xy=z"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Short('x')));
        assert_eq!(lexer.next(), Ok(Token::Short('y')));
        assert_eq!(lexer.next(), Err(Error::UnexpectedValue {
            flag: Token::Short('y'),
            value: "z",
        }));
    }

    #[test]
    fn lex_remaining() {
        let args = ["-a", "--", "--b", "c"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Short('a')));
        assert_eq!(lexer.next(), Ok(Token::Value("--")));

        let rest: Vec<&str> = lexer.remaining().unwrap().collect();
        assert_eq!(rest, ["--b", "c"]);

        assert_eq!(lexer.remaining().unwrap().len(), 0);
        assert_eq!(lexer.next(), Ok(Token::End));
    }

    #[test]
    fn lex_remaining_pending() {
        let args = ["--foo=bar", "x"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Long("foo")));
        assert_eq!(lexer.remaining().unwrap_err(), Error::UnexpectedValue {
            flag: Token::Long("foo"),
            value: "bar",
        });

        let args = ["-abc", "x"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Short('a')));
        assert_eq!(lexer.remaining().unwrap_err(), Error::UnexpectedValue {
            flag: Token::Short('a'),
            value: "bc",
        });

        assert_eq!(lexer.discard(), Some("bc"));
        assert_eq!(lexer.remaining().unwrap().collect::<Vec<_>>(), ["x"]);
    }

    #[test]
    fn lex_discard() {
        let args = ["--foo", "x"];
        let mut lexer = Lexer::with(&args);

        assert_eq!(lexer.next(), Ok(Token::Long("foo")));
        assert_eq!(lexer.discard(), None);
        assert_eq!(lexer.next(), Ok(Token::Value("x")));
    }

    #[test]
    fn lex_owned_args() {
        let args: Vec<alloc::string::String> = ["-v", "file"]
            .iter()
            .map(|v| v.to_string())
            .collect();
        let mut lexer = Lexer::with(args.as_slice());

        assert_eq!(lexer.next(), Ok(Token::Short('v')));
        assert_eq!(lexer.next(), Ok(Token::Value("file")));
    }

    #[test]
    fn token_display() {
        assert_eq!(Token::End.to_string(), "");
        assert_eq!(Token::Long("name").to_string(), "--name");
        assert_eq!(Token::Short('x').to_string(), "-x");
        assert_eq!(Token::Value("-").to_string(), "-");
        assert!(Token::Short('x').is_option());
        assert!(!Token::Value("--x").is_option());
    }
}
