//! # Usage Information for Flags
//!
//! This module renders usage information for all flags of a registry. Each
//! flag is rendered on its own line, with the usage texts aligned in a
//! single column:
//!
//! ```text
//!   -n                Number lines
//!   --format=<string> Format string (default: "%g")
//!   -h, --help        Show usage information
//! ```
//!
//! Single-character flags are spelled as short options, all others as long
//! options. Flags that take values show the kind of the value, and their
//! default unless it is empty. The implicit help flag is listed last, unless
//! the caller registered a flag named `help` or `h`.
//!
//! NB: Widths are calculated as unicode character counts, rather than glyph
//!     clusters or terminal cells. This is sufficient as long as flag names
//!     are ASCII-only, which is recommended.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use crate::registry::{FlagId, Registry};
use crate::value::Value;

const HELP_FLAG: &str = "-h, --help";
const HELP_USAGE: &str = "Show usage information";

fn spell(registry: &Registry, id: FlagId) -> String {
    let name = registry.name(id);
    let prefix = if name.chars().count() == 1 { "-" } else { "--" };

    if registry.is_toggle(id) {
        format!("{}{}", prefix, name)
    } else {
        format!("{}{}=<{}>", prefix, name, registry.tag(id))
    }
}

fn write_default(
    w: &mut dyn core::fmt::Write,
    value: &Value,
) -> core::fmt::Result {
    match value {
        Value::Bool(_) => Ok(()),
        Value::String(v) if v.is_empty() => Ok(()),
        Value::String(v) => write!(w, " (default: \"{}\")", v.escape_debug()),
        v => write!(w, " (default: {})", v),
    }
}

fn write_line(
    w: &mut dyn core::fmt::Write,
    flag: &str,
    width: usize,
    usage: &str,
    default: Option<&Value>,
) -> core::fmt::Result {
    write!(w, "  {:<width$} {}", flag, usage, width = width)?;
    if let Some(v) = default {
        write_default(w, v)?;
    }
    w.write_char('\n')
}

impl Registry {
    /// Render usage information for all flags into `w`.
    pub fn write_usage(&self, w: &mut dyn core::fmt::Write) -> core::fmt::Result {
        let flags: Vec<(FlagId, String)> = self.iter()
            .map(|v| (v, spell(self, v)))
            .collect();
        let help = !self.has_help();

        let mut width = 0;
        for (_, flag) in &flags {
            width = usize::max(width, flag.chars().count());
        }
        if help {
            width = usize::max(width, HELP_FLAG.chars().count());
        }

        for (id, flag) in &flags {
            write_line(w, flag, width, self.usage(*id), Some(self.default(*id)))?;
        }
        if help {
            write_line(w, HELP_FLAG, width, HELP_USAGE, None)?;
        }

        Ok(())
    }

    /// Render usage information for all flags into a string.
    pub fn usage_text(&self) -> String {
        let mut v = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_usage(&mut v);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_empty() {
        let registry = Registry::new();

        assert_eq!(registry.usage_text(), "  -h, --help Show usage information\n");
    }

    #[test]
    fn usage_aligned() {
        let mut registry = Registry::new();
        registry.add_flag("n", "Number lines", false).unwrap();
        registry.add_flag("format", "Format string", "%g").unwrap();
        registry.add_flag("width", "Column width", 80).unwrap();
        registry.add_flag("separator", "Separator", "\n").unwrap();
        registry.add_flag("prefix", "Prefix", "").unwrap();

        assert_eq!(registry.usage_text(), concat!(
            "  -n                   Number lines\n",
            "  --format=<string>    Format string (default: \"%g\")\n",
            "  --width=<int>        Column width (default: 80)\n",
            "  --separator=<string> Separator (default: \"\\n\")\n",
            "  --prefix=<string>    Prefix\n",
            "  -h, --help           Show usage information\n",
        ));
    }

    #[test]
    fn usage_custom_help() {
        let mut registry = Registry::new();
        registry.add_flag("help", "Explain yourself", false).unwrap();

        assert_eq!(registry.usage_text(), "  --help Explain yourself\n");
    }
}
