//! # Flag Registry
//!
//! A registry is an append-only table of flags. Every flag has a unique
//! name, a usage text, and a default value. The kind of the default value
//! fixes the kind of the flag for the lifetime of the registry.
//!
//! Registering a flag yields a typed handle (`Flag<T>`), which is used to
//! access the parsed value of the flag in a `ParseResult`. Untyped handles
//! (`FlagId`) are available for introspection, for instance to list all
//! flags of a registry.
//!
//! Flags are looked up by name for both long and short options. That is, a
//! flag named `v` matches both `-v` and `--v`, while a flag named `verbose`
//! can only be matched via `--verbose`.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::value::{self, IntoKind, Kind, Tag, Value};

// Source of registry serials, used to tie flag handles to their registry.
static SERIAL: core::sync::atomic::AtomicUsize = core::sync::atomic::AtomicUsize::new(0);

/// Enumeration of all errors that can be raised when registering flags.
///
/// These are configuration errors of the program, rather than errors in the
/// program arguments.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Flags must have a non-empty name.
    #[error("flag name must not be empty")]
    NameEmpty,

    /// A flag with the given name is already registered.
    #[error("flag '{name}' already exists")]
    FlagExists {
        name: String,
    },
}

/// Opaque handle of a flag in a registry.
///
/// Handles can only be obtained from the registry that owns the flag, and
/// are only valid for that registry and the parse results it produces.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FlagId {
    pub(crate) registry: usize,
    pub(crate) index: usize,
}

/// Typed handle of a flag in a registry. This is a `FlagId` that remembers
/// the type of the flag value, allowing typed access to parsed values.
pub struct Flag<T> {
    id: FlagId,
    _kind: core::marker::PhantomData<fn() -> T>,
}

// Definition of a single flag.
#[derive(Debug)]
struct Slot {
    name: String,
    usage: String,
    default: Value,
}

/// Append-only table of flags.
#[derive(Debug)]
pub struct Registry {
    serial: usize,
    slots: Vec<Slot>,
    names: BTreeMap<String, usize>,
}

impl<T> Flag<T> {
    /// Yield the untyped handle of this flag.
    pub fn id(&self) -> FlagId {
        self.id
    }
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            serial: SERIAL.fetch_add(1, core::sync::atomic::Ordering::Relaxed),
            slots: Vec::new(),
            names: BTreeMap::new(),
        }
    }

    pub(crate) fn serial(&self) -> usize {
        self.serial
    }

    fn slot(&self, id: FlagId) -> &Slot {
        assert_eq!(
            id.registry, self.serial,
            "flag handle used with a foreign registry",
        );
        &self.slots[id.index]
    }

    /// Register a new flag with the given name, usage text, and default
    /// value. The type of the default value fixes the type of the flag.
    ///
    /// On error, the registry is left unchanged.
    pub fn add_flag<D: IntoKind>(
        &mut self,
        name: &str,
        usage: &str,
        default: D,
    ) -> Result<Flag<D::Kind>, Error> {
        if name.is_empty() {
            return Err(Error::NameEmpty);
        }

        if self.names.contains_key(name) {
            return Err(Error::FlagExists {
                name: name.to_string(),
            });
        }

        let index = self.slots.len();
        let default = default.into_kind().into_value();

        tracing::trace!(flag = name, kind = %default.tag(), "flag registered");

        self.slots.push(Slot {
            name: name.to_string(),
            usage: usage.to_string(),
            default: default,
        });
        self.names.insert(name.to_string(), index);

        Ok(Flag {
            id: FlagId {
                registry: self.serial,
                index: index,
            },
            _kind: core::marker::PhantomData,
        })
    }

    /// Look up a flag by its name.
    pub fn flag_with_name(&self, name: &str) -> Option<FlagId> {
        self.names.get(name).map(|v| FlagId {
            registry: self.serial,
            index: *v,
        })
    }

    /// Yield the number of registered flags.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check whether no flag is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Yield an iterator over all flags in order of registration.
    pub fn iter(&self) -> impl Iterator<Item = FlagId> + '_ {
        (0..self.slots.len()).map(|v| FlagId {
            registry: self.serial,
            index: v,
        })
    }

    /// Yield the name of a flag.
    pub fn name(&self, id: FlagId) -> &str {
        &self.slot(id).name
    }

    /// Yield the usage text of a flag.
    pub fn usage(&self, id: FlagId) -> &str {
        &self.slot(id).usage
    }

    /// Yield the default value of a flag.
    pub fn default(&self, id: FlagId) -> &Value {
        &self.slot(id).default
    }

    /// Yield the default value of a flag, stringified for display.
    pub fn default_display(&self, id: FlagId) -> String {
        self.slot(id).default.to_string()
    }

    /// Yield the typed default value of a flag.
    pub fn default_of<T: Kind>(&self, flag: Flag<T>) -> &T {
        match T::from_value(self.default(flag.id)) {
            Some(v) => v,
            None => unreachable!("flag default does not match its kind"),
        }
    }

    /// Yield the kind of a flag.
    pub fn tag(&self, id: FlagId) -> Tag {
        self.slot(id).default.tag()
    }

    /// Check whether a flag is a toggle. Toggles are boolean flags, which
    /// only take values via inline delimiters.
    pub fn is_toggle(&self, id: FlagId) -> bool {
        self.tag(id) == Tag::Bool
    }

    /// Check whether the caller registered a flag named `help` or `h`. If
    /// not, these names request help information during parsing.
    pub fn has_help(&self) -> bool {
        self.names.contains_key("help") || self.names.contains_key("h")
    }

    /// Coerce `from` into a value of the kind of the given flag.
    pub fn coerce(&self, id: FlagId, from: &str) -> Result<Value, value::Error> {
        let mut v = self.default(id).clone();
        v.parse(from)?;
        Ok(v)
    }
}

impl<T> core::clone::Clone for Flag<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> core::marker::Copy for Flag<T> {
}

impl<T> core::cmp::PartialEq for Flag<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> core::cmp::Eq for Flag<T> {
}

impl<T> core::fmt::Debug for Flag<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Flag").field(&self.id).finish()
    }
}

impl<T> core::convert::From<Flag<T>> for FlagId {
    fn from(v: Flag<T>) -> Self {
        v.id
    }
}
