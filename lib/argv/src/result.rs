//! # Parse Results
//!
//! A `ParseResult` holds everything a parse produced: the program name, the
//! value of every flag of the registry, and all positional arguments. Flag
//! values are seeded from the registry defaults, so every flag has a value,
//! regardless of whether it was specified.

use alloc::string::String;
use alloc::vec::Vec;

use crate::registry::{Flag, FlagId, Registry};
use crate::value::{Kind, Value};

/// Result of parsing program arguments against a registry.
///
/// Parse errors carry the partial result accumulated until the error was
/// raised, including all arguments that were not processed.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult {
    serial: usize,
    arg0: String,
    values: Vec<Value>,
    remaining: Vec<String>,
}

impl ParseResult {
    pub(crate) fn with(registry: &Registry, arg0: &str) -> Self {
        Self {
            serial: registry.serial(),
            arg0: arg0.into(),
            values: registry.iter().map(|v| registry.default(v).clone()).collect(),
            remaining: Vec::new(),
        }
    }

    fn index(&self, id: FlagId) -> usize {
        assert_eq!(
            id.registry, self.serial,
            "flag handle used with a foreign parse result",
        );
        assert!(
            id.index < self.values.len(),
            "flag handle registered after this parse result",
        );
        id.index
    }

    pub(crate) fn set(&mut self, id: FlagId, value: Value) {
        let idx = self.index(id);
        debug_assert_eq!(self.values[idx].tag(), value.tag());
        self.values[idx] = value;
    }

    pub(crate) fn push(&mut self, arg: &str) {
        self.remaining.push(arg.into());
    }

    /// Yield the program name, as given in the first argument.
    pub fn arg0(&self) -> &str {
        &self.arg0
    }

    /// Yield the typed value of a flag.
    pub fn get<T: Kind>(&self, flag: Flag<T>) -> &T {
        match T::from_value(self.value(flag.id())) {
            Some(v) => v,
            None => unreachable!("flag value does not match its kind"),
        }
    }

    /// Yield the tagged value of a flag.
    pub fn value(&self, id: FlagId) -> &Value {
        &self.values[self.index(id)]
    }

    /// Yield all positional arguments in order.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    /// Turn the result into its positional arguments.
    pub fn into_remaining(self) -> Vec<String> {
        self.remaining
    }
}
