//! Store configuration.

use std::env;

const OCCURS_CHECK_VAR: &str = "TRAIL_UNIFY_OCCURS_CHECK";
const TRACE_VAR: &str = "TRAIL_UNIFY_TRACE";

/// Settings that change how a [`Store`](crate::core::store::Store) unifies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Refuse to link a variable to a structure that contains it.
    ///
    /// Off by default: without the check such a link creates a cyclic
    /// term, which display and equality tolerate but few programs want.
    pub occurs_check: bool,

    /// Emit a `trace` event for every binding and undo.
    pub trace_bindings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            occurs_check: false,
            trace_bindings: true,
        }
    }
}

impl Config {
    pub fn with_occurs_check(mut self, enabled: bool) -> Self {
        self.occurs_check = enabled;
        self
    }

    pub fn with_trace_bindings(mut self, enabled: bool) -> Self {
        self.trace_bindings = enabled;
        self
    }

    /// Defaults, overridden by `TRAIL_UNIFY_OCCURS_CHECK` and
    /// `TRAIL_UNIFY_TRACE` where they hold a recognisable flag.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(flag) = lookup(OCCURS_CHECK_VAR).as_deref().and_then(parse_flag) {
            config.occurs_check = flag;
        }
        if let Some(flag) = lookup(TRACE_VAR).as_deref().and_then(parse_flag) {
            config.trace_bindings = flag;
        }
        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
