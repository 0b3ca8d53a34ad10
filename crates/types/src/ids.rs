//! Instance addressing for module identifiers.
//!
//! One module implementation can back several independent data slots. The
//! first slot uses the bare module id (`textFields`), every further slot
//! carries a numeric suffix (`textFields-2`, `textFields-3`, ...).
//!
//! Nothing here can fail: an id that does not end in `-<digits>` is simply
//! its own base with no instance number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The parsed form of a possibly instance-suffixed module id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleInstance {
    /// The module id without any instance suffix.
    pub base: String,
    /// The explicit instance number, or `None` for the unsuffixed first instance.
    pub instance: Option<u32>,
}

impl ModuleInstance {
    /// The instance number, treating the unsuffixed id as instance 1.
    pub fn number(&self) -> u32 {
        self.instance.unwrap_or(1)
    }

    /// Returns true when this id names the base slot rather than an extra instance.
    pub fn is_primary(&self) -> bool {
        self.instance.is_none()
    }
}

impl fmt::Display for ModuleInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.instance {
            Some(n) => write!(f, "{}-{}", self.base, n),
            None => write!(f, "{}", self.base),
        }
    }
}

/// Splits a trailing `-<digits>` suffix off a module id.
pub fn parse_module_id(id: &str) -> ModuleInstance {
    if let Some((base, suffix)) = id.rsplit_once('-') {
        if !base.is_empty() && !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(instance) = suffix.parse::<u32>() {
                return ModuleInstance {
                    base: base.to_string(),
                    instance: Some(instance),
                };
            }
        }
    }
    ModuleInstance {
        base: id.to_string(),
        instance: None,
    }
}

/// Builds the id for instance `n` of `base`.
///
/// Instance 1 (and 0) is always the bare base id; only later instances carry a suffix.
pub fn create_instance_id(base: &str, n: u32) -> String {
    if n <= 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, n)
    }
}

/// Returns the base id of a possibly-suffixed module id.
pub fn base_module_id(id: &str) -> String {
    parse_module_id(id).base
}

/// Filters `enabled` down to the ids that are instances of `base`, preserving order.
pub fn get_module_instances<'a, S: AsRef<str>>(base: &str, enabled: &'a [S]) -> Vec<&'a str> {
    enabled
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| parse_module_id(id).base == base)
        .collect()
}

/// Returns the next free instance number for `base`.
///
/// Unsuffixed entries count as instance 1, so a set holding only `base` yields 2.
/// An empty set yields 2 as well, since `max` defaults to 1.
pub fn get_next_instance_number<S: AsRef<str>>(base: &str, enabled: &[S]) -> u32 {
    get_module_instances(base, enabled)
        .into_iter()
        .map(|id| parse_module_id(id).number())
        .max()
        .unwrap_or(1)
        + 1
}

/// Appends ` #N` to a display name for suffixed instances.
pub fn instance_display_name(display_name: &str, id: &str) -> String {
    match parse_module_id(id).instance {
        Some(n) => format!("{} #{}", display_name, n),
        None => display_name.to_string(),
    }
}
