//! Platform identity types.
//!
//! A platform is a physical or virtual observing asset (glider, waveglider,
//! mooring, autonomous vehicle). Its id is the unique key for every
//! descriptor lookup and every line of dispatch accounting, so the format is
//! validated up front rather than trusted downstream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated platform identifier.
///
/// Format: ASCII letters, digits, `_` and `-`, starting with a letter.
/// Examples: `m1`, `l_662a`, `wg_Hansen`, `daphne`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    /// Parse and validate a platform id string.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return None,
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return None;
        }
        Some(PlatformId(s.to_string()))
    }

    /// Access the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
