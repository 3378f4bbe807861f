use serde::{Deserialize, Serialize};
use std::fmt;

/// Bucket used when a stored record carries no domain at all.
pub const DEFAULT_DOMAIN_BUCKET: &str = "PERSONAL";

/// Life area a task, skill or pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Domain {
    Ariel,
    Michael,
    Family,
    Business,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Ariel => "ARIEL",
            Domain::Michael => "MICHAEL",
            Domain::Family => "FAMILY",
            Domain::Business => "BUSINESS",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
