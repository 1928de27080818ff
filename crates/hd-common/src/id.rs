//! Person identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique person name within a pedigree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub String);

impl PersonId {
    /// Parse a raw name, trimming surrounding whitespace.
    ///
    /// Returns `None` for blank names.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PersonId(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(name: &str) -> Self {
        PersonId(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        assert_eq!(PersonId::parse("  Harry ").unwrap().as_str(), "Harry");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(PersonId::parse("").is_none());
        assert!(PersonId::parse("   ").is_none());
    }
}
