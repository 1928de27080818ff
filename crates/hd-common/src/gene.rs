//! Gene-copy counts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// Number of copies of the trait-causing gene an individual carries.
///
/// Never stored as ground truth on a person; inference treats it as a
/// hypothesis variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum GeneCount {
    Zero = 0,
    One = 1,
    Two = 2,
}

impl GeneCount {
    /// All gene counts in ascending order.
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    /// Number of gene copies.
    pub fn copies(self) -> u8 {
        self as u8
    }

    /// Position of this count in a `[_; 3]` distribution.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for GeneCount {
    type Error = Error;

    fn try_from(copies: u8) -> Result<Self, Self::Error> {
        match copies {
            0 => Ok(GeneCount::Zero),
            1 => Ok(GeneCount::One),
            2 => Ok(GeneCount::Two),
            other => Err(Error::invariant(format!(
                "gene count {other} is outside 0..=2"
            ))),
        }
    }
}

impl From<GeneCount> for u8 {
    fn from(count: GeneCount) -> Self {
        count.copies()
    }
}

impl fmt::Display for GeneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.copies())
    }
}
