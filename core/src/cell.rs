use serde::{Deserialize, Serialize};

/// Player-visible state of one grid square.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Covered,
    Revealed(u8),
}

impl Cell {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered)
    }

    /// Display symbol for the square. Covered squares and revealed squares
    /// with no adjacent mines are both blank; every other revealed square
    /// shows its neighbor count.
    pub const fn symbol(self) -> char {
        match self {
            Self::Covered | Self::Revealed(0) => ' ',
            Self::Revealed(count) => (b'0' + count) as char,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Covered
    }
}
