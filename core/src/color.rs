use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// One entry of the fixed six-color palette.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Coral,
    Teal,
    Sun,
    Mint,
    Lavender,
    Peach,
}

impl Color {
    /// Palette order, also the order hints break ties in.
    pub const PALETTE: [Color; 6] = [
        Color::Coral,
        Color::Teal,
        Color::Sun,
        Color::Mint,
        Color::Lavender,
        Color::Peach,
    ];

    pub const COUNT: usize = Self::PALETTE.len();

    pub const fn index(self) -> usize {
        use Color::*;
        match self {
            Coral => 0,
            Teal => 1,
            Sun => 2,
            Mint => 3,
            Lavender => 4,
            Peach => 5,
        }
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Self::PALETTE
            .get(index)
            .copied()
            .ok_or(GameError::InvalidColor)
    }

    pub const fn name(self) -> &'static str {
        use Color::*;
        match self {
            Coral => "coral",
            Teal => "teal",
            Sun => "sun",
            Mint => "mint",
            Lavender => "lavender",
            Peach => "peach",
        }
    }

    pub const fn hex(self) -> &'static str {
        use Color::*;
        match self {
            Coral => "#FF6B6B",
            Teal => "#4ECDC4",
            Sun => "#FFE66D",
            Mint => "#95E1D3",
            Lavender => "#C7CEEA",
            Peach => "#FFDAB9",
        }
    }

    /// Single character used by text renderers.
    pub const fn symbol(self) -> char {
        use Color::*;
        match self {
            Coral => 'C',
            Teal => 'T',
            Sun => 'S',
            Mint => 'M',
            Lavender => 'L',
            Peach => 'P',
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        use Color::*;
        match self {
            Coral => (0xFF, 0x6B, 0x6B),
            Teal => (0x4E, 0xCD, 0xC4),
            Sun => (0xFF, 0xE6, 0x6D),
            Mint => (0x95, 0xE1, 0xD3),
            Lavender => (0xC7, 0xCE, 0xEA),
            Peach => (0xFF, 0xDA, 0xB9),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a palette name or a hex code, both case-insensitive.
impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::PALETTE
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(s) || color.hex().eq_ignore_ascii_case(s))
            .ok_or(GameError::InvalidColor)
    }
}
