use serde::{Deserialize, Serialize};

/// Player-set annotation on a covered cell. Protects the cell from an
/// accidental reveal; carries no board-structural meaning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marking {
    None,
    Flag,
    Guess,
}

impl Marking {
    /// Next step in the `None -> Flag -> Guess -> None` cycle.
    pub const fn cycled(self) -> Self {
        match self {
            Self::None => Self::Flag,
            Self::Flag => Self::Guess,
            Self::Guess => Self::None,
        }
    }
}

impl Default for Marking {
    fn default() -> Self {
        Self::None
    }
}

/// Player-visible state of one grid cell.
///
/// A `Revealed` cell carries its adjacent-mine count and never holds a
/// marking; `Exploded` is the detonated mine after a lost game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Covered(Marking),
    Revealed(u8),
    Exploded,
}

impl Cell {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered(_))
    }

    pub const fn marking(self) -> Marking {
        match self {
            Self::Covered(marking) => marking,
            Self::Revealed(_) | Self::Exploded => Marking::None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Covered(Marking::None)
    }
}
