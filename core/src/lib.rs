//! Authoritative Minesweeper engine: board model, cascading reveal, flag and
//! guess markings, win/loss detection, and an append-only event journal.
//!
//! Frontends consume the engine through [`Game::uncover`],
//! [`Game::toggle_flag`], the read-only cell and status queries, and by
//! draining [`Game::events_since`] with their own cursor. Nothing else feeds
//! state back in; windowing, rendering, and audio live outside this crate.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use journal::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod journal;
mod types;

/// Validated board extent and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a config, rejecting mine counts outside `1..total_cells`.
    pub fn new((width, height): Coord2, mines: CellCount) -> Result<Self> {
        if mines == 0 || mines >= area(width, height) {
            return Err(GameError::InvalidConfiguration {
                width,
                height,
                mines,
            });
        }
        Ok(Self::new_unchecked((width, height), mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size.0, self.size.1)
    }
}
