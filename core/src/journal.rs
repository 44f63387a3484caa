use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::Coord2;

/// Cells opened by a cascade, stored inline for the common small case.
pub type CascadeChildren = SmallVec<[Coord2; 8]>;

/// Discrete state change recorded by the engine.
///
/// Marking changes are deliberately not journaled; only reveals and game
/// termination produce entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A safe cell was revealed at `location`. `children` holds every cell the
    /// cascade opened along with it, in reveal order; empty when the click
    /// opened only the origin.
    DiscoverNumber {
        location: Coord2,
        children: CascadeChildren,
    },
    /// The game is over. An empty `exploded_mines` list means a win; on a
    /// loss the triggered mine comes first, then the remaining mines in grid
    /// order.
    GameEnd { exploded_mines: Vec<Coord2> },
}

/// Append-only log of [`GameEvent`]s.
///
/// Entries are never mutated or removed within a game. Consumers keep their
/// own cursor and fetch the unseen tail with [`EventJournal::since`], which
/// costs O(new entries) rather than O(history).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventJournal {
    events: Vec<GameEvent>,
}

impl EventJournal {
    pub(crate) fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Entries appended at or after `cursor`; empty once the cursor has
    /// caught up.
    pub fn since(&self, cursor: usize) -> &[GameEvent] {
        &self.events[cursor.min(self.events.len())..]
    }

    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }
}
