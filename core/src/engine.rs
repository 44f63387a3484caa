use chrono::prelude::*;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::board::MineField;
use crate::cell::{Cell, Marking};
use crate::error::{GameError, Result};
use crate::generator::{LayoutGenerator, RandomLayoutGenerator};
use crate::journal::{CascadeChildren, EventJournal, GameEvent};
use crate::types::{CellCount, Coord2, ToNdIndex};
use crate::GameConfig;

/// Lifecycle of a single game.
///
/// Valid transitions:
/// - NotStarted -> InProgress
/// - NotStarted -> Won / Lost (the first move can already end the game)
/// - InProgress -> Won / Lost
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Outcome of a call to [`Game::uncover`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a call to [`Game::toggle_flag`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// A single game from creation to win or loss.
///
/// Owns the mine layout, the player-visible grid, and the event journal.
/// Mutation happens only through [`Game::uncover`] and [`Game::toggle_flag`];
/// a new game means a new `Game` value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    field: MineField,
    grid: Array2<Cell>,
    revealed_count: CellCount,
    flag_count: CellCount,
    status: GameStatus,
    journal: EventJournal,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Starts a game over a pre-built layout.
    pub fn new(field: MineField) -> Self {
        let size = field.size();
        Self {
            field,
            grid: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flag_count: 0,
            status: Default::default(),
            journal: Default::default(),
            started_at: None,
            ended_at: None,
        }
    }

    /// Starts a game with a randomly placed layout. Passing `None` draws a
    /// seed from process entropy.
    pub fn create(config: GameConfig, seed: Option<u64>) -> Self {
        use rand::RngExt;

        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self::new(RandomLayoutGenerator::new(seed).generate(config))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_ended(&self) -> bool {
        self.status.is_final()
    }

    pub fn size(&self) -> Coord2 {
        self.field.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.field.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.field.mine_count()) - i64::from(self.flag_count)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.to_nd_index()]
    }

    /// Whether `coords` hides a mine. `None` while that information is still
    /// secret: the cell is covered and the game is running.
    pub fn has_mine_at(&self, coords: Coord2) -> Option<bool> {
        let visible = self.is_ended() || !self.cell_at(coords).is_covered();
        visible.then(|| self.field.contains_mine(coords))
    }

    /// How many seconds have passed since the first reveal, 0 before it.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    /// Drains the journal: entries appended since `cursor`, plus the cursor
    /// to remember for the next call.
    pub fn events_since(&self, cursor: usize) -> (&[GameEvent], usize) {
        (self.journal.since(cursor), self.journal.len())
    }

    /// Cycles the marking on a covered cell through
    /// `None -> Flag -> Guess -> None`. Revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.field.validate_coords(coords)?;
        self.check_not_final()?;

        Ok(match self.grid[coords.to_nd_index()] {
            Cell::Covered(marking) => {
                let next = marking.cycled();
                self.grid[coords.to_nd_index()] = Cell::Covered(next);
                if marking == Marking::Flag {
                    self.flag_count -= 1;
                }
                if next == Marking::Flag {
                    self.flag_count += 1;
                }
                Changed
            }
            Cell::Revealed(_) | Cell::Exploded => NoChange,
        })
    }

    /// Reveals a covered, unmarked cell, cascading through zero-count
    /// neighbors. Appends at most one [`GameEvent::DiscoverNumber`] and at
    /// most one [`GameEvent::GameEnd`] per call.
    pub fn uncover(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.field.validate_coords(coords)?;
        self.check_not_final()?;

        // revealed cells and marked cells are both left untouched
        if !matches!(self.grid[coords.to_nd_index()], Cell::Covered(Marking::None)) {
            return Ok(RevealOutcome::NoChange);
        }

        if self.field.contains_mine(coords) {
            Ok(self.detonate(coords))
        } else {
            Ok(self.reveal_safe(coords))
        }
    }

    fn detonate(&mut self, coords: Coord2) -> RevealOutcome {
        self.grid[coords.to_nd_index()] = Cell::Exploded;
        self.finish(GameStatus::Lost);

        // triggered mine first, then every other mine in grid order
        let mut exploded_mines = vec![coords];
        exploded_mines.extend(
            self.field
                .mine_coords()
                .into_iter()
                .filter(|&pos| pos != coords),
        );
        self.journal.push(GameEvent::GameEnd { exploded_mines });

        RevealOutcome::Exploded
    }

    fn reveal_safe(&mut self, origin: Coord2) -> RevealOutcome {
        let count = self.field.adjacent_mines(origin);
        self.grid[origin.to_nd_index()] = Cell::Revealed(count);
        self.revealed_count += 1;
        log::debug!("revealed {:?}, adjacent mines: {}", origin, count);

        let mut children = CascadeChildren::new();
        if count == 0 {
            self.cascade(origin, &mut children);
        }
        self.journal.push(GameEvent::DiscoverNumber {
            location: origin,
            children,
        });

        if self.revealed_count == self.field.safe_cell_count() {
            self.finish(GameStatus::Won);
            self.journal.push(GameEvent::GameEnd {
                exploded_mines: Vec::new(),
            });
            RevealOutcome::Won
        } else {
            self.mark_started();
            RevealOutcome::Revealed
        }
    }

    /// Breadth-first flood fill from a zero-count origin. Newly revealed
    /// cells land in `children` in reveal order; zero-count cells grow the
    /// frontier, numbered cells seal it. Each cell is visited at most once.
    fn cascade(&mut self, origin: Coord2, children: &mut CascadeChildren) {
        let mut visited = HashSet::from([origin]);
        let mut to_visit: VecDeque<_> = self
            .field
            .iter_neighbors(origin)
            .filter(|&pos| matches!(self.grid[pos.to_nd_index()], Cell::Covered(Marking::None)))
            .collect();
        log::trace!("cascade from {:?}, initial frontier: {:?}", origin, to_visit);

        while let Some(visit) = to_visit.pop_front() {
            if !visited.insert(visit) {
                continue;
            }

            // markings and earlier reveals stop the fill
            if !matches!(self.grid[visit.to_nd_index()], Cell::Covered(Marking::None)) {
                continue;
            }

            let visit_count = self.field.adjacent_mines(visit);
            self.grid[visit.to_nd_index()] = Cell::Revealed(visit_count);
            self.revealed_count += 1;
            children.push(visit);
            log::trace!("cascade revealed {:?}, adjacent mines: {}", visit, visit_count);

            if visit_count == 0 {
                to_visit.extend(
                    self.field
                        .iter_neighbors(visit)
                        .filter(|&pos| {
                            matches!(self.grid[pos.to_nd_index()], Cell::Covered(Marking::None))
                        })
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// Switches to in-progress on the first effective reveal, recording the
    /// start time.
    fn mark_started(&mut self) {
        if matches!(self.status, GameStatus::NotStarted) {
            let now = Utc::now();
            log::debug!("game started at {}", now);
            self.started_at.replace(now);
            self.status = GameStatus::InProgress;
        }
    }

    fn finish(&mut self, status: GameStatus) {
        let now = Utc::now();
        self.started_at.get_or_insert(now);
        self.ended_at.replace(now);
        self.status = status;
        log::debug!("game {:?} at {}", status, now);
    }

    fn check_not_final(&self) -> Result<()> {
        if self.status.is_final() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
