use alloc::collections::{BTreeSet, VecDeque};
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// One running game: the fixed mine layout plus everything the player has
/// uncovered so far. Revealed squares never revert; a finished game accepts
/// no further selections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    mine_layout: MineLayout,
    board: Array2<Cell>,
    revealed_count: Saturating<CellCount>,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl Game {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size() as usize;
        Self {
            mine_layout,
            board: Array2::default((size, size)),
            revealed_count: Saturating(0),
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board[coords.to_nd_index()]
    }

    /// The mine the player stepped on, once the game is lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Handles one player selection.
    ///
    /// Selecting a mine loses the game and leaves the board untouched. Any
    /// other covered square is revealed, flood-filling through the contiguous
    /// zero-adjacency region; the game is won once every safe square is
    /// revealed. Selecting an already revealed square changes nothing.
    ///
    /// Calling this after the game finished is a bug in the surrounding loop
    /// and reports `GameError::GameOver`.
    pub fn select(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_in_progress()?;

        if self.mine_layout.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.state = GameState::Lost;
            return Ok(RevealOutcome::HitMine);
        }

        if !self.cell_at(coords).is_covered() {
            return Ok(RevealOutcome::NoChange);
        }

        self.flood_reveal(coords);

        if self.revealed_count == Saturating(self.mine_layout.safe_cell_count()) {
            self.state = GameState::Won;
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Uncovers `start` and walks outward through the zero-adjacency region
    /// with an explicit work list, keeping the traversal independent of call
    /// stack depth. Mine squares are never uncovered: the walk only expands
    /// from squares with no adjacent mines, and every frontier square is
    /// re-checked before it is revealed.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut visited = BTreeSet::new();
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            if !visited.insert(coords) {
                continue;
            }
            if !self.cell_at(coords).is_covered() || self.mine_layout.contains_mine(coords) {
                continue;
            }

            let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
            self.board[coords.to_nd_index()] = Cell::Revealed(adjacent_mines);
            self.revealed_count += 1;

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.mine_layout
                        .iter_neighbors(coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}
