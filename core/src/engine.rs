use alloc::collections::VecDeque;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of a game, derived from the cells of a board on demand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
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

/// Result of one reveal call, listing every cell it uncovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealReport {
    pub state: GameState,
    pub revealed: Vec<Coord2>,
}

impl RevealReport {
    pub fn has_update(&self) -> bool {
        !self.revealed.is_empty()
    }
}

/// Uncovers the cell at `coords`, flooding outward through cells with no
/// adjacent traps.
///
/// Revealing an already revealed cell, or any cell once the game is over, is
/// a no-op that reports the current state.
pub fn reveal(board: &mut Board, coords: Coord2) -> Result<GameState> {
    reveal_with_changes(board, coords).map(|report| report.state)
}

/// Same as [`reveal`], also reporting which cells changed.
pub fn reveal_with_changes(board: &mut Board, coords: Coord2) -> Result<RevealReport> {
    let already_revealed = board.cell_at(coords)?.is_revealed();
    if !board.is_ready() {
        return Err(GameError::SetupIncomplete);
    }

    let state = game_state(board);
    if state.is_finished() || already_revealed {
        return Ok(RevealReport {
            state,
            revealed: Vec::new(),
        });
    }

    let revealed = flood_reveal(board, coords)?;
    let state = game_state(board);
    log::trace!(
        "Reveal at {:?} uncovered {} cells, now {:?}",
        coords,
        revealed.len(),
        state
    );
    Ok(RevealReport { state, revealed })
}

/// Current state of the game on `board`.
///
/// A board with no safe cells counts as won as soon as setup is done.
pub fn game_state(board: &Board) -> GameState {
    let mut revealed_safe: CellCount = 0;
    for cell in board.cells().filter(|cell| cell.is_revealed()) {
        if cell.is_trap() {
            return GameState::Lost;
        }
        revealed_safe += 1;
    }

    if board.is_ready() && revealed_safe == board.safe_cell_count() {
        GameState::Won
    } else {
        GameState::InProgress
    }
}

/// Work-list flood fill starting at a hidden cell. Cells are marked revealed
/// when scheduled, so each one enters the queue at most once.
fn flood_reveal(board: &mut Board, start: Coord2) -> Result<Vec<Coord2>> {
    let mut revealed = Vec::new();
    let mut pending = VecDeque::new();

    if board.cell_at_mut(start)?.mark_revealed() {
        pending.push_back(start);
    }

    while let Some(coords) = pending.pop_front() {
        revealed.push(coords);

        // traps and numbered cells stop the flood
        if board.cell_at(coords)?.adjacency() != Adjacency::Count(0) {
            continue;
        }

        for neighbor in board.neighbors_of(coords)? {
            let cell = board.cell_at_mut(neighbor)?;
            debug_assert!(!cell.is_trap(), "zero cell next to a trap at {neighbor:?}");
            if cell.mark_revealed() {
                pending.push_back(neighbor);
            }
        }
    }

    Ok(revealed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, traps: &[Coord2]) -> Board {
        Board::with_traps(size, traps).unwrap()
    }

    fn is_revealed(board: &Board, coords: Coord2) -> bool {
        board.cell_at(coords).unwrap().is_revealed()
    }

    #[test]
    fn trap_free_board_is_won_in_one_reveal() {
        let mut board = board((3, 3), &[]);

        assert_eq!(reveal(&mut board, (0, 0)), Ok(GameState::Won));
        assert_eq!(board.revealed_count(), 9);
    }

    #[test]
    fn numbered_cell_does_not_flood() {
        let mut board = board((3, 3), &[(1, 1)]);

        assert_eq!(reveal(&mut board, (0, 0)), Ok(GameState::InProgress));
        assert_eq!(board.revealed_count(), 1);
        assert!(is_revealed(&board, (0, 0)));
    }

    #[test]
    fn finished_game_ignores_reveals() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(reveal(&mut board, (0, 0)), Ok(GameState::Lost));
        assert_eq!(reveal(&mut board, (1, 1)), Ok(GameState::Lost));
        assert!(!is_revealed(&board, (1, 1)));
    }

    #[test]
    fn hitting_trap_reveals_nothing_else() {
        let mut board = board((4, 4), &[(3, 3)]);

        let report = reveal_with_changes(&mut board, (3, 3)).unwrap();

        assert_eq!(report.state, GameState::Lost);
        assert_eq!(report.revealed, [(3, 3)]);
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn flood_stops_at_numbered_border() {
        // . . . .
        // . . . .
        // . . 1 1
        // . . 1 T
        let mut board = board((4, 4), &[(3, 3)]);

        let report = reveal_with_changes(&mut board, (0, 0)).unwrap();

        assert_eq!(report.state, GameState::Won);
        assert_eq!(report.revealed.len(), 15);
        assert!(!is_revealed(&board, (3, 3)));
    }

    #[test]
    fn flood_reveals_region_and_first_ring_only() {
        // 0 0 1 T T
        // 2 2 2 2 2
        // T T 1 0 0
        // the zero pocket bottom right is not connected to the top left one
        let mut board = board((5, 3), &[(3, 0), (4, 0), (0, 2), (1, 2)]);

        let report = reveal_with_changes(&mut board, (0, 0)).unwrap();

        let mut revealed = report.revealed.clone();
        revealed.sort();
        assert_eq!(revealed, [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
        assert_eq!(report.state, GameState::InProgress);
        assert!(board.cells().filter(|cell| cell.is_trap()).all(|cell| !cell.is_revealed()));
    }

    #[test]
    fn revealing_twice_is_idempotent() {
        let mut board = board((3, 3), &[(2, 2)]);
        reveal(&mut board, (1, 1)).unwrap();
        let snapshot = board.clone();

        let report = reveal_with_changes(&mut board, (1, 1)).unwrap();

        assert!(!report.has_update());
        assert_eq!(report.state, GameState::InProgress);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn revealing_every_safe_cell_one_by_one_wins() {
        // every safe cell here has a trap neighbor, so there is no flood
        let mut board = board((3, 1), &[(1, 0)]);

        assert_eq!(reveal(&mut board, (0, 0)), Ok(GameState::InProgress));
        assert_eq!(reveal(&mut board, (2, 0)), Ok(GameState::Won));
        assert_eq!(game_state(&board), GameState::Won);
    }

    #[test]
    fn out_of_bounds_is_rejected_even_after_game_end() {
        let mut board = board((2, 2), &[(0, 0)]);
        assert_eq!(reveal(&mut board, (2, 0)), Err(GameError::OutOfBounds));

        reveal(&mut board, (0, 0)).unwrap();
        assert_eq!(reveal(&mut board, (0, 2)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn reveal_requires_finished_setup() {
        let mut fresh = Board::new((2, 2)).unwrap();
        assert_eq!(reveal(&mut fresh, (0, 0)), Err(GameError::SetupIncomplete));

        fresh.place_traps_at(&[(1, 1)]).unwrap();
        assert_eq!(reveal(&mut fresh, (0, 0)), Err(GameError::SetupIncomplete));
        assert_eq!(fresh.revealed_count(), 0);
    }

    #[test]
    fn all_trap_board_is_already_won() {
        let mut board = board((2, 1), &[(0, 0), (1, 0)]);

        assert_eq!(game_state(&board), GameState::Won);
        assert_eq!(reveal(&mut board, (0, 0)), Ok(GameState::Won));
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn view_follows_reveal() {
        let mut board = board((3, 1), &[(2, 0)]);

        reveal(&mut board, (0, 0)).unwrap();

        let views: Vec<_> = board.cells().map(Cell::view).collect();
        assert_eq!(views, [CellView::Empty, CellView::Number(1), CellView::Hidden]);
    }
}
