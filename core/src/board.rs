use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Where a board is in its one-time setup sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SetupPhase {
    Created,
    TrapsPlaced,
    Ready,
}

/// Fixed-size grid owning every [`Cell`] of one game.
///
/// Setup runs exactly once, in order: [`Board::new`], one of the
/// `place_traps*` methods, then [`Board::compute_neighbor_counts`]. Repeating
/// or skipping a step fails with [`GameError::ReentrantSetup`].
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    size: Coord2,
    trap_count: CellCount,
    phase: SetupPhase,
}

impl Board {
    /// Allocates a `(width, height)` board of hidden, safe cells.
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let cells = Array2::from_shape_fn(size.to_nd_index(), |(column, row)| {
            Cell::new((column as Coord, row as Coord))
        });
        Ok(Self {
            cells,
            size,
            trap_count: 0,
            phase: SetupPhase::Created,
        })
    }

    /// Runs the full setup sequence with randomly placed traps.
    pub fn generate(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut board = Self::new(config.size)?;
        board.place_traps_seeded(config.traps, seed)?;
        board.compute_neighbor_counts()?;
        Ok(board)
    }

    /// Runs the full setup sequence with traps at exactly `traps`.
    pub fn with_traps(size: Coord2, traps: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size)?;
        board.place_traps_at(traps)?;
        board.compute_neighbor_counts()?;
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn trap_count(&self) -> CellCount {
        self.trap_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.trap_count
    }

    pub fn revealed_count(&self) -> CellCount {
        let revealed = self.cells.iter().filter(|cell| cell.is_revealed()).count();
        // bounded by total_cells, which fits
        revealed as CellCount
    }

    /// Whether setup has completed and the board accepts reveals.
    pub fn is_ready(&self) -> bool {
        self.phase == SetupPhase::Ready
    }

    /// Places `count` traps on distinct cells chosen from an entropy seed.
    pub fn place_traps(&mut self, count: CellCount) -> Result<()> {
        self.place_traps_seeded(count, rand::random())
    }

    /// Places `count` traps on distinct cells, the same seed always giving the
    /// same layout.
    pub fn place_traps_seeded(&mut self, count: CellCount, seed: u64) -> Result<()> {
        use rand::prelude::*;

        self.check_phase(SetupPhase::Created)?;
        self.check_trap_capacity(count)?;

        // partial Fisher-Yates: the first `count` slots end up a uniform sample
        let mut candidates: Vec<Coord2> = all_coords(self.size).collect();
        let amount = usize::from(count);
        let mut rng = SmallRng::seed_from_u64(seed);
        for i in 0..amount {
            let j = rng.random_range(i..candidates.len());
            candidates.swap(i, j);
        }

        for &coords in &candidates[..amount] {
            self.cell_at_mut(coords)?.set_trap();
        }
        self.finish_trap_placement(count);
        log::debug!(
            "Placed {} traps on {}x{} board, seed {:#018x}",
            count,
            self.size.0,
            self.size.1,
            seed
        );
        Ok(())
    }

    /// Places traps at the listed coordinates. Nothing is modified unless
    /// every coordinate is in bounds and listed only once.
    pub fn place_traps_at(&mut self, traps: &[Coord2]) -> Result<()> {
        self.check_phase(SetupPhase::Created)?;
        let count = CellCount::try_from(traps.len()).unwrap_or(CellCount::MAX);
        self.check_trap_capacity(count)?;

        let mut layout: Array2<bool> = Array2::default(self.size.to_nd_index());
        for &coords in traps {
            let slot = layout
                .get_mut(coords.to_nd_index())
                .ok_or(GameError::OutOfBounds)?;
            if *slot {
                return Err(GameError::DuplicateTrap(coords));
            }
            *slot = true;
        }

        for &coords in traps {
            self.cell_at_mut(coords)?.set_trap();
        }
        self.finish_trap_placement(count);
        log::debug!(
            "Placed {} listed traps on {}x{} board",
            count,
            self.size.0,
            self.size.1
        );
        Ok(())
    }

    /// Stores each cell's adjacency. Trap layout is final from here on.
    pub fn compute_neighbor_counts(&mut self) -> Result<()> {
        self.check_phase(SetupPhase::TrapsPlaced)?;

        for coords in all_coords(self.size) {
            let adjacency = if self.cell_at(coords)?.is_trap() {
                Adjacency::Trap
            } else {
                Adjacency::Count(self.count_adjacent_traps(coords)?)
            };
            self.cell_at_mut(coords)?.set_adjacency(adjacency);
        }

        self.phase = SetupPhase::Ready;
        log::debug!("Neighbor counts ready, {} safe cells", self.safe_cell_count());
        Ok(())
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        self.cells
            .get(coords.to_nd_index())
            .ok_or(GameError::OutOfBounds)
    }

    pub(crate) fn cell_at_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        self.cells
            .get_mut(coords.to_nd_index())
            .ok_or(GameError::OutOfBounds)
    }

    /// In-bounds neighbors of `coords`, between 0 and 8 of them.
    pub fn neighbors_of(&self, coords: Coord2) -> Result<NeighborIter> {
        self.validate_coords(coords)?;
        Ok(NeighborIter::new(coords, self.size))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Every cell, row by row, for a render pass.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        all_coords(self.size).map(|coords| &self.cells[coords.to_nd_index()])
    }

    fn count_adjacent_traps(&self, coords: Coord2) -> Result<u8> {
        let mut count = 0;
        for neighbor in self.neighbors_of(coords)? {
            if self.cell_at(neighbor)?.is_trap() {
                count += 1;
            }
        }
        Ok(count)
    }

    fn check_phase(&self, expected: SetupPhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::ReentrantSetup)
        }
    }

    fn check_trap_capacity(&self, requested: CellCount) -> Result<()> {
        let capacity = self.total_cells();
        if requested > capacity {
            Err(GameError::InvalidTrapCount {
                requested,
                capacity,
            })
        } else {
            Ok(())
        }
    }

    fn finish_trap_placement(&mut self, count: CellCount) {
        self.trap_count = count;
        self.phase = SetupPhase::TrapsPlaced;
    }
}

fn all_coords((width, height): Coord2) -> impl Iterator<Item = Coord2> {
    (0..height).flat_map(move |row| (0..width).map(move |column| (column, row)))
}
