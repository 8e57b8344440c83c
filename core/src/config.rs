use serde::{Deserialize, Serialize};

use crate::*;

/// Board size and trap count, the whole of the game's tunable surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub traps: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, traps: CellCount) -> Self {
        Self { size, traps }
    }

    /// Builds a validated config. Out of range values are rejected, never clamped.
    pub fn new(size: Coord2, traps: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, traps);
        config.validate()?;
        Ok(config)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    /// Checks a config that did not come through [`GameConfig::new`], e.g. one
    /// that was deserialized.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }
        let capacity = self.total_cells();
        if self.traps > capacity {
            return Err(GameError::InvalidTrapCount {
                requested: self.traps,
                capacity,
            });
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.traps)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}
