//! Sparse tile memory keyed by cell coordinate.

use std::collections::HashMap;

use gem_scout_core::{CellCoord, Tile};

/// Classification and observation clock for every reported cell.
///
/// The map is unbounded and sparse because the agent never learns the full
/// map extent. A cell missing from `tiles` is Unknown; once present it is
/// never removed, only re-asserted.
#[derive(Clone, Debug, Default)]
pub(crate) struct TileMemory {
    tiles: HashMap<CellCoord, Tile>,
    last_seen: HashMap<CellCoord, u64>,
}

impl TileMemory {
    /// Records a classification for the cell and stamps it with the tick.
    ///
    /// The last-seen clock never moves backwards even if an older tick index
    /// is supplied.
    pub(crate) fn record(&mut self, cell: CellCoord, tile: Tile, tick: u64) {
        let _ = self.tiles.insert(cell, tile);
        let seen = self.last_seen.entry(cell).or_insert(tick);
        if *seen < tick {
            *seen = tick;
        }
    }

    pub(crate) fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.tiles.get(&cell).copied()
    }

    pub(crate) fn last_seen(&self, cell: CellCoord) -> Option<u64> {
        self.last_seen.get(&cell).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.tiles.len()
    }
}
