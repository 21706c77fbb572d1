//! Sheet geometry and slot addressing
//!
//! Each sheet is a 1024x1024 canvas holding a 21x21 grid of 48x48 cells.
//! Slots fill a sheet column by column: slot 1 sits below slot 0, slot 21
//! starts the second column.

use std::fmt;

/// Sheet edge length in pixels
pub const SHEET_DIM: u32 = 1024;

/// Cell edge length in pixels
pub const CELL_DIM: u32 = 48;

/// Cells per sheet row and column
pub const GRID_DIM: u32 = SHEET_DIM / CELL_DIM;

/// Slots held by one sheet
pub const SLOTS_PER_SHEET: u32 = GRID_DIM * GRID_DIM;

/// Position of an icon within the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(pub u32);

impl Slot {
    /// Create a new `Slot`
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw slot index
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Sheet and cell holding this slot
    pub const fn position(self) -> SlotPosition {
        let local = self.0 % SLOTS_PER_SHEET;
        SlotPosition {
            sheet: (self.0 / SLOTS_PER_SHEET) as usize,
            column: local / GRID_DIM,
            row: local % GRID_DIM,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Slot {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl From<Slot> for u32 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

/// Sheet index and grid cell of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotPosition {
    /// Sheet index
    pub sheet: usize,
    /// Grid column (x / 48)
    pub column: u32,
    /// Grid row (y / 48)
    pub row: u32,
}

impl SlotPosition {
    /// Top-left pixel of the cell
    pub const fn origin(&self) -> (u32, u32) {
        (self.column * CELL_DIM, self.row * CELL_DIM)
    }
}

/// Number of sheets needed to hold `cursor` slots
pub const fn sheets_for(cursor: u32) -> usize {
    cursor.div_ceil(SLOTS_PER_SHEET) as usize
}
