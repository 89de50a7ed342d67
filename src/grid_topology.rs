//! Neighbourhood queries over the implicit grid graph.
//!
//! Nothing here allocates a graph: a neighbour is computed from the cell id and the grid
//! dimensions alone. Off grid neighbours are reported as `None`, which is an ordinary
//! boundary answer rather than an error.

use smallvec::SmallVec;

use crate::cells::{CompassPrimary, ALL_DIRECTIONS};
use crate::grid_dimensions::GridDimensions;
use crate::units::{CellId, Length, Width};

pub type CellIdSmallVec = SmallVec<[CellId; 4]>;

/// The cell one step away from `cell` in direction `dir`.
///
/// Each of the four boundaries is checked on its own so a corner cell has two directions
/// that return `None`.
pub fn neighbour_at_direction(cell: CellId,
                              dir: CompassPrimary,
                              dimensions: &GridDimensions)
                              -> Option<CellId> {
    let (Width(width), Length(length)) = (dimensions.width(), dimensions.length());
    let id = cell.0;
    let (x, y) = (id % length, id / length);

    match dir {
        CompassPrimary::North => {
            if y > 0 {
                Some(CellId(id - length))
            } else {
                None
            }
        }
        CompassPrimary::South => {
            if y + 1 < width {
                Some(CellId(id + length))
            } else {
                None
            }
        }
        CompassPrimary::West => {
            if x > 0 {
                Some(CellId(id - 1))
            } else {
                None
            }
        }
        CompassPrimary::East => {
            if x + 1 < length {
                Some(CellId(id + 1))
            } else {
                None
            }
        }
    }
}

pub fn neighbours(cell: CellId, dimensions: &GridDimensions) -> CellIdSmallVec {
    ALL_DIRECTIONS.iter()
                  .filter_map(|dir| neighbour_at_direction(cell, *dir, dimensions))
                  .collect()
}

/// Direction of the step from `a` to `b`, if they are grid neighbours.
pub fn direction_between(a: CellId,
                         b: CellId,
                         dimensions: &GridDimensions)
                         -> Option<CompassPrimary> {
    ALL_DIRECTIONS.iter()
                  .cloned()
                  .find(|dir| neighbour_at_direction(a, *dir, dimensions) == Some(b))
}

/// Are the two cells side by side in the grid?
///
/// Compared by coordinate so that the last cell of one row and the first cell of the next,
/// whose ids differ by one, are not adjacent.
pub fn are_adjacent(a: CellId, b: CellId, dimensions: &GridDimensions) -> bool {
    if !dimensions.is_valid_cell(a) || !dimensions.is_valid_cell(b) {
        return false;
    }
    let ca = dimensions.cell_coordinate(a);
    let cb = dimensions.cell_coordinate(b);
    let dx = (ca.x as i64 - cb.x as i64).abs();
    let dy = (ca.y as i64 - cb.y as i64).abs();
    dx + dy == 1
}
