use std::convert::TryFrom;
use std::ops::Range;

use error_chain::bail;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::units::{CellId, EdgesCount, Length, NodesCount, Width};


/// Validated size of a rectangular grid.
///
/// `width` counts rows and `length` counts the cells in one row, so cell `id` lives at
/// `x = id % length`, `y = id / length`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridDimensions {
    width: Width,
    length: Length,
}

impl GridDimensions {
    pub fn new(width: Width, length: Length) -> Result<GridDimensions> {
        let invalid = || ErrorKind::InvalidDimension(signed(width.0), signed(length.0));
        if width.0 == 0 || length.0 == 0 {
            bail!(invalid());
        }
        width.0
             .checked_mul(length.0)
             .ok_or_else(|| Error::from(invalid()))?;

        Ok(GridDimensions {
            width: width,
            length: length,
        })
    }

    /// Dimensions from signed values, as read from user input.
    pub fn from_signed(width: i64, length: i64) -> Result<GridDimensions> {
        match (usize::try_from(width), usize::try_from(length)) {
            (Ok(w), Ok(l)) => GridDimensions::new(Width(w), Length(l)),
            _ => bail!(ErrorKind::InvalidDimension(width, length)),
        }
    }

    #[inline(always)]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline(always)]
    pub fn length(&self) -> Length {
        self.length
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.width.0 * self.length.0)
    }

    /// Node count and the number of edges in a spanning tree over them.
    pub fn tree_size(&self) -> (NodesCount, EdgesCount) {
        let NodesCount(nodes) = self.size();
        (NodesCount(nodes), EdgesCount(nodes - 1))
    }

    /// Number of edges in the full grid graph, every adjacent pair joined.
    pub fn grid_edges_count(&self) -> EdgesCount {
        let (Width(w), Length(l)) = (self.width, self.length);
        EdgesCount(w * (l - 1) + l * (w - 1))
    }

    #[inline]
    pub fn is_valid_cell(&self, cell: CellId) -> bool {
        cell.0 < self.size().0
    }

    #[inline]
    pub fn cell_coordinate(&self, cell: CellId) -> Cartesian2DCoordinate {
        let Length(length) = self.length;
        Cartesian2DCoordinate::new((cell.0 % length) as u32, (cell.0 / length) as u32)
    }

    /// Row major cell id of a coordinate, None when outside the grid.
    pub fn coordinate_cell(&self, coord: Cartesian2DCoordinate) -> Option<CellId> {
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < self.length.0 && y < self.width.0 {
            Some(CellId(y * self.length.0 + x))
        } else {
            None
        }
    }

    pub fn iter(&self) -> CellIter {
        CellIter { ids: 0..self.size().0 }
    }
}

/// Cell ids in row major order.
#[derive(Debug, Clone)]
pub struct CellIter {
    ids: Range<usize>,
}

impl Iterator for CellIter {
    type Item = CellId;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(CellId)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}
impl ExactSizeIterator for CellIter {}


// Saturates, only for reporting.
fn signed(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
