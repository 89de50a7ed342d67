use std::fmt;

/// Number of rows in the grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
/// Number of cells along one row.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Length(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct NodesCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);

/// Row major index of a grid cell.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CellId(pub usize);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for CellId {
    fn from(index: usize) -> CellId {
        CellId(index)
    }
}
