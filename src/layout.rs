//! Scene placement of a generated tree.
//!
//! Positions come straight from the tree: cell `(x, y)` sits at `(x * spacing, y * spacing)`
//! and an edge sits half a spacing past its lower id end, along the edge. A consumer
//! implementing `PlacementSink` turns the placements into whatever it draws with.

use crate::spanning_tree::SpanningTree;
use crate::units::{CellId, Length};

pub const DEFAULT_SPACING: f32 = 0.5;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct NodePlacement {
    pub cell: CellId,
    pub position: (f32, f32),
    pub is_target: bool,
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct EdgePlacement {
    pub from: CellId,
    pub to: CellId,
    pub position: (f32, f32),
    pub orientation: Orientation,
}

pub trait PlacementSink {
    fn place_node(&mut self, node: &NodePlacement);
    fn place_edge(&mut self, edge: &EdgePlacement);
}

#[derive(Debug, Clone)]
pub struct Layout {
    spacing: f32,
    nodes: Vec<NodePlacement>,
    edges: Vec<EdgePlacement>,
}

impl Layout {
    pub fn new(tree: &SpanningTree, spacing: f32) -> Layout {
        let dimensions = tree.dimensions();
        let Length(length) = dimensions.length();

        let position_of = |cell: CellId| {
            let coord = dimensions.cell_coordinate(cell);
            (coord.x as f32 * spacing, coord.y as f32 * spacing)
        };

        let nodes = dimensions.iter()
                              .map(|cell| {
                                  NodePlacement {
                                      cell: cell,
                                      position: position_of(cell),
                                      is_target: cell == tree.target(),
                                  }
                              })
                              .collect();

        let edges = tree.iter_edges()
                        .filter_map(|edge| {
                            let (low, high) = edge.normalised();
                            let (x, y) = position_of(low);
                            let half = spacing / 2.0;
                            let gap = high.0 - low.0;
                            // A single column grid has length 1, so vertical is checked first.
                            let (position, orientation) = if gap == length {
                                ((x, y + half), Orientation::Vertical)
                            } else if gap == 1 {
                                ((x + half, y), Orientation::Horizontal)
                            } else {
                                return None;
                            };
                            Some(EdgePlacement {
                                from: edge.from,
                                to: edge.to,
                                position: position,
                                orientation: orientation,
                            })
                        })
                        .collect();

        Layout {
            spacing: spacing,
            nodes: nodes,
            edges: edges,
        }
    }

    pub fn with_default_spacing(tree: &SpanningTree) -> Layout {
        Layout::new(tree, DEFAULT_SPACING)
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    #[inline]
    pub fn nodes(&self) -> &[NodePlacement] {
        &self.nodes
    }

    #[inline]
    pub fn edges(&self) -> &[EdgePlacement] {
        &self.edges
    }

    /// Hand every node, then every edge in commit order, to the sink.
    pub fn render_to<S: PlacementSink + ?Sized>(&self, sink: &mut S) {
        for node in &self.nodes {
            sink.place_node(node);
        }
        for edge in &self.edges {
            sink.place_edge(edge);
        }
    }
}
