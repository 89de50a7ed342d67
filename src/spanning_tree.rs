use std::fmt;
use std::rc::Rc;
use std::slice;

use petgraph::graph::{self, NodeIndex};
use petgraph::{Graph, Undirected};

use crate::grid_dimensions::GridDimensions;
use crate::grid_topology::CellIdSmallVec;
use crate::grid_traits::GridDisplay;
use crate::units::{CellId, EdgesCount, NodesCount};

/// A tree edge: `from` was connected to the tree by stepping to `to`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Edge {
    pub from: CellId,
    pub to: CellId,
}

impl Edge {
    pub fn new(from: CellId, to: CellId) -> Edge {
        Edge { from: from, to: to }
    }

    /// The edge with its ends ordered by id, for comparing undirected edges.
    pub fn normalised(&self) -> (CellId, CellId) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

/// The finished output of a generator run.
///
/// Edges keep the order they were committed in. Every cell except the target has a
/// `next` link pointing one step closer to the target.
pub struct SpanningTree {
    dimensions: GridDimensions,
    target: CellId,
    edges: Vec<Edge>,
    next: Vec<Option<CellId>>,
    graph: Graph<(), (), Undirected, u32>,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

impl fmt::Debug for SpanningTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SpanningTree :: target: {}, dimensions: {:?}, edges: {:?}",
               self.target, self.dimensions, self.edges)
    }
}

impl SpanningTree {
    /// Assemble a tree from committed edges and next links.
    ///
    /// No shape checks happen here, see `validation::verify_spanning_tree`.
    pub fn new(dimensions: GridDimensions,
               target: CellId,
               edges: Vec<Edge>,
               next: Vec<Option<CellId>>)
               -> SpanningTree {

        let (NodesCount(nodes), EdgesCount(edges_count)) = dimensions.tree_size();
        let mut graph = Graph::with_capacity(nodes, edges_count);
        for _ in 0..nodes {
            let _ = graph.add_node(());
        }
        for edge in &edges {
            if dimensions.is_valid_cell(edge.from) && dimensions.is_valid_cell(edge.to) {
                let _ = graph.add_edge(NodeIndex::new(edge.from.0), NodeIndex::new(edge.to.0), ());
            }
        }

        SpanningTree {
            dimensions: dimensions,
            target: target,
            edges: edges,
            next: next,
            graph: graph,
            grid_display: None,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn target(&self) -> CellId {
        self.target
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn iter_edges(&self) -> slice::Iter<Edge> {
        self.edges.iter()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The undirected graph of the tree, one node per cell id.
    #[inline]
    pub fn graph(&self) -> &Graph<(), (), Undirected, u32> {
        &self.graph
    }

    /// The cell one step closer to the target, None for the target itself.
    pub fn next(&self, cell: CellId) -> Option<CellId> {
        self.next.get(cell.0).and_then(|n| *n)
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn GridDisplay>> {
        &self.grid_display
    }

    /// Cells joined to `cell` by a tree edge. None for an invalid cell.
    pub fn links(&self, cell: CellId) -> Option<CellIdSmallVec> {
        if !self.dimensions.is_valid_cell(cell) {
            return None;
        }
        let linked = self.graph
                         .neighbors(NodeIndex::new(cell.0))
                         .map(|node_index| CellId(node_index.index()))
                         .collect();
        Some(linked)
    }

    pub fn is_linked(&self, a: CellId, b: CellId) -> bool {
        if self.dimensions.is_valid_cell(a) && self.dimensions.is_valid_cell(b) {
            self.graph.find_edge(NodeIndex::new(a.0), NodeIndex::new(b.0)).is_some()
        } else {
            false
        }
    }

    /// Follow the next links from `cell` to the target, both ends included.
    ///
    /// None if the cell is invalid or the links do not lead to the target.
    pub fn path_to_target(&self, cell: CellId) -> Option<Vec<CellId>> {
        if !self.dimensions.is_valid_cell(cell) {
            return None;
        }
        let mut path = vec![cell];
        let mut current = cell;
        while current != self.target {
            // A path longer than the grid has looped.
            if path.len() > self.size() {
                return None;
            }
            current = self.next(current)?;
            path.push(current);
        }
        Some(path)
    }

    pub fn iter_links(&self) -> LinksIter {
        LinksIter { graph_edge_iter: self.graph.raw_edges().iter() }
    }
}

pub struct LinksIter<'a> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), u32>>,
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (CellId, CellId);

    fn next(&mut self) -> Option<Self::Item> {
        self.graph_edge_iter
            .next()
            .map(|edge| (CellId(edge.source().index()), CellId(edge.target().index())))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a> ExactSizeIterator for LinksIter<'a> {}
