//! Checks that a `SpanningTree` really is a spanning tree of its grid.

use bit_set::BitSet;
use fnv::FnvHashSet;
use petgraph::algo::{connected_components, is_cyclic_undirected};

use crate::errors::*;
use crate::grid_topology::are_adjacent;
use crate::spanning_tree::SpanningTree;
use crate::units::{EdgesCount, NodesCount};

fn invalid<T>(reason: String) -> Result<T> {
    Err(ErrorKind::InvalidTree(reason).into())
}

/// Verify the edge list of `tree` against the grid it claims to span.
///
/// Checks, in order: the target is a grid cell, the edge count is `cells - 1`, every edge
/// joins two grid neighbours, no edge repeats, no cycle exists, every cell is connected, and
/// the next links agree with the edges.
pub fn verify_spanning_tree(tree: &SpanningTree) -> Result<()> {
    let dimensions = tree.dimensions();
    let (NodesCount(nodes), EdgesCount(expected_edges)) = dimensions.tree_size();

    if !dimensions.is_valid_cell(tree.target()) {
        return invalid(format!("target {} is outside the grid", tree.target()));
    }

    if tree.edges().len() != expected_edges {
        return invalid(format!("expected {} edges, found {}", expected_edges, tree.edges().len()));
    }

    let mut seen = FnvHashSet::default();
    for edge in tree.iter_edges() {
        if edge.from == edge.to {
            return invalid(format!("self loop at {}", edge.from));
        }
        if !are_adjacent(edge.from, edge.to, dimensions) {
            return invalid(format!("{} and {} are not grid neighbours", edge.from, edge.to));
        }
        if !seen.insert(edge.normalised()) {
            return invalid(format!("duplicate edge {} - {}", edge.from, edge.to));
        }
    }

    if is_cyclic_undirected(tree.graph()) {
        return invalid(String::from("edges contain a cycle"));
    }
    let components = connected_components(tree.graph());
    if components != 1 {
        return invalid(format!("{} disconnected components", components));
    }

    verify_next_links(tree, nodes)
}

/// Every cell must reach the target through next links that are tree edges.
fn verify_next_links(tree: &SpanningTree, nodes: usize) -> Result<()> {
    let mut reaches_target = BitSet::with_capacity(nodes);
    reaches_target.insert(tree.target().0);

    if tree.next(tree.target()).is_some() {
        return invalid(format!("target {} has a next link", tree.target()));
    }

    for cell in tree.dimensions().iter() {
        let mut walked = vec![];
        let mut current = cell;
        while !reaches_target.contains(current.0) {
            if walked.len() > nodes {
                return invalid(format!("next links from {} loop", cell));
            }
            let next = match tree.next(current) {
                Some(next) => next,
                None => return invalid(format!("{} has no next link", current)),
            };
            if !tree.is_linked(current, next) {
                return invalid(format!("next link {} -> {} is not a tree edge", current, next));
            }
            walked.push(current);
            current = next;
        }
        for on_path in walked {
            reaches_target.insert(on_path.0);
        }
    }

    Ok(())
}
