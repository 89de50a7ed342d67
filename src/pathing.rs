use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::grid_traits::GridDisplay;
use crate::spanning_tree::SpanningTree;
use crate::units::CellId;


/// Step counts along tree edges from one start cell to every other cell.
#[derive(Debug, Clone)]
pub struct Distances {
    start: CellId,
    distances: FnvHashMap<CellId, u32>,
    max_distance: u32,
}

impl Distances {
    pub fn new(tree: &SpanningTree, start: CellId) -> Option<Distances> {

        if !tree.dimensions().is_valid_cell(start) {
            return None;
        }

        let mut max = 0;
        let mut distances: FnvHashMap<CellId, u32> =
            FnvHashMap::with_capacity_and_hasher(tree.size(), Default::default());
        distances.insert(start, 0);

        // Every edge is one step, so a cell's distance is final the first time the frontier
        // reaches it and the map doubles as the visited set.
        let mut frontier = vec![start];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell in &frontier {

                let distance_to_cell = distances[cell];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = tree.links(*cell).unwrap_or_default();
                for link in &*links {
                    if !distances.contains_key(link) {
                        distances.insert(*link, distance_to_cell + 1);
                        new_frontier.push(*link);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start: start,
            distances: distances,
            max_distance: max,
        })
    }

    /// Distances from the tree's target, the natural root.
    pub fn from_target(tree: &SpanningTree) -> Distances {
        Distances::new(tree, tree.target()).unwrap_or_else(|| Distances {
            start: tree.target(),
            distances: FnvHashMap::default(),
            max_distance: 0,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> CellId {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, cell: CellId) -> Option<u32> {
        self.distances.get(&cell).cloned()
    }

    pub fn furthest_points(&self) -> SmallVec<[CellId; 8]> {
        let mut furthest: SmallVec<[CellId; 8]> = self.distances
                                                      .iter()
                                                      .filter(|&(_, d)| *d == self.max_distance)
                                                      .map(|(cell, _)| *cell)
                                                      .collect();
        furthest.sort();
        furthest
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, cell: CellId) -> String {
        if let Some(d) = self.distances.get(&cell) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

/// Longest path through the tree: walk to the furthest cell from anywhere, then to the
/// furthest cell from there.
pub fn longest_path(tree: &SpanningTree) -> Option<Vec<CellId>> {
    let first = Distances::new(tree, CellId(0))?;
    let long_path_start = *first.furthest_points().first()?;
    let from_start = Distances::new(tree, long_path_start)?;
    let long_path_end = *from_start.furthest_points().first()?;
    shortest_path(tree, &from_start, long_path_end)
}

/// Path from the start of `distances` to `end`, both included.
pub fn shortest_path(tree: &SpanningTree,
                     distances: &Distances,
                     end: CellId)
                     -> Option<Vec<CellId>> {

    let mut current_distance = distances.distance_from_start_to(end)?;
    let mut path = vec![end];
    let mut current = end;

    while current != distances.start() {
        let closer = tree.links(current)?
                         .iter()
                         .cloned()
                         .find(|link| distances.distance_from_start_to(*link) == Some(current_distance - 1))?;
        current = closer;
        current_distance -= 1;
        path.push(current);
    }

    path.reverse();
    Some(path)
}
