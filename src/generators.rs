//! Random spanning tree generation with loop-erased random walks.
//!
//! One cell is picked as the target and starts out connected. Then, lowest id first, every
//! unconnected cell sends a random walker out until it reaches a connected cell. Whenever the
//! walker crosses its own path the loop is cut out, so what remains is a simple path that is
//! spliced into the tree.
//!
//! The walker has two quirks:
//! - a direction that leaves the grid is swapped for the opposite direction instead of being
//!   drawn again, pushing boundary cells inwards.
//! - it never steps straight back to the cell it just came from, unless that cell is the
//!   only neighbour it has.

use error_chain::bail;
use fnv::FnvHashMap;
use log::{debug, info, trace};
use rand::Rng;

use crate::cells::rand_direction;
use crate::errors::*;
use crate::grid_dimensions::GridDimensions;
use crate::grid_topology::{neighbour_at_direction, neighbours};
use crate::spanning_tree::{Edge, SpanningTree};
use crate::units::{CellId, Length, NodesCount, Width};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
enum ConnectionStatus {
    Unconnected,
    Connected,
}

/// Bounds on a single random walk. Exceeding one fails the generation with
/// `ErrorKind::GenerationStalled`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct WalkLimits {
    /// Steps one walker may take before it reaches the tree.
    pub max_walk_steps: usize,
    /// Direction draws allowed to find a single acceptable step.
    pub max_direction_attempts: usize,
}

impl Default for WalkLimits {
    fn default() -> WalkLimits {
        WalkLimits {
            max_walk_steps: 1_000_000,
            max_direction_attempts: 1_000,
        }
    }
}

/// Validate the dimensions and generate a spanning tree with the default limits.
pub fn spanning_tree<R: Rng + ?Sized>(width: Width,
                                      length: Length,
                                      rng: &mut R)
                                      -> Result<SpanningTree> {
    let dimensions = GridDimensions::new(width, length)?;
    generate(&dimensions, rng)
}

pub fn generate<R: Rng + ?Sized>(dimensions: &GridDimensions, rng: &mut R) -> Result<SpanningTree> {
    generate_with_limits(dimensions, rng, WalkLimits::default())
}

pub fn generate_with_limits<R: Rng + ?Sized>(dimensions: &GridDimensions,
                                             rng: &mut R,
                                             limits: WalkLimits)
                                             -> Result<SpanningTree> {

    let NodesCount(cells_count) = dimensions.size();

    let target = CellId(rng.gen_range(0..cells_count));
    let mut status = vec![ConnectionStatus::Unconnected; cells_count];
    status[target.0] = ConnectionStatus::Connected;
    let mut next: Vec<Option<CellId>> = vec![None; cells_count];
    let mut edges = Vec::with_capacity(cells_count - 1);

    let mut unconnected_count = cells_count - 1;
    let mut lowest_unconnected = 0;

    while unconnected_count > 0 {

        // Cells never go back to unconnected, so the scan resumes where it stopped.
        while status[lowest_unconnected] == ConnectionStatus::Connected {
            lowest_unconnected += 1;
        }
        let start = CellId(lowest_unconnected);

        let path = loop_erased_walk(start, dimensions, &status, rng, &limits)?;

        for pair in path.windows(2) {
            let (cell, towards) = (pair[0], pair[1]);
            next[cell.0] = Some(towards);
            status[cell.0] = ConnectionStatus::Connected;
            edges.push(Edge::new(cell, towards));
        }
        unconnected_count -= path.len() - 1;

        debug!("committed path of {} cells from {}, {} cells left unconnected",
               path.len() - 1,
               start,
               unconnected_count);
    }

    info!("generated spanning tree over {:?} x {:?} grid, target {}, {} edges",
          dimensions.width(),
          dimensions.length(),
          target,
          edges.len());

    Ok(SpanningTree::new(*dimensions, target, edges, next))
}

/// Walk from `start` until a connected cell is reached.
///
/// The returned path starts at `start`, ends at the connected cell and holds no cell twice.
/// Every cell but the last is unconnected.
fn loop_erased_walk<R: Rng + ?Sized>(start: CellId,
                                     dimensions: &GridDimensions,
                                     status: &[ConnectionStatus],
                                     rng: &mut R,
                                     limits: &WalkLimits)
                                     -> Result<Vec<CellId>> {

    let mut path = vec![start];
    let mut positions: FnvHashMap<CellId, usize> = FnvHashMap::default();
    positions.insert(start, 0);

    let mut current = start;
    let mut came_from: Option<CellId> = None;
    let mut steps = 0;

    loop {
        if steps >= limits.max_walk_steps {
            bail!(ErrorKind::GenerationStalled(start.0, steps));
        }
        steps += 1;

        let step = random_step(current, came_from, dimensions, rng, limits.max_direction_attempts)
            .ok_or_else(|| Error::from(ErrorKind::GenerationStalled(start.0, steps)))?;
        trace!("walk from {}: {} -> {}", start, current, step);

        if status[step.0] == ConnectionStatus::Connected {
            path.push(step);
            return Ok(path);
        }

        if let Some(&loop_start) = positions.get(&step) {
            for erased in path.drain(loop_start + 1..) {
                positions.remove(&erased);
            }
        } else {
            positions.insert(step, path.len());
            path.push(step);
        }

        came_from = Some(current);
        current = step;
    }
}

/// Pick the walker's next cell.
///
/// None only when `max_attempts` draws in a row were rejected.
fn random_step<R: Rng + ?Sized>(from: CellId,
                                came_from: Option<CellId>,
                                dimensions: &GridDimensions,
                                rng: &mut R,
                                max_attempts: usize)
                                -> Option<CellId> {

    let valid = neighbours(from, dimensions);
    let dead_end = valid.len() == 1 && Some(valid[0]) == came_from;

    for _ in 0..max_attempts {
        let dir = rand_direction(rng);
        let candidate = neighbour_at_direction(from, dir, dimensions)
            .or_else(|| neighbour_at_direction(from, dir.opposite(), dimensions));

        match candidate {
            // Both ways off the grid: a one cell wide axis.
            None => continue,
            Some(cell) if Some(cell) == came_from && !dead_end => continue,
            Some(cell) => return Some(cell),
        }
    }

    None
}


#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::grid_topology::are_adjacent;
    use crate::validation::verify_spanning_tree;

    fn dims(w: usize, l: usize) -> GridDimensions {
        GridDimensions::new(Width(w), Length(l)).expect("valid dimensions")
    }

    fn seeded(seed: u64) -> XorShiftRng {
        XorShiftRng::seed_from_u64(seed)
    }

    #[test]
    fn invalid_dimensions() {
        let mut rng = seeded(1);
        let r = spanning_tree(Width(0), Length(3), &mut rng);
        assert!(matches!(r, Err(Error(ErrorKind::InvalidDimension(0, 3), _))));
        let r = spanning_tree(Width(3), Length(0), &mut rng);
        assert!(matches!(r, Err(Error(ErrorKind::InvalidDimension(3, 0), _))));
    }

    #[test]
    fn single_cell_grid() {
        let t = spanning_tree(Width(1), Length(1), &mut seeded(3)).unwrap();
        assert_eq!(t.target(), CellId(0));
        assert!(t.edges().is_empty());
        assert_eq!(t.next(CellId(0)), None);
        verify_spanning_tree(&t).unwrap();
    }

    #[test]
    fn two_by_two_grid() {
        for seed in 0..50 {
            let t = spanning_tree(Width(2), Length(2), &mut seeded(seed)).unwrap();
            assert_eq!(t.edges().len(), 3);
            verify_spanning_tree(&t).unwrap();
            for cell in t.dimensions().iter() {
                let path = t.path_to_target(cell).expect("every cell reaches the target");
                assert_eq!(*path.last().unwrap(), t.target());
            }
        }
    }

    #[test]
    fn five_by_five_grid() {
        for seed in 0..20 {
            let t = spanning_tree(Width(5), Length(5), &mut seeded(seed)).unwrap();
            assert_eq!(t.edges().len(), 24);
            assert_eq!(t.links_count(), 24);
            assert!(t.target().0 < 25);
            assert!(t.iter_edges().any(|e| e.from == t.target() || e.to == t.target()));
            verify_spanning_tree(&t).unwrap();
        }
    }

    #[test]
    fn edges_point_along_next_links() {
        let t = spanning_tree(Width(6), Length(4), &mut seeded(11)).unwrap();
        for edge in t.iter_edges() {
            assert_eq!(t.next(edge.from), Some(edge.to));
        }
        // The target is the only cell without a next link.
        let rootless = t.dimensions().iter().filter(|c| t.next(*c).is_none()).collect_vec();
        assert_eq!(rootless, vec![t.target()]);
    }

    #[test]
    fn first_edge_starts_at_the_lowest_unconnected_cell() {
        for seed in 0..20 {
            let t = spanning_tree(Width(4), Length(4), &mut seeded(seed)).unwrap();
            let expected_start = if t.target() == CellId(0) { CellId(1) } else { CellId(0) };
            assert_eq!(t.edges()[0].from, expected_start);
        }
    }

    #[test]
    fn committed_walks_chain_into_the_tree() {
        for seed in 0..30 {
            let t = spanning_tree(Width(5), Length(6), &mut seeded(seed)).unwrap();
            let edges = t.edges();
            let mut connected = vec![false; 30];
            connected[t.target().0] = true;

            let mut i = 0;
            while i < edges.len() {
                let lowest = t.dimensions().iter().find(|c| !connected[c.0]).unwrap();
                assert_eq!(edges[i].from, lowest);

                // One walk: each edge starts where the last one ended, until it joins the tree.
                let mut walk = vec![];
                loop {
                    let edge = edges[i];
                    assert!(!connected[edge.from.0]);
                    walk.push(edge.from);
                    i += 1;
                    if connected[edge.to.0] {
                        break;
                    }
                    assert_eq!(edges[i].from, edge.to, "seed {} edge {}", seed, i);
                }
                for cell in walk {
                    connected[cell.0] = true;
                }
            }
            assert!(connected.iter().all(|&c| c));
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = spanning_tree(Width(7), Length(9), &mut seeded(42)).unwrap();
        let b = spanning_tree(Width(7), Length(9), &mut seeded(42)).unwrap();
        assert_eq!(a.target(), b.target());
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn one_cell_wide_grids_terminate() {
        for seed in 0..30 {
            let row = spanning_tree(Width(1), Length(8), &mut seeded(seed)).unwrap();
            verify_spanning_tree(&row).unwrap();
            let column = spanning_tree(Width(8), Length(1), &mut seeded(seed)).unwrap();
            verify_spanning_tree(&column).unwrap();
        }
    }

    #[test]
    fn exhausted_step_limit_stalls() {
        let limits = WalkLimits {
            max_walk_steps: 0,
            ..WalkLimits::default()
        };
        let r = generate_with_limits(&dims(3, 3), &mut seeded(5), limits);
        assert!(matches!(r, Err(Error(ErrorKind::GenerationStalled(_, 0), _))));

        // Nothing to walk on a single cell, so no limit can be hit.
        let single = generate_with_limits(&dims(1, 1), &mut seeded(5), limits);
        assert!(single.is_ok());
    }

    #[test]
    fn exhausted_direction_attempts_stall() {
        let limits = WalkLimits {
            max_direction_attempts: 0,
            ..WalkLimits::default()
        };
        let r = generate_with_limits(&dims(2, 2), &mut seeded(5), limits);
        assert!(matches!(r, Err(Error(ErrorKind::GenerationStalled(_, 1), _))));
    }

    #[test]
    fn walks_are_loop_free_paths_into_the_tree() {
        let d = dims(6, 6);
        let mut rng = seeded(9);
        let mut status = vec![ConnectionStatus::Unconnected; 36];
        status[35] = ConnectionStatus::Connected;

        for _ in 0..50 {
            let path = loop_erased_walk(CellId(0), &d, &status, &mut rng, &WalkLimits::default())
                .unwrap();
            assert_eq!(path[0], CellId(0));
            assert_eq!(*path.last().unwrap(), CellId(35));
            assert_eq!(path.iter().unique().count(), path.len());
            for pair in path.windows(2) {
                assert!(are_adjacent(pair[0], pair[1], &d));
            }
        }
    }

    #[test]
    fn corner_steps_never_leave_the_grid() {
        let d = dims(3, 3);
        let mut rng = seeded(2);
        for _ in 0..200 {
            let step = random_step(CellId(0), None, &d, &mut rng, 100).unwrap();
            assert!(step == CellId(1) || step == CellId(3));
            let step = random_step(CellId(0), Some(CellId(1)), &d, &mut rng, 100).unwrap();
            assert_eq!(step, CellId(3));
        }
    }

    #[test]
    fn boundary_steps_are_pushed_inwards() {
        // Top edge cell 1 of a 3x3 grid: North is swapped for South, so the cell below it
        // gets half of all draws.
        let d = dims(3, 3);
        let mut rng = seeded(8);
        let draws = 4000;
        let inward = (0..draws).filter(|_| random_step(CellId(1), None, &d, &mut rng, 100) == Some(CellId(4)))
                               .count();
        assert!(inward > 1700 && inward < 2300, "inward steps: {}", inward);
    }

    #[test]
    fn dead_end_forces_a_step_back() {
        let d = dims(1, 3);
        let mut rng = seeded(4);
        for _ in 0..50 {
            assert_eq!(random_step(CellId(2), Some(CellId(1)), &d, &mut rng, 100), Some(CellId(1)));
            assert_eq!(random_step(CellId(1), Some(CellId(2)), &d, &mut rng, 100), Some(CellId(0)));
        }
    }

    #[test]
    fn quickcheck_random_grids_are_spanning_trees() {
        fn p(w: u8, l: u8, seed: u64) -> TestResult {
            let (w, l) = (w as usize % 12, l as usize % 12);
            if w == 0 || l == 0 {
                return TestResult::discard();
            }
            let t = match spanning_tree(Width(w), Length(l), &mut seeded(seed)) {
                Ok(t) => t,
                Err(_) => return TestResult::failed(),
            };
            TestResult::from_bool(t.edges().len() == w * l - 1 && verify_spanning_tree(&t).is_ok())
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult)
    }
}
