//! **treemaze** generates random spanning trees over rectangular grids, rooted at a random
//! target cell, and lays them out for rendering.
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand_xorshift::XorShiftRng;
//! use treemaze::{generators, layout::Layout, units::{Length, Width}};
//!
//! let mut rng = XorShiftRng::seed_from_u64(7);
//! let tree = generators::spanning_tree(Width(5), Length(5), &mut rng).unwrap();
//! assert_eq!(tree.edges().len(), 24);
//! let layout = Layout::with_default_spacing(&tree);
//! # let _ = layout;
//! ```

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_topology;
pub mod grid_traits;
pub mod layout;
pub mod pathing;
pub mod renderers;
pub mod spanning_tree;
pub mod units;
pub mod validation;
