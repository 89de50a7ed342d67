use docopt::Docopt;
use log::info;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path,
    rc::Rc
};
use treemaze::{
    generators::{self, WalkLimits},
    grid_dimensions::GridDimensions,
    grid_displays::TargetDisplay,
    grid_traits::GridDisplay,
    pathing,
    renderers,
    spanning_tree::SpanningTree,
    validation,
};

const USAGE: &str = "Tree Maze

Usage:
    treemaze_driver -h | --help
    treemaze_driver [--width=<w>] [--length=<l>] [--seed=<s>] [--max-walk-steps=<n>] [--show-distances] [--text-out=<path>] [--save-edges=<path>] [--image-out=<path>] [--cell-pixels=<n>] [--verify] [--quiet]

Options:
    -h --help              Show this screen.
    --width=<w>            Number of rows in the grid [default: 5].
    --length=<l>           Number of cells in each row [default: 5].
    --seed=<s>             Seed for a reproducible tree. A random seed is used if not given.
    --max-walk-steps=<n>   Steps one random walk may take before generation gives up [default: 1000000].
    --show-distances       Show the distance from the target to every cell instead of marking the target.
    --text-out=<path>      Output file path for a textual rendering of the tree.
    --save-edges=<path>    Serialize the tree to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --image-out=<path>     Output file path for a PNG rendering of the tree.
    --cell-pixels=<n>      Pixel count for one cell side in the image [default: 10] max 255.
    --verify               Check the generated edges form a spanning tree of the grid.
    --quiet                Do not print the text rendering to stdout.
";
#[derive(Debug, Deserialize)]
struct TreeArgs {
    flag_width: i64,
    flag_length: i64,
    flag_seed: Option<u64>,
    flag_max_walk_steps: usize,
    flag_show_distances: bool,
    flag_text_out: String,
    flag_save_edges: String,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_verify: bool,
    flag_quiet: bool,
}

// `error_chain!` creates the Error, ErrorKind, ResultExt and Result types for the driver.
// The library's own errors are linked in so `?` works on both.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Tree(::treemaze::errors::Error, ::treemaze::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() {

    env_logger::init();

    let args: TreeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if let Err(ref e) = run(&args) {
        eprint!("{}", error_report(e));
        ::std::process::exit(1);
    }
}

/// The error and each of its causes, one per line.
fn error_report(e: &Error) -> String {
    let mut report = String::new();
    for (i, link) in e.iter().enumerate() {
        let prefix = if i == 0 { "error" } else { "caused by" };
        report.push_str(&format!("{}: {}\n", prefix, link));
    }
    report
}

fn run(args: &TreeArgs) -> Result<()> {

    let dimensions = GridDimensions::from_signed(args.flag_width, args.flag_length)?;
    let seed = args.flag_seed.unwrap_or_else(rand::random);
    info!("generating with seed {}", seed);

    let mut rng = XorShiftRng::seed_from_u64(seed);
    let limits = WalkLimits {
        max_walk_steps: args.flag_max_walk_steps,
        ..WalkLimits::default()
    };
    let mut tree = generators::generate_with_limits(&dimensions, &mut rng, limits)?;

    if args.flag_verify {
        validation::verify_spanning_tree(&tree)?;
        info!("verified spanning tree of {} edges", tree.edges().len());
    }

    if !args.flag_save_edges.is_empty() {
        save_tree_graph(&tree, &args.flag_save_edges)?;
    }

    set_tree_griddisplay(&mut tree, args);
    if !args.flag_text_out.is_empty() {
        write_text_to_file(&format!("{}", tree), &args.flag_text_out)
            .chain_err(|| format!("Failed to write tree to text file {}", args.flag_text_out))?;
    }
    if !args.flag_quiet {
        println!("{}", tree);
        println!("target: {} seed: {}", tree.target(), seed);
    }

    if !args.flag_image_out.is_empty() {
        let render_options = renderers::RenderOptionsBuilder::new()
            .cell_side_pixels_length(args.flag_cell_pixels)
            .output_file(Some(Path::new(&args.flag_image_out)))
            .build();
        renderers::render_tree(&tree, &render_options)?;
    }

    Ok(())
}

fn set_tree_griddisplay(tree: &mut SpanningTree, tree_args: &TreeArgs) {
    let display: Rc<dyn GridDisplay> = if tree_args.flag_show_distances {
        Rc::new(pathing::Distances::from_target(tree))
    } else {
        Rc::new(TargetDisplay::new(tree.target()))
    };
    tree.set_grid_display(Some(display));
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_tree_graph(tree: &SpanningTree, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", tree.size(), tree.edges().len()));

    for edge in tree.iter_edges() {
        let src_as_1_based_index = edge.from.0 + 1;
        let dst_as_1_based_index = edge.to.0 + 1;
        graph_data.push_str(&format!("{} {}\n", src_as_1_based_index, dst_as_1_based_index));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write tree graph to text file {}", file_path))?;

    Ok(())
}
