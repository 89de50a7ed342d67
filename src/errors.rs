//! Error types for the whole library, generated by `error_chain!`.
//!
//! Other modules `use crate::errors::*;` to get `Error`, `ErrorKind`, `Result`
//! and the `ResultExt::chain_err` extension.

use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        InvalidDimension(width: i64, length: i64) {
            description("grid dimensions must both be greater than zero")
            display("invalid grid dimensions: width {} length {}", width, length)
        }
        GenerationStalled(start: usize, steps: usize) {
            description("random walk exceeded its step limit")
            display("random walk from cell {} stalled after {} steps", start, steps)
        }
        InvalidTree(reason: String) {
            description("edges do not form a spanning tree of the grid")
            display("not a spanning tree: {}", reason)
        }
        ImageTooLarge(rows: usize, columns: usize) {
            description("grid is too large to render as an image")
            display("cannot render a grid of {} rows and {} columns as an image", rows, columns)
        }
    }
}
