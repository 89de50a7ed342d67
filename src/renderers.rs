use std::convert::TryFrom;
use std::path::Path;

use image::{Rgb, RgbImage};
use log::info;

use crate::errors::*;
use crate::grid_dimensions::GridDimensions;
use crate::layout::{EdgePlacement, Layout, NodePlacement, Orientation, PlacementSink};
use crate::spanning_tree::SpanningTree;
use crate::units::{Length, Width};

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const NODE_COLOUR: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const EDGE_COLOUR: Rgb<u8> = Rgb([0xc0, 0xc0, 0xc0]);
// (0.5, 0.8, 0.2) as bytes
const TARGET_COLOUR: Rgb<u8> = Rgb([0x7f, 0xcc, 0x33]);

#[derive(Debug, Clone)]
pub struct RenderOptions<'path> {
    cell_side_pixels_length: u8,
    output_file: Option<&'path Path>,
}

#[derive(Debug, Clone)]
pub struct RenderOptionsBuilder<'path> {
    options: RenderOptions<'path>,
}

impl<'path> RenderOptionsBuilder<'path> {
    pub fn new() -> RenderOptionsBuilder<'path> {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_side_pixels_length: 10,
                output_file: None,
            },
        }
    }
    pub fn cell_side_pixels_length(mut self, cell_side_pixels_length: u8) -> RenderOptionsBuilder<'path> {
        self.options.cell_side_pixels_length = cell_side_pixels_length.max(2);
        self
    }
    pub fn output_file(mut self, output_file: Option<&'path Path>) -> RenderOptionsBuilder<'path> {
        self.options.output_file = output_file;
        self
    }
    pub fn build(self) -> RenderOptions<'path> {
        self.options
    }
}

impl<'path> Default for RenderOptionsBuilder<'path> {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

/// Draws placements into an image: a square per node and a bar per edge.
///
/// One layout spacing maps to two cells worth of pixels, so the node squares leave room
/// for the edge bars between them.
pub struct ImageRenderer {
    image: RgbImage,
    cell_pixels: u32,
    spacing: f32,
}

impl ImageRenderer {
    pub fn new(dimensions: &GridDimensions, spacing: f32, cell_pixels: u8) -> Result<ImageRenderer> {
        let cell_pixels = cell_pixels as u32;
        let (image_width, image_height) = image_size(dimensions, cell_pixels)?;

        Ok(ImageRenderer {
            image: RgbImage::from_pixel(image_width, image_height, BACKGROUND),
            cell_pixels: cell_pixels,
            spacing: spacing,
        })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Pixel of the top left corner of the square centred on a layout position.
    fn to_pixels(&self, position: (f32, f32)) -> (u32, u32) {
        let scale = 2.0 * self.cell_pixels as f32 / self.spacing;
        let x = (position.0 * scale).round() as u32 + self.cell_pixels;
        let y = (position.1 * scale).round() as u32 + self.cell_pixels;
        (x, y)
    }

    fn fill_rect(&mut self, left: u32, top: u32, width: u32, height: u32, colour: Rgb<u8>) {
        let right = (left + width).min(self.image.width());
        let bottom = (top + height).min(self.image.height());
        for x in left..right {
            for y in top..bottom {
                self.image.put_pixel(x, y, colour);
            }
        }
    }
}

impl PlacementSink for ImageRenderer {
    fn place_node(&mut self, node: &NodePlacement) {
        let (x, y) = self.to_pixels(node.position);
        let colour = if node.is_target { TARGET_COLOUR } else { NODE_COLOUR };
        let side = self.cell_pixels;
        self.fill_rect(x, y, side, side, colour);
    }

    fn place_edge(&mut self, edge: &EdgePlacement) {
        let (x, y) = self.to_pixels(edge.position);
        let side = self.cell_pixels;
        let thickness = (side / 3).max(1);
        let offset = (side - thickness) / 2;
        match edge.orientation {
            Orientation::Vertical => self.fill_rect(x + offset, y, thickness, side, EDGE_COLOUR),
            Orientation::Horizontal => self.fill_rect(x, y + offset, side, thickness, EDGE_COLOUR),
        }
    }
}

/// Pixel width and height of the image for a grid.
///
/// Every cell and every gap between cells is one cell square, plus a border.
fn image_size(dimensions: &GridDimensions, cell_pixels: u32) -> Result<(u32, u32)> {
    let (Width(rows), Length(columns)) = (dimensions.width(), dimensions.length());
    let side = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|cells| cells.checked_mul(2))
            .and_then(|squares| squares.checked_add(1))
            .and_then(|squares| squares.checked_mul(cell_pixels))
    };
    match (side(columns), side(rows)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(ErrorKind::ImageTooLarge(rows, columns).into()),
    }
}

/// Render the tree's layout to an image, saving it as a PNG if an output file is set.
pub fn render_tree(tree: &SpanningTree, options: &RenderOptions) -> Result<RgbImage> {
    let layout = Layout::with_default_spacing(tree);
    let mut renderer = ImageRenderer::new(tree.dimensions(), layout.spacing(), options.cell_side_pixels_length)?;
    layout.render_to(&mut renderer);
    let image = renderer.into_image();

    if let Some(path) = options.output_file {
        image.save(path)
             .chain_err(|| format!("Failed to save maze image to {}", path.display()))?;
        info!("saved {}x{} image to {}", image.width(), image.height(), path.display());
    }

    Ok(image)
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::grid_dimensions::GridDimensions;
    use crate::spanning_tree::Edge;
    use crate::units::CellId;

    // 1 row of 2 cells, target on the right.
    fn pair_tree() -> SpanningTree {
        let dims = GridDimensions::new(Width(1), Length(2)).unwrap();
        SpanningTree::new(dims,
                          CellId(1),
                          vec![Edge::new(CellId(0), CellId(1))],
                          vec![Some(CellId(1)), None])
    }

    #[test]
    fn image_size_follows_the_grid() {
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(4).build();
        let image = render_tree(&pair_tree(), &options).unwrap();
        assert_eq!(image.dimensions(), (5 * 4, 3 * 4));
    }

    #[test]
    fn nodes_edges_and_target_are_coloured() {
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(6).build();
        let image = render_tree(&pair_tree(), &options).unwrap();

        // Border stays background.
        assert_eq!(*image.get_pixel(0, 0), BACKGROUND);
        // Node 0 occupies the square at (6, 6).
        assert_eq!(*image.get_pixel(7, 7), NODE_COLOUR);
        // The edge bar fills the gap square at (12, 6) across its middle.
        assert_eq!(*image.get_pixel(14, 8), EDGE_COLOUR);
        // Target node square at (18, 6).
        assert_eq!(*image.get_pixel(20, 8), TARGET_COLOUR);
    }

    #[test]
    fn oversized_grids_are_rejected_before_drawing() {
        // 2^31 columns need 2^32 + 1 squares across.
        let wide = GridDimensions::new(Width(1), Length(1 << 31)).unwrap();
        let r = ImageRenderer::new(&wide, 0.5, 2);
        assert!(matches!(r, Err(Error(ErrorKind::ImageTooLarge(1, c), _)) if c == 1 << 31));

        // Fits in squares, overflows once scaled to pixels.
        let tall = GridDimensions::new(Width(20_000_000), Length(1)).unwrap();
        assert!(matches!(image_size(&tall, 255), Err(Error(ErrorKind::ImageTooLarge(20_000_000, 1), _))));
        assert_eq!(image_size(&tall, 1).unwrap(), (3, 40_000_001));
    }
}
