use std::fmt;

use fnv::FnvHashSet;

use crate::cells::CompassPrimary;
use crate::grid_topology::neighbour_at_direction;
use crate::grid_traits::GridDisplay;
use crate::spanning_tree::SpanningTree;
use crate::units::{CellId, Length, Width};


/// Marks the target cell with a `T`.
#[derive(Debug)]
pub struct TargetDisplay {
    target: CellId,
}
impl TargetDisplay {
    pub fn new(target: CellId) -> TargetDisplay {
        TargetDisplay { target: target }
    }
}
impl GridDisplay for TargetDisplay {
    fn render_cell_body(&self, cell: CellId) -> String {
        if cell == self.target {
            String::from(" T ")
        } else {
            String::from("   ")
        }
    }
}


#[derive(Debug)]
pub struct PathDisplay {
    on_path_cells: FnvHashSet<CellId>,
}
impl PathDisplay {
    pub fn new(path: &[CellId]) -> Self {
        PathDisplay { on_path_cells: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, cell: CellId) -> String {
        if self.on_path_cells.contains(&cell) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}


impl SpanningTree {
    fn is_neighbour_linked(&self, cell: CellId, direction: CompassPrimary) -> bool {
        neighbour_at_direction(cell, direction, self.dimensions())
            .map_or(false, |neighbour| self.is_linked(cell, neighbour))
    }
}

/// Walls everywhere except across tree edges.
impl fmt::Display for SpanningTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";
        let default_cell_body = String::from("   ");

        let dimensions = self.dimensions();
        let (Width(rows_count), Length(columns_count)) = (dimensions.width(), dimensions.length());
        let cell_at = |column: usize, row: usize| CellId(row * columns_count + column);

        // The north most boundary is drawn on its own, every row after draws its south side.
        let mut output = String::from(WALL_RD);
        for column in 0..columns_count {
            output.push_str(WALL_LR_3);
            let is_east_open = self.is_neighbour_linked(cell_at(column, 0), CompassPrimary::East);
            if is_east_open {
                output.push_str(WALL_LR);
            } else if column == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for row in 0..rows_count {

            let is_last_row = row == rows_count - 1;
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for column in 0..columns_count {

                let cell = cell_at(column, row);
                let is_first_column = column == 0;
                let is_last_column = column == columns_count - 1;
                let east_open = self.is_neighbour_linked(cell, CompassPrimary::East);
                let south_open = self.is_neighbour_linked(cell, CompassPrimary::South);

                if let Some(ref displayer) = *self.grid_display() {
                    row_middle_section_render.push_str(&displayer.render_cell_body(cell));
                } else {
                    row_middle_section_render.push_str(&default_cell_body);
                }
                row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east =
                            self.is_neighbour_linked(cell_at(column + 1, row), CompassPrimary::South);
                        let access_se_from_south =
                            self.is_neighbour_linked(cell_at(column, row + 1), CompassPrimary::East);
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };
                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
