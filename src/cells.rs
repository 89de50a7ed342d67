use rand::Rng;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x: x, y: y }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// The four walking directions. North is up (towards row 0), East is right.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const ALL_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                 CompassPrimary::South,
                                                 CompassPrimary::West,
                                                 CompassPrimary::East];

impl CompassPrimary {
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    pub fn is_vertical(self) -> bool {
        match self {
            CompassPrimary::North | CompassPrimary::South => true,
            CompassPrimary::East | CompassPrimary::West => false,
        }
    }
}

/// Uniform pick of one of the four directions.
pub fn rand_direction<R: Rng + ?Sized>(rng: &mut R) -> CompassPrimary {
    ALL_DIRECTIONS[rng.gen_range(0..ALL_DIRECTIONS.len())]
}
