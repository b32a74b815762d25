use serde_derive::{Deserialize, Serialize};

// One classified run of a stroke
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    // Index into the active language's alphabet
    pub code: u8,
    // Direction of the run in radians; 0 is to the right, PI / 2 is up
    pub direction: f32,
    // Straight-line length of the run, in pad units
    pub length: f32,
}

// Eight compass sectors, counter-clockwise from east
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    // Sector whose 45-degree wedge contains the angle
    pub fn from_angle(radians: f32) -> Direction {
        let sector = (radians / std::f32::consts::FRAC_PI_4).round() as i32;
        match sector.rem_euclid(8) {
            0 => Direction::East,
            1 => Direction::NorthEast,
            2 => Direction::North,
            3 => Direction::NorthWest,
            4 => Direction::West,
            5 => Direction::SouthWest,
            6 => Direction::South,
            _ => Direction::SouthEast,
        }
    }
}

// Latin alphabet: the direction itself, plus a dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatinCode {
    Line(Direction),
    Dot,
}

impl LatinCode {
    pub fn code(self) -> u8 {
        match self {
            LatinCode::Line(dir) => dir as u8,
            LatinCode::Dot => 8,
        }
    }
}

// Chinese alphabet: basic stroke shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeShape {
    Heng,
    Ti,
    Shu,
    Pie,
    Na,
    Gou,
    Dian,
}

impl StrokeShape {
    pub fn from_direction(dir: Direction) -> StrokeShape {
        match dir {
            Direction::East => StrokeShape::Heng,
            Direction::NorthEast => StrokeShape::Ti,
            Direction::North | Direction::NorthWest => StrokeShape::Gou,
            Direction::West | Direction::SouthWest => StrokeShape::Pie,
            Direction::South => StrokeShape::Shu,
            Direction::SouthEast => StrokeShape::Na,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}
