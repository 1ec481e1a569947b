use std::fmt;

/// A cell coordinate: `x` is the column, `y` is the row.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The adjacent coordinate in `direction`, or `None` when it would
    /// leave the non-negative quadrant. Upper bounds are the grid's concern.
    pub fn step(&self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Up => self.y.checked_sub(1).map(|y| Position::new(self.x, y)),
            Direction::Down => Some(Position::new(self.x, self.y + 1)),
            Direction::Left => self.x.checked_sub(1).map(|x| Position::new(x, self.y)),
            Direction::Right => Some(Position::new(self.x + 1, self.y)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Actor-facing movement vocabulary.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn heading(&self) -> Heading {
        match self {
            Direction::Up => Heading::North,
            Direction::Down => Heading::South,
            Direction::Left => Heading::West,
            Direction::Right => Heading::East,
        }
    }
}

/// Grid-facing vocabulary used for connections between cells.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    /// Breadth-first expansion order. Changing it changes which of two
    /// equally short paths is returned.
    pub const EXPANSION_ORDER: [Heading; 4] =
        [Heading::North, Heading::South, Heading::East, Heading::West];

    pub fn opposite(&self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::South => Heading::North,
            Heading::East => Heading::West,
            Heading::West => Heading::East,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Heading::North => Direction::Up,
            Heading::South => Direction::Down,
            Heading::East => Direction::Right,
            Heading::West => Direction::Left,
        }
    }

    pub(crate) fn bit(&self) -> u8 {
        match self {
            Heading::North => 0b0001,
            Heading::South => 0b0010,
            Heading::East => 0b0100,
            Heading::West => 0b1000,
        }
    }
}

/// An ordered walk through existing connections.
pub type Path = Vec<Direction>;
