use std::ops::Deref;

use super::common::{Heading, Position};

/// Set of headings a cell is open towards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Connections(u8);

impl Connections {
    pub fn contains(&self, heading: Heading) -> bool {
        self.0 & heading.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Heading> + '_ {
        Heading::EXPANSION_ORDER
            .into_iter()
            .filter(|heading| self.contains(*heading))
    }

    fn insert(&mut self, heading: Heading) {
        self.0 |= heading.bit();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    connections: Connections,
    pub(crate) visited: bool,
}

impl Cell {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            connections: Connections::default(),
            visited: false,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn position(&self) -> Position {
        Position::new(self.col, self.row)
    }

    pub fn connections(&self) -> Connections {
        self.connections
    }

    pub fn is_connected(&self, heading: Heading) -> bool {
        self.connections.contains(heading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    cells: Vec<Cell>,
}
impl Deref for Row {
    type Target = Vec<Cell>;

    fn deref(&self) -> &Self::Target {
        &self.cells
    }
}

/// Rectangular grid of cells. Connections can only be added through
/// [`Grid::connect`], which keeps them symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Callers validate the dimensions; see `MazeGenerator::new`.
    pub(crate) fn new(width: usize, height: usize) -> Self {
        let rows = (0..height)
            .map(|row| Row {
                cells: (0..width).map(|col| Cell::new(row, col)).collect(),
            })
            .collect();

        Self {
            rows,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn cell_at(&self, position: &Position) -> Option<&Cell> {
        self.get_cell(position.y, position.x)
    }

    pub fn contains(&self, position: &Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|row| row.iter())
    }

    /// Number of undirected connections.
    pub fn edge_count(&self) -> usize {
        self.cells().map(|cell| cell.connections.len()).sum::<usize>() / 2
    }

    /// Neighbor of `position` towards `heading`, if it is inside the grid.
    pub fn neighbor(&self, position: &Position, heading: Heading) -> Option<Position> {
        position
            .step(heading.direction())
            .filter(|next| self.contains(next))
    }

    pub(crate) fn index(&self, position: &Position) -> usize {
        position.y * self.width + position.x
    }

    pub(crate) fn cell_mut(&mut self, position: &Position) -> Option<&mut Cell> {
        self.rows
            .get_mut(position.y)
            .and_then(|row| row.cells.get_mut(position.x))
    }

    /// Opens the wall between `from` and its neighbor towards `heading`,
    /// recording the connection on both cells. Returns the neighbor, or
    /// `None` (and changes nothing) when the neighbor is out of bounds.
    pub(crate) fn connect(&mut self, from: &Position, heading: Heading) -> Option<Position> {
        let to = self.neighbor(from, heading)?;

        self.cell_mut(from)?.connections.insert(heading);
        self.cell_mut(&to)?.connections.insert(heading.opposite());

        Some(to)
    }
}
