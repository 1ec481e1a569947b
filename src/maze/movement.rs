use super::{
    common::{Direction, Position},
    grid::Grid,
};

/// Whether an actor standing on `position` may step towards `direction`.
/// The target must be inside the grid and the current cell must be open
/// on that side.
pub fn is_valid_move(position: &Position, direction: Direction, grid: &Grid) -> bool {
    let in_bounds = position
        .step(direction)
        .map_or(false, |target| grid.contains(&target));
    if !in_bounds {
        return false;
    }

    grid.cell_at(position)
        .map_or(false, |cell| cell.is_connected(direction.heading()))
}
