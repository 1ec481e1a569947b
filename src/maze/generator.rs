use fastrand::Rng;
use tracing::{debug, info};

use super::{
    common::{Heading, Position},
    error::MazeError,
    grid::Grid,
};

// Order in which candidate neighbors are listed before the random pick.
const WALK_ORDER: [Heading; 4] = [Heading::North, Heading::South, Heading::West, Heading::East];

/// Builds perfect mazes with a random walk: the walker wanders between
/// neighboring cells and opens a wall only when it steps onto a cell it has
/// never visited, so every connection joins a new cell to the tree.
pub struct MazeGenerator {
    width: usize,
    height: usize,
    rng: Rng,
}

impl MazeGenerator {
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        Self::with_rng(width, height, Rng::new())
    }

    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self, MazeError> {
        Self::with_rng(width, height, Rng::with_seed(seed))
    }

    pub fn with_rng(width: usize, height: usize, rng: Rng) -> Result<Self, MazeError> {
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(MazeError::InvalidDimensions { width, height });
        }

        Ok(Self { width, height, rng })
    }

    pub fn generate(&self) -> Grid {
        let mut grid = Grid::new(self.width, self.height);

        let mut current = Position::new(0, 0);
        if let Some(cell) = grid.cell_mut(&current) {
            cell.visited = true;
        }
        let mut remaining = self.width * self.height - 1;
        let mut steps = 0usize;

        let mut candidates = Vec::with_capacity(WALK_ORDER.len());
        while remaining > 0 {
            candidates.clear();
            candidates.extend(
                WALK_ORDER
                    .into_iter()
                    .filter_map(|heading| grid.neighbor(&current, heading).map(|p| (heading, p))),
            );

            // Only a 1x1 grid has no neighbors, and it never enters the loop.
            if candidates.is_empty() {
                break;
            }

            let (heading, next) = candidates[self.rng.usize(0..candidates.len())];
            steps += 1;

            let unvisited = grid.cell_at(&next).map_or(false, |cell| !cell.visited);
            if unvisited {
                grid.connect(&current, heading);
                if let Some(cell) = grid.cell_mut(&next) {
                    cell.visited = true;
                }
                remaining -= 1;
                debug!("opened {:?} from {} to {}", heading, current, next);
            }

            current = next;
        }

        info!(
            "generated {}x{} maze with {} connections in {} steps",
            self.width,
            self.height,
            grid.edge_count(),
            steps
        );

        grid
    }
}

/// Generates a maze with an unseeded random source.
pub fn generate(width: usize, height: usize) -> Result<Grid, MazeError> {
    Ok(MazeGenerator::new(width, height)?.generate())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::{generate, MazeGenerator};
    use crate::maze::{Grid, Heading, MazeError, Position};

    fn reachable_count(grid: &Grid) -> usize {
        let mut seen = vec![false; grid.width() * grid.height()];
        let mut queue = VecDeque::from([Position::new(0, 0)]);
        seen[0] = true;
        let mut count = 1;

        while let Some(position) = queue.pop_front() {
            let cell = grid.cell_at(&position).unwrap();
            for heading in cell.connections().iter() {
                let next = grid.neighbor(&position, heading).unwrap();
                let index = next.y * grid.width() + next.x;
                if !seen[index] {
                    seen[index] = true;
                    count += 1;
                    queue.push_back(next);
                }
            }
        }

        count
    }

    #[test]
    fn test_generated_maze_is_a_spanning_tree() {
        for (seed, (width, height)) in [(1, 7), (7, 1), (2, 2), (7, 7), (13, 5), (20, 20)]
            .into_iter()
            .enumerate()
        {
            let grid = MazeGenerator::with_seed(width, height, seed as u64)
                .unwrap()
                .generate();

            assert_eq!(grid.edge_count(), width * height - 1);
            assert_eq!(reachable_count(&grid), width * height);
        }
    }

    #[test]
    fn test_connections_are_symmetric() {
        let grid = MazeGenerator::with_seed(9, 6, 42).unwrap().generate();

        for cell in grid.cells() {
            let position = cell.position();
            for heading in Heading::EXPANSION_ORDER {
                match grid.neighbor(&position, heading) {
                    Some(next) => assert_eq!(
                        cell.is_connected(heading),
                        grid.cell_at(&next).unwrap().is_connected(heading.opposite()),
                        "asymmetric connection between {} and {}",
                        position,
                        next
                    ),
                    None => assert!(!cell.is_connected(heading)),
                }
            }
        }
    }

    #[test]
    fn test_single_cell_maze_has_no_connections() {
        let grid = generate(1, 1).unwrap();

        assert_eq!(grid.edge_count(), 0);
        assert!(grid.get_cell(0, 0).unwrap().connections().is_empty());
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = MazeGenerator::with_seed(8, 8, 1234).unwrap().generate();
        let b = MazeGenerator::with_seed(8, 8, 1234).unwrap().generate();

        assert_eq!(a, b);
    }

    #[test]
    fn test_reject_empty_dimensions() {
        assert_eq!(
            generate(0, 5).err(),
            Some(MazeError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(MazeGenerator::new(5, 0).is_err());
        assert!(MazeGenerator::new(usize::MAX, 2).is_err());
    }
}
