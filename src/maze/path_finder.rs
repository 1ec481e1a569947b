use std::collections::VecDeque;

use tracing::debug;

use super::{
    common::{Direction, Heading, Path, Position},
    grid::Grid,
    movement::is_valid_move,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurthestCell {
    pub position: Position,
    pub distance: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalAndPath {
    pub goal: Position,
    pub path: Path,
    pub difficulty: usize,
}

/// Breadth-first queries over the connection graph of a generated grid.
pub struct PathFinder<'a> {
    grid: &'a Grid,
}

impl<'a> PathFinder<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Shortest walk from `start` to `end` through open connections.
    /// Returns an empty path when `end` cannot be reached, or when either
    /// endpoint lies outside the grid.
    pub fn find_path(&self, start: Position, end: Position) -> Path {
        if !self.grid.contains(&start) || !self.grid.contains(&end) {
            return Path::new();
        }

        // Direction taken to discover each cell, indexed by `Grid::index`.
        let mut came_by: Vec<Option<Direction>> = vec![None; self.cell_count()];
        let mut visited = vec![false; self.cell_count()];
        visited[self.grid.index(&start)] = true;

        let mut queue = VecDeque::from([start]);
        let mut found = start == end;
        while let Some(position) = queue.pop_front() {
            if found {
                break;
            }
            for (heading, next) in self.open_neighbors(&position) {
                let index = self.grid.index(&next);
                if visited[index] {
                    continue;
                }
                visited[index] = true;
                came_by[index] = Some(heading.direction());
                if next == end {
                    found = true;
                    break;
                }
                queue.push_back(next);
            }
        }

        if !found {
            debug!("no path from {} to {}", start, end);
            return Path::new();
        }

        let mut path = Path::new();
        let mut position = end;
        while let Some(direction) = came_by[self.grid.index(&position)] {
            path.push(direction);
            // Walk back against the direction that discovered this cell.
            match position.step(direction.heading().opposite().direction()) {
                Some(previous) => position = previous,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// The reachable cell with the greatest hop distance from `start`. Ties
    /// go to the first cell discovered at that distance.
    pub fn find_furthest_cell(&self, start: Position) -> FurthestCell {
        let mut furthest = FurthestCell {
            position: start,
            distance: 0,
        };
        if !self.grid.contains(&start) {
            return furthest;
        }

        let mut distances: Vec<Option<usize>> = vec![None; self.cell_count()];
        distances[self.grid.index(&start)] = Some(0);

        let mut queue = VecDeque::from([(start, 0usize)]);
        while let Some((position, distance)) = queue.pop_front() {
            if distance > furthest.distance {
                furthest = FurthestCell { position, distance };
            }
            for (_, next) in self.open_neighbors(&position) {
                let index = self.grid.index(&next);
                if distances[index].is_none() {
                    distances[index] = Some(distance + 1);
                    queue.push_back((next, distance + 1));
                }
            }
        }

        furthest
    }

    /// Places the goal at the furthest cell from `start` and returns the
    /// route to it. `difficulty` is the hop distance to the goal.
    pub fn find_goal_and_path(&self, start: Position) -> GoalAndPath {
        let furthest = self.find_furthest_cell(start);
        let path = self.find_path(start, furthest.position);

        GoalAndPath {
            goal: furthest.position,
            path,
            difficulty: furthest.distance,
        }
    }

    fn open_neighbors(&self, position: &Position) -> Vec<(Heading, Position)> {
        let Some(cell) = self.grid.cell_at(position) else {
            return vec![];
        };

        cell.connections()
            .iter()
            .filter_map(|heading| {
                self.grid
                    .neighbor(position, heading)
                    .map(|next| (heading, next))
            })
            .collect()
    }

    fn cell_count(&self) -> usize {
        self.grid.width() * self.grid.height()
    }
}

/// Replays `path` from `start`, refusing any step through a wall. Returns
/// where the walk ends, or `None` at the first blocked step.
pub fn walk(grid: &Grid, start: Position, path: &[Direction]) -> Option<Position> {
    path.iter().try_fold(start, |position, direction| {
        if is_valid_move(&position, *direction, grid) {
            position.step(*direction)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::{walk, PathFinder};
    use crate::maze::{Direction, Grid, Heading, MazeGenerator, Position};

    /// 3x2 grid forming a single chain:
    ///
    /// ```text
    /// (0,0) - (1,0) - (2,0)
    ///   |               |
    /// (0,1)   (1,1) - (2,1)
    /// ```
    fn hand_built() -> Grid {
        let mut grid = Grid::new(3, 2);
        grid.connect(&Position::new(0, 0), Heading::East);
        grid.connect(&Position::new(1, 0), Heading::East);
        grid.connect(&Position::new(0, 0), Heading::South);
        grid.connect(&Position::new(2, 0), Heading::South);
        grid.connect(&Position::new(2, 1), Heading::West);
        grid
    }

    #[test]
    fn test_path_to_self_is_empty() {
        let grid = MazeGenerator::with_seed(5, 5, 3).unwrap().generate();
        let finder = PathFinder::new(&grid);

        for cell in grid.cells() {
            assert!(finder.find_path(cell.position(), cell.position()).is_empty());
        }
    }

    #[test]
    fn test_path_follows_connections() {
        let grid = hand_built();
        let finder = PathFinder::new(&grid);

        let path = finder.find_path(Position::new(0, 1), Position::new(1, 1));
        assert_eq!(
            path,
            vec![
                Direction::Up,
                Direction::Right,
                Direction::Right,
                Direction::Down,
                Direction::Left
            ]
        );
    }

    #[test]
    fn test_unreachable_target_gives_empty_path() {
        let mut grid = Grid::new(2, 1);
        let finder = PathFinder::new(&grid);
        assert!(finder
            .find_path(Position::new(0, 0), Position::new(1, 0))
            .is_empty());

        grid.connect(&Position::new(0, 0), Heading::East);
        let finder = PathFinder::new(&grid);
        assert!(finder
            .find_path(Position::new(0, 0), Position::new(5, 0))
            .is_empty());
    }

    fn hop_distances(grid: &Grid, start: Position) -> Vec<Option<usize>> {
        let mut distances = vec![None; grid.width() * grid.height()];
        distances[start.y * grid.width() + start.x] = Some(0);
        let mut queue = VecDeque::from([start]);

        while let Some(position) = queue.pop_front() {
            let distance = distances[position.y * grid.width() + position.x].unwrap();
            for heading in grid.cell_at(&position).unwrap().connections().iter() {
                let next = grid.neighbor(&position, heading).unwrap();
                let slot = &mut distances[next.y * grid.width() + next.x];
                if slot.is_none() {
                    *slot = Some(distance + 1);
                    queue.push_back(next);
                }
            }
        }

        distances
    }

    #[test]
    fn test_replayed_path_lands_on_target_with_bfs_length() {
        let grid = MazeGenerator::with_seed(6, 4, 77).unwrap().generate();
        let finder = PathFinder::new(&grid);
        let start = Position::new(2, 1);
        let distances = hop_distances(&grid, start);

        for cell in grid.cells() {
            let end = cell.position();
            let path = finder.find_path(start, end);

            assert_eq!(walk(&grid, start, &path), Some(end));
            assert_eq!(Some(path.len()), distances[end.y * grid.width() + end.x]);
        }
    }

    #[test]
    fn test_equal_paths_prefer_south_before_east() {
        let mut grid = Grid::new(2, 2);
        grid.connect(&Position::new(0, 0), Heading::East);
        grid.connect(&Position::new(0, 0), Heading::South);
        grid.connect(&Position::new(1, 0), Heading::South);
        grid.connect(&Position::new(0, 1), Heading::East);
        let finder = PathFinder::new(&grid);

        assert_eq!(
            finder.find_path(Position::new(0, 0), Position::new(1, 1)),
            vec![Direction::Down, Direction::Right]
        );
    }

    #[test]
    fn test_furthest_cell_is_maximal() {
        let grid = MazeGenerator::with_seed(7, 7, 99).unwrap().generate();
        let finder = PathFinder::new(&grid);
        let start = Position::new(0, 0);

        let furthest = finder.find_furthest_cell(start);
        let max = hop_distances(&grid, start)
            .into_iter()
            .flatten()
            .max()
            .unwrap();

        assert_eq!(furthest.distance, max);
        assert_eq!(
            finder.find_path(start, furthest.position).len(),
            furthest.distance
        );
    }

    #[test]
    fn test_furthest_cell_tie_breaks_on_expansion_order() {
        let mut grid = Grid::new(3, 1);
        grid.connect(&Position::new(1, 0), Heading::West);
        grid.connect(&Position::new(1, 0), Heading::East);
        let finder = PathFinder::new(&grid);

        let furthest = finder.find_furthest_cell(Position::new(1, 0));
        assert_eq!(furthest.distance, 1);
        assert_eq!(furthest.position, Position::new(2, 0));
    }

    #[test]
    fn test_furthest_cell_on_chain() {
        let grid = hand_built();
        let finder = PathFinder::new(&grid);

        let furthest = finder.find_furthest_cell(Position::new(1, 0));
        assert_eq!(furthest.distance, 3);
        assert_eq!(furthest.position, Position::new(1, 1));
    }

    #[test]
    fn test_single_cell_furthest_is_start() {
        let grid = MazeGenerator::with_seed(1, 1, 0).unwrap().generate();
        let finder = PathFinder::new(&grid);

        let furthest = finder.find_furthest_cell(Position::new(0, 0));
        assert_eq!(furthest.position, Position::new(0, 0));
        assert_eq!(furthest.distance, 0);
    }

    #[test]
    fn test_goal_and_path_on_seeded_7x7() {
        let grid = MazeGenerator::with_seed(7, 7, 2024).unwrap().generate();
        let finder = PathFinder::new(&grid);
        let start = Position::new(0, 0);

        let result = finder.find_goal_and_path(start);

        assert!(!result.path.is_empty());
        assert_ne!(result.goal, start);
        assert_eq!(result.difficulty, result.path.len());
        assert_eq!(walk(&grid, start, &result.path), Some(result.goal));
    }

    #[test]
    fn test_walk_stops_at_wall() {
        let grid = hand_built();

        assert_eq!(
            walk(&grid, Position::new(0, 1), &[Direction::Right]),
            None
        );
        assert_eq!(
            walk(&grid, Position::new(0, 1), &[Direction::Up, Direction::Right]),
            Some(Position::new(1, 0))
        );
    }
}
