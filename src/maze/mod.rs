mod actor;
mod common;
mod error;
mod game;
mod generator;
mod grid;
mod movement;
mod path_finder;

pub use actor::{Actor, ActorKind};
pub use common::{Direction, Heading, Path, Position};
pub use error::MazeError;
pub use game::{GameState, MazeGame, MazeGameSnapshot};
pub use generator::{generate, MazeGenerator};
pub use grid::{Cell, Connections, Grid};
pub use movement::is_valid_move;
pub use path_finder::{walk, FurthestCell, GoalAndPath, PathFinder};
