use tracing::{debug, info};

use super::{
    actor::Actor,
    common::{Direction, Position},
    error::MazeError,
    generator::MazeGenerator,
    grid::Grid,
    path_finder::PathFinder,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    Won,
    Lost,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Running)
    }
}

/// One level: a maze, the goal placed at its furthest cell, the player
/// and a rival that knows the way.
#[derive(Debug, Clone)]
pub struct MazeGame {
    grid: Grid,
    goal: Position,
    difficulty: usize,
    player: Actor,
    rival: Actor,
    state: GameState,
    running: bool,
}

impl MazeGame {
    pub fn new(generator: &MazeGenerator) -> Self {
        Self::from_grid(generator.generate(), Position::new(0, 0))
    }

    /// Builds a level on an existing grid with both actors on `start`.
    pub fn from_grid(grid: Grid, start: Position) -> Self {
        let goal_and_path = PathFinder::new(&grid).find_goal_and_path(start);

        info!(
            "goal at {} with difficulty {}",
            goal_and_path.goal, goal_and_path.difficulty
        );

        Self {
            goal: goal_and_path.goal,
            difficulty: goal_and_path.difficulty,
            player: Actor::player(start),
            rival: Actor::rival(start, goal_and_path.path),
            grid,
            state: GameState::Running,
            running: false,
        }
    }

    pub fn with_dimensions(width: usize, height: usize) -> Result<Self, MazeError> {
        Ok(Self::new(&MazeGenerator::new(width, height)?))
    }

    /// Arms the game. Refused once the game is over; starting a running
    /// game changes nothing.
    pub fn start(&mut self) -> bool {
        if self.state.is_over() {
            return false;
        }
        if !self.running {
            info!("game started");
            self.running = true;
        }
        true
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("game stopped");
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Input-driven step for the player. Ignored while stopped.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        if !self.running {
            return false;
        }
        self.player.move_towards(direction, &self.grid)
    }

    /// One rival cadence step. Returns whether the rival moved.
    pub fn advance_rival(&mut self) -> bool {
        if !self.running {
            return false;
        }
        match self.rival.advance(&self.grid) {
            Some(moved) => {
                debug!("rival at {}", self.rival.position());
                moved
            }
            None => false,
        }
    }

    /// Settles win/lose for the current positions. A finished game stops
    /// itself.
    pub fn update(&mut self) -> GameState {
        if !self.running || self.state.is_over() {
            return self.state;
        }

        if self.player.position() == self.goal {
            self.state = GameState::Won;
        } else if self.rival.position() == self.goal {
            self.state = GameState::Lost;
        }

        if self.state.is_over() {
            info!("game over: {:?}", self.state);
            self.running = false;
        }

        self.state
    }

    /// Rival step followed by win/lose evaluation.
    pub fn tick(&mut self) -> GameState {
        self.advance_rival();
        self.update()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn rival(&self) -> &Actor {
        &self.rival
    }

    pub fn snapshot(&self) -> MazeGameSnapshot {
        MazeGameSnapshot {
            player: self.player.position(),
            player_facing: self.player.facing(),
            rival: self.rival.position(),
            goal: self.goal,
            state: self.state,
            running: self.running,
            collision: self.player.is_colliding_with(&self.rival),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGameSnapshot {
    pub player: Position,
    pub player_facing: Direction,
    pub rival: Position,
    pub goal: Position,
    pub state: GameState,
    pub running: bool,
    pub collision: bool,
}
