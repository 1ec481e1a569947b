use tracing::debug;

use super::{
    common::{Direction, Path, Position},
    grid::Grid,
    movement::is_valid_move,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Rival,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Control {
    Input,
    Script { path: Path, cursor: usize },
}

/// An entity on the grid. Player and rival differ only in where their
/// directions come from; both go through the same validated step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    kind: ActorKind,
    position: Position,
    facing: Direction,
    control: Control,
}

impl Actor {
    pub fn player(position: Position) -> Self {
        Self {
            kind: ActorKind::Player,
            position,
            facing: Direction::Down,
            control: Control::Input,
        }
    }

    pub fn rival(position: Position, path: Path) -> Self {
        Self {
            kind: ActorKind::Rival,
            position,
            facing: Direction::Down,
            control: Control::Script { path, cursor: 0 },
        }
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Last requested direction, blocked or not.
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Steps towards `direction` if the grid allows it. A blocked move
    /// leaves the position untouched and returns `false`.
    pub fn move_towards(&mut self, direction: Direction, grid: &Grid) -> bool {
        self.facing = direction;

        if !is_valid_move(&self.position, direction, grid) {
            debug!("{:?} blocked at {} going {:?}", self.kind, self.position, direction);
            return false;
        }

        match self.position.step(direction) {
            Some(next) => {
                self.position = next;
                true
            }
            None => false,
        }
    }

    /// Feeds the next scripted direction into [`Actor::move_towards`].
    /// Returns `None` once the script is exhausted, and always for the
    /// player.
    pub fn advance(&mut self, grid: &Grid) -> Option<bool> {
        let direction = match &mut self.control {
            Control::Input => return None,
            Control::Script { path, cursor } => {
                let direction = *path.get(*cursor)?;
                *cursor += 1;
                direction
            }
        };

        Some(self.move_towards(direction, grid))
    }

    pub fn remaining_steps(&self) -> usize {
        match &self.control {
            Control::Input => 0,
            Control::Script { path, cursor } => path.len().saturating_sub(*cursor),
        }
    }

    pub fn is_colliding_with(&self, other: &Actor) -> bool {
        self.position == other.position
    }
}
