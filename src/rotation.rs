use fastrand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    pub fn random(rng: &Rng) -> Self {
        if rng.bool() {
            Turn::Left
        } else {
            Turn::Right
        }
    }
}

/// Cosmetic board angle, in degrees. Gameplay never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rotation {
    degrees: i32,
}

impl Rotation {
    pub fn degrees(&self) -> i32 {
        self.degrees
    }

    /// Quarter turn; the angle stays within `0..360`.
    pub fn turn(&mut self, turn: Turn) -> i32 {
        let step = match turn {
            Turn::Left => -90,
            Turn::Right => 90,
        };
        self.degrees = (self.degrees + step).rem_euclid(360);
        self.degrees
    }
}
