use std::{str::FromStr, time::Duration};

use fastrand::Rng;

use crate::maze::{MazeError, MazeGenerator};

/// Range the rotation timer is re-armed within after each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationWindow {
    pub min: Duration,
    pub max: Duration,
}

impl RotationWindow {
    pub fn pick(&self, rng: &Rng) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rng.u64(min..=max))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfiguration {
    pub width: usize,
    pub height: usize,
    pub rival_interval: Duration,
    pub rotation: Option<RotationWindow>,
    pub seed: Option<u64>,
}

impl Default for MazeConfiguration {
    fn default() -> Self {
        Self {
            width: 7,
            height: 7,
            rival_interval: Duration::from_millis(800),
            rotation: Some(RotationWindow {
                min: Duration::from_millis(2500),
                max: Duration::from_millis(5000),
            }),
            seed: None,
        }
    }
}

impl MazeConfiguration {
    pub fn generator(&self) -> Result<MazeGenerator, MazeError> {
        match self.seed {
            Some(seed) => MazeGenerator::with_seed(self.width, self.height, seed),
            None => MazeGenerator::new(self.width, self.height),
        }
    }

    /// Random source for everything that is not the maze itself. Derived
    /// from the seed so a seeded configuration replays identically.
    pub fn rng(&self) -> Rng {
        match self.seed {
            Some(seed) => Rng::with_seed(seed.wrapping_add(1)),
            None => Rng::new(),
        }
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration, MazeError> {
    let millis: u64 = value
        .trim()
        .parse()
        .map_err(|_| MazeError::Configuration(format!("{} expects milliseconds, got {:?}", key, value)))?;
    if millis == 0 {
        return Err(MazeError::Configuration(format!("{} must be positive", key)));
    }
    Ok(Duration::from_millis(millis))
}

fn parse_rotation(value: &str) -> Result<Option<RotationWindow>, MazeError> {
    if value.trim() == "off" {
        return Ok(None);
    }

    let (min, max) = value
        .split_once("..")
        .ok_or_else(|| MazeError::Configuration(format!("rotation expects min..max, got {:?}", value)))?;
    let window = RotationWindow {
        min: parse_millis("rotation", min)?,
        max: parse_millis("rotation", max)?,
    };
    if window.min > window.max {
        return Err(MazeError::Configuration(format!(
            "rotation window {:?} is reversed",
            value
        )));
    }

    Ok(Some(window))
}

impl FromStr for MazeConfiguration {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'));

        let dimension = lines
            .next()
            .ok_or_else(|| MazeError::Configuration("missing dimensions".to_string()))?;
        let (w, h) = dimension
            .split_once(',')
            .ok_or_else(|| MazeError::Configuration(format!("expected width,height, got {:?}", dimension)))?;
        let parse_dimension = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|_| MazeError::Configuration(format!("invalid dimension {:?}", v)))
        };

        let mut configuration = MazeConfiguration {
            width: parse_dimension(w)?,
            height: parse_dimension(h)?,
            ..Default::default()
        };
        if configuration.width == 0 || configuration.height == 0 {
            return Err(MazeError::InvalidDimensions {
                width: configuration.width,
                height: configuration.height,
            });
        }

        for line in lines {
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| MazeError::Configuration(format!("expected key=value, got {:?}", line)))?;
            match key.trim() {
                "rival" => configuration.rival_interval = parse_millis("rival", value)?,
                "rotation" => configuration.rotation = parse_rotation(value)?,
                "seed" => {
                    configuration.seed = Some(value.trim().parse().map_err(|_| {
                        MazeError::Configuration(format!("invalid seed {:?}", value))
                    })?)
                }
                other => {
                    return Err(MazeError::Configuration(format!("unknown key {:?}", other)));
                }
            }
        }

        Ok(configuration)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{MazeConfiguration, RotationWindow};
    use crate::maze::MazeError;

    #[test]
    fn test_parse_level_file() {
        let configuration: MazeConfiguration = include_str!("../levels/1.level").parse().unwrap();

        assert_eq!(configuration.width, 7);
        assert_eq!(configuration.height, 7);
        assert_eq!(configuration.rival_interval, Duration::from_millis(800));
        assert_eq!(configuration.seed, None);
    }

    #[test]
    fn test_parse_all_keys() {
        let s = r#"
# comment
12, 9
rival=250
rotation=off
seed=42"#;
        let configuration: MazeConfiguration = s.parse().unwrap();

        assert_eq!(
            configuration,
            MazeConfiguration {
                width: 12,
                height: 9,
                rival_interval: Duration::from_millis(250),
                rotation: None,
                seed: Some(42),
            }
        );
    }

    #[test]
    fn test_reject_zero_dimensions() {
        assert_eq!(
            "0,4".parse::<MazeConfiguration>(),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn test_reject_malformed_lines() {
        for s in [
            "",
            "seven,7",
            "7x7",
            "7,7\nspeed=3",
            "7,7\nrival=fast",
            "7,7\nrival=0",
            "7,7\nrotation=500",
            "7,7\nrotation=900..100",
            "7,7\nseed=-1",
        ] {
            assert!(
                matches!(s.parse::<MazeConfiguration>(), Err(MazeError::Configuration(_))),
                "{:?} should be rejected",
                s
            );
        }
    }

    #[test]
    fn test_rotation_window_pick_stays_in_range() {
        let window = RotationWindow {
            min: Duration::from_millis(2500),
            max: Duration::from_millis(5000),
        };
        let rng = fastrand::Rng::with_seed(3);

        for _ in 0..32 {
            let picked = window.pick(&rng);
            assert!(picked >= window.min && picked <= window.max);
        }
    }
}
