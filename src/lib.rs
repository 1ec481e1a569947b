use bevy::prelude::*;
use configuration::MazeConfiguration;
use maze::{GameState, MazeError};
use maze_plugin::{
    events::{GameOverEvent, RotationEvent},
    MazePlugin,
};
use tracing_log::LogTracer;
use tracing_subscriber::{prelude::*, registry::Registry, EnvFilter};

pub mod configuration;
pub mod maze;
pub mod maze_plugin;
pub mod rotation;

#[derive(Clone)]
pub struct MainPlugin {
    maze: MazePlugin,
}

impl MainPlugin {
    pub fn new(configuration: MazeConfiguration) -> Result<Self, MazeError> {
        Ok(Self {
            maze: MazePlugin::new(configuration)?,
        })
    }
}

impl Plugin for MainPlugin {
    fn build(&self, app: &mut App) {
        let game = self.maze.game();
        info!(
            "{}x{} maze, goal at {} ({} steps away)",
            game.grid().width(),
            game.grid().height(),
            game.goal(),
            game.difficulty()
        );

        app.add_plugin(self.maze.clone())
            .add_system(show_game_over)
            .add_system(show_rotation);
    }
}

fn show_game_over(mut game_over_event_reader: EventReader<GameOverEvent>) {
    for event in game_over_event_reader.iter() {
        match event.state {
            GameState::Won => info!("You win!"),
            GameState::Lost => warn!("Game over! The rival got there first"),
            GameState::Running => {}
        }
    }
}

fn show_rotation(mut rotation_event_reader: EventReader<RotationEvent>) {
    for event in rotation_event_reader.iter() {
        debug!("rotate board to {}deg", event.degrees);
    }
}

/// Routes `log` records and `tracing` events to stdout, filtered by
/// `RUST_LOG` or `default_filter` when it is unset. Safe to call twice.
pub fn init_logging(default_filter: &str) {
    if LogTracer::init().is_err() {
        return;
    }

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::Layer::default());

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a global tracing subscriber is already installed");
    }
}
