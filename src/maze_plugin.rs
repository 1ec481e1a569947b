use bevy::{
    input::{keyboard::KeyboardInput, ButtonState},
    prelude::*,
};

use crate::{
    configuration::{MazeConfiguration, RotationWindow},
    maze::{ActorKind, Direction, MazeError, MazeGame, MazeGameSnapshot},
    rotation::Turn,
};

use self::{
    events::{ActorMovedEvent, GameOverEvent, GameTick, RotationEvent},
    resources::{RivalTimerResource, RotationResource, RotationRng},
};

/// Drives a [`MazeGame`] from bevy: timers give the rival and rotation
/// cadences, keyboard input reaches the player, and everything observable
/// leaves through events and the `MazeGameSnapshot` resource.
#[derive(Clone)]
pub struct MazePlugin {
    game: MazeGame,
    configuration: MazeConfiguration,
}

impl MazePlugin {
    pub fn new(configuration: MazeConfiguration) -> Result<Self, MazeError> {
        let game = MazeGame::new(&configuration.generator()?);
        Ok(Self {
            game,
            configuration,
        })
    }

    pub fn game(&self) -> &MazeGame {
        &self.game
    }
}

impl Plugin for MazePlugin {
    fn build(&self, app: &mut App) {
        let mut game = self.game.clone();
        game.start();
        let snapshot = game.snapshot();

        let rng = self.configuration.rng();
        let rotation = RotationResource::new(self.configuration.rotation, &rng);

        app.insert_resource(snapshot)
            .insert_resource(game)
            .insert_resource(RivalTimerResource(Timer::new(
                self.configuration.rival_interval,
                true,
            )))
            .insert_resource(rotation)
            .insert_non_send_resource(RotationRng(rng))
            .add_event::<GameTick>()
            .add_event::<ActorMovedEvent>()
            .add_event::<GameOverEvent>()
            .add_event::<RotationEvent>()
            .add_system(rival_cadence.before("play"))
            .add_system(toggle_pause.label("pause"))
            .add_system(rotate_board.after("pause"))
            .add_system(change_direction.label("play").after("pause"))
            .add_system(play.label("play").after("pause"))
            .add_system(update_state.label("update").after("play"))
            .add_system(game_over.after("update"));
    }
}

/// Translates a key into the movement vocabulary. Everything that is not
/// an arrow key is rejected here and never reaches the game.
pub fn direction_from_key(key_code: KeyCode) -> Result<Direction, MazeError> {
    match key_code {
        KeyCode::Up => Ok(Direction::Up),
        KeyCode::Down => Ok(Direction::Down),
        KeyCode::Left => Ok(Direction::Left),
        KeyCode::Right => Ok(Direction::Right),
        other => Err(MazeError::InvalidDirection(format!("{:?}", other))),
    }
}

fn pressed(keyboard_input: &KeyboardInput) -> Option<KeyCode> {
    match keyboard_input.state {
        ButtonState::Pressed => keyboard_input.key_code,
        ButtonState::Released => None,
    }
}

fn rival_cadence(
    time: Res<Time>,
    mut rival_timer: ResMut<RivalTimerResource>,
    mut tick_event_writer: EventWriter<GameTick>,
) {
    let rival_timer = &mut rival_timer.0;
    if !rival_timer.tick(time.delta()).just_finished() {
        return;
    }

    debug!("tick!");

    tick_event_writer.send(GameTick);
}

fn play(
    mut tick_event: EventReader<GameTick>,
    mut game: ResMut<MazeGame>,
    mut moved_event_writer: EventWriter<ActorMovedEvent>,
) {
    for _ in tick_event.iter() {
        if game.advance_rival() {
            moved_event_writer.send(ActorMovedEvent {
                actor: ActorKind::Rival,
                position: game.rival().position(),
            });
        }
    }
}

fn change_direction(
    mut keyboard_input_events: EventReader<KeyboardInput>,
    mut game: ResMut<MazeGame>,
    mut moved_event_writer: EventWriter<ActorMovedEvent>,
) {
    for key_code in keyboard_input_events.iter().filter_map(pressed) {
        if key_code == KeyCode::Escape {
            continue;
        }

        let direction = match direction_from_key(key_code) {
            Ok(direction) => direction,
            Err(error) => {
                debug!("{}", error);
                continue;
            }
        };

        if game.move_player(direction) {
            moved_event_writer.send(ActorMovedEvent {
                actor: ActorKind::Player,
                position: game.player().position(),
            });
        }
    }
}

fn toggle_pause(
    mut keyboard_input_events: EventReader<KeyboardInput>,
    mut game: ResMut<MazeGame>,
    mut rival_timer: ResMut<RivalTimerResource>,
    mut rotation: ResMut<RotationResource>,
) {
    let toggles = keyboard_input_events
        .iter()
        .filter_map(pressed)
        .filter(|key_code| *key_code == KeyCode::Escape)
        .count();

    for _ in 0..toggles {
        if game.is_running() {
            game.stop();
            rival_timer.0.pause();
            rotation.timer.pause();
        } else if game.start() {
            rival_timer.0.reset();
            rival_timer.0.unpause();
            if rotation.window.is_some() {
                rotation.timer.unpause();
            }
        }
    }
}

fn update_state(
    mut game: ResMut<MazeGame>,
    mut snapshot: ResMut<MazeGameSnapshot>,
    mut game_over_event_writer: EventWriter<GameOverEvent>,
) {
    let was_over = game.state().is_over();
    let state = game.update();
    if !was_over && state.is_over() {
        game_over_event_writer.send(GameOverEvent { state });
    }

    let current = game.snapshot();
    if *snapshot != current {
        *snapshot = current;
    }
}

fn game_over(
    mut game_over_event_reader: EventReader<GameOverEvent>,
    mut rival_timer: ResMut<RivalTimerResource>,
    mut rotation: ResMut<RotationResource>,
) {
    if game_over_event_reader.iter().count() == 0 {
        return;
    }

    rival_timer.0.pause();
    rotation.timer.pause();
}

fn rotate_board(
    time: Res<Time>,
    rng: NonSend<RotationRng>,
    mut rotation: ResMut<RotationResource>,
    mut rotation_event_writer: EventWriter<RotationEvent>,
) {
    let window = match rotation.window {
        None => return,
        Some(window) => window,
    };
    if rotation.timer.paused() || !rotation.timer.tick(time.delta()).just_finished() {
        return;
    }

    let degrees = rotation.rotation.turn(Turn::random(&rng.0));
    rotation.timer.set_duration(window.pick(&rng.0));
    rotation.timer.reset();

    debug!("board rotated to {} degrees", degrees);

    rotation_event_writer.send(RotationEvent { degrees });
}

mod resources {
    use bevy::time::Timer;
    use fastrand::Rng;

    use super::RotationWindow;
    use crate::rotation::Rotation;

    pub struct RivalTimerResource(pub Timer);

    pub struct RotationResource {
        pub timer: Timer,
        pub window: Option<RotationWindow>,
        pub rotation: Rotation,
    }

    impl RotationResource {
        pub fn new(window: Option<RotationWindow>, rng: &Rng) -> Self {
            let timer = match window {
                Some(window) => Timer::new(window.pick(rng), false),
                None => {
                    let mut timer = Timer::default();
                    timer.pause();
                    timer
                }
            };

            Self {
                timer,
                window,
                rotation: Rotation::default(),
            }
        }
    }

    // `Rng` is not `Sync`, so it lives outside the shared resources.
    pub struct RotationRng(pub Rng);
}

pub mod events {
    use crate::maze::{ActorKind, GameState, Position};

    /// One step of the rival's cadence.
    pub struct GameTick;

    pub struct ActorMovedEvent {
        pub actor: ActorKind,
        pub position: Position,
    }

    pub struct GameOverEvent {
        pub state: GameState,
    }

    /// Cosmetic hook for the renderer; the game never reads it.
    pub struct RotationEvent {
        pub degrees: i32,
    }
}
