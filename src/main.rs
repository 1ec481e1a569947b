use std::time::Duration;

use bevy::{
    app::{AppExit, ScheduleRunnerSettings},
    input::InputPlugin,
    prelude::*,
};

use bevy_maze::{
    configuration::MazeConfiguration, init_logging, maze_plugin::events::GameOverEvent, MainPlugin,
};

fn main() {
    init_logging("OFF,bevy_maze=INFO");

    let main_plugin = match include_str!("../levels/1.level")
        .parse::<MazeConfiguration>()
        .and_then(MainPlugin::new)
    {
        Ok(main_plugin) => main_plugin,
        Err(error) => {
            error!("cannot set up the level: {}", error);
            std::process::exit(1);
        }
    };

    App::new()
        .insert_resource(ScheduleRunnerSettings::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .add_plugins(MinimalPlugins)
        .add_plugin(InputPlugin::default())
        .add_plugin(main_plugin)
        .add_system(exit_on_game_over)
        .run();
}

fn exit_on_game_over(
    mut game_over_event_reader: EventReader<GameOverEvent>,
    mut app_exit_event_writer: EventWriter<AppExit>,
) {
    if game_over_event_reader.iter().count() == 0 {
        return;
    }

    app_exit_event_writer.send(AppExit);
}
