//! The menus are pure UI, so a single 2D camera renders everything.

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
	app.add_systems(Startup, spawn_ui_camera);
}

fn spawn_ui_camera(mut commands: Commands) {
	commands.spawn((
		Name::new("UI Camera"),
		Camera2d,
		IsDefaultUiCamera,
	));
}
