// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

mod asset_tracking;
mod audio;
#[cfg(feature = "dev")]
mod dev_tools;
mod font;
mod localization;
mod screens;
mod settings;
#[cfg(test)]
mod testing;
mod theme;
mod timer;
mod ui_camera;
mod volume;

use bevy::{asset::AssetMetaCheck, prelude::*};
use bevy_seedling::prelude::*;

fn main() -> AppExit {
	App::new().add_plugins(AppPlugin).run()
}

pub struct AppPlugin;

impl Plugin for AppPlugin {
	fn build(&self, app: &mut App) {
		app.add_plugins(
			DefaultPlugins
				.set(AssetPlugin {
					// Wasm builds will check for meta files (that don't exist) if this isn't set.
					// This causes errors and even panics on web build on itch.
					// See https://github.com/bevyengine/bevy_github_ci_template/issues/48.
					meta_check: AssetMetaCheck::Never,
					..default()
				})
				.set(WindowPlugin {
					primary_window: Window {
						title: "Luminary Soccer".to_string(),
						fit_canvas_to_parent: true,
						..default()
					}
					.into(),
					..default()
				}),
		);
		app.add_plugins(SeedlingPlugin::default());

		configure_app_systems(app);

		// Core plugins first: the screens depend on settings, text and sound
		// handles being in place when the first screen is entered.
		app.add_plugins((
			asset_tracking::plugin,
			font::plugin,
			localization::plugin,
			settings::plugin,
			audio::plugin,
			audio::backend::plugin,
			theme::plugin,
			ui_camera::plugin,
			screens::plugin,
			#[cfg(feature = "dev")]
			dev_tools::plugin,
		));
	}
}

/// High-level groupings of systems for the app in the `Update` schedule.
/// When adding a new variant, make sure to order it in
/// [`configure_app_systems`].
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
enum AppSystems {
	/// Tick timers.
	TickTimers,
	/// Record player input.
	RecordInput,
	/// Do everything else (consider splitting this into further variants).
	Update,
}

fn configure_app_systems(app: &mut App) {
	app.configure_sets(
		Update,
		(
			AppSystems::TickTimers,
			AppSystems::RecordInput,
			AppSystems::Update,
		)
			.chain(),
	);
}
