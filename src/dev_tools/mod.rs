//! Development tools for the game. This plugin is only enabled in dev builds.

use bevy::{
	dev_tools::states::log_transitions, input::common_conditions::input_just_pressed, prelude::*,
};

use crate::{localization::Localization, screens::Screen};

const TOGGLE_LANGUAGE_KEY: KeyCode = KeyCode::F2;

pub(super) fn plugin(app: &mut App) {
	// Log `Screen` state transitions.
	app.add_systems(Update, log_transitions::<Screen>);

	app.add_systems(
		Update,
		toggle_language.run_if(input_just_pressed(TOGGLE_LANGUAGE_KEY)),
	);
}

/// Flips the displayed language without touching the saved settings.
fn toggle_language(mut localization: ResMut<Localization>) {
	let language = localization.current_language().toggled();
	localization.set_language(language);
}
