//! Reusable UI widgets & theming.

pub(crate) mod interaction;
pub(crate) mod palette;
pub(crate) mod widget;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
	app.add_plugins(interaction::plugin);
}
