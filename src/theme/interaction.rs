use bevy::prelude::*;

use crate::audio::{Cue, ScreenAudio};

pub(super) fn plugin(app: &mut App) {
	app.register_type::<InteractionPalette>();
	app.add_observer(highlight_on_over);
	app.add_observer(restore_on_out);
}

/// Text colors a button switches between while the pointer moves over it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(UiTransform)]
pub(crate) struct InteractionPalette {
	pub none: Color,
	pub hovered: Color,
}

impl InteractionPalette {
	pub(crate) fn new(none: Color, hovered: Color) -> Self {
		Self { none, hovered }
	}

	/// Keeps its color and only grows on hover.
	pub(crate) fn steady(color: Color) -> Self {
		Self::new(color, color)
	}
}

const HOVERED_SCALE: f32 = 1.1;

fn highlight_on_over(
	over: On<Pointer<Over>>,
	mut buttons: Query<(&InteractionPalette, &mut TextColor, &mut UiTransform)>,
	mut audio: ScreenAudio,
) {
	let Ok((palette, mut color, mut transform)) = buttons.get_mut(over.entity) else {
		return;
	};
	color.0 = palette.hovered;
	transform.scale = Vec2::splat(HOVERED_SCALE);
	audio.play(Cue::Click);
}

fn restore_on_out(
	out: On<Pointer<Out>>,
	mut buttons: Query<(&InteractionPalette, &mut TextColor, &mut UiTransform)>,
) {
	let Ok((palette, mut color, mut transform)) = buttons.get_mut(out.entity) else {
		return;
	};
	color.0 = palette.none;
	transform.scale = Vec2::ONE;
}
