//! The settings screen: language, AI difficulty and the two volume sliders.
//!
//! Changes land in [`PersistedSettings`] right away and are written to
//! storage when the screen closes.

use bevy::{prelude::*, ui::Val::*};

use crate::{
	audio::{Channel, Cue, ScreenAudio},
	localization::{Localization, LocalizedText},
	screens::{Screen, go_back},
	settings::{LoadSettings, PersistedSettings},
	theme::{interaction::InteractionPalette, palette::*, widget},
	volume::VolumeTrack,
};

const SLIDER_WIDTH: f32 = 200.0;
const SLIDER_HEIGHT: f32 = 20.0;
const KNOB_WIDTH: f32 = 15.0;
/// How far the knob sticks out above and below the track.
const KNOB_OVERHANG: f32 = 5.0;

pub(super) fn plugin(app: &mut App) {
	app.add_systems(
		OnEnter(Screen::Settings),
		spawn_settings_screen.after(LoadSettings),
	);
	app.add_systems(
		Update,
		show_difficulty
			.run_if(in_state(Screen::Settings).and(resource_changed::<PersistedSettings>))
			.in_set(crate::AppSystems::Update),
	);
	app.add_observer(press_slider);
	app.add_observer(drag_slider);
	app.add_observer(apply_volume);
}

/// A new volume picked on one of the sliders.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub(crate) struct VolumeChanged {
	pub channel: Channel,
	pub volume: f32,
}

#[derive(Component, Debug, Clone, Copy)]
struct VolumeSlider(Channel);

#[derive(Component, Debug, Clone, Copy)]
struct VolumeFill(Channel);

#[derive(Component, Debug, Clone, Copy)]
struct VolumeKnob(Channel);

#[derive(Component, Debug)]
struct DifficultyValue;

fn spawn_settings_screen(mut commands: Commands, settings: Res<PersistedSettings>) {
	commands.spawn((
		widget::ui_root("Settings Screen"),
		DespawnOnExit(Screen::Settings),
		BackgroundColor(SCREEN_BACKGROUND),
		children![
			widget::header("settingsButton"),
			(
				Name::new("Settings Grid"),
				Node {
					display: Display::Grid,
					row_gap: Px(40.0),
					column_gap: Px(60.0),
					grid_template_columns: RepeatedGridTrack::px(2, 300.0),
					align_items: AlignItems::Center,
					margin: UiRect::vertical(Px(30.0)),
					..default()
				},
				Pickable::IGNORE,
				children![
					widget::label(LocalizedText::new("language").with_suffix(":")),
					widget::text_button(
						LocalizedText::new("languageName"),
						24.0,
						InteractionPalette::steady(BUTTON_HOVERED_TEXT),
						cycle_language,
					),
					widget::label(LocalizedText::new("aiDifficulty").with_suffix(":")),
					(
						DifficultyValue,
						widget::text_button(
							LocalizedText::new(settings.ai_difficulty.key()),
							24.0,
							InteractionPalette::steady(BUTTON_HOVERED_ALT_TEXT),
							cycle_difficulty,
						),
					),
					widget::label(LocalizedText::new("musicVolume").with_suffix(":")),
					volume_slider(Channel::Music, settings.music_volume),
					widget::label(LocalizedText::new("sfxVolume").with_suffix(":")),
					volume_slider(Channel::Sfx, settings.sfx_volume),
				],
			),
			widget::small_button("backToMenu", go_back),
		],
	));
}

fn volume_slider(channel: Channel, volume: f32) -> impl Bundle {
	(
		Name::new(format!("{channel:?} Volume Slider")),
		VolumeSlider(channel),
		Node {
			width: Px(SLIDER_WIDTH),
			height: Px(SLIDER_HEIGHT),
			justify_self: JustifySelf::End,
			..default()
		},
		BackgroundColor(SLIDER_TRACK),
		children![
			(
				Name::new("Fill"),
				VolumeFill(channel),
				Node {
					position_type: PositionType::Absolute,
					left: Px(0.0),
					width: Px(fill_width(volume)),
					height: Percent(100.0),
					..default()
				},
				BackgroundColor(SLIDER_FILL),
				Pickable::IGNORE,
			),
			(
				Name::new("Knob"),
				VolumeKnob(channel),
				Node {
					position_type: PositionType::Absolute,
					left: Px(knob_left(volume)),
					top: Px(-KNOB_OVERHANG),
					width: Px(KNOB_WIDTH),
					height: Px(SLIDER_HEIGHT + 2.0 * KNOB_OVERHANG),
					..default()
				},
				BackgroundColor(SLIDER_KNOB),
				Pickable::IGNORE,
			),
		],
	)
}

/// The slider geometry in the track's own space.
fn local_track() -> VolumeTrack {
	VolumeTrack::new(0.0, SLIDER_WIDTH)
}

fn fill_width(volume: f32) -> f32 {
	local_track().knob_x(volume)
}

fn knob_left(volume: f32) -> f32 {
	local_track().knob_x(volume) - KNOB_WIDTH / 2.0
}

fn cycle_language(
	_: On<Pointer<Press>>,
	mut settings: ResMut<PersistedSettings>,
	mut localization: ResMut<Localization>,
	mut audio: ScreenAudio,
) {
	audio.play(Cue::Click);
	settings.language = settings.language.toggled();
	localization.set_language(settings.language);
}

fn cycle_difficulty(
	_: On<Pointer<Press>>,
	mut settings: ResMut<PersistedSettings>,
	mut audio: ScreenAudio,
) {
	audio.play(Cue::Click);
	settings.ai_difficulty = settings.ai_difficulty.next();
}

fn show_difficulty(
	settings: Res<PersistedSettings>,
	buttons: Query<&Children, With<DifficultyValue>>,
	mut texts: Query<&mut LocalizedText>,
) {
	let key = settings.ai_difficulty.key();
	for children in &buttons {
		let mut values = texts.iter_many_mut(children);
		while let Some(mut value) = values.fetch_next() {
			if value.key != key {
				value.key = key;
			}
		}
	}
}

/// The on-screen extent of a laid-out slider track, in logical pixels.
fn track_bounds(node: &ComputedNode, transform: &UiGlobalTransform) -> VolumeTrack {
	logical_track(
		node.size().x,
		transform.translation.x,
		node.inverse_scale_factor(),
	)
}

/// Layout reports a node's width and center in physical pixels, while
/// pointer positions are logical.
fn logical_track(
	physical_width: f32,
	physical_center: f32,
	inverse_scale_factor: f32,
) -> VolumeTrack {
	let width = physical_width * inverse_scale_factor;
	let center = physical_center * inverse_scale_factor;
	VolumeTrack::new(center - width / 2.0, width)
}

fn press_slider(
	press: On<Pointer<Press>>,
	sliders: Query<(&VolumeSlider, &ComputedNode, &UiGlobalTransform)>,
	mut audio: ScreenAudio,
	mut commands: Commands,
) {
	let Ok((slider, node, transform)) = sliders.get(press.entity) else {
		return;
	};
	let volume = track_bounds(node, transform).map(press.pointer_location.position.x);
	commands.trigger(VolumeChanged {
		channel: slider.0,
		volume,
	});
	if slider.0 == Channel::Sfx {
		// Queued after the change, so the click plays at the new level.
		audio.play(Cue::Click);
	}
}

fn drag_slider(
	drag: On<Pointer<Drag>>,
	sliders: Query<(&VolumeSlider, &ComputedNode, &UiGlobalTransform)>,
	mut commands: Commands,
) {
	let Ok((slider, node, transform)) = sliders.get(drag.entity) else {
		return;
	};
	commands.trigger(VolumeChanged {
		channel: slider.0,
		volume: track_bounds(node, transform).map(drag.pointer_location.position.x),
	});
}

fn apply_volume(
	change: On<VolumeChanged>,
	mut settings: ResMut<PersistedSettings>,
	mut audio: ScreenAudio,
	mut fills: Query<(&VolumeFill, &mut Node), Without<VolumeKnob>>,
	mut knobs: Query<(&VolumeKnob, &mut Node), Without<VolumeFill>>,
) {
	settings.set_volume(change.channel, change.volume);
	let volume = settings.volume(change.channel);
	audio.set_channel_volume(change.channel, volume);

	for (fill, mut node) in &mut fills {
		if fill.0 == change.channel {
			node.width = Px(fill_width(volume));
		}
	}
	for (knob, mut node) in &mut knobs {
		if knob.0 == change.channel {
			node.left = Px(knob_left(volume));
		}
	}
}
