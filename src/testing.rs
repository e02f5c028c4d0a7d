//! A headless app with the menu plugins, for driving screens in tests.

use std::time::Duration;

use bevy::{
	camera::NormalizedRenderTarget,
	input::{
		ButtonState, InputPlugin,
		keyboard::{Key, KeyboardInput, NativeKey},
	},
	picking::{
		backend::HitData,
		pointer::{Location, PointerButton, PointerId},
	},
	prelude::*,
	state::app::StatesPlugin,
	time::TimeUpdateStrategy,
};

use crate::{
	audio::{Cue, PlayCue, SoundHandle},
	screens::{Navigate, Screen},
	settings::{MemoryStore, SettingsStore},
};

/// Virtual time that passes on every update.
const FRAME: Duration = Duration::from_millis(100);

pub(crate) fn app() -> App {
	app_with_store([])
}

/// An app whose settings storage starts out holding `values`.
pub(crate) fn app_with_store<const N: usize>(values: [(&str, &str); N]) -> App {
	let mut app = App::new();
	app.add_plugins((MinimalPlugins, StatesPlugin, InputPlugin));
	app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
	app.insert_resource(SettingsStore::new(MemoryStore::with_values(values)));
	crate::configure_app_systems(&mut app);

	app.add_plugins((
		crate::localization::plugin,
		crate::settings::plugin,
		crate::audio::plugin,
		crate::theme::plugin,
		crate::screens::plugin,
	));
	app
}

pub(crate) fn screen(app: &App) -> Screen {
	*app.world().resource::<State<Screen>>().get()
}

/// Requests a screen change and lets it happen.
pub(crate) fn navigate(app: &mut App, to: Screen) {
	app.world_mut().trigger(Navigate::to(to));
	app.update();
	assert_eq!(screen(app), to, "navigation to {to:?} did not happen");
}

/// Runs updates until at least `duration` of virtual time has passed.
pub(crate) fn advance(app: &mut App, duration: Duration) {
	let frames = duration.as_millis() / FRAME.as_millis() + 1;
	for _ in 0..frames {
		app.update();
	}
}

/// Presses `key` for one frame and lets the app react to it.
pub(crate) fn press_key(app: &mut App, key_code: KeyCode) {
	app.world_mut().write_message(KeyboardInput {
		key_code,
		logical_key: Key::Unidentified(NativeKey::Unidentified),
		state: ButtonState::Pressed,
		text: None,
		repeat: false,
		window: Entity::PLACEHOLDER,
	});
	app.update();
	app.update();
}

/// Every piece of text currently in the world.
pub(crate) fn texts(app: &mut App) -> Vec<String> {
	let mut query = app.world_mut().query::<&Text>();
	query.iter(app.world()).map(|text| text.0.clone()).collect()
}

/// A mouse event on `entity` with the cursor at `x` logical pixels.
pub(crate) fn pointer<E>(entity: Entity, x: f32, event: E) -> Pointer<E>
where
	E: std::fmt::Debug + Clone + Reflect,
{
	Pointer {
		entity,
		pointer_id: PointerId::Mouse,
		pointer_location: Location {
			target: NormalizedRenderTarget::Image(Handle::<Image>::default().into()),
			position: Vec2::new(x, 0.0),
		},
		event,
	}
}

pub(crate) fn hit() -> HitData {
	HitData::new(Entity::PLACEHOLDER, 0.0, None, None)
}

pub(crate) fn press() -> Press {
	Press {
		button: PointerButton::Primary,
		hit: hit(),
	}
}

/// The cues started since [`record_cues`] was called, in order.
#[derive(Resource, Default, Debug)]
pub(crate) struct PlayedCues(pub Vec<Cue>);

pub(crate) fn record_cues(app: &mut App) {
	app.init_resource::<PlayedCues>();
	app.add_observer(
		|play: On<PlayCue>, handles: Query<&SoundHandle>, mut played: ResMut<PlayedCues>| {
			if let Ok(handle) = handles.get(play.entity) {
				played.0.push(handle.cue);
			}
		},
	);
}

/// The entity showing the text for `key`.
pub(crate) fn text_entity(app: &mut App, key: &str) -> Entity {
	let mut query = app
		.world_mut()
		.query::<(Entity, &crate::localization::LocalizedText)>();
	query
		.iter(app.world())
		.find(|(_, text)| text.key == key)
		.map(|(entity, _)| entity)
		.unwrap_or_else(|| panic!("no text for `{key}`"))
}
