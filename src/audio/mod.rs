//! Screen-owned sound handles.
//!
//! Every screen owns a small set of [`SoundHandle`] entities, created when the
//! screen is entered and despawned when it is left. The handles carry the
//! volume the sound should play at; actually producing sound is the job of
//! [`backend`], which reacts to [`PlayCue`] and to handle volume changes.

pub(crate) mod backend;

use bevy::{ecs::system::SystemParam, prelude::*};
use tracing::debug;

use crate::{
	screens::Screen,
	settings::{LoadSettings, PersistedSettings},
};

pub(super) fn plugin(app: &mut App) {
	app.register_type::<SoundHandle>();
	app.register_type::<AudioOwner>();

	for screen in Screen::ALL {
		app.add_systems(
			OnEnter(screen),
			(move |mut audio: ScreenAudio, settings: Res<PersistedSettings>| {
				audio.open_screen(screen, &settings);
			})
			.after(LoadSettings),
		);
		app.add_systems(OnExit(screen), move |mut audio: ScreenAudio| {
			audio.close_screen(screen);
		});
	}
}

/// The sounds a screen can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub(crate) enum Cue {
	/// Button feedback.
	Click,
	/// Played when a match is about to start.
	GameStart,
	/// The looping menu music.
	Theme,
}

impl Cue {
	pub(crate) fn channel(self) -> Channel {
		match self {
			Cue::Theme => Channel::Music,
			Cue::Click | Cue::GameStart => Channel::Sfx,
		}
	}

	pub(crate) fn looping(self) -> bool {
		matches!(self, Cue::Theme)
	}
}

/// A volume the player controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub(crate) enum Channel {
	Music,
	Sfx,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub(crate) struct SoundHandle {
	pub cue: Cue,
	/// Linear gain in [0, 1].
	pub volume: f32,
}

/// The screen a [`SoundHandle`] belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub(crate) struct AudioOwner(pub Screen);

/// Marks a looping handle whose track is running.
#[derive(Component, Debug, Default)]
pub(crate) struct Playing;

/// Asks the playback backend to start the sound of a [`SoundHandle`].
#[derive(EntityEvent, Debug, Clone, Copy)]
pub(crate) struct PlayCue {
	pub entity: Entity,
}

/// Access to the current screen's sound handles.
#[derive(SystemParam)]
pub(crate) struct ScreenAudio<'w, 's> {
	commands: Commands<'w, 's>,
	handles: Query<'w, 's, (Entity, &'static mut SoundHandle, Has<Playing>)>,
	owners: Query<'w, 's, (Entity, &'static AudioOwner), With<SoundHandle>>,
}

impl ScreenAudio<'_, '_> {
	/// Starts `cue`. A looping cue that is already running is left alone.
	pub(crate) fn play(&mut self, cue: Cue) {
		let Some((entity, _, playing)) = self.handles.iter().find(|(_, handle, _)| handle.cue == cue)
		else {
			debug!("No {cue:?} sound on this screen");
			return;
		};
		if cue.looping() {
			if playing {
				return;
			}
			self.commands.entity(entity).insert(Playing);
		}
		self.commands.trigger(PlayCue { entity });
	}

	/// Applies a new volume to every live handle on `channel`.
	pub(crate) fn set_channel_volume(&mut self, channel: Channel, volume: f32) {
		for (_, mut handle, _) in &mut self.handles {
			if handle.cue.channel() == channel {
				let updated = SoundHandle { volume, ..*handle };
				handle.set_if_neq(updated);
			}
		}
	}

	/// Stops every running looping track. The handles stay alive.
	pub(crate) fn stop_background(&mut self) {
		for (entity, handle, playing) in &self.handles {
			if handle.cue.looping() && playing {
				debug!("Stopping {:?}", handle.cue);
				self.commands
					.entity(entity)
					.remove::<Playing>()
					.despawn_related::<Children>();
			}
		}
	}

	pub(crate) fn is_playing(&self, cue: Cue) -> bool {
		self.handles
			.iter()
			.any(|(_, handle, playing)| handle.cue == cue && playing)
	}

	fn open_screen(&mut self, screen: Screen, settings: &PersistedSettings) {
		for &cue in screen.cues() {
			let entity = self
				.commands
				.spawn((
					Name::new(format!("{cue:?} Sound")),
					SoundHandle {
						cue,
						volume: settings.volume(cue.channel()),
					},
					AudioOwner(screen),
				))
				.id();

			if cue.looping() {
				if self.is_playing(cue) {
					debug!("{cue:?} is already playing, not starting it again");
					continue;
				}
				self.commands.entity(entity).insert(Playing);
				self.commands.trigger(PlayCue { entity });
			}
		}
	}

	fn close_screen(&mut self, screen: Screen) {
		for (entity, owner) in &self.owners {
			if owner.0 == screen {
				self.commands.entity(entity).despawn();
			}
		}
	}
}
