//! Player settings: language, AI difficulty and the two volumes.
//!
//! [`PersistedSettings`] is the in-memory copy the screens read and the
//! settings screen mutates. It is written back through [`SettingsStore`] when
//! the settings screen closes, so in-memory values may run ahead of storage
//! until then.

mod storage;

use std::str::FromStr;

use anyhow::bail;
use bevy::prelude::*;
use tracing::{debug, warn};

pub(crate) use storage::KeyValueStore;
#[cfg(test)]
pub(crate) use storage::MemoryStore;

use crate::{
	audio::Channel,
	localization::{Language, Localization},
	screens::Screen,
};

pub(crate) const LANGUAGE_KEY: &str = "game_language";
pub(crate) const DIFFICULTY_KEY: &str = "ai_difficulty";
pub(crate) const MUSIC_VOLUME_KEY: &str = "music_volume";
pub(crate) const SFX_VOLUME_KEY: &str = "sfx_volume";

pub(super) fn plugin(app: &mut App) {
	app.register_type::<PersistedSettings>();
	app.register_type::<AudioDefaults>();

	app.init_resource::<AudioDefaults>();
	app.init_resource::<SettingsStore>();
	app.init_resource::<PersistedSettings>();

	app.add_systems(OnEnter(Screen::Start), apply_saved_language);
	app.add_systems(
		OnEnter(Screen::Settings),
		reload_settings.in_set(LoadSettings),
	);
	app.add_systems(OnExit(Screen::Settings), save_settings);
}

/// Refreshes [`PersistedSettings`] from storage on screen entry. Systems
/// that read the settings when a screen opens run after it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct LoadSettings;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub(crate) enum AiDifficulty {
	Easy,
	#[default]
	Medium,
	Hard,
}

impl AiDifficulty {
	/// Storage value and translation key at once.
	pub(crate) fn key(self) -> &'static str {
		match self {
			AiDifficulty::Easy => "easy",
			AiDifficulty::Medium => "medium",
			AiDifficulty::Hard => "hard",
		}
	}

	/// The next level in the settings screen's cycle.
	pub(crate) fn next(self) -> Self {
		match self {
			AiDifficulty::Easy => AiDifficulty::Medium,
			AiDifficulty::Medium => AiDifficulty::Hard,
			AiDifficulty::Hard => AiDifficulty::Easy,
		}
	}
}

impl FromStr for AiDifficulty {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"easy" => Ok(AiDifficulty::Easy),
			"medium" => Ok(AiDifficulty::Medium),
			"hard" => Ok(AiDifficulty::Hard),
			other => bail!("unknown AI difficulty `{other}`"),
		}
	}
}

/// Volumes new sound handles start with when nothing was saved yet. Updated by
/// every save so later screens inherit the saved levels.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub(crate) struct AudioDefaults {
	pub music_volume: f32,
	pub sfx_volume: f32,
}

impl Default for AudioDefaults {
	fn default() -> Self {
		Self {
			music_volume: 0.5,
			sfx_volume: 0.7,
		}
	}
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub(crate) struct PersistedSettings {
	pub language: Language,
	pub ai_difficulty: AiDifficulty,
	pub music_volume: f32,
	pub sfx_volume: f32,
}

impl PersistedSettings {
	pub(crate) fn with_defaults(defaults: &AudioDefaults) -> Self {
		Self {
			language: Language::default(),
			ai_difficulty: AiDifficulty::default(),
			music_volume: defaults.music_volume,
			sfx_volume: defaults.sfx_volume,
		}
	}

	pub(crate) fn volume(&self, channel: Channel) -> f32 {
		match channel {
			Channel::Music => self.music_volume,
			Channel::Sfx => self.sfx_volume,
		}
	}

	pub(crate) fn set_volume(&mut self, channel: Channel, volume: f32) {
		let volume = volume.clamp(0.0, 1.0);
		match channel {
			Channel::Music => self.music_volume = volume,
			Channel::Sfx => self.sfx_volume = volume,
		}
	}
}

impl FromWorld for PersistedSettings {
	fn from_world(world: &mut World) -> Self {
		let defaults = *world.get_resource_or_init::<AudioDefaults>();
		world.get_resource_or_init::<SettingsStore>().load(&defaults)
	}
}

/// Reads and writes [`PersistedSettings`] field by field.
///
/// Every failure degrades to the field's default: storage errors are logged
/// as warnings, malformed values at debug level.
#[derive(Resource)]
pub(crate) struct SettingsStore {
	backend: Box<dyn KeyValueStore>,
}

impl Default for SettingsStore {
	fn default() -> Self {
		Self {
			backend: storage::platform_store(),
		}
	}
}

impl SettingsStore {
	pub(crate) fn new(backend: impl KeyValueStore) -> Self {
		Self {
			backend: Box::new(backend),
		}
	}

	pub(crate) fn load(&self, defaults: &AudioDefaults) -> PersistedSettings {
		let fallback = PersistedSettings::with_defaults(defaults);
		PersistedSettings {
			language: self.read(LANGUAGE_KEY).unwrap_or(fallback.language),
			ai_difficulty: self.read(DIFFICULTY_KEY).unwrap_or(fallback.ai_difficulty),
			music_volume: self
				.read_volume(MUSIC_VOLUME_KEY)
				.unwrap_or(fallback.music_volume),
			sfx_volume: self
				.read_volume(SFX_VOLUME_KEY)
				.unwrap_or(fallback.sfx_volume),
		}
	}

	/// Writes all four fields and hands the volumes to `defaults`.
	pub(crate) fn save(&mut self, settings: &PersistedSettings, defaults: &mut AudioDefaults) {
		let entries = [
			(LANGUAGE_KEY, settings.language.code().to_owned()),
			(DIFFICULTY_KEY, settings.ai_difficulty.key().to_owned()),
			(MUSIC_VOLUME_KEY, settings.music_volume.to_string()),
			(SFX_VOLUME_KEY, settings.sfx_volume.to_string()),
		];
		for (key, value) in entries {
			if let Err(err) = self.backend.set(key, &value) {
				warn!("Could not persist setting `{key}`: {err:#}");
			}
		}

		defaults.music_volume = settings.music_volume;
		defaults.sfx_volume = settings.sfx_volume;
		debug!("Saved settings: {settings:?}");
	}

	/// The stored difficulty, read fresh at the moment a match is set up.
	pub(crate) fn ai_difficulty(&self) -> AiDifficulty {
		self.read(DIFFICULTY_KEY).unwrap_or_default()
	}

	fn read<T>(&self, key: &str) -> Option<T>
	where
		T: FromStr,
		T::Err: std::fmt::Display,
	{
		let raw = match self.backend.get(key) {
			Ok(raw) => raw?,
			Err(err) => {
				warn!("Could not read setting `{key}`: {err:#}");
				return None;
			}
		};
		match raw.trim().parse() {
			Ok(value) => Some(value),
			Err(err) => {
				debug!("Ignoring malformed setting `{key}` = {raw:?}: {err}");
				None
			}
		}
	}

	fn read_volume(&self, key: &str) -> Option<f32> {
		let volume = self.read::<f32>(key)?;
		if volume.is_finite() && (0.0..=1.0).contains(&volume) {
			Some(volume)
		} else {
			debug!("Ignoring out-of-range volume `{key}` = {volume}");
			None
		}
	}
}

fn apply_saved_language(settings: Res<PersistedSettings>, mut localization: ResMut<Localization>) {
	if localization.current_language() != settings.language {
		localization.set_language(settings.language);
	}
}

fn reload_settings(
	store: Res<SettingsStore>,
	defaults: Res<AudioDefaults>,
	mut settings: ResMut<PersistedSettings>,
) {
	settings.set_if_neq(store.load(&defaults));
}

fn save_settings(
	settings: Res<PersistedSettings>,
	mut store: ResMut<SettingsStore>,
	mut defaults: ResMut<AudioDefaults>,
) {
	store.save(&settings, &mut defaults);
}
