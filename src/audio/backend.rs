//! Plays [`SoundHandle`]s through `bevy_seedling`.

use bevy::prelude::*;
use tracing::debug;
use bevy_seedling::{prelude::*, sample::AudioSample};

use super::{Cue, PlayCue, Playing, SoundHandle};
use crate::asset_tracking::LoadResource;

pub(crate) fn plugin(app: &mut App) {
	app.load_resource::<SoundAssets>();
	app.add_systems(Startup, spawn_ui_pool);
	app.add_systems(
		Update,
		(
			start_pending_tracks.run_if(resource_added::<SoundAssets>),
			sync_handle_volume,
		)
			.in_set(crate::AppSystems::Update),
	);
	app.add_observer(play_cue);
}

/// Menu sounds that play alongside the music.
#[derive(PoolLabel, Reflect, PartialEq, Eq, Debug, Hash, Clone)]
#[reflect(Component)]
pub(crate) struct UiSfxPool;

#[derive(Resource, Asset, Clone, TypePath)]
pub(crate) struct SoundAssets {
	#[dependency]
	click: Handle<AudioSample>,
	#[dependency]
	game_start: Handle<AudioSample>,
	#[dependency]
	theme: Handle<AudioSample>,
}

impl SoundAssets {
	fn sample(&self, cue: Cue) -> Handle<AudioSample> {
		match cue {
			Cue::Click => self.click.clone(),
			Cue::GameStart => self.game_start.clone(),
			Cue::Theme => self.theme.clone(),
		}
	}
}

impl FromWorld for SoundAssets {
	fn from_world(world: &mut World) -> Self {
		let assets = world.resource::<AssetServer>();
		Self {
			click: assets.load("audio/sound_effects/button_click.ogg"),
			game_start: assets.load("audio/sound_effects/game_start.ogg"),
			theme: assets.load("audio/music/soccer_theme.ogg"),
		}
	}
}

fn spawn_ui_pool(mut commands: Commands) {
	commands
		.spawn((
			Name::new("UI SFX audio sampler pool"),
			SamplerPool(UiSfxPool),
			sample_effects![VolumeNode::default()],
		))
		.connect(SoundEffectsBus);
}

/// Looping tracks become children of their handle so that despawning the
/// handle stops them. One-shots are left to finish on their own.
fn play_cue(
	play: On<PlayCue>,
	handles: Query<&SoundHandle>,
	sounds: Option<Res<SoundAssets>>,
	mut commands: Commands,
) -> Result {
	let handle = handles.get(play.entity)?;
	let Some(sounds) = sounds else {
		debug!("Sounds are still loading, skipping {:?}", handle.cue);
		return Ok(());
	};

	let sample = sounds.sample(handle.cue);
	let volume = VolumeNode {
		volume: Volume::Linear(handle.volume),
		..default()
	};
	if handle.cue.looping() {
		commands.spawn((
			Name::new(format!("{:?} Playback", handle.cue)),
			ChildOf(play.entity),
			MusicPool,
			SamplePlayer::new(sample).looping(),
			sample_effects![volume],
		));
	} else {
		commands.spawn((
			Name::new(format!("{:?} Playback", handle.cue)),
			UiSfxPool,
			SamplePlayer::new(sample),
			sample_effects![volume],
		));
	}
	Ok(())
}

fn sync_handle_volume(
	handles: Query<(&SoundHandle, &Children), Changed<SoundHandle>>,
	playback: Query<&SampleEffects>,
	mut volumes: Query<&mut VolumeNode>,
) -> Result {
	for (handle, children) in &handles {
		for effects in playback.iter_many(children.iter()) {
			let mut volume = volumes.get_effect_mut(effects)?;
			volume.volume = Volume::Linear(handle.volume);
		}
	}
	Ok(())
}

/// Tracks that were asked to play before the sounds finished loading.
fn start_pending_tracks(
	pending: Query<Entity, (With<SoundHandle>, With<Playing>, Without<Children>)>,
	mut commands: Commands,
) {
	for entity in &pending {
		commands.trigger(PlayCue { entity });
	}
}
