//! Picking between a two-player match and a match against the AI.

use bevy::{prelude::*, ui::Val::*};
use tracing::info;

use crate::{
	audio::{Cue, ScreenAudio},
	localization::LocalizedText,
	screens::{FADE_DURATION, MatchMode, MatchSetup, Navigate, Screen, go_back},
	settings::SettingsStore,
	theme::{interaction::InteractionPalette, palette::*, widget},
};

pub(super) fn plugin(app: &mut App) {
	app.add_systems(OnEnter(Screen::GameMode), spawn_game_mode_screen);
}

fn spawn_game_mode_screen(mut commands: Commands) {
	commands.spawn((
		widget::ui_root("Game Mode Screen"),
		DespawnOnExit(Screen::GameMode),
		BackgroundColor(SCREEN_BACKGROUND),
		children![
			widget::header("gameTitle"),
			(
				Name::new("Modes"),
				Node {
					flex_direction: FlexDirection::Column,
					align_items: AlignItems::Center,
					row_gap: Px(40.0),
					margin: UiRect::vertical(Px(40.0)),
					..default()
				},
				Pickable::IGNORE,
				children![
					widget::text_button(
						LocalizedText::new(MatchMode::OneVsOne.label_key()),
						36.0,
						InteractionPalette::new(BUTTON_TEXT, BUTTON_HOVERED_TEXT),
						pick_one_vs_one,
					),
					widget::text_button(
						LocalizedText::new(MatchMode::OneVsAi.label_key()),
						36.0,
						InteractionPalette::new(BUTTON_TEXT, BUTTON_HOVERED_ALT_TEXT),
						pick_one_vs_ai,
					),
				],
			),
			widget::small_button("backToMenu", go_back),
		],
	));
}

fn pick_one_vs_one(_: On<Pointer<Press>>, mut commands: Commands) {
	commands.run_system_cached_with(begin_match, MatchMode::OneVsOne);
}

fn pick_one_vs_ai(_: On<Pointer<Press>>, mut commands: Commands) {
	commands.run_system_cached_with(begin_match, MatchMode::OneVsAi);
}

/// Plays the start cue, silences the menu music and fades into the match.
/// The difficulty is read from storage at this moment.
fn begin_match(
	In(mode): In<MatchMode>,
	mut audio: ScreenAudio,
	store: Res<SettingsStore>,
	mut commands: Commands,
) {
	let setup = MatchSetup {
		mode,
		ai_difficulty: store.ai_difficulty(),
	};
	info!(
		"Starting a {} match on {} difficulty",
		mode.code(),
		setup.ai_difficulty.key()
	);

	audio.play(Cue::GameStart);
	audio.stop_background();
	commands.trigger(
		Navigate::to(Screen::Match)
			.with_payload(setup)
			.with_fade(FADE_DURATION),
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		audio::{AudioOwner, Playing, SoundHandle},
		screens::gameplay::MatchSession,
		settings::AiDifficulty,
		testing,
	};

	/// Counts the game mode screen's sound handles at the moment the match
	/// screen is entered.
	#[derive(Resource, Default)]
	struct HandlesAtMatchEntry(Option<usize>);

	fn count_game_mode_handles(
		handles: Query<&AudioOwner, With<SoundHandle>>,
		mut seen: ResMut<HandlesAtMatchEntry>,
	) {
		let owned = handles
			.iter()
			.filter(|owner| owner.0 == Screen::GameMode)
			.count();
		seen.0 = Some(owned);
	}

	#[test]
	fn one_vs_ai_carries_the_stored_difficulty_into_the_match() {
		let mut app = testing::app_with_store([("ai_difficulty", "hard")]);
		app.init_resource::<HandlesAtMatchEntry>();
		app.add_systems(OnEnter(Screen::Match), count_game_mode_handles);
		app.update();
		testing::navigate(&mut app, Screen::GameMode);

		app.world_mut()
			.run_system_cached_with(begin_match, MatchMode::OneVsAi)
			.unwrap();

		// The theme stops right away; the screen only changes once faded.
		let theme_playing = app
			.world_mut()
			.query_filtered::<&SoundHandle, With<Playing>>()
			.iter(app.world())
			.any(|handle| handle.cue == Cue::Theme);
		assert!(!theme_playing);
		app.update();
		assert_eq!(testing::screen(&app), Screen::GameMode);

		testing::advance(&mut app, FADE_DURATION * 2);
		assert_eq!(testing::screen(&app), Screen::Match);
		assert_eq!(
			app.world().resource::<HandlesAtMatchEntry>().0,
			Some(0)
		);

		let session = app
			.world_mut()
			.query::<&MatchSession>()
			.single(app.world())
			.unwrap();
		assert_eq!(
			session.0,
			MatchSetup {
				mode: MatchMode::OneVsAi,
				ai_difficulty: AiDifficulty::Hard,
			}
		);
		assert!(app.world().get_resource::<MatchSetup>().is_none());
	}

	#[test]
	fn missing_difficulty_defaults_to_medium() {
		let mut app = testing::app();
		app.update();
		testing::navigate(&mut app, Screen::GameMode);

		app.world_mut()
			.run_system_cached_with(begin_match, MatchMode::OneVsOne)
			.unwrap();
		testing::advance(&mut app, FADE_DURATION * 2);

		let session = app
			.world_mut()
			.query::<&MatchSession>()
			.single(app.world())
			.unwrap();
		assert_eq!(session.0.mode, MatchMode::OneVsOne);
		assert_eq!(session.0.ai_difficulty, AiDifficulty::Medium);
	}
}
