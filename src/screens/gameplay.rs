//! The match screen. Gameplay itself lives elsewhere; this module takes the
//! [`MatchSetup`] handed over by the game mode screen and shows who is
//! playing whom.

use bevy::{prelude::*, ui::Val::*};
use tracing::{error, info};

use crate::{
	localization::LocalizedText,
	screens::{MatchMode, MatchSetup, Navigate, Screen},
	theme::{palette::*, widget},
};

pub(super) fn plugin(app: &mut App) {
	app.register_type::<MatchSession>();
	app.add_systems(OnEnter(Screen::Match), start_match);
	app.add_observer(finish_match);
}

/// The running match and the setup it was started with.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub(crate) struct MatchSession(pub MatchSetup);

/// Ends the running match and returns to the main menu.
#[derive(Event, Debug, Clone, Copy, Default)]
pub(crate) struct MatchFinished;

fn start_match(mut commands: Commands, setup: Option<Res<MatchSetup>>) {
	let Some(setup) = setup.map(|setup| *setup) else {
		error!("Entered the match without a match setup");
		return;
	};
	commands.remove_resource::<MatchSetup>();
	info!("Match started: {setup:?}");

	let difficulty = match setup.mode {
		MatchMode::OneVsAi => Some(setup.ai_difficulty.key()),
		MatchMode::OneVsOne => None,
	};

	commands
		.spawn((
			widget::ui_root("Match HUD"),
			MatchSession(setup),
			DespawnOnExit(Screen::Match),
			BackgroundColor(SCREEN_BACKGROUND),
			children![widget::header(setup.mode.label_key())],
		))
		.with_children(|hud| {
			if let Some(key) = difficulty {
				hud.spawn((
					Name::new("Difficulty"),
					Node {
						column_gap: Px(10.0),
						..default()
					},
					Pickable::IGNORE,
					children![
						widget::label(LocalizedText::new("aiDifficulty").with_suffix(":")),
						widget::label(LocalizedText::new(key)),
					],
				));
			}
			hud.spawn(widget::small_button("backToMenu", leave_match));
		});
}

fn leave_match(_: On<Pointer<Press>>, mut commands: Commands) {
	commands.trigger(MatchFinished);
}

fn finish_match(_: On<MatchFinished>, mut commands: Commands) {
	commands.trigger(Navigate::to(Screen::Start));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{settings::AiDifficulty, testing};

	#[test]
	fn entering_without_a_setup_starts_nothing() {
		let mut app = testing::app();
		app.update();
		app.world_mut()
			.resource_mut::<NextState<Screen>>()
			.set(Screen::Match);
		app.update();

		assert_eq!(testing::screen(&app), Screen::Match);
		let sessions = app
			.world_mut()
			.query::<&MatchSession>()
			.iter(app.world())
			.count();
		assert_eq!(sessions, 0);
	}

	#[test]
	fn finishing_returns_to_the_menu() {
		let mut app = testing::app();
		app.update();
		testing::navigate(&mut app, Screen::GameMode);
		app.insert_resource(MatchSetup {
			mode: MatchMode::OneVsAi,
			ai_difficulty: AiDifficulty::Easy,
		});
		app.world_mut()
			.resource_mut::<NextState<Screen>>()
			.set(Screen::Match);
		app.update();

		let texts = testing::texts(&mut app);
		for expected in ["1 vs AI", "AI Difficulty:", "Easy"] {
			assert!(texts.iter().any(|text| text == expected), "{texts:?}");
		}

		app.world_mut().trigger(MatchFinished);
		app.update();
		assert_eq!(testing::screen(&app), Screen::Start);
		let sessions = app
			.world_mut()
			.query::<&MatchSession>()
			.iter(app.world())
			.count();
		assert_eq!(sessions, 0);
	}
}
