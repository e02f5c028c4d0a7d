//! The game's main screen states and transitions between them.
//!
//! Screens never set [`NextState<Screen>`] themselves. They trigger
//! [`Navigate`], which is checked against [`Screen::allows`] before anything
//! happens. A navigation may fade the screen out first; the fade entity is
//! scoped to the screen it started on, so leaving that screen cancels it.

pub(crate) mod gameplay;
mod game_mode;
mod settings;
mod start;

use std::time::Duration;

use anyhow::bail;
use bevy::{input::common_conditions::input_just_pressed, prelude::*};
use tracing::{debug, error, info};

use crate::{
	AppSystems,
	audio::{Cue, ScreenAudio},
	settings::AiDifficulty,
	timer::{GenericTimer, TimerAppExt as _, TimerFinished},
};

/// How long the screen takes to fade to black before a match starts.
pub(crate) const FADE_DURATION: Duration = Duration::from_millis(500);

pub(super) fn plugin(app: &mut App) {
	app.init_state::<Screen>();
	app.register_type::<MatchSetup>();
	app.add_timer::<ScreenFade>();

	app.add_observer(navigate);
	app.add_observer(open_link);
	app.add_systems(
		Update,
		(
			go_back_on_escape
				.run_if(input_just_pressed(KeyCode::Escape))
				.in_set(AppSystems::RecordInput),
			darken_fade.in_set(AppSystems::Update),
		),
	);

	app.add_plugins((
		start::plugin,
		game_mode::plugin,
		settings::plugin,
		gameplay::plugin,
	));
}

/// The game's main screen states.
#[derive(States, Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Reflect)]
#[states(scoped_entities)]
pub(crate) enum Screen {
	#[default]
	Start,
	GameMode,
	Settings,
	Match,
}

impl Screen {
	pub(crate) const ALL: [Screen; 4] = [
		Screen::Start,
		Screen::GameMode,
		Screen::Settings,
		Screen::Match,
	];

	/// Whether a screen may hand over to `to`.
	pub(crate) fn allows(self, to: Screen) -> bool {
		use Screen::*;
		matches!(
			(self, to),
			(Start, GameMode)
				| (Start, Settings)
				| (GameMode, Match)
				| (GameMode, Start)
				| (Settings, Start)
				| (Match, Start)
		)
	}

	/// The sounds the screen owns while it is active. The match plays its
	/// own audio.
	pub(crate) fn cues(self) -> &'static [Cue] {
		match self {
			Screen::Start | Screen::GameMode => &[Cue::Click, Cue::GameStart, Cue::Theme],
			Screen::Settings => &[Cue::Click, Cue::Theme],
			Screen::Match => &[],
		}
	}

	/// Where "back" leads.
	pub(crate) fn back(self) -> Option<Screen> {
		match self {
			Screen::Start => None,
			Screen::GameMode | Screen::Settings | Screen::Match => Some(Screen::Start),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub(crate) enum MatchMode {
	OneVsOne,
	OneVsAi,
}

impl MatchMode {
	pub(crate) fn code(self) -> &'static str {
		match self {
			MatchMode::OneVsOne => "1v1",
			MatchMode::OneVsAi => "1vAI",
		}
	}

	pub(crate) fn label_key(self) -> &'static str {
		match self {
			MatchMode::OneVsOne => "oneVsOne",
			MatchMode::OneVsAi => "oneVsAI",
		}
	}
}

/// What the game mode screen hands to the match. Inserted right before the
/// match starts and taken out again by it.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub(crate) struct MatchSetup {
	pub mode: MatchMode,
	pub ai_difficulty: AiDifficulty,
}

/// A request to change screens.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub(crate) struct Navigate {
	pub to: Screen,
	pub payload: Option<MatchSetup>,
	pub fade: Option<Duration>,
}

impl Navigate {
	pub(crate) fn to(screen: Screen) -> Self {
		Self {
			to: screen,
			payload: None,
			fade: None,
		}
	}

	pub(crate) fn with_payload(mut self, setup: MatchSetup) -> Self {
		self.payload = Some(setup);
		self
	}

	pub(crate) fn with_fade(mut self, duration: Duration) -> Self {
		self.fade = Some(duration);
		self
	}

	fn validate(&self, from: Screen) -> anyhow::Result<()> {
		if !from.allows(self.to) {
			bail!("{from:?} cannot lead to {:?}", self.to);
		}
		match (self.to, self.payload) {
			(Screen::Match, None) => bail!("a match needs a match setup"),
			(Screen::Match, Some(_)) | (_, None) => Ok(()),
			(to, Some(_)) => bail!("{to:?} does not take a match setup"),
		}
	}
}

/// Marks the timer of a running fade.
#[derive(Debug, Reflect)]
pub(crate) struct ScreenFade;

/// The navigation a fade commits once it finishes.
#[derive(Component, Debug, Clone, Copy)]
struct PendingNavigation {
	to: Screen,
	payload: Option<MatchSetup>,
}

fn navigate(
	navigate: On<Navigate>,
	screen: Res<State<Screen>>,
	pending: Query<(), With<PendingNavigation>>,
	mut next_screen: ResMut<NextState<Screen>>,
	mut commands: Commands,
) {
	let from = *screen.get();
	let request = *navigate.event();
	if let Err(err) = request.validate(from) {
		error!("Ignoring navigation request: {err}");
		return;
	}
	if !pending.is_empty() {
		debug!("A transition is already running, ignoring {request:?}");
		return;
	}

	let pending = PendingNavigation {
		to: request.to,
		payload: request.payload,
	};
	let Some(duration) = request.fade else {
		commit(pending, &mut next_screen, &mut commands);
		return;
	};

	commands
		.spawn((
			Name::new("Screen Fade"),
			pending,
			GenericTimer::<ScreenFade>::once(duration),
			DespawnOnExit(from),
			Node {
				position_type: PositionType::Absolute,
				width: Val::Percent(100.0),
				height: Val::Percent(100.0),
				..default()
			},
			BackgroundColor(Color::NONE),
			GlobalZIndex(100),
		))
		.observe(finish_fade);
}

fn commit(
	pending: PendingNavigation,
	next_screen: &mut NextState<Screen>,
	commands: &mut Commands,
) {
	if let Some(setup) = pending.payload {
		commands.insert_resource(setup);
	}
	next_screen.set(pending.to);
}

fn finish_fade(
	finished: On<TimerFinished<ScreenFade>>,
	fades: Query<&PendingNavigation>,
	mut next_screen: ResMut<NextState<Screen>>,
	mut commands: Commands,
) -> Result {
	let pending = fades.get(finished.entity)?;
	commit(*pending, &mut next_screen, &mut commands);
	Ok(())
}

fn darken_fade(mut fades: Query<(&GenericTimer<ScreenFade>, &mut BackgroundColor)>) {
	for (timer, mut background) in &mut fades {
		background.0 = Color::BLACK.with_alpha(timer.fraction());
	}
}

/// Clicks, stops the music and heads back.
fn leave_screen(screen: Screen, audio: &mut ScreenAudio, commands: &mut Commands) {
	let Some(back) = screen.back() else {
		return;
	};
	audio.play(Cue::Click);
	audio.stop_background();
	commands.trigger(Navigate::to(back));
}

pub(crate) fn go_back(
	_: On<Pointer<Press>>,
	screen: Res<State<Screen>>,
	mut audio: ScreenAudio,
	mut commands: Commands,
) {
	leave_screen(*screen.get(), &mut audio, &mut commands);
}

fn go_back_on_escape(screen: Res<State<Screen>>, mut audio: ScreenAudio, mut commands: Commands) {
	leave_screen(*screen.get(), &mut audio, &mut commands);
}

/// Places outside the game a screen can link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LinkTarget {
	Discord,
}

/// Asks the platform to open a link. Does not change screens.
#[derive(Event, Debug, Clone, Copy)]
pub(crate) struct OpenLink(pub LinkTarget);

fn open_link(link: On<OpenLink>) {
	info!("Opening external link: {:?}", link.0);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{self, screen};

	#[test]
	fn transition_table() {
		use Screen::*;
		let allowed = [
			(Start, GameMode),
			(Start, Settings),
			(GameMode, Match),
			(GameMode, Start),
			(Settings, Start),
			(Match, Start),
		];
		for from in Screen::ALL {
			for to in Screen::ALL {
				assert_eq!(
					from.allows(to),
					allowed.contains(&(from, to)),
					"{from:?} -> {to:?}"
				);
			}
		}
	}

	#[test]
	fn payloads_only_travel_to_the_match() {
		let setup = MatchSetup {
			mode: MatchMode::OneVsOne,
			ai_difficulty: AiDifficulty::Easy,
		};
		assert!(Navigate::to(Screen::Match).validate(Screen::GameMode).is_err());
		assert!(
			Navigate::to(Screen::Match)
				.with_payload(setup)
				.validate(Screen::GameMode)
				.is_ok()
		);
		assert!(
			Navigate::to(Screen::Start)
				.with_payload(setup)
				.validate(Screen::GameMode)
				.is_err()
		);
		assert!(Navigate::to(Screen::Match).with_payload(setup).validate(Screen::Start).is_err());
	}

	#[test]
	fn invalid_requests_are_dropped() {
		let mut app = testing::app();
		app.update();

		app.world_mut().trigger(Navigate::to(Screen::Match));
		app.update();
		assert_eq!(screen(&app), Screen::Start);

		app.world_mut().trigger(Navigate::to(Screen::Settings));
		app.update();
		assert_eq!(screen(&app), Screen::Settings);

		app.world_mut().trigger(Navigate::to(Screen::GameMode));
		app.update();
		assert_eq!(screen(&app), Screen::Settings);
	}

	#[test]
	fn escape_goes_back_to_start() {
		let mut app = testing::app();
		app.update();
		app.world_mut().trigger(Navigate::to(Screen::GameMode));
		app.update();
		assert_eq!(screen(&app), Screen::GameMode);

		testing::press_key(&mut app, KeyCode::Escape);
		assert_eq!(screen(&app), Screen::Start);
	}

	#[test]
	fn requests_during_a_fade_are_ignored() {
		let mut app = testing::app();
		app.update();
		app.world_mut().trigger(Navigate::to(Screen::GameMode));
		app.update();

		let setup = MatchSetup {
			mode: MatchMode::OneVsOne,
			ai_difficulty: AiDifficulty::Medium,
		};
		app.world_mut().trigger(
			Navigate::to(Screen::Match)
				.with_payload(setup)
				.with_fade(FADE_DURATION),
		);
		app.world_mut().flush();
		app.world_mut().trigger(Navigate::to(Screen::Start));
		app.update();
		assert_eq!(screen(&app), Screen::GameMode);

		testing::advance(&mut app, FADE_DURATION * 2);
		assert_eq!(screen(&app), Screen::Match);
	}
}
