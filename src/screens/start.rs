//! The main menu.

use bevy::{prelude::*, ui::Val::*};

use crate::{
	audio::{Cue, ScreenAudio},
	localization::LocalizedText,
	screens::{LinkTarget, Navigate, OpenLink, Screen},
	theme::{interaction::InteractionPalette, palette::*, widget},
};

pub(super) fn plugin(app: &mut App) {
	app.add_systems(OnEnter(Screen::Start), spawn_start_screen);
}

fn spawn_start_screen(mut commands: Commands) {
	commands.spawn((
		widget::ui_root("Start Screen"),
		DespawnOnExit(Screen::Start),
		BackgroundColor(SCREEN_BACKGROUND),
		children![
			widget::header("gameTitle"),
			(
				Name::new("Clan Name"),
				LocalizedText::new("clanName"),
				TextFont::from_font_size(24.0),
				TextColor(DISCORD_TEXT),
				Pickable::IGNORE,
			),
			(
				Name::new("Menu"),
				Node {
					flex_direction: FlexDirection::Column,
					align_items: AlignItems::Center,
					row_gap: Px(10.0),
					margin: UiRect::vertical(Px(30.0)),
					..default()
				},
				Pickable::IGNORE,
				children![
					widget::button("playButton", open_game_modes),
					widget::button("settingsButton", open_settings),
					widget::text_button(
						LocalizedText::new("discordButton"),
						28.0,
						InteractionPalette::steady(DISCORD_TEXT),
						open_discord,
					),
				],
			),
			(
				Name::new("Instructions"),
				LocalizedText::new("instructions"),
				TextFont::from_font_size(16.0),
				TextColor(HINT_TEXT),
				Pickable::IGNORE,
			),
		],
	));
}

fn open_game_modes(_: On<Pointer<Press>>, mut audio: ScreenAudio, mut commands: Commands) {
	audio.play(Cue::GameStart);
	commands.trigger(Navigate::to(Screen::GameMode));
}

fn open_settings(_: On<Pointer<Press>>, mut audio: ScreenAudio, mut commands: Commands) {
	audio.play(Cue::Click);
	commands.trigger(Navigate::to(Screen::Settings));
}

fn open_discord(_: On<Pointer<Press>>, mut audio: ScreenAudio, mut commands: Commands) {
	audio.play(Cue::Click);
	commands.trigger(OpenLink(LinkTarget::Discord));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing;

	#[test]
	fn start_screen_shows_localized_menu() {
		let mut app = testing::app();
		app.update();
		app.update();

		let texts = testing::texts(&mut app);
		for expected in ["LUMINARY SOCCER", "PLAY", "SETTINGS", "JOIN DISCORD", "Luminary Clan"] {
			assert!(texts.iter().any(|text| text == expected), "missing {expected:?} in {texts:?}");
		}
	}

	#[derive(Resource, Default)]
	struct OpenedLinks(Vec<LinkTarget>);

	#[test]
	fn discord_opens_a_link_without_leaving_the_menu() {
		let mut app = testing::app();
		app.init_resource::<OpenedLinks>();
		app.add_observer(|link: On<OpenLink>, mut opened: ResMut<OpenedLinks>| {
			opened.0.push(link.0);
		});
		app.update();

		let discord = testing::text_entity(&mut app, "discordButton");
		app.world_mut()
			.trigger(testing::pointer(discord, 0.0, testing::press()));
		app.update();
		app.update();

		assert_eq!(app.world().resource::<OpenedLinks>().0, [LinkTarget::Discord]);
		assert_eq!(testing::screen(&app), Screen::Start);
	}

	#[test]
	fn clan_name_uses_the_discord_color() {
		let mut app = testing::app();
		app.update();

		let clan = testing::text_entity(&mut app, "clanName");
		assert_eq!(
			app.world().get::<TextColor>(clan).map(|color| color.0),
			Some(DISCORD_TEXT)
		);
	}

	#[test]
	fn menu_follows_the_saved_language() {
		let mut app = testing::app_with_store([("game_language", "ru")]);
		app.update();
		app.update();

		let texts = testing::texts(&mut app);
		assert!(texts.iter().any(|text| text == "ИГРАТЬ"), "{texts:?}");
		assert!(texts.iter().any(|text| text == "НАСТРОЙКИ"), "{texts:?}");
	}
}
