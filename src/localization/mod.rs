//! Localization: the current language and text lookup with fallback.
//!
//! [`Localization`] is the single owner of the language preference. Screens
//! never cache strings; they tag their text entities with [`LocalizedText`]
//! and [`refresh_localized_text`] rewrites all of them whenever the language
//! changes.

mod table;

use std::{fmt, str::FromStr};

use anyhow::bail;
use bevy::{prelude::*, window::PrimaryWindow};
use tracing::{info, warn};

pub(crate) use table::TranslationTable;
#[cfg(test)]
use table::LocalizedString;

pub(super) fn plugin(app: &mut App) {
	app.init_resource::<Localization>();
	app.add_systems(
		Update,
		(
			refresh_localized_text,
			retitle_window.run_if(resource_changed::<Localization>),
		)
			.in_set(crate::AppSystems::Update),
	);
}

/// Used while the translation table has no title.
const WINDOW_TITLE: &str = "Luminary Soccer";

/// Languages the game ships with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub(crate) enum Language {
	#[default]
	En,
	Ru,
}

impl Language {
	pub(crate) fn code(self) -> &'static str {
		match self {
			Language::En => "en",
			Language::Ru => "ru",
		}
	}

	/// The language the settings toggle switches to.
	pub(crate) fn toggled(self) -> Self {
		match self {
			Language::En => Language::Ru,
			Language::Ru => Language::En,
		}
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

impl FromStr for Language {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"en" => Ok(Language::En),
			"ru" => Ok(Language::Ru),
			other => bail!("unknown language code `{other}`"),
		}
	}
}

/// How a key resolved against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
	/// Entry for the current language.
	Localized(&'static str),
	/// The current language has no entry, English was used.
	FellBack(&'static str),
	/// The key is not in the table at all.
	Missing,
}

impl Lookup {
	pub(crate) fn text(self) -> Option<&'static str> {
		match self {
			Lookup::Localized(text) | Lookup::FellBack(text) => Some(text),
			Lookup::Missing => None,
		}
	}
}

/// Current language plus the translation table it is looked up in.
#[derive(Resource, Debug, Clone, Default)]
pub(crate) struct Localization {
	language: Language,
	table: TranslationTable,
}

impl Localization {
	#[cfg(test)]
	pub(crate) fn new(table: TranslationTable) -> Self {
		Self {
			language: Language::default(),
			table,
		}
	}

	/// Switch languages. Does not persist anything; the settings screen
	/// saves the preference separately.
	pub(crate) fn set_language(&mut self, language: Language) {
		if self.language != language {
			info!("Language changed to: {language}");
		}
		self.language = language;
	}

	pub(crate) fn current_language(&self) -> Language {
		self.language
	}

	pub(crate) fn resolve(&self, key: &str) -> Lookup {
		let Some(text) = self.table.get(key) else {
			return Lookup::Missing;
		};
		match text.get(self.language) {
			Some(localized) => Lookup::Localized(localized),
			None => Lookup::FellBack(text.en),
		}
	}

	/// Text for `key`, falling back to English and then to the key itself.
	pub(crate) fn text<'a>(&self, key: &'a str) -> &'a str {
		self.resolve(key).text().unwrap_or_else(|| {
			warn!("Missing translation for key: {key}");
			key
		})
	}

	/// Like [`Localization::text`], but a missing key yields `fallback`.
	pub(crate) fn text_or<'a>(&self, key: &str, fallback: &'a str) -> &'a str {
		self.resolve(key).text().unwrap_or(fallback)
	}
}

/// A [`Text`] whose content is the translation of `key` followed by `suffix`.
///
/// Changing `key` re-renders the text on the next refresh, which is how
/// value labels (difficulty, language name) follow their setting.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
#[require(Text)]
pub(crate) struct LocalizedText {
	pub key: &'static str,
	pub suffix: &'static str,
}

impl LocalizedText {
	pub(crate) fn new(key: &'static str) -> Self {
		Self { key, suffix: "" }
	}

	pub(crate) fn with_suffix(mut self, suffix: &'static str) -> Self {
		self.suffix = suffix;
		self
	}

	pub(crate) fn render(&self, localization: &Localization) -> String {
		format!("{}{}", localization.text(self.key), self.suffix)
	}
}

fn refresh_localized_text(
	localization: Res<Localization>,
	mut labels: Query<(Ref<LocalizedText>, &mut Text)>,
) {
	let language_changed = localization.is_changed();
	for (label, mut text) in &mut labels {
		if language_changed || label.is_changed() {
			text.0 = label.render(&localization);
		}
	}
}

fn retitle_window(
	localization: Res<Localization>,
	mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
	for mut window in &mut windows {
		window.title = localization.text_or("gameTitle", WINDOW_TITLE).to_owned();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_key_resolves_to_its_own_language() {
		let table = TranslationTable::builtin();
		let mut localization = Localization::new(table.clone());

		for key in table.keys() {
			let entry = table.get(key).unwrap();

			localization.set_language(Language::Ru);
			assert_eq!(localization.text(key), entry.ru.unwrap());

			localization.set_language(Language::En);
			assert_eq!(localization.text(key), entry.en);
		}
	}

	#[test]
	fn unknown_keys_come_back_verbatim() {
		let localization = Localization::default();

		assert_eq!(localization.resolve("noSuchKey"), Lookup::Missing);
		assert_eq!(localization.text("noSuchKey"), "noSuchKey");
		assert_eq!(localization.text_or("noSuchKey", "Fallback"), "Fallback");
	}

	#[test]
	fn missing_russian_falls_back_to_english() {
		let table = TranslationTable::from_entries([(
			"kickoff",
			LocalizedString {
				en: "Kick-off",
				ru: None,
			},
		)]);
		let mut localization = Localization::new(table);
		localization.set_language(Language::Ru);

		assert_eq!(localization.resolve("kickoff"), Lookup::FellBack("Kick-off"));
		assert_eq!(localization.text("kickoff"), "Kick-off");
		assert_eq!(localization.text_or("kickoff", "unused"), "Kick-off");
	}

	#[test]
	fn language_codes_parse_back() {
		for language in [Language::En, Language::Ru] {
			assert_eq!(language.code().parse::<Language>().unwrap(), language);
		}
		assert!("de".parse::<Language>().is_err());
		assert_eq!(Language::En.toggled(), Language::Ru);
		assert_eq!(Language::Ru.toggled(), Language::En);
	}

	#[test]
	fn labels_follow_language_changes() {
		let mut app = App::new();
		app.add_plugins((MinimalPlugins, plugin));

		let title = app
			.world_mut()
			.spawn(LocalizedText::new("gameTitle"))
			.id();
		let label = app
			.world_mut()
			.spawn(LocalizedText::new("language").with_suffix(":"))
			.id();
		app.update();

		assert_eq!(app.world().get::<Text>(title).unwrap().0, "LUMINARY SOCCER");
		assert_eq!(app.world().get::<Text>(label).unwrap().0, "Language:");

		app.world_mut()
			.resource_mut::<Localization>()
			.set_language(Language::Ru);
		app.update();

		assert_eq!(app.world().get::<Text>(title).unwrap().0, "ЛЮМИНАРИ ФУТБОЛ");
		assert_eq!(app.world().get::<Text>(label).unwrap().0, "Язык:");
	}

	#[test]
	fn changing_the_key_rerenders_the_label() {
		let mut app = App::new();
		app.add_plugins((MinimalPlugins, plugin));

		let value = app.world_mut().spawn(LocalizedText::new("easy")).id();
		app.update();
		assert_eq!(app.world().get::<Text>(value).unwrap().0, "Easy");

		app.world_mut()
			.get_mut::<LocalizedText>(value)
			.unwrap()
			.key = "hard";
		app.update();
		assert_eq!(app.world().get::<Text>(value).unwrap().0, "Hard");
	}
}
