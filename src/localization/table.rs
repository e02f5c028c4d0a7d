//! The game's built-in strings.

use bevy::platform::collections::HashMap;

use super::Language;

/// Display text for one key, per language.
///
/// English is the fallback root and therefore mandatory. A missing Russian
/// entry is tolerated and resolves to English at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LocalizedString {
	pub en: &'static str,
	pub ru: Option<&'static str>,
}

impl LocalizedString {
	pub(crate) const fn new(en: &'static str, ru: &'static str) -> Self {
		Self { en, ru: Some(ru) }
	}

	pub(crate) fn get(&self, language: Language) -> Option<&'static str> {
		match language {
			Language::En => Some(self.en),
			Language::Ru => self.ru,
		}
	}
}

/// Immutable key -> [`LocalizedString`] mapping.
#[derive(Debug, Clone)]
pub(crate) struct TranslationTable {
	entries: HashMap<&'static str, LocalizedString>,
}

impl TranslationTable {
	pub(crate) fn from_entries(
		entries: impl IntoIterator<Item = (&'static str, LocalizedString)>,
	) -> Self {
		let mut map = HashMap::default();
		for (key, text) in entries {
			let duplicate = map.contains_key(key);
			debug_assert!(!duplicate, "duplicate translation key `{key}`");
			if !duplicate {
				map.insert(key, text);
			}
		}
		Self { entries: map }
	}

	pub(crate) fn builtin() -> Self {
		Self::from_entries(BUILTIN.iter().copied())
	}

	pub(crate) fn get(&self, key: &str) -> Option<&LocalizedString> {
		self.entries.get(key)
	}

	#[cfg(test)]
	pub(crate) fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.entries.keys().copied()
	}
}

impl Default for TranslationTable {
	fn default() -> Self {
		Self::builtin()
	}
}

const BUILTIN: &[(&str, LocalizedString)] = &[
	// Main menu
	("gameTitle", LocalizedString::new("LUMINARY SOCCER", "ЛЮМИНАРИ ФУТБОЛ")),
	("playButton", LocalizedString::new("PLAY", "ИГРАТЬ")),
	("settingsButton", LocalizedString::new("SETTINGS", "НАСТРОЙКИ")),
	("discordButton", LocalizedString::new("JOIN DISCORD", "DISCORD КЛАН")),
	("clanName", LocalizedString::new("Luminary Clan", "Клан Люминари")),
	// Game modes
	("oneVsOne", LocalizedString::new("1 vs 1", "1 против 1")),
	("oneVsAI", LocalizedString::new("1 vs AI", "1 против ИИ")),
	("aiDifficulty", LocalizedString::new("AI Difficulty", "Сложность ИИ")),
	("easy", LocalizedString::new("Easy", "Легко")),
	("medium", LocalizedString::new("Medium", "Средне")),
	("hard", LocalizedString::new("Hard", "Сложно")),
	// Match HUD
	("score", LocalizedString::new("Score", "Счёт")),
	("time", LocalizedString::new("Time", "Время")),
	("goal", LocalizedString::new("GOAL!", "ГОЛ!")),
	(
		"gamePaused",
		LocalizedString::new(
			"GAME PAUSED\nPress P to Continue",
			"ИГРА НА ПАУЗЕ\nНажмите P для продолжения",
		),
	),
	// Controls
	("player1Controls", LocalizedString::new("Player 1", "Игрок 1")),
	("player2Controls", LocalizedString::new("Player 2", "Игрок 2")),
	("aiControls", LocalizedString::new("AI Player", "ИИ Игрок")),
	("jump", LocalizedString::new("Jump", "Прыжок")),
	("move", LocalizedString::new("Move", "Движение")),
	("slide", LocalizedString::new("Slide", "Подкат")),
	("kick", LocalizedString::new("Kick", "Удар")),
	// Victory screen
	("victory", LocalizedString::new("VICTORY!", "ПОБЕДА!")),
	("defeat", LocalizedString::new("DEFEAT!", "ПОРАЖЕНИЕ!")),
	("draw", LocalizedString::new("DRAW!", "НИЧЬЯ!")),
	("playAgain", LocalizedString::new("PLAY AGAIN", "ИГРАТЬ СНОВА")),
	("backToMenu", LocalizedString::new("BACK TO MENU", "В ГЛАВНОЕ МЕНЮ")),
	// Settings
	("language", LocalizedString::new("Language", "Язык")),
	("languageName", LocalizedString::new("English", "Русский")),
	("musicVolume", LocalizedString::new("Music Volume", "Громкость музыки")),
	("sfxVolume", LocalizedString::new("SFX Volume", "Громкость звуков")),
	// Instructions
	(
		"instructions",
		LocalizedString::new(
			"Player 1: WASD + SPACE    Player 2: Arrow Keys + SHIFT\n\n\
			 MOVE: Arrow Keys / WASD    JUMP: Up / W    SLIDE: Down / S    KICK: Space / Shift\n\n\
			 Face the ball to kick properly - body contact will bounce the ball!",
			"Игрок 1: WASD + ПРОБЕЛ    Игрок 2: Стрелки + SHIFT\n\n\
			 ДВИЖЕНИЕ: Стрелки / WASD    ПРЫЖОК: Вверх / W    ПОДКАТ: Вниз / S    УДАР: Пробел / Shift\n\n\
			 Поворачивайтесь к мячу для точного удара - касание телом отбивает мяч!",
		),
	),
];
