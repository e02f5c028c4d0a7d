//! Helper functions for creating common widgets.

use std::borrow::Cow;

use bevy::{
	ecs::{spawn::SpawnWith, system::IntoObserverSystem},
	prelude::*,
	ui::Val::*,
};

use crate::{
	localization::LocalizedText,
	theme::{interaction::InteractionPalette, palette::*},
};

/// A root UI node that fills the window and centers its content.
pub(crate) fn ui_root(name: impl Into<Cow<'static, str>>) -> impl Bundle {
	(
		Name::new(name),
		Node {
			position_type: PositionType::Absolute,
			width: Percent(100.0),
			height: Percent(100.0),
			align_items: AlignItems::Center,
			justify_content: JustifyContent::Center,
			flex_direction: FlexDirection::Column,
			row_gap: Px(20.0),
			..default()
		},
		Pickable::IGNORE,
	)
}

/// A large localized title.
pub(crate) fn header(key: &'static str) -> impl Bundle {
	(
		Name::new("Header"),
		LocalizedText::new(key),
		TextFont::from_font_size(48.0),
		TextColor(HEADER_TEXT),
	)
}

/// A localized line of text.
pub(crate) fn label(text: LocalizedText) -> impl Bundle {
	(
		Name::new("Label"),
		text,
		TextFont::from_font_size(24.0),
		TextColor(LABEL_TEXT),
		Pickable::IGNORE,
	)
}

/// A text button that turns yellow on hover.
pub(crate) fn button<E, B, M, I>(key: &'static str, action: I) -> impl Bundle
where
	E: EntityEvent,
	B: Bundle,
	I: IntoObserverSystem<E, B, M>,
{
	text_button(
		LocalizedText::new(key),
		36.0,
		InteractionPalette::new(BUTTON_TEXT, BUTTON_HOVERED_TEXT),
		action,
	)
}

/// A smaller button, used for "back" links.
pub(crate) fn small_button<E, B, M, I>(key: &'static str, action: I) -> impl Bundle
where
	E: EntityEvent,
	B: Bundle,
	I: IntoObserverSystem<E, B, M>,
{
	text_button(
		LocalizedText::new(key),
		28.0,
		InteractionPalette::steady(BUTTON_TEXT),
		action,
	)
}

/// A text button with full control over its text, size and hover colors.
pub(crate) fn text_button<E, B, M, I>(
	text: LocalizedText,
	font_size: f32,
	palette: InteractionPalette,
	action: I,
) -> impl Bundle
where
	E: EntityEvent,
	B: Bundle,
	I: IntoObserverSystem<E, B, M>,
{
	let action = IntoObserverSystem::into_system(action);
	(
		Name::new("Button"),
		Node::default(),
		Children::spawn(SpawnWith(move |parent: &mut ChildSpawner| {
			parent
				.spawn((
					Name::new("Button Text"),
					Button,
					text,
					TextFont::from_font_size(font_size),
					TextColor(palette.none),
					palette,
				))
				.observe(action);
		})),
	)
}
