use bevy::prelude::*;

/// #ffffff
pub(crate) const LABEL_TEXT: Color = Color::WHITE;
/// #ffffff
pub(crate) const HEADER_TEXT: Color = Color::WHITE;
/// #cccccc
pub(crate) const HINT_TEXT: Color = Color::srgb(0.8, 0.8, 0.8);
/// #ffffff
pub(crate) const BUTTON_TEXT: Color = Color::WHITE;
/// #ffff00, also used for values the player can change.
pub(crate) const BUTTON_HOVERED_TEXT: Color = Color::srgb(1.0, 1.0, 0.0);
/// #ff8800
pub(crate) const BUTTON_HOVERED_ALT_TEXT: Color = Color::srgb(1.0, 0.533, 0.0);
/// #7289da, shared by the clan name and the Discord link.
pub(crate) const DISCORD_TEXT: Color = Color::srgb(0.447, 0.537, 0.855);

/// #13321a, a darkened pitch behind every menu.
pub(crate) const SCREEN_BACKGROUND: Color = Color::srgb(0.075, 0.196, 0.102);

/// #333333
pub(crate) const SLIDER_TRACK: Color = Color::srgb(0.2, 0.2, 0.2);
/// #00ff00
pub(crate) const SLIDER_FILL: Color = Color::srgb(0.0, 1.0, 0.0);
/// #ffffff
pub(crate) const SLIDER_KNOB: Color = Color::WHITE;
