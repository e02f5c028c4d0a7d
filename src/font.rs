//! The pixel font every piece of text uses unless it picks its own.

use bevy::{
	ecs::{lifecycle::HookContext, world::DeferredWorld},
	prelude::*,
};

pub(crate) fn plugin(app: &mut App) {
	app.register_type::<FontAssets>();
	app.world_mut()
		.register_component_hooks::<TextFont>()
		.on_add(on_add_text);

	let assets = app.world().resource::<AssetServer>();
	app.insert_resource(FontAssets {
		default: assets.load("fonts/RetroPixel.ttf"),
	});
}

#[derive(Resource, Clone, Debug, Reflect)]
#[reflect(Resource)]
pub(crate) struct FontAssets {
	pub default: Handle<Font>,
}

fn on_add_text(mut world: DeferredWorld, ctx: HookContext) {
	let Some(default_font) = world
		.get_resource::<FontAssets>()
		.map(|fonts| fonts.default.clone())
	else {
		return;
	};
	let Some(mut font) = world.get_mut::<TextFont>(ctx.entity) else {
		return;
	};

	if font.font == Handle::default() {
		font.font = default_font;
	}
}
