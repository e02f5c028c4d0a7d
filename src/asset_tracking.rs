//! Loads asset collections and exposes them as resources once they are ready.

use bevy::{
	asset::{AssetEventSystems, UntypedAssetId},
	platform::collections::HashMap,
	prelude::*,
};
use tracing::debug;

pub(super) fn plugin(app: &mut App) {
	app.init_resource::<ResourceHandles>();
	app.add_systems(PreUpdate, load_resource_assets.after(AssetEventSystems));
}

pub(crate) trait LoadResource {
	/// Loads `T` as an [`Asset`] and inserts it as a [`Resource`] after all
	/// of its dependencies have loaded. Until then the resource does not
	/// exist, so consumers take it as `Option<Res<T>>`.
	fn load_resource<T: Resource + Asset + Clone + FromWorld>(&mut self) -> &mut Self;
}

impl LoadResource for App {
	fn load_resource<T: Resource + Asset + Clone + FromWorld>(&mut self) -> &mut Self {
		self.init_asset::<T>();
		let world = self.world_mut();
		let value = T::from_world(world);
		let handle = world.resource::<AssetServer>().add(value);

		world.resource_mut::<ResourceHandles>().waiting.insert(
			handle.id().into(),
			(handle.untyped(), |world, handle| {
				let assets = world.resource::<Assets<T>>();
				if let Some(value) = assets.get(handle.id().typed::<T>()) {
					world.insert_resource(value.clone());
				}
			}),
		);
		self
	}
}

type InsertLoadedResource = fn(&mut World, &UntypedHandle);

#[derive(Resource, Default)]
pub(crate) struct ResourceHandles {
	waiting: HashMap<UntypedAssetId, (UntypedHandle, InsertLoadedResource)>,
}

fn load_resource_assets(world: &mut World) {
	world.resource_scope(|world, mut handles: Mut<ResourceHandles>| {
		let loaded: Vec<_> = {
			let assets = world.resource::<AssetServer>();
			handles
				.waiting
				.iter()
				.filter_map(|(id, (handle, _))| assets.is_loaded_with_dependencies(handle).then_some(*id))
				.collect()
		};

		for id in loaded {
			let Some((handle, insert)) = handles.waiting.remove(&id) else {
				continue;
			};
			debug!("Asset collection {id:?} finished loading");
			insert(world, &handle);
		}
	});
}
