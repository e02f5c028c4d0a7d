//! One-shot timers attached to entities, tagged by a marker type so that
//! different timers can be observed separately.

use std::marker::PhantomData;

use bevy::prelude::*;

/// Triggered on the timer's entity when a [`GenericTimer<T>`] runs out.
#[derive(EntityEvent)]
pub(crate) struct TimerFinished<T> {
	pub entity: Entity,
	_phantom: PhantomData<T>,
}

#[derive(Component, Reflect)]
pub(crate) struct GenericTimer<T: Sync + Send + 'static> {
	timer: Timer,
	_phantom: PhantomData<T>,
}

impl<T: Sync + Send + 'static> GenericTimer<T> {
	pub(crate) fn new(timer: Timer) -> Self {
		Self {
			timer,
			_phantom: PhantomData,
		}
	}

	pub(crate) fn once(duration: std::time::Duration) -> Self {
		Self::new(Timer::new(duration, TimerMode::Once))
	}

	/// Elapsed share of the timer in [0, 1].
	pub(crate) fn fraction(&self) -> f32 {
		self.timer.fraction()
	}
}

pub(crate) trait TimerAppExt {
	/// Ticks every [`GenericTimer<T>`] in [`Update`].
	fn add_timer<T: Sync + Send + 'static>(&mut self) -> &mut Self;
}

impl TimerAppExt for App {
	fn add_timer<T: Sync + Send + 'static>(&mut self) -> &mut Self {
		self.add_systems(
			Update,
			tick_timer::<T>.in_set(crate::AppSystems::TickTimers),
		)
	}
}

fn tick_timer<T: Sync + Send + 'static>(
	mut timers: Query<(Entity, &mut GenericTimer<T>)>,
	time: Res<Time>,
	mut commands: Commands,
) {
	for (entity, mut timer) in &mut timers {
		timer.timer.tick(time.delta());

		if timer.timer.just_finished() {
			commands.trigger(TimerFinished {
				entity,
				_phantom: PhantomData::<T>,
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use bevy::time::TimeUpdateStrategy;

	use super::*;

	struct Kickoff;

	#[derive(Resource, Default)]
	struct Finished(Vec<Entity>);

	#[test]
	fn finished_fires_once_on_the_timer_entity() {
		let mut app = App::new();
		app.add_plugins(MinimalPlugins);
		app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
		app.init_resource::<Finished>();
		app.add_timer::<Kickoff>();

		let timer = app
			.world_mut()
			.spawn(GenericTimer::<Kickoff>::once(Duration::from_millis(250)))
			.observe(|finished: On<TimerFinished<Kickoff>>, mut log: ResMut<Finished>| {
				log.0.push(finished.entity);
			})
			.id();

		for _ in 0..6 {
			app.update();
		}

		assert_eq!(app.world().resource::<Finished>().0, [timer]);
		let fraction = app
			.world()
			.get::<GenericTimer<Kickoff>>(timer)
			.unwrap()
			.fraction();
		assert_eq!(fraction, 1.0);
	}
}
