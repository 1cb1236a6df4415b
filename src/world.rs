use crate::systems::{System, SystemStore};
use crate::entities::EntityRegistry;
use crate::config::WorldConfig;
use crate::events::EventBus;
use std::ops::{Deref, DerefMut};

/// A container for [`entities`](crate::entities::Entity), systems and the [EventBus] they talk over.
///
/// `C` is the per-tick context passed to every [System] by [`update`](World::update).
/// The [World] dereferences to its [EntityRegistry], so entity and query calls can be made on it directly.
pub struct World<C: 'static = ()> {
	entity_registry: EntityRegistry,
	system_store: SystemStore<C>,
	events: EventBus,
	ticks: u64,
}

impl<C: 'static> World<C> {
	pub fn new() -> Self {
		Self::with_config(WorldConfig::default(), EventBus::new())
	}

	/// Creates a [World] with the given tunables, signalling over `events`.
	/// Worlds built with clones of the same bus share its subscribers.
	pub fn with_config(config: WorldConfig, events: EventBus) -> Self {
		Self {
			entity_registry: EntityRegistry::with_config(config),
			system_store: SystemStore::new(),
			events,
			ticks: 0,
		}
	}

	pub fn events(&self) -> &EventBus {
		&self.events
	}

	pub fn registry(&self) -> &EntityRegistry {
		&self.entity_registry
	}

	pub fn registry_mut(&mut self) -> &mut EntityRegistry {
		&mut self.entity_registry
	}

	/// Add a new [system](System) to the [World].
	///
	/// Systems run in the order they were added. Its [`setup`](System::setup) runs immediately.
	pub fn add_system<T: 'static + System<C>>(&mut self, system: T) {
		self.system_store.add_system(system, &self.events);
	}

	/// The first added [system](System) of type `T`.
	pub fn get_system<T: 'static + System<C>>(&self) -> Option<&T> {
		self.system_store.get::<T>()
	}

	pub fn get_system_mut<T: 'static + System<C>>(&mut self) -> Option<&mut T> {
		self.system_store.get_mut::<T>()
	}

	pub fn system_count(&self) -> usize {
		self.system_store.len()
	}

	/// Runs one tick: pending removals are applied, then every [system](System) runs in order.
	pub fn update(&mut self, frame: &C) {
		self.entity_registry.reconcile_removals();
		self.system_store.run_systems(&mut self.entity_registry, &self.events, frame);

		self.ticks += 1;
		tracing::trace!(tick = self.ticks, entities = self.entity_registry.len(), "world updated");
	}

	/// Number of completed [`update`](World::update) calls.
	pub fn ticks(&self) -> u64 {
		self.ticks
	}
}

impl<C: 'static> Default for World<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C: 'static> Deref for World<C> {
	type Target = EntityRegistry;

	#[inline(always)]
	fn deref(&self) -> &Self::Target {
		&self.entity_registry
	}
}

impl<C: 'static> DerefMut for World<C> {
	#[inline(always)]
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.entity_registry
	}
}
