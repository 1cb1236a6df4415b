use crate::entities::EntityRegistry;
use crate::systems::{AsAny, System};
use crate::events::EventBus;

/// Systems in the order they were added.
pub(crate) struct SystemStore<C: 'static> {
	systems: Vec<Box<dyn System<C>>>,
}

impl<C: 'static> SystemStore<C> {
	pub fn new() -> Self {
		Self {
			systems: Vec::default(),
		}
	}

	pub fn add_system<T: 'static + System<C>>(&mut self, mut system: T, events: &EventBus) {
		system.setup(events);
		self.systems.push(Box::new(system));
	}

	pub fn get<T: 'static + System<C>>(&self) -> Option<&T> {
		self.systems.iter().find_map(|system| {
			let system: &dyn System<C> = &**system;
			AsAny::as_any(system).downcast_ref::<T>()
		})
	}

	pub fn get_mut<T: 'static + System<C>>(&mut self) -> Option<&mut T> {
		self.systems.iter_mut().find_map(|system| {
			let system: &mut dyn System<C> = &mut **system;
			AsAny::as_any_mut(system).downcast_mut::<T>()
		})
	}

	pub fn len(&self) -> usize {
		self.systems.len()
	}

	pub fn run_systems(&mut self, entities: &mut EntityRegistry, events: &EventBus, frame: &C) {
		self.systems.iter_mut().for_each(|s| s.update(entities, events, frame));
	}
}
