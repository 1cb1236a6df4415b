use crate::entities::EntityRegistry;
use crate::events::EventBus;
use std::any::Any;

/// It provides the logic for modifying the state of [Entities](crate::entities::Entity)
/// and their associated [Components](crate::components::Component).
///
/// `C` is the per-tick context handed to [`update`](System::update), such as elapsed time or input.
/// A system that wants to pause keeps its own flag and returns early; the scheduler always calls it.
pub trait System<C>: AsAny {
	/// Called once when the system is added to a [World](crate::world::World).
	/// This is where subscriptions to the [EventBus] are made.
	fn setup(&mut self, _events: &EventBus) {}

	/// Executes the system for one tick.
	fn update(&mut self, world: &mut EntityRegistry, events: &EventBus, frame: &C);
}

/// Upcast to [Any], used to look systems up by their concrete type.
pub trait AsAny: Any {
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
