use crate::game::{Animation, Frame, Position, Renderable, Velocity, CANCEL_MOVE, MOVE};
use crate::events::{EventBus, SubscriptionGuard};
use crate::entities::{Entity, EntityRegistry};
use crate::systems::System;
use std::cell::Cell;
use std::rc::Rc;

/// Applies velocities to positions, once per [`MOVE`] event.
///
/// [`CANCEL_MOVE`] disarms it again before the next tick.
pub struct MovementSystem {
	armed: Rc<Cell<bool>>,
	subscriptions: Vec<SubscriptionGuard>,
}

impl MovementSystem {
	pub fn new() -> Self {
		Self {
			armed: Rc::new(Cell::new(false)),
			subscriptions: Vec::new(),
		}
	}

	pub fn is_armed(&self) -> bool {
		self.armed.get()
	}
}

impl Default for MovementSystem {
	fn default() -> Self {
		Self::new()
	}
}

impl<C> System<C> for MovementSystem {
	fn setup(&mut self, events: &EventBus) {
		let arm = events.subscribe(MOVE, &self.armed, |armed: &Cell<bool>, _: &()| armed.set(true));
		let disarm = events.subscribe(CANCEL_MOVE, &self.armed, |armed: &Cell<bool>, _: &()| armed.set(false));

		self.subscriptions.push(arm.scoped(events));
		self.subscriptions.push(disarm.scoped(events));
	}

	fn update(&mut self, world: &mut EntityRegistry, _: &EventBus, _: &C) {
		if !self.armed.get() {
			return;
		}

		for (_, (position, velocity)) in world.get_entities_with::<(Position, Velocity)>() {
			let velocity = velocity.get();
			let mut position = position.borrow_mut();
			position.x += velocity.x;
			position.y += velocity.y;
		}

		self.armed.set(false);
	}
}

/// Steps [Animation]s and mirrors the current frame into [Renderable].
///
/// Entities whose one-shot animation has finished are marked for removal.
#[derive(Default)]
pub struct AnimationSystem {
	finished: Vec<Entity>,
}

impl AnimationSystem {
	pub fn new() -> Self {
		Self::default()
	}
}

impl System<Frame> for AnimationSystem {
	fn update(&mut self, world: &mut EntityRegistry, _: &EventBus, frame: &Frame) {
		self.finished.clear();

		for (entity, (animation,)) in world.get_entities_with::<(Animation,)>() {
			let mut animation = animation.borrow_mut();
			if animation.advance(frame.delta_ms) {
				self.finished.push(entity);
			}

			if let (Some(renderable), Some(sprite)) = (world.get_component::<Renderable>(entity), animation.current()) {
				renderable.borrow_mut().sprite = sprite;
			}
		}

		world.mark_for_removal(&self.finished);
	}
}
