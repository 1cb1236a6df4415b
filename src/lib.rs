extern crate self as dalek_ecs;

pub mod components;
pub mod entities;
pub mod systems;
pub mod events;
pub mod config;
pub mod error;
pub mod world;
pub mod game;

pub use lazy_static::lazy_static;

pub mod prelude {
	pub use crate::systems::*;
	pub use crate::components::*;
	pub use crate::world::World;
	pub use crate::config::WorldConfig;
	pub use crate::error::{EcsError, Result};
	pub use crate::entities::{Entity, EntityRegistry};
	pub use crate::events::{EventBus, EventKey, Subscription, SubscriptionGuard};
}

#[cfg(test)]
mod tests;
