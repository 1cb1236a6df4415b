//! [Entities](Entity) represent the individual "things" in the game.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Components](crate::components::Component)) belong together.
//! The [EntityRegistry] owns both directions of that relationship and answers queries against it.

mod entity;
mod entity_query;
mod entity_registry;

pub use entity::Entity;
pub use entity_registry::*;

pub(crate) use entity::EntityAllocator;
pub(crate) use entity_query::*;
