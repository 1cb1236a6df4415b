//! [Systems](System) provide the logic for modifying the state of [Entities](crate::entities::Entity)
//! and their associated [Components](crate::components::Component).
//!
//! A [System] must be manually added to a [World](crate::world::World)
//! for it to become active during the execution of the program.
//! Systems run in the order they were added; a system that consumes state another one produces
//! in the same tick has to be added after it.

mod system;
mod system_store;

pub use system::*;
pub(crate) use system_store::*;
