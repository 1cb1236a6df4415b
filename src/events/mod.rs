//! Publish/subscribe signalling between [systems](crate::systems::System).
//!
//! Subscribers are held weakly: a registration never keeps its owner alive,
//! and registrations whose owner is gone are skipped and pruned.

mod event_bus;
mod subscription;

pub use event_bus::{EventBus, EventKey};
pub use subscription::*;

pub(crate) use event_bus::SubscriberTable;
