//! [Components](Component) are the data attached to [entities](crate::entities::Entity).
//!
//! Every component type gets a [ComponentId] on first use; values are stored behind
//! shared [handles](ComponentRef) so systems can mutate them in place.

mod component_id;
mod component_set;
mod component_type;

pub use component_id::*;
pub use component_set::{ComponentBundle, ComponentMap, ComponentSet};
pub use component_type::*;
pub use dalek_ecs_derive::Component;
