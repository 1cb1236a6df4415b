//! A unique runtime identifier tied to a [Component] type.
//!
//! Developers shouldn't rely on [component ids](ComponentId), as they are not stable between program re-runs.
//! Ids are handed out in first-use order and double as the keys of the
//! [registry](crate::entities::EntityRegistry)'s component-type index.

use crate::components::Component;
use nohash_hasher::IsEnabled;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::fmt;

lazy_static! {
	static ref COMPONENT_NAMES: RwLock<Vec<&'static str>> = RwLock::new(Vec::new());
}

/// A globally unique identifier for a type implementing the [`Component`] trait.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct ComponentId {
	value: usize,
}

impl ComponentId {
	/// Get the [ComponentId] of the type `T`.
	#[inline(always)]
	pub fn of<T: Component>() -> ComponentId {
		T::component_id()
	}

	/// Allocates a new [ComponentId] for a type called `name`. **Should not be called from user code.**
	///
	/// To be called once per type from code generated by #\[derive([Component])].
	#[doc(hidden)]
	pub fn register(name: &'static str) -> ComponentId {
		let mut names = COMPONENT_NAMES.write();
		let value = names.len();
		debug_assert!(
			value <= u32::MAX as usize,
			"This is an insane number of components. Please seek help."
		);
		names.push(name);
		ComponentId { value }
	}

	/// The name of the type this id was registered for.
	pub fn name(&self) -> &'static str {
		COMPONENT_NAMES.read().get(self.value).copied().unwrap_or("<unregistered>")
	}
}

impl IsEnabled for ComponentId {}

impl fmt::Display for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
