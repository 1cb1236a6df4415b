use nohash_hasher::IsEnabled;
use std::fmt;

/// A unique handle to an `Entity`.
///
/// Ids are handed out in strictly increasing order and never reused,
/// until the owning registry is [cleared](crate::entities::EntityRegistry::clear_world).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Entity {
	pub(crate) id: u64,
}

impl Entity {
	#[inline(always)]
	pub const fn id(&self) -> u64 {
		self.id
	}
}

impl IsEnabled for Entity {}

impl fmt::Display for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Entity({})", self.id)
	}
}

/// Monotonic id source for a single registry.
#[derive(Default)]
pub(crate) struct EntityAllocator {
	next: u64,
}

impl EntityAllocator {
	pub fn allocate(&mut self) -> Entity {
		let entity = Entity { id: self.next };
		self.next += 1;
		entity
	}

	pub fn reset(&mut self) {
		self.next = 0;
	}

	pub fn allocated(&self) -> u64 {
		self.next
	}
}
