/// Tunables for an [EntityRegistry](crate::entities::EntityRegistry) and its [World](crate::world::World).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
	/// Cache intersection results until the next structural change.
	pub cache_queries: bool,
	/// Log a warning when attaching a component overwrites an existing one.
	pub warn_on_overwrite: bool,
	/// Number of entities to reserve space for up front.
	pub initial_capacity: usize,
}

impl WorldConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_query_cache(mut self, enabled: bool) -> Self {
		self.cache_queries = enabled;
		self
	}

	pub fn with_overwrite_warnings(mut self, enabled: bool) -> Self {
		self.warn_on_overwrite = enabled;
		self
	}

	pub fn with_capacity(mut self, capacity: usize) -> Self {
		self.initial_capacity = capacity;
		self
	}
}

impl Default for WorldConfig {
	fn default() -> Self {
		Self {
			cache_queries: true,
			warn_on_overwrite: cfg!(debug_assertions),
			initial_capacity: 0,
		}
	}
}
