use crate::components::ComponentId;
use crate::entities::Entity;
use nohash_hasher::{IntMap, IntSet};
use std::collections::HashMap;
use std::rc::Rc;

/// For every component type, the entities currently carrying it.
pub(crate) type ComponentIndex = IntMap<ComponentId, IntSet<Entity>>;

/// Entities present in the index under every id in `ids`, ordered by id.
///
/// The smallest set drives the scan, so the cost follows the rarest component.
pub(crate) fn intersect(index: &ComponentIndex, ids: &[ComponentId]) -> Vec<Entity> {
	let mut sets = Vec::with_capacity(ids.len());
	for id in ids {
		match index.get(id) {
			Some(set) => sets.push(set),
			None => return Vec::new(),
		}
	}

	sets.sort_unstable_by_key(|set| set.len());
	let (smallest, rest) = match sets.split_first() {
		Some(split) => split,
		None => return Vec::new(),
	};

	let mut entities: Vec<Entity> = smallest
		.iter()
		.copied()
		.filter(|entity| rest.iter().all(|set| set.contains(entity)))
		.collect();

	entities.sort_unstable();
	entities
}

/// Intersection results remembered until the registry's generation moves on.
#[derive(Default)]
pub(crate) struct QueryCache {
	generation: u64,
	entries: HashMap<Vec<ComponentId>, Rc<[Entity]>>,
}

impl QueryCache {
	pub fn get_or_insert_with(
		&mut self, generation: u64, ids: &[ComponentId], compute: impl FnOnce() -> Vec<Entity>,
	) -> Rc<[Entity]> {
		if self.generation != generation {
			self.entries.clear();
			self.generation = generation;
		}

		let mut key = ids.to_vec();
		key.sort_unstable();
		key.dedup();

		if let Some(entities) = self.entries.get(&key) {
			return entities.clone();
		}

		let entities: Rc<[Entity]> = compute().into();
		self.entries.insert(key, entities.clone());
		entities
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}
}
