use crate::components::{AnyComponent, Component, ComponentBundle, ComponentId, ComponentMap, ComponentRef, ComponentSet};
use crate::entities::{intersect, ComponentIndex, Entity, EntityAllocator, QueryCache};
use crate::error::{EcsError, Result};
use crate::config::WorldConfig;
use nohash_hasher::{IntMap, IntSet};
use std::cell::RefCell;
use std::rc::Rc;

/// A container for [Entities](Entity) and their associated [Components](Component).
///
/// Two indices are kept in lockstep: entity to components, and component type to entities.
/// After any public call returns, an entity is listed under a component type
/// if and only if it carries a value of that type.
pub struct EntityRegistry {
	config: WorldConfig,
	allocator: EntityAllocator,

	entities: IntMap<Entity, ComponentMap>,
	components: ComponentIndex,
	pending: IntSet<Entity>,

	generation: u64,
	cache: RefCell<QueryCache>,
}

impl EntityRegistry {
	pub fn new() -> Self {
		Self::with_config(WorldConfig::default())
	}

	pub fn with_config(config: WorldConfig) -> Self {
		let capacity = config.initial_capacity;
		Self {
			config,
			allocator: EntityAllocator::default(),

			entities: IntMap::with_capacity_and_hasher(capacity, Default::default()),
			components: ComponentIndex::default(),
			pending: IntSet::default(),

			generation: 0,
			cache: RefCell::new(QueryCache::default()),
		}
	}

	pub fn config(&self) -> &WorldConfig {
		&self.config
	}

	/// Creates a new [entity](Entity) carrying the given [components](Component).
	///
	/// If the bundle lists the same type more than once, the last value wins.
	pub fn add_entity<B: ComponentBundle>(&mut self, bundle: B) -> Entity {
		self.add_entity_from(bundle.into_components())
	}

	/// Creates a new [entity](Entity) from a component list assembled at runtime.
	pub fn add_entity_from(&mut self, components: impl IntoIterator<Item = AnyComponent>) -> Entity {
		let entity = self.allocator.allocate();
		let warn = self.config.warn_on_overwrite;

		let mut map = ComponentMap::default();
		for component in components {
			attach(&mut self.components, &mut map, entity, component, warn);
		}

		self.entities.insert(entity, map);
		self.touch();
		entity
	}

	/// Attaches a [component](Component) to an existing [entity](Entity),
	/// replacing any value of the same type it already carries.
	pub fn insert_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<()> {
		let map = self.entities.get_mut(&entity).ok_or(EcsError::EntityNotFound(entity))?;
		attach(&mut self.components, map, entity, AnyComponent::new(value), self.config.warn_on_overwrite);
		self.touch();
		Ok(())
	}

	/// Detaches a [component](Component) right away, returning its handle if it was present.
	pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<ComponentRef<T>> {
		let id = T::component_id();
		let removed = self.entities.get_mut(&entity)?.remove(&id)?;

		detach(&mut self.components, id, entity);
		self.touch();
		removed.downcast::<T>()
	}

	/// Schedules [entities](Entity) for removal at the next [reconciliation](Self::reconcile_removals).
	///
	/// Nothing is removed yet, so it is safe to call while walking query results.
	/// Unknown or already marked entities are ignored.
	pub fn mark_for_removal(&mut self, entities: &[Entity]) {
		for entity in entities {
			if self.entities.contains_key(entity) {
				self.pending.insert(*entity);
			}
		}
	}

	pub fn is_marked_for_removal(&self, entity: Entity) -> bool {
		self.pending.contains(&entity)
	}

	pub fn pending_removals(&self) -> usize {
		self.pending.len()
	}

	/// Removes every entity marked for removal from both indices.
	/// Returns how many entities were removed.
	pub fn reconcile_removals(&mut self) -> usize {
		if self.pending.is_empty() {
			return 0;
		}

		let mut removed = 0;
		for entity in self.pending.drain() {
			let map = match self.entities.remove(&entity) {
				Some(map) => map,
				None => continue,
			};

			for id in map.keys() {
				detach(&mut self.components, *id, entity);
			}

			assert_detached(&self.components, entity);
			removed += 1;
		}

		self.touch();
		tracing::debug!(removed, remaining = self.entities.len(), "reconciled pending removals");
		removed
	}

	/// Drops every entity and resets the id counter.
	pub fn clear_world(&mut self) {
		let cleared = self.entities.len();

		self.entities.clear();
		self.components.clear();
		self.pending.clear();
		self.allocator.reset();
		self.cache.get_mut().clear();
		self.touch();

		tracing::debug!(cleared, "cleared world");
	}

	pub fn contains(&self, entity: Entity) -> bool {
		self.entities.contains_key(&entity)
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	/// All live [entities](Entity), in no particular order.
	pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
		self.entities.keys().copied()
	}

	/// Whether the entity carries every type in `Q`. Unknown entities carry nothing.
	pub fn has_components<Q: ComponentSet>(&self, entity: Entity) -> bool {
		self.has_component_ids(entity, &Q::component_ids())
	}

	pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
		self.has_component_ids(entity, &[T::component_id()])
	}

	pub fn has_component_ids(&self, entity: Entity, ids: &[ComponentId]) -> bool {
		match self.entities.get(&entity) {
			Some(map) => ids.iter().all(|id| map.contains_key(id)),
			None => false,
		}
	}

	/// Every [entity](Entity) carrying all of `ids`, ordered by id.
	/// An empty id list matches nothing.
	pub fn entities_with_ids(&self, ids: &[ComponentId]) -> Rc<[Entity]> {
		if !self.config.cache_queries {
			return intersect(&self.components, ids).into();
		}

		self.cache
			.borrow_mut()
			.get_or_insert_with(self.generation, ids, || intersect(&self.components, ids))
	}

	/// Every [entity](Entity) carrying all types in `Q`, with handles to those components in `Q`'s order.
	///
	/// The returned list is a snapshot: entities added or removed later don't show up in it,
	/// but writes through the handles go straight to the stored components.
	pub fn get_entities_with<Q: ComponentSet>(&self) -> Vec<(Entity, Q::Item)> {
		let entities = self.entities_with_ids(&Q::component_ids());

		entities
			.iter()
			.filter_map(|entity| {
				let map = self.entities.get(entity)?;
				match Q::fetch(*entity, map) {
					Ok(item) => Some((*entity, item)),
					Err(err) => {
						tracing::error!(%err, "query matched an entity without its components");
						debug_assert!(false, "{}", err);
						None
					},
				}
			})
			.collect()
	}

	/// The components of types `Q` on a single entity, in `Q`'s order.
	///
	/// Fails with [`EcsError::ComponentMissing`] if any of them is absent;
	/// check with [`has_components`](Self::has_components) first where that is expected.
	pub fn components_of<Q: ComponentSet>(&self, entity: Entity) -> Result<Q::Item> {
		let map = self.entities.get(&entity).ok_or(EcsError::EntityNotFound(entity))?;
		Q::fetch(entity, map)
	}

	/// Gets a handle to a [component](Component) bound to a specific [entity](Entity).
	pub fn get_component<T: Component>(&self, entity: Entity) -> Option<ComponentRef<T>> {
		self.entities.get(&entity)?.get(&T::component_id())?.downcast::<T>()
	}

	/// Every component the entity carries, ordered by [ComponentId].
	pub fn all_components_for(&self, entity: Entity) -> Vec<AnyComponent> {
		let mut components: Vec<AnyComponent> = match self.entities.get(&entity) {
			Some(map) => map.values().cloned().collect(),
			None => return Vec::new(),
		};

		components.sort_unstable_by_key(|component| component.id());
		components
	}

	/// Checks that both indices agree with each other.
	pub fn validate(&self) -> Result<()> {
		for (entity, map) in &self.entities {
			for id in map.keys() {
				let indexed = self.components.get(id).map_or(false, |set| set.contains(entity));
				if !indexed {
					return Err(EcsError::IndexDesync(format!("{entity} carries `{id}` but is not indexed under it")));
				}
			}
		}

		for (id, set) in &self.components {
			if set.is_empty() {
				return Err(EcsError::IndexDesync(format!("empty entity set left behind for `{id}`")));
			}

			for entity in set {
				let carried = self.entities.get(entity).map_or(false, |map| map.contains_key(id));
				if !carried {
					return Err(EcsError::IndexDesync(format!("{entity} is indexed under `{id}` but does not carry it")));
				}
			}
		}

		Ok(())
	}

	/// Bumped by every structural change.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Highest id handed out so far, plus one.
	pub fn allocated(&self) -> u64 {
		self.allocator.allocated()
	}

	#[cfg(test)]
	pub(crate) fn cached_queries(&self) -> usize {
		self.cache.borrow().len()
	}

	#[inline(always)]
	fn touch(&mut self) {
		self.generation = self.generation.wrapping_add(1);
	}
}

impl Default for EntityRegistry {
	fn default() -> Self {
		Self::new()
	}
}

fn attach(index: &mut ComponentIndex, map: &mut ComponentMap, entity: Entity, component: AnyComponent, warn: bool) {
	let id = component.id();
	if map.insert(id, component).is_some() && warn {
		tracing::warn!(%entity, component = %id, "overwrote existing component");
	}
	index.entry(id).or_default().insert(entity);
}

fn detach(index: &mut ComponentIndex, id: ComponentId, entity: Entity) {
	if let Some(set) = index.get_mut(&id) {
		set.remove(&entity);
		if set.is_empty() {
			index.remove(&id);
		}
	}
}

#[inline(always)]
fn assert_detached(index: &ComponentIndex, entity: Entity) {
	debug_assert!(
		!index.values().any(|set| set.contains(&entity)),
		"{} is still indexed after removal",
		entity
	);
}
