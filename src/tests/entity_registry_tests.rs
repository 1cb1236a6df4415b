use crate::tests::{Tag, A, B, C};
use crate::components::{AnyComponent, Component};
use crate::entities::{Entity, EntityRegistry};
use crate::config::WorldConfig;
use crate::error::EcsError;
use rand::prelude::SliceRandom;
use rand::thread_rng;

#[test]
pub fn entity_ids_are_sequential() {
	let mut registry = EntityRegistry::new();

	let entities: Vec<Entity> = (0..32).map(|i| registry.add_entity((A(i),))).collect();
	for (i, entity) in entities.iter().enumerate() {
		assert_eq!(entity.id(), i as u64, "Entity ids should follow creation order");
	}
	assert_eq!(registry.len(), 32);
	assert_eq!(registry.allocated(), 32);
}

#[test]
pub fn entity_ids_are_not_reused_after_removal() {
	let mut registry = EntityRegistry::new();
	let first = registry.add_entity((A(0),));
	let second = registry.add_entity((A(1),));

	registry.mark_for_removal(&[first, second]);
	registry.reconcile_removals();

	let third = registry.add_entity((A(2),));
	assert!(third.id() > second.id(), "Removed ids must not be handed out again");
	assert!(!registry.contains(first));
	assert!(registry.contains(third));
}

#[test]
pub fn duplicate_component_type_keeps_last_value() {
	let mut registry = EntityRegistry::with_config(WorldConfig::default().with_overwrite_warnings(false));
	let entity = registry.add_entity((A(1), B(2), A(3)));

	let a = registry.get_component::<A>(entity).expect("A should be attached");
	assert_eq!(a.get(), A(3));
	assert_eq!(registry.all_components_for(entity).len(), 2);
	assert_eq!(registry.validate(), Ok(()));
}

#[test]
pub fn insert_component_attaches_and_overwrites() {
	let mut registry = EntityRegistry::new();
	let entity = registry.add_entity((A(1),));

	registry.insert_component(entity, B(5)).expect("entity exists");
	assert!(registry.has_components::<(A, B)>(entity));

	registry.insert_component(entity, B(6)).expect("entity exists");
	assert_eq!(registry.get_component::<B>(entity).map(|b| b.get()), Some(B(6)));
	assert_eq!(registry.get_entities_with::<(B,)>().len(), 1);
	assert_eq!(registry.validate(), Ok(()));
}

#[test]
pub fn insert_component_on_missing_entity_fails() {
	let mut registry = EntityRegistry::new();
	let entity = registry.add_entity((A(1),));
	registry.mark_for_removal(&[entity]);
	registry.reconcile_removals();

	assert_eq!(registry.insert_component(entity, B(0)), Err(EcsError::EntityNotFound(entity)));
}

#[test]
pub fn remove_component_prunes_empty_index_sets() {
	let mut registry = EntityRegistry::new();
	let entity = registry.add_entity((A(1), C(2)));

	let removed = registry.remove_component::<C>(entity).expect("C was attached");
	assert_eq!(removed.get(), C(2));
	assert!(!registry.has_component::<C>(entity));
	assert!(registry.has_component::<A>(entity));
	assert!(registry.remove_component::<C>(entity).is_none());
	assert!(registry.get_entities_with::<(C,)>().is_empty());
	assert_eq!(registry.validate(), Ok(()));
}

#[test]
pub fn removal_is_deferred_until_reconciliation() {
	let mut registry = EntityRegistry::new();
	let entity = registry.add_entity((A(1), B(1)));

	registry.mark_for_removal(&[entity]);
	assert!(registry.is_marked_for_removal(entity));
	assert!(registry.contains(entity), "Marking must not remove the entity");
	assert_eq!(registry.get_entities_with::<(A, B)>().len(), 1, "Queries still see marked entities");

	assert_eq!(registry.reconcile_removals(), 1);
	assert!(!registry.contains(entity));
	assert!(registry.get_entities_with::<(A, B)>().is_empty());
	assert_eq!(registry.pending_removals(), 0);
}

#[test]
pub fn marking_twice_is_the_same_as_marking_once() {
	let mut registry = EntityRegistry::new();
	let kept = registry.add_entity((A(0),));
	let entity = registry.add_entity((A(1),));

	registry.mark_for_removal(&[entity]);
	registry.mark_for_removal(&[entity, entity]);
	assert_eq!(registry.pending_removals(), 1);

	assert_eq!(registry.reconcile_removals(), 1);
	assert_eq!(registry.reconcile_removals(), 0);
	assert!(registry.contains(kept));
	assert_eq!(registry.len(), 1);
}

#[test]
pub fn marking_unknown_entities_is_a_no_op() {
	let mut registry = EntityRegistry::new();
	let entity = registry.add_entity((A(0),));
	registry.mark_for_removal(&[entity]);
	registry.reconcile_removals();

	registry.mark_for_removal(&[entity]);
	assert_eq!(registry.pending_removals(), 0);
	assert_eq!(registry.reconcile_removals(), 0);
}

#[test]
pub fn clear_world_resets_ids_and_indices() {
	let mut registry = EntityRegistry::new();
	for i in 0..8 {
		registry.add_entity((A(i), B(i)));
	}
	let marked = registry.add_entity((C(0),));
	registry.mark_for_removal(&[marked]);

	registry.clear_world();
	assert!(registry.is_empty());
	assert_eq!(registry.pending_removals(), 0);
	assert!(registry.get_entities_with::<(A,)>().is_empty());

	let entity = registry.add_entity((A(9),));
	assert_eq!(entity.id(), 0, "Ids should restart after clearing");
	assert_eq!(registry.reconcile_removals(), 0, "Pending removals must not survive a clear");
	assert!(registry.contains(entity));
}

#[test]
pub fn runtime_component_lists() {
	let mut registry = EntityRegistry::new();
	let components: Vec<AnyComponent> = vec![A(4).into(), Tag.into()];
	let entity = registry.add_entity_from(components);

	assert!(registry.has_components::<(A, Tag)>(entity));

	let all = registry.all_components_for(entity);
	assert_eq!(all.len(), 2);
	assert!(all.iter().any(|c| c.is::<Tag>()));
	let a = all.iter().find_map(|c| c.downcast::<A>()).expect("A should be listed");
	assert_eq!(a.get(), A(4));
	assert!(all.iter().all(|c| c.downcast::<B>().is_none()));
}

#[test]
pub fn indices_stay_consistent_under_shuffled_removals() {
	let mut registry = EntityRegistry::new();
	let mut entities = Vec::new();

	for i in 0..256u32 {
		let entity = match i % 4 {
			0 => registry.add_entity((A(i),)),
			1 => registry.add_entity((A(i), B(i))),
			2 => registry.add_entity((B(i), C(i))),
			_ => registry.add_entity((A(i), B(i), C(i), Tag)),
		};
		entities.push(entity);
	}
	assert_eq!(registry.validate(), Ok(()));

	entities.shuffle(&mut thread_rng());
	for chunk in entities.chunks(37) {
		registry.mark_for_removal(chunk);
		registry.mark_for_removal(&chunk[..chunk.len() / 2]);
		registry.reconcile_removals();

		assert_eq!(registry.validate(), Ok(()), "Indices diverged after removing a batch");
		for entity in chunk {
			assert!(!registry.contains(*entity));
			assert!(!registry.has_component_ids(*entity, &[A::component_id()]));
		}
	}

	assert!(registry.is_empty());
	assert!(registry.get_entities_with::<(A,)>().is_empty());
}

#[derive(Component)]
struct Ai;

#[derive(Component)]
struct AI;

#[test]
pub fn component_names_differing_only_in_case_get_distinct_ids() {
	assert_ne!(Ai::component_id(), AI::component_id());
	assert_eq!(Ai::component_name(), "Ai");
	assert_eq!(AI::component_name(), "AI");

	let mut registry = EntityRegistry::new();
	let entity = registry.add_entity((Ai,));
	assert!(registry.has_component::<Ai>(entity));
	assert!(!registry.has_component::<AI>(entity));
}
