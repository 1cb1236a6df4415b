use crate::components::{AnyComponent, Component, ComponentId, ComponentRef};
use crate::entities::Entity;
use crate::error::{EcsError, Result};
use nohash_hasher::IntMap;
use paste::paste;

/// The components attached to a single entity, keyed by type.
#[doc(hidden)]
pub type ComponentMap = IntMap<ComponentId, AnyComponent>;

/// A tuple of [Component] types used to filter and project entities.
///
/// Implemented for `()` and for tuples of up to 12 component types.
/// [Items](ComponentSet::Item) are returned in the same order as the types are listed.
pub trait ComponentSet {
	type Item;

	/// The ids of the listed types, in argument order.
	fn component_ids() -> Vec<ComponentId>;

	/// Projects the listed types out of an entity's components.
	#[doc(hidden)]
	fn fetch(entity: Entity, components: &ComponentMap) -> Result<Self::Item>;
}

/// A group of component values that can be spawned together as a new entity.
///
/// Implemented for tuples of up to 12 components.
/// Listing the same type twice keeps only the last value.
pub trait ComponentBundle {
	fn into_components(self) -> Vec<AnyComponent>;
}

impl ComponentSet for () {
	type Item = ();

	fn component_ids() -> Vec<ComponentId> {
		Vec::new()
	}

	fn fetch(_: Entity, _: &ComponentMap) -> Result<()> {
		Ok(())
	}
}

impl ComponentBundle for () {
	fn into_components(self) -> Vec<AnyComponent> {
		Vec::new()
	}
}

#[inline]
fn fetch_one<T: Component>(entity: Entity, components: &ComponentMap) -> Result<ComponentRef<T>> {
	components
		.get(&T::component_id())
		.and_then(AnyComponent::downcast::<T>)
		.ok_or_else(|| EcsError::ComponentMissing {
			entity,
			component: T::component_name(),
		})
}

macro_rules! impl_component_set {
    ($($t: ident),*) => {
        paste! {
            impl<$($t: Component),*> ComponentSet for ($($t,)*) {
                type Item = ($(ComponentRef<$t>,)*);

                fn component_ids() -> Vec<ComponentId> {
                    vec![$(<$t>::component_id()),*]
                }

                fn fetch(entity: Entity, components: &ComponentMap) -> Result<Self::Item> {
                    $(let [<$t:lower>] = fetch_one::<$t>(entity, components)?;)*
                    Ok(($([<$t:lower>],)*))
                }
            }

            impl<$($t: Component),*> ComponentBundle for ($($t,)*) {
                fn into_components(self) -> Vec<AnyComponent> {
                    let ($([<$t:lower>],)*) = self;
                    vec![$(AnyComponent::new([<$t:lower>])),*]
                }
            }
        }
    };
}

impl_component_set!(T0);
impl_component_set!(T0, T1);
impl_component_set!(T0, T1, T2);
impl_component_set!(T0, T1, T2, T3);
impl_component_set!(T0, T1, T2, T3, T4);
impl_component_set!(T0, T1, T2, T3, T4, T5);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
