use crate::components::ComponentId;
use std::cell::{Ref, RefCell, RefMut};
use std::any::Any;
use std::rc::Rc;
use std::fmt;

/// A plain data record that can be attached to an [entity](crate::entities::Entity).
///
/// Implement it with #\[derive([`Component`](dalek_ecs_derive::Component))].
/// An entity carries at most one value of each component type.
pub trait Component: 'static {
	fn component_id() -> ComponentId;

	fn component_name() -> &'static str {
		Self::component_id().name()
	}
}

/// A shared handle to a stored component value.
///
/// Handles returned by queries point at the registry's own storage,
/// so writes through [`borrow_mut`](ComponentRef::borrow_mut) are visible to every later query.
pub struct ComponentRef<T> {
	cell: Rc<RefCell<T>>,
}

impl<T> ComponentRef<T> {
	pub(crate) fn new(value: T) -> Self {
		Self {
			cell: Rc::new(RefCell::new(value)),
		}
	}

	#[inline]
	pub fn borrow(&self) -> Ref<'_, T> {
		self.cell.borrow()
	}

	#[inline]
	pub fn borrow_mut(&self) -> RefMut<'_, T> {
		self.cell.borrow_mut()
	}

	/// Replaces the stored value, returning the previous one.
	pub fn replace(&self, value: T) -> T {
		self.cell.replace(value)
	}

	/// Whether both handles point at the same stored value.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.cell, &other.cell)
	}
}

impl<T: Copy> ComponentRef<T> {
	pub fn get(&self) -> T {
		*self.cell.borrow()
	}
}

impl<T> Clone for ComponentRef<T> {
	fn clone(&self) -> Self {
		Self {
			cell: self.cell.clone(),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for ComponentRef<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.cell.try_borrow() {
			Ok(value) => f.debug_tuple("ComponentRef").field(&*value).finish(),
			Err(_) => f.write_str("ComponentRef(<borrowed>)"),
		}
	}
}

/// A type-erased component value together with its [ComponentId].
///
/// Used to assemble component lists at runtime and to inspect every component of an entity.
#[derive(Clone)]
pub struct AnyComponent {
	id: ComponentId,
	cell: Rc<dyn Any>,
}

impl AnyComponent {
	pub fn new<T: Component>(value: T) -> Self {
		Self::from_ref(ComponentRef::new(value))
	}

	pub(crate) fn from_ref<T: Component>(component: ComponentRef<T>) -> Self {
		let cell: Rc<dyn Any> = component.cell;
		Self {
			id: T::component_id(),
			cell,
		}
	}

	pub fn id(&self) -> ComponentId {
		self.id
	}

	pub fn is<T: Component>(&self) -> bool {
		self.id == T::component_id()
	}

	/// Recovers the typed handle. Returns `None` if the value is not a `T`.
	pub fn downcast<T: Component>(&self) -> Option<ComponentRef<T>> {
		Rc::downcast::<RefCell<T>>(self.cell.clone())
			.ok()
			.map(|cell| ComponentRef { cell })
	}
}

impl fmt::Debug for AnyComponent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnyComponent").field("id", &self.id).finish()
	}
}

impl<T: Component> From<T> for AnyComponent {
	fn from(value: T) -> Self {
		AnyComponent::new(value)
	}
}
