use crate::events::Subscription;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::rc::{Rc, Weak};
use std::cell::RefCell;
use std::borrow::Cow;
use std::any::Any;

/// The name events are published and subscribed under.
pub type EventKey = Cow<'static, str>;

/// A synchronous, single-threaded publish/subscribe table.
///
/// Cloning an [EventBus] yields another handle to the same table,
/// so every clone sees the same subscribers.
///
/// Subscriptions are made against an owner `Rc<T>`; the bus only keeps a [Weak] to it.
/// Once the owner is dropped its handlers stop being called and are pruned on the next publish.
#[derive(Clone, Default)]
pub struct EventBus {
	table: Rc<RefCell<SubscriberTable>>,
}

static NEXT_BUS_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) struct SubscriberTable {
	bus: u64,
	next_id: u64,
	handlers: HashMap<EventKey, Vec<Subscriber>>,
}

#[derive(Clone)]
pub(crate) struct Subscriber {
	id: u64,
	owner: usize,
	handler: Rc<dyn Handler>,
}

enum Delivery {
	Delivered,
	Expired,
	Mismatched,
}

trait Handler {
	fn deliver(&self, payload: &dyn Any) -> Delivery;
	fn is_alive(&self) -> bool;
}

impl Default for SubscriberTable {
	fn default() -> Self {
		Self {
			bus: NEXT_BUS_ID.fetch_add(1, Ordering::Relaxed),
			next_id: 0,
			handlers: HashMap::new(),
		}
	}
}

struct WeakHandler<T: ?Sized, P, F> {
	owner: Weak<T>,
	callback: F,
	payload: PhantomData<fn(&P)>,
}

impl<T, P, F> Handler for WeakHandler<T, P, F>
where
	T: ?Sized + 'static,
	P: 'static,
	F: Fn(&T, &P) + 'static,
{
	fn deliver(&self, payload: &dyn Any) -> Delivery {
		let owner = match self.owner.upgrade() {
			Some(owner) => owner,
			None => return Delivery::Expired,
		};

		match payload.downcast_ref::<P>() {
			Some(payload) => {
				(self.callback)(&*owner, payload);
				Delivery::Delivered
			},
			None => Delivery::Mismatched,
		}
	}

	fn is_alive(&self) -> bool {
		self.owner.strong_count() > 0
	}
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `handler` under `key` on behalf of `owner`.
	///
	/// The bus holds `owner` weakly, and the handler receives it by reference on every delivery.
	/// Handlers only see payloads of type `P`; publishing another type under the same key skips them.
	pub fn subscribe<T, P, F>(&self, key: impl Into<EventKey>, owner: &Rc<T>, handler: F) -> Subscription
	where
		T: ?Sized + 'static,
		P: 'static,
		F: Fn(&T, &P) + 'static,
	{
		let handler: Rc<dyn Handler> = Rc::new(WeakHandler {
			owner: Rc::downgrade(owner),
			callback: handler,
			payload: PhantomData,
		});

		let subscription = self.table.borrow_mut().insert(key.into(), owner_address(owner), handler);
		tracing::debug!(event = %subscription.key, id = subscription.id, "subscribed");
		subscription
	}

	/// Removes a registration. Returns `false` if it was already gone
	/// or was made on a different bus.
	pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
		let removed = self.table.borrow_mut().remove(subscription);
		let found = removed.is_some();
		drop(removed);

		if found {
			tracing::debug!(event = %subscription.key, id = subscription.id, "unsubscribed");
		}
		found
	}

	/// Removes every registration under `key` made on behalf of `owner`.
	/// Returns how many were removed.
	pub fn unsubscribe_owner<T: ?Sized>(&self, key: &str, owner: &Rc<T>) -> usize {
		let address = owner_address(owner);
		let removed = self.table.borrow_mut().remove_where(key, |subscriber| subscriber.owner == address);
		let count = removed.len();
		drop(removed);

		if count > 0 {
			tracing::debug!(event = key, count, "unsubscribed owner");
		}
		count
	}

	/// Calls every live handler registered under `key` with `payload`, before returning.
	///
	/// Handlers run against a snapshot of the registrations taken when the call starts,
	/// so they may subscribe, unsubscribe or publish themselves.
	/// Returns the number of handlers that were called.
	pub fn publish<P: 'static>(&self, key: &str, payload: &P) -> usize {
		let snapshot: Vec<Subscriber> = match self.table.borrow().handlers.get(key) {
			Some(subscribers) => subscribers.clone(),
			None => return 0,
		};

		let mut delivered = 0;
		let mut expired = false;
		for subscriber in &snapshot {
			match subscriber.handler.deliver(payload) {
				Delivery::Delivered => delivered += 1,
				Delivery::Expired => expired = true,
				Delivery::Mismatched => tracing::warn!(
					event = key,
					payload = std::any::type_name::<P>(),
					"handler expects a different payload type, skipped"
				),
			}
		}

		if expired {
			let removed = self.table.borrow_mut().remove_where(key, |subscriber| !subscriber.handler.is_alive());
			drop(removed);
		}

		tracing::trace!(event = key, delivered, "published");
		delivered
	}

	pub fn is_subscribed(&self, subscription: &Subscription) -> bool {
		let table = self.table.borrow();
		if table.bus != subscription.bus {
			return false;
		}

		match table.handlers.get(&subscription.key) {
			Some(subscribers) => subscribers.iter().any(|s| s.id == subscription.id && s.handler.is_alive()),
			None => false,
		}
	}

	/// Number of handlers under `key` whose owner is still alive.
	pub fn handler_count(&self, key: &str) -> usize {
		match self.table.borrow().handlers.get(key) {
			Some(subscribers) => subscribers.iter().filter(|s| s.handler.is_alive()).count(),
			None => 0,
		}
	}

	/// Keys that currently have at least one registration, live or not.
	pub fn keys(&self) -> Vec<EventKey> {
		self.table.borrow().handlers.keys().cloned().collect()
	}

	/// Drops every registration whose owner is gone. Returns how many were dropped.
	pub fn prune(&self) -> usize {
		let removed = self.table.borrow_mut().prune();
		let count = removed.len();
		drop(removed);

		if count > 0 {
			tracing::debug!(count, "pruned expired subscribers");
		}
		count
	}

	/// Removes every registration.
	pub fn clear(&self) {
		let removed = std::mem::take(&mut self.table.borrow_mut().handlers);
		drop(removed);
	}

	/// Whether both handles share one subscriber table.
	pub fn ptr_eq(&self, other: &EventBus) -> bool {
		Rc::ptr_eq(&self.table, &other.table)
	}

	pub(crate) fn downgrade(&self) -> Weak<RefCell<SubscriberTable>> {
		Rc::downgrade(&self.table)
	}
}

impl SubscriberTable {
	fn insert(&mut self, key: EventKey, owner: usize, handler: Rc<dyn Handler>) -> Subscription {
		let id = self.next_id;
		self.next_id += 1;

		self.handlers.entry(key.clone()).or_default().push(Subscriber { id, owner, handler });
		Subscription { bus: self.bus, key, id }
	}

	pub(crate) fn remove(&mut self, subscription: &Subscription) -> Option<Subscriber> {
		if subscription.bus != self.bus {
			return None;
		}

		let subscribers = self.handlers.get_mut(&subscription.key)?;
		let index = subscribers.iter().position(|s| s.id == subscription.id)?;
		let removed = subscribers.remove(index);

		if subscribers.is_empty() {
			self.handlers.remove(&subscription.key);
		}
		Some(removed)
	}

	fn remove_where(&mut self, key: &str, predicate: impl Fn(&Subscriber) -> bool) -> Vec<Subscriber> {
		let subscribers = match self.handlers.get_mut(key) {
			Some(subscribers) => subscribers,
			None => return Vec::new(),
		};

		let mut removed = Vec::new();
		let mut index = 0;
		while index < subscribers.len() {
			if predicate(&subscribers[index]) {
				removed.push(subscribers.remove(index));
			} else {
				index += 1;
			}
		}

		if subscribers.is_empty() {
			self.handlers.remove(key);
		}
		removed
	}

	fn prune(&mut self) -> Vec<Subscriber> {
		let mut removed = Vec::new();
		for subscribers in self.handlers.values_mut() {
			let (live, dead): (Vec<_>, Vec<_>) = subscribers.drain(..).partition(|s| s.handler.is_alive());
			*subscribers = live;
			removed.extend(dead);
		}

		self.handlers.retain(|_, subscribers| !subscribers.is_empty());
		removed
	}
}

fn owner_address<T: ?Sized>(owner: &Rc<T>) -> usize {
	Rc::as_ptr(owner).cast::<()>() as usize
}
