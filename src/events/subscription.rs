use crate::events::{EventBus, EventKey, SubscriberTable};
use std::cell::RefCell;
use std::rc::Weak;

/// Identifies one registration on an [EventBus].
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Subscription {
	pub(crate) bus: u64,
	pub(crate) key: EventKey,
	pub(crate) id: u64,
}

impl Subscription {
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Wraps the registration so it is released when the guard is dropped.
	///
	/// `events` must be the bus the subscription was made on; a guard over any other bus releases nothing.
	pub fn scoped(self, events: &EventBus) -> SubscriptionGuard {
		SubscriptionGuard {
			table: events.downgrade(),
			subscription: Some(self),
		}
	}
}

/// A [Subscription] that unsubscribes itself on drop.
///
/// Holds the bus weakly, so an outstanding guard never keeps the bus alive.
pub struct SubscriptionGuard {
	table: Weak<RefCell<SubscriberTable>>,
	subscription: Option<Subscription>,
}

impl SubscriptionGuard {
	pub fn subscription(&self) -> Option<&Subscription> {
		self.subscription.as_ref()
	}

	/// Gives up ownership without unsubscribing.
	pub fn forget(mut self) -> Option<Subscription> {
		self.subscription.take()
	}
}

impl Drop for SubscriptionGuard {
	fn drop(&mut self) {
		let subscription = match self.subscription.take() {
			Some(subscription) => subscription,
			None => return,
		};

		if let Some(table) = self.table.upgrade() {
			let removed = match table.try_borrow_mut() {
				Ok(mut table) => table.remove(&subscription),
				Err(_) => {
					tracing::warn!(event = %subscription.key, id = subscription.id, "bus busy, subscription left in place");
					None
				},
			};
			drop(removed);
		}
	}
}
