//! The maze chase's own components and a couple of the systems built on them.
//!
//! Nothing in the core depends on this module.

mod components;
mod systems;

pub use components::*;
pub use systems::*;

/// Published when the player commits to a step. Payload: `()`.
pub const MOVE: &str = "move";

/// Published when a pending step turns out to be blocked. Payload: `()`.
pub const CANCEL_MOVE: &str = "cancel_move";

/// Per-tick context for the game's systems.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
	/// Milliseconds since the previous tick.
	pub delta_ms: u32,
}

impl Frame {
	pub const fn new(delta_ms: u32) -> Self {
		Self { delta_ms }
	}
}
