use crate::components::Component;

/// Tile coordinates.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
	pub x: i32,
	pub y: i32,
}

impl Position {
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

/// Tiles moved per step.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Velocity {
	pub x: i32,
	pub y: i32,
}

impl Velocity {
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

/// An opaque reference to a sprite owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u32);

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Renderable {
	pub sprite: SpriteHandle,
}

/// A looping or one-shot sequence of sprites.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Animation {
	pub frames: Vec<SpriteHandle>,
	/// Milliseconds between frames.
	pub frame_interval: u32,
	pub cursor: usize,
	pub elapsed: u32,
	pub repeat: bool,
}

impl Animation {
	/// A one-shot animation; the entity is removed once the last frame has played.
	pub fn new(frames: Vec<SpriteHandle>, frame_interval: u32) -> Self {
		Self {
			frames,
			frame_interval,
			cursor: 0,
			elapsed: 0,
			repeat: false,
		}
	}

	pub fn repeating(mut self) -> Self {
		self.repeat = true;
		self
	}

	pub fn current(&self) -> Option<SpriteHandle> {
		self.frames.get(self.cursor).copied()
	}

	/// Moves the animation forward by `delta_ms`.
	/// Returns `true` once a one-shot animation has run past its last frame.
	pub fn advance(&mut self, delta_ms: u32) -> bool {
		if self.frames.is_empty() {
			return !self.repeat;
		}

		let interval = self.frame_interval.max(1);
		self.elapsed = self.elapsed.saturating_add(delta_ms);

		let steps = (self.elapsed / interval) as usize;
		self.elapsed %= interval;
		if steps == 0 {
			return false;
		}

		let len = self.frames.len();
		if self.repeat {
			self.cursor = (self.cursor + steps % len) % len;
			return false;
		}

		match self.cursor.checked_add(steps) {
			Some(cursor) if cursor < len => self.cursor = cursor,
			_ => {
				self.cursor = len - 1;
				return true;
			},
		}

		false
	}
}

/// Marks entities driven by the enemy AI.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AI;

/// Marks the entity the keyboard controls.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Player;
