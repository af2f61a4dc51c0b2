//! Latest-known pointer position.
//!
//! Pointer-move notifications overwrite the stored position; nothing is
//! buffered. Until the first notification the pointer is absent, and every
//! proximity query treats an absent pointer as out of range.

use glam::Vec2;

/// Tracks the most recent pointer position in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    position: Option<Vec2>,
}

impl PointerTracker {
    /// A tracker that has not observed any pointer input.
    #[must_use]
    pub fn new() -> Self {
        Self { position: None }
    }

    /// Process a pointer-move notification. Last write wins.
    pub fn on_pointer_moved(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        if position.is_finite() {
            self.position = Some(position);
        }
    }

    /// Current position, or `None` if no pointer input was ever observed.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Whether any pointer input has been observed.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.position.is_some()
    }
}
