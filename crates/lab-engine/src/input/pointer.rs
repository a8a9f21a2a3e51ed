//! Turns raw pointer events into orbit drags and clicks.

use glam::Vec2;

/// Result of processing a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// No action needed.
    None,
    /// Orbit the camera by this many pixels.
    Orbit(Vec2),
    /// The pointer was pressed and released without dragging.
    Click(Vec2),
}

/// Tracks press state to tell clicks from drags.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    pointer_down: bool,
    dragging: bool,
    /// Position where pointer was pressed.
    pointer_start: Vec2,
    /// Last pointer position (for delta calculation).
    last_pointer: Vec2,
    /// Threshold for distinguishing click from drag.
    drag_threshold: f32,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            pointer_down: false,
            dragging: false,
            pointer_start: Vec2::ZERO,
            last_pointer: Vec2::ZERO,
            drag_threshold: 5.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn on_pointer_down(&mut self, pos: Vec2) -> PointerAction {
        self.pointer_down = true;
        self.dragging = false;
        self.pointer_start = pos;
        self.last_pointer = pos;
        PointerAction::None
    }

    pub fn on_pointer_move(&mut self, pos: Vec2) -> PointerAction {
        if !self.pointer_down {
            return PointerAction::None;
        }

        if !self.dragging && (pos - self.pointer_start).length() > self.drag_threshold {
            self.dragging = true;
            // The whole distance since the press counts toward the orbit.
            self.last_pointer = self.pointer_start;
        }
        if !self.dragging {
            return PointerAction::None;
        }

        let delta = pos - self.last_pointer;
        self.last_pointer = pos;
        PointerAction::Orbit(delta)
    }

    pub fn on_pointer_up(&mut self, pos: Vec2) -> PointerAction {
        if !self.pointer_down {
            return PointerAction::None;
        }
        self.pointer_down = false;
        let was_drag = std::mem::take(&mut self.dragging)
            || (pos - self.pointer_start).length() > self.drag_threshold;
        if was_drag {
            PointerAction::None
        } else {
            PointerAction::Click(pos)
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_is_click() {
        let mut p = PointerTracker::new();
        p.on_pointer_down(Vec2::new(100.0, 100.0));
        assert_eq!(p.on_pointer_move(Vec2::new(102.0, 101.0)), PointerAction::None);
        assert_eq!(
            p.on_pointer_up(Vec2::new(102.0, 101.0)),
            PointerAction::Click(Vec2::new(102.0, 101.0))
        );
    }

    #[test]
    fn drag_orbits_and_suppresses_click() {
        let mut p = PointerTracker::new();
        p.on_pointer_down(Vec2::new(100.0, 100.0));
        assert_eq!(p.on_pointer_move(Vec2::new(120.0, 100.0)), PointerAction::Orbit(Vec2::new(20.0, 0.0)));
        assert_eq!(p.on_pointer_move(Vec2::new(125.0, 110.0)), PointerAction::Orbit(Vec2::new(5.0, 10.0)));
        assert!(p.is_dragging());
        assert_eq!(p.on_pointer_up(Vec2::new(125.0, 110.0)), PointerAction::None);
        assert!(!p.is_dragging());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut p = PointerTracker::new();
        assert_eq!(p.on_pointer_up(Vec2::ZERO), PointerAction::None);
        assert_eq!(p.on_pointer_move(Vec2::ONE), PointerAction::None);
    }
}
