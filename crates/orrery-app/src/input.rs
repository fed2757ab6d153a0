//! Pointer tracking for orbit drags, hover picking and wheel zoom.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels of trackpad scroll treated as one wheel line.
pub const PIXELS_PER_LINE: f64 = 40.0;

/// Cursor position and the button that drives orbiting.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Option<Vec2>,
    dragging: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `CursorMoved` event and return the movement since the last one.
    ///
    /// The first event after entering the window reports no movement.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) -> Vec2 {
        let new_pos = Vec2::new(x as f32, y as f32);
        let delta = self.position.map_or(Vec2::ZERO, |old| new_pos - old);
        self.position = Some(new_pos);
        delta
    }

    /// Record a `MouseInput` event. Only the left button orbits.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state == ElementState::Pressed;
        }
    }

    /// Forget the cursor when it leaves the window.
    pub fn on_cursor_left(&mut self) {
        self.position = None;
        self.dragging = false;
    }

    /// Last known cursor position in physical pixels.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Whether the orbit button is held.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

/// Wheel input in lines; positive means scroll up (zoom in).
pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_x, y) => y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_first_move_has_no_delta() {
        let mut p = PointerState::new();
        assert_eq!(p.on_cursor_moved(100.0, 200.0), Vec2::ZERO);
        assert_eq!(p.position(), Some(Vec2::new(100.0, 200.0)));
    }

    #[test]
    fn test_delta_between_moves() {
        let mut p = PointerState::new();
        p.on_cursor_moved(100.0, 200.0);
        let d = p.on_cursor_moved(110.0, 195.0);
        assert!((d.x - 10.0).abs() < f32::EPSILON);
        assert!((d.y + 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_left_button_drives_drag() {
        let mut p = PointerState::new();
        p.on_button(MouseButton::Right, ElementState::Pressed);
        assert!(!p.is_dragging());
        p.on_button(MouseButton::Left, ElementState::Pressed);
        assert!(p.is_dragging());
        p.on_button(MouseButton::Left, ElementState::Released);
        assert!(!p.is_dragging());
    }

    #[test]
    fn test_leaving_window_resets() {
        let mut p = PointerState::new();
        p.on_cursor_moved(5.0, 5.0);
        p.on_button(MouseButton::Left, ElementState::Pressed);
        p.on_cursor_left();
        assert!(p.position().is_none());
        assert!(!p.is_dragging());
        assert_eq!(p.on_cursor_moved(300.0, 300.0), Vec2::ZERO);
    }

    #[test]
    fn test_scroll_lines() {
        assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(0.0, 2.0)), 2.0);
        let pixels = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -80.0));
        assert!((scroll_lines(pixels) + 2.0).abs() < f32::EPSILON);
    }
}
