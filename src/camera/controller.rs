use glam::DVec2;

use super::viewport::Viewport;

/// Zoom change per wheel line.
const ZOOM_PER_LINE: f64 = 0.25;

/// Zoom limits.
const MIN_ZOOM: f64 = -24.0;
const MAX_ZOOM: f64 = 40.0;

/// Drag-to-pan, wheel-to-zoom control over a [`Viewport`].
///
/// Screen positions are in physical pixels with the origin at the top
/// left and +Y down, as windowing systems report them.
#[derive(Debug, Clone)]
pub struct MapController {
    /// The controlled view.
    pub viewport: Viewport,
    dragging: bool,
    last_cursor: Option<DVec2>,
}

impl MapController {
    /// Controller over `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            dragging: false,
            last_cursor: None,
        }
    }

    /// Begin or end a drag.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Track the cursor; pans while dragging. Returns `true` if the view
    /// changed.
    pub fn cursor_moved(&mut self, x: f64, y: f64) -> bool {
        let cursor = DVec2::new(x, y);
        let previous = self.last_cursor.replace(cursor);
        let Some(previous) = previous.filter(|_| self.dragging) else {
            return false;
        };
        let delta = cursor - previous;
        if delta == DVec2::ZERO {
            return false;
        }
        // Screen +Y is down, world +Y is up.
        let world_delta = DVec2::new(delta.x, -delta.y) / self.viewport.pixels_per_unit();
        self.viewport.center -= world_delta;
        true
    }

    /// Zoom by `lines` wheel steps, keeping the world point under the
    /// cursor fixed.
    pub fn zoom(&mut self, lines: f64) {
        let before = self.cursor_world();
        self.viewport.zoom = (self.viewport.zoom + lines * ZOOM_PER_LINE).clamp(MIN_ZOOM, MAX_ZOOM);
        if let (Some(before), Some(after)) = (before, self.cursor_world()) {
            self.viewport.center += before - after;
        }
    }

    /// Resize the controlled viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
    }

    fn cursor_world(&self) -> Option<DVec2> {
        let cursor = self.last_cursor?;
        let half = DVec2::new(f64::from(self.viewport.width), f64::from(self.viewport.height)) * 0.5;
        let offset = DVec2::new(cursor.x - half.x, half.y - cursor.y);
        Some(DVec2::from(self.viewport.unproject(offset.to_array())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> MapController {
        MapController::new(Viewport::new([0.0, 0.0], 1.0, 200, 100))
    }

    #[test]
    fn moving_without_drag_does_not_pan() {
        let mut c = controller();
        assert!(!c.cursor_moved(10.0, 10.0));
        assert!(!c.cursor_moved(20.0, 30.0));
        assert_eq!(c.viewport.center, DVec2::ZERO);
    }

    #[test]
    fn drag_moves_content_with_cursor() {
        let mut c = controller();
        let _ = c.cursor_moved(100.0, 50.0);
        c.set_dragging(true);
        assert!(c.cursor_moved(110.0, 40.0));
        // Content follows the cursor: right and up by 10 px at 2 px/unit.
        assert_eq!(c.viewport.center, DVec2::new(-5.0, -5.0));
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let mut c = controller();
        let _ = c.cursor_moved(150.0, 25.0);
        let before = c.cursor_world().unwrap();
        c.zoom(4.0);
        let after = c.cursor_world().unwrap();
        assert!((before - after).length() < 1e-9);
        assert_eq!(c.viewport.zoom, 2.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut c = controller();
        c.zoom(10_000.0);
        assert_eq!(c.viewport.zoom, MAX_ZOOM);
        c.zoom(-100_000.0);
        assert_eq!(c.viewport.zoom, MIN_ZOOM);
    }
}
