//! Mutable render parameters shared by every layer drawing into a frame.
//!
//! wgpu has no global line-width state, so the register lives here on the
//! CPU side. Layers that draw lines set it for the duration of their draw
//! through [`LineWidthScope`], which puts the previous value back when it
//! is dropped.

/// Fall back to 1 for widths that cannot be rasterized (zero, negative,
/// NaN or infinite).
#[inline]
pub fn effective_line_width(width: f32) -> f32 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        1.0
    }
}

/// Render state shared across layers within a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    line_width: f32,
}

impl Default for RenderState {
    fn default() -> Self {
        Self { line_width: 1.0 }
    }
}

impl RenderState {
    /// Current line width in pixels. Always positive.
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Set the line width; invalid widths store 1.
    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = effective_line_width(width);
    }

    /// Set the line width until the returned scope is dropped.
    pub fn scoped_line_width(&mut self, width: f32) -> LineWidthScope<'_> {
        let previous = self.line_width;
        self.set_line_width(width);
        LineWidthScope {
            state: self,
            previous,
        }
    }
}

/// Restores the previous line width on drop, on every exit path.
pub struct LineWidthScope<'a> {
    state: &'a mut RenderState,
    previous: f32,
}

impl LineWidthScope<'_> {
    /// Line width in effect inside the scope.
    pub fn line_width(&self) -> f32 {
        self.state.line_width
    }

    /// Width that will be restored.
    pub fn previous(&self) -> f32 {
        self.previous
    }
}

impl Drop for LineWidthScope<'_> {
    fn drop(&mut self) {
        self.state.set_line_width(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_widths_fall_back_to_one() {
        assert_eq!(effective_line_width(0.0), 1.0);
        assert_eq!(effective_line_width(-3.0), 1.0);
        assert_eq!(effective_line_width(f32::NAN), 1.0);
        assert_eq!(effective_line_width(f32::INFINITY), 1.0);
        assert_eq!(effective_line_width(2.5), 2.5);
    }

    #[test]
    fn scope_sets_then_restores() {
        let mut state = RenderState::default();
        state.set_line_width(3.0);
        {
            let scope = state.scoped_line_width(9.0);
            assert_eq!(scope.line_width(), 9.0);
            assert_eq!(scope.previous(), 3.0);
        }
        assert_eq!(state.line_width(), 3.0);
    }

    #[test]
    fn restore_ignores_configured_width() {
        for width in [0.0, 1.0, 9.0, 40.0, f32::NAN] {
            let mut state = RenderState::default();
            state.set_line_width(2.0);
            drop(state.scoped_line_width(width));
            assert_eq!(state.line_width(), 2.0, "width {width}");
        }
    }

    #[test]
    fn zero_width_scope_draws_at_one() {
        let mut state = RenderState::default();
        let scope = state.scoped_line_width(0.0);
        assert_eq!(scope.line_width(), 1.0);
    }

    #[test]
    fn nested_scopes_unwind_in_order() {
        let mut state = RenderState::default();
        {
            let mut outer = state.scoped_line_width(4.0);
            {
                let inner = outer.state.scoped_line_width(8.0);
                assert_eq!(inner.line_width(), 8.0);
            }
            assert_eq!(outer.line_width(), 4.0);
            outer.state.set_line_width(5.0);
        }
        assert_eq!(state.line_width(), 1.0);
    }

    #[test]
    fn restores_after_panic() {
        let mut state = RenderState::default();
        state.set_line_width(6.0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = state.scoped_line_width(12.0);
            panic!("draw interrupted");
        }));
        assert!(result.is_err());
        assert_eq!(state.line_width(), 6.0);
    }
}
