//! Edge auto-scroll during drag selection.
//!
//! While a cell-range drag is active and the pointer sits within the edge
//! band of the content area, the viewport advances by a fixed step every
//! animation frame. The host drives the frames; this state only decides
//! whether a loop should run and what each tick does.

use crate::layout::{SizeModel, Viewport};
use crate::types::{Axis, Rect};

/// Per-frame scroll vector towards the edge under the pointer.
///
/// Each component is `-speed`, `0` or `speed`, and is non-zero only when
/// scrolling that way is still possible.
pub fn edge_direction(
    pointer: (f64, f64),
    content: Rect,
    viewport: &Viewport,
    sizes: &SizeModel,
    edge: f64,
    speed: f64,
) -> Option<(f64, f64)> {
    let (x, y) = pointer;
    let pick = |axis: Axis, near: f64, far: f64| {
        if near < edge && viewport.can_scroll(axis, -1.0, sizes) {
            -speed
        } else if far < edge && viewport.can_scroll(axis, 1.0, sizes) {
            speed
        } else {
            0.0
        }
    };
    let dx = pick(Axis::Col, x - content.x, content.right() - x);
    let dy = pick(Axis::Row, y - content.y, content.bottom() - y);
    (dx != 0.0 || dy != 0.0).then_some((dx, dy))
}

/// Auto-scroll loop state.
#[derive(Debug, Clone)]
pub struct AutoScrollState {
    edge: f64,
    speed: f64,
    direction: Option<(f64, f64)>,
    last_pointer: Option<(f64, f64)>,
    running: bool,
}

impl AutoScrollState {
    pub fn new(edge: f64, speed: f64) -> Self {
        Self {
            edge,
            speed,
            direction: None,
            last_pointer: None,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn direction(&self) -> Option<(f64, f64)> {
        self.direction
    }

    /// Pointer position recorded by the last `evaluate`.
    pub fn last_pointer(&self) -> Option<(f64, f64)> {
        self.last_pointer
    }

    /// Record the pointer and recompute the direction.
    ///
    /// Returns true when the host must start a frame loop (a direction was
    /// found and no loop is running yet). Leaving the band stops the loop.
    pub fn evaluate(
        &mut self,
        pointer: (f64, f64),
        content: Rect,
        viewport: &Viewport,
        sizes: &SizeModel,
    ) -> bool {
        self.last_pointer = Some(pointer);
        self.direction = edge_direction(pointer, content, viewport, sizes, self.edge, self.speed);
        if self.direction.is_none() {
            self.stop();
            return false;
        }
        if self.running {
            return false;
        }
        self.running = true;
        tracing::debug!(target: "gridview::autoscroll", direction = ?self.direction, "auto-scroll started");
        true
    }

    /// Advance one frame. Returns true if the viewport moved.
    ///
    /// Components that hit their scroll limit are dropped; once none remain
    /// the loop stops itself.
    pub fn tick(&mut self, viewport: &mut Viewport, sizes: &SizeModel) -> bool {
        let Some((dx, dy)) = self.direction else {
            self.stop();
            return false;
        };
        let moved = viewport.scroll_by(dx, dy, sizes);

        let dx = if viewport.can_scroll(Axis::Col, dx, sizes) { dx } else { 0.0 };
        let dy = if viewport.can_scroll(Axis::Row, dy, sizes) { dy } else { 0.0 };
        if dx == 0.0 && dy == 0.0 {
            self.stop();
        } else {
            self.direction = Some((dx, dy));
        }
        moved
    }

    /// Cancel the loop and forget the direction. Returns true if a loop was
    /// running.
    pub fn stop(&mut self) -> bool {
        self.direction = None;
        let was_running = std::mem::replace(&mut self.running, false);
        if was_running {
            tracing::debug!(target: "gridview::autoscroll", "auto-scroll stopped");
        }
        was_running
    }

    /// Stop and drop the recorded pointer; used when the drag ends.
    pub fn reset(&mut self) -> bool {
        self.last_pointer = None;
        self.stop()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::GridConfig;

    fn setup() -> (SizeModel, Viewport, Rect, AutoScrollState) {
        let config = GridConfig::default();
        let sizes = SizeModel::new(config.dimensions(), config.min_cell_size);
        let viewport = Viewport::new(1000.0, 600.0);
        let content = Rect::new(50.0, 30.0, 1000.0, 600.0);
        (
            sizes,
            viewport,
            content,
            AutoScrollState::new(config.auto_scroll_edge, config.auto_scroll_speed),
        )
    }

    #[test]
    fn centre_of_viewport_does_not_scroll() {
        let (sizes, viewport, content, mut state) = setup();
        assert!(!state.evaluate((500.0, 300.0), content, &viewport, &sizes));
        assert!(!state.is_running());
        assert_eq!(state.last_pointer(), Some((500.0, 300.0)));
    }

    #[test]
    fn bottom_right_edge_starts_once() {
        let (sizes, viewport, content, mut state) = setup();
        assert!(state.evaluate((1040.0, 620.0), content, &viewport, &sizes));
        assert_eq!(state.direction(), Some((15.0, 15.0)));
        assert!(!state.evaluate((1045.0, 625.0), content, &viewport, &sizes), "already running");
        assert!(state.is_running());
    }

    #[test]
    fn top_left_edge_needs_room_to_scroll() {
        let (sizes, mut viewport, content, mut state) = setup();
        assert!(!state.evaluate((55.0, 35.0), content, &viewport, &sizes));
        viewport.set_scroll(100.0, 0.0, &sizes);
        assert!(state.evaluate((55.0, 35.0), content, &viewport, &sizes));
        assert_eq!(state.direction(), Some((-15.0, 0.0)));
    }

    #[test]
    fn pointer_outside_content_keeps_scrolling() {
        let (sizes, viewport, content, mut state) = setup();
        assert!(state.evaluate((500.0, 900.0), content, &viewport, &sizes));
        assert_eq!(state.direction(), Some((0.0, 15.0)));
    }

    #[test]
    fn leaving_band_stops() {
        let (sizes, viewport, content, mut state) = setup();
        state.evaluate((1040.0, 300.0), content, &viewport, &sizes);
        assert!(state.is_running());
        state.evaluate((500.0, 300.0), content, &viewport, &sizes);
        assert!(!state.is_running());
        assert_eq!(state.direction(), None);
    }

    #[test]
    fn ticks_never_pass_the_limit() {
        let (sizes, mut viewport, content, mut state) = setup();
        let max_x = viewport.max_scroll_x(&sizes);
        viewport.set_scroll(max_x - 20.0, 0.0, &sizes);
        state.evaluate((1040.0, 300.0), content, &viewport, &sizes);
        assert!(state.tick(&mut viewport, &sizes));
        assert!(state.is_running());
        assert!(state.tick(&mut viewport, &sizes));
        assert_eq!(viewport.scroll_x, max_x);
        assert!(!state.is_running(), "limit reached stops the loop");
        assert!(!state.tick(&mut viewport, &sizes));
        assert_eq!(viewport.scroll_x, max_x);
    }

    #[test]
    fn reset_clears_pointer() {
        let (sizes, viewport, content, mut state) = setup();
        state.evaluate((1040.0, 300.0), content, &viewport, &sizes);
        assert!(state.reset());
        assert_eq!(state.last_pointer(), None);
        assert!(!state.reset());
    }
}
