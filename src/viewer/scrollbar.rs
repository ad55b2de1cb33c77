//! Proportional scrollbars kept in sync with the viewport.
//!
//! Each axis owns a track whose thumb length reflects the viewport to
//! content ratio and whose position reflects the scroll ratio. Thumb drags,
//! track clicks and wheel input over the track write back to the viewport.

use crate::layout::{SizeModel, Viewport};
use crate::types::{Axis, GridConfig};

/// Visual state of a thumb, used to pick its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThumbState {
    #[default]
    Idle,
    Hover,
    Dragging,
}

/// Thumb length and position along its track, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbMetrics {
    pub length: f64,
    pub position: f64,
}

impl ThumbMetrics {
    /// Compute the thumb for a track; `None` when the axis cannot scroll.
    pub fn compute(
        track_length: f64,
        viewport_extent: f64,
        content_extent: f64,
        scroll: f64,
        max_scroll: f64,
        min_length: f64,
    ) -> Option<Self> {
        if max_scroll <= 0.0 || content_extent <= 0.0 || track_length <= 0.0 {
            return None;
        }
        let length = (track_length * viewport_extent / content_extent)
            .max(min_length)
            .min(track_length);
        let position = (track_length - length) * (scroll / max_scroll).clamp(0.0, 1.0);
        Some(Self { length, position })
    }

    pub fn end(&self) -> f64 {
        self.position + self.length
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ThumbDrag {
    start_pointer: f64,
    start_scroll: f64,
}

/// One scrollbar (track + thumb) for a single axis.
#[derive(Debug, Clone)]
pub struct ScrollbarAxis {
    axis: Axis,
    track_length: f64,
    thumb: Option<ThumbMetrics>,
    drag: Option<ThumbDrag>,
    hover: bool,
}

impl ScrollbarAxis {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            track_length: 0.0,
            thumb: None,
            drag: None,
            hover: false,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn track_length(&self) -> f64 {
        self.track_length
    }

    /// Current thumb, or `None` when the scrollbar is hidden.
    pub fn thumb(&self) -> Option<ThumbMetrics> {
        self.thumb
    }

    /// A scrollbar is shown only when its axis can scroll.
    pub fn is_visible(&self) -> bool {
        self.thumb.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn state(&self) -> ThumbState {
        if self.drag.is_some() {
            ThumbState::Dragging
        } else if self.hover {
            ThumbState::Hover
        } else {
            ThumbState::Idle
        }
    }

    pub fn set_hover(&mut self, hover: bool) {
        self.hover = hover;
    }

    /// True if `pointer` (track-local) lies on the thumb.
    pub fn hit_thumb(&self, pointer: f64) -> bool {
        self.thumb
            .is_some_and(|t| pointer >= t.position && pointer <= t.end())
    }

    /// Recompute the thumb from the viewport. The track spans the viewport
    /// extent along this axis.
    pub fn update(&mut self, viewport: &Viewport, sizes: &SizeModel, min_thumb: f64) {
        self.track_length = viewport.extent(self.axis);
        self.thumb = ThumbMetrics::compute(
            self.track_length,
            viewport.extent(self.axis),
            sizes.total_extent(self.axis),
            viewport.scroll(self.axis),
            viewport.max_scroll(self.axis, sizes),
            min_thumb,
        );
        if self.thumb.is_none() {
            self.drag = None;
        }
    }

    /// Pixels of travel available to the thumb.
    fn free_travel(&self) -> f64 {
        self.thumb
            .map_or(0.0, |t| (self.track_length - t.length).max(0.0))
    }

    /// Start dragging the thumb. `pointer` is any coordinate along the axis.
    pub fn begin_drag(&mut self, pointer: f64, viewport: &Viewport) -> bool {
        if self.thumb.is_none() {
            return false;
        }
        self.drag = Some(ThumbDrag {
            start_pointer: pointer,
            start_scroll: viewport.scroll(self.axis),
        });
        true
    }

    /// Map pointer travel since the drag started onto the scroll range.
    pub fn drag_to(&mut self, pointer: f64, viewport: &mut Viewport, sizes: &SizeModel) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let travel = self.free_travel();
        if travel <= 0.0 {
            return false;
        }
        let ratio = (pointer - drag.start_pointer) / travel;
        let target = drag.start_scroll + ratio * viewport.max_scroll(self.axis, sizes);
        viewport.set_axis_scroll(self.axis, target, sizes)
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Jump so the thumb centre lands under `pointer` (track-local).
    pub fn track_click(&mut self, pointer: f64, viewport: &mut Viewport, sizes: &SizeModel) -> bool {
        let Some(thumb) = self.thumb else {
            return false;
        };
        let travel = self.free_travel();
        if travel <= 0.0 {
            return false;
        }
        let ratio = (pointer - thumb.length / 2.0) / travel;
        let target = ratio * viewport.max_scroll(self.axis, sizes);
        viewport.set_axis_scroll(self.axis, target, sizes)
    }
}

/// The vertical and horizontal scrollbars plus the corner filler.
#[derive(Debug, Clone)]
pub struct ScrollbarSync {
    pub vertical: ScrollbarAxis,
    pub horizontal: ScrollbarAxis,
    min_thumb: f64,
    wheel_multiplier: f64,
}

impl ScrollbarSync {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            vertical: ScrollbarAxis::new(Axis::Row),
            horizontal: ScrollbarAxis::new(Axis::Col),
            min_thumb: config.min_thumb_length,
            wheel_multiplier: config.wheel_multiplier,
        }
    }

    pub fn axis(&self, axis: Axis) -> &ScrollbarAxis {
        match axis {
            Axis::Row => &self.vertical,
            Axis::Col => &self.horizontal,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut ScrollbarAxis {
        match axis {
            Axis::Row => &mut self.vertical,
            Axis::Col => &mut self.horizontal,
        }
    }

    /// Recompute both thumbs after any scroll, resize or size change.
    pub fn update(&mut self, viewport: &Viewport, sizes: &SizeModel) {
        self.vertical.update(viewport, sizes, self.min_thumb);
        self.horizontal.update(viewport, sizes, self.min_thumb);
    }

    /// The corner filler is shown only when both axes scroll.
    pub fn corner_visible(&self) -> bool {
        self.vertical.is_visible() && self.horizontal.is_visible()
    }

    pub fn is_dragging(&self) -> bool {
        self.vertical.is_dragging() || self.horizontal.is_dragging()
    }

    /// Release any thumb drag. Returns true if one was active.
    pub fn end_drag(&mut self) -> bool {
        let v = self.vertical.end_drag();
        let h = self.horizontal.end_drag();
        v || h
    }

    /// Wheel input over a track scrolls only that track's axis.
    pub fn wheel(&self, axis: Axis, delta: f64, viewport: &mut Viewport, sizes: &SizeModel) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let target = viewport.scroll(axis) + delta * self.wheel_multiplier;
        viewport.set_axis_scroll(axis, target, sizes)
    }
}
