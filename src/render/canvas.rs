//! Canvas 2D drawing surface.
//!
//! Wraps one `<canvas>` element. The backing store is sized in physical
//! pixels (logical size × device pixel ratio) and the context is scaled so
//! all drawing happens in logical pixels.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{Line, Surface, TextAlign, TextRun};
use crate::error::{GridError, Result};
use crate::types::Rect;

const FONT: &str = "12px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

/// `Surface` backed by a Canvas 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dpr: f64,
}

impl CanvasSurface {
    /// Create a surface from a canvas element
    pub fn new(canvas: HtmlCanvasElement, dpr: f64) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| GridError::Render("Failed to get 2d context".to_string()))?
            .ok_or_else(|| GridError::Render("No 2d context available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GridError::Render("Failed to cast to CanvasRenderingContext2d".to_string()))?;

        Ok(Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
            dpr: if dpr > 0.0 { dpr } else { 1.0 },
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Helper to get crisp pixel position for 1px lines
    fn crisp(x: f64) -> f64 {
        x.floor() + 0.5
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.canvas
            .set_width((self.width * self.dpr).round().max(1.0) as u32);
        self.canvas
            .set_height((self.height * self.dpr).round().max(1.0) as u32);

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", self.width));
        let _ = style.set_property("height", &format!("{}px", self.height));

        // Resizing the backing store resets the context state
        let _ = self.ctx.reset_transform();
        let _ = self.ctx.scale(self.dpr, self.dpr);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn stroke_lines(&mut self, lines: &[Line], color: &str, line_width: f64) {
        if lines.is_empty() {
            return;
        }
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        for line in lines {
            if (line.x1 - line.x2).abs() < f64::EPSILON {
                self.ctx.move_to(Self::crisp(line.x1), line.y1);
                self.ctx.line_to(Self::crisp(line.x2), line.y2);
            } else {
                self.ctx.move_to(line.x1, Self::crisp(line.y1));
                self.ctx.line_to(line.x2, Self::crisp(line.y2));
            }
        }
        self.ctx.stroke();
    }

    fn fill_text(&mut self, run: TextRun<'_>) {
        if run.clip.w <= 0.0 || run.clip.h <= 0.0 {
            return;
        }
        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.rect(run.clip.x, run.clip.y, run.clip.w, run.clip.h);
        self.ctx.clip();
        self.ctx.set_font(FONT);
        self.ctx.set_text_baseline("middle");
        self.ctx.set_text_align(match run.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx.set_fill_style_str(run.color);
        let _ = self.ctx.fill_text(run.text, run.x, run.y);
        self.ctx.restore();
    }
}
