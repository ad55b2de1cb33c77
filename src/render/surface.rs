//! Drawing surface abstraction.
//!
//! Each render layer draws onto one `Surface`. The browser binding wraps a
//! Canvas 2D context; tests and benches use `RecordingSurface`, which keeps
//! the command stream so rendering can be asserted on without a browser.

use crate::types::Rect;

/// Horizontal text alignment relative to the anchor x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Line segment for batched stroking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Line {
    pub fn horizontal(y: f64, x1: f64, x2: f64) -> Self {
        Self { x1, y1: y, x2, y2: y }
    }

    pub fn vertical(x: f64, y1: f64, y2: f64) -> Self {
        Self { x1: x, y1, x2: x, y2 }
    }
}

/// Text drawn at (x, y), vertically centred on y and clipped to `clip`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub x: f64,
    pub y: f64,
    pub align: TextAlign,
    pub clip: Rect,
    pub color: &'a str,
}

/// 2D drawing primitives needed by the grid renderer.
pub trait Surface {
    /// Surface width in logical pixels
    fn width(&self) -> f64;

    /// Surface height in logical pixels
    fn height(&self) -> f64;

    /// Change the surface size (logical pixels)
    fn resize(&mut self, width: f64, height: f64);

    /// Erase everything; called once at the start of each frame
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: &str);

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64);

    /// Stroke all segments as a single path
    fn stroke_lines(&mut self, lines: &[Line], color: &str, line_width: f64);

    fn fill_text(&mut self, run: TextRun<'_>);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect { rect: Rect, color: String },
    StrokeRect { rect: Rect, color: String },
    StrokeLines { lines: Vec<Line>, color: String },
    Text { text: String, x: f64, y: f64, align: TextAlign, clip: Rect },
}

/// A `Surface` that records commands for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    frames: u32,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Commands issued since the last `clear`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames drawn (one per `clear`)
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Text strings drawn in the current frame, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Filled rectangles of the given colour in the current frame
    pub fn fills_of(&self, color: &str) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color: c } if c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, _line_width: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color: color.to_string(),
        });
    }

    fn stroke_lines(&mut self, lines: &[Line], color: &str, _line_width: f64) {
        self.commands.push(DrawCommand::StrokeLines {
            lines: lines.to_vec(),
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, run: TextRun<'_>) {
        self.commands.push(DrawCommand::Text {
            text: run.text.to_string(),
            x: run.x,
            y: run.y,
            align: run.align,
            clip: run.clip,
        });
    }
}
