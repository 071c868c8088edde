//! Recording canvas — captures the renderer's draw instructions instead of
//! producing bytes.
#![allow(dead_code)]
//!
//! This is the "draw instructions as output" form of a render: a flat op
//! sequence with page breaks in-line. The pagination invariants (no line
//! below the bottom margin, cursor reset after a break) are asserted against
//! it without involving a PDF backend, and a failure switch lets tests
//! exercise the abort path.

use crate::render::canvas::{Align, CanvasError, FontWeight, PagedCanvas};
use crate::render::font_metrics::{get_metrics, FontFace};
use crate::templates::{FontChoice, Rgb, BLACK};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        align: Align,
        size: f32,
        weight: FontWeight,
        color: Rgb,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    NewPage,
}

/// A `PagedCanvas` that records every operation in order.
pub struct RecordingCanvas {
    page_width: f32,
    page_height: f32,
    ops: Vec<DrawOp>,
    font: FontChoice,
    weight: FontWeight,
    font_size: f32,
    color: Rgb,
    line_width: f32,
    remaining_before_failure: Option<u32>,
}

impl RecordingCanvas {
    /// A4 portrait in points.
    pub fn a4() -> Self {
        Self::with_page_size(595.28, 841.89)
    }

    pub fn with_page_size(width: f32, height: f32) -> Self {
        Self {
            page_width: width,
            page_height: height,
            ops: Vec::new(),
            font: FontChoice::Sans,
            weight: FontWeight::Normal,
            font_size: 10.0,
            color: BLACK,
            line_width: 1.0,
            remaining_before_failure: None,
        }
    }

    /// Makes every fallible call after the next `n` successful ones fail.
    pub fn fail_after(&mut self, n: u32) {
        self.remaining_before_failure = Some(n);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Pages produced so far: the implicit first page plus one per break.
    pub fn page_count(&self) -> usize {
        1 + self
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::NewPage))
            .count()
    }

    /// Measurement helper for test assertions against bold sans text.
    pub fn measure_bold(&self, text: &str, font_size: f32) -> f32 {
        get_metrics(FontFace::select(FontChoice::Sans, FontWeight::Bold)).measure_str(text)
            * font_size
    }

    fn face(&self) -> FontFace {
        FontFace::select(self.font, self.weight)
    }

    fn check_failure(&mut self) -> Result<(), CanvasError> {
        if let Some(remaining) = self.remaining_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(CanvasError::Draw("injected failure".to_string()));
            }
            *remaining -= 1;
        }
        Ok(())
    }
}

impl PagedCanvas for RecordingCanvas {
    fn page_width(&self) -> f32 {
        self.page_width
    }

    fn page_height(&self) -> f32 {
        self.page_height
    }

    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        get_metrics(self.face()).measure_str(text) * font_size
    }

    fn wrap_to_width(&self, text: &str, font_size: f32, max_width: f32) -> Vec<String> {
        get_metrics(self.face()).wrap(text, max_width / font_size)
    }

    fn set_font(&mut self, font: FontChoice, weight: FontWeight) {
        self.font = font;
        self.weight = weight;
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: Align) -> Result<(), CanvasError> {
        self.check_failure()?;
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            align,
            size: self.font_size,
            weight: self.weight,
            color: self.color,
        });
        Ok(())
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<(), CanvasError> {
        self.check_failure()?;
        self.ops.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            color: self.color,
        });
        Ok(())
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), CanvasError> {
        self.check_failure()?;
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), CanvasError> {
        self.check_failure()?;
        self.ops.push(DrawOp::NewPage);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
