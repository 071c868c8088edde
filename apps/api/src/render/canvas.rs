//! The paged-canvas capability the PDF renderer draws against.
//!
//! The renderer owns pagination and the cursor; the canvas owns pages, fonts,
//! measurement, and the drawing primitives. Keeping the boundary here lets
//! the pagination invariants be tested against a recording canvas without any
//! PDF bytes involved.

use thiserror::Error;

use crate::templates::{FontChoice, Rgb};

/// Errors surfaced by a drawing capability. Any of these aborts the current
/// render; they are never fatal to the process.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("draw operation failed: {0}")]
    Draw(String),

    #[error("could not start a new page: {0}")]
    Page(String),

    #[error("could not assemble the document: {0}")]
    Finish(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Horizontal anchoring of drawn text relative to the given x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Abstract paged drawing surface.
///
/// Coordinates are top-down: (0, 0) is the top-left corner of the page and y
/// grows downward, matching the renderer's descending cursor. Font, size, and
/// color are sticky state applied to subsequent draws. `new_page` starts a
/// fresh page; the renderer resets its cursor to the top margin afterwards.
pub trait PagedCanvas {
    fn page_width(&self) -> f32;
    fn page_height(&self) -> f32;

    /// Width of `text` in points at `font_size`, using the current font.
    fn measure_width(&self, text: &str, font_size: f32) -> f32;

    /// Greedy word-wrap of `text` to `max_width` points at `font_size`,
    /// using the current font. No line exceeds the budget unless it is a
    /// single unbreakable word.
    fn wrap_to_width(&self, text: &str, font_size: f32, max_width: f32) -> Vec<String>;

    fn set_font(&mut self, font: FontChoice, weight: FontWeight);
    fn set_font_size(&mut self, size: f32);
    fn set_color(&mut self, color: Rgb);
    fn set_line_width(&mut self, width: f32);

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: Align) -> Result<(), CanvasError>;

    /// Filled rectangle with top-left corner at (x, y).
    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<(), CanvasError>;

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), CanvasError>;

    fn new_page(&mut self) -> Result<(), CanvasError>;
}
