//! Paged canvas backed by `lopdf`, producing a real A4 portrait PDF.
//!
//! Pages buffer their content-stream operations until `finish`, which
//! assembles the document with the four base-14 fonts (no embedding).
//! Measurement and wrapping come from the static metric tables in
//! `font_metrics`, so layout decisions match what the viewer will show for
//! these faces.
//!
//! The canvas speaks the renderer's top-down coordinates and converts to
//! PDF's bottom-up space at emit time.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::render::canvas::{Align, CanvasError, FontWeight, PagedCanvas};
use crate::render::font_metrics::{get_metrics, FontFace};
use crate::templates::{FontChoice, Rgb, BLACK};

/// A4 portrait in points.
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;

pub struct LopdfCanvas {
    /// Finished pages' operation buffers, in order.
    pages: Vec<Vec<Operation>>,
    /// Operations for the page currently being drawn.
    current: Vec<Operation>,
    font: FontChoice,
    weight: FontWeight,
    font_size: f32,
    color: Rgb,
    line_width: f32,
}

impl LopdfCanvas {
    pub fn a4() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            font: FontChoice::Sans,
            weight: FontWeight::Normal,
            font_size: 10.0,
            color: BLACK,
            line_width: 1.0,
        }
    }

    fn face(&self) -> FontFace {
        FontFace::select(self.font, self.weight)
    }

    fn font_resource_name(face: FontFace) -> &'static str {
        match face {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
            FontFace::TimesRoman => "F3",
            FontFace::TimesBold => "F4",
        }
    }

    /// Assembles the buffered pages into PDF bytes.
    pub fn finish(mut self) -> Result<Vec<u8>, CanvasError> {
        // The page being drawn becomes the last page.
        let current = std::mem::take(&mut self.current);
        self.pages.push(current);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut font_dict = lopdf::Dictionary::new();
        for face in [
            FontFace::Helvetica,
            FontFace::HelveticaBold,
            FontFace::TimesRoman,
            FontFace::TimesBold,
        ] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            font_dict.set(Self::font_resource_name(face), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => font_dict,
        });

        let mut kids: Vec<Object> = Vec::new();
        let page_count = self.pages.len();
        for operations in std::mem::take(&mut self.pages) {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| CanvasError::Finish(format!("content stream: {e}")))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    Object::Real(PAGE_WIDTH),
                    Object::Real(PAGE_HEIGHT),
                ],
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| CanvasError::Finish(format!("serialize: {e}")))?;
        Ok(bytes)
    }

    fn rgb_operands(color: Rgb) -> Vec<Object> {
        vec![
            Object::Real(f32::from(color.0) / 255.0),
            Object::Real(f32::from(color.1) / 255.0),
            Object::Real(f32::from(color.2) / 255.0),
        ]
    }
}

impl PagedCanvas for LopdfCanvas {
    fn page_width(&self) -> f32 {
        PAGE_WIDTH
    }

    fn page_height(&self) -> f32 {
        PAGE_HEIGHT
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
        let width = self.measure_width(text, self.font_size);
        let anchored_x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        let baseline_y = PAGE_HEIGHT - y;

        self.current.push(Operation::new("BT", vec![]));
        self.current.push(Operation::new(
            "Tf",
            vec![
                Self::font_resource_name(self.face()).into(),
                Object::Real(self.font_size),
            ],
        ));
        self.current
            .push(Operation::new("rg", Self::rgb_operands(self.color)));
        self.current.push(Operation::new(
            "Td",
            vec![Object::Real(anchored_x), Object::Real(baseline_y)],
        ));
        self.current.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(text),
                StringFormat::Literal,
            )],
        ));
        self.current.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> Result<(), CanvasError> {
        self.current
            .push(Operation::new("rg", Self::rgb_operands(self.color)));
        self.current.push(Operation::new(
            "re",
            vec![
                Object::Real(x),
                Object::Real(PAGE_HEIGHT - y - h),
                Object::Real(w),
                Object::Real(h),
            ],
        ));
        self.current.push(Operation::new("f", vec![]));
        Ok(())
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), CanvasError> {
        self.current
            .push(Operation::new("w", vec![Object::Real(self.line_width)]));
        self.current
            .push(Operation::new("RG", Self::rgb_operands(self.color)));
        self.current.push(Operation::new(
            "m",
            vec![Object::Real(x1), Object::Real(PAGE_HEIGHT - y1)],
        ));
        self.current.push(Operation::new(
            "l",
            vec![Object::Real(x2), Object::Real(PAGE_HEIGHT - y2)],
        ));
        self.current.push(Operation::new("S", vec![]));
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), CanvasError> {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        Ok(())
    }
}

/// Encodes text for the base-14 fonts' WinAnsi encoding. ASCII passes
/// through; the handful of typographic characters the renderers emit get
/// their WinAnsi code points; anything else degrades to '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            _ if c.is_ascii() => c as u8,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '…' => 0x85,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
