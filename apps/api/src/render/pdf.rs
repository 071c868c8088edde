//! PDF Renderer — projects a document onto a paged canvas.
//!
//! One mutable cursor (`y`) advances monotonically down the page; it is reset
//! to the top margin whenever a page break occurs. `ensure_space` is the
//! single pagination primitive and runs before every atomic drawn block, so
//! no single line is ever split across pages while a paragraph's wrapped
//! lines may span a boundary between lines.
//!
//! Section order is identical to the preview: header, summary, experience,
//! education, skills.

use crate::model::segment::segment_bullets;
use crate::model::{EducationEntry, ExperienceEntry, PersonalInfo, ResumeDocument};
use crate::render::canvas::{Align, CanvasError, FontWeight, PagedCanvas};
use crate::templates::{style_for, HeaderKind, Rgb, SkillLayout, TemplateStyle, BLACK, BODY_GRAY};

const MARGIN: f32 = 40.0;
const TOP_MARGIN: f32 = 40.0;
const BOTTOM_MARGIN: f32 = 40.0;

const LINE_HEIGHT: f32 = 12.0;
const ENTRY_LINE_ADVANCE: f32 = 15.0;
const ENTRY_GAP: f32 = 10.0;
const SECTION_TRAILING_GAP: f32 = 25.0;
const SECTION_HEADING_SPACE: f32 = 50.0;

const BODY_SIZE: f32 = 10.0;
const ENTRY_SIZE: f32 = 11.0;
const SECTION_TITLE_SIZE: f32 = 14.0;
const BAND_NAME_SIZE: f32 = 26.0;
const PLAIN_NAME_SIZE: f32 = 24.0;
const BAND_HEIGHT: f32 = 120.0;

const RULE_GRAY: Rgb = Rgb(180, 180, 180);

/// Renders `doc` onto `canvas` under the given template. The canvas is
/// expected to start with one blank page and a cursor-free state; pagination
/// is driven entirely from here.
pub fn render_pdf(
    doc: &ResumeDocument,
    template_id: &str,
    canvas: &mut dyn PagedCanvas,
) -> Result<(), CanvasError> {
    PdfRenderer::new(canvas, style_for(template_id)).render(doc)
}

/// Derives the artifact filename from the person's full name.
///
/// Falls back to "Resume" when the trimmed name is empty; strips everything
/// that is not a letter, digit, or whitespace; collapses whitespace runs to a
/// single underscore; lowercases; appends `_resume.pdf`.
pub fn derive_filename(full_name: &str) -> String {
    let name = full_name.trim();
    let name = if name.is_empty() { "Resume" } else { name };
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_resume.pdf", collapsed.to_lowercase())
}

struct PdfRenderer<'a> {
    canvas: &'a mut dyn PagedCanvas,
    style: TemplateStyle,
    y: f32,
}

impl<'a> PdfRenderer<'a> {
    fn new(canvas: &'a mut dyn PagedCanvas, style: TemplateStyle) -> Self {
        Self {
            canvas,
            style,
            y: TOP_MARGIN,
        }
    }

    fn render(&mut self, doc: &ResumeDocument) -> Result<(), CanvasError> {
        self.header(&doc.personal)?;

        if !doc.summary.is_empty() {
            self.section_title("Professional Summary")?;
            self.summary(&doc.summary)?;
            self.y += SECTION_TRAILING_GAP;
        }
        if !doc.experience.is_empty() {
            self.section_title("Work Experience")?;
            self.experience(&doc.experience)?;
            self.y += SECTION_TRAILING_GAP;
        }
        if !doc.education.is_empty() {
            self.section_title("Education")?;
            self.education(&doc.education)?;
            self.y += SECTION_TRAILING_GAP;
        }
        if !doc.skills.is_empty() {
            self.section_title("Skills")?;
            self.skills(&doc.skills)?;
            self.y += SECTION_TRAILING_GAP;
        }
        Ok(())
    }

    /// The pagination primitive: start a new page when the next atomic block
    /// would cross the bottom margin. Returns whether a break happened.
    fn ensure_space(&mut self, needed: f32) -> Result<bool, CanvasError> {
        if self.y + needed > self.canvas.page_height() - BOTTOM_MARGIN {
            self.canvas.new_page()?;
            self.y = TOP_MARGIN;
            return Ok(true);
        }
        Ok(false)
    }

    fn usable_width(&self) -> f32 {
        self.canvas.page_width() - 2.0 * MARGIN
    }

    fn header(&mut self, personal: &PersonalInfo) -> Result<(), CanvasError> {
        let name = if personal.full_name.is_empty() {
            "Your Name"
        } else {
            &personal.full_name
        };
        let contact = personal.contact_parts().join(" | ");
        let center_x = self.canvas.page_width() / 2.0;

        match self.style.header {
            HeaderKind::Banded => {
                self.canvas.set_color(self.style.primary);
                self.canvas
                    .draw_rect(0.0, 0.0, self.canvas.page_width(), BAND_HEIGHT)?;

                self.canvas.set_color(self.style.secondary);
                self.canvas.set_font(self.style.font, FontWeight::Bold);
                self.canvas.set_font_size(BAND_NAME_SIZE);
                self.canvas.draw_text(name, center_x, 60.0, Align::Center)?;

                self.canvas.set_font(self.style.font, FontWeight::Normal);
                self.canvas.set_font_size(BODY_SIZE);
                self.canvas
                    .draw_text(&contact, center_x, 85.0, Align::Center)?;
                self.y = 150.0;
            }
            HeaderKind::PlainCentered | HeaderKind::AtsLineRule => {
                self.y = 60.0;
                self.canvas.set_color(BLACK);
                self.canvas.set_font(self.style.font, FontWeight::Bold);
                self.canvas.set_font_size(PLAIN_NAME_SIZE);
                self.canvas.draw_text(name, center_x, self.y, Align::Center)?;
                self.y += 25.0;

                self.canvas.set_font(self.style.font, FontWeight::Normal);
                self.canvas.set_font_size(BODY_SIZE);
                self.canvas
                    .draw_text(&contact, center_x, self.y, Align::Center)?;
                self.y += 20.0;

                if self.style.header == HeaderKind::AtsLineRule {
                    self.canvas.set_color(RULE_GRAY);
                    self.canvas.set_line_width(1.0);
                    self.canvas.draw_line(
                        MARGIN,
                        self.y,
                        self.canvas.page_width() - MARGIN,
                        self.y,
                    )?;
                }
                self.y += 30.0;
            }
        }
        Ok(())
    }

    /// Uppercased title in the primary color with an underline rule sized to
    /// the measured title width. The title and its rule are one atomic block.
    fn section_title(&mut self, title: &str) -> Result<(), CanvasError> {
        self.ensure_space(SECTION_HEADING_SPACE)?;

        let upper = title.to_uppercase();
        self.canvas.set_font(self.style.font, FontWeight::Bold);
        self.canvas.set_font_size(SECTION_TITLE_SIZE);
        self.canvas.set_color(self.style.primary);
        self.canvas.draw_text(&upper, MARGIN, self.y, Align::Left)?;
        self.y += 8.0;

        let rule_width = self.canvas.measure_width(&upper, SECTION_TITLE_SIZE);
        self.canvas.set_line_width(1.5);
        self.canvas
            .draw_line(MARGIN, self.y, MARGIN + rule_width, self.y)?;
        self.y += 20.0;
        Ok(())
    }

    fn summary(&mut self, summary: &str) -> Result<(), CanvasError> {
        self.canvas.set_font(self.style.font, FontWeight::Normal);
        self.canvas.set_font_size(BODY_SIZE);
        self.canvas.set_color(BODY_GRAY);
        let lines = self
            .canvas
            .wrap_to_width(summary, BODY_SIZE, self.usable_width());
        for line in lines {
            self.ensure_space(LINE_HEIGHT)?;
            self.canvas.draw_text(&line, MARGIN, self.y, Align::Left)?;
            self.y += LINE_HEIGHT;
        }
        Ok(())
    }

    fn experience(&mut self, entries: &[ExperienceEntry]) -> Result<(), CanvasError> {
        let last = entries.len().saturating_sub(1);
        for (i, entry) in entries.iter().enumerate() {
            self.ensure_space(2.0 * ENTRY_LINE_ADVANCE)?;

            self.canvas.set_font(self.style.font, FontWeight::Bold);
            self.canvas.set_font_size(ENTRY_SIZE);
            self.canvas.set_color(BLACK);
            self.canvas
                .draw_text(&entry.title, MARGIN, self.y, Align::Left)?;

            let dates = entry.date_range();
            if !dates.is_empty() {
                self.canvas.set_font(self.style.font, FontWeight::Normal);
                self.canvas.set_font_size(BODY_SIZE);
                self.canvas.draw_text(
                    &dates,
                    self.canvas.page_width() - MARGIN,
                    self.y,
                    Align::Right,
                )?;
            }
            self.y += ENTRY_LINE_ADVANCE;

            if !entry.company.is_empty() {
                self.canvas.set_font(self.style.font, FontWeight::Bold);
                self.canvas.set_font_size(BODY_SIZE);
                self.canvas.set_color(self.style.accent);
                self.canvas
                    .draw_text(&entry.company, MARGIN, self.y, Align::Left)?;
                self.y += ENTRY_LINE_ADVANCE;
            }

            if !entry.description.is_empty() {
                self.bullets(&entry.description)?;
            }
            if i < last {
                self.y += ENTRY_GAP;
            }
        }
        Ok(())
    }

    /// Draws one marker glyph per segmented bullet with the wrapped text
    /// indented from the marker. The marker plus the first wrapped line form
    /// one atomic block; continuation lines are space-checked individually.
    fn bullets(&mut self, description: &str) -> Result<(), CanvasError> {
        const BULLET_INDENT: f32 = 12.0;

        self.canvas.set_font(self.style.font, FontWeight::Normal);
        self.canvas.set_font_size(BODY_SIZE);
        self.canvas.set_color(BODY_GRAY);

        let wrap_width = self.usable_width() - BULLET_INDENT;
        for bullet in segment_bullets(description) {
            let lines = self.canvas.wrap_to_width(&bullet, BODY_SIZE, wrap_width);
            self.ensure_space(LINE_HEIGHT)?;
            self.canvas.draw_text("•", MARGIN, self.y, Align::Left)?;
            let mut first = true;
            for line in lines {
                if !first {
                    self.ensure_space(LINE_HEIGHT)?;
                }
                self.canvas
                    .draw_text(&line, MARGIN + BULLET_INDENT, self.y, Align::Left)?;
                self.y += LINE_HEIGHT;
                first = false;
            }
            if first {
                // Marker-only bullet (the segmenter can yield empty text).
                self.y += LINE_HEIGHT;
            }
        }
        Ok(())
    }

    fn education(&mut self, entries: &[EducationEntry]) -> Result<(), CanvasError> {
        let last = entries.len().saturating_sub(1);
        for (i, entry) in entries.iter().enumerate() {
            self.ensure_space(2.0 * ENTRY_LINE_ADVANCE)?;

            self.canvas.set_font(self.style.font, FontWeight::Bold);
            self.canvas.set_font_size(ENTRY_SIZE);
            self.canvas.set_color(BLACK);
            self.canvas
                .draw_text(&entry.degree, MARGIN, self.y, Align::Left)?;

            if !entry.year.is_empty() {
                self.canvas.set_font(self.style.font, FontWeight::Normal);
                self.canvas.set_font_size(BODY_SIZE);
                self.canvas.draw_text(
                    &entry.year,
                    self.canvas.page_width() - MARGIN,
                    self.y,
                    Align::Right,
                )?;
            }
            self.y += ENTRY_LINE_ADVANCE;

            let detail = education_detail_line(entry);
            if !detail.is_empty() {
                self.canvas.set_font(self.style.font, FontWeight::Normal);
                self.canvas.set_font_size(BODY_SIZE);
                self.canvas.set_color(self.style.accent);
                self.canvas.draw_text(&detail, MARGIN, self.y, Align::Left)?;
                self.y += ENTRY_LINE_ADVANCE;
            }

            if i < last {
                self.y += ENTRY_GAP;
            }
        }
        Ok(())
    }

    fn skills(&mut self, skills: &[String]) -> Result<(), CanvasError> {
        let separator = match self.style.skills {
            SkillLayout::Tags => " • ",
            SkillLayout::Inline => ", ",
        };
        let joined = skills.join(separator);

        self.canvas.set_font(self.style.font, FontWeight::Normal);
        self.canvas.set_font_size(BODY_SIZE);
        self.canvas.set_color(BODY_GRAY);
        let lines = self
            .canvas
            .wrap_to_width(&joined, BODY_SIZE, self.usable_width());
        for line in lines {
            self.ensure_space(LINE_HEIGHT)?;
            self.canvas.draw_text(&line, MARGIN, self.y, Align::Left)?;
            self.y += LINE_HEIGHT;
        }
        Ok(())
    }
}

/// School, year, and GPA joined with a separator between present fields.
fn education_detail_line(entry: &EducationEntry) -> String {
    let gpa = if entry.gpa.is_empty() {
        String::new()
    } else {
        format!("GPA: {}", entry.gpa)
    };
    [entry.school.as_str(), entry.year.as_str(), gpa.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
