//! Template Registry — the fixed set of visual templates a resume can render with.
//!
//! A template is a style bundle (colors, font family, header layout, skill
//! layout) that is orthogonal to document content. Unknown ids resolve to a
//! fallback style instead of failing, so a stale template id stored in an old
//! draft never blocks rendering.
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// An RGB color triple, 0–255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
/// Body text gray used by both renderers.
pub const BODY_GRAY: Rgb = Rgb(50, 50, 50);

/// How the top-of-page header block is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderKind {
    /// Full-width filled color band behind the name and contact line.
    Banded,
    /// Centered name and contact line on plain background.
    PlainCentered,
    /// Centered name and contact line with a thin divider rule below.
    AtsLineRule,
}

/// Font family selector. Concrete faces are the canvas's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontChoice {
    Sans,
    Serif,
}

/// How the skills section is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLayout {
    /// One tag element per skill (preview) / bullet-glyph separator (PDF).
    Tags,
    /// Single comma-joined run of text.
    Inline,
}

/// Resolved style descriptor for one template id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateStyle {
    pub id: &'static str,
    pub primary: Rgb,
    pub secondary: Rgb,
    /// Color for company / education detail lines.
    pub accent: Rgb,
    pub header: HeaderKind,
    pub font: FontChoice,
    pub skills: SkillLayout,
}

const MODERN: TemplateStyle = TemplateStyle {
    id: "modern",
    primary: Rgb(102, 126, 234),
    secondary: WHITE,
    accent: Rgb(80, 80, 80),
    header: HeaderKind::Banded,
    font: FontChoice::Sans,
    skills: SkillLayout::Tags,
};

const PROFESSIONAL: TemplateStyle = TemplateStyle {
    id: "professional",
    primary: Rgb(44, 62, 80),
    secondary: WHITE,
    accent: Rgb(80, 80, 80),
    header: HeaderKind::Banded,
    font: FontChoice::Serif,
    skills: SkillLayout::Inline,
};

const ATS: TemplateStyle = TemplateStyle {
    id: "ats",
    primary: BLACK,
    secondary: BLACK,
    accent: Rgb(80, 80, 80),
    header: HeaderKind::AtsLineRule,
    font: FontChoice::Sans,
    skills: SkillLayout::Inline,
};

const WAVE: TemplateStyle = TemplateStyle {
    id: "wave",
    primary: Rgb(9, 132, 227),
    secondary: WHITE,
    accent: Rgb(80, 80, 80),
    header: HeaderKind::Banded,
    font: FontChoice::Sans,
    skills: SkillLayout::Tags,
};

const CREATIVE: TemplateStyle = TemplateStyle {
    id: "creative",
    primary: Rgb(39, 174, 96),
    secondary: WHITE,
    accent: Rgb(80, 80, 80),
    header: HeaderKind::Banded,
    font: FontChoice::Sans,
    skills: SkillLayout::Tags,
};

const MINIMAL: TemplateStyle = TemplateStyle {
    id: "minimal",
    primary: BLACK,
    secondary: BLACK,
    accent: Rgb(80, 80, 80),
    header: HeaderKind::PlainCentered,
    font: FontChoice::Sans,
    skills: SkillLayout::Inline,
};

/// Style used when the template id is not in the registry: neutral slate,
/// sans font, plain centered header.
const FALLBACK: TemplateStyle = TemplateStyle {
    id: "fallback",
    primary: Rgb(44, 62, 80),
    secondary: WHITE,
    accent: Rgb(80, 80, 80),
    header: HeaderKind::PlainCentered,
    font: FontChoice::Sans,
    skills: SkillLayout::Inline,
};

/// All registered templates, in menu order.
pub const TEMPLATE_IDS: [&str; 6] = [
    "modern",
    "professional",
    "ats",
    "wave",
    "creative",
    "minimal",
];

/// Resolves a template id to its style. Unknown ids get the fallback style.
pub fn style_for(template_id: &str) -> TemplateStyle {
    match template_id {
        "modern" => MODERN,
        "professional" => PROFESSIONAL,
        "ats" => ATS,
        "wave" => WAVE,
        "creative" => CREATIVE,
        "minimal" => MINIMAL,
        _ => FALLBACK,
    }
}

/// Whether the id belongs to the registry.
pub fn is_known(template_id: &str) -> bool {
    TEMPLATE_IDS.contains(&template_id)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
