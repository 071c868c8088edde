//! Preview Renderer — projects a document into styled HTML markup.
//!
//! The host re-renders the full preview on every model change; there is no
//! incremental diffing. The template id only changes class names and the
//! skills layout, never which sections appear or their order.

use crate::model::segment::segment_bullets;
use crate::model::ResumeDocument;
use crate::templates::{style_for, SkillLayout};

/// Renders the full preview markup for `doc` under the given template.
///
/// A fully empty document yields a single placeholder block.
pub fn render_preview(doc: &ResumeDocument, template_id: &str) -> String {
    let style = style_for(template_id);

    if doc.is_empty() {
        return format!(
            "<div class=\"resume-preview {}\">\
             <div class=\"empty-state\">\
             <p>Start filling out your information to see your resume preview</p>\
             </div></div>",
            style.id
        );
    }

    let mut html = format!("<div class=\"resume-preview {}\">", style.id);
    push_header(&mut html, doc);
    html.push_str("<div class=\"resume-body\">");
    push_summary(&mut html, doc);
    push_experience(&mut html, doc);
    push_education(&mut html, doc);
    push_skills(&mut html, doc, style.skills);
    html.push_str("</div></div>");
    html
}

fn push_header(html: &mut String, doc: &ResumeDocument) {
    let name = if doc.personal.full_name.is_empty() {
        "Your Name"
    } else {
        &doc.personal.full_name
    };
    html.push_str("<div class=\"resume-header\">");
    html.push_str(&format!(
        "<div class=\"resume-name\">{}</div>",
        escape(name)
    ));
    html.push_str("<div class=\"resume-contact\">");
    for part in [&doc.personal.email, &doc.personal.phone, &doc.personal.location] {
        if !part.is_empty() {
            html.push_str(&format!("<div>{}</div>", escape(part)));
        }
    }
    if !doc.personal.website.is_empty() {
        let site = escape(&doc.personal.website);
        html.push_str(&format!("<div><a href=\"{site}\">{site}</a></div>"));
    }
    html.push_str("</div></div>");
}

fn push_summary(html: &mut String, doc: &ResumeDocument) {
    if doc.summary.is_empty() {
        return;
    }
    html.push_str(&format!(
        "<div class=\"resume-section\">\
         <div class=\"section-title\">Professional Summary</div>\
         <div class=\"summary-text\">{}</div></div>",
        escape(&doc.summary)
    ));
}

fn push_experience(html: &mut String, doc: &ResumeDocument) {
    if doc.experience.is_empty() {
        return;
    }
    html.push_str(
        "<div class=\"resume-section\"><div class=\"section-title\">Work Experience</div>",
    );
    for entry in &doc.experience {
        html.push_str("<div class=\"job-item\"><div class=\"job-title-container\">");
        html.push_str(&format!(
            "<div class=\"job-title\">{}</div>",
            escape(&entry.title)
        ));
        let duration = entry.date_range();
        if !duration.is_empty() {
            html.push_str(&format!(
                "<div class=\"job-duration\">{}</div>",
                escape(&duration)
            ));
        }
        html.push_str("</div>");
        if !entry.company.is_empty() {
            html.push_str(&format!(
                "<div class=\"job-company\">{}</div>",
                escape(&entry.company)
            ));
        }
        if !entry.description.is_empty() {
            html.push_str("<ul class=\"job-description\">");
            for bullet in segment_bullets(&entry.description) {
                html.push_str(&format!("<li>{}</li>", escape(&bullet)));
            }
            html.push_str("</ul>");
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
}

fn push_education(html: &mut String, doc: &ResumeDocument) {
    if doc.education.is_empty() {
        return;
    }
    html.push_str("<div class=\"resume-section\"><div class=\"section-title\">Education</div>");
    for entry in &doc.education {
        let heading = [entry.degree.as_str(), entry.school.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        html.push_str("<div class=\"edu-item\">");
        html.push_str(&format!(
            "<div class=\"edu-degree\">{}</div>",
            escape(&heading)
        ));
        if !entry.year.is_empty() {
            html.push_str(&format!(
                "<div class=\"edu-year\">{}</div>",
                escape(&entry.year)
            ));
        }
        if !entry.gpa.is_empty() {
            html.push_str(&format!(
                "<div class=\"edu-gpa\">GPA: {}</div>",
                escape(&entry.gpa)
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
}

fn push_skills(html: &mut String, doc: &ResumeDocument, layout: SkillLayout) {
    if doc.skills.is_empty() {
        return;
    }
    html.push_str("<div class=\"resume-section\"><div class=\"section-title\">Skills</div>");
    match layout {
        SkillLayout::Tags => {
            html.push_str("<ul class=\"skills-list\">");
            for skill in &doc.skills {
                html.push_str(&format!("<li>{}</li>", escape(skill)));
            }
            html.push_str("</ul>");
        }
        SkillLayout::Inline => {
            let joined = doc
                .skills
                .iter()
                .map(|s| escape(s))
                .collect::<Vec<_>>()
                .join(", ");
            html.push_str(&format!("<div class=\"skills-inline\">{joined}</div>"));
        }
    }
    html.push_str("</div>");
}

/// Minimal HTML escaping for interpolated field values.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{collect, EducationEntry, ExperienceEntry, PersonalInfo, RawFormSnapshot};

    fn sample_doc() -> ResumeDocument {
        collect(&RawFormSnapshot {
            personal: PersonalInfo {
                full_name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                website: "jane.dev".to_string(),
                ..Default::default()
            },
            summary: "Seasoned engineer.".to_string(),
            skills: "Rust, SQL".to_string(),
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                start_date: "2020".to_string(),
                end_date: "2023".to_string(),
                description: "- Built pipelines\n- Ran oncall".to_string(),
            }],
            education: vec![EducationEntry {
                degree: "BSc".to_string(),
                school: "State".to_string(),
                year: "2019".to_string(),
                gpa: "3.8".to_string(),
            }],
        })
    }

    #[test]
    fn test_empty_document_renders_placeholder_only() {
        let html = render_preview(&ResumeDocument::default(), "modern");
        assert!(html.contains("empty-state"));
        assert!(!html.contains("resume-header"));
        assert!(!html.contains("section-title"));
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let html = render_preview(&sample_doc(), "modern");
        let summary = html.find("Professional Summary").unwrap();
        let experience = html.find("Work Experience").unwrap();
        let education = html.find("Education").unwrap();
        let skills = html.find("Skills").unwrap();
        assert!(summary < experience && experience < education && education < skills);
    }

    #[test]
    fn test_name_falls_back_when_missing() {
        let doc = ResumeDocument {
            summary: "Only a summary".to_string(),
            ..Default::default()
        };
        let html = render_preview(&doc, "modern");
        assert!(html.contains("Your Name"));
    }

    #[test]
    fn test_absent_contact_fields_are_omitted() {
        let html = render_preview(&sample_doc(), "modern");
        assert!(html.contains("jane@example.com"));
        assert!(html.contains("<a href=\"jane.dev\">jane.dev</a>"));
        // No empty contact divs for phone/location.
        assert!(!html.contains("<div></div>"));
    }

    #[test]
    fn test_empty_sections_are_omitted_entirely() {
        let doc = ResumeDocument {
            personal: PersonalInfo {
                full_name: "Jo".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let html = render_preview(&doc, "modern");
        assert!(!html.contains("Professional Summary"));
        assert!(!html.contains("Work Experience"));
        assert!(!html.contains("Education"));
        assert!(!html.contains("Skills"));
    }

    #[test]
    fn test_description_renders_as_bullets() {
        let html = render_preview(&sample_doc(), "modern");
        assert!(html.contains("<li>Built pipelines</li>"));
        assert!(html.contains("<li>Ran oncall</li>"));
    }

    #[test]
    fn test_duration_omitted_when_both_dates_empty() {
        let mut doc = sample_doc();
        doc.experience[0].start_date.clear();
        doc.experience[0].end_date.clear();
        let html = render_preview(&doc, "modern");
        assert!(!html.contains("job-duration"));
    }

    #[test]
    fn test_template_id_changes_wrapper_class_not_structure() {
        let modern = render_preview(&sample_doc(), "modern");
        let minimal = render_preview(&sample_doc(), "minimal");
        assert!(modern.contains("resume-preview modern"));
        assert!(minimal.contains("resume-preview minimal"));
        // Both render the same sections.
        for section in ["Professional Summary", "Work Experience", "Education", "Skills"] {
            assert!(modern.contains(section));
            assert!(minimal.contains(section));
        }
    }

    #[test]
    fn test_skill_layout_tags_vs_inline() {
        let tags = render_preview(&sample_doc(), "modern");
        assert!(tags.contains("skills-list"));
        assert!(tags.contains("<li>Rust</li>"));

        let inline = render_preview(&sample_doc(), "ats");
        assert!(inline.contains("skills-inline"));
        assert!(inline.contains("Rust, SQL"));
    }

    #[test]
    fn test_unknown_template_still_renders() {
        let html = render_preview(&sample_doc(), "from-the-future");
        assert!(html.contains("resume-preview fallback"));
        assert!(html.contains("Work Experience"));
    }

    #[test]
    fn test_field_values_are_html_escaped() {
        let mut doc = sample_doc();
        doc.personal.full_name = "Jane <script>".to_string();
        let html = render_preview(&doc, "modern");
        assert!(html.contains("Jane &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_gpa_rendered_only_when_present() {
        let mut doc = sample_doc();
        let html = render_preview(&doc, "modern");
        assert!(html.contains("GPA: 3.8"));

        doc.education[0].gpa.clear();
        let html = render_preview(&doc, "modern");
        assert!(!html.contains("GPA:"));
    }
}
