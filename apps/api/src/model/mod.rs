//! Document Model — the canonical in-memory representation of a resume.
//!
//! `ResumeDocument` is pure data with no behavior beyond normalization. It is
//! always rebuilt from scratch by [`collect`] before any render; it holds no
//! derived or cached state, so the same raw snapshot always yields a
//! structurally equal document.

pub mod segment;

use serde::{Deserialize, Serialize};

/// The five personal-info fields. All optional; absent inputs are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
}

impl PersonalInfo {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.location.is_empty()
            && self.website.is_empty()
    }

    /// Non-empty contact fields in render order (email, phone, location,
    /// website). The name is not a contact field.
    pub fn contact_parts(&self) -> Vec<&str> {
        [&self.email, &self.phone, &self.location, &self.website]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect()
    }
}

/// One work-experience row. Free-text description is newline-delimited; the
/// renderers turn it into bullets via [`segment::segment_bullets`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

impl ExperienceEntry {
    /// An entry is rendered only when a primary field is filled in.
    pub fn is_significant(&self) -> bool {
        !self.title.is_empty() || !self.company.is_empty()
    }

    /// `start - end` with the separator only when both dates are present;
    /// empty when both are absent.
    pub fn date_range(&self) -> String {
        let sep = if !self.start_date.is_empty() && !self.end_date.is_empty() {
            " - "
        } else {
            ""
        };
        format!("{}{}{}", self.start_date, sep, self.end_date)
    }
}

/// One education row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub year: String,
    pub gpa: String,
}

impl EducationEntry {
    pub fn is_significant(&self) -> bool {
        !self.degree.is_empty() || !self.school.is_empty()
    }
}

/// Aggregate root: one complete resume, only significant entries retained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub personal: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

impl ResumeDocument {
    /// The "empty document" state: the preview shows a placeholder instead of
    /// rendering sections.
    pub fn is_empty(&self) -> bool {
        self.personal.is_empty()
            && self.summary.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
    }
}

/// The raw field values the host supplies on every change: personal fields,
/// summary, one comma-delimited skills string, and the dynamic experience and
/// education row lists. Everything defaults to empty so an absent or partial
/// payload deserializes cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFormSnapshot {
    pub personal: PersonalInfo,
    pub summary: String,
    /// Comma-delimited skills input, split during collection.
    pub skills: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

/// One deterministic collection pass from raw form state to a document.
///
/// Rules:
/// - missing fields are already empty strings (serde defaults);
/// - experience/education rows with no primary field are dropped, never stored;
/// - the skills string is split on commas, tokens trimmed, empties dropped,
///   order and duplicates preserved;
/// - nothing else is trimmed.
///
/// Never fails; the all-empty snapshot yields the all-empty document.
pub fn collect(raw: &RawFormSnapshot) -> ResumeDocument {
    let experience = raw
        .experience
        .iter()
        .filter(|e| e.is_significant())
        .cloned()
        .collect();

    let education = raw
        .education
        .iter()
        .filter(|e| e.is_significant())
        .cloned()
        .collect();

    let skills = raw
        .skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    ResumeDocument {
        personal: raw.personal.clone(),
        summary: raw.summary.clone(),
        experience,
        education,
        skills,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_skills(skills: &str) -> RawFormSnapshot {
        RawFormSnapshot {
            skills: skills.to_string(),
            ..Default::default()
        }
    }

    // ── collect ─────────────────────────────────────────────────────────────

    #[test]
    fn test_collect_empty_snapshot_yields_empty_document() {
        let doc = collect(&RawFormSnapshot::default());
        assert_eq!(doc, ResumeDocument::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_collect_is_deterministic_and_idempotent() {
        let raw = RawFormSnapshot {
            personal: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                ..Default::default()
            },
            summary: "  Analyst.  ".to_string(),
            skills: "Math, Engines".to_string(),
            experience: vec![ExperienceEntry {
                title: "Analyst".to_string(),
                ..Default::default()
            }],
            education: vec![],
        };
        let first = collect(&raw);
        let second = collect(&raw);
        assert_eq!(first, second);
        // Summary is passed through untrimmed.
        assert_eq!(first.summary, "  Analyst.  ");
    }

    #[test]
    fn test_collect_drops_insignificant_rows() {
        let raw = RawFormSnapshot {
            experience: vec![
                ExperienceEntry::default(),
                ExperienceEntry {
                    // Dates alone do not make a row significant.
                    start_date: "2020".to_string(),
                    end_date: "2021".to_string(),
                    description: "Did things".to_string(),
                    ..Default::default()
                },
                ExperienceEntry {
                    company: "Acme".to_string(),
                    ..Default::default()
                },
            ],
            education: vec![
                EducationEntry {
                    year: "2018".to_string(),
                    gpa: "3.9".to_string(),
                    ..Default::default()
                },
                EducationEntry {
                    school: "MIT".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let doc = collect(&raw);
        assert_eq!(doc.experience.len(), 1);
        assert_eq!(doc.experience[0].company, "Acme");
        assert_eq!(doc.education.len(), 1);
        assert_eq!(doc.education[0].school, "MIT");
    }

    #[test]
    fn test_collect_splits_and_trims_skills() {
        let doc = collect(&snapshot_with_skills("A, B ,, C"));
        assert_eq!(doc.skills, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_collect_preserves_skill_order_and_duplicates() {
        let doc = collect(&snapshot_with_skills("Rust, SQL, Rust"));
        assert_eq!(doc.skills, vec!["Rust", "SQL", "Rust"]);
    }

    #[test]
    fn test_collect_empty_skills_string_yields_no_skills() {
        let doc = collect(&snapshot_with_skills("   "));
        assert!(doc.skills.is_empty());
    }

    // ── document helpers ────────────────────────────────────────────────────

    #[test]
    fn test_is_empty_false_when_any_personal_field_set() {
        let doc = ResumeDocument {
            personal: PersonalInfo {
                phone: "555".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_contact_parts_skips_absent_fields() {
        let personal = PersonalInfo {
            full_name: "X".to_string(),
            email: "x@y.z".to_string(),
            website: "y.z".to_string(),
            ..Default::default()
        };
        assert_eq!(personal.contact_parts(), vec!["x@y.z", "y.z"]);
    }

    #[test]
    fn test_date_range_separator_only_when_both_present() {
        let both = ExperienceEntry {
            start_date: "Jan 2020".to_string(),
            end_date: "Present".to_string(),
            ..Default::default()
        };
        assert_eq!(both.date_range(), "Jan 2020 - Present");

        let start_only = ExperienceEntry {
            start_date: "Jan 2020".to_string(),
            ..Default::default()
        };
        assert_eq!(start_only.date_range(), "Jan 2020");

        assert_eq!(ExperienceEntry::default().date_range(), "");
    }

    // ── serde wire format ───────────────────────────────────────────────────

    #[test]
    fn test_snapshot_deserializes_from_partial_payload() {
        let raw: RawFormSnapshot = serde_json::from_str(
            r#"{"personal": {"fullName": "Jo"}, "skills": "A,B"}"#,
        )
        .unwrap();
        assert_eq!(raw.personal.full_name, "Jo");
        assert!(raw.experience.is_empty());
        let doc = collect(&raw);
        assert_eq!(doc.skills, vec!["A", "B"]);
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let doc = collect(&RawFormSnapshot {
            personal: PersonalInfo {
                full_name: "Jo".to_string(),
                ..Default::default()
            },
            experience: vec![ExperienceEntry {
                title: "Dev".to_string(),
                start_date: "2020".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        });
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"fullName\""), "camelCase wire format");
        assert!(json.contains("\"startDate\""));
        let back: ResumeDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
