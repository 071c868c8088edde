//! Text Segmentation — splits free-text description fields into bullet lines.
//!
//! Shared by both renderers so the preview and the PDF agree on bullet
//! boundaries. The marker-stripping rule removes every `•`, `*`, and `-`
//! anywhere in the line, not just a single leading marker; lines that were
//! nothing but markers survive as empty bullets because the emptiness filter
//! runs before stripping.

/// Splits `text` on newlines into bullet items.
///
/// Per line: trim, drop if empty, strip all bullet-marker characters, trim
/// again. Order is preserved; empty input yields an empty vec.
pub fn segment_bullets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.replace(['•', '*', '-'], "").trim().to_string())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_no_bullets() {
        assert!(segment_bullets("").is_empty());
        assert!(segment_bullets("\n\n  \n").is_empty());
    }

    #[test]
    fn test_markers_stripped_blank_lines_dropped_order_kept() {
        let bullets = segment_bullets("- First\n\nSecond\n* Third");
        assert_eq!(bullets, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_unmarked_lines_become_bullets_unchanged() {
        assert_eq!(
            segment_bullets("Shipped the thing\nKept it running"),
            vec!["Shipped the thing", "Kept it running"]
        );
    }

    #[test]
    fn test_all_marker_occurrences_are_stripped() {
        // The contract strips markers anywhere in the line, so hyphenated
        // words lose their hyphens too.
        assert_eq!(
            segment_bullets("• Built a best-in-class pipeline"),
            vec!["Built a bestinclass pipeline"]
        );
    }

    #[test]
    fn test_marker_only_line_survives_as_empty_bullet() {
        // Emptiness is decided before stripping, so "- - -" is not dropped.
        assert_eq!(segment_bullets("- - -"), vec![""]);
    }

    #[test]
    fn test_windows_newlines_are_handled() {
        assert_eq!(segment_bullets("- One\r\n- Two"), vec!["One", "Two"]);
    }
}
