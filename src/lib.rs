//! # Folha
//!
//! A page-native layout engine for printable Bible-story activity sheets and
//! storybooks.
//!
//! Most document generators lay content onto an infinite canvas and slice it
//! into pages afterwards, which is how puzzles end up cut in half at a page
//! boundary. Folha does the opposite: **the page is the fundamental unit.**
//! Every renderer measures its full section first and asks the cursor for
//! room *before* drawing, so a section either fits on the current page or
//! starts fresh on the next one — never both.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [content]    — Activity and storybook content model
//!       ↓
//!   [measure]    — Deterministic metric-table text measurement
//!       ↓
//!   [puzzle]     — Word-search packer, maze generator
//!       ↓
//!   [activities] — One renderer per activity type
//!       ↓
//!   [assemble] / [storybook] — Page composition
//!       ↓
//!   Document     — Abstract draw-command stream for any sink
//! ```
//!
//! The output is a [`Document`] of serializable draw commands; turning those
//! into PDF, SVG or canvas calls is the consumer's job.

pub mod activities;
pub mod assemble;
pub mod content;
pub mod error;
pub mod layout;
pub mod measure;
pub mod puzzle;
pub mod storybook;

pub use assemble::SheetAssembler;
pub use content::{ActivityContent, ImageRef, MazeMarkers, Storybook};
pub use error::FolhaError;
pub use layout::{Document, DrawCommand, Page};
pub use measure::TextMeasurer;
pub use storybook::StoryBookPaginator;

/// Compose an activity sheet from parsed content.
///
/// This is the primary entry point. The seed drives all randomness in the
/// run; equal content and seed reproduce the document exactly.
pub fn compose_activity_sheet(
    content: &ActivityContent,
    seed: u64,
) -> Result<Document, FolhaError> {
    let measurer = TextMeasurer::new();
    SheetAssembler::new(&measurer)
        .with_seed(seed)
        .assemble(content, None, None)
}

/// Compose an activity sheet from content described as JSON.
pub fn compose_activity_sheet_json(json: &str, seed: u64) -> Result<Document, FolhaError> {
    let content: ActivityContent = serde_json::from_str(json)?;
    compose_activity_sheet(&content, seed)
}

/// Paginate a storybook from parsed content.
pub fn compose_storybook(book: &Storybook) -> Document {
    let measurer = TextMeasurer::new();
    StoryBookPaginator::new(&measurer).paginate(book)
}

/// Paginate a storybook described as JSON.
pub fn compose_storybook_json(json: &str) -> Result<Document, FolhaError> {
    let book: Storybook = serde_json::from_str(json)?;
    Ok(compose_storybook(&book))
}

/// Derive a filesystem-safe file stem from a story title: parenthetical
/// suffixes dropped, lowercased, punctuation stripped, spaces collapsed to
/// underscores.
pub fn output_file_stem(title: &str) -> String {
    let cleaned = strip_parenthetical(title).to_lowercase();
    let kept: String = cleaned
        .chars()
        .filter(|ch| ch.is_alphanumeric() || ch.is_whitespace() || *ch == '_')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Remove `(...)` spans from a title. Unbalanced input degrades gracefully:
/// an unclosed `(` drops the rest of the string, a stray `)` is dropped
/// alone.
pub(crate) fn strip_parenthetical(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for ch in s.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_strips_punctuation_and_parentheticals() {
        assert_eq!(
            output_file_stem("Noah's Ark (The Great Flood)"),
            "noahs_ark"
        );
        assert_eq!(output_file_stem("David & Goliath!"), "david_goliath");
        assert_eq!(output_file_stem("  Jonah   and the Fish  "), "jonah_and_the_fish");
    }

    #[test]
    fn file_stem_handles_unbalanced_parentheses() {
        assert_eq!(output_file_stem("Esther (unfinished"), "esther");
        assert_eq!(output_file_stem("Ruth) and Naomi"), "ruth_and_naomi");
    }

    #[test]
    fn json_entry_point_reports_schema_mismatches() {
        let err = compose_activity_sheet_json(r#"{"quiz": 3}"#, 0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("failed to parse content"), "got: {msg}");
        assert!(msg.contains("schema"), "got: {msg}");
    }

    #[test]
    fn json_entry_point_composes_valid_content() {
        let doc = compose_activity_sheet_json(
            r#"{"title": "Creation", "familyQuestions": ["What did God make first?"]}"#,
            7,
        )
        .unwrap();
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages[0].contains_text("Creation"));
    }

    #[test]
    fn storybook_json_entry_point() {
        let doc = compose_storybook_json(
            r#"{"title": "The First Christmas", "scenes": [{"narrativeText": "A baby was born in Bethlehem."}]}"#,
        )
        .unwrap();
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages[0].contains_text("Bethlehem"));
    }
}
