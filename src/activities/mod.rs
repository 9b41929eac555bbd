//! # Activity Renderers
//!
//! One renderer per activity type, all built on the same skeleton: measure
//! the full section height, `ensure_space` for all of it *before* drawing,
//! then draw a card, a numbered heading and the body. A section is therefore
//! never split across a page boundary — the only activities that behave
//! differently are word search, maze and the coloring page, which the
//! assembler gives a dedicated fresh page because they cannot be split at
//! all.
//!
//! Renderers are pure functions over the [`Composer`]: content in, draw
//! commands and an advanced cursor out. Presence checks live in the
//! assembler, not here; a renderer may still degrade gracefully when content
//! is thinner than expected (e.g. a who-said-it section with one speaker).

pub mod cards;
pub mod full_page;
pub mod matching;
pub mod phrases;
pub mod quiz;
pub mod word_games;

use crate::layout::{palette, Composer, TextAlign};
use crate::measure::Font;

/// User-facing strings on the sheet. Defaults are English; callers localize
/// by substituting their own set.
#[derive(Debug, Clone)]
pub struct SheetLabels {
    pub sheet_title: String,
    pub name_field: String,
    pub date_field: String,
    /// Fallback verse for the cover card when the content has none.
    pub default_verse: String,

    pub quiz: String,
    pub complete_phrase: String,
    pub word_search: String,
    pub word_search_banner: String,
    pub find_words: String,
    pub scramble: String,
    pub hint: String,
    pub answer: String,
    pub match_columns: String,
    pub true_or_false: String,
    pub true_mark: String,
    pub false_mark: String,
    pub who_said_it: String,
    pub character_bank: String,
    pub order_events: String,
    pub character_card: String,
    pub perfect_badge: String,
    pub secret_code: String,
    pub code_key: String,
    pub news_flash: String,
    pub news_banner: String,
    pub caption_prompt: String,
    pub family_questions: String,
    pub verse_memorization: String,
    pub maze: String,
    pub maze_banner: String,
    pub coloring_banner: String,

    pub scene_label: String,
    pub attribution: String,
    pub copyright: String,
}

impl Default for SheetLabels {
    fn default() -> Self {
        Self {
            sheet_title: "BIBLE ACTIVITIES".into(),
            name_field: "Name: _________________________________".into(),
            date_field: "Date: ____/____/____".into(),
            default_verse:
                "Your word is a lamp to my feet and a light to my path. (Psalm 119:105)".into(),
            quiz: "Answer:".into(),
            complete_phrase: "Complete the phrase:".into(),
            word_search: "Word search:".into(),
            word_search_banner: "WORD SEARCH".into(),
            find_words: "Find:".into(),
            scramble: "Unscramble the words:".into(),
            hint: "Hint:".into(),
            answer: "Answer:".into(),
            match_columns: "Match the columns:".into(),
            true_or_false: "True or false?".into(),
            true_mark: "T".into(),
            false_mark: "F".into(),
            who_said_it: "Who said it?".into(),
            character_bank: "Characters:".into(),
            order_events: "Put the events in order:".into(),
            character_card: "Character card:".into(),
            perfect_badge: "PERFECT!".into(),
            secret_code: "Secret code:".into(),
            code_key: "Key:".into(),
            news_flash: "News flash:".into(),
            news_banner: "THE GOOD NEWS".into(),
            caption_prompt: "Draw the scene and write a caption:".into(),
            family_questions: "Talk about it as a family:".into(),
            verse_memorization: "Memorize the verse:".into(),
            maze: "Find the way:".into(),
            maze_banner: "MAZE".into(),
            coloring_banner: "LET'S COLOR!".into(),
            scene_label: "Scene".into(),
            attribution: "Printable Bible Activities".into(),
            copyright: "For personal and classroom use.".into(),
        }
    }
}

// ── Shared section skeleton ─────────────────────────────────────

/// Baseline offset of a section heading from the cursor.
pub(crate) const HEADING_LEAD: f64 = 5.0;
/// Cursor advance consumed by a heading (baseline offset + gap).
pub(crate) const HEADING_ADVANCE: f64 = 10.0;
/// Vertical gap after a finished section.
pub(crate) const SECTION_GAP: f64 = 6.0;

/// Draw the numbered purple section heading and advance the cursor past it.
pub(crate) fn section_heading(c: &mut Composer, number: usize, title: &str) {
    let margin = c.geometry().margin;
    let y = c.y() + HEADING_LEAD;
    c.text(
        &format!("{number}. {title}"),
        margin,
        y,
        Font::HelveticaBold,
        14.0,
        palette::PRIMARY,
        TextAlign::Left,
    );
    c.advance(HEADING_ADVANCE);
}

/// Content-area start position on pages that carry a banner band.
pub(crate) const BANNER_CONTENT_TOP: f64 = 35.0;

/// Draw the slim purple banner across the top of a fresh page and drop the
/// cursor below it. Used by the full-page activities (word search, maze,
/// coloring).
pub(crate) fn page_banner(c: &mut Composer, title: &str) {
    let geom = c.geometry();
    c.rect(0.0, 0.0, geom.width, 20.0, Some(palette::PRIMARY), None);
    c.text(
        title,
        geom.center_x(),
        13.0,
        Font::HelveticaBold,
        14.0,
        palette::WHITE,
        TextAlign::Center,
    );
    c.set_y(BANNER_CONTENT_TOP);
}

/// Uppercase and fold the Latin diacritics that show up in Portuguese and
/// Spanish content, keeping only letters. Puzzle grids and cipher boxes work
/// on this normalized form.
pub(crate) fn normalize_letters(word: &str) -> String {
    word.to_uppercase()
        .chars()
        .filter_map(fold_diacritic)
        .filter(|ch| ch.is_ascii_alphabetic())
        .collect()
}

fn fold_diacritic(ch: char) -> Option<char> {
    Some(match ch {
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        'Ñ' => 'N',
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Composer, A4};
    use crate::measure::TextMeasurer;

    #[test]
    fn normalize_folds_accents_and_drops_spaces() {
        assert_eq!(normalize_letters("Aliança"), "ALIANCA");
        assert_eq!(normalize_letters("mar vermelho"), "MARVERMELHO");
        assert_eq!(normalize_letters("Noé!"), "NOE");
    }

    #[test]
    fn heading_advances_cursor() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 0);
        let before = c.y();
        section_heading(&mut c, 3, "Word search:");
        assert_eq!(c.y(), before + HEADING_ADVANCE);
    }

    #[test]
    fn banner_drops_cursor_below_band() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 0);
        page_banner(&mut c, "MAZE");
        assert_eq!(c.y(), BANNER_CONTENT_TOP);
    }
}
