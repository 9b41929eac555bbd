//! Text-centric sections: the fill-in-the-blank phrase card, verse
//! memorization, and family conversation questions.

use crate::content::CompleteThePhrase;
use crate::layout::{palette, Composer, TextAlign};
use crate::measure::{Font, TextMeasurer};

use super::{section_heading, SheetLabels, HEADING_ADVANCE, SECTION_GAP};

const PHRASE_PT: f64 = 12.0;
const RULE_SPACING: f64 = 8.0;

/// Replace the missing word inside the phrase with an underscore run of the
/// same length. Case-insensitive; when the word does not occur (the content
/// source sometimes pre-blanks the phrase itself) the phrase passes through
/// unchanged.
///
/// Lowercasing can change byte lengths ('İ' lowers to two chars), so the
/// match is located in a lowered copy and mapped back to the original byte
/// range through a per-byte origin table rather than reusing the offsets
/// directly.
fn blank_out(phrase: &str, missing_word: &str) -> String {
    if missing_word.is_empty() {
        return phrase.to_string();
    }
    let mut lowered = String::with_capacity(phrase.len());
    let mut origins = Vec::with_capacity(phrase.len());
    for (offset, ch) in phrase.char_indices() {
        for lc in ch.to_lowercase() {
            let before = lowered.len();
            lowered.push(lc);
            origins.extend(std::iter::repeat(offset).take(lowered.len() - before));
        }
    }

    let needle = missing_word.to_lowercase();
    let Some(found) = lowered.find(&needle) else {
        return phrase.to_string();
    };
    let start = origins[found];
    // End just past the original char that produced the last matched byte.
    let last_origin = origins[found + needle.len() - 1];
    let end = last_origin + phrase[last_origin..].chars().next().map_or(0, char::len_utf8);

    let run = "_".repeat(missing_word.chars().count().max(4));
    format!("{}{}{}", &phrase[..start], run, &phrase[end..])
}

/// Single highlighted card with the phrase, blank rendered as underscores.
pub fn render_complete_phrase(
    c: &mut Composer,
    labels: &SheetLabels,
    number: usize,
    content: &CompleteThePhrase,
) {
    if content.phrase.is_empty() {
        return;
    }
    let geom = c.geometry();
    let text = blank_out(&content.phrase, &content.missing_word);
    let block = c.measurer().measure(&text, Font::HelveticaBold, PHRASE_PT, 150.0);
    let card_height = block.height + 12.0;

    c.ensure_space(HEADING_ADVANCE + card_height + SECTION_GAP);
    section_heading(c, number, &labels.complete_phrase);

    let card_y = c.y();
    c.card(card_y, card_height, palette::HIGHLIGHT_FILL, palette::HIGHLIGHT_BORDER);
    c.text_block(
        block.lines,
        geom.center_x(),
        card_y + 9.0,
        Font::HelveticaBold,
        PHRASE_PT,
        palette::HIGHLIGHT_TEXT,
        TextAlign::Center,
    );
    c.advance(card_height + SECTION_GAP);
}

/// The verse in an italic card followed by ruled lines to copy it out.
pub fn render_verse_memorization(
    c: &mut Composer,
    labels: &SheetLabels,
    number: usize,
    verse: &str,
) {
    if verse.is_empty() {
        return;
    }
    let geom = c.geometry();
    let quoted = format!("\u{201C}{verse}\u{201D}");
    let block = c
        .measurer()
        .measure(&quoted, Font::HelveticaOblique, PHRASE_PT, geom.content_width() - 20.0);
    let copy_lines = block.line_count().max(2);
    let card_height = 8.0 + block.height + 4.0 + copy_lines as f64 * RULE_SPACING + 4.0;

    c.ensure_space(HEADING_ADVANCE + card_height + SECTION_GAP);
    section_heading(c, number, &labels.verse_memorization);

    let card_y = c.y();
    c.card(card_y, card_height, palette::CARD_FILL, palette::CARD_BORDER);
    c.text_block(
        block.lines.clone(),
        geom.center_x(),
        card_y + 9.0,
        Font::HelveticaOblique,
        PHRASE_PT,
        palette::MUTED_TEXT,
        TextAlign::Center,
    );

    let mut y = card_y + 8.0 + block.height + RULE_SPACING;
    for _ in 0..copy_lines {
        c.writing_line(geom.margin + 10.0, geom.width - geom.margin - 10.0, y);
        y += RULE_SPACING;
    }
    c.advance(card_height + SECTION_GAP);
}

const QUESTION_PT: f64 = 11.0;

/// Conversation starters, each with ruled answer lines beneath.
pub fn render_family_questions(
    c: &mut Composer,
    labels: &SheetLabels,
    number: usize,
    questions: &[String],
) {
    if questions.is_empty() {
        return;
    }
    let geom = c.geometry();
    let text_width = geom.content_width() - 14.0;

    let blocks: Vec<_> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            c.measurer()
                .measure(&format!("{}) {q}", i + 1), Font::HelveticaBold, QUESTION_PT, text_width)
        })
        .collect();
    let body_height: f64 = blocks
        .iter()
        .map(|b| b.height + 2.0 * RULE_SPACING + 4.0)
        .sum();
    let card_height = 8.0 + body_height;

    c.ensure_space(HEADING_ADVANCE + card_height + SECTION_GAP);
    section_heading(c, number, &labels.family_questions);

    let card_y = c.y();
    c.card(card_y, card_height, palette::WHITE, palette::CARD_BORDER);

    let mut top = card_y + 6.0;
    for block in blocks {
        c.text_block(
            block.lines.clone(),
            geom.margin + 5.0,
            top + TextMeasurer::line_height(QUESTION_PT) * 0.9,
            Font::HelveticaBold,
            QUESTION_PT,
            palette::BODY_TEXT,
            TextAlign::Left,
        );
        let mut rule_y = top + block.height + RULE_SPACING * 0.8;
        for _ in 0..2 {
            c.writing_line(geom.margin + 8.0, geom.width - geom.margin - 8.0, rule_y);
            rule_y += RULE_SPACING;
        }
        top += block.height + 2.0 * RULE_SPACING + 4.0;
    }
    c.advance(card_height + SECTION_GAP);
}
