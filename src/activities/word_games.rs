//! Letter-puzzle sections: the word-search page, scrambled words, and the
//! number-substitution secret code.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::content::ScrambleWord;
use crate::layout::{palette, Composer, TextAlign};
use crate::measure::{Font, TextMeasurer};
use crate::puzzle::word_search::place as place_words;

use super::{normalize_letters, page_banner, section_heading, SheetLabels, SECTION_GAP};

/// Practical limits the packer's full-placement guarantee relies on.
const MAX_WORDS: usize = 8;
const MAX_WORD_LEN: usize = 10;
const MIN_GRID: usize = 10;

/// The word-search activity always owns a fresh page: a grid cannot be split
/// across a boundary, and the assembler routes it here accordingly.
pub fn render_word_search(c: &mut Composer, labels: &SheetLabels, number: usize, words: &[String]) {
    c.new_page();
    page_banner(c, &labels.word_search_banner);
    section_heading(c, number, &labels.word_search);

    let normalized: Vec<String> = words
        .iter()
        .map(|w| normalize_letters(w))
        .filter(|w| (1..=MAX_WORD_LEN).contains(&w.chars().count()))
        .take(MAX_WORDS)
        .collect();
    if normalized.is_empty() {
        return;
    }

    let placement = place_words(&normalized, MIN_GRID, c.rng());
    let geom = c.geometry();

    let size = placement.size();
    let cell = (170.0 / size as f64).min(11.0);
    let grid_span = size as f64 * cell;
    let letter_pt = (cell * 1.27).min(14.0);

    // Only genuinely placed words go on the find list.
    let find_text = format!("{} {}", labels.find_words, placement.placed_words().join(", "));
    let find_block = c
        .measurer()
        .measure(&find_text, Font::HelveticaBold, 8.0, geom.content_width() - 20.0);

    let card_y = c.y();
    let card_height = 10.0 + grid_span + 6.0 + find_block.height + 4.0;
    c.card(card_y, card_height, palette::CARD_FILL, palette::CARD_BORDER);

    let start_x = geom.center_x() - grid_span / 2.0;
    let start_y = card_y + 10.0;
    for (row, letters) in placement.rows().iter().enumerate() {
        for (col, &letter) in letters.iter().enumerate() {
            c.text(
                &letter.to_string(),
                start_x + col as f64 * cell + cell / 2.0,
                start_y + row as f64 * cell + cell * 0.7,
                Font::CourierBold,
                letter_pt,
                palette::MUTED_TEXT,
                TextAlign::Center,
            );
        }
    }

    c.text_block(
        find_block.lines,
        geom.center_x(),
        start_y + grid_span + 6.0,
        Font::HelveticaBold,
        8.0,
        palette::LABEL_TEXT,
        TextAlign::Center,
    );

    c.advance(card_height + SECTION_GAP);
}

/// Fisher–Yates shuffle of the word's letters, re-shuffled a bounded number
/// of times when the result reads the same as the input (always possible for
/// words with repeated letters, so the bound matters).
fn scramble_letters(word: &str, rng: &mut impl Rng) -> String {
    let original: Vec<char> = word.chars().collect();
    if original.len() < 2 {
        return word.to_string();
    }
    let mut letters = original.clone();
    for _ in 0..8 {
        letters.shuffle(rng);
        if letters != original {
            break;
        }
    }
    letters.iter().collect()
}

const SCRAMBLE_PT: f64 = 13.0;
const HINT_PT: f64 = 9.0;

pub fn render_scramble(c: &mut Composer, labels: &SheetLabels, number: usize, items: &[ScrambleWord]) {
    if items.is_empty() {
        return;
    }
    let geom = c.geometry();

    let scrambled: Vec<String> = items
        .iter()
        .map(|item| {
            let letters = scramble_letters(&normalize_letters(&item.word), c.rng());
            letters.chars().map(|ch| ch.to_string()).collect::<Vec<_>>().join(" ")
        })
        .collect();

    let hint_width = geom.content_width() - 14.0;
    let hints: Vec<_> = items
        .iter()
        .map(|item| {
            c.measurer()
                .measure(&format!("{} {}", labels.hint, item.hint), Font::HelveticaOblique, HINT_PT, hint_width)
        })
        .collect();

    let item_heights: Vec<f64> = hints
        .iter()
        .map(|hint| TextMeasurer::line_height(SCRAMBLE_PT) + 2.0 + hint.height + 4.0)
        .collect();
    let card_height = 8.0 + item_heights.iter().sum::<f64>();

    c.ensure_space(super::HEADING_ADVANCE + card_height + SECTION_GAP);
    section_heading(c, number, &labels.scramble);

    let card_y = c.y();
    c.card(card_y, card_height, palette::WHITE, palette::CARD_BORDER);

    let answer_x = geom.margin + 95.0;
    let mut top = card_y + 6.0;
    for ((index, letters), hint) in scrambled.iter().enumerate().zip(&hints) {
        let baseline = top + TextMeasurer::line_height(SCRAMBLE_PT) * 0.9;
        c.text(
            &format!("{}) {letters}", index + 1),
            geom.margin + 5.0,
            baseline,
            Font::CourierBold,
            SCRAMBLE_PT,
            palette::BODY_TEXT,
            TextAlign::Left,
        );
        c.writing_line(answer_x, geom.width - geom.margin - 5.0, baseline);
        c.text_block(
            hint.lines.clone(),
            geom.margin + 8.0,
            baseline + TextMeasurer::line_height(HINT_PT),
            Font::HelveticaOblique,
            HINT_PT,
            palette::MUTED_TEXT,
            TextAlign::Left,
        );
        top += item_heights[index];
    }

    c.advance(card_height + SECTION_GAP);
}

const CODE_BOX: f64 = 7.0;
const CODE_GAP: f64 = 1.5;
const WORD_GAP: f64 = 5.0;
const CODE_ROW_H: f64 = 13.0;

/// Alphabet position (A=1 … Z=26) for the substitution key.
fn letter_number(ch: char) -> u8 {
    (ch as u8) - b'A' + 1
}

/// One empty box per letter with its cipher number beneath; spaces become
/// gaps between words, never boxes.
pub fn render_secret_code(c: &mut Composer, labels: &SheetLabels, number: usize, phrase: &str) {
    let words: Vec<String> = phrase
        .split_whitespace()
        .map(normalize_letters)
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return;
    }
    let geom = c.geometry();

    // Pre-plan box rows so the section height is known before drawing.
    let left = geom.margin + 5.0;
    let right = geom.width - geom.margin - 5.0;
    let mut rows: Vec<Vec<(f64, char)>> = vec![Vec::new()];
    let mut x = left;
    for word in &words {
        let word_span = word.chars().count() as f64 * (CODE_BOX + CODE_GAP);
        if x > left && x + word_span > right {
            rows.push(Vec::new());
            x = left;
        }
        for ch in word.chars() {
            if x + CODE_BOX > right {
                rows.push(Vec::new());
                x = left;
            }
            rows.last_mut().expect("rows starts non-empty").push((x, ch));
            x += CODE_BOX + CODE_GAP;
        }
        x += WORD_GAP;
    }

    let key_height = 2.0 * TextMeasurer::line_height(8.0) + 6.0;
    let boxes_height = rows.len() as f64 * CODE_ROW_H;
    let card_height = 8.0 + key_height + 4.0 + boxes_height + 4.0;

    c.ensure_space(super::HEADING_ADVANCE + card_height + SECTION_GAP);
    section_heading(c, number, &labels.secret_code);

    let card_y = c.y();
    c.card(card_y, card_height, palette::CARD_FILL, palette::CARD_BORDER);

    // Cipher key, two rows of thirteen letters.
    let key_line = |range: std::ops::RangeInclusive<u8>| -> String {
        range
            .map(|i| format!("{}={}", (b'A' + i - 1) as char, i))
            .collect::<Vec<_>>()
            .join("  ")
    };
    let key_y = card_y + 6.0 + TextMeasurer::line_height(8.0) * 0.5;
    c.text(
        &format!("{} {}", labels.code_key, key_line(1..=13)),
        geom.center_x(),
        key_y + TextMeasurer::line_height(8.0) * 0.5,
        Font::Courier,
        8.0,
        palette::MUTED_TEXT,
        TextAlign::Center,
    );
    c.text(
        &key_line(14..=26),
        geom.center_x(),
        key_y + TextMeasurer::line_height(8.0) * 1.5,
        Font::Courier,
        8.0,
        palette::MUTED_TEXT,
        TextAlign::Center,
    );

    let mut row_top = card_y + 8.0 + key_height + 4.0;
    for row in &rows {
        for &(box_x, ch) in row {
            c.rect(box_x, row_top, CODE_BOX, CODE_BOX, Some(palette::WHITE), Some(palette::CHECKBOX_BORDER));
            c.text(
                &letter_number(ch).to_string(),
                box_x + CODE_BOX / 2.0,
                row_top + CODE_BOX + 3.5,
                Font::Courier,
                7.0,
                palette::LABEL_TEXT,
                TextAlign::Center,
            );
        }
        row_top += CODE_ROW_H;
    }

    c.advance(card_height + SECTION_GAP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::A4;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn letter_numbers_span_the_alphabet() {
        assert_eq!(letter_number('A'), 1);
        assert_eq!(letter_number('Z'), 26);
        assert_eq!(letter_number('N'), 14);
    }

    #[test]
    fn scramble_keeps_the_same_letters() {
        let mut rng = StdRng::seed_from_u64(4);
        let scrambled = scramble_letters("GOLIATH", &mut rng);
        let mut a: Vec<char> = scrambled.chars().collect();
        let mut b: Vec<char> = "GOLIATH".chars().collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn scramble_usually_changes_the_order() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_ne!(scramble_letters("JERUSALEM", &mut rng), "JERUSALEM");
    }

    #[test]
    fn single_letter_word_passes_through() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(scramble_letters("A", &mut rng), "A");
    }

    #[test]
    fn word_search_page_lists_only_placed_words() {
        let measurer = crate::measure::TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 5);
        let words: Vec<String> = ["ARCA", "NOE", "DILUVIO", "POMBA"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        render_word_search(&mut c, &SheetLabels::default(), 3, &words);
        let doc = c.finish();
        // Renderer opened its own page.
        assert_eq!(doc.page_count(), 2);
        let page = &doc.pages[1];
        assert!(page.contains_text("WORD SEARCH"));
        for word in ["ARCA", "NOE", "DILUVIO", "POMBA"] {
            assert!(page.contains_text(word), "find list must contain {word}");
        }
    }

    #[test]
    fn secret_code_skips_blank_phrase() {
        let measurer = crate::measure::TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 5);
        render_secret_code(&mut c, &SheetLabels::default(), 10, "   ");
        assert!(c.finish().pages[0].commands.is_empty());
    }

    #[test]
    fn secret_code_draws_a_box_per_letter() {
        use crate::layout::DrawCommand;
        let measurer = crate::measure::TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 5);
        render_secret_code(&mut c, &SheetLabels::default(), 10, "BE STRONG");
        let doc = c.finish();
        let boxes = doc.pages[0]
            .commands
            .iter()
            .filter(|cmd| {
                matches!(
                    cmd,
                    DrawCommand::Rect { width, height, corner_radius, .. }
                        if *width == CODE_BOX && *height == CODE_BOX && *corner_radius == 0.0
                )
            })
            .count();
        // "BESTRONG" has 8 letters; the space adds a gap, not a box.
        assert_eq!(boxes, 8);
    }
}
