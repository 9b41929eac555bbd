//! Matching-style sections: match the columns, true/false, who-said-it, and
//! order-the-events. All of them shuffle something for display — the answer
//! key is always the input order, never the shuffled one.

use rand::seq::SliceRandom;

use crate::content::{MatchPair, Quote, TrueOrFalse};
use crate::layout::{palette, Composer, TextAlign};
use crate::measure::{Font, MeasuredBlock, TextMeasurer};

use super::{section_heading, SheetLabels, HEADING_ADVANCE, SECTION_GAP};

const BODY_PT: f64 = 11.0;
const ROW_GAP: f64 = 4.0;

/// Left column in original order, right column independently shuffled. Rows
/// pair by display slot only; the correct mapping is the input pairing.
pub fn render_match_columns(c: &mut Composer, labels: &SheetLabels, number: usize, pairs: &[MatchPair]) {
    if pairs.is_empty() {
        return;
    }
    let geom = c.geometry();
    let column_width = geom.content_width() / 2.0 - 14.0;

    let mut right_order: Vec<usize> = (0..pairs.len()).collect();
    right_order.shuffle(c.rng());

    let lefts: Vec<MeasuredBlock> = pairs
        .iter()
        .enumerate()
        .map(|(i, p)| {
            c.measurer()
                .measure(&format!("{}. {}", i + 1, p.left), Font::HelveticaBold, BODY_PT, column_width)
        })
        .collect();
    let rights: Vec<MeasuredBlock> = right_order
        .iter()
        .enumerate()
        .map(|(slot, &src)| {
            let letter = (b'a' + slot as u8) as char;
            c.measurer().measure(
                &format!("(   ) {letter}. {}", pairs[src].right),
                Font::Helvetica,
                BODY_PT,
                column_width,
            )
        })
        .collect();

    let row_heights: Vec<f64> = lefts
        .iter()
        .zip(&rights)
        .map(|(l, r)| l.height.max(r.height) + ROW_GAP)
        .collect();
    let card_height = 10.0 + row_heights.iter().sum::<f64>();

    c.ensure_space(HEADING_ADVANCE + card_height + SECTION_GAP);
    section_heading(c, number, &labels.match_columns);

    let card_y = c.y();
    c.card(card_y, card_height, palette::WHITE, palette::CARD_BORDER);

    let left_x = geom.margin + 5.0;
    let right_x = geom.center_x() + 4.0;
    let mut top = card_y + 7.0;
    for ((left, right), row_height) in lefts.iter().zip(&rights).zip(&row_heights) {
        let baseline = top + TextMeasurer::line_height(BODY_PT) * 0.9;
        c.text_block(
            left.lines.clone(),
            left_x,
            baseline,
            Font::HelveticaBold,
            BODY_PT,
            palette::BODY_TEXT,
            TextAlign::Left,
        );
        c.text_block(
            right.lines.clone(),
            right_x,
            baseline,
            Font::Helvetica,
            BODY_PT,
            palette::BODY_TEXT,
            TextAlign::Left,
        );
        top += row_height;
    }

    c.advance(card_height + SECTION_GAP);
}

const MARK_BOX: f64 = 5.0;

/// Each statement gets two exclusive empty boxes under T and F headers.
pub fn render_true_or_false(c: &mut Composer, labels: &SheetLabels, number: usize, items: &[TrueOrFalse]) {
    if items.is_empty() {
        return;
    }
    let geom = c.geometry();
    let boxes_x = geom.width - geom.margin - 24.0;
    let text_width = boxes_x - geom.margin - 10.0;

    let blocks: Vec<MeasuredBlock> = items
        .iter()
        .map(|item| c.measurer().measure(&item.statement, Font::Helvetica, BODY_PT, text_width))
        .collect();
    let header_height = TextMeasurer::line_height(BODY_PT);
    let rows_height: f64 = blocks.iter().map(|b| b.height.max(MARK_BOX) + ROW_GAP).sum();
    let card_height = 8.0 + header_height + rows_height;

    c.ensure_space(HEADING_ADVANCE + card_height + SECTION_GAP);
    section_heading(c, number, &labels.true_or_false);

    let card_y = c.y();
    c.card(card_y, card_height, palette::WHITE, palette::CARD_BORDER);

    // Column headers over the mark boxes.
    let header_baseline = card_y + 5.0 + header_height * 0.8;
    c.text(
        &labels.true_mark,
        boxes_x + MARK_BOX / 2.0,
        header_baseline,
        Font::HelveticaBold,
        BODY_PT,
        palette::PRIMARY,
        TextAlign::Center,
    );
    c.text(
        &labels.false_mark,
        boxes_x + 12.0 + MARK_BOX / 2.0,
        header_baseline,
        Font::HelveticaBold,
        BODY_PT,
        palette::PRIMARY,
        TextAlign::Center,
    );

    let mut top = card_y + 6.0 + header_height;
    for block in &blocks {
        let baseline = top + TextMeasurer::line_height(BODY_PT) * 0.9;
        c.text_block(
            block.lines.clone(),
            geom.margin + 5.0,
            baseline,
            Font::Helvetica,
            BODY_PT,
            palette::BODY_TEXT,
            TextAlign::Left,
        );
        c.checkbox(boxes_x, top + 0.5, MARK_BOX);
        c.checkbox(boxes_x + 12.0, top + 0.5, MARK_BOX);
        top += block.height.max(MARK_BOX) + ROW_GAP;
    }

    c.advance(card_height + SECTION_GAP);
}

/// Quotes with a shared character bank shown once, separated from the
/// quotes, so it works as a genuine matching exercise. Content with fewer
/// than two distinct speakers still renders — it just makes a trivial puzzle,
/// which is the content source's problem, not a crash.
pub fn render_who_said_it(c: &mut Composer, labels: &SheetLabels, number: usize, quotes: &[Quote]) {
    if quotes.is_empty() {
        return;
    }
    let geom = c.geometry();
    let text_width = geom.content_width() - 14.0;

    let mut bank: Vec<&str> = Vec::new();
    for quote in quotes {
        if !bank.contains(&quote.character.as_str()) {
            bank.push(&quote.character);
        }
    }
    if bank.len() < 2 {
        log::warn!("who-said-it content has {} distinct speaker(s); puzzle will be trivial", bank.len());
    }

    let bank_text = format!("{} {}", labels.character_bank, bank.join(" • "));
    let bank_block = c
        .measurer()
        .measure(&bank_text, Font::HelveticaBold, BODY_PT, text_width);

    let quote_blocks: Vec<MeasuredBlock> = quotes
        .iter()
        .map(|q| {
            c.measurer().measure(
                &format!("\u{201C}{}\u{201D}", q.quote),
                Font::HelveticaOblique,
                BODY_PT,
                text_width - 40.0,
            )
        })
        .collect();

    let bank_height = bank_block.height + 8.0;
    let rows_height: f64 = quote_blocks.iter().map(|b| b.height + ROW_GAP + 2.0).sum();
    let card_height = 8.0 + bank_height + 4.0 + rows_height;

    c.ensure_space(HEADING_ADVANCE + card_height + SECTION_GAP);
    section_heading(c, number, &labels.who_said_it);

    let card_y = c.y();
    c.card(card_y, card_height, palette::WHITE, palette::CARD_BORDER);

    // Name bank on a highlighted strip inside the card.
    let geom_inner_w = geom.content_width() - 8.0;
    c.push(crate::layout::DrawCommand::Rect {
        x: geom.margin + 4.0,
        y: card_y + 4.0,
        width: geom_inner_w,
        height: bank_height,
        fill: Some(palette::HIGHLIGHT_FILL),
        stroke: Some(palette::HIGHLIGHT_BORDER),
        line_width: 0.3,
        corner_radius: 2.0,
        dashed: false,
    });
    c.text_block(
        bank_block.lines.clone(),
        geom.center_x(),
        card_y + 4.0 + TextMeasurer::line_height(BODY_PT),
        Font::HelveticaBold,
        BODY_PT,
        palette::HIGHLIGHT_TEXT,
        TextAlign::Center,
    );

    let answer_x1 = geom.width - geom.margin - 48.0;
    let answer_x2 = geom.width - geom.margin - 6.0;
    let mut top = card_y + 4.0 + bank_height + 6.0;
    for block in &quote_blocks {
        let baseline = top + TextMeasurer::line_height(BODY_PT) * 0.9;
        c.text_block(
            block.lines.clone(),
            geom.margin + 5.0,
            baseline,
            Font::HelveticaOblique,
            BODY_PT,
            palette::BODY_TEXT,
            TextAlign::Left,
        );
        c.writing_line(answer_x1, answer_x2, top + block.height);
        top += block.height + ROW_GAP + 2.0;
    }

    c.advance(card_height + SECTION_GAP);
}

const SEQ_BOX: f64 = 6.0;

/// Events shuffled for display; chronological order (the input order) is the
/// answer key. The child writes sequence numbers into the boxes.
pub fn render_order_events(c: &mut Composer, labels: &SheetLabels, number: usize, events: &[String]) {
    if events.is_empty() {
        return;
    }
    let geom = c.geometry();
    let text_width = geom.content_width() - 24.0;

    let mut display: Vec<usize> = (0..events.len()).collect();
    display.shuffle(c.rng());

    let blocks: Vec<MeasuredBlock> = display
        .iter()
        .map(|&i| c.measurer().measure(&events[i], Font::Helvetica, BODY_PT, text_width))
        .collect();
    let rows_height: f64 = blocks.iter().map(|b| b.height.max(SEQ_BOX) + ROW_GAP).sum();
    let card_height = 10.0 + rows_height;

    c.ensure_space(HEADING_ADVANCE + card_height + SECTION_GAP);
    section_heading(c, number, &labels.order_events);

    let card_y = c.y();
    c.card(card_y, card_height, palette::WHITE, palette::CARD_BORDER);

    let mut top = card_y + 7.0;
    for block in &blocks {
        c.checkbox(geom.margin + 5.0, top, SEQ_BOX);
        c.text_block(
            block.lines.clone(),
            geom.margin + 16.0,
            top + TextMeasurer::line_height(BODY_PT) * 0.9,
            Font::Helvetica,
            BODY_PT,
            palette::BODY_TEXT,
            TextAlign::Left,
        );
        top += block.height.max(SEQ_BOX) + ROW_GAP;
    }

    c.advance(card_height + SECTION_GAP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::A4;
    use crate::measure::TextMeasurer;

    fn pairs() -> Vec<MatchPair> {
        vec![
            MatchPair { left: "Moses".into(), right: "Parted the sea".into() },
            MatchPair { left: "David".into(), right: "Defeated Goliath".into() },
            MatchPair { left: "Noah".into(), right: "Built the ark".into() },
            MatchPair { left: "Jonah".into(), right: "Swallowed by a fish".into() },
        ]
    }

    #[test]
    fn match_columns_keeps_left_order_and_shows_all_rights() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 3);
        render_match_columns(&mut c, &SheetLabels::default(), 5, &pairs());
        let doc = c.finish();
        let page = &doc.pages[0];
        assert!(page.contains_text("1. Moses"));
        assert!(page.contains_text("2. David"));
        for right in ["Parted the sea", "Defeated Goliath", "Built the ark"] {
            assert!(page.contains_text(right));
        }
    }

    #[test]
    fn true_or_false_draws_two_boxes_per_statement() {
        use crate::layout::DrawCommand;
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 3);
        let items = vec![
            TrueOrFalse { statement: "Noah built the ark".into(), is_true: true },
            TrueOrFalse { statement: "The flood lasted one day".into(), is_true: false },
        ];
        render_true_or_false(&mut c, &SheetLabels::default(), 6, &items);
        let doc = c.finish();
        let mark_boxes = doc.pages[0]
            .commands
            .iter()
            .filter(|cmd| {
                matches!(cmd, DrawCommand::Rect { width, height, .. }
                    if *width == MARK_BOX && *height == MARK_BOX)
            })
            .count();
        assert_eq!(mark_boxes, 4);
    }

    #[test]
    fn who_said_it_shows_each_character_once_in_the_bank() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 3);
        let quotes = vec![
            Quote { quote: "Am I my brother's keeper?".into(), character: "Cain".into() },
            Quote { quote: "Here I am".into(), character: "Samuel".into() },
            Quote { quote: "Speak, for your servant hears".into(), character: "Samuel".into() },
        ];
        render_who_said_it(&mut c, &SheetLabels::default(), 7, &quotes);
        let doc = c.finish();
        assert!(doc.pages[0].contains_text("Cain • Samuel"));
    }

    #[test]
    fn who_said_it_with_one_speaker_still_renders() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 3);
        let quotes = vec![Quote { quote: "Let my people go".into(), character: "Moses".into() }];
        render_who_said_it(&mut c, &SheetLabels::default(), 7, &quotes);
        assert!(c.finish().pages[0].contains_text("Let my people go"));
    }

    #[test]
    fn order_events_displays_every_event() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 9);
        let events: Vec<String> = (0..5).map(|i| format!("Event number {i}")).collect();
        render_order_events(&mut c, &SheetLabels::default(), 8, &events);
        let doc = c.finish();
        for event in &events {
            assert!(doc.pages[0].contains_text(event));
        }
    }
}
