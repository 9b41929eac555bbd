//! Keepsake sections: the collectible character card and the "news flash"
//! front-page frame. Both are fixed-width framed pieces rather than the
//! plain full-width card the other sections use.

use crate::content::{CharacterCard, NewsFlash};
use crate::layout::{palette, Composer, DrawCommand, TextAlign};
use crate::measure::{Font, TextMeasurer};

use super::{section_heading, SheetLabels, HEADING_ADVANCE, SECTION_GAP};

const CARD_WIDTH: f64 = 90.0;
const DRAW_BOX_H: f64 = 45.0;
const BAR_WIDTH: f64 = 50.0;
const BAR_HEIGHT: f64 = 3.5;
const BAR_ROW_H: f64 = 9.0;
const MAX_ATTRIBUTES: usize = 3;

/// A trading-card style panel: name, title, a dashed box to draw the
/// character in, and up to three attribute bars on a 1–10 scale. A card whose
/// attributes are all 10 earns the badge.
pub fn render_character_card(
    c: &mut Composer,
    labels: &SheetLabels,
    number: usize,
    card: &CharacterCard,
) {
    let geom = c.geometry();
    let attributes = &card.attributes[..card.attributes.len().min(MAX_ATTRIBUTES)];

    let name_h = TextMeasurer::line_height(14.0);
    let title_h = if card.title.is_empty() { 0.0 } else { TextMeasurer::line_height(9.0) };
    let bars_h = attributes.len() as f64 * BAR_ROW_H;
    let card_height = 6.0 + name_h + title_h + 3.0 + DRAW_BOX_H + 4.0 + bars_h + 4.0;

    c.ensure_space(HEADING_ADVANCE + card_height + SECTION_GAP);
    section_heading(c, number, &labels.character_card);

    let card_x = geom.center_x() - CARD_WIDTH / 2.0;
    let card_y = c.y();
    c.push(DrawCommand::Rect {
        x: card_x,
        y: card_y,
        width: CARD_WIDTH,
        height: card_height,
        fill: Some(palette::WHITE),
        stroke: Some(palette::PRIMARY),
        line_width: 0.6,
        corner_radius: 3.0,
        dashed: false,
    });

    let mut y = card_y + 6.0 + name_h * 0.7;
    c.text(
        &card.name,
        geom.center_x(),
        y,
        Font::HelveticaBold,
        14.0,
        palette::TITLE_TEXT,
        TextAlign::Center,
    );
    y += name_h * 0.3;
    if !card.title.is_empty() {
        y += title_h * 0.8;
        c.text(
            &card.title,
            geom.center_x(),
            y,
            Font::HelveticaOblique,
            9.0,
            palette::MUTED_TEXT,
            TextAlign::Center,
        );
        y += title_h * 0.2;
    }

    // Drawing area for the character's portrait.
    y += 3.0;
    c.push(DrawCommand::Rect {
        x: card_x + 5.0,
        y,
        width: CARD_WIDTH - 10.0,
        height: DRAW_BOX_H,
        fill: None,
        stroke: Some(palette::GUIDE_GRAY),
        line_width: 0.3,
        corner_radius: 2.0,
        dashed: true,
    });
    y += DRAW_BOX_H + 4.0;

    let bar_x = card_x + CARD_WIDTH - 5.0 - BAR_WIDTH;
    for attribute in attributes {
        let value = attribute.value.clamp(1, 10);
        let label_y = y + BAR_HEIGHT;
        c.text(
            &attribute.label,
            card_x + 5.0,
            label_y,
            Font::Helvetica,
            8.0,
            palette::BODY_TEXT,
            TextAlign::Left,
        );
        // Full-length track, filled proportionally to the value.
        c.rect(bar_x, y, BAR_WIDTH, BAR_HEIGHT, Some(palette::CUT_GUIDE), None);
        c.rect(
            bar_x,
            y,
            BAR_WIDTH * f64::from(value) / 10.0,
            BAR_HEIGHT,
            Some(palette::PRIMARY),
            None,
        );
        y += BAR_ROW_H;
    }

    if card.is_perfect() {
        c.text(
            &labels.perfect_badge,
            card_x + CARD_WIDTH - 5.0,
            card_y + 9.0,
            Font::HelveticaBold,
            8.0,
            palette::HIGHLIGHT_TEXT,
            TextAlign::Right,
        );
    }

    c.advance(card_height + SECTION_GAP);
}

const NEWS_PT: f64 = 13.0;
const CAPTION_BOX_H: f64 = 40.0;
const NEWS_RULES: usize = 4;
const RULE_SPACING: f64 = 8.0;

/// A mock newspaper front page: double-ruled masthead, the headline, an
/// optional byline, a dashed box to draw the scene, and ruled lines to write
/// the article.
pub fn render_news_flash(c: &mut Composer, labels: &SheetLabels, number: usize, news: &NewsFlash) {
    if news.headline.is_empty() {
        return;
    }
    let geom = c.geometry();
    let text_width = geom.content_width() - 16.0;

    let headline = c
        .measurer()
        .measure(&news.headline, Font::HelveticaBold, NEWS_PT, text_width);
    let masthead_h = TextMeasurer::line_height(12.0) + 5.0;
    let byline_h = if news.reporter.is_empty() { 0.0 } else { TextMeasurer::line_height(9.0) + 1.0 };
    let prompt_h = TextMeasurer::line_height(8.0) + 2.0;
    let rules_h = NEWS_RULES as f64 * RULE_SPACING;
    let card_height =
        6.0 + masthead_h + 3.0 + headline.height + 2.0 + byline_h + 3.0 + prompt_h + CAPTION_BOX_H + 4.0 + rules_h + 4.0;

    c.ensure_space(HEADING_ADVANCE + card_height + SECTION_GAP);
    section_heading(c, number, &labels.news_flash);

    let card_y = c.y();
    c.card(card_y, card_height, palette::WHITE, palette::CARD_BORDER);

    // Double-ruled masthead band.
    let masthead_baseline = card_y + 5.0 + TextMeasurer::line_height(12.0) * 0.8;
    c.text(
        &labels.news_banner,
        geom.center_x(),
        masthead_baseline,
        Font::HelveticaBold,
        12.0,
        palette::TITLE_TEXT,
        TextAlign::Center,
    );
    let rule_y = card_y + 5.0 + masthead_h;
    let left = geom.margin + 5.0;
    let right = geom.width - geom.margin - 5.0;
    c.line(left, rule_y, right, rule_y, palette::INK, 0.5);
    c.line(left, rule_y + 1.2, right, rule_y + 1.2, palette::INK, 0.3);

    let mut y = rule_y + 4.0 + TextMeasurer::line_height(NEWS_PT) * 0.9;
    c.text_block(
        headline.lines.clone(),
        geom.center_x(),
        y,
        Font::HelveticaBold,
        NEWS_PT,
        palette::TITLE_TEXT,
        TextAlign::Center,
    );
    y += headline.height - TextMeasurer::line_height(NEWS_PT) * 0.9 + 2.0;

    if !news.reporter.is_empty() {
        y += TextMeasurer::line_height(9.0);
        c.text(
            &format!("By {}", news.reporter),
            geom.center_x(),
            y,
            Font::HelveticaOblique,
            9.0,
            palette::MUTED_TEXT,
            TextAlign::Center,
        );
        y += 1.0;
    }

    y += 3.0 + TextMeasurer::line_height(8.0) * 0.8;
    c.text(
        &labels.caption_prompt,
        left,
        y,
        Font::HelveticaOblique,
        8.0,
        palette::LABEL_TEXT,
        TextAlign::Left,
    );
    y += TextMeasurer::line_height(8.0) * 0.2 + 2.0;

    c.push(DrawCommand::Rect {
        x: left,
        y,
        width: right - left,
        height: CAPTION_BOX_H,
        fill: None,
        stroke: Some(palette::GUIDE_GRAY),
        line_width: 0.3,
        corner_radius: 2.0,
        dashed: true,
    });
    y += CAPTION_BOX_H + RULE_SPACING;

    for _ in 0..NEWS_RULES {
        c.writing_line(left, right, y);
        y += RULE_SPACING;
    }

    c.advance(card_height + SECTION_GAP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Attribute;
    use crate::layout::A4;
    use crate::measure::TextMeasurer;

    fn card(values: &[u8]) -> CharacterCard {
        CharacterCard {
            name: "David".into(),
            title: "Shepherd King".into(),
            attributes: values
                .iter()
                .enumerate()
                .map(|(i, &v)| Attribute { label: format!("Attribute {i}"), value: v })
                .collect(),
        }
    }

    #[test]
    fn perfect_card_earns_the_badge() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 0);
        render_character_card(&mut c, &SheetLabels::default(), 9, &card(&[10, 10, 10]));
        assert!(c.finish().pages[0].contains_text("PERFECT!"));
    }

    #[test]
    fn imperfect_card_gets_no_badge() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 0);
        render_character_card(&mut c, &SheetLabels::default(), 9, &card(&[10, 7, 10]));
        assert!(!c.finish().pages[0].contains_text("PERFECT!"));
    }

    #[test]
    fn character_card_caps_attribute_bars_at_three() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 0);
        render_character_card(&mut c, &SheetLabels::default(), 9, &card(&[5, 6, 7, 8, 9]));
        let doc = c.finish();
        assert!(doc.pages[0].contains_text("Attribute 2"));
        assert!(!doc.pages[0].contains_text("Attribute 3"));
    }

    #[test]
    fn news_flash_shows_headline_and_byline() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 0);
        let news = NewsFlash {
            headline: "Walls of Jericho fall after seven-day march".into(),
            reporter: "Rahab".into(),
        };
        render_news_flash(&mut c, &SheetLabels::default(), 11, &news);
        let doc = c.finish();
        assert!(doc.pages[0].contains_text("Jericho"));
        assert!(doc.pages[0].contains_text("By Rahab"));
        assert!(doc.pages[0].contains_text("THE GOOD NEWS"));
    }

    #[test]
    fn news_flash_without_reporter_omits_byline() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 0);
        let news = NewsFlash { headline: "Manna falls in the desert".into(), reporter: String::new() };
        render_news_flash(&mut c, &SheetLabels::default(), 11, &news);
        assert!(!c.finish().pages[0].contains_text("By "));
    }
}
