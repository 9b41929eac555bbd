//! Multiple-choice quiz section: one question, up to four checkbox options.
//!
//! The content source may supply several questions; only the first is
//! rendered so the sheet stays one-sitting-sized for a child.

use crate::content::QuizQuestion;
use crate::layout::{palette, Composer, TextAlign};
use crate::measure::{Font, MeasuredBlock};

use super::{section_heading, SheetLabels, HEADING_ADVANCE, SECTION_GAP};

const QUESTION_PT: f64 = 12.0;
const OPTION_PT: f64 = 11.0;
const CHECKBOX_SIDE: f64 = 4.0;
const OPTION_GAP: f64 = 3.0;
const CARD_PAD_TOP: f64 = 8.0;

pub fn render(c: &mut Composer, labels: &SheetLabels, number: usize, quiz: &[QuizQuestion]) {
    let Some(question) = quiz.first() else {
        return;
    };

    let geom = c.geometry();
    let question_width = geom.content_width() - 10.0;
    let option_width = geom.content_width() - 24.0;

    let question_block =
        c.measurer()
            .measure(&question.question, Font::HelveticaBold, QUESTION_PT, question_width);

    let options: Vec<MeasuredBlock> = question
        .options
        .iter()
        .take(4)
        .map(|opt| c.measurer().measure(opt, Font::Helvetica, OPTION_PT, option_width))
        .collect();
    let options_height: f64 = options.iter().map(|b| b.height + OPTION_GAP).sum();

    let card_height = CARD_PAD_TOP + question_block.height + 2.0 + options_height + 4.0;
    c.ensure_space(HEADING_ADVANCE + card_height + SECTION_GAP);

    section_heading(c, number, &labels.quiz);
    let card_y = c.y();
    c.card(card_y, card_height, palette::WHITE, palette::CARD_BORDER);

    c.text_block(
        question_block.lines.clone(),
        geom.margin + 5.0,
        card_y + CARD_PAD_TOP,
        Font::HelveticaBold,
        QUESTION_PT,
        palette::BODY_TEXT,
        TextAlign::Left,
    );

    let mut y = card_y + CARD_PAD_TOP + question_block.height + 2.0;
    for block in options {
        c.checkbox(geom.margin + 5.0, y - CHECKBOX_SIDE, CHECKBOX_SIDE);
        c.text_block(
            block.lines.clone(),
            geom.margin + 14.0,
            y,
            Font::Helvetica,
            OPTION_PT,
            palette::BODY_TEXT,
            TextAlign::Left,
        );
        y += block.height + OPTION_GAP;
    }

    c.advance(card_height + SECTION_GAP);
}
