//! # Sheet Assembler
//!
//! Walks the fixed activity order, rendering each slot whose content is
//! present. Slot numbers are fixed per activity type (the quiz is always
//! "1.", the maze always "14.") so a family collecting sheets across stories
//! sees a stable numbering even when individual stories skip activities.
//!
//! Page footers are stamped in a second pass after composition, because the
//! page count is only known once every renderer has run.

use crate::content::{ActivityContent, ImageRef, MazeMarkers};
use crate::error::FolhaError;
use crate::layout::{palette, Composer, Document, DrawCommand, TextAlign, A4};
use crate::measure::{Font, TextMeasurer};

use crate::activities::{self, SheetLabels};

/// Builder for one activity-sheet composition run.
///
/// The seed drives every random choice in the run (word-search layout,
/// scrambles, shuffles, the maze), so equal inputs plus an equal seed yield a
/// byte-identical document.
pub struct SheetAssembler<'a> {
    measurer: &'a TextMeasurer,
    labels: SheetLabels,
    seed: u64,
}

impl<'a> SheetAssembler<'a> {
    pub fn new(measurer: &'a TextMeasurer) -> Self {
        Self {
            measurer,
            labels: SheetLabels::default(),
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_labels(mut self, labels: SheetLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Compose the full sheet: cover header, then every present activity in
    /// the fixed order, then footers.
    pub fn assemble(
        &self,
        content: &ActivityContent,
        coloring: Option<&ImageRef>,
        maze_markers: Option<&MazeMarkers>,
    ) -> Result<Document, FolhaError> {
        let mut c = Composer::new(self.measurer, A4, self.seed);
        let labels = &self.labels;

        self.cover(&mut c, content);

        if !content.quiz.is_empty() {
            activities::quiz::render(&mut c, labels, 1, &content.quiz);
        }
        if let Some(phrase) = &content.complete_the_phrase {
            activities::phrases::render_complete_phrase(&mut c, labels, 2, phrase);
        }
        if !content.word_search.is_empty() {
            activities::word_games::render_word_search(&mut c, labels, 3, &content.word_search);
        }
        if !content.scramble_words.is_empty() {
            activities::word_games::render_scramble(&mut c, labels, 4, &content.scramble_words);
        }
        if !content.match_columns.is_empty() {
            activities::matching::render_match_columns(&mut c, labels, 5, &content.match_columns);
        }
        if !content.true_or_false.is_empty() {
            activities::matching::render_true_or_false(&mut c, labels, 6, &content.true_or_false);
        }
        if !content.who_said_it.is_empty() {
            activities::matching::render_who_said_it(&mut c, labels, 7, &content.who_said_it);
        }
        if !content.order_events.is_empty() {
            activities::matching::render_order_events(&mut c, labels, 8, &content.order_events);
        }
        if let Some(card) = &content.character_card {
            activities::cards::render_character_card(&mut c, labels, 9, card);
        }
        if let Some(phrase) = &content.secret_phrase {
            activities::word_games::render_secret_code(&mut c, labels, 10, phrase);
        }
        if let Some(news) = &content.news_flash {
            activities::cards::render_news_flash(&mut c, labels, 11, news);
        }
        if !content.family_questions.is_empty() {
            activities::phrases::render_family_questions(&mut c, labels, 12, &content.family_questions);
        }
        if let Some(verse) = &content.bible_verse {
            activities::phrases::render_verse_memorization(&mut c, labels, 13, verse);
        }
        if let Some(maze) = &content.maze {
            activities::full_page::render_maze(&mut c, labels, 14, maze.age_tier, maze_markers)?;
        }
        if let Some(image) = coloring {
            activities::full_page::render_coloring_page(&mut c, labels, &image.source);
        }

        let mut doc = c.finish();
        self.stamp_footers(&mut doc);
        log::info!(
            "assembled activity sheet \"{}\": {} page(s), seed {}",
            content.title,
            doc.page_count(),
            self.seed
        );
        Ok(doc)
    }

    /// Purple header band, name/date box and the story title with its verse.
    fn cover(&self, c: &mut Composer, content: &ActivityContent) {
        let geom = c.geometry();
        c.rect(0.0, 0.0, geom.width, 35.0, Some(palette::PRIMARY), None);
        c.text(
            &self.labels.sheet_title,
            geom.center_x(),
            18.0,
            Font::HelveticaBold,
            24.0,
            palette::WHITE,
            TextAlign::Center,
        );

        // Name/date box overlapping the bottom edge of the band.
        c.push(DrawCommand::Rect {
            x: geom.margin,
            y: 28.0,
            width: geom.content_width(),
            height: 16.0,
            fill: Some(palette::WHITE),
            stroke: Some(palette::CARD_BORDER),
            line_width: 0.3,
            corner_radius: 3.0,
            dashed: false,
        });
        c.text(
            &self.labels.name_field,
            geom.margin + 5.0,
            39.0,
            Font::Helvetica,
            10.0,
            palette::BODY_TEXT,
            TextAlign::Left,
        );
        c.text(
            &self.labels.date_field,
            geom.width - geom.margin - 5.0,
            39.0,
            Font::Helvetica,
            10.0,
            palette::BODY_TEXT,
            TextAlign::Right,
        );
        c.set_y(52.0);

        let title_block = c
            .measurer()
            .measure(&content.title, Font::HelveticaBold, 16.0, 160.0);
        c.text_block(
            title_block.lines.clone(),
            geom.center_x(),
            c.y(),
            Font::HelveticaBold,
            16.0,
            palette::TITLE_TEXT,
            TextAlign::Center,
        );
        c.advance(title_block.height + 2.0);

        let verse = content
            .bible_verse
            .as_deref()
            .unwrap_or(&self.labels.default_verse);
        let block = c
            .measurer()
            .measure(verse, Font::HelveticaOblique, 10.0, geom.content_width() - 20.0);
        let card_height = block.height + 8.0;
        let card_y = c.y();
        c.card(card_y, card_height, palette::CARD_FILL, palette::CARD_BORDER);
        c.text_block(
            block.lines,
            geom.center_x(),
            card_y + 6.0,
            Font::HelveticaOblique,
            10.0,
            palette::MUTED_TEXT,
            TextAlign::Center,
        );
        c.advance(card_height + 8.0);
    }

    /// Second pass: attribution and "page / total" on every page.
    fn stamp_footers(&self, doc: &mut Document) {
        let total = doc.page_count();
        for (index, page) in doc.pages.iter_mut().enumerate() {
            let (width, height) = (page.width, page.height);
            page.commands.push(DrawCommand::Text {
                x: width / 2.0,
                y: height - 10.0,
                lines: vec![self.labels.attribution.clone()],
                font: Font::Helvetica,
                size: 8.0,
                color: palette::FOOTER_TEXT,
                align: TextAlign::Center,
                line_height: TextMeasurer::line_height(8.0),
            });
            page.commands.push(DrawCommand::Text {
                x: width - A4.margin,
                y: height - 10.0,
                lines: vec![format!("{} / {}", index + 1, total)],
                font: Font::Helvetica,
                size: 8.0,
                color: palette::FOOTER_TEXT,
                align: TextAlign::Right,
                line_height: TextMeasurer::line_height(8.0),
            });
        }
    }
}
