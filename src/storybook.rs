//! # Storybook Paginator
//!
//! Lays out the printable picture book: for each scene, a full-bleed-ish
//! image page (when the illustration exists) followed by a large-type text
//! page. Pages alternate so the book reads image-left / text-right when
//! printed double-sided and bound.
//!
//! A scene whose illustration failed upstream still gets its text page — a
//! hole in the art never blocks delivery of the story.

use crate::content::Storybook;
use crate::layout::{palette, Composer, Document, DrawCommand, TextAlign, A4};
use crate::measure::{Font, TextMeasurer};
use crate::strip_parenthetical;

/// Illustration footprint: 3:4 portrait, centered on the page.
const IMAGE_W: f64 = 180.0;
const IMAGE_H: f64 = 240.0;

const TITLE_PT: f64 = 18.0;
const SCENE_PT: f64 = 14.0;
const NARRATIVE_PT: f64 = 18.0;
const TEXT_TOP: f64 = 35.0;
const TEXT_BOTTOM_PAD: f64 = 30.0;

pub struct StoryBookPaginator<'a> {
    measurer: &'a TextMeasurer,
    scene_label: String,
    attribution: String,
    copyright: String,
}

impl<'a> StoryBookPaginator<'a> {
    pub fn new(measurer: &'a TextMeasurer) -> Self {
        let labels = crate::activities::SheetLabels::default();
        Self {
            measurer,
            scene_label: labels.scene_label,
            attribution: labels.attribution,
            copyright: labels.copyright,
        }
    }

    pub fn with_labels(mut self, scene: &str, attribution: &str, copyright: &str) -> Self {
        self.scene_label = scene.to_string();
        self.attribution = attribution.to_string();
        self.copyright = copyright.to_string();
        self
    }

    pub fn paginate(&self, book: &Storybook) -> Document {
        // No randomness in the book layout; the seed is inert.
        let mut c = Composer::new(self.measurer, A4, 0);
        let title = clean_title(&book.title);
        let total = book.scenes.len();

        // The composer opens page one eagerly; the first drawn page reuses it.
        let mut first_page_used = false;
        for (index, scene) in book.scenes.iter().enumerate() {
            if let Some(image) = &scene.image {
                if std::mem::replace(&mut first_page_used, true) {
                    c.new_page();
                }
                self.image_page(&mut c, &image.source);
            }
            if std::mem::replace(&mut first_page_used, true) {
                c.new_page();
            }
            self.text_page(&mut c, &title, index + 1, total, &scene.narrative_text);
        }

        let doc = c.finish();
        log::info!(
            "paginated storybook \"{title}\": {} scene(s), {} page(s)",
            total,
            doc.page_count()
        );
        doc
    }

    /// Centered illustration with a faint cut guide around it.
    fn image_page(&self, c: &mut Composer, source: &str) {
        let geom = c.geometry();
        let x = geom.center_x() - IMAGE_W / 2.0;
        let y = (geom.height - IMAGE_H) / 2.0;
        c.push(DrawCommand::Rect {
            x: x - 0.5,
            y: y - 0.5,
            width: IMAGE_W + 1.0,
            height: IMAGE_H + 1.0,
            fill: None,
            stroke: Some(palette::CUT_GUIDE),
            line_width: 0.3,
            corner_radius: 0.0,
            dashed: false,
        });
        c.image(x, y, IMAGE_W, IMAGE_H, source);
    }

    fn text_page(&self, c: &mut Composer, title: &str, scene: usize, total: usize, narrative: &str) {
        let geom = c.geometry();
        let title_block = self.measurer.measure(title, Font::HelveticaBold, TITLE_PT, 170.0);

        let mut y = TEXT_TOP;
        c.text_block(
            title_block.lines.clone(),
            geom.center_x(),
            y,
            Font::HelveticaBold,
            TITLE_PT,
            palette::PRIMARY,
            TextAlign::Center,
        );
        y += title_block.height + 4.0;

        c.text(
            &format!("{} {scene} / {total}", self.scene_label),
            geom.center_x(),
            y,
            Font::HelveticaBold,
            SCENE_PT,
            palette::LABEL_TEXT,
            TextAlign::Center,
        );
        y += 8.0;
        c.line(
            geom.center_x() - 20.0,
            y,
            geom.center_x() + 20.0,
            y,
            palette::PRIMARY,
            1.0,
        );

        // Narrative block vertically centered in the remaining space.
        let area_top = y + 18.0;
        let area_bottom = geom.height - TEXT_BOTTOM_PAD;
        let block = self
            .measurer
            .measure(narrative, Font::HelveticaOblique, NARRATIVE_PT, 160.0);
        let free = (area_bottom - area_top - block.height).max(0.0);
        c.text_block(
            block.lines,
            geom.center_x(),
            area_top + free / 2.0 + TextMeasurer::line_height(NARRATIVE_PT) * 0.8,
            Font::HelveticaOblique,
            NARRATIVE_PT,
            palette::BODY_TEXT,
            TextAlign::Center,
        );

        c.text(
            &self.attribution,
            geom.center_x(),
            geom.height - 20.0,
            Font::Helvetica,
            9.0,
            palette::FOOTER_TEXT,
            TextAlign::Center,
        );
        c.text(
            &self.copyright,
            geom.center_x(),
            geom.height - 15.0,
            Font::Helvetica,
            7.0,
            palette::FOOTER_TEXT,
            TextAlign::Center,
        );
    }
}

/// Story titles sometimes arrive with an editorial suffix in parentheses;
/// the book drops it.
fn clean_title(title: &str) -> String {
    strip_parenthetical(title).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ImageRef, StoryScene};

    fn image(name: &str) -> ImageRef {
        ImageRef { source: name.into(), width: 768, height: 1024 }
    }

    fn book() -> Storybook {
        Storybook {
            title: "Jonah and the Great Fish (Kids Edition)".into(),
            scenes: vec![
                StoryScene::illustrated("Jonah ran from what God asked.", image("scene1.png")),
                StoryScene::illustrated("A storm rose over the sea.", image("scene2.png")),
            ],
        }
    }

    #[test]
    fn illustrated_scene_takes_two_pages() {
        let measurer = TextMeasurer::new();
        let doc = StoryBookPaginator::new(&measurer).paginate(&book());
        assert_eq!(doc.page_count(), 4);
        assert!(doc.pages[0].has_image());
        assert!(doc.pages[1].contains_text("Scene 1 / 2"));
        assert!(doc.pages[2].has_image());
        assert!(doc.pages[3].contains_text("Scene 2 / 2"));
    }

    #[test]
    fn missing_image_drops_only_the_image_page() {
        let measurer = TextMeasurer::new();
        let mut b = book();
        b.scenes[0].image = None;
        let doc = StoryBookPaginator::new(&measurer).paginate(&b);
        assert_eq!(doc.page_count(), 3);
        assert!(!doc.pages[0].has_image());
        assert!(doc.pages[0].contains_text("Jonah ran"));
    }

    #[test]
    fn parenthetical_suffix_is_stripped_from_the_title() {
        let measurer = TextMeasurer::new();
        let doc = StoryBookPaginator::new(&measurer).paginate(&book());
        assert!(doc.pages[1].contains_text("Jonah and the Great Fish"));
        assert!(!doc.pages[1].contains_text("Kids Edition"));
    }

    #[test]
    fn empty_book_yields_a_single_blank_page() {
        let measurer = TextMeasurer::new();
        let doc = StoryBookPaginator::new(&measurer).paginate(&Storybook {
            title: "Untold".into(),
            scenes: vec![],
        });
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages[0].commands.is_empty());
    }

    #[test]
    fn text_page_carries_attribution_and_copyright() {
        let measurer = TextMeasurer::new();
        let doc = StoryBookPaginator::new(&measurer).paginate(&book());
        assert!(doc.pages[1].contains_text("Printable Bible Activities"));
        assert!(doc.pages[1].contains_text("For personal and classroom use."));
    }
}
