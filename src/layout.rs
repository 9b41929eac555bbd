//! # Page-Aware Layout Primitives
//!
//! The page is the fundamental unit here. There is no infinite canvas that
//! gets sliced afterwards: every renderer asks "does this fit?" *before*
//! drawing, and the cursor opens a fresh page when the answer is no. Content
//! is therefore never emitted past the bottom margin.
//!
//! Three layers live in this module:
//!
//! - [`PageCursor`] — the stateful vertical position tracker, one per
//!   document, threaded explicitly through every renderer.
//! - [`DrawCommand`] / [`Page`] / [`Document`] — the abstract output stream.
//!   The actual PDF (or SVG, or canvas) backend is a pure consumer of these
//!   commands and lives outside this crate.
//! - [`Composer`] — the drawing context handed to renderers: document +
//!   cursor + measurer + seeded RNG, plus the shared draw helpers.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::measure::{Font, TextMeasurer};

/// An RGB color, 0–255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The sheet palette. Named after the roles the colors play, not the
/// framework color scale they came from.
pub mod palette {
    use super::Color;

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const INK: Color = Color::rgb(20, 20, 20);
    /// Brand purple: header bands and section headings.
    pub const PRIMARY: Color = Color::rgb(124, 58, 237);
    pub const CARD_FILL: Color = Color::rgb(248, 250, 252);
    pub const CARD_BORDER: Color = Color::rgb(226, 232, 240);
    pub const FAINT_BORDER: Color = Color::rgb(240, 240, 240);
    pub const BODY_TEXT: Color = Color::rgb(51, 65, 85);
    pub const TITLE_TEXT: Color = Color::rgb(30, 41, 59);
    pub const MUTED_TEXT: Color = Color::rgb(71, 85, 105);
    pub const LABEL_TEXT: Color = Color::rgb(100, 100, 100);
    pub const FOOTER_TEXT: Color = Color::rgb(150, 150, 150);
    pub const GUIDE_GRAY: Color = Color::rgb(200, 200, 200);
    pub const CUT_GUIDE: Color = Color::rgb(230, 230, 230);
    pub const CHECKBOX_BORDER: Color = Color::rgb(203, 213, 225);
    pub const HIGHLIGHT_FILL: Color = Color::rgb(254, 252, 232);
    pub const HIGHLIGHT_BORDER: Color = Color::rgb(253, 224, 71);
    pub const HIGHLIGHT_TEXT: Color = Color::rgb(161, 98, 7);
}

/// Horizontal text alignment relative to the command's x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One drawing instruction for the document sink.
///
/// Coordinates are millimetres from the page's top-left corner. `Text.y` is
/// the baseline of the first line; subsequent lines advance by `line_height`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DrawCommand {
    #[serde(rename_all = "camelCase")]
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Color>,
        line_width: f64,
        corner_radius: f64,
        dashed: bool,
    },
    #[serde(rename_all = "camelCase")]
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        x: f64,
        y: f64,
        lines: Vec<String>,
        font: Font,
        size: f64,
        color: Color,
        align: TextAlign,
        line_height: f64,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        source: String,
    },
}

/// A finished page: fixed dimensions plus its ordered command list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl Page {
    /// Whether any text command on this page contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.commands.iter().any(|cmd| match cmd {
            DrawCommand::Text { lines, .. } => lines.iter().any(|l| l.contains(needle)),
            _ => false,
        })
    }

    /// Whether this page carries any image command.
    pub fn has_image(&self) -> bool {
        self.commands
            .iter()
            .any(|cmd| matches!(cmd, DrawCommand::Image { .. }))
    }
}

/// The assembled output document: an ordered list of pages.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Fixed page geometry: A4 portrait, millimetre units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    /// Left and right content margin.
    pub margin: f64,
    /// Where the cursor starts on a fresh page.
    pub top: f64,
    /// Reserved band at the bottom (footer lives here; content never does).
    pub bottom: f64,
}

pub const A4: PageGeometry = PageGeometry {
    width: 210.0,
    height: 297.0,
    margin: 15.0,
    top: 20.0,
    bottom: 20.0,
};

impl PageGeometry {
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y a content block may extend to.
    pub fn limit_y(&self) -> f64 {
        self.height - self.bottom
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }
}

/// The stateful vertical position tracker for one document.
///
/// Invariant: immediately after any successful draw, `y` lies within
/// `[top, limit_y()]`; `ensure_space` issues the page break *before* the
/// caller draws, never after.
#[derive(Debug, Clone)]
pub struct PageCursor {
    y: f64,
    geometry: PageGeometry,
}

impl PageCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { y: geometry.top, geometry }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Move the cursor to an absolute position (used by banner pages that
    /// start content below a header band).
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Advance past a drawn block.
    pub fn advance(&mut self, height: f64) {
        self.y += height;
    }

    /// Would a block of `height` fit on the current page?
    pub fn fits(&self, height: f64) -> bool {
        self.y + height <= self.geometry.limit_y()
    }

    /// Guarantee room for a block of `height` before drawing it.
    ///
    /// Returns `true` when a page break was required; the cursor is then
    /// already reset to the top margin and the caller must open a new page.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        if self.fits(height) {
            false
        } else {
            self.reset();
            true
        }
    }

    /// Reset to the top margin of a fresh page.
    pub fn reset(&mut self) {
        self.y = self.geometry.top;
    }
}

/// The drawing context threaded through every renderer.
///
/// Owns the output document, the cursor, and the seeded RNG; borrows the
/// measurer. All randomness in a composition run flows through this RNG, so
/// one seed reproduces one exact document.
pub struct Composer<'a> {
    measurer: &'a TextMeasurer,
    rng: StdRng,
    doc: Document,
    cursor: PageCursor,
}

impl<'a> Composer<'a> {
    pub fn new(measurer: &'a TextMeasurer, geometry: PageGeometry, seed: u64) -> Self {
        let mut doc = Document::default();
        doc.pages.push(Page {
            width: geometry.width,
            height: geometry.height,
            commands: Vec::new(),
        });
        Self {
            measurer,
            rng: StdRng::seed_from_u64(seed),
            doc,
            cursor: PageCursor::new(geometry),
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.cursor.geometry
    }

    pub fn measurer(&self) -> &TextMeasurer {
        self.measurer
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn y(&self) -> f64 {
        self.cursor.y()
    }

    pub fn set_y(&mut self, y: f64) {
        self.cursor.set_y(y);
    }

    pub fn advance(&mut self, height: f64) {
        self.cursor.advance(height);
    }

    pub fn fits(&self, height: f64) -> bool {
        self.cursor.fits(height)
    }

    /// Guarantee room for `height`, opening a fresh page when needed.
    /// Returns `true` when a page break happened.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        if self.cursor.ensure_space(height) {
            log::debug!(
                "page break: block of {height:.1}mm moved to page {}",
                self.doc.page_count() + 1
            );
            self.open_page();
            true
        } else {
            false
        }
    }

    /// Unconditionally start a new page with the cursor at the top margin.
    pub fn new_page(&mut self) {
        self.cursor.reset();
        self.open_page();
    }

    fn open_page(&mut self) {
        let geometry = self.cursor.geometry;
        self.doc.pages.push(Page {
            width: geometry.width,
            height: geometry.height,
            commands: Vec::new(),
        });
    }

    /// Append a raw command to the current page.
    pub fn push(&mut self, cmd: DrawCommand) {
        self.doc
            .pages
            .last_mut()
            .expect("composer always holds at least one page")
            .commands
            .push(cmd);
    }

    // ── Draw helpers shared by all renderers ──────────────────────

    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Color>,
    ) {
        self.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
            line_width: 0.3,
            corner_radius: 0.0,
            dashed: false,
        });
    }

    /// A full-content-width rounded card, the container every activity body
    /// draws into.
    pub fn card(&mut self, y: f64, height: f64, fill: Color, stroke: Color) {
        let geom = self.geometry();
        self.push(DrawCommand::Rect {
            x: geom.margin,
            y,
            width: geom.content_width(),
            height,
            fill: Some(fill),
            stroke: Some(stroke),
            line_width: 0.3,
            corner_radius: 3.0,
            dashed: false,
        });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64) {
        self.push(DrawCommand::Line { x1, y1, x2, y2, color, width });
    }

    /// A single line of text.
    pub fn text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        color: Color,
        align: TextAlign,
    ) {
        self.text_block(vec![text.to_string()], x, y, font, size, color, align);
    }

    /// A pre-wrapped multi-line block. `y` is the first baseline.
    pub fn text_block(
        &mut self,
        lines: Vec<String>,
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        color: Color,
        align: TextAlign,
    ) {
        self.push(DrawCommand::Text {
            x,
            y,
            lines,
            font,
            size,
            color,
            align,
            line_height: TextMeasurer::line_height(size),
        });
    }

    /// An empty mark target (checkbox) with the standard border color.
    pub fn checkbox(&mut self, x: f64, y: f64, side: f64) {
        self.rect(x, y, side, side, None, Some(palette::CHECKBOX_BORDER));
    }

    /// A ruled writing line spanning `x1..x2`.
    pub fn writing_line(&mut self, x1: f64, x2: f64, y: f64) {
        self.line(x1, y, x2, y, palette::GUIDE_GRAY, 0.3);
    }

    pub fn image(&mut self, x: f64, y: f64, width: f64, height: f64, source: &str) {
        self.push(DrawCommand::Image {
            x,
            y,
            width,
            height,
            source: source.to_string(),
        });
    }

    /// Pages emitted so far (the current page included).
    pub fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    pub fn finish(self) -> Document {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_starts_at_top_margin() {
        let cursor = PageCursor::new(A4);
        assert_eq!(cursor.y(), A4.top);
    }

    #[test]
    fn ensure_space_breaks_before_overflow() {
        let mut cursor = PageCursor::new(A4);
        let usable = A4.limit_y() - A4.top;
        // Fill most of the page, then request a block that cannot fit.
        cursor.advance(usable - 10.0);
        assert!(!cursor.ensure_space(10.0));
        assert!(cursor.ensure_space(20.0), "expected a page break");
        assert_eq!(cursor.y(), A4.top);
    }

    #[test]
    fn cursor_never_exceeds_bottom_margin() {
        // Any sequence of ensure_space + advance with block heights that fit
        // a page keeps the cursor within the content area after each draw.
        let mut cursor = PageCursor::new(A4);
        let heights = [40.0, 120.0, 90.0, 55.0, 200.0, 13.5, 77.0, 240.0, 5.0];
        for &h in heights.iter().cycle().take(200) {
            cursor.ensure_space(h);
            cursor.advance(h);
            assert!(
                cursor.y() <= A4.limit_y() + 1e-9,
                "cursor overflowed: {}",
                cursor.y()
            );
            assert!(cursor.y() >= A4.top);
        }
    }

    #[test]
    fn composer_page_break_adds_page() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 7);
        let usable = A4.limit_y() - A4.top;
        c.ensure_space(usable);
        c.advance(usable);
        assert_eq!(c.page_count(), 1);
        c.ensure_space(30.0);
        assert_eq!(c.page_count(), 2);
        assert_eq!(c.y(), A4.top);
    }

    #[test]
    fn same_seed_same_randomness() {
        let measurer = TextMeasurer::new();
        let mut a = Composer::new(&measurer, A4, 42);
        let mut b = Composer::new(&measurer, A4, 42);
        use rand::Rng;
        let xs: Vec<u32> = (0..8).map(|_| a.rng().random_range(0..1000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.rng().random_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn commands_land_on_current_page() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 0);
        c.text("first page", 15.0, 20.0, Font::Helvetica, 12.0, palette::INK, TextAlign::Left);
        c.new_page();
        c.text("second page", 15.0, 20.0, Font::Helvetica, 12.0, palette::INK, TextAlign::Left);
        let doc = c.finish();
        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages[0].contains_text("first page"));
        assert!(!doc.pages[0].contains_text("second page"));
        assert!(doc.pages[1].contains_text("second page"));
    }
}
