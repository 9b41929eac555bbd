//! Full-page activities: the maze and the coloring page. Both own a fresh
//! banner page — neither can be split or share vertical space with other
//! sections.

use crate::content::{AgeTier, MazeMarkers};
use crate::error::FolhaError;
use crate::layout::{palette, Composer, DrawCommand};
use crate::puzzle::maze;

use super::{page_banner, section_heading, SheetLabels};

/// Largest footprint the drawn maze may occupy, in millimetres.
const MAZE_MAX_WIDTH: f64 = 170.0;
const MAZE_MAX_HEIGHT: f64 = 200.0;
const WALL_WIDTH: f64 = 0.5;
const MARKER_SIDE: f64 = 10.0;

/// Render the maze on its own page. Grid dimensions come from the age tier;
/// the cell size is whatever fits both footprint limits, so harder tiers get
/// denser mazes rather than bigger pages.
pub fn render_maze(
    c: &mut Composer,
    labels: &SheetLabels,
    number: usize,
    tier: AgeTier,
    markers: Option<&MazeMarkers>,
) -> Result<(), FolhaError> {
    let (rows, cols) = tier.maze_dimensions();
    let grid = maze::generate(rows, cols, c.rng())?;

    c.new_page();
    page_banner(c, &labels.maze_banner);
    section_heading(c, number, &labels.maze);

    let geom = c.geometry();
    let cell = (MAZE_MAX_WIDTH / cols as f64).min(MAZE_MAX_HEIGHT / rows as f64);
    let span_w = cols as f64 * cell;
    let span_h = rows as f64 * cell;
    let origin_x = geom.center_x() - span_w / 2.0;
    let origin_y = c.y() + MARKER_SIDE + 2.0;

    // Draw each cell's top and left walls; the last column's right walls and
    // the last row's bottom walls close the border. Interior walls are shared,
    // so this emits each standing wall exactly once.
    for row in 0..rows {
        for col in 0..cols {
            let walls = grid.walls(row, col);
            let x = origin_x + col as f64 * cell;
            let y = origin_y + row as f64 * cell;
            if walls.top {
                c.line(x, y, x + cell, y, palette::INK, WALL_WIDTH);
            }
            if walls.left {
                c.line(x, y, x, y + cell, palette::INK, WALL_WIDTH);
            }
            if col + 1 == cols && walls.right {
                c.line(x + cell, y, x + cell, y + cell, palette::INK, WALL_WIDTH);
            }
            if row + 1 == rows && walls.bottom {
                c.line(x, y + cell, x + cell, y + cell, palette::INK, WALL_WIDTH);
            }
        }
    }

    // Entrance marker above the top-left breach, exit marker below the
    // bottom-right one.
    if let Some(markers) = markers {
        if let Some(start) = &markers.start {
            c.image(
                origin_x + cell / 2.0 - MARKER_SIDE / 2.0,
                origin_y - MARKER_SIDE - 1.0,
                MARKER_SIDE,
                MARKER_SIDE,
                &start.source,
            );
        }
        if let Some(end) = &markers.end {
            c.image(
                origin_x + span_w - cell / 2.0 - MARKER_SIDE / 2.0,
                origin_y + span_h + 1.0,
                MARKER_SIDE,
                MARKER_SIDE,
                &end.source,
            );
        }
    }

    c.set_y(origin_y + span_h + MARKER_SIDE + 4.0);
    Ok(())
}

const COLORING_X: f64 = 20.0;
const COLORING_Y: f64 = 40.0;
const COLORING_W: f64 = 170.0;
/// 3:4 aspect, matching the illustrations the upstream service produces.
const COLORING_H: f64 = COLORING_W * 4.0 / 3.0;

/// A full-page line-art illustration framed by a dashed cut guide.
pub fn render_coloring_page(c: &mut Composer, labels: &SheetLabels, image_source: &str) {
    c.new_page();
    page_banner(c, &labels.coloring_banner);

    c.push(DrawCommand::Rect {
        x: COLORING_X - 2.0,
        y: COLORING_Y - 2.0,
        width: COLORING_W + 4.0,
        height: COLORING_H + 4.0,
        fill: None,
        stroke: Some(palette::CUT_GUIDE),
        line_width: 0.3,
        corner_radius: 0.0,
        dashed: true,
    });
    c.image(COLORING_X, COLORING_Y, COLORING_W, COLORING_H, image_source);
    c.set_y(COLORING_Y + COLORING_H);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ImageRef;
    use crate::layout::{A4, DrawCommand};
    use crate::measure::TextMeasurer;

    fn wall_segments(page: &crate::layout::Page) -> usize {
        page.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { width, .. } if *width == WALL_WIDTH))
            .count()
    }

    #[test]
    fn maze_page_has_banner_heading_and_walls() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 11);
        render_maze(&mut c, &SheetLabels::default(), 14, AgeTier::Ages5To6, None).unwrap();
        let doc = c.finish();
        assert_eq!(doc.page_count(), 2);
        let page = &doc.pages[1];
        assert!(page.contains_text("MAZE"));
        assert!(page.contains_text("14. Find the way:"));
        // A 22×15 perfect maze has 2·22·15 + 22 + 15 = 697 wall slots, minus
        // 329 interior removals and 2 breaches: 366 segments drawn.
        assert_eq!(wall_segments(page), 366);
    }

    #[test]
    fn maze_markers_become_image_commands() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 11);
        let markers = MazeMarkers {
            start: Some(ImageRef { source: "ark.png".into(), width: 64, height: 64 }),
            end: Some(ImageRef { source: "dove.png".into(), width: 64, height: 64 }),
        };
        render_maze(&mut c, &SheetLabels::default(), 14, AgeTier::Ages3To4, Some(&markers)).unwrap();
        let doc = c.finish();
        let images = doc.pages[1]
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Image { .. }))
            .count();
        assert_eq!(images, 2);
    }

    #[test]
    fn hardest_tier_still_fits_the_footprint() {
        let (rows, cols) = AgeTier::Ages10To12.maze_dimensions();
        let cell = (MAZE_MAX_WIDTH / cols as f64).min(MAZE_MAX_HEIGHT / rows as f64);
        assert!(cols as f64 * cell <= MAZE_MAX_WIDTH + 1e-9);
        assert!(rows as f64 * cell <= MAZE_MAX_HEIGHT + 1e-9);
    }

    #[test]
    fn coloring_page_frames_the_image() {
        let measurer = TextMeasurer::new();
        let mut c = Composer::new(&measurer, A4, 0);
        render_coloring_page(&mut c, &SheetLabels::default(), "noah_lineart.png");
        let doc = c.finish();
        assert_eq!(doc.page_count(), 2);
        let page = &doc.pages[1];
        assert!(page.has_image());
        assert!(page.contains_text("LET'S COLOR!"));
        let dashed_frames = page
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Rect { dashed: true, .. }))
            .count();
        assert_eq!(dashed_frames, 1);
    }
}
