//! # Maze Packer
//!
//! Generates a perfect maze — exactly one path between any two cells, no
//! loops, no isolated regions — via randomized depth-first backtracking.
//!
//! The walker is iterative with an explicit stack: the largest tier is
//! 40×28 = 1120 cells, and a recursive formulation would lean on the call
//! stack for nothing. Walls are only removed when stepping into a
//! previously-unvisited cell, which is what makes the result a spanning tree
//! (removed walls = cells − 1, no cycles possible).

use rand::Rng;

use crate::error::FolhaError;

/// Wall state of one cell. `true` means the wall stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self { top: true, right: true, bottom: true, left: true }
    }
}

/// R×C grid of cells, indexed `[row][col]` with (0,0) at the top-left.
///
/// After generation the outer border is solid except two breaches: the top
/// wall of the start cell (entrance) and the bottom wall of the end cell
/// (exit).
#[derive(Debug, Clone)]
pub struct MazeGrid {
    rows: usize,
    cols: usize,
    walls: Vec<Walls>,
}

impl MazeGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn walls(&self, row: usize, col: usize) -> Walls {
        self.walls[row * self.cols + col]
    }

    fn walls_mut(&mut self, row: usize, col: usize) -> &mut Walls {
        &mut self.walls[row * self.cols + col]
    }

    /// Number of interior walls knocked down. A perfect maze removes exactly
    /// `rows × cols − 1` (the spanning-tree property); the entrance and exit
    /// breaches are border walls and do not count.
    pub fn removed_wall_count(&self) -> usize {
        let mut removed = 0;
        for r in 0..self.rows {
            for c in 0..self.cols {
                let w = self.walls(r, c);
                if c + 1 < self.cols && !w.right {
                    removed += 1;
                }
                if r + 1 < self.rows && !w.bottom {
                    removed += 1;
                }
            }
        }
        removed
    }
}

/// Orthogonal neighbor offsets paired with the walls they share.
const STEPS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Generate a perfect `rows`×`cols` maze.
///
/// A zero dimension is a programmer error, not a content condition, and is
/// rejected up front.
pub fn generate(rows: usize, cols: usize, rng: &mut impl Rng) -> Result<MazeGrid, FolhaError> {
    if rows == 0 || cols == 0 {
        return Err(FolhaError::InvalidDimensions(format!(
            "maze requires at least 1×1, got {rows}×{cols}"
        )));
    }

    let mut grid = MazeGrid {
        rows,
        cols,
        walls: vec![Walls::default(); rows * cols],
    };
    let mut visited = vec![false; rows * cols];
    let mut stack: Vec<(usize, usize)> = Vec::with_capacity(rows * cols);

    let mut current = (0usize, 0usize);
    visited[0] = true;

    loop {
        let mut neighbors: [(usize, usize); 4] = [(0, 0); 4];
        let mut count = 0;
        for &(dr, dc) in &STEPS {
            let nr = current.0 as isize + dr;
            let nc = current.1 as isize + dc;
            if nr >= 0 && nr < rows as isize && nc >= 0 && nc < cols as isize {
                let (nr, nc) = (nr as usize, nc as usize);
                if !visited[nr * cols + nc] {
                    neighbors[count] = (nr, nc);
                    count += 1;
                }
            }
        }

        if count > 0 {
            let next = neighbors[rng.random_range(0..count)];
            knock_down_between(&mut grid, current, next);
            stack.push(current);
            visited[next.0 * cols + next.1] = true;
            current = next;
        } else if let Some(back) = stack.pop() {
            current = back;
        } else {
            break;
        }
    }

    // Breach the border for the entrance and exit.
    grid.walls_mut(0, 0).top = false;
    grid.walls_mut(rows - 1, cols - 1).bottom = false;

    log::debug!("maze: generated {rows}×{cols}, {} walls removed", grid.removed_wall_count());
    Ok(grid)
}

fn knock_down_between(grid: &mut MazeGrid, a: (usize, usize), b: (usize, usize)) {
    if b.0 == a.0 + 1 {
        grid.walls_mut(a.0, a.1).bottom = false;
        grid.walls_mut(b.0, b.1).top = false;
    } else if a.0 == b.0 + 1 {
        grid.walls_mut(a.0, a.1).top = false;
        grid.walls_mut(b.0, b.1).bottom = false;
    } else if b.1 == a.1 + 1 {
        grid.walls_mut(a.0, a.1).right = false;
        grid.walls_mut(b.0, b.1).left = false;
    } else {
        grid.walls_mut(a.0, a.1).left = false;
        grid.walls_mut(b.0, b.1).right = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// Flood-fill through open walls, counting reachable cells.
    fn reachable_from_start(grid: &MazeGrid) -> usize {
        let (rows, cols) = (grid.rows(), grid.cols());
        let mut seen = vec![false; rows * cols];
        let mut queue = VecDeque::from([(0usize, 0usize)]);
        seen[0] = true;
        let mut count = 1;
        while let Some((r, c)) = queue.pop_front() {
            let w = grid.walls(r, c);
            let mut visit = |nr: usize, nc: usize| {
                if !seen[nr * cols + nc] {
                    seen[nr * cols + nc] = true;
                    count += 1;
                    queue.push_back((nr, nc));
                }
            };
            if !w.top && r > 0 {
                visit(r - 1, c);
            }
            if !w.bottom && r + 1 < rows {
                visit(r + 1, c);
            }
            if !w.left && c > 0 {
                visit(r, c - 1);
            }
            if !w.right && c + 1 < cols {
                visit(r, c + 1);
            }
        }
        count
    }

    #[test]
    fn ten_by_ten_is_a_perfect_maze() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = generate(10, 10, &mut rng).unwrap();
        assert_eq!(grid.rows() * grid.cols(), 100);
        assert_eq!(grid.removed_wall_count(), 99);
        assert!(!grid.walls(0, 0).top, "entrance must be breached");
        assert!(!grid.walls(9, 9).bottom, "exit must be breached");
        assert_eq!(reachable_from_start(&grid), 100);
    }

    #[test]
    fn every_tier_is_fully_connected() {
        for &(rows, cols) in &[(15, 10), (22, 15), (30, 21), (40, 28)] {
            let mut rng = StdRng::seed_from_u64(7);
            let grid = generate(rows, cols, &mut rng).unwrap();
            assert_eq!(reachable_from_start(&grid), rows * cols);
            assert_eq!(grid.removed_wall_count(), rows * cols - 1);
        }
    }

    #[test]
    fn border_is_solid_except_the_two_breaches() {
        let mut rng = StdRng::seed_from_u64(13);
        let grid = generate(8, 6, &mut rng).unwrap();
        for c in 0..6 {
            assert_eq!(grid.walls(0, c).top, c != 0);
            assert_eq!(grid.walls(7, c).bottom, c != 5);
        }
        for r in 0..8 {
            assert!(grid.walls(r, 0).left);
            assert!(grid.walls(r, 5).right);
        }
    }

    #[test]
    fn degenerate_sizes_fail_fast() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate(0, 10, &mut rng).is_err());
        assert!(generate(10, 0, &mut rng).is_err());
        assert!(generate(0, 0, &mut rng).is_err());
    }

    #[test]
    fn single_cell_maze_is_just_the_breaches() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = generate(1, 1, &mut rng).unwrap();
        let w = grid.walls(0, 0);
        assert!(!w.top && !w.bottom && w.left && w.right);
        assert_eq!(grid.removed_wall_count(), 0);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(12, 9, &mut StdRng::seed_from_u64(21)).unwrap();
        let b = generate(12, 9, &mut StdRng::seed_from_u64(21)).unwrap();
        for r in 0..12 {
            for c in 0..9 {
                assert_eq!(a.walls(r, c), b.walls(r, c));
            }
        }
    }
}
