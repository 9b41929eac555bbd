//! # Procedural Puzzle Generators
//!
//! The two packers behind the puzzle activities: word-search grid placement
//! with guaranteed-placement retry, and perfect-maze generation. Both take the
//! caller's RNG so a fixed seed reproduces a fixed puzzle.

pub mod maze;
pub mod word_search;

pub use maze::{generate as generate_maze, MazeGrid, Walls};
pub use word_search::{place as place_words, Placement, PlacedWord};
