//! # Content Model
//!
//! The input representation for the layout engine: one aggregate of optional
//! activity sub-structures plus the storybook scene list. This is designed to
//! be deserialized straight from the JSON an upstream content service emits —
//! every activity field is independently optional, and an absent or empty
//! field simply means "this activity does not appear on the sheet".
//!
//! The engine performs no semantic validation of the content itself (it does
//! not care whether a word-search word relates to the story); it only reacts
//! to presence and shape.

use serde::{Deserialize, Serialize};

/// The full activity-sheet content produced by the upstream content source.
///
/// Field presence independently gates each renderer: `None` or an empty list
/// means the corresponding section is skipped, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityContent {
    /// Story title, rendered on the cover card and used for file naming.
    #[serde(default)]
    pub title: String,

    /// Key verse. Feeds both the cover verse card and the verse-memorization
    /// activity.
    #[serde(default)]
    pub bible_verse: Option<String>,

    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,

    /// Words for the word-search puzzle. Callers should keep these to
    /// practical sizes (≤10 letters, ≤8 words) so the packer can guarantee
    /// full placement; longer lists degrade to partial placement.
    #[serde(default)]
    pub word_search: Vec<String>,

    #[serde(default)]
    pub complete_the_phrase: Option<CompleteThePhrase>,

    #[serde(default)]
    pub scramble_words: Vec<ScrambleWord>,

    #[serde(default)]
    pub match_columns: Vec<MatchPair>,

    #[serde(default)]
    pub true_or_false: Vec<TrueOrFalse>,

    #[serde(default)]
    pub who_said_it: Vec<Quote>,

    /// Story events in chronological order. The renderer shuffles them for
    /// display; the input order is the answer key.
    #[serde(default)]
    pub order_events: Vec<String>,

    #[serde(default)]
    pub character_card: Option<CharacterCard>,

    /// Phrase for the letter→number substitution cipher activity.
    #[serde(default)]
    pub secret_phrase: Option<String>,

    #[serde(default)]
    pub news_flash: Option<NewsFlash>,

    #[serde(default)]
    pub family_questions: Vec<String>,

    #[serde(default)]
    pub maze: Option<MazeSpec>,
}

/// One multiple-choice question. Only the first quiz question is rendered,
/// with up to four options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Index of the correct option (0-based). Carried through for answer
    /// keys; not drawn on the sheet.
    #[serde(default)]
    pub correct_answer: usize,
}

/// A phrase with one missing word.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteThePhrase {
    pub phrase: String,
    #[serde(default)]
    pub missing_word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrambleWord {
    pub word: String,
    #[serde(default)]
    pub hint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueOrFalse {
    pub statement: String,
    #[serde(default)]
    pub is_true: bool,
}

/// A quote attributed to a story character, for the who-said-it activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub quote: String,
    pub character: String,
}

/// Trading-card data: a name, a title line and three 1–10 attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterCard {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub label: String,
    /// Attribute strength, 1–10. Values are clamped at render time.
    pub value: u8,
}

impl CharacterCard {
    /// All attributes at the maximum value earn the card a "perfect" badge.
    pub fn is_perfect(&self) -> bool {
        !self.attributes.is_empty() && self.attributes.iter().all(|a| a.value >= 10)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsFlash {
    pub headline: String,
    #[serde(default)]
    pub reporter: String,
}

/// Requests a maze activity at the given difficulty tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeSpec {
    #[serde(default)]
    pub age_tier: AgeTier,
}

/// Target audience age band. Only used to pick maze dimensions — the maze
/// generator itself has no difficulty branching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeTier {
    #[serde(rename = "3-4")]
    Ages3To4,
    #[default]
    #[serde(rename = "5-6")]
    Ages5To6,
    #[serde(rename = "7-9")]
    Ages7To9,
    #[serde(rename = "10-12")]
    Ages10To12,
}

impl AgeTier {
    /// Maze grid dimensions as (rows, cols).
    pub fn maze_dimensions(&self) -> (usize, usize) {
        match self {
            AgeTier::Ages3To4 => (15, 10),
            AgeTier::Ages5To6 => (22, 15),
            AgeTier::Ages7To9 => (30, 21),
            AgeTier::Ages10To12 => (40, 28),
        }
    }
}

/// Optional decorative markers for the maze page: a small image above the
/// entrance and another below the exit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeMarkers {
    #[serde(default)]
    pub start: Option<ImageRef>,
    #[serde(default)]
    pub end: Option<ImageRef>,
}

/// One scene of the illustrated storybook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryScene {
    pub narrative_text: String,
    /// The scene illustration, or `None` when generation failed upstream.
    /// A missing image never blocks delivery of the text page.
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// A ready-to-embed raster image with known pixel dimensions.
///
/// The layout core never decodes image data; `source` is an opaque handle
/// (URI, data URI, or backend-specific key) passed through to the sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// Storybook input: a title plus ordered scenes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storybook {
    pub title: String,
    #[serde(default)]
    pub scenes: Vec<StoryScene>,
}

impl StoryScene {
    pub fn text_only(narrative: &str) -> Self {
        Self {
            narrative_text: narrative.to_string(),
            image: None,
        }
    }

    pub fn illustrated(narrative: &str, image: ImageRef) -> Self {
        Self {
            narrative_text: narrative.to_string(),
            image: Some(image),
        }
    }
}
