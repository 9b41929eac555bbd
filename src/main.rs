//! # Folha CLI
//!
//! Usage:
//!   folha content.json -o sheet.json
//!   echo '{ ... }' | folha --seed 42
//!   folha --storybook book.json -o book.json
//!   folha --example > content.json
//!
//! Output is the composed document as JSON draw commands; a downstream sink
//! turns it into PDF or SVG.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    example: bool,
    storybook: bool,
    seed: u64,
    input: Option<String>,
    output: Option<String>,
}

/// Positional walk over the argument list: a flag consumes its value slot by
/// index, so an input path that happens to equal a flag's value is still
/// recognized as the input.
fn parse_args(args: &[String]) -> CliArgs {
    let mut parsed = CliArgs::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--example" => parsed.example = true,
            "--storybook" => parsed.storybook = true,
            "--seed" => {
                if let Some(value) = args.get(i + 1) {
                    parsed.seed = value.parse().unwrap_or(0);
                    i += 1;
                }
            }
            "-o" => {
                if let Some(value) = args.get(i + 1) {
                    parsed.output = Some(value.clone());
                    i += 1;
                }
            }
            other if !other.starts_with('-') && parsed.input.is_none() => {
                parsed.input = Some(other.to_string());
            }
            _ => {}
        }
        i += 1;
    }
    parsed
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args);

    if cli.example {
        print!("{}", example_content_json());
        return;
    }

    let input = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("✗ Failed to read {path}: {e}");
                process::exit(1);
            }
        },
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("✗ Failed to read stdin: {e}");
                process::exit(1);
            }
            buf
        }
    };

    let result = if cli.storybook {
        folha::compose_storybook_json(&input)
    } else {
        folha::compose_activity_sheet_json(&input, cli.seed)
    };

    let doc = match result {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("✗ {e}");
            process::exit(1);
        }
    };

    let json = serde_json::to_string_pretty(&doc).expect("document serialization cannot fail");
    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("✗ Failed to write {path}: {e}");
                process::exit(1);
            }
            eprintln!("✓ {} page(s) written to {path}", doc.page_count());
        }
        None => println!("{json}"),
    }
}


fn example_content_json() -> &'static str {
    r#"{
  "title": "Noah's Ark",
  "bibleVerse": "But Noah found favor in the eyes of the Lord. (Genesis 6:8)",
  "quiz": [
    {
      "question": "How long did it rain on the ark?",
      "options": ["7 days", "40 days and nights", "100 days", "One year"],
      "correctAnswer": 1
    }
  ],
  "completeThePhrase": {
    "phrase": "Noah built an ark of gopher wood",
    "missingWord": "ark"
  },
  "wordSearch": ["NOAH", "ARK", "FLOOD", "DOVE", "RAINBOW", "ANIMALS"],
  "scrambleWords": [
    { "word": "RAINBOW", "hint": "God's promise in the sky" },
    { "word": "DOVE", "hint": "Brought back an olive leaf" }
  ],
  "matchColumns": [
    { "left": "Noah", "right": "Built the ark" },
    { "left": "Dove", "right": "Found dry land" },
    { "left": "Rainbow", "right": "Sign of the promise" }
  ],
  "trueOrFalse": [
    { "statement": "The animals came two by two", "isTrue": true },
    { "statement": "Noah sailed alone", "isTrue": false }
  ],
  "whoSaidIt": [
    { "quote": "Make yourself an ark of gopher wood", "character": "God" },
    { "quote": "I will never again curse the ground", "character": "God" }
  ],
  "orderEvents": [
    "God told Noah to build an ark",
    "The animals boarded",
    "It rained forty days",
    "The dove returned with an olive leaf",
    "A rainbow appeared"
  ],
  "characterCard": {
    "name": "Noah",
    "title": "The Faithful Builder",
    "attributes": [
      { "label": "Faith", "value": 10 },
      { "label": "Patience", "value": 9 },
      { "label": "Courage", "value": 8 }
    ]
  },
  "secretPhrase": "GOD KEEPS HIS PROMISES",
  "newsFlash": {
    "headline": "Giant boat survives worldwide flood",
    "reporter": "A curious raven"
  },
  "familyQuestions": [
    "What promise would you like to thank God for?",
    "How can our family trust God in a storm?"
  ],
  "maze": { "ageTier": "5-6" }
}
"#
}
