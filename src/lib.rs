//! # narration-markup
//!
//! A Rust library that turns bracket-annotated narration text into an ordered
//! list of prosody-tagged speech segments, ready to hand to a synthesis engine.
//!
//! ## Features
//!
//! - **Nested attribute scopes**: `[happy,rate:0.9]...[/]` tags nest and compose
//! - **Presets**: named multiplicative deltas loaded from a JSON config
//! - **Pauses**: `[pause:1.5]` accumulates silence between segments
//! - **Spell-out**: `[spell]AI[/]` reads letters and digits one at a time
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! narration-markup = "2026.2"
//! ```
//!
//! ```rust
//! use narration_markup::markup::MarkupParser;
//! use narration_markup::Presets;
//!
//! let parser = MarkupParser::with_presets(Presets::default());
//! let outcome = parser.parse("[pause:0.75]Hello [rate:0.9]world[/]!");
//!
//! assert_eq!(outcome.segments[0].text, "Hello");
//! assert_eq!(outcome.segments[1].text, "world!");
//! assert!(outcome.diagnostics.is_empty());
//! ```

pub mod markup;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use markup::{Diagnostic, MarkupError, MarkupParser, ParseOutcome, Presets};

/// One unit of narration with its prosody and pause metadata.
///
/// Timing fields stay at zero here; they are filled in once the segment has
/// been synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    /// Silence in seconds before the segment is spoken.
    pub pause_before: f64,
    /// Silence in seconds after the segment is spoken.
    pub pause_after: f64,
    pub rate: f64,
    pub pitch: f64,
    pub volume: f64,
    /// True when the segment is a spelled-out character.
    pub spell: bool,
    pub voice: Option<String>,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
}

impl Default for Segment {
    fn default() -> Self {
        Self {
            text: String::new(),
            pause_before: 0.0,
            pause_after: 0.0,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            spell: false,
            voice: None,
            start_time: 0.0,
            end_time: 0.0,
            duration: 0.0,
        }
    }
}

impl Segment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Whether there is anything to synthesize.
    pub fn has_speech(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Silence around the segment, in seconds.
    pub fn total_pause(&self) -> f64 {
        self.pause_before + self.pause_after
    }
}

/// Write segments to a pretty-printed JSON file.
pub fn write_segments_json(segments: &[Segment], path: &Path) -> Result<(), MarkupError> {
    let json = serde_json::to_string_pretty(segments)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_segments_json, Segment};

    #[test]
    fn default_segment_is_neutral() {
        let segment = Segment::default();
        assert_eq!(segment.text, "");
        assert_eq!(segment.rate, 1.0);
        assert_eq!(segment.pitch, 1.0);
        assert_eq!(segment.volume, 1.0);
        assert_eq!(segment.voice, None);
        assert!(!segment.has_speech());
    }

    #[test]
    fn total_pause_sums_both_sides() {
        let segment = Segment {
            pause_before: 0.25,
            pause_after: 0.5,
            ..Segment::new("hi")
        };
        assert!(segment.has_speech());
        assert_eq!(segment.total_pause(), 0.75);
    }

    #[test]
    fn exports_segments_as_json() {
        let path = std::env::temp_dir().join(format!(
            "narration-markup-segments-{}.json",
            std::process::id()
        ));
        let segments = vec![Segment::new("Hello"), Segment::new("")];
        write_segments_json(&segments, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let restored: Vec<Segment> = serde_json::from_str(&content).unwrap();
        assert_eq!(restored, segments);
        assert!(content.contains("\"pause_before\""));
    }
}
