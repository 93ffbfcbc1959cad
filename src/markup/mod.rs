//! Bracket markup parsing.
//!
//! This module turns narration text annotated with bracket tags into an
//! ordered list of [`Segment`](crate::Segment)s. Tags nest; each `[...]`
//! opens a scope that lasts until the matching `[/]`.
//!
//! # Tag Syntax
//!
//! | Tag | Effect |
//! |---|---|
//! | `[pause:1.5]` | Add 1.5 s of silence after the previous segment |
//! | `[rate:0.9]`, `[pitch:1.1]`, `[volume:1.2]` | Set the attribute absolutely |
//! | `[happy]`, `[slower]` | Multiply attributes by a named preset |
//! | `[spell]`, `[spell:false]` | Read letters and digits one at a time |
//! | `[happy,rate:0.9]` | Apply several tokens, left to right |
//! | `[/]` | Close the innermost scope |
//!
//! Anything that cannot be applied is skipped and reported as a
//! [`Diagnostic`]; parsing itself never fails.
//!
//! # Preset Config Layout
//!
//! ```json
//! {
//!   "emotion_presets": { "happy": { "rate": 1.05, "pitch": 1.08, "volume": 1.05 } },
//!   "modifier_presets": { "slower": { "rate": 0.9 } }
//! }
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use narration_markup::markup::MarkupParser;
//! use std::path::Path;
//!
//! let parser = MarkupParser::from_config_file(Path::new("config.json"), 0.1);
//! let outcome = parser.parse("[happy]Hello [spell]AI[/]![/][pause:0.5]");
//! for segment in &outcome.segments {
//!     println!("{:?} rate={} pause_after={}", segment.text, segment.rate, segment.pause_after);
//! }
//! for diagnostic in &outcome.diagnostics {
//!     eprintln!("warning: {diagnostic}");
//! }
//! ```

pub mod diagnostics;
pub mod emitter;
pub mod parser;
pub mod phonetic;
pub mod presets;
pub mod scope;
pub mod tokenizer;

pub use diagnostics::{Diagnostic, MarkupError};
pub use parser::{MarkupParser, ParseOutcome, ParserOptions, ParserOptionsBuilder};
pub use presets::{Preset, PresetTable, Presets};
pub use scope::{Attribute, AttributeScope};
