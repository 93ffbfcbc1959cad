use std::path::Path;
use std::sync::Arc;

use derive_builder::Builder;

use crate::Segment;

use super::diagnostics::Diagnostic;
use super::emitter::SegmentEmitter;
use super::presets::Presets;
use super::scope::{ScopeResolver, ScopeStack};
use super::tokenizer::{tokenize, Token};

/// Parameters for configuring a [`MarkupParser`].
#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into), default, build_fn(validate = "Self::validate"))]
pub struct ParserOptions {
    /// Silence in seconds inserted between spelled-out characters.
    pub spell_pause_duration: f64,
    /// Emotion and modifier presets, shared read-only between parsers.
    pub presets: Arc<Presets>,
}

impl ParserOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.spell_pause_duration {
            Some(d) if !d.is_finite() || d < 0.0 => Err(format!(
                "spell_pause_duration must be a nonnegative number, got {d}"
            )),
            _ => Ok(()),
        }
    }
}

/// Segments produced from one markup string, plus everything that was
/// skipped along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub segments: Vec<Segment>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Converts bracket markup into prosody-tagged [`Segment`]s.
///
/// A parser holds only read-only configuration; every call to
/// [`parse`](Self::parse) owns its own scope stack and output, so one parser
/// can be shared across threads.
///
/// ```rust
/// use narration_markup::markup::{MarkupParser, ParserOptionsBuilder};
///
/// let options = ParserOptionsBuilder::default()
///     .spell_pause_duration(0.1)
///     .build()?;
/// let parser = MarkupParser::new(options);
/// let segments = parser.parse_segments("The [spell]AI[/] system");
///
/// let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
/// assert_eq!(texts, ["The", "AAY", "", "Eye", "system"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkupParser {
    options: ParserOptions,
}

impl MarkupParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Create a parser with the given presets and no spell pause.
    pub fn with_presets(presets: Presets) -> Self {
        Self::new(ParserOptions {
            spell_pause_duration: 0.0,
            presets: Arc::new(presets),
        })
    }

    /// Create a parser from a preset config file.
    ///
    /// A missing or invalid file is logged and leaves the preset tables empty.
    /// A negative or non-finite `spell_pause_duration` is logged and treated
    /// as zero.
    pub fn from_config_file(config_path: &Path, spell_pause_duration: f64) -> Self {
        let valid = spell_pause_duration.is_finite() && spell_pause_duration >= 0.0;
        let spell_pause_duration = if valid {
            spell_pause_duration
        } else {
            log::warn!("Invalid spell pause duration {spell_pause_duration}, using 0");
            0.0
        };
        Self::new(ParserOptions {
            spell_pause_duration,
            presets: Arc::new(Presets::load_or_default(config_path)),
        })
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn presets(&self) -> &Presets {
        &self.options.presets
    }

    /// Parse `markup` into segments. Never fails and never returns an empty
    /// segment list.
    pub fn parse(&self, markup: &str) -> ParseOutcome {
        let resolver = ScopeResolver::new(&self.options.presets);
        let mut stack = ScopeStack::new();
        let mut emitter = SegmentEmitter::new(self.options.spell_pause_duration);
        let mut diagnostics = Vec::new();

        for token in tokenize(markup) {
            match token {
                Token::Close => {
                    emitter.flush(stack.top_mut());
                    if !stack.pop() {
                        record(&mut diagnostics, Diagnostic::UnbalancedClose);
                    }
                }
                Token::Pause(raw) => {
                    emitter.flush(stack.top_mut());
                    match raw.parse::<f64>() {
                        Ok(duration) => emitter.add_pause(duration, stack.top_mut()),
                        Err(_) => {
                            record(&mut diagnostics, Diagnostic::MalformedPause(raw.to_string()))
                        }
                    }
                }
                Token::Open(spec) => {
                    let mut scope = resolver.resolve(stack.top(), spec, &mut diagnostics);
                    if emitter.has_pending() && &scope != stack.top() {
                        emitter.flush(stack.top_mut());
                        // The flush spent the parent's pending pause.
                        scope.pause_before = stack.top().pause_before;
                    }
                    stack.push(scope);
                }
                Token::Text(run) => emitter.append_text(run),
            }
        }
        emitter.flush(stack.top_mut());

        let open = stack.unwind();
        if open > 0 {
            record(&mut diagnostics, Diagnostic::UnclosedScope { depth: open });
        }

        let segments = emitter.finish(stack.root());
        log::debug!(
            "Parsed {} segments with {} diagnostics",
            segments.len(),
            diagnostics.len()
        );
        ParseOutcome {
            segments,
            diagnostics,
        }
    }

    /// Parse `markup`, discarding diagnostics.
    pub fn parse_segments(&self, markup: &str) -> Vec<Segment> {
        self.parse(markup).segments
    }
}

fn record(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::debug!("{diagnostic}");
    diagnostics.push(diagnostic);
}
