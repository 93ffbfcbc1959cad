use crate::Segment;

use super::phonetic;
use super::scope::AttributeScope;
use super::tokenizer::normalize_whitespace;

/// Buffers text runs and turns them into finished [`Segment`]s.
#[derive(Debug, Clone, Default)]
pub struct SegmentEmitter {
    buffer: Vec<String>,
    segments: Vec<Segment>,
    spell_pause_duration: f64,
    produced_speech: bool,
}

impl SegmentEmitter {
    pub fn new(spell_pause_duration: f64) -> Self {
        Self {
            spell_pause_duration,
            ..Self::default()
        }
    }

    /// Buffer a text run. Runs that are blank after normalization are dropped.
    pub fn append_text(&mut self, run: &str) {
        let normalized = normalize_whitespace(run);
        if !normalized.is_empty() {
            self.buffer.push(normalized);
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any flush has produced a segment with text.
    pub fn produced_speech(&self) -> bool {
        self.produced_speech
    }

    /// Turn the buffered text into segments using the attributes of `scope`.
    pub fn flush(&mut self, scope: &mut AttributeScope) {
        if self.buffer.is_empty() {
            return;
        }
        let text = self.buffer.join(" ");
        self.buffer.clear();

        if is_all_punctuation(&text) {
            if let Some(last) = self.segments.last_mut().filter(|s| !s.text.is_empty()) {
                log::debug!("Merging punctuation {text:?} into previous segment");
                last.text.push_str(&text);
                return;
            }
        }

        if scope.spell {
            self.emit_spelled(&text, scope);
        } else {
            self.segments.push(Segment {
                text,
                pause_before: scope.pause_before,
                ..segment_from(scope)
            });
        }
        self.produced_speech = true;
        scope.pause_before = 0.0;
    }

    fn emit_spelled(&mut self, text: &str, scope: &AttributeScope) {
        let tokens = phonetic::spell(text);
        log::debug!("Spelling {text:?} as {} tokens", tokens.len());
        let last = tokens.len().saturating_sub(1);
        for (i, token) in tokens.into_iter().enumerate() {
            self.segments.push(Segment {
                text: token,
                ..segment_from(scope)
            });
            if i < last {
                self.segments.push(Segment {
                    pause_before: self.spell_pause_duration,
                    ..segment_from(scope)
                });
            }
        }
    }

    /// Record a pause that follows already-flushed text.
    ///
    /// Goes onto the last segment's trailing pause, or onto the scope's
    /// pending leading pause if nothing has been emitted yet.
    pub fn add_pause(&mut self, duration: f64, scope: &mut AttributeScope) {
        match self.segments.last_mut() {
            Some(last) => last.pause_after += duration,
            None => scope.pause_before += duration,
        }
    }

    /// Finish the output. `root` must be the root scope after unwinding.
    ///
    /// The result is never empty.
    pub fn finish(mut self, root: &AttributeScope) -> Vec<Segment> {
        if !self.produced_speech && root.pause_before > 0.0 {
            self.segments.push(Segment {
                pause_before: root.pause_before,
                ..Segment::default()
            });
        }
        if self.segments.is_empty() {
            self.segments.push(Segment::default());
        }
        self.segments
    }
}

fn segment_from(scope: &AttributeScope) -> Segment {
    Segment {
        rate: scope.rate,
        pitch: scope.pitch,
        volume: scope.volume,
        spell: scope.spell,
        ..Segment::default()
    }
}

fn is_all_punctuation(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_punctuation())
}
