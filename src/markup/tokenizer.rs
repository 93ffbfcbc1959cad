/// One lexical unit of narration markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `[pause:<duration>]`, carrying the raw duration text.
    Pause(&'a str),
    /// `[/]`
    Close,
    /// Any other `[...]`, carrying its inner content verbatim.
    Open(&'a str),
    /// Raw text between tags, not yet normalized.
    Text(&'a str),
}

/// Lazily split `markup` into tokens.
///
/// The returned iterator is `Clone`, so a stream can be restarted from any
/// point without re-reading the input.
pub fn tokenize(markup: &str) -> Tokens<'_> {
    Tokens { rest: markup }
}

/// Iterator over the tokens of a markup string.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let first = self.rest.chars().next()?;
            match first {
                '[' => {
                    if let Some(token) = self.take_tag() {
                        return Some(token);
                    }
                    // Unterminated or empty bracket: skip it like any stray bracket.
                    self.rest = &self.rest[1..];
                }
                ']' => self.rest = &self.rest[1..],
                _ => {
                    let end = self
                        .rest
                        .find(|c: char| c == '[' || c == ']')
                        .unwrap_or(self.rest.len());
                    let (text, rest) = self.rest.split_at(end);
                    self.rest = rest;
                    return Some(Token::Text(text));
                }
            }
        }
    }
}

impl<'a> Tokens<'a> {
    /// Consume a `[...]` tag at the head of the input, if one is complete.
    fn take_tag(&mut self) -> Option<Token<'a>> {
        let close = self.rest[1..].find(']')? + 1;
        if close == 1 {
            return None;
        }
        let inner = &self.rest[1..close];
        self.rest = &self.rest[close + 1..];

        Some(classify_tag(inner))
    }
}

fn classify_tag(inner: &str) -> Token<'_> {
    if let Some(duration) = inner.strip_prefix("pause:") {
        if is_pause_duration(duration) {
            return Token::Pause(duration);
        }
    }
    if inner == "/" {
        Token::Close
    } else {
        Token::Open(inner)
    }
}

fn is_pause_duration(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Collapse every whitespace run to one space and trim both ends.
pub fn normalize_whitespace(run: &str) -> String {
    run.split_whitespace().collect::<Vec<_>>().join(" ")
}
