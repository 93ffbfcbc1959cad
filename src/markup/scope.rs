use super::diagnostics::Diagnostic;
use super::presets::Presets;

/// The closed set of attribute names a scope carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Rate,
    Pitch,
    Volume,
    PauseBefore,
    PauseAfter,
    Spell,
}

impl Attribute {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "rate" => Some(Self::Rate),
            "pitch" => Some(Self::Pitch),
            "volume" => Some(Self::Volume),
            "pause_before" => Some(Self::PauseBefore),
            "pause_after" => Some(Self::PauseAfter),
            "spell" => Some(Self::Spell),
            _ => None,
        }
    }
}

/// Prosody attributes active within one level of tag nesting.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeScope {
    pub rate: f64,
    pub pitch: f64,
    pub volume: f64,
    /// Silence owed before the next segment flushed from this scope.
    pub pause_before: f64,
    pub pause_after_carry: f64,
    pub spell: bool,
}

impl Default for AttributeScope {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            pause_before: 0.0,
            pause_after_carry: 0.0,
            spell: false,
        }
    }
}

impl AttributeScope {
    /// Multiply a numeric attribute in place. `Spell` is not scalable.
    pub fn scale(&mut self, attr: Attribute, factor: f64) {
        match attr {
            Attribute::Rate => self.rate *= factor,
            Attribute::Pitch => self.pitch *= factor,
            Attribute::Volume => self.volume *= factor,
            Attribute::PauseBefore => self.pause_before *= factor,
            Attribute::PauseAfter => self.pause_after_carry *= factor,
            Attribute::Spell => {}
        }
    }
}

/// Resolves attribute-spec strings such as `"happy, rate:0.9, spell"`.
#[derive(Debug, Clone, Copy)]
pub struct ScopeResolver<'a> {
    presets: &'a Presets,
}

impl<'a> ScopeResolver<'a> {
    pub fn new(presets: &'a Presets) -> Self {
        Self { presets }
    }

    /// Apply `spec` on top of a copy of `scope`, left to right.
    ///
    /// `key:value` pairs set absolute values, preset names multiply. Tokens
    /// that cannot be applied are skipped and reported in `diagnostics`.
    pub fn resolve(
        &self,
        scope: &AttributeScope,
        spec: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> AttributeScope {
        let mut resolved = scope.clone();
        for raw in spec.split(',') {
            let token = raw.trim().to_lowercase();
            if token.is_empty() {
                continue;
            }
            let outcome = match token.split_once(':') {
                Some((key, value)) => Self::apply_pair(&mut resolved, key.trim(), value.trim()),
                None => self.apply_bare(&mut resolved, &token),
            };
            if let Err(diagnostic) = outcome {
                log::debug!("{diagnostic}");
                diagnostics.push(diagnostic);
            }
        }
        resolved
    }

    fn apply_pair(scope: &mut AttributeScope, key: &str, value: &str) -> Result<(), Diagnostic> {
        let malformed = || Diagnostic::MalformedAttribute {
            key: key.to_string(),
            value: value.to_string(),
        };
        let attr = match Attribute::from_key(key) {
            Some(attr) => attr,
            None => return Err(Diagnostic::UnknownAttribute(format!("{key}:{value}"))),
        };
        match attr {
            Attribute::Spell => {
                // Anything other than true/1 switches spelling off.
                scope.spell = matches!(value, "true" | "1");
                if !matches!(value, "true" | "1" | "false" | "0") {
                    return Err(malformed());
                }
            }
            Attribute::Rate | Attribute::Pitch | Attribute::Volume => {
                let parsed: f64 = value.parse().map_err(|_| malformed())?;
                match attr {
                    Attribute::Rate => scope.rate = parsed,
                    Attribute::Pitch => scope.pitch = parsed,
                    _ => scope.volume = parsed,
                }
            }
            Attribute::PauseBefore | Attribute::PauseAfter => {
                return Err(Diagnostic::UnknownAttribute(format!("{key}:{value}")));
            }
        }
        Ok(())
    }

    fn apply_bare(&self, scope: &mut AttributeScope, token: &str) -> Result<(), Diagnostic> {
        if token == "spell" {
            scope.spell = true;
            return Ok(());
        }
        let preset = self
            .presets
            .lookup(token)
            .ok_or_else(|| Diagnostic::UnknownAttribute(token.to_string()))?;
        for &(attr, factor) in preset.deltas() {
            scope.scale(attr, factor);
        }
        Ok(())
    }
}

/// Stack of attribute scopes with a permanent root.
///
/// Each push is an independent copy. The pending leading pause always lives
/// on the top scope: a push moves it into the child and a pop hands any
/// unconsumed remainder back to the parent.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    scopes: Vec<AttributeScope>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![AttributeScope::default()],
        }
    }

    pub fn top(&self) -> &AttributeScope {
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut AttributeScope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push(&mut self, scope: AttributeScope) {
        // The child was resolved from a copy of the parent, so it already
        // holds the parent's pending pause.
        self.top_mut().pause_before = 0.0;
        self.scopes.push(scope);
    }

    /// Pop the top scope. Returns `false` (and leaves the root) if only the
    /// root is left.
    pub fn pop(&mut self) -> bool {
        if self.scopes.len() == 1 {
            return false;
        }
        if let Some(child) = self.scopes.pop() {
            self.top_mut().pause_before += child.pause_before;
        }
        true
    }

    /// Pop everything above the root; returns how many scopes were open.
    pub fn unwind(&mut self) -> usize {
        let open = self.scopes.len() - 1;
        while self.pop() {}
        open
    }

    pub fn root(&self) -> &AttributeScope {
        &self.scopes[0]
    }
}

#[cfg(test)]
mod tests {
    use super::{Attribute, AttributeScope, Diagnostic, ScopeResolver, ScopeStack};
    use crate::markup::presets::{Preset, PresetTable, Presets};

    fn presets() -> Presets {
        let emotion: PresetTable = [(
            "happy".to_string(),
            Preset::new(vec![
                (Attribute::Rate, 1.05),
                (Attribute::Pitch, 1.08),
                (Attribute::Volume, 1.05),
            ]),
        )]
        .into_iter()
        .collect();
        let modifier: PresetTable = [(
            "slower".to_string(),
            Preset::new(vec![(Attribute::Rate, 0.5)]),
        )]
        .into_iter()
        .collect();
        Presets::new(emotion, modifier)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn absolute_pairs_set_values() {
        let presets = Presets::default();
        let resolver = ScopeResolver::new(&presets);
        let mut diags = Vec::new();
        let scope = resolver.resolve(
            &AttributeScope::default(),
            " Rate:0.8 , PITCH:1.2,volume:2",
            &mut diags,
        );
        assert!(diags.is_empty());
        assert!(close(scope.rate, 0.8));
        assert!(close(scope.pitch, 1.2));
        assert!(close(scope.volume, 2.0));
    }

    #[test]
    fn presets_multiply_and_pairs_override() {
        let presets = presets();
        let resolver = ScopeResolver::new(&presets);
        let mut diags = Vec::new();
        let parent = resolver.resolve(&AttributeScope::default(), "happy", &mut diags);
        let child = resolver.resolve(&parent, "slower,pitch:2,happy", &mut diags);
        assert!(close(child.rate, 1.05 * 0.5 * 1.05));
        assert!(close(child.pitch, 2.0 * 1.08));
        assert!(close(child.volume, 1.05 * 1.05));
        assert!(diags.is_empty());
        // Input untouched.
        assert!(close(parent.rate, 1.05));
    }

    #[test]
    fn spell_flag_forms() {
        let presets = Presets::default();
        let resolver = ScopeResolver::new(&presets);
        let mut diags = Vec::new();
        let base = AttributeScope::default();
        assert!(resolver.resolve(&base, "spell", &mut diags).spell);
        assert!(resolver.resolve(&base, "spell:1", &mut diags).spell);
        assert!(resolver.resolve(&base, "SPELL:True", &mut diags).spell);
        let on = resolver.resolve(&base, "spell", &mut diags);
        assert!(!resolver.resolve(&on, "spell:false", &mut diags).spell);
        assert!(!resolver.resolve(&on, "spell:0", &mut diags).spell);
        assert!(diags.is_empty());
    }

    #[test]
    fn unrecognized_spell_value_turns_spelling_off() {
        let presets = Presets::default();
        let resolver = ScopeResolver::new(&presets);
        let mut diags = Vec::new();
        let on = resolver.resolve(&AttributeScope::default(), "spell", &mut diags);
        let scope = resolver.resolve(&on, "spell:yes", &mut diags);
        assert!(!scope.spell);
        assert_eq!(
            diags,
            vec![Diagnostic::MalformedAttribute {
                key: "spell".to_string(),
                value: "yes".to_string()
            }]
        );
    }

    #[test]
    fn bad_tokens_are_skipped_with_diagnostics() {
        let presets = presets();
        let resolver = ScopeResolver::new(&presets);
        let mut diags = Vec::new();
        let scope = resolver.resolve(
            &AttributeScope::default(),
            "rate:fast,grumpy,voice:bob,pause_before:3,rate:0.7",
            &mut diags,
        );
        assert!(close(scope.rate, 0.7));
        assert!(close(scope.pause_before, 0.0));
        assert_eq!(
            diags,
            vec![
                Diagnostic::MalformedAttribute {
                    key: "rate".to_string(),
                    value: "fast".to_string()
                },
                Diagnostic::UnknownAttribute("grumpy".to_string()),
                Diagnostic::UnknownAttribute("voice:bob".to_string()),
                Diagnostic::UnknownAttribute("pause_before:3".to_string()),
            ]
        );
    }

    #[test]
    fn stack_never_pops_root() {
        let mut stack = ScopeStack::new();
        assert!(!stack.pop());
        assert_eq!(stack.depth(), 1);
        stack.push(AttributeScope {
            rate: 2.0,
            ..AttributeScope::default()
        });
        assert!(close(stack.top().rate, 2.0));
        assert!(stack.pop());
        assert!(close(stack.top().rate, 1.0));
    }

    #[test]
    fn child_mutation_does_not_leak_into_parent() {
        let mut stack = ScopeStack::new();
        stack.push(stack.top().clone());
        stack.top_mut().volume = 3.0;
        stack.pop();
        assert!(close(stack.top().volume, 1.0));
    }

    #[test]
    fn pending_pause_moves_with_the_top_scope() {
        let mut stack = ScopeStack::new();
        stack.top_mut().pause_before = 0.5;
        stack.push(stack.top().clone());
        assert!(close(stack.root().pause_before, 0.0));
        assert!(close(stack.top().pause_before, 0.5));
        stack.push(stack.top().clone());
        assert_eq!(stack.unwind(), 2);
        assert!(close(stack.root().pause_before, 0.5));
    }
}
