//! The compiled-pattern façade.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::Program;
use crate::delegate;
use crate::engine::{self, Capture};
use crate::error::RegexError;
use crate::matches::{Match, Matches};
use crate::options::RegexOptions;
use crate::parser;
use crate::replace;

/// A compiled pattern.
///
/// Compilation is the only fallible step; the value is immutable afterwards
/// and can be shared freely across threads. Every match evaluation builds
/// its own context, so concurrent matches never interfere.
#[derive(Debug)]
pub struct Regex {
    pattern: String,
    program: Program,
    names: Arc<HashMap<String, usize>>,
    delegate: Option<::regex::Regex>,
}

impl Regex {
    pub fn new(pattern: &str, options: RegexOptions) -> Result<Regex, RegexError> {
        let program = parser::parse(pattern, options)?;
        let delegate = delegate::build(&program);
        let names = Arc::new(program.named.clone());
        Ok(Regex {
            pattern: pattern.to_string(),
            program,
            names,
            delegate,
        })
    }

    /// Compile with default options.
    pub fn from_pattern(pattern: &str) -> Result<Regex, RegexError> {
        Regex::new(pattern, RegexOptions::new())
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn options(&self) -> RegexOptions {
        self.program.options
    }

    /// Number of capturing groups, excluding group 0.
    pub fn group_count(&self) -> usize {
        self.program.group_count()
    }

    /// Whether the pattern runs on the platform-native engine.
    pub fn is_delegated(&self) -> bool {
        self.delegate.is_some()
    }

    pub fn has_match(&self, input: &str) -> bool {
        if let Some(d) = &self.delegate {
            return d.is_match(input);
        }
        let chars: Vec<char> = input.chars().collect();
        engine::search(&self.program, &chars, 0).is_some()
    }

    pub fn first_match(&self, input: &str) -> Option<Match> {
        self.first_match_from(input, 0)
    }

    /// First match at or after the code-point offset `start`.
    pub fn first_match_from(&self, input: &str, start: usize) -> Option<Match> {
        let chars: Vec<char> = input.chars().collect();
        self.find_from(input, &chars, start)
    }

    /// Lazy iterator over non-overlapping matches. Each call starts a fresh
    /// scan.
    pub fn all_matches<'r>(&'r self, input: &str) -> Matches<'r> {
        self.all_matches_from(input, 0)
    }

    pub fn all_matches_from<'r>(&'r self, input: &str, start: usize) -> Matches<'r> {
        Matches::new(self, input, start)
    }

    pub fn string_match(&self, input: &str) -> Option<String> {
        self.first_match(input).map(|m| m.text().to_string())
    }

    pub fn all_string_matches<'r>(&'r self, input: &str) -> impl Iterator<Item = String> + 'r {
        self.all_string_matches_from(input, 0)
    }

    pub fn all_string_matches_from<'r>(
        &'r self,
        input: &str,
        start: usize,
    ) -> impl Iterator<Item = String> + 'r {
        self.all_matches_from(input, start)
            .map(|m| m.text().to_string())
    }

    /// Substrings of `input` separated by non-overlapping matches.
    pub fn split(&self, input: &str) -> Vec<String> {
        replace::split(self, input)
    }

    pub fn replace_all(&self, input: &str, template: &str) -> String {
        replace::replace(self, input, template, usize::MAX)
    }

    pub fn replace_first(&self, input: &str, template: &str) -> String {
        replace::replace(self, input, template, 1)
    }

    pub(crate) fn find_from(&self, input: &str, chars: &[char], start: usize) -> Option<Match> {
        if start > chars.len() {
            return None;
        }
        if let Some(d) = &self.delegate {
            return self.delegate_find(d, input, start);
        }
        let data = engine::search(&self.program, chars, start)?;
        Some(Match::from_data(data, Arc::clone(&self.names)))
    }

    fn delegate_find(&self, d: &::regex::Regex, input: &str, start: usize) -> Option<Match> {
        let byte_start = delegate::byte_offset(input, start);
        let caps = d.captures_at(input, byte_start)?;
        let mut slots: Vec<Option<Capture>> = vec![None; self.program.group_count() + 1];
        for (i, slot) in slots.iter_mut().enumerate() {
            if let Some(g) = caps.get(i) {
                let s = delegate::char_offset(input, g.start());
                let text = g.as_str().to_string();
                let e = s + text.chars().count();
                *slot = Some(Capture {
                    start: s,
                    end: e,
                    text,
                });
            }
        }
        let full = slots[0].clone()?;
        Some(Match::from_parts(
            full.start,
            full.end,
            full.text,
            slots,
            Arc::clone(&self.names),
        ))
    }
}
