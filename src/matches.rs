//! The match object and the lazy match iterator.

use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::{Capture, MatchData};
use crate::regex::Regex;

/// A single successful match with its captures.
///
/// Positions are code-point offsets into the searched input. Out-of-range and
/// non-participating group lookups return `None`.
#[derive(Debug, Clone)]
pub struct Match {
    text: String,
    start: usize,
    end: usize,
    slots: Vec<Option<Capture>>,
    names: Arc<HashMap<String, usize>>,
}

impl Match {
    pub(crate) fn from_data(data: MatchData, names: Arc<HashMap<String, usize>>) -> Self {
        let text = data.slots[0]
            .as_ref()
            .map(|c| c.text.clone())
            .unwrap_or_default();
        Match {
            text,
            start: data.start,
            end: data.end,
            slots: data.slots,
            names,
        }
    }

    pub(crate) fn from_parts(
        start: usize,
        end: usize,
        text: String,
        slots: Vec<Option<Capture>>,
        names: Arc<HashMap<String, usize>>,
    ) -> Self {
        Match {
            text,
            start,
            end,
            slots,
            names,
        }
    }

    /// Text of the full match.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of capturing groups in the pattern, excluding group 0.
    pub fn group_count(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }

    /// Text of the numbered group; index 0 is the full match.
    pub fn group_at(&self, index: usize) -> Option<&str> {
        self.slots.get(index)?.as_ref().map(|c| c.text.as_str())
    }

    pub fn named_group(&self, name: &str) -> Option<&str> {
        self.group_at(*self.names.get(name)?)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(|s| s.as_str())
    }

    pub fn group_start(&self, index: usize) -> Option<usize> {
        self.slots.get(index)?.as_ref().map(|c| c.start)
    }

    pub fn group_end(&self, index: usize) -> Option<usize> {
        self.slots.get(index)?.as_ref().map(|c| c.end)
    }

    pub fn named_group_start(&self, name: &str) -> Option<usize> {
        self.group_start(*self.names.get(name)?)
    }

    pub fn named_group_end(&self, name: &str) -> Option<usize> {
        self.group_end(*self.names.get(name)?)
    }

    /// Rightmost numbered group that participated in the match.
    pub fn last_captured_group(&self) -> Option<usize> {
        (1..self.slots.len())
            .rev()
            .find(|&i| self.slots[i].is_some())
    }
}

/// Lazy, restartable iterator over non-overlapping matches.
///
/// A zero-width match advances the scan by one unit so the sequence always
/// makes progress.
pub struct Matches<'r> {
    regex: &'r Regex,
    input: String,
    chars: Vec<char>,
    next_start: usize,
    done: bool,
}

impl<'r> Matches<'r> {
    pub(crate) fn new(regex: &'r Regex, input: &str, start: usize) -> Self {
        Matches {
            regex,
            input: input.to_string(),
            chars: input.chars().collect(),
            next_start: start,
            done: false,
        }
    }
}

impl Iterator for Matches<'_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        if self.done || self.next_start > self.chars.len() {
            self.done = true;
            return None;
        }
        match self
            .regex
            .find_from(&self.input, &self.chars, self.next_start)
        {
            Some(found) => {
                self.next_start = if found.is_empty() {
                    found.end() + 1
                } else {
                    found.end()
                };
                Some(found)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}
