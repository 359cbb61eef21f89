//! Bracketed character classes: `[abc]`, `[^abc]`, `[a-z]`, shorthand
//! escapes as class members.

use crate::ast::{Node, NodeId};
use crate::char_class::{CharClass, ClassItem};
use crate::error::{ErrorCode, RegexError};

use super::Parser;

impl Parser<'_> {
    /// Called with the `[` already consumed; `start` is its offset.
    pub(super) fn parse_class(&mut self, start: usize) -> Result<NodeId, RegexError> {
        let mut class = CharClass::default();
        if self.eat('^') {
            class.negated = true;
        }
        let mut first = true;
        loop {
            let c = match self.bump() {
                Some(c) => c,
                None => {
                    return Err(self.error_at(
                        start,
                        ErrorCode::UnclosedClass,
                        "unclosed character class",
                    ));
                }
            };
            // A `]` in first position is an ordinary member.
            if c == ']' && !first {
                break;
            }
            first = false;
            let item = if c == '\\' {
                self.parse_class_escape(start)?
            } else {
                ClassItem::Char(c)
            };
            // `x-y` is a range unless `y` would be the closing bracket.
            if let (ClassItem::Char(lo), Some('-')) = (item, self.peek()) {
                if self.range_end_follows() {
                    self.bump(); // '-'
                    let hi = match self.bump() {
                        Some('\\') => self.class_escape_char(start)?,
                        Some(end) => end,
                        None => {
                            return Err(self.error_at(
                                start,
                                ErrorCode::UnclosedClass,
                                "unclosed character class",
                            ));
                        }
                    };
                    class.items.push(ClassItem::Range(lo, hi));
                    continue;
                }
            }
            class.items.push(item);
        }
        Ok(self.ast.push(Node::Class(class)))
    }

    fn range_end_follows(&self) -> bool {
        // The '-' at self.pos is a range dash only when followed by
        // something other than the closing bracket.
        match self.chars.get(self.pos + 1) {
            Some(']') | None => false,
            Some(_) => true,
        }
    }

    fn parse_class_escape(&mut self, start: usize) -> Result<ClassItem, RegexError> {
        let c = match self.bump() {
            Some(c) => c,
            None => {
                return Err(self.error_at(
                    start,
                    ErrorCode::TruncatedEscape,
                    "pattern ends with a truncated escape",
                ));
            }
        };
        Ok(match c {
            'd' => ClassItem::Digit,
            'D' => ClassItem::NotDigit,
            'w' => ClassItem::Word,
            'W' => ClassItem::NotWord,
            's' => ClassItem::Space,
            'S' => ClassItem::NotSpace,
            'n' => ClassItem::Char('\n'),
            't' => ClassItem::Char('\t'),
            'r' => ClassItem::Char('\r'),
            other => ClassItem::Char(other),
        })
    }

    /// Escape in range-end position; shorthands make no sense there, so the
    /// character stands for itself apart from the control escapes.
    fn class_escape_char(&mut self, start: usize) -> Result<char, RegexError> {
        match self.bump() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some(other) => Ok(other),
            None => Err(self.error_at(
                start,
                ErrorCode::TruncatedEscape,
                "pattern ends with a truncated escape",
            )),
        }
    }
}
