//! Group-opener dispatch: everything that starts with `(`.

use crate::ast::{CallTarget, Node, NodeId};
use crate::error::{ErrorCode, RegexError};

use super::Parser;

impl Parser<'_> {
    /// Called with the `(` already consumed; `start` is its offset.
    pub(super) fn parse_group(&mut self, start: usize) -> Result<NodeId, RegexError> {
        if !self.eat('?') {
            return self.parse_capturing(start, None);
        }
        match self.peek() {
            Some(':') => {
                self.bump();
                let child = self.parse_alternation()?;
                self.expect_close(start)?;
                Ok(self.ast.push(Node::NonCapturing(child)))
            }
            Some('=') => {
                self.bump();
                self.parse_lookaround(start, true, false)
            }
            Some('!') => {
                self.bump();
                self.parse_lookaround(start, false, false)
            }
            Some('>') => {
                self.bump();
                self.may_delegate = false;
                let child = self.parse_alternation()?;
                self.expect_close(start)?;
                Ok(self.ast.push(Node::Atomic(child)))
            }
            Some('<') => {
                self.bump();
                self.parse_angle(start)
            }
            Some('&') => {
                self.bump();
                let name = self.read_name(')', start, "unclosed subroutine call")?;
                self.may_delegate = false;
                self.calls.push((CallTarget::Name(name.clone()), start));
                Ok(self.ast.push(Node::Call(CallTarget::Name(name))))
            }
            Some('R') => {
                self.bump();
                self.expect_close(start)?;
                self.may_delegate = false;
                Ok(self.ast.push(Node::Call(CallTarget::Recursion)))
            }
            Some('(') => {
                // Conditional groups are recognized but unsupported.
                Err(RegexError::unsupported(
                    self.pattern,
                    start,
                    "conditional group `(?(...)...)`",
                    "rewrite the pattern with plain alternation `(...|...)`",
                ))
            }
            Some(d) if d.is_ascii_digit() => {
                let number = self.parse_decimal().unwrap_or(0);
                self.expect_close(start)?;
                self.may_delegate = false;
                self.calls.push((CallTarget::Number(number), start));
                Ok(self.ast.push(Node::Call(CallTarget::Number(number))))
            }
            _ => Err(self.error_at(
                start,
                ErrorCode::UnknownGroupSyntax,
                "unknown `(?...)` group syntax",
            )),
        }
    }

    /// After `(?<`: lookbehind, numbered call, or named capturing group,
    /// disambiguated on the next character.
    fn parse_angle(&mut self, start: usize) -> Result<NodeId, RegexError> {
        match self.peek() {
            Some('=') => {
                self.bump();
                self.parse_lookaround(start, true, true)
            }
            Some('!') => {
                self.bump();
                self.parse_lookaround(start, false, true)
            }
            Some(d) if d.is_ascii_digit() => {
                // A "name" beginning with a digit is a numbered subroutine
                // call in angle clothing: `(?<2>)` behaves as `(?2)`.
                let number = self.parse_decimal().unwrap_or(0);
                if !self.eat('>') {
                    return Err(self.error_at(
                        start,
                        ErrorCode::UnclosedName,
                        "unclosed subroutine call",
                    ));
                }
                self.expect_close(start)?;
                self.may_delegate = false;
                self.calls.push((CallTarget::Number(number), start));
                Ok(self.ast.push(Node::Call(CallTarget::Number(number))))
            }
            _ => {
                let name = self.read_name('>', start, "unclosed group name")?;
                self.parse_capturing(start, Some(name))
            }
        }
    }

    fn parse_capturing(
        &mut self,
        start: usize,
        name: Option<String>,
    ) -> Result<NodeId, RegexError> {
        self.group_count += 1;
        let number = self.group_count;
        if let Some(ref n) = name {
            // Later definitions of the same name win.
            self.named.insert(n.clone(), number);
        }
        let child = self.parse_alternation()?;
        self.expect_close(start)?;
        let id = self.ast.push(Node::Group {
            child,
            number,
            name,
        });
        self.group_defs.push((number, id));
        Ok(id)
    }

    fn parse_lookaround(
        &mut self,
        start: usize,
        positive: bool,
        behind: bool,
    ) -> Result<NodeId, RegexError> {
        self.may_delegate = false;
        let child = self.parse_alternation()?;
        self.expect_close(start)?;
        if behind {
            let (min_len, max_len) = self.ast.length_bounds(child);
            Ok(self.ast.push(Node::LookBehind {
                child,
                positive,
                min_len,
                max_len,
            }))
        } else {
            Ok(self.ast.push(Node::LookAhead { child, positive }))
        }
    }

    fn expect_close(&mut self, start: usize) -> Result<(), RegexError> {
        if self.eat(')') {
            Ok(())
        } else {
            Err(self.error_at(start, ErrorCode::UnclosedGroup, "unclosed group"))
        }
    }
}
