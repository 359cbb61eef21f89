//! The backtracking evaluator.
//!
//! `exec` interprets the arena AST in continuation-passing style: each node
//! hands candidate end positions to the continuation one at a time, in the
//! documented preference order, and stops as soon as the continuation
//! accepts. Possessive and atomic constructs cut the candidate stream after
//! the first success, so no eager result lists ever exist.

mod context;

pub(crate) use context::{Capture, MatchContext};

use crate::ast::{
    BackrefTarget, CallTarget, LOOKBEHIND_CEILING, Node, NodeId, Program, QuantMode,
    RECURSION_LIMIT,
};
use crate::trace::trace_log;

/// One successful root evaluation.
pub(crate) struct MatchData {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) slots: Vec<Option<Capture>>,
}

type Cont<'c> = &'c mut dyn FnMut(&mut MatchContext, usize) -> bool;

/// Scan forward from `start`, trying the root at each position; first
/// position with any result wins. Under `find_longest` the longest result at
/// that position is chosen instead of the first.
pub(crate) fn search(program: &Program, chars: &[char], start: usize) -> Option<MatchData> {
    let exec = Executor { program, chars };
    for at in start..=chars.len() {
        if let Some(found) = exec.match_at(at) {
            return Some(found);
        }
    }
    None
}

pub(crate) struct Executor<'p> {
    program: &'p Program,
    chars: &'p [char],
}

impl<'p> Executor<'p> {
    fn match_at(&self, at: usize) -> Option<MatchData> {
        let opts = self.program.options;
        let find_longest = opts.find_longest();
        let skip_empty = opts.find_not_empty();
        let mut ctx = MatchContext::new(self.program.group_count());
        let mut best: Option<(usize, Vec<Option<Capture>>)> = None;
        self.exec(self.program.ast.root, at, &mut ctx, &mut |ctx, end| {
            if skip_empty && end == at {
                return false;
            }
            if find_longest {
                if best.as_ref().is_none_or(|(e, _)| end > *e) {
                    best = Some((end, ctx.snapshot()));
                }
                false
            } else {
                best = Some((end, ctx.snapshot()));
                true
            }
        });
        let (end, mut slots) = best?;
        trace_log!(
            Exec,
            "matched {}..{} ({} capture events)",
            at,
            end,
            ctx.history_len()
        );
        slots[0] = Some(Capture {
            start: at,
            end,
            text: self.chars[at..end].iter().collect(),
        });
        Some(MatchData {
            start: at,
            end,
            slots,
        })
    }

    fn exec(&self, id: NodeId, pos: usize, ctx: &mut MatchContext, k: Cont) -> bool {
        match self.program.ast.node(id) {
            Node::Empty => k(ctx, pos),
            Node::Literal { text, casei } => match self.match_text(text, *casei, pos) {
                Some(end) => k(ctx, end),
                None => false,
            },
            Node::Class(class) => match self.chars.get(pos) {
                Some(&c) if class.matches(c) => k(ctx, pos + 1),
                _ => false,
            },
            Node::Dot => match self.chars.get(pos) {
                Some(&c) if c != '\n' || self.program.options.single_line() => k(ctx, pos + 1),
                _ => false,
            },
            Node::StartAnchor => {
                if pos == 0 || (self.program.options.multiline() && self.chars[pos - 1] == '\n') {
                    k(ctx, pos)
                } else {
                    false
                }
            }
            Node::EndAnchor => {
                if pos == self.chars.len()
                    || (self.program.options.multiline() && self.chars[pos] == '\n')
                {
                    k(ctx, pos)
                } else {
                    false
                }
            }
            Node::Seq(children) => self.exec_seq(children, pos, ctx, k),
            Node::Alt(alts) => {
                for &alt in alts {
                    let mark = ctx.mark();
                    if self.exec(alt, pos, ctx, &mut *k) {
                        return true;
                    }
                    ctx.rewind(mark);
                }
                false
            }
            Node::Repeat {
                child,
                min,
                max,
                mode,
            } => self.exec_repeat(*child, *min, *max, *mode, 0, pos, ctx, k),
            Node::Group { child, number, .. } => {
                let child = *child;
                let number = *number;
                self.exec(child, pos, ctx, &mut |ctx, end| {
                    let mark = ctx.mark();
                    let text: String = self.chars[pos..end].iter().collect();
                    ctx.set(
                        number,
                        Capture {
                            start: pos,
                            end,
                            text,
                        },
                    );
                    if k(ctx, end) {
                        true
                    } else {
                        ctx.rewind(mark);
                        false
                    }
                })
            }
            Node::NonCapturing(child) => self.exec(*child, pos, ctx, k),
            Node::Atomic(child) => {
                // Commit to the child's first result; never revisit its
                // interior.
                let mut committed = None;
                self.exec(*child, pos, ctx, &mut |_, end| {
                    committed = Some(end);
                    true
                });
                match committed {
                    Some(end) => k(ctx, end),
                    None => false,
                }
            }
            Node::LookAhead { child, positive } => {
                let mark = ctx.mark();
                let found = self.exec(*child, pos, ctx, &mut |_, _| true);
                // Captures inside lookaround are not observable outside.
                ctx.rewind(mark);
                if found == *positive { k(ctx, pos) } else { false }
            }
            Node::LookBehind {
                child,
                positive,
                min_len,
                max_len,
            } => {
                let found = self.look_behind(*child, pos, *min_len, *max_len, ctx);
                if found == *positive { k(ctx, pos) } else { false }
            }
            Node::Backref { target, casei } => {
                let number = match target {
                    BackrefTarget::Number(n) => *n,
                    BackrefTarget::Name(name) => match self.program.named.get(name) {
                        Some(&n) => n,
                        None => return false,
                    },
                };
                let text = match ctx.get(number) {
                    Some(cap) => cap.text.clone(),
                    None => return false,
                };
                match self.match_text(&text, *casei, pos) {
                    Some(end) => k(ctx, end),
                    None => false,
                }
            }
            Node::Call(target) => self.exec_call(target, pos, ctx, k),
        }
    }

    fn exec_seq(&self, children: &[NodeId], pos: usize, ctx: &mut MatchContext, k: Cont) -> bool {
        match children.split_first() {
            None => k(ctx, pos),
            Some((&first, rest)) => self.exec(first, pos, ctx, &mut |ctx, next| {
                self.exec_seq(rest, next, ctx, &mut *k)
            }),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn exec_repeat(
        &self,
        child: NodeId,
        min: usize,
        max: usize,
        mode: QuantMode,
        count: usize,
        pos: usize,
        ctx: &mut MatchContext,
        k: Cont,
    ) -> bool {
        match mode {
            QuantMode::Greedy => {
                if count < max {
                    let mark = ctx.mark();
                    let more = self.exec(child, pos, ctx, &mut |ctx, next| {
                        if next == pos {
                            // A zero-width iteration is counted once and not
                            // retaken at the same position.
                            if count + 1 >= min { k(ctx, next) } else { false }
                        } else {
                            self.exec_repeat(child, min, max, mode, count + 1, next, ctx, &mut *k)
                        }
                    });
                    if more {
                        return true;
                    }
                    ctx.rewind(mark);
                }
                if count >= min { k(ctx, pos) } else { false }
            }
            QuantMode::Lazy => {
                if count >= min {
                    let mark = ctx.mark();
                    if k(ctx, pos) {
                        return true;
                    }
                    ctx.rewind(mark);
                }
                if count < max {
                    let mark = ctx.mark();
                    let more = self.exec(child, pos, ctx, &mut |ctx, next| {
                        if next == pos {
                            if count + 1 >= min { k(ctx, next) } else { false }
                        } else {
                            self.exec_repeat(child, min, max, mode, count + 1, next, ctx, &mut *k)
                        }
                    });
                    if more {
                        return true;
                    }
                    ctx.rewind(mark);
                }
                false
            }
            QuantMode::Possessive => {
                // Commit to the first child result of every iteration; on
                // failure of what follows, nothing is given back.
                let mut end = pos;
                let mut taken = 0usize;
                while taken < max {
                    let mark = ctx.mark();
                    let mut stepped = None;
                    self.exec(child, end, ctx, &mut |_, next| {
                        stepped = Some(next);
                        true
                    });
                    match stepped {
                        None => {
                            ctx.rewind(mark);
                            break;
                        }
                        Some(next) => {
                            taken += 1;
                            if next == end {
                                break;
                            }
                            end = next;
                        }
                    }
                }
                if taken >= min { k(ctx, end) } else { false }
            }
        }
    }

    fn look_behind(
        &self,
        child: NodeId,
        pos: usize,
        min_len: usize,
        max_len: usize,
        ctx: &mut MatchContext,
    ) -> bool {
        // The ceiling applies only to unbounded analyses; finite bounds are
        // used as computed.
        let reach = if max_len == usize::MAX {
            LOOKBEHIND_CEILING
        } else {
            max_len
        };
        if min_len > reach || min_len > pos {
            return false;
        }
        let lo = pos.saturating_sub(reach);
        let hi = pos - min_len;
        let mut start = hi;
        loop {
            let mark = ctx.mark();
            let hit = self.exec(child, start, ctx, &mut |_, end| end == pos);
            ctx.rewind(mark);
            if hit {
                return true;
            }
            if start == lo {
                return false;
            }
            start -= 1;
        }
    }

    fn exec_call(&self, target: &CallTarget, pos: usize, ctx: &mut MatchContext, k: Cont) -> bool {
        let body = match target {
            CallTarget::Recursion => self.program.ast.root,
            CallTarget::Number(n) => match self.program.group_child(*n) {
                Some(id) => id,
                None => return false,
            },
            CallTarget::Name(name) => {
                let number = match self.program.named.get(name) {
                    Some(&n) => n,
                    None => return false,
                };
                match self.program.group_child(number) {
                    Some(id) => id,
                    None => return false,
                }
            }
        };
        if ctx.depth >= RECURSION_LIMIT {
            return false;
        }
        ctx.depth += 1;
        let mark = ctx.mark();
        let accepted = self.exec(body, pos, ctx, &mut |ctx, end| {
            // Captures made inside the call are scoped to it: roll them back
            // before the outer continuation looks at the state, and restore
            // them if it rejects so the call can keep searching.
            let redo = ctx.unwind(mark);
            ctx.depth -= 1;
            if k(ctx, end) {
                return true;
            }
            ctx.depth += 1;
            ctx.replay(redo);
            false
        });
        if !accepted {
            ctx.depth -= 1;
            ctx.rewind(mark);
        }
        accepted
    }

    fn match_text(&self, text: &str, casei: bool, pos: usize) -> Option<usize> {
        let mut at = pos;
        for ch in text.chars() {
            let &c = self.chars.get(at)?;
            if casei {
                if c.to_ascii_lowercase() != ch.to_ascii_lowercase() {
                    return None;
                }
            } else if c != ch {
                return None;
            }
            at += 1;
        }
        Some(at)
    }
}

#[cfg(test)]
mod tests {
    //! Core semantics exercised without the façade or delegation.

    use super::{MatchData, search};
    use crate::options::RegexOptions;
    use crate::parser::parse;

    fn run(pattern: &str, input: &str) -> Option<(usize, usize)> {
        run_opts(pattern, input, RegexOptions::new())
    }

    fn run_opts(pattern: &str, input: &str, options: RegexOptions) -> Option<(usize, usize)> {
        let program = parse(pattern, options).expect("pattern should compile");
        let chars: Vec<char> = input.chars().collect();
        search(&program, &chars, 0).map(|m| (m.start, m.end))
    }

    fn run_captures(pattern: &str, input: &str) -> Option<MatchData> {
        let program = parse(pattern, RegexOptions::new()).expect("pattern should compile");
        let chars: Vec<char> = input.chars().collect();
        search(&program, &chars, 0)
    }

    fn group_text(data: &MatchData, index: usize) -> Option<String> {
        data.slots[index].as_ref().map(|c| c.text.clone())
    }

    #[test]
    fn word_runs() {
        assert_eq!(run("\\w+", "Hello world 123"), Some((0, 5)));
    }

    #[test]
    fn named_captures() {
        let data = run_captures("(?<username>\\w+)@(?<domain>\\w+\\.\\w+)", "john@example.com")
            .expect("should match");
        assert_eq!(data.start, 0);
        assert_eq!(data.end, 16);
        assert_eq!(group_text(&data, 1).as_deref(), Some("john"));
        assert_eq!(group_text(&data, 2).as_deref(), Some("example.com"));
    }

    #[test]
    fn greedy_backtracks_lazy_stops_short() {
        assert_eq!(run("<.+>", "<a><b>"), Some((0, 6)));
        assert_eq!(run("<.+?>", "<a><b>"), Some((0, 3)));
    }

    #[test]
    fn possessive_digits_do_not_give_back() {
        assert_eq!(run("\\d++[a-z]", "123a"), Some((0, 4)));
        assert_eq!(run("\\d++[a-z]", "123"), None);
    }

    #[test]
    fn possessive_dot_star_swallows_everything() {
        assert_eq!(run(".*+abc", "xxxabc"), None);
        assert_eq!(run(".*abc", "xxxabc"), Some((0, 6)));
    }

    #[test]
    fn atomic_group_cuts_alternatives() {
        assert_eq!(run("(?>a|ab)c", "abc"), None);
        assert_eq!(run("(?:a|ab)c", "abc"), Some((0, 3)));
    }

    #[test]
    fn named_backreference() {
        assert_eq!(run("(?<word>\\w+)\\s+\\k<word>", "hello hello world"), Some((0, 11)));
        assert_eq!(run("(?<word>\\w+)\\s+\\k<word>", "hello world"), None);
    }

    #[test]
    fn unset_backreference_fails_the_branch() {
        assert_eq!(run("(a)?\\1", "b"), None);
        assert_eq!(run("(a)?\\1", "aa"), Some((0, 2)));
    }

    #[test]
    fn whole_pattern_recursion_balances_parens() {
        let pattern = "\\((?:[^()]|(?R))*\\)";
        assert_eq!(run(pattern, "(a(b(c)d)e)"), Some((0, 11)));
        assert_eq!(run(pattern, "(a(b)"), Some((2, 5)));
    }

    #[test]
    fn bare_recursion_exhausts_the_depth_cap_and_fails() {
        assert_eq!(run("(?R)", "x"), None);
    }

    #[test]
    fn subroutine_call_does_not_touch_outer_captures() {
        let data = run_captures("(\\d+)-(?1)", "12-345").expect("should match");
        assert_eq!(data.end, 6);
        assert_eq!(group_text(&data, 1).as_deref(), Some("12"));
    }

    #[test]
    fn forward_subroutine_call() {
        let data = run_captures("(?1)-(a+)", "aa-a").expect("should match");
        assert_eq!((data.start, data.end), (0, 4));
        assert_eq!(group_text(&data, 1).as_deref(), Some("a"));
    }

    #[test]
    fn lookahead_polarity() {
        assert_eq!(run("a(?=b)", "ab"), Some((0, 1)));
        assert_eq!(run("a(?=b)", "ac"), None);
        assert_eq!(run("a(?!b)", "ac"), Some((0, 1)));
        assert_eq!(run("a(?!b)", "ab"), None);
    }

    #[test]
    fn variable_length_lookbehind() {
        assert_eq!(run("(?<=ab+)c", "abbbc"), Some((4, 5)));
        assert_eq!(run("(?<=ab+)c", "ac"), None);
        assert_eq!(run("(?<!\\d)x", "ax"), Some((1, 2)));
        assert_eq!(run("(?<!\\d)x", "1x"), None);
    }

    #[test]
    fn lookbehind_with_large_finite_bounds_is_not_capped() {
        let input = format!("{}c", "a".repeat(101));
        assert_eq!(run("(?<=a{101})c", &input), Some((101, 102)));
        let shifted = format!("b{}c", "a".repeat(100));
        assert_eq!(run("(?<=a{101})c", &shifted), None);
    }

    #[test]
    fn unbounded_lookbehind_saturates_at_the_ceiling() {
        let input = format!("{}c", "a".repeat(150));
        assert_eq!(run("(?<=a{1,})c", &input), Some((150, 151)));
        assert_eq!(run("(?<=a{101,})c", &input), None);
    }

    #[test]
    fn lookaround_captures_are_not_observable() {
        let data = run_captures("(?=(\\d+))\\w+", "42x").expect("should match");
        assert_eq!(data.end, 3);
        assert_eq!(group_text(&data, 1), None);
    }

    #[test]
    fn case_insensitive_literals_and_backrefs() {
        let opts = RegexOptions::new().with(RegexOptions::IGNORE_CASE);
        assert_eq!(run_opts("HELLO", "hello", opts), Some((0, 5)));
        assert_eq!(run_opts("(hello) \\1", "Hello hello", opts), Some((0, 11)));
        // Classes are not folded.
        assert_eq!(run_opts("[a-z]", "A", opts), None);
    }

    #[test]
    fn multiline_anchors() {
        let opts = RegexOptions::new().with(RegexOptions::MULTILINE);
        assert_eq!(run_opts("^b", "a\nb", opts), Some((2, 3)));
        assert_eq!(run("^b", "a\nb"), None);
        assert_eq!(run_opts("a$", "a\nb", opts), Some((0, 1)));
        assert_eq!(run("a$", "a\nb"), None);
    }

    #[test]
    fn dot_and_single_line() {
        assert_eq!(run("a.b", "a\nb"), None);
        let opts = RegexOptions::new().with(RegexOptions::SINGLE_LINE);
        assert_eq!(run_opts("a.b", "a\nb", opts), Some((0, 3)));
    }

    #[test]
    fn find_longest_prefers_the_longest_root_result() {
        assert_eq!(run("a|ab", "ab"), Some((0, 1)));
        let opts = RegexOptions::new().with(RegexOptions::FIND_LONGEST);
        assert_eq!(run_opts("a|ab", "ab", opts), Some((0, 2)));
    }

    #[test]
    fn find_not_empty_skips_zero_width_results() {
        assert_eq!(run("a*", "bba"), Some((0, 0)));
        let opts = RegexOptions::new().with(RegexOptions::FIND_NOT_EMPTY);
        assert_eq!(run_opts("a*", "bba", opts), Some((2, 3)));
    }

    #[test]
    fn zero_width_quantifier_iterations_terminate() {
        assert_eq!(run("(?:a?)*b", "b"), Some((0, 1)));
        assert_eq!(run("(?:)*x", "x"), Some((0, 1)));
    }

    #[test]
    fn rightmost_iteration_capture_wins() {
        let data = run_captures("(?:(\\w);)+", "a;b;c;").expect("should match");
        assert_eq!(data.end, 6);
        assert_eq!(group_text(&data, 1).as_deref(), Some("c"));
    }

    #[test]
    fn bounded_repetitions() {
        assert_eq!(run("a{2,3}", "aaaa"), Some((0, 3)));
        assert_eq!(run("a{2}", "a"), None);
        assert_eq!(run("a{2,}", "aaaa"), Some((0, 4)));
        assert_eq!(run("a{2,3}?", "aaaa"), Some((0, 2)));
    }
}
