//! Delegation of simple patterns to the platform-native engine.
//!
//! When the parser leaves `may_delegate` set, the AST is re-rendered into
//! `regex`-crate syntax (shorthand classes spelled out as the ASCII sets
//! this engine uses, groups in their original order) so both paths report
//! identical matches. The delegate works in byte offsets; callers convert
//! through `byte_offset`/`char_offset`.

use crate::ast::{Node, NodeId, Program, QuantMode};
use crate::char_class::{CharClass, ClassItem};

/// Build the native-engine counterpart of an eligible pattern. Case folding
/// and the root-selection options change observable behaviour, so those stay
/// on the backtracking engine.
pub(crate) fn build(program: &Program) -> Option<::regex::Regex> {
    let opts = program.options;
    if !program.may_delegate
        || opts.ignore_case()
        || opts.find_longest()
        || opts.find_not_empty()
    {
        return None;
    }
    let mut pattern = String::new();
    if opts.multiline() {
        pattern.push_str("(?m)");
    }
    if opts.single_line() {
        pattern.push_str("(?s)");
    }
    render(program, program.ast.root, &mut pattern)?;
    ::regex::Regex::new(&pattern).ok()
}

fn render(program: &Program, id: NodeId, out: &mut String) -> Option<()> {
    match program.ast.node(id) {
        Node::Empty => {}
        Node::Literal { text, .. } => {
            for c in text.chars() {
                out.push_str(&::regex::escape(&c.to_string()));
            }
        }
        Node::Class(class) => render_class(class, out),
        Node::Dot => out.push('.'),
        Node::StartAnchor => out.push('^'),
        Node::EndAnchor => out.push('$'),
        Node::Seq(children) => {
            for &child in children {
                render(program, child, out)?;
            }
        }
        Node::Alt(alts) => {
            out.push_str("(?:");
            for (i, &alt) in alts.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                render(program, alt, out)?;
            }
            out.push(')');
        }
        Node::Repeat {
            child,
            min,
            max,
            mode: QuantMode::Greedy,
        } => {
            out.push_str("(?:");
            render(program, *child, out)?;
            out.push(')');
            match (*min, *max) {
                (0, usize::MAX) => out.push('*'),
                (1, usize::MAX) => out.push('+'),
                (0, 1) => out.push('?'),
                (n, usize::MAX) => out.push_str(&format!("{{{},}}", n)),
                (n, m) if n == m => out.push_str(&format!("{{{}}}", n)),
                (n, m) => out.push_str(&format!("{{{},{}}}", n, m)),
            }
        }
        Node::Group { child, name, .. } => {
            match name {
                Some(n) => out.push_str(&format!("(?P<{}>", n)),
                None => out.push('('),
            }
            render(program, *child, out)?;
            out.push(')');
        }
        Node::NonCapturing(child) => {
            out.push_str("(?:");
            render(program, *child, out)?;
            out.push(')');
        }
        // Everything else clears the delegation bit during parsing.
        _ => return None,
    }
    Some(())
}

fn render_class(class: &CharClass, out: &mut String) {
    out.push('[');
    if class.negated {
        out.push('^');
    }
    for item in &class.items {
        match item {
            ClassItem::Char(c) => push_class_char(*c, out),
            ClassItem::Range(lo, hi) => {
                push_class_char(*lo, out);
                out.push('-');
                push_class_char(*hi, out);
            }
            ClassItem::Digit => out.push_str("0-9"),
            ClassItem::Word => out.push_str("A-Za-z0-9_"),
            ClassItem::Space => out.push_str(" \\t\\n\\x0B\\x0C\\r"),
            // Nested classes express the complemented ASCII sets exactly.
            ClassItem::NotDigit => out.push_str("[^0-9]"),
            ClassItem::NotWord => out.push_str("[^A-Za-z0-9_]"),
            ClassItem::NotSpace => out.push_str("[^ \\t\\n\\x0B\\x0C\\r]"),
        }
    }
    out.push(']');
}

fn push_class_char(c: char, out: &mut String) {
    match c {
        '\n' => out.push_str("\\n"),
        '\t' => out.push_str("\\t"),
        '\r' => out.push_str("\\r"),
        '\x0B' => out.push_str("\\x0B"),
        '\x0C' => out.push_str("\\x0C"),
        '[' | ']' | '\\' | '^' | '-' | '&' | '~' => {
            out.push('\\');
            out.push(c);
        }
        _ => out.push(c),
    }
}

/// Byte offset of the code point at `char_ix` (input length when past the
/// end).
pub(crate) fn byte_offset(input: &str, char_ix: usize) -> usize {
    input
        .char_indices()
        .nth(char_ix)
        .map(|(b, _)| b)
        .unwrap_or(input.len())
}

pub(crate) fn char_offset(input: &str, byte_ix: usize) -> usize {
    input[..byte_ix].chars().count()
}
