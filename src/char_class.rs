//! Character predicates and the character-class set model.
//!
//! Shorthand classes use the ASCII definitions: `\d` is `[0-9]`, `\s` is
//! `[ \t\n\v\f\r]`, `\w` is `[A-Za-z0-9_]`. Unicode whitespace and digits
//! outside ASCII are deliberately excluded.

pub(crate) fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub(crate) fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClassItem {
    Char(char),
    Range(char, char),
    Digit,
    NotDigit,
    Word,
    NotWord,
    Space,
    NotSpace,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct CharClass {
    pub(crate) items: Vec<ClassItem>,
    pub(crate) negated: bool,
}

impl CharClass {
    pub(crate) fn matches(&self, c: char) -> bool {
        let mut matched = false;
        for item in &self.items {
            let hit = match item {
                ClassItem::Char(ch) => *ch == c,
                ClassItem::Range(lo, hi) => *lo <= c && c <= *hi,
                ClassItem::Digit => is_digit(c),
                ClassItem::NotDigit => !is_digit(c),
                ClassItem::Word => is_word(c),
                ClassItem::NotWord => !is_word(c),
                ClassItem::Space => is_space(c),
                ClassItem::NotSpace => !is_space(c),
            };
            if hit {
                matched = true;
                break;
            }
        }
        if self.negated { !matched } else { matched }
    }
}
