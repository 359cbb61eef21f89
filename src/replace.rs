//! Substitution-template expansion and splitting.
//!
//! Templates understand `$&`/`$0` (full match), `$N` (maximal digit run),
//! `${name}`, and `$$` for a literal dollar. Missing groups expand to the
//! empty string; expansion never fails. Replacements are spliced right to
//! left so earlier positions stay valid.

use crate::matches::Match;
use crate::regex::Regex;

pub(crate) fn replace(re: &Regex, input: &str, template: &str, limit: usize) -> String {
    let found: Vec<Match> = re.all_matches(input).take(limit).collect();
    if found.is_empty() {
        return input.to_string();
    }
    let mut out: Vec<char> = input.chars().collect();
    for m in found.iter().rev() {
        let expansion: Vec<char> = expand(template, m).chars().collect();
        out.splice(m.start()..m.end(), expansion);
    }
    out.into_iter().collect()
}

pub(crate) fn split(re: &Regex, input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut parts = Vec::new();
    let mut prev = 0usize;
    for m in re.all_matches(input) {
        parts.push(chars[prev..m.start()].iter().collect());
        prev = m.end();
    }
    parts.push(chars[prev..].iter().collect());
    parts
}

fn expand(template: &str, m: &Match) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '$' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        match chars.get(i + 1) {
            Some('$') => {
                out.push('$');
                i += 2;
            }
            Some('&') => {
                out.push_str(m.text());
                i += 2;
            }
            Some('{') => {
                let mut j = i + 2;
                while j < chars.len() && chars[j] != '}' {
                    j += 1;
                }
                if j < chars.len() {
                    let name: String = chars[i + 2..j].iter().collect();
                    if let Some(text) = m.named_group(&name) {
                        out.push_str(text);
                    }
                    i = j + 1;
                } else {
                    out.push('$');
                    i += 1;
                }
            }
            Some(d) if d.is_ascii_digit() => {
                let mut j = i + 1;
                let mut number = 0usize;
                while j < chars.len() && chars[j].is_ascii_digit() {
                    number = number
                        .saturating_mul(10)
                        .saturating_add(chars[j] as usize - '0' as usize);
                    j += 1;
                }
                if number == 0 {
                    out.push_str(m.text());
                } else if let Some(text) = m.group_at(number) {
                    out.push_str(text);
                }
                i = j;
            }
            _ => {
                out.push('$');
                i += 1;
            }
        }
    }
    out
}
