use onigiri::{Regex, RegexOptions};

fn compiled(pattern: &str) -> Regex {
    Regex::from_pattern(pattern).expect("pattern should compile")
}

fn span(pattern: &str, input: &str) -> Option<(usize, usize)> {
    compiled(pattern)
        .first_match(input)
        .map(|m| (m.start(), m.end()))
}

#[test]
fn possessive_quantifier_never_gives_back() {
    let re = compiled(r"\d++[a-z]");
    assert_eq!(re.string_match("123a"), Some("123a".to_string()));
    assert_eq!(re.string_match("123"), None);
}

#[test]
fn possessive_dot_star_blocks_the_tail() {
    assert_eq!(span(r".*+abc", "xxxabc"), None);
    assert_eq!(span(r".*abc", "xxxabc"), Some((0, 6)));
}

#[test]
fn lazy_quantifiers_prefer_the_shortest() {
    assert_eq!(span("<.+?>", "<a><b>"), Some((0, 3)));
    assert_eq!(span("a{1,3}?", "aaa"), Some((0, 1)));
}

#[test]
fn atomic_groups_discard_interior_alternatives() {
    assert_eq!(span("(?>a|ab)c", "abc"), None);
    assert_eq!(span("(?:a|ab)c", "abc"), Some((0, 3)));
}

#[test]
fn lookahead_and_lookbehind() {
    assert_eq!(span(r"\w+(?=;)", "ab; cd"), Some((0, 2)));
    assert_eq!(span(r"(?<=\$)\d+", "cost: $42"), Some((7, 9)));
    assert_eq!(span(r"(?<=ab+)c", "abbbc"), Some((4, 5)));
    assert_eq!(span(r"(?<!\d)7", "a7 17"), Some((1, 2)));
}

#[test]
fn named_backreference_repeats_a_word() {
    let re = compiled(r"(?<word>\w+)\s+\k<word>");
    let m = re.first_match("hello hello world").expect("should match");
    assert_eq!(m.text(), "hello hello");
    assert_eq!(m.named_group("word"), Some("hello"));
    assert!(re.first_match("hello world").is_none());
}

#[test]
fn numbered_backreference_with_case_folding() {
    let re = Regex::new(
        r"(\w+) \1",
        RegexOptions::new().with(RegexOptions::IGNORE_CASE),
    )
    .expect("pattern should compile");
    let m = re.first_match("Echo echo").expect("should match");
    assert_eq!(m.text(), "Echo echo");
}

#[test]
fn whole_pattern_recursion_matches_balanced_parens() {
    let re = compiled(r"\((?:[^()]|(?R))*\)");
    let input = "(a(b(c)d)e)";
    let m = re.first_match(input).expect("should match");
    assert_eq!(m.text(), input);
}

#[test]
fn subroutine_calls_reuse_a_group_body_without_its_capture() {
    let re = compiled(r"(\d+)-(?1)");
    let m = re.first_match("12-345").expect("should match");
    assert_eq!(m.text(), "12-345");
    assert_eq!(m.group_at(1), Some("12"));

    let named = compiled(r"(?<num>\d+)-(?&num)");
    let m = named.first_match("12-345").expect("should match");
    assert_eq!(m.text(), "12-345");
    assert_eq!(m.named_group("num"), Some("12"));
}

#[test]
fn find_longest_changes_root_selection() {
    let plain = compiled("a|ab");
    assert_eq!(plain.string_match("ab"), Some("a".to_string()));
    let longest = Regex::new(
        "a|ab",
        RegexOptions::new().with(RegexOptions::FIND_LONGEST),
    )
    .expect("pattern should compile");
    assert_eq!(longest.string_match("ab"), Some("ab".to_string()));
}

#[test]
fn find_not_empty_skips_zero_width_results() {
    let re = Regex::new(
        "a*",
        RegexOptions::new().with(RegexOptions::FIND_NOT_EMPTY),
    )
    .expect("pattern should compile");
    let m = re.first_match("bba").expect("should match");
    assert_eq!((m.start(), m.end()), (2, 3));
}

#[test]
fn multiline_and_single_line_options() {
    let ml = Regex::new("^\\w+$", RegexOptions::new().with(RegexOptions::MULTILINE))
        .expect("pattern should compile");
    let lines: Vec<String> = ml.all_string_matches("one\ntwo\nthree").collect();
    assert_eq!(lines, vec!["one", "two", "three"]);

    let sl = Regex::new("a.b", RegexOptions::new().with(RegexOptions::SINGLE_LINE))
        .expect("pattern should compile");
    assert!(sl.has_match("a\nb"));
    assert!(!compiled("a.b").has_match("a\nb"));
}

#[test]
fn extended_flag_is_recognized_but_inert() {
    let re = Regex::new("a b", RegexOptions::new().with(RegexOptions::EXTENDED))
        .expect("pattern should compile");
    assert!(re.options().extended());
    // Whitespace is not stripped.
    assert!(re.has_match("a b"));
    assert!(!re.has_match("ab"));
}

#[test]
fn anchors_interact_with_fancy_constructs() {
    assert_eq!(span(r"^\d++$", "123"), Some((0, 3)));
    assert_eq!(span(r"^\d++$", "123a"), None);
}

#[test]
fn lookahead_captures_are_invisible_outside() {
    let m = compiled(r"(?=(\d+))\w+")
        .first_match("42x")
        .expect("should match");
    assert_eq!(m.text(), "42x");
    assert_eq!(m.group_at(1), None);
}
