use onigiri::Regex;

fn first(pattern: &str, input: &str) -> onigiri::Match {
    Regex::from_pattern(pattern)
        .expect("pattern should compile")
        .first_match(input)
        .expect("should match")
}

#[test]
fn numbered_group_texts_and_positions() {
    let m = first(r"(\d+)-(\d+)", "ab 12-34 cd");
    assert_eq!(m.text(), "12-34");
    assert_eq!((m.start(), m.end()), (3, 8));
    assert_eq!(m.group_count(), 2);
    assert_eq!(m.group_at(1), Some("12"));
    assert_eq!(m.group_at(2), Some("34"));
    assert_eq!(m.group_start(1), Some(3));
    assert_eq!(m.group_end(1), Some(5));
    assert_eq!(m.group_start(2), Some(6));
    assert_eq!(m.group_end(2), Some(8));
}

#[test]
fn group_zero_is_the_full_match() {
    let m = first(r"(\w)\w*", "hello");
    assert_eq!(m.group_at(0), Some("hello"));
    assert_eq!(m.group_start(0), Some(0));
    assert_eq!(m.group_end(0), Some(5));
}

#[test]
fn out_of_range_and_unknown_lookups_return_none() {
    let m = first(r"(a)", "a");
    assert_eq!(m.group_at(2), None);
    assert_eq!(m.group_at(99), None);
    assert_eq!(m.group_start(2), None);
    assert_eq!(m.named_group("nope"), None);
    assert_eq!(m.named_group_start("nope"), None);
}

#[test]
fn non_participating_groups_return_none() {
    let m = first(r"(a)(b)?", "a");
    assert_eq!(m.group_at(1), Some("a"));
    assert_eq!(m.group_at(2), None);
    assert_eq!(m.group_start(2), None);
    assert_eq!(m.group_end(2), None);
}

#[test]
fn named_groups_mirror_their_numbers() {
    let m = first(r"(?<left>\w+)=(?<right>\w+)", "key=value");
    assert_eq!(m.named_group("left"), Some("key"));
    assert_eq!(m.named_group("left"), m.group_at(1));
    assert_eq!(m.named_group("right"), m.group_at(2));
    assert_eq!(m.named_group_start("right"), Some(4));
    assert_eq!(m.named_group_end("right"), Some(9));
    let mut names: Vec<&str> = m.group_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["left", "right"]);
}

#[test]
fn last_captured_group_is_the_rightmost_participant() {
    assert_eq!(first(r"(a)(b)", "ab").last_captured_group(), Some(2));
    assert_eq!(first(r"(a)(b)?", "a").last_captured_group(), Some(1));
    assert_eq!(first(r"(a)|(b)", "b").last_captured_group(), Some(2));
    assert_eq!(first("ab", "ab").last_captured_group(), None);
}

#[test]
fn captures_stay_inside_the_match_bounds() {
    let m = first(r"\s(\w+)\s(\w+)", "a bc def g");
    for i in 1..=m.group_count() {
        let (Some(s), Some(e)) = (m.group_start(i), m.group_end(i)) else {
            continue;
        };
        assert!(m.start() <= s && s <= e && e <= m.end());
    }
}

#[test]
fn captures_through_the_backtracking_engine() {
    // Possessive quantifier keeps this off the delegate path.
    let m = first(r"(\d++)x", "a12x");
    assert_eq!(m.text(), "12x");
    assert_eq!(m.group_at(1), Some("12"));
    assert_eq!(m.group_start(1), Some(1));
}

#[test]
fn quantified_group_reports_its_last_iteration() {
    let m = first(r"(?:(\w);)+", "a;b;c;");
    assert_eq!(m.group_at(1), Some("c"));
    assert_eq!(m.group_start(1), Some(4));
}
