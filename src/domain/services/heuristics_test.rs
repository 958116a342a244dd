use super::Heuristics;

#[test]
fn it_returns_hash_map_hints_for_two_sum() {
    for level in 1..=3 {
        let hint = Heuristics::hint(level, "two-sum", "");
        assert!(hint.contains("hash map"), "level {level}: {hint}");
    }
}

#[test]
fn it_escalates_to_distinct_hints() {
    let first = Heuristics::hint(1, "two-sum", "");
    let second = Heuristics::hint(2, "two-sum", "");
    let third = Heuristics::hint(3, "two-sum", "");

    assert_ne!(first, second);
    assert_ne!(second, third);
    assert_ne!(first, third);
}

#[test]
fn it_matches_boundary_problems_from_the_failure_text() {
    let hint = Heuristics::hint(1, "rotate-array", "IndexError: list index out of range");
    assert!(hint.contains("outside the valid range"), "{hint}");
}

#[test]
fn it_matches_complexity_problems() {
    let hint = Heuristics::hint(2, "three-sum", "Time Limit Exceeded");
    assert!(hint.contains("nested loop"), "{hint}");
}

#[test]
fn it_falls_back_to_a_general_hint() {
    let hint = Heuristics::hint(1, "merge-intervals", "");
    assert!(hint.contains("known pattern"), "{hint}");
}

#[test]
fn it_never_returns_an_empty_hint() {
    for level in 0..5 {
        assert!(!Heuristics::hint(level, "", "").is_empty());
        assert!(!Heuristics::hint(level, "anything-else", "whatever").is_empty());
    }
}

#[test]
fn it_clamps_out_of_range_levels() {
    assert_eq!(
        Heuristics::hint(0, "two-sum", ""),
        Heuristics::hint(1, "two-sum", "")
    );
    assert_eq!(
        Heuristics::hint(9, "two-sum", ""),
        Heuristics::hint(3, "two-sum", "")
    );
}

#[test]
fn it_is_case_insensitive() {
    assert_eq!(
        Heuristics::hint(1, "Two-Sum", ""),
        Heuristics::hint(1, "two-sum", "")
    );
}
