use test_utils::snippet_fixture;

use super::Excerpts;

#[test]
fn it_takes_the_first_three_non_empty_lines() {
    assert_eq!(Excerpts::local("a\nb\n\nc\nd"), "a\nb\nc");
}

#[test]
fn it_trims_surrounding_whitespace() {
    assert_eq!(Excerpts::local("  a  \n\t b\n\n   \nc"), "a\nb\nc");
}

#[test]
fn it_handles_snippets_shorter_than_three_lines() {
    assert_eq!(Excerpts::local("only line"), "only line");
}

#[test]
fn it_returns_a_starter_for_an_empty_snippet() {
    let excerpt = Excerpts::local("");
    assert!(!excerpt.is_empty());
    assert!(excerpt.contains("def solve()"));
}

#[test]
fn it_returns_a_starter_for_a_blank_snippet() {
    assert_eq!(Excerpts::local("\n  \n\t\n"), Excerpts::local(""));
}

#[test]
fn it_caps_very_long_lines() {
    let snippet = "y".repeat(500);
    let excerpt = Excerpts::local(&snippet);
    assert_eq!(excerpt.chars().count(), 120);
}

#[test]
fn it_excerpts_a_realistic_snippet() {
    let excerpt = Excerpts::local(snippet_fixture());
    assert_eq!(
        excerpt,
        "def two_sum(nums, target):\nfor i in range(len(nums)):\nfor j in range(len(nums)):"
    );
}
