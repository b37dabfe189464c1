use dosesense::application::services::similarity_ratio;

#[test]
fn given_overlapping_strings_when_scoring_then_ratio_counts_matching_blocks() {
    assert_eq!(similarity_ratio("abcd", "bcde"), 0.75);
}

#[test]
fn given_disjoint_strings_when_scoring_then_ratio_is_zero() {
    assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
}

#[test]
fn given_two_empty_strings_when_scoring_then_ratio_is_one() {
    assert_eq!(similarity_ratio("", ""), 1.0);
}

#[test]
fn given_long_identical_strings_of_popular_characters_when_scoring_then_ratio_is_one() {
    let text = "ab".repeat(150);

    assert_eq!(similarity_ratio(&text, &text), 1.0);
}

#[test]
fn given_non_ascii_text_when_scoring_then_characters_not_bytes_are_compared() {
    assert_eq!(similarity_ratio("café", "cafe"), 0.75);
}
