use std::sync::LazyLock;

use regex::Regex;

use super::sequence_matcher::similarity_ratio;

pub const DEFAULT_CONTEXT_SENTENCES: usize = 2;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;
pub const MAX_CONTEXT_CHARS: usize = 1500;

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Picks the sentence window of `full_text` that best matches `snippet`.
///
/// Returns `snippet` unchanged when no sentence scores strictly above
/// `similarity_threshold`. The window spans `context_sentences` on each side
/// of the best match and is clipped to [`MAX_CONTEXT_CHARS`].
pub fn select_context(
    full_text: &str,
    snippet: &str,
    context_sentences: usize,
    similarity_threshold: f64,
) -> String {
    let sentences = split_sentences(full_text);

    let mut best: Option<(usize, f64)> = None;
    for (index, sentence) in sentences.iter().enumerate() {
        let ratio = similarity_ratio(snippet, sentence);
        let best_ratio = best.map(|(_, r)| r).unwrap_or(0.0);
        if ratio > similarity_threshold && ratio > best_ratio {
            best = Some((index, ratio));
        }
    }

    let Some((best_index, _)) = best else {
        return snippet.to_string();
    };

    let start = best_index.saturating_sub(context_sentences);
    let end = (best_index + context_sentences + 1).min(sentences.len());
    let window = sentences[start..end].join(" ");

    clip_to_sentence_boundary(&window, MAX_CONTEXT_CHARS)
}

/// Splits after `.`, `!` or `?` followed by whitespace, keeping the punctuation.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for found in SENTENCE_BREAK.find_iter(text) {
        sentences.push(&text[start..found.start() + 1]);
        start = found.end();
    }
    sentences.push(&text[start..]);
    sentences
}

/// Cuts `text` to at most `limit` characters, preferring the last sentence
/// boundary, then the last period, then the last space.
pub fn clip_to_sentence_boundary(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let head_end = text
        .char_indices()
        .nth(limit)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len());
    let head = &text[..head_end];
    // One extra char so a terminator at the limit still sees its whitespace.
    let lookahead_end = text[head_end..]
        .chars()
        .next()
        .map_or(head_end, |c| head_end + c.len_utf8());

    let cut = SENTENCE_BREAK
        .find_iter(&text[..lookahead_end])
        .filter(|found| found.start() < head_end)
        .last()
        .map(|found| found.start() + 1)
        .or_else(|| head.rfind('.').map(|offset| offset + 1))
        .or_else(|| head.rfind(' ').map(|offset| offset + 1))
        .unwrap_or(head.len());

    head[..cut].trim().to_string()
}
