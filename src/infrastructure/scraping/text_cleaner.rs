use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// UTF-8 punctuation that was decoded as Latin-1 or Windows-1252.
const MOJIBAKE: [(&str, &str); 28] = [
    ("\u{e2}\u{80}\u{99}", "'"),
    ("\u{e2}\u{20ac}\u{2122}", "'"),
    ("\u{e2}\u{80}\u{98}", "'"),
    ("\u{e2}\u{20ac}\u{2dc}", "'"),
    ("\u{e2}\u{80}\u{9c}", "\""),
    ("\u{e2}\u{20ac}\u{153}", "\""),
    ("\u{e2}\u{80}\u{9d}", "\""),
    ("\u{e2}\u{20ac}\u{9d}", "\""),
    ("\u{e2}\u{80}\u{9e}", "\""),
    ("\u{e2}\u{20ac}\u{17e}", "\""),
    ("\u{e2}\u{80}\u{9a}", ","),
    ("\u{e2}\u{20ac}\u{161}", ","),
    ("\u{e2}\u{80}\u{93}", "-"),
    ("\u{e2}\u{20ac}\u{201c}", "-"),
    ("\u{e2}\u{80}\u{94}", "--"),
    ("\u{e2}\u{20ac}\u{201d}", "--"),
    ("\u{e2}\u{80}\u{90}", "-"),
    ("\u{e2}\u{80}\u{91}", "-"),
    ("\u{e2}\u{20ac}\u{2018}", "-"),
    ("\u{e2}\u{80}\u{92}", "-"),
    ("\u{e2}\u{20ac}\u{2019}", "-"),
    ("\u{e2}\u{80}\u{a6}", "..."),
    ("\u{e2}\u{20ac}\u{a6}", "..."),
    ("\u{e2}\u{80}\u{a2}", "-"),
    ("\u{e2}\u{20ac}\u{a2}", "-"),
    ("\u{e2}\u{80}\u{a0}", " "),
    ("\u{e2}\u{20ac}\u{a0}", " "),
    ("\u{c2}\u{a0}", " "),
];

/// Correctly decoded typography folded to ASCII before the non-ASCII sweep.
const TYPOGRAPHY: [(char, &str); 10] = [
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201c}', "\""),
    ('\u{201d}', "\""),
    ('\u{2013}', "-"),
    ('\u{2014}', "--"),
    ('\u{2010}', "-"),
    ('\u{2011}', "-"),
    ('\u{2026}', "..."),
    ('\u{2022}', "-"),
];

static SPACED_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s{2,}\n").unwrap());
static TABBED_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\t{2,}\n").unwrap());
static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());
static TAB_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t{2,}").unwrap());
static LINE_BREAK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\n\s*){2,}").unwrap());
static UNDERSCORE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_{3,}").unwrap());
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Normalizes scraped page text to trimmed, single-spaced ASCII.
pub fn clean_scraped_text(text: &str) -> String {
    let text = SPACED_BLANK_LINES.replace_all(text, "\n");
    let text = TABBED_BLANK_LINES.replace_all(&text, "\n");
    let text = NEWLINE_RUNS.replace_all(&text, "\n");
    let text = TAB_RUNS.replace_all(&text, "\t");
    let text = LINE_BREAK_RUNS.replace_all(&text, "\n\n");
    let text = UNDERSCORE_RUNS.replace_all(&text, "_");

    let text = repair_mojibake(&text);
    let text = fold_to_ascii(&text);

    let text = SPACE_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}

pub fn repair_mojibake(text: &str) -> String {
    MOJIBAKE
        .iter()
        .fold(text.to_string(), |acc, (broken, fixed)| {
            if acc.contains(broken) {
                acc.replace(broken, fixed)
            } else {
                acc
            }
        })
}

/// NFKC-normalizes, folds typography, then blanks anything still non-ASCII.
fn fold_to_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.nfkc() {
        if ch.is_ascii() {
            out.push(ch);
        } else if let Some((_, ascii)) = TYPOGRAPHY.iter().find(|(c, _)| *c == ch) {
            out.push_str(ascii);
        } else {
            out.push(' ');
        }
    }
    out
}
