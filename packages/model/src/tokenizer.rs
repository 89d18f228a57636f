//! Splits raw origin text into propositions and clause items.
//!
//! Every non-blank line becomes one proposition; every whitespace-separated
//! word of a line becomes one clause item.

/// Tokenize `text` into the item texts of each proposition, in order
pub fn tokenize(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(|line| {
            line.split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|items| !items.is_empty())
        .collect()
}
