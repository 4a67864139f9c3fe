use std::collections::HashMap;

use super::model::{Dimension, Record};

/// How many entries each ranking keeps.
pub const TOP_N: usize = 10;

/// Ranked `(label, count)` pairs for one dimension of the filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub dimension: Dimension,
    pub entries: Vec<(String, usize)>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }

    pub fn min_count(&self) -> usize {
        self.entries.iter().map(|(_, c)| *c).min().unwrap_or(0)
    }
}

/// Count every token of `dimension` across `records` and keep the top ten.
pub fn aggregate<'a, I>(records: I, dimension: Dimension) -> Aggregation
where
    I: IntoIterator<Item = &'a Record>,
{
    let tokens = records.into_iter().flat_map(|r| r.tokens(dimension));
    Aggregation {
        dimension,
        entries: top_tokens(tokens, TOP_N),
    }
}

/// Count occurrences and return the `n` most frequent tokens.
///
/// Sorted by descending count; equal counts keep the order in which the
/// token was first seen.
pub fn top_tokens<'a, I>(tokens: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    // token -> (first position, count)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, token) in tokens.into_iter().enumerate() {
        counts.entry(token).or_insert((pos, 0)).1 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(token, (first, count))| (token, first, count))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));

    ranked
        .into_iter()
        .take(n)
        .map(|(token, _, count)| (token.to_string(), count))
        .collect()
}
