//! Fuzzy ranking of search entries
//!
//! Entries are scored on their `name` with `nucleo-matcher`, adjusted by
//! [`SearchKind::rank_bonus`](crate::model::SearchKind::rank_bonus) and sorted
//! best-first. Ranking runs as a future that periodically hands control back to
//! the event loop and gives up as soon as its [`CancellationToken`] fires.

use std::cmp::Ordering;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use tokio_util::sync::CancellationToken;

use crate::model::{RankedResult, SearchEntry};

/// Lowest adjusted score that still counts as a result.
pub const SCORE_FLOOR: f64 = -10_000.0;

/// Score given to entries that do not match at all. Always below
/// [`SCORE_FLOOR`], so such entries never reach the result list.
pub const NO_MATCH_SCORE: f64 = SCORE_FLOOR - 1.0;

/// Limits for one ranking pass.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    /// Maximum number of results returned.
    pub limit: usize,
    /// Entries scored between two yields to the event loop.
    pub yield_every: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            limit: 10,
            yield_every: 256,
        }
    }
}

/// Scores entry names against one query.
pub struct FuzzyMatcher {
    pattern: Pattern,
    matcher: Matcher,
    buf: Vec<char>,
}

impl FuzzyMatcher {
    pub fn new(query: &str) -> Self {
        Self {
            pattern: Pattern::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            ),
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
        }
    }

    /// Whether the query has nothing to match (empty or whitespace only).
    pub fn is_empty(&self) -> bool {
        self.pattern.atoms.is_empty()
    }

    /// Adjusted score of `entry`, or [`NO_MATCH_SCORE`].
    pub fn score(&mut self, entry: &SearchEntry) -> f64 {
        let haystack = char_haystack(&entry.name, &mut self.buf);
        match self.pattern.score(haystack, &mut self.matcher) {
            Some(base) => f64::from(base) + entry.kind.rank_bonus(),
            None => NO_MATCH_SCORE,
        }
    }

    /// Char offsets of `name` matched by the query, sorted and deduplicated.
    pub fn positions(&mut self, name: &str) -> Vec<u32> {
        let mut indices = Vec::new();
        let haystack = char_haystack(name, &mut self.buf);
        if self
            .pattern
            .indices(haystack, &mut self.matcher, &mut indices)
            .is_none()
        {
            return Vec::new();
        }
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

/// One haystack slot per `char` of `name`, so match indices are char offsets.
/// `Utf32Str::new` folds grapheme clusters instead, which shifts every index
/// after a combining mark.
fn char_haystack<'a>(name: &'a str, buf: &'a mut Vec<char>) -> Utf32Str<'a> {
    if name.is_ascii() {
        Utf32Str::Ascii(name.as_bytes())
    } else {
        buf.clear();
        buf.extend(name.chars());
        Utf32Str::Unicode(buf)
    }
}

/// Rank `entries` against `query`.
///
/// Returns `None` if `token` is cancelled before the ranking completes; the
/// token is checked up front, after every `pause` and once more at the end.
/// An empty query yields an empty list.
pub async fn rank<P, F>(
    query: &str,
    entries: &[SearchEntry],
    options: MatchOptions,
    token: &CancellationToken,
    mut pause: P,
) -> Option<Vec<RankedResult>>
where
    P: FnMut() -> F,
    F: Future<Output = ()>,
{
    if token.is_cancelled() {
        return None;
    }

    let mut matcher = FuzzyMatcher::new(query);
    if matcher.is_empty() {
        return Some(Vec::new());
    }

    let yield_every = options.yield_every.max(1);
    let mut scored: Vec<(usize, f64)> = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        if idx > 0 && idx % yield_every == 0 {
            pause().await;
            if token.is_cancelled() {
                tracing::debug!(query, scored = idx, "ranking cancelled");
                return None;
            }
        }
        let score = matcher.score(entry);
        if score >= SCORE_FLOOR {
            scored.push((idx, score));
        }
    }

    // Stable: equal scores keep index order.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(options.limit);

    if token.is_cancelled() {
        return None;
    }

    let results = scored
        .into_iter()
        .map(|(idx, score)| {
            let entry = entries[idx].clone();
            let positions = matcher.positions(&entry.name);
            RankedResult {
                entry,
                score,
                positions,
            }
        })
        .collect();
    Some(results)
}

/// Yield once to whatever is driving the current task.
pub fn yield_now() -> YieldNow {
    YieldNow { yielded: false }
}

/// Future returned by [`yield_now`].
#[derive(Debug)]
pub struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}
