//! Search sessions: one cancelable ranking at a time.

use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use tokio_util::sync::CancellationToken;

use crate::matcher::{MatchOptions, rank};
use crate::model::{RankedResult, SearchIndex};

/// Tracks the ranking started for the search box.
///
/// Starting a new search cancels the previous one, so only the most recently
/// started search can ever produce results.
#[derive(Debug, Default)]
pub struct SearchSession {
    options: MatchOptions,
    current: Option<CancellationToken>,
}

impl SearchSession {
    pub fn new(options: MatchOptions) -> Self {
        Self {
            options,
            current: None,
        }
    }

    /// Cancel the outstanding search, if any, and hand out a fresh token.
    pub fn begin(&mut self) -> CancellationToken {
        self.cancel();
        let token = CancellationToken::new();
        self.current = Some(token.clone());
        token
    }

    /// Cancel the outstanding search, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }

    /// Start ranking `query` against `index`.
    ///
    /// The returned future resolves to `None` if another search was started
    /// (or [`cancel`](Self::cancel) was called) before it finished. `pause` is
    /// awaited between chunks of entries to let the event loop run.
    pub fn search<P, F>(
        &mut self,
        index: Rc<SearchIndex>,
        query: impl Into<String>,
        pause: P,
    ) -> LocalBoxFuture<'static, Option<Vec<RankedResult>>>
    where
        P: FnMut() -> F + 'static,
        F: Future<Output = ()> + 'static,
    {
        let token = self.begin();
        let options = self.options;
        let query = query.into();
        async move { rank(&query, &index.entries, options, &token, pause).await }.boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::matcher::yield_now;
    use crate::model::{SearchEntry, SearchKind};

    fn index() -> Rc<SearchIndex> {
        Rc::new(SearchIndex::new(
            ["Foo", "foo_bar", "Baz"]
                .into_iter()
                .map(|name| SearchEntry {
                    name_prelude: String::new(),
                    name: name.to_string(),
                    link: format!("{name}.html"),
                    desc: String::new(),
                    kind: SearchKind::Struct,
                })
                .collect(),
        ))
    }

    #[test]
    fn newer_search_cancels_older() {
        let mut session = SearchSession::default();
        let old = session.search(index(), "foo", yield_now);
        let new = session.search(index(), "baz", yield_now);
        assert!(block_on(old).is_none());
        let results = block_on(new).expect("latest search completes");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.name, "Baz");
    }

    #[test]
    fn cancel_stops_outstanding_search() {
        let mut session = SearchSession::default();
        let pending = session.search(index(), "foo", yield_now);
        session.cancel();
        assert!(block_on(pending).is_none());
    }

    #[test]
    fn begin_invalidates_previous_token() {
        let mut session = SearchSession::default();
        let first = session.begin();
        let second = session.begin();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }
}
