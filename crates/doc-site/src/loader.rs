//! One-shot loading of the search index.
//!
//! The first call to [`IndexLoader::load`] starts the fetch; every later call
//! (including ones made while the fetch is still running) shares the same
//! outcome. Failures are cached too: there are no retries within a page
//! session.

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use crate::error::LoadError;
use crate::model::SearchIndex;

/// Fetches the raw text of a resource.
pub trait IndexFetcher {
    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<String, LoadError>>;
}

pub type LoadResult = Result<Rc<SearchIndex>, LoadError>;

/// A shared handle on the (possibly still running) load.
pub type IndexFuture = Shared<LocalBoxFuture<'static, LoadResult>>;

pub struct IndexLoader<F> {
    fetcher: F,
    url: String,
    pending: RefCell<Option<IndexFuture>>,
}

impl<F: IndexFetcher> IndexLoader<F> {
    pub fn new(fetcher: F, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
            pending: RefCell::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The search index, fetched on first use.
    pub fn load(&self) -> IndexFuture {
        self.pending
            .borrow_mut()
            .get_or_insert_with(|| {
                tracing::debug!(url = %self.url, "fetching search index");
                let body = self.fetcher.fetch(&self.url);
                parse_index(body, self.url.clone()).boxed_local().shared()
            })
            .clone()
    }
}

async fn parse_index(
    body: LocalBoxFuture<'static, Result<String, LoadError>>,
    url: String,
) -> LoadResult {
    let text = body.await?;
    let index = SearchIndex::from_json(&text)?;
    tracing::info!(entries = index.len(), %url, "search index loaded");
    Ok(Rc::new(index))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;

    use super::*;

    struct CountingFetcher {
        calls: Rc<Cell<usize>>,
        body: Result<String, LoadError>,
    }

    impl IndexFetcher for CountingFetcher {
        fn fetch(&self, _url: &str) -> LocalBoxFuture<'static, Result<String, LoadError>> {
            self.calls.set(self.calls.get() + 1);
            let body = self.body.clone();
            async move { body }.boxed_local()
        }
    }

    fn loader(body: Result<&str, LoadError>) -> (IndexLoader<CountingFetcher>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let fetcher = CountingFetcher {
            calls: calls.clone(),
            body: body.map(str::to_string),
        };
        (IndexLoader::new(fetcher, "search.json"), calls)
    }

    const INDEX: &str = r#"{"results":[{"name_prelude":"","name":"Foo","link":"class.Foo.html","desc":"","kind":"Class"}]}"#;

    #[test]
    fn loads_once() {
        let (loader, calls) = loader(Ok(INDEX));
        assert_eq!(calls.get(), 0);
        let first = loader.load();
        let second = loader.load();
        let a = block_on(first).unwrap();
        let b = block_on(second).unwrap();
        let c = block_on(loader.load()).unwrap();
        assert_eq!(calls.get(), 1);
        assert!(Rc::ptr_eq(&a, &b) && Rc::ptr_eq(&b, &c));
        assert_eq!(a.entries[0].name, "Foo");
    }

    #[test]
    fn network_failure_is_cached() {
        let err = LoadError::Network {
            url: "search.json".into(),
            message: "offline".into(),
        };
        let (loader, calls) = loader(Err(err.clone()));
        assert_eq!(block_on(loader.load()).unwrap_err(), err);
        assert_eq!(block_on(loader.load()).unwrap_err(), err);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        let (loader, _) = loader(Ok(r#"{"results": 3}"#));
        assert!(matches!(
            block_on(loader.load()),
            Err(LoadError::Parse(_))
        ));
    }
}
