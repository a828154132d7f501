//! Doc Site — client-side behaviour for generated documentation pages
//!
//! This crate provides:
//! - `loader`, `matcher`, `search`: loading the search index once and ranking
//!   entries against a query, with stale queries cancelled
//! - `render`, `breaks`, `escape`: turning ranked entries into result markup
//! - `collapsible`, `sidebar`, `layout`: section toggles and the responsive
//!   navigation sidebar
//! - `page`: the event-driven controller tying the above to a [`dom::Dom`]
//! - `builder`, `markup`, `site`: build-time generation of the index and the
//!   page elements the runtime looks for
//! - `web` (feature-gated): the browser binding and `wasm-bindgen` entry point

pub mod breaks;
pub mod builder;
pub mod collapsible;
pub mod config;
pub mod dom;
pub mod error;
pub mod escape;
pub mod layout;
pub mod loader;
pub mod markup;
pub mod matcher;
pub mod model;
pub mod page;
pub mod render;
pub mod search;
pub mod sidebar;
pub mod site;

#[cfg(feature = "wasm")]
pub mod logging;
#[cfg(feature = "wasm")]
pub mod web;

pub use config::SiteConfig;
pub use dom::{Dom, MemoryDom};
pub use error::{ConfigError, LoadError};
pub use loader::{IndexFetcher, IndexLoader};
pub use matcher::{MatchOptions, rank};
pub use model::{RankedResult, SearchEntry, SearchIndex, SearchKind};
pub use page::Page;
