//! Page controller
//!
//! Owns the DOM handle and all UI state of one page. Each browser event maps to
//! one method here; the `web` module only forwards events.

use std::future::Future;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::collapsible;
use crate::config::{MAX_RESULTS, SiteConfig};
use crate::dom::Dom;
use crate::layout::{Layout, LayoutMonitor};
use crate::matcher::MatchOptions;
use crate::model::{RankedResult, SearchIndex};
use crate::render::ResultRenderer;
use crate::search::SearchSession;
use crate::sidebar::{SidebarController, SidebarState};

/// Elements hidden by the stylesheet until scripting takes over.
const SCRIPT_ONLY_DISPLAY: &str = "block";

pub struct Page<D> {
    dom: D,
    config: SiteConfig,
    sidebar: SidebarController,
    layout: LayoutMonitor,
    session: SearchSession,
    renderer: ResultRenderer,
}

impl<D: Dom> Page<D> {
    pub fn new(dom: D, config: SiteConfig) -> Self {
        let options = MatchOptions {
            limit: config.max_results.min(MAX_RESULTS),
            yield_every: config.yield_every,
        };
        Self {
            sidebar: SidebarController::new(config.ids.sidebar.clone()),
            layout: LayoutMonitor::new(config.breakpoint_px),
            session: SearchSession::new(options),
            renderer: ResultRenderer::new(&config),
            dom,
            config,
        }
    }

    /// One-time setup once the document is ready: collapsible sections, and
    /// the search box and header button that only work with scripting.
    /// Returns the ids of the collapsible sections that have a button.
    pub fn install(&mut self) -> Vec<String> {
        let sections = collapsible::install(&mut self.dom);
        for id in [&self.config.ids.search, &self.config.ids.header_button] {
            if !self.dom.set_style(id, "display", SCRIPT_ONLY_DISPLAY) {
                tracing::debug!(%id, "element missing, left hidden");
            }
        }
        tracing::debug!(sections = sections.len(), "page installed");
        sections
    }

    /// Result of the desktop media query, at startup and on every change.
    pub fn on_viewport(&mut self, desktop: bool) {
        self.layout.observe(&mut self.dom, &mut self.sidebar, desktop);
    }

    /// Viewport width, where no media query list is available.
    pub fn on_viewport_width(&mut self, width_px: u32) {
        self.layout
            .observe_width(&mut self.dom, &mut self.sidebar, width_px);
    }

    pub fn on_header_button(&mut self) {
        self.sidebar.toggle(&mut self.dom);
    }

    /// A `sidebar_clickable` element was clicked.
    pub fn on_sidebar_link(&mut self) {
        self.sidebar.close(&mut self.dom);
    }

    pub fn on_sidebar_transition_end(&mut self) {
        self.sidebar.transition_end(&mut self.dom);
    }

    /// The `.vis_button` of `section` was clicked.
    pub fn on_section_button(&mut self, section: &str) -> Option<bool> {
        collapsible::toggle(&mut self.dom, section)
    }

    /// Start a search for `query`, cancelling any search still running.
    ///
    /// Pass the resolved results to [`show_results`](Self::show_results); a
    /// `None` means a newer search superseded this one and nothing should be
    /// shown.
    pub fn start_search<P, F>(
        &mut self,
        index: Rc<SearchIndex>,
        query: &str,
        pause: P,
    ) -> LocalBoxFuture<'static, Option<Vec<RankedResult>>>
    where
        P: FnMut() -> F + 'static,
        F: Future<Output = ()> + 'static,
    {
        self.session.search(index, query, pause)
    }

    /// Replace the result panel with `results`.
    pub fn show_results(&mut self, results: &[RankedResult]) -> usize {
        self.renderer.render(&mut self.dom, results)
    }

    /// Focus left the search area: drop the panel and any pending search.
    pub fn dismiss_results(&mut self) {
        self.session.cancel();
        self.renderer.clear(&mut self.dom);
    }

    pub fn sidebar_state(&self) -> SidebarState {
        self.sidebar.state()
    }

    pub fn layout(&self) -> Option<Layout> {
        self.layout.current()
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }
}
