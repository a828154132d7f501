//! Viewport breakpoint tracking.

use crate::dom::Dom;
use crate::sidebar::SidebarController;

/// Which sidebar behaviour applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Mobile,
    Desktop,
}

impl Layout {
    /// Layout for the result of the `(min-width: N px)` media query.
    pub fn from_query(matches: bool) -> Self {
        if matches {
            Layout::Desktop
        } else {
            Layout::Mobile
        }
    }
}

/// Maps viewport changes onto the sidebar.
#[derive(Debug, Clone)]
pub struct LayoutMonitor {
    breakpoint_px: u32,
    current: Option<Layout>,
}

impl LayoutMonitor {
    pub fn new(breakpoint_px: u32) -> Self {
        Self {
            breakpoint_px,
            current: None,
        }
    }

    /// Layout for a viewport `width_px` wide.
    fn layout_for_width(&self, width_px: u32) -> Layout {
        Layout::from_query(width_px >= self.breakpoint_px)
    }

    /// Last observed layout; `None` before the first observation.
    pub fn current(&self) -> Option<Layout> {
        self.current
    }

    /// Record a media query result and apply it to the sidebar. Called once at
    /// startup and then on every change event.
    pub fn observe<D: Dom>(&mut self, dom: &mut D, sidebar: &mut SidebarController, matches: bool) {
        let layout = Layout::from_query(matches);
        if self.current != Some(layout) {
            tracing::debug!(?layout, "layout changed");
        }
        self.current = Some(layout);
        sidebar.apply_layout(dom, layout);
    }

    /// [`observe`](Self::observe) for a known viewport width.
    pub fn observe_width<D: Dom>(
        &mut self,
        dom: &mut D,
        sidebar: &mut SidebarController,
        width_px: u32,
    ) {
        let layout = self.layout_for_width(width_px);
        self.observe(dom, sidebar, layout == Layout::Desktop);
    }
}
