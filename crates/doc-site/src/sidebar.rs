//! Sidebar state machine
//!
//! On desktop the sidebar is always shown and toggling does nothing. On
//! mobile it slides in and out; when sliding out it only becomes
//! `visibility: hidden` once the CSS transition has finished, tracked by
//! [`SidebarState::pending_hide`].

use crate::dom::Dom;
use crate::layout::Layout;

const SHOWN: &str = "translateX(0%)";
const OFF_SCREEN: &str = "translateX(-100%)";

/// Sidebar flags, owned by [`SidebarController`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarState {
    /// The sidebar is slid in (mobile only).
    pub active: bool,
    /// The last observed layout was mobile.
    pub mobile: bool,
    /// A slide-out is running; hide the sidebar when it ends.
    pub pending_hide: bool,
}

#[derive(Debug, Clone)]
pub struct SidebarController {
    id: String,
    state: SidebarState,
}

impl SidebarController {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: SidebarState::default(),
        }
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    /// Header button: slide in when closed, slide out when open.
    pub fn toggle<D: Dom>(&mut self, dom: &mut D) {
        if !self.state.mobile {
            return;
        }
        self.state.pending_hide = false;
        if self.state.active {
            self.slide_out(dom);
        } else {
            dom.set_style(&self.id, "transform", SHOWN);
            dom.set_style(&self.id, "visibility", "visible");
            self.state.active = true;
            tracing::debug!("sidebar opened");
        }
    }

    /// A sidebar link was followed: slide out.
    pub fn close<D: Dom>(&mut self, dom: &mut D) {
        if !self.state.mobile {
            return;
        }
        self.state.pending_hide = false;
        self.slide_out(dom);
    }

    fn slide_out<D: Dom>(&mut self, dom: &mut D) {
        dom.set_style(&self.id, "transform", OFF_SCREEN);
        self.state.pending_hide = true;
        self.state.active = false;
        tracing::debug!("sidebar closing");
    }

    /// The sidebar's CSS transition finished.
    pub fn transition_end<D: Dom>(&mut self, dom: &mut D) {
        if !self.state.pending_hide {
            return;
        }
        dom.set_style(&self.id, "visibility", "hidden");
        self.state.pending_hide = false;
    }

    /// Switch between desktop and mobile behaviour.
    pub fn apply_layout<D: Dom>(&mut self, dom: &mut D, layout: Layout) {
        self.state.pending_hide = false;
        match layout {
            Layout::Desktop => {
                dom.set_style(&self.id, "visibility", "");
                dom.set_style(&self.id, "transform", "");
                self.state.mobile = false;
            }
            Layout::Mobile => {
                dom.set_style(&self.id, "visibility", "hidden");
                dom.set_style(&self.id, "transform", OFF_SCREEN);
                self.state.active = false;
                self.state.mobile = true;
            }
        }
    }
}
