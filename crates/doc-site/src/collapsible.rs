//! Collapsible content sections.
//!
//! A section `<id>` with class `collapsible` is paired with a button
//! `<id>.vis_button` whose label carries a `-` (expanded) or `+` (collapsed)
//! glyph. Collapsing adds the `hide` class to the section.

use crate::dom::Dom;

pub const COLLAPSIBLE_CLASS: &str = "collapsible";
pub const COLLAPSED_BY_DEFAULT_CLASS: &str = "collapsed_by_default";
pub const HIDDEN_CLASS: &str = "hide";

const BUTTON_SUFFIX: &str = ".vis_button";

/// Id of the button that toggles section `id`.
pub fn button_id(id: &str) -> String {
    format!("{id}{BUTTON_SUFFIX}")
}

/// Prepare every collapsible section on the page.
///
/// Buttons are revealed (they stay hidden when scripting is off) and sections
/// marked `collapsed_by_default` are collapsed through [`toggle`]. Sections
/// without a button are left alone. Returns the ids of the sections whose
/// buttons should receive click handlers.
pub fn install<D: Dom>(dom: &mut D) -> Vec<String> {
    let mut wired = Vec::new();
    for id in dom.ids_with_class(COLLAPSIBLE_CLASS) {
        let button = button_id(&id);
        if !dom.set_style(&button, "visibility", "visible") {
            tracing::debug!(section = %id, "collapsible without a button");
            continue;
        }
        if dom.has_class(&id, COLLAPSED_BY_DEFAULT_CLASS) {
            toggle(dom, &id);
        }
        wired.push(id);
    }
    wired
}

/// Flip section `id` between expanded and collapsed and update its button
/// glyph. Returns whether the section is now collapsed, or `None` if it does
/// not exist.
pub fn toggle<D: Dom>(dom: &mut D, id: &str) -> Option<bool> {
    let collapsed = dom.toggle_class(id, HIDDEN_CLASS)?;
    let button = button_id(id);
    if let Some(label) = dom.text(&button) {
        let label = if collapsed {
            label.replacen('-', "+", 1)
        } else {
            label.replacen('+', "-", 1)
        };
        dom.set_text(&button, &label);
    }
    Some(collapsed)
}

/// Whether section `id` is currently collapsed.
pub fn is_collapsed<D: Dom>(dom: &D, id: &str) -> bool {
    dom.has_class(id, HIDDEN_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    fn page() -> MemoryDom {
        let mut dom = MemoryDom::new();
        dom.insert("functions", &["collapsible"], "")
            .insert("functions.vis_button", &[], "[-]")
            .insert("members", &["collapsible", "collapsed_by_default"], "")
            .insert("members.vis_button", &[], "[-]")
            .insert("orphan", &["collapsible", "collapsed_by_default"], "");
        dom
    }

    #[test]
    fn button_id_appends_suffix() {
        assert_eq!(button_id("constants"), "constants.vis_button");
    }

    #[test]
    fn install_reveals_buttons_and_collapses_defaults() {
        let mut dom = page();
        let wired = install(&mut dom);
        assert_eq!(wired, vec!["functions", "members"]);
        assert_eq!(
            dom.style("functions.vis_button", "visibility").as_deref(),
            Some("visible")
        );
        assert!(!is_collapsed(&dom, "functions"));
        assert!(is_collapsed(&dom, "members"));
        assert_eq!(dom.text("members.vis_button").as_deref(), Some("[+]"));
        // no button, nothing to click: stays expanded
        assert!(!is_collapsed(&dom, "orphan"));
    }

    #[test]
    fn toggling_twice_restores_state() {
        let mut dom = page();
        assert_eq!(toggle(&mut dom, "functions"), Some(true));
        assert_eq!(dom.text("functions.vis_button").as_deref(), Some("[+]"));
        assert_eq!(toggle(&mut dom, "functions"), Some(false));
        assert_eq!(dom.text("functions.vis_button").as_deref(), Some("[-]"));
        assert!(!is_collapsed(&dom, "functions"));
    }

    #[test]
    fn missing_section_is_a_no_op() {
        let mut dom = page();
        assert_eq!(toggle(&mut dom, "nope"), None);
    }
}
