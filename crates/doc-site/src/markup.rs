//! HTML fragments the runtime expects to find on a page
//!
//! Generated pages are assembled from these pieces so element ids and marker
//! classes always agree with what [`crate::page::Page`] looks up.

use std::fmt::Write as _;

use crate::collapsible::{COLLAPSED_BY_DEFAULT_CLASS, COLLAPSIBLE_CLASS, button_id};
use crate::config::{CONFIG_ELEMENT_ID, ElementIds, SiteConfig};
use crate::escape::{escape_attr, escape_script_content, escape_text};

pub const SIDEBAR_CLICKABLE_CLASS: &str = "sidebar_clickable";

/// The search box. Hidden until the script enables it.
pub fn search_box(ids: &ElementIds) -> String {
    format!(
        r#"<div id="{search}" style="display: none"><input id="{input}" placeholder="Search" autocomplete="off"/></div>"#,
        search = escape_attr(&ids.search),
        input = escape_attr(&ids.search_input),
    )
}

/// The mobile menu button. Hidden until the script enables it.
pub fn header_button(ids: &ElementIds) -> String {
    format!(
        r#"<button id="{}" style="display: none" aria-label="Toggle navigation">&#9776;</button>"#,
        escape_attr(&ids.header_button)
    )
}

/// One line of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarLink {
    pub text: String,
    /// `None` renders a plain heading.
    pub href: Option<String>,
    pub header: bool,
}

/// The navigation sidebar. Links close the sidebar on mobile when followed.
pub fn sidebar(ids: &ElementIds, links: &[SidebarLink]) -> String {
    let mut html = format!(r#"<nav id="{}">"#, escape_attr(&ids.sidebar));
    for link in links {
        let class = if link.header {
            "sidebar_header"
        } else {
            "sidebar_link"
        };
        let text = escape_text(&link.text);
        let title = escape_attr(&link.text);
        let _ = match &link.href {
            Some(href) => write!(
                html,
                r#"<a class="{class} {SIDEBAR_CLICKABLE_CLASS}" href="{}" title="{title}">{text}</a>"#,
                escape_attr(href)
            ),
            None => write!(html, r#"<p class="{class}" title="{title}">{text}</p>"#),
        };
    }
    html.push_str("</nav>");
    html
}

/// A titled section whose body can be collapsed with its `.vis_button`.
///
/// The button starts out invisible; the runtime reveals it.
pub fn collapsible_section(id: &str, title: &str, body: &str, collapsed_by_default: bool) -> String {
    let mut class = COLLAPSIBLE_CLASS.to_string();
    if collapsed_by_default {
        class.push(' ');
        class.push_str(COLLAPSED_BY_DEFAULT_CLASS);
    }
    format!(
        r#"<section><h2>{title} <button id="{button}" class="vis_button" style="visibility: hidden">[-]</button></h2><div id="{id}" class="{class}">{body}</div></section>"#,
        title = escape_text(title),
        button = escape_attr(&button_id(id)),
        id = escape_attr(id),
    )
}

/// Everything needed to produce a full page.
#[derive(Debug, Clone)]
pub struct PageShell<'a> {
    pub title: &'a str,
    pub stylesheet: &'a str,
    /// JS glue emitted by `wasm-bindgen` for this crate.
    pub script: &'a str,
    pub sidebar: &'a [SidebarLink],
    /// Trusted content markup.
    pub content: &'a str,
    /// Embedded when it differs from the defaults.
    pub config: &'a SiteConfig,
}

impl PageShell<'_> {
    /// The full page. Fails only if the configuration cannot be serialized.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        let ids = &self.config.ids;
        let config_block = if *self.config != SiteConfig::default() {
            let json = serde_json::to_string(self.config)?;
            format!(
                r#"
  <script id="{CONFIG_ELEMENT_ID}" type="application/json">{}</script>"#,
                escape_script_content(&json)
            )
        } else {
            String::new()
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <link rel="stylesheet" href="{stylesheet}">{config_block}
  <script type="module">import init from "{script}"; init();</script>
</head>
<body>
  <header>{header_button}<h1>{title}</h1></header>
  {sidebar}
  <main>
    {search}
    {content}
  </main>
</body>
</html>"#,
            title = escape_text(self.title),
            stylesheet = escape_attr(self.stylesheet),
            script = escape_attr(self.script),
            header_button = header_button(ids),
            sidebar = sidebar(ids, self.sidebar),
            search = search_box(ids),
            content = self.content,
        ))
    }
}
