//! Search result rendering
//!
//! Produces the `search_results` container markup and swaps it into the page,
//! so at most one result panel is ever present.

use std::fmt::Write as _;

use crate::breaks::{BreakStyle, insert_breaks};
use crate::config::{MAX_RESULTS, SiteConfig};
use crate::dom::Dom;
use crate::escape::{escape_attr, escape_text};
use crate::model::RankedResult;

/// A run of name characters that either all matched the query or all did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Split `name` into matched / unmatched runs. `positions` are sorted char
/// offsets; offsets past the end are ignored.
pub fn highlight_segments<'a>(name: &'a str, positions: &[u32]) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut pending = positions.iter().copied().peekable();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (char_idx, (byte_idx, _)) in name.char_indices().enumerate() {
        while pending.next_if(|&p| (p as usize) < char_idx).is_some() {}
        let matched = pending.peek().is_some_and(|&p| p as usize == char_idx);
        match current {
            Some(state) if state == matched => {}
            Some(state) => {
                segments.push(Segment {
                    text: &name[start..byte_idx],
                    matched: state,
                });
                start = byte_idx;
                current = Some(matched);
            }
            None => current = Some(matched),
        }
    }
    if let Some(state) = current {
        segments.push(Segment {
            text: &name[start..],
            matched: state,
        });
    }
    segments
}

/// Renders ranked results into the page.
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    parent_id: String,
    results_id: String,
    break_style: BreakStyle,
    max_results: usize,
}

impl ResultRenderer {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            parent_id: config.ids.search.clone(),
            results_id: config.ids.search_results.clone(),
            break_style: config.break_style,
            max_results: config.max_results.min(MAX_RESULTS),
        }
    }

    /// Replace any rendered results with `results`. Returns how many entries
    /// were rendered; an empty list only removes the old panel.
    pub fn render<D: Dom>(&self, dom: &mut D, results: &[RankedResult]) -> usize {
        self.clear(dom);
        let Some(html) = self.to_html(results) else {
            return 0;
        };
        if !dom.append_html(&self.parent_id, &self.results_id, &html) {
            tracing::debug!(parent = %self.parent_id, "search container missing, results dropped");
            return 0;
        }
        results.len().min(self.max_results)
    }

    /// Remove the result panel, if any.
    pub fn clear<D: Dom>(&self, dom: &mut D) {
        dom.remove(&self.results_id);
    }

    /// Markup for the result panel, or `None` when there is nothing to show.
    pub fn to_html(&self, results: &[RankedResult]) -> Option<String> {
        if results.is_empty() {
            return None;
        }
        let shown = &results[..results.len().min(self.max_results)];

        let mut html = format!(r#"<div id="{}">"#, escape_attr(&self.results_id));
        for (i, result) in shown.iter().enumerate() {
            let entry = &result.entry;
            let border = if i + 1 != shown.len() {
                " search_result_border"
            } else {
                ""
            };
            let _ = write!(
                html,
                r#"<a href="{link}" class="search_result_link"><div class="search_result{border}"><div class="search_text search_kind">{kind}</div><div class="search_text search_name">{prelude}<span class="{class}">{name}</span></div><div class="search_text search_desc">{desc}</div></div></a>"#,
                link = escape_attr(&entry.link),
                kind = entry.kind.label(),
                prelude = self.text(&entry.name_prelude),
                class = entry.kind.css_class(),
                name = self.highlighted_name(&entry.name, &result.positions),
                desc = entry.desc,
            );
        }
        html.push_str("</div>");
        Some(html)
    }

    fn text(&self, s: &str) -> String {
        escape_text(&insert_breaks(s, self.break_style))
    }

    fn highlighted_name(&self, name: &str, positions: &[u32]) -> String {
        let mut out = String::new();
        for segment in highlight_segments(name, positions) {
            if segment.matched {
                out.push_str(r#"<span class="highlight_emphasis">"#);
                out.push_str(&self.text(segment.text));
                out.push_str("</span>");
            } else {
                out.push_str(&self.text(segment.text));
            }
        }
        out
    }
}
