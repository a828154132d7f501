use std::rc::Rc;

use doc_site::builder::SearchIndexBuilder;
use doc_site::collapsible::{HIDDEN_CLASS, button_id, is_collapsed};
use doc_site::layout::Layout;
use doc_site::matcher::yield_now;
use doc_site::{
    Dom, IndexFetcher, IndexLoader, LoadError, MemoryDom, Page, SearchEntry, SearchIndex,
    SearchKind, SiteConfig,
};
use futures::FutureExt;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;

struct StaticFetcher(String);

impl IndexFetcher for StaticFetcher {
    fn fetch(&self, _url: &str) -> LocalBoxFuture<'static, Result<String, LoadError>> {
        let body = self.0.clone();
        async move { Ok(body) }.boxed_local()
    }
}

fn document() -> MemoryDom {
    let mut dom = MemoryDom::new();
    dom.insert("search", &[], "")
        .insert("search_input", &[], "")
        .insert("sidebar", &[], "")
        .insert("header_button", &[], "")
        .insert("functions", &["collapsible"], "")
        .insert(&button_id("functions"), &["vis_button"], "[-]")
        .insert("members", &["collapsible", "collapsed_by_default"], "")
        .insert(&button_id("members"), &["vis_button"], "[-]")
        .insert("orphan", &["collapsible"], "");
    dom
}

fn page() -> Page<MemoryDom> {
    let mut page = Page::new(document(), SiteConfig::default());
    page.install();
    page
}

fn engine_index() -> SearchIndex {
    let mut builder = SearchIndexBuilder::new();
    builder
        .type_item(SearchKind::Class, "Foo", "<p>A class.</p>")
        .unwrap()
        .function("foo_bar", "")
        .member("health", "");
    builder
        .type_item(SearchKind::Struct, "Vec3", "")
        .unwrap()
        .member("x", "");
    builder.global_constant("MAX_PLAYERS", "");
    builder.finish()
}

fn load(index: &SearchIndex) -> Rc<SearchIndex> {
    let loader = IndexLoader::new(StaticFetcher(index.to_json().unwrap()), "search.json");
    block_on(loader.load()).unwrap()
}

#[test]
fn install_prepares_page() {
    let page = page();
    let dom = page.dom();

    assert_eq!(dom.style("search", "display").as_deref(), Some("block"));
    assert_eq!(dom.style("header_button", "display").as_deref(), Some("block"));

    assert!(!is_collapsed(dom, "functions"));
    assert!(is_collapsed(dom, "members"));
    assert_eq!(dom.text(&button_id("members")).as_deref(), Some("[+]"));
    assert_eq!(
        dom.style(&button_id("functions"), "visibility").as_deref(),
        Some("visible")
    );
    // no button, nothing to wire
    assert!(!dom.has_class("orphan", HIDDEN_CLASS));
}

#[test]
fn section_button_toggles_back_and_forth() {
    let mut page = page();
    assert_eq!(page.on_section_button("functions"), Some(true));
    assert_eq!(
        page.dom().text(&button_id("functions")).as_deref(),
        Some("[+]")
    );
    assert_eq!(page.on_section_button("functions"), Some(false));
    assert_eq!(
        page.dom().text(&button_id("functions")).as_deref(),
        Some("[-]")
    );
    assert_eq!(page.on_section_button("missing"), None);
}

#[test]
fn generated_index_is_searchable() {
    let index = load(&engine_index());
    let mut page = page();

    let results = block_on(page.start_search(index, "foo", yield_now)).unwrap();
    let names: Vec<_> = results.iter().map(|r| r.entry.name.as_str()).collect();
    assert!(names.contains(&"Foo"));
    assert!(names.contains(&"foo_bar"));
    assert!(!names.contains(&"Vec3"));

    assert_eq!(page.show_results(&results), results.len());
    let html = page.dom().html("search_results").unwrap();
    assert!(html.contains(r#"href="class.Foo.html""#));
    assert!(html.contains(r#"href="class.Foo.html#function.foo_bar""#));
    assert!(html.contains("highlight_emphasis"));
}

#[test]
fn only_latest_query_produces_results() {
    let index = load(&engine_index());
    let mut page = page();

    let stale = page.start_search(index.clone(), "foo", yield_now);
    let latest = page.start_search(index, "vec", yield_now);

    assert!(block_on(stale).is_none());
    let results = block_on(latest).unwrap();
    assert_eq!(results[0].entry.name, "Vec3");
}

#[test]
fn results_are_capped() {
    let entries = (0..30)
        .map(|i| SearchEntry {
            name_prelude: String::new(),
            name: format!("Item{i}"),
            link: format!("struct.Item{i}.html"),
            desc: String::new(),
            kind: SearchKind::Struct,
        })
        .collect();
    let index = Rc::new(SearchIndex::new(entries));
    let mut page = page();

    let results = block_on(page.start_search(index, "item", yield_now)).unwrap();
    assert_eq!(results.len(), 10);
    assert_eq!(page.show_results(&results), 10);
}

#[test]
fn rerender_replaces_panel_and_dismiss_removes_it() {
    let index = load(&engine_index());
    let mut page = page();

    for query in ["foo", "health", "max"] {
        let results = block_on(page.start_search(index.clone(), query, yield_now)).unwrap();
        page.show_results(&results);
        assert_eq!(page.dom().count("search_results"), 1);
    }

    let pending = page.start_search(index, "vec", yield_now);
    page.dismiss_results();
    assert!(block_on(pending).is_none());
    assert_eq!(page.dom().count("search_results"), 0);
}

#[test]
fn empty_query_clears_panel() {
    let index = load(&engine_index());
    let mut page = page();

    let results = block_on(page.start_search(index.clone(), "foo", yield_now)).unwrap();
    page.show_results(&results);

    let results = block_on(page.start_search(index, "", yield_now)).unwrap();
    assert!(results.is_empty());
    assert_eq!(page.show_results(&results), 0);
    assert!(!page.dom().exists("search_results"));
}

#[test]
fn sidebar_follows_viewport() {
    let mut page = page();

    // 500px wide
    page.on_viewport(true);
    assert_eq!(page.layout(), Some(Layout::Desktop));
    page.on_header_button();
    assert!(!page.sidebar_state().active);
    assert_eq!(page.dom().style("sidebar", "visibility"), None);

    // shrink to 400px
    page.on_viewport(false);
    assert_eq!(page.layout(), Some(Layout::Mobile));
    assert_eq!(
        page.dom().style("sidebar", "visibility").as_deref(),
        Some("hidden")
    );

    page.on_header_button();
    assert!(page.sidebar_state().active);
    assert_eq!(
        page.dom().style("sidebar", "transform").as_deref(),
        Some("translateX(0%)")
    );

    page.on_sidebar_link();
    let state = page.sidebar_state();
    assert!(!state.active && state.pending_hide);
    // still visible while sliding out
    assert_eq!(
        page.dom().style("sidebar", "visibility").as_deref(),
        Some("visible")
    );
    page.on_sidebar_transition_end();
    assert_eq!(
        page.dom().style("sidebar", "visibility").as_deref(),
        Some("hidden")
    );
    assert!(!page.sidebar_state().pending_hide);

    // back to desktop: inline styles dropped
    page.on_viewport(true);
    assert_eq!(page.dom().style("sidebar", "visibility"), None);
    assert_eq!(page.dom().style("sidebar", "transform"), None);
}

#[test]
fn viewport_width_uses_inclusive_breakpoint() {
    let mut page = page();
    page.on_viewport_width(481);
    assert_eq!(page.layout(), Some(Layout::Desktop));
    page.on_viewport_width(480);
    assert_eq!(page.layout(), Some(Layout::Mobile));
    assert!(page.sidebar_state().mobile);
}

#[test]
fn reopening_before_transition_end_keeps_sidebar_visible() {
    let mut page = page();
    page.on_viewport(false);

    page.on_header_button();
    page.on_header_button();
    assert!(page.sidebar_state().pending_hide);
    page.on_header_button();
    assert!(!page.sidebar_state().pending_hide);

    page.on_sidebar_transition_end();
    assert_eq!(
        page.dom().style("sidebar", "visibility").as_deref(),
        Some("visible")
    );
}
